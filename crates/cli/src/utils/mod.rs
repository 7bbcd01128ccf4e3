pub mod parser;

pub use parser::{FileLocation, parse_filepath_with_line};
