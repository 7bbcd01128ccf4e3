pub mod path;
pub mod serde_helpers;

pub use path::find_upward;
