//! Rust source analysis: tree-sitter symbols plus the line scanners used for
//! module paths and scope resolution.

pub mod module_graph;
pub mod rust_parser;
pub mod scope_resolver;
pub mod source_scan;
pub mod utils;

// Re-export commonly used items
pub use module_graph::{ModuleGraph, ModulePath, ModulePathConvention, build_module_path, extract_module_declarations};
pub use rust_parser::RustParser;
pub use scope_resolver::ScopeResolver;
pub use source_scan::BraceMap;
pub use utils::{node_to_position, node_to_range};
