pub mod crate_role;
pub mod document;
pub mod position;
pub mod scope;
pub mod symbol;

// Re-export commonly used types
pub use crate_role::{Classification, CrateRole};
pub use document::SourceDocument;
pub use position::{Position, Range};
pub use scope::SymbolNode;
pub use symbol::SymbolKind;
