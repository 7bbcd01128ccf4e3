//! cargo-cursor - pick the cargo command for the code under the cursor
//!
//! This crate provides functionality to:
//! - Resolve the scope around a cursor from a document symbol tree
//! - Classify a source file's role in its crate (binary, library, test, ...)
//! - Detect test functions, doc tests and benchmark ids near the cursor
//! - Synthesize the `cargo` (or `cargo nextest`, or `make`) invocation to run
pub mod build_system;
pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod interfaces;
pub mod parser;
pub mod patterns;
pub mod runner;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use types::*;

// Re-export main API components
pub use command::{CargoCommand, CommandType};
pub use config::{OverrideConfig, Settings};
pub use environment::Environment;
pub use interfaces::{HostCapabilities, HostSymbols, SymbolProvider, TreeSitterSymbols};
pub use runner::{Analysis, CursorRunner};
