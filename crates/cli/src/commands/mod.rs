pub mod analyze;
pub mod override_cmd;
pub mod run;

pub use analyze::{AnalyzeOptions, analyze_command};
pub use override_cmd::override_command;
pub use run::{RunOptions, run_command};

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use cargo_cursor_core::{CursorRunner, HostSymbols, Position, SymbolProvider, TreeSitterSymbols};

use crate::utils::FileLocation;

/// Absolute path of a command-line file argument
pub(crate) fn resolve_path(path: &str) -> Result<PathBuf> {
    let path = Path::new(path);
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

pub(crate) fn cursor_position(location: &FileLocation) -> Position {
    Position::new(
        location.line.unwrap_or(0) as u32,
        location.column.unwrap_or(0) as u32,
    )
}

/// Symbols handed over by the editor, or tree-sitter when there are none
pub(crate) fn symbol_provider(symbols: Option<&Path>) -> Result<Box<dyn SymbolProvider>> {
    match symbols {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read symbols from {}", path.display()))?;
            Ok(Box::new(HostSymbols::from_json(&json)?))
        }
        None => Ok(Box::new(TreeSitterSymbols::new()?)),
    }
}

pub(crate) fn cursor_runner(workspace: Option<&Path>) -> CursorRunner {
    match workspace {
        Some(root) => CursorRunner::new().with_workspace_root(root),
        None => CursorRunner::new(),
    }
}
