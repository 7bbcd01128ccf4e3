use std::io;
use std::path::PathBuf;

/// Errors that can occur while resolving the command for a cursor position
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No active file or cursor")]
    NoActiveContext,

    #[error("No document symbols available")]
    SymbolsUnavailable,

    #[error("No relevant symbol found near the cursor")]
    NoMatchingScope,

    #[error("Nothing to run at this location")]
    NoApplicableAction,

    #[error("Failed to parse manifest {}: {message}", path.display())]
    ManifestParse { path: PathBuf, message: String },

    #[error("Missing required tool{}: {}", if .0.len() > 1 { "s" } else { "" }, .0.join(" and "))]
    MissingHostCapability(Vec<String>),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid override config {}: {message}", path.display())]
    OverrideConfig { path: PathBuf, message: String },

    #[error("Tree-sitter error: {0}")]
    TreeSitterError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl Error {
    /// Conditions the caller is expected to absorb with a fallback or a
    /// neutral message instead of reporting a failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NoActiveContext
                | Error::SymbolsUnavailable
                | Error::NoMatchingScope
                | Error::NoApplicableAction
                | Error::ManifestParse { .. }
        )
    }

    /// Level the top-level handler logs this error at
    pub fn log_level_hint(&self) -> tracing::Level {
        match self {
            Error::ManifestParse { .. } | Error::SymbolsUnavailable | Error::NoMatchingScope => {
                tracing::Level::DEBUG
            }
            Error::NoActiveContext | Error::NoApplicableAction => tracing::Level::INFO,
            _ => tracing::Level::ERROR,
        }
    }

    /// User-facing text for the top-level handler
    pub fn user_message(&self) -> String {
        match self {
            Error::NoActiveContext => "Open a Rust file to run".to_string(),
            Error::NoApplicableAction | Error::NoMatchingScope | Error::SymbolsUnavailable => {
                "Cannot run anything at this location".to_string()
            }
            Error::MissingHostCapability(_) => self.to_string(),
            other => format!("cargo-cursor error: {other}"),
        }
    }
}

/// Result type alias for cargo-cursor operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_capability_lists_every_tool() {
        let single = Error::MissingHostCapability(vec!["cargo".to_string()]);
        assert_eq!(single.to_string(), "Missing required tool: cargo");

        let both = Error::MissingHostCapability(vec!["cargo".to_string(), "make".to_string()]);
        assert_eq!(both.to_string(), "Missing required tools: cargo and make");
        assert!(!both.is_recoverable());
    }

    #[test]
    fn test_recoverable_taxonomy() {
        assert!(Error::NoMatchingScope.is_recoverable());
        assert!(Error::SymbolsUnavailable.is_recoverable());
        assert!(
            Error::ManifestParse {
                path: PathBuf::from("Cargo.toml"),
                message: "bad".into()
            }
            .is_recoverable()
        );
        assert!(!Error::ConfigError("bad".into()).is_recoverable());
    }
}
