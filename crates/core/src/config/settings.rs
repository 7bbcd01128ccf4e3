use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::{Error, Result},
    impl_case_insensitive_deserialize,
    parser::ModulePathConvention,
    types::SymbolKind,
    utils::find_upward,
};

pub const SETTINGS_FILE: &str = ".cargo-cursor.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    #[default]
    Error,
}

impl_case_insensitive_deserialize!(
    LogLevel,
    Debug => "debug",
    Info => "info",
    Warn => "warn",
    Error => "error"
);

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NextestSettings {
    pub enable: bool,
}

/// Snapshot of the host's settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Names from the symbol-kind table, validated by [`Settings::priority_kinds`]
    pub priority_symbol_kinds: Vec<String>,
    pub log_level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo_home: Option<PathBuf>,
    pub nextest: NextestSettings,
    /// Flat form written by editors that store dotted keys
    #[serde(rename = "nextest.enable", skip_serializing_if = "Option::is_none")]
    pub nextest_enable: Option<bool>,
    pub module_path_convention: ModulePathConvention,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            priority_symbol_kinds: SymbolKind::DEFAULT_PRIORITY.iter().map(|k| k.name().to_string()).collect(),
            log_level: LogLevel::default(),
            cargo_home: None,
            nextest: NextestSettings::default(),
            nextest_enable: None,
            module_path_convention: ModulePathConvention::default(),
        }
    }
}

impl Settings {
    /// Parse and validate a settings file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse {}: {e}", path.display())))?;
        settings.priority_kinds()?;
        Ok(settings)
    }

    /// Nearest settings file from the directory of `start_path` up to
    /// `boundary`
    pub fn find(start_path: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
        find_upward(start_path, SETTINGS_FILE, boundary)
    }

    /// Settings for a file: the nearest settings file, or defaults when there
    /// is none
    pub fn load_nearest(start_path: &Path, boundary: Option<&Path>) -> Result<Self> {
        match Self::find(start_path, boundary) {
            Some(path) => {
                debug!("Loading settings from {:?}", path);
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }

    /// Configured priority kinds, rejecting names outside the symbol-kind
    /// table
    pub fn priority_kinds(&self) -> Result<Vec<SymbolKind>> {
        self.priority_symbol_kinds
            .iter()
            .map(|name| {
                SymbolKind::from_name(name).ok_or_else(|| {
                    Error::ConfigError(format!(
                        "Unknown symbol kind '{}' in prioritySymbolKinds, expected one of: {}",
                        name,
                        SymbolKind::known_names().collect::<Vec<_>>().join(", ")
                    ))
                })
            })
            .collect()
    }

    pub fn nextest_enabled(&self) -> bool {
        self.nextest_enable.unwrap_or(self.nextest.enable)
    }
}
