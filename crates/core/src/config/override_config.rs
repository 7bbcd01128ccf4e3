//! `.cargo_runner.toml`: per-context arguments that replace the defaults
//! of synthesized commands.
//!
//! ```toml
//! env = "RUST_LOG=debug"
//!
//! [[test]]
//! name = "nocapture"
//! type = "boolean"
//! value = true
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    impl_case_insensitive_deserialize,
    utils::find_upward,
};

pub const OVERRIDE_FILE: &str = ".cargo_runner.toml";

/// Execution context an override list applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideContext {
    Run,
    Test,
    Build,
    Bench,
    Doctest,
    Env,
}

impl_case_insensitive_deserialize!(
    OverrideContext,
    Run => "run",
    Test => "test",
    Build => "build",
    Bench => "bench",
    Doctest => "doctest",
    Env => "env"
);

impl OverrideContext {
    pub const ALL: [OverrideContext; 6] = [
        OverrideContext::Run,
        OverrideContext::Test,
        OverrideContext::Build,
        OverrideContext::Bench,
        OverrideContext::Doctest,
        OverrideContext::Env,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OverrideContext::Run => "run",
            OverrideContext::Test => "test",
            OverrideContext::Build => "build",
            OverrideContext::Bench => "bench",
            OverrideContext::Doctest => "doctest",
            OverrideContext::Env => "env",
        }
    }
}

impl fmt::Display for OverrideContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverrideContext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|context| context.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::ConfigError(format!(
                    "Unknown override context '{}', expected one of: {}",
                    s,
                    Self::ALL.map(|c| c.as_str()).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgType {
    String,
    Int,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Bool(value) => write!(f, "{value}"),
            ArgValue::Int(value) => write!(f, "{value}"),
            ArgValue::Str(value) => f.write_str(value),
        }
    }
}

/// One `{name, type, value}` record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandArg {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ArgType,
    pub value: ArgValue,
}

impl CommandArg {
    pub fn new(name: impl Into<String>, kind: ArgType, value: ArgValue) -> Self {
        Self {
            name: name.into(),
            kind,
            value,
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, ArgType::Boolean, ArgValue::Bool(true))
    }

    /// `--name` for a true boolean, `--name=value` otherwise. Single-letter
    /// names keep their short form (`-F`).
    pub fn render(&self) -> String {
        let dashes = if self.name.chars().count() == 1 { "-" } else { "--" };
        match (self.kind, &self.value) {
            (ArgType::Boolean, ArgValue::Bool(true)) => format!("{dashes}{}", self.name),
            (_, value) => format!("{dashes}{}={value}", self.name),
        }
    }
}

/// Parsed `.cargo_runner.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub run: Vec<CommandArg>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test: Vec<CommandArg>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub build: Vec<CommandArg>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bench: Vec<CommandArg>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doctest: Vec<CommandArg>,
    /// Literal `KEY=value` prefix for the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<String>,
}

impl OverrideConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| Error::OverrideConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Nearest override file from the directory of `start_path` up to
    /// `boundary`
    pub fn find(start_path: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
        find_upward(start_path, OVERRIDE_FILE, boundary)
    }

    /// Nearest override file. A malformed file is logged and treated as
    /// absent.
    pub fn load_nearest(start_path: &Path, boundary: Option<&Path>) -> Option<Self> {
        let path = Self::find(start_path, boundary)?;
        match Self::load(&path) {
            Ok(config) => {
                debug!("Loaded overrides from {:?}", path);
                Some(config)
            }
            Err(e) => {
                warn!("{}", e);
                None
            }
        }
    }

    pub fn args(&self, context: OverrideContext) -> &[CommandArg] {
        match context {
            OverrideContext::Run => &self.run,
            OverrideContext::Test => &self.test,
            OverrideContext::Build => &self.build,
            OverrideContext::Bench => &self.bench,
            OverrideContext::Doctest => &self.doctest,
            OverrideContext::Env => &[],
        }
    }

    /// Rendered arguments for a context, in file order
    pub fn rendered(&self, context: OverrideContext) -> Vec<String> {
        self.args(context).iter().map(CommandArg::render).collect()
    }

    /// `KEY=value` pairs of the env prefix. Words without `=` are skipped.
    pub fn env_vars(&self) -> Vec<(String, String)> {
        let Some(env) = self.env.as_deref() else {
            return Vec::new();
        };
        let words = match shell_words::split(env) {
            Ok(words) => words,
            Err(e) => {
                warn!("Ignoring env override '{}': {}", env, e);
                return Vec::new();
            }
        };
        words
            .into_iter()
            .filter_map(|word| match word.split_once('=') {
                Some((key, value)) if !key.is_empty() => Some((key.to_string(), value.to_string())),
                _ => {
                    warn!("Ignoring env override word '{}' without '='", word);
                    None
                }
            })
            .collect()
    }

    /// Replace one context's arguments in `<dir>/.cargo_runner.toml`,
    /// keeping the rest of the file. An empty list removes the context.
    pub fn set_context(dir: &Path, context: OverrideContext, args: &[CommandArg]) -> Result<PathBuf> {
        let value = if args.is_empty() {
            None
        } else {
            Some(toml::Value::try_from(args).map_err(|e| Error::ConfigError(e.to_string()))?)
        };
        Self::write_key(dir, context, value)
    }

    /// Replace the env prefix in `<dir>/.cargo_runner.toml`; `None` or an
    /// empty string removes it.
    pub fn set_env(dir: &Path, env: Option<&str>) -> Result<PathBuf> {
        let value = env.filter(|e| !e.trim().is_empty()).map(|e| toml::Value::String(e.to_string()));
        Self::write_key(dir, OverrideContext::Env, value)
    }

    fn write_key(dir: &Path, context: OverrideContext, value: Option<toml::Value>) -> Result<PathBuf> {
        let path = dir.join(OVERRIDE_FILE);
        let mut table = if path.is_file() {
            std::fs::read_to_string(&path)?
                .parse::<toml::Table>()
                .map_err(|e| Error::OverrideConfig {
                    path: path.clone(),
                    message: e.to_string(),
                })?
        } else {
            toml::Table::new()
        };

        match value {
            Some(value) => {
                debug!("Setting '{}' in {:?}", context, path);
                table.insert(context.as_str().to_string(), value);
            }
            None => {
                debug!("Removing '{}' from {:?}", context, path);
                table.remove(context.as_str());
            }
        }

        let contents = toml::to_string(&table).map_err(|e| Error::ConfigError(e.to_string()))?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
