//! Settings snapshot, `.cargo_runner.toml` overrides and the override-editing
//! input parser

pub mod override_config;
pub mod settings;
pub mod user_input;

pub use override_config::{ArgType, ArgValue, CommandArg, OVERRIDE_FILE, OverrideConfig, OverrideContext};
pub use settings::{LogLevel, SETTINGS_FILE, Settings};
pub use user_input::parse_user_input;
