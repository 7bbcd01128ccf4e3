use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::debug;

use crate::environment::{MAKE_PROGRAM, NEXTEST_PROGRAM};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Cargo,
    /// `make -C <dir> <target>` for projects wrapping cargo in a Makefile
    Make,
}

/// A synthesized invocation: program, arguments, env prefix and working
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CargoCommand {
    pub command_type: CommandType,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl CargoCommand {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            command_type: CommandType::Cargo,
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn new_make(args: Vec<String>) -> Self {
        Self {
            command_type: CommandType::Make,
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn program(&self) -> &'static str {
        match self.command_type {
            CommandType::Cargo => "cargo",
            CommandType::Make => MAKE_PROGRAM,
        }
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    pub fn is_nextest(&self) -> bool {
        self.command_type == CommandType::Cargo && self.args.first().is_some_and(|a| a == "nextest")
    }

    /// Programs that must be installed to run this command
    pub fn required_programs(&self) -> Vec<&'static str> {
        let mut programs = vec![self.program()];
        if self.is_nextest() {
            programs.push(NEXTEST_PROGRAM);
        }
        programs
    }

    /// The command as one shell line: env prefix, program, then arguments
    /// quoted where the shell would otherwise split or expand them.
    pub fn to_shell_command(&self) -> String {
        let mut words: Vec<String> = self
            .env
            .iter()
            .map(|(key, value)| format!("{key}={}", quote_arg(value)))
            .collect();
        words.push(self.program().to_string());
        words.extend(self.args.iter().map(|arg| quote_arg(arg).into_owned()));
        words.join(" ")
    }

    pub fn execute(&self) -> io::Result<ExitStatus> {
        let mut cmd = Command::new(self.program());
        cmd.args(&self.args);

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.env {
            debug!("Setting env: {}={}", key, value);
            cmd.env(key, value);
        }

        debug!("Executing: {}", self.to_shell_command());
        cmd.status()
    }
}

impl Serialize for CargoCommand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let env: std::collections::BTreeMap<&str, &str> =
            self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();

        let mut state = serializer.serialize_struct("CargoCommand", 4)?;
        state.serialize_field("program", self.program())?;
        state.serialize_field("args", &self.args)?;
        state.serialize_field("env", &env)?;
        state.serialize_field("cwd", &self.working_dir)?;
        state.end()
    }
}

/// Leave plain words alone and single-quote everything else
fn quote_arg(arg: &str) -> Cow<'_, str> {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | '=' | ':' | ',' | '+' | '@' | '%'));
    if plain {
        Cow::Borrowed(arg)
    } else {
        shell_words::quote(arg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_shell_command_quotes_selectors() {
        let command = CargoCommand::new(args(&[
            "nextest",
            "run",
            "-E",
            "test(/^geometry::.*$/)",
            "--package",
            "shapes",
            "--lib",
            "--nocapture",
        ]));
        assert_eq!(
            command.to_shell_command(),
            "cargo nextest run -E 'test(/^geometry::.*$/)' --package shapes --lib --nocapture"
        );
        assert_eq!(command.required_programs(), vec!["cargo", NEXTEST_PROGRAM]);
    }

    #[test]
    fn test_env_prefix_and_make() {
        let command = CargoCommand::new_make(args(&["-C", "/work/app", "run"]))
            .with_env("RUST_LOG", "debug")
            .with_env("GREETING", "hello world");
        assert_eq!(
            command.to_shell_command(),
            "RUST_LOG=debug GREETING='hello world' make -C /work/app run"
        );
        assert_eq!(command.required_programs(), vec![MAKE_PROGRAM]);
    }

    #[test]
    fn test_json_shape() {
        let command = CargoCommand::new(args(&["run", "--package", "demo"]))
            .with_working_dir("/work/demo")
            .with_env("RUST_LOG", "info");
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "program": "cargo",
                "args": ["run", "--package", "demo"],
                "env": { "RUST_LOG": "info" },
                "cwd": "/work/demo"
            })
        );
    }

    #[test]
    fn test_quote_arg() {
        assert_eq!(quote_arg("--test-threads=1"), "--test-threads=1");
        assert_eq!(quote_arg("it's"), "'it'\\''s'");
        assert_eq!(quote_arg(""), "''");
    }
}
