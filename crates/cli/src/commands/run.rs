use std::path::PathBuf;

use anyhow::{Context, Result};
use cargo_cursor_core::{Environment, Error, HostCapabilities};
use tracing::{debug, info};

use super::{cursor_position, cursor_runner, resolve_path, symbol_provider};
use crate::utils::parse_filepath_with_line;

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub dry_run: bool,
    pub json: bool,
    pub symbols: Option<PathBuf>,
    pub workspace: Option<PathBuf>,
}

pub fn run_command(filepath_arg: &str, options: &RunOptions) -> Result<()> {
    let location = parse_filepath_with_line(filepath_arg);
    debug!("Running file: {} at line: {:?}", location.path, location.line);

    let file = resolve_path(&location.path)?;
    let runner = cursor_runner(options.workspace.as_deref());
    let mut symbols = symbol_provider(options.symbols.as_deref())?;

    let command = runner
        .analyze(&file, cursor_position(&location), symbols.as_mut())?
        .command
        .ok_or(Error::NoApplicableAction)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&command)?);
        return Ok(());
    }

    let shell_cmd = command.to_shell_command();
    if options.dry_run {
        println!("{shell_cmd}");
        if let Some(dir) = command.working_dir() {
            info!("Working directory: {}", dir.display());
        }
        return Ok(());
    }

    let settings = runner.settings_for(&file)?;
    Environment::detect(&settings).require(&command.required_programs())?;

    info!("Running: {}", shell_cmd);
    let status = command
        .execute()
        .with_context(|| format!("Failed to execute: {shell_cmd}"))?;

    if !status.success() {
        std::process::exit(status.code().unwrap_or(1));
    }

    Ok(())
}
