use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use super::{cursor_position, cursor_runner, resolve_path, symbol_provider};
use crate::display::print_analysis;
use crate::utils::parse_filepath_with_line;

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub json: bool,
    pub symbols: Option<PathBuf>,
    pub workspace: Option<PathBuf>,
}

pub fn analyze_command(filepath_arg: &str, options: &AnalyzeOptions) -> Result<()> {
    debug!("Analyzing file: {}", filepath_arg);

    let location = parse_filepath_with_line(filepath_arg);
    let file = resolve_path(&location.path)?;
    if !file.exists() {
        return Err(anyhow::anyhow!("File not found: {}", file.display()));
    }

    let runner = cursor_runner(options.workspace.as_deref());
    let mut symbols = symbol_provider(options.symbols.as_deref())?;
    let analysis = runner.analyze(&file, cursor_position(&location), symbols.as_mut())?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(&analysis);
    }

    Ok(())
}
