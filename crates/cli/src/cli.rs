use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    AnalyzeOptions, RunOptions, analyze_command, override_command, run_command,
};

#[derive(Parser)]
#[command(bin_name = "cargo")]
#[command(version, propagate_version = true)]
pub struct Cargo {
    #[command(subcommand)]
    pub command: CargoCommand,
}

#[derive(Subcommand, Debug)]
pub enum CargoCommand {
    #[command(name = "cursor")]
    #[command(about = "Run the cargo command for the code under the cursor")]
    Cursor(Cursor),
}

#[derive(Parser, Debug)]
#[command(name = "cargo-cursor")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Cursor {
    /// Stop manifest, settings and override lookups at this directory
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the command for a cursor position
    #[command(visible_alias = "r")]
    Run {
        /// Path with optional line and column (e.g., src/lib.rs:42:5)
        filepath: String,

        /// Print the command without executing it
        #[arg(short, long)]
        dry_run: bool,

        /// Print the command as JSON without executing it
        #[arg(long)]
        json: bool,

        /// Document symbols from the editor, as JSON
        #[arg(long)]
        symbols: Option<PathBuf>,
    },
    /// Show every fact gathered for a cursor position
    #[command(visible_alias = "a")]
    Analyze {
        /// Path with optional line and column (e.g., src/lib.rs:42:5)
        filepath: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,

        /// Document symbols from the editor, as JSON
        #[arg(long)]
        symbols: Option<PathBuf>,
    },
    /// Set the extra arguments for one context in `.cargo_runner.toml`
    Override {
        /// File or directory the override applies to
        filepath: String,

        /// One of run, test, build, bench, doctest, env
        context: String,

        /// Flags such as `--release --jobs 4`; `KEY=value` pairs for env.
        /// Leave empty to remove the context.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

impl Cursor {
    /// File the command operates on
    pub fn filepath(&self) -> &str {
        match &self.command {
            Commands::Run { filepath, .. }
            | Commands::Analyze { filepath, .. }
            | Commands::Override { filepath, .. } => filepath,
        }
    }

    pub fn execute(self) -> Result<()> {
        let workspace = self.workspace.as_deref();
        self.command.execute(workspace)
    }
}

impl Commands {
    pub fn execute(self, workspace: Option<&Path>) -> Result<()> {
        match self {
            Commands::Run {
                filepath,
                dry_run,
                json,
                symbols,
            } => run_command(
                &filepath,
                &RunOptions {
                    dry_run,
                    json,
                    symbols,
                    workspace: workspace.map(Path::to_path_buf),
                },
            ),
            Commands::Analyze {
                filepath,
                json,
                symbols,
            } => analyze_command(
                &filepath,
                &AnalyzeOptions {
                    json,
                    symbols,
                    workspace: workspace.map(Path::to_path_buf),
                },
            ),
            Commands::Override {
                filepath,
                context,
                args,
            } => override_command(&filepath, &context, &args),
        }
    }
}
