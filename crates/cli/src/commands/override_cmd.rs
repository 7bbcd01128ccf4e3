use anyhow::{Context, Result};
use cargo_cursor_core::config::{OverrideConfig, OverrideContext, parse_user_input};
use tracing::debug;

use super::resolve_path;
use crate::utils::parse_filepath_with_line;

/// Write the arguments for one context into the `.cargo_runner.toml` next to
/// the file. No arguments removes the context.
pub fn override_command(filepath_arg: &str, context: &str, args: &[String]) -> Result<()> {
    let location = parse_filepath_with_line(filepath_arg);
    let path = resolve_path(&location.path)?;
    let dir = if path.is_dir() {
        path
    } else {
        path.parent()
            .map(|p| p.to_path_buf())
            .with_context(|| format!("No directory for {}", path.display()))?
    };

    let context: OverrideContext = context.parse()?;
    debug!("Setting {} overrides in {:?}: {:?}", context, dir, args);

    let written = if context == OverrideContext::Env {
        let env = shell_words::join(args);
        OverrideConfig::set_env(&dir, Some(env.as_str()))?
    } else {
        let parsed = parse_user_input(&shell_words::join(args));
        for arg in &parsed {
            println!("   • {} ({:?}) = {}", arg.name, arg.kind, arg.value);
        }
        OverrideConfig::set_context(&dir, context, &parsed)?
    };

    if args.is_empty() {
        println!("🧹 Removed '{}' from {}", context, written.display());
    } else {
        println!("✅ Updated '{}' in {}", context, written.display());
    }

    Ok(())
}
