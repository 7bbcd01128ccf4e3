//! Common functionality for cargo builders

use crate::command::{CargoCommand, builder::SynthesisInput, runner_args::RunnerArgs};

/// Helper trait for common builder functionality
pub trait CargoBuilderHelper {
    fn push_package(&self, args: &mut Vec<String>, input: &SynthesisInput) {
        if let Some(package) = input.package.filter(|p| !p.is_empty()) {
            args.push("--package".to_string());
            args.push(package.to_string());
        }
    }

    /// Wrap `args` into a cargo command run from the manifest directory with
    /// the configured env prefix
    fn finish(&self, args: Vec<String>, input: &SynthesisInput, runner_args: &RunnerArgs) -> CargoCommand {
        let mut command = CargoCommand::new(args);
        if let Some(dir) = input.working_dir {
            command = command.with_working_dir(dir);
        }
        for (key, value) in &runner_args.env {
            command = command.with_env(key.as_str(), value.as_str());
        }
        command
    }
}
