//! `cargo run` and `cargo build` builders

use super::common::CargoBuilderHelper;
use crate::{
    command::{
        CargoCommand,
        builder::{CommandBuilderImpl, SynthesisInput},
        runner_args::RunnerArgs,
    },
    config::OverrideContext,
};

/// `cargo run --package P [--bin NAME]`
pub struct BinaryCommandBuilder;

impl CargoBuilderHelper for BinaryCommandBuilder {}

impl CommandBuilderImpl for BinaryCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let builder = BinaryCommandBuilder;
        let runner_args = RunnerArgs::resolve(input.overrides, OverrideContext::Run);

        let mut args = vec!["run".to_string()];
        builder.push_package(&mut args, input);
        if let Some(bin) = input.target_name() {
            args.push("--bin".to_string());
            args.push(bin.to_string());
        }
        args.extend(runner_args.extra.iter().cloned());

        Some(builder.finish(args, input, &runner_args))
    }
}

/// `cargo run --package P --example NAME`
pub struct ExampleCommandBuilder;

impl CargoBuilderHelper for ExampleCommandBuilder {}

impl CommandBuilderImpl for ExampleCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let builder = ExampleCommandBuilder;
        let runner_args = RunnerArgs::resolve(input.overrides, OverrideContext::Run);
        let example = input.target_name()?;

        let mut args = vec!["run".to_string()];
        builder.push_package(&mut args, input);
        args.push("--example".to_string());
        args.push(example.to_string());
        args.extend(runner_args.extra.iter().cloned());

        Some(builder.finish(args, input, &runner_args))
    }
}

/// `cargo build --package P`
pub struct BuildScriptCommandBuilder;

impl CargoBuilderHelper for BuildScriptCommandBuilder {}

impl CommandBuilderImpl for BuildScriptCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let builder = BuildScriptCommandBuilder;
        let runner_args = RunnerArgs::resolve(input.overrides, OverrideContext::Build);

        let mut args = vec!["build".to_string()];
        builder.push_package(&mut args, input);
        args.extend(runner_args.extra.iter().cloned());

        Some(builder.finish(args, input, &runner_args))
    }
}
