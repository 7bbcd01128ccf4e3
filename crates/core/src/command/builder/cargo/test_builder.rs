//! Test command builders for the libtest harness and cargo-nextest

use super::common::CargoBuilderHelper;
use crate::{
    command::{
        CargoCommand,
        builder::{CommandBuilderImpl, SynthesisInput},
        runner_args::RunnerArgs,
        selector::{NEXTEST_DEFAULT_FLAGS, nextest_filter, plain_default_flags},
    },
    config::OverrideContext,
    types::CrateRole,
};

/// Unit tests inside a library, binary or example target
pub struct TestCommandBuilder;

impl CargoBuilderHelper for TestCommandBuilder {}

impl CommandBuilderImpl for TestCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let builder = TestCommandBuilder;
        let runner_args = RunnerArgs::resolve(input.overrides, OverrideContext::Test);

        let args = if input.nextest {
            let mut args = vec!["nextest".to_string(), "run".to_string()];
            builder.add_example(&mut args, input);
            builder.add_nextest_filter(&mut args, input);
            builder.push_package(&mut args, input);
            builder.add_target(&mut args, input);
            args.extend(runner_args.extra_or(NEXTEST_DEFAULT_FLAGS));
            args
        } else {
            let mut args = vec!["test".to_string()];
            builder.push_package(&mut args, input);
            builder.add_example(&mut args, input);
            builder.add_target(&mut args, input);
            builder.add_harness_args(&mut args, input, &runner_args);
            args
        };

        Some(builder.finish(args, input, &runner_args))
    }
}

/// Harness arguments shared by every test builder
trait TestArgs: CargoBuilderHelper {
    /// `-E 'test(/^...$/)'` when a target was found
    fn add_nextest_filter(&self, args: &mut Vec<String>, input: &SynthesisInput) {
        if let Some(target) = input.test_target {
            args.push("-E".to_string());
            args.push(nextest_filter(target));
        }
    }

    /// `-- [FILTER] FLAGS`, omitted when there is nothing to pass
    fn add_harness_args(&self, args: &mut Vec<String>, input: &SynthesisInput, runner_args: &RunnerArgs) {
        let flags = runner_args.extra_or(plain_default_flags(input.test_target));
        if input.test_target.is_none() && flags.is_empty() {
            return;
        }
        args.push("--".to_string());
        if let Some(target) = input.test_target {
            args.push(target.path().to_string());
        }
        args.extend(flags);
    }
}

impl TestArgs for TestCommandBuilder {}

impl TestCommandBuilder {
    fn add_example(&self, args: &mut Vec<String>, input: &SynthesisInput) {
        if input.role() == CrateRole::Example {
            if let Some(example) = input.target_name() {
                args.push("--example".to_string());
                args.push(example.to_string());
            }
        }
    }

    /// `--bin NAME` for binary targets, `--lib` for the library
    fn add_target(&self, args: &mut Vec<String>, input: &SynthesisInput) {
        match (input.role(), input.target_name()) {
            (CrateRole::Binary, Some(bin)) => {
                args.push("--bin".to_string());
                args.push(bin.to_string());
            }
            (CrateRole::Library, _) => args.push("--lib".to_string()),
            _ => {}
        }
    }
}

/// Tests under `tests/`, one cargo target per file
pub struct IntegrationTestCommandBuilder;

impl CargoBuilderHelper for IntegrationTestCommandBuilder {}
impl TestArgs for IntegrationTestCommandBuilder {}

impl CommandBuilderImpl for IntegrationTestCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let builder = IntegrationTestCommandBuilder;
        let runner_args = RunnerArgs::resolve(input.overrides, OverrideContext::Test);
        let test_name = input.target_name()?;

        let args = if input.nextest {
            let mut args = vec![
                "nextest".to_string(),
                "run".to_string(),
                "--test".to_string(),
                test_name.to_string(),
            ];
            builder.add_nextest_filter(&mut args, input);
            builder.push_package(&mut args, input);
            args.extend(runner_args.extra_or(NEXTEST_DEFAULT_FLAGS));
            args
        } else {
            let mut args = vec!["test".to_string()];
            builder.push_package(&mut args, input);
            args.push("--test".to_string());
            args.push(test_name.to_string());
            builder.add_harness_args(&mut args, input, &runner_args);
            args
        };

        Some(builder.finish(args, input, &runner_args))
    }
}
