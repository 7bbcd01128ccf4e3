//! Doc test command builder

use super::common::CargoBuilderHelper;
use crate::{
    command::{
        CargoCommand,
        builder::{CommandBuilderImpl, SynthesisInput},
        runner_args::RunnerArgs,
    },
    config::OverrideContext,
};

/// `cargo test --doc --package P -- FN_NAME`
pub struct DocTestCommandBuilder;

impl CargoBuilderHelper for DocTestCommandBuilder {}

impl CommandBuilderImpl for DocTestCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let builder = DocTestCommandBuilder;
        let fn_name = input.doc_test_fn?;
        let runner_args = RunnerArgs::resolve(input.overrides, OverrideContext::Doctest);

        let mut args = vec!["test".to_string(), "--doc".to_string()];
        builder.push_package(&mut args, input);
        args.push("--".to_string());
        args.push(fn_name.to_string());
        args.extend(runner_args.extra.iter().cloned());

        Some(builder.finish(args, input, &runner_args))
    }
}
