//! Benchmark command builder

use super::common::CargoBuilderHelper;
use crate::{
    command::{
        CargoCommand,
        builder::{CommandBuilderImpl, SynthesisInput},
        runner_args::RunnerArgs,
    },
    config::OverrideContext,
};

/// `cargo bench --package P --bench NAME [-- ID]`
pub struct BenchmarkCommandBuilder;

impl CargoBuilderHelper for BenchmarkCommandBuilder {}

impl CommandBuilderImpl for BenchmarkCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let builder = BenchmarkCommandBuilder;
        let runner_args = RunnerArgs::resolve(input.overrides, OverrideContext::Bench);
        let bench_name = input.target_name()?;

        let mut args = vec!["bench".to_string()];
        builder.push_package(&mut args, input);
        args.push("--bench".to_string());
        args.push(bench_name.to_string());

        // with an id, extra arguments go to the bench harness
        if let Some(id) = input.benchmark_id {
            args.push("--".to_string());
            args.push(id.to_string());
        }
        args.extend(runner_args.extra.iter().cloned());

        Some(builder.finish(args, input, &runner_args))
    }
}
