use crate::{
    build_system::makefile::{BUILD_TARGET, RUN_TARGET},
    command::{
        CargoCommand,
        builder::{CommandBuilderImpl, SynthesisInput},
        runner_args::RunnerArgs,
    },
    config::OverrideContext,
    types::CrateRole,
};

/// `make -C <dir> run` for binaries, `make -C <dir> build` for build scripts
pub struct MakeCommandBuilder;

impl CommandBuilderImpl for MakeCommandBuilder {
    fn build(input: &SynthesisInput) -> Option<CargoCommand> {
        let makefile = input.makefile?;
        let (target, context) = match input.role() {
            CrateRole::Binary if makefile.has_run => (RUN_TARGET, OverrideContext::Run),
            CrateRole::BuildScript if makefile.has_build => (BUILD_TARGET, OverrideContext::Build),
            _ => return None,
        };
        let runner_args = RunnerArgs::resolve(input.overrides, context);

        let args = vec![
            "-C".to_string(),
            makefile.dir().to_string_lossy().into_owned(),
            target.to_string(),
        ];
        let mut command = CargoCommand::new_make(args);
        for (key, value) in runner_args.env {
            command = command.with_env(key, value);
        }
        Some(command)
    }
}
