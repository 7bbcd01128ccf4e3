//! Command synthesis: turns the facts gathered about a cursor into one
//! command line.

mod cargo;
mod make;

pub use self::cargo::{
    BenchmarkCommandBuilder, BinaryCommandBuilder, BuildScriptCommandBuilder, DocTestCommandBuilder,
    ExampleCommandBuilder, IntegrationTestCommandBuilder, TestCommandBuilder,
};
pub use self::make::MakeCommandBuilder;

use std::path::Path;

use tracing::debug;

use crate::{
    build_system::Makefile,
    command::CargoCommand,
    config::OverrideConfig,
    error::{Error, Result},
    patterns::TestTarget,
    types::{Classification, CrateRole},
};

/// Everything the synthesizer needs to know about one cursor position
#[derive(Debug, Clone)]
pub struct SynthesisInput<'a> {
    pub package: Option<&'a str>,
    pub classification: &'a Classification,
    pub in_test_context: bool,
    pub test_target: Option<&'a TestTarget>,
    pub benchmark_id: Option<&'a str>,
    /// Function owning the doc test under the cursor
    pub doc_test_fn: Option<&'a str>,
    pub makefile: Option<&'a Makefile>,
    pub overrides: Option<&'a OverrideConfig>,
    pub nextest: bool,
    pub make_available: bool,
    /// Directory holding the crate's manifest
    pub working_dir: Option<&'a Path>,
}

impl<'a> SynthesisInput<'a> {
    pub fn new(package: Option<&'a str>, classification: &'a Classification) -> Self {
        Self {
            package,
            classification,
            in_test_context: false,
            test_target: None,
            benchmark_id: None,
            doc_test_fn: None,
            makefile: None,
            overrides: None,
            nextest: false,
            make_available: false,
            working_dir: None,
        }
    }

    pub fn role(&self) -> CrateRole {
        self.classification.role
    }

    pub fn target_name(&self) -> Option<&'a str> {
        self.classification.target_name.as_deref()
    }

    fn makefile_target(&self, role: CrateRole) -> bool {
        let Some(makefile) = self.makefile.filter(|_| self.make_available) else {
            return false;
        };
        match role {
            CrateRole::Binary => makefile.has_run,
            CrateRole::BuildScript => makefile.has_build,
            _ => false,
        }
    }
}

/// A builder for one kind of command. Returns `None` when the input lacks
/// what the command needs.
pub trait CommandBuilderImpl {
    fn build(input: &SynthesisInput) -> Option<CargoCommand>;
}

pub struct CommandBuilder;

impl CommandBuilder {
    /// Pick the command for `input`, most specific context first:
    /// benchmarks, integration tests, examples, unit tests, the Makefile
    /// escape hatch, binaries, build scripts, then doc tests.
    pub fn synthesize(input: &SynthesisInput) -> Result<CargoCommand> {
        let role = input.role();

        let command = match role {
            CrateRole::Benchmark => BenchmarkCommandBuilder::build(input),
            CrateRole::IntegrationTest => IntegrationTestCommandBuilder::build(input),
            CrateRole::Example if !input.in_test_context => ExampleCommandBuilder::build(input),
            _ if input.in_test_context => TestCommandBuilder::build(input),
            CrateRole::Binary | CrateRole::BuildScript if input.makefile_target(role) => {
                MakeCommandBuilder::build(input)
            }
            CrateRole::Binary => BinaryCommandBuilder::build(input),
            CrateRole::BuildScript => BuildScriptCommandBuilder::build(input),
            _ => DocTestCommandBuilder::build(input),
        };

        match command {
            Some(command) => {
                debug!("Synthesized for {}: {}", role, command.to_shell_command());
                Ok(command)
            }
            None => {
                debug!("No command applies to role {}", role);
                Err(Error::NoApplicableAction)
            }
        }
    }
}
