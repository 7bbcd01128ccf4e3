//! Command synthesis and execution

pub mod builder;
pub mod cargo_command;
pub mod runner_args;
pub mod selector;

// Re-export commonly used types
pub use builder::{CommandBuilder, CommandBuilderImpl, SynthesisInput};
pub use cargo_command::{CargoCommand, CommandType};
pub use runner_args::RunnerArgs;
pub use selector::nextest_filter;
