//! Cargo-specific command builders

pub mod benchmark_builder;
pub mod binary_builder;
pub mod common;
pub mod doctest_builder;
pub mod test_builder;

pub use benchmark_builder::BenchmarkCommandBuilder;
pub use binary_builder::{BinaryCommandBuilder, BuildScriptCommandBuilder, ExampleCommandBuilder};
pub use doctest_builder::DocTestCommandBuilder;
pub use test_builder::{IntegrationTestCommandBuilder, TestCommandBuilder};
