//! Builders for projects driven through a Makefile

pub mod make_builder;

pub use make_builder::MakeCommandBuilder;
