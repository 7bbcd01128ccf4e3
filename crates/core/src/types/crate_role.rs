use serde::Serialize;

use crate::impl_case_insensitive_deserialize;

/// Build-system role of a source file. Derived per query, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrateRole {
    Binary,
    Library,
    BuildScript,
    IntegrationTest,
    Example,
    Benchmark,
    Unknown,
}

impl_case_insensitive_deserialize!(
    CrateRole,
    Binary => "binary",
    Library => "library",
    BuildScript => "build_script",
    IntegrationTest => "integration_test",
    Example => "example",
    Benchmark => "benchmark",
    Unknown => "unknown"
);

impl CrateRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrateRole::Binary => "binary",
            CrateRole::Library => "library",
            CrateRole::BuildScript => "build_script",
            CrateRole::IntegrationTest => "integration_test",
            CrateRole::Example => "example",
            CrateRole::Benchmark => "benchmark",
            CrateRole::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CrateRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role together with the cargo target name it implies, if any
/// (`--bin NAME`, `--bench NAME`, `--test NAME`, `--example NAME`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub role: CrateRole,
    pub target_name: Option<String>,
}

impl Classification {
    pub fn new(role: CrateRole, target_name: Option<String>) -> Self {
        Self { role, target_name }
    }

    pub fn unknown() -> Self {
        Self::new(CrateRole::Unknown, None)
    }
}
