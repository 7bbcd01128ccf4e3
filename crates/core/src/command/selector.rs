//! Filters handed to the test runners

use crate::patterns::TestTarget;

/// cargo-nextest filterset for a target: the exact test for a function,
/// every test nested under it for a module.
pub fn nextest_filter(target: &TestTarget) -> String {
    match target {
        TestTarget::Function(path) => format!("test(/^{path}$/)"),
        TestTarget::Module(path) => format!("test(/^{path}::.*$/)"),
    }
}

/// Default flags after `--` for the libtest harness
pub fn plain_default_flags(target: Option<&TestTarget>) -> &'static [&'static str] {
    match target {
        Some(TestTarget::Function(_)) => &["--exact", "--nocapture"],
        Some(TestTarget::Module(_)) | None => &["--nocapture"],
    }
}

/// Default flags for cargo-nextest, which anchors through its filter instead
/// of `--exact`
pub const NEXTEST_DEFAULT_FLAGS: &[&str] = &["--nocapture"];
