//! Tools the host machine provides

use crate::error::{Error, Result};

pub trait HostCapabilities {
    /// Whether the parallel test runner is enabled and installed
    fn nextest_available(&self) -> bool;

    fn make_available(&self) -> bool;

    /// Whether an executable named `program` can be launched
    fn has_program(&self, program: &str) -> bool;

    /// Fails with every missing program listed, in the order given
    fn require(&self, programs: &[&str]) -> Result<()> {
        let missing: Vec<String> = programs
            .iter()
            .filter(|program| !self.has_program(program))
            .map(|program| program.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingHostCapability(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OnlyCargo;

    impl HostCapabilities for OnlyCargo {
        fn nextest_available(&self) -> bool {
            false
        }

        fn make_available(&self) -> bool {
            false
        }

        fn has_program(&self, program: &str) -> bool {
            program == "cargo"
        }
    }

    #[test]
    fn test_require_lists_exactly_the_missing_programs() {
        assert!(OnlyCargo.require(&["cargo"]).is_ok());

        match OnlyCargo.require(&["cargo", "make", "cargo-nextest"]) {
            Err(Error::MissingHostCapability(missing)) => {
                assert_eq!(missing, vec!["make", "cargo-nextest"]);
            }
            other => panic!("expected missing capability, got {other:?}"),
        }
    }
}
