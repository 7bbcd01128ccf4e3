//! Runner capabilities of the machine: whether cargo-nextest and make can be
//! used, probed once per invocation.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{config::Settings, interfaces::HostCapabilities};

pub const NEXTEST_PROGRAM: &str = "cargo-nextest";
pub const MAKE_PROGRAM: &str = "make";

#[derive(Debug, Clone)]
pub struct Environment {
    cargo_home: Option<PathBuf>,
    nextest_available: bool,
    make_available: bool,
    /// Programs reported as installed, replacing the `PATH` probe
    installed: Option<Vec<String>>,
}

impl Environment {
    /// Probe the machine. nextest counts only when the settings enable it
    /// and `<cargo_home>/bin/cargo-nextest` exists.
    pub fn detect(settings: &Settings) -> Self {
        let cargo_home = resolve_cargo_home(settings.cargo_home.as_deref());
        let nextest_available = settings.nextest_enabled()
            && cargo_home
                .as_ref()
                .is_some_and(|home| executable_in(&home.join("bin"), NEXTEST_PROGRAM).is_some());
        let make_available = find_on_path(MAKE_PROGRAM).is_some();

        debug!(
            "Environment: cargo_home={:?} nextest={} make={}",
            cargo_home, nextest_available, make_available
        );

        Self {
            cargo_home,
            nextest_available,
            make_available,
            installed: None,
        }
    }

    /// Fixed capabilities, for hosts that already know them and for tests
    pub fn with_capabilities(nextest_available: bool, make_available: bool) -> Self {
        let mut installed = vec!["cargo".to_string()];
        if nextest_available {
            installed.push(NEXTEST_PROGRAM.to_string());
        }
        if make_available {
            installed.push(MAKE_PROGRAM.to_string());
        }
        Self {
            cargo_home: None,
            nextest_available,
            make_available,
            installed: Some(installed),
        }
    }
}

impl HostCapabilities for Environment {
    fn nextest_available(&self) -> bool {
        self.nextest_available
    }

    fn make_available(&self) -> bool {
        self.make_available
    }

    fn has_program(&self, program: &str) -> bool {
        if let Some(installed) = &self.installed {
            return installed.iter().any(|p| p == program);
        }
        if find_on_path(program).is_some() {
            return true;
        }
        self.cargo_home
            .as_ref()
            .is_some_and(|home| executable_in(&home.join("bin"), program).is_some())
    }
}

/// `cargoHome` setting, then `$CARGO_HOME`, then `~/.cargo`
pub fn resolve_cargo_home(configured: Option<&Path>) -> Option<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .or_else(|| env::var_os("CARGO_HOME").map(PathBuf::from))
        .or_else(|| dirs::home_dir().map(|home| home.join(".cargo")))
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    env::split_paths(&path).find_map(|dir| executable_in(&dir, program))
}

fn executable_in(dir: &Path, program: &str) -> Option<PathBuf> {
    let candidate = dir.join(program);
    if candidate.is_file() {
        return Some(candidate);
    }
    if cfg!(windows) {
        let exe = dir.join(format!("{program}.exe"));
        if exe.is_file() {
            return Some(exe);
        }
    }
    None
}
