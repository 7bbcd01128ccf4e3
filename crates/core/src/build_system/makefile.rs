//! `Makefile` escape hatch: projects that wrap cargo behind `make run` or
//! `make build`.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::utils::find_upward;

pub const MAKEFILE: &str = "Makefile";
pub const RUN_TARGET: &str = "run";
pub const BUILD_TARGET: &str = "build";

/// A Makefile and the targets the synthesizer cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Makefile {
    pub path: PathBuf,
    pub has_run: bool,
    pub has_build: bool,
}

impl Makefile {
    pub fn load(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        let has_target = |target: &str| {
            content
                .lines()
                .any(|line| line.strip_prefix(target).is_some_and(|rest| rest.starts_with(':')))
        };
        Some(Self {
            path: path.to_path_buf(),
            has_run: has_target(RUN_TARGET),
            has_build: has_target(BUILD_TARGET),
        })
    }

    /// Valid when it declares a `run:` or a `build:` target
    pub fn is_valid(&self) -> bool {
        self.has_run || self.has_build
    }

    /// Directory to pass to `make -C`
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new("."))
    }
}

/// Nearest `Makefile` from the directory of `start_path` up to `boundary`
pub fn find_makefile(start_path: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let path = find_upward(start_path, MAKEFILE, boundary)?;
    debug!("Found Makefile at {:?}", path);
    Some(path)
}

/// Nearest valid Makefile, if any
pub fn load_nearest(start_path: &Path, boundary: Option<&Path>) -> Option<Makefile> {
    let path = find_makefile(start_path, boundary)?;
    Makefile::load(&path).filter(Makefile::is_valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_targets_are_detected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(MAKEFILE);
        fs::write(&path, "build:\n\tcargo build\n\nrun: build\n\t./target/debug/app\n").unwrap();

        let makefile = Makefile::load(&path).unwrap();
        assert!(makefile.has_run);
        assert!(makefile.has_build);
        assert_eq!(makefile.dir(), temp_dir.path());
    }

    #[test]
    fn test_makefile_without_known_targets_is_invalid() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(MAKEFILE);
        fs::write(&path, "test:\n\tcargo test\nrunner:\n\techo\n").unwrap();

        assert!(!Makefile::load(&path).unwrap().is_valid());
        assert!(load_nearest(&path, None).is_none());
    }

    #[test]
    fn test_find_makefile_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(MAKEFILE), "run:\n\tcargo run\n").unwrap();
        fs::create_dir_all(root.join("src/bin")).unwrap();
        let file = root.join("src/bin/app.rs");
        fs::write(&file, "fn main() {}").unwrap();

        assert_eq!(find_makefile(&file, Some(root)), Some(root.join(MAKEFILE)));
        assert!(find_makefile(&file, Some(&root.join("src"))).is_none());
    }
}
