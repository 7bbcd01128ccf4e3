use std::path::{Path, PathBuf};

use tracing::trace;

/// Nearest `file_name` from the directory of `start_path` upward. The search
/// ends after `boundary` (the workspace root) or the filesystem root has been
/// checked.
pub fn find_upward(start_path: &Path, file_name: &str, boundary: Option<&Path>) -> Option<PathBuf> {
    let mut current = if start_path.is_dir() {
        start_path
    } else {
        start_path.parent()?
    };

    loop {
        let candidate = current.join(file_name);
        if candidate.is_file() {
            trace!("Found {} at {:?}", file_name, candidate);
            return Some(candidate);
        }

        if let Some(boundary) = boundary {
            if current == boundary || !current.starts_with(boundary) {
                return None;
            }
        }

        current = current.parent()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_nearest_match_wins() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("marker"), "").unwrap();
        fs::write(root.join("a/marker"), "").unwrap();
        let file = nested.join("main.rs");
        fs::write(&file, "").unwrap();

        assert_eq!(find_upward(&file, "marker", Some(root)), Some(root.join("a/marker")));
        assert_eq!(find_upward(&nested, "marker", None), Some(root.join("a/marker")));
    }

    #[test]
    fn test_boundary_is_checked_last() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let nested = root.join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.join("marker"), "").unwrap();

        assert_eq!(find_upward(&nested, "marker", Some(root)), Some(root.join("marker")));
        assert!(find_upward(&nested, "marker", Some(&root.join("a"))).is_none());
        assert!(find_upward(&nested, "missing", Some(root)).is_none());
    }
}
