//! Cargo manifest discovery and the subset of `Cargo.toml` the classifier reads

use std::path::{Path, PathBuf};

use cargo_toml::Product;
use tracing::debug;

use crate::{
    error::{Error, Result},
    utils::find_upward,
};

pub const MANIFEST_FILE: &str = "Cargo.toml";

/// A named cargo target (`[[bin]]`, `[lib]`, `[[bench]]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEntry {
    pub name: Option<String>,
    /// Path relative to the manifest directory, as written
    pub path: Option<String>,
}

impl From<&Product> for TargetEntry {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            path: product.path.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    /// Location of the `Cargo.toml` this was read from
    pub path: PathBuf,
    pub package_name: Option<String>,
    pub binaries: Vec<TargetEntry>,
    pub library: Option<TargetEntry>,
    pub benchmarks: Vec<TargetEntry>,
}

impl Manifest {
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Crate roots given an explicit `path` by `[lib]` or `[[bin]]`, library
    /// first
    pub fn declared_roots(&self) -> Vec<PathBuf> {
        self.library
            .iter()
            .chain(&self.binaries)
            .filter_map(|target| target.path.as_deref())
            .map(|path| self.dir().join(path.trim_start_matches("./")))
            .collect()
    }

    /// `path` relative to the manifest directory, `/`-separated
    pub fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.dir()).ok()?;
        Some(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
        )
    }
}

/// Walk up from the directory containing `start_path` looking for a
/// `Cargo.toml`. The nearest one wins. The search ends after `boundary`
/// (the workspace root) or the filesystem root has been checked.
pub fn find_manifest(start_path: &Path, boundary: Option<&Path>) -> Option<PathBuf> {
    let path = find_upward(start_path, MANIFEST_FILE, boundary)?;
    debug!("Found manifest at {:?}", path);
    Some(path)
}

pub fn parse_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let parsed = cargo_toml::Manifest::from_str(&content).map_err(|e| Error::ManifestParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(Manifest {
        path: path.to_path_buf(),
        package_name: parsed.package.as_ref().map(|p| p.name.clone()),
        binaries: parsed.bin.iter().map(TargetEntry::from).collect(),
        library: parsed.lib.as_ref().map(TargetEntry::from),
        benchmarks: parsed.bench.iter().map(TargetEntry::from).collect(),
    })
}

/// Find and parse the nearest manifest. A malformed manifest is logged and
/// treated as absent.
pub fn load_nearest(start_path: &Path, boundary: Option<&Path>) -> Option<Manifest> {
    let path = find_manifest(start_path, boundary)?;
    match parse_manifest(&path) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            debug!("{}", e);
            None
        }
    }
}
