//! Which cargo target a source file belongs to

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    build_system::manifest::{Manifest, TargetEntry},
    parser::{ModuleGraph, source_scan::has_main_fn},
    types::{Classification, CrateRole},
};

const SRC_DIR: &str = "src";
const BIN_DIR: &str = "bin";
const TESTS_DIR: &str = "tests";
const EXAMPLES_DIR: &str = "examples";
const BENCHES_DIR: &str = "benches";

const LIB_STEM: &str = "lib";
const MAIN_STEM: &str = "main";
const BUILD_STEM: &str = "build";

/// Classifies files against the nearest manifest, if one was found.
///
/// Rules run in a fixed order and the first match wins: file-name
/// conventions, directory conventions, manifest entries, then membership in
/// the module tree of a crate root.
#[derive(Debug, Clone, Copy)]
pub struct CrateRoleClassifier<'a> {
    manifest: Option<&'a Manifest>,
}

impl<'a> CrateRoleClassifier<'a> {
    pub fn new(manifest: Option<&'a Manifest>) -> Self {
        Self { manifest }
    }

    /// Classify a file on disk. An unreadable file is classified by its path
    /// alone.
    pub fn classify(&self, file: &Path) -> Classification {
        let text = std::fs::read_to_string(file).unwrap_or_default();
        self.classify_source(file, &text)
    }

    /// Classify a file whose content is already loaded (an editor buffer).
    pub fn classify_source(&self, file: &Path, text: &str) -> Classification {
        let (rule, classification) = self.first_match(file, text);
        debug!(
            "Classified {:?} as {} ({}) by rule {}",
            file,
            classification.role,
            classification.target_name.as_deref().unwrap_or("-"),
            rule
        );
        classification
    }

    fn first_match(&self, file: &Path, text: &str) -> (u8, Classification) {
        let stem = file_stem(file);
        let parent = parent_name(file);

        if stem == LIB_STEM {
            return (1, Classification::new(CrateRole::Library, self.library_name()));
        }

        let has_main = has_main_fn(text);

        if stem == BUILD_STEM && has_main {
            return (2, Classification::new(CrateRole::BuildScript, None));
        }

        if (parent == BIN_DIR || stem == MAIN_STEM) && has_main {
            return (3, Classification::new(CrateRole::Binary, self.binary_name(file)));
        }

        if parent == TESTS_DIR && !self.is_under_src(file) {
            return (4, Classification::new(CrateRole::IntegrationTest, Some(stem.to_string())));
        }

        if parent == EXAMPLES_DIR {
            return (5, Classification::new(CrateRole::Example, Some(stem.to_string())));
        }

        if let Some(name) = self.benchmark_name(file) {
            return (6, Classification::new(CrateRole::Benchmark, Some(name)));
        }

        if let Some(name) = self.manifest_binary(file) {
            return (7, Classification::new(CrateRole::Binary, Some(name)));
        }

        if let Some(library) = self.manifest.and_then(|m| m.library.as_ref()) {
            return (
                8,
                Classification::new(CrateRole::Library, library.name.clone().or_else(|| self.package_name())),
            );
        }

        if let Some(classification) = self.module_graph_member(file) {
            return (9, classification);
        }

        (10, Classification::unknown())
    }

    fn package_name(&self) -> Option<String> {
        self.manifest.and_then(|m| m.package_name.clone())
    }

    fn library_name(&self) -> Option<String> {
        self.manifest
            .and_then(|m| m.library.as_ref())
            .and_then(|lib| lib.name.clone())
            .or_else(|| self.package_name())
    }

    /// Directory holding the crate's `Cargo.toml`, or the parent of the
    /// nearest `src` directory when no manifest was found.
    fn crate_dir(&self, file: &Path) -> Option<PathBuf> {
        if let Some(manifest) = self.manifest {
            return Some(manifest.dir().to_path_buf());
        }
        file.ancestors()
            .skip(1)
            .find(|dir| dir.file_name().is_some_and(|name| name == SRC_DIR))
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }

    fn relative_path(&self, file: &Path) -> Option<String> {
        let dir = self.crate_dir(file)?;
        let relative = file.strip_prefix(&dir).ok()?;
        Some(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
        )
    }

    fn is_under_src(&self, file: &Path) -> bool {
        match self.relative_path(file) {
            Some(relative) => relative.split('/').next() == Some(SRC_DIR),
            None => file
                .ancestors()
                .skip(1)
                .any(|dir| dir.file_name().is_some_and(|name| name == SRC_DIR)),
        }
    }

    /// Cargo binary name for a binary source file.
    ///
    /// A `[[bin]]` entry whose path is the file wins, then the cargo layout:
    /// `src/bin/<name>/main.rs` and `src/bin/<name>.rs` name themselves, any
    /// other `main.rs` is the package's default binary.
    pub fn binary_name(&self, file: &Path) -> Option<String> {
        if let (Some(manifest), Some(relative)) = (self.manifest, self.relative_path(file)) {
            let entry = manifest.binaries.iter().find(|bin| {
                bin.path
                    .as_deref()
                    .is_some_and(|path| path.trim_start_matches("./") == relative)
            });
            if let Some(name) = entry.and_then(|bin| bin.name.clone()) {
                return Some(name);
            }
        }

        let stem = file_stem(file);
        let parent = parent_name(file);
        let grandparent = file
            .parent()
            .and_then(Path::parent)
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .unwrap_or("");

        if stem == MAIN_STEM && grandparent == BIN_DIR {
            return Some(parent.to_string());
        }
        if parent == BIN_DIR {
            return Some(stem.to_string());
        }
        if stem == MAIN_STEM {
            return self.package_name();
        }
        None
    }

    /// Cargo bench target name for a file: a `[[bench]]` entry whose path
    /// (or default `benches/<name>.rs`) is the file, otherwise the stem of a
    /// file directly under `benches/`.
    pub fn benchmark_name(&self, file: &Path) -> Option<String> {
        let relative = self.relative_path(file)?;

        if let Some(manifest) = self.manifest {
            let explicit = manifest
                .benchmarks
                .iter()
                .find(|bench| bench_path(bench).as_deref() == Some(relative.as_str()));
            if let Some(bench) = explicit {
                return bench.name.clone().or_else(|| Some(file_stem(file).to_string()));
            }
        }

        let mut parts = relative.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(BENCHES_DIR), Some(_), None) => Some(file_stem(file).to_string()),
            _ => None,
        }
    }

    /// Rule 7: a `[[bin]]` entry whose path is the file, or whose own
    /// directory (other than `src` itself) holds it.
    fn manifest_binary(&self, file: &Path) -> Option<String> {
        let manifest = self.manifest?;
        let relative = self.relative_path(file)?;

        manifest.binaries.iter().find_map(|bin| {
            let path = bin.path.as_deref()?.trim_start_matches("./");
            let name = bin.name.clone().or_else(|| self.package_name());
            if path == relative {
                return name;
            }
            let (dir, _) = path.rsplit_once('/')?;
            if dir != SRC_DIR && relative.starts_with(&format!("{dir}/")) {
                return name;
            }
            None
        })
    }

    /// Rule 9: walk `mod` declarations from each crate root. Binary roots
    /// are tried before library roots.
    fn module_graph_member(&self, file: &Path) -> Option<Classification> {
        let crate_dir = self.crate_dir(file)?;

        for (root, name) in self.binary_roots(&crate_dir) {
            if ModuleGraph::build(&root).contains(file) {
                debug!("{:?} is reachable from binary root {:?}", file, root);
                return Some(Classification::new(CrateRole::Binary, name));
            }
        }

        for root in self.library_roots(&crate_dir) {
            if ModuleGraph::build(&root).contains(file) {
                debug!("{:?} is reachable from library root {:?}", file, root);
                return Some(Classification::new(CrateRole::Library, self.library_name()));
            }
        }

        None
    }

    fn binary_roots(&self, crate_dir: &Path) -> Vec<(PathBuf, Option<String>)> {
        let mut roots = Vec::new();
        let src = crate_dir.join(SRC_DIR);

        let main = src.join("main.rs");
        if main.is_file() {
            roots.push((main, self.package_name()));
        }

        if let Ok(entries) = std::fs::read_dir(src.join(BIN_DIR)) {
            let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok()).map(|e| e.path()).collect();
            paths.sort();
            for path in paths {
                if path.is_dir() {
                    let main = path.join("main.rs");
                    if main.is_file() {
                        let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
                        roots.push((main, name));
                    }
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let name = Some(file_stem(&path).to_string());
                    roots.push((path, name));
                }
            }
        }

        if let Some(manifest) = self.manifest {
            for bin in &manifest.binaries {
                if let Some(path) = &bin.path {
                    let root = crate_dir.join(path);
                    if root.is_file() && !roots.iter().any(|(known, _)| *known == root) {
                        roots.push((root, bin.name.clone()));
                    }
                }
            }
        }

        roots
    }

    fn library_roots(&self, crate_dir: &Path) -> Vec<PathBuf> {
        let mut roots = vec![crate_dir.join(SRC_DIR).join("lib.rs")];
        if let Some(path) = self.manifest.and_then(|m| m.library.as_ref()).and_then(|l| l.path.as_ref()) {
            let root = crate_dir.join(path);
            if !roots.contains(&root) {
                roots.push(root);
            }
        }
        roots.retain(|root| root.is_file());
        roots
    }
}

/// Declared path of a bench entry, or cargo's default location for it
fn bench_path(bench: &TargetEntry) -> Option<String> {
    match (&bench.path, &bench.name) {
        (Some(path), _) => Some(path.trim_start_matches("./").to_string()),
        (None, Some(name)) => Some(format!("{BENCHES_DIR}/{name}.rs")),
        (None, None) => None,
    }
}

fn file_stem(file: &Path) -> &str {
    file.file_stem().and_then(|s| s.to_str()).unwrap_or("")
}

fn parent_name(file: &Path) -> &str {
    file.parent()
        .and_then(Path::file_name)
        .and_then(|n| n.to_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build_system::manifest::parse_manifest;
    use std::fs;
    use tempfile::TempDir;

    fn project(manifest: &str, files: &[(&str, &str)]) -> (TempDir, Manifest) {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("Cargo.toml"), manifest).unwrap();
        for (path, content) in files {
            let path = root.join(path);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let manifest = parse_manifest(&root.join("Cargo.toml")).unwrap();
        (temp_dir, manifest)
    }

    const PACKAGE: &str = "[package]\nname = \"demo\"\nversion = \"0.1.0\"\n";

    #[test]
    fn test_lib_file_is_always_library() {
        let (dir, manifest) = project(
            &format!("{PACKAGE}\n[[bin]]\nname = \"x\"\npath = \"src/lib.rs\"\n"),
            &[("src/lib.rs", "fn main() {}")],
        );
        let classifier = CrateRoleClassifier::new(Some(&manifest));
        let found = classifier.classify(&dir.path().join("src/lib.rs"));
        assert_eq!(found.role, CrateRole::Library);
        assert_eq!(found.target_name.as_deref(), Some("demo"));

        let found = CrateRoleClassifier::new(None).classify_source(Path::new("lib.rs"), "");
        assert_eq!(found.role, CrateRole::Library);
    }

    #[test]
    fn test_build_script_needs_main() {
        let classifier = CrateRoleClassifier::new(None);
        let build = classifier.classify_source(Path::new("/p/build.rs"), "fn main() {\n}\n");
        assert_eq!(build.role, CrateRole::BuildScript);
        let helper = classifier.classify_source(Path::new("/p/build.rs"), "pub fn helper() {}\n");
        assert_eq!(helper.role, CrateRole::Unknown);
    }

    #[test]
    fn test_bin_directory_binary() {
        let (dir, manifest) = project(PACKAGE, &[("src/bin/tool.rs", "fn main() {}\n")]);
        let found = CrateRoleClassifier::new(Some(&manifest)).classify(&dir.path().join("src/bin/tool.rs"));
        assert_eq!(found, Classification::new(CrateRole::Binary, Some("tool".to_string())));
    }

    #[test]
    fn test_binary_names() {
        let (dir, manifest) = project(
            &format!("{PACKAGE}\n[[bin]]\nname = \"server\"\npath = \"src/server/main.rs\"\n"),
            &[],
        );
        let classifier = CrateRoleClassifier::new(Some(&manifest));
        let root = dir.path();
        assert_eq!(classifier.binary_name(&root.join("src/main.rs")).as_deref(), Some("demo"));
        assert_eq!(classifier.binary_name(&root.join("src/server/main.rs")).as_deref(), Some("server"));
        assert_eq!(classifier.binary_name(&root.join("src/bin/cli/main.rs")).as_deref(), Some("cli"));
        assert_eq!(classifier.binary_name(&root.join("src/bin/gen.rs")).as_deref(), Some("gen"));
        assert_eq!(classifier.binary_name(&root.join("src/util.rs")), None);
    }

    #[test]
    fn test_bin_entry_path_must_match_whole_path() {
        let (dir, manifest) = project(
            &format!("{PACKAGE}\n[[bin]]\nname = \"gen\"\npath = \"gen.rs\"\n"),
            &[("gen.rs", "fn main() {}\n"), ("src/bin/regen.rs", "fn main() {}\n")],
        );
        let classifier = CrateRoleClassifier::new(Some(&manifest));
        let root = dir.path();
        assert_eq!(classifier.binary_name(&root.join("gen.rs")).as_deref(), Some("gen"));
        assert_eq!(classifier.binary_name(&root.join("src/bin/regen.rs")).as_deref(), Some("regen"));
        assert_eq!(
            classifier.classify(&root.join("src/bin/regen.rs")),
            Classification::new(CrateRole::Binary, Some("regen".to_string()))
        );
    }

    #[test]
    fn test_integration_test_and_example() {
        let (dir, manifest) = project(
            PACKAGE,
            &[
                ("tests/api.rs", "#[test]\nfn works() {}\n"),
                ("examples/demo.rs", "fn main() {}\n"),
                ("src/tests/helpers.rs", ""),
            ],
        );
        let classifier = CrateRoleClassifier::new(Some(&manifest));
        let root = dir.path();

        let test = classifier.classify(&root.join("tests/api.rs"));
        assert_eq!(test, Classification::new(CrateRole::IntegrationTest, Some("api".to_string())));

        let example = classifier.classify(&root.join("examples/demo.rs"));
        assert_eq!(example, Classification::new(CrateRole::Example, Some("demo".to_string())));

        // a `tests` module directory inside src is not an integration test
        let nested = classifier.classify(&root.join("src/tests/helpers.rs"));
        assert_ne!(nested.role, CrateRole::IntegrationTest);
    }

    #[test]
    fn test_benchmark_entries() {
        let (dir, manifest) = project(
            &format!(
                "{PACKAGE}\n[[bench]]\nname = \"my_bench\"\npath = \"benches/bench_group/my_bench.rs\"\nharness = false\n\n[[bench]]\nname = \"parsing\"\nharness = false\n"
            ),
            &[
                ("benches/bench_group/my_bench.rs", ""),
                ("benches/parsing.rs", ""),
                ("benches/discovered.rs", ""),
            ],
        );
        let classifier = CrateRoleClassifier::new(Some(&manifest));
        let root = dir.path();

        let grouped = classifier.classify(&root.join("benches/bench_group/my_bench.rs"));
        assert_eq!(grouped, Classification::new(CrateRole::Benchmark, Some("my_bench".to_string())));
        assert_eq!(
            classifier.benchmark_name(&root.join("benches/parsing.rs")).as_deref(),
            Some("parsing")
        );
        assert_eq!(
            classifier.benchmark_name(&root.join("benches/discovered.rs")).as_deref(),
            Some("discovered")
        );
        assert_eq!(classifier.benchmark_name(&root.join("src/parsing.rs")), None);
    }

    #[test]
    fn test_manifest_binary_directory() {
        let (dir, manifest) = project(
            &format!("{PACKAGE}\n[[bin]]\nname = \"server\"\npath = \"src/server/main.rs\"\n"),
            &[("src/server/main.rs", "mod routes;\nfn main() {}\n"), ("src/server/routes.rs", "")],
        );
        let classifier = CrateRoleClassifier::new(Some(&manifest));
        let found = classifier.classify(&dir.path().join("src/server/routes.rs"));
        assert_eq!(found, Classification::new(CrateRole::Binary, Some("server".to_string())));
    }

    #[test]
    fn test_declared_library_section() {
        let (dir, manifest) = project(
            &format!("{PACKAGE}\n[lib]\nname = \"demo_core\"\npath = \"src/core.rs\"\n"),
            &[("src/core.rs", ""), ("src/other.rs", "")],
        );
        let found = CrateRoleClassifier::new(Some(&manifest)).classify(&dir.path().join("src/other.rs"));
        assert_eq!(found, Classification::new(CrateRole::Library, Some("demo_core".to_string())));
    }

    #[test]
    fn test_module_graph_membership() {
        let (dir, manifest) = project(
            PACKAGE,
            &[
                ("src/main.rs", "mod cli;\nfn main() {}\n"),
                ("src/cli.rs", "pub fn run() {}\n"),
                ("src/lib.rs", "pub mod geometry;\n"),
                ("src/geometry/mod.rs", "pub mod shapes;\n"),
                ("src/geometry/shapes.rs", ""),
                ("src/orphan.rs", ""),
            ],
        );
        let classifier = CrateRoleClassifier::new(Some(&manifest));
        let root = dir.path();

        assert_eq!(
            classifier.classify(&root.join("src/cli.rs")),
            Classification::new(CrateRole::Binary, Some("demo".to_string()))
        );
        assert_eq!(
            classifier.classify(&root.join("src/geometry/shapes.rs")),
            Classification::new(CrateRole::Library, Some("demo".to_string()))
        );
        assert_eq!(classifier.classify(&root.join("src/orphan.rs")).role, CrateRole::Unknown);
    }
}
