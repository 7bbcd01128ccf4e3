//! Module paths and `mod` declarations, derived from file layout and
//! line-level source scanning.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, trace};

use super::source_scan::{BraceMap, MOD_BLOCK_RE, MOD_DECL_RE};
use crate::impl_case_insensitive_deserialize;

pub const PATH_SEPARATOR: &str = "::";

/// Segments from the crate root down to a file or inline module
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ModulePath {
    segments: Vec<String>,
}

impl ModulePath {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    pub fn join(&self) -> String {
        self.segments.join(PATH_SEPARATOR)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join())
    }
}

impl<S: Into<String>> FromIterator<S> for ModulePath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

/// How files under `src/bin/` map onto module paths
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ModulePathConvention {
    /// `bin` and the binary's own directory are crate roots, not modules
    #[default]
    Structural,
    /// Paths relative to `src/` are used as written
    SourceRelative,
}

impl_case_insensitive_deserialize!(
    ModulePathConvention,
    Structural => "structural",
    SourceRelative => "sourcerelative"
);

/// Names declared with `mod name;` at the top level of a source text, in
/// file order. Declarations nested inside inline modules are skipped.
pub fn declared_modules(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().collect();
    let braces = BraceMap::new(&lines);
    let mut depth = 0;
    let mut names = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        if depth == 0 {
            if let Some(name) = MOD_DECL_RE.captures(line).and_then(|c| c.get(1)) {
                names.push(name.as_str().to_string());
            }
        }
        depth += braces.delta(index);
    }

    names
}

/// [`declared_modules`] for a file on disk. Unreadable files declare nothing.
pub fn extract_module_declarations(file_path: &Path) -> Vec<String> {
    match std::fs::read_to_string(file_path) {
        Ok(text) => declared_modules(&text),
        Err(e) => {
            debug!("Cannot read {:?} for module declarations: {}", file_path, e);
            Vec::new()
        }
    }
}

/// Module path of a file relative to its crate's `src/` directory.
///
/// Root files (`lib.rs`, `main.rs`) and files outside `src/` (examples,
/// integration tests, benches) produce the empty path.
pub fn build_module_path(
    file_path: &Path,
    crate_root_src_dir: &Path,
    convention: ModulePathConvention,
) -> ModulePath {
    let Ok(relative) = file_path.strip_prefix(crate_root_src_dir) else {
        return ModulePath::root();
    };

    let mut segments: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if let Some(last) = segments.last_mut() {
        if let Some(stem) = last.strip_suffix(".rs") {
            *last = stem.to_string();
        }
    }
    if segments.last().map(String::as_str) == Some("mod") {
        segments.pop();
    }

    if convention == ModulePathConvention::Structural && segments.first().map(String::as_str) == Some("bin") {
        segments.remove(0);
        // src/bin/tool.rs and src/bin/tool/main.rs are crate roots of their own
        if !segments.is_empty() {
            segments.remove(0);
        }
    }

    if matches!(segments.as_slice(), [only] if only == "lib" || only == "main") {
        segments.clear();
    }

    ModulePath::new(segments)
}

/// Inline `mod name { ... }` blocks enclosing a line, outermost first.
///
/// A module opened on the line itself counts as enclosing it, and so does the
/// line holding its closing brace.
pub fn enclosing_inline_modules<S: AsRef<str>>(lines: &[S], braces: &BraceMap, line: usize) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }
    let mut stack: Vec<(String, i32)> = Vec::new();
    let mut depth = 0;

    for index in 0..=line.min(lines.len() - 1) {
        let text = lines[index].as_ref();
        if let Some(name) = MOD_BLOCK_RE.captures(text).and_then(|c| c.get(1)) {
            stack.push((name.as_str().to_string(), depth));
        }
        if index == line {
            break;
        }
        depth += braces.delta(index);
        while stack.last().is_some_and(|(_, opened_at)| depth <= *opened_at) {
            stack.pop();
        }
    }

    stack.into_iter().map(|(name, _)| name).collect()
}

/// Files reachable from a crate root through `mod` declarations.
#[derive(Debug, Clone, Default)]
pub struct ModuleGraph {
    modules: HashMap<PathBuf, ModulePath>,
}

impl ModuleGraph {
    /// Walk `mod` declarations breadth-first starting at `root_file`
    /// (`src/lib.rs`, `src/main.rs`, a `src/bin` entry, ...).
    pub fn build(root_file: &Path) -> Self {
        let mut modules = HashMap::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();

        if root_file.is_file() {
            queue.push_back((root_file.to_path_buf(), ModulePath::root()));
        }

        while let Some((file, path)) = queue.pop_front() {
            if !visited.insert(file.clone()) {
                continue;
            }
            let child_dir = child_module_dir(&file, file.as_path() == root_file);
            for name in extract_module_declarations(&file) {
                let Some(child) = resolve_module_file(&child_dir, &name) else {
                    trace!("Module {} declared in {:?} has no file", name, file);
                    continue;
                };
                queue.push_back((child, path.child(name)));
            }
            modules.insert(file, path);
        }

        debug!("Module graph from {:?} has {} files", root_file, modules.len());
        Self { modules }
    }

    pub fn contains(&self, file: &Path) -> bool {
        self.modules.contains_key(file)
    }

    pub fn module_path(&self, file: &Path) -> Option<&ModulePath> {
        self.modules.get(file)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Directory holding the children of a module file: the file's own directory
/// for crate roots and `mod.rs`, otherwise a directory named after the file.
fn child_module_dir(file: &Path, is_root: bool) -> PathBuf {
    let parent = file.parent().unwrap_or(Path::new(""));
    let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if is_root || stem == "mod" {
        parent.to_path_buf()
    } else {
        parent.join(stem)
    }
}

fn resolve_module_file(dir: &Path, name: &str) -> Option<PathBuf> {
    let flat = dir.join(format!("{name}.rs"));
    if flat.is_file() {
        return Some(flat);
    }
    let nested = dir.join(name).join("mod.rs");
    nested.is_file().then_some(nested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn path_of(file: &str, convention: ModulePathConvention) -> String {
        build_module_path(
            &Path::new("/work/demo/src").join(file),
            Path::new("/work/demo/src"),
            convention,
        )
        .join()
    }

    #[test]
    fn test_declared_modules_in_order() {
        let text = r#"
pub mod config;
mod parser;
pub(crate) mod utils;
mod inline {
    mod nested;
}
// mod commented;
"#;
        assert_eq!(declared_modules(text), vec!["config", "parser", "utils"]);
    }

    #[test]
    fn test_module_path_root_files_are_empty() {
        assert_eq!(path_of("lib.rs", ModulePathConvention::Structural), "");
        assert_eq!(path_of("main.rs", ModulePathConvention::Structural), "");
        assert_eq!(path_of("foo.rs", ModulePathConvention::Structural), "foo");
        assert_eq!(path_of("foo/bar.rs", ModulePathConvention::Structural), "foo::bar");
        assert_eq!(path_of("foo/mod.rs", ModulePathConvention::Structural), "foo");
        assert_eq!(path_of("foo/lib.rs", ModulePathConvention::Structural), "foo::lib");
    }

    #[test]
    fn test_module_path_bin_structural() {
        let convention = ModulePathConvention::Structural;
        assert_eq!(path_of("bin/tool.rs", convention), "");
        assert_eq!(path_of("bin/tool/main.rs", convention), "");
        assert_eq!(path_of("bin/tool/helpers.rs", convention), "helpers");
        assert_eq!(path_of("bin/tool/cmd/mod.rs", convention), "cmd");
    }

    #[test]
    fn test_module_path_bin_source_relative() {
        let convention = ModulePathConvention::SourceRelative;
        assert_eq!(path_of("bin/tool.rs", convention), "bin::tool");
        assert_eq!(path_of("bin/tool/helpers.rs", convention), "bin::tool::helpers");
        assert_eq!(path_of("main.rs", convention), "");
    }

    #[test]
    fn test_module_path_outside_src_is_empty() {
        for convention in [ModulePathConvention::Structural, ModulePathConvention::SourceRelative] {
            let path = build_module_path(
                Path::new("/work/demo/examples/basic.rs"),
                Path::new("/work/demo/src"),
                convention,
            );
            assert!(path.is_empty());
        }
    }

    #[test]
    fn test_convention_deserializes_from_settings_names() {
        let value: ModulePathConvention = serde_json::from_str(r#""sourceRelative""#).unwrap();
        assert_eq!(value, ModulePathConvention::SourceRelative);
        let value: ModulePathConvention = serde_json::from_str(r#""STRUCTURAL""#).unwrap();
        assert_eq!(value, ModulePathConvention::Structural);
        assert!(serde_json::from_str::<ModulePathConvention>(r#""flat""#).is_err());
    }

    #[test]
    fn test_enclosing_inline_modules() {
        let src = "mod geometry {\n    mod tests {\n        fn a() {\n        }\n    }\n}\nfn after() {}";
        let lines: Vec<&str> = src.lines().collect();
        let braces = BraceMap::new(&lines);

        assert_eq!(enclosing_inline_modules(&lines, &braces, 0), vec!["geometry"]);
        assert_eq!(enclosing_inline_modules(&lines, &braces, 1), vec!["geometry", "tests"]);
        assert_eq!(enclosing_inline_modules(&lines, &braces, 3), vec!["geometry", "tests"]);
        assert_eq!(enclosing_inline_modules(&lines, &braces, 4), vec!["geometry", "tests"]);
        assert_eq!(enclosing_inline_modules(&lines, &braces, 5), vec!["geometry"]);
        assert!(enclosing_inline_modules(&lines, &braces, 6).is_empty());
    }

    #[test]
    fn test_module_graph_reachability() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("net")).unwrap();
        fs::write(src.join("lib.rs"), "pub mod net;\nmod missing;\n").unwrap();
        fs::write(src.join("net/mod.rs"), "mod tcp;\n").unwrap();
        fs::write(src.join("net/tcp.rs"), "pub fn connect() {}\n").unwrap();
        fs::write(src.join("orphan.rs"), "").unwrap();

        let graph = ModuleGraph::build(&src.join("lib.rs"));
        assert_eq!(graph.len(), 3);
        assert!(graph.contains(&src.join("net/tcp.rs")));
        assert!(!graph.contains(&src.join("orphan.rs")));
        assert_eq!(
            graph.module_path(&src.join("net/tcp.rs")).map(ModulePath::join),
            Some("net::tcp".to_string())
        );
    }

    #[test]
    fn test_module_graph_non_mod_rs_children() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("net")).unwrap();
        fs::write(src.join("main.rs"), "mod net;\nfn main() {}\n").unwrap();
        fs::write(src.join("net.rs"), "mod udp;\n").unwrap();
        fs::write(src.join("net/udp.rs"), "").unwrap();

        let graph = ModuleGraph::build(&src.join("main.rs"));
        assert!(graph.contains(&src.join("net/udp.rs")));
    }
}
