//! Pipeline that turns a cursor position into a command: manifest, crate
//! role, module path, scope, test context, then synthesis.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    build_system::{self, CrateRoleClassifier, Makefile, Manifest},
    command::{CargoCommand, CommandBuilder, SynthesisInput},
    config::{OverrideConfig, Settings},
    environment::Environment,
    error::{Error, Result},
    interfaces::{HostCapabilities, SymbolProvider, TreeSitterSymbols},
    parser::{ModuleGraph, ModulePath, ModulePathConvention, ScopeResolver, build_module_path},
    patterns::{
        DocTestMatch, TestTarget, contains_tests, find_benchmark_id, find_doc_test, get_test_function_name,
        is_cfg_test_line, is_in_test_context, qualify_test_identifier, test_context::enclosing_modules,
    },
    types::{Classification, CrateRole, Position, Range, SourceDocument, SymbolKind, SymbolNode},
};

const SRC_DIR: &str = "src";

/// The innermost scope the cursor resolved to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedScope {
    pub name: String,
    pub kind: SymbolKind,
    pub range: Range,
}

impl From<&SymbolNode> for ResolvedScope {
    fn from(node: &SymbolNode) -> Self {
        Self {
            name: node.name.clone(),
            kind: node.kind,
            range: node.range,
        }
    }
}

/// Every fact gathered for one cursor, plus the command they lead to
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub file: PathBuf,
    pub position: Position,
    pub manifest: Option<PathBuf>,
    pub package: Option<String>,
    pub classification: Classification,
    pub module_path: ModulePath,
    /// `None` when the whole file is the scope
    pub scope: Option<ResolvedScope>,
    pub in_test_context: bool,
    pub test_target: Option<TestTarget>,
    pub benchmark_id: Option<String>,
    pub doc_test: Option<DocTestMatch>,
    pub makefile: Option<PathBuf>,
    pub nextest: bool,
    /// `None` when nothing can run at the cursor
    pub command: Option<CargoCommand>,
}

/// Resolves cursors to commands.
///
/// Settings, manifest, Makefile and override config are read fresh for every
/// call; nothing is cached between cursors.
#[derive(Default)]
pub struct CursorRunner {
    workspace_root: Option<PathBuf>,
    settings: Option<Settings>,
    capabilities: Option<Box<dyn HostCapabilities>>,
}

impl CursorRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upper bound for every upward file search
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Use this snapshot instead of the nearest settings file
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Use these capabilities instead of probing the machine
    pub fn with_capabilities(mut self, capabilities: impl HostCapabilities + 'static) -> Self {
        self.capabilities = Some(Box::new(capabilities));
        self
    }

    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    /// Settings that apply to `file`
    pub fn settings_for(&self, file: &Path) -> Result<Settings> {
        match &self.settings {
            Some(settings) => {
                settings.priority_kinds()?;
                Ok(settings.clone())
            }
            None => Settings::load_nearest(file, self.workspace_root()),
        }
    }

    /// Command for the cursor, with symbols from tree-sitter
    pub fn command_at_line(&self, file: &Path, line: u32) -> Result<CargoCommand> {
        let mut symbols = TreeSitterSymbols::new()?;
        self.command_at(file, Position::new(line, 0), &mut symbols)
    }

    /// Command for the cursor. Fails with [`Error::NoApplicableAction`] when
    /// nothing applies.
    pub fn command_at(
        &self,
        file: &Path,
        position: Position,
        symbols: &mut dyn SymbolProvider,
    ) -> Result<CargoCommand> {
        self.analyze(file, position, symbols)?
            .command
            .ok_or(Error::NoApplicableAction)
    }

    pub fn analyze(&self, file: &Path, position: Position, symbols: &mut dyn SymbolProvider) -> Result<Analysis> {
        if file.as_os_str().is_empty() || !file.is_file() {
            debug!("No document at {:?}", file);
            return Err(Error::NoActiveContext);
        }

        let document = SourceDocument::open(file)?;
        let line = document.clamp_line(position.line as usize);
        debug!("Analyzing {:?} at line {}", file, line);

        let settings = self.settings_for(file)?;
        let resolver = ScopeResolver::new(settings.priority_kinds()?);

        let manifest = build_system::load_nearest(file, self.workspace_root());
        let classification = CrateRoleClassifier::new(manifest.as_ref()).classify_source(file, document.text());
        debug!("Classified {:?} as {:?}", file, classification);

        let module_path = module_path_for(file, manifest.as_ref(), settings.module_path_convention);
        debug!("Module path: '{}'", module_path);

        let scope = resolve_scope(&resolver, &document, position, symbols)?;

        let module_scope_with_tests = scope
            .as_ref()
            .is_some_and(|scope| scope.kind == SymbolKind::Module && contains_tests(&document, &scope.range));
        let in_test_context = is_in_test_context(&document, line) || module_scope_with_tests;

        let inline_modules = enclosing_modules(&document, line);
        let test_target = if in_test_context {
            match get_test_function_name(&document, line) {
                Some(name) => Some(qualify_test_identifier(&module_path, &inline_modules, &name)),
                None if module_scope_with_tests => {
                    let mut path = module_path.clone();
                    for module in &inline_modules {
                        path.push(module.as_str());
                    }
                    Some(TestTarget::Module(path.join()))
                }
                None => None,
            }
        } else {
            None
        };
        debug!("Test context: {} target: {:?}", in_test_context, test_target);

        let benchmark_id = if classification.role == CrateRole::Benchmark {
            find_benchmark_id(&document, line)
        } else {
            None
        };
        let doc_test = find_doc_test(&document, line);

        let makefile = build_system::makefile::load_nearest(file, self.workspace_root());
        let overrides = OverrideConfig::load_nearest(file, self.workspace_root());

        let probed;
        let capabilities: &dyn HostCapabilities = match &self.capabilities {
            Some(capabilities) => capabilities.as_ref(),
            None => {
                probed = Environment::detect(&settings);
                &probed
            }
        };

        let package = manifest.as_ref().and_then(|m| m.package_name.clone());
        let working_dir = manifest
            .as_ref()
            .map(|m| m.dir().to_path_buf())
            .or_else(|| file.parent().map(Path::to_path_buf));

        let command = if is_cfg_test_line(&document, line) {
            debug!("Cursor is on #[cfg(test)], nothing to run");
            None
        } else {
            let mut input = SynthesisInput::new(package.as_deref(), &classification);
            input.in_test_context = in_test_context;
            input.test_target = test_target.as_ref();
            input.benchmark_id = benchmark_id.as_deref();
            input.doc_test_fn = doc_test.as_ref().map(|m| m.fn_name.as_str());
            input.makefile = makefile.as_ref();
            input.overrides = overrides.as_ref();
            input.nextest = capabilities.nextest_available();
            input.make_available = capabilities.make_available();
            input.working_dir = working_dir.as_deref();

            match CommandBuilder::synthesize(&input) {
                Ok(command) => Some(command),
                Err(Error::NoApplicableAction) => None,
                Err(e) => return Err(e),
            }
        };

        if let Some(command) = &command {
            info!("Command for {:?}:{}: {}", file, line + 1, command.to_shell_command());
        }

        Ok(Analysis {
            file: file.to_path_buf(),
            position,
            manifest: manifest.as_ref().map(|m| m.path.clone()),
            package,
            classification,
            module_path,
            scope,
            in_test_context,
            test_target,
            benchmark_id,
            doc_test,
            makefile: makefile.map(|m: Makefile| m.path),
            nextest: capabilities.nextest_available(),
            command,
        })
    }
}

/// Innermost prioritized scope, or `None` for the whole file when the host
/// has no symbols or nothing matches
fn resolve_scope(
    resolver: &ScopeResolver,
    document: &SourceDocument,
    position: Position,
    symbols: &mut dyn SymbolProvider,
) -> Result<Option<ResolvedScope>> {
    let tree = match symbols.document_symbols(document) {
        Ok(tree) => tree,
        Err(Error::SymbolsUnavailable) => {
            debug!("{}, using the whole file", Error::SymbolsUnavailable);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    match resolver.resolve(&tree, position) {
        Some(node) => {
            debug!("Resolved scope: {} '{}'", node.kind, node.name);
            Ok(Some(ResolvedScope::from(node)))
        }
        None => {
            debug!("{}, using the whole file", Error::NoMatchingScope);
            Ok(None)
        }
    }
}

/// Module path of `file` within its crate.
///
/// Under the structural convention, crate roots the manifest declares with an
/// explicit `path` are walked first, so their own files contribute no segment
/// wherever they live. Everything else is derived from the layout under `src/`.
fn module_path_for(file: &Path, manifest: Option<&Manifest>, convention: ModulePathConvention) -> ModulePath {
    if convention == ModulePathConvention::Structural {
        let declared = manifest.map(Manifest::declared_roots).unwrap_or_default();
        for root in declared {
            if let Some(path) = ModuleGraph::build(&root).module_path(file) {
                debug!("{:?} is '{}' under declared crate root {:?}", file, path, root);
                return path.clone();
            }
        }
    }

    source_root(file, manifest)
        .map(|src| build_module_path(file, &src, convention))
        .unwrap_or_default()
}

/// `src/` of the crate holding `file`: the manifest's, else the nearest
/// ancestor named `src`
fn source_root(file: &Path, manifest: Option<&Manifest>) -> Option<PathBuf> {
    if let Some(manifest) = manifest {
        return Some(manifest.dir().join(SRC_DIR));
    }
    file.ancestors()
        .skip(1)
        .find(|dir| dir.file_name().is_some_and(|name| name == SRC_DIR))
        .map(Path::to_path_buf)
}
