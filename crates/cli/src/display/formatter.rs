use cargo_cursor_core::{Analysis, Classification, CrateRole, runner::ResolvedScope};

use super::command_breakdown::print_command_breakdown;

/// Human-readable crate role, with the target name when there is one
pub fn describe_role(classification: &Classification) -> String {
    let label = match classification.role {
        CrateRole::Binary => "Binary",
        CrateRole::Library => "Library",
        CrateRole::BuildScript => "Build script",
        CrateRole::IntegrationTest => "Integration test",
        CrateRole::Example => "Example",
        CrateRole::Benchmark => "Benchmark",
        CrateRole::Unknown => "Unknown",
    };
    match &classification.target_name {
        Some(name) => format!("{label} '{name}'"),
        None => label.to_string(),
    }
}

fn describe_scope(scope: Option<&ResolvedScope>) -> String {
    match scope {
        Some(scope) => format!(
            "{} '{}' (lines {}-{})",
            scope.kind,
            scope.name,
            scope.range.start.line + 1,
            scope.range.end.line + 1
        ),
        None => "whole file".to_string(),
    }
}

pub fn print_analysis(analysis: &Analysis) {
    println!(
        "🔍 Analyzing: {}:{}",
        analysis.file.display(),
        analysis.position.line + 1
    );
    println!("{}", "=".repeat(80));

    match &analysis.manifest {
        Some(manifest) => println!("📦 Manifest: {}", manifest.display()),
        None => println!("📦 Manifest: none"),
    }
    if let Some(package) = &analysis.package {
        println!("   Package: {package}");
    }
    println!("🎯 Crate role: {}", describe_role(&analysis.classification));

    if analysis.module_path.is_empty() {
        println!("📂 Module path: (crate root)");
    } else {
        println!("📂 Module path: {}", analysis.module_path);
    }
    println!("🔎 Scope: {}", describe_scope(analysis.scope.as_ref()));
    println!("🧪 Test context: {}", if analysis.in_test_context { "yes" } else { "no" });

    if let Some(target) = &analysis.test_target {
        let kind = if target.is_module() { "module" } else { "function" };
        println!("   Test {kind}: {}", target.path());
    }
    if let Some(id) = &analysis.benchmark_id {
        println!("⚡ Benchmark id: {id}");
    }
    if let Some(doc_test) = &analysis.doc_test {
        println!(
            "📝 Doc test: {} (lines {}-{})",
            doc_test.fn_name,
            doc_test.first_line + 1,
            doc_test.last_line + 1
        );
    }
    if let Some(makefile) = &analysis.makefile {
        println!("🛠  Makefile: {}", makefile.display());
    }
    println!("🚀 nextest: {}", if analysis.nextest { "enabled" } else { "disabled" });

    match &analysis.command {
        Some(command) => {
            println!("\n▶️  {}", command.to_shell_command());
            print_command_breakdown(command);
        }
        None => println!("\n❌ Nothing to run at this location"),
    }
}
