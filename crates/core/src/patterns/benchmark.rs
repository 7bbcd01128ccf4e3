use std::sync::LazyLock;

use regex::Regex;

use crate::types::SourceDocument;

/// `group.bench_function("id", ...)` and similar registrations
static BENCH_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\w+)\.bench_function\(\s*"([^"]+)""#).expect("Failed to create bench function regex")
});

/// Benchmark id registered on the cursor line or the nearest line above it
pub fn find_benchmark_id(document: &SourceDocument, cursor_line: usize) -> Option<String> {
    if document.line_count() == 0 {
        return None;
    }
    let start = document.clamp_line(cursor_line);
    (0..=start).rev().find_map(|line| {
        BENCH_FUNCTION_RE
            .captures(document.line(line))
            .map(|caps| caps[2].to_string())
    })
}
