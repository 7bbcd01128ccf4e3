//! Whether a cursor sits inside test code

use tracing::trace;

use crate::{
    parser::{module_graph::enclosing_inline_modules, source_scan::{TEST_ATTR_RE, TEST_MARKER_RE}},
    types::{Range, SourceDocument},
};

pub const TEST_MODULE: &str = "tests";
const CFG_TEST: &str = "#[cfg(test)]";

/// True when the cursor lies in the region opened by a test marker
/// (`#[test]`, `#[tokio::test]`, `#[cfg(test)]`, `fn test_*`).
///
/// A region starts on the marker line and ends on the line where its braces
/// balance back to zero, so the closing brace line is still inside and the
/// line after it is not.
pub fn is_in_test_context(document: &SourceDocument, cursor_line: usize) -> bool {
    if !TEST_MARKER_RE.is_match(document.text()) {
        return false;
    }

    let last_marker = cursor_line.min(document.line_count().saturating_sub(1));
    (0..=last_marker)
        .filter(|line| TEST_MARKER_RE.is_match(document.line(*line)))
        .any(|marker| {
            let open = region_open_at(document, marker, cursor_line);
            if open {
                trace!("Line {} is inside the test region opened at {}", cursor_line, marker);
            }
            open
        })
}

/// Whether the region starting at `marker` is still open when `cursor_line`
/// starts.
fn region_open_at(document: &SourceDocument, marker: usize, cursor_line: usize) -> bool {
    let braces = document.braces();
    let mut depth = 0;
    let mut opened = false;

    for line in marker..cursor_line {
        if !braces.braces(line).is_empty() {
            opened = true;
        }
        depth += braces.delta(line);
        if opened && depth <= 0 {
            return false;
        }
        // `#[cfg(test)] mod tests;` and similar bodiless items
        if !opened && line > marker && document.trimmed(line).ends_with(';') {
            return false;
        }
    }

    true
}

/// Inline modules around a line, outermost first
pub fn enclosing_modules(document: &SourceDocument, line: usize) -> Vec<String> {
    enclosing_inline_modules(document.lines(), document.braces(), line)
}

/// True when the innermost inline module around the cursor is `tests`
pub fn is_inside_mod_tests(document: &SourceDocument, cursor_line: usize) -> bool {
    enclosing_modules(document, cursor_line).last().map(String::as_str) == Some(TEST_MODULE)
}

/// The cursor line carries `#[cfg(test)]` itself
pub fn is_cfg_test_line(document: &SourceDocument, cursor_line: usize) -> bool {
    document.line(cursor_line).contains(CFG_TEST)
}

/// Whether any test function is declared within `range`
pub fn contains_tests(document: &SourceDocument, range: &Range) -> bool {
    let start = range.start.line as usize;
    let end = (range.end.line as usize).min(document.line_count().saturating_sub(1));
    (start..=end).any(|line| TEST_ATTR_RE.is_match(document.line(line)))
}
