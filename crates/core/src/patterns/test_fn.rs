//! Name of the test function around a cursor and its qualified identifier

use serde::Serialize;

use crate::{
    parser::{
        ModulePath,
        source_scan::{fn_name, is_attribute, is_comment, is_test_attribute},
    },
    patterns::test_context::{TEST_MODULE, is_inside_mod_tests},
    types::SourceDocument,
};

/// How far a multi-line signature or attribute list may stretch
const MAX_HEADER_LINES: usize = 16;

/// What a test command selects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum TestTarget {
    /// A single test, by its `::`-joined path
    Function(String),
    /// Every test nested under a module
    Module(String),
}

impl TestTarget {
    pub fn path(&self) -> &str {
        match self {
            TestTarget::Function(path) | TestTarget::Module(path) => path,
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self, TestTarget::Module(_))
    }
}

/// Identifier of the test function the cursor belongs to.
///
/// Handles the cursor on the test attribute or the `fn` line, on the
/// function's closing brace, and anywhere in its body. Inside a `mod tests`
/// block with no function around the cursor, returns `"tests"`.
pub fn get_test_function_name(document: &SourceDocument, cursor_line: usize) -> Option<String> {
    let line = document.line(cursor_line);

    if is_test_attribute(line) {
        if let Some(name) = fn_after_attribute(document, cursor_line) {
            return Some(name);
        }
    }

    if let Some(name) = fn_name(line) {
        if has_test_attribute_above(document, cursor_line) {
            return Some(name.to_string());
        }
    }

    if is_lone_closing_brace(line) {
        if let Some(name) = test_closed_at(document, cursor_line) {
            return Some(name);
        }
    }

    if let Some(name) = owning_test_fn(document, cursor_line) {
        return Some(name);
    }

    is_inside_mod_tests(document, cursor_line).then(|| TEST_MODULE.to_string())
}

/// Qualified identifier for `fn_name`, given the file's module path and the
/// inline modules around the cursor (outermost first).
pub fn qualify_test_identifier(file_module: &ModulePath, inline_modules: &[String], fn_name: &str) -> TestTarget {
    let in_test_submodule = inline_modules.last().map(String::as_str) == Some(TEST_MODULE);

    let mut path = file_module.clone();
    for module in inline_modules {
        path.push(module.as_str());
    }

    if in_test_submodule && fn_name == TEST_MODULE {
        return TestTarget::Module(path.join());
    }
    TestTarget::Function(path.child(fn_name).join())
}

fn is_lone_closing_brace(line: &str) -> bool {
    matches!(line.trim(), "}" | "};" | "},")
}

fn is_attribute_continuation(line: &str) -> bool {
    let trimmed = line.trim();
    is_attribute(line) || trimmed.ends_with(")]") || trimmed.ends_with(']')
}

/// Scan forward from an attribute line to the function it decorates
fn fn_after_attribute(document: &SourceDocument, attribute_line: usize) -> Option<String> {
    let last = (attribute_line + MAX_HEADER_LINES).min(document.line_count());
    for line in attribute_line + 1..last {
        let text = document.line(line);
        if let Some(name) = fn_name(text) {
            return Some(name.to_string());
        }
        if text.trim().is_empty() || is_comment(text) || is_attribute_continuation(text) {
            continue;
        }
        // multi-line attribute arguments
        if !text.contains('{') && !text.trim_end().ends_with(';') {
            continue;
        }
        return None;
    }
    None
}

/// Scan upward from a declaration over attributes and comments for a test
/// attribute
fn has_test_attribute_above(document: &SourceDocument, decl_line: usize) -> bool {
    let first = decl_line.saturating_sub(MAX_HEADER_LINES);
    for line in (first..decl_line).rev() {
        let text = document.line(line);
        if is_test_attribute(text) {
            return true;
        }
        let trimmed = text.trim();
        if trimmed.is_empty() || is_comment(text) || is_attribute_continuation(text) {
            continue;
        }
        if trimmed.ends_with(';') || trimmed.ends_with('}') || trimmed.ends_with('{') {
            return false;
        }
    }
    false
}

/// Declaration line and name of the function whose body opens on `open_line`
fn fn_header(document: &SourceDocument, open_line: usize) -> Option<(usize, String)> {
    let first = open_line.saturating_sub(MAX_HEADER_LINES);
    for line in (first..=open_line).rev() {
        let text = document.line(line);
        if let Some(name) = fn_name(text) {
            return Some((line, name.to_string()));
        }
        let trimmed = text.trim();
        if line < open_line
            && (trimmed.is_empty() || trimmed.ends_with(';') || trimmed.ends_with('}') || trimmed.ends_with('{'))
        {
            return None;
        }
    }
    None
}

/// Innermost test function whose body encloses the start of `line`
fn owning_test_fn(document: &SourceDocument, line: usize) -> Option<String> {
    document
        .braces()
        .open_blocks(line)
        .into_iter()
        .rev()
        .filter_map(|open_line| fn_header(document, open_line))
        .find(|(decl_line, _)| has_test_attribute_above(document, *decl_line))
        .map(|(_, name)| name)
}

/// The nearest test attribute above a closing brace, accepted only when the
/// function it decorates is still open at that brace.
fn test_closed_at(document: &SourceDocument, brace_line: usize) -> Option<String> {
    let attribute_line = (0..brace_line).rev().find(|line| is_test_attribute(document.line(*line)))?;
    let name = fn_after_attribute(document, attribute_line)?;

    let still_open = document
        .braces()
        .open_blocks(brace_line)
        .into_iter()
        .filter(|open_line| *open_line > attribute_line)
        .filter_map(|open_line| fn_header(document, open_line))
        .any(|(_, header)| header == name);
    still_open.then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = r#"pub fn area(w: u32, h: u32) -> u32 {
    w * h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_area() {
        let value = area(2, 3);
        if value > 0 {
            assert_eq!(value, 6);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn runs_async() {
        helper();
    }

    fn helper() {
    }
}
"#;

    fn document() -> SourceDocument {
        SourceDocument::new("src/geometry.rs", SOURCE)
    }

    #[test]
    fn test_cursor_on_attribute_line() {
        assert_eq!(get_test_function_name(&document(), 8).as_deref(), Some("computes_area"));
    }

    #[test]
    fn test_cursor_on_declaration_line() {
        assert_eq!(get_test_function_name(&document(), 9).as_deref(), Some("computes_area"));
        assert_eq!(get_test_function_name(&document(), 17).as_deref(), Some("runs_async"));
    }

    #[test]
    fn test_cursor_inside_body() {
        assert_eq!(get_test_function_name(&document(), 10).as_deref(), Some("computes_area"));
        assert_eq!(get_test_function_name(&document(), 12).as_deref(), Some("computes_area"));
        assert_eq!(get_test_function_name(&document(), 18).as_deref(), Some("runs_async"));
    }

    #[test]
    fn test_cursor_on_closing_braces() {
        // closes the `if` block
        assert_eq!(get_test_function_name(&document(), 13).as_deref(), Some("computes_area"));
        // closes the function itself
        assert_eq!(get_test_function_name(&document(), 14).as_deref(), Some("computes_area"));
    }

    #[test]
    fn test_non_test_helper_falls_back_to_module() {
        assert_eq!(get_test_function_name(&document(), 21).as_deref(), Some("tests"));
        assert_eq!(get_test_function_name(&document(), 22).as_deref(), Some("tests"));
        assert_eq!(get_test_function_name(&document(), 15).as_deref(), Some("tests"));
    }

    #[test]
    fn test_outside_tests_is_none() {
        assert_eq!(get_test_function_name(&document(), 1), None);
    }

    #[test]
    fn test_qualify_outside_test_submodule() {
        let module = ModulePath::new(vec!["foo".to_string()]);
        assert_eq!(qualify_test_identifier(&module, &[], "bar"), TestTarget::Function("foo::bar".into()));
        assert_eq!(
            qualify_test_identifier(&ModulePath::root(), &[], "bar"),
            TestTarget::Function("bar".into())
        );
    }

    #[test]
    fn test_qualify_inside_test_submodule() {
        let module = ModulePath::new(vec!["geometry".to_string()]);
        let inline = vec!["tests".to_string()];
        assert_eq!(
            qualify_test_identifier(&module, &inline, "computes_area"),
            TestTarget::Function("geometry::tests::computes_area".into())
        );
        assert_eq!(
            qualify_test_identifier(&ModulePath::root(), &inline, "computes_area"),
            TestTarget::Function("tests::computes_area".into())
        );
        assert_eq!(
            qualify_test_identifier(&module, &inline, "tests"),
            TestTarget::Module("geometry::tests".into())
        );
    }

    #[test]
    fn test_qualify_nested_inline_modules() {
        let inline = vec!["shapes".to_string(), "tests".to_string()];
        assert_eq!(
            qualify_test_identifier(&ModulePath::root(), &inline, "square"),
            TestTarget::Function("shapes::tests::square".into())
        );
    }
}
