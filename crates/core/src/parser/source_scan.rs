//! Line-oriented scanning helpers shared by the module-graph and test
//! detectors. Braces inside comments, string and char literals are ignored.

use std::sync::LazyLock;

use regex::Regex;

/// `fn name` with any leading qualifiers (`pub(crate)`, `const`, `async`,
/// `unsafe`, `extern "C"`). Group 1 is the identifier.
pub static FN_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+(?:"[^"]*"\s+)?)?fn\s+([A-Za-z_][A-Za-z0-9_]*)"#,
    )
    .expect("Failed to create fn regex")
});

/// Inline module opener, `mod name {`. Group 1 is the identifier.
pub static MOD_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?mod\s+([A-Za-z_][A-Za-z0-9_]*)\s*\{")
        .expect("Failed to create mod regex")
});

/// Out-of-line module declaration, `mod name;`. Group 1 is the identifier.
pub static MOD_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:pub(?:\s*\([^)]*\))?\s+)?mod\s+([A-Za-z_][A-Za-z0-9_]*)\s*;")
        .expect("Failed to create mod regex")
});

/// A zero-argument `main`, optionally async
pub static MAIN_FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:pub\s+)?(?:async\s+)?fn\s+main\s*\(\s*\)")
        .expect("Failed to create main regex")
});

/// Attributes that turn a function into a test or benchmark:
/// `#[test]`, `#[bench]`, `#[tokio::test]`, `#[tokio::test(flavor = "...")]`,
/// `#[sqlx_test]` and similar.
pub static TEST_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*#\[(?:\w+::)*(?:test|bench|\w+_test)\s*(?:\(.*\))?\]")
        .expect("Failed to create attribute regex")
});

/// Markers that open a test region: test attributes, `#[cfg(test)]`, and
/// `test_`-prefixed functions.
pub static TEST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)#\[(?:cfg\(test\)|(?:\w+::)?test|\w+_test)(?:\(.*\))?\]|^\s*(?:pub(?:\s*\([^)]*\))?\s+)?(?:async\s+)?fn\s+test_",
    )
    .expect("Failed to create marker regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brace {
    Open,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    Str,
    RawStr(usize),
    BlockComment(usize),
}

/// Structural braces of every line of a document, in order.
///
/// Built with one pass over the whole text so multi-line strings and block
/// comments are tracked correctly.
#[derive(Debug, Clone, Default)]
pub struct BraceMap {
    lines: Vec<Vec<Brace>>,
}

impl BraceMap {
    pub fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut state: Option<Literal> = None;
        let lines = lines
            .iter()
            .map(|line| scan_line(line.as_ref(), &mut state))
            .collect();
        Self { lines }
    }

    pub fn braces(&self, line: usize) -> &[Brace] {
        self.lines.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Net change in nesting depth caused by a line
    pub fn delta(&self, line: usize) -> i32 {
        self.braces(line)
            .iter()
            .map(|b| match b {
                Brace::Open => 1,
                Brace::Close => -1,
            })
            .sum()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines holding the `{` of every block still open when `before_line`
    /// starts, outermost first.
    pub fn open_blocks(&self, before_line: usize) -> Vec<usize> {
        let mut stack = Vec::new();
        for line in 0..before_line.min(self.lines.len()) {
            for brace in self.braces(line) {
                match brace {
                    Brace::Open => stack.push(line),
                    Brace::Close => {
                        stack.pop();
                    }
                }
            }
        }
        stack
    }
}

fn scan_line(line: &str, state: &mut Option<Literal>) -> Vec<Brace> {
    let chars: Vec<char> = line.chars().collect();
    let mut braces = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match *state {
            Some(Literal::Str) => {
                match chars[i] {
                    '\\' => i += 1,
                    '"' => *state = None,
                    _ => {}
                }
                i += 1;
            }
            Some(Literal::RawStr(hashes)) => {
                if chars[i] == '"' && closes_raw(&chars, i + 1, hashes) {
                    *state = None;
                    i += 1 + hashes;
                } else {
                    i += 1;
                }
            }
            Some(Literal::BlockComment(depth)) => {
                if chars[i] == '*' && chars.get(i + 1) == Some(&'/') {
                    *state = if depth > 1 {
                        Some(Literal::BlockComment(depth - 1))
                    } else {
                        None
                    };
                    i += 2;
                } else if chars[i] == '/' && chars.get(i + 1) == Some(&'*') {
                    *state = Some(Literal::BlockComment(depth + 1));
                    i += 2;
                } else {
                    i += 1;
                }
            }
            None => match chars[i] {
                '/' if chars.get(i + 1) == Some(&'/') => break,
                '/' if chars.get(i + 1) == Some(&'*') => {
                    *state = Some(Literal::BlockComment(1));
                    i += 2;
                }
                '"' => {
                    *state = Some(Literal::Str);
                    i += 1;
                }
                'r' if is_raw_start(&chars, i) => {
                    let hashes = chars[i + 1..].iter().take_while(|c| **c == '#').count();
                    *state = Some(Literal::RawStr(hashes));
                    i += 2 + hashes;
                }
                '\'' => i = skip_char_literal(&chars, i),
                '{' => {
                    braces.push(Brace::Open);
                    i += 1;
                }
                '}' => {
                    braces.push(Brace::Close);
                    i += 1;
                }
                _ => i += 1,
            },
        }
    }

    braces
}

fn is_raw_start(chars: &[char], i: usize) -> bool {
    if i > 0 && (chars[i - 1].is_alphanumeric() || chars[i - 1] == '_') {
        return false;
    }
    let mut j = i + 1;
    while chars.get(j) == Some(&'#') {
        j += 1;
    }
    chars.get(j) == Some(&'"')
}

fn closes_raw(chars: &[char], from: usize, hashes: usize) -> bool {
    (0..hashes).all(|k| chars.get(from + k) == Some(&'#'))
}

/// Skip `'x'`, `'\n'`, `'\u{..}'`; leave lifetimes (`'a`) alone
fn skip_char_literal(chars: &[char], i: usize) -> usize {
    match chars.get(i + 1) {
        Some('\\') => {
            let mut j = i + 3;
            while j < chars.len() && chars[j] != '\'' {
                j += 1;
            }
            j + 1
        }
        Some(_) if chars.get(i + 2) == Some(&'\'') => i + 3,
        _ => i + 1,
    }
}

/// Identifier of a function declared on this line
pub fn fn_name(line: &str) -> Option<&str> {
    FN_DECL_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

pub fn is_attribute(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("#[") || trimmed.starts_with("#![")
}

pub fn is_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("//") || trimmed.starts_with("/*") || trimmed.starts_with('*')
}

pub fn is_test_attribute(line: &str) -> bool {
    TEST_ATTR_RE.is_match(line)
}

pub fn has_main_fn(text: &str) -> bool {
    MAIN_FN_RE.is_match(text)
}
