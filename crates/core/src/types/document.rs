use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::parser::BraceMap;

/// An open source file: its path, full text, line table and the structural
/// braces of every line.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    path: PathBuf,
    text: String,
    lines: Vec<String>,
    braces: BraceMap,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        let braces = BraceMap::new(&lines);
        Self {
            path: path.into(),
            text,
            lines,
            braces,
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(path, text))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn braces(&self) -> &BraceMap {
        &self.braces
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of a line, empty when out of range
    pub fn line(&self, index: usize) -> &str {
        self.lines.get(index).map(String::as_str).unwrap_or("")
    }

    pub fn trimmed(&self, index: usize) -> &str {
        self.line(index).trim()
    }

    /// Clamp a cursor line into the document
    pub fn clamp_line(&self, line: usize) -> usize {
        line.min(self.lines.len().saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_access_out_of_range_is_empty() {
        let doc = SourceDocument::new("lib.rs", "fn a() {}\n");
        assert_eq!(doc.line(0), "fn a() {}");
        assert_eq!(doc.line(5), "");
        assert_eq!(doc.clamp_line(10), 0);
    }
}
