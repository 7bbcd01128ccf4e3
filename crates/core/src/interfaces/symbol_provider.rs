//! Document symbol query

use crate::{
    error::{Error, Result},
    parser::RustParser,
    types::{SourceDocument, SymbolNode},
};

/// Source of the scope tree for a document
pub trait SymbolProvider {
    /// Top-level symbols of `document` in declaration order.
    ///
    /// Returns [`Error::SymbolsUnavailable`] when the host has nothing for
    /// this document.
    fn document_symbols(&mut self, document: &SourceDocument) -> Result<Vec<SymbolNode>>;
}

/// Symbols handed over by the editor, typically deserialized from its
/// document-symbol response.
#[derive(Debug, Clone, Default)]
pub struct HostSymbols {
    symbols: Vec<SymbolNode>,
}

impl HostSymbols {
    pub fn new(symbols: Vec<SymbolNode>) -> Self {
        Self { symbols }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

impl SymbolProvider for HostSymbols {
    fn document_symbols(&mut self, _document: &SourceDocument) -> Result<Vec<SymbolNode>> {
        if self.symbols.is_empty() {
            return Err(Error::SymbolsUnavailable);
        }
        Ok(self.symbols.clone())
    }
}

/// Symbols computed locally with tree-sitter, for hosts without a language
/// server.
pub struct TreeSitterSymbols {
    parser: RustParser,
}

impl TreeSitterSymbols {
    pub fn new() -> Result<Self> {
        Ok(Self {
            parser: RustParser::new()?,
        })
    }
}

impl SymbolProvider for TreeSitterSymbols {
    fn document_symbols(&mut self, document: &SourceDocument) -> Result<Vec<SymbolNode>> {
        let symbols = self.parser.document_symbols(document.text())?;
        if symbols.is_empty() {
            return Err(Error::SymbolsUnavailable);
        }
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolKind;

    #[test]
    fn test_empty_host_symbols_are_unavailable() {
        let document = SourceDocument::new("src/lib.rs", "");
        let err = HostSymbols::default().document_symbols(&document).unwrap_err();
        assert!(matches!(err, Error::SymbolsUnavailable));
    }

    #[test]
    fn test_host_symbols_from_json() {
        let json = r#"[{
            "name": "main",
            "kind": "Function",
            "range": {"start": {"line": 0, "character": 0}, "end": {"line": 2, "character": 1}},
            "selectionRange": {"start": {"line": 0, "character": 3}, "end": {"line": 0, "character": 7}}
        }]"#;
        let document = SourceDocument::new("src/main.rs", "fn main() {\n}\n");
        let symbols = HostSymbols::from_json(json)
            .unwrap()
            .document_symbols(&document)
            .unwrap();
        assert_eq!(symbols[0].kind, SymbolKind::Function);
    }

    #[test]
    fn test_tree_sitter_symbols() {
        let mut provider = TreeSitterSymbols::new().unwrap();
        let document = SourceDocument::new("src/lib.rs", "mod geometry {\n    fn area() {}\n}\n");
        let symbols = provider.document_symbols(&document).unwrap();
        assert_eq!(symbols[0].name, "geometry");
        assert_eq!(symbols[0].children[0].name, "area");

        let blank = SourceDocument::new("src/lib.rs", "// nothing here\n");
        assert!(matches!(
            provider.document_symbols(&blank),
            Err(Error::SymbolsUnavailable)
        ));
    }
}
