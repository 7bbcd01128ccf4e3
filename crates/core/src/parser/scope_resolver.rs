use tracing::trace;

use crate::types::{Position, SymbolKind, SymbolNode};

/// Name of the symbol used when the cursor is outside every prioritized scope
pub const MAIN_FALLBACK: &str = "main";

/// Finds the innermost prioritized scope around a cursor.
#[derive(Debug, Clone)]
pub struct ScopeResolver {
    priority: Vec<SymbolKind>,
}

impl Default for ScopeResolver {
    fn default() -> Self {
        Self::new(SymbolKind::DEFAULT_PRIORITY.to_vec())
    }
}

impl ScopeResolver {
    pub fn new(priority: Vec<SymbolKind>) -> Self {
        Self { priority }
    }

    pub fn priority(&self) -> &[SymbolKind] {
        &self.priority
    }

    fn matches(&self, node: &SymbolNode, position: Position) -> bool {
        self.priority.contains(&node.kind) && node.contains(position)
    }

    /// Chain of matching scopes from the top-level symbol down to the deepest
    /// one containing `position`. Falls back to a lone `main` symbol
    /// anywhere in the tree; empty when nothing applies.
    pub fn resolve_path<'a>(&self, symbols: &'a [SymbolNode], position: Position) -> Vec<&'a SymbolNode> {
        let mut path = Vec::new();
        let mut level = symbols;

        while let Some(node) = level.iter().find(|node| self.matches(node, position)) {
            trace!("Cursor {:?} inside {} '{}'", position, node.kind, node.name);
            path.push(node);
            level = &node.children;
        }

        if path.is_empty() {
            if let Some(main) = symbols
                .iter()
                .flat_map(SymbolNode::walk)
                .find(|node| node.name == MAIN_FALLBACK)
            {
                trace!("Falling back to '{}' at line {}", MAIN_FALLBACK, main.range.start.line);
                path.push(main);
            }
        }

        path
    }

    pub fn resolve<'a>(&self, symbols: &'a [SymbolNode], position: Position) -> Option<&'a SymbolNode> {
        self.resolve_path(symbols, position).pop()
    }
}

/// Innermost prioritized scope containing `position`, see [`ScopeResolver`]
pub fn resolve<'a>(
    symbols: &'a [SymbolNode],
    position: Position,
    priority: &[SymbolKind],
) -> Option<&'a SymbolNode> {
    ScopeResolver::new(priority.to_vec()).resolve(symbols, position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Range;

    fn node(name: &str, kind: SymbolKind, start: u32, end: u32) -> SymbolNode {
        SymbolNode::new(
            name,
            kind,
            Range::lines(start, end),
            Range::new(Position::new(start, 4), Position::new(start, 4 + name.len() as u32)),
        )
    }

    fn tree() -> Vec<SymbolNode> {
        vec![
            node("Shape", SymbolKind::Struct, 0, 3),
            node("geometry", SymbolKind::Module, 5, 20).with_children(vec![
                node("area", SymbolKind::Function, 6, 9),
                node("tests", SymbolKind::Module, 11, 19).with_children(vec![
                    node("square", SymbolKind::Function, 13, 15),
                    node("circle", SymbolKind::Function, 16, 18),
                ]),
            ]),
            node("main", SymbolKind::Function, 22, 24),
            node("CONST", SymbolKind::Constant, 26, 26),
        ]
    }

    #[test]
    fn test_resolves_innermost_function() {
        let symbols = tree();
        let resolver = ScopeResolver::default();
        let found = resolver.resolve(&symbols, Position::new(14, 8)).unwrap();
        assert_eq!(found.name, "square");

        let path: Vec<_> = resolver
            .resolve_path(&symbols, Position::new(14, 8))
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(path, vec!["geometry", "tests", "square"]);
    }

    #[test]
    fn test_gap_between_children_resolves_to_parent() {
        let symbols = tree();
        let found = ScopeResolver::default().resolve(&symbols, Position::new(12, 0)).unwrap();
        assert_eq!(found.name, "tests");
    }

    #[test]
    fn test_kinds_outside_priority_are_not_entered() {
        let symbols = tree();
        let resolver = ScopeResolver::new(vec![SymbolKind::Module]);
        let found = resolver.resolve(&symbols, Position::new(14, 8)).unwrap();
        assert_eq!(found.name, "tests");
    }

    #[test]
    fn test_falls_back_to_main() {
        let symbols = tree();
        let found = ScopeResolver::default().resolve(&symbols, Position::new(26, 0)).unwrap();
        assert_eq!(found.name, "main");
    }

    #[test]
    fn test_not_found_without_main() {
        let symbols = vec![node("Shape", SymbolKind::Struct, 0, 3)];
        assert!(resolve(&symbols, Position::new(10, 0), &SymbolKind::DEFAULT_PRIORITY).is_none());
        assert!(resolve(&[], Position::new(0, 0), &SymbolKind::DEFAULT_PRIORITY).is_none());
    }

    #[test]
    fn test_name_range_outside_full_range_still_matches() {
        let mut symbol = node("documented", SymbolKind::Function, 4, 6);
        symbol.selection_range = Range::new(Position::new(2, 3), Position::new(2, 13));
        let symbols = vec![symbol];
        let found = ScopeResolver::default().resolve(&symbols, Position::new(2, 5));
        assert_eq!(found.map(|n| n.name.as_str()), Some("documented"));
    }
}
