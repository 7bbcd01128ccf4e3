use serde::{Deserialize, Serialize};

use super::position::{Position, Range};
use super::symbol::SymbolKind;

/// A named, ranged syntactic unit (module, struct, enum, function, ...)
/// arranged in a containment tree.
///
/// Field names follow the document-symbol shape hosts hand over, so a symbol
/// dump from an editor deserializes directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolNode {
    pub name: String,
    pub kind: SymbolKind,
    /// Full extent of the item
    pub range: Range,
    /// Just the identifier
    pub selection_range: Range,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SymbolNode>,
}

impl SymbolNode {
    pub fn new(name: impl Into<String>, kind: SymbolKind, range: Range, selection_range: Range) -> Self {
        Self {
            name: name.into(),
            kind,
            range,
            selection_range,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<SymbolNode>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first iterator over this node and all of its descendants
    pub fn walk(&self) -> Box<dyn Iterator<Item = &SymbolNode> + '_> {
        Box::new(std::iter::once(self).chain(self.children.iter().flat_map(SymbolNode::walk)))
    }

    /// Containment in either the full range or the name range counts
    pub fn contains(&self, position: Position) -> bool {
        self.range.contains(position) || self.selection_range.contains(position)
    }
}
