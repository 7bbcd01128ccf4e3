use crate::{
    error::{Error, Result},
    parser::utils::node_to_range,
    types::{SymbolKind, SymbolNode},
};
use tree_sitter::{Node, Parser};

pub struct RustParser {
    parser: Parser,
}

impl RustParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_rust::LANGUAGE.into())
            .map_err(|e| Error::TreeSitterError(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    pub fn parse(&mut self, source: &str) -> Result<tree_sitter::Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::TreeSitterError("Failed to parse source code".to_string()))
    }

    /// Document symbols in the shape an editor's symbol provider returns:
    /// modules, structs, enums, unions, traits, impls and functions, nested
    /// by containment.
    pub fn document_symbols(&mut self, source: &str) -> Result<Vec<SymbolNode>> {
        let tree = self.parse(source)?;
        let mut symbols = Vec::new();
        collect_children(&tree.root_node(), source, None, &mut symbols);
        Ok(symbols)
    }
}

fn collect_children(node: &Node, source: &str, parent: Option<SymbolKind>, out: &mut Vec<SymbolNode>) {
    for child in node.children(&mut node.walk()) {
        visit_node(&child, source, parent, out);
    }
}

fn visit_node(node: &Node, source: &str, parent: Option<SymbolKind>, out: &mut Vec<SymbolNode>) {
    let Some(kind) = symbol_kind(node.kind(), parent) else {
        collect_children(node, source, parent, out);
        return;
    };

    let Some((name, selection)) = symbol_name(node, source) else {
        return;
    };

    let mut children = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        collect_children(&body, source, Some(kind), &mut children);
    }

    out.push(SymbolNode::new(name, kind, node_to_range(node), node_to_range(&selection)).with_children(children));
}

fn symbol_kind(node_kind: &str, parent: Option<SymbolKind>) -> Option<SymbolKind> {
    let kind = match node_kind {
        "mod_item" => SymbolKind::Module,
        "struct_item" | "union_item" => SymbolKind::Struct,
        "enum_item" => SymbolKind::Enum,
        "trait_item" => SymbolKind::Interface,
        "impl_item" => SymbolKind::Object,
        "function_item" | "function_signature_item" => match parent {
            Some(SymbolKind::Object | SymbolKind::Interface) => SymbolKind::Method,
            _ => SymbolKind::Function,
        },
        _ => return None,
    };
    Some(kind)
}

/// Display name plus the node to use as the selection range
fn symbol_name<'t>(node: &Node<'t>, source: &str) -> Option<(String, Node<'t>)> {
    if node.kind() == "impl_item" {
        let ty = node.child_by_field_name("type")?;
        let ty_text = ty.utf8_text(source.as_bytes()).ok()?;
        let name = match node
            .child_by_field_name("trait")
            .and_then(|t| t.utf8_text(source.as_bytes()).ok())
        {
            Some(trait_text) => format!("impl {trait_text} for {ty_text}"),
            None => format!("impl {ty_text}"),
        };
        return Some((name, ty));
    }

    let name_node = node.child_by_field_name("name")?;
    let name = name_node.utf8_text(source.as_bytes()).ok()?.to_string();
    Some((name, name_node))
}
