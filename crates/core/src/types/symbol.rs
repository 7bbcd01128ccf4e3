use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of a document symbol, using the editor's symbol-kind numbering
/// (`File` = 0 through `TypeParameter` = 25).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    File,
    Module,
    Namespace,
    Package,
    Class,
    Method,
    Property,
    Field,
    Constructor,
    Enum,
    Interface,
    Function,
    Variable,
    Constant,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Key,
    Null,
    EnumMember,
    Struct,
    Event,
    Operator,
    TypeParameter,
}

/// Mapping table between configuration names and kinds, in numeric order.
const SYMBOL_KIND_TABLE: [(&str, SymbolKind); 26] = [
    ("File", SymbolKind::File),
    ("Module", SymbolKind::Module),
    ("Namespace", SymbolKind::Namespace),
    ("Package", SymbolKind::Package),
    ("Class", SymbolKind::Class),
    ("Method", SymbolKind::Method),
    ("Property", SymbolKind::Property),
    ("Field", SymbolKind::Field),
    ("Constructor", SymbolKind::Constructor),
    ("Enum", SymbolKind::Enum),
    ("Interface", SymbolKind::Interface),
    ("Function", SymbolKind::Function),
    ("Variable", SymbolKind::Variable),
    ("Constant", SymbolKind::Constant),
    ("String", SymbolKind::String),
    ("Number", SymbolKind::Number),
    ("Boolean", SymbolKind::Boolean),
    ("Array", SymbolKind::Array),
    ("Object", SymbolKind::Object),
    ("Key", SymbolKind::Key),
    ("Null", SymbolKind::Null),
    ("EnumMember", SymbolKind::EnumMember),
    ("Struct", SymbolKind::Struct),
    ("Event", SymbolKind::Event),
    ("Operator", SymbolKind::Operator),
    ("TypeParameter", SymbolKind::TypeParameter),
];

impl SymbolKind {
    /// Kinds the scope resolver descends into when nothing is configured
    pub const DEFAULT_PRIORITY: [SymbolKind; 5] = [
        SymbolKind::Module,
        SymbolKind::Object,
        SymbolKind::Struct,
        SymbolKind::Enum,
        SymbolKind::Function,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        SYMBOL_KIND_TABLE
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
            .map(|(_, kind)| *kind)
    }

    pub fn from_index(index: u64) -> Option<Self> {
        SYMBOL_KIND_TABLE.get(index as usize).map(|(_, kind)| *kind)
    }

    pub fn name(&self) -> &'static str {
        SYMBOL_KIND_TABLE[self.index()].0
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn known_names() -> impl Iterator<Item = &'static str> {
        SYMBOL_KIND_TABLE.iter().map(|(name, _)| *name)
    }
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for SymbolKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Hosts hand symbols over either with numeric kinds or with names.
#[derive(Deserialize)]
#[serde(untagged)]
enum SymbolKindRepr {
    Index(u64),
    Name(String),
}

impl<'de> Deserialize<'de> for SymbolKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SymbolKindRepr::deserialize(deserializer)? {
            SymbolKindRepr::Index(index) => SymbolKind::from_index(index).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown symbol kind index {index}"))
            }),
            SymbolKindRepr::Name(name) => SymbolKind::from_name(&name).ok_or_else(|| {
                serde::de::Error::custom(format!(
                    "unknown symbol kind '{}', expected one of: {}",
                    name,
                    SymbolKind::known_names().collect::<Vec<_>>().join(", ")
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_enum_order() {
        for (index, (name, kind)) in SYMBOL_KIND_TABLE.iter().enumerate() {
            assert_eq!(kind.index(), index);
            assert_eq!(kind.name(), *name);
        }
    }

    #[test]
    fn test_deserialize_names_case_insensitively() {
        let kinds: Vec<SymbolKind> =
            serde_json::from_str(r#"["module", "STRUCT", "Function"]"#).unwrap();
        assert_eq!(
            kinds,
            vec![SymbolKind::Module, SymbolKind::Struct, SymbolKind::Function]
        );
    }

    #[test]
    fn test_deserialize_numeric_kinds() {
        let kinds: Vec<SymbolKind> = serde_json::from_str("[1, 11, 22]").unwrap();
        assert_eq!(
            kinds,
            vec![SymbolKind::Module, SymbolKind::Function, SymbolKind::Struct]
        );
    }

    #[test]
    fn test_unknown_name_is_an_error() {
        let result: Result<SymbolKind, _> = serde_json::from_str(r#""Widget""#);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("unknown symbol kind 'Widget'"));
    }
}
