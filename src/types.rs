use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// A value inside a parsed document
#[derive(Debug, Clone, PartialEq)]
pub enum DocValue {
    Bool(bool),
    /// Numeric scalar, kept in the textual form the parser produced
    Number(String),
    String(String),
    Sequence(Vec<String>),
    Mapping(Document),
}

impl DocValue {
    pub fn number(text: impl Into<String>) -> Self {
        DocValue::Number(text.into())
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, DocValue::Mapping(_))
    }
}

impl From<bool> for DocValue {
    fn from(value: bool) -> Self {
        DocValue::Bool(value)
    }
}

impl From<&str> for DocValue {
    fn from(value: &str) -> Self {
        DocValue::String(value.to_string())
    }
}

impl From<String> for DocValue {
    fn from(value: String) -> Self {
        DocValue::String(value)
    }
}

impl From<Vec<String>> for DocValue {
    fn from(value: Vec<String>) -> Self {
        DocValue::Sequence(value)
    }
}

impl From<Vec<&str>> for DocValue {
    fn from(value: Vec<&str>) -> Self {
        DocValue::Sequence(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Document> for DocValue {
    fn from(value: Document) -> Self {
        DocValue::Mapping(value)
    }
}

/// An ordered mapping from keys to values.
///
/// Iteration follows insertion order. Keys are unique: inserting an existing
/// key replaces its value in place without moving it. Equality is
/// order-sensitive.
#[derive(Debug, Clone, Default)]
pub struct Document {
    entries: IndexMap<String, DocValue>,
}

impl Document {
    pub fn new() -> Self {
        Document { entries: IndexMap::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Document {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a value, returning the previous value if the key was present
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<DocValue>) -> Option<DocValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<DocValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&DocValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DocValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Nesting depth: 0 for an empty document, 1 for a flat one
    pub fn depth(&self) -> usize {
        if self.entries.is_empty() {
            return 0;
        }

        1 + self
            .entries
            .values()
            .map(|v| match v {
                DocValue::Mapping(child) => child.depth(),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<DocValue>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut doc = Document::new();
        for (k, v) in iter {
            doc.insert(k, v);
        }
        doc
    }
}

/// Semantic type tag of an inferred field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Boolean,
    Tags,
    Number,
    Email,
    Text,
    Group,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Boolean => "boolean",
            FieldKind::Tags => "tags",
            FieldKind::Number => "number",
            FieldKind::Email => "email",
            FieldKind::Text => "text",
            FieldKind::Group => "group",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The value carried by a field. The variant doubles as the field's kind,
/// so a kind can never be paired with the wrong value shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Tags(Vec<String>),
    /// Textual form of the number, as written in the document
    Number(String),
    Email(String),
    Text(String),
    Group(Vec<FieldDescriptor>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::Tags(_) => FieldKind::Tags,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Email(_) => FieldKind::Email,
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Group(_) => FieldKind::Group,
        }
    }
}

/// One inferred form field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Separator-joined key path, unique within one inference pass
    pub path: String,

    /// Display label derived from the field's own key
    pub label: String,

    pub value: FieldValue,
}

impl FieldDescriptor {
    pub fn new(path: impl Into<String>, label: impl Into<String>, value: FieldValue) -> Self {
        FieldDescriptor {
            path: path.into(),
            label: label.into(),
            value,
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.value.kind()
    }

    /// Child fields of a group, `None` for leaves
    pub fn children(&self) -> Option<&[FieldDescriptor]> {
        match &self.value {
            FieldValue::Group(children) => Some(children),
            _ => None,
        }
    }
}

impl Serialize for FieldDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldDescriptor", 4)?;
        state.serialize_field("path", &self.path)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("value", &self.value)?;
        state.end()
    }
}

/// How `null` values in the source text are represented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum NullPolicy {
    /// An empty nested mapping, so the field shows up as an empty group
    #[default]
    EmptyGroup,
    /// An empty string, so the field shows up as an empty text input
    EmptyText,
    /// Drop the key
    Skip,
}

/// Which rule decides that a string is an email address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmailDetection {
    /// Contains both `@` and `.`
    #[default]
    Loose,
    /// Looks like `local@domain.tld`
    Strict,
}

/// Path separator: a single character other than `\\`.
///
/// Separators inside keys are escaped with a backslash, which only keeps
/// paths unambiguous when the separator is one character and is not the
/// escape character itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Separator(char);

impl Separator {
    pub fn new(sep: char) -> Result<Self, ConfigError> {
        if sep == '\\' {
            return Err(ConfigError::InvalidSeparator {
                value: sep.to_string(),
                reason: "the backslash is reserved for escaping",
            });
        }
        Ok(Separator(sep))
    }

    pub fn as_char(self) -> char {
        self.0
    }
}

impl Default for Separator {
    fn default() -> Self {
        Separator('.')
    }
}

impl std::fmt::Display for Separator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Separator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(sep), None) => Separator::new(sep),
            (None, _) => Err(ConfigError::InvalidSeparator {
                value: s.to_string(),
                reason: "it is empty",
            }),
            (Some(_), Some(_)) => Err(ConfigError::InvalidSeparator {
                value: s.to_string(),
                reason: "it must be a single character",
            }),
        }
    }
}

impl TryFrom<String> for Separator {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Separator> for String {
    fn from(sep: Separator) -> Self {
        sep.0.to_string()
    }
}

/// Configuration for parsing and inference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Separator between key segments in field paths
    pub separator: Separator,

    /// Representation of null values
    pub nulls: NullPolicy,

    /// Email classification rule
    pub email: EmailDetection,
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            separator: Separator::default(),
            nulls: NullPolicy::default(),
            email: EmailDetection::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_preserves_position() {
        let mut doc = Document::new().with("b", "1").with("a", "2");
        let previous = doc.insert("b", "3");

        assert_eq!(previous, Some(DocValue::from("1")));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(doc.get("b"), Some(&DocValue::from("3")));
    }

    #[test]
    fn test_depth() {
        assert_eq!(Document::new().depth(), 0);

        let doc = Document::new()
            .with("flat", true)
            .with("server", Document::new().with("tls", Document::new().with("on", true)));
        assert_eq!(doc.depth(), 3);

        // An empty nested mapping does not add a level
        let doc = Document::new().with("empty", Document::new());
        assert_eq!(doc.depth(), 1);
    }

    #[test]
    fn test_descriptor_serialization() {
        let field = FieldDescriptor::new(
            "server",
            "Server",
            FieldValue::Group(vec![FieldDescriptor::new(
                "server.port",
                "Port",
                FieldValue::Number("80".to_string()),
            )]),
        );

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({
                "path": "server",
                "kind": "group",
                "label": "Server",
                "value": [
                    {"path": "server.port", "kind": "number", "label": "Port", "value": "80"}
                ]
            })
        );
    }

    #[test]
    fn test_config_from_yaml() {
        let config: FormConfig = serde_yaml::from_str("nulls: empty-text\nemail: strict\n").unwrap();

        assert_eq!(config.separator, Separator::default());
        assert_eq!(config.nulls, NullPolicy::EmptyText);
        assert_eq!(config.email, EmailDetection::Strict);
    }

    #[test]
    fn test_document_equality_is_ordered() {
        let ab = Document::new().with("a", "1").with("b", "2");
        let ba = Document::new().with("b", "2").with("a", "1");

        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_large_document_keeps_order() {
        let doc: Document = (0..20_000).map(|i| (format!("key_{}", i), DocValue::from(true))).collect();

        assert_eq!(doc.len(), 20_000);
        assert_eq!(doc.keys().nth(12_345), Some("key_12345"));
        assert!(doc.contains_key("key_19999"));
    }

    #[test]
    fn test_separator_rules() {
        assert_eq!("/".parse::<Separator>().unwrap().as_char(), '/');
        assert_eq!("::".parse::<Separator>().unwrap_err().to_string(), "Invalid path separator '::': it must be a single character");
        assert!(matches!("".parse::<Separator>(), Err(ConfigError::InvalidSeparator { .. })));
        assert!(matches!("\\".parse::<Separator>(), Err(ConfigError::InvalidSeparator { .. })));
    }

    #[test]
    fn test_config_rejects_bad_separator() {
        let config: FormConfig = serde_yaml::from_str("separator: /\n").unwrap();
        assert_eq!(config.separator.as_char(), '/');

        assert!(serde_yaml::from_str::<FormConfig>("separator: \"::\"\n").is_err());
        assert!(serde_yaml::from_str::<FormConfig>("separator: \"\"\n").is_err());
    }
}
