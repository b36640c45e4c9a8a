//! YAML text to [`Document`] conversion
//!
//! Parsing itself is delegated to `serde_yaml`. This module narrows the
//! resulting loosely-typed tree down to the value shapes the inferencer
//! understands: booleans, numbers, strings, sequences of strings and nested
//! mappings.

use crate::error::ParseError;
use crate::types::{DocValue, Document, FormConfig, NullPolicy};
use serde_yaml::{Mapping, Value};

const ROOT: &str = "<root>";

/// Parse YAML text into a document using the default configuration
pub fn parse(text: &str) -> Result<Document, ParseError> {
    parse_with(text, &FormConfig::default())
}

/// Parse YAML text into a document
///
/// Blank input and a bare `null` produce an empty document. Any other
/// non-mapping root is rejected.
pub fn parse_with(text: &str, config: &FormConfig) -> Result<Document, ParseError> {
    if text.trim().is_empty() {
        return Ok(Document::new());
    }

    let value: Value = serde_yaml::from_str(text)?;
    let doc = match untag(value) {
        Value::Mapping(mapping) => convert_mapping(mapping, ROOT, config)?,
        Value::Null => Document::new(),
        other => {
            return Err(ParseError::InvalidRoot {
                found: type_name(&other),
            })
        }
    };

    tracing::debug!(keys = doc.len(), depth = doc.depth(), "parsed document");
    Ok(doc)
}

/// Convert a YAML mapping, keeping its key order
fn convert_mapping(mapping: Mapping, parent: &str, config: &FormConfig) -> Result<Document, ParseError> {
    let mut doc = Document::with_capacity(mapping.len());

    for (key, value) in mapping {
        let key = key_to_string(key, parent)?;

        if doc.contains_key(&key) {
            return Err(ParseError::DuplicateKey {
                parent: parent.to_string(),
                key,
            });
        }

        let path = if parent == ROOT {
            key.clone()
        } else {
            format!("{}{}{}", parent, config.separator, key)
        };

        if let Some(value) = convert_value(value, &path, config)? {
            doc.insert(key, value);
        }
    }

    Ok(doc)
}

/// Convert a single value. `None` means the key is dropped.
fn convert_value(value: Value, path: &str, config: &FormConfig) -> Result<Option<DocValue>, ParseError> {
    let converted = match value {
        Value::Bool(b) => DocValue::Bool(b),
        Value::Number(n) => DocValue::Number(n.to_string()),
        Value::String(s) => DocValue::String(s),
        Value::Sequence(items) => DocValue::Sequence(
            items
                .into_iter()
                .map(|item| sequence_item_to_string(item, path))
                .collect(),
        ),
        Value::Mapping(mapping) => DocValue::Mapping(convert_mapping(mapping, path, config)?),
        Value::Null => match config.nulls {
            NullPolicy::EmptyGroup => DocValue::Mapping(Document::new()),
            NullPolicy::EmptyText => DocValue::String(String::new()),
            NullPolicy::Skip => return Ok(None),
        },
        Value::Tagged(tagged) => return convert_value(tagged.value, path, config),
    };

    Ok(Some(converted))
}

fn key_to_string(key: Value, parent: &str) -> Result<String, ParseError> {
    match untag(key) {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::from("null")),
        Value::Bool(b) => {
            tracing::warn!(parent, key = b, "coercing boolean key to text");
            Ok(b.to_string())
        }
        Value::Number(n) => {
            tracing::warn!(parent, key = %n, "coercing numeric key to text");
            Ok(n.to_string())
        }
        other => Err(ParseError::UnsupportedKey {
            parent: parent.to_string(),
            found: type_name(&other),
        }),
    }
}

/// Sequences are exposed as lists of strings. Nested structures inside a
/// sequence are flattened to compact JSON text.
fn sequence_item_to_string(item: Value, path: &str) -> String {
    match untag(item) {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        nested => {
            tracing::warn!(path, found = type_name(&nested), "flattening nested sequence item to text");
            serde_json::to_string(&nested).unwrap_or_else(|_| {
                serde_yaml::to_string(&nested)
                    .map(|s| s.trim_end().to_string())
                    .unwrap_or_default()
            })
        }
    }
}

/// Strip YAML tags (`!custom value`), keeping the tagged value
fn untag(value: Value) -> Value {
    match value {
        Value::Tagged(tagged) => untag(tagged.value),
        other => other,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        let doc = parse("name: Ann\nactive: true\nport: 8080\nratio: 0.5\n").unwrap();

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["name", "active", "port", "ratio"]);
        assert_eq!(doc.get("name"), Some(&DocValue::from("Ann")));
        assert_eq!(doc.get("active"), Some(&DocValue::Bool(true)));
        assert_eq!(doc.get("port"), Some(&DocValue::number("8080")));
        assert_eq!(doc.get("ratio"), Some(&DocValue::number("0.5")));
    }

    #[test]
    fn test_quoted_values_stay_strings() {
        let doc = parse("port: \"8080\"\nflag: 'true'\n").unwrap();

        assert_eq!(doc.get("port"), Some(&DocValue::from("8080")));
        assert_eq!(doc.get("flag"), Some(&DocValue::from("true")));
    }

    #[test]
    fn test_parse_nested_mapping_keeps_order() {
        let doc = parse("server:\n  port: 80\n  host: localhost\nname: x\n").unwrap();

        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["server", "name"]);
        match doc.get("server") {
            Some(DocValue::Mapping(server)) => {
                assert_eq!(server.keys().collect::<Vec<_>>(), vec!["port", "host"]);
            }
            other => panic!("Expected mapping, got: {:?}", other),
        }
    }

    #[test]
    fn test_parse_sequence_items() {
        let doc = parse("tags: [x, 2, true, ~]\nmixed:\n  - {a: 1}\n  - [b]\n").unwrap();

        assert_eq!(
            doc.get("tags"),
            Some(&DocValue::from(vec!["x", "2", "true", ""]))
        );
        assert_eq!(
            doc.get("mixed"),
            Some(&DocValue::from(vec![r#"{"a":1}"#, r#"["b"]"#]))
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("   \n").unwrap().is_empty());
        assert!(parse("~").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_root() {
        let err = parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRoot { found: "sequence" }));

        let err = parse("just text").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRoot { found: "string" }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = parse("server: [unclosed\n").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    #[test]
    fn test_non_string_keys() {
        let doc = parse("1: one\ntrue: yes\n").unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["1", "true"]);

        let err = parse("? [a, b]\n: value\n").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedKey { found: "sequence", .. }));
    }

    #[test]
    fn test_coerced_duplicate_key() {
        let err = parse("outer:\n  1: a\n  \"1\": b\n").unwrap_err();
        match err {
            ParseError::DuplicateKey { parent, key } => {
                assert_eq!(parent, "outer");
                assert_eq!(key, "1");
            }
            other => panic!("Expected duplicate key error, got: {:?}", other),
        }
    }

    #[test]
    fn test_null_policies() {
        let text = "empty:\nname: x\n";

        let doc = parse(text).unwrap();
        assert_eq!(doc.get("empty"), Some(&DocValue::Mapping(Document::new())));

        let config = FormConfig {
            nulls: NullPolicy::EmptyText,
            ..FormConfig::default()
        };
        let doc = parse_with(text, &config).unwrap();
        assert_eq!(doc.get("empty"), Some(&DocValue::from("")));

        let config = FormConfig {
            nulls: NullPolicy::Skip,
            ..FormConfig::default()
        };
        let doc = parse_with(text, &config).unwrap();
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_tags_are_stripped() {
        let doc = parse("secret: !vault s3cr3t\n").unwrap();
        assert_eq!(doc.get("secret"), Some(&DocValue::from("s3cr3t")));
    }

    #[test]
    fn test_parse_large_mapping() {
        let text: String = (0..20_000).map(|i| format!("key_{}: {}\n", i, i)).collect();
        let doc = parse(&text).unwrap();

        assert_eq!(doc.len(), 20_000);
        assert_eq!(doc.keys().next(), Some("key_0"));
        assert_eq!(doc.keys().last(), Some("key_19999"));
        assert_eq!(doc.get("key_777"), Some(&DocValue::number("777")));
    }
}
