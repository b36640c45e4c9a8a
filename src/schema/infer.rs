//! Form field inference
//!
//! Walks a [`Document`] in key order and produces one [`FieldDescriptor`]
//! per key. Nested mappings become groups whose children carry the parent
//! path as a prefix; everything else goes through the classifier.

use std::borrow::Cow;

use super::classify::{classify_leaf, Leaf};
use super::label::label;
use crate::types::{Document, FieldDescriptor, FieldValue, FormConfig};

/// Field inferrer holding the path and classification settings
#[derive(Debug, Clone, Default)]
pub struct FieldInferrer {
    config: FormConfig,
}

impl FieldInferrer {
    /// Create an inferrer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FormConfig) -> Self {
        FieldInferrer { config }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Infer the fields of a whole document
    pub fn infer(&self, doc: &Document) -> Vec<FieldDescriptor> {
        self.infer_with_prefix(doc, "")
    }

    /// Infer fields with every path starting with `prefix`.
    ///
    /// The prefix is used verbatim, so it should already end with the
    /// separator when it names a parent (`"server."`).
    pub fn infer_with_prefix(&self, doc: &Document, prefix: &str) -> Vec<FieldDescriptor> {
        let fields = self.infer_level(doc, prefix);
        tracing::debug!(prefix, fields = fields.len(), "inferred form fields");
        fields
    }

    fn infer_level(&self, doc: &Document, prefix: &str) -> Vec<FieldDescriptor> {
        let mut fields = Vec::with_capacity(doc.len());

        for (key, value) in doc.iter() {
            let path = format!("{}{}", prefix, self.escape_segment(key));

            let field_value = match Leaf::from_value(value) {
                Ok(leaf) => classify_leaf(leaf, self.config.email),
                Err(child) => {
                    let child_prefix = format!("{}{}", path, self.config.separator);
                    tracing::trace!(path = %path, keys = child.len(), "descending into group");
                    FieldValue::Group(self.infer_level(child, &child_prefix))
                }
            };

            fields.push(FieldDescriptor::new(path, label(key), field_value));
        }

        fields
    }

    /// Escape backslashes and separators inside a key so that a key such as
    /// `a.b` cannot collide with the nested path `a` / `b`.
    ///
    /// The separator is a single character other than `\\`, so every escaped
    /// path reads back to exactly one sequence of keys.
    fn escape_segment<'a>(&self, key: &'a str) -> Cow<'a, str> {
        let sep = self.config.separator.as_char();

        if !key.contains(|c: char| c == sep || c == '\\') {
            return Cow::Borrowed(key);
        }

        let mut escaped = String::with_capacity(key.len() + 2);
        for c in key.chars() {
            if c == sep || c == '\\' {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        Cow::Owned(escaped)
    }
}

/// Infer form fields from a document with the default configuration
pub fn infer(doc: &Document) -> Vec<FieldDescriptor> {
    FieldInferrer::new().infer(doc)
}

/// Infer form fields with a path prefix, using the default configuration
pub fn infer_with_prefix(doc: &Document, prefix: &str) -> Vec<FieldDescriptor> {
    FieldInferrer::new().infer_with_prefix(doc, prefix)
}
