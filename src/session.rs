//! Editing session state
//!
//! Holds the source text and the most recently generated field list. A
//! failed generation leaves the previous fields in place.

use crate::document::parse_with;
use crate::error::ParseError;
use crate::schema::FieldInferrer;
use crate::types::{FieldDescriptor, FormConfig};

#[derive(Debug, Clone, Default)]
pub struct FormSession {
    inferrer: FieldInferrer,
    text: String,
    fields: Vec<FieldDescriptor>,
}

impl FormSession {
    pub fn new(config: FormConfig) -> Self {
        FormSession {
            inferrer: FieldInferrer::with_config(config),
            text: String::new(),
            fields: Vec::new(),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Fields from the last successful generation
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Parse the current text and replace the field list.
    ///
    /// On a parse error nothing is inferred and the previous fields are kept.
    pub fn generate(&mut self) -> Result<&[FieldDescriptor], ParseError> {
        let doc = match parse_with(&self.text, self.inferrer.config()) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::error!(error = %e, "failed to parse form source, keeping previous fields");
                return Err(e);
            }
        };

        self.fields = self.inferrer.infer(&doc);
        Ok(&self.fields)
    }
}
