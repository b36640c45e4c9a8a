//! # Formsmith - Form Schemas from Configuration Files
//!
//! Infers an editable form layout from an arbitrary YAML document. Every
//! key becomes a field with a separator-joined path, a display label and a
//! kind; nested mappings become groups.
//!
//! ## Modules
//!
//! - **document**: YAML text to an ordered [`Document`]
//! - **schema**: field inference, classification and labels
//! - **render**: the control each field kind maps to, plus a text outline renderer
//! - **session**: source text and last good field list, for editor front ends
//!
//! ## Quick Start
//!
//! ```rust
//! use formsmith::{infer, parse, FieldKind};
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = parse("server:\n  host: localhost\n  port: 80\nadmin: ops@example.com\n")?;
//! let fields = infer(&doc);
//!
//! assert_eq!(fields[0].path, "server");
//! assert_eq!(fields[0].kind(), FieldKind::Group);
//! assert_eq!(fields[1].kind(), FieldKind::Email);
//! # Ok(())
//! # }
//! ```
//!
//! ### Classification
//!
//! Leaf values are classified in a fixed order, first match wins: booleans
//! are `boolean`, sequences are `tags`, decimal number literals are `number`
//! (the original text is kept), strings with both `@` and `.` are `email`,
//! and everything else is `text`.

use anyhow::{Context, Result};

pub mod document;
pub mod error;
pub mod render;
pub mod schema;
pub mod session;
pub mod types;

pub use document::{parse, parse_with};
pub use error::{ConfigError, ParseError};
pub use render::{flatten, Control, FieldRenderer, OutlineRenderer};
pub use schema::{classify, infer, infer_with_prefix, label, FieldInferrer};
pub use session::FormSession;
pub use types::{
    DocValue, Document, EmailDetection, FieldDescriptor, FieldKind, FieldValue, FormConfig, NullPolicy,
    Separator,
};

/// Main entry point: parse YAML text and infer its form fields
pub fn generate_fields(text: &str, config: &FormConfig) -> Result<Vec<FieldDescriptor>> {
    let doc = parse_with(text, config).context("Failed to parse form source")?;
    Ok(FieldInferrer::with_config(config.clone()).infer(&doc))
}
