//! Error types for document parsing and configuration

use thiserror::Error;

/// Errors raised while turning source text into a [`Document`](crate::Document)
#[derive(Error, Debug)]
pub enum ParseError {
    /// The text is not valid YAML
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The top-level value is not a mapping
    #[error("Invalid document: expected a mapping at the root, found {found}")]
    InvalidRoot { found: &'static str },

    /// A mapping key is a sequence or mapping
    #[error("Unsupported {found} key under '{parent}'")]
    UnsupportedKey { parent: String, found: &'static str },

    /// Two keys collapse to the same text after coercion (e.g. `1` and `"1"`)
    #[error("Duplicate key '{key}' under '{parent}'")]
    DuplicateKey { parent: String, key: String },
}

/// Errors raised while building a [`FormConfig`](crate::FormConfig)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid path separator '{value}': {reason}")]
    InvalidSeparator { value: String, reason: &'static str },
}
