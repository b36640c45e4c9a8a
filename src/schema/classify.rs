//! Leaf value classification
//!
//! Rules are tried in order and the first match wins:
//!
//! 1. booleans become `boolean`
//! 2. sequences become `tags`
//! 3. strings that are a complete decimal number literal become `number`
//! 4. strings holding both `@` and `.` become `email`
//! 5. everything else is `text`

use crate::types::{DocValue, Document, EmailDetection, FieldValue};
use once_cell::sync::Lazy;
use regex::Regex;

// Optional sign, digits with an optional fraction (or a bare fraction), optional exponent.
static NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?$").unwrap()
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
});

/// A value the classifier accepts: anything but a nested mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Leaf<'a> {
    Bool(bool),
    Tags(&'a [String]),
    /// Number or string, classified by its text
    Scalar(&'a str),
}

impl<'a> Leaf<'a> {
    /// Split a document value into a leaf or the nested mapping it holds
    pub fn from_value(value: &'a DocValue) -> Result<Leaf<'a>, &'a Document> {
        match value {
            DocValue::Bool(b) => Ok(Leaf::Bool(*b)),
            DocValue::Sequence(items) => Ok(Leaf::Tags(items)),
            DocValue::Number(s) | DocValue::String(s) => Ok(Leaf::Scalar(s)),
            DocValue::Mapping(child) => Err(child),
        }
    }
}

/// Classify a leaf value. Total: every leaf gets a field value.
pub fn classify_leaf(leaf: Leaf<'_>, email: EmailDetection) -> FieldValue {
    match leaf {
        Leaf::Bool(b) => FieldValue::Boolean(b),
        Leaf::Tags(items) => FieldValue::Tags(items.to_vec()),
        Leaf::Scalar(s) => classify_str(s, email),
    }
}

/// Classify any document value.
///
/// Returns `None` for nested mappings, which become groups instead.
pub fn classify(value: &DocValue, email: EmailDetection) -> Option<FieldValue> {
    Leaf::from_value(value).ok().map(|leaf| classify_leaf(leaf, email))
}

/// Classify the textual form of a scalar (rules 3 to 5)
pub fn classify_str(s: &str, email: EmailDetection) -> FieldValue {
    if is_number(s) {
        FieldValue::Number(s.to_string())
    } else if is_email(s, email) {
        FieldValue::Email(s.to_string())
    } else {
        FieldValue::Text(s.to_string())
    }
}

/// Whether the whole string is a decimal number literal.
///
/// Empty and whitespace-padded strings, hex/octal/binary literals, digit
/// separators and `inf`/`nan` spellings are not numbers.
pub fn is_number(s: &str) -> bool {
    NUMBER_REGEX.is_match(s)
}

pub fn is_email(s: &str, detection: EmailDetection) -> bool {
    match detection {
        EmailDetection::Loose => s.contains('@') && s.contains('.'),
        EmailDetection::Strict => s.len() < 255 && EMAIL_REGEX.is_match(s),
    }
}
