//! Form schema inference
//!
//! Turns a parsed [`Document`](crate::Document) into an ordered tree of
//! [`FieldDescriptor`](crate::FieldDescriptor)s with kinds, labels and
//! separator-joined paths.

pub mod classify;
pub mod infer;
pub mod label;

pub use classify::{classify, classify_leaf, classify_str, is_email, is_number, Leaf};
pub use infer::{infer, infer_with_prefix, FieldInferrer};
pub use label::label;
