//! Consumer side of the inferred schema
//!
//! Each field kind maps to exactly one [`Control`]. A [`FieldRenderer`]
//! receives one call per control, with groups bracketed by
//! `begin_section`/`end_section` and their children rendered in between.

use crate::types::{FieldDescriptor, FieldValue};
use std::io::Write;

/// The control a field is displayed with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control<'a> {
    Toggle { checked: bool },
    /// Read-only list of items
    TagList { items: &'a [String] },
    NumberInput { value: &'a str },
    EmailInput { value: &'a str },
    TextInput { value: &'a str },
    /// Collapsible section around nested fields
    Section { children: &'a [FieldDescriptor] },
}

impl<'a> Control<'a> {
    pub fn for_field(field: &'a FieldDescriptor) -> Self {
        match &field.value {
            FieldValue::Boolean(b) => Control::Toggle { checked: *b },
            FieldValue::Tags(items) => Control::TagList { items },
            FieldValue::Number(value) => Control::NumberInput { value },
            FieldValue::Email(value) => Control::EmailInput { value },
            FieldValue::Text(value) => Control::TextInput { value },
            FieldValue::Group(children) => Control::Section { children },
        }
    }

    /// HTML input type for the text-like controls
    pub fn input_type(&self) -> Option<&'static str> {
        match self {
            Control::NumberInput { .. } => Some("number"),
            Control::EmailInput { .. } => Some("email"),
            Control::TextInput { .. } => Some("text"),
            _ => None,
        }
    }
}

/// Receives inferred fields one control at a time
pub trait FieldRenderer {
    type Error;

    fn toggle(&mut self, field: &FieldDescriptor, checked: bool) -> Result<(), Self::Error>;

    fn tag_list(&mut self, field: &FieldDescriptor, items: &[String]) -> Result<(), Self::Error>;

    /// Seeded text input; `input_type` is `number`, `email` or `text`
    fn input(&mut self, field: &FieldDescriptor, input_type: &'static str, value: &str) -> Result<(), Self::Error>;

    fn begin_section(&mut self, field: &FieldDescriptor) -> Result<(), Self::Error>;

    fn end_section(&mut self, field: &FieldDescriptor) -> Result<(), Self::Error>;

    /// Render a field list in order
    fn render(&mut self, fields: &[FieldDescriptor]) -> Result<(), Self::Error> {
        for field in fields {
            self.render_field(field)?;
        }
        Ok(())
    }

    fn render_field(&mut self, field: &FieldDescriptor) -> Result<(), Self::Error> {
        let control = Control::for_field(field);

        match control {
            Control::Toggle { checked } => self.toggle(field, checked),
            Control::TagList { items } => self.tag_list(field, items),
            Control::NumberInput { value } | Control::EmailInput { value } | Control::TextInput { value } => {
                let input_type = control.input_type().unwrap_or("text");
                self.input(field, input_type, value)
            }
            Control::Section { children } => {
                self.begin_section(field)?;
                self.render(children)?;
                self.end_section(field)
            }
        }
    }
}

/// Writes fields as an indented plain-text outline
pub struct OutlineRenderer<W: Write> {
    writer: W,
    depth: usize,
}

impl<W: Write> OutlineRenderer<W> {
    pub fn new(writer: W) -> Self {
        OutlineRenderer { writer, depth: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }
}

impl<W: Write> FieldRenderer for OutlineRenderer<W> {
    type Error = std::io::Error;

    fn toggle(&mut self, field: &FieldDescriptor, checked: bool) -> std::io::Result<()> {
        let mark = if checked { "x" } else { " " };
        writeln!(self.writer, "{}[{}] {}", self.indent(), mark, field.label)
    }

    fn tag_list(&mut self, field: &FieldDescriptor, items: &[String]) -> std::io::Result<()> {
        writeln!(self.writer, "{}{}:", self.indent(), field.label)?;
        for item in items {
            writeln!(self.writer, "{}  - {}", self.indent(), item)?;
        }
        Ok(())
    }

    fn input(&mut self, field: &FieldDescriptor, input_type: &'static str, value: &str) -> std::io::Result<()> {
        if input_type == "text" {
            writeln!(self.writer, "{}{}: {}", self.indent(), field.label, value)
        } else {
            writeln!(self.writer, "{}{} ({}): {}", self.indent(), field.label, input_type, value)
        }
    }

    fn begin_section(&mut self, field: &FieldDescriptor) -> std::io::Result<()> {
        writeln!(self.writer, "{}[{}]", self.indent(), field.label)?;
        self.depth += 1;
        Ok(())
    }

    fn end_section(&mut self, _field: &FieldDescriptor) -> std::io::Result<()> {
        self.depth = self.depth.saturating_sub(1);
        Ok(())
    }
}

/// Depth-first iterator over a field tree, parents before their children
pub struct Flatten<'a> {
    stack: Vec<std::slice::Iter<'a, FieldDescriptor>>,
}

impl<'a> Iterator for Flatten<'a> {
    type Item = &'a FieldDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let iter = self.stack.last_mut()?;
            match iter.next() {
                Some(field) => {
                    if let Some(children) = field.children() {
                        self.stack.push(children.iter());
                    }
                    return Some(field);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

pub fn flatten(fields: &[FieldDescriptor]) -> Flatten<'_> {
    Flatten {
        stack: vec![fields.iter()],
    }
}
