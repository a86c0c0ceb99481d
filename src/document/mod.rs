//! The decoded document tree.
//!
//! A [`Document`] owns a rooted tree of named [`Field`]s, each either a
//! scalar value, an ordered sequence of child fields, or a nested field
//! group. Field order within a group matches declaration order in the
//! input. Unknown fields never appear here: they were either rejected
//! (strict decode) or dropped (lenient decode), never silently merged.
//!
//! When the read was position-tracked, every field carries exactly one
//! [`Span`] and child spans nest within their parent's span; in a plain
//! decode all spans are absent.
//!
//! The tree is produced once per successful read and owned by the caller;
//! the reader keeps no cache and no cross-call state.

mod render;

pub use render::to_xml;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::base::{InputSource, Span};

/// Value of a decoded field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Trimmed text content.
    Scalar(String),
    /// Nested fields in declaration order.
    Group(Vec<Field>),
    /// Repeated items in declaration order.
    Sequence(Vec<Field>),
}

/// One decoded field: a name, a value, bound attributes, and - in
/// position-tracked mode - the span it originated from.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub(crate) name: SmolStr,
    pub(crate) value: Value,
    pub(crate) attributes: IndexMap<SmolStr, String>,
    pub(crate) span: Option<Span>,
}

impl Field {
    pub fn new(name: impl Into<SmolStr>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
            attributes: IndexMap::new(),
            span: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Bound attributes in declaration order.
    pub fn attributes(&self) -> &IndexMap<SmolStr, String> {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Provenance span; present iff the read was position-tracked.
    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// Child fields of a group or sequence; empty for scalars.
    pub fn fields(&self) -> &[Field] {
        match &self.value {
            Value::Group(fields) | Value::Sequence(fields) => fields,
            Value::Scalar(_) => &[],
        }
    }

    /// First child field with the given name.
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.name == name)
    }

    /// Scalar content, if this field is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            Value::Scalar(text) => Some(text),
            _ => None,
        }
    }
}

/// A decoded descriptor document.
#[derive(Debug, Clone)]
pub struct Document {
    root: Field,
    source: Option<InputSource>,
    origin: Option<PathBuf>,
}

impl Document {
    pub(crate) fn new(root: Field, source: Option<InputSource>) -> Self {
        Self {
            root,
            source,
            origin: None,
        }
    }

    pub fn root(&self) -> &Field {
        &self.root
    }

    /// The input source handle supplied for a position-tracked read.
    pub fn source(&self) -> Option<&InputSource> {
        self.source.as_ref()
    }

    /// Identity of the file this document was read from, when the file
    /// overload was used. A back-reference only - the document holds no
    /// file-system resources.
    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    pub fn set_origin(&mut self, path: PathBuf) {
        self.origin = Some(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Field {
        Field::new(
            "project",
            Value::Group(vec![
                Field::new("id", Value::Scalar("42".into())),
                Field::new(
                    "modules",
                    Value::Sequence(vec![
                        Field::new("module", Value::Scalar("core".into())),
                        Field::new("module", Value::Scalar("cli".into())),
                    ]),
                ),
            ]),
        )
    }

    #[test]
    fn test_group_lookup_and_scalar_access() {
        let root = sample();
        assert_eq!(root.get("id").and_then(Field::as_scalar), Some("42"));
        assert!(root.get("missing").is_none());
        assert!(root.as_scalar().is_none());
    }

    #[test]
    fn test_sequence_preserves_order() {
        let root = sample();
        let modules = root.get("modules").expect("modules");
        let names: Vec<_> = modules
            .fields()
            .iter()
            .filter_map(Field::as_scalar)
            .collect();
        assert_eq!(names, ["core", "cli"]);
    }

    #[test]
    fn test_document_origin_round_trip() {
        let mut document = Document::new(sample(), None);
        assert!(document.origin().is_none());
        document.set_origin(PathBuf::from("demo/project.xml"));
        assert_eq!(document.origin(), Some(Path::new("demo/project.xml")));
    }
}
