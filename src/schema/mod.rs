//! The structural grammar the decoder matches against.
//!
//! A [`Schema`] is supplied by the caller, not designed here: it names the
//! versioned field vocabulary of one descriptor document shape. The decoder
//! walks the token stream against it - nothing about the vocabulary is
//! baked into this crate.
//!
//! Three field shapes exist:
//! - **scalar** - binds the element's text content;
//! - **group** - declares an expected child-tag vocabulary, each child
//!   appearing at most once;
//! - **sequence** - a container whose repeated item tags bind to an
//!   ordered list.
//!
//! Recognized attribute names are declared per field; anything undeclared
//! is subject to the strictness policy at decode time.

use smol_str::SmolStr;

/// A versioned descriptor grammar: the root field definition plus a
/// version label for diagnostics and compatibility decisions by callers.
#[derive(Debug, Clone)]
pub struct Schema {
    version: SmolStr,
    root: FieldDef,
}

impl Schema {
    pub fn new(version: impl Into<SmolStr>, root: FieldDef) -> Self {
        Self {
            version: version.into(),
            root,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn root(&self) -> &FieldDef {
        &self.root
    }
}

/// Shape of one field in the vocabulary.
#[derive(Debug, Clone)]
pub enum FieldKind {
    /// Text content binds to a scalar value.
    Scalar,
    /// Nested fields drawn from a child-tag vocabulary.
    Group(Vec<FieldDef>),
    /// Repeated occurrences of one item definition, order preserved.
    Sequence(Box<FieldDef>),
}

/// One named field in the vocabulary.
#[derive(Debug, Clone)]
pub struct FieldDef {
    name: SmolStr,
    kind: FieldKind,
    attributes: Vec<SmolStr>,
}

impl FieldDef {
    pub fn scalar(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar,
            attributes: Vec::new(),
        }
    }

    pub fn group(name: impl Into<SmolStr>, children: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Group(children),
            attributes: Vec::new(),
        }
    }

    pub fn sequence(name: impl Into<SmolStr>, item: FieldDef) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Sequence(Box::new(item)),
            attributes: Vec::new(),
        }
    }

    /// Declare the attribute names this field recognizes.
    pub fn with_attributes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.attributes = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// Whether `name` is a recognized attribute of this field.
    pub fn recognizes_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a == name)
    }

    /// Look up a child definition in a group vocabulary.
    pub fn child(&self, name: &str) -> Option<&FieldDef> {
        match &self.kind {
            FieldKind::Group(children) => children.iter().find(|c| c.name == name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_child_lookup() {
        let def = FieldDef::group(
            "project",
            vec![FieldDef::scalar("id"), FieldDef::scalar("name")],
        );
        assert_eq!(def.child("id").map(|c| c.name()), Some("id"));
        assert!(def.child("version").is_none());
    }

    #[test]
    fn test_scalar_has_no_children() {
        let def = FieldDef::scalar("id");
        assert!(def.child("id").is_none());
    }

    #[test]
    fn test_attribute_recognition() {
        let def = FieldDef::scalar("dependency").with_attributes(["scope", "optional"]);
        assert!(def.recognizes_attribute("scope"));
        assert!(!def.recognizes_attribute("exclusions"));
    }
}
