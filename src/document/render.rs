//! Serialize a document tree back to descriptor XML.
//!
//! Groups and sequences are pretty-printed with two-space indentation;
//! scalar content stays inline so a re-read trims nothing away. Paired
//! with the reader this gives round-trip stability for well-formed
//! documents.

use quick_xml::escape::escape;

use super::{Document, Field, Value};

/// Render a document as XML text.
pub fn to_xml(document: &Document) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    write_field(&mut out, document.root(), 0);
    out.push('\n');
    out
}

fn write_field(out: &mut String, field: &Field, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(field.name());
    for (key, value) in field.attributes() {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }
    match field.value() {
        Value::Scalar(text) if text.is_empty() => out.push_str("/>"),
        Value::Scalar(text) => {
            out.push('>');
            out.push_str(&escape(text.as_str()));
            out.push_str("</");
            out.push_str(field.name());
            out.push('>');
        }
        Value::Group(children) | Value::Sequence(children) => {
            if children.is_empty() {
                out.push_str("/>");
            } else {
                out.push_str(">\n");
                for child in children {
                    write_field(out, child, depth + 1);
                    out.push('\n');
                }
                out.push_str(&indent);
                out.push_str("</");
                out.push_str(field.name());
                out.push('>');
            }
        }
    }
}
