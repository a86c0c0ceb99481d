//! Structural decoding of the token stream against a schema.
//!
//! Depth-first token-driven recursive descent: each group field declares an
//! expected child-tag vocabulary, text content and attributes bind to
//! scalar values, repeated item tags bind to ordered sequences. Decoding a
//! field completes when its matching close token is consumed.
//!
//! The strictness policy is consulted per construct: under strict decoding
//! any unrecognized tag, attribute, or stray text aborts with an error at
//! the construct's position; under lenient decoding the entire
//! unrecognized subtree is consumed and discarded without affecting
//! sibling decoding. Duplicated non-repeating fields are a malformation in
//! both modes.
//!
//! Two decode variants share this one grammar walk and differ only in the
//! [`SpanSink`] bookkeeping; see [`decode_plain`] and [`decode_tracked`].

mod sink;

pub use sink::{NoopSink, RecordingSink, SpanSink};

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use tracing::trace;

use crate::base::{Position, Span};
use crate::cursor::{CursorError, Token, TokenCursor};
use crate::document::{Field, Value};
use crate::error::ParseError;
use crate::schema::{FieldDef, FieldKind, Schema};

/// A malformation found while decoding: grammar violation or a tokenizer
/// error surfaced through the cursor.
#[derive(Debug, Clone)]
pub struct DecodeError {
    pub message: String,
    pub position: Option<Position>,
}

impl DecodeError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    fn at(message: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} ({position})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<CursorError> for DecodeError {
    fn from(err: CursorError) -> Self {
        Self {
            message: err.message,
            position: err.position,
        }
    }
}

impl From<DecodeError> for ParseError {
    fn from(err: DecodeError) -> Self {
        ParseError::new(
            err.message,
            err.position.map(|p| p.line),
            err.position.map(|p| p.column),
        )
    }
}

/// Decode without provenance bookkeeping.
pub fn decode_plain(
    cursor: &mut dyn TokenCursor,
    schema: &Schema,
    strict: bool,
) -> Result<Field, DecodeError> {
    decode(cursor, schema, strict, &mut NoopSink)
}

/// Decode with a span attached to every produced field.
pub fn decode_tracked(
    cursor: &mut dyn TokenCursor,
    schema: &Schema,
    strict: bool,
) -> Result<Field, DecodeError> {
    decode(cursor, schema, strict, &mut RecordingSink)
}

fn decode<S: SpanSink>(
    cursor: &mut dyn TokenCursor,
    schema: &Schema,
    strict: bool,
    sink: &mut S,
) -> Result<Field, DecodeError> {
    let root_def = schema.root();
    let (name, attributes, span) = loop {
        match cursor.next_token()? {
            Token::Text { content, .. } if content.trim().is_empty() => continue,
            Token::Text { span, .. } => {
                return Err(DecodeError::at(
                    "text content before root element",
                    span.start,
                ));
            }
            Token::StartTag {
                name,
                attributes,
                span,
            } => {
                if name != root_def.name() {
                    if strict {
                        return Err(DecodeError::at(
                            format!(
                                "expected root element '{}' but found '{name}'",
                                root_def.name()
                            ),
                            span.start,
                        ));
                    }
                    trace!(found = %name, expected = %root_def.name(), "accepting unexpected root element");
                }
                break (name, attributes, span);
            }
            Token::EndTag { span, .. } => {
                return Err(DecodeError::at(
                    "unexpected closing tag before root element",
                    span.start,
                ));
            }
            Token::Eof => return Err(DecodeError::new("missing root element")),
        }
    };
    let root = decode_field(cursor, root_def, name, attributes, span, strict, sink)?;
    loop {
        match cursor.next_token()? {
            Token::Text { content, .. } if content.trim().is_empty() => continue,
            Token::Eof => break,
            Token::Text { span, .. } | Token::StartTag { span, .. } | Token::EndTag { span, .. } => {
                return Err(DecodeError::at("content after document element", span.start));
            }
        }
    }
    Ok(root)
}

fn decode_field<S: SpanSink>(
    cursor: &mut dyn TokenCursor,
    def: &FieldDef,
    name: SmolStr,
    attributes: Vec<(SmolStr, String)>,
    start_span: Span,
    strict: bool,
    sink: &mut S,
) -> Result<Field, DecodeError> {
    let mut bound = IndexMap::new();
    for (key, value) in attributes {
        if def.recognizes_attribute(&key) {
            bound.insert(key, value);
        } else if strict {
            return Err(DecodeError::at(
                format!("unrecognized attribute '{key}' on '{name}'"),
                start_span.start,
            ));
        } else {
            trace!(attribute = %key, field = %name, "skipping unrecognized attribute");
        }
    }

    let (value, end_span) = match def.kind() {
        FieldKind::Scalar => decode_scalar(cursor, &name, strict)?,
        FieldKind::Group(_) => decode_group(cursor, def, &name, strict, sink)?,
        FieldKind::Sequence(item) => decode_sequence(cursor, item, &name, strict, sink)?,
    };

    let mut field = Field::new(name, value);
    field.attributes = bound;
    sink.record(&mut field, Span::new(start_span.start, end_span.end));
    Ok(field)
}

fn decode_scalar(
    cursor: &mut dyn TokenCursor,
    name: &str,
    strict: bool,
) -> Result<(Value, Span), DecodeError> {
    let mut text = String::new();
    loop {
        match cursor.next_token()? {
            Token::Text { content, .. } => text.push_str(&content),
            Token::StartTag {
                name: child, span, ..
            } => {
                if strict {
                    return Err(DecodeError::at(
                        format!("unexpected field '{child}' inside value of '{name}'"),
                        span.start,
                    ));
                }
                trace!(field = %child, parent = %name, "skipping field inside scalar value");
                skip_subtree(cursor)?;
            }
            Token::EndTag { span, .. } => {
                return Ok((Value::Scalar(text.trim().to_owned()), span));
            }
            Token::Eof => {
                return Err(DecodeError::new(format!(
                    "unexpected end of stream inside '{name}'"
                )));
            }
        }
    }
}

fn decode_group<S: SpanSink>(
    cursor: &mut dyn TokenCursor,
    def: &FieldDef,
    name: &str,
    strict: bool,
    sink: &mut S,
) -> Result<(Value, Span), DecodeError> {
    let mut children = Vec::new();
    let mut seen: FxHashSet<SmolStr> = FxHashSet::default();
    loop {
        match cursor.next_token()? {
            Token::Text { content, span } => {
                if !content.trim().is_empty() {
                    if strict {
                        return Err(DecodeError::at(
                            format!("unexpected text content in '{name}'"),
                            span.start,
                        ));
                    }
                    trace!(field = %name, "discarding stray text content");
                }
            }
            Token::StartTag {
                name: child_name,
                attributes,
                span,
            } => match def.child(&child_name) {
                Some(child_def) => {
                    if !seen.insert(child_name.clone()) {
                        return Err(DecodeError::at(
                            format!("duplicated field '{child_name}' in '{name}'"),
                            span.start,
                        ));
                    }
                    children.push(decode_field(
                        cursor, child_def, child_name, attributes, span, strict, sink,
                    )?);
                }
                None => {
                    if strict {
                        return Err(DecodeError::at(
                            format!("unrecognized field '{child_name}' in '{name}'"),
                            span.start,
                        ));
                    }
                    trace!(field = %child_name, parent = %name, "skipping unrecognized field");
                    skip_subtree(cursor)?;
                }
            },
            Token::EndTag { span, .. } => return Ok((Value::Group(children), span)),
            Token::Eof => {
                return Err(DecodeError::new(format!(
                    "unexpected end of stream inside '{name}'"
                )));
            }
        }
    }
}

fn decode_sequence<S: SpanSink>(
    cursor: &mut dyn TokenCursor,
    item: &FieldDef,
    name: &str,
    strict: bool,
    sink: &mut S,
) -> Result<(Value, Span), DecodeError> {
    let mut items = Vec::new();
    loop {
        match cursor.next_token()? {
            Token::Text { content, span } => {
                if !content.trim().is_empty() {
                    if strict {
                        return Err(DecodeError::at(
                            format!("unexpected text content in '{name}'"),
                            span.start,
                        ));
                    }
                    trace!(field = %name, "discarding stray text content");
                }
            }
            Token::StartTag {
                name: child_name,
                attributes,
                span,
            } => {
                if child_name == item.name() {
                    items.push(decode_field(
                        cursor, item, child_name, attributes, span, strict, sink,
                    )?);
                } else if strict {
                    return Err(DecodeError::at(
                        format!("unrecognized field '{child_name}' in '{name}'"),
                        span.start,
                    ));
                } else {
                    trace!(field = %child_name, parent = %name, "skipping unrecognized field");
                    skip_subtree(cursor)?;
                }
            }
            Token::EndTag { span, .. } => return Ok((Value::Sequence(items), span)),
            Token::Eof => {
                return Err(DecodeError::new(format!(
                    "unexpected end of stream inside '{name}'"
                )));
            }
        }
    }
}

/// Consume and discard a complete subtree. The opening tag has already
/// been consumed; returns once its matching close token is seen.
fn skip_subtree(cursor: &mut dyn TokenCursor) -> Result<(), DecodeError> {
    let mut depth = 1usize;
    loop {
        match cursor.next_token()? {
            Token::StartTag { .. } => depth += 1,
            Token::EndTag { .. } => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Token::Text { .. } => {}
            Token::Eof => {
                return Err(DecodeError::new(
                    "unexpected end of stream while skipping unrecognized content",
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::XmlCursor;
    use crate::schema::{FieldDef, Schema};

    fn project_schema() -> Schema {
        Schema::new(
            "1.0.0",
            FieldDef::group(
                "project",
                vec![
                    FieldDef::scalar("id"),
                    FieldDef::scalar("name"),
                    FieldDef::sequence("modules", FieldDef::scalar("module")),
                ],
            ),
        )
    }

    fn decode_str(text: &str, strict: bool) -> Result<Field, DecodeError> {
        let mut cursor = XmlCursor::new(text);
        decode_plain(&mut cursor, &project_schema(), strict)
    }

    #[test]
    fn test_decodes_scalars_and_sequences() {
        let root = decode_str(
            "<project><id>42</id><modules><module>core</module><module>cli</module></modules></project>",
            true,
        )
        .expect("decode");
        assert_eq!(root.get("id").and_then(Field::as_scalar), Some("42"));
        let modules = root.get("modules").expect("modules");
        assert_eq!(modules.fields().len(), 2);
    }

    #[test]
    fn test_scalar_content_is_trimmed() {
        let root = decode_str("<project><id>\n  42\n</id></project>", true).expect("decode");
        assert_eq!(root.get("id").and_then(Field::as_scalar), Some("42"));
    }

    #[test]
    fn test_unknown_field_strict_fails_at_position() {
        let err = decode_str("<project><junk>x</junk></project>", true).expect_err("strict");
        assert!(err.message.contains("junk"));
        assert_eq!(err.position.expect("position").column, 10);
    }

    #[test]
    fn test_unknown_field_lenient_skips_subtree() {
        let root = decode_str(
            "<project><junk><nested><deep/></nested></junk><name>x</name></project>",
            false,
        )
        .expect("lenient decode");
        assert!(root.get("junk").is_none());
        assert_eq!(root.get("name").and_then(Field::as_scalar), Some("x"));
    }

    #[test]
    fn test_duplicated_field_fails_in_both_modes() {
        for strict in [true, false] {
            let err = decode_str("<project><id>1</id><id>2</id></project>", strict)
                .expect_err("duplicate");
            assert!(err.message.contains("duplicated field 'id'"));
        }
    }

    #[test]
    fn test_missing_root_element() {
        let err = decode_str("   ", true).expect_err("empty");
        assert!(err.message.contains("missing root element"));
        assert!(err.position.is_none());
    }

    #[test]
    fn test_wrong_root_strict_fails_lenient_decodes() {
        let err = decode_str("<pom><id>1</id></pom>", true).expect_err("strict root");
        assert!(err.message.contains("expected root element 'project'"));
        let root = decode_str("<pom><id>1</id></pom>", false).expect("lenient root");
        assert_eq!(root.name(), "pom");
        assert_eq!(root.get("id").and_then(Field::as_scalar), Some("1"));
    }

    #[test]
    fn test_tracked_decode_attaches_nested_spans() {
        let text = "<project><id>42</id></project>";
        let mut cursor = XmlCursor::new(text);
        let root = decode_tracked(&mut cursor, &project_schema(), true).expect("decode");
        let root_span = root.span().expect("root span");
        let id_span = root.get("id").expect("id").span().expect("id span");
        assert!(root_span.contains(&id_span));
        assert_eq!(u32::from(root_span.start.offset), 0);
        assert_eq!(u32::from(root_span.end.offset), text.len() as u32);
    }

    #[test]
    fn test_plain_decode_attaches_no_spans() {
        let root = decode_str("<project><id>42</id></project>", true).expect("decode");
        assert!(root.span().is_none());
        assert!(root.get("id").expect("id").span().is_none());
    }
}
