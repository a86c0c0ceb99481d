//! quick-xml-backed token source.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use smol_str::SmolStr;
use text_size::TextSize;

use super::{CursorError, Token, TokenCursor};
use crate::base::{LineIndex, Position, Span};

/// The five standard markup entities. Nothing else resolves by name.
const PREDEFINED_ENTITIES: &[(&str, char)] = &[
    ("lt", '<'),
    ("gt", '>'),
    ("amp", '&'),
    ("apos", '\''),
    ("quot", '"'),
];

/// Token source over a decoded character stream.
///
/// Skips the XML declaration, processing instructions, comments, and
/// DOCTYPE; surfaces CDATA as text; checks that end-tag names match their
/// opening tags. Self-closing elements are reported as a start tag
/// immediately followed by an end tag sharing its span.
pub struct XmlCursor<'s> {
    text: &'s str,
    reader: Reader<&'s [u8]>,
    index: LineIndex,
    /// End tag synthesized for a self-closing element.
    pending: Option<Token>,
}

impl<'s> XmlCursor<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            reader: Reader::from_str(text),
            index: LineIndex::new(text),
            pending: None,
        }
    }

    fn position(&self, offset: u64) -> Position {
        self.index.position(self.text, TextSize::new(offset as u32))
    }

    fn span(&self, start: u64, end: u64) -> Span {
        Span::new(self.position(start), self.position(end))
    }

    fn malformed(&self, message: impl std::fmt::Display) -> CursorError {
        let position = self.position(self.reader.error_position());
        CursorError::new(message.to_string(), Some(position))
    }

    fn start_tag(&self, element: &BytesStart<'_>, span: Span) -> Result<Token, CursorError> {
        let name = tag_name(element.name().as_ref(), span.start)?;
        let mut attributes = Vec::new();
        for attribute in element.attributes() {
            let attribute = attribute
                .map_err(|e| CursorError::new(format!("bad attribute: {e}"), Some(span.start)))?;
            let key = tag_name(attribute.key.as_ref(), span.start)?;
            let value = attribute.unescape_value().map_err(|e| {
                CursorError::new(format!("bad attribute value: {e}"), Some(span.start))
            })?;
            attributes.push((key, value.into_owned()));
        }
        Ok(Token::StartTag {
            name,
            attributes,
            span,
        })
    }

    /// Resolve `&name;` against the built-in table, or a numeric character
    /// reference. Unknown entities are malformations: external entity
    /// resolution is not permitted.
    fn resolve_reference(&self, raw: &[u8], span: Span) -> Result<Token, CursorError> {
        let name = std::str::from_utf8(raw)
            .map_err(|_| CursorError::new("entity reference is not UTF-8", Some(span.start)))?;
        if let Some(ch) = resolve_char_ref(name) {
            return Ok(Token::Text {
                content: ch.to_string(),
                span,
            });
        }
        if let Some(&(_, ch)) = PREDEFINED_ENTITIES.iter().find(|&&(n, _)| n == name) {
            return Ok(Token::Text {
                content: ch.to_string(),
                span,
            });
        }
        Err(CursorError::new(
            format!("unresolvable entity reference '&{name};'"),
            Some(span.start),
        ))
    }
}

impl TokenCursor for XmlCursor<'_> {
    fn next_token(&mut self) -> Result<Token, CursorError> {
        if let Some(token) = self.pending.take() {
            return Ok(token);
        }
        loop {
            let start = self.reader.buffer_position();
            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let span = self.span(start, self.reader.buffer_position());
                    return self.start_tag(&e, span);
                }
                Ok(Event::Empty(e)) => {
                    let span = self.span(start, self.reader.buffer_position());
                    let token = self.start_tag(&e, span)?;
                    let name = match &token {
                        Token::StartTag { name, .. } => name.clone(),
                        _ => unreachable!(),
                    };
                    self.pending = Some(Token::EndTag { name, span });
                    return Ok(token);
                }
                Ok(Event::End(e)) => {
                    let span = self.span(start, self.reader.buffer_position());
                    let name = tag_name(e.name().as_ref(), span.start)?;
                    return Ok(Token::EndTag { name, span });
                }
                Ok(Event::Text(e)) => {
                    let span = self.span(start, self.reader.buffer_position());
                    let content = e
                        .decode()
                        .map_err(|err| self.malformed(format_args!("bad text content: {err}")))?
                        .into_owned();
                    return Ok(Token::Text { content, span });
                }
                Ok(Event::CData(e)) => {
                    let span = self.span(start, self.reader.buffer_position());
                    let content = std::str::from_utf8(e.as_ref())
                        .map_err(|_| CursorError::new("CDATA is not UTF-8", Some(span.start)))?
                        .to_owned();
                    return Ok(Token::Text { content, span });
                }
                Ok(Event::GeneralRef(e)) => {
                    let span = self.span(start, self.reader.buffer_position());
                    return self.resolve_reference(e.as_ref(), span);
                }
                Ok(Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_)) => {
                    continue;
                }
                Ok(Event::Eof) => return Ok(Token::Eof),
                Err(e) => return Err(self.malformed(e)),
            }
        }
    }
}

fn tag_name(raw: &[u8], at: Position) -> Result<SmolStr, CursorError> {
    std::str::from_utf8(raw)
        .map(SmolStr::new)
        .map_err(|_| CursorError::new("tag name is not UTF-8", Some(at)))
}

fn resolve_char_ref(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        digits.parse().ok()?
    };
    char::from_u32(code)
}
