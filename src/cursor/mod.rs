//! Pull-style token source over a decoded character stream.
//!
//! A [`TokenCursor`] yields the lexical events of the descriptor document
//! (tag open/close, text) one at a time. The reader builds an [`XmlCursor`]
//! over the decoded text; a configured source transformer may buffer,
//! rewrite, or replace the cursor before structural decoding begins, so the
//! trait is object-safe and tokens are fully owned.
//!
//! Entity handling: only the five standard markup entities (`&lt;` `&gt;`
//! `&amp;` `&apos;` `&quot;`) and numeric character references resolve.
//! Any other entity reference is a malformation - external entities are
//! never fetched.

mod xml;

pub use xml::XmlCursor;

use smol_str::SmolStr;

use crate::base::{Position, Span};
use crate::error::ParseError;

/// A lexical event pulled from the character stream.
///
/// Attribute values and text content arrive entity-resolved. Every token
/// carries the span of the markup it was produced from; cursors substituted
/// by a transformer may synthesize spans for injected tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// An opening tag with its attributes in declaration order.
    StartTag {
        name: SmolStr,
        attributes: Vec<(SmolStr, String)>,
        span: Span,
    },
    /// A run of character content. Consecutive text tokens may arrive
    /// fragmented; consumers accumulate them.
    Text { content: String, span: Span },
    /// A closing tag.
    EndTag { name: SmolStr, span: Span },
    /// End of the stream.
    Eof,
}

/// A tokenizer-level malformation: unclosed tag, mismatched end tag,
/// unresolvable entity reference.
#[derive(Debug, Clone)]
pub struct CursorError {
    pub message: String,
    pub position: Option<Position>,
}

impl CursorError {
    pub fn new(message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

impl std::fmt::Display for CursorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.position {
            Some(position) => write!(f, "{} ({position})", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CursorError {}

impl From<CursorError> for ParseError {
    fn from(err: CursorError) -> Self {
        ParseError::new(
            err.message,
            err.position.map(|p| p.line),
            err.position.map(|p| p.column),
        )
    }
}

/// Pull-based access to the token stream of one document.
pub trait TokenCursor {
    /// Advance to the next token. After [`Token::Eof`] or an error the
    /// cursor is exhausted and must not be polled again.
    fn next_token(&mut self) -> Result<Token, CursorError>;
}
