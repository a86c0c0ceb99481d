//! Unified error taxonomy for descriptor reading.
//!
//! Every failure a read can produce converges into [`ReadError`]:
//!
//! - [`ReadError::InvalidArgument`] - a degenerate argument rejected before
//!   any I/O is performed.
//! - [`ReadError::Parse`] - the stream violated the document grammar or the
//!   tokenizer reported malformed markup; carries line/column when the
//!   failure is attributable to a stream position.
//! - [`ReadError::Io`] - the underlying stream could not be read, decoded,
//!   or transformed; carries the original cause.
//!
//! No other failure category escapes the reader. Partial documents are
//! never returned alongside an error.

use thiserror::Error;

/// A document-level malformation: grammar violation or malformed markup.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable description of the malformation.
    pub message: String,
    /// 1-indexed line of the offending construct, when known.
    pub line: Option<u32>,
    /// 1-indexed column of the offending construct, when known.
    pub column: Option<u32>,
}

impl ParseError {
    /// Create a parse error with an optional source position.
    pub fn new(message: impl Into<String>, line: Option<u32>, column: Option<u32>) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "{} (line {line}, column {column})", self.message)
            }
            (Some(line), None) => write!(f, "{} (line {line})", self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors produced by [`DescriptorReader`](crate::reader::DescriptorReader).
#[derive(Debug, Error)]
pub enum ReadError {
    /// An argument was rejected before any I/O took place.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The document was malformed or violated the schema.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The underlying stream could not be read, decoded, or transformed.
    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ReadError {
    /// Create an I/O-class error wrapping its original cause.
    pub fn io(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source: source.into(),
        }
    }

    /// True for document-level malformations.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_with_position() {
        let err = ParseError::new("unexpected tag", Some(3), Some(7));
        assert_eq!(err.to_string(), "unexpected tag (line 3, column 7)");
    }

    #[test]
    fn test_parse_error_display_without_position() {
        let err = ParseError::new("missing root element", None, None);
        assert_eq!(err.to_string(), "missing root element");
    }

    #[test]
    fn test_io_error_preserves_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "closed");
        let err = ReadError::io("unable to read stream", cause);
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.is_parse());
    }
}
