//! # prodesc-base
//!
//! Core library for reading structured project descriptor documents into
//! typed field trees.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! reader    → Public façade: file/byte/char overloads, options, encoding
//!   ↓
//! transform → Pre-decode token-stream rewrite hook
//!   ↓
//! decode    → Structural decoder (plain / position-tracked variants)
//!   ↓
//! document  → Decoded field trees, XML rendering
//!   ↓
//! schema    → Caller-supplied field vocabulary
//!   ↓
//! cursor    → Pull-style token source over a character stream
//!   ↓
//! base      → Primitives (Position, Span, LineIndex, InputSource)
//! ```
//!
//! ## Usage
//!
//! ```
//! use prodesc::{DescriptorReader, FieldDef, ReadOptions, Schema};
//!
//! let schema = Schema::new(
//!     "1.0.0",
//!     FieldDef::group("project", vec![FieldDef::scalar("id")]),
//! );
//! let reader = DescriptorReader::new(schema);
//! let document = reader
//!     .read_str("<project><id>42</id></project>", &ReadOptions::new())
//!     .expect("well-formed descriptor");
//! assert_eq!(
//!     document.root().get("id").and_then(|f| f.as_scalar()),
//!     Some("42"),
//! );
//! ```
//!
//! Each read call owns its own cursor, configuration, and output tree;
//! nothing is shared between calls, so concurrent reads from multiple
//! threads are safe as long as each call receives its own stream handle.

// ============================================================================
// MODULES (dependency order: base → cursor → schema → document → decode →
// transform → reader)
// ============================================================================

/// Foundation types: Position, Span, LineIndex, InputSource
pub mod base;

/// Pull-style token source over a decoded character stream
pub mod cursor;

/// Caller-supplied structural grammar
pub mod schema;

/// Decoded document trees and XML rendering
pub mod document;

/// Structural decoder with plain and position-tracked variants
pub mod decode;

/// Pre-decode token-stream rewriting
pub mod transform;

/// Public reading façade
pub mod reader;

/// Unified error taxonomy
pub mod error;

// Re-export the public surface
pub use base::{InputSource, Position, Span};
pub use cursor::{Token, TokenCursor, XmlCursor};
pub use document::{Document, Field, Value};
pub use error::{ParseError, ReadError};
pub use reader::{DescriptorReader, EncodingSniffer, ReadOptions, XmlDeclSniffer};
pub use schema::{FieldDef, FieldKind, Schema};
pub use transform::{SourceTransformer, TransformContext, TransformError};
