//! Foundation types for descriptor reading.
//!
//! This module provides fundamental types used throughout the reader:
//! - [`Position`], [`Span`] - line/column/offset coordinates and ranges
//! - [`LineIndex`] - byte offset to line/column conversion
//! - [`InputSource`] - the provenance-capable input source handle
//!
//! This module has NO dependencies on other prodesc modules.

mod line_index;
mod position;
mod source;

pub use line_index::LineIndex;
pub use position::{Position, Span};
pub use source::InputSource;

// Re-export text-size types for convenience
pub use text_size::TextSize;
