//! Pre-decode token-stream rewriting.
//!
//! Deployments can apply cross-cutting rewrites - interpolation, migration
//! of deprecated syntax - without coupling the decoder to those policies:
//! a [`SourceTransformer`] installed on the reader receives the raw token
//! cursor before structural decoding begins and returns the cursor to use
//! for the remainder of the read. It has full control: it may advance,
//! buffer, or replace tokens, or hand back the original unchanged.
//!
//! The hook only runs when the read options carry a [`TransformContext`];
//! without one the cursor goes straight to the decoder.

use std::any::Any;
use std::path::Path;

use thiserror::Error;

use crate::cursor::{CursorError, TokenCursor};

/// Caller-supplied context enabling the rewrite hook.
///
/// Opaque to this crate: the reader only threads it through to the
/// transformer, which downcasts via [`TransformContext::as_any`] to
/// whatever deployment-defined type it expects.
pub trait TransformContext: Send + Sync {
    fn as_any(&self) -> &dyn Any;
}

/// Failure of a source transformer, classified for the error taxonomy.
///
/// A malformation discovered while rewriting surfaces as a parse error; any
/// other failure is an I/O failure wrapping its original cause.
/// Implementation-specific failure types never leak past this boundary.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("{0}")]
    Malformed(#[from] CursorError),

    #[error("source transformation failed")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TransformError {
    pub fn failed(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Failed(source.into())
    }
}

/// Rewrites the token stream of one document before decoding.
pub trait SourceTransformer: Send + Sync {
    /// Intercept the token cursor for a document at `path` (`None` when
    /// reading from a plain character stream with no logical location).
    fn transform<'s>(
        &self,
        cursor: Box<dyn TokenCursor + 's>,
        path: Option<&Path>,
        context: &dyn TransformContext,
    ) -> Result<Box<dyn TokenCursor + 's>, TransformError>;
}

/// Default transformer: hands the cursor back untouched.
#[derive(Debug, Default)]
pub struct IdentityTransformer;

impl SourceTransformer for IdentityTransformer {
    fn transform<'s>(
        &self,
        cursor: Box<dyn TokenCursor + 's>,
        _path: Option<&Path>,
        _context: &dyn TransformContext,
    ) -> Result<Box<dyn TokenCursor + 's>, TransformError> {
        Ok(cursor)
    }
}
