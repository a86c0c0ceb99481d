//! Per-read configuration.

use std::sync::Arc;

use crate::base::InputSource;
use crate::transform::TransformContext;

/// Options resolved once per read call and discarded when it returns.
///
/// - `strict` (default `true`): whether constructs unrecognized by the
///   schema abort decoding or are silently skipped.
/// - `input_source`: supplying a provenance handle selects the
///   position-tracked decode variant.
/// - `transform_context`: supplying a context enables the source
///   transformer hook.
#[derive(Clone)]
pub struct ReadOptions {
    pub strict: bool,
    pub input_source: Option<InputSource>,
    pub transform_context: Option<Arc<dyn TransformContext>>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self {
            strict: true,
            input_source: None,
            transform_context: None,
        }
    }

    /// Skip unrecognized fields and attributes instead of failing.
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Enable position-tracked decoding attributed to `source`.
    pub fn with_input_source(mut self, source: InputSource) -> Self {
        self.input_source = Some(source);
        self
    }

    /// Enable the source transformer hook with the given context.
    pub fn with_transform_context(mut self, context: Arc<dyn TransformContext>) -> Self {
        self.transform_context = Some(context);
        self
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReadOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadOptions")
            .field("strict", &self.strict)
            .field("input_source", &self.input_source)
            .field("transform_context", &self.transform_context.is_some())
            .finish()
    }
}
