//! Provenance-sink strategy for the structural decoder.
//!
//! The decoder is generic over a [`SpanSink`]: the plain variant uses
//! [`NoopSink`] and pays no bookkeeping cost, the position-tracked variant
//! uses [`RecordingSink`] to attach one span to every decoded field. Which
//! sink runs is decided by the reader from configuration alone, never from
//! document content.

use crate::base::Span;
use crate::document::Field;

/// Receives the span of every decoded field.
pub trait SpanSink {
    fn record(&mut self, field: &mut Field, span: Span);
}

/// Discards spans; the plain decode variant.
#[derive(Debug, Default)]
pub struct NoopSink;

impl SpanSink for NoopSink {
    fn record(&mut self, _field: &mut Field, _span: Span) {}
}

/// Attaches spans to fields; the position-tracked decode variant.
#[derive(Debug, Default)]
pub struct RecordingSink;

impl SpanSink for RecordingSink {
    fn record(&mut self, field: &mut Field, span: Span) {
        field.span = Some(span);
    }
}
