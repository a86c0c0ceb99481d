//! The provenance-capable input source handle.

use smol_str::SmolStr;

/// Identity of the stream a document was decoded from.
///
/// Supplying an `InputSource` in the read options switches the decoder to
/// its position-tracked variant: every decoded field is annotated with the
/// span it originated from, and the returned document keeps this handle so
/// spans can be attributed back to their source.
///
/// The label is free-form - typically a path or coordinate string - and is
/// never interpreted by the reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSource {
    label: Option<SmolStr>,
}

impl InputSource {
    /// A source with no label; still enables position tracking.
    pub fn new() -> Self {
        Self::default()
    }

    /// A source labeled with an identity such as a path or coordinate.
    pub fn labeled(label: impl Into<SmolStr>) -> Self {
        Self {
            label: Some(label.into()),
        }
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
