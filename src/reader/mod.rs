//! The public reading façade.
//!
//! [`DescriptorReader`] normalizes the three physical input shapes - named
//! file, open byte stream, already-decoded character stream - into one
//! internal read path:
//!
//! ```text
//! path / bytes ──► EncodingSniffer ──► &str ──► XmlCursor
//!                                                  │
//!                    transform_context present? ──► SourceTransformer
//!                                                  │
//!                      input_source present? ──► decode (plain | tracked)
//!                                                  │
//!                                                  ▼
//!                                              Document
//! ```
//!
//! Stream ownership is explicit per overload: `read_path` opens the file
//! itself and the whole chain is released when the call returns, on every
//! exit path; `read_bytes` borrows the caller's stream and releases only
//! its own staging buffer; `read_str` borrows. Closing a caller-owned
//! stream from another thread while a read is in progress is undefined and
//! remains caller responsibility.
//!
//! The reader holds only immutable configuration, so one instance may be
//! shared freely across threads; each call owns its own cursor and output
//! tree.

mod encoding;
mod options;

pub use encoding::{EncodingSniffer, XmlDeclSniffer};
pub use options::ReadOptions;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, trace};

use crate::cursor::{TokenCursor, XmlCursor};
use crate::decode;
use crate::document::Document;
use crate::error::ReadError;
use crate::schema::Schema;
use crate::transform::{IdentityTransformer, SourceTransformer, TransformError};

/// Reads descriptor documents against one schema.
pub struct DescriptorReader {
    schema: Schema,
    transformer: Box<dyn SourceTransformer>,
    sniffer: Box<dyn EncodingSniffer>,
}

impl DescriptorReader {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            transformer: Box::new(IdentityTransformer),
            sniffer: Box::new(XmlDeclSniffer),
        }
    }

    /// Install a source transformer. It only runs for reads whose options
    /// carry a transform context.
    pub fn with_transformer(mut self, transformer: impl SourceTransformer + 'static) -> Self {
        self.transformer = Box::new(transformer);
        self
    }

    /// Replace the encoding sniffer used by the byte-stream and file
    /// overloads.
    pub fn with_sniffer(mut self, sniffer: impl EncodingSniffer + 'static) -> Self {
        self.sniffer = Box::new(sniffer);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Read a descriptor from a named file.
    ///
    /// On success the returned document's origin handle is set to `path`.
    pub fn read_path(
        &self,
        path: impl AsRef<Path>,
        options: &ReadOptions,
    ) -> Result<Document, ReadError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(ReadError::InvalidArgument("path must not be empty"));
        }
        debug!(path = %path.display(), "reading descriptor file");
        let bytes = {
            let mut file = File::open(path)
                .map_err(|e| ReadError::io(format!("unable to open {}", path.display()), e))?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)
                .map_err(|e| ReadError::io(format!("unable to read {}", path.display()), e))?;
            bytes
        };
        let text = self
            .sniffer
            .decode(&bytes)
            .map_err(|e| ReadError::io(format!("unable to decode {}", path.display()), e))?;
        let mut document = self.read_text(&text, Some(path), options)?;
        document.set_origin(path.to_path_buf());
        Ok(document)
    }

    /// Read a descriptor from an open byte stream.
    ///
    /// The stream is drained but stays owned by the caller; only the
    /// reader's own staging buffer is released here.
    pub fn read_bytes<R: Read + ?Sized>(
        &self,
        input: &mut R,
        options: &ReadOptions,
    ) -> Result<Document, ReadError> {
        let mut bytes = Vec::new();
        input
            .read_to_end(&mut bytes)
            .map_err(|e| ReadError::io("unable to read descriptor stream", e))?;
        let text = self
            .sniffer
            .decode(&bytes)
            .map_err(|e| ReadError::io("unable to decode descriptor stream", e))?;
        self.read_text(&text, None, options)
    }

    /// Read a descriptor from an already-decoded character stream.
    pub fn read_str(&self, input: &str, options: &ReadOptions) -> Result<Document, ReadError> {
        self.read_text(input, None, options)
    }

    fn read_text(
        &self,
        text: &str,
        path: Option<&Path>,
        options: &ReadOptions,
    ) -> Result<Document, ReadError> {
        let mut cursor: Box<dyn TokenCursor + '_> = Box::new(XmlCursor::new(text));
        if let Some(context) = options.transform_context.as_deref() {
            trace!("applying source transformer");
            cursor = self
                .transformer
                .transform(cursor, path, context)
                .map_err(|e| match e {
                    TransformError::Malformed(err) => ReadError::Parse(err.into()),
                    failed => ReadError::io("unable to transform descriptor stream", failed),
                })?;
        }
        let tracked = options.input_source.is_some();
        debug!(strict = options.strict, tracked, "decoding descriptor");
        let root = if tracked {
            decode::decode_tracked(cursor.as_mut(), &self.schema, options.strict)
        } else {
            decode::decode_plain(cursor.as_mut(), &self.schema, options.strict)
        }
        .map_err(|e| ReadError::Parse(e.into()))?;
        Ok(Document::new(root, options.input_source.clone()))
    }
}
