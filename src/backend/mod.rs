//! Rendering backends that turn composed [`Page`]s into a serialized document.
//!
//! The layout engine never touches PDF primitives directly.  It asks a
//! [`RenderBackend`] for a fresh [`DocumentSink`], embeds a font through it,
//! submits pages in deck order and finally asks the sink to serialize itself.

use std::fmt;

use crate::fonts::{FontMetrics, FontStyle};
use crate::page::Page;

mod pdf;
mod recording;

pub use pdf::{PdfBackend, PdfDocumentSink};
pub use recording::{RecordedDocument, RecordingBackend};

/// Factory for empty documents.
pub trait RenderBackend {
    /// Document type produced by this backend.
    type Document: DocumentSink;

    /// Creates a new, empty document.
    fn create_document(&self) -> Result<Self::Document, BackendError>;

    /// Media type of the bytes produced by [`DocumentSink::save`].
    fn media_type(&self) -> &'static str {
        "application/pdf"
    }
}

/// A document under construction.
pub trait DocumentSink {
    /// Handle returned by [`DocumentSink::embed_font`], usable for measuring text.
    type Font: FontMetrics;

    /// Embeds a font face so text blocks using `style` can be drawn.
    fn embed_font(&mut self, style: FontStyle) -> Result<Self::Font, BackendError>;

    /// Appends a page: the background rectangle first, then every text block.
    fn add_page(&mut self, page: &Page) -> Result<(), BackendError>;

    /// Number of pages appended so far.
    fn page_count(&self) -> usize;

    /// Serializes the finished document, consuming it.
    fn save(self) -> Result<Vec<u8>, BackendError>;
}

/// Failures reported by a rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendError {
    /// The requested font face could not be embedded.
    Font {
        /// PostScript name of the requested face.
        font: &'static str,
        /// Backend-specific description.
        reason: String,
    },
    /// A page referenced a font that was never embedded.
    FontNotEmbedded(&'static str),
    /// A page does not match the size the document was created with.
    PageSize {
        expected: (f64, f64),
        found: (f64, f64),
    },
    /// The document could not be serialized.
    Save(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Font { font, reason } => write!(f, "Failed to embed font {font}: {reason}"),
            Self::FontNotEmbedded(font) => {
                write!(f, "Font {font} is used before it was embedded")
            }
            Self::PageSize { expected, found } => write!(
                f,
                "Page size {}x{} does not match the document page size {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::Save(reason) => write!(f, "Failed to serialize document: {reason}"),
        }
    }
}

impl std::error::Error for BackendError {}
