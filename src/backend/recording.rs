//! In-memory backend that keeps the submitted pages.
//!
//! Useful wherever the composed layout matters more than the PDF bytes:
//! previews, tests, and golden comparisons.  Serialization produces a stable
//! plain-text listing of every page and text block.

use std::fmt::Write as _;

use super::{BackendError, DocumentSink, RenderBackend};
use crate::fonts::{FontStyle, StandardFont};
use crate::page::Page;

/// Backend whose documents record pages instead of rendering them.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    fail_font: bool,
    fail_save: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every document fail when asked to embed a font.
    pub fn failing_font() -> Self {
        Self {
            fail_font: true,
            ..Self::default()
        }
    }

    /// Makes every document fail to serialize.
    pub fn failing_save() -> Self {
        Self {
            fail_save: true,
            ..Self::default()
        }
    }
}

impl RenderBackend for RecordingBackend {
    type Document = RecordedDocument;

    fn create_document(&self) -> Result<Self::Document, BackendError> {
        Ok(RecordedDocument {
            pages: Vec::new(),
            fonts: Vec::new(),
            fail_font: self.fail_font,
            fail_save: self.fail_save,
        })
    }

    fn media_type(&self) -> &'static str {
        "text/plain"
    }
}

/// Pages collected by a [`RecordingBackend`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedDocument {
    pages: Vec<Page>,
    fonts: Vec<FontStyle>,
    fail_font: bool,
    fail_save: bool,
}

impl RecordedDocument {
    /// Pages in submission order.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Font faces embedded so far, in embedding order.
    pub fn fonts(&self) -> &[FontStyle] {
        &self.fonts
    }

    /// Renders the stable textual listing returned by [`DocumentSink::save`].
    pub fn listing(&self) -> String {
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            let bg = page.background();
            let _ = writeln!(
                out,
                "page {} {:?} {}x{} bg({:.2},{:.2},{:.2})",
                index + 1,
                page.kind(),
                page.width(),
                page.height(),
                bg.r,
                bg.g,
                bg.b
            );
            for block in page.text_blocks() {
                let _ = writeln!(
                    out,
                    "  text {} {} at ({:.3},{:.3}) {:?}",
                    block.font.postscript_name(),
                    block.size,
                    block.x,
                    block.y,
                    block.text
                );
            }
        }
        out
    }
}

impl DocumentSink for RecordedDocument {
    type Font = StandardFont;

    fn embed_font(&mut self, style: FontStyle) -> Result<Self::Font, BackendError> {
        if self.fail_font {
            return Err(BackendError::Font {
                font: style.postscript_name(),
                reason: "font embedding disabled".to_owned(),
            });
        }
        self.fonts.push(style);
        Ok(style.metrics())
    }

    fn add_page(&mut self, page: &Page) -> Result<(), BackendError> {
        if let Some(block) = page
            .text_blocks()
            .find(|block| !self.fonts.contains(&block.font))
        {
            return Err(BackendError::FontNotEmbedded(block.font.postscript_name()));
        }
        self.pages.push(page.clone());
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save(self) -> Result<Vec<u8>, BackendError> {
        if self.fail_save {
            return Err(BackendError::Save("serialization disabled".to_owned()));
        }
        Ok(self.listing().into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::RecordingBackend;
    use crate::backend::{BackendError, DocumentSink, RenderBackend};
    use crate::fonts::FontStyle;
    use crate::layout::DeckLayout;
    use crate::model::Flashcard;
    use crate::page::{compose_page, PageSource};

    #[test]
    fn listing_describes_every_block() {
        let mut document = RecordingBackend::new().create_document().expect("document");
        let font = document.embed_font(FontStyle::HelveticaBold).expect("font");
        let card = Flashcard::new().with_answer("Basic unit of life.");
        let page = compose_page(
            PageSource::Answer(&card),
            &font,
            FontStyle::HelveticaBold,
            &DeckLayout::default(),
        );
        document.add_page(&page).expect("add page");

        let listing = String::from_utf8(document.save().expect("save")).expect("utf-8");
        assert!(listing.starts_with("page 1 Answer 400x300 bg(0.38,0.58,0.42)"));
        assert!(listing.contains("\"Resposta\""));
        assert!(listing.contains("\"Basic unit of life.\""));
    }

    #[test]
    fn failing_save_reports_an_error() {
        let document = RecordingBackend::failing_save()
            .create_document()
            .expect("document");
        assert!(matches!(document.save(), Err(BackendError::Save(_))));
    }

    #[test]
    fn failing_font_reports_an_error() {
        let mut document = RecordingBackend::failing_font()
            .create_document()
            .expect("document");
        let err = document.embed_font(FontStyle::HelveticaBold).unwrap_err();
        assert!(matches!(err, BackendError::Font { .. }));
    }
}
