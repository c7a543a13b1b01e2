//! PDF output through `printpdf`.

use std::collections::HashMap;
use std::io::BufWriter;

use log::{debug, trace};
use printpdf::indices::{PdfLayerIndex, PdfPageIndex};
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, Point,
};

use super::{BackendError, DocumentSink, RenderBackend};
use crate::fonts::{FontStyle, StandardFont};
use crate::layout::{DeckLayout, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::page::Page;

/// Default document title written to the PDF metadata.
pub const DEFAULT_DOCUMENT_TITLE: &str = "Flashcards";

const LAYER_NAME: &str = "Layer 1";

/// Converts PDF points to the millimetres `printpdf` expects.
fn mm(points: f64) -> Mm {
    Mm(points * 25.4 / 72.0)
}

fn fill(color: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(color.r, color.g, color.b, None))
}

fn builtin(style: FontStyle) -> BuiltinFont {
    match style {
        FontStyle::HelveticaBold => BuiltinFont::HelveticaBold,
    }
}

/// Backend producing PDF bytes with the base-14 fonts.
#[derive(Clone, Debug)]
pub struct PdfBackend {
    title: String,
    page_width: f64,
    page_height: f64,
}

impl Default for PdfBackend {
    fn default() -> Self {
        Self {
            title: DEFAULT_DOCUMENT_TITLE.to_owned(),
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
        }
    }
}

impl PdfBackend {
    /// Creates a backend for 400 x 300 point decks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title and returns the updated backend.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the size of the first page, in points.
    ///
    /// `printpdf` creates the first page together with the document, so its
    /// size must be known up front and must match the first submitted page.
    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Creates a backend whose first page matches `layout`.
    pub fn for_layout(layout: &DeckLayout) -> Self {
        Self::default().with_page_size(layout.page_width, layout.page_height)
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl RenderBackend for PdfBackend {
    type Document = PdfDocumentSink;

    fn create_document(&self) -> Result<Self::Document, BackendError> {
        let (document, page, layer) = PdfDocument::new(
            self.title.as_str(),
            mm(self.page_width),
            mm(self.page_height),
            LAYER_NAME,
        );

        Ok(PdfDocumentSink {
            document,
            initial_page: Some(InitialPage {
                page,
                layer,
                width: self.page_width,
                height: self.page_height,
            }),
            fonts: HashMap::new(),
            pages: 0,
        })
    }
}

struct InitialPage {
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    width: f64,
    height: f64,
}

/// A PDF document under construction.
pub struct PdfDocumentSink {
    document: PdfDocumentReference,
    initial_page: Option<InitialPage>,
    fonts: HashMap<FontStyle, IndirectFontRef>,
    pages: usize,
}

impl PdfDocumentSink {
    fn next_page(&mut self, page: &Page) -> Result<(PdfPageIndex, PdfLayerIndex), BackendError> {
        match self.initial_page.take() {
            Some(initial) => {
                if initial.width != page.width() || initial.height != page.height() {
                    return Err(BackendError::PageSize {
                        expected: (initial.width, initial.height),
                        found: (page.width(), page.height()),
                    });
                }
                Ok((initial.page, initial.layer))
            }
            None => Ok(self
                .document
                .add_page(mm(page.width()), mm(page.height()), LAYER_NAME)),
        }
    }
}

impl DocumentSink for PdfDocumentSink {
    type Font = StandardFont;

    fn embed_font(&mut self, style: FontStyle) -> Result<Self::Font, BackendError> {
        let reference =
            self.document
                .add_builtin_font(builtin(style))
                .map_err(|err| BackendError::Font {
                    font: style.postscript_name(),
                    reason: err.to_string(),
                })?;
        debug!("Embedded builtin font {}", style.postscript_name());
        self.fonts.insert(style, reference);
        Ok(style.metrics())
    }

    fn add_page(&mut self, page: &Page) -> Result<(), BackendError> {
        let (page_index, layer_index) = self.next_page(page)?;
        let layer = self.document.get_page(page_index).get_layer(layer_index);

        let (width, height) = (page.width(), page.height());
        layer.set_fill_color(fill(page.background()));
        layer.add_shape(Line {
            points: vec![
                (Point::new(mm(0.0), mm(0.0)), false),
                (Point::new(mm(width), mm(0.0)), false),
                (Point::new(mm(width), mm(height)), false),
                (Point::new(mm(0.0), mm(height)), false),
            ],
            is_closed: true,
            has_fill: true,
            has_stroke: false,
            is_clipping_path: false,
        });

        for block in page.text_blocks() {
            let font = self
                .fonts
                .get(&block.font)
                .ok_or(BackendError::FontNotEmbedded(block.font.postscript_name()))?;
            layer.set_fill_color(fill(block.color));
            layer.use_text(block.text.as_str(), block.size, mm(block.x), mm(block.y), font);
        }

        self.pages += 1;
        trace!("Rendered {:?} page #{}", page.kind(), self.pages);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    fn save(self) -> Result<Vec<u8>, BackendError> {
        let mut writer = BufWriter::new(Vec::new());
        self.document
            .save(&mut writer)
            .map_err(|err| BackendError::Save(err.to_string()))?;
        writer
            .into_inner()
            .map_err(|err| BackendError::Save(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{mm, PdfBackend};
    use crate::backend::{BackendError, DocumentSink, RenderBackend};
    use crate::fonts::FontStyle;
    use crate::layout::DeckLayout;
    use crate::model::Topic;
    use crate::page::{compose_page, PageSource};

    #[test]
    fn converts_points_to_millimetres() {
        assert!((mm(72.0).0 - 25.4).abs() < 1e-9);
    }

    #[test]
    fn reuses_initial_page_then_appends() {
        let mut document = PdfBackend::new().create_document().expect("create document");
        let font = document
            .embed_font(FontStyle::HelveticaBold)
            .expect("embed font");
        let topic = Topic::new().with_name("Biology");
        let page = compose_page(
            PageSource::Cover(&topic),
            &font,
            FontStyle::HelveticaBold,
            &DeckLayout::default(),
        );

        document.add_page(&page).expect("first page");
        document.add_page(&page).expect("second page");
        assert_eq!(document.page_count(), 2);

        let bytes = document.save().expect("save");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn rejects_first_page_of_unexpected_size() {
        let backend = PdfBackend::new().with_page_size(200.0, 100.0);
        let mut document = backend.create_document().expect("create document");
        let font = document
            .embed_font(FontStyle::HelveticaBold)
            .expect("embed font");

        let topic = Topic::new();
        let page = compose_page(
            PageSource::Cover(&topic),
            &font,
            FontStyle::HelveticaBold,
            &DeckLayout::default(),
        );

        let err = document.add_page(&page).unwrap_err();
        assert!(matches!(err, BackendError::PageSize { .. }));
    }

    #[test]
    fn text_without_embedded_font_is_rejected() {
        let mut document = PdfBackend::new().create_document().expect("create document");
        let font = FontStyle::HelveticaBold.metrics();
        let topic = Topic::new().with_name("Biology");
        let page = compose_page(
            PageSource::Cover(&topic),
            &font,
            FontStyle::HelveticaBold,
            &DeckLayout::default(),
        );

        let err = document.add_page(&page).unwrap_err();
        assert_eq!(err, BackendError::FontNotEmbedded("Helvetica-Bold"));
        assert_eq!(document.page_count(), 0);
    }
}
