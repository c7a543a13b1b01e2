//! Deck assembly: composes every page in deck order and exports the result.

use log::{debug, error};

use crate::backend::{BackendError, DocumentSink, RenderBackend};
use crate::export::{self, ExportError, ResourceHandle, ResourceStore};
use crate::fonts::FontStyle;
use crate::layout::DeckLayout;
use crate::model::{Flashcard, Topic};
use crate::page::{compose_page, Page, PageSource};

#[cfg(feature = "bookmarks")]
use crate::bookmarks;

/// Builder for flashcard decks.
///
/// A deck is one cover page followed by a question page and an answer page for
/// every card, in input order.
#[derive(Clone, Debug, Default)]
pub struct DeckBuilder {
    layout: DeckLayout,
    font: FontStyle,
    #[cfg(feature = "bookmarks")]
    bookmarks: bool,
}

impl DeckBuilder {
    /// Creates a builder with the default card layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the layout settings.
    pub fn with_layout(mut self, layout: DeckLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Selects the face used for every title and body line.
    pub fn with_font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    /// Adds a document outline (cover plus one entry per card) to PDF output.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    pub fn layout(&self) -> &DeckLayout {
        &self.layout
    }

    /// Composes the deck pages without a backend, measuring with the built-in metrics.
    pub fn compose(&self, flashcards: &[Flashcard], topic: &Topic) -> Vec<Page> {
        let font = self.font.metrics();
        deck_sources(flashcards, topic)
            .map(|source| compose_page(source, &font, self.font, &self.layout))
            .collect()
    }

    /// Builds the deck into a new backend document.
    ///
    /// The font is embedded once and shared by every page.  The returned
    /// document holds `1 + 2 * flashcards.len()` pages.
    pub fn assemble<B: RenderBackend>(
        &self,
        backend: &B,
        flashcards: &[Flashcard],
        topic: &Topic,
    ) -> Result<B::Document, BackendError> {
        let mut document = backend.create_document()?;
        let font = document.embed_font(self.font)?;
        debug!(
            "Assembling deck with {} flashcards ({} pages)",
            flashcards.len(),
            1 + 2 * flashcards.len()
        );

        for source in deck_sources(flashcards, topic) {
            let page = compose_page(source, &font, self.font, &self.layout);
            document.add_page(&page)?;
        }

        Ok(document)
    }

    /// Assembles and serializes the deck, returning the document bytes.
    pub fn render<B: RenderBackend>(
        &self,
        backend: &B,
        flashcards: &[Flashcard],
        topic: &Topic,
    ) -> Result<Vec<u8>, ExportError> {
        let document = self.assemble(backend, flashcards, topic).map_err(|err| {
            error!("Failed to assemble flashcard deck: {err}");
            ExportError::Assemble(err)
        })?;
        let bytes = export::serialize(document)?;

        #[cfg(feature = "bookmarks")]
        let bytes = if self.bookmarks && backend.media_type() == "application/pdf" {
            let entries = bookmarks::deck_bookmarks(flashcards, topic, &self.layout);
            bookmarks::apply_bookmarks(&bytes, &entries).map_err(|err| {
                error!("Failed to add deck bookmarks: {err}");
                ExportError::Bookmarks(err)
            })?
        } else {
            bytes
        };

        Ok(bytes)
    }

    /// Renders the deck and registers it in `store`.
    ///
    /// Every failure is logged and returned as an [`ExportError`]; nothing is
    /// registered in that case.
    pub fn build_document<B: RenderBackend>(
        &self,
        backend: &B,
        flashcards: &[Flashcard],
        topic: &Topic,
        store: &mut ResourceStore,
    ) -> Result<ResourceHandle, ExportError> {
        let bytes = self.render(backend, flashcards, topic)?;
        Ok(export::register(bytes, backend.media_type(), store))
    }

    /// Like [`DeckBuilder::build_document`], but reports failure as an empty string.
    pub fn build_document_url<B: RenderBackend>(
        &self,
        backend: &B,
        flashcards: &[Flashcard],
        topic: &Topic,
        store: &mut ResourceStore,
    ) -> String {
        self.build_document(backend, flashcards, topic, store)
            .map(ResourceHandle::into_string)
            .unwrap_or_default()
    }
}

/// Page sources in deck order: cover, then question and answer for each card.
fn deck_sources<'a>(
    flashcards: &'a [Flashcard],
    topic: &'a Topic,
) -> impl Iterator<Item = PageSource<'a>> {
    std::iter::once(PageSource::Cover(topic)).chain(
        flashcards
            .iter()
            .flat_map(|card| [PageSource::Question(card), PageSource::Answer(card)]),
    )
}
