//! Deck outlines built on top of `lopdf`.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::layout::DeckLayout;
use crate::model::{Flashcard, Topic};

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Debug)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed by `lopdf`.
    Parse(lopdf::Error),
    /// A required catalog entry was missing from the document trailer.
    MissingCatalog,
    /// The catalog object was not a dictionary, preventing outline injection.
    InvalidCatalog,
    /// A bookmark targets a page that does not exist in the rendered document.
    MissingPage {
        /// Index of the bookmark whose page is missing.
        entry_index: usize,
        /// The requested (1-indexed) page number that could not be resolved.
        page_number: usize,
    },
}

impl From<lopdf::Error> for BookmarkError {
    fn from(err: lopdf::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<std::io::Error> for BookmarkError {
    fn from(err: std::io::Error) -> Self {
        Self::Parse(err.into())
    }
}

impl std::fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "Failed to parse PDF bytes: {err}"),
            Self::MissingCatalog => write!(f, "PDF catalog entry is missing"),
            Self::InvalidCatalog => write!(f, "PDF catalog entry is not a dictionary"),
            Self::MissingPage {
                entry_index,
                page_number,
            } => write!(
                f,
                "Bookmark {entry_index} refers to missing page {page_number}"
            ),
        }
    }
}

impl std::error::Error for BookmarkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::MissingCatalog | Self::InvalidCatalog | Self::MissingPage { .. } => None,
        }
    }
}

/// A single outline entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bookmark {
    /// Text shown in the viewer's outline panel.
    pub title: String,
    /// 1-indexed target page.
    pub page_number: usize,
}

/// Outline for a deck: the cover, then one entry per card targeting its question page.
///
/// Cards without a title are listed as `Flashcard <n>` (1-indexed).
pub fn deck_bookmarks(
    flashcards: &[Flashcard],
    topic: &Topic,
    layout: &DeckLayout,
) -> Vec<Bookmark> {
    let cover = Bookmark {
        title: topic
            .name()
            .unwrap_or(layout.default_cover_title.as_str())
            .to_owned(),
        page_number: 1,
    };

    let cards = flashcards.iter().enumerate().map(|(index, card)| Bookmark {
        title: match card.title() {
            Some(title) if !title.trim().is_empty() => title.to_owned(),
            _ => format!("Flashcard {}", index + 1),
        },
        page_number: 2 + 2 * index,
    });

    std::iter::once(cover).chain(cards).collect()
}

/// Applies a flat outline tree to the given PDF bytes.
///
/// Each entry becomes an outline item with a `/Dest [page /Fit]` destination.
/// Returns the input unchanged when `entries` is empty.
pub fn apply_bookmarks(
    pdf_bytes: &[u8],
    entries: &[Bookmark],
) -> Result<Vec<u8>, BookmarkError> {
    if entries.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();
    let mut outline_entries = collect_outline_entries(&mut document, entries, &pages)?;

    let outlines_id = document.new_object_id();
    link_outline_entries(outlines_id, &mut document, &mut outline_entries);
    insert_outlines_root(outlines_id, &mut document, &outline_entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
}

fn collect_outline_entries(
    document: &mut Document,
    entries: &[Bookmark],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let page_ref = u32::try_from(entry.page_number)
                .ok()
                .and_then(|number| pages.get(&number).copied())
                .ok_or(BookmarkError::MissingPage {
                    entry_index: index,
                    page_number: entry.page_number,
                })?;

            Ok(OutlineEntry {
                object_id: document.new_object_id(),
                page_ref,
                title: entry.title.clone(),
            })
        })
        .collect()
}

fn link_outline_entries(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &mut [OutlineEntry],
) {
    for index in 0..entries.len() {
        let mut dictionary = Dictionary::new();
        dictionary.set(
            "Title",
            Object::string_literal(entries[index].title.as_str()),
        );
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entries[index].page_ref),
                Object::Name("Fit".into()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));

        if index > 0 {
            dictionary.set("Prev", Object::Reference(entries[index - 1].object_id));
        }
        if index + 1 < entries.len() {
            dictionary.set("Next", Object::Reference(entries[index + 1].object_id));
        }

        document
            .objects
            .insert(entries[index].object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &[OutlineEntry],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name("Outlines".into()));
    dictionary.set("Count", Object::Integer(entries.len() as i64));
    if let Some(first) = entries.first() {
        dictionary.set("First", Object::Reference(first.object_id));
    }
    if let Some(last) = entries.last() {
        dictionary.set("Last", Object::Reference(last.object_id));
    }
    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name("UseOutlines".into()));

    Ok(())
}
