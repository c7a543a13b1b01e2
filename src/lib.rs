//! Printable flashcard decks.
//!
//! A deck is one cover page built from a [`model::Topic`], followed by a
//! question page and an answer page for every [`model::Flashcard`].  Pages are
//! laid out with greedy text wrapping against font metrics ([`wrap`],
//! [`page`]), submitted to a [`backend::RenderBackend`] by the
//! [`builder::DeckBuilder`], and exported into a [`export::ResourceStore`].
//!
//! ```no_run
//! use flashdeck::backend::PdfBackend;
//! use flashdeck::builder::DeckBuilder;
//! use flashdeck::export::ResourceStore;
//! use flashdeck::model::{Flashcard, Topic};
//!
//! let cards = vec![Flashcard::new()
//!     .with_title("Cell")
//!     .with_question("What is a cell?")
//!     .with_answer("Basic unit of life.")];
//! let topic = Topic::new().with_name("Biology");
//!
//! let mut store = ResourceStore::new();
//! let handle = DeckBuilder::new()
//!     .build_document(&PdfBackend::new(), &cards, &topic, &mut store)
//!     .expect("deck renders");
//! let pdf = store.resolve(handle.as_str()).expect("registered");
//! assert_eq!(pdf.media_type(), "application/pdf");
//! ```

pub mod backend;
pub mod builder;
pub mod export;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod page;
pub mod wrap;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;
