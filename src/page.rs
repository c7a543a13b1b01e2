//! Page descriptions and their composition from deck records.
//!
//! A [`Page`] is a backend-neutral description: a background fill and a list of
//! positioned single-line [`TextBlock`]s.  All coordinates use a bottom-left
//! origin in points.

use crate::fonts::{FontMetrics, FontStyle};
use crate::layout::{DeckLayout, Rgb};
use crate::model::{Flashcard, Topic};
use crate::wrap::wrap_text;

/// The three kinds of pages a deck is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageKind {
    Cover,
    Question,
    Answer,
}

impl PageKind {
    /// Background fill for pages of this kind.
    pub fn background(self, layout: &DeckLayout) -> Rgb {
        match self {
            PageKind::Cover => layout.cover_background,
            PageKind::Question => layout.question_background,
            PageKind::Answer => layout.answer_background,
        }
    }
}

/// The record a page is composed from.
#[derive(Clone, Copy, Debug)]
pub enum PageSource<'a> {
    Cover(&'a Topic),
    Question(&'a Flashcard),
    Answer(&'a Flashcard),
}

impl<'a> PageSource<'a> {
    pub fn kind(&self) -> PageKind {
        match self {
            PageSource::Cover(_) => PageKind::Cover,
            PageSource::Question(_) => PageKind::Question,
            PageSource::Answer(_) => PageKind::Answer,
        }
    }

    /// Title text, with absent values replaced by their defaults.
    pub fn title(&self, layout: &'a DeckLayout) -> &'a str {
        match *self {
            PageSource::Cover(topic) => topic
                .name()
                .unwrap_or(layout.default_cover_title.as_str()),
            PageSource::Question(card) => card.title().unwrap_or_default(),
            PageSource::Answer(_) => layout.answer_title.as_str(),
        }
    }

    /// Body text, empty when absent.
    pub fn body(&self) -> &'a str {
        match *self {
            PageSource::Cover(topic) => topic.description().unwrap_or_default(),
            PageSource::Question(card) => card.question().unwrap_or_default(),
            PageSource::Answer(card) => card.answer().unwrap_or_default(),
        }
    }
}

/// A single positioned line of text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub text: String,
    pub font: FontStyle,
    pub size: f64,
    pub x: f64,
    pub y: f64,
    pub color: Rgb,
}

/// A fully laid out deck page.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    kind: PageKind,
    width: f64,
    height: f64,
    background: Rgb,
    title: TextBlock,
    body: Vec<TextBlock>,
}

impl Page {
    pub fn kind(&self) -> PageKind {
        self.kind
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Fill color of the full-page background rectangle.
    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn title(&self) -> &TextBlock {
        &self.title
    }

    /// Wrapped body lines, top to bottom.
    pub fn body(&self) -> &[TextBlock] {
        &self.body
    }

    /// All text blocks in drawing order: the title first, then the body lines.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        std::iter::once(&self.title).chain(self.body.iter())
    }
}

/// Lays out one page for `source` using `font` for every measurement.
///
/// `font_style` is recorded on each block so the backend can select the face
/// it embedded for `font`.
pub fn compose_page<F>(
    source: PageSource<'_>,
    font: &F,
    font_style: FontStyle,
    layout: &DeckLayout,
) -> Page
where
    F: FontMetrics + ?Sized,
{
    let kind = source.kind();

    let title_text = source.title(layout);
    let title_width = font.width_of_text_at_size(title_text, layout.title_font_size);
    let title = TextBlock {
        text: title_text.to_owned(),
        font: font_style,
        size: layout.title_font_size,
        x: layout.centered_x(title_width),
        y: layout.title_y(),
        color: layout.text_color,
    };

    let body = wrap_text(
        source.body(),
        layout.body_width(),
        font,
        layout.body_font_size,
    )
    .into_iter()
    .enumerate()
    .map(|(index, line)| {
        let width = font.width_of_text_at_size(&line, layout.body_font_size);
        TextBlock {
            x: layout.centered_x(width),
            y: layout.body_line_y(index),
            text: line,
            font: font_style,
            size: layout.body_font_size,
            color: layout.text_color,
        }
    })
    .collect();

    Page {
        kind,
        width: layout.page_width,
        height: layout.page_height,
        background: kind.background(layout),
        title,
        body,
    }
}
