//! Layout settings shared by every page of a deck.

/// Width of every deck page, in points.
pub const PAGE_WIDTH: f64 = 400.0;
/// Height of every deck page, in points.
pub const PAGE_HEIGHT: f64 = 300.0;

/// An RGB color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    /// Dark slate used behind covers and questions.
    pub const SLATE: Rgb = Rgb::new(0.11, 0.14, 0.2);
    /// Muted green used behind answers.
    pub const SAGE: Rgb = Rgb::new(0.38, 0.58, 0.42);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }
}

/// Geometry, typography and wording applied while composing deck pages.
///
/// The defaults reproduce the standard 400 x 300 point card layout.
#[derive(Clone, Debug, PartialEq)]
pub struct DeckLayout {
    pub page_width: f64,
    pub page_height: f64,
    /// Horizontal inset of wrapped body text; also offsets the title from the top edge.
    pub margin: f64,
    pub title_font_size: f64,
    pub body_font_size: f64,
    /// Vertical distance between consecutive body lines.
    pub line_height: f64,
    /// Distance between the top margin and the title baseline.
    pub title_drop: f64,
    pub cover_background: Rgb,
    pub question_background: Rgb,
    pub answer_background: Rgb,
    pub text_color: Rgb,
    /// Cover title used when the topic has no name.
    pub default_cover_title: String,
    /// Title printed on every answer page.
    pub answer_title: String,
}

impl Default for DeckLayout {
    fn default() -> Self {
        Self {
            page_width: PAGE_WIDTH,
            page_height: PAGE_HEIGHT,
            margin: 20.0,
            title_font_size: 20.0,
            body_font_size: 14.0,
            line_height: 18.0,
            title_drop: 30.0,
            cover_background: Rgb::SLATE,
            question_background: Rgb::SLATE,
            answer_background: Rgb::SAGE,
            text_color: Rgb::WHITE,
            default_cover_title: "Tópico".to_owned(),
            answer_title: "Resposta".to_owned(),
        }
    }
}

impl DeckLayout {
    /// Maximum width available to a wrapped body line.
    pub fn body_width(&self) -> f64 {
        self.page_width - self.margin * 2.0
    }

    /// Baseline of the title, measured from the bottom edge.
    pub fn title_y(&self) -> f64 {
        self.page_height - self.margin - self.title_drop
    }

    /// Baseline of the body line at `index`, stepping down from mid-page.
    pub fn body_line_y(&self, index: usize) -> f64 {
        self.page_height / 2.0 - index as f64 * self.line_height
    }

    /// Left edge that horizontally centers a run of the given width.
    pub fn centered_x(&self, text_width: f64) -> f64 {
        (self.page_width - text_width) / 2.0
    }
}
