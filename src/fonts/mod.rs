//! Font identifiers and text measurement.
//!
//! Layout only needs one capability from a font: the advance width of a string
//! at a given size.  [`FontMetrics`] captures that, and [`StandardFont`]
//! implements it for the PDF base-14 Helvetica-Bold face using the published
//! AFM advance widths, so no font file has to be present on disk.

/// Units per em used by the base-14 AFM width tables.
const UNITS_PER_EM: f64 = 1000.0;

/// Width used for characters outside the Latin-1 range covered by the table.
const FALLBACK_WIDTH: u16 = 556;

/// Text measurement capability consumed by the layout engine.
pub trait FontMetrics {
    /// Returns the rendered width of `text` at `size`, in the same units as `size`.
    fn width_of_text_at_size(&self, text: &str, size: f64) -> f64;
}

impl<T: FontMetrics + ?Sized> FontMetrics for &T {
    fn width_of_text_at_size(&self, text: &str, size: f64) -> f64 {
        (**self).width_of_text_at_size(text, size)
    }
}

/// Font faces a backend can be asked to embed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Sans-serif bold face (PDF base-14 `Helvetica-Bold`).
    #[default]
    HelveticaBold,
}

impl FontStyle {
    /// PostScript name of the face.
    pub fn postscript_name(self) -> &'static str {
        match self {
            FontStyle::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Returns the built-in metrics for this face.
    pub fn metrics(self) -> StandardFont {
        StandardFont::new(self)
    }
}

/// Built-in metrics for a base-14 face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardFont {
    style: FontStyle,
}

impl StandardFont {
    pub fn new(style: FontStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Advance width of a single character in 1/1000 em.
    pub fn char_width(&self, ch: char) -> u16 {
        match self.style {
            FontStyle::HelveticaBold => helvetica_bold_width(ch),
        }
    }
}

impl FontMetrics for StandardFont {
    fn width_of_text_at_size(&self, text: &str, size: f64) -> f64 {
        let units: u32 = text.chars().map(|ch| u32::from(self.char_width(ch))).sum();
        f64::from(units) * size / UNITS_PER_EM
    }
}

/// Helvetica-Bold advance widths for U+0020..=U+007E.
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    333, 333, 584, 584, 584, 611, 975, // ':'..'@'
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    333, 278, 333, 584, 556, 333, // '['..'`'
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // 'a'..'m'
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // 'n'..'z'
    389, 280, 389, 584, // '{'..'~'
];

fn helvetica_bold_width(ch: char) -> u16 {
    let code = ch as u32;
    match code {
        0x20..=0x7E => HELVETICA_BOLD_ASCII[(code - 0x20) as usize],
        0xA0 => 278,
        0xA1 => 333,
        0xA2..=0xA5 => 556,
        0xA6 => 280,
        0xA7 => 556,
        0xA8 => 333,
        0xA9 => 737,
        0xAA => 370,
        0xAB => 556,
        0xAC => 584,
        0xAD => 333,
        0xAE => 737,
        0xAF => 333,
        0xB0 => 400,
        0xB1 => 584,
        0xB2 | 0xB3 => 333,
        0xB4 => 333,
        0xB5 => 611,
        0xB6 => 556,
        0xB7 => 278,
        0xB8 => 333,
        0xB9 => 333,
        0xBA => 365,
        0xBB => 556,
        0xBC..=0xBE => 834,
        0xBF => 611,
        0xC0..=0xC5 => 722,
        0xC6 => 1000,
        0xC7 => 722,
        0xC8..=0xCB => 667,
        0xCC..=0xCF => 278,
        0xD0 | 0xD1 => 722,
        0xD2..=0xD6 => 778,
        0xD7 => 584,
        0xD8 => 778,
        0xD9..=0xDC => 722,
        0xDD | 0xDE => 667,
        0xDF => 611,
        0xE0..=0xE5 => 556,
        0xE6 => 889,
        0xE7..=0xEB => 556,
        0xEC..=0xEF => 278,
        0xF0 | 0xF1 => 611,
        0xF2..=0xF6 => 611,
        0xF7 => 584,
        0xF8..=0xFC => 611,
        0xFD => 556,
        0xFE => 611,
        0xFF => 556,
        _ => FALLBACK_WIDTH,
    }
}

#[cfg(test)]
mod tests {
    use super::{FontMetrics, FontStyle, StandardFont};

    #[test]
    fn measures_ascii_with_afm_widths() {
        let font = StandardFont::new(FontStyle::HelveticaBold);
        // H(722) + i(278) = 1000 units -> exactly one em
        assert_eq!(font.width_of_text_at_size("Hi", 10.0), 10.0);
        assert_eq!(font.width_of_text_at_size("", 20.0), 0.0);
    }

    #[test]
    fn measures_latin1_accents() {
        let font = FontStyle::HelveticaBold.metrics();
        assert_eq!(font.char_width('ó'), font.char_width('o'));
        assert_eq!(font.char_width('É'), font.char_width('E'));
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let font = FontStyle::HelveticaBold.metrics();
        let small = font.width_of_text_at_size("Resposta", 10.0);
        let large = font.width_of_text_at_size("Resposta", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-9);
    }

    #[test]
    fn unknown_characters_use_fallback_width() {
        let font = FontStyle::HelveticaBold.metrics();
        assert_eq!(font.char_width('\u{4e2d}'), 556);
    }
}
