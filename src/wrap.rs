//! Greedy word-level line breaking.

use log::warn;

use crate::fonts::FontMetrics;

/// Breaks `text` into lines whose measured width stays below `max_width`.
///
/// Words are the pieces between single spaces.  Each word is appended to the
/// current line while the measured result is strictly narrower than
/// `max_width`; otherwise the current line is committed and the word starts a
/// new one.  A word wider than `max_width` on its own is kept intact and
/// overflows its line.
///
/// An empty `text` yields no lines.
pub fn wrap_text<F>(text: &str, max_width: f64, font: &F, font_size: f64) -> Vec<String>
where
    F: FontMetrics + ?Sized,
{
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split(' ') {
        let test_line = if current_line.is_empty() {
            word.to_owned()
        } else {
            format!("{current_line} {word}")
        };

        if font.width_of_text_at_size(&test_line, font_size) < max_width {
            current_line = test_line;
        } else {
            lines.push(std::mem::replace(&mut current_line, word.to_owned()));
            if font.width_of_text_at_size(word, font_size) >= max_width {
                warn!(
                    "word of {} chars overflows the {max_width} wide line",
                    word.chars().count()
                );
            }
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}
