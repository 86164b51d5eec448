//! Font metrics seam.
//!
//! The interface never rasterizes glyphs. It asks a [`FontMetrics`]
//! implementation for advances and line height, all in unscaled font units;
//! callers multiply by the text scale.

use crate::layout::Vec2;
use crate::widget::MultiLineTextDimensions;

/// Metrics of one glyph, in unscaled font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetrics {
    /// Horizontal pen advance.
    pub advance: f32,
    /// Glyph box size.
    pub size: Vec2,
}

/// Glyph used when a character has no metrics.
pub const FALLBACK_GLYPH: char = '?';

/// Per-glyph metrics provided by the host's font system.
pub trait FontMetrics {
    /// Metrics for a character, or `None` if the font lacks it.
    fn glyph(&self, ch: char) -> Option<GlyphMetrics>;

    /// Distance between baselines.
    fn line_height(&self) -> f32;

    /// Height above the baseline.
    fn ascender(&self) -> f32 {
        self.line_height()
    }

    /// Advance of a character, falling back to [`FALLBACK_GLYPH`].
    fn advance(&self, ch: char) -> f32 {
        let ch = if ch == '\t' { ' ' } else { ch };
        self.glyph(ch)
            .or_else(|| self.glyph(FALLBACK_GLYPH))
            .map_or(0.0, |glyph| glyph.advance)
    }

    /// Extent of a single line: summed advances by tallest glyph.
    fn single_line_text_size(&self, text: &str) -> Vec2 {
        text.chars().fold(Vec2::ZERO, |size, ch| {
            let height = self
                .glyph(ch)
                .or_else(|| self.glyph(FALLBACK_GLYPH))
                .map_or(0.0, |glyph| glyph.size.y);
            Vec2::new(size.x + self.advance(ch), size.y.max(height))
        })
    }

    /// Caret index nearest to `x_offset`, measured from the text start in
    /// scaled units. A glyph is passed once the offset crosses its midpoint.
    fn glyph_index_from_x_offset(&self, text: &str, x_offset: f32, scale: f32) -> usize {
        let mut accumulated = 0.0;
        for (index, ch) in text.chars().enumerate() {
            let advance = self.advance(ch) * scale;
            accumulated += advance;
            if accumulated - advance * 0.5 > x_offset {
                return index;
            }
        }
        text.chars().count()
    }

    /// Breaks text into lines at `'\n'` and, with `max_width`, before any
    /// word that would overflow it. `'\r'` is skipped and `'\t'` measures as
    /// a space.
    fn multi_line_text_metadata(&self, text: &str, max_width: Option<f32>) -> MultiLineTextDimensions {
        let chars: Vec<char> = text.chars().collect();
        let line_height = self.line_height();
        let mut dimensions = MultiLineTextDimensions::default();
        let mut line_start = 0;
        let mut x = 0.0;

        let push_line = |dimensions: &mut MultiLineTextDimensions, start, end, width| {
            dimensions.line_breaks.push((start, end));
            dimensions.line_sizes.push(Vec2::new(width, line_height));
        };

        for (index, &ch) in chars.iter().enumerate() {
            match ch {
                '\n' => {
                    push_line(&mut dimensions, line_start, index, x);
                    line_start = index + 1;
                    x = 0.0;
                    continue;
                }
                '\r' => continue,
                _ => {}
            }

            if let Some(max_width) = max_width {
                let starts_word =
                    !ch.is_whitespace() && (index == 0 || chars[index - 1].is_whitespace());
                if starts_word && x > 0.0 {
                    let word_width: f32 = chars[index..]
                        .iter()
                        .take_while(|c| !c.is_whitespace())
                        .map(|&c| self.advance(c))
                        .sum();
                    if x + word_width > max_width {
                        push_line(&mut dimensions, line_start, index, x);
                        line_start = index;
                        x = 0.0;
                    }
                }
            }

            x += self.advance(ch);
        }
        push_line(&mut dimensions, line_start, chars.len(), x);
        dimensions
    }
}

/// Fixed-advance font, useful for tests and tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFont {
    /// Advance of every glyph.
    pub advance: f32,
    /// Height of every glyph.
    pub glyph_height: f32,
    /// Distance between baselines.
    pub line_height: f32,
}

impl MonospaceFont {
    /// Creates a monospace font.
    #[must_use]
    pub const fn new(advance: f32, glyph_height: f32, line_height: f32) -> Self {
        Self {
            advance,
            glyph_height,
            line_height,
        }
    }
}

impl Default for MonospaceFont {
    fn default() -> Self {
        Self::new(10.0, 10.0, 12.0)
    }
}

impl FontMetrics for MonospaceFont {
    fn glyph(&self, ch: char) -> Option<GlyphMetrics> {
        (!ch.is_control()).then(|| GlyphMetrics {
            advance: self.advance,
            size: Vec2::new(self.advance, self.glyph_height),
        })
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_size() {
        let font = MonospaceFont::default();
        assert_eq!(font.single_line_text_size("abc"), Vec2::new(30.0, 10.0));
        assert_eq!(font.single_line_text_size(""), Vec2::ZERO);
    }

    #[test]
    fn test_glyph_index_midpoints() {
        let font = MonospaceFont::default();
        assert_eq!(font.glyph_index_from_x_offset("abcd", 4.0, 1.0), 0);
        assert_eq!(font.glyph_index_from_x_offset("abcd", 6.0, 1.0), 1);
        assert_eq!(font.glyph_index_from_x_offset("abcd", 26.0, 1.0), 3);
        assert_eq!(font.glyph_index_from_x_offset("abcd", 500.0, 1.0), 4);
        assert_eq!(font.glyph_index_from_x_offset("abcd", 12.0, 2.0), 1);
    }

    #[test]
    fn test_word_wrap() {
        let font = MonospaceFont::default();
        let dims = font.multi_line_text_metadata("one two three", Some(70.0));

        assert_eq!(dims.line_breaks, vec![(0, 8), (8, 13)]);
        assert_eq!(dims.line_sizes[0], Vec2::new(80.0, 12.0));
        assert_eq!(dims.line_sizes[1], Vec2::new(50.0, 12.0));
    }

    #[test]
    fn test_newlines_and_control_characters() {
        let font = MonospaceFont::default();
        let dims = font.multi_line_text_metadata("ab\r\ncd\te", None);

        assert_eq!(dims.line_breaks, vec![(0, 3), (4, 8)]);
        assert_eq!(dims.line_sizes[0].x, 20.0);
        assert_eq!(dims.line_sizes[1].x, 40.0);
    }

    #[test]
    fn test_overlong_word_keeps_its_own_line() {
        let font = MonospaceFont::default();
        let dims = font.multi_line_text_metadata("a verylongword", Some(40.0));
        assert_eq!(dims.line_breaks, vec![(0, 2), (2, 14)]);
    }
}
