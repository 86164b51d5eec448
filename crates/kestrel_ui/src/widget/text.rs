//! Text payloads and caret editing.
//!
//! Caret positions count characters, not bytes.

use crate::font::FontMetrics;
use crate::layout::Vec2;
use crate::style::Color;

/// Horizontal text alignment within a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlignment {
    /// Flush with the left edge.
    Left,
    /// Centred.
    #[default]
    Center,
    /// Flush with the right edge.
    Right,
}

/// Default text size, as a fraction of the text scale.
pub const DEFAULT_TEXT_SIZE: f32 = 0.3;

/// Single-line text with a caret.
#[derive(Debug, Clone)]
pub struct SingleLineTextData {
    text: String,
    caret_index: usize,
    /// Unscaled extent from the font, refreshed on every text change.
    cached_size: Vec2,
    /// Text size multiplier.
    pub text_size: f32,
    /// Glyph colour.
    pub color: Color,
    /// Horizontal alignment.
    pub alignment: TextAlignment,
}

impl SingleLineTextData {
    /// Creates text with the caret at the end.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let caret_index = text.chars().count();
        Self {
            text,
            caret_index,
            cached_size: Vec2::ZERO,
            text_size: DEFAULT_TEXT_SIZE,
            color: Color::WHITE,
            alignment: TextAlignment::Center,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// True if there is no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Caret position, in `0..=len()`.
    #[must_use]
    pub const fn caret_index(&self) -> usize {
        self.caret_index
    }

    /// Cached unscaled extent.
    #[must_use]
    pub const fn cached_size(&self) -> Vec2 {
        self.cached_size
    }

    /// Replaces the text, clamping the caret to the new length.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.caret_index = self.caret_index.min(self.len());
    }

    /// Moves the caret, clamped to the text.
    pub fn set_caret_index(&mut self, index: usize) {
        self.caret_index = index.min(self.len());
    }

    /// Moves the caret to the end of the text.
    pub fn caret_to_end(&mut self) {
        self.caret_index = self.len();
    }

    /// Inserts a character at the caret and advances it.
    pub fn insert_at_caret(&mut self, ch: char) {
        let byte = self.byte_offset(self.caret_index);
        self.text.insert(byte, ch);
        self.caret_index += 1;
    }

    /// Deletes the character before the caret. Returns false at index 0.
    pub fn backspace(&mut self) -> bool {
        if self.caret_index == 0 {
            return false;
        }
        let byte = self.byte_offset(self.caret_index - 1);
        self.text.remove(byte);
        self.caret_index -= 1;
        true
    }

    /// Moves the caret one character left. Returns false at the start.
    pub fn caret_left(&mut self) -> bool {
        if self.caret_index == 0 {
            return false;
        }
        self.caret_index -= 1;
        true
    }

    /// Moves the caret one character right. Returns false at the end.
    pub fn caret_right(&mut self) -> bool {
        if self.caret_index >= self.len() {
            return false;
        }
        self.caret_index += 1;
        true
    }

    /// Text before the caret.
    #[must_use]
    pub fn text_before_caret(&self) -> &str {
        &self.text[..self.byte_offset(self.caret_index)]
    }

    /// Recomputes the cached extent.
    pub fn refresh_metrics(&mut self, font: &dyn FontMetrics) {
        self.cached_size = font.single_line_text_size(&self.text);
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(byte, _)| byte)
    }
}

impl Default for SingleLineTextData {
    fn default() -> Self {
        Self::new(String::new())
    }
}

/// Line layout of multi-line text, in unscaled font units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiLineTextDimensions {
    /// Character span `(start, end)` of each line, end exclusive.
    pub line_breaks: Vec<(usize, usize)>,
    /// Width and line height of each line.
    pub line_sizes: Vec<Vec2>,
}

impl MultiLineTextDimensions {
    /// Number of laid-out lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_breaks.len()
    }
}

/// Multi-line text with cached line layout.
#[derive(Debug, Clone)]
pub struct MultiLineTextData {
    text: String,
    dimensions: MultiLineTextDimensions,
    /// Widget width and scale the cached layout was computed for.
    layout_key: Option<(f32, f32)>,
    dirty: bool,
    /// Text size multiplier.
    pub text_size: f32,
    /// Glyph colour.
    pub color: Color,
    /// Horizontal alignment of each line.
    pub alignment: TextAlignment,
    /// Whether lines wrap at the widget width.
    pub wrapped: bool,
}

impl MultiLineTextData {
    /// Creates wrapped text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            dimensions: MultiLineTextDimensions::default(),
            layout_key: None,
            dirty: true,
            text_size: DEFAULT_TEXT_SIZE,
            color: Color::WHITE,
            alignment: TextAlignment::Center,
            wrapped: true,
        }
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and invalidates the cached layout.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// Cached line layout.
    #[must_use]
    pub const fn dimensions(&self) -> &MultiLineTextDimensions {
        &self.dimensions
    }

    /// Recomputes the layout if the text changed, or, in wrapped mode, if
    /// the widget width or scale changed. Returns true if it recomputed.
    pub fn refresh_metrics(&mut self, font: &dyn FontMetrics, widget_width: f32, scale: f32) -> bool {
        let key = (widget_width, scale);
        let stale_width = self.wrapped && self.layout_key != Some(key);
        if !self.dirty && !stale_width {
            return false;
        }
        let max_width = (self.wrapped && scale > 0.0).then(|| widget_width / scale);
        self.dimensions = font.multi_line_text_metadata(&self.text, max_width);
        self.layout_key = Some(key);
        self.dirty = false;
        true
    }
}

impl Default for MultiLineTextData {
    fn default() -> Self {
        Self::new(String::new())
    }
}
