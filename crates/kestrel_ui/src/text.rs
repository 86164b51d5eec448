//! Text placement and caret hit-testing.
//!
//! Cached extents live on the text payloads; this module turns them into
//! world positions for a given widget bounds and scale.

use crate::config::UiConfig;
use crate::font::FontMetrics;
use crate::layout::{Rect, Vec2, Viewport};
use crate::widget::{MultiLineTextData, SingleLineTextData, TextAlignment};

/// Scale from font units to pixels for a text size.
#[must_use]
pub fn text_scale(config: &UiConfig, viewport: Viewport, text_size: f32) -> f32 {
    viewport.height * config.text_scale * text_size
}

fn aligned_x(alignment: TextAlignment, bounds: Rect, scaled_width: f32) -> f32 {
    match alignment {
        TextAlignment::Left => bounds.x,
        TextAlignment::Center => bounds.x + bounds.width * 0.5 - scaled_width * 0.5,
        TextAlignment::Right => bounds.x + bounds.width - scaled_width,
    }
}

/// Baseline origin of single-line text inside `bounds`.
#[must_use]
pub fn single_line_start(
    text: &SingleLineTextData,
    bounds: Rect,
    scale: f32,
    center_adjustment: f32,
) -> Vec2 {
    let size = text.cached_size();
    Vec2::new(
        aligned_x(text.alignment, bounds, size.x * scale),
        bounds.y + bounds.height * 0.5 - size.y * 0.5 * scale + center_adjustment,
    )
}

/// Caret index for a click at `mouse_x`.
#[must_use]
pub fn caret_index_from_mouse(
    font: &dyn FontMetrics,
    text: &SingleLineTextData,
    bounds: Rect,
    scale: f32,
    center_adjustment: f32,
    mouse_x: f32,
) -> usize {
    let start = single_line_start(text, bounds, scale, center_adjustment);
    font.glyph_index_from_x_offset(text.text(), mouse_x - start.x, scale)
}

/// World x of the caret, given the text's start position.
#[must_use]
pub fn caret_x(font: &dyn FontMetrics, text: &SingleLineTextData, start: Vec2, scale: f32) -> f32 {
    start.x + font.single_line_text_size(text.text_before_caret()).x * scale
}

/// Baseline origin of each cached line, stacked down from the top of `bounds`.
#[must_use]
pub fn multi_line_origins(
    font: &dyn FontMetrics,
    text: &MultiLineTextData,
    bounds: Rect,
    scale: f32,
) -> Vec<Vec2> {
    let line_height = font.line_height() * scale;
    text.dimensions()
        .line_sizes
        .iter()
        .enumerate()
        .map(|(line, size)| {
            Vec2::new(
                aligned_x(text.alignment, bounds, size.x * scale),
                bounds.top() - line_height * (line as f32 + 1.0),
            )
        })
        .collect()
}

/// Text of one cached line.
#[must_use]
pub fn line_text(text: &MultiLineTextData, line: usize) -> Option<String> {
    let &(start, end) = text.dimensions().line_breaks.get(line)?;
    Some(
        text.text()
            .chars()
            .skip(start)
            .take(end.saturating_sub(start))
            .filter(|&ch| ch != '\r')
            .map(|ch| if ch == '\t' { ' ' } else { ch })
            .collect(),
    )
}
