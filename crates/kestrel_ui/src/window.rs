//! Top-level windows.

use crate::layout::{Rect, Vec2, Viewport};
use crate::style::Color;
use crate::widget::{Widget, WidgetId};

/// Unique identifier for a window. Shares the id space with widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

impl WindowId {
    /// Reserved sentinel meaning "no window".
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new window ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Returns true unless this is the sentinel.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for WindowId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// An independently placed region holding widgets.
#[derive(Debug, Clone)]
pub struct Window {
    /// Unique id.
    pub id: WindowId,
    /// Author-facing name.
    pub tag: String,
    /// Bottom-left corner as a fraction of the viewport.
    pub screen_position: Vec2,
    /// Draw-order hint, higher draws later.
    pub z: f32,
    /// Size as a fraction of the viewport.
    pub size: Vec2,
    /// Background fill.
    pub background_color: Color,
    /// Owned top-level widgets.
    pub widgets: Vec<Widget>,
    /// Widget selected when the window becomes active.
    pub default_active_widget: WidgetId,
    displayed: bool,
}

impl Window {
    /// Creates a hidden window covering the whole viewport.
    #[must_use]
    pub fn new(id: WindowId, tag: impl Into<String>) -> Self {
        Self {
            id,
            tag: tag.into(),
            screen_position: Vec2::ZERO,
            z: 0.0,
            size: Vec2::new(1.0, 1.0),
            background_color: Color::WINDOW,
            widgets: Vec::new(),
            default_active_widget: WidgetId::INVALID,
            displayed: false,
        }
    }

    /// Sets position and size, both fractions of the viewport.
    #[must_use]
    pub const fn with_frame(mut self, screen_position: Vec2, size: Vec2) -> Self {
        self.screen_position = screen_position;
        self.size = size;
        self
    }

    /// Appends a top-level widget.
    #[must_use]
    pub fn with_widget(mut self, widget: Widget) -> Self {
        self.widgets.push(widget);
        self
    }

    /// Sets the widget selected on activation.
    #[must_use]
    pub const fn with_default_widget(mut self, id: WidgetId) -> Self {
        self.default_active_widget = id;
        self
    }

    /// Sets the displayed flag.
    #[must_use]
    pub const fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Whether the window is shown.
    #[must_use]
    pub const fn is_displayed(&self) -> bool {
        self.displayed
    }

    pub(crate) fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }

    /// Resolved world bounds.
    #[must_use]
    pub fn bounds(&self, viewport: Viewport) -> Rect {
        Rect::new(
            viewport.width * self.screen_position.x,
            viewport.height * self.screen_position.y,
            viewport.width * self.size.x,
            viewport.height * self.size.y,
        )
    }

    /// Visits every widget in pre-order.
    pub fn visit_widgets(&self, f: &mut impl FnMut(&Widget)) {
        for widget in &self.widgets {
            widget.visit(f);
        }
    }

    /// Visits every widget mutably in pre-order.
    pub fn visit_widgets_mut(&mut self, f: &mut impl FnMut(&mut Widget)) {
        for widget in &mut self.widgets {
            widget.visit_mut(f);
        }
    }

    /// Number of widgets at every depth.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        let mut count = 0;
        self.visit_widgets(&mut |_| count += 1);
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ColumnLayout;

    #[test]
    fn test_window_bounds() {
        let window = Window::new(WindowId(1), "hud")
            .with_frame(Vec2::new(0.25, 0.5), Vec2::new(0.5, 0.25));
        let bounds = window.bounds(Viewport::new(800.0, 400.0));
        assert_eq!(bounds, Rect::new(200.0, 200.0, 400.0, 100.0));
    }

    #[test]
    fn test_widget_count_includes_nested() {
        let window = Window::new(WindowId(1), "menu").with_widget(
            Widget::horizontal_container(WidgetId(2), "row", ColumnLayout::default())
                .with_child(Widget::button(WidgetId(3), "a", "A"))
                .with_child(Widget::button(WidgetId(4), "b", "B")),
        );
        assert_eq!(window.widget_count(), 3);
    }
}
