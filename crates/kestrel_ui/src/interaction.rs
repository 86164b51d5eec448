//! Interaction slots and caret blink.
//!
//! Slots hold ids, never references. Each use resolves the id through the
//! location index; the transitions that need the tree live on
//! [`crate::UserInterface`].

use crate::widget::WidgetId;
use crate::window::WindowId;

/// Pointer icon the host should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// Default arrow.
    #[default]
    Standard,
    /// Text insertion bar.
    IBeam,
}

/// The four focus slots plus the active window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    selected: Option<WidgetId>,
    hovered: Option<WidgetId>,
    editing: Option<WidgetId>,
    pressed: Option<WidgetId>,
    active_window: Option<WindowId>,
}

impl InteractionState {
    /// Creates empty slots.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected widget.
    #[must_use]
    pub const fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    /// Hovered widget.
    #[must_use]
    pub const fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// Widget being edited.
    #[must_use]
    pub const fn editing(&self) -> Option<WidgetId> {
        self.editing
    }

    /// Widget held by the pointer.
    #[must_use]
    pub const fn pressed(&self) -> Option<WidgetId> {
        self.pressed
    }

    /// Active window.
    #[must_use]
    pub const fn active_window(&self) -> Option<WindowId> {
        self.active_window
    }

    pub(crate) fn set_selected(&mut self, id: Option<WidgetId>) {
        self.selected = id;
    }

    pub(crate) fn set_hovered(&mut self, id: Option<WidgetId>) {
        self.hovered = id;
    }

    pub(crate) fn set_editing(&mut self, id: Option<WidgetId>) {
        self.editing = id;
    }

    pub(crate) fn set_pressed(&mut self, id: Option<WidgetId>) {
        self.pressed = id;
    }

    pub(crate) fn set_active_window(&mut self, id: Option<WindowId>) {
        self.active_window = id;
    }

    /// Empties every widget slot that refers to `id`.
    pub(crate) fn forget_widget(&mut self, id: WidgetId) {
        for slot in [&mut self.selected, &mut self.hovered, &mut self.editing, &mut self.pressed] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    /// Empties every slot whose id fails `is_live`.
    pub(crate) fn retain_live(&mut self, mut is_live: impl FnMut(u32) -> bool) {
        for slot in [&mut self.selected, &mut self.hovered, &mut self.editing, &mut self.pressed] {
            if slot.is_some_and(|id| !is_live(id.raw())) {
                *slot = None;
            }
        }
        if self.active_window.is_some_and(|id| !is_live(id.raw())) {
            self.active_window = None;
        }
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Caret visibility timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretBlink {
    interval: f32,
    accumulator: f32,
    visible: bool,
}

impl CaretBlink {
    /// Creates a visible caret toggling every `interval` seconds.
    #[must_use]
    pub const fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
            visible: true,
        }
    }

    /// Whether the caret should be drawn.
    #[must_use]
    pub const fn visible(&self) -> bool {
        self.visible
    }

    /// Advances the timer by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.accumulator += dt;
        if self.accumulator > self.interval {
            self.accumulator -= self.interval;
            self.visible = !self.visible;
        }
    }

    /// Shows the caret and restarts the interval.
    pub fn reveal(&mut self) {
        self.visible = true;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_are_independent() {
        let mut state = InteractionState::new();
        state.set_selected(Some(WidgetId(1)));
        state.set_editing(Some(WidgetId(1)));
        state.set_hovered(Some(WidgetId(2)));

        state.forget_widget(WidgetId(1));
        assert_eq!(state.selected(), None);
        assert_eq!(state.editing(), None);
        assert_eq!(state.hovered(), Some(WidgetId(2)));
    }

    #[test]
    fn test_retain_live() {
        let mut state = InteractionState::new();
        state.set_pressed(Some(WidgetId(4)));
        state.set_active_window(Some(WindowId(9)));
        state.retain_live(|raw| raw == 9);

        assert_eq!(state.pressed(), None);
        assert_eq!(state.active_window(), Some(WindowId(9)));
    }

    #[test]
    fn test_caret_blink() {
        let mut blink = CaretBlink::new(0.75);
        blink.tick(0.5);
        assert!(blink.visible());
        blink.tick(0.5);
        assert!(!blink.visible());
        blink.reveal();
        assert!(blink.visible());
        blink.tick(0.7);
        assert!(blink.visible());
    }
}
