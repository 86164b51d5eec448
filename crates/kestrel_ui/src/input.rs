//! Polled input state.
//!
//! Hosts can either forward events straight to the `UserInterface` handlers
//! or fill an [`InputState`] each frame and hand it to `process_input`.

use crate::layout::Vec2;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Keys the interface reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Backspace key.
    Backspace,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
}

/// Input state for the current frame, in UI space (y-up).
#[derive(Debug, Clone, Default)]
pub struct InputState {
    mouse_position: Vec2,
    prev_mouse_position: Vec2,
    /// Mouse buttons pressed this frame.
    buttons_pressed: u8,
    /// Mouse buttons released this frame.
    buttons_released: u8,
    /// Mouse buttons currently held.
    buttons_down: u8,
    /// Keys pressed this frame, in order.
    keys_pressed: Vec<Key>,
    /// Keys currently held.
    keys_down: Vec<Key>,
    /// Text typed this frame.
    text_input: String,
}

impl InputState {
    /// Creates a new empty input state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a new frame, clearing per-frame state.
    pub fn begin_frame(&mut self) {
        self.prev_mouse_position = self.mouse_position;
        self.buttons_pressed = 0;
        self.buttons_released = 0;
        self.keys_pressed.clear();
        self.text_input.clear();
    }

    /// Updates mouse position.
    pub fn set_mouse_position(&mut self, position: Vec2) {
        self.mouse_position = position;
    }

    /// Current mouse position.
    #[must_use]
    pub const fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// True if the mouse moved since the last frame.
    #[must_use]
    pub fn mouse_moved(&self) -> bool {
        self.mouse_position != self.prev_mouse_position
    }

    /// Records a mouse button press.
    pub fn mouse_button_down(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_pressed |= mask;
        self.buttons_down |= mask;
    }

    /// Records a mouse button release.
    pub fn mouse_button_up(&mut self, button: MouseButton) {
        let mask = Self::button_mask(button);
        self.buttons_released |= mask;
        self.buttons_down &= !mask;
    }

    /// Records a key press. Held keys do not repeat.
    pub fn key_down(&mut self, key: Key) {
        if !self.keys_down.contains(&key) {
            self.keys_pressed.push(key);
            self.keys_down.push(key);
        }
    }

    /// Records a key release.
    pub fn key_up(&mut self, key: Key) {
        self.keys_down.retain(|&k| k != key);
    }

    /// Records typed text.
    pub fn text(&mut self, text: &str) {
        self.text_input.push_str(text);
    }

    /// Returns true if the mouse button was clicked this frame.
    #[must_use]
    pub fn mouse_clicked(&self, button: MouseButton) -> bool {
        (self.buttons_pressed & Self::button_mask(button)) != 0
    }

    /// Returns true if the mouse button was released this frame.
    #[must_use]
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        (self.buttons_released & Self::button_mask(button)) != 0
    }

    /// Returns true if the mouse button is currently held.
    #[must_use]
    pub fn mouse_down(&self, button: MouseButton) -> bool {
        (self.buttons_down & Self::button_mask(button)) != 0
    }

    /// Keys pressed this frame, in order.
    #[must_use]
    pub fn keys_pressed(&self) -> &[Key] {
        &self.keys_pressed
    }

    /// Text typed this frame.
    #[must_use]
    pub fn typed_text(&self) -> &str {
        &self.text_input
    }

    const fn button_mask(button: MouseButton) -> u8 {
        match button {
            MouseButton::Left => 1,
            MouseButton::Right => 2,
            MouseButton::Middle => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_click() {
        let mut input = InputState::new();

        input.mouse_button_down(MouseButton::Left);
        assert!(input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.begin_frame();
        assert!(!input.mouse_clicked(MouseButton::Left));
        assert!(input.mouse_down(MouseButton::Left));

        input.mouse_button_up(MouseButton::Left);
        assert!(input.mouse_released(MouseButton::Left));
        assert!(!input.mouse_down(MouseButton::Left));
    }

    #[test]
    fn test_held_keys_do_not_repeat() {
        let mut input = InputState::new();
        input.key_down(Key::Left);
        input.key_down(Key::Left);
        assert_eq!(input.keys_pressed(), &[Key::Left]);

        input.begin_frame();
        input.key_down(Key::Left);
        assert!(input.keys_pressed().is_empty());
        input.key_up(Key::Left);
        input.key_down(Key::Left);
        assert_eq!(input.keys_pressed(), &[Key::Left]);
    }

    #[test]
    fn test_mouse_moved() {
        let mut input = InputState::new();
        input.set_mouse_position(Vec2::new(3.0, 4.0));
        assert!(input.mouse_moved());
        input.begin_frame();
        assert!(!input.mouse_moved());
    }
}
