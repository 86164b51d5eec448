//! Interaction transitions and input handling.

use crate::error::{invariant_violation, UiError};
use crate::input::{InputState, Key, MouseButton};
use crate::interaction::CursorIcon;
use crate::layout::{Rect, Vec2};
use crate::location::{bounds_from_path, resolve_widgets, widget_from_path_mut, ResolvedWidget};
use crate::script::{fire, Callback, CallbackArg};
use crate::text::{caret_index_from_mouse, text_scale};
use crate::widget::{Direction, SliderWidget, WidgetId, WidgetKind, WidgetType};

use super::UserInterface;

/// Rectangle of a slider's handle within the slider bounds.
pub(crate) fn slider_handle(bounds: Rect, slider: &SliderWidget, width: f32, height: f32) -> Rect {
    let size = Vec2::new(bounds.width * width, bounds.height * height);
    let center = Vec2::new(
        bounds.x + bounds.width * slider.normalized_value(),
        bounds.y + bounds.height * 0.5,
    );
    Rect::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
}

/// Row `k` of an open dropdown, stacked below the widget.
pub(crate) fn dropdown_row(bounds: Rect, row: usize) -> Rect {
    Rect::new(
        bounds.x,
        bounds.y - bounds.height * (row as f32 + 1.0),
        bounds.width,
        bounds.height,
    )
}

impl UserInterface {
    // ------------------------------------------------------------------
    // Slot transitions
    // ------------------------------------------------------------------

    /// Selects a widget and fires the move callback.
    ///
    /// Does nothing if the widget is not selectable or already selected.
    pub fn set_selected(&mut self, id: WidgetId) -> bool {
        let Some(widget) = self.lookup(id, "set_selected") else {
            return false;
        };
        if !widget.selectable() || self.interaction.selected() == Some(id) {
            return false;
        }
        self.interaction.set_selected(Some(id));
        tracing::debug!(widget_id = ?id, "widget selected");
        fire(self.on_move.as_ref(), CallbackArg::None);
        true
    }

    /// Clears the selection.
    pub fn clear_selected(&mut self) {
        self.interaction.set_selected(None);
    }

    /// Hovers a widget, updating the cursor icon and firing the hover
    /// callback. Sliders do not fire the hover callback.
    pub fn set_hovered(&mut self, id: WidgetId) -> bool {
        let Some(widget) = self.lookup(id, "set_hovered") else {
            return false;
        };
        if !widget.selectable() || self.interaction.hovered() == Some(id) {
            return false;
        }
        let kind = widget.widget_type();
        self.interaction.set_hovered(Some(id));
        self.cursor_icon = if kind == WidgetType::InputText {
            CursorIcon::IBeam
        } else {
            CursorIcon::Standard
        };
        tracing::trace!(widget_id = ?id, "widget hovered");
        if kind != WidgetType::Slider {
            fire(self.on_hover.as_ref(), CallbackArg::None);
        }
        true
    }

    /// Clears the hover slot and restores the standard cursor.
    pub fn clear_hovered(&mut self) {
        self.interaction.set_hovered(None);
        self.cursor_icon = CursorIcon::Standard;
    }

    /// Stops text editing.
    pub fn end_editing(&mut self) {
        if let Some(id) = self.interaction.editing() {
            tracing::debug!(widget_id = ?id, "editing ended");
        }
        self.interaction.set_editing(None);
    }

    /// Moves the selection along the selected widget's navigation link.
    ///
    /// Editing ends if the new selection is not the edited widget.
    pub fn move_directional(&mut self, direction: Direction) -> bool {
        let Some(selected) = self.interaction.selected() else {
            return false;
        };
        let Some(widget) = self.lookup(selected, "move_directional") else {
            return false;
        };
        let Some(selection) = widget.kind.selection_data() else {
            invariant_violation(&UiError::WrongWidgetKind {
                id: selected.raw(),
                expected: "focusable widget",
                actual: widget.widget_type().name(),
            });
            self.interaction.set_selected(None);
            return false;
        };
        let target = selection.navigation_links.get(direction);
        if !target.is_valid() {
            return false;
        }
        let moved = self.set_selected(target);
        if self
            .interaction
            .editing()
            .is_some_and(|editing| Some(editing) != self.interaction.selected())
        {
            self.end_editing();
        }
        moved
    }

    /// Presses a widget: selects it, then runs its kind's press behaviour.
    ///
    /// Checkboxes toggle and pass the new state to the press callback.
    /// Input text fires the press callback and then starts editing.
    pub fn press(&mut self, id: WidgetId) -> bool {
        let Some(widget) = self.lookup_mut(id, "press") else {
            return false;
        };
        if !widget.selectable() {
            return false;
        }
        let (callback, arg, edit) = match &mut widget.kind {
            WidgetKind::Checkbox(checkbox) => {
                checkbox.checked = !checkbox.checked;
                (checkbox.selection.on_press.clone(), CallbackArg::Bool(checkbox.checked), false)
            }
            WidgetKind::InputText(input) => (input.selection.on_press.clone(), CallbackArg::None, true),
            other => (
                other.selection_data().and_then(|data| data.on_press.clone()),
                CallbackArg::None,
                false,
            ),
        };
        self.interaction.set_selected(Some(id));
        tracing::debug!(widget_id = ?id, "widget pressed");
        fire(callback.as_ref(), arg);
        if edit {
            self.interaction.set_editing(Some(id));
            self.caret.reveal();
        }
        true
    }

    /// Presses the selected widget.
    pub fn press_selected(&mut self) -> bool {
        match self.interaction.selected() {
            Some(id) => self.press(id),
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------

    /// Advances timers and an active slider drag by `dt` seconds.
    pub fn on_update(&mut self, dt: f32) {
        if self.interaction.editing().is_some() {
            self.caret.tick(dt);
        }
        if let Some(pressed) = self.interaction.pressed() {
            self.drag_slider(pressed);
        }
    }

    fn drag_slider(&mut self, id: WidgetId) {
        let Some(path) = self.locate(id, "drag_slider") else {
            self.interaction.set_pressed(None);
            return;
        };
        let bounds = match bounds_from_path(&self.windows, &path, self.viewport) {
            Ok(bounds) => bounds.widget,
            Err(err) => {
                crate::error::report(&err, "drag_slider");
                return;
            }
        };
        let mouse_x = self.mouse_position.x;
        let Ok(widget) = widget_from_path_mut(&mut self.windows, &path) else {
            return;
        };
        let WidgetKind::Slider(slider) = &mut widget.kind else {
            tracing::warn!(widget_id = ?id, "pressed widget is not a slider, releasing");
            self.interaction.set_pressed(None);
            return;
        };
        let t = if bounds.width > 0.0 {
            (mouse_x - bounds.x) / bounds.width
        } else {
            0.0
        };
        let value = slider.value_at(t);
        slider.current_value = value;
        let callback = slider.on_move_slider.clone();
        fire(callback.as_ref(), CallbackArg::Float(value));
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    /// Inserts a typed character into the edited widget.
    pub fn on_key_typed(&mut self, ch: char) -> bool {
        let Some(editing) = self.interaction.editing() else {
            return false;
        };
        if ch.is_control() {
            return false;
        }
        self.edit_text(editing, |input| {
            input.text.insert_at_caret(ch);
            true
        })
    }

    /// Handles a key press. While editing, keys edit the text; otherwise
    /// arrows navigate and Enter presses the selection.
    pub fn on_key_pressed(&mut self, key: Key) -> bool {
        if let Some(editing) = self.interaction.editing() {
            return match key {
                Key::Backspace => self.edit_text(editing, |input| input.text.backspace()),
                Key::Left => self.edit_text(editing, |input| input.text.caret_left()),
                Key::Right => self.edit_text(editing, |input| input.text.caret_right()),
                Key::Enter | Key::Escape => {
                    self.end_editing();
                    true
                }
                Key::Up | Key::Down => false,
            };
        }
        match key {
            Key::Left => self.move_directional(Direction::Left),
            Key::Right => self.move_directional(Direction::Right),
            Key::Up => self.move_directional(Direction::Up),
            Key::Down => self.move_directional(Direction::Down),
            Key::Enter => self.press_selected(),
            Key::Escape | Key::Backspace => false,
        }
    }

    /// Applies an edit to the edited input text. When the edit reports a
    /// change, refreshes metrics, reveals the caret and fires the cursor
    /// callback.
    fn edit_text(
        &mut self,
        id: WidgetId,
        edit: impl FnOnce(&mut crate::widget::InputTextWidget) -> bool,
    ) -> bool {
        let font = self.font.as_ref();
        let Some(path) = self.locate(id, "edit_text") else {
            self.interaction.set_editing(None);
            return false;
        };
        let Ok(widget) = widget_from_path_mut(&mut self.windows, &path) else {
            return false;
        };
        let actual = widget.widget_type().name();
        let WidgetKind::InputText(input) = &mut widget.kind else {
            invariant_violation(&UiError::WrongWidgetKind {
                id: id.raw(),
                expected: "InputText",
                actual,
            });
            self.interaction.set_editing(None);
            return false;
        };
        if !edit(input) {
            return false;
        }
        input.text.refresh_metrics(font);
        let callback: Option<Callback> = input.on_move_cursor.clone();
        self.caret.reveal();
        fire(callback.as_ref(), CallbackArg::None);
        true
    }

    // ------------------------------------------------------------------
    // Mouse
    // ------------------------------------------------------------------

    /// Topmost selectable widget under a point in the displayed windows.
    #[must_use]
    pub fn hit_test(&self, position: Vec2) -> Option<WidgetId> {
        self.resolved_displayed()
            .into_iter()
            .rev()
            .find(|resolved| resolved.selectable && resolved.bounds.contains(position))
            .map(|resolved| resolved.id)
    }

    fn resolved_displayed(&self) -> Vec<ResolvedWidget> {
        resolve_widgets(&self.windows, &self.displayed_indices(), self.viewport)
    }

    /// Tracks the pointer and updates the hover slot.
    pub fn on_mouse_moved(&mut self, position: Vec2) {
        self.mouse_position = position;
        match self.hit_test(position) {
            Some(id) => {
                self.set_hovered(id);
            }
            None => {
                if self.interaction.hovered().is_some() {
                    self.clear_hovered();
                }
            }
        }
    }

    /// Routes a primary-button press at `position`.
    ///
    /// A click inside the edited widget moves the caret; anywhere else ends
    /// editing and continues. Open dropdown rows are checked next, then the
    /// topmost selectable widget is pressed. A press on a slider's handle
    /// starts a drag and a press on a dropdown toggles it.
    pub fn on_mouse_pressed(&mut self, position: Vec2) -> bool {
        self.mouse_position = position;

        if let Some(editing) = self.interaction.editing() {
            if self.click_in_editing(editing, position) {
                return true;
            }
            self.end_editing();
        }

        if let Some(selected) = self.interaction.selected() {
            if self.click_dropdown_row(selected, position) {
                return true;
            }
        }

        let Some(target) = self.hit_test(position) else {
            return false;
        };
        let bounds = self.widget_bounds(target);
        if !self.press(target) {
            return false;
        }
        let (handle_width, handle_height) =
            (self.config.slider_handle_width, self.config.slider_handle_height);
        let Some(bounds) = bounds else {
            return true;
        };
        let Some(widget) = self.lookup_mut(target, "on_mouse_pressed") else {
            return true;
        };
        let start_drag = match &mut widget.kind {
            WidgetKind::Slider(slider) => {
                slider_handle(bounds, slider, handle_width, handle_height).contains(position)
            }
            WidgetKind::DropDown(dropdown) => {
                dropdown.open = !dropdown.open;
                false
            }
            _ => false,
        };
        if start_drag {
            tracing::debug!(widget_id = ?target, "slider drag started");
            self.interaction.set_pressed(Some(target));
        }
        true
    }

    fn click_in_editing(&mut self, id: WidgetId, position: Vec2) -> bool {
        let Some(bounds) = self.widget_bounds(id) else {
            return false;
        };
        if !bounds.contains(position) {
            return false;
        }
        let font = self.font.as_ref();
        let (config, viewport) = (&self.config, self.viewport);
        let Some(path) = self.locate(id, "click_in_editing") else {
            return false;
        };
        let Ok(widget) = widget_from_path_mut(&mut self.windows, &path) else {
            return false;
        };
        let WidgetKind::InputText(input) = &mut widget.kind else {
            return false;
        };
        let scale = text_scale(config, viewport, input.text.text_size);
        let index = caret_index_from_mouse(
            font,
            &input.text,
            bounds,
            scale,
            config.text_center_adjustment,
            position.x,
        );
        input.text.set_caret_index(index);
        let callback = input.on_move_cursor.clone();
        self.caret.reveal();
        fire(callback.as_ref(), CallbackArg::None);
        true
    }

    fn click_dropdown_row(&mut self, id: WidgetId, position: Vec2) -> bool {
        let Some(bounds) = self.widget_bounds(id) else {
            return false;
        };
        let Some(widget) = self.lookup_mut(id, "click_dropdown_row") else {
            return false;
        };
        let WidgetKind::DropDown(dropdown) = &mut widget.kind else {
            return false;
        };
        if !dropdown.open {
            return false;
        }
        let Some(option) = dropdown
            .visible_options()
            .enumerate()
            .find(|&(row, _)| dropdown_row(bounds, row).contains(position))
            .map(|(_, option)| option)
        else {
            return false;
        };
        dropdown.open = false;
        dropdown.current_option = option;
        let text = dropdown.options[option].text().to_owned();
        let callback = dropdown.on_select_option.clone();
        tracing::debug!(widget_id = ?id, option, "dropdown option picked");
        fire(callback.as_ref(), CallbackArg::Text(text));
        true
    }

    /// Ends a slider drag.
    pub fn on_mouse_released(&mut self) -> bool {
        if self.interaction.pressed().is_none() {
            return false;
        }
        self.interaction.set_pressed(None);
        true
    }

    /// Dispatches one frame of polled input.
    pub fn process_input(&mut self, input: &InputState) {
        let position = input.mouse_position();
        if input.mouse_moved() {
            self.on_mouse_moved(position);
        }
        if input.mouse_clicked(MouseButton::Left) {
            self.on_mouse_pressed(position);
        }
        if input.mouse_released(MouseButton::Left) {
            self.on_mouse_released();
        }
        for &key in input.keys_pressed() {
            self.on_key_pressed(key);
        }
        for ch in input.typed_text().chars() {
            self.on_key_typed(ch);
        }
    }
}
