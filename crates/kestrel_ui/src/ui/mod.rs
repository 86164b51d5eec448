//! The runtime interface: windows, the location index, interaction slots,
//! and the operations that keep them coherent.
//!
//! Every structural edit rebuilds the location index, recomputes the
//! displayed-window list and recalculates navigation links before it
//! returns. Ids held by callers or by interaction slots are resolved on each
//! use; a stale id is logged and the operation does nothing.

mod draw;
mod events;

use std::collections::HashSet;

use crate::assets::AssetResolver;
use crate::config::UiConfig;
use crate::error::{report, UiError};
use crate::font::{FontMetrics, MonospaceFont};
use crate::interaction::{CaretBlink, CursorIcon, InteractionState};
use crate::layout::{Placement, Rect, Vec2, Viewport};
use crate::location::{
    bounds_from_path, siblings_mut, widget_from_path, widget_from_path_mut, IdKind,
    LocationIndex, Path,
};
use crate::navigation::calculate_navigation_links;
use crate::script::Callback;
use crate::style::Color;
use crate::text::text_scale;
use crate::widget::{Widget, WidgetId, WidgetKind};
use crate::window::{Window, WindowId};

/// A runtime user interface.
pub struct UserInterface {
    config: UiConfig,
    font: Box<dyn FontMetrics>,
    viewport: Viewport,
    windows: Vec<Window>,
    /// Displayed windows in display order; later entries draw on top.
    displayed: Vec<WindowId>,
    index: LocationIndex,
    interaction: InteractionState,
    caret: CaretBlink,
    cursor_icon: CursorIcon,
    mouse_position: Vec2,
    next_id: u32,
    on_move: Option<Callback>,
    on_hover: Option<Callback>,
}

impl UserInterface {
    /// Creates an empty interface.
    pub fn new(config: UiConfig, font: impl FontMetrics + 'static, viewport: Viewport) -> Self {
        let caret = CaretBlink::new(config.caret_blink_interval);
        Self {
            config,
            font: Box::new(font),
            viewport,
            windows: Vec::new(),
            displayed: Vec::new(),
            index: LocationIndex::new(),
            interaction: InteractionState::new(),
            caret,
            cursor_icon: CursorIcon::Standard,
            mouse_position: Vec2::ZERO,
            next_id: 1,
            on_move: None,
            on_hover: None,
        }
    }

    /// Sets the callback fired whenever the selection moves.
    #[must_use]
    pub fn with_on_move(mut self, callback: Callback) -> Self {
        self.on_move = Some(callback);
        self
    }

    /// Sets the callback fired whenever a new widget is hovered.
    #[must_use]
    pub fn with_on_hover(mut self, callback: Callback) -> Self {
        self.on_hover = Some(callback);
        self
    }

    /// Replaces the selection-move callback.
    pub fn set_on_move(&mut self, callback: Option<Callback>) {
        self.on_move = callback;
    }

    /// Replaces the hover callback.
    pub fn set_on_hover(&mut self, callback: Option<Callback>) {
        self.on_hover = callback;
    }

    // ------------------------------------------------------------------
    // Ids
    // ------------------------------------------------------------------

    /// Allocates a fresh raw id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Allocates a fresh widget id.
    pub fn next_widget_id(&mut self) -> WidgetId {
        WidgetId::new(self.next_id())
    }

    /// Allocates a fresh window id.
    pub fn next_window_id(&mut self) -> WindowId {
        WindowId::new(self.next_id())
    }

    fn observe_id(&mut self, raw: u32) {
        if raw != u32::MAX && raw >= self.next_id {
            self.next_id = raw.saturating_add(1);
        }
    }

    /// Checks that `ids` are valid, distinct, and absent from the index.
    fn validate_new_ids(&self, ids: &[u32]) -> Result<(), UiError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for &raw in ids {
            if raw == u32::MAX {
                return Err(UiError::InvalidId);
            }
            if self.index.contains(raw) || !seen.insert(raw) {
                return Err(UiError::DuplicateId(raw));
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Configuration.
    #[must_use]
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// All windows in order.
    #[must_use]
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    /// Displayed windows in display order.
    #[must_use]
    pub fn displayed_windows(&self) -> &[WindowId] {
        &self.displayed
    }

    /// Interaction slots.
    #[must_use]
    pub const fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    /// Location index.
    #[must_use]
    pub const fn location_index(&self) -> &LocationIndex {
        &self.index
    }

    /// Pointer icon the host should show.
    #[must_use]
    pub const fn cursor_icon(&self) -> CursorIcon {
        self.cursor_icon
    }

    /// Whether the caret is in the visible half of its blink.
    #[must_use]
    pub const fn caret_visible(&self) -> bool {
        self.caret.visible()
    }

    /// Total number of widgets in every window.
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.windows.iter().map(Window::widget_count).sum()
    }

    // ------------------------------------------------------------------
    // Resolution helpers
    // ------------------------------------------------------------------

    /// Path of a widget, logging a stale id.
    fn locate(&self, id: WidgetId, operation: &'static str) -> Option<Path> {
        match self.index.resolve_widget(id) {
            Ok(path) => Some(path.clone()),
            Err(err) => {
                tracing::warn!(widget_id = ?id, error = %err, operation, "stale widget reference");
                None
            }
        }
    }

    fn lookup(&self, id: WidgetId, operation: &'static str) -> Option<&Widget> {
        let path = self.locate(id, operation)?;
        match widget_from_path(&self.windows, &path) {
            Ok(widget) => Some(widget),
            Err(err) => {
                report(&err, operation);
                None
            }
        }
    }

    fn lookup_mut(&mut self, id: WidgetId, operation: &'static str) -> Option<&mut Widget> {
        let path = self.locate(id, operation)?;
        match widget_from_path_mut(&mut self.windows, &path) {
            Ok(widget) => Some(widget),
            Err(err) => {
                report(&err, operation);
                None
            }
        }
    }

    fn window_index(&self, id: WindowId, operation: &'static str) -> Option<usize> {
        match self.index.resolve_window(id) {
            Ok(index) => Some(index),
            Err(err) => {
                tracing::warn!(window_id = ?id, error = %err, operation, "stale window reference");
                None
            }
        }
    }

    /// Indices of displayed windows, in display order.
    fn displayed_indices(&self) -> Vec<usize> {
        self.displayed
            .iter()
            .filter_map(|&id| self.index.resolve_window(id).ok())
            .collect()
    }

    // ------------------------------------------------------------------
    // Revalidation
    // ------------------------------------------------------------------

    /// Rebuilds the location index, drops stale interaction slots and
    /// recalculates navigation links.
    pub fn revalidate(&mut self) {
        if let Err(err) = self.index.rebuild(&self.windows) {
            crate::error::invariant_violation(&err);
        }
        let index = &self.index;
        self.displayed.retain(|&id| index.resolve_window(id).is_ok());
        self.interaction.retain_live(|raw| index.contains(raw));
        if self.interaction.hovered().is_none() {
            self.cursor_icon = CursorIcon::Standard;
        }
        self.refresh_multi_line_text();
        self.recalculate_navigation_links();
    }

    /// Recalculates navigation links for the displayed windows.
    pub fn recalculate_navigation_links(&mut self) {
        let displayed = self.displayed_indices();
        calculate_navigation_links(&mut self.windows, &displayed, self.viewport);
    }

    /// Changes the viewport. Bounds, text wrapping and links depend on it.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh_multi_line_text();
        self.recalculate_navigation_links();
    }

    // ------------------------------------------------------------------
    // Structural edits
    // ------------------------------------------------------------------

    /// Adds a window. A window built with `displayed(true)` is shown.
    ///
    /// Returns `None` if the window or any of its widgets reuses an id.
    pub fn add_window(&mut self, mut window: Window) -> Option<WindowId> {
        let mut ids = vec![window.id.raw()];
        window.visit_widgets(&mut |widget| ids.push(widget.id.raw()));
        if let Err(err) = self.validate_new_ids(&ids) {
            tracing::warn!(window_id = ?window.id, error = %err, "window rejected");
            return None;
        }
        for raw in ids {
            self.observe_id(raw);
        }

        let font = self.font.as_ref();
        window.visit_widgets_mut(&mut |widget| refresh_single_line(widget, font));
        let id = window.id;
        if window.is_displayed() {
            self.displayed.push(id);
        }
        self.windows.push(window);
        self.index.invalidate();
        tracing::debug!(window_id = ?id, "window added");
        self.revalidate();
        Some(id)
    }

    /// Deletes a window and everything in it.
    pub fn delete_window(&mut self, id: WindowId) -> bool {
        let Some(index) = self.window_index(id, "delete_window") else {
            return false;
        };
        self.windows.remove(index);
        self.index.invalidate();
        self.displayed.retain(|&shown| shown != id);
        tracing::debug!(window_id = ?id, "window deleted");
        self.revalidate();
        true
    }

    /// Appends a widget to a window's top level.
    pub fn add_widget(&mut self, window: WindowId, widget: Widget) -> bool {
        let Some(index) = self.window_index(window, "add_widget") else {
            return false;
        };
        let Some(widget) = self.prepare_insert(widget) else {
            return false;
        };
        let id = widget.id;
        self.windows[index].widgets.push(widget);
        self.index.invalidate();
        tracing::debug!(window_id = ?window, widget_id = ?id, "widget added");
        self.revalidate();
        true
    }

    /// Appends a widget to a container's children.
    pub fn add_widget_to_container(&mut self, container: WidgetId, widget: Widget) -> bool {
        let Some(path) = self.locate(container, "add_widget_to_container") else {
            return false;
        };
        let kind = match widget_from_path(&self.windows, &path) {
            Ok(parent) => parent.widget_type(),
            Err(err) => {
                report(&err, "add_widget_to_container");
                return false;
            }
        };
        let Some(widget) = self.prepare_insert(widget) else {
            return false;
        };
        let id = widget.id;
        let inserted = widget_from_path_mut(&mut self.windows, &path)
            .ok()
            .and_then(|parent| parent.kind.container_data_mut())
            .map(|data| data.widgets.push(widget))
            .is_some();
        if !inserted {
            tracing::warn!(
                widget_id = ?container,
                kind = kind.name(),
                "add_widget_to_container target is not a container"
            );
            return false;
        }
        self.index.invalidate();
        tracing::debug!(container_id = ?container, widget_id = ?id, "widget added");
        self.revalidate();
        true
    }

    fn prepare_insert(&mut self, mut widget: Widget) -> Option<Widget> {
        let mut ids = Vec::new();
        widget.visit(&mut |w| ids.push(w.id.raw()));
        if let Err(err) = self.validate_new_ids(&ids) {
            tracing::warn!(widget_id = ?widget.id, error = %err, "widget rejected");
            return None;
        }
        for raw in ids {
            self.observe_id(raw);
        }
        let font = self.font.as_ref();
        widget.visit_mut(&mut |w| refresh_single_line(w, font));
        Some(widget)
    }

    /// Deletes a widget and its descendants.
    pub fn delete_widget(&mut self, id: WidgetId) -> bool {
        let Some(path) = self.locate(id, "delete_widget") else {
            return false;
        };
        let Some(position) = path.last() else {
            return false;
        };
        let removed = match siblings_mut(&mut self.windows, &path) {
            Ok(siblings) if position < siblings.len() => siblings.remove(position),
            Ok(siblings) => {
                report(
                    &UiError::PathOutOfBounds { index: position, len: siblings.len() },
                    "delete_widget",
                );
                return false;
            }
            Err(err) => {
                report(&err, "delete_widget");
                return false;
            }
        };
        self.index.invalidate();
        let mut removed_ids = HashSet::new();
        removed.visit(&mut |w| {
            removed_ids.insert(w.id);
        });
        if let Some(window) = path.window_index().and_then(|i| self.windows.get_mut(i)) {
            if removed_ids.contains(&window.default_active_widget) {
                window.default_active_widget = WidgetId::INVALID;
            }
        }
        tracing::debug!(widget_id = ?id, removed = removed_ids.len(), "widget deleted");
        self.revalidate();
        true
    }

    // ------------------------------------------------------------------
    // Windows
    // ------------------------------------------------------------------

    /// Window by id.
    #[must_use]
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.index.resolve_window(id).ok().and_then(|i| self.windows.get(i))
    }

    /// Window id by tag.
    #[must_use]
    pub fn window_id_by_tag(&self, tag: &str) -> Option<WindowId> {
        self.windows.iter().find(|w| w.tag == tag).map(|w| w.id)
    }

    /// Shows or hides a window.
    pub fn set_display_window(&mut self, id: WindowId, display: bool) -> bool {
        let Some(index) = self.window_index(id, "set_display_window") else {
            return false;
        };
        if self.windows[index].is_displayed() == display {
            return true;
        }
        self.windows[index].set_displayed(display);
        if display {
            self.displayed.push(id);
        } else {
            self.displayed.retain(|&shown| shown != id);
            let windows = &self.windows;
            let index = &self.index;
            let in_hidden = |widget: Option<WidgetId>| {
                widget
                    .and_then(|w| index.resolve_widget(w).ok())
                    .and_then(Path::window_index)
                    .and_then(|i| windows.get(i))
                    .is_some_and(|w| w.id == id)
            };
            let hovered = in_hidden(self.interaction.hovered());
            let pressed = in_hidden(self.interaction.pressed());
            if hovered {
                self.interaction.set_hovered(None);
                self.cursor_icon = CursorIcon::Standard;
            }
            if pressed {
                self.interaction.set_pressed(None);
            }
        }
        let shown = display;
        tracing::debug!(window_id = ?id, shown, "window display changed");
        self.recalculate_navigation_links();
        true
    }

    /// Shows or hides a window found by tag.
    pub fn set_display_window_by_tag(&mut self, tag: &str, display: bool) -> bool {
        match self.window_id_by_tag(tag) {
            Some(id) => self.set_display_window(id, display),
            None => {
                tracing::warn!(tag, "no window with tag");
                false
            }
        }
    }

    /// Makes a window active.
    pub fn set_active_window(&mut self, id: WindowId) -> bool {
        if self.window_index(id, "set_active_window").is_none() {
            return false;
        }
        self.interaction.set_active_window(Some(id));
        true
    }

    /// Prepares the interface for use: shows and activates the first window,
    /// moves every caret to the end of its text, validates default widgets,
    /// and selects the active window's default widget.
    pub fn activate(&mut self) {
        let Some(first) = self.windows.first().map(|w| w.id) else {
            tracing::warn!("activate called with no windows");
            return;
        };

        let font = self.font.as_ref();
        for window in &mut self.windows {
            window.visit_widgets_mut(&mut |widget| {
                if let Some(text) = widget.kind.single_line_text_mut() {
                    text.caret_to_end();
                }
                refresh_single_line(widget, font);
            });
        }
        self.revalidate();

        for window_index in 0..self.windows.len() {
            let default = self.windows[window_index].default_active_widget;
            if !default.is_valid() {
                continue;
            }
            let usable = self
                .index
                .resolve_widget(default)
                .ok()
                .and_then(|path| widget_from_path(&self.windows, path).ok())
                .is_some_and(Widget::selectable);
            if !usable {
                tracing::warn!(widget_id = ?default, "default widget is stale or not selectable");
                self.windows[window_index].default_active_widget = WidgetId::INVALID;
            }
        }

        self.interaction.clear();
        self.cursor_icon = CursorIcon::Standard;
        self.set_display_window(first, true);
        self.interaction.set_active_window(Some(first));
        self.refresh_multi_line_text();
        self.recalculate_navigation_links();

        let default = self.windows[0].default_active_widget;
        if default.is_valid() {
            self.set_selected(default);
        }
        tracing::debug!(window_id = ?first, "interface activated");
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Widget by id.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        let path = self.index.resolve_widget(id).ok()?;
        widget_from_path(&self.windows, path).ok()
    }

    /// Classifies a raw id.
    #[must_use]
    pub fn id_kind(&self, raw: u32) -> IdKind {
        self.index.id_kind(raw)
    }

    /// Id of a top-level widget found by window tag and widget tag.
    #[must_use]
    pub fn widget_id_by_tag(&self, window_tag: &str, widget_tag: &str) -> Option<WidgetId> {
        self.windows
            .iter()
            .find(|w| w.tag == window_tag)?
            .widgets
            .iter()
            .find(|w| w.tag == widget_tag)
            .map(|w| w.id)
    }

    /// Text of a widget: the label, input text, current dropdown option, or
    /// multi-line text.
    #[must_use]
    pub fn widget_text(&self, id: WidgetId) -> Option<String> {
        let widget = self.lookup(id, "widget_text")?;
        match &widget.kind {
            WidgetKind::Text(w) => Some(w.text.text().to_owned()),
            WidgetKind::Button(w) => Some(w.text.text().to_owned()),
            WidgetKind::InputText(w) => Some(w.text.text().to_owned()),
            WidgetKind::DropDown(w) => w.current_text().map(str::to_owned),
            _ => None,
        }
    }

    /// True if `id` is the selected widget.
    #[must_use]
    pub fn is_widget_selected(&self, id: WidgetId) -> bool {
        self.interaction.selected() == Some(id)
    }

    /// Window that owns a widget.
    #[must_use]
    pub fn parent_window_of(&self, id: WidgetId) -> Option<WindowId> {
        let path = self.locate(id, "parent_window_of")?;
        path.window_index().and_then(|i| self.windows.get(i)).map(|w| w.id)
    }

    /// Container that owns a widget, or `None` at window top level.
    #[must_use]
    pub fn parent_widget_of(&self, id: WidgetId) -> Option<WidgetId> {
        let path = self.locate(id, "parent_widget_of")?.parent()?;
        if !path.is_widget() {
            return None;
        }
        widget_from_path(&self.windows, &path).ok().map(|w| w.id)
    }

    /// Resolved world bounds of a widget.
    #[must_use]
    pub fn widget_bounds(&self, id: WidgetId) -> Option<Rect> {
        let path = self.locate(id, "widget_bounds")?;
        match bounds_from_path(&self.windows, &path, self.viewport) {
            Ok(bounds) => Some(bounds.widget),
            Err(err) => {
                report(&err, "widget_bounds");
                None
            }
        }
    }

    /// Bounds a widget resolves against: its window, or its container slot.
    #[must_use]
    pub fn parent_bounds(&self, id: WidgetId) -> Option<Rect> {
        let path = self.locate(id, "parent_bounds")?;
        match bounds_from_path(&self.windows, &path, self.viewport) {
            Ok(bounds) => Some(bounds.parent),
            Err(err) => {
                report(&err, "parent_bounds");
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Replaces a widget's text. Works on buttons, input text, and text.
    pub fn set_widget_text(&mut self, id: WidgetId, text: &str) -> bool {
        let font = self.font.as_ref();
        let Some(path) = self.locate(id, "set_widget_text") else {
            return false;
        };
        let Ok(widget) = widget_from_path_mut(&mut self.windows, &path) else {
            return false;
        };
        if let Some(single) = widget.kind.single_line_text_mut() {
            single.set_text(text);
            single.refresh_metrics(font);
        } else if let Some(multi) = widget.kind.multi_line_text_mut() {
            multi.set_text(text);
        } else {
            tracing::warn!(widget_id = ?id, kind = widget.widget_type().name(), "widget has no text");
            return false;
        }
        self.refresh_multi_line_text();
        true
    }

    /// Replaces a widget's text, found by tags.
    pub fn set_widget_text_by_tag(&mut self, window_tag: &str, widget_tag: &str, text: &str) -> bool {
        match self.widget_id_by_tag(window_tag, widget_tag) {
            Some(id) => self.set_widget_text(id, text),
            None => {
                tracing::warn!(window_tag, widget_tag, "no widget with tag");
                false
            }
        }
    }

    /// Sets a widget's text colour.
    pub fn set_widget_text_color(&mut self, id: WidgetId, color: Color) -> bool {
        let Some(widget) = self.lookup_mut(id, "set_widget_text_color") else {
            return false;
        };
        match &mut widget.kind {
            WidgetKind::Text(w) => w.text.color = color,
            WidgetKind::Button(w) => w.text.color = color,
            WidgetKind::InputText(w) => w.text.color = color,
            WidgetKind::DropDown(w) => w.options.iter_mut().for_each(|o| o.color = color),
            other => {
                tracing::warn!(widget_id = ?id, kind = other.widget_type().name(), "widget has no text");
                return false;
            }
        }
        true
    }

    /// Sets a widget's background colour.
    pub fn set_widget_background_color(&mut self, id: WidgetId, color: Color) -> bool {
        let Some(widget) = self.lookup_mut(id, "set_widget_background_color") else {
            return false;
        };
        if let Some(selection) = widget.kind.selection_data_mut() {
            selection.background_color = color;
        } else if let Some(container) = widget.kind.container_data_mut() {
            container.background_color = color;
        } else {
            tracing::warn!(widget_id = ?id, "widget has no background");
            return false;
        }
        true
    }

    /// Sets whether a widget can take selection. Clears any slot that would
    /// otherwise hold an unselectable widget, and recalculates links.
    pub fn set_widget_selectable(&mut self, id: WidgetId, selectable: bool) -> bool {
        let Some(widget) = self.lookup_mut(id, "set_widget_selectable") else {
            return false;
        };
        let Some(selection) = widget.kind.selection_data_mut() else {
            tracing::warn!(widget_id = ?id, "widget is not focusable");
            return false;
        };
        selection.selectable = selectable;
        if !selectable {
            self.interaction.forget_widget(id);
            if self.interaction.hovered().is_none() {
                self.cursor_icon = CursorIcon::Standard;
            }
        }
        self.recalculate_navigation_links();
        true
    }

    /// Sets whether a widget can take selection, found by tags.
    pub fn set_widget_selectable_by_tag(&mut self, window_tag: &str, widget_tag: &str, selectable: bool) -> bool {
        match self.widget_id_by_tag(window_tag, widget_tag) {
            Some(id) => self.set_widget_selectable(id, selectable),
            None => {
                tracing::warn!(window_tag, widget_tag, "no widget with tag");
                false
            }
        }
    }

    /// Moves or resizes a widget, then recalculates links.
    pub fn set_widget_placement(&mut self, id: WidgetId, placement: Placement) -> bool {
        let Some(widget) = self.lookup_mut(id, "set_widget_placement") else {
            return false;
        };
        widget.placement = placement;
        self.refresh_multi_line_text();
        self.recalculate_navigation_links();
        true
    }

    /// Points an image widget at a new texture.
    pub fn set_widget_image(&mut self, id: WidgetId, handle: crate::assets::AssetHandle) -> bool {
        let Some(widget) = self.lookup_mut(id, "set_widget_image") else {
            return false;
        };
        match widget.kind.image_data_mut() {
            Some(image) => {
                image.set_texture_handle(handle);
                true
            }
            None => {
                tracing::warn!(widget_id = ?id, "widget has no image");
                false
            }
        }
    }

    /// Recomputes an image widget's size from its texture's aspect ratio,
    /// keeping width (`use_x_as_base`) or height.
    pub fn apply_fixed_aspect_ratio(
        &mut self,
        id: WidgetId,
        use_x_as_base: bool,
        assets: &dyn AssetResolver,
    ) -> bool {
        let Some(path) = self.locate(id, "apply_fixed_aspect_ratio") else {
            return false;
        };
        let parent = match bounds_from_path(&self.windows, &path, self.viewport) {
            Ok(bounds) => bounds.parent,
            Err(err) => {
                report(&err, "apply_fixed_aspect_ratio");
                return false;
            }
        };
        let Ok(widget) = widget_from_path_mut(&mut self.windows, &path) else {
            return false;
        };
        let placement = widget.placement;
        let Some(image) = widget.kind.image_data_mut() else {
            tracing::warn!(widget_id = ?id, "widget has no image");
            return false;
        };
        if !image.fixed_aspect_ratio {
            tracing::warn!(widget_id = ?id, "image does not use a fixed aspect ratio");
            return false;
        }
        if image.texture.is_none() {
            image.texture = assets.texture_from_handle(image.texture_handle);
        }
        let Some(ratio) = image.texture.and_then(|t| t.aspect_ratio()).filter(|r| *r > 0.0) else {
            tracing::warn!(widget_id = ?id, "image texture unavailable");
            return false;
        };

        let size = placement.resolve_size(parent.size());
        let mut updated = placement;
        if use_x_as_base {
            updated.height = placement.height.unresolve(size.x / ratio, parent.height);
        } else {
            updated.width = placement.width.unresolve(size.y * ratio, parent.width);
        }
        widget.placement = updated;
        self.recalculate_navigation_links();
        true
    }

    /// Sets a slider's value, clamped to its range.
    pub fn set_slider_value(&mut self, id: WidgetId, value: f32) -> bool {
        let Some(widget) = self.lookup_mut(id, "set_slider_value") else {
            return false;
        };
        match &mut widget.kind {
            WidgetKind::Slider(slider) => {
                slider.current_value = value.clamp(slider.bounds.x, slider.bounds.y);
                true
            }
            other => {
                tracing::warn!(widget_id = ?id, kind = other.widget_type().name(), "widget is not a slider");
                false
            }
        }
    }

    /// Recomputes cached line layout for every multi-line text widget whose
    /// text or width changed.
    pub(crate) fn refresh_multi_line_text(&mut self) {
        let mut targets = Vec::new();
        for (window_index, window) in self.windows.iter().enumerate() {
            for (widget_index, widget) in window.widgets.iter().enumerate() {
                collect_multi_line(widget, Path::from_indices(vec![window_index, widget_index]), &mut targets);
            }
        }
        for path in targets {
            let Ok(bounds) = bounds_from_path(&self.windows, &path, self.viewport) else {
                continue;
            };
            let font = self.font.as_ref();
            let (config, viewport) = (&self.config, self.viewport);
            if let Ok(widget) = widget_from_path_mut(&mut self.windows, &path) {
                if let Some(text) = widget.kind.multi_line_text_mut() {
                    let scale = text_scale(config, viewport, text.text_size);
                    text.refresh_metrics(font, bounds.widget.width, scale);
                }
            }
        }
    }
}

impl Default for UserInterface {
    fn default() -> Self {
        Self::new(UiConfig::default(), MonospaceFont::default(), Viewport::default())
    }
}

impl std::fmt::Debug for UserInterface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserInterface")
            .field("viewport", &self.viewport)
            .field("windows", &self.windows.len())
            .field("displayed", &self.displayed)
            .field("interaction", &self.interaction)
            .finish_non_exhaustive()
    }
}

fn refresh_single_line(widget: &mut Widget, font: &dyn FontMetrics) {
    if let Some(text) = widget.kind.single_line_text_mut() {
        text.refresh_metrics(font);
    }
    if let WidgetKind::DropDown(dropdown) = &mut widget.kind {
        for option in &mut dropdown.options {
            option.refresh_metrics(font);
        }
    }
}

fn collect_multi_line(widget: &Widget, path: Path, out: &mut Vec<Path>) {
    for (child_index, child) in widget.children().iter().enumerate() {
        collect_multi_line(child, path.child(child_index), out);
    }
    if widget.kind.multi_line_text().is_some() {
        out.push(path);
    }
}
