//! Render pass: walks displayed windows and issues backend draws.

use crate::assets::AssetResolver;
use crate::layout::Rect;
use crate::render::RenderBackend;
use crate::style::Color;
use crate::text::{caret_x, line_text, multi_line_origins, single_line_start, text_scale};
use crate::widget::{ImageData, SingleLineTextData, Widget, WidgetKind};

use super::events::{dropdown_row, slider_handle};
use super::UserInterface;

/// Depth added per nesting level so children draw over parents.
const DEPTH_STEP: f32 = 0.001;
/// Caret width in pixels.
const CARET_WIDTH: f32 = 2.0;
/// Slider track thickness as a fraction of the slider height.
const SLIDER_TRACK_HEIGHT: f32 = 0.1;

impl UserInterface {
    /// Draws every displayed window, in display order.
    ///
    /// Textures are resolved on first draw and cached on the widget.
    pub fn render(&mut self, backend: &mut dyn RenderBackend, assets: &dyn AssetResolver) {
        let displayed = self.displayed_indices();
        for &window_index in &displayed {
            if let Some(window) = self.windows.get_mut(window_index) {
                window.visit_widgets_mut(&mut |widget| resolve_textures(widget, assets));
            }
        }
        self.refresh_multi_line_text();

        for &window_index in &displayed {
            let Some(window) = self.windows.get(window_index) else {
                continue;
            };
            let bounds = window.bounds(self.viewport);
            if window.background_color.is_visible() {
                backend.draw_quad(bounds, window.z, window.background_color);
            }
            for widget in &window.widgets {
                self.draw_widget(backend, widget, bounds, window.z + DEPTH_STEP);
            }
        }
    }

    fn highlight(&self, widget: &Widget, base: Color) -> Color {
        let id = Some(widget.id);
        if self.interaction.editing() == id {
            self.config.editing_color
        } else if self.interaction.selected() == id {
            self.config.select_color
        } else if self.interaction.hovered() == id {
            self.config.hovered_color
        } else {
            base
        }
    }

    fn draw_widget(&self, backend: &mut dyn RenderBackend, widget: &Widget, parent: Rect, z: f32) {
        let bounds = widget.placement.resolve(parent);

        if let Some(selection) = widget.kind.selection_data() {
            let fill = self.highlight(widget, selection.background_color);
            if fill.is_visible() {
                backend.draw_quad(bounds, z, fill);
            }
        }

        match &widget.kind {
            WidgetKind::Text(text) => {
                let scale = text_scale(&self.config, self.viewport, text.text.text_size);
                let origins = multi_line_origins(self.font.as_ref(), &text.text, bounds, scale);
                for (line, origin) in origins.into_iter().enumerate() {
                    if let Some(content) = line_text(&text.text, line) {
                        backend.draw_text(&content, origin, z, scale, text.text.color);
                    }
                }
            }
            WidgetKind::Button(button) => self.draw_label(backend, &button.text, bounds, z),
            WidgetKind::Checkbox(checkbox) => draw_image(backend, checkbox.current_image(), bounds, z),
            WidgetKind::Container(_)
            | WidgetKind::HorizontalContainer(_)
            | WidgetKind::VerticalContainer(_) => {
                let Some(container) = widget.kind.container_data() else {
                    return;
                };
                if container.background_color.is_visible() {
                    backend.draw_quad(bounds, z, container.background_color);
                }
                for (index, child) in container.widgets.iter().enumerate() {
                    let slot = widget.kind.child_slot(bounds, index);
                    self.draw_widget(backend, child, slot, z + DEPTH_STEP);
                }
            }
            WidgetKind::DropDown(dropdown) => {
                if let Some(current) = dropdown.options.get(dropdown.current_option) {
                    self.draw_label(backend, current, bounds, z);
                }
                if dropdown.open {
                    let row_z = z + DEPTH_STEP;
                    for (row, option) in dropdown.visible_options().enumerate() {
                        let row_bounds = dropdown_row(bounds, row);
                        if dropdown.option_background_color.is_visible() {
                            backend.draw_quad(row_bounds, row_z, dropdown.option_background_color);
                        }
                        self.draw_label(backend, &dropdown.options[option], row_bounds, row_z);
                    }
                }
            }
            WidgetKind::Image(image) => draw_image(backend, &image.image, bounds, z),
            WidgetKind::ImageButton(button) => draw_image(backend, &button.image, bounds, z),
            WidgetKind::InputText(input) => {
                self.draw_label(backend, &input.text, bounds, z);
                if self.interaction.editing() == Some(widget.id) && self.caret.visible() {
                    let scale = text_scale(&self.config, self.viewport, input.text.text_size);
                    let start = single_line_start(
                        &input.text,
                        bounds,
                        scale,
                        self.config.text_center_adjustment,
                    );
                    let x = caret_x(self.font.as_ref(), &input.text, start, scale);
                    let height = self.font.line_height() * scale;
                    backend.draw_quad(
                        Rect::new(x, start.y, CARET_WIDTH, height),
                        z + DEPTH_STEP,
                        input.text.color,
                    );
                }
            }
            WidgetKind::Slider(slider) => {
                let track_height = bounds.height * SLIDER_TRACK_HEIGHT;
                let track = Rect::new(
                    bounds.x,
                    bounds.y + bounds.height * 0.5 - track_height * 0.5,
                    bounds.width,
                    track_height,
                );
                backend.draw_quad(track, z + DEPTH_STEP, slider.line_color);
                let handle = slider_handle(
                    bounds,
                    slider,
                    self.config.slider_handle_width,
                    self.config.slider_handle_height,
                );
                backend.draw_quad(handle, z + DEPTH_STEP * 2.0, slider.slider_color);
            }
        }
    }

    fn draw_label(&self, backend: &mut dyn RenderBackend, text: &SingleLineTextData, bounds: Rect, z: f32) {
        if text.is_empty() {
            return;
        }
        let scale = text_scale(&self.config, self.viewport, text.text_size);
        let start = single_line_start(text, bounds, scale, self.config.text_center_adjustment);
        backend.draw_text(text.text(), start, z + DEPTH_STEP, scale, text.color);
    }
}

fn draw_image(backend: &mut dyn RenderBackend, image: &ImageData, bounds: Rect, z: f32) {
    if let Some(texture) = image.texture {
        backend.draw_image(bounds, z + DEPTH_STEP, texture);
    }
}

fn resolve_textures(widget: &mut Widget, assets: &dyn AssetResolver) {
    let id = widget.id;
    let resolve = |image: &mut ImageData| {
        if image.texture.is_none() && !image.texture_handle.is_empty() {
            image.texture = assets.texture_from_handle(image.texture_handle);
            if image.texture.is_none() {
                tracing::warn!(widget_id = ?id, handle = ?image.texture_handle, "texture not found");
            }
        }
    };
    match &mut widget.kind {
        WidgetKind::Checkbox(checkbox) => {
            resolve(&mut checkbox.image_checked);
            resolve(&mut checkbox.image_unchecked);
        }
        WidgetKind::Image(image) => resolve(&mut image.image),
        WidgetKind::ImageButton(button) => resolve(&mut button.image),
        _ => {}
    }
}
