//! The closed set of widget kinds and their payloads.

use crate::assets::AssetHandle;
use crate::layout::{ColumnLayout, Rect, RowLayout, Vec2};
use crate::script::Callback;
use crate::style::Color;

use super::core::{ContainerData, ImageData, SelectionData, Widget, WidgetId, WidgetType};
use super::text::{MultiLineTextData, SingleLineTextData};

/// Static multi-line text.
#[derive(Debug, Clone, Default)]
pub struct TextWidget {
    /// Text payload.
    pub text: MultiLineTextData,
}

/// Push button with a label.
#[derive(Debug, Clone, Default)]
pub struct ButtonWidget {
    /// Focus data.
    pub selection: SelectionData,
    /// Label.
    pub text: SingleLineTextData,
}

/// Two-state toggle drawn with one of two images.
#[derive(Debug, Clone, Default)]
pub struct CheckboxWidget {
    /// Focus data.
    pub selection: SelectionData,
    /// Current state.
    pub checked: bool,
    /// Image while checked.
    pub image_checked: ImageData,
    /// Image while unchecked.
    pub image_unchecked: ImageData,
}

impl CheckboxWidget {
    /// Image for the current state.
    #[must_use]
    pub const fn current_image(&self) -> &ImageData {
        if self.checked {
            &self.image_checked
        } else {
            &self.image_unchecked
        }
    }
}

/// Container whose children resolve against its own bounds.
#[derive(Debug, Clone, Default)]
pub struct ContainerWidget {
    /// Children.
    pub container: ContainerData,
}

/// Container that hands each child a column slot.
#[derive(Debug, Clone, Default)]
pub struct HorizontalContainerWidget {
    /// Children.
    pub container: ContainerData,
    /// Column geometry.
    pub columns: ColumnLayout,
}

/// Container that hands each child a row slot, top to bottom.
#[derive(Debug, Clone, Default)]
pub struct VerticalContainerWidget {
    /// Children.
    pub container: ContainerData,
    /// Row geometry.
    pub rows: RowLayout,
}

/// Option picker that opens downward.
#[derive(Debug, Clone)]
pub struct DropDownWidget {
    /// Focus data.
    pub selection: SelectionData,
    /// Options in display order.
    pub options: Vec<SingleLineTextData>,
    /// Index of the current option.
    pub current_option: usize,
    /// Whether the option rows are shown.
    pub open: bool,
    /// Fill behind option rows.
    pub option_background_color: Color,
    /// Invoked with the picked option's text.
    pub on_select_option: Option<Callback>,
}

impl DropDownWidget {
    /// Creates a dropdown with the first option current.
    #[must_use]
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            selection: SelectionData::default(),
            options: options.into_iter().map(SingleLineTextData::new).collect(),
            current_option: 0,
            open: false,
            option_background_color: Color::WIDGET,
            on_select_option: None,
        }
    }

    /// Text of the current option, if any.
    #[must_use]
    pub fn current_text(&self) -> Option<&str> {
        self.options.get(self.current_option).map(SingleLineTextData::text)
    }

    /// Indices of the options shown below the widget while open, in row order.
    pub fn visible_options(&self) -> impl Iterator<Item = usize> + '_ {
        let current = self.current_option;
        (0..self.options.len()).filter(move |&index| index != current)
    }
}

impl Default for DropDownWidget {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

/// Static image.
#[derive(Debug, Clone, Default)]
pub struct ImageWidget {
    /// Image payload.
    pub image: ImageData,
}

/// Pressable image.
#[derive(Debug, Clone, Default)]
pub struct ImageButtonWidget {
    /// Focus data.
    pub selection: SelectionData,
    /// Image payload.
    pub image: ImageData,
}

/// Editable single-line text.
#[derive(Debug, Clone, Default)]
pub struct InputTextWidget {
    /// Focus data.
    pub selection: SelectionData,
    /// Editable text.
    pub text: SingleLineTextData,
    /// Invoked after every caret move or edit.
    pub on_move_cursor: Option<Callback>,
}

/// Horizontal slider over a value range.
#[derive(Debug, Clone)]
pub struct SliderWidget {
    /// Focus data.
    pub selection: SelectionData,
    /// Value range `(min, max)`.
    pub bounds: Vec2,
    /// Current value.
    pub current_value: f32,
    /// Track colour.
    pub line_color: Color,
    /// Handle colour.
    pub slider_color: Color,
    /// Invoked with the new value while dragging.
    pub on_move_slider: Option<Callback>,
}

impl SliderWidget {
    /// Creates a slider, replacing an empty or inverted range with `[0, 1]`.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let bounds = if min.is_finite() && max.is_finite() && min < max {
            Vec2::new(min, max)
        } else {
            tracing::warn!(min, max, "invalid slider bounds, using [0, 1]");
            Vec2::new(0.0, 1.0)
        };
        Self {
            selection: SelectionData::default(),
            bounds,
            current_value: bounds.x,
            line_color: Color::WHITE,
            slider_color: Color::WIDGET,
            on_move_slider: None,
        }
    }

    /// Current value normalised to `[0, 1]` over the range.
    #[must_use]
    pub fn normalized_value(&self) -> f32 {
        ((self.current_value - self.bounds.x) / (self.bounds.y - self.bounds.x)).clamp(0.0, 1.0)
    }

    /// Value at a normalised track position.
    #[must_use]
    pub fn value_at(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        self.bounds.x + (self.bounds.y - self.bounds.x) * t
    }
}

impl Default for SliderWidget {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// A widget's kind and payload.
#[derive(Debug, Clone)]
pub enum WidgetKind {
    /// Static text.
    Text(TextWidget),
    /// Push button.
    Button(ButtonWidget),
    /// Two-state toggle.
    Checkbox(CheckboxWidget),
    /// Free-form container.
    Container(ContainerWidget),
    /// Column container.
    HorizontalContainer(HorizontalContainerWidget),
    /// Row container.
    VerticalContainer(VerticalContainerWidget),
    /// Option picker.
    DropDown(DropDownWidget),
    /// Static image.
    Image(ImageWidget),
    /// Pressable image.
    ImageButton(ImageButtonWidget),
    /// Editable text.
    InputText(InputTextWidget),
    /// Value slider.
    Slider(SliderWidget),
}

impl WidgetKind {
    /// Fieldless kind.
    #[must_use]
    pub const fn widget_type(&self) -> WidgetType {
        match self {
            Self::Text(_) => WidgetType::Text,
            Self::Button(_) => WidgetType::Button,
            Self::Checkbox(_) => WidgetType::Checkbox,
            Self::Container(_) => WidgetType::Container,
            Self::HorizontalContainer(_) => WidgetType::HorizontalContainer,
            Self::VerticalContainer(_) => WidgetType::VerticalContainer,
            Self::DropDown(_) => WidgetType::DropDown,
            Self::Image(_) => WidgetType::Image,
            Self::ImageButton(_) => WidgetType::ImageButton,
            Self::InputText(_) => WidgetType::InputText,
            Self::Slider(_) => WidgetType::Slider,
        }
    }

    /// Focus data, for focusable kinds.
    #[must_use]
    pub const fn selection_data(&self) -> Option<&SelectionData> {
        match self {
            Self::Button(w) => Some(&w.selection),
            Self::Checkbox(w) => Some(&w.selection),
            Self::DropDown(w) => Some(&w.selection),
            Self::ImageButton(w) => Some(&w.selection),
            Self::InputText(w) => Some(&w.selection),
            Self::Slider(w) => Some(&w.selection),
            _ => None,
        }
    }

    /// Mutable focus data, for focusable kinds.
    pub fn selection_data_mut(&mut self) -> Option<&mut SelectionData> {
        match self {
            Self::Button(w) => Some(&mut w.selection),
            Self::Checkbox(w) => Some(&mut w.selection),
            Self::DropDown(w) => Some(&mut w.selection),
            Self::ImageButton(w) => Some(&mut w.selection),
            Self::InputText(w) => Some(&mut w.selection),
            Self::Slider(w) => Some(&mut w.selection),
            _ => None,
        }
    }

    /// Children, for container kinds.
    #[must_use]
    pub const fn container_data(&self) -> Option<&ContainerData> {
        match self {
            Self::Container(w) => Some(&w.container),
            Self::HorizontalContainer(w) => Some(&w.container),
            Self::VerticalContainer(w) => Some(&w.container),
            _ => None,
        }
    }

    /// Mutable children, for container kinds.
    pub fn container_data_mut(&mut self) -> Option<&mut ContainerData> {
        match self {
            Self::Container(w) => Some(&mut w.container),
            Self::HorizontalContainer(w) => Some(&mut w.container),
            Self::VerticalContainer(w) => Some(&mut w.container),
            _ => None,
        }
    }

    /// Image payload. For a checkbox, the image of its current state.
    #[must_use]
    pub const fn image_data(&self) -> Option<&ImageData> {
        match self {
            Self::Image(w) => Some(&w.image),
            Self::ImageButton(w) => Some(&w.image),
            Self::Checkbox(w) => Some(w.current_image()),
            _ => None,
        }
    }

    /// Mutable image payload. A checkbox exposes its unchecked image.
    pub fn image_data_mut(&mut self) -> Option<&mut ImageData> {
        match self {
            Self::Image(w) => Some(&mut w.image),
            Self::ImageButton(w) => Some(&mut w.image),
            Self::Checkbox(w) => Some(&mut w.image_unchecked),
            _ => None,
        }
    }

    /// Single-line text payload.
    #[must_use]
    pub const fn single_line_text(&self) -> Option<&SingleLineTextData> {
        match self {
            Self::Button(w) => Some(&w.text),
            Self::InputText(w) => Some(&w.text),
            _ => None,
        }
    }

    /// Mutable single-line text payload.
    pub fn single_line_text_mut(&mut self) -> Option<&mut SingleLineTextData> {
        match self {
            Self::Button(w) => Some(&mut w.text),
            Self::InputText(w) => Some(&mut w.text),
            _ => None,
        }
    }

    /// Multi-line text payload.
    #[must_use]
    pub const fn multi_line_text(&self) -> Option<&MultiLineTextData> {
        match self {
            Self::Text(w) => Some(&w.text),
            _ => None,
        }
    }

    /// Mutable multi-line text payload.
    pub fn multi_line_text_mut(&mut self) -> Option<&mut MultiLineTextData> {
        match self {
            Self::Text(w) => Some(&mut w.text),
            _ => None,
        }
    }

    /// Bounds a child at `index` resolves against, given this widget's own
    /// resolved bounds. Non-containers hand their bounds through unchanged.
    #[must_use]
    pub fn child_slot(&self, own: Rect, index: usize) -> Rect {
        match self {
            Self::HorizontalContainer(w) => w.columns.slot(own, index),
            Self::VerticalContainer(w) => w.rows.slot(own, index),
            _ => own,
        }
    }
}

impl Widget {
    /// Static multi-line text.
    #[must_use]
    pub fn text(id: WidgetId, tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, tag, WidgetKind::Text(TextWidget { text: MultiLineTextData::new(text) }))
    }

    /// Button with a label.
    #[must_use]
    pub fn button(id: WidgetId, tag: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(
            id,
            tag,
            WidgetKind::Button(ButtonWidget {
                selection: SelectionData::default(),
                text: SingleLineTextData::new(label),
            }),
        )
    }

    /// Unchecked checkbox.
    #[must_use]
    pub fn checkbox(id: WidgetId, tag: impl Into<String>) -> Self {
        Self::new(id, tag, WidgetKind::Checkbox(CheckboxWidget::default()))
    }

    /// Free-form container.
    #[must_use]
    pub fn container(id: WidgetId, tag: impl Into<String>) -> Self {
        Self::new(id, tag, WidgetKind::Container(ContainerWidget::default()))
    }

    /// Column container.
    #[must_use]
    pub fn horizontal_container(id: WidgetId, tag: impl Into<String>, columns: ColumnLayout) -> Self {
        Self::new(
            id,
            tag,
            WidgetKind::HorizontalContainer(HorizontalContainerWidget {
                container: ContainerData::default(),
                columns,
            }),
        )
    }

    /// Row container.
    #[must_use]
    pub fn vertical_container(id: WidgetId, tag: impl Into<String>, rows: RowLayout) -> Self {
        Self::new(
            id,
            tag,
            WidgetKind::VerticalContainer(VerticalContainerWidget {
                container: ContainerData::default(),
                rows,
            }),
        )
    }

    /// Dropdown over the given options.
    #[must_use]
    pub fn drop_down<S: Into<String>>(
        id: WidgetId,
        tag: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(id, tag, WidgetKind::DropDown(DropDownWidget::new(options)))
    }

    /// Static image.
    #[must_use]
    pub fn image(id: WidgetId, tag: impl Into<String>, texture: AssetHandle) -> Self {
        Self::new(id, tag, WidgetKind::Image(ImageWidget { image: ImageData::new(texture) }))
    }

    /// Pressable image.
    #[must_use]
    pub fn image_button(id: WidgetId, tag: impl Into<String>, texture: AssetHandle) -> Self {
        Self::new(
            id,
            tag,
            WidgetKind::ImageButton(ImageButtonWidget {
                selection: SelectionData::default(),
                image: ImageData::new(texture),
            }),
        )
    }

    /// Editable text.
    #[must_use]
    pub fn input_text(id: WidgetId, tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            tag,
            WidgetKind::InputText(InputTextWidget {
                selection: SelectionData::default(),
                text: SingleLineTextData::new(text),
                on_move_cursor: None,
            }),
        )
    }

    /// Slider over `[min, max]`.
    #[must_use]
    pub fn slider(id: WidgetId, tag: impl Into<String>, min: f32, max: f32) -> Self {
        Self::new(id, tag, WidgetKind::Slider(SliderWidget::new(min, max)))
    }

    /// Appends a child. Ignored with a warning on non-container kinds.
    #[must_use]
    pub fn with_child(mut self, child: Widget) -> Self {
        match self.kind.container_data_mut() {
            Some(data) => data.widgets.push(child),
            None => tracing::warn!(widget_id = ?self.id, "with_child on a non-container widget"),
        }
        self
    }

    /// Sets the press callback. Ignored on non-focusable kinds.
    #[must_use]
    pub fn with_on_press(mut self, callback: Callback) -> Self {
        if let Some(data) = self.kind.selection_data_mut() {
            data.on_press = Some(callback);
        }
        self
    }

    /// Sets the selectable flag. Ignored on non-focusable kinds.
    #[must_use]
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        if let Some(data) = self.kind.selection_data_mut() {
            data.selectable = selectable;
        }
        self
    }
}
