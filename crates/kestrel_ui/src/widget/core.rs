//! Core widget types shared by every kind.

use crate::assets::{AssetHandle, TextureRef};
use crate::layout::Placement;
use crate::script::Callback;
use crate::style::Color;

use super::kinds::WidgetKind;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u32);

impl WidgetId {
    /// Reserved sentinel meaning "no widget".
    pub const INVALID: Self = Self(u32::MAX);

    /// Creates a new widget ID.
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

impl Default for WidgetId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Directional navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller x.
    Left,
    /// Towards larger x.
    Right,
    /// Towards larger y (UI space is y-up).
    Up,
    /// Towards smaller y.
    Down,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Left, Self::Right, Self::Up, Self::Down];
}

/// Nearest selectable neighbour in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationLinks {
    /// Neighbour to the left.
    pub left: WidgetId,
    /// Neighbour to the right.
    pub right: WidgetId,
    /// Neighbour above.
    pub up: WidgetId,
    /// Neighbour below.
    pub down: WidgetId,
}

impl NavigationLinks {
    /// Links with every direction unset.
    pub const NONE: Self = Self {
        left: WidgetId::INVALID,
        right: WidgetId::INVALID,
        up: WidgetId::INVALID,
        down: WidgetId::INVALID,
    };

    /// Link in a direction.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> WidgetId {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Sets the link in a direction.
    pub fn set(&mut self, direction: Direction, id: WidgetId) {
        match direction {
            Direction::Left => self.left = id,
            Direction::Right => self.right = id,
            Direction::Up => self.up = id,
            Direction::Down => self.down = id,
        }
    }
}

/// Data carried by every focusable kind.
#[derive(Debug, Clone)]
pub struct SelectionData {
    /// Background fill.
    pub background_color: Color,
    /// Invoked when the widget is pressed.
    pub on_press: Option<Callback>,
    /// Whether the widget can take selection.
    pub selectable: bool,
    /// Computed by the navigation pass.
    pub navigation_links: NavigationLinks,
}

impl Default for SelectionData {
    fn default() -> Self {
        Self {
            background_color: Color::WIDGET,
            on_press: None,
            selectable: true,
            navigation_links: NavigationLinks::NONE,
        }
    }
}

/// Data carried by every container kind.
#[derive(Debug, Clone, Default)]
pub struct ContainerData {
    /// Background fill.
    pub background_color: Color,
    /// Owned children in layout order.
    pub widgets: Vec<Widget>,
}

/// Data carried by image kinds.
#[derive(Debug, Clone, Default)]
pub struct ImageData {
    /// Texture to draw.
    pub texture_handle: AssetHandle,
    /// Resolved lazily from `texture_handle`.
    pub texture: Option<TextureRef>,
    /// Whether size follows the texture's aspect ratio.
    pub fixed_aspect_ratio: bool,
}

impl ImageData {
    /// Image data for a texture handle.
    #[must_use]
    pub fn new(texture_handle: AssetHandle) -> Self {
        Self {
            texture_handle,
            ..Self::default()
        }
    }

    /// Replaces the handle and drops the resolved texture.
    pub fn set_texture_handle(&mut self, handle: AssetHandle) {
        self.texture_handle = handle;
        self.texture = None;
    }
}

/// Fieldless widget kind, for queries and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetType {
    /// Static text.
    Text,
    /// Push button.
    Button,
    /// Two-state toggle.
    Checkbox,
    /// Free-form container.
    Container,
    /// Container laid out in columns.
    HorizontalContainer,
    /// Container laid out in rows.
    VerticalContainer,
    /// Option picker.
    DropDown,
    /// Static image.
    Image,
    /// Pressable image.
    ImageButton,
    /// Editable single-line text.
    InputText,
    /// Value slider.
    Slider,
}

impl WidgetType {
    /// Human-readable kind name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Button => "Button",
            Self::Checkbox => "Checkbox",
            Self::Container => "Container",
            Self::HorizontalContainer => "HorizontalContainer",
            Self::VerticalContainer => "VerticalContainer",
            Self::DropDown => "DropDown",
            Self::Image => "Image",
            Self::ImageButton => "ImageButton",
            Self::InputText => "InputText",
            Self::Slider => "Slider",
        }
    }
}

/// A node in a window's widget tree.
#[derive(Debug, Clone)]
pub struct Widget {
    /// Unique id.
    pub id: WidgetId,
    /// Author-facing name.
    pub tag: String,
    /// Size and offset relative to the parent.
    pub placement: Placement,
    /// Kind and kind-specific payload.
    pub kind: WidgetKind,
}

impl Widget {
    /// Creates a widget.
    #[must_use]
    pub fn new(id: WidgetId, tag: impl Into<String>, kind: WidgetKind) -> Self {
        Self {
            id,
            tag: tag.into(),
            placement: Placement::default(),
            kind,
        }
    }

    /// Sets the placement.
    #[must_use]
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Fieldless kind.
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        self.kind.widget_type()
    }

    /// True if the kind carries selection data with the flag set.
    #[must_use]
    pub fn selectable(&self) -> bool {
        self.kind.selection_data().is_some_and(|data| data.selectable)
    }

    /// Owned children, empty for non-containers.
    #[must_use]
    pub fn children(&self) -> &[Widget] {
        self.kind.container_data().map_or(&[], |data| data.widgets.as_slice())
    }

    /// Visits this widget and every descendant in pre-order.
    pub fn visit(&self, f: &mut impl FnMut(&Widget)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Visits this widget and every descendant mutably in pre-order.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Widget)) {
        f(self);
        if let Some(data) = self.kind.container_data_mut() {
            for child in &mut data.widgets {
                child.visit_mut(f);
            }
        }
    }
}
