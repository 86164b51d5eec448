//! Layout resolution for windows and widgets.
//!
//! UI space is y-up: the origin is the bottom-left corner of the viewport,
//! `Rect::y` is a rectangle's bottom edge and "top" is the far edge.
//!
//! Every function here is pure. Resolved bounds are recomputed on demand and
//! never cached across frames.

use serde::{Deserialize, Serialize};

/// A 2D vector in UI space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A rectangle in UI space, anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (bottom edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle from a bottom-left origin and a size.
    #[must_use]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Bottom-left corner.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the top edge.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.top()
    }

    /// Returns a rectangle of the given size sharing this rectangle's center.
    #[must_use]
    pub fn centered_box(&self, size: Vec2) -> Self {
        let center = self.center();
        Self::new(center.x - size.x * 0.5, center.y - size.y * 0.5, size.x, size.y)
    }
}

/// Size of the area the UI is drawn into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Creates a new viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The viewport as a rectangle at the origin.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A length measured either against the parent or in pixels.
///
/// Values are accepted as-is; negative or out-of-range values place content
/// outside the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Fraction of the parent extent.
    Percent(f32),
    /// Fixed pixel length.
    Pixel(f32),
}

impl Dimension {
    /// Resolves against the parent extent on the same axis.
    #[must_use]
    pub fn resolve(self, parent_extent: f32) -> f32 {
        match self {
            Self::Percent(fraction) => parent_extent * fraction,
            Self::Pixel(pixels) => pixels,
        }
    }

    /// Builds a dimension of the same variant holding `resolved` expressed
    /// against `parent_extent`.
    #[must_use]
    pub fn unresolve(self, resolved: f32, parent_extent: f32) -> Self {
        match self {
            Self::Percent(_) if parent_extent != 0.0 => Self::Percent(resolved / parent_extent),
            Self::Percent(_) => Self::Percent(0.0),
            Self::Pixel(_) => Self::Pixel(resolved),
        }
    }
}

impl Default for Dimension {
    fn default() -> Self {
        Self::Percent(0.0)
    }
}

/// Edge or center an axis offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Constraint {
    /// Offset measured from the parent's near edge, never re-anchored.
    #[default]
    None,
    /// Far edge of the Y axis.
    Top,
    /// Near edge of the Y axis.
    Bottom,
    /// Near edge of the X axis.
    Left,
    /// Far edge of the X axis.
    Right,
    /// Parent center on either axis.
    Center,
}

/// Whether an axis honours its constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PositionMode {
    /// Offset is re-anchored according to the constraint.
    #[default]
    Relative,
    /// Offset is used directly.
    Absolute,
}

/// Per-axis anchoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Anchor {
    /// Addressing mode.
    pub mode: PositionMode,
    /// Anchor constraint.
    pub constraint: Constraint,
}

impl Anchor {
    /// A relative anchor with the given constraint.
    #[must_use]
    pub const fn relative(constraint: Constraint) -> Self {
        Self {
            mode: PositionMode::Relative,
            constraint,
        }
    }

    /// An absolute anchor.
    #[must_use]
    pub const fn absolute() -> Self {
        Self {
            mode: PositionMode::Absolute,
            constraint: Constraint::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// How a constraint moves an offset on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reanchor {
    Keep,
    Center,
    FarEdge,
}

impl Anchor {
    fn reanchor(self, axis: Axis) -> Reanchor {
        if self.mode == PositionMode::Absolute {
            return Reanchor::Keep;
        }
        match (self.constraint, axis) {
            (Constraint::Center, _) => Reanchor::Center,
            (Constraint::Right, Axis::X) | (Constraint::Top, Axis::Y) => Reanchor::FarEdge,
            // Near edges, None, and constraints that belong to the other axis.
            _ => Reanchor::Keep,
        }
    }

    fn apply(self, axis: Axis, offset: f32, parent_extent: f32, widget_extent: f32) -> f32 {
        match self.reanchor(axis) {
            Reanchor::Keep => offset,
            Reanchor::Center => parent_extent * 0.5 + offset - widget_extent * 0.5,
            Reanchor::FarEdge => parent_extent + offset - widget_extent,
        }
    }

    fn revert(self, axis: Axis, local: f32, parent_extent: f32, widget_extent: f32) -> f32 {
        match self.reanchor(axis) {
            Reanchor::Keep => local,
            Reanchor::Center => local - parent_extent * 0.5 + widget_extent * 0.5,
            Reanchor::FarEdge => local - parent_extent + widget_extent,
        }
    }
}

/// Size and position of a widget relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Width.
    pub width: Dimension,
    /// Height.
    pub height: Dimension,
    /// X offset.
    pub x: Dimension,
    /// Y offset.
    pub y: Dimension,
    /// X-axis anchoring.
    pub x_anchor: Anchor,
    /// Y-axis anchoring.
    pub y_anchor: Anchor,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            width: Dimension::Percent(0.3),
            height: Dimension::Percent(0.1),
            x: Dimension::Percent(0.0),
            y: Dimension::Percent(0.0),
            x_anchor: Anchor::default(),
            y_anchor: Anchor::default(),
        }
    }
}

impl Placement {
    /// A placement filling the parent.
    pub const FILL: Self = Self {
        width: Dimension::Percent(1.0),
        height: Dimension::Percent(1.0),
        x: Dimension::Percent(0.0),
        y: Dimension::Percent(0.0),
        x_anchor: Anchor::relative(Constraint::None),
        y_anchor: Anchor::relative(Constraint::None),
    };

    /// Creates a placement sized in fractions of the parent.
    #[must_use]
    pub fn percent(width: f32, height: f32) -> Self {
        Self {
            width: Dimension::Percent(width),
            height: Dimension::Percent(height),
            ..Self::default()
        }
    }

    /// Creates a placement sized in pixels.
    #[must_use]
    pub fn pixels(width: f32, height: f32) -> Self {
        Self {
            width: Dimension::Pixel(width),
            height: Dimension::Pixel(height),
            ..Self::default()
        }
    }

    /// Sets the offset.
    #[must_use]
    pub const fn at(mut self, x: Dimension, y: Dimension) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Sets both anchors.
    #[must_use]
    pub const fn anchored(mut self, x_anchor: Anchor, y_anchor: Anchor) -> Self {
        self.x_anchor = x_anchor;
        self.y_anchor = y_anchor;
        self
    }

    /// Resolved size inside a parent of the given size.
    #[must_use]
    pub fn resolve_size(&self, parent_size: Vec2) -> Vec2 {
        Vec2::new(self.width.resolve(parent_size.x), self.height.resolve(parent_size.y))
    }

    /// Resolved world position (bottom-left corner) inside `parent`.
    #[must_use]
    pub fn resolve_position(&self, parent: Rect) -> Vec2 {
        let size = self.resolve_size(parent.size());
        let x = self.x_anchor.apply(Axis::X, self.x.resolve(parent.width), parent.width, size.x);
        let y = self.y_anchor.apply(Axis::Y, self.y.resolve(parent.height), parent.height, size.y);
        Vec2::new(parent.x + x, parent.y + y)
    }

    /// Resolved world bounds inside `parent`.
    #[must_use]
    pub fn resolve(&self, parent: Rect) -> Rect {
        Rect::from_origin_size(self.resolve_position(parent), self.resolve_size(parent.size()))
    }

    /// Maps a world position back to the local offsets that would resolve to
    /// it inside `parent`, keeping the percent/pixel kind of each axis.
    #[must_use]
    pub fn local_from_world(&self, world: Vec2, parent: Rect) -> (Dimension, Dimension) {
        let size = self.resolve_size(parent.size());
        let local_x = self.x_anchor.revert(Axis::X, world.x - parent.x, parent.width, size.x);
        let local_y = self.y_anchor.revert(Axis::Y, world.y - parent.y, parent.height, size.y);
        (
            self.x.unresolve(local_x, parent.width),
            self.y.unresolve(local_y, parent.height),
        )
    }

    /// Moves the placement so it resolves to `world` inside `parent`.
    pub fn set_world_position(&mut self, world: Vec2, parent: Rect) {
        let (x, y) = self.local_from_world(world, parent);
        self.x = x;
        self.y = y;
    }
}

/// Column layout of a horizontal container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnLayout {
    /// Slot width as a fraction of the container width.
    pub column_width: f32,
    /// Gap between slots as a fraction of the container width.
    pub column_spacing: f32,
}

impl ColumnLayout {
    /// Default slot fraction.
    pub const DEFAULT_EXTENT: f32 = 0.3;
    /// Default gap fraction.
    pub const DEFAULT_SPACING: f32 = 0.05;

    /// Creates a column layout, replacing invalid values with defaults.
    #[must_use]
    pub fn new(column_width: f32, column_spacing: f32) -> Self {
        let (column_width, column_spacing) =
            validated_slots("column", column_width, column_spacing);
        Self {
            column_width,
            column_spacing,
        }
    }

    /// Bounds handed to child `index` as its parent.
    #[must_use]
    pub fn slot(&self, container: Rect, index: usize) -> Rect {
        let i = index as f32;
        Rect::new(
            container.x
                + container.width * self.column_width * i
                + container.width * self.column_spacing * i,
            container.y,
            container.width * self.column_width,
            container.height,
        )
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(Self::DEFAULT_EXTENT, Self::DEFAULT_SPACING)
    }
}

/// Row layout of a vertical container, stacked from the top down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    /// Slot height as a fraction of the container height.
    pub row_height: f32,
    /// Gap between slots as a fraction of the container height.
    pub row_spacing: f32,
}

impl RowLayout {
    /// Creates a row layout, replacing invalid values with defaults.
    #[must_use]
    pub fn new(row_height: f32, row_spacing: f32) -> Self {
        let (row_height, row_spacing) = validated_slots("row", row_height, row_spacing);
        Self {
            row_height,
            row_spacing,
        }
    }

    /// Bounds handed to child `index` as its parent.
    #[must_use]
    pub fn slot(&self, container: Rect, index: usize) -> Rect {
        let i = index as f32;
        Rect::new(
            container.x,
            container.y + container.height
                - container.height * self.row_height * (i + 1.0)
                - container.height * self.row_spacing * i,
            container.width,
            container.height * self.row_height,
        )
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self::new(ColumnLayout::DEFAULT_EXTENT, ColumnLayout::DEFAULT_SPACING)
    }
}

/// Slot extent must be a positive finite fraction, spacing finite and non-negative.
fn validated_slots(kind: &'static str, extent: f32, spacing: f32) -> (f32, f32) {
    let extent = if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        tracing::warn!(kind, extent, "invalid slot extent, using default");
        ColumnLayout::DEFAULT_EXTENT
    };
    let spacing = if spacing.is_finite() && spacing >= 0.0 {
        spacing
    } else {
        tracing::warn!(kind, spacing, "invalid slot spacing, using default");
        ColumnLayout::DEFAULT_SPACING
    };
    (extent, spacing)
}
