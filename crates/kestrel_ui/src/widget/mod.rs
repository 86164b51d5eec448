//! Widget data model.
//!
//! Widgets form an owned tree: windows own their top-level widgets and
//! containers own their children. Nothing points back up the tree; parents
//! are found through the location index.

mod core;
mod kinds;
mod text;

pub use self::core::{
    ContainerData, Direction, ImageData, NavigationLinks, SelectionData, Widget, WidgetId,
    WidgetType,
};
pub use self::kinds::{
    ButtonWidget, CheckboxWidget, ContainerWidget, DropDownWidget, HorizontalContainerWidget,
    ImageButtonWidget, ImageWidget, InputTextWidget, SliderWidget, TextWidget,
    VerticalContainerWidget, WidgetKind,
};
pub use self::text::{
    MultiLineTextData, MultiLineTextDimensions, SingleLineTextData, TextAlignment,
    DEFAULT_TEXT_SIZE,
};
