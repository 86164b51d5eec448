//! # KESTREL UI
//!
//! Runtime game interface: windows of nested widgets, a layout resolver,
//! an id-to-path location index, directional navigation and an interaction
//! state machine driven by mouse and keyboard events.
//!
//! ## Frame Loop
//!
//! ```text
//! ┌─────────────┐  events   ┌─────────────────┐  render  ┌──────────────┐
//! │ InputState  │ ────────▶ │  UserInterface  │ ───────▶ │  UiRenderer  │
//! └─────────────┘           │  (index, links) │          │  (batches)   │
//!                           └─────────────────┘          └──────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use kestrel_ui::{MonospaceFont, UiConfig, UserInterface, Viewport, Widget, Window};
//!
//! let mut ui = UserInterface::new(UiConfig::default(), MonospaceFont::default(), Viewport::new(1280.0, 720.0));
//! let window_id = ui.next_window_id();
//! let button_id = ui.next_widget_id();
//! let window = Window::new(window_id, "main").with_widget(Widget::button(button_id, "play", "Play"));
//! ui.add_window(window);
//! ui.set_display_window(window_id, true);
//! assert_eq!(ui.widget_count(), 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::module_name_repetitions)]

pub mod assets;
pub mod config;
pub mod error;
pub mod font;
pub mod input;
pub mod interaction;
pub mod layout;
pub mod location;
pub mod navigation;
pub mod render;
pub mod script;
pub mod style;
pub mod text;
pub mod ui;
pub mod widget;
pub mod window;

pub use assets::{AssetHandle, AssetResolver, TextureRef, TextureTable};
pub use config::UiConfig;
pub use error::{UiError, UiResult};
pub use font::{FontMetrics, GlyphMetrics, MonospaceFont};
pub use input::{InputState, Key, MouseButton};
pub use interaction::{CaretBlink, CursorIcon, InteractionState};
pub use layout::{
    Anchor, ColumnLayout, Constraint, Dimension, Placement, PositionMode, Rect, RowLayout, Vec2,
    Viewport,
};
pub use location::{IdKind, LocationIndex, Path};
pub use render::{QuadInstance, RenderBackend, RenderCommand, UiRenderer};
pub use script::{Callback, CallbackArg, ScriptHandle};
pub use style::Color;
pub use ui::UserInterface;
pub use widget::{Direction, Widget, WidgetId, WidgetKind, WidgetType};
pub use window::{Window, WindowId};
