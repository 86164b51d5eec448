//! Location index: id to path addressing.
//!
//! A path locates an element from the window list down: `[window]` for a
//! window, `[window, widget, child, ...]` for a widget at any depth. Paths
//! replace parent pointers; the index is rebuilt after every structural edit.

use std::collections::HashMap;
use std::fmt;

use crate::error::{UiError, UiResult};
use crate::layout::{Rect, Viewport};
use crate::widget::{Widget, WidgetId, WidgetType};
use crate::window::{Window, WindowId};

/// Indices from the window list down to an element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Path(Vec<usize>);

impl Path {
    /// Path of a window.
    #[must_use]
    pub fn window(index: usize) -> Self {
        Self(vec![index])
    }

    /// Path from raw indices.
    #[must_use]
    pub fn from_indices(indices: Vec<usize>) -> Self {
        Self(indices)
    }

    /// Raw indices.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Index of the owning window.
    #[must_use]
    pub fn window_index(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// True for a window path.
    #[must_use]
    pub fn is_window(&self) -> bool {
        self.0.len() == 1
    }

    /// True for a widget path.
    #[must_use]
    pub fn is_widget(&self) -> bool {
        self.0.len() >= 2
    }

    /// Path of the parent element, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        (self.0.len() > 1).then(|| Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// Path of a child.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// Last index, the element's position among its siblings.
    #[must_use]
    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// What an id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// A window.
    Window,
    /// A widget.
    Widget,
    /// Nothing in the index.
    None,
}

/// Map from every live id to its path.
#[derive(Debug, Default)]
pub struct LocationIndex {
    locations: HashMap<u32, Path>,
    coherent: bool,
}

impl LocationIndex {
    /// Creates an empty, coherent index.
    #[must_use]
    pub fn new() -> Self {
        Self {
            locations: HashMap::with_capacity(256),
            coherent: true,
        }
    }

    /// Marks the index as out of date. Lookups fail until the next rebuild.
    pub(crate) fn invalidate(&mut self) {
        self.coherent = false;
    }

    /// True if the index was rebuilt after the last structural edit.
    #[must_use]
    pub const fn is_coherent(&self) -> bool {
        self.coherent
    }

    /// Rebuilds from scratch by walking every window and widget.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::DuplicateId`] or [`UiError::InvalidId`] if the tree
    /// breaks id uniqueness; the index is left incoherent.
    pub fn rebuild(&mut self, windows: &[Window]) -> UiResult<()> {
        self.locations.clear();
        self.coherent = false;
        for (window_index, window) in windows.iter().enumerate() {
            self.record(window.id.raw(), Path::window(window_index))?;
            for (widget_index, widget) in window.widgets.iter().enumerate() {
                self.record_subtree(widget, Path::from_indices(vec![window_index, widget_index]))?;
            }
        }
        self.coherent = true;
        tracing::trace!(entries = self.locations.len(), "location index rebuilt");
        Ok(())
    }

    fn record_subtree(&mut self, widget: &Widget, path: Path) -> UiResult<()> {
        for (child_index, child) in widget.children().iter().enumerate() {
            self.record_subtree(child, path.child(child_index))?;
        }
        self.record(widget.id.raw(), path)
    }

    fn record(&mut self, raw: u32, path: Path) -> UiResult<()> {
        if raw == u32::MAX {
            return Err(UiError::InvalidId);
        }
        if self.locations.insert(raw, path).is_some() {
            return Err(UiError::DuplicateId(raw));
        }
        Ok(())
    }

    /// Number of indexed ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// True if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// True if the id is indexed.
    #[must_use]
    pub fn contains(&self, raw: u32) -> bool {
        self.coherent && self.locations.contains_key(&raw)
    }

    /// Path of any id.
    ///
    /// # Errors
    ///
    /// Fails for the sentinel, an unknown id, or an incoherent index.
    pub fn resolve(&self, raw: u32) -> UiResult<&Path> {
        if raw == u32::MAX {
            return Err(UiError::InvalidId);
        }
        if !self.coherent {
            return Err(UiError::StaleIndex);
        }
        self.locations.get(&raw).ok_or(UiError::StaleId(raw))
    }

    /// Path of a widget id.
    ///
    /// # Errors
    ///
    /// As [`Self::resolve`], plus [`UiError::NotAWidget`] for a window id.
    pub fn resolve_widget(&self, id: WidgetId) -> UiResult<&Path> {
        let path = self.resolve(id.raw())?;
        if path.is_widget() {
            Ok(path)
        } else {
            Err(UiError::NotAWidget(id.raw()))
        }
    }

    /// Index of a window id in the window list.
    ///
    /// # Errors
    ///
    /// As [`Self::resolve`], plus [`UiError::NotAWindow`] for a widget id.
    pub fn resolve_window(&self, id: WindowId) -> UiResult<usize> {
        let path = self.resolve(id.raw())?;
        match (path.is_window(), path.window_index()) {
            (true, Some(index)) => Ok(index),
            _ => Err(UiError::NotAWindow(id.raw())),
        }
    }

    /// Classifies an id.
    #[must_use]
    pub fn id_kind(&self, raw: u32) -> IdKind {
        match self.resolve(raw) {
            Ok(path) if path.is_window() => IdKind::Window,
            Ok(_) => IdKind::Widget,
            Err(_) => IdKind::None,
        }
    }

    /// Every indexed id with its path, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Path)> + '_ {
        self.locations.iter().map(|(&raw, path)| (raw, path))
    }
}

fn out_of_bounds(index: usize, len: usize) -> UiError {
    UiError::PathOutOfBounds { index, len }
}

/// Widget at a path.
///
/// # Errors
///
/// Fails if an index overruns its sequence or the path descends through a
/// non-container.
pub fn widget_from_path<'a>(windows: &'a [Window], path: &Path) -> UiResult<&'a Widget> {
    let (window_index, rest) = match path.indices() {
        [window_index, rest @ ..] if !rest.is_empty() => (*window_index, rest),
        _ => return Err(out_of_bounds(path.indices().len(), 2)),
    };
    let window = windows
        .get(window_index)
        .ok_or_else(|| out_of_bounds(window_index, windows.len()))?;
    let mut widget = window
        .widgets
        .get(rest[0])
        .ok_or_else(|| out_of_bounds(rest[0], window.widgets.len()))?;
    for &index in &rest[1..] {
        let data = widget
            .kind
            .container_data()
            .ok_or(UiError::NotAContainer(widget.id.raw()))?;
        widget = data
            .widgets
            .get(index)
            .ok_or_else(|| out_of_bounds(index, data.widgets.len()))?;
    }
    Ok(widget)
}

/// Mutable widget at a path.
///
/// # Errors
///
/// As [`widget_from_path`].
pub fn widget_from_path_mut<'a>(windows: &'a mut [Window], path: &Path) -> UiResult<&'a mut Widget> {
    let (window_index, rest) = match path.indices() {
        [window_index, rest @ ..] if !rest.is_empty() => (*window_index, rest),
        _ => return Err(out_of_bounds(path.indices().len(), 2)),
    };
    let window_count = windows.len();
    let window = windows
        .get_mut(window_index)
        .ok_or_else(|| out_of_bounds(window_index, window_count))?;
    let widget_count = window.widgets.len();
    let mut widget = window
        .widgets
        .get_mut(rest[0])
        .ok_or_else(|| out_of_bounds(rest[0], widget_count))?;
    for &index in &rest[1..] {
        let id = widget.id.raw();
        let data = widget
            .kind
            .container_data_mut()
            .ok_or(UiError::NotAContainer(id))?;
        let len = data.widgets.len();
        widget = data
            .widgets
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(index, len))?;
    }
    Ok(widget)
}

/// Sibling sequence holding the element at a widget path.
///
/// # Errors
///
/// As [`widget_from_path`].
pub(crate) fn siblings_mut<'a>(windows: &'a mut [Window], path: &Path) -> UiResult<&'a mut Vec<Widget>> {
    let parent = path.parent().ok_or_else(|| out_of_bounds(0, 0))?;
    if parent.is_window() {
        let index = parent.window_index().unwrap_or_default();
        let len = windows.len();
        return windows
            .get_mut(index)
            .map(|window| &mut window.widgets)
            .ok_or_else(|| out_of_bounds(index, len));
    }
    let widget = widget_from_path_mut(windows, &parent)?;
    let id = widget.id.raw();
    widget
        .kind
        .container_data_mut()
        .map(|data| &mut data.widgets)
        .ok_or(UiError::NotAContainer(id))
}

/// Resolved bounds of a widget and of the slot it resolves against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBounds {
    /// Bounds handed down by the parent.
    pub parent: Rect,
    /// The widget's own bounds.
    pub widget: Rect,
}

/// Resolves a widget's bounds by chaining layout down its path.
///
/// # Errors
///
/// As [`widget_from_path`].
pub fn bounds_from_path(windows: &[Window], path: &Path, viewport: Viewport) -> UiResult<ResolvedBounds> {
    let indices = path.indices();
    if indices.len() < 2 {
        return Err(out_of_bounds(indices.len(), 2));
    }
    let window = windows
        .get(indices[0])
        .ok_or_else(|| out_of_bounds(indices[0], windows.len()))?;
    let mut parent = window.bounds(viewport);
    let mut widget = window
        .widgets
        .get(indices[1])
        .ok_or_else(|| out_of_bounds(indices[1], window.widgets.len()))?;
    let mut own = widget.placement.resolve(parent);
    for &index in &indices[2..] {
        let data = widget
            .kind
            .container_data()
            .ok_or(UiError::NotAContainer(widget.id.raw()))?;
        parent = widget.kind.child_slot(own, index);
        widget = data
            .widgets
            .get(index)
            .ok_or_else(|| out_of_bounds(index, data.widgets.len()))?;
        own = widget.placement.resolve(parent);
    }
    Ok(ResolvedBounds { parent, widget: own })
}

/// A widget with its resolved bounds, as seen by hit-testing and navigation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWidget {
    /// Widget id.
    pub id: WidgetId,
    /// Path of the widget.
    pub path: Path,
    /// World bounds.
    pub bounds: Rect,
    /// Whether the widget can take selection.
    pub selectable: bool,
    /// Kind of the widget.
    pub widget_type: WidgetType,
}

/// Resolves every widget of the listed windows, window by window in list
/// order and pre-order within each window.
#[must_use]
pub fn resolve_widgets(windows: &[Window], window_indices: &[usize], viewport: Viewport) -> Vec<ResolvedWidget> {
    let mut resolved = Vec::new();
    for &window_index in window_indices {
        let Some(window) = windows.get(window_index) else {
            crate::error::invariant_violation(&out_of_bounds(window_index, windows.len()));
            continue;
        };
        let window_bounds = window.bounds(viewport);
        for (widget_index, widget) in window.widgets.iter().enumerate() {
            resolve_subtree(
                widget,
                Path::from_indices(vec![window_index, widget_index]),
                window_bounds,
                &mut resolved,
            );
        }
    }
    resolved
}

fn resolve_subtree(widget: &Widget, path: Path, parent: Rect, out: &mut Vec<ResolvedWidget>) {
    let bounds = widget.placement.resolve(parent);
    out.push(ResolvedWidget {
        id: widget.id,
        path: path.clone(),
        bounds,
        selectable: widget.selectable(),
        widget_type: widget.widget_type(),
    });
    for (child_index, child) in widget.children().iter().enumerate() {
        resolve_subtree(child, path.child(child_index), widget.kind.child_slot(bounds, child_index), out);
    }
}
