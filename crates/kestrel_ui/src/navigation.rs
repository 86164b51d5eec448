//! Directional navigation links.
//!
//! For every selectable widget in a displayed window, find the nearest
//! selectable widget whose center lies strictly on each side of its own
//! center. Distance is Euclidean between centers; on equal distance the
//! candidate met first in window/pre-order wins. The pass is O(S²) in the
//! number of selectable displayed widgets.

use crate::error::report;
use crate::layout::{Vec2, Viewport};
use crate::location::{resolve_widgets, widget_from_path_mut, ResolvedWidget};
use crate::widget::{Direction, NavigationLinks, WidgetId};
use crate::window::Window;

/// A selectable widget reduced to what the search needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationCandidate {
    /// Widget id.
    pub id: WidgetId,
    /// Center of its resolved bounds.
    pub center: Vec2,
}

impl From<&ResolvedWidget> for NavigationCandidate {
    fn from(resolved: &ResolvedWidget) -> Self {
        Self {
            id: resolved.id,
            center: resolved.bounds.center(),
        }
    }
}

fn lies_towards(direction: Direction, from: Vec2, to: Vec2) -> bool {
    match direction {
        Direction::Left => to.x < from.x,
        Direction::Right => to.x > from.x,
        Direction::Up => to.y > from.y,
        Direction::Down => to.y < from.y,
    }
}

/// Nearest candidate strictly on the `direction` side of `current`, or the
/// invalid sentinel.
#[must_use]
pub fn nearest_in_direction(
    current: &NavigationCandidate,
    candidates: &[NavigationCandidate],
    direction: Direction,
) -> WidgetId {
    let mut best = WidgetId::INVALID;
    let mut best_distance = f32::INFINITY;
    for candidate in candidates {
        if candidate.id == current.id || !lies_towards(direction, current.center, candidate.center) {
            continue;
        }
        let distance = current.center.distance(candidate.center);
        if distance < best_distance {
            best_distance = distance;
            best = candidate.id;
        }
    }
    best
}

/// Links for one widget in all four directions.
#[must_use]
pub fn links_for(current: &NavigationCandidate, candidates: &[NavigationCandidate]) -> NavigationLinks {
    let mut links = NavigationLinks::NONE;
    for direction in Direction::ALL {
        links.set(direction, nearest_in_direction(current, candidates, direction));
    }
    links
}

/// Recomputes the links of every focusable widget.
///
/// Widgets outside `displayed` windows, and non-selectable widgets, get no
/// links and are never a target. Returns the number of widgets linked.
pub fn calculate_navigation_links(windows: &mut [Window], displayed: &[usize], viewport: Viewport) -> usize {
    for window in windows.iter_mut() {
        window.visit_widgets_mut(&mut |widget| {
            if let Some(selection) = widget.kind.selection_data_mut() {
                selection.navigation_links = NavigationLinks::NONE;
            }
        });
    }

    let selectable: Vec<ResolvedWidget> = resolve_widgets(windows, displayed, viewport)
        .into_iter()
        .filter(|resolved| resolved.selectable)
        .collect();
    let candidates: Vec<NavigationCandidate> = selectable.iter().map(NavigationCandidate::from).collect();

    for (resolved, candidate) in selectable.iter().zip(&candidates) {
        let links = links_for(candidate, &candidates);
        match widget_from_path_mut(windows, &resolved.path) {
            Ok(widget) => {
                if let Some(selection) = widget.kind.selection_data_mut() {
                    selection.navigation_links = links;
                }
            }
            Err(err) => report(&err, "calculate_navigation_links"),
        }
    }

    tracing::debug!(linked = candidates.len(), "navigation links recalculated");
    candidates.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Dimension, Placement};
    use crate::widget::Widget;
    use crate::window::WindowId;

    fn candidate(id: u32, x: f32, y: f32) -> NavigationCandidate {
        NavigationCandidate {
            id: WidgetId(id),
            center: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_strict_side_and_nearest() {
        let current = candidate(1, 50.0, 50.0);
        let candidates = [
            current,
            candidate(2, 90.0, 50.0),
            candidate(3, 70.0, 80.0),
            candidate(4, 50.0, 10.0),
        ];

        assert_eq!(nearest_in_direction(&current, &candidates, Direction::Right), WidgetId(3));
        assert_eq!(nearest_in_direction(&current, &candidates, Direction::Up), WidgetId(3));
        assert_eq!(nearest_in_direction(&current, &candidates, Direction::Down), WidgetId(4));
        // Same x is not strictly left.
        assert_eq!(nearest_in_direction(&current, &candidates, Direction::Left), WidgetId::INVALID);
    }

    #[test]
    fn test_ties_go_to_first_encountered() {
        let current = candidate(1, 0.0, 0.0);
        let candidates = [current, candidate(2, 10.0, 10.0), candidate(3, 10.0, -10.0)];
        assert_eq!(nearest_in_direction(&current, &candidates, Direction::Right), WidgetId(2));

        let reordered = [current, candidate(3, 10.0, -10.0), candidate(2, 10.0, 10.0)];
        assert_eq!(nearest_in_direction(&current, &reordered, Direction::Right), WidgetId(3));
    }

    fn placed(widget: Widget, x: f32) -> Widget {
        widget.with_placement(
            Placement::percent(0.1, 0.1).at(Dimension::Percent(x), Dimension::Percent(0.5)),
        )
    }

    #[test]
    fn test_hidden_windows_and_unselectable_widgets_excluded() {
        let mut windows = vec![
            Window::new(WindowId(1), "shown")
                .with_widget(placed(Widget::button(WidgetId(2), "a", "A"), 0.1))
                .with_widget(placed(Widget::button(WidgetId(3), "b", "B").with_selectable(false), 0.4))
                .with_widget(placed(Widget::button(WidgetId(4), "c", "C"), 0.7)),
            Window::new(WindowId(5), "hidden")
                .with_widget(placed(Widget::button(WidgetId(6), "d", "D"), 0.3)),
        ];

        let linked = calculate_navigation_links(&mut windows, &[0], Viewport::new(1000.0, 1000.0));
        assert_eq!(linked, 2);

        let links = |window: usize, widget: usize| {
            windows[window].widgets[widget]
                .kind
                .selection_data()
                .map(|data| data.navigation_links)
                .unwrap_or_default()
        };
        assert_eq!(links(0, 0).right, WidgetId(4));
        assert_eq!(links(0, 2).left, WidgetId(2));
        assert_eq!(links(0, 1), NavigationLinks::NONE);
        assert_eq!(links(1, 0), NavigationLinks::NONE);
    }
}
