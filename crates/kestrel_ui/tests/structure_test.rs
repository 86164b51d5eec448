//! Integration tests for tree addressing, structural edits and layout.

use kestrel_ui::location::widget_from_path;
use kestrel_ui::{
    Anchor, ColumnLayout, Constraint, Dimension, IdKind, Key, MonospaceFont, Placement, Rect,
    RowLayout, UiConfig, UserInterface, Viewport, Widget, WidgetId, WidgetKind, Window, WindowId,
};

fn square_ui() -> UserInterface {
    UserInterface::new(UiConfig::default(), MonospaceFont::default(), Viewport::new(1000.0, 1000.0))
}

/// Two windows, one with a nested container chain.
fn populated_ui() -> (UserInterface, Vec<WidgetId>) {
    let mut ui = square_ui();
    let mut ids = Vec::new();
    let mut next = |ui: &mut UserInterface| {
        let id = ui.next_widget_id();
        ids.push(id);
        id
    };

    let first = ui.next_window_id();
    let outer = next(&mut ui);
    let inner = next(&mut ui);
    let leaf = next(&mut ui);
    let sibling = next(&mut ui);
    ui.add_window(
        Window::new(first, "main").displayed(true).with_widget(
            Widget::container(outer, "outer")
                .with_child(
                    Widget::horizontal_container(inner, "inner", ColumnLayout::default())
                        .with_child(Widget::button(leaf, "leaf", "Leaf")),
                )
                .with_child(Widget::text(sibling, "label", "hello")),
        ),
    )
    .expect("first window");

    let second = ui.next_window_id();
    let slider = next(&mut ui);
    ui.add_window(
        Window::new(second, "options")
            .with_widget(Widget::slider(slider, "volume", 0.0, 1.0)),
    )
    .expect("second window");

    (ui, ids)
}

#[test]
fn test_every_id_round_trips_through_index() {
    let (ui, ids) = populated_ui();
    let index = ui.location_index();
    assert!(index.is_coherent());
    for id in ids {
        let path = index.resolve_widget(id).expect("indexed");
        let widget = widget_from_path(ui.windows(), path).expect("reachable");
        assert_eq!(widget.id, id);
        assert_eq!(ui.id_kind(id.raw()), IdKind::Widget);
    }
    for window in ui.windows() {
        assert_eq!(ui.id_kind(window.id.raw()), IdKind::Window);
    }
    assert_eq!(ui.id_kind(9_999), IdKind::None);
}

#[test]
fn test_add_then_delete_restores_tree() {
    let (mut ui, ids) = populated_ui();
    let before = ui.widget_count();
    let indexed_before = ui.location_index().len();
    let window = ui.window_id_by_tag("main").expect("main window");

    let extra = ui.next_widget_id();
    assert!(ui.add_widget(window, Widget::button(extra, "extra", "Extra")));
    assert_eq!(ui.widget_count(), before + 1);
    assert!(ui.location_index().contains(extra.raw()));

    assert!(ui.delete_widget(extra));
    assert_eq!(ui.widget_count(), before);
    assert_eq!(ui.location_index().len(), indexed_before);
    assert!(!ui.location_index().contains(extra.raw()));

    // Remaining ids still resolve after the shift.
    for id in ids {
        assert_eq!(ui.widget(id).map(|w| w.id), Some(id));
    }
}

#[test]
fn test_add_to_container_and_delete_subtree() {
    let (mut ui, ids) = populated_ui();
    let outer = ids[0];
    let inner = ids[1];
    let leaf = ids[2];

    let extra = ui.next_widget_id();
    assert!(ui.add_widget_to_container(inner, Widget::checkbox(extra, "flag")));
    assert_eq!(ui.parent_widget_of(extra), Some(inner));
    assert_eq!(ui.parent_widget_of(outer), None);

    assert!(ui.set_selected(leaf));
    assert!(ui.delete_widget(inner));
    assert!(ui.widget(leaf).is_none());
    assert!(ui.widget(extra).is_none());
    assert_eq!(ui.interaction().selected(), None);

    // Stale ids are rejected without effect.
    assert!(!ui.delete_widget(inner));
    assert!(!ui.set_widget_text(leaf, "gone"));
}

#[test]
fn test_add_to_non_container_is_rejected() {
    let (mut ui, ids) = populated_ui();
    let leaf = ids[2];
    let before = ui.widget_count();
    let extra = ui.next_widget_id();
    assert!(!ui.add_widget_to_container(leaf, Widget::checkbox(extra, "flag")));
    assert_eq!(ui.widget_count(), before);
    assert!(ui.widget(extra).is_none());
}

#[test]
fn test_duplicate_ids_are_rejected() {
    let (mut ui, ids) = populated_ui();
    let window = ui.window_id_by_tag("main").expect("main window");
    let before = ui.widget_count();
    assert!(!ui.add_widget(window, Widget::button(ids[0], "dup", "Dup")));
    assert!(!ui.add_widget(window, Widget::button(WidgetId::INVALID, "bad", "Bad")));
    assert!(ui.add_window(Window::new(WindowId::new(ids[1].raw()), "dup")).is_none());
    assert_eq!(ui.widget_count(), before);

    // Ids fed in by the caller advance the allocator.
    let chosen = WidgetId::new(500);
    assert!(ui.add_widget(window, Widget::button(chosen, "chosen", "Chosen")));
    assert!(ui.next_id() > 500);
}

#[test]
fn test_delete_window_drops_its_widgets() {
    let (mut ui, ids) = populated_ui();
    let options = ui.window_id_by_tag("options").expect("options window");
    let slider = ids[4];
    assert_eq!(ui.parent_window_of(slider), Some(options));
    assert!(ui.delete_window(options));
    assert!(ui.widget(slider).is_none());
    assert!(ui.window(options).is_none());
    assert_eq!(ui.windows().len(), 1);
}

#[test]
fn test_column_slots_offset_children() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let row = ui.next_widget_id();
    let children: Vec<WidgetId> = (0..3).map(|_| ui.next_widget_id()).collect();
    let mut container = Widget::horizontal_container(row, "row", ColumnLayout::new(0.3, 0.05))
        .with_placement(Placement::FILL);
    for &child in &children {
        container = container.with_child(Widget::button(child, "cell", ""));
    }
    ui.add_window(Window::new(window, "main").with_widget(container)).expect("window added");

    let slot = ui.parent_bounds(children[1]).expect("slot");
    assert!((slot.x - 350.0).abs() < 1e-3, "slot x was {}", slot.x);
    assert!((slot.width - 300.0).abs() < 1e-3);
    let bounds = ui.widget_bounds(children[1]).expect("bounds");
    assert!((bounds.x - 350.0).abs() < 1e-3);
}

#[test]
fn test_row_slots_stack_from_top() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let column = ui.next_widget_id();
    let first = ui.next_widget_id();
    let second = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "main").with_widget(
            Widget::vertical_container(column, "column", RowLayout::new(0.25, 0.1))
                .with_placement(Placement::FILL)
                .with_child(Widget::button(first, "a", "A"))
                .with_child(Widget::button(second, "b", "B")),
        ),
    )
    .expect("window added");

    let top = ui.parent_bounds(first).expect("slot");
    let below = ui.parent_bounds(second).expect("slot");
    assert!((top.y - 750.0).abs() < 1e-3);
    assert!((below.y - 400.0).abs() < 1e-3);
}

#[test]
fn test_layout_is_deterministic() {
    let parent = Rect::new(100.0, 50.0, 800.0, 600.0);
    let placement = Placement::percent(0.5, 0.25)
        .at(Dimension::Pixel(-20.0), Dimension::Percent(0.1))
        .anchored(Anchor::relative(Constraint::Right), Anchor::relative(Constraint::Center));
    let first = placement.resolve(parent);
    for _ in 0..8 {
        assert_eq!(placement.resolve(parent), first);
    }
    // Right: 800 - 20 - 400; Center: 300 + 60 - 75.
    assert!((first.x - 480.0).abs() < 1e-3);
    assert!((first.y - 335.0).abs() < 1e-3);
}

#[test]
fn test_text_updates_by_tag() {
    let (mut ui, ids) = populated_ui();
    assert!(!ui.set_widget_text_by_tag("main", "outer", "nope"));
    let label = ids[3];
    assert!(ui.set_widget_text(label, "goodbye"));
    assert_eq!(ui.widget_text(label).as_deref(), Some("goodbye"));
    let leaf = ids[2];
    assert!(ui.set_widget_text(leaf, "Go"));
    assert_eq!(ui.widget_text(leaf).as_deref(), Some("Go"));
}

#[test]
fn test_selection_stays_selectable_and_caret_in_bounds() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let input = ui.next_widget_id();
    let button = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "form")
            .displayed(true)
            .with_widget(Widget::input_text(input, "name", "abc").with_placement(
                Placement::percent(0.3, 0.1).at(Dimension::Percent(0.0), Dimension::Percent(0.5)),
            ))
            .with_widget(Widget::button(button, "submit", "Submit").with_placement(
                Placement::percent(0.3, 0.1).at(Dimension::Percent(0.0), Dimension::Percent(0.1)),
            )),
    )
    .expect("window added");

    let check = |ui: &UserInterface| {
        if let Some(selected) = ui.interaction().selected() {
            assert!(ui.widget(selected).is_some_and(Widget::selectable));
        }
        if let Some(editing) = ui.interaction().editing() {
            match ui.widget(editing).map(|w| &w.kind) {
                Some(WidgetKind::InputText(data)) => assert!(data.text.caret_index() <= data.text.len()),
                _ => panic!("editing a non-input widget"),
            }
        }
    };

    ui.press(input);
    check(&ui);
    for key in [Key::Left, Key::Left, Key::Left, Key::Left, Key::Backspace, Key::Right] {
        ui.on_key_pressed(key);
        check(&ui);
    }
    assert!(ui.set_widget_text(input, "z"));
    check(&ui);

    ui.on_key_pressed(Key::Escape);
    assert!(ui.on_key_pressed(Key::Down));
    assert_eq!(ui.interaction().selected(), Some(button));
    ui.set_widget_selectable(button, false);
    check(&ui);
    assert_eq!(ui.interaction().selected(), None);
}

#[test]
fn test_text_layout_follows_adds_and_resizes() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let label = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "main")
            .with_widget(Widget::text(label, "label", "one two three").with_placement(Placement::FILL)),
    )
    .expect("window added");

    let lines = |ui: &UserInterface, id: WidgetId| match ui.widget(id).map(|w| &w.kind) {
        Some(WidgetKind::Text(text)) => text.text.dimensions().line_count(),
        _ => panic!("expected text widget"),
    };

    // Scale 45 wraps a 1000px line at about two glyphs, one word per line.
    assert_eq!(lines(&ui, label), 3);

    let note = ui.next_widget_id();
    assert!(ui.add_widget(window, Widget::text(note, "note", "a b").with_placement(Placement::FILL)));
    assert_eq!(lines(&ui, note), 2);

    ui.set_viewport(Viewport::new(100_000.0, 1000.0));
    assert_eq!(lines(&ui, label), 1);
    assert_eq!(lines(&ui, note), 1);

    ui.set_viewport(Viewport::new(1000.0, 1000.0));
    assert_eq!(lines(&ui, label), 3);
}
