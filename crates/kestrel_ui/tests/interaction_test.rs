//! Integration tests for input routing and the interaction slots.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kestrel_ui::{
    AssetHandle, Callback, CallbackArg, ColumnLayout, CursorIcon, Dimension, Direction, InputState, Key,
    MonospaceFont, MouseButton, Placement, RenderCommand, RowLayout, TextureRef, TextureTable,
    UiConfig, UiRenderer, UserInterface, Vec2, Viewport, Widget, WidgetId, WidgetKind, Window,
};

fn square_ui() -> UserInterface {
    UserInterface::new(UiConfig::default(), MonospaceFont::default(), Viewport::new(1000.0, 1000.0))
}

fn px(x: f32, y: f32, width: f32, height: f32) -> Placement {
    Placement::pixels(width, height).at(Dimension::Pixel(x), Dimension::Pixel(y))
}

fn counter() -> (Rc<Cell<u32>>, Callback) {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    (count, Callback::from_fn(move |_| seen.set(seen.get() + 1)))
}

fn caret_of(ui: &UserInterface, id: WidgetId) -> (String, usize) {
    match &ui.widget(id).map(|w| &w.kind) {
        Some(WidgetKind::InputText(input)) => (input.text.text().to_owned(), input.text.caret_index()),
        other => panic!("expected input text, got {other:?}"),
    }
}

#[test]
fn test_press_selects_and_fires_once() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let ok = ui.next_widget_id();
    let (presses, callback) = counter();
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::button(ok, "ok", "OK").with_on_press(callback)),
    )
    .expect("window added");

    assert!(ui.press(ok));
    assert_eq!(ui.interaction().selected(), Some(ok));
    assert!(ui.is_widget_selected(ok));
    assert_eq!(presses.get(), 1);
}

#[test]
fn test_grid_navigation_moves_to_neighbour() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let column = ui.next_widget_id();
    let mut grid = [[WidgetId::INVALID; 3]; 3];
    let mut root = Widget::vertical_container(column, "rows", RowLayout::new(0.3, 0.05))
        .with_placement(Placement::FILL);
    for row in &mut grid {
        let row_id = ui.next_widget_id();
        let mut line = Widget::horizontal_container(row_id, "row", ColumnLayout::new(0.3, 0.05))
            .with_placement(Placement::FILL);
        for cell in row.iter_mut() {
            *cell = ui.next_widget_id();
            line = line.with_child(Widget::button(*cell, "cell", "").with_placement(Placement::FILL));
        }
        root = root.with_child(line);
    }
    ui.add_window(Window::new(window, "grid").displayed(true).with_widget(root))
        .expect("window added");

    assert!(ui.set_selected(grid[1][1]));
    assert!(ui.on_key_pressed(Key::Right));
    assert_eq!(ui.interaction().selected(), Some(grid[1][2]));

    assert!(ui.on_key_pressed(Key::Down));
    assert_eq!(ui.interaction().selected(), Some(grid[2][2]));

    // Bottom-right corner has no neighbour below.
    assert!(!ui.on_key_pressed(Key::Down));
    assert_eq!(ui.interaction().selected(), Some(grid[2][2]));

    assert!(ui.on_key_pressed(Key::Up));
    assert!(ui.on_key_pressed(Key::Up));
    assert!(ui.on_key_pressed(Key::Left));
    assert_eq!(ui.interaction().selected(), Some(grid[0][1]));
}

#[test]
fn test_input_text_editing_keys() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let input = ui.next_widget_id();
    let (moves, callback) = counter();
    let mut widget = Widget::input_text(input, "name", "ab");
    if let WidgetKind::InputText(data) = &mut widget.kind {
        data.on_move_cursor = Some(callback);
    }
    ui.add_window(Window::new(window, "main").displayed(true).with_widget(widget))
        .expect("window added");

    assert!(ui.press(input));
    assert_eq!(ui.interaction().editing(), Some(input));
    assert_eq!(caret_of(&ui, input), ("ab".to_owned(), 2));

    assert!(ui.on_key_pressed(Key::Left));
    assert_eq!(caret_of(&ui, input), ("ab".to_owned(), 1));

    assert!(ui.on_key_pressed(Key::Backspace));
    assert_eq!(caret_of(&ui, input), ("b".to_owned(), 0));

    // Nothing left of the caret.
    assert!(!ui.on_key_pressed(Key::Backspace));
    assert!(!ui.on_key_pressed(Key::Left));
    assert_eq!(moves.get(), 2);

    assert!(ui.on_key_typed('x'));
    assert!(!ui.on_key_typed('\u{7}'));
    assert_eq!(caret_of(&ui, input), ("xb".to_owned(), 1));

    assert!(ui.on_key_pressed(Key::Enter));
    assert_eq!(ui.interaction().editing(), None);
    assert!(!ui.on_key_typed('y'));
}

#[test]
fn test_slider_drag_to_half_track() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let slider = ui.next_widget_id();
    let values = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&values);
    let mut widget = Widget::slider(slider, "volume", 0.0, 10.0).with_placement(px(250.0, 450.0, 500.0, 100.0));
    if let WidgetKind::Slider(data) = &mut widget.kind {
        data.on_move_slider = Some(Callback::from_fn(move |arg| {
            if let CallbackArg::Float(value) = arg {
                seen.borrow_mut().push(value);
            }
        }));
    }
    ui.add_window(Window::new(window, "main").displayed(true).with_widget(widget))
        .expect("window added");

    // The handle sits at the track start while the value is at its minimum.
    assert!(ui.on_mouse_pressed(Vec2::new(250.0, 500.0)));
    assert_eq!(ui.interaction().pressed(), Some(slider));

    ui.on_mouse_moved(Vec2::new(500.0, 500.0));
    ui.on_update(0.016);

    let value = match &ui.widget(slider).map(|w| &w.kind) {
        Some(WidgetKind::Slider(data)) => data.current_value,
        _ => panic!("expected slider"),
    };
    assert!((value - 5.0).abs() < 1e-5, "value was {value}");
    assert_eq!(values.borrow().len(), 1);

    assert!(ui.on_mouse_released());
    assert_eq!(ui.interaction().pressed(), None);
}

#[test]
fn test_slider_press_off_handle_does_not_drag() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let slider = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::slider(slider, "volume", 0.0, 10.0).with_placement(px(250.0, 450.0, 500.0, 100.0))),
    )
    .expect("window added");

    assert!(ui.on_mouse_pressed(Vec2::new(600.0, 500.0)));
    assert_eq!(ui.interaction().selected(), Some(slider));
    assert_eq!(ui.interaction().pressed(), None);
}

#[test]
fn test_dropdown_row_click_picks_option() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let dropdown = ui.next_widget_id();
    let picked = Rc::new(RefCell::new(None));
    let seen = Rc::clone(&picked);
    let mut widget = Widget::drop_down(dropdown, "mode", ["A", "B", "C"]).with_placement(px(250.0, 500.0, 500.0, 100.0));
    if let WidgetKind::DropDown(data) = &mut widget.kind {
        data.on_select_option = Some(Callback::from_fn(move |arg| {
            if let CallbackArg::Text(text) = arg {
                *seen.borrow_mut() = Some(text);
            }
        }));
    }
    ui.add_window(Window::new(window, "main").displayed(true).with_widget(widget))
        .expect("window added");
    assert_eq!(ui.widget_text(dropdown).as_deref(), Some("A"));

    assert!(ui.on_mouse_pressed(Vec2::new(500.0, 550.0)));
    let open = matches!(&ui.widget(dropdown).map(|w| &w.kind), Some(WidgetKind::DropDown(d)) if d.open);
    assert!(open);

    // Rows skip the current option: row 0 is "B", row 1 is "C".
    assert!(ui.on_mouse_pressed(Vec2::new(500.0, 350.0)));
    assert_eq!(ui.widget_text(dropdown).as_deref(), Some("C"));
    assert_eq!(picked.borrow().as_deref(), Some("C"));
    let open = matches!(&ui.widget(dropdown).map(|w| &w.kind), Some(WidgetKind::DropDown(d)) if d.open);
    assert!(!open);
}

#[test]
fn test_checkbox_press_toggles_and_reports_state() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let checkbox = ui.next_widget_id();
    let states = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&states);
    let callback = Callback::from_fn(move |arg| {
        if let CallbackArg::Bool(checked) = arg {
            seen.borrow_mut().push(checked);
        }
    });
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::checkbox(checkbox, "mute").with_on_press(callback)),
    )
    .expect("window added");

    ui.press(checkbox);
    ui.press(checkbox);
    assert_eq!(*states.borrow(), vec![true, false]);
}

#[test]
fn test_hover_updates_cursor_icon() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let input = ui.next_widget_id();
    let button = ui.next_widget_id();
    let (hovers, callback) = counter();
    ui.set_on_hover(Some(callback));
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::input_text(input, "name", "").with_placement(px(0.0, 0.0, 100.0, 100.0)))
            .with_widget(Widget::button(button, "go", "Go").with_placement(px(500.0, 500.0, 100.0, 100.0))),
    )
    .expect("window added");

    ui.on_mouse_moved(Vec2::new(50.0, 50.0));
    assert_eq!(ui.interaction().hovered(), Some(input));
    assert_eq!(ui.cursor_icon(), CursorIcon::IBeam);

    ui.on_mouse_moved(Vec2::new(550.0, 550.0));
    assert_eq!(ui.interaction().hovered(), Some(button));
    assert_eq!(ui.cursor_icon(), CursorIcon::Standard);

    ui.on_mouse_moved(Vec2::new(900.0, 900.0));
    assert_eq!(ui.interaction().hovered(), None);
    assert_eq!(hovers.get(), 2);
}

#[test]
fn test_click_outside_ends_editing() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let input = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::input_text(input, "name", "abc").with_placement(px(0.0, 0.0, 100.0, 100.0))),
    )
    .expect("window added");

    assert!(ui.on_mouse_pressed(Vec2::new(50.0, 50.0)));
    assert_eq!(ui.interaction().editing(), Some(input));

    assert!(!ui.on_mouse_pressed(Vec2::new(900.0, 900.0)));
    assert_eq!(ui.interaction().editing(), None);
}

#[test]
fn test_hidden_window_is_not_hit() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let button = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "pause")
            .displayed(true)
            .with_widget(Widget::button(button, "resume", "Resume").with_placement(px(0.0, 0.0, 100.0, 100.0))),
    )
    .expect("window added");

    ui.on_mouse_moved(Vec2::new(50.0, 50.0));
    assert_eq!(ui.interaction().hovered(), Some(button));

    assert!(ui.set_display_window_by_tag("pause", false));
    assert_eq!(ui.interaction().hovered(), None);
    assert_eq!(ui.hit_test(Vec2::new(50.0, 50.0)), None);
    assert!(ui.displayed_windows().is_empty());

    assert!(ui.set_display_window(window, true));
    assert_eq!(ui.hit_test(Vec2::new(50.0, 50.0)), Some(button));
}

#[test]
fn test_activate_selects_default_widget() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let play = ui.next_widget_id();
    let (moves, callback) = counter();
    ui.set_on_move(Some(callback));
    ui.add_window(
        Window::new(window, "menu")
            .with_widget(Widget::button(play, "play", "Play"))
            .with_default_widget(play),
    )
    .expect("window added");

    ui.activate();
    assert_eq!(ui.displayed_windows(), &[window]);
    assert_eq!(ui.interaction().active_window(), Some(window));
    assert_eq!(ui.interaction().selected(), Some(play));
    assert_eq!(moves.get(), 1);
}

#[test]
fn test_unselectable_widget_cannot_take_selection() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let button = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::button(button, "b", "B")),
    )
    .expect("window added");

    assert!(ui.set_selected(button));
    assert!(ui.set_widget_selectable(button, false));
    assert_eq!(ui.interaction().selected(), None);
    assert!(!ui.set_selected(button));
    assert!(!ui.press(button));
}

#[test]
fn test_process_input_routes_frame() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let input = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::input_text(input, "name", "").with_placement(px(0.0, 0.0, 200.0, 100.0))),
    )
    .expect("window added");

    let mut frame = InputState::new();
    frame.set_mouse_position(Vec2::new(20.0, 50.0));
    frame.mouse_button_down(MouseButton::Left);
    ui.process_input(&frame);
    assert_eq!(ui.interaction().editing(), Some(input));

    frame.begin_frame();
    frame.mouse_button_up(MouseButton::Left);
    frame.text("hi");
    ui.process_input(&frame);
    assert_eq!(caret_of(&ui, input), ("hi".to_owned(), 2));
}

#[test]
fn test_fixed_aspect_ratio_keeps_width() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let image = ui.next_widget_id();
    let handle = AssetHandle(7);
    let mut textures = TextureTable::new();
    textures.insert(handle, TextureRef { id: 1, width: 200, height: 100 });
    let mut widget = Widget::image(image, "logo", handle).with_placement(px(0.0, 0.0, 300.0, 50.0));
    if let Some(data) = widget.kind.image_data_mut() {
        data.fixed_aspect_ratio = true;
    }
    ui.add_window(Window::new(window, "main").displayed(true).with_widget(widget))
        .expect("window added");

    assert!(ui.apply_fixed_aspect_ratio(image, true, &textures));
    let bounds = ui.widget_bounds(image).expect("bounds");
    assert!((bounds.width - 300.0).abs() < 1e-4);
    assert!((bounds.height - 150.0).abs() < 1e-4);
}

#[test]
fn test_render_emits_window_and_widget_draws() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let button = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::button(button, "ok", "OK")),
    )
    .expect("window added");

    let mut renderer = UiRenderer::new();
    ui.render(&mut renderer, &TextureTable::new());

    let commands = renderer.commands();
    assert!(matches!(commands.first(), Some(RenderCommand::Quad { .. })));
    assert!(commands
        .iter()
        .any(|c| matches!(c, RenderCommand::Text { text, .. } if text == "OK")));

    renderer.begin_frame();
    ui.set_display_window(window, false);
    ui.render(&mut renderer, &TextureTable::new());
    assert_eq!(renderer.command_count(), 0);
}

#[test]
fn test_move_directional_ends_editing() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let input = ui.next_widget_id();
    let button = ui.next_widget_id();
    ui.add_window(
        Window::new(window, "form")
            .displayed(true)
            .with_widget(Widget::input_text(input, "name", "abc").with_placement(px(0.0, 500.0, 300.0, 100.0)))
            .with_widget(Widget::button(button, "submit", "Submit").with_placement(px(0.0, 100.0, 300.0, 100.0))),
    )
    .expect("window added");

    assert!(ui.press(input));
    assert_eq!(ui.interaction().editing(), Some(input));

    assert!(ui.move_directional(Direction::Down));
    assert_eq!(ui.interaction().selected(), Some(button));
    assert_eq!(ui.interaction().editing(), None);
}

#[test]
fn test_slider_hover_skips_callback() {
    let mut ui = square_ui();
    let window = ui.next_window_id();
    let slider = ui.next_widget_id();
    let button = ui.next_widget_id();
    let (hovers, callback) = counter();
    ui.set_on_hover(Some(callback));
    ui.add_window(
        Window::new(window, "main")
            .displayed(true)
            .with_widget(Widget::slider(slider, "volume", 0.0, 1.0).with_placement(px(0.0, 0.0, 100.0, 100.0)))
            .with_widget(Widget::button(button, "go", "Go").with_placement(px(500.0, 500.0, 100.0, 100.0))),
    )
    .expect("window added");

    ui.on_mouse_moved(Vec2::new(50.0, 50.0));
    assert_eq!(ui.interaction().hovered(), Some(slider));
    assert_eq!(hovers.get(), 0);

    ui.on_mouse_moved(Vec2::new(550.0, 550.0));
    assert_eq!(ui.interaction().hovered(), Some(button));
    assert_eq!(hovers.get(), 1);
}
