//! Tests for command registration, visibility, icons and drawables.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::{MockPainter, button, center, frame_at, idle, manager, step};
use horizon_dock::render::{MouseButton, Painter, Point, Rect, Size};
use horizon_dock::{
    DEFAULT_TOOLBAR_ID, Drawable, PopupMenuDrawable, RegistrationError, SceneVisibility,
    ToolbarManager,
};

fn allow(manager: &mut ToolbarManager, ids: &[&str]) {
    assert!(manager.set_visible_buttons(DEFAULT_TOOLBAR_ID, ids.iter().map(|id| id.to_string())));
}

#[test]
fn test_reregistering_replaces_the_button() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    let first = button(&manager, "m", "a");
    manager.load_scene("flight");
    allow(&mut manager, &["m.a"]);

    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    assert!(painter.button("m/a").is_some());

    let second = manager.add("m", "a").unwrap();
    second.set_icon_path(Some("v2/a")).unwrap();
    assert!(first.is_destroyed());

    painter.clear();
    step(&mut manager, &mut painter, &idle(16));
    assert!(painter.button("m/a").is_none());
    assert!(painter.button("v2/a").is_some());
    assert_eq!(
        manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().visible_button_ids(),
        ["m.a"]
    );
}

#[test]
fn test_recreation_churn_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);
    for _ in 0..100 {
        manager.add("m", "spam").unwrap();
    }
    assert!(matches!(
        manager.add("m", "spam"),
        Err(RegistrationError::CreationChurn { full_id }) if full_id == "m.spam"
    ));
    // Other ids are unaffected.
    assert!(manager.add("m", "calm").is_ok());
}

#[test]
fn test_invalid_ids_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let manager = manager(&dir);
    assert!(matches!(
        manager.add("my mod", "a"),
        Err(RegistrationError::InvalidId { .. })
    ));
    assert!(matches!(
        manager.add("m", "a.b"),
        Err(RegistrationError::InvalidId { .. })
    ));
}

#[test]
fn test_panicking_predicate_hides_only_its_button() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    button(&manager, "m", "a");
    let broken = button(&manager, "m", "b");
    broken.set_visibility(Some(Arc::new(|| -> bool { panic!("plugin bug") })));
    manager.load_scene("flight");
    allow(&mut manager, &["m.a", "m.b"]);

    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    assert!(painter.button("m/a").is_some());
    assert!(painter.button("m/b").is_none());
    assert_eq!(
        manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().visible_button_ids(),
        ["m.a"]
    );
}

#[test]
fn test_panicking_click_handler_is_contained() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    let command = button(&manager, "m", "a");
    command.clicked().connect(|_| panic!("plugin bug"));
    manager.load_scene("flight");
    allow(&mut manager, &["m.a"]);

    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    let (rect, _) = painter.button("m/a").unwrap();
    painter.click_at(center(rect), MouseButton::Primary);
    step(&mut manager, &mut painter, &idle(16));

    painter.clear();
    step(&mut manager, &mut painter, &idle(32));
    assert!(painter.button("m/a").is_some());
}

#[test]
fn test_missing_and_oversized_icons_hide_buttons() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    button(&manager, "m", "a");
    let missing = manager.add("m", "missing").unwrap();
    missing.set_icon_path(Some("missing/icon")).unwrap();
    let huge = manager.add("m", "huge").unwrap();
    huge.set_icon_path(Some("huge/icon")).unwrap();
    manager.load_scene("flight");
    allow(&mut manager, &["m.a", "m.missing", "m.huge"]);

    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    let icons: Vec<String> = painter.buttons().into_iter().map(|(icon, _, _)| icon).collect();
    assert!(icons.contains(&"m/a".to_string()));
    assert!(!icons.contains(&"missing/icon".to_string()));
    assert!(!icons.contains(&"huge/icon".to_string()));
    assert_eq!(
        manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().visible_button_ids(),
        ["m.a"]
    );
    assert_eq!(missing.icon_path(), None);
}

#[test]
fn test_hidden_command_leaves_layout() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    button(&manager, "m", "a");
    let b = button(&manager, "m", "b");
    manager.load_scene("flight");
    allow(&mut manager, &["m.a", "m.b"]);

    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    let wide = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().rect();
    assert_eq!(wide.size, Size::new(84.0, 38.0));

    b.set_visible(false);
    step(&mut manager, &mut painter, &idle(16));
    let narrow = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().rect();
    assert_eq!(narrow.size, Size::new(51.0, 38.0));
}

#[test]
fn test_scene_visibility_follows_load_scene() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    let command = button(&manager, "m", "map");
    command.set_visibility(Some(Arc::new(SceneVisibility::new(
        manager.context(),
        ["flight"],
    ))));

    manager.load_scene("editor");
    assert!(!command.effectively_visible());
    manager.load_scene("flight");
    assert!(command.effectively_visible());
}

/// Records where it was drawn and reports a fixed size.
struct Panel {
    positions: Arc<Mutex<Vec<Point>>>,
    updates: Arc<AtomicUsize>,
}

impl Drawable for Panel {
    fn update(&mut self) {
        self.updates.fetch_add(1, Ordering::SeqCst);
    }

    fn draw(&mut self, position: Point, _painter: &mut dyn Painter) -> Size {
        self.positions.lock().unwrap().push(position);
        Size::new(60.0, 40.0)
    }
}

#[test]
fn test_drawable_is_placed_beside_toolbar() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    let command = button(&manager, "m", "a");
    let positions = Arc::new(Mutex::new(Vec::new()));
    let updates = Arc::new(AtomicUsize::new(0));
    command.set_drawable(Panel {
        positions: positions.clone(),
        updates: updates.clone(),
    });
    manager.load_scene("flight");
    allow(&mut manager, &["m.a"]);

    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    step(&mut manager, &mut painter, &idle(16));
    assert_eq!(updates.load(Ordering::SeqCst), 2);

    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().rect();
    let last = *positions.lock().unwrap().last().unwrap();
    let panel = Rect::from_origin_size(last, Size::new(60.0, 40.0));
    assert!(!panel.overlaps(&toolbar));
    assert!(panel.left() >= 0.0 && panel.right() <= 800.0);
    assert!(panel.top() >= 0.0 && panel.bottom() <= 600.0);

    // A hidden command's drawable is neither updated nor drawn.
    command.set_visible(false);
    let drawn = positions.lock().unwrap().len();
    step(&mut manager, &mut painter, &idle(32));
    assert_eq!(positions.lock().unwrap().len(), drawn);
    assert_eq!(updates.load(Ordering::SeqCst), 2);
}

#[test]
fn test_popup_menu_drawable_option_click() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    let command = button(&manager, "m", "a");
    let menu = PopupMenuDrawable::new();
    let first = menu.add_option("Warp");
    menu.add_separator();
    menu.add_option("Stop");
    command.set_drawable(menu.clone());

    let first_clicks = Arc::new(AtomicUsize::new(0));
    let any_clicks = Arc::new(AtomicUsize::new(0));
    let counter = first_clicks.clone();
    first.clicked().connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = any_clicks.clone();
    menu.any_option_clicked().connect(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    manager.load_scene("flight");
    allow(&mut manager, &["m.a"]);

    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    let texts: Vec<String> = painter.menu_options().into_iter().map(|(text, _)| text).collect();
    assert_eq!(texts, ["Warp", "Stop"]);

    painter.choose("Warp");
    step(&mut manager, &mut painter, &frame_at(Point::new(700.0, 500.0), 16));
    assert_eq!(first_clicks.load(Ordering::SeqCst), 1);
    assert_eq!(any_clicks.load(Ordering::SeqCst), 1);

    menu.destroy();
    assert!(first.is_destroyed());
}
