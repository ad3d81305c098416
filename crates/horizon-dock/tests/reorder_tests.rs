//! Tests for dragging buttons to reorder them and into folders.

mod common;

use common::{MockPainter, button, center, frame_at, idle, manager, step};
use horizon_dock::button::icons;
use horizon_dock::render::{MouseButton, Point, Rect};
use horizon_dock::{DEFAULT_TOOLBAR_ID, ToolbarManager};

const IDS: [&str; 4] = ["a", "b", "c", "d"];

fn session(dir: &tempfile::TempDir) -> ToolbarManager {
    let mut manager = manager(dir);
    for id in IDS {
        button(&manager, "m", id);
    }
    manager.load_scene("flight");
    manager
}

fn unlock_order(manager: &mut ToolbarManager, painter: &mut MockPainter, now: u64) {
    painter.clear();
    step(manager, painter, &idle(now));
    let (dropdown, _) = painter.button(icons::DROPDOWN).unwrap();
    painter.click_at(center(dropdown), MouseButton::Primary);
    step(manager, painter, &idle(now + 16));
    painter.choose("Unlock Button Order");
    step(manager, painter, &idle(now + 32));
    assert!(!manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().is_button_order_locked());
}

/// Press at `from`, hold at `to`, release at `to`.
fn drag(manager: &mut ToolbarManager, from: Point, to: Point, now: u64) {
    manager.update(&frame_at(from, now).pressing(MouseButton::Primary));
    manager.update(&frame_at(to, now + 16).holding(MouseButton::Primary));
    manager.update(&frame_at(to, now + 32));
}

fn rect_of(painter: &MockPainter, icon: &str) -> Rect {
    painter.button(icon).unwrap().0
}

#[test]
fn test_reorder_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut manager = session(&dir);
        assert!(manager.set_visible_buttons(
            DEFAULT_TOOLBAR_ID,
            IDS.iter().map(|id| format!("m.{id}"))
        ));
        let mut painter = MockPainter::new();
        unlock_order(&mut manager, &mut painter, 0);

        painter.clear();
        step(&mut manager, &mut painter, &idle(100));
        let first = rect_of(&painter, "m/a");
        let third = rect_of(&painter, "m/c");
        drag(
            &mut manager,
            Point::new(first.left() + 5.0, first.top() + 5.0),
            Point::new(third.right() - 5.0, third.top() + 5.0),
            200,
        );
        let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
        assert_eq!(toolbar.visible_button_ids(), ["m.b", "m.c", "m.a", "m.d"]);
    }

    let manager = session(&dir);
    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
    assert_eq!(toolbar.visible_button_ids(), ["m.b", "m.c", "m.a", "m.d"]);
    assert!(toolbar.is_button_order_locked());
}

#[test]
fn test_drop_onto_folder_moves_button_inside() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut manager = session(&dir);
        assert!(manager.set_visible_buttons(
            DEFAULT_TOOLBAR_ID,
            ["m.a".to_string(), "m.b".to_string()]
        ));
        let folder = manager
            .create_folder(DEFAULT_TOOLBAR_ID, Some("Tools"), icons::FOLDER)
            .unwrap();
        assert_eq!(folder, "folder_1");

        let mut painter = MockPainter::new();
        unlock_order(&mut manager, &mut painter, 0);

        painter.clear();
        step(&mut manager, &mut painter, &idle(100));
        let dragged = rect_of(&painter, "m/a");
        let target = rect_of(&painter, icons::FOLDER);
        drag(&mut manager, center(dragged), center(target), 200);

        let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
        assert!(toolbar.folder_members("folder_1").unwrap().contains("m.a"));
        assert!(!toolbar.visible_button_ids().contains(&"m.a".to_string()));
        assert!(toolbar.visible_button_ids().contains(&"m.b".to_string()));
    }

    let manager = session(&dir);
    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
    assert_eq!(toolbar.folder_ids(), ["folder_1"]);
    assert!(toolbar.folder_members("folder_1").unwrap().contains("m.a"));
    assert_eq!(
        toolbar.folder("folder_1").unwrap().visible_button_ids(),
        ["m.a"]
    );
}

#[test]
fn test_locked_order_ignores_drags() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = session(&dir);
    assert!(manager.set_visible_buttons(
        DEFAULT_TOOLBAR_ID,
        IDS.iter().map(|id| format!("m.{id}"))
    ));
    let mut painter = MockPainter::new();
    step(&mut manager, &mut painter, &idle(0));
    let first = rect_of(&painter, "m/a");
    let third = rect_of(&painter, "m/c");

    drag(&mut manager, center(first), center(third), 100);
    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
    assert_eq!(toolbar.visible_button_ids(), ["m.a", "m.b", "m.c", "m.d"]);
}
