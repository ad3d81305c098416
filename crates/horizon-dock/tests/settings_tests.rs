//! Tests for loading, saving and migrating the settings file.

mod common;

use std::fs;
use std::sync::Arc;

use common::{MockIconLoader, button, config, idle, init_tracing, manager};
use horizon_dock::render::{Point, Skin};
use horizon_dock::settings::SettingsValue;
use horizon_dock::{DEFAULT_TOOLBAR_ID, DockConfig, SettingsDocument, ToolbarManager};

fn settings_file(dir: &tempfile::TempDir) -> std::path::PathBuf {
    dir.path().join("settings.toml")
}

#[test]
fn test_saved_state_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut manager = manager(&dir);
        button(&manager, "m", "a");
        button(&manager, "m", "b");
        manager.load_scene("flight");
        assert!(manager.set_visible_buttons(DEFAULT_TOOLBAR_ID, ["m.b".to_string()]));
        manager.update(&idle(0));
    }

    let document = SettingsDocument::load(settings_file(&dir)).unwrap();
    assert_eq!(
        document.get_raw("toolbars.flight.toolbar.visibleButtons"),
        Some(SettingsValue::String("m.b".to_string()))
    );
    assert!(document.get_bool_or("toolbars.checkForUpdates", false));

    let mut manager = manager(&dir);
    button(&manager, "m", "a");
    button(&manager, "m", "b");
    manager.load_scene("flight");
    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
    assert_eq!(toolbar.visible_button_ids(), ["m.b"]);
    assert_eq!(toolbar.rect().origin, Point::new(300.0, 300.0));
}

#[test]
fn test_scenes_are_kept_apart() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    button(&manager, "m", "a");
    manager.load_scene("flight");
    assert!(manager.set_visible_buttons(DEFAULT_TOOLBAR_ID, ["m.a".to_string()]));
    manager.update(&idle(0));

    manager.load_scene("editor");
    assert!(manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().allowed_buttons().is_empty());

    manager.load_scene("flight");
    assert!(manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().allowed_buttons().contains("m.a"));
}

#[test]
fn test_legacy_layout_is_migrated_once() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        settings_file(&dir),
        r#"
[toolbars.toolbar]
x = 10.0
y = 20.0
width = 120.0
visibleButtons = "m.a"
useKSPSkin = true
"#,
    )
    .unwrap();

    let mut manager = manager(&dir);
    button(&manager, "m", "a");
    manager.load_scene("flight");
    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
    assert_eq!(toolbar.rect().origin, Point::new(10.0, 20.0));
    assert_eq!(toolbar.skin(), Skin::Host);
    assert!(toolbar.allowed_buttons().contains("m.a"));

    // The migrated layout is on disk right away.
    let document = SettingsDocument::load(settings_file(&dir)).unwrap();
    assert!(!document.contains("toolbars.toolbar.x"));
    assert_eq!(
        document.get_raw("toolbars.flight.toolbar.x"),
        Some(SettingsValue::Float(10.0))
    );

    // Other scenes start fresh.
    manager.load_scene("editor");
    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
    assert_eq!(toolbar.rect().origin, Point::new(300.0, 300.0));
}

#[test]
fn test_legacy_skin_key_is_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        settings_file(&dir),
        r#"
[toolbars.flight.toolbar]
x = 50.0
y = 60.0
useKSPSkin = true
visibleButtons = "m.a"
"#,
    )
    .unwrap();

    {
        let mut manager = manager(&dir);
        button(&manager, "m", "a");
        manager.load_scene("flight");
        assert_eq!(manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().skin(), Skin::Host);
        manager.save().unwrap();
    }

    let document = SettingsDocument::load(settings_file(&dir)).unwrap();
    assert!(document.get_bool_or("toolbars.flight.toolbar.useSkin", false));
    assert!(!document.contains("toolbars.flight.toolbar.useKSPSkin"));
}

#[test]
fn test_check_for_updates_flag_is_read() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(settings_file(&dir), "[toolbars]\ncheckForUpdates = false\n").unwrap();

    let mut manager = manager(&dir);
    manager.load_scene("flight");
    assert!(!manager.check_for_updates());
    manager.save().unwrap();

    let document = SettingsDocument::load(settings_file(&dir)).unwrap();
    assert!(!document.get_bool_or("toolbars.checkForUpdates", true));
}

#[test]
fn test_json_settings_path() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dock.json");
    {
        let config = DockConfig::default().with_settings_path(&path);
        let mut manager = ToolbarManager::new(config, Arc::new(MockIconLoader));
        button(&manager, "m", "a");
        manager.load_scene("flight");
        assert!(manager.set_visible_buttons(DEFAULT_TOOLBAR_ID, ["m.a".to_string()]));
        manager.update(&idle(0));
    }

    let text = fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(json["toolbars"]["flight"]["toolbar"]["visibleButtons"], "m.a");
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(settings_file(&dir), "this is [not = valid toml").unwrap();

    let mut manager = ToolbarManager::new(config(&dir), Arc::new(MockIconLoader));
    button(&manager, "m", "a");
    manager.load_scene("flight");
    assert_eq!(manager.toolbar_ids(), [DEFAULT_TOOLBAR_ID]);
    let toolbar = manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap();
    assert_eq!(toolbar.rect().origin, Point::new(300.0, 300.0));
    assert!(toolbar.allowed_buttons().is_empty());
}

#[test]
fn test_unreadable_toolbar_entry_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        settings_file(&dir),
        r#"
[toolbars.flight.toolbar]
x = "left"

[toolbars.flight.toolbar_1]
x = 40.0
y = 50.0
"#,
    )
    .unwrap();

    let mut manager = manager(&dir);
    manager.load_scene("flight");
    assert_eq!(manager.toolbar_ids(), [DEFAULT_TOOLBAR_ID, "toolbar_1"]);
    assert_eq!(
        manager.toolbar(DEFAULT_TOOLBAR_ID).unwrap().rect().origin,
        Point::new(300.0, 300.0)
    );
    assert_eq!(
        manager.toolbar("toolbar_1").unwrap().rect().origin,
        Point::new(40.0, 50.0)
    );
}

#[test]
fn test_frame_saves_are_written_in_background() {
    let dir = tempfile::tempdir().unwrap();
    let mut manager = manager(&dir);
    button(&manager, "m", "a");
    manager.load_scene("flight");
    for ids in [vec![], vec!["m.a".to_string()]] {
        assert!(manager.set_visible_buttons(DEFAULT_TOOLBAR_ID, ids));
        manager.update(&idle(0));
    }

    // An explicit save waits for the queued frame saves first.
    manager.save().unwrap();
    assert!(!manager.is_saving());
    let document = SettingsDocument::load(settings_file(&dir)).unwrap();
    assert_eq!(
        document.get_raw("toolbars.flight.toolbar.visibleButtons"),
        Some(SettingsValue::String("m.a".to_string()))
    );
}
