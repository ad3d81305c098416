//! Migration of the single-toolbar settings layout.
//!
//! Older versions stored one toolbar under `toolbars.toolbar`, either as flat
//! values or as one child group per scene. The current layout keeps every
//! toolbar under `toolbars.<scene>.<toolbarId>`.

use std::collections::BTreeMap;

use horizon_dock_core::logging::targets;

use super::{SettingsDocument, SettingsValue};

const LEGACY_PATH: &str = "toolbars.toolbar";
const LEGACY_TOOLBAR_ID: &str = "toolbar";
// A flat legacy toolbar may carry its own folder group.
const FOLDERS_KEY: &str = "folders";

/// Rewrite a legacy `toolbars.toolbar` node in place.
///
/// Per-scene child groups move to `toolbars.<child>.toolbar`. Flat values
/// move to `toolbars.<scene>.toolbar`; where the legacy node also has a
/// child group for `scene`, the child's values win. Returns whether anything
/// was migrated, in which case the caller should save the document.
pub fn migrate_legacy(document: &SettingsDocument, scene: &str) -> bool {
    let Some(SettingsValue::Object(legacy)) = document.get_raw(LEGACY_PATH) else {
        return false;
    };

    let mut flat = BTreeMap::new();
    let mut per_scene = BTreeMap::new();
    for (key, value) in legacy {
        match value {
            SettingsValue::Object(group) if key != FOLDERS_KEY => {
                per_scene.insert(key, group);
            }
            value => {
                flat.insert(key, value);
            }
        }
    }

    if !flat.is_empty() {
        let mut merged = flat;
        if let Some(child) = per_scene.remove(scene) {
            merged.extend(child);
        }
        per_scene.insert(scene.to_string(), merged);
    }

    document.remove(LEGACY_PATH);
    for (target_scene, values) in per_scene {
        tracing::info!(target: targets::SETTINGS, scene = %target_scene, "migrating legacy toolbar settings");
        document.set(
            &format!("toolbars.{target_scene}.{LEGACY_TOOLBAR_ID}"),
            SettingsValue::Object(values),
        );
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_values_go_to_current_scene() {
        let doc = SettingsDocument::new();
        doc.set("toolbars.toolbar.x", 10.0);
        doc.set("toolbars.toolbar.autoHide", true);
        assert!(migrate_legacy(&doc, "flight"));
        assert!(!doc.contains("toolbars.toolbar.x"));
        assert_eq!(doc.get_raw("toolbars.flight.toolbar.x"), Some(SettingsValue::Float(10.0)));
        assert!(doc.get_bool_or("toolbars.flight.toolbar.autoHide", false));
    }

    #[test]
    fn test_per_scene_children_and_precedence() {
        let doc = SettingsDocument::new();
        doc.set("toolbars.toolbar.x", 10.0);
        doc.set("toolbars.toolbar.y", 20.0);
        doc.set("toolbars.toolbar.flight.x", 99.0);
        doc.set("toolbars.toolbar.editor.y", 5.0);
        assert!(migrate_legacy(&doc, "flight"));

        assert_eq!(doc.get_raw("toolbars.flight.toolbar.x"), Some(SettingsValue::Float(99.0)));
        assert_eq!(doc.get_raw("toolbars.flight.toolbar.y"), Some(SettingsValue::Float(20.0)));
        assert_eq!(doc.get_raw("toolbars.editor.toolbar.y"), Some(SettingsValue::Float(5.0)));
        assert!(!doc.contains("toolbars.editor.toolbar.x"));
    }

    #[test]
    fn test_flat_folders_group_is_not_a_scene() {
        let doc = SettingsDocument::new();
        doc.set("toolbars.toolbar.x", 10.0);
        doc.set("toolbars.toolbar.folders.folder_1.buttons", "a.b");
        migrate_legacy(&doc, "flight");
        assert!(doc.contains("toolbars.flight.toolbar.folders.folder_1"));
        assert!(!doc.contains("toolbars.folders"));
    }

    #[test]
    fn test_runs_once() {
        let doc = SettingsDocument::new();
        doc.set("toolbars.toolbar.x", 10.0);
        assert!(migrate_legacy(&doc, "flight"));
        assert!(!migrate_legacy(&doc, "flight"));
        assert!(!migrate_legacy(&doc, "editor"));
    }

    #[test]
    fn test_nothing_to_migrate() {
        let doc = SettingsDocument::new();
        doc.set("toolbars.flight.toolbar.x", 1.0);
        assert!(!migrate_legacy(&doc, "flight"));
    }
}
