//! Folders: nested toolbars that open beside their parent.

use std::sync::Arc;

use horizon_dock_core::logging::targets;
use horizon_dock_render::FrameInput;

use super::{Toolbar, ToolbarMode, engine_command};
use crate::button::{Button, ButtonKind};
use crate::command::Command;
use crate::placement::{Side, place_beside};
use crate::settings::FolderSettings;

/// A folder owned by a toolbar.
#[derive(Debug)]
pub(crate) struct Folder {
    pub(super) toolbar: Toolbar,
    /// Command behind the folder button in the parent.
    pub(super) command: Arc<Command>,
    pub(super) settings: FolderSettings,
    last_side: Option<Side>,
}

impl Toolbar {
    fn new_folder_toolbar(&self, folder_id: &str) -> Toolbar {
        let mut toolbar = Toolbar::with_mode(
            folder_id,
            ToolbarMode::Folder,
            self.context.clone(),
            self.outbox.clone(),
        );
        toolbar.show_border = self.show_border;
        toolbar.skin = self.skin;
        toolbar.allow_set = self.allow_set.clone();
        toolbar.enabled = self.order_locked;
        toolbar
    }

    /// Create a folder and its button. Buttons saved as members move into
    /// it.
    pub(crate) fn create_folder(&mut self, folder_id: &str, settings: FolderSettings, visible: bool) {
        if visible {
            self.hide_folders();
        }

        let command = engine_command(folder_id, &settings.icon, settings.tooltip.as_deref());
        let mut toolbar = self.new_folder_toolbar(folder_id);
        toolbar.visible = visible;

        let (members, rest): (Vec<Button>, Vec<Button>) = std::mem::take(&mut self.buttons)
            .into_iter()
            .partition(|b| settings.buttons.contains(b.full_id()));
        self.buttons = rest;
        for button in members {
            toolbar.add(button);
        }

        tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, folder = folder_id, members = settings.buttons.len(), "folder created");
        self.folders.insert(
            folder_id.to_string(),
            Folder {
                toolbar,
                command: command.clone(),
                settings,
                last_side: None,
            },
        );
        self.add(Button::new(command, ButtonKind::Folder(folder_id.to_string())));
    }

    /// Create an empty, open folder with the next free `folder_<n>` id.
    pub(crate) fn create_new_folder(&mut self, tooltip: Option<&str>, icon: &str) -> String {
        let folder_id = (1..)
            .map(|n| format!("folder_{n}"))
            .find(|id| !self.folders.contains_key(id))
            .unwrap_or_default();
        let settings = FolderSettings {
            icon: icon.to_string(),
            tooltip: tooltip.map(str::to_string),
            ..FolderSettings::default()
        };
        self.create_folder(&folder_id, settings, true);
        tracing::info!(target: targets::TOOLBAR, toolbar = %self.id, folder = %folder_id, "new folder");
        self.fire_change();
        folder_id
    }

    /// Change a folder's tooltip and icon. Returns false for an unknown id.
    pub(crate) fn update_folder(&mut self, folder_id: &str, tooltip: Option<&str>, icon: &str) -> bool {
        let Some(folder) = self.folders.get_mut(folder_id) else {
            return false;
        };
        folder.settings.tooltip = tooltip.map(str::to_string);
        folder.settings.icon = icon.to_string();
        folder.command.set_tooltip(tooltip);
        if let Err(err) = folder.command.set_icon_path(Some(icon)) {
            tracing::warn!(target: targets::TOOLBAR, folder = folder_id, error = %err, "invalid folder icon");
        }
        self.fire_change();
        true
    }

    /// Delete a folder. Its buttons return to this toolbar.
    pub(crate) fn remove_folder(&mut self, folder_id: &str) -> bool {
        let Some(folder) = self.folders.remove(folder_id) else {
            return false;
        };
        folder.command.destroy();
        self.buttons.retain(|b| b.folder_id() != Some(folder_id));
        for button in folder.toolbar.buttons {
            self.add(button);
        }
        tracing::info!(target: targets::TOOLBAR, toolbar = %self.id, folder = folder_id, "folder deleted");
        self.fire_change();
        true
    }

    /// Open a folder, closing any other, or close it if it is open.
    pub(crate) fn toggle_folder(&mut self, folder_id: &str) {
        let show = self
            .folders
            .get(folder_id)
            .is_some_and(|folder| !folder.toolbar.visible);
        self.hide_folders();
        if let Some(folder) = self.folders.get_mut(folder_id)
            && show
        {
            folder.toolbar.set_visible(true);
        }
    }

    pub(super) fn hide_folders(&mut self) {
        for folder in self.folders.values_mut() {
            folder.toolbar.set_visible(false);
        }
    }

    pub(super) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.menu = None;
            self.set_hovered(None);
        }
    }

    /// Disabling forces both locks on and drops any menu or drag.
    pub(super) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.rect_locked = true;
            self.order_locked = true;
            self.menu = None;
            self.reorder = None;
        }
    }

    /// Update every folder and place the open one beside this toolbar.
    pub(super) fn update_folders(&mut self, input: &FrameInput) {
        let parent = self.rect;
        let single_column = self.is_single_column();
        for folder in self.folders.values_mut() {
            folder.toolbar.update(input);
            if folder.toolbar.visible {
                let placement = place_beside(
                    parent,
                    folder.toolbar.rect.size,
                    input.screen,
                    single_column,
                    folder.last_side,
                );
                folder.last_side = Some(placement.side);
                folder.toolbar.rect = placement.rect;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{CONFIGURE, context, frame, register, toolbar};
    use super::*;
    use crate::button::icons;

    fn folder_settings(members: &[&str]) -> FolderSettings {
        FolderSettings {
            icon: icons::FOLDER.to_string(),
            tooltip: Some("Science".to_string()),
            buttons: members.iter().map(|id| id.to_string()).collect(),
        }
    }

    #[test]
    fn test_members_route_into_folder() {
        let context = context();
        register(&context, "m", "a");
        register(&context, "m", "b");
        let mut toolbar = toolbar(&context);
        toolbar.create_folder("folder_1", folder_settings(&["m.b"]), false);
        toolbar.set_visible_buttons(["m.a".to_string(), "m.b".to_string()].into());

        assert_eq!(toolbar.button_ids(), [CONFIGURE, "__TOOLBAR_INTERNAL.folder_1", "m.a"]);
        assert_eq!(toolbar.folder("folder_1").map(Toolbar::button_ids), Some(vec!["m.b".to_string()]));
    }

    #[test]
    fn test_new_folder_ids_and_exclusive_open() {
        let context = context();
        let mut toolbar = toolbar(&context);
        assert_eq!(toolbar.create_new_folder(None, icons::FOLDER), "folder_1");
        assert_eq!(toolbar.create_new_folder(Some("Two"), icons::FOLDER), "folder_2");
        assert!(toolbar.take_changed());

        // The newest folder is open, and only one at a time.
        assert!(!toolbar.folder("folder_1").unwrap().is_visible());
        assert!(toolbar.folder("folder_2").unwrap().is_visible());
        toolbar.toggle_folder("folder_1");
        assert!(toolbar.folder("folder_1").unwrap().is_visible());
        assert!(!toolbar.folder("folder_2").unwrap().is_visible());
        toolbar.toggle_folder("folder_1");
        assert!(!toolbar.folder("folder_1").unwrap().is_visible());
    }

    #[test]
    fn test_remove_folder_returns_buttons() {
        let context = context();
        register(&context, "m", "a");
        let mut toolbar = toolbar(&context);
        toolbar.create_folder("folder_1", folder_settings(&["m.a"]), false);
        toolbar.set_visible_buttons(["m.a".to_string()].into());

        assert!(toolbar.remove_folder("folder_1"));
        assert_eq!(toolbar.button_ids(), [CONFIGURE, "m.a"]);
        assert!(toolbar.folder_ids().is_empty());
        assert!(!toolbar.remove_folder("folder_1"));
    }

    #[test]
    fn test_open_folder_is_placed_beside_parent() {
        let context = context();
        register(&context, "m", "a");
        register(&context, "m", "b");
        let mut toolbar = toolbar(&context);
        toolbar.create_folder("folder_1", folder_settings(&["m.b"]), true);
        toolbar.set_visible_buttons(["m.a".to_string(), "m.b".to_string()].into());

        toolbar.update(&frame(0.0, 0.0));
        toolbar.update(&frame(0.0, 0.0));
        let parent = toolbar.rect();
        let folder = toolbar.folder("folder_1").unwrap().rect();
        assert!(!folder.overlaps(&parent));
        assert_eq!(folder.size.width, 38.0);
    }

    #[test]
    fn test_update_folder_changes_command() {
        let context = context();
        let mut toolbar = toolbar(&context);
        let id = toolbar.create_new_folder(None, icons::FOLDER);
        assert!(toolbar.update_folder(&id, Some("Renamed"), "icons/star"));
        let folder = &toolbar.folders[&id];
        assert_eq!(folder.command.tooltip().as_deref(), Some("Renamed"));
        assert_eq!(folder.settings.icon, "icons/star");
        assert!(!toolbar.update_folder("nope", None, icons::FOLDER));
    }
}
