//! The toolbar dropdown menu and the folder button menu.

use horizon_dock_render::{Point, Skin};

use crate::popup_menu::PopupMenu;

/// An entry chosen in one of the toolbar menus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    ConfigureVisibleButtons,
    ToggleRectLock,
    ToggleOrderLock,
    ToggleAutoHide,
    ToggleBorder,
    ToggleSkin,
    CreateFolder,
    CreateToolbar,
    DeleteToolbar,
    About,
    EditFolder(String),
    DeleteFolder(String),
}

/// Toolbar state the dropdown menu entries depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownState {
    pub rect_locked: bool,
    pub order_locked: bool,
    pub auto_hide: bool,
    pub at_screen_edge: bool,
    pub show_border: bool,
    pub skin: Skin,
    pub selector_open: bool,
    pub toolbar_count: usize,
}

impl DropdownState {
    /// Entries that need both locks engaged.
    fn regular(&self) -> bool {
        self.rect_locked && self.order_locked
    }
}

/// Build the dropdown menu with its top-left corner at `position`.
pub fn dropdown_menu(position: Point, state: DropdownState) -> PopupMenu<MenuAction> {
    let regular = state.regular();
    let mut menu = PopupMenu::new(position);

    menu.add_option(
        "Configure Visible Buttons...",
        regular && !state.selector_open,
        MenuAction::ConfigureVisibleButtons,
    );
    menu.add_separator();

    let rect_text = if state.rect_locked {
        "Unlock Position and Size"
    } else {
        "Lock Position and Size"
    };
    menu.add_option(rect_text, state.order_locked, MenuAction::ToggleRectLock);

    let order_text = if state.order_locked {
        "Unlock Button Order"
    } else {
        "Lock Button Order"
    };
    menu.add_option(order_text, state.rect_locked, MenuAction::ToggleOrderLock);

    let auto_hide_text = if state.auto_hide {
        "Deactivate Auto-Hide at Screen Edge"
    } else {
        "Activate Auto-Hide at Screen Edge"
    };
    menu.add_option(
        auto_hide_text,
        regular && (state.auto_hide || state.at_screen_edge),
        MenuAction::ToggleAutoHide,
    );

    let border_text = if state.show_border { "Hide Border" } else { "Show Border" };
    menu.add_option(border_text, regular, MenuAction::ToggleBorder);

    let skin_text = match state.skin {
        Skin::Host => "Use Default Skin",
        Skin::Default => "Use Host Skin",
    };
    menu.add_option(skin_text, regular, MenuAction::ToggleSkin);
    menu.add_separator();

    menu.add_option("Create New Folder...", regular, MenuAction::CreateFolder);
    menu.add_separator();

    menu.add_option("Create New Toolbar", regular, MenuAction::CreateToolbar);
    menu.add_option(
        "Delete Toolbar...",
        regular && state.toolbar_count > 1,
        MenuAction::DeleteToolbar,
    );
    menu.add_separator();

    menu.add_option("About...", true, MenuAction::About);
    menu
}

/// Build the menu opened by right-clicking a folder button.
pub fn folder_menu(position: Point, folder_id: &str) -> PopupMenu<MenuAction> {
    let mut menu = PopupMenu::new(position);
    menu.add_option("Edit Folder Settings", true, MenuAction::EditFolder(folder_id.to_string()));
    menu.add_option("Delete Folder", true, MenuAction::DeleteFolder(folder_id.to_string()));
    menu
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locked() -> DropdownState {
        DropdownState {
            rect_locked: true,
            order_locked: true,
            auto_hide: false,
            at_screen_edge: false,
            show_border: true,
            skin: Skin::Default,
            selector_open: false,
            toolbar_count: 1,
        }
    }

    fn enabled(menu: &PopupMenu<MenuAction>, action: &MenuAction) -> Option<bool> {
        menu.options()
            .find(|(_, _, value)| *value == action)
            .map(|(_, enabled, _)| enabled)
    }

    #[test]
    fn test_entries_of_locked_toolbar() {
        let menu = dropdown_menu(Point::ZERO, locked());
        let texts: Vec<_> = menu.options().map(|(text, _, _)| text.to_string()).collect();
        assert_eq!(
            texts,
            [
                "Configure Visible Buttons...",
                "Unlock Position and Size",
                "Unlock Button Order",
                "Activate Auto-Hide at Screen Edge",
                "Hide Border",
                "Use Host Skin",
                "Create New Folder...",
                "Create New Toolbar",
                "Delete Toolbar...",
                "About...",
            ]
        );
        // Not docked at an edge, so auto-hide cannot be turned on.
        assert_eq!(enabled(&menu, &MenuAction::ToggleAutoHide), Some(false));
        assert_eq!(enabled(&menu, &MenuAction::CreateFolder), Some(true));
    }

    #[test]
    fn test_delete_toolbar_needs_another_toolbar() {
        let menu = dropdown_menu(Point::ZERO, locked());
        assert_eq!(enabled(&menu, &MenuAction::DeleteToolbar), Some(false));

        let menu = dropdown_menu(Point::ZERO, DropdownState { toolbar_count: 2, ..locked() });
        assert_eq!(enabled(&menu, &MenuAction::DeleteToolbar), Some(true));
    }

    #[test]
    fn test_unlocked_rect_disables_regular_entries() {
        let state = DropdownState {
            rect_locked: false,
            ..locked()
        };
        let menu = dropdown_menu(Point::ZERO, state);
        assert_eq!(enabled(&menu, &MenuAction::ToggleRectLock), Some(true));
        assert_eq!(enabled(&menu, &MenuAction::ToggleOrderLock), Some(false));
        assert_eq!(enabled(&menu, &MenuAction::ToggleBorder), Some(false));
        assert_eq!(enabled(&menu, &MenuAction::CreateToolbar), Some(false));
        assert_eq!(enabled(&menu, &MenuAction::About), Some(true));
        assert!(menu.options().any(|(text, _, _)| text == "Lock Position and Size"));
    }

    #[test]
    fn test_folder_menu() {
        let menu = folder_menu(Point::new(10.0, 20.0), "folder_1");
        assert_eq!(menu.option_count(), 2);
        assert_eq!(
            enabled(&menu, &MenuAction::DeleteFolder("folder_1".into())),
            Some(true)
        );
    }
}
