//! Per-toolbar button views.
//!
//! A [`Button`] is what a toolbar lays out and draws. It points at a
//! [`Command`] and caches what it derives from it: the loaded icon and the
//! button size. The cache is stamped with the command's version and rebuilt
//! whenever the version moves.

use std::sync::Arc;

use horizon_dock_core::logging::targets;
use horizon_dock_render::{
    ButtonStyle, Icon, IconLoader, MAX_ICON_HEIGHT, MAX_ICON_WIDTH, MouseButton, Painter, Rect,
    Size, load_bounded,
};

use crate::command::Command;

/// Size of a button showing an icon.
pub const TEXTURED_BUTTON_SIZE: Size = Size::new(32.0, 32.0);
/// Size of the dropdown menu button.
pub const DROPDOWN_BUTTON_SIZE: Size = Size::new(10.0, 7.0);

/// Icon paths of the engine's own buttons.
pub mod icons {
    pub const DROPDOWN: &str = "000_Toolbar/toolbar-dropdown";
    pub const FOLDER: &str = "000_Toolbar/folder";
    pub const CONFIGURE_VISIBLE_BUTTONS: &str = "000_Toolbar/new-button-available";
    pub const UPDATE_AVAILABLE: &str = "000_Toolbar/update-available";
}

/// What a button does for its toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonKind {
    /// A plugin or engine command.
    Regular,
    /// Opens the toolbar's dropdown menu.
    Dropdown,
    /// Opens the folder with the given id.
    Folder(String),
    /// Opens the visible buttons selector.
    ConfigureVisibleButtons,
}

#[derive(Debug, Clone)]
struct ButtonCache {
    version: u64,
    icon: Option<Icon>,
    size: Size,
}

/// A command as shown on one toolbar.
#[derive(Debug, Clone)]
pub struct Button {
    command: Arc<Command>,
    kind: ButtonKind,
    cache: Option<ButtonCache>,
}

impl Button {
    /// Wrap `command`.
    pub fn new(command: Arc<Command>, kind: ButtonKind) -> Self {
        Self {
            command,
            kind,
            cache: None,
        }
    }

    /// The command shown by this button.
    pub fn command(&self) -> &Arc<Command> {
        &self.command
    }

    /// The button's kind.
    pub fn kind(&self) -> &ButtonKind {
        &self.kind
    }

    /// Full id of the underlying command.
    pub fn full_id(&self) -> &str {
        self.command.full_id()
    }

    pub fn is_dropdown(&self) -> bool {
        self.kind == ButtonKind::Dropdown
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, ButtonKind::Folder(_))
    }

    /// Id of the folder this button opens.
    pub fn folder_id(&self) -> Option<&str> {
        match &self.kind {
            ButtonKind::Folder(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the cache is out of date.
    pub fn is_stale(&self) -> bool {
        self.cache
            .as_ref()
            .is_none_or(|cache| cache.version != self.command.version())
    }

    /// Rebuild the cache if the command changed since the last refresh.
    ///
    /// An icon that fails to load, or is larger than 24x24, is logged and
    /// cleared from the command, which hides it.
    pub fn refresh(&mut self, loader: &dyn IconLoader) {
        if !self.is_stale() {
            return;
        }

        let icon = match self.command.icon_path() {
            Some(path) => match load_bounded(loader, &path, MAX_ICON_WIDTH, MAX_ICON_HEIGHT) {
                Ok(icon) => Some(icon),
                Err(err) => {
                    tracing::warn!(target: targets::COMMAND, command = self.full_id(), error = %err, "dropping button icon");
                    self.command.clear_icon();
                    None
                }
            },
            None => None,
        };

        let size = match (&self.kind, &icon) {
            (ButtonKind::Dropdown, _) => DROPDOWN_BUTTON_SIZE,
            (_, Some(_)) => TEXTURED_BUTTON_SIZE,
            (_, None) => Size::ZERO,
        };

        self.cache = Some(ButtonCache {
            version: self.command.version(),
            icon,
            size,
        });
    }

    /// Cached size. Zero until the first refresh.
    pub fn size(&self) -> Size {
        self.cache.as_ref().map_or(Size::ZERO, |cache| cache.size)
    }

    /// Cached icon.
    pub fn icon(&self) -> Option<&Icon> {
        self.cache.as_ref().and_then(|cache| cache.icon.as_ref())
    }

    /// Default drawing style for this button; the toolbar adjusts tint and
    /// skin.
    pub fn style(&self) -> ButtonStyle {
        ButtonStyle {
            text_color: self.command.text_color(),
            enabled: self.command.is_enabled(),
            frameless: self.is_dropdown(),
            ..ButtonStyle::default()
        }
    }

    /// Draw the button. Returns the mouse button that clicked it.
    pub fn draw(&self, painter: &mut dyn Painter, rect: Rect, style: &ButtonStyle) -> Option<MouseButton> {
        match self.icon() {
            Some(icon) => painter.icon_button(rect, icon, style),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_dock_render::{IconError, IconResult};

    struct SizedLoader;

    impl IconLoader for SizedLoader {
        fn load(&self, path: &str) -> IconResult<Icon> {
            match path {
                "big" => Ok(Icon::new(path, 64, 64, 1)),
                "missing" => Err(IconError::NotFound {
                    path: path.to_string(),
                }),
                _ => Ok(Icon::new(path, 24, 24, 2)),
            }
        }
    }

    fn command(icon: Option<&str>) -> Arc<Command> {
        let command = Command::internal("test");
        command.set_icon_path(icon).unwrap();
        command
    }

    #[test]
    fn test_textured_size() {
        let mut button = Button::new(command(Some("ok")), ButtonKind::Regular);
        assert!(button.is_stale());
        button.refresh(&SizedLoader);
        assert_eq!(button.size(), TEXTURED_BUTTON_SIZE);
        assert_eq!(button.icon().map(Icon::handle), Some(2));
        assert!(!button.is_stale());
    }

    #[test]
    fn test_dropdown_size() {
        let mut button = Button::new(command(Some("ok")), ButtonKind::Dropdown);
        button.refresh(&SizedLoader);
        assert_eq!(button.size(), DROPDOWN_BUTTON_SIZE);
        assert!(button.style().frameless);
    }

    #[test]
    fn test_oversize_icon_hides_command() {
        let command = command(Some("big"));
        let mut button = Button::new(command.clone(), ButtonKind::Regular);
        button.refresh(&SizedLoader);
        assert_eq!(command.icon_path(), None);
        assert!(!command.effectively_visible());
        assert_eq!(button.size(), Size::ZERO);
    }

    #[test]
    fn test_missing_icon_hides_command() {
        let command = command(Some("missing"));
        let mut button = Button::new(command.clone(), ButtonKind::Regular);
        button.refresh(&SizedLoader);
        assert!(!command.effectively_visible());
    }

    #[test]
    fn test_cache_follows_command_version() {
        let command = command(Some("ok"));
        let mut button = Button::new(command.clone(), ButtonKind::Regular);
        button.refresh(&SizedLoader);
        command.set_tooltip(Some("changed"));
        assert!(button.is_stale());
        button.refresh(&SizedLoader);
        assert!(!button.is_stale());
    }

    #[test]
    fn test_folder_kind() {
        let button = Button::new(command(None), ButtonKind::Folder("folder_1".into()));
        assert!(button.is_folder());
        assert_eq!(button.folder_id(), Some("folder_1"));
    }
}
