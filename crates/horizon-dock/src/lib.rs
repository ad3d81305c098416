//! Horizon Dock - a dockable, auto-hiding toolbar engine for plugin hosts.
//!
//! Plugins register [`Command`]s. Toolbars show them as buttons, flow them
//! into rows, and let the user move, resize, reorder and fold them away.
//! The host supplies drawing, input and icons through the traits in
//! [`horizon_dock_render`], and shows dialogs when asked through
//! [`DockRequest`]s.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use horizon_dock::{DockConfig, ToolbarManager};
//! use horizon_dock::render::{FrameInput, IconLoader, Painter};
//!
//! fn run(loader: Arc<dyn IconLoader>, painter: &mut dyn Painter, frames: &[FrameInput]) {
//!     let mut manager = ToolbarManager::new(DockConfig::default(), loader);
//!     let button = manager.add("myPlugin", "launch").expect("valid id");
//!     button.set_icon_path(Some("MyPlugin/launch")).expect("valid path");
//!     button.set_tooltip(Some("Launch"));
//!     button.clicked().connect(|event| println!("{} clicked", event.full_id));
//!
//!     manager.load_scene("flight");
//!     for input in frames {
//!         manager.update(input);
//!         manager.draw(input, painter);
//!         for request in manager.take_requests() {
//!             println!("host should handle {request:?}");
//!         }
//!     }
//! }
//! ```

pub mod button;
pub mod command;
pub mod config;
pub mod context;
pub mod creation_counter;
pub mod cursor;
pub mod drawable;
pub mod drop_marker;
mod error;
pub mod interaction;
pub mod manager;
pub mod placement;
pub mod popup_menu;
pub mod registry;
pub mod request;
pub mod settings;
pub mod toolbar;
pub mod visible_buttons;

pub use button::{Button, ButtonKind};
pub use command::{ClickEvent, Command, NAMESPACE_INTERNAL, Visibility};
pub use config::DockConfig;
pub use context::{DEFAULT_SCENE, DockContext, SceneVisibility};
pub use cursor::CursorShape;
pub use drawable::{Drawable, PopupMenuDrawable};
pub use error::{RegistrationError, RegistrationResult, SettingsError, SettingsResult};
pub use manager::{DEFAULT_TOOLBAR_ID, ToolbarManager};
pub use registry::CommandRegistry;
pub use request::{ButtonCandidate, DockRequest};
pub use settings::{FolderSettings, SettingsDocument, ToolbarSettings};
pub use toolbar::{DisplayMode, MenuAction, Toolbar, ToolbarMode};

/// Host-facing drawing, input and icon types.
pub mod render {
    pub use horizon_dock_render::*;
}
