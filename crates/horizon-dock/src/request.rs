//! Requests the engine makes of the host.
//!
//! Dialogs and URL handling belong to the host. Toolbars queue a
//! [`DockRequest`] when the user asks for one; the host drains them with
//! [`ToolbarManager::take_requests`](crate::ToolbarManager::take_requests)
//! and answers through the matching manager method.

use std::collections::BTreeSet;

/// A command the user may pick in the visible buttons selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonCandidate {
    pub full_id: String,
    pub tooltip: Option<String>,
    pub icon_path: Option<String>,
}

/// Something the host should show or do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockRequest {
    /// Show the visible buttons selector. Answer with
    /// `set_visible_buttons`, then `close_visible_buttons_selector`.
    ConfigureVisibleButtons {
        toolbar: String,
        candidates: Vec<ButtonCandidate>,
        selected: BTreeSet<String>,
    },
    /// The toolbar closed its selector on its own, for example because the
    /// user unlocked it.
    CloseVisibleButtons { toolbar: String },
    /// Ask for a tooltip and icon, then call `create_folder`.
    CreateFolder { toolbar: String },
    /// Show the folder settings, then call `update_folder`.
    EditFolder {
        toolbar: String,
        folder: String,
        tooltip: Option<String>,
        icon: String,
    },
    /// Confirm, then call `delete_folder`.
    ConfirmDeleteFolder { toolbar: String, folder: String },
    /// Confirm, then call `delete_toolbar`.
    ConfirmDeleteToolbar { toolbar: String },
    /// Open a web page.
    OpenUrl(String),
}
