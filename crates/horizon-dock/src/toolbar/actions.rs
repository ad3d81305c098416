//! Menu actions and the host requests they produce.

use horizon_dock_core::logging::targets;
use horizon_dock_render::{Painter, Point, Size, Skin};

use super::auto_hide::AutoHide;
use super::layout::BUTTON_SPACING;
use super::menu::{DropdownState, MenuAction, dropdown_menu};
use super::reorder::Reorder;
use super::{Outgoing, Toolbar};
use crate::request::{ButtonCandidate, DockRequest};

impl Toolbar {
    /// Open the dropdown menu below the dropdown button, or close any open
    /// menu.
    pub(super) fn toggle_dropdown_menu(&mut self, painter: &dyn Painter, screen: Size) {
        if self.menu.take().is_some() {
            return;
        }
        let Some(dropdown) = self.layout().dropdown else {
            return;
        };
        let state = DropdownState {
            rect_locked: self.rect_locked,
            order_locked: self.order_locked,
            auto_hide: self.auto_hide,
            at_screen_edge: self.at_screen_edge(screen),
            show_border: self.show_border,
            skin: self.skin,
            selector_open: self.selector_open,
            toolbar_count: self.toolbar_count,
        };
        let mut menu = dropdown_menu(
            Point::new(dropdown.left(), self.rect.bottom() + BUTTON_SPACING),
            state,
        );
        menu.layout(painter, Some(screen));
        self.menu = Some(menu);
    }

    /// Carry out an entry chosen in the dropdown or a folder menu.
    pub(crate) fn apply_menu_action(&mut self, action: MenuAction) {
        tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, ?action, "menu action");
        match action {
            MenuAction::ConfigureVisibleButtons => self.toggle_visible_buttons_selector(),
            MenuAction::ToggleRectLock => self.set_rect_locked(!self.rect_locked),
            MenuAction::ToggleOrderLock => self.set_order_locked(!self.order_locked),
            MenuAction::ToggleAutoHide => {
                if self.auto_hide {
                    self.disable_auto_hide();
                } else {
                    self.auto_hide = true;
                }
                self.fire_change();
            }
            MenuAction::ToggleBorder => {
                self.show_border = !self.show_border;
                for folder in self.folders.values_mut() {
                    folder.toolbar.show_border = self.show_border;
                }
                self.fire_change();
            }
            MenuAction::ToggleSkin => {
                self.skin = match self.skin {
                    Skin::Default => Skin::Host,
                    Skin::Host => Skin::Default,
                };
                for folder in self.folders.values_mut() {
                    folder.toolbar.skin = self.skin;
                }
                self.fire_change();
            }
            MenuAction::CreateFolder => self.request(DockRequest::CreateFolder {
                toolbar: self.id.clone(),
            }),
            MenuAction::CreateToolbar => self.push(Outgoing::CreateToolbar),
            MenuAction::DeleteToolbar => self.request(DockRequest::ConfirmDeleteToolbar {
                toolbar: self.id.clone(),
            }),
            MenuAction::About => {
                self.request(DockRequest::OpenUrl(self.context.config().project_url.clone()));
            }
            MenuAction::EditFolder(folder_id) => {
                if let Some(folder) = self.folders.get(&folder_id) {
                    self.request(DockRequest::EditFolder {
                        toolbar: self.id.clone(),
                        folder: folder_id.clone(),
                        tooltip: folder.settings.tooltip.clone(),
                        icon: folder.settings.icon.clone(),
                    });
                }
            }
            MenuAction::DeleteFolder(folder_id) => {
                if self.folders.contains_key(&folder_id) {
                    self.request(DockRequest::ConfirmDeleteFolder {
                        toolbar: self.id.clone(),
                        folder: folder_id,
                    });
                }
            }
        }
    }

    fn set_rect_locked(&mut self, locked: bool) {
        tracing::info!(target: targets::TOOLBAR, toolbar = %self.id, locked, "position and size lock");
        self.rect_locked = locked;
        if let Some(handles) = &mut self.handles {
            handles.drag.set_enabled(!locked);
            handles.resize.set_enabled(!locked);
        }
        if locked {
            self.fire_change();
        } else {
            self.disable_auto_hide();
            self.hide_folders();
            self.close_selector();
        }
    }

    fn set_order_locked(&mut self, locked: bool) {
        tracing::info!(target: targets::TOOLBAR, toolbar = %self.id, locked, "button order lock");
        self.order_locked = locked;
        self.hook_reorder(!locked);
        if locked {
            self.fire_change();
        } else {
            self.disable_auto_hide();
            self.hide_folders();
            self.close_selector();
        }
        for folder in self.folders.values_mut() {
            folder.toolbar.set_enabled(locked);
        }
    }

    /// Turn auto-hide off and bring the toolbar back on screen.
    fn disable_auto_hide(&mut self) {
        self.auto_hide = false;
        self.display = AutoHide::new(self.context.config().slide_duration_ms());
    }

    fn close_selector(&mut self) {
        if self.selector_open {
            self.selector_open = false;
            self.request(DockRequest::CloseVisibleButtons {
                toolbar: self.id.clone(),
            });
        }
    }

    /// Ask the host to show the visible buttons selector, or to close it.
    pub(super) fn toggle_visible_buttons_selector(&mut self) {
        if self.selector_open {
            self.close_selector();
            return;
        }
        let candidates = self
            .context
            .registry()
            .commands()
            .iter()
            .filter(|c| !c.is_internal())
            .map(|c| ButtonCandidate {
                full_id: c.full_id().to_string(),
                tooltip: c.tooltip(),
                icon_path: c.icon_path(),
            })
            .collect();
        self.selector_open = true;
        self.request(DockRequest::ConfigureVisibleButtons {
            toolbar: self.id.clone(),
            candidates,
            selected: self.allow_set.clone(),
        });
    }

    /// Create or drop the per-button drag handles.
    pub(super) fn hook_reorder(&mut self, enabled: bool) {
        self.reorder = if enabled {
            Some(Reorder::new(&self.button_slots()))
        } else {
            None
        };
    }
}
