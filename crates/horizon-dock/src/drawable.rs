//! Panels that plugins attach to their commands.
//!
//! While a command with a drawable is shown on a toolbar, the toolbar calls
//! [`Drawable::update`] and [`Drawable::draw`] once per frame and places the
//! drawable next to itself the same way it places folders.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use horizon_dock_core::{Signal, invoke_guarded};
use horizon_dock_render::{MouseButton, Painter, Point, Size};
use parking_lot::Mutex;

use crate::command::Command;
use crate::popup_menu::PopupMenu;

/// A plugin panel drawn beside the toolbar.
pub trait Drawable: Send {
    /// Refresh any state. Called once per frame before drawing.
    fn update(&mut self) {}

    /// Draw at `position` (top-left) and report the size drawn, which the
    /// toolbar uses to place the drawable on the next frame.
    fn draw(&mut self, position: Point, painter: &mut dyn Painter) -> Size;
}

// ============================================================================
// PopupMenuDrawable
// ============================================================================

static NEXT_MENU_ID: AtomicUsize = AtomicUsize::new(0);

enum MenuItem {
    Option(Arc<Command>),
    Separator,
}

struct MenuState {
    id: usize,
    items: Vec<MenuItem>,
    destroyed: bool,
}

/// A popup menu that can be attached to a command.
///
/// Cloning yields another handle to the same menu, so a plugin can keep one
/// handle while the command owns the other.
///
/// # Example
///
/// ```ignore
/// let menu = PopupMenuDrawable::new();
/// let option = menu.add_option("Do the thing");
/// option.clicked().connect(|_| println!("chosen"));
/// command.set_drawable(menu.clone());
/// ```
#[derive(Clone)]
pub struct PopupMenuDrawable {
    state: Arc<Mutex<MenuState>>,
    any_option_clicked: Arc<Signal<()>>,
}

impl std::fmt::Debug for PopupMenuDrawable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PopupMenuDrawable")
            .field("id", &state.id)
            .field("items", &state.items.len())
            .field("destroyed", &state.destroyed)
            .finish()
    }
}

impl Default for PopupMenuDrawable {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupMenuDrawable {
    /// Create an empty menu.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MenuState {
                id: NEXT_MENU_ID.fetch_add(1, Ordering::Relaxed),
                items: Vec::new(),
                destroyed: false,
            })),
            any_option_clicked: Arc::new(Signal::new()),
        }
    }

    /// Add an option. Connect to the returned command's `clicked` signal to
    /// learn when it is chosen.
    pub fn add_option(&self, text: &str) -> Arc<Command> {
        let mut state = self.state.lock();
        let option_id = format!("popupMenu{}_option{}", state.id, state.items.len());
        let command = Command::internal(&option_id);
        command.set_text(Some(text));
        if !state.destroyed {
            state.items.push(MenuItem::Option(command.clone()));
        }
        command
    }

    /// Add a separator line.
    pub fn add_separator(&self) {
        let mut state = self.state.lock();
        if !state.destroyed {
            state.items.push(MenuItem::Separator);
        }
    }

    /// Emitted after any option was chosen.
    pub fn any_option_clicked(&self) -> &Signal<()> {
        &self.any_option_clicked
    }

    /// Destroy the menu and all of its option commands.
    pub fn destroy(&self) {
        let items = {
            let mut state = self.state.lock();
            state.destroyed = true;
            std::mem::take(&mut state.items)
        };
        for item in items {
            if let MenuItem::Option(command) = item {
                command.destroy();
            }
        }
        self.any_option_clicked.disconnect_all();
    }
}

impl Drawable for PopupMenuDrawable {
    fn draw(&mut self, position: Point, painter: &mut dyn Painter) -> Size {
        let (size, chosen) = {
            let state = self.state.lock();
            let mut menu = PopupMenu::new(position);
            for (index, item) in state.items.iter().enumerate() {
                match item {
                    MenuItem::Option(command) => {
                        let text = command.text().unwrap_or_default();
                        menu.add_option(text, command.is_enabled(), index);
                    }
                    MenuItem::Separator => menu.add_separator(),
                }
            }
            let chosen: Option<(usize, MouseButton)> = menu.draw(painter, None);
            let chosen = chosen.and_then(|(index, button)| match state.items.get(index) {
                Some(MenuItem::Option(command)) => Some((command.clone(), button)),
                _ => None,
            });
            (menu.rect().size, chosen)
        };

        if let Some((command, button)) = chosen {
            command.click(button);
            invoke_guarded(command.full_id(), "menu option handler", || {
                self.any_option_clicked.emit(())
            });
        }
        size
    }
}

static_assertions::assert_impl_all!(PopupMenuDrawable: Send, Sync);
