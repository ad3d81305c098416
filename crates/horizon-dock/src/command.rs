//! Commands: the plugin-facing identity of a toolbar button.
//!
//! A [`Command`] is what a plugin gets back from
//! [`CommandRegistry::add`](crate::CommandRegistry::add). It carries the
//! button's identity (`namespace.id`), its presentation (text, icon, tooltip,
//! colors) and its observers. Toolbars never own commands; they build
//! per-toolbar [`Button`](crate::Button) views that hold an `Arc<Command>`
//! and re-read it whenever [`Command::version`] moves.
//!
//! # Example
//!
//! ```ignore
//! let command = manager.add("myMod", "launch")?;
//! command.set_icon_path(Some("MyMod/icons/launch"))?;
//! command.set_tooltip(Some("Launch the thing"));
//! command.clicked().connect(|event| println!("clicked {}", event.full_id));
//! ```

use std::cmp::Ordering;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering as AtomicOrdering};

use horizon_dock_core::{Signal, invoke_guarded, logging::targets};
use horizon_dock_render::{Color, MouseButton};
use parking_lot::{Mutex, RwLock};

use crate::drawable::Drawable;
use crate::error::{RegistrationError, RegistrationResult};

/// Namespace reserved for the engine's own commands.
pub const NAMESPACE_INTERNAL: &str = "__TOOLBAR_INTERNAL";

const INVALID_ID_CHARS: [char; 6] = ['.', '/', '\\', ':', ',', ';'];

/// Check a namespace or id for characters that would break full ids or the
/// comma-separated settings lists. Whitespace is rejected too.
pub fn validate_id(value: &str, label: &'static str) -> RegistrationResult<()> {
    if value.is_empty() || value.contains(INVALID_ID_CHARS) || value.contains(char::is_whitespace) {
        return Err(RegistrationError::InvalidId {
            label,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Case-insensitive full id ordering used for buttons without a saved
/// position.
pub fn compare_full_ids(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// ============================================================================
// Visibility predicates
// ============================================================================

/// A plugin-supplied predicate deciding whether a command is shown.
///
/// Evaluated on every poll. A panicking predicate counts as "not visible".
pub trait Visibility: Send + Sync {
    /// Whether the command should currently be shown.
    fn is_visible(&self) -> bool;
}

impl<F> Visibility for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_visible(&self) -> bool {
        self()
    }
}

/// Argument of the [`Command::clicked`] signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    /// Full id of the clicked command.
    pub full_id: Arc<str>,
    /// Which mouse button clicked it.
    pub mouse_button: MouseButton,
}

// ============================================================================
// Command
// ============================================================================

struct CommandState {
    text: Option<String>,
    icon_path: Option<String>,
    tooltip: Option<String>,
    text_color: Color,
    enabled: bool,
    important: bool,
    visible: bool,
    visibility: Option<Arc<dyn Visibility>>,
    drawable: Option<Arc<Mutex<dyn Drawable>>>,
}

impl Default for CommandState {
    fn default() -> Self {
        Self {
            text: None,
            icon_path: None,
            tooltip: None,
            text_color: Color::WHITE,
            enabled: true,
            important: false,
            visible: true,
            visibility: None,
            drawable: None,
        }
    }
}

/// A registered toolbar command.
pub struct Command {
    namespace: String,
    id: String,
    full_id: Arc<str>,
    internal: bool,
    state: RwLock<CommandState>,
    version: AtomicU64,
    destroyed: AtomicBool,
    clicked: Signal<ClickEvent>,
    mouse_entered: Signal<Arc<str>>,
    mouse_left: Signal<Arc<str>>,
    changed: Signal<()>,
    destroyed_signal: Signal<Arc<str>>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("full_id", &self.full_id)
            .field("version", &self.version())
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

impl Command {
    /// Create a command after validating its namespace and id.
    pub(crate) fn new(namespace: &str, id: &str) -> RegistrationResult<Self> {
        validate_id(namespace, "namespace")?;
        validate_id(id, "id")?;
        Ok(Self::new_unchecked(namespace, id))
    }

    /// Create an engine-owned command with a known-good id.
    pub(crate) fn internal(id: &str) -> Arc<Self> {
        Arc::new(Self::new_unchecked(NAMESPACE_INTERNAL, id))
    }

    fn new_unchecked(namespace: &str, id: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            id: id.to_string(),
            full_id: Arc::from(format!("{namespace}.{id}")),
            internal: namespace == NAMESPACE_INTERNAL,
            state: RwLock::new(CommandState::default()),
            version: AtomicU64::new(1),
            destroyed: AtomicBool::new(false),
            clicked: Signal::new(),
            mouse_entered: Signal::new(),
            mouse_left: Signal::new(),
            changed: Signal::new(),
            destroyed_signal: Signal::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    /// The namespace, usually the plugin's name.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The id within the namespace.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// `namespace.id`.
    pub fn full_id(&self) -> &str {
        &self.full_id
    }

    /// Whether this command belongs to the engine itself.
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Monotonic counter bumped on every effective change.
    pub fn version(&self) -> u64 {
        self.version.load(AtomicOrdering::Acquire)
    }

    // ------------------------------------------------------------------------
    // Signals
    // ------------------------------------------------------------------------

    /// Emitted when a toolbar button for this command is clicked.
    pub fn clicked(&self) -> &Signal<ClickEvent> {
        &self.clicked
    }

    /// Emitted when the pointer starts hovering a button for this command.
    pub fn mouse_entered(&self) -> &Signal<Arc<str>> {
        &self.mouse_entered
    }

    /// Emitted when the pointer stops hovering a button for this command.
    pub fn mouse_left(&self) -> &Signal<Arc<str>> {
        &self.mouse_left
    }

    /// Emitted after any effective change of the command's state.
    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }

    /// Emitted exactly once, when the command is destroyed.
    pub fn destroyed(&self) -> &Signal<Arc<str>> {
        &self.destroyed_signal
    }

    // ------------------------------------------------------------------------
    // Presentation
    // ------------------------------------------------------------------------

    /// Button text, if any.
    pub fn text(&self) -> Option<String> {
        self.state.read().text.clone()
    }

    /// Set the button text. Empty text clears it.
    pub fn set_text(&self, text: Option<&str>) {
        let text = text.filter(|t| !t.is_empty()).map(str::to_string);
        self.mutate(|s| replace(&mut s.text, text));
    }

    /// Icon path, if any.
    pub fn icon_path(&self) -> Option<String> {
        self.state.read().icon_path.clone()
    }

    /// Set the icon path.
    ///
    /// Paths use forward slashes; a backslash is rejected.
    pub fn set_icon_path(&self, path: Option<&str>) -> RegistrationResult<()> {
        if self.is_destroyed() {
            return Ok(());
        }
        if let Some(p) = path
            && p.contains('\\')
        {
            return Err(RegistrationError::InvalidIconPath {
                path: p.to_string(),
            });
        }
        let path = path.map(str::to_string);
        self.mutate(|s| replace(&mut s.icon_path, path));
        Ok(())
    }

    /// Drop the icon after it failed to load. The command becomes hidden.
    pub(crate) fn clear_icon(&self) {
        self.mutate(|s| replace(&mut s.icon_path, None));
    }

    /// Tooltip text, if any.
    pub fn tooltip(&self) -> Option<String> {
        self.state.read().tooltip.clone()
    }

    /// Set the tooltip. An empty tooltip clears it.
    pub fn set_tooltip(&self, tooltip: Option<&str>) {
        let tooltip = tooltip.filter(|t| !t.is_empty()).map(str::to_string);
        self.mutate(|s| replace(&mut s.tooltip, tooltip));
    }

    /// Text color.
    pub fn text_color(&self) -> Color {
        self.state.read().text_color
    }

    /// Set the text color.
    pub fn set_text_color(&self, color: Color) {
        self.mutate(|s| replace(&mut s.text_color, color));
    }

    /// Whether the button accepts clicks.
    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    /// Enable or disable the button.
    pub fn set_enabled(&self, enabled: bool) {
        self.mutate(|s| replace(&mut s.enabled, enabled));
    }

    /// Important buttons stay opaque and keep an auto-hidden toolbar shown.
    pub fn is_important(&self) -> bool {
        self.state.read().important
    }

    /// Mark the button as important.
    pub fn set_important(&self, important: bool) {
        self.mutate(|s| replace(&mut s.important, important));
    }

    /// The plugin's manual visibility flag.
    pub fn is_visible(&self) -> bool {
        self.state.read().visible
    }

    /// Set the manual visibility flag.
    pub fn set_visible(&self, visible: bool) {
        self.mutate(|s| replace(&mut s.visible, visible));
    }

    /// Install or clear the visibility predicate.
    pub fn set_visibility(&self, visibility: Option<Arc<dyn Visibility>>) {
        self.mutate(|s| {
            let changed = match (&s.visibility, &visibility) {
                (None, None) => false,
                (Some(old), Some(new)) => !Arc::ptr_eq(old, new),
                _ => true,
            };
            s.visibility = visibility;
            changed
        });
    }

    /// Attach a drawable shown beside the button while it is visible.
    pub fn set_drawable<D: Drawable + 'static>(&self, drawable: D) {
        let drawable: Arc<Mutex<dyn Drawable>> = Arc::new(Mutex::new(drawable));
        self.mutate(|s| {
            s.drawable = Some(drawable);
            true
        });
    }

    /// Remove the attached drawable.
    pub fn clear_drawable(&self) {
        self.mutate(|s| s.drawable.take().is_some());
    }

    pub(crate) fn drawable(&self) -> Option<Arc<Mutex<dyn Drawable>>> {
        self.state.read().drawable.clone()
    }

    /// Whether the command should be shown at all.
    ///
    /// True when not destroyed, visible, with an icon, and the predicate (if
    /// any) agrees. Evaluated fresh on every call.
    pub fn effectively_visible(&self) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let predicate = {
            let state = self.state.read();
            if !state.visible || state.icon_path.is_none() {
                return false;
            }
            state.visibility.clone()
        };
        match predicate {
            None => true,
            Some(predicate) => {
                invoke_guarded(&self.full_id, "visibility predicate", || predicate.is_visible())
                    .unwrap_or(false)
            }
        }
    }

    // ------------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------------

    /// Deliver a click to observers.
    pub fn click(&self, mouse_button: MouseButton) {
        if self.is_destroyed() {
            return;
        }
        tracing::debug!(target: targets::COMMAND, command = %self.full_id, ?mouse_button, "click");
        let event = ClickEvent {
            full_id: self.full_id.clone(),
            mouse_button,
        };
        invoke_guarded(&self.full_id, "click handler", || self.clicked.emit(event));
    }

    pub(crate) fn mouse_enter(&self) {
        if !self.is_destroyed() {
            let id = self.full_id.clone();
            invoke_guarded(&self.full_id, "mouse enter handler", || self.mouse_entered.emit(id));
        }
    }

    pub(crate) fn mouse_leave(&self) {
        if !self.is_destroyed() {
            let id = self.full_id.clone();
            invoke_guarded(&self.full_id, "mouse leave handler", || self.mouse_left.emit(id));
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------------

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(AtomicOrdering::Acquire)
    }

    /// Destroy the command. Later mutations are ignored and every toolbar
    /// drops its button on its next frame.
    pub fn destroy(&self) {
        if self.destroyed.swap(true, AtomicOrdering::AcqRel) {
            return;
        }
        self.version.fetch_add(1, AtomicOrdering::AcqRel);
        tracing::debug!(target: targets::COMMAND, command = %self.full_id, "destroyed");
        let id = self.full_id.clone();
        invoke_guarded(&self.full_id, "destroy handler", || self.destroyed_signal.emit(id));
    }

    fn mutate(&self, f: impl FnOnce(&mut CommandState) -> bool) {
        if self.is_destroyed() {
            return;
        }
        let changed = {
            let mut state = self.state.write();
            f(&mut state)
        };
        if changed {
            self.version.fetch_add(1, AtomicOrdering::AcqRel);
            tracing::trace!(target: targets::COMMAND, command = %self.full_id, "changed");
            invoke_guarded(&self.full_id, "change handler", || self.changed.emit(()));
        }
    }
}

static_assertions::assert_impl_all!(Command: Send, Sync);

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
