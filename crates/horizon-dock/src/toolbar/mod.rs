//! Toolbars: the panels that lay out, draw and arrange buttons.
//!
//! A [`Toolbar`] in [`ToolbarMode::Toolbar`] is a top-level panel. It has a
//! dropdown menu button, drag and resize handles, optional auto-hide at a
//! screen edge, and folders. A folder is another `Toolbar` in
//! [`ToolbarMode::Folder`], owned by its parent and placed beside it while
//! open.
//!
//! Toolbars are driven by the [`ToolbarManager`](crate::ToolbarManager),
//! which calls [`Toolbar::update`] and [`Toolbar::draw`] once per frame.
//!
//! # Button Sets
//!
//! A toolbar does not own commands. It rebuilds its [`Button`] list from the
//! registry when a command is added or when the user changes the set of
//! visible buttons, and drops buttons whose command was destroyed at the
//! start of every frame. Layout only runs again when the set of shown
//! buttons actually changes.

mod actions;
pub mod auto_hide;
mod draw;
mod folders;
pub mod layout;
pub mod menu;
pub mod reorder;

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use horizon_dock_core::{ConnectionGuard, PerfSpan, invoke_guarded, logging::span_names, logging::targets};
use horizon_dock_render::{FrameInput, Point, Rect, Size, Skin};
use parking_lot::Mutex;

use crate::button::{Button, ButtonKind, icons};
use crate::command::{Command, compare_full_ids};
use crate::context::DockContext;
use crate::cursor::CursorArbiter;
use crate::interaction::{InteractionEvent, InteractionKind, PointerInteraction};
use crate::popup_menu::PopupMenu;
use crate::request::DockRequest;
use crate::settings::ToolbarSettings;
use crate::visible_buttons::VisibleButtons;

pub use auto_hide::{DisplayMode, Edge};
pub use menu::MenuAction;

use self::auto_hide::AutoHide;
use self::draw::DrawableSlot;
use self::folders::Folder;
use self::layout::{DEFAULT_HEIGHT_FOLDER, DEFAULT_WIDTH, DEFAULT_X, DEFAULT_Y, PADDING};
use self::reorder::{ButtonSlot, DropOutcome, DropPosition, Reorder, splice};

/// Something a toolbar wants from its manager.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outgoing {
    /// Forward to the host.
    Request(DockRequest),
    /// Add another toolbar to the current scene.
    CreateToolbar,
}

/// Queue shared by a manager and its toolbars.
pub(crate) type Outbox = Arc<Mutex<Vec<Outgoing>>>;

/// Whether a toolbar is a top-level panel or a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarMode {
    Toolbar,
    Folder,
}

#[derive(Debug)]
struct RectHandles {
    drag: PointerInteraction,
    resize: PointerInteraction,
}

impl RectHandles {
    fn new(rect: Rect, enabled: bool) -> Self {
        let overscan = Some(Size::new(PADDING, PADDING));
        let mut drag = PointerInteraction::new(InteractionKind::Drag, rect, overscan);
        let mut resize = PointerInteraction::new(InteractionKind::Resize, rect, overscan);
        drag.set_enabled(enabled);
        resize.set_enabled(enabled);
        Self { drag, resize }
    }
}

/// Where the shown buttons go this frame.
#[derive(Debug, Clone, Default)]
struct Layout {
    /// Index into the button list and on-screen rectangle of each shown
    /// button, in flow order.
    buttons: Vec<(usize, Rect)>,
    dropdown: Option<Rect>,
    min_width: f32,
    min_height: f32,
}

/// A toolbar or folder panel.
pub struct Toolbar {
    id: String,
    mode: ToolbarMode,
    context: Arc<DockContext>,
    outbox: Outbox,

    rect: Rect,
    auto_width: bool,
    auto_height: bool,
    saved_max_width: f32,

    buttons: Vec<Button>,
    dropdown: Option<Button>,
    configure: Option<Arc<Command>>,
    visible_ids: VisibleButtons,
    allow_set: BTreeSet<String>,
    saved_order: Vec<String>,
    folders: BTreeMap<String, Folder>,

    rect_locked: bool,
    order_locked: bool,
    auto_hide: bool,
    display: AutoHide,
    show_border: bool,
    skin: Skin,
    visible: bool,
    enabled: bool,

    handles: Option<RectHandles>,
    reorder: Option<Reorder>,
    menu: Option<PopupMenu<MenuAction>>,
    hovered: Option<Arc<Command>>,
    selector_open: bool,
    drawables: HashMap<String, DrawableSlot>,

    commands_added: Arc<AtomicBool>,
    _commands_added_guard: Option<ConnectionGuard<Arc<Command>>>,
    changed: bool,
    toolbar_count: usize,
}

impl std::fmt::Debug for Toolbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolbar")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("rect", &self.rect)
            .field("buttons", &self.button_ids())
            .field("folders", &self.folders.keys().collect::<Vec<_>>())
            .field("display", &self.display.mode())
            .finish_non_exhaustive()
    }
}

impl Toolbar {
    /// Create a top-level toolbar at the default position.
    pub(crate) fn new(id: &str, context: Arc<DockContext>, outbox: Outbox) -> Self {
        let mut toolbar = Self::with_mode(id, ToolbarMode::Toolbar, context, outbox);

        // The first sync builds the button set.
        let commands_added = Arc::new(AtomicBool::new(true));
        let flag = commands_added.clone();
        let guard = toolbar
            .context
            .registry()
            .on_command_added(move |_| flag.store(true, Ordering::Release));
        toolbar.commands_added = commands_added;
        toolbar._commands_added_guard = Some(guard);

        toolbar.dropdown = Some(Button::new(
            engine_command("dropdown", icons::DROPDOWN, None),
            ButtonKind::Dropdown,
        ));
        toolbar.configure = Some(engine_command(
            "configureVisibleButtons",
            icons::CONFIGURE_VISIBLE_BUTTONS,
            Some("Configure Visible Toolbar Buttons"),
        ));
        toolbar.handles = Some(RectHandles::new(toolbar.rect, false));
        toolbar
    }

    fn with_mode(id: &str, mode: ToolbarMode, context: Arc<DockContext>, outbox: Outbox) -> Self {
        let slide = context.config().slide_duration_ms();
        Self {
            id: id.to_string(),
            mode,
            context,
            outbox,
            rect: Rect::new(DEFAULT_X, DEFAULT_Y, DEFAULT_WIDTH, 0.0),
            auto_width: mode == ToolbarMode::Folder,
            auto_height: true,
            saved_max_width: DEFAULT_WIDTH,
            buttons: Vec::new(),
            dropdown: None,
            configure: None,
            visible_ids: VisibleButtons::new(),
            allow_set: BTreeSet::new(),
            saved_order: Vec::new(),
            folders: BTreeMap::new(),
            rect_locked: true,
            order_locked: true,
            auto_hide: false,
            display: AutoHide::new(slide),
            show_border: true,
            skin: Skin::Default,
            visible: true,
            enabled: true,
            handles: None,
            reorder: None,
            menu: None,
            hovered: None,
            selector_open: false,
            drawables: HashMap::new(),
            commands_added: Arc::new(AtomicBool::new(false)),
            _commands_added_guard: None,
            changed: false,
            toolbar_count: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// The toolbar id, unique within a scene. Folders use their folder id.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn mode(&self) -> ToolbarMode {
        self.mode
    }

    /// Current on-screen rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The explicit width, persisted instead of the live one.
    pub fn saved_max_width(&self) -> f32 {
        self.saved_max_width
    }

    /// Auto-hide animation state.
    pub fn display_mode(&self) -> DisplayMode {
        self.display.mode()
    }

    /// Whether a folder is open. Top-level toolbars are always visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_rect_locked(&self) -> bool {
        self.rect_locked
    }

    pub fn is_button_order_locked(&self) -> bool {
        self.order_locked
    }

    pub fn is_auto_hide(&self) -> bool {
        self.auto_hide
    }

    pub fn shows_border(&self) -> bool {
        self.show_border
    }

    pub fn skin(&self) -> Skin {
        self.skin
    }

    /// Whether the visible buttons selector was requested and not closed.
    pub fn is_selector_open(&self) -> bool {
        self.selector_open
    }

    /// The open dropdown or folder menu.
    pub fn menu(&self) -> Option<&PopupMenu<MenuAction>> {
        self.menu.as_ref()
    }

    /// Full ids of all buttons in order, shown or not. Folder contents and
    /// the dropdown button are not included.
    pub fn button_ids(&self) -> Vec<String> {
        self.buttons.iter().map(|b| b.full_id().to_string()).collect()
    }

    /// Full ids of the buttons the user currently sees, in order.
    pub fn visible_button_ids(&self) -> Vec<String> {
        self.buttons
            .iter()
            .filter(|b| self.is_user_visible(b))
            .map(|b| b.full_id().to_string())
            .collect()
    }

    /// The user's allow-set of non-internal full ids.
    pub fn allowed_buttons(&self) -> &BTreeSet<String> {
        &self.allow_set
    }

    /// Ids of this toolbar's folders.
    pub fn folder_ids(&self) -> Vec<String> {
        self.folders.keys().cloned().collect()
    }

    /// A folder's toolbar.
    pub fn folder(&self, folder_id: &str) -> Option<&Toolbar> {
        self.folders.get(folder_id).map(|folder| &folder.toolbar)
    }

    /// Saved members of a folder.
    pub fn folder_members(&self, folder_id: &str) -> Option<&BTreeSet<String>> {
        self.folders.get(folder_id).map(|folder| &folder.settings.buttons)
    }

    /// Whether the toolbar is drawn at all. A top-level toolbar needs at
    /// least one shown button besides the dropdown.
    pub fn is_shown(&self) -> bool {
        self.visible
            && match self.mode {
                ToolbarMode::Folder => true,
                ToolbarMode::Toolbar => self.buttons.iter().any(|b| self.is_user_visible(b)),
            }
    }

    pub(crate) fn set_toolbar_count(&mut self, count: usize) {
        self.toolbar_count = count;
    }

    /// Report and clear whether anything worth saving changed, here or in a
    /// folder.
    pub(crate) fn take_changed(&mut self) -> bool {
        let mut changed = std::mem::take(&mut self.changed);
        for folder in self.folders.values_mut() {
            changed |= folder.toolbar.take_changed();
        }
        changed
    }

    fn fire_change(&mut self) {
        tracing::trace!(target: targets::TOOLBAR, toolbar = %self.id, "changed");
        self.changed = true;
    }

    fn push(&self, outgoing: Outgoing) {
        self.outbox.lock().push(outgoing);
    }

    fn request(&self, request: DockRequest) {
        tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, ?request, "host request");
        self.push(Outgoing::Request(request));
    }

    // ------------------------------------------------------------------------
    // Button set
    // ------------------------------------------------------------------------

    /// Shown to the user: effectively visible, and either internal or in the
    /// allow-set.
    fn is_user_visible(&self, button: &Button) -> bool {
        let command = button.command();
        command.effectively_visible()
            && (command.is_internal() || self.allow_set.contains(command.full_id()))
    }

    /// Consume registry notifications, drop destroyed buttons and refresh
    /// button caches.
    fn sync(&mut self) {
        if self.commands_added.swap(false, Ordering::AcqRel) {
            self.update_visible_buttons();
        }

        self.buttons.retain(|b| !b.command().is_destroyed());
        if self.hovered.as_ref().is_some_and(|c| c.is_destroyed()) {
            self.hovered = None;
        }

        let loader = self.context.icon_loader();
        for button in self.buttons.iter_mut().chain(self.dropdown.iter_mut()) {
            button.refresh(loader);
        }

        self.update_configure_visibility();
    }

    /// The configure button shows only while plugin buttons exist but none
    /// of them is on the toolbar.
    fn update_configure_visibility(&self) {
        let Some(configure) = &self.configure else {
            return;
        };
        let contents_exist = self
            .context
            .registry()
            .commands()
            .iter()
            .any(|c| !c.is_internal() && c.effectively_visible());
        let contents_visible = self
            .buttons
            .iter()
            .any(|b| !b.command().is_internal() || b.is_folder());
        configure.set_visible(contents_exist && !contents_visible);
    }

    /// Rebuild the button set from the registry and the allow-set.
    pub(crate) fn update_visible_buttons(&mut self) {
        tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, "updating visible buttons");

        self.buttons.retain(Button::is_folder);
        for folder in self.folders.values_mut() {
            folder.toolbar.buttons.clear();
            folder.toolbar.hovered = None;
        }
        self.hovered = None;

        let registry = self.context.registry();
        let mut ids = self.allow_set.clone();
        ids.extend(
            registry
                .commands()
                .iter()
                .filter(|c| c.is_internal())
                .map(|c| c.full_id().to_string()),
        );
        let commands: Vec<_> = ids.iter().filter_map(|id| registry.get(id)).collect();

        for command in commands {
            self.add(Button::new(command, ButtonKind::Regular));
        }
        if let Some(configure) = self.configure.clone() {
            self.add(Button::new(configure, ButtonKind::ConfigureVisibleButtons));
        }
        self.update_configure_visibility();
    }

    /// Add a button, replacing any button with the same full id. A button
    /// saved as a folder member goes into that folder.
    fn add(&mut self, button: Button) {
        let full_id = button.full_id().to_string();
        self.buttons.retain(|b| b.full_id() != full_id);
        for folder in self.folders.values_mut() {
            folder.toolbar.buttons.retain(|b| b.full_id() != full_id);
        }

        let target = self
            .folders
            .values_mut()
            .find(|folder| folder.settings.buttons.contains(&full_id));
        match target {
            Some(folder) => folder.toolbar.add(button),
            None => {
                self.buttons.push(button);
                self.sort_buttons();
            }
        }
    }

    /// Saved order first, then case-insensitive full id order.
    fn sort_buttons(&mut self) {
        let order = &self.saved_order;
        let position = |id: &str| order.iter().position(|saved| saved == id);
        self.buttons
            .sort_by(|a, b| match (position(a.full_id()), position(b.full_id())) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => compare_full_ids(a.full_id(), b.full_id()),
            });
    }

    fn position_of(&self, full_id: &str) -> Option<usize> {
        self.buttons.iter().position(|b| b.full_id() == full_id)
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    fn layout(&self) -> Layout {
        let shown: Vec<usize> = (0..self.buttons.len())
            .filter(|&index| self.is_user_visible(&self.buttons[index]))
            .collect();
        let sizes: Vec<Size> = shown.iter().map(|&index| self.buttons[index].size()).collect();
        let dropdown_size = self
            .dropdown
            .as_ref()
            .filter(|d| d.command().effectively_visible())
            .map(Button::size);

        let flow = layout::flow(&sizes, dropdown_size, self.rect.width());
        let origin = self.rect.origin;
        let place = |p: Point, s: Size| Rect::new(origin.x + p.x, origin.y + p.y, s.width, s.height);

        let buttons = shown
            .iter()
            .zip(flow.positions.iter().zip(&sizes))
            .map(|(&index, (&p, &s))| (index, place(p, s)))
            .collect();
        let dropdown = flow.dropdown.zip(dropdown_size).map(|(p, s)| place(p, s));

        let (min_width, min_height) = match self.mode {
            ToolbarMode::Folder if shown.is_empty() => (DEFAULT_WIDTH, DEFAULT_HEIGHT_FOLDER),
            ToolbarMode::Folder => (
                layout::folder_grid_width(shown.len(), sizes.first().map_or(0.0, |s| s.width)),
                flow.min_height(&sizes, None),
            ),
            ToolbarMode::Toolbar => (
                flow.min_width(&sizes, dropdown_size),
                flow.min_height(&sizes, dropdown_size),
            ),
        };

        Layout {
            buttons,
            dropdown,
            min_width,
            min_height,
        }
    }

    fn button_slots(&self) -> Vec<ButtonSlot> {
        self.layout()
            .buttons
            .into_iter()
            .map(|(index, rect)| {
                let button = &self.buttons[index];
                ButtonSlot {
                    full_id: button.full_id().to_string(),
                    rect,
                    is_folder: button.is_folder(),
                    is_dropdown: false,
                }
            })
            .collect()
    }

    fn max_button_size(&self) -> Option<Size> {
        self.buttons
            .iter()
            .filter(|b| self.is_user_visible(b))
            .map(Button::size)
            .reduce(|a, b| Size::new(a.width.max(b.width), a.height.max(b.height)))
    }

    /// A resize never goes below one button plus padding.
    fn min_resize_size(&self) -> Size {
        let max = self.max_button_size().unwrap_or(Size::ZERO);
        Size::new(max.width + PADDING * 2.0, max.height + PADDING * 2.0)
    }

    fn is_single_row(&self) -> bool {
        self.max_button_size()
            .is_none_or(|max| self.rect.height() <= max.height + PADDING * 2.0)
    }

    fn is_single_column(&self) -> bool {
        self.max_button_size()
            .is_none_or(|max| self.rect.width() <= max.width + PADDING * 2.0)
    }

    fn at_screen_edge(&self, screen: Size) -> bool {
        Edge::docked(self.rect, screen).is_some()
    }

    /// Resolve an auto width or height and keep the toolbar on screen.
    fn auto_size(&mut self, screen: Size) {
        if self.auto_width {
            self.rect.size.width = DEFAULT_WIDTH;
            self.rect.size.width = self.layout().min_width;
            self.saved_max_width = self.rect.width();
            self.auto_width = false;
        }
        if self.auto_height {
            self.rect.size.height = self.layout().min_height;
            self.auto_height = false;
        }
        if self.display.mode() == DisplayMode::Visible {
            self.rect = self.rect.clamp_to_screen(screen, Size::new(PADDING, PADDING));
        }
    }

    fn force_auto_size_if_changed(&mut self, screen: Size) {
        if self.display.mode().is_sliding() {
            return;
        }
        let shown: Vec<String> = self.visible_button_ids();
        if self.visible_ids.update(shown.iter().map(|id| (id.as_str(), true))) {
            self.force_auto_size(screen);
        }
    }

    /// Re-fit the toolbar to its shown buttons, keeping it docked where it
    /// was docked.
    fn force_auto_size(&mut self, screen: Size) {
        let _span = PerfSpan::new(span_names::LAYOUT);

        if self.is_single_row() {
            if self.rect.left() >= screen.width - self.rect.width() {
                self.rect.origin.x = screen.width;
            }
        } else if self.rect.top() >= screen.height - self.rect.height() {
            self.rect.origin.y = screen.height;
        }

        self.rect.size.width = self.saved_max_width;
        self.rect.size.width = self.layout().min_width;
        self.rect.size.height = self.layout().min_height;

        self.rect = match self.display.mode() {
            DisplayMode::Visible => self.rect.clamp_to_screen(screen, Size::new(PADDING, PADDING)),
            DisplayMode::Hidden => self.rect.clamp_to_screen(
                screen,
                Size::new(self.rect.width() - PADDING, self.rect.height() - PADDING),
            ),
            DisplayMode::SlidingIn | DisplayMode::SlidingOut => self.rect,
        };
        tracing::debug!(
            target: targets::TOOLBAR,
            toolbar = %self.id,
            x = self.rect.left(),
            y = self.rect.top(),
            width = self.rect.width(),
            height = self.rect.height(),
            "forced auto-size"
        );

        if self.reorder.as_ref().is_some_and(|r| !r.is_dragging()) {
            self.hook_reorder(true);
        }
        self.fire_change();
    }

    // ------------------------------------------------------------------------
    // Frame update
    // ------------------------------------------------------------------------

    /// Advance one frame: layout, auto-hide, folders, interactions and menu
    /// auto-close.
    pub fn update(&mut self, input: &FrameInput) {
        self.sync();

        if self.is_shown() {
            self.force_auto_size_if_changed(input.screen);
            self.auto_size(input.screen);
            self.update_auto_hide(input);
        }

        self.update_folders(input);

        if self.is_shown() && !input.suspended() {
            self.update_rect_handles(input);
            self.update_reorder(input);
        }

        self.update_menu(input);
        self.update_drawables();
    }

    fn keep_shown(&self, pointer: Point) -> bool {
        self.rect.contains(pointer)
            || self
                .buttons
                .iter()
                .any(|b| b.command().is_important() && self.is_user_visible(b))
            || self.folders.values().any(|folder| folder.toolbar.visible)
            || self.selector_open
    }

    /// Whether the toolbar is about to slide out: everything that keeps it
    /// shown is gone except that the pointer only just left.
    fn should_slide_out(&self, pointer: Point, screen: Size) -> bool {
        self.auto_hide
            && self.display.mode() != DisplayMode::Hidden
            && !self.rect.contains(pointer)
            && self.at_screen_edge(screen)
    }

    fn update_auto_hide(&mut self, input: &FrameInput) {
        if !self.auto_hide || self.menu.is_some() || !self.at_screen_edge(input.screen) {
            return;
        }
        let keep_shown = self.keep_shown(input.pointer.position);
        let now = i64::try_from(input.now_ms).unwrap_or(i64::MAX);
        if let Some(origin) = self.display.step(self.rect, input.screen, keep_shown, now) {
            self.rect.origin = origin;
        }
    }

    fn update_rect_handles(&mut self, input: &FrameInput) {
        let dropdown = self.layout().dropdown;
        let rect = self.rect;
        let min_size = self.min_resize_size();
        let Some(handles) = self.handles.as_mut() else {
            return;
        };

        handles.drag.set_rect(rect);
        handles.resize.set_rect(rect);
        handles.resize.set_min_size(min_size);
        let resize_handle = InteractionKind::Resize.handle_rect(rect);
        let off_dropdown = |p: Point| !dropdown.is_some_and(|r| r.contains(p));

        let drag_event = handles
            .drag
            .update(input, |p| off_dropdown(p) && !resize_handle.contains(p));
        let resize_event = handles.resize.update(input, off_dropdown);
        let drag_rect = handles.drag.rect();
        let resize_rect = handles.resize.rect();

        match drag_event {
            Some(InteractionEvent::Started) => {
                handles.resize.set_enabled(false);
            }
            Some(InteractionEvent::Released) => {
                handles.resize.set_enabled(!self.rect_locked);
            }
            _ => {}
        }
        match resize_event {
            Some(InteractionEvent::Started) => {
                handles.drag.set_enabled(false);
            }
            Some(InteractionEvent::Released) => {
                handles.drag.set_enabled(!self.rect_locked);
            }
            _ => {}
        }

        if drag_event.is_some() {
            self.rect = drag_rect;
            if drag_event == Some(InteractionEvent::Released) {
                tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, x = drag_rect.left(), y = drag_rect.top(), "toolbar moved");
                self.fire_change();
            }
        }

        match resize_event {
            Some(InteractionEvent::Moved) => {
                self.rect = resize_rect;
                self.rect.size.width = self.rect.width().max(min_size.width);
                self.rect.size.height = self.rect.height().max(self.layout().min_height);
                self.rect = self.rect.clamp_to_screen(input.screen, Size::new(PADDING, PADDING));
            }
            Some(InteractionEvent::Released) => {
                self.rect = resize_rect;
                self.rect.size.width = self.layout().min_width;
                self.rect.size.height = self.layout().min_height;
                self.saved_max_width = self.rect.width();
                tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, width = self.saved_max_width, "toolbar resized");
                self.fire_change();
            }
            _ => {}
        }
    }

    fn update_reorder(&mut self, input: &FrameInput) {
        if self.reorder.is_none() {
            return;
        }
        let slots = self.button_slots();
        let outcome = self.reorder.as_mut().and_then(|r| r.update(input, &slots));
        if let Some(outcome) = outcome {
            self.apply_drop(outcome);
            self.force_auto_size_if_changed(input.screen);
            self.hook_reorder(true);
        }
    }

    fn apply_drop(&mut self, outcome: DropOutcome) {
        let Some((hovered, position)) = outcome.target else {
            return;
        };
        let (Some(dragged_index), Some(hovered_index)) =
            (self.position_of(&outcome.dragged), self.position_of(&hovered))
        else {
            return;
        };

        match position {
            DropPosition::IntoFolder => {
                let Some(folder_id) = self.buttons[hovered_index].folder_id().map(str::to_string) else {
                    return;
                };
                let Some(folder) = self.folders.get_mut(&folder_id) else {
                    return;
                };
                let button = self.buttons.remove(dragged_index);
                folder.toolbar.add(button);
            }
            DropPosition::Before => splice(&mut self.buttons, dragged_index, hovered_index, false),
            DropPosition::After => splice(&mut self.buttons, dragged_index, hovered_index, true),
        }

        self.saved_order = self.button_ids();
        for folder in self.folders.values_mut() {
            folder.settings.buttons = folder.toolbar.button_ids().into_iter().collect();
        }
        tracing::info!(target: targets::TOOLBAR, toolbar = %self.id, button = %outcome.dragged, target = %hovered, ?position, "button order changed");
        self.fire_change();
    }

    fn update_menu(&mut self, input: &FrameInput) {
        let Some(menu) = &self.menu else {
            return;
        };
        let pointer = input.pointer.position;
        let on_dropdown = self.layout().dropdown.is_some_and(|r| r.contains(pointer));
        let pressed_outside = input.pointer.any_pressed() && !menu.contains(pointer) && !on_dropdown;
        if pressed_outside || input.paused {
            tracing::debug!(target: targets::TOOLBAR, toolbar = %self.id, paused = input.paused, "closing menu");
            self.menu = None;
        }
    }

    fn update_drawables(&mut self) {
        for button in &self.buttons {
            if !self.is_user_visible(button) {
                continue;
            }
            if let Some(drawable) = button.command().drawable() {
                invoke_guarded(button.full_id(), "drawable update", || drawable.lock().update());
            }
        }
    }

    /// Offer cursors in priority order: drag, resize, then reorder.
    pub(crate) fn offer_cursor(&self, arbiter: &mut CursorArbiter, pointer: Point) {
        if !self.is_shown() {
            return;
        }
        if let Some(handles) = &self.handles {
            let dropdown = self.layout().dropdown;
            let resize_handle = InteractionKind::Resize.handle_rect(self.rect);
            let off_dropdown = |p: Point| !dropdown.is_some_and(|r| r.contains(p));
            if handles
                .drag
                .offer_cursor(arbiter, pointer, |p| off_dropdown(p) && !resize_handle.contains(p))
                || handles.resize.offer_cursor(arbiter, pointer, off_dropdown)
            {
                return;
            }
        }
        if let Some(reorder) = &self.reorder {
            reorder.offer_cursor(arbiter, pointer, &self.button_slots());
        }
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    /// Restore persisted state. Folders are re-created closed.
    pub(crate) fn apply_settings(&mut self, settings: &ToolbarSettings) {
        self.rect = Rect::new(settings.x, settings.y, settings.width, settings.height);
        self.auto_width = false;
        self.auto_height = false;
        self.auto_hide = settings.auto_hide;
        self.show_border = settings.draw_border;
        self.skin = if settings.uses_skin() { Skin::Host } else { Skin::Default };
        self.saved_order = settings.button_order.clone();
        self.allow_set = settings.visible_buttons.clone();

        for folder in std::mem::take(&mut self.folders).into_values() {
            folder.command.destroy();
        }
        self.buttons.retain(|b| !b.is_folder());
        for (folder_id, folder_settings) in &settings.folders {
            self.create_folder(folder_id, folder_settings.clone(), false);
        }

        self.saved_max_width = settings.width;
        self.visible_ids.reset();
        self.update_visible_buttons();
        self.sort_buttons();
        tracing::info!(target: targets::TOOLBAR, toolbar = %self.id, folders = self.folders.len(), "toolbar settings applied");
    }

    /// Persistable state.
    pub fn settings(&self) -> ToolbarSettings {
        ToolbarSettings {
            x: self.rect.left(),
            y: self.rect.top(),
            width: self.saved_max_width,
            height: self.rect.height(),
            auto_hide: self.auto_hide,
            draw_border: self.show_border,
            use_skin: Some(self.skin == Skin::Host),
            legacy_use_skin: None,
            button_order: self.saved_order.clone(),
            visible_buttons: self.allow_set.clone(),
            folders: self
                .folders
                .iter()
                .map(|(id, folder)| (id.clone(), folder.settings.clone()))
                .collect(),
        }
    }

    // ------------------------------------------------------------------------
    // Host answers
    // ------------------------------------------------------------------------

    /// Replace the allow-set chosen in the visible buttons selector.
    pub(crate) fn set_visible_buttons(&mut self, ids: BTreeSet<String>) {
        tracing::info!(target: targets::TOOLBAR, toolbar = %self.id, count = ids.len(), "user changed button visibilities");
        self.allow_set = ids;
        for folder in self.folders.values_mut() {
            folder.toolbar.allow_set = self.allow_set.clone();
        }
        self.update_visible_buttons();
        self.fire_change();
    }

    /// The host closed the visible buttons selector.
    pub(crate) fn close_visible_buttons_selector(&mut self) {
        self.selector_open = false;
    }
}

/// Create an unregistered engine command.
fn engine_command(id: &str, icon: &str, tooltip: Option<&str>) -> Arc<Command> {
    let command = Command::internal(id);
    if let Err(err) = command.set_icon_path(Some(icon)) {
        tracing::warn!(target: targets::TOOLBAR, command = command.full_id(), error = %err, "invalid engine icon");
    }
    command.set_tooltip(tooltip);
    command
}
