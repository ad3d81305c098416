//! The session object a host drives once per frame.
//!
//! A [`ToolbarManager`] owns the [`DockContext`], the toolbars of the
//! current scene and the settings document. The host:
//!
//! 1. registers commands with [`ToolbarManager::add`],
//! 2. calls [`ToolbarManager::load_scene`] when a scene starts,
//! 3. calls [`ToolbarManager::update`] and [`ToolbarManager::draw`] every
//!    frame,
//! 4. drains [`ToolbarManager::take_requests`] and answers them.
//!
//! Settings are saved at the end of any frame in which a toolbar changed.
//! Those saves are written by a background thread; dropping the manager
//! waits for them.

use std::collections::BTreeSet;
use std::sync::Arc;

use horizon_dock_core::{PerfSpan, logging::span_names, logging::targets};
use horizon_dock_render::{FrameInput, IconLoader, Painter};

use crate::button::icons;
use crate::command::Command;
use crate::config::DockConfig;
use crate::context::DockContext;
use crate::cursor::CursorShape;
use crate::error::{RegistrationResult, SettingsResult};
use crate::request::DockRequest;
use crate::settings::{SettingsDocument, SettingsFormat, SettingsWriter, ToolbarSettings, migrate_legacy};
use crate::toolbar::{Outbox, Outgoing, Toolbar};

/// Id of the toolbar every scene starts with.
pub const DEFAULT_TOOLBAR_ID: &str = "toolbar";

const CHECK_FOR_UPDATES_KEY: &str = "toolbars.checkForUpdates";

/// Owns every toolbar of the current scene.
pub struct ToolbarManager {
    context: Arc<DockContext>,
    settings: Option<SettingsDocument>,
    writer: SettingsWriter,
    toolbars: Vec<Toolbar>,
    outbox: Outbox,
    requests: Vec<DockRequest>,
    check_for_updates: bool,
}

impl std::fmt::Debug for ToolbarManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolbarManager")
            .field("scene", &self.context.current_scene())
            .field("toolbars", &self.toolbars)
            .field("pending_requests", &self.requests.len())
            .finish_non_exhaustive()
    }
}

impl ToolbarManager {
    /// Start a session. No toolbars exist until the first
    /// [`load_scene`](Self::load_scene).
    pub fn new(config: DockConfig, icon_loader: Arc<dyn IconLoader>) -> Self {
        tracing::info!(target: targets::MANAGER, path = %config.settings_path.display(), "starting session");
        Self {
            context: DockContext::new(config, icon_loader),
            settings: None,
            writer: SettingsWriter::new(),
            toolbars: Vec::new(),
            outbox: Outbox::default(),
            requests: Vec::new(),
            check_for_updates: true,
        }
    }

    /// The session context shared with toolbars.
    pub fn context(&self) -> &Arc<DockContext> {
        &self.context
    }

    /// Register a command. Shortcut for the context's registry.
    pub fn add(&self, namespace: &str, id: &str) -> RegistrationResult<Arc<Command>> {
        self.context.registry().add(namespace, id)
    }

    // ------------------------------------------------------------------------
    // Scenes and persistence
    // ------------------------------------------------------------------------

    /// Replace the toolbars with those saved for `scene`.
    ///
    /// The settings file is read on the first call. A file that cannot be
    /// read is logged and treated as empty.
    pub fn load_scene(&mut self, scene: &str) {
        tracing::info!(target: targets::MANAGER, scene, "loading scene");
        self.context.set_current_scene(scene);

        let path = self.context.config().settings_path.clone();
        let document = self.settings.get_or_insert_with(|| {
            SettingsDocument::load(&path).unwrap_or_else(|err| {
                tracing::error!(target: targets::SETTINGS, path = %path.display(), error = %err, "cannot read settings");
                SettingsDocument::new()
            })
        });

        if migrate_legacy(document, scene) {
            self.writer.flush();
            if let Err(err) = document.save(&path) {
                tracing::error!(target: targets::SETTINGS, error = %err, "cannot save migrated settings");
            }
        }
        self.check_for_updates = document.get_bool_or(CHECK_FOR_UPDATES_KEY, true);

        let group = format!("toolbars.{scene}");
        let mut ids = document.group_keys(&group);
        if ids.is_empty() {
            ids.push(DEFAULT_TOOLBAR_ID.to_string());
        }

        let saved: Vec<(String, Option<ToolbarSettings>)> = ids
            .into_iter()
            .map(|id| {
                let settings = match document.get_deserialized::<ToolbarSettings>(&format!("{group}.{id}")) {
                    Ok(settings) => settings,
                    Err(err) => {
                        tracing::warn!(target: targets::SETTINGS, toolbar = %id, error = %err, "ignoring unreadable toolbar settings");
                        None
                    }
                };
                (id, settings)
            })
            .collect();

        self.toolbars = saved
            .into_iter()
            .map(|(id, settings)| {
                let mut toolbar = Toolbar::new(&id, self.context.clone(), self.outbox.clone());
                if let Some(settings) = settings {
                    toolbar.apply_settings(&settings);
                }
                toolbar
            })
            .collect();
        tracing::info!(target: targets::MANAGER, scene, toolbars = self.toolbars.len(), "scene loaded");
    }

    /// Write every toolbar of the current scene to the settings file and
    /// wait for the write, including any background writes still queued.
    pub fn save(&self) -> SettingsResult<()> {
        let Some(document) = self.store_scene()? else {
            return Ok(());
        };
        self.writer.flush();
        document.save(&self.context.config().settings_path)
    }

    /// Whether a background save has not reached the disk yet.
    pub fn is_saving(&self) -> bool {
        self.writer.pending_writes() > 0
    }

    /// Copy the current scene's toolbars into the document.
    fn store_scene(&self) -> SettingsResult<Option<&SettingsDocument>> {
        let Some(document) = &self.settings else {
            return Ok(None);
        };
        let group = format!("toolbars.{}", self.context.current_scene());
        document.remove(&group);
        for toolbar in &self.toolbars {
            document.set_serialized(&format!("{group}.{}", toolbar.id()), &toolbar.settings())?;
        }
        document.set(CHECK_FOR_UPDATES_KEY, self.check_for_updates);
        Ok(Some(document))
    }

    /// Hand the document to the settings writer.
    fn save_in_background(&self) {
        let path = self.context.config().settings_path.clone();
        let format = SettingsFormat::from_path(&path);
        let rendered = self
            .store_scene()
            .and_then(|document| document.map(|d| d.render(format)).transpose());
        match rendered {
            Ok(Some(text)) => self.writer.submit(path, text),
            Ok(None) => {}
            Err(err) => {
                tracing::error!(target: targets::SETTINGS, error = %err, "cannot save settings");
            }
        }
    }

    // ------------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------------

    /// Advance interactions, animations and menus by one frame.
    pub fn update(&mut self, input: &FrameInput) {
        let _span = PerfSpan::new(span_names::UPDATE);
        let count = self.toolbars.len();
        for toolbar in &mut self.toolbars {
            toolbar.set_toolbar_count(count);
            toolbar.update(input);
        }

        {
            let mut cursor = self.context.cursor();
            cursor.begin_frame();
            for toolbar in &self.toolbars {
                toolbar.offer_cursor(&mut cursor, input.pointer.position);
            }
        }

        self.end_frame();
    }

    /// Draw every toolbar and act on clicks.
    pub fn draw(&mut self, input: &FrameInput, painter: &mut dyn Painter) {
        let _span = PerfSpan::new(span_names::DRAW);
        for toolbar in &mut self.toolbars {
            toolbar.draw(input, painter);
        }
        self.end_frame();
    }

    /// Route queued toolbar output and save if anything changed.
    fn end_frame(&mut self) {
        let outgoing: Vec<Outgoing> = std::mem::take(&mut *self.outbox.lock());
        let mut needs_save = false;
        for item in outgoing {
            match item {
                Outgoing::Request(request) => self.requests.push(request),
                Outgoing::CreateToolbar => {
                    self.add_toolbar();
                    needs_save = true;
                }
            }
        }

        for toolbar in &mut self.toolbars {
            needs_save |= toolbar.take_changed();
        }
        if needs_save {
            self.save_in_background();
        }
    }

    /// Cursor the host should show this frame.
    pub fn cursor(&self) -> CursorShape {
        self.context.cursor().cursor()
    }

    /// Drain requests for the host.
    pub fn take_requests(&mut self) -> Vec<DockRequest> {
        std::mem::take(&mut self.requests)
    }

    // ------------------------------------------------------------------------
    // Toolbars
    // ------------------------------------------------------------------------

    pub fn toolbar(&self, id: &str) -> Option<&Toolbar> {
        self.toolbars.iter().find(|t| t.id() == id)
    }

    fn toolbar_mut(&mut self, id: &str) -> Option<&mut Toolbar> {
        let toolbar = self.toolbars.iter_mut().find(|t| t.id() == id);
        if toolbar.is_none() {
            tracing::warn!(target: targets::MANAGER, toolbar = id, "unknown toolbar");
        }
        toolbar
    }

    /// Ids of the current scene's toolbars, in creation order.
    pub fn toolbar_ids(&self) -> Vec<String> {
        self.toolbars.iter().map(|t| t.id().to_string()).collect()
    }

    /// Add a toolbar with the next free `toolbar_<n>` id.
    pub fn add_toolbar(&mut self) -> String {
        let id = (1..)
            .map(|n| format!("{DEFAULT_TOOLBAR_ID}_{n}"))
            .find(|id| self.toolbar(id).is_none())
            .unwrap_or_default();
        tracing::info!(target: targets::MANAGER, toolbar = %id, "new toolbar");
        self.toolbars
            .push(Toolbar::new(&id, self.context.clone(), self.outbox.clone()));
        id
    }

    /// Delete a toolbar. The last toolbar of a scene cannot be deleted.
    pub fn delete_toolbar(&mut self, toolbar: &str) -> bool {
        if self.toolbars.len() <= 1 {
            tracing::warn!(target: targets::MANAGER, toolbar, "refusing to delete the only toolbar");
            return false;
        }
        let before = self.toolbars.len();
        self.toolbars.retain(|t| t.id() != toolbar);
        if self.toolbars.len() == before {
            return false;
        }
        tracing::info!(target: targets::MANAGER, toolbar, "toolbar deleted");
        self.save_in_background();
        true
    }

    // ------------------------------------------------------------------------
    // Host answers
    // ------------------------------------------------------------------------

    /// Answer a `ConfigureVisibleButtons` request with the chosen full ids.
    pub fn set_visible_buttons<I>(&mut self, toolbar: &str, ids: I) -> bool
    where
        I: IntoIterator<Item = String>,
    {
        let ids: BTreeSet<String> = ids.into_iter().collect();
        self.toolbar_mut(toolbar)
            .map(|t| t.set_visible_buttons(ids))
            .is_some()
    }

    /// The host closed the visible buttons selector.
    pub fn close_visible_buttons_selector(&mut self, toolbar: &str) {
        if let Some(t) = self.toolbar_mut(toolbar) {
            t.close_visible_buttons_selector();
        }
    }

    /// Answer a `CreateFolder` request. Returns the new folder id.
    pub fn create_folder(&mut self, toolbar: &str, tooltip: Option<&str>, icon: &str) -> Option<String> {
        self.toolbar_mut(toolbar)
            .map(|t| t.create_new_folder(tooltip, icon))
    }

    /// Answer an `EditFolder` request.
    pub fn update_folder(&mut self, toolbar: &str, folder: &str, tooltip: Option<&str>, icon: &str) -> bool {
        self.toolbar_mut(toolbar)
            .is_some_and(|t| t.update_folder(folder, tooltip, icon))
    }

    /// Answer a `ConfirmDeleteFolder` request.
    pub fn delete_folder(&mut self, toolbar: &str, folder: &str) -> bool {
        self.toolbar_mut(toolbar)
            .is_some_and(|t| t.remove_folder(folder))
    }

    // ------------------------------------------------------------------------
    // Update notice
    // ------------------------------------------------------------------------

    /// Whether the user allows checking for a newer version.
    pub fn check_for_updates(&self) -> bool {
        self.check_for_updates
    }

    /// Report the newest published version. A newer one than
    /// [`DockConfig::version`] adds an important "update available" button
    /// that opens the project page.
    pub fn report_latest_version(&mut self, version: u32) {
        let current = self.context.config().version;
        if version <= current {
            tracing::debug!(target: targets::MANAGER, version, current, "up to date");
            return;
        }
        tracing::info!(target: targets::MANAGER, version, current, "update available");

        let command = self.context.registry().add_internal("updateAvailable");
        if let Err(err) = command.set_icon_path(Some(icons::UPDATE_AVAILABLE)) {
            tracing::warn!(target: targets::MANAGER, error = %err, "invalid update icon");
        }
        command.set_tooltip(Some("Toolbar Plugin Update Available"));
        command.set_important(true);

        let weak = Arc::downgrade(&command);
        let outbox = self.outbox.clone();
        let url = self.context.config().project_url.clone();
        command.clicked().connect(move |_| {
            outbox
                .lock()
                .push(Outgoing::Request(DockRequest::OpenUrl(url.clone())));
            if let Some(command) = weak.upgrade() {
                command.set_important(false);
            }
        });
    }
}
