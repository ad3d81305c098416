//! The shared session context.
//!
//! Everything that used to be process-wide lives here: the command registry,
//! the cursor arbiter, the icon loader and the current scene. A
//! [`ToolbarManager`](crate::ToolbarManager) creates one context per session
//! and hands an `Arc` to each of its toolbars.

use std::sync::{Arc, Weak};

use horizon_dock_render::IconLoader;
use parking_lot::{Mutex, MutexGuard, RwLock};

use crate::command::Visibility;
use crate::config::DockConfig;
use crate::cursor::CursorArbiter;
use crate::registry::CommandRegistry;

/// Scene used until the host reports one.
pub const DEFAULT_SCENE: &str = "default";

/// Session-wide state shared by the manager and its toolbars.
pub struct DockContext {
    config: DockConfig,
    registry: CommandRegistry,
    cursor: Mutex<CursorArbiter>,
    icon_loader: Arc<dyn IconLoader>,
    current_scene: RwLock<String>,
}

impl std::fmt::Debug for DockContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockContext")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("current_scene", &*self.current_scene.read())
            .finish_non_exhaustive()
    }
}

impl DockContext {
    /// Create a context for a new session.
    pub fn new(config: DockConfig, icon_loader: Arc<dyn IconLoader>) -> Arc<Self> {
        let registry = CommandRegistry::new(config.churn_threshold, config.churn_window);
        Arc::new(Self {
            config,
            registry,
            cursor: Mutex::new(CursorArbiter::new()),
            icon_loader,
            current_scene: RwLock::new(DEFAULT_SCENE.to_string()),
        })
    }

    /// Engine configuration.
    pub fn config(&self) -> &DockConfig {
        &self.config
    }

    /// The live command registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Host icon loader.
    pub fn icon_loader(&self) -> &dyn IconLoader {
        self.icon_loader.as_ref()
    }

    pub(crate) fn cursor(&self) -> MutexGuard<'_, CursorArbiter> {
        self.cursor.lock()
    }

    /// Name of the scene the host is currently in.
    pub fn current_scene(&self) -> String {
        self.current_scene.read().clone()
    }

    pub(crate) fn set_current_scene(&self, scene: &str) {
        *self.current_scene.write() = scene.to_string();
    }
}

static_assertions::assert_impl_all!(DockContext: Send, Sync);

/// Visibility predicate that is true only in some scenes.
///
/// # Example
///
/// ```ignore
/// let command = manager.add("myMod", "map")?;
/// command.set_visibility(Some(Arc::new(SceneVisibility::new(
///     manager.context(),
///     ["flight", "tracking"],
/// ))));
/// ```
#[derive(Debug, Clone)]
pub struct SceneVisibility {
    context: Weak<DockContext>,
    scenes: Vec<String>,
}

impl SceneVisibility {
    /// Create a predicate for the given scenes.
    pub fn new<I, S>(context: &Arc<DockContext>, scenes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            context: Arc::downgrade(context),
            scenes: scenes.into_iter().map(Into::into).collect(),
        }
    }
}

impl Visibility for SceneVisibility {
    fn is_visible(&self) -> bool {
        self.context.upgrade().is_some_and(|context| {
            let current = context.current_scene.read();
            self.scenes.iter().any(|scene| *scene == *current)
        })
    }
}
