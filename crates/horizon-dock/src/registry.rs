//! The live command registry.
//!
//! One registry exists per [`DockContext`](crate::DockContext). It maps full
//! ids to commands, destroys replaced commands, and notifies toolbars when a
//! command is added so they can rebuild their button sets.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use horizon_dock_core::{ConnectionGuard, Signal, logging::targets};
use parking_lot::{Mutex, RwLock};

use crate::command::{Command, compare_full_ids};
use crate::creation_counter::CreationCounter;
use crate::error::RegistrationResult;

/// Registry of live commands, keyed by full id.
pub struct CommandRegistry {
    commands: RwLock<HashMap<String, Arc<Command>>>,
    counter: Mutex<CreationCounter>,
    command_added: Arc<Signal<Arc<Command>>>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("len", &self.commands.read().len())
            .finish()
    }
}

impl CommandRegistry {
    /// Create an empty registry with the given churn limits.
    pub fn new(churn_threshold: u32, churn_window: Duration) -> Self {
        Self {
            commands: RwLock::new(HashMap::new()),
            counter: Mutex::new(CreationCounter::new(churn_threshold, churn_window)),
            command_added: Arc::new(Signal::new()),
        }
    }

    /// Register a new command, replacing any command with the same full id.
    ///
    /// The replaced command is destroyed, and its `destroyed` signal fires,
    /// before the new command is announced to toolbars.
    pub fn add(&self, namespace: &str, id: &str) -> RegistrationResult<Arc<Command>> {
        let command = Arc::new(Command::new(namespace, id)?);
        self.counter.lock().record(command.full_id())?;
        self.insert(command.clone());
        Ok(command)
    }

    /// Register an engine-owned command without validation or churn checks.
    pub(crate) fn add_internal(&self, id: &str) -> Arc<Command> {
        let command = Command::internal(id);
        self.insert(command.clone());
        command
    }

    fn insert(&self, command: Arc<Command>) {
        let previous = self
            .commands
            .write()
            .insert(command.full_id().to_string(), command.clone());
        if let Some(previous) = previous {
            tracing::debug!(target: targets::COMMAND, command = command.full_id(), "replacing existing command");
            previous.destroy();
        }
        tracing::debug!(target: targets::COMMAND, command = command.full_id(), "command added");
        self.command_added.emit(command);
    }

    /// Look up a live command.
    pub fn get(&self, full_id: &str) -> Option<Arc<Command>> {
        self.prune();
        self.commands.read().get(full_id).cloned()
    }

    /// All live commands in case-insensitive full id order.
    pub fn commands(&self) -> Vec<Arc<Command>> {
        self.prune();
        let mut commands: Vec<_> = self.commands.read().values().cloned().collect();
        commands.sort_by(|a, b| compare_full_ids(a.full_id(), b.full_id()));
        commands
    }

    /// Number of live commands.
    pub fn len(&self) -> usize {
        self.prune();
        self.commands.read().len()
    }

    /// Whether no live commands exist.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Destroy and remove a command.
    pub fn remove(&self, full_id: &str) -> bool {
        let removed = self.commands.write().remove(full_id);
        match removed {
            Some(command) => {
                command.destroy();
                true
            }
            None => false,
        }
    }

    /// Subscribe to command additions. The subscription ends when the guard
    /// is dropped.
    pub fn on_command_added<F>(&self, slot: F) -> ConnectionGuard<Arc<Command>>
    where
        F: Fn(&Arc<Command>) + Send + Sync + 'static,
    {
        self.command_added.connect_scoped(slot)
    }

    fn prune(&self) {
        let has_dead = self.commands.read().values().any(|c| c.is_destroyed());
        if has_dead {
            self.commands.write().retain(|_, c| !c.is_destroyed());
        }
    }
}

static_assertions::assert_impl_all!(CommandRegistry: Send, Sync);
