//! Change detection for the set of visible buttons.

use std::collections::HashMap;

use horizon_dock_core::logging::targets;

/// Remembers which buttons were visible at the last check.
///
/// Toolbars only re-run auto-sizing when [`VisibleButtons::update`] reports
/// a change, not every frame.
#[derive(Debug, Default)]
pub struct VisibleButtons {
    visible: HashMap<String, bool>,
    primed: bool,
}

impl VisibleButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last state so the next update reports a change.
    pub fn reset(&mut self) {
        self.visible.clear();
        self.primed = false;
    }

    /// Compare `(full id, visible)` pairs against the last check and store
    /// them. Returns whether anything changed.
    pub fn update<'a>(&mut self, buttons: impl IntoIterator<Item = (&'a str, bool)>) -> bool {
        let current: HashMap<String, bool> = buttons
            .into_iter()
            .map(|(id, visible)| (id.to_string(), visible))
            .collect();
        let changed = !self.primed || current != self.visible;
        if changed {
            tracing::info!(target: targets::TOOLBAR, visible = current.values().filter(|v| **v).count(), "button visibilities have changed");
            self.visible = current;
            self.primed = true;
        }
        changed
    }
}
