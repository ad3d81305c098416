//! Per-id creation rate limiting.
//!
//! Some plugins recreate their buttons every frame. The counter tracks how
//! many times each full id was added within a time window; once an id hits
//! the threshold it is flagged for the rest of the session and every later
//! registration is refused.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use horizon_dock_core::logging::targets;

use crate::error::{RegistrationError, RegistrationResult};

#[derive(Debug, Clone, Copy)]
struct Entry {
    window_start: Instant,
    count: u32,
    flagged: bool,
}

/// Counts command creations per full id.
#[derive(Debug)]
pub struct CreationCounter {
    threshold: u32,
    window: Duration,
    entries: HashMap<String, Entry>,
}

impl CreationCounter {
    /// Create a counter that flags an id after `threshold` creations within
    /// `window`.
    pub fn new(threshold: u32, window: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            window,
            entries: HashMap::new(),
        }
    }

    /// Record a creation of `full_id` now.
    pub fn record(&mut self, full_id: &str) -> RegistrationResult<()> {
        self.record_at(full_id, Instant::now())
    }

    /// Record a creation of `full_id` at `now`.
    pub fn record_at(&mut self, full_id: &str, now: Instant) -> RegistrationResult<()> {
        let entry = self.entries.entry(full_id.to_string()).or_insert(Entry {
            window_start: now,
            count: 0,
            flagged: false,
        });

        if entry.flagged {
            return Err(RegistrationError::CreationChurn {
                full_id: full_id.to_string(),
            });
        }

        if now.saturating_duration_since(entry.window_start) > self.window {
            entry.window_start = now;
            entry.count = 0;
        }

        entry.count += 1;
        if entry.count >= self.threshold {
            entry.flagged = true;
            tracing::warn!(
                target: targets::COMMAND,
                command = full_id,
                creations = entry.count,
                window_secs = self.window.as_secs_f32(),
                "command is being recreated too often, further registrations will be refused"
            );
        }
        Ok(())
    }
}
