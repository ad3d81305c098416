//! Logging facilities for Horizon Dock.
//!
//! Horizon Dock uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in the host:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_dock=debug")
//!     .init();
//! ```
//!
//! All engine log statements carry one of the [`targets`] below, so a host
//! can turn on, say, settings persistence logging without drowning in
//! per-frame layout traces.

/// Span names used throughout Horizon Dock for tracing.
pub mod span_names {
    /// Per-frame manager update.
    pub const UPDATE: &str = "horizon_dock::update";
    /// Per-frame manager draw.
    pub const DRAW: &str = "horizon_dock::draw";
    /// Toolbar layout pass.
    pub const LAYOUT: &str = "horizon_dock::layout";
    /// Settings load/save.
    pub const SETTINGS_IO: &str = "horizon_dock::settings_io";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "horizon_dock_core";
    /// Signal emission target.
    pub const SIGNAL: &str = "horizon_dock_core::signal";
    /// Guarded plugin callbacks.
    pub const GUARD: &str = "horizon_dock_core::guard";
    /// Command registry and command lifecycle.
    pub const COMMAND: &str = "horizon_dock::command";
    /// Toolbar layout, menus, folders and auto-hide.
    pub const TOOLBAR: &str = "horizon_dock::toolbar";
    /// Settings persistence and migration.
    pub const SETTINGS: &str = "horizon_dock::settings";
    /// Drag, resize and reorder interactions.
    pub const INTERACTION: &str = "horizon_dock::interaction";
    /// Toolbar manager and session lifecycle.
    pub const MANAGER: &str = "horizon_dock::manager";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Used around the per-frame update and draw passes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "horizon_dock::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_share_prefix() {
        for target in [
            targets::COMMAND,
            targets::TOOLBAR,
            targets::SETTINGS,
            targets::INTERACTION,
            targets::MANAGER,
        ] {
            assert!(target.starts_with("horizon_dock::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }

    #[test]
    fn test_perf_span_without_subscriber() {
        let _span = PerfSpan::new(span_names::LAYOUT);
    }
}
