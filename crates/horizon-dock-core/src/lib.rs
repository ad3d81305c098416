//! Core systems for Horizon Dock.
//!
//! This crate provides the building blocks the toolbar engine is made of:
//!
//! - **Signals**: ordered, re-entrancy-safe observer lists
//! - **Easing**: monotonic easing curves for slide animations
//! - **Guarded callbacks**: panic containment for third-party plugin code
//! - **Logging**: tracing targets and span names shared by all crates
//!
//! # Signal Example
//!
//! ```
//! use horizon_dock_core::Signal;
//!
//! let changed = Signal::<String>::new();
//! let id = changed.connect(|path| println!("setting {path} changed"));
//! changed.emit("toolbars.checkForUpdates".to_string());
//! changed.disconnect(id);
//! ```

pub mod easing;
pub mod guard;
pub mod logging;
pub mod signal;

pub use easing::{Easing, ease, lerp_eased};
pub use guard::invoke_guarded;
pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
