//! Host-facing abstractions for Horizon Dock.
//!
//! The toolbar engine does not draw, decode textures or read devices itself.
//! This crate defines the small surface a host implements to plug it in:
//!
//! - **Geometry**: [`Point`], [`Size`], [`Rect`] and [`Color`]
//! - **Drawing**: the immediate-mode [`Painter`] trait
//! - **Input**: [`FrameInput`], a per-frame pointer and screen snapshot
//! - **Icons**: [`IconLoader`], resolving icon paths to [`Icon`]s

mod error;
pub mod icon;
pub mod input;
pub mod painter;
pub mod types;

pub use error::{IconError, IconResult};
pub use icon::{Icon, IconLoader, MAX_ICON_HEIGHT, MAX_ICON_WIDTH, load_bounded};
pub use input::{FrameInput, MouseButton, PointerState};
pub use painter::{ButtonStyle, Painter, Skin, tooltip_rect};
pub use types::{Color, Point, Rect, Size};
