//! Error types for the render crate.

use thiserror::Error;

/// Errors that can occur while resolving a button icon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IconError {
    /// The host has no icon under this path.
    #[error("icon not found: {path}")]
    NotFound { path: String },

    /// The icon exceeds the maximum button icon size.
    #[error("icon {path} is {width}x{height}, larger than {max_width}x{max_height}")]
    Oversize {
        path: String,
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    /// The host failed to decode the icon.
    #[error("failed to decode icon {path}: {reason}")]
    Decode { path: String, reason: String },
}

/// Result type for icon operations.
pub type IconResult<T> = Result<T, IconError>;
