//! Error types for the toolbar engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned when registering or configuring a command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A namespace or id contains one of `. space / : , ;` or is empty.
    #[error("{label} contains invalid characters: {value:?}")]
    InvalidId { label: &'static str, value: String },

    /// An icon path uses backslashes.
    #[error("icon path must use forward slashes instead of backslashes: {path}")]
    InvalidIconPath { path: String },

    /// The command was recreated too often in a short time and is now refused.
    #[error("command {full_id} is being recreated too often, refusing to add it")]
    CreationChurn { full_id: String },
}

/// Result type for command registration.
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Errors that can occur while loading or saving settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// Reading or writing the settings file failed.
    #[error("settings I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON settings file could not be parsed or written.
    #[error("invalid JSON settings: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML settings file could not be parsed.
    #[error("invalid TOML settings: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The settings tree could not be written as TOML.
    #[error("failed to serialize TOML settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// The document does not have the expected shape.
    #[error("settings value at {path} is not {expected}")]
    InvalidShape { path: String, expected: &'static str },
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
