//! Runtime configuration for a dock session.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Project page opened by the "About" entry and the update notice.
pub const PROJECT_URL: &str = "https://github.com/horizon-analytic-studios/horizon-dock";

/// Version number of this engine, compared against the latest published one.
pub const VERSION: u32 = 1;

const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Engine knobs, fixed for the lifetime of a [`ToolbarManager`](crate::ToolbarManager).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use horizon_dock::DockConfig;
///
/// let config = DockConfig::default()
///     .with_settings_path("/tmp/dock/settings.json")
///     .with_slide_duration(Duration::from_millis(150));
/// assert_eq!(config.slide_duration, Duration::from_millis(150));
/// ```
#[derive(Debug, Clone)]
pub struct DockConfig {
    /// Where settings are loaded from and saved to. `.json` selects JSON,
    /// anything else TOML.
    pub settings_path: PathBuf,
    /// Version number compared by the update notice.
    pub version: u32,
    /// URL opened by "About" and the update notice.
    pub project_url: String,
    /// Creations of one full id within `churn_window` before it is refused.
    pub churn_threshold: u32,
    /// Window for `churn_threshold`.
    pub churn_window: Duration,
    /// Length of the auto-hide slide.
    pub slide_duration: Duration,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            settings_path: default_settings_path(),
            version: VERSION,
            project_url: PROJECT_URL.to_string(),
            churn_threshold: 100,
            churn_window: Duration::from_secs(10),
            slide_duration: Duration::from_millis(100),
        }
    }
}

impl DockConfig {
    /// Set the settings file path.
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = path.into();
        self
    }

    /// Set the version number used by the update notice.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Set the URL opened by "About" and the update notice.
    pub fn with_project_url(mut self, url: impl Into<String>) -> Self {
        self.project_url = url.into();
        self
    }

    /// Set the creation churn limits.
    pub fn with_churn_limit(mut self, threshold: u32, window: Duration) -> Self {
        self.churn_threshold = threshold;
        self.churn_window = window;
        self
    }

    /// Set the auto-hide slide duration.
    pub fn with_slide_duration(mut self, duration: Duration) -> Self {
        self.slide_duration = duration;
        self
    }

    pub(crate) fn slide_duration_ms(&self) -> i64 {
        i64::try_from(self.slide_duration.as_millis()).unwrap_or(i64::MAX).max(1)
    }
}

/// `<config dir>/horizon-dock/settings.toml`, or a relative `settings.toml`
/// when the platform has no config directory.
pub fn default_settings_path() -> PathBuf {
    ProjectDirs::from("com", "Horizon Analytic Studios", "horizon-dock")
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE_NAME))
}
