//! Typed per-toolbar settings records.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::toolbar::layout::{DEFAULT_WIDTH, DEFAULT_X, DEFAULT_Y};

/// Persisted state of one toolbar, stored at `toolbars.<scene>.<toolbarId>`.
///
/// Lists are stored as comma-separated full ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolbarSettings {
    pub x: f32,
    pub y: f32,
    /// The explicit width, not the live auto-sized one.
    pub width: f32,
    pub height: f32,
    pub auto_hide: bool,
    pub draw_border: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_skin: Option<bool>,
    /// Written by older versions.
    #[serde(rename = "useKSPSkin", skip_serializing)]
    pub legacy_use_skin: Option<bool>,
    #[serde(with = "csv")]
    pub button_order: Vec<String>,
    #[serde(with = "csv")]
    pub visible_buttons: BTreeSet<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub folders: BTreeMap<String, FolderSettings>,
}

impl Default for ToolbarSettings {
    fn default() -> Self {
        Self {
            x: DEFAULT_X,
            y: DEFAULT_Y,
            width: DEFAULT_WIDTH,
            height: 0.0,
            auto_hide: false,
            draw_border: true,
            use_skin: None,
            legacy_use_skin: None,
            button_order: Vec::new(),
            visible_buttons: BTreeSet::new(),
            folders: BTreeMap::new(),
        }
    }
}

impl ToolbarSettings {
    /// Whether the host skin is used, falling back to the legacy key.
    pub fn uses_skin(&self) -> bool {
        self.use_skin.or(self.legacy_use_skin).unwrap_or(false)
    }
}

/// Persisted state of one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderSettings {
    pub icon: String,
    #[serde(rename = "toolTip", skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(with = "csv")]
    pub buttons: BTreeSet<String>,
}

impl Default for FolderSettings {
    fn default() -> Self {
        Self {
            icon: crate::button::icons::FOLDER.to_string(),
            tooltip: None,
            buttons: BTreeSet::new(),
        }
    }
}

mod csv {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S, C>(items: &C, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        for<'a> &'a C: IntoIterator<Item = &'a String>,
    {
        let joined = items
            .into_iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(",");
        serializer.serialize_str(&joined)
    }

    pub fn deserialize<'de, D, C>(deserializer: D) -> Result<C, D::Error>
    where
        D: Deserializer<'de>,
        C: FromIterator<String>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}
