//! Hierarchical settings storage.
//!
//! [`SettingsDocument`] stores a tree of [`SettingsValue`]s addressed by
//! dotted paths. The dock keeps one document per session, loaded from and
//! saved to the file named by [`DockConfig::settings_path`](crate::DockConfig).
//!
//! # Document Layout
//!
//! ```toml
//! [toolbars]
//! checkForUpdates = true
//!
//! [toolbars.flight.toolbar]
//! x = 300.0
//! y = 300.0
//! width = 250.0
//! height = 0.0
//! autoHide = false
//! drawBorder = true
//! useSkin = false
//! buttonOrder = "modA.btn1,modB.go"
//! visibleButtons = "modA.btn1,modB.go"
//!
//! [toolbars.flight.toolbar.folders.folder_1]
//! icon = "000_Toolbar/folder"
//! toolTip = "Science"
//! buttons = "modB.go"
//! ```
//!
//! # Formats
//!
//! A path ending in `.json` is read and written as JSON, anything else as
//! TOML. Saving always goes through a temporary file and a rename, so a
//! crash mid-save leaves the previous file intact. Saves made during a
//! frame go through [`SettingsWriter`] on a background thread.

mod migration;
mod toolbar_settings;
mod writer;

pub use migration::migrate_legacy;
pub use toolbar_settings::{FolderSettings, ToolbarSettings};
pub use writer::SettingsWriter;

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use horizon_dock_core::{PerfSpan, Signal, logging::span_names, logging::targets};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{SettingsError, SettingsResult};

/// A value stored in a settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingsValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<SettingsValue>),
    Object(BTreeMap<String, SettingsValue>),
}

impl SettingsValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SettingsValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingsValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            SettingsValue::Integer(v) => Some(*v),
            SettingsValue::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingsValue::Float(v) => Some(*v),
            SettingsValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingsValue::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&BTreeMap<String, SettingsValue>> {
        match self {
            SettingsValue::Object(v) => Some(v),
            _ => None,
        }
    }
}

impl Default for SettingsValue {
    fn default() -> Self {
        SettingsValue::Null
    }
}

impl From<bool> for SettingsValue {
    fn from(v: bool) -> Self {
        SettingsValue::Bool(v)
    }
}

impl From<i64> for SettingsValue {
    fn from(v: i64) -> Self {
        SettingsValue::Integer(v)
    }
}

impl From<f64> for SettingsValue {
    fn from(v: f64) -> Self {
        SettingsValue::Float(v)
    }
}

impl From<&str> for SettingsValue {
    fn from(v: &str) -> Self {
        SettingsValue::String(v.to_string())
    }
}

impl From<String> for SettingsValue {
    fn from(v: String) -> Self {
        SettingsValue::String(v)
    }
}

impl From<BTreeMap<String, SettingsValue>> for SettingsValue {
    fn from(v: BTreeMap<String, SettingsValue>) -> Self {
        SettingsValue::Object(v)
    }
}

/// On-disk format of a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SettingsFormat {
    #[default]
    Toml,
    Json,
}

impl SettingsFormat {
    /// `.json` selects JSON, anything else TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SettingsFormat::Json,
            _ => SettingsFormat::Toml,
        }
    }
}

// ============================================================================
// SettingsDocument
// ============================================================================

/// A tree of settings addressed by dotted paths such as
/// `toolbars.flight.toolbar.x`.
pub struct SettingsDocument {
    data: RwLock<BTreeMap<String, SettingsValue>>,
    changed: Signal<String>,
}

impl std::fmt::Debug for SettingsDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsDocument")
            .field("data", &*self.data.read())
            .finish()
    }
}

impl Default for SettingsDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::from_data(BTreeMap::new())
    }

    /// A document holding `data`.
    pub fn from_data(data: BTreeMap<String, SettingsValue>) -> Self {
        Self {
            data: RwLock::new(data),
            changed: Signal::new(),
        }
    }

    /// Emitted with the path of every mutation.
    pub fn changed(&self) -> &Signal<String> {
        &self.changed
    }

    /// Store `value` at `path`, creating intermediate groups.
    pub fn set<V: Into<SettingsValue>>(&self, path: &str, value: V) {
        let parts = parse_path(path);
        if parts.is_empty() {
            return;
        }
        set_nested(&mut self.data.write(), &parts, value.into());
        self.changed.emit(path.to_string());
    }

    /// Store any serializable value at `path`.
    pub fn set_serialized<T: Serialize>(&self, path: &str, value: &T) -> SettingsResult<()> {
        let json = serde_json::to_value(value)?;
        self.set(path, json_to_settings_value(json));
        Ok(())
    }

    /// The value at `path`, if any.
    pub fn get_raw(&self, path: &str) -> Option<SettingsValue> {
        let parts = parse_path(path);
        get_nested(&self.data.read(), &parts).cloned()
    }

    /// Deserialize the value at `path`.
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    pub fn get_deserialized<T: DeserializeOwned>(&self, path: &str) -> SettingsResult<Option<T>> {
        match self.get_raw(path) {
            Some(value) => Ok(Some(serde_json::from_value(settings_value_to_json(value))?)),
            None => Ok(None),
        }
    }

    /// The boolean at `path`, or `default`.
    pub fn get_bool_or(&self, path: &str, default: bool) -> bool {
        self.get_raw(path)
            .and_then(|v| v.as_bool())
            .unwrap_or(default)
    }

    /// Whether anything is stored at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.get_raw(path).is_some()
    }

    /// Remove and return the value at `path`.
    pub fn remove(&self, path: &str) -> Option<SettingsValue> {
        let parts = parse_path(path);
        if parts.is_empty() {
            return None;
        }
        let removed = remove_nested(&mut self.data.write(), &parts);
        if removed.is_some() {
            self.changed.emit(path.to_string());
        }
        removed
    }

    /// Keys of the group at `path`, sorted. Empty if `path` is not a group.
    pub fn group_keys(&self, path: &str) -> Vec<String> {
        let data = self.data.read();
        let parts = parse_path(path);
        if parts.is_empty() {
            return data.keys().cloned().collect();
        }
        match get_nested(&data, &parts) {
            Some(SettingsValue::Object(group)) => group.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Parse a document from text.
    pub fn parse(text: &str, format: SettingsFormat) -> SettingsResult<Self> {
        let value = match format {
            SettingsFormat::Json => json_to_settings_value(serde_json::from_str(text)?),
            SettingsFormat::Toml => toml_to_settings_value(toml::Value::Table(text.parse::<toml::Table>()?)),
        };
        match value {
            SettingsValue::Object(data) => Ok(Self::from_data(data)),
            SettingsValue::Null => Ok(Self::new()),
            _ => Err(SettingsError::InvalidShape {
                path: String::new(),
                expected: "a table",
            }),
        }
    }

    /// Render the document as text.
    pub fn render(&self, format: SettingsFormat) -> SettingsResult<String> {
        let root = SettingsValue::Object(self.data.read().clone());
        match format {
            SettingsFormat::Json => Ok(serde_json::to_string_pretty(&settings_value_to_json(root))?),
            SettingsFormat::Toml => Ok(toml::to_string_pretty(&settings_value_to_toml(&root))?),
        }
    }

    /// Load a document, choosing the format from the extension.
    ///
    /// A missing file yields an empty document.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let _span = PerfSpan::new(span_names::SETTINGS_IO);
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(target: targets::SETTINGS, path = %path.display(), "no settings file, starting empty");
                return Ok(Self::new());
            }
            Err(err) => return Err(SettingsError::io(path, err)),
        };
        let document = Self::parse(&text, SettingsFormat::from_path(path))?;
        tracing::info!(target: targets::SETTINGS, path = %path.display(), "settings loaded");
        Ok(document)
    }

    /// Save the document atomically, choosing the format from the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let path = path.as_ref();
        let _span = PerfSpan::new(span_names::SETTINGS_IO);
        let text = self.render(SettingsFormat::from_path(path))?;
        atomic_write(path, text.as_bytes())?;
        tracing::info!(target: targets::SETTINGS, path = %path.display(), "settings saved");
        Ok(())
    }
}

static_assertions::assert_impl_all!(SettingsDocument: Send, Sync);

/// Write `bytes` to a temporary sibling of `path`, then rename it over `path`.
fn atomic_write(path: &Path, bytes: &[u8]) -> SettingsResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "settings".to_string());
    let temp_path = parent.join(format!(".{}.tmp.{}", file_name, std::process::id()));

    let result = (|| {
        let mut file = fs::File::create(&temp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&temp_path, path)
    })();

    result.map_err(|err| {
        fs::remove_file(&temp_path).ok();
        SettingsError::io(path, err)
    })
}

// ============================================================================
// Path helpers
// ============================================================================

fn parse_path(path: &str) -> Vec<&str> {
    path.split('.').filter(|s| !s.is_empty()).collect()
}

fn get_nested<'a>(data: &'a BTreeMap<String, SettingsValue>, parts: &[&str]) -> Option<&'a SettingsValue> {
    let (first, rest) = parts.split_first()?;
    let value = data.get(*first)?;
    if rest.is_empty() {
        Some(value)
    } else {
        match value {
            SettingsValue::Object(group) => get_nested(group, rest),
            _ => None,
        }
    }
}

fn set_nested(data: &mut BTreeMap<String, SettingsValue>, parts: &[&str], value: SettingsValue) {
    let Some((first, rest)) = parts.split_first() else {
        return;
    };
    if rest.is_empty() {
        data.insert(first.to_string(), value);
        return;
    }
    let entry = data
        .entry(first.to_string())
        .or_insert_with(|| SettingsValue::Object(BTreeMap::new()));
    if !matches!(entry, SettingsValue::Object(_)) {
        *entry = SettingsValue::Object(BTreeMap::new());
    }
    if let SettingsValue::Object(group) = entry {
        set_nested(group, rest, value);
    }
}

fn remove_nested(data: &mut BTreeMap<String, SettingsValue>, parts: &[&str]) -> Option<SettingsValue> {
    let (first, rest) = parts.split_first()?;
    if rest.is_empty() {
        return data.remove(*first);
    }
    match data.get_mut(*first)? {
        SettingsValue::Object(group) => remove_nested(group, rest),
        _ => None,
    }
}

// ============================================================================
// Format conversion
// ============================================================================

fn json_to_settings_value(json: serde_json::Value) -> SettingsValue {
    match json {
        serde_json::Value::Null => SettingsValue::Null,
        serde_json::Value::Bool(b) => SettingsValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                SettingsValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                SettingsValue::Float(f)
            } else {
                SettingsValue::Null
            }
        }
        serde_json::Value::String(s) => SettingsValue::String(s),
        serde_json::Value::Array(arr) => {
            SettingsValue::Array(arr.into_iter().map(json_to_settings_value).collect())
        }
        serde_json::Value::Object(obj) => SettingsValue::Object(
            obj.into_iter()
                .map(|(k, v)| (k, json_to_settings_value(v)))
                .collect(),
        ),
    }
}

fn settings_value_to_json(value: SettingsValue) -> serde_json::Value {
    match value {
        SettingsValue::Null => serde_json::Value::Null,
        SettingsValue::Bool(b) => serde_json::Value::Bool(b),
        SettingsValue::Integer(i) => serde_json::Value::Number(i.into()),
        SettingsValue::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        SettingsValue::String(s) => serde_json::Value::String(s),
        SettingsValue::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(settings_value_to_json).collect())
        }
        SettingsValue::Object(obj) => serde_json::Value::Object(
            obj.into_iter()
                .map(|(k, v)| (k, settings_value_to_json(v)))
                .collect(),
        ),
    }
}

fn toml_to_settings_value(toml: toml::Value) -> SettingsValue {
    match toml {
        toml::Value::String(s) => SettingsValue::String(s),
        toml::Value::Integer(i) => SettingsValue::Integer(i),
        toml::Value::Float(f) => SettingsValue::Float(f),
        toml::Value::Boolean(b) => SettingsValue::Bool(b),
        toml::Value::Datetime(dt) => SettingsValue::String(dt.to_string()),
        toml::Value::Array(arr) => {
            SettingsValue::Array(arr.into_iter().map(toml_to_settings_value).collect())
        }
        toml::Value::Table(table) => SettingsValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_settings_value(v)))
                .collect(),
        ),
    }
}

// TOML has no null; null entries are dropped from tables and arrays.
fn settings_value_to_toml(value: &SettingsValue) -> toml::Value {
    match value {
        SettingsValue::Null => toml::Value::String(String::new()),
        SettingsValue::Bool(b) => toml::Value::Boolean(*b),
        SettingsValue::Integer(i) => toml::Value::Integer(*i),
        SettingsValue::Float(f) => toml::Value::Float(*f),
        SettingsValue::String(s) => toml::Value::String(s.clone()),
        SettingsValue::Array(arr) => toml::Value::Array(
            arr.iter()
                .filter(|v| !v.is_null())
                .map(settings_value_to_toml)
                .collect(),
        ),
        SettingsValue::Object(obj) => toml::Value::Table(
            obj.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), settings_value_to_toml(v)))
                .collect(),
        ),
    }
}
