//! Persisted user settings.
//!
//! Settings are owned by a [`SettingsStore`]; the core never reads them on its
//! own. Callers load them once, pass the pieces they need (selector order,
//! template configuration, placement mode) into each call, and save updates
//! back through the store.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::placement::PlacementMode;
use crate::result::{PinpointError, PinpointResult};
use crate::selector::SelectorOrder;
use crate::template::{parse, TemplateConfig, DEFAULT_TEMPLATE_CONFIG};

/// Default settings file name
pub const DEFAULT_SETTINGS_FILE: &str = ".pinpoint.yaml";

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Attribute preference order for selectors
    pub selector_order: SelectorOrder,
    /// Whether the panel is anchored instead of following the cursor
    pub popup_fixed: bool,
    /// Raw template configuration used when copying
    pub template_config: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            selector_order: SelectorOrder::default(),
            popup_fixed: false,
            template_config: DEFAULT_TEMPLATE_CONFIG.to_string(),
        }
    }
}

impl Settings {
    /// Create default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the selector order
    #[must_use]
    pub fn with_selector_order(mut self, order: SelectorOrder) -> Self {
        self.selector_order = order;
        self
    }

    /// Set the template configuration
    #[must_use]
    pub fn with_template_config(mut self, raw: impl Into<String>) -> Self {
        self.template_config = raw.into();
        self
    }

    /// Set fixed panel mode
    #[must_use]
    pub const fn with_popup_fixed(mut self, fixed: bool) -> Self {
        self.popup_fixed = fixed;
        self
    }

    /// Parsed template configuration
    #[must_use]
    pub fn template(&self) -> TemplateConfig {
        parse(&self.template_config)
    }

    /// Panel placement mode
    #[must_use]
    pub const fn placement_mode(&self) -> PlacementMode {
        PlacementMode::from_fixed(self.popup_fixed)
    }
}

/// Persistence for [`Settings`]
pub trait SettingsStore {
    /// Load stored settings; a store with nothing saved yields defaults
    fn load(&self) -> PinpointResult<Settings>;

    /// Persist settings
    fn save(&self, settings: &Settings) -> PinpointResult<()>;

    /// Load settings, recovering from unreadable data with defaults
    fn load_or_default(&self) -> Settings {
        self.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not load settings, using defaults");
            Settings::default()
        })
    }
}

/// Settings stored as a YAML file
#[derive(Debug, Clone)]
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Create a store backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> PinpointResult<Settings> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no settings file, using defaults");
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }
        serde_yaml_ng::from_str(&content).map_err(|e| {
            PinpointError::settings(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, settings: &Settings) -> PinpointResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml_ng::to_string(settings)?;
        fs::write(&self.path, yaml)?;
        debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Settings kept in memory
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    stored: Mutex<Option<Settings>>,
}

impl MemorySettingsStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> PinpointResult<Settings> {
        let stored = self
            .stored
            .lock()
            .map_err(|_| PinpointError::settings("settings lock poisoned"))?;
        Ok(stored.clone().unwrap_or_default())
    }

    fn save(&self, settings: &Settings) -> PinpointResult<()> {
        let mut stored = self
            .stored
            .lock()
            .map_err(|_| PinpointError::settings("settings lock poisoned"))?;
        *stored = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.selector_order.to_string(), "data-cy, id, class");
        assert!(!settings.popup_fixed);
        assert_eq!(settings.template().kind, "selector");
        assert_eq!(settings.placement_mode(), PlacementMode::Floating);
    }

    #[test]
    fn test_file_store_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(dir.path().join("none.yaml"));
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_file_store_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = FileSettingsStore::new(dir.path().join("nested/settings.yaml"));
        let settings = Settings::new()
            .with_selector_order(SelectorOrder::parse(&["data-testid+role", "id"]).unwrap())
            .with_template_config("cypress")
            .with_popup_fixed(true);
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_file_store_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "popup_fixed: true\n").unwrap();
        let settings = FileSettingsStore::new(&path).load().unwrap();
        assert!(settings.popup_fixed);
        assert_eq!(settings.selector_order, SelectorOrder::default());
    }

    #[test]
    fn test_file_store_ignores_retired_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "locked: true\npopup_fixed: true\n").unwrap();
        let store = FileSettingsStore::new(&path);
        let settings = store.load().unwrap();
        assert!(settings.popup_fixed);

        store.save(&settings).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("locked"));
        assert!(written.contains("popup_fixed: true"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.yaml");
        fs::write(&path, "selector_order: [\"\"]\n").unwrap();
        let store = FileSettingsStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), Settings::default());
    }

    #[test]
    fn test_memory_store() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.load().unwrap(), Settings::default());
        let settings = Settings::new().with_template_config("selenium");
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap().template().kind, "selenium");
    }
}
