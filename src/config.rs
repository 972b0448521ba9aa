//! Application and per-dropdown configuration.
//!
//! The on-disk config is JSON in the platform config directory. Every field
//! is optional; a missing file means defaults.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::dropdown::SelectOption;
use crate::error::ConfigError;
use crate::ui::theme::ThemeMode;

/// Default trigger text when nothing is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Select...";

/// Default text of the empty-list row.
pub const DEFAULT_NO_RESULTS: &str = "No results found";

/// Invoked after a user selection.
pub type ChangeCallback = Rc<dyn Fn(Option<&SelectOption>)>;

/// Runtime configuration of one dropdown.
#[derive(Clone)]
pub struct DropdownConfig {
    pub placeholder: String,
    pub searchable: bool,
    pub disabled: bool,
    pub no_results_text: String,
    pub on_change: Option<ChangeCallback>,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            searchable: true,
            disabled: false,
            no_results_text: DEFAULT_NO_RESULTS.to_string(),
            on_change: None,
        }
    }
}

impl fmt::Debug for DropdownConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropdownConfig")
            .field("placeholder", &self.placeholder)
            .field("searchable", &self.searchable)
            .field("disabled", &self.disabled)
            .field("no_results_text", &self.no_results_text)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl DropdownConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn no_results_text(mut self, text: impl Into<String>) -> Self {
        self.no_results_text = text.into();
        self
    }

    pub fn on_change(mut self, callback: impl Fn(Option<&SelectOption>) + 'static) -> Self {
        self.on_change = Some(Rc::new(callback));
        self
    }
}

/// Per-dropdown overrides from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownSettings {
    pub placeholder: Option<String>,
    pub searchable: Option<bool>,
    pub disabled: Option<bool>,
}

impl DropdownSettings {
    /// Layers these overrides on top of `config`.
    pub fn apply(&self, mut config: DropdownConfig) -> DropdownConfig {
        if let Some(placeholder) = &self.placeholder {
            config.placeholder = placeholder.clone();
        }
        if let Some(searchable) = self.searchable {
            config.searchable = searchable;
        }
        if let Some(disabled) = self.disabled {
            config.disabled = disabled;
        }
        config
    }
}

/// Top-level application config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST API; the built-in sample data is used when unset.
    pub api_base: Option<String>,
    pub theme: ThemeMode,
    pub no_results_text: Option<String>,
    /// Overrides keyed by dropdown container id.
    pub dropdowns: HashMap<String, DropdownSettings>,
}

impl AppConfig {
    /// `config.json` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("id", "stockroom", "inventory-select")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads from `path`, or returns defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the runtime config for a dropdown, starting from `base`.
    pub fn dropdown_config(&self, container_id: &str, base: DropdownConfig) -> DropdownConfig {
        let base = match &self.no_results_text {
            Some(text) => base.no_results_text(text.clone()),
            None => base,
        };
        match self.dropdowns.get(container_id) {
            Some(settings) => settings.apply(base),
            None => base,
        }
    }
}
