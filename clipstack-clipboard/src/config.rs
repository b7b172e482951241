//! Clipboard configuration, optionally read from a `[clipboard]` TOML table.

use crate::error::{ClipboardError, ClipboardResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Where a clipboard keeps its snapshot in the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardConfig {
    /// Base key of the snapshot in the session store.
    #[serde(default = "default_session_key")]
    pub session_key: String,
    /// Container name; separate scopes keep separate clipboards within one
    /// session.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

fn default_session_key() -> String {
    "CLIPBOARD".to_string()
}

impl Default for ClipboardConfig {
    fn default() -> Self {
        Self {
            session_key: default_session_key(),
            scope: None,
        }
    }
}

impl ClipboardConfig {
    /// Creates the default config restricted to `scope`.
    #[must_use]
    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            ..Self::default()
        }
    }

    /// Returns the key the snapshot is stored under.
    #[must_use]
    pub fn store_key(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}.{}", self.session_key, scope),
            None => self.session_key.clone(),
        }
    }

    /// Parses a config from TOML text containing a `[clipboard]` table.
    ///
    /// A missing table yields the defaults; an empty session key is rejected.
    pub fn from_toml_str(contents: &str) -> ClipboardResult<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| ClipboardError::Config(e.to_string()))?;
        let config = file.clipboard;
        if config.session_key.is_empty() {
            return Err(ClipboardError::Config("session_key must not be empty".into()));
        }
        Ok(config)
    }

    /// Loads the config from `path`, falling back to defaults when the file
    /// is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No clipboard config found at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(config) => {
                    info!("Loaded clipboard config from {:?}", path);
                    config
                }
                Err(e) => {
                    warn!("Failed to parse clipboard config {:?}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read clipboard config {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

/// Raw TOML structure.
#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    clipboard: ClipboardConfig,
}
