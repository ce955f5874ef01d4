//! Manager configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{CommandError, Result};

/// Configuration surface of the command manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    /// Directory to auto-load at construction.
    pub path: Option<PathBuf>,

    /// Default sync targets.  Empty means the global scope.
    pub destinations: Vec<String>,

    /// Log a human-readable load summary after each load.
    pub show_summary: bool,

    /// Re-validate every descriptor before each sync.
    pub validate_on_sync: bool,

    /// Treat "manifests present but zero valid commands" as a load failure
    /// instead of an empty success.
    pub require_valid_commands: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            path: None,
            destinations: Vec::new(),
            show_summary: true,
            validate_on_sync: false,
            require_valid_commands: false,
        }
    }
}

impl ManagerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CommandError::Config(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
