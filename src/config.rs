//! Application settings
//!
//! Settings can be built in code or loaded from a TOML file:
//!
//! ```toml
//! name = "trainer"
//! about = "Train a model"
//! version = "0.3.0"
//! always_subcommands = false
//! max_passes = 64
//! ```

use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use crate::error::{ArgtreeError, ArgtreeResult};

/// Application metadata and resolver tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Program name shown in usage text
    #[serde(default = "default_name")]
    pub name: String,

    /// About text / description
    #[serde(default)]
    pub about: Option<String>,

    /// Application version
    #[serde(default)]
    pub version: Option<String>,

    /// Use sub-command mode even when a single callable is registered
    #[serde(default)]
    pub always_subcommands: bool,

    /// Upper bound on resolver passes before reporting a registration cycle
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
}

fn default_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_max_passes() -> usize {
    64
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            about: None,
            version: None,
            always_subcommands: false,
            max_passes: default_max_passes(),
        }
    }
}

impl AppSettings {
    /// Settings with the given program name and defaults elsewhere
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse settings from a TOML string
    #[cfg(feature = "config")]
    pub fn from_toml_str(content: &str) -> ArgtreeResult<Self> {
        let settings: AppSettings = toml::from_str(content)
            .map_err(|e| ArgtreeError::config(format!("Failed to parse TOML: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file; read failures surface as `Io`
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> ArgtreeResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    #[cfg(feature = "config")]
    fn validate(&self) -> ArgtreeResult<()> {
        if self.name.trim().is_empty() {
            return Err(ArgtreeError::config("name must not be empty"));
        }
        if self.max_passes == 0 {
            return Err(ArgtreeError::config("max_passes must be at least 1"));
        }
        Ok(())
    }
}
