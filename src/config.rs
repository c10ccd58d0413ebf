//! Onboarding configuration management.
//!
//! Handles the configuration file at:
//! - Linux: ~/.config/privacy-onboarding/config.toml
//! - macOS: ~/Library/Application Support/privacy-onboarding/config.toml
//! - Windows: %APPDATA%\privacy-onboarding\config.toml

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::StaticEntityRegistry;
use crate::error::{OnboardingError, Result};
use crate::messages::{CatalogOverrides, MessageCatalog};
use crate::trackers::{MajorTrackerRegistry, DEFAULT_MAJOR_DOMAINS};

const APP_DIR: &str = "privacy-onboarding";

/// Onboarding configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OnboardingConfig {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Where onboarding state is kept
    #[serde(default)]
    pub storage: StorageConfig,

    /// Tracker classification data
    #[serde(default)]
    pub trackers: TrackerConfig,

    /// Message text overrides
    #[serde(default)]
    pub messages: MessagesConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Settings file path; defaults to the platform data directory
    #[serde(default)]
    pub settings_file: Option<PathBuf>,
}

/// Tracker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Domains of major tracking networks
    #[serde(default = "default_major_domains")]
    pub major_domains: Vec<String>,

    /// JSON file with tracker entities
    #[serde(default)]
    pub entity_data: Option<PathBuf>,
}

fn default_major_domains() -> Vec<String> {
    DEFAULT_MAJOR_DOMAINS.iter().map(|d| d.to_string()).collect()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            major_domains: default_major_domains(),
            entity_data: None,
        }
    }
}

/// Message catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessagesConfig {
    /// TOML file overriding built-in message texts
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

impl OnboardingConfig {
    /// Default configuration file location
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load configuration from a specific path
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| OnboardingError::io(path, e))?;

        toml::from_str(&content).map_err(|e| OnboardingError::ConfigError {
            message: format!("Failed to parse config: {}", e),
        })
    }

    /// Settings file location, configured or platform default
    pub fn settings_path(&self) -> PathBuf {
        self.storage.settings_file.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("settings.toml")
        })
    }

    pub fn major_trackers(&self) -> MajorTrackerRegistry {
        MajorTrackerRegistry::new(&self.trackers.major_domains)
    }

    /// Entity registry from the configured data file, empty if none is set
    pub fn entity_registry(&self) -> Result<StaticEntityRegistry> {
        match &self.trackers.entity_data {
            Some(path) => StaticEntityRegistry::load(path),
            None => Ok(StaticEntityRegistry::default()),
        }
    }

    /// Built-in catalog with any configured overrides applied
    pub fn message_catalog(&self) -> Result<Arc<MessageCatalog>> {
        match &self.messages.catalog {
            Some(path) => {
                let overrides = CatalogOverrides::load_from(path)?;
                Ok(Arc::new(MessageCatalog::builtin().with_overrides(&overrides)?))
            }
            None => Ok(MessageCatalog::builtin()),
        }
    }
}
