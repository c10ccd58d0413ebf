//! Command modules for the privacy-onboarding CLI
//!
//! - `advise` - home, browse and dismiss triggers
//! - `status` - stored state and message catalog listings
//!
//! All command handlers take a shared [`CommandContext`] carrying the output
//! format and the loaded onboarding session.

pub mod advise;
pub mod status;

pub use advise::{run_browse, run_dismiss, run_home};
pub use status::{run_messages, run_status};

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::advisor::OnboardingFlow;
use crate::cli::{Cli, OutputFormat};
use crate::config::OnboardingConfig;
use crate::entity::StaticEntityRegistry;
use crate::error::{OnboardingError, Result};
use crate::messages::MessageCatalog;
use crate::settings::FileSettings;

/// Shared context passed to all command handlers
pub struct CommandContext {
    /// Output format (text or json)
    pub format: OutputFormat,
    pub settings: Arc<FileSettings>,
    pub entities: Arc<StaticEntityRegistry>,
    pub catalog: Arc<MessageCatalog>,
    pub flow: OnboardingFlow,
}

impl CommandContext {
    /// Load settings, entity data and messages as configured, letting CLI
    /// flags override the config file.
    pub fn from_cli(cli: &Cli, config: &OnboardingConfig) -> Result<Self> {
        let settings_path: PathBuf = cli
            .settings
            .clone()
            .unwrap_or_else(|| config.settings_path());
        let settings = Arc::new(FileSettings::open(&settings_path)?);

        let entities = match &cli.entities {
            Some(path) => StaticEntityRegistry::load(path)?,
            None => config.entity_registry()?,
        };
        let entities = Arc::new(entities);
        let catalog = config.message_catalog()?;

        debug!(
            settings = %settings_path.display(),
            entities = entities.len(),
            "loaded onboarding session"
        );

        let flow = OnboardingFlow::with_parts(
            settings.clone(),
            entities.clone(),
            config.major_trackers(),
            Arc::clone(&catalog),
        );

        Ok(Self {
            format: cli.format,
            settings,
            entities,
            catalog,
            flow,
        })
    }
}

/// Render a JSON value for output
pub fn to_json(value: &serde_json::Value) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| OnboardingError::ConfigError {
        message: format!("JSON serialization failed: {}", e),
    })
}
