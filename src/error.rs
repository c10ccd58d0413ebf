//! Error types and exit codes for privacy-onboarding
//!
//! The advisors themselves never fail: "nothing to show" is always `None`.
//! Errors only come from the edges: loading config, settings, entity data,
//! or message templates.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Main error type for privacy-onboarding operations
#[derive(Error, Debug)]
pub enum OnboardingError {
    #[error("IO error at {path}: {message}")]
    IoError { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Failed to parse settings at {path}: {message}")]
    SettingsError { path: PathBuf, message: String },

    #[error("Failed to parse entity data: {message}")]
    EntityDataError { message: String },

    #[error("Malformed template {template:?}: {message}")]
    TemplateSyntax { template: String, message: String },

    #[error("Template for {kind} takes {expected} argument(s), found {found}")]
    TemplateArity {
        kind: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl OnboardingError {
    /// Convert error to the process exit code:
    /// - 0: Success
    /// - 1: IO error
    /// - 2: Config, settings or entity data could not be parsed
    /// - 3: Malformed message template
    /// - 4: Invalid command line input
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::IoError { .. } => ExitCode::from(1),
            Self::ConfigError { .. } => ExitCode::from(2),
            Self::SettingsError { .. } => ExitCode::from(2),
            Self::EntityDataError { .. } => ExitCode::from(2),
            Self::TemplateSyntax { .. } => ExitCode::from(3),
            Self::TemplateArity { .. } => ExitCode::from(3),
            Self::InvalidInput { .. } => ExitCode::from(4),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for privacy-onboarding operations
pub type Result<T> = std::result::Result<T, OnboardingError>;
