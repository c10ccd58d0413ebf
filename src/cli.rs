//! CLI argument definitions using clap with subcommand architecture
//!
//! The binary drives the onboarding flow against a persisted settings file,
//! one trigger per invocation, so the flow can be exercised from scripts.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Contextual onboarding tip selection
#[derive(Parser, Debug)]
#[command(name = "privacy-onboarding")]
#[command(about = "Decide which first-run onboarding tip to show next")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (applies to all commands)
    #[arg(short, long, default_value = "text", value_enum, global = true)]
    pub format: OutputFormat,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH", global = true, env = "PRIVACY_ONBOARDING_CONFIG")]
    pub config: Option<PathBuf>,

    /// Settings file, overriding the configured one
    #[arg(long, value_name = "PATH", global = true)]
    pub settings: Option<PathBuf>,

    /// Tracker entity JSON file, overriding the configured one
    #[arg(long, value_name = "PATH", global = true)]
    pub entities: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask for the next home screen tip
    Home,

    /// Ask for the tip after a page load
    #[command(visible_alias = "b")]
    Browse(BrowseArgs),

    /// Dismiss the onboarding flow for good
    Dismiss,

    /// Show the stored onboarding state
    Status,

    /// List the active message catalog
    Messages,
}

/// Arguments for the browse command
#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Host of the loaded page
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// The page is the app's own search results page
    #[arg(long)]
    pub search: bool,

    /// Domain of a tracker blocked on the page (repeatable)
    #[arg(long = "tracker", value_name = "DOMAIN")]
    pub trackers: Vec<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON
    Json,
}
