//! Trigger commands - home screen shown, page loaded, flow dismissed

use crate::cli::{BrowseArgs, OutputFormat};
use crate::commands::{to_json, CommandContext};
use crate::error::{OnboardingError, Result};
use crate::messages::{BrowsingSpec, HomeScreenSpec};
use crate::page::PageFacts;
use crate::settings::OnboardingSettings;

/// Run the home command
pub fn run_home(ctx: &CommandContext) -> Result<String> {
    let spec = ctx.flow.next_home_screen_message();
    format_home(spec.as_ref(), ctx.format)
}

/// Run the browse command
pub fn run_browse(args: &BrowseArgs, ctx: &CommandContext) -> Result<String> {
    let facts = page_facts(args, ctx)?;
    let spec = ctx.flow.next_browsing_message(&facts);
    format_browsing(spec.as_ref(), &facts, ctx.format)
}

/// Run the dismiss command
pub fn run_dismiss(ctx: &CommandContext) -> Result<String> {
    let already = ctx.settings.is_dismissed();
    ctx.flow.dismiss();

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "_type": "dismiss",
            "dismissed": true,
            "already_dismissed": already,
        })),
        OutputFormat::Text if already => Ok("Onboarding was already dismissed.\n".to_string()),
        OutputFormat::Text => Ok("Onboarding dismissed.\n".to_string()),
    }
}

fn page_facts(args: &BrowseArgs, ctx: &CommandContext) -> Result<PageFacts> {
    if let Some(empty) = args.trackers.iter().find(|d| d.trim().is_empty()) {
        return Err(OnboardingError::InvalidInput {
            message: format!("tracker domain must not be empty (got {:?})", empty),
        });
    }

    Ok(PageFacts {
        host: args.host.clone(),
        is_search_results_page: args.search,
        blocked_trackers: args
            .trackers
            .iter()
            .map(|domain| ctx.entities.resolve_tracker(domain))
            .collect(),
    })
}

fn format_home(spec: Option<&HomeScreenSpec>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "_type": "home_screen_message",
            "message": spec,
        })),
        OutputFormat::Text => Ok(match spec {
            Some(spec) => format!(
                "[{}] height: {}\n\n{}\n",
                spec.kind.as_str(),
                spec.height,
                spec.message
            ),
            None => "No home screen message.\n".to_string(),
        }),
    }
}

fn format_browsing(
    spec: Option<&BrowsingSpec>,
    facts: &PageFacts,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "_type": "browsing_message",
            "host": facts.host,
            "blocked_trackers": facts.blocked_trackers.len(),
            "message": spec,
        })),
        OutputFormat::Text => Ok(match spec {
            Some(spec) => format!(
                "[{}] height: {}\n\n{}\n\n> {}\n",
                spec.kind.as_str(),
                spec.height,
                spec.message,
                spec.cta
            ),
            None => "No browsing message.\n".to_string(),
        }),
    }
}
