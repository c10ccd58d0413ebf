//! Status command handlers - stored state and the active message catalog

use crate::cli::OutputFormat;
use crate::commands::{to_json, CommandContext};
use crate::error::Result;
use crate::settings::{OnboardingSettings, ShownFlag, HOME_SCREEN_MESSAGE_CAP};

/// Show the stored onboarding state
pub fn run_status(ctx: &CommandContext) -> Result<String> {
    let state = ctx.settings.snapshot();

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "_type": "onboarding_status",
            "settings_file": ctx.settings.path().to_string_lossy(),
            "entities": ctx.entities.len(),
            "state": state,
        })),
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str(&format!("settings_file: {}\n", ctx.settings.path().display()));
            output.push_str(&format!("entities: {}\n", ctx.entities.len()));
            output.push_str(&format!("is_dismissed: {}\n", state.is_dismissed));
            output.push_str(&format!(
                "home_screen_messages_seen: {}/{}\n",
                state.home_screen_messages_seen, HOME_SCREEN_MESSAGE_CAP
            ));
            for flag in ShownFlag::ALL {
                output.push_str(&format!("{}: {}\n", flag.as_str(), state.is_shown(flag)));
            }
            Ok(output)
        }
    }
}

/// List the active message catalog
pub fn run_messages(ctx: &CommandContext) -> Result<String> {
    let home: Vec<_> = ctx.catalog.home_specs().collect();
    let browsing: Vec<_> = ctx.catalog.browsing_specs().collect();

    match ctx.format {
        OutputFormat::Json => to_json(&serde_json::json!({
            "_type": "message_catalog",
            "home": home,
            "browsing": browsing,
        })),
        OutputFormat::Text => {
            let mut output = String::new();
            output.push_str("home:\n");
            for spec in home {
                output.push_str(&format!("  - {} (height {})\n", spec.kind.as_str(), spec.height));
            }
            output.push_str("browsing:\n");
            for spec in browsing {
                output.push_str(&format!(
                    "  - {} (height {}, cta {:?}, args {})\n",
                    spec.kind.as_str(),
                    spec.height,
                    spec.cta,
                    spec.kind.arity()
                ));
            }
            Ok(output)
        }
    }
}
