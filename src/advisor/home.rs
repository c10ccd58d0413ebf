//! Home screen tips

use std::sync::Arc;

use tracing::{debug, info};

use crate::messages::{HomeScreenMessage, HomeScreenSpec, MessageCatalog};
use crate::settings::{OnboardingSettings, HOME_SCREEN_MESSAGE_CAP};

/// Picks the tip shown when the home screen appears
///
/// The first tip is shown right away. The second waits until the user has
/// seen at least one browsing tip.
pub struct HomeScreenAdvisor {
    settings: Arc<dyn OnboardingSettings>,
    catalog: Arc<MessageCatalog>,
}

impl HomeScreenAdvisor {
    pub fn new(settings: Arc<dyn OnboardingSettings>) -> Self {
        Self::with_catalog(settings, MessageCatalog::builtin())
    }

    pub fn with_catalog(settings: Arc<dyn OnboardingSettings>, catalog: Arc<MessageCatalog>) -> Self {
        Self { settings, catalog }
    }

    /// Next home screen tip, or `None` if there is nothing to show.
    ///
    /// Only a returned tip advances the counter, so calling this while
    /// waiting for a browsing tip changes nothing.
    pub fn next_home_screen_message(&self) -> Option<HomeScreenSpec> {
        let state = self.settings.snapshot();
        if state.is_dismissed || state.home_screen_messages_seen >= HOME_SCREEN_MESSAGE_CAP {
            return None;
        }

        let kind = match state.home_screen_messages_seen {
            0 => HomeScreenMessage::Initial,
            _ if state.any_browsing_shown() => HomeScreenMessage::Subsequent,
            seen => {
                debug!(seen, "waiting for a browsing tip before the next home screen tip");
                return None;
            }
        };

        if !self
            .settings
            .advance_home_screen_messages(state.home_screen_messages_seen)
        {
            return None;
        }

        info!(tip = kind.as_str(), "showing home screen tip");
        Some(self.catalog.home(kind).clone())
    }
}
