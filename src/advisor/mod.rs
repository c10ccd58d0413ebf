//! Onboarding advisors
//!
//! - `home` - tips shown when the home screen appears
//! - `browsing` - tips shown after a page load
//!
//! [`OnboardingFlow`] wires both advisors to one settings handle and exposes
//! the three operations a host application calls.

pub mod browsing;
pub mod home;

pub use browsing::BrowsingAdvisor;
pub use home::HomeScreenAdvisor;

use std::sync::Arc;

use crate::entity::EntityRegistry;
use crate::messages::{BrowsingSpec, HomeScreenSpec, MessageCatalog};
use crate::page::PageFacts;
use crate::settings::OnboardingSettings;
use crate::trackers::MajorTrackerRegistry;

/// Both advisors sharing one settings handle
pub struct OnboardingFlow {
    home: HomeScreenAdvisor,
    browsing: BrowsingAdvisor,
}

impl OnboardingFlow {
    pub fn new(settings: Arc<dyn OnboardingSettings>, entities: Arc<dyn EntityRegistry>) -> Self {
        Self::with_parts(
            settings,
            entities,
            MajorTrackerRegistry::default(),
            MessageCatalog::builtin(),
        )
    }

    pub fn with_parts(
        settings: Arc<dyn OnboardingSettings>,
        entities: Arc<dyn EntityRegistry>,
        majors: MajorTrackerRegistry,
        catalog: Arc<MessageCatalog>,
    ) -> Self {
        Self {
            home: HomeScreenAdvisor::with_catalog(Arc::clone(&settings), Arc::clone(&catalog)),
            browsing: BrowsingAdvisor::new(settings, entities)
                .with_major_trackers(majors)
                .with_catalog(catalog),
        }
    }

    pub fn next_home_screen_message(&self) -> Option<HomeScreenSpec> {
        self.home.next_home_screen_message()
    }

    pub fn next_browsing_message(&self, facts: &PageFacts) -> Option<BrowsingSpec> {
        self.browsing.next_browsing_message(facts)
    }

    pub fn dismiss(&self) {
        self.browsing.dismiss();
    }
}
