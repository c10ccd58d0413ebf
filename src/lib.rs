//! privacy-onboarding: contextual tip selection for first-run onboarding
//!
//! Decides, when the home screen appears or a page finishes loading, whether
//! to show an onboarding tip, which one, and with what text. Decisions depend
//! on persisted "already shown" flags and on facts about the current page:
//! its host, whether it is a search results page, and which trackers were
//! blocked on it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use privacy_onboarding::{
//!     BrowsingMessage, Entity, InMemorySettings, OnboardingFlow, PageFacts,
//!     StaticEntityRegistry, TrackerHit,
//! };
//!
//! let google = Entity::new("Google", ["google.com"], Some(80.0));
//! let entities = Arc::new(StaticEntityRegistry::new(vec![google.clone()]));
//! let flow = OnboardingFlow::new(Arc::new(InMemorySettings::new()), entities);
//!
//! let page = PageFacts::for_host("example.com")
//!     .with_trackers(vec![TrackerHit::new("google-analytics.com", Some(google))]);
//! let tip = flow.next_browsing_message(&page).unwrap();
//! assert_eq!(tip.kind, BrowsingMessage::WithOneMajorTracker);
//!
//! // Each tip is shown once per installation
//! assert!(flow.next_browsing_message(&page).is_none());
//! ```

pub mod advisor;
pub mod cli;
pub mod commands;
pub mod config;
pub mod entity;
pub mod error;
pub mod fs_utils;
pub mod messages;
pub mod page;
pub mod settings;
pub mod template;
pub mod trackers;

// Re-export commonly used types
pub use advisor::{BrowsingAdvisor, HomeScreenAdvisor, OnboardingFlow};
pub use config::OnboardingConfig;
pub use entity::{Entity, EntityRegistry, StaticEntityRegistry};
pub use error::{OnboardingError, Result};
pub use messages::{
    BrowsingMessage, BrowsingSpec, CatalogOverrides, HomeScreenMessage, HomeScreenSpec,
    MessageCatalog,
};
pub use page::{PageFacts, TrackerHit};
pub use settings::{FileSettings, InMemorySettings, OnboardingSettings, SettingsState, ShownFlag};
pub use template::{MessageTemplate, TemplateArg};
pub use trackers::{MajorTrackerRegistry, TrackerShape, TrackerSummary};
