//! Per-page-load facts supplied by the tracker-detection subsystem

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// A tracker request blocked on the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerHit {
    pub domain: String,
    /// Owning company, when the tracker data knows it
    pub entity: Option<Entity>,
}

impl TrackerHit {
    pub fn new(domain: &str, entity: Option<Entity>) -> Self {
        Self {
            domain: domain.to_string(),
            entity,
        }
    }
}

/// What the browsing advisor knows about one completed page load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageFacts {
    pub host: Option<String>,
    /// The page is the app's own search results page
    pub is_search_results_page: bool,
    pub blocked_trackers: Vec<TrackerHit>,
}

impl PageFacts {
    pub fn for_host(host: &str) -> Self {
        Self {
            host: Some(host.to_string()),
            ..Default::default()
        }
    }

    pub fn search_results(host: &str) -> Self {
        Self {
            is_search_results_page: true,
            ..Self::for_host(host)
        }
    }

    pub fn with_trackers(mut self, trackers: Vec<TrackerHit>) -> Self {
        self.blocked_trackers = trackers;
        self
    }
}
