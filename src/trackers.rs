//! Major-tracker classification and blocked-tracker aggregation

use std::cmp::Reverse;

use ahash::AHashSet;
use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::entity::{normalize_host, Entity};
use crate::messages::BrowsingMessage;
use crate::page::TrackerHit;
use crate::template::TemplateArg;

/// Domains of the dominant tracking networks
pub const DEFAULT_MAJOR_DOMAINS: [&str; 2] = ["facebook.com", "google.com"];

/// Curated list of major tracking network domains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MajorTrackerRegistry {
    domains: Vec<String>,
}

impl Default for MajorTrackerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAJOR_DOMAINS)
    }
}

impl MajorTrackerRegistry {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self {
            domains: Vec::new(),
        };
        registry.extend(domains);
        registry
    }

    /// Add domains, skipping blanks and duplicates
    pub fn extend<I, S>(&mut self, domains: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for domain in domains {
            let domain = normalize_host(domain.as_ref());
            if !domain.is_empty() && !self.domains.contains(&domain) {
                self.domains.push(domain);
            }
        }
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Host equals a major domain or is one of its subdomains
    pub fn contains_host(&self, host: &str) -> bool {
        let host = normalize_host(host);
        self.domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Entity owns at least one major domain
    pub fn is_major_entity(&self, entity: &Entity) -> bool {
        entity
            .domains
            .iter()
            .any(|domain| self.domains.contains(&normalize_host(domain)))
    }
}

/// Count buckets with a message template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerShape {
    OneMajor,
    OneMajorAndOthers,
    TwoMajor,
    TwoMajorAndOthers,
}

impl TrackerShape {
    /// Bucket for the given counts; `None` for shapes without a message
    pub fn from_counts(major: usize, other: usize) -> Option<Self> {
        match (major, other) {
            (1, 0) => Some(Self::OneMajor),
            (1, _) => Some(Self::OneMajorAndOthers),
            (2, 0) => Some(Self::TwoMajor),
            (2, _) => Some(Self::TwoMajorAndOthers),
            _ => None,
        }
    }

    pub fn message(&self) -> BrowsingMessage {
        match self {
            Self::OneMajor => BrowsingMessage::WithOneMajorTracker,
            Self::OneMajorAndOthers => BrowsingMessage::WithOneMajorTrackerAndOthers,
            Self::TwoMajor => BrowsingMessage::WithTwoMajorTrackers,
            Self::TwoMajorAndOthers => BrowsingMessage::WithTwoMajorTrackersAndOthers,
        }
    }
}

/// Blocked trackers grouped by owner
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerSummary {
    /// Major entities, highest prevalence first
    pub major: Vec<Entity>,
    pub other: Vec<Entity>,
}

impl TrackerSummary {
    /// Deduplicate `hits` by owning entity and split into major and other.
    ///
    /// Hits without a known owner are dropped.
    pub fn aggregate(hits: &[TrackerHit], registry: &MajorTrackerRegistry) -> Self {
        let mut seen = AHashSet::new();
        let mut summary = Self::default();

        for entity in hits.iter().filter_map(|hit| hit.entity.as_ref()) {
            if !seen.insert(entity.display_name.as_str()) {
                continue;
            }
            if registry.is_major_entity(entity) {
                summary.major.push(entity.clone());
            } else {
                summary.other.push(entity.clone());
            }
        }

        summary
            .major
            .sort_by_key(|entity| Reverse(OrderedFloat(entity.prevalence_or_zero())));
        summary
    }

    pub fn shape(&self) -> Option<TrackerShape> {
        TrackerShape::from_counts(self.major.len(), self.other.len())
    }

    /// Message and format arguments for this summary, if its shape has one
    pub fn selection(&self) -> Option<(BrowsingMessage, Vec<TemplateArg>)> {
        let shape = self.shape()?;
        let name = |i: usize| TemplateArg::from(self.major[i].display_name.as_str());
        let others = TemplateArg::Count(self.other.len());

        let args = match shape {
            TrackerShape::OneMajor => vec![name(0)],
            TrackerShape::OneMajorAndOthers => vec![name(0), others],
            TrackerShape::TwoMajor => vec![name(0), name(1)],
            TrackerShape::TwoMajorAndOthers => vec![name(0), name(1), others],
        };
        Some((shape.message(), args))
    }
}
