//! Tracker-company reference data
//!
//! An [`Entity`] is a company that owns one or more tracker domains. The
//! [`EntityRegistry`] trait answers "who owns this host"; the bundled
//! [`StaticEntityRegistry`] answers it from a JSON file of the form
//!
//! ```json
//! { "entities": [ { "displayName": "Google", "domains": ["google.com"], "prevalence": 80.0 } ] }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{OnboardingError, Result};
use crate::page::TrackerHit;

/// A company owning tracker domains
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub display_name: String,
    #[serde(default)]
    pub domains: BTreeSet<String>,
    /// Share of top sites carrying this entity's trackers, in percent
    #[serde(default)]
    pub prevalence: Option<f64>,
}

impl Entity {
    pub fn new<I, S>(display_name: &str, domains: I, prevalence: Option<f64>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            display_name: display_name.to_string(),
            domains: domains.into_iter().map(Into::into).collect(),
            prevalence,
        }
    }

    /// Prevalence with unknown treated as zero
    pub fn prevalence_or_zero(&self) -> f64 {
        self.prevalence.unwrap_or(0.0)
    }
}

/// Owner lookup for hosts
pub trait EntityRegistry: Send + Sync {
    fn find_owning_entity(&self, host: &str) -> Option<Entity>;
}

/// Lowercase, drop a trailing dot
pub fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}

/// The host itself followed by each parent domain that still has a dot.
///
/// `a.b.example.com` yields `a.b.example.com`, `b.example.com`, `example.com`.
pub fn host_and_parents(host: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(host);
    std::iter::from_fn(move || {
        let current = next?;
        next = current
            .split_once('.')
            .map(|(_, rest)| rest)
            .filter(|rest| rest.contains('.'));
        Some(current)
    })
}

#[derive(Debug, Deserialize)]
struct EntityFile {
    #[serde(default)]
    entities: Vec<Entity>,
}

/// Entity registry built from a fixed list
#[derive(Debug, Clone, Default)]
pub struct StaticEntityRegistry {
    entities: Vec<Entity>,
    by_domain: AHashMap<String, usize>,
}

impl StaticEntityRegistry {
    pub fn new(entities: Vec<Entity>) -> Self {
        let mut by_domain = AHashMap::new();
        for (index, entity) in entities.iter().enumerate() {
            for domain in &entity.domains {
                let domain = normalize_host(domain);
                if let Some(existing) = by_domain.get(&domain) {
                    let owner: &Entity = &entities[*existing];
                    warn!(
                        domain = %domain,
                        owner = %owner.display_name,
                        ignored = %entity.display_name,
                        "domain claimed by two entities, keeping the first"
                    );
                    continue;
                }
                by_domain.insert(domain, index);
            }
        }
        Self {
            entities,
            by_domain,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: EntityFile =
            serde_json::from_str(json).map_err(|e| OnboardingError::EntityDataError {
                message: e.to_string(),
            })?;
        Ok(Self::new(file.entities))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| OnboardingError::io(path, e))?;
        let registry = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            entities = registry.len(),
            "loaded entity data"
        );
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Build a blocked-tracker hit for `domain`, resolving its owner if known.
    pub fn resolve_tracker(&self, domain: &str) -> TrackerHit {
        TrackerHit {
            domain: normalize_host(domain),
            entity: self.find_owning_entity(domain),
        }
    }
}

impl EntityRegistry for StaticEntityRegistry {
    fn find_owning_entity(&self, host: &str) -> Option<Entity> {
        let host = normalize_host(host);
        let owner = host_and_parents(&host)
            .find_map(|candidate| self.by_domain.get(candidate))
            .map(|index| self.entities[*index].clone());
        owner
    }
}
