//! Message specs and the message catalog
//!
//! Every onboarding tip is a fixed spec (dialog height hint, text and, for
//! browsing tips, a call-to-action label). Browsing texts are templates that
//! are filled in with live page data by [`BrowsingSpec::format`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{OnboardingError, Result};
use crate::template::{MessageTemplate, TemplateArg};

const CTA_PHEW: &str = "Phew!";
const CTA_GOT_IT: &str = "Got It";
const CTA_HIGH_FIVE: &str = "High Five!";

const URL_BAR_HINT: &str =
    "☝️ You can check the URL bar to see who is trying to track you when you visit a new site.";

/// Home screen tips, in the order they are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeScreenMessage {
    Initial,
    Subsequent,
}

impl HomeScreenMessage {
    pub const ALL: [HomeScreenMessage; 2] = [Self::Initial, Self::Subsequent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::Subsequent => "subsequent",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

/// Browsing tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrowsingMessage {
    AfterSearch,
    WithoutTrackers,
    SiteIsMajorTracker,
    SiteOwnedByMajorTracker,
    WithOneMajorTracker,
    WithOneMajorTrackerAndOthers,
    WithTwoMajorTrackers,
    WithTwoMajorTrackersAndOthers,
}

impl BrowsingMessage {
    pub const ALL: [BrowsingMessage; 8] = [
        Self::AfterSearch,
        Self::WithoutTrackers,
        Self::SiteIsMajorTracker,
        Self::SiteOwnedByMajorTracker,
        Self::WithOneMajorTracker,
        Self::WithOneMajorTrackerAndOthers,
        Self::WithTwoMajorTrackers,
        Self::WithTwoMajorTrackersAndOthers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AfterSearch => "after_search",
            Self::WithoutTrackers => "without_trackers",
            Self::SiteIsMajorTracker => "site_is_major_tracker",
            Self::SiteOwnedByMajorTracker => "site_owned_by_major_tracker",
            Self::WithOneMajorTracker => "with_one_major_tracker",
            Self::WithOneMajorTrackerAndOthers => "with_one_major_tracker_and_others",
            Self::WithTwoMajorTrackers => "with_two_major_trackers",
            Self::WithTwoMajorTrackersAndOthers => "with_two_major_trackers_and_others",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }

    /// Number of format arguments the message text takes
    ///
    /// - site owned by a major tracker: host, owner name, owner prevalence
    /// - one major tracker: name; with others: name, other count
    /// - two major trackers: both names; with others: both names, other count
    pub fn arity(&self) -> usize {
        match self {
            Self::AfterSearch | Self::WithoutTrackers | Self::SiteIsMajorTracker => 0,
            Self::WithOneMajorTracker => 1,
            Self::WithOneMajorTrackerAndOthers | Self::WithTwoMajorTrackers => 2,
            Self::SiteOwnedByMajorTracker | Self::WithTwoMajorTrackersAndOthers => 3,
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }
}

/// A home screen tip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeScreenSpec {
    pub kind: HomeScreenMessage,
    pub height: u32,
    pub message: String,
}

/// A browsing tip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowsingSpec {
    pub kind: BrowsingMessage,
    pub height: u32,
    pub message: String,
    pub cta: String,
}

impl BrowsingSpec {
    /// Fill in the message placeholders, keeping height and CTA.
    pub fn format(&self, args: &[TemplateArg]) -> Result<BrowsingSpec> {
        let message = MessageTemplate::parse(&self.message)?
            .render(args)
            .map_err(|err| match err {
                OnboardingError::TemplateArity {
                    expected, found, ..
                } => OnboardingError::TemplateArity {
                    kind: self.kind.as_str().to_string(),
                    expected,
                    found,
                },
                other => other,
            })?;

        Ok(BrowsingSpec {
            kind: self.kind,
            height: self.height,
            message,
            cta: self.cta.clone(),
        })
    }
}

static BUILTIN: Lazy<Arc<MessageCatalog>> = Lazy::new(|| {
    Arc::new(MessageCatalog::from_defaults().expect("built-in message templates are valid"))
});

/// All home screen and browsing specs known to the flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    home: [HomeScreenSpec; 2],
    browsing: Vec<BrowsingSpec>,
}

impl MessageCatalog {
    /// The built-in catalog, created once per process
    pub fn builtin() -> Arc<MessageCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Build the default catalog, validating every template.
    pub fn from_defaults() -> Result<Self> {
        let home = [
            HomeScreenSpec {
                kind: HomeScreenMessage::Initial,
                height: 235,
                message: "Next, try visiting one of your favorite sites!\n\nI’ll block trackers so they can’t spy on you. I’ll\nalso upgrade the security of your connection\nif possible. 🔒".to_string(),
            },
            HomeScreenSpec {
                kind: HomeScreenMessage::Subsequent,
                height: 210,
                message: "You’ve got this!\n\nRemember: every time you browse with me a\ncreepy ad loses its wings. 👍".to_string(),
            },
        ];

        let browsing = BrowsingMessage::ALL
            .into_iter()
            .map(|kind| {
                let (height, message, cta) = default_browsing_text(kind);
                BrowsingSpec {
                    kind,
                    height,
                    message,
                    cta: cta.to_string(),
                }
            })
            .collect();

        let catalog = Self { home, browsing };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn home(&self, kind: HomeScreenMessage) -> &HomeScreenSpec {
        match kind {
            HomeScreenMessage::Initial => &self.home[0],
            HomeScreenMessage::Subsequent => &self.home[1],
        }
    }

    pub fn browsing(&self, kind: BrowsingMessage) -> &BrowsingSpec {
        &self.browsing[kind.index()]
    }

    pub fn home_specs(&self) -> impl Iterator<Item = &HomeScreenSpec> {
        self.home.iter()
    }

    pub fn browsing_specs(&self) -> impl Iterator<Item = &BrowsingSpec> {
        self.browsing.iter()
    }

    /// Return a copy of this catalog with `overrides` applied.
    ///
    /// Unknown message names and templates whose placeholder count does not
    /// match the message kind are rejected.
    pub fn with_overrides(&self, overrides: &CatalogOverrides) -> Result<Self> {
        let mut catalog = self.clone();

        for (name, patch) in &overrides.home {
            let kind = HomeScreenMessage::from_name(name).ok_or_else(|| {
                OnboardingError::ConfigError {
                    message: format!("unknown home screen message '{}'", name),
                }
            })?;
            let spec = match kind {
                HomeScreenMessage::Initial => &mut catalog.home[0],
                HomeScreenMessage::Subsequent => &mut catalog.home[1],
            };
            if let Some(message) = &patch.message {
                spec.message = message.clone();
            }
            if let Some(height) = patch.height {
                spec.height = height;
            }
        }

        for (name, patch) in &overrides.browsing {
            let kind = BrowsingMessage::from_name(name).ok_or_else(|| {
                OnboardingError::ConfigError {
                    message: format!("unknown browsing message '{}'", name),
                }
            })?;
            let spec = &mut catalog.browsing[kind.index()];
            if let Some(message) = &patch.message {
                spec.message = message.clone();
            }
            if let Some(cta) = &patch.cta {
                spec.cta = cta.clone();
            }
            if let Some(height) = patch.height {
                spec.height = height;
            }
        }

        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for spec in &self.browsing {
            let template = MessageTemplate::parse(&spec.message)?;
            if template.arity() != spec.kind.arity() {
                return Err(OnboardingError::TemplateArity {
                    kind: spec.kind.as_str().to_string(),
                    expected: spec.kind.arity(),
                    found: template.arity(),
                });
            }
        }
        Ok(())
    }
}

fn default_browsing_text(kind: BrowsingMessage) -> (u32, String, &'static str) {
    match kind {
        BrowsingMessage::AfterSearch => (
            250,
            "Your searches here are anonymous and I never store your search history. Ever. 🙌"
                .to_string(),
            CTA_PHEW,
        ),
        BrowsingMessage::WithoutTrackers => (
            250,
            "As you tap and scroll, I’ll block pesky trackers.\n\nGo ahead, keep browsing!"
                .to_string(),
            CTA_GOT_IT,
        ),
        BrowsingMessage::SiteIsMajorTracker => (
            340,
            "Heads up! This site belongs to a major tracking network.\n\nTheir trackers lurk on many of the top websites 😱 but don’t worry!\n\nI’ll block them from seeing your activity on those sites."
                .to_string(),
            CTA_GOT_IT,
        ),
        BrowsingMessage::SiteOwnedByMajorTracker => (
            340,
            "Heads up! {0} is owned by {1}.\n\n{1}’s trackers lurk on about {2}% of top websites 😱 but don’t worry!\n\nI’ll block {1} from seeing your activity on those sites."
                .to_string(),
            CTA_GOT_IT,
        ),
        BrowsingMessage::WithOneMajorTracker => (
            250,
            format!("*{{0}}* was trying to track you here.\n\nI blocked them!\n\n{}", URL_BAR_HINT),
            CTA_HIGH_FIVE,
        ),
        BrowsingMessage::WithOneMajorTrackerAndOthers => (
            250,
            format!(
                "*{{0}} and {{1}} others* were trying to track you here.\n\nI blocked them!\n\n{}",
                URL_BAR_HINT
            ),
            CTA_HIGH_FIVE,
        ),
        BrowsingMessage::WithTwoMajorTrackers => (
            250,
            format!(
                "*{{0}} and {{1}}* were trying to track you here.\n\nI blocked them!\n\n{}",
                URL_BAR_HINT
            ),
            CTA_HIGH_FIVE,
        ),
        BrowsingMessage::WithTwoMajorTrackersAndOthers => (
            340,
            format!(
                "*{{0}}, {{1}}* and *{{2}} others* were trying to track you here.\n\nI blocked them!\n\n{}",
                URL_BAR_HINT
            ),
            CTA_HIGH_FIVE,
        ),
    }
}

/// Text replacements for the catalog, keyed by message name
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogOverrides {
    #[serde(default)]
    pub home: BTreeMap<String, SpecOverride>,
    #[serde(default)]
    pub browsing: BTreeMap<String, SpecOverride>,
}

/// Replacement fields for one spec; missing fields keep their default
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecOverride {
    pub message: Option<String>,
    pub cta: Option<String>,
    pub height: Option<u32>,
}

impl CatalogOverrides {
    /// Load overrides from a TOML file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| OnboardingError::io(path, e))?;
        toml::from_str(&content).map_err(|e| OnboardingError::ConfigError {
            message: format!("Failed to parse message catalog {}: {}", path.display(), e),
        })
    }
}
