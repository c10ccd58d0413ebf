//! Browsing tips
//!
//! Rules are checked in a fixed order and the first one that applies to the
//! page decides the outcome. If that rule's tip was already shown the call
//! returns `None`; it never falls through to a later rule.
//!
//! | order | rule | tip | flag |
//! |---|---|---|---|
//! | 1 | search results page | after_search | browsing_after_search_shown |
//! | 2 | site is a major tracker | site_is_major_tracker | browsing_major_tracking_site_shown |
//! | 3 | site owned by a major tracker | site_owned_by_major_tracker | browsing_owned_by_major_tracking_site_shown |
//! | 4 | no trackers blocked | without_trackers | browsing_without_trackers_shown |
//! | 5 | trackers blocked | with_*_major_tracker* | browsing_with_trackers_shown |

use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::{debug, error, info};

use crate::entity::{normalize_host, Entity, EntityRegistry};
use crate::messages::{BrowsingMessage, BrowsingSpec, MessageCatalog};
use crate::page::PageFacts;
use crate::settings::{OnboardingSettings, ShownFlag};
use crate::template::TemplateArg;
use crate::trackers::{MajorTrackerRegistry, TrackerSummary};

type Selection = (BrowsingMessage, Vec<TemplateArg>);

/// Page facts plus lazily computed lookups shared by the rules
struct PageContext<'a> {
    host: String,
    facts: &'a PageFacts,
    majors: &'a MajorTrackerRegistry,
    entities: &'a dyn EntityRegistry,
    owner: OnceCell<Option<Entity>>,
}

impl<'a> PageContext<'a> {
    fn owner(&self) -> Option<&Entity> {
        self.owner
            .get_or_init(|| self.entities.find_owning_entity(&self.host))
            .as_ref()
    }

    fn bare_host(&self) -> &str {
        self.host.strip_prefix("www.").unwrap_or(&self.host)
    }
}

struct BrowsingRule {
    name: &'static str,
    guard: ShownFlag,
    applies: fn(&PageContext) -> bool,
    select: fn(&PageContext) -> Option<Selection>,
}

static RULES: [BrowsingRule; 5] = [
    BrowsingRule {
        name: "search_results_page",
        guard: ShownFlag::AfterSearch,
        applies: is_search_page,
        select: select_after_search,
    },
    BrowsingRule {
        name: "site_is_major_tracker",
        guard: ShownFlag::MajorTrackingSite,
        applies: is_major_tracker_site,
        select: select_site_is_major_tracker,
    },
    BrowsingRule {
        name: "site_owned_by_major_tracker",
        guard: ShownFlag::OwnedByMajorTrackingSite,
        applies: is_owned_by_major_tracker,
        select: select_site_owned_by_major_tracker,
    },
    BrowsingRule {
        name: "no_trackers_blocked",
        guard: ShownFlag::WithoutTrackers,
        applies: has_no_trackers,
        select: select_without_trackers,
    },
    BrowsingRule {
        name: "trackers_blocked",
        guard: ShownFlag::WithTrackers,
        applies: has_trackers,
        select: select_with_trackers,
    },
];

fn is_search_page(ctx: &PageContext) -> bool {
    ctx.facts.is_search_results_page
}

fn is_major_tracker_site(ctx: &PageContext) -> bool {
    ctx.majors.contains_host(&ctx.host)
}

fn is_owned_by_major_tracker(ctx: &PageContext) -> bool {
    ctx.owner().is_some_and(|owner| ctx.majors.is_major_entity(owner))
}

fn has_no_trackers(ctx: &PageContext) -> bool {
    ctx.facts.blocked_trackers.is_empty()
}

fn has_trackers(ctx: &PageContext) -> bool {
    !ctx.facts.blocked_trackers.is_empty()
}

fn select_after_search(_: &PageContext) -> Option<Selection> {
    Some((BrowsingMessage::AfterSearch, Vec::new()))
}

fn select_site_is_major_tracker(_: &PageContext) -> Option<Selection> {
    Some((BrowsingMessage::SiteIsMajorTracker, Vec::new()))
}

fn select_site_owned_by_major_tracker(ctx: &PageContext) -> Option<Selection> {
    let owner = ctx.owner()?;
    Some((
        BrowsingMessage::SiteOwnedByMajorTracker,
        vec![
            ctx.bare_host().into(),
            owner.display_name.as_str().into(),
            TemplateArg::Percent(owner.prevalence_or_zero()),
        ],
    ))
}

fn select_without_trackers(_: &PageContext) -> Option<Selection> {
    Some((BrowsingMessage::WithoutTrackers, Vec::new()))
}

fn select_with_trackers(ctx: &PageContext) -> Option<Selection> {
    TrackerSummary::aggregate(&ctx.facts.blocked_trackers, ctx.majors).selection()
}

/// Picks the tip shown after a page finishes loading
pub struct BrowsingAdvisor {
    settings: Arc<dyn OnboardingSettings>,
    entities: Arc<dyn EntityRegistry>,
    majors: MajorTrackerRegistry,
    catalog: Arc<MessageCatalog>,
}

impl BrowsingAdvisor {
    /// Advisor with the default major tracker list and built-in messages
    pub fn new(settings: Arc<dyn OnboardingSettings>, entities: Arc<dyn EntityRegistry>) -> Self {
        Self {
            settings,
            entities,
            majors: MajorTrackerRegistry::default(),
            catalog: MessageCatalog::builtin(),
        }
    }

    pub fn with_major_trackers(mut self, majors: MajorTrackerRegistry) -> Self {
        self.majors = majors;
        self
    }

    pub fn with_catalog(mut self, catalog: Arc<MessageCatalog>) -> Self {
        self.catalog = catalog;
        self
    }

    /// Next browsing tip for this page load, or `None`.
    pub fn next_browsing_message(&self, facts: &PageFacts) -> Option<BrowsingSpec> {
        let host = facts
            .host
            .as_deref()
            .map(normalize_host)
            .filter(|host| !host.is_empty());
        let Some(host) = host else {
            debug!("page has no host, skipping browsing tip");
            return None;
        };
        if self.settings.is_dismissed() {
            return None;
        }

        let ctx = PageContext {
            host,
            facts,
            majors: &self.majors,
            entities: self.entities.as_ref(),
            owner: OnceCell::new(),
        };

        let rule = RULES.iter().find(|rule| (rule.applies)(&ctx))?;
        if self.settings.is_shown(rule.guard) {
            debug!(rule = rule.name, host = %ctx.host, "tip for this rule already shown");
            return None;
        }

        let Some((kind, args)) = (rule.select)(&ctx) else {
            debug!(rule = rule.name, host = %ctx.host, "no tip for this page shape");
            return None;
        };

        let spec = match self.catalog.browsing(kind).format(&args) {
            Ok(spec) => spec,
            Err(e) => {
                error!(tip = kind.as_str(), error = %e, "failed to format browsing tip");
                return None;
            }
        };

        if !self.settings.mark_shown(rule.guard) {
            return None;
        }
        info!(rule = rule.name, tip = kind.as_str(), host = %ctx.host, "showing browsing tip");
        Some(spec)
    }

    /// End the onboarding flow for good; both advisors go quiet.
    pub fn dismiss(&self) {
        self.settings.dismiss();
        info!("onboarding dismissed");
    }
}
