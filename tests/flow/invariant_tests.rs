//! Delivery guarantees over long call sequences

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use privacy_onboarding::{
    InMemorySettings, OnboardingFlow, OnboardingSettings, PageFacts, SettingsState, ShownFlag,
};

use crate::common::{entity_registry, facebook, fresh_flow, google, hit, minor, page};

fn visits() -> Vec<PageFacts> {
    vec![
        page("example.com", vec![]),
        PageFacts::search_results("duckduckgo.com"),
        page("news.example", vec![hit(&google()), hit(&minor("Quantcast"))]),
        page("maps.google.com", vec![]),
        page("instagram.com", vec![hit(&facebook())]),
        PageFacts::default(),
        page("shop.example", vec![hit(&google()), hit(&facebook())]),
    ]
}

#[test]
fn test_flags_are_monotone() {
    let (settings, flow) = fresh_flow();
    let mut previous = settings.snapshot();

    for round in 0..3 {
        for facts in visits() {
            flow.next_browsing_message(&facts);
            flow.next_home_screen_message();

            let current = settings.snapshot();
            for flag in ShownFlag::ALL {
                assert!(
                    !previous.is_shown(flag) || current.is_shown(flag),
                    "{} reverted in round {}",
                    flag.as_str(),
                    round
                );
            }
            assert!(current.home_screen_messages_seen >= previous.home_screen_messages_seen);
            assert!(current.home_screen_messages_seen <= 2);
            previous = current;
        }
    }
}

#[test]
fn test_each_kind_delivered_at_most_once() {
    let (_, flow) = fresh_flow();
    let mut delivered = Vec::new();
    for _ in 0..4 {
        for facts in visits() {
            if let Some(spec) = flow.next_browsing_message(&facts) {
                delivered.push(spec.kind);
            }
        }
    }

    let unique: HashSet<_> = delivered.iter().collect();
    assert_eq!(delivered.len(), unique.len());
    assert!(delivered.len() <= 5);
}

#[test]
fn test_dismiss_is_final() {
    let (settings, flow) = fresh_flow();
    flow.next_home_screen_message();
    flow.dismiss();
    let before = settings.snapshot();

    for facts in visits() {
        assert!(flow.next_browsing_message(&facts).is_none());
        assert!(flow.next_home_screen_message().is_none());
    }
    assert_eq!(settings.snapshot(), before);
    assert!(before.is_dismissed);
}

#[test]
fn test_dismissed_state_from_storage_is_inert() {
    let settings = Arc::new(InMemorySettings::with_state(SettingsState {
        is_dismissed: true,
        ..Default::default()
    }));
    let flow = OnboardingFlow::new(settings, entity_registry());
    assert!(flow.next_home_screen_message().is_none());
    assert!(flow
        .next_browsing_message(&PageFacts::search_results("duckduckgo.com"))
        .is_none());
}

#[test]
fn test_concurrent_page_loads_deliver_once() {
    let settings = Arc::new(InMemorySettings::new());
    let flow = Arc::new(OnboardingFlow::new(settings.clone(), entity_registry()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let flow = Arc::clone(&flow);
            thread::spawn(move || {
                flow.next_browsing_message(&page("example.com", vec![]))
                    .is_some()
            })
        })
        .collect();

    let shown = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|shown| *shown)
        .count();
    assert_eq!(shown, 1);
    assert!(settings.is_shown(ShownFlag::WithoutTrackers));
}
