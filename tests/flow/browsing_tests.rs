//! Browsing rule chain tests

use privacy_onboarding::{
    BrowsingMessage, OnboardingSettings, PageFacts, ShownFlag, TrackerHit,
};

use crate::common::{facebook, flow_with_majors, fresh_flow, google, hit, minor, page};

#[test]
fn test_after_search_only_once() {
    let (settings, flow) = fresh_flow();
    let search = PageFacts::search_results("duckduckgo.com");

    let spec = flow.next_browsing_message(&search).expect("after search tip");
    assert_eq!(spec.kind, BrowsingMessage::AfterSearch);
    assert_eq!(spec.height, 250);
    assert_eq!(spec.cta, "Phew!");
    assert!(settings.is_shown(ShownFlag::AfterSearch));

    assert!(flow.next_browsing_message(&search).is_none());
    assert!(flow
        .next_browsing_message(&PageFacts::search_results("duckduckgo.com"))
        .is_none());
}

#[test]
fn test_two_majors_and_others() {
    let (settings, flow) = flow_with_majors(&["majora.com", "majorb.com"]);
    let major_a = privacy_onboarding::Entity::new("MajorA", ["majora.com"], Some(80.0));
    let major_b = privacy_onboarding::Entity::new("MajorB", ["majorb.com"], Some(40.0));
    let trackers = vec![
        hit(&minor("One")),
        hit(&major_b),
        hit(&minor("Two")),
        hit(&major_a),
        hit(&minor("Three")),
    ];
    let facts = page("news.example", trackers);

    let spec = flow.next_browsing_message(&facts).expect("tracker tip");
    assert_eq!(spec.kind, BrowsingMessage::WithTwoMajorTrackersAndOthers);
    assert!(spec
        .message
        .starts_with("*MajorA, MajorB* and *3 others* were trying to track you here."));
    assert_eq!(spec.cta, "High Five!");
    assert!(settings.is_shown(ShownFlag::WithTrackers));

    assert!(flow.next_browsing_message(&facts).is_none());
}

#[test]
fn test_three_majors_show_nothing() {
    let (settings, flow) = flow_with_majors(&["majora.com", "majorb.com", "majorc.com"]);
    let trackers = vec![
        hit(&privacy_onboarding::Entity::new("MajorA", ["majora.com"], Some(1.0))),
        hit(&privacy_onboarding::Entity::new("MajorB", ["majorb.com"], Some(2.0))),
        hit(&privacy_onboarding::Entity::new("MajorC", ["majorc.com"], Some(3.0))),
    ];

    assert!(flow
        .next_browsing_message(&page("news.example", trackers))
        .is_none());
    assert!(!settings.is_shown(ShownFlag::WithTrackers));
    assert!(!settings.any_browsing_shown());
}

#[test]
fn test_duplicate_hits_count_once() {
    let (_, flow) = fresh_flow();
    let trackers = vec![hit(&google()), hit(&google()), hit(&facebook())];
    let spec = flow
        .next_browsing_message(&page("news.example", trackers))
        .unwrap();
    assert_eq!(spec.kind, BrowsingMessage::WithTwoMajorTrackers);
    assert!(spec.message.starts_with("*Google and Facebook* were trying"));
}

#[test]
fn test_one_major_and_others() {
    let (_, flow) = fresh_flow();
    let trackers = vec![
        hit(&minor("Quantcast")),
        hit(&facebook()),
        TrackerHit::new("unknown.example", None),
        hit(&minor("Criteo")),
    ];
    let spec = flow
        .next_browsing_message(&page("news.example", trackers))
        .unwrap();
    assert_eq!(spec.kind, BrowsingMessage::WithOneMajorTrackerAndOthers);
    assert!(spec.message.starts_with("*Facebook and 2 others* were trying"));
}

#[test]
fn test_only_minor_trackers_show_nothing() {
    let (settings, flow) = fresh_flow();
    let trackers = vec![hit(&minor("Quantcast"))];
    assert!(flow
        .next_browsing_message(&page("news.example", trackers))
        .is_none());
    assert!(!settings.is_shown(ShownFlag::WithTrackers));
}

#[test]
fn test_site_owned_by_major_tracker_uses_entity_data() {
    let (settings, flow) = fresh_flow();
    let spec = flow
        .next_browsing_message(&page("www.instagram.com", vec![hit(&facebook())]))
        .unwrap();
    assert_eq!(spec.kind, BrowsingMessage::SiteOwnedByMajorTracker);
    assert!(spec
        .message
        .starts_with("Heads up! instagram.com is owned by Facebook."));
    assert!(spec.message.contains("about 40% of top websites"));
    assert!(settings.is_shown(ShownFlag::OwnedByMajorTrackingSite));
    assert!(!settings.is_shown(ShownFlag::WithTrackers));
}

#[test]
fn test_major_tracker_site_beats_trackers() {
    let (settings, flow) = fresh_flow();
    let spec = flow
        .next_browsing_message(&page("www.facebook.com", vec![hit(&google())]))
        .unwrap();
    assert_eq!(spec.kind, BrowsingMessage::SiteIsMajorTracker);

    // Rule already fired: no fall-through to the tracker tip
    assert!(flow
        .next_browsing_message(&page("www.facebook.com", vec![hit(&google())]))
        .is_none());
    assert!(!settings.is_shown(ShownFlag::WithTrackers));
}

#[test]
fn test_every_kind_once_in_a_session() {
    let (settings, flow) = fresh_flow();
    let visits = [
        PageFacts::search_results("duckduckgo.com"),
        page("google.com", vec![]),
        page("youtube.com", vec![]),
        page("example.com", vec![]),
        page("news.example", vec![hit(&google())]),
    ];

    let kinds: Vec<BrowsingMessage> = visits
        .iter()
        .filter_map(|facts| flow.next_browsing_message(facts))
        .map(|spec| spec.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            BrowsingMessage::AfterSearch,
            BrowsingMessage::SiteIsMajorTracker,
            BrowsingMessage::SiteOwnedByMajorTracker,
            BrowsingMessage::WithoutTrackers,
            BrowsingMessage::WithOneMajorTracker,
        ]
    );
    for flag in ShownFlag::ALL {
        assert!(settings.is_shown(flag), "{} should be set", flag.as_str());
    }

    assert!(visits
        .iter()
        .all(|facts| flow.next_browsing_message(facts).is_none()));
}
