//! Home screen sequence tests

use privacy_onboarding::{HomeScreenMessage, OnboardingSettings};

use crate::common::{fresh_flow, page};

#[test]
fn test_fresh_install_sequence() {
    let (settings, flow) = fresh_flow();

    let first = flow.next_home_screen_message().expect("initial tip");
    assert_eq!(first.kind, HomeScreenMessage::Initial);
    assert!(first.message.starts_with("Next, try visiting one of your favorite sites!"));
    assert_eq!(settings.home_screen_messages_seen(), 1);

    assert!(flow.next_home_screen_message().is_none());
    assert_eq!(settings.home_screen_messages_seen(), 1);

    flow.next_browsing_message(&page("example.com", vec![]))
        .expect("without trackers tip");

    let second = flow.next_home_screen_message().expect("subsequent tip");
    assert_eq!(second.kind, HomeScreenMessage::Subsequent);
    assert!(second.message.starts_with("You’ve got this!"));
    assert_eq!(settings.home_screen_messages_seen(), 2);

    assert!(flow.next_home_screen_message().is_none());
}

#[test]
fn test_counter_never_exceeds_cap() {
    let (settings, flow) = fresh_flow();
    flow.next_browsing_message(&page("example.com", vec![]));

    for _ in 0..10 {
        flow.next_home_screen_message();
    }
    assert_eq!(settings.home_screen_messages_seen(), 2);
}

#[test]
fn test_dismiss_before_first_home_tip() {
    let (settings, flow) = fresh_flow();
    flow.dismiss();
    assert!(flow.next_home_screen_message().is_none());
    assert_eq!(settings.home_screen_messages_seen(), 0);
}
