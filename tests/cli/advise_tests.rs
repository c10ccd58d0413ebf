//! Tests for the home, browse and dismiss commands

use crate::common::TestEnv;

#[test]
fn test_home_then_wait() {
    let env = TestEnv::new();

    let first = env.run_cli_json(&["home"]);
    assert_eq!(first["_type"], "home_screen_message");
    assert_eq!(first["message"]["kind"], "initial");
    assert_eq!(first["message"]["height"], 235);

    let second = env.run_cli_json(&["home"]);
    assert!(second["message"].is_null());
}

#[test]
fn test_state_persists_between_runs() {
    let env = TestEnv::new();

    let out = env.run_cli_success(&["browse", "--host", "example.com"]);
    assert!(out.starts_with("[without_trackers]"), "got: {}", out);
    assert!(env.settings_path().exists());

    let again = env.run_cli_success(&["browse", "--host", "example.org"]);
    assert_eq!(again, "No browsing message.\n");

    env.run_cli_success(&["home"]);
    let subsequent = env.run_cli_json(&["home"]);
    assert_eq!(subsequent["message"]["kind"], "subsequent");
}

#[test]
fn test_browse_resolves_tracker_domains() {
    let env = TestEnv::new();
    let json = env.run_cli_json(&[
        "browse",
        "--host",
        "news.example",
        "--tracker",
        "stats.doubleclick.net",
        "--tracker",
        "connect.facebook.net",
        "--tracker",
        "pixel.quantserve.com",
    ]);

    assert_eq!(json["_type"], "browsing_message");
    assert_eq!(json["blocked_trackers"], 3);
    assert_eq!(json["message"]["kind"], "with_two_major_trackers_and_others");
    assert_eq!(json["message"]["cta"], "High Five!");
    let text = json["message"]["message"].as_str().unwrap();
    assert!(text.starts_with("*Google, Facebook* and *1 others*"), "got: {}", text);
}

#[test]
fn test_browse_search_page() {
    let env = TestEnv::new();
    let out = env.run_cli_success(&["browse", "--host", "duckduckgo.com", "--search"]);
    assert!(out.starts_with("[after_search] height: 250"));
    assert!(out.ends_with("> Phew!\n"));
}

#[test]
fn test_browse_without_host() {
    let env = TestEnv::new();
    let json = env.run_cli_json(&["browse"]);
    assert!(json["message"].is_null());
    assert!(json["host"].is_null());
}

#[test]
fn test_dismiss_silences_everything() {
    let env = TestEnv::new();

    let dismissed = env.run_cli_json(&["dismiss"]);
    assert_eq!(dismissed["already_dismissed"], false);

    assert_eq!(env.run_cli_success(&["home"]), "No home screen message.\n");
    assert_eq!(
        env.run_cli_success(&["browse", "--host", "duckduckgo.com", "--search"]),
        "No browsing message.\n"
    );

    let again = env.run_cli_success(&["dismiss"]);
    assert_eq!(again, "Onboarding was already dismissed.\n");
}

#[test]
fn test_empty_tracker_is_rejected() {
    let env = TestEnv::new();
    let (code, stderr) = env.run_cli_failure(&["browse", "--host", "a.com", "--tracker", ""]);
    assert_eq!(code, Some(4));
    assert!(stderr.contains("tracker domain must not be empty"));
}

#[test]
fn test_corrupt_settings_file() {
    let env = TestEnv::new();
    env.add_file("state/settings.toml", "home_screen_messages_seen = \"two\"");
    let (code, stderr) = env.run_cli_failure(&["home"]);
    assert_eq!(code, Some(2));
    assert!(stderr.contains("Failed to parse settings"));
}
