//! Tests for the status and messages commands

use crate::common::TestEnv;

#[test]
fn test_status_of_fresh_install() {
    let env = TestEnv::new();
    let json = env.run_cli_json(&["status"]);

    assert_eq!(json["_type"], "onboarding_status");
    assert_eq!(json["entities"], 5);
    assert_eq!(json["state"]["is_dismissed"], false);
    assert_eq!(json["state"]["home_screen_messages_seen"], 0);
    assert!(!env.settings_path().exists());
}

#[test]
fn test_status_text_lists_flags() {
    let env = TestEnv::new();
    env.run_cli_success(&["browse", "--host", "duckduckgo.com", "--search"]);

    let out = env.run_cli_success(&["status"]);
    assert!(out.contains("home_screen_messages_seen: 0/2\n"));
    assert!(out.contains("browsing_after_search_shown: true\n"));
    assert!(out.contains("browsing_with_trackers_shown: false\n"));
}

#[test]
fn test_messages_lists_catalog() {
    let env = TestEnv::new();
    let json = env.run_cli_json(&["messages"]);

    assert_eq!(json["_type"], "message_catalog");
    assert_eq!(json["home"].as_array().unwrap().len(), 2);
    assert_eq!(json["browsing"].as_array().unwrap().len(), 8);
}

#[test]
fn test_catalog_override_from_config() {
    let env = TestEnv::new();
    env.add_file(
        "messages.toml",
        "[browsing.without_trackers]\nmessage = \"Nothing to block here.\"\ncta = \"OK\"\n",
    );
    let catalog = env.path().join("messages.toml");
    env.add_file(
        "config.toml",
        &format!("[messages]\ncatalog = {:?}\n", catalog.to_string_lossy()),
    );

    let json = env.run_cli_json(&["browse", "--host", "example.com"]);
    assert_eq!(json["message"]["message"], "Nothing to block here.");
    assert_eq!(json["message"]["cta"], "OK");
}

#[test]
fn test_bad_catalog_override_fails_fast() {
    let env = TestEnv::new();
    env.add_file(
        "messages.toml",
        "[browsing.with_one_major_tracker]\nmessage = \"{0} and {1}\"\n",
    );
    let catalog = env.path().join("messages.toml");
    env.add_file(
        "config.toml",
        &format!("[messages]\ncatalog = {:?}\n", catalog.to_string_lossy()),
    );

    let (code, stderr) = env.run_cli_failure(&["messages"]);
    assert_eq!(code, Some(3));
    assert!(stderr.contains("with_one_major_tracker"));
}

#[test]
fn test_custom_major_domains_from_config() {
    let env = TestEnv::new();
    env.add_file("config.toml", "[trackers]\nmajor_domains = [\"amazon.com\"]\n");

    let json = env.run_cli_json(&["browse", "--host", "www.amazon.com"]);
    assert_eq!(json["message"]["kind"], "site_is_major_tracker");
}
