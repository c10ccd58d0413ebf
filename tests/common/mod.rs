//! Common test utilities and fixtures for privacy-onboarding integration tests
//!
//! This module provides:
//! - entity fixtures and page builders for driving the advisors
//! - `TestEnv` for running the CLI against a temporary settings file

#![allow(unused_imports)]
#![allow(dead_code)]


pub use fixtures::*;
pub use test_env::TestEnv;
