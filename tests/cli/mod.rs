//! CLI command integration tests
//!
//! Run the binary against a temporary settings file, one trigger per
//! invocation, and check both output formats.

pub mod advise_tests;
pub mod status_tests;
