//! Library-level flow tests
//!
//! Drive `OnboardingFlow` through realistic call sequences and check the
//! delivery guarantees: each tip at most once, the home counter cap, and
//! dismissal being final.

pub mod browsing_tests;
pub mod home_tests;
pub mod invariant_tests;
