//! Onboarding settings: the flow's only mutable state
//!
//! Settings belong to the host application and are handed to the advisors as
//! a shared handle. Every mutation is a check-and-set performed under one
//! lock, so a "shown" flag flips at most once even if callers race.
//!
//! Two implementations ship with the crate:
//! - [`InMemorySettings`] for embedding and tests
//! - [`FileSettings`], persisted as TOML after every change

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::{OnboardingError, Result};
use crate::fs_utils::write_atomic;

/// Maximum number of home screen tips per installation
pub const HOME_SCREEN_MESSAGE_CAP: u8 = 2;

/// One "has this browsing tip been shown" flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShownFlag {
    AfterSearch,
    WithTrackers,
    WithoutTrackers,
    MajorTrackingSite,
    OwnedByMajorTrackingSite,
}

impl ShownFlag {
    pub const ALL: [ShownFlag; 5] = [
        Self::AfterSearch,
        Self::WithTrackers,
        Self::WithoutTrackers,
        Self::MajorTrackingSite,
        Self::OwnedByMajorTrackingSite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AfterSearch => "browsing_after_search_shown",
            Self::WithTrackers => "browsing_with_trackers_shown",
            Self::WithoutTrackers => "browsing_without_trackers_shown",
            Self::MajorTrackingSite => "browsing_major_tracking_site_shown",
            Self::OwnedByMajorTrackingSite => "browsing_owned_by_major_tracking_site_shown",
        }
    }
}

/// Snapshot of every persisted onboarding value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsState {
    pub is_dismissed: bool,
    pub home_screen_messages_seen: u8,
    pub browsing_after_search_shown: bool,
    pub browsing_with_trackers_shown: bool,
    pub browsing_without_trackers_shown: bool,
    pub browsing_major_tracking_site_shown: bool,
    pub browsing_owned_by_major_tracking_site_shown: bool,
}

impl SettingsState {
    pub fn is_shown(&self, flag: ShownFlag) -> bool {
        match flag {
            ShownFlag::AfterSearch => self.browsing_after_search_shown,
            ShownFlag::WithTrackers => self.browsing_with_trackers_shown,
            ShownFlag::WithoutTrackers => self.browsing_without_trackers_shown,
            ShownFlag::MajorTrackingSite => self.browsing_major_tracking_site_shown,
            ShownFlag::OwnedByMajorTrackingSite => self.browsing_owned_by_major_tracking_site_shown,
        }
    }

    fn flag_mut(&mut self, flag: ShownFlag) -> &mut bool {
        match flag {
            ShownFlag::AfterSearch => &mut self.browsing_after_search_shown,
            ShownFlag::WithTrackers => &mut self.browsing_with_trackers_shown,
            ShownFlag::WithoutTrackers => &mut self.browsing_without_trackers_shown,
            ShownFlag::MajorTrackingSite => &mut self.browsing_major_tracking_site_shown,
            ShownFlag::OwnedByMajorTrackingSite => {
                &mut self.browsing_owned_by_major_tracking_site_shown
            }
        }
    }

    /// True once any browsing tip has been shown
    pub fn any_browsing_shown(&self) -> bool {
        ShownFlag::ALL.into_iter().any(|flag| self.is_shown(flag))
    }

    /// Set `flag`, returning whether this call flipped it.
    pub fn mark_shown(&mut self, flag: ShownFlag) -> bool {
        let slot = self.flag_mut(flag);
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    /// Move the home screen counter from `expected` to `expected + 1`.
    ///
    /// Returns false if the flow is dismissed, the counter no longer equals
    /// `expected`, or it is at the cap.
    pub fn advance_home_screen(&mut self, expected: u8) -> bool {
        if self.is_dismissed
            || self.home_screen_messages_seen != expected
            || self.home_screen_messages_seen >= HOME_SCREEN_MESSAGE_CAP
        {
            return false;
        }
        self.home_screen_messages_seen += 1;
        true
    }

    /// Returns whether this call dismissed the flow.
    pub fn dismiss(&mut self) -> bool {
        if self.is_dismissed {
            return false;
        }
        self.is_dismissed = true;
        true
    }

    fn clamp(mut self) -> Self {
        if self.home_screen_messages_seen > HOME_SCREEN_MESSAGE_CAP {
            warn!(
                seen = self.home_screen_messages_seen,
                "home screen counter above cap, clamping"
            );
            self.home_screen_messages_seen = HOME_SCREEN_MESSAGE_CAP;
        }
        self
    }
}

/// Settings boundary used by the advisors
///
/// Implementations must make each mutating call atomic: checking and setting a
/// value happen under the same lock, and the return value tells the caller
/// whether *its* call made the change.
pub trait OnboardingSettings: Send + Sync {
    /// Copy of the current values
    fn snapshot(&self) -> SettingsState;

    /// Set a shown flag; true only for the call that flipped it
    fn mark_shown(&self, flag: ShownFlag) -> bool;

    /// Advance the home screen counter from `expected`; see [`SettingsState::advance_home_screen`]
    fn advance_home_screen_messages(&self, expected: u8) -> bool;

    /// Permanently end the onboarding flow
    fn dismiss(&self);

    fn is_dismissed(&self) -> bool {
        self.snapshot().is_dismissed
    }

    fn home_screen_messages_seen(&self) -> u8 {
        self.snapshot().home_screen_messages_seen
    }

    fn is_shown(&self, flag: ShownFlag) -> bool {
        self.snapshot().is_shown(flag)
    }

    fn any_browsing_shown(&self) -> bool {
        self.snapshot().any_browsing_shown()
    }
}

/// Settings held only in memory
#[derive(Debug, Default)]
pub struct InMemorySettings {
    state: Mutex<SettingsState>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SettingsState) -> Self {
        Self {
            state: Mutex::new(state.clamp()),
        }
    }
}

impl OnboardingSettings for InMemorySettings {
    fn snapshot(&self) -> SettingsState {
        self.state.lock().clone()
    }

    fn mark_shown(&self, flag: ShownFlag) -> bool {
        self.state.lock().mark_shown(flag)
    }

    fn advance_home_screen_messages(&self, expected: u8) -> bool {
        self.state.lock().advance_home_screen(expected)
    }

    fn dismiss(&self) {
        self.state.lock().dismiss();
    }
}

/// Settings persisted to a TOML file
///
/// The file is rewritten after every change while the lock is held, so
/// writes land in the same order as the changes. A failed write leaves both
/// the file and the in-memory value unchanged.
#[derive(Debug)]
pub struct FileSettings {
    path: PathBuf,
    state: Mutex<SettingsState>,
}

impl FileSettings {
    /// Open the settings file, starting from defaults if it does not exist.
    pub fn open(path: &Path) -> Result<Self> {
        let state = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| OnboardingError::io(path, e))?;
            toml::from_str::<SettingsState>(&content)
                .map_err(|e| OnboardingError::SettingsError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?
                .clamp()
        } else {
            debug!(path = %path.display(), "no settings file yet, using defaults");
            SettingsState::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &SettingsState) -> Result<()> {
        let content = toml::to_string_pretty(state).map_err(|e| OnboardingError::ConfigError {
            message: format!("Failed to serialize settings: {}", e),
        })?;
        write_atomic(&self.path, &content).map_err(|e| OnboardingError::io(&self.path, e))
    }

    /// Apply `change` and persist it. A change that cannot be written is
    /// rolled back and reported as not made, so a tip whose flag did not
    /// reach disk is never delivered.
    fn update(&self, change: impl FnOnce(&mut SettingsState) -> bool) -> bool {
        let mut state = self.state.lock();
        let previous = state.clone();
        if !change(&mut *state) {
            return false;
        }
        if let Err(e) = self.persist(&state) {
            error!(error = %e, "failed to persist onboarding settings, change rolled back");
            *state = previous;
            return false;
        }
        true
    }
}

impl OnboardingSettings for FileSettings {
    fn snapshot(&self) -> SettingsState {
        self.state.lock().clone()
    }

    fn mark_shown(&self, flag: ShownFlag) -> bool {
        self.update(|state| state.mark_shown(flag))
    }

    fn advance_home_screen_messages(&self, expected: u8) -> bool {
        self.update(|state| state.advance_home_screen(expected))
    }

    fn dismiss(&self) {
        self.update(SettingsState::dismiss);
    }
}
