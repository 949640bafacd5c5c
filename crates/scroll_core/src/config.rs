use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Who owns the `is_loading` flag of a load edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum LoadingMode {
    /// The coordinator sets and clears the flag around each load.
    #[default]
    Bound,
    /// The caller toggles the flag; the coordinator only reads it.
    External,
}

/// Where a freshly mounted surface positions itself once content overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum InitialAnchor {
    #[default]
    Start,
    /// Jump to the newest content, as message lists do.
    End,
}

/// Leading-edge overscroll handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PullMode {
    #[default]
    Off,
    /// Pull-to-refresh with a threshold-triggered action.
    Refresh,
    /// Stretchy header that only reports the overscroll amount.
    Stretch,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("leading screens must be >= 0 (got {0})")]
    NegativeLeadingScreens(f64),
    #[error("pull threshold must be > 0 (got {0})")]
    NonPositiveThreshold(f64),
    #[error("near-end cutoff must be > 0 viewports (got {0})")]
    NonPositiveNearEnd(f64),
}

/// Per-surface behaviour switches. Every field has a default, so partial RON
/// documents deserialize.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Master switch, checked before any trigger evaluation.
    pub enabled: bool,
    pub end_loading: bool,
    pub start_loading: bool,
    pub end_leading_screens: f64,
    pub start_leading_screens: f64,
    pub loading_mode: LoadingMode,
    pub auto_follow: bool,
    pub animate_follow: bool,
    /// Viewport multiples from the trailing edge still counted as "near end".
    pub near_end_viewports: f64,
    pub initial_anchor: InitialAnchor,
    pub pull_mode: PullMode,
    pub pull_threshold: f64,
    pub cooldown_ms: u64,
    pub settle_ms: u64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            end_loading: true,
            start_loading: false,
            end_leading_screens: 2.0,
            start_leading_screens: 1.0,
            loading_mode: LoadingMode::Bound,
            auto_follow: true,
            animate_follow: true,
            near_end_viewports: 1.0,
            initial_anchor: InitialAnchor::Start,
            pull_mode: PullMode::Off,
            pull_threshold: 80.0,
            cooldown_ms: 100,
            settle_ms: 300,
        }
    }
}

impl ScrollConfig {
    /// Message-list preset: history loads at the start, opens at the newest message.
    pub fn message_list() -> Self {
        Self {
            end_loading: false,
            start_loading: true,
            initial_anchor: InitialAnchor::End,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for screens in [self.end_leading_screens, self.start_leading_screens] {
            if screens < 0.0 || screens.is_nan() {
                return Err(ConfigError::NegativeLeadingScreens(screens));
            }
        }
        if self.pull_threshold.is_nan() || self.pull_threshold <= 0.0 {
            return Err(ConfigError::NonPositiveThreshold(self.pull_threshold));
        }
        if self.near_end_viewports.is_nan() || self.near_end_viewports <= 0.0 {
            return Err(ConfigError::NonPositiveNearEnd(self.near_end_viewports));
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}
