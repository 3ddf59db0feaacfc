//! Timing profiles for roller phases

use serde::{Deserialize, Serialize};

use crate::easing::CubicBezier;

/// Shortest gap between the jump and the scroll. The jump must render
/// before the scroll transition starts, even when every other delay is 0.
pub const MIN_JUMP_SETTLE_MS: u64 = 1;

/// Timing profile identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TimingProfile {
    /// Normal presentation speed
    #[default]
    Normal,
    /// Fast mode
    Turbo,
    /// No delays (headless runs, tests)
    Instant,
    /// Scaled or hand-edited timing
    Custom,
}

impl TimingProfile {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Turbo => "Turbo",
            Self::Instant => "Instant",
            Self::Custom => "Custom",
        }
    }
}

/// Phase spacing for one draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Profile type
    pub profile: TimingProfile,

    /// Pause between the instant jump and the start of the scroll (ms),
    /// long enough for the jump to render on its own
    pub jump_settle_ms: u64,

    /// Scroll duration (ms)
    pub scroll_duration_ms: u64,

    /// Scroll easing
    #[serde(default)]
    pub easing: CubicBezier,
}

impl TimingConfig {
    /// Normal timing
    pub fn normal() -> Self {
        Self {
            profile: TimingProfile::Normal,
            jump_settle_ms: 50,
            scroll_duration_ms: 3500,
            easing: CubicBezier::roller(),
        }
    }

    /// Turbo mode
    pub fn turbo() -> Self {
        Self {
            profile: TimingProfile::Turbo,
            jump_settle_ms: 30,
            scroll_duration_ms: 1200,
            easing: CubicBezier::roller(),
        }
    }

    /// Instant (jump at t=0, scroll and reveal one tick later)
    pub fn instant() -> Self {
        Self {
            profile: TimingProfile::Instant,
            jump_settle_ms: MIN_JUMP_SETTLE_MS,
            scroll_duration_ms: 0,
            easing: CubicBezier::linear(),
        }
    }

    /// Get config for profile
    pub fn from_profile(profile: TimingProfile) -> Self {
        match profile {
            TimingProfile::Normal => Self::normal(),
            TimingProfile::Turbo => Self::turbo(),
            TimingProfile::Instant => Self::instant(),
            TimingProfile::Custom => Self::normal(),
        }
    }

    /// Scale timing by factor (< 1.0 = faster)
    pub fn scaled(&self, factor: f64) -> Self {
        let scale = |ms: u64| (ms as f64 * factor.max(0.0)).round() as u64;
        Self {
            profile: TimingProfile::Custom,
            jump_settle_ms: scale(self.jump_settle_ms).max(MIN_JUMP_SETTLE_MS),
            scroll_duration_ms: scale(self.scroll_duration_ms),
            easing: self.easing,
        }
    }

    /// Delay from draw start to the scroll. Hand-edited configs with a
    /// zero settle still get [`MIN_JUMP_SETTLE_MS`].
    pub fn scroll_at_ms(&self) -> u64 {
        self.jump_settle_ms.max(MIN_JUMP_SETTLE_MS)
    }

    /// Delay from draw start to the reveal (scroll start + scroll duration)
    pub fn reveal_at_ms(&self) -> u64 {
        self.scroll_at_ms().saturating_add(self.scroll_duration_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::normal()
    }
}
