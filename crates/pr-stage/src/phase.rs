//! RollerPhase: what the roller shows at each step of a draw
//!
//! A phase is NOT a render call. It is the state the presentation layer must
//! reach when the phase is released.

use serde::{Deserialize, Serialize};

use crate::easing::CubicBezier;

/// Eased scroll between two strip positions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollMotion {
    pub from_index: usize,
    pub to_index: usize,
    pub from_offset_px: f64,
    pub to_offset_px: f64,
    pub duration_ms: u64,
    pub easing: CubicBezier,
}

impl ScrollMotion {
    /// Translation `elapsed_ms` after the scroll started
    pub fn offset_at(&self, elapsed_ms: u64) -> f64 {
        if self.duration_ms == 0 || elapsed_ms >= self.duration_ms {
            return self.to_offset_px;
        }
        let progress = self.easing.ease(elapsed_ms as f64 / self.duration_ms as f64);
        self.from_offset_px + (self.to_offset_px - self.from_offset_px) * progress
    }

    /// Slots passed over
    pub fn distance_slots(&self) -> usize {
        self.to_index.saturating_sub(self.from_index)
    }
}

/// One roller phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RollerPhase {
    /// Instant reposition with no transition
    Jump { index: usize, offset_px: f64 },

    /// Eased scroll onto the landing slot
    Scroll(ScrollMotion),

    /// Show the result and re-enable the draw control
    Reveal {
        /// Slot the roller rests on
        index: usize,
        prize_name: String,
        message: String,
    },
}

impl RollerPhase {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Jump { .. } => "jump",
            Self::Scroll(_) => "scroll",
            Self::Reveal { .. } => "reveal",
        }
    }

    /// Check if this phase ends the draw
    pub fn is_reveal(&self) -> bool {
        matches!(self, Self::Reveal { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn motion(duration_ms: u64) -> ScrollMotion {
        ScrollMotion {
            from_index: 20,
            to_index: 47,
            from_offset_px: -1600.0,
            to_offset_px: -3760.0,
            duration_ms,
            easing: CubicBezier::linear(),
        }
    }

    #[test]
    fn test_offset_at() {
        let m = motion(1000);
        assert_abs_diff_eq!(m.offset_at(0), -1600.0, epsilon = 1e-3);
        assert_abs_diff_eq!(m.offset_at(500), -2680.0, epsilon = 1e-2);
        assert_eq!(m.offset_at(1000), -3760.0);
        assert_eq!(m.offset_at(9999), -3760.0);
        assert_eq!(m.distance_slots(), 27);
    }

    #[test]
    fn test_zero_duration_lands_immediately() {
        assert_eq!(motion(0).offset_at(0), -3760.0);
    }

    #[test]
    fn test_phase_serialization() {
        let phase = RollerPhase::Jump {
            index: 20,
            offset_px: -1600.0,
        };
        let json = serde_json::to_string(&phase).unwrap();
        assert!(json.contains("\"type\":\"jump\""));

        let back: RollerPhase = serde_json::from_str(&json).unwrap();
        assert_eq!(back, phase);
        assert_eq!(back.type_name(), "jump");
    }
}
