//! DrawTimeline: the ordered phase steps of one draw
//!
//! Steps carry a delay relative to the draw start; `started_at_ms` anchors
//! them to the clock the draw was started with.

use serde::{Deserialize, Serialize};

use crate::phase::{RollerPhase, ScrollMotion};
use crate::roller::RollerGeometry;
use crate::timing::TimingConfig;

/// A phase and when it is due
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseStep {
    /// Delay from draw start (ms)
    pub delay_ms: u64,
    pub phase: RollerPhase,
}

/// Where the roller jumps and lands, plus what the reveal says
#[derive(Debug, Clone, PartialEq)]
pub struct RollerPlan {
    pub jump_index: usize,
    pub target_index: usize,
    pub prize_name: String,
    pub message: String,
}

/// All steps of one draw, in release order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawTimeline {
    pub draw_id: String,
    /// Clock reading when the draw started (ms)
    pub started_at_ms: u64,
    pub steps: Vec<PhaseStep>,
}

impl DrawTimeline {
    /// Lay out jump → scroll → reveal
    pub fn plan(
        draw_id: impl Into<String>,
        started_at_ms: u64,
        geometry: &RollerGeometry,
        timing: &TimingConfig,
        plan: RollerPlan,
    ) -> Self {
        let draw_id = draw_id.into();
        log::debug!(
            "{}: jump to slot {}, land on slot {} after {} ms",
            draw_id,
            plan.jump_index,
            plan.target_index,
            timing.reveal_at_ms()
        );

        let jump_offset = geometry.offset_for(plan.jump_index);
        let target_offset = geometry.offset_for(plan.target_index);

        let steps = vec![
            PhaseStep {
                delay_ms: 0,
                phase: RollerPhase::Jump {
                    index: plan.jump_index,
                    offset_px: jump_offset,
                },
            },
            PhaseStep {
                delay_ms: timing.scroll_at_ms(),
                phase: RollerPhase::Scroll(ScrollMotion {
                    from_index: plan.jump_index,
                    to_index: plan.target_index,
                    from_offset_px: jump_offset,
                    to_offset_px: target_offset,
                    duration_ms: timing.scroll_duration_ms,
                    easing: timing.easing,
                }),
            },
            PhaseStep {
                delay_ms: timing.reveal_at_ms(),
                phase: RollerPhase::Reveal {
                    index: plan.target_index,
                    prize_name: plan.prize_name,
                    message: plan.message,
                },
            },
        ];

        Self {
            draw_id,
            started_at_ms,
            steps,
        }
    }

    /// Absolute due time of a step
    pub fn due_at(&self, step: &PhaseStep) -> u64 {
        self.started_at_ms.saturating_add(step.delay_ms)
    }

    /// Clock reading at which the draw is complete
    pub fn ends_at(&self) -> u64 {
        self.started_at_ms.saturating_add(self.total_duration_ms())
    }

    pub fn total_duration_ms(&self) -> u64 {
        self.steps.iter().map(|s| s.delay_ms).max().unwrap_or(0)
    }

    /// Slot the roller rests on after the scroll
    pub fn landing_index(&self) -> Option<usize> {
        self.steps.iter().find_map(|s| match &s.phase {
            RollerPhase::Reveal { index, .. } => Some(*index),
            _ => None,
        })
    }
}
