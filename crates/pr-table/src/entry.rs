//! Prize entries and selection results

use serde::{Deserialize, Serialize};

use pr_core::{BASIS_POINT_SCALE, Percentage, SENTINEL_PRIZE_NAME};

/// One prize in a compiled table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeEntry {
    /// Display name (trimmed, non-empty)
    pub name: String,
    /// Running basis-point total up to and including this prize
    pub cumulative_threshold: u32,
    /// This prize's own share of the interval
    pub basis_points: u32,
    /// Percentage as entered
    pub percent: Percentage,
}

impl PrizeEntry {
    /// Placeholder prize used when no threshold covers a sampled value
    pub fn sentinel() -> Self {
        Self {
            name: SENTINEL_PRIZE_NAME.to_string(),
            cumulative_threshold: BASIS_POINT_SCALE,
            basis_points: 0,
            percent: Percentage::ZERO,
        }
    }

    /// Share of the interval as a fraction in [0, 1]
    pub fn probability(&self) -> f64 {
        self.basis_points as f64 / BASIS_POINT_SCALE as f64
    }
}

/// Result of mapping a sampled value onto a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Position of the selected entry (`None` for the sentinel)
    pub index: Option<usize>,
    /// The selected prize
    pub entry: PrizeEntry,
}

impl Selection {
    /// Selection that fell through every threshold
    pub fn sentinel() -> Self {
        Self {
            index: None,
            entry: PrizeEntry::sentinel(),
        }
    }

    /// Check if the fallback prize was returned
    pub fn is_sentinel(&self) -> bool {
        self.index.is_none()
    }
}
