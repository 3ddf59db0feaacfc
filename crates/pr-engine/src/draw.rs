//! Draw results

use serde::{Deserialize, Serialize};

use pr_stage::DrawTimeline;
use pr_table::PrizeEntry;

/// Logical outcome of one draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResult {
    /// Draw ID (`draw-000001`, counted per session)
    pub draw_id: String,
    /// Uniform sample in `1..=10000`
    pub sampled_value: u32,
    /// Prize the sample fell on
    pub selected_prize: PrizeEntry,
    /// Table position of the prize (`None` for the sentinel)
    pub prize_index: Option<usize>,
    /// Roller slot the animation lands on
    pub roller_target_index: usize,
    /// Balance after the debit
    pub balance_after: u64,
}

impl DrawResult {
    /// Check if the fallback prize was drawn
    pub fn is_sentinel(&self) -> bool {
        self.prize_index.is_none()
    }
}

/// Everything a draw hands back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawOutcome {
    pub result: DrawResult,
    pub timeline: DrawTimeline,
}

/// Result text shown by the reveal phase
pub fn reveal_message(user_name: &str, prize_name: &str) -> String {
    format!("Congratulations {user_name}, you won: {prize_name}!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_message() {
        assert_eq!(reveal_message("小明", "笔"), "Congratulations 小明, you won: 笔!");
    }
}
