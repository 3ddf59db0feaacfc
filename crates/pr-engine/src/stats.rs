//! Session statistics and draw history

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::draw::DrawResult;

/// Default number of history records kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_draws: u64,
    pub points_spent: u64,
    /// Draws that fell through every threshold
    pub sentinel_draws: u64,
    /// Wins per table index. Sentinel draws are only in `sentinel_draws`.
    pub prize_counts: BTreeMap<usize, u64>,
}

impl SessionStats {
    pub fn record(&mut self, result: &DrawResult, cost: u64) {
        self.total_draws += 1;
        self.points_spent += cost;
        match result.prize_index {
            Some(index) => *self.prize_counts.entry(index).or_default() += 1,
            None => self.sentinel_draws += 1,
        }
    }

    /// Wins of the prize at `index`
    pub fn count_at(&self, index: usize) -> u64 {
        self.prize_counts.get(&index).copied().unwrap_or(0)
    }

    /// Observed share of draws won by the prize at `index`
    pub fn share_at(&self, index: usize) -> f64 {
        if self.total_draws > 0 {
            self.count_at(index) as f64 / self.total_draws as f64
        } else {
            0.0
        }
    }
}

/// One completed draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawRecord {
    pub draw_id: String,
    pub user_name: String,
    /// Table index, `None` for the sentinel
    pub prize_index: Option<usize>,
    pub prize_name: String,
    pub sampled_value: u32,
    pub balance_after: u64,
    pub drawn_at: DateTime<Utc>,
}

impl DrawRecord {
    pub fn new(user_name: &str, result: &DrawResult) -> Self {
        Self {
            draw_id: result.draw_id.clone(),
            user_name: user_name.to_string(),
            prize_index: result.prize_index,
            prize_name: result.selected_prize.name.clone(),
            sampled_value: result.sampled_value,
            balance_after: result.balance_after,
            drawn_at: Utc::now(),
        }
    }
}

/// Most recent draws, oldest dropped first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawHistory {
    records: VecDeque<DrawRecord>,
    limit: usize,
}

impl DrawHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn push(&mut self, record: DrawRecord) {
        if self.limit == 0 {
            return;
        }
        while self.records.len() >= self.limit {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn latest(&self) -> Option<&DrawRecord> {
        self.records.back()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &DrawRecord> {
        self.records.iter()
    }
}

impl Default for DrawHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
