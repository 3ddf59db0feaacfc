//! Ordered prize table and weighted selection

use serde::{Deserialize, Serialize};

use pr_core::{SAMPLE_MAX, SAMPLE_MIN};

use crate::entry::{PrizeEntry, Selection};

/// Ordered prize table
///
/// Thresholds are non-decreasing and the last one is `10000`, so every value in
/// `1..=10000` falls into exactly one entry. Only [`crate::TableCompiler`]
/// builds non-empty tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeTable {
    entries: Vec<PrizeEntry>,
}

impl PrizeTable {
    /// Table with no prizes
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_entries(entries: Vec<PrizeEntry>) -> Self {
        Self { entries }
    }

    /// Entries in table order
    pub fn entries(&self) -> &[PrizeEntry] {
        &self.entries
    }

    /// Entry at a position
    pub fn get(&self, index: usize) -> Option<&PrizeEntry> {
        self.entries.get(index)
    }

    /// Number of prizes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prize names in table order
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Map a sampled value to a prize.
    ///
    /// Returns the first entry whose cumulative threshold is `>= sampled_value`.
    /// Values outside `1..=10000`, or an empty table, give the sentinel.
    pub fn select(&self, sampled_value: u32) -> Selection {
        if !(SAMPLE_MIN..=SAMPLE_MAX).contains(&sampled_value) {
            return Selection::sentinel();
        }

        let index = self
            .entries
            .partition_point(|e| e.cumulative_threshold < sampled_value);

        match self.entries.get(index) {
            Some(entry) => Selection {
                index: Some(index),
                entry: entry.clone(),
            },
            None => Selection::sentinel(),
        }
    }

    /// Number of sampled values that map to each entry
    pub fn coverage(&self) -> Vec<u32> {
        let mut previous = 0;
        self.entries
            .iter()
            .map(|e| {
                let span = e.cumulative_threshold.saturating_sub(previous);
                previous = previous.max(e.cumulative_threshold);
                span
            })
            .collect()
    }
}
