//! Roller geometry
//!
//! The roller is the prize list repeated `repetitions` times in one vertical
//! strip. Every position the animation reaches is a pure function of a slot
//! index and the slot height.

use serde::{Deserialize, Serialize};

use pr_core::{HALF_SLOT_OFFSET_PX, ROLLER_REPETITIONS, SLOT_HEIGHT_PX};

/// Repetition the pre-scroll jump lands in (0-based, i.e. the third copy)
pub const JUMP_REPETITION: usize = 2;

/// Layout of the repeated prize strip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollerGeometry {
    /// Prizes in one copy of the list
    pub prizes_per_set: usize,
    /// Copies of the list on the strip
    pub repetitions: usize,
    /// Slot height (px)
    pub slot_height_px: f64,
    /// Extra alignment offset (px)
    pub half_slot_offset_px: f64,
}

impl RollerGeometry {
    /// Standard geometry for a table of `prizes_per_set` prizes
    pub fn new(prizes_per_set: usize) -> Self {
        Self {
            prizes_per_set,
            repetitions: ROLLER_REPETITIONS,
            slot_height_px: SLOT_HEIGHT_PX,
            half_slot_offset_px: HALF_SLOT_OFFSET_PX,
        }
    }

    /// Total slots on the strip
    pub fn slot_count(&self) -> usize {
        self.prizes_per_set * self.repetitions
    }

    /// Vertical translation that puts `index` under the marker
    pub fn offset_for(&self, index: usize) -> f64 {
        -((index as f64 * self.slot_height_px) + self.half_slot_offset_px)
    }

    /// Resting translation before the first draw (start of the second copy)
    pub fn initial_offset(&self) -> f64 {
        self.offset_for(self.prizes_per_set)
    }

    /// Landing slot for the prize at `position`: same position in the last copy,
    /// so every draw scrolls forward through several full cycles
    pub fn target_index(&self, position: usize) -> usize {
        position + self.prizes_per_set * (self.repetitions - 1)
    }

    /// Jump slot for a random pick; always inside the third copy
    pub fn jump_index(&self, pick: usize) -> usize {
        let n = self.prizes_per_set.max(1);
        n * JUMP_REPETITION + pick % n
    }

    /// Copy (0-based) that holds `index`
    pub fn repetition_of(&self, index: usize) -> usize {
        index / self.prizes_per_set.max(1)
    }

    /// Names in strip order (the list repeated `repetitions` times)
    pub fn strip<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: Clone,
    {
        let names = names.into_iter();
        (0..self.repetitions)
            .flat_map(|_| names.clone().map(str::to_string))
            .collect()
    }
}
