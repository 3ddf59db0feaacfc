//! Monte Carlo check of a prize table
//!
//! Runs draws straight against the table (no points, no roller) and compares
//! observed win shares with the compiled basis points.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use pr_core::{SAMPLE_MAX, SAMPLE_MIN};
use pr_table::PrizeTable;

/// Draws per parallel chunk
const CHUNK_SIZE: u64 = 65_536;

/// Golden-ratio increment separating chunk seeds
const CHUNK_SEED_STEP: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRow {
    pub name: String,
    /// Compiled share (basis points / 10000)
    pub expected_share: f64,
    pub observed: u64,
    pub observed_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub draws: u64,
    pub seed: u64,
    /// Draws that matched no prize
    pub sentinel: u64,
    /// One row per table entry, in table order
    pub rows: Vec<SimulationRow>,
}

impl SimulationReport {
    /// Largest gap between expected and observed share
    pub fn max_deviation(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| (row.observed_share - row.expected_share).abs())
            .fold(0.0, f64::max)
    }
}

/// Tally `draws` weighted selections. The same seed always gives the same
/// report, whatever the thread count.
pub fn simulate(table: &PrizeTable, draws: u64, seed: u64) -> SimulationReport {
    let slots = table.len() + 1;
    let chunks = draws.div_ceil(CHUNK_SIZE);

    let counts = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let chunk_seed = seed.wrapping_add(chunk.wrapping_mul(CHUNK_SEED_STEP));
            let mut rng = ChaCha8Rng::seed_from_u64(chunk_seed);
            let len = CHUNK_SIZE.min(draws - chunk * CHUNK_SIZE);
            let mut local = vec![0u64; slots];
            for _ in 0..len {
                let selection = table.select(rng.random_range(SAMPLE_MIN..=SAMPLE_MAX));
                // Sentinel goes in the last slot
                local[selection.index.unwrap_or(slots - 1)] += 1;
            }
            local
        })
        .reduce(
            || vec![0u64; slots],
            |mut acc, local| {
                for (a, b) in acc.iter_mut().zip(local) {
                    *a += b;
                }
                acc
            },
        );

    let share = |count: u64| {
        if draws > 0 {
            count as f64 / draws as f64
        } else {
            0.0
        }
    };

    let rows = table
        .entries()
        .iter()
        .zip(&counts)
        .map(|(entry, &observed)| SimulationRow {
            name: entry.name.clone(),
            expected_share: entry.probability(),
            observed,
            observed_share: share(observed),
        })
        .collect();

    let report = SimulationReport {
        draws,
        seed,
        sentinel: counts[slots - 1],
        rows,
    };
    log::info!(
        "Simulated {} draws over {} prizes, max deviation {:.4}",
        draws,
        table.len(),
        report.max_deviation()
    );
    report
}
