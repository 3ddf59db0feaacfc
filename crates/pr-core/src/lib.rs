//! pr-core: Shared types, constants, and fixed-point arithmetic for PrizeRoller
//!
//! This crate provides the foundational types used across all PrizeRoller crates.

mod error;
mod percent;

pub use error::*;
pub use percent::*;

/// Integer resolution of the sampling interval (basis points, 1/100 of a percent)
pub const BASIS_POINT_SCALE: u32 = 10_000;

/// Smallest value a draw can sample
pub const SAMPLE_MIN: u32 = 1;

/// Largest value a draw can sample
pub const SAMPLE_MAX: u32 = BASIS_POINT_SCALE;

/// Points debited for every draw
pub const COST_PER_DRAW: u64 = 10;

/// Number of times the prize list is repeated on the roller
pub const ROLLER_REPETITIONS: usize = 6;

/// Height of one roller slot in pixels
pub const SLOT_HEIGHT_PX: f64 = 80.0;

/// Extra offset applied when aligning a slot under the marker (kept at zero for exact alignment)
pub const HALF_SLOT_OFFSET_PX: f64 = 0.0;

/// Name of the prize returned when no threshold covers a sampled value
pub const SENTINEL_PRIZE_NAME: &str = "system error";
