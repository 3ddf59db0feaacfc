//! # pr-engine: Draw Engine for PrizeRoller
//!
//! Owns the session state (user, points, prize table) and runs draws:
//! debit, sample, select, then hand the presentation layer a timeline of
//! roller phases that lands on the selected prize.
//!
//! ## Architecture
//!
//! ```text
//! DrawSession
//!     │
//!     ├── PrizeTable (compiled by pr-table)
//!     ├── TimingConfig (pr-stage)
//!     └── StdRng (seedable)
//!           │
//!           v
//!     draw() → DrawOutcome { DrawResult, DrawTimeline }
//!           │
//!           v
//!     DrawScheduler::advance(now) → jump, scroll, reveal → finish_draw(draw_id)
//! ```

pub mod config;
pub mod draw;
pub mod error;
pub mod scheduler;
pub mod session;
pub mod shared;
pub mod simulate;
pub mod stats;

pub use config::*;
pub use draw::*;
pub use error::*;
pub use scheduler::*;
pub use session::*;
pub use shared::*;
pub use simulate::*;
pub use stats::*;
