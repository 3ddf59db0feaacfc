//! # pr-stage: Roller Stage System
//!
//! Describes what the prize roller shows during a draw, never how it is drawn.
//!
//! ## Philosophy
//!
//! Every draw passes through the same three phases:
//! - Jump (instant reposition) → Scroll (eased spin) → Reveal (result text)
//!
//! This crate defines those phases, the roller geometry they are computed
//! from, the timing profiles that space them out, and the clock the
//! presentation layer uses to release them.

pub mod clock;
pub mod easing;
pub mod phase;
pub mod roller;
pub mod timeline;
pub mod timing;

pub use clock::*;
pub use easing::*;
pub use phase::*;
pub use roller::*;
pub use timeline::*;
pub use timing::*;
