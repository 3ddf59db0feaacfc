//! # pr-table: Probability Table Compiler
//!
//! Turns raw `name:percentage` lines into an ordered, validated prize table
//! whose entries partition the sampling interval `1..=10000`.
//!
//! ## Architecture
//!
//! ```text
//! raw text ("笔:30\n橡皮:70")
//!     │
//!     ├── TableCompiler (line parsing, limits, 100% check)
//!     │
//!     v
//! CompiledTable { PrizeTable, total }
//!     │
//!     └── PrizeTable::select(sampled_value) → Selection
//! ```

pub mod compiler;
pub mod entry;
pub mod error;
pub mod table;

pub use compiler::*;
pub use entry::*;
pub use error::*;
pub use table::*;
