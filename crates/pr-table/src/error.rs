//! Table compilation errors
//!
//! The `Display` text of each variant is the summary shown to whoever typed the
//! table, so it names the offending line or total.

use thiserror::Error;

use pr_core::Percentage;

/// Probability table compilation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("format error on line {line_number}: {line:?}, expected \"name:percentage\"")]
    MalformedLine { line_number: usize, line: String },

    #[error("probability error on line {line_number}: {line:?}, probability must be a positive number")]
    MalformedProbability { line_number: usize, line: String },

    #[error("probabilities must total 100%, current total: {total}%")]
    ProbabilitySumMismatch { total: Percentage },

    #[error("at least one prize is required")]
    EmptyPrizeSet,

    #[error("too many prizes: {count} > {max}")]
    TooManyPrizes { count: usize, max: usize },

    #[error("prize name too long on line {line_number}: {length} > {max} characters")]
    NameTooLong {
        line_number: usize,
        length: usize,
        max: usize,
    },
}

/// Result type alias
pub type TableResult<T> = Result<T, TableError>;
