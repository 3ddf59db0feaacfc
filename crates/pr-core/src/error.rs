//! Error types for PrizeRoller core arithmetic

use thiserror::Error;

/// Errors produced while reading a percentage numeral
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PercentError {
    #[error("empty numeral")]
    Empty,

    #[error("not a decimal number: {0:?}")]
    NotANumber(String),

    #[error("numeral out of range: {0:?}")]
    OutOfRange(String),
}

/// Result type alias
pub type PercentResult<T> = Result<T, PercentError>;
