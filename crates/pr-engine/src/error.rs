//! Error types for the draw engine

use thiserror::Error;

use pr_table::TableError;

/// Draw-time failures. None of them touch the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawError {
    #[error("not enough points: balance {balance}, each draw costs {cost}")]
    InsufficientPoints { balance: u64, cost: u64 },

    #[error("no prizes configured, set up the prize table first")]
    NoPrizesConfigured,

    #[error("a draw is already in progress")]
    DrawInProgress,
}

/// Session setup failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("user name is required")]
    EmptyUserName,
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid prize table: {0}")]
    Table(#[from] TableError),
}

/// Result type alias
pub type EngineResult<T> = Result<T, DrawError>;
