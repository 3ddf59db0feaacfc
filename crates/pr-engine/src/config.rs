//! Engine configuration
//!
//! Loaded from JSON or YAML; every field has a default so an empty document
//! is a valid config.

use std::path::Path;

use serde::{Deserialize, Serialize};

use pr_stage::{TimingConfig, TimingProfile};
use pr_table::{CompiledTable, DEFAULT_PRIZE_TEXT, TableCompiler, TableLimits};

use crate::error::ConfigError;
use crate::stats::DEFAULT_HISTORY_LIMIT;

/// Draw engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Timing profile for roller phases
    pub timing: TimingProfile,
    /// Multiplier applied to the profile's durations (1.0 = unchanged)
    pub timing_scale: f64,
    /// Fixed RNG seed for reproducible sessions
    pub seed: Option<u64>,
    /// Prize table text (`name:percentage` lines); the built-in table if absent
    pub prizes: Option<String>,
    /// Draw records kept per session
    pub history_limit: usize,
    /// Table compilation limits
    pub limits: TableLimits,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timing: TimingProfile::Normal,
            timing_scale: 1.0,
            seed: None,
            prizes: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            limits: TableLimits::default(),
        }
    }
}

impl EngineConfig {
    /// Parse JSON config
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse YAML config
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let config = match extension.as_str() {
            "json" => Self::from_json_str(&text)?,
            "yaml" | "yml" => Self::from_yaml_str(&text)?,
            other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
        };

        log::info!("Loaded engine config from {:?}", path);
        Ok(config)
    }

    /// Resolved phase timing
    pub fn timing_config(&self) -> TimingConfig {
        let base = TimingConfig::from_profile(self.timing);
        if (self.timing_scale - 1.0).abs() > f64::EPSILON {
            base.scaled(self.timing_scale)
        } else {
            base
        }
    }

    /// Compiler honoring the configured limits
    pub fn compiler(&self) -> TableCompiler {
        TableCompiler::with_limits(self.limits.clone())
    }

    /// Compile the configured prize table
    pub fn compile_prizes(&self) -> Result<CompiledTable, ConfigError> {
        let raw = self.prizes.as_deref().unwrap_or(DEFAULT_PRIZE_TEXT);
        Ok(self.compiler().compile(raw)?)
    }
}
