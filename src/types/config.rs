//! Configuration structures.
//!
//! Configuration is loaded from a JSON file and environment variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::errors::{Error, Result};

/// Global banker configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Input-size limits for the safe-sequence search.
    #[serde(default)]
    pub limits: SearchLimits,

    /// Sequence scoring configuration.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Trace rendering configuration.
    #[serde(default)]
    pub narration: NarrationConfig,
}

impl Config {
    /// Load configuration from a JSON file. Missing sections take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// Apply `BANKER_MAX_PROCESSES` and `BANKER_SCORING` overrides.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides read through `lookup`, keyed by variable name.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup("BANKER_MAX_PROCESSES") {
            self.limits.max_processes = raw.trim().parse().map_err(|_| {
                Error::validation(format!("BANKER_MAX_PROCESSES must be a number, got {raw:?}"))
            })?;
        }
        if let Some(raw) = lookup("BANKER_SCORING") {
            self.scoring.strategy = raw.parse()?;
        }
        Ok(self)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Input-size limits.
///
/// The enumerator is exponential in the process count, so callers are
/// expected to stay at classroom scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchLimits {
    /// Maximum number of processes accepted for evaluation.
    ///
    /// With abundant resources every permutation is safe, so `n` processes
    /// collect and rank `n!` sequences: 40 320 at 8, about 3.6 million at 10.
    pub max_processes: usize,

    /// Maximum number of resource types accepted for evaluation.
    pub max_resources: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_processes: 8,
            max_resources: 16,
        }
    }
}

/// Sequence scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ScoringConfig {
    pub strategy: ScoringStrategy,
}

/// Built-in scoring strategies, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringStrategy {
    /// Reward sequences that release more units earlier.
    #[default]
    ReleaseWeighted,
    /// Every sequence scores the same; the first discovered one wins.
    Uniform,
}

impl FromStr for ScoringStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "release-weighted" => Ok(Self::ReleaseWeighted),
            "uniform" => Ok(Self::Uniform),
            other => Err(Error::validation(format!(
                "unknown scoring strategy {other:?} (expected release-weighted or uniform)"
            ))),
        }
    }
}

impl fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReleaseWeighted => f.write_str("release-weighted"),
            Self::Uniform => f.write_str("uniform"),
        }
    }
}

/// Trace rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NarrationConfig {
    /// How many ranked sequences are listed in the trace.
    pub max_listed_sequences: usize,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            max_listed_sequences: 5,
        }
    }
}
