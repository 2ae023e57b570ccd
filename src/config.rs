//! Solver configuration.
//!
//! Load configuration from TOML to control the search budget and the local
//! search neighborhood without code changes.
//!
//! # Examples
//!
//! ```
//! use crew_routing::config::SolverConfig;
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     [termination]
//!     seconds_spent_limit = 2
//!     millis_spent_limit = 500
//!
//!     [local_search]
//!     lambda_coefficient = 0.2
//!     cross_exchange = false
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Duration::from_millis(2500));
//! assert!(!config.local_search.cross_exchange);
//! assert_eq!(config.local_search.max_segment_len, 3);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Search time budget used when no limit is configured.
pub const DEFAULT_TIME_LIMIT: Duration = Duration::from_secs(10);

/// Longest accepted search time budget; larger limits are clamped to it.
pub const MAX_TIME_LIMIT: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Main solver configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// When the guided local search stops.
    pub termination: TerminationConfig,

    /// Neighborhood and guided-penalty settings.
    pub local_search: LocalSearchConfig,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails [`validate`](Self::validate).
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the search time limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.termination.seconds_spent_limit = Some(limit.as_secs());
        self.termination.millis_spent_limit = Some(u64::from(limit.subsec_millis()));
        self
    }

    /// Sets the maximum number of search steps.
    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.termination.step_count_limit = Some(steps);
        self
    }

    /// Wall-clock budget of the search.
    pub fn time_limit(&self) -> Duration {
        self.termination.time_limit()
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ls = &self.local_search;
        if !ls.lambda_coefficient.is_finite() || ls.lambda_coefficient < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "lambda_coefficient must be finite and non-negative, got {}",
                ls.lambda_coefficient
            )));
        }
        if ls.max_segment_len == 0 {
            return Err(ConfigError::Invalid(
                "max_segment_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Whole seconds of wall-clock search time.
    pub seconds_spent_limit: Option<u64>,

    /// Additional milliseconds of wall-clock search time.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search steps: accepted moves plus penalizations.
    pub step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Seconds plus milliseconds when either is set, otherwise
    /// [`DEFAULT_TIME_LIMIT`]. Never more than [`MAX_TIME_LIMIT`].
    pub fn time_limit(&self) -> Duration {
        match (self.seconds_spent_limit, self.millis_spent_limit) {
            (None, None) => DEFAULT_TIME_LIMIT,
            (secs, millis) => Duration::from_secs(secs.unwrap_or(0))
                .saturating_add(Duration::from_millis(millis.unwrap_or(0)))
                .min(MAX_TIME_LIMIT),
        }
    }
}

/// Local search configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Scales the guided penalty: `λ = coefficient × best distance / clients`.
    pub lambda_coefficient: f64,

    /// Longest segment moved by a single relocate.
    pub max_segment_len: usize,

    /// Enables segment relocation.
    pub relocate: bool,

    /// Enables node exchange.
    pub exchange: bool,

    /// Enables intra-route 2-opt.
    pub two_opt: bool,

    /// Enables inter-route tail exchange (2-opt*).
    pub cross_exchange: bool,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            lambda_coefficient: 0.1,
            max_segment_len: 3,
            relocate: true,
            exchange: true,
            two_opt: true,
            cross_exchange: true,
        }
    }
}
