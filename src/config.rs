use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Carelens";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of an optional user-supplied knowledge base.
pub const KNOWLEDGE_BASE_FILE: &str = "knowledge_base.json";

/// Prefix for environment overrides of [`ClassifierConfig`].
const ENV_PREFIX: &str = "CARELENS_";

/// Get the application data directory.
/// ~/Carelens/ on all platforms, falling back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Location of the optional knowledge-base override.
pub fn knowledge_base_path() -> PathBuf {
    app_data_dir().join(KNOWLEDGE_BASE_FILE)
}

/// Default tracing filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "carelens=info,warn"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("{key} must be between {min} and {max}, got {value}")]
    OutOfRange {
        key: String,
        value: f64,
        min: f64,
        max: f64,
    },
}

// ═══════════════════════════════════════════════════════════
// Classifier tuning
// ═══════════════════════════════════════════════════════════

/// Tunables shared by every matcher. Defaults are the stock
/// heuristics; callers may override them via `CARELENS_*` variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Results at or below this probability are dropped.
    pub min_probability: f64,
    /// Upper bound on any rule-based probability.
    pub max_probability: f64,
    /// Number of ranked results returned.
    pub top_n: usize,
    /// Probability given to the generic consultation fallback.
    pub fallback_probability: f64,
    /// Bonus added when a guessed body location matches a skin condition.
    pub location_bonus: f64,
    /// Largest accepted upload, in bytes.
    pub max_upload_bytes: u64,
    /// Half-width of the jitter applied by the simulated CNN classifier.
    pub cnn_jitter: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_probability: 15.0,
            max_probability: 90.0,
            top_n: 5,
            fallback_probability: 50.0,
            location_bonus: 10.0,
            max_upload_bytes: 10 * 1024 * 1024,
            cnn_jitter: 5.0,
        }
    }
}

impl ClassifierConfig {
    /// Defaults overlaid with any `CARELENS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (keys include the `CARELENS_` prefix).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = read_f64(&lookup, "MIN_PROBABILITY", 0.0, 100.0)? {
            config.min_probability = v;
        }
        if let Some(v) = read_f64(&lookup, "MAX_PROBABILITY", 0.0, 100.0)? {
            config.max_probability = v;
        }
        if let Some(v) = read_f64(&lookup, "FALLBACK_PROBABILITY", 0.0, 100.0)? {
            config.fallback_probability = v;
        }
        if let Some(v) = read_f64(&lookup, "LOCATION_BONUS", 0.0, 100.0)? {
            config.location_bonus = v;
        }
        if let Some(v) = read_f64(&lookup, "CNN_JITTER", 0.0, 50.0)? {
            config.cnn_jitter = v;
        }
        if let Some(raw) = lookup(&format!("{ENV_PREFIX}TOP_N")) {
            config.top_n = parse_value(&raw, "TOP_N")?;
            if config.top_n == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("{ENV_PREFIX}TOP_N"),
                    value: raw,
                });
            }
        }
        if let Some(raw) = lookup(&format!("{ENV_PREFIX}MAX_UPLOAD_BYTES")) {
            config.max_upload_bytes = parse_value(&raw, "MAX_UPLOAD_BYTES")?;
            if config.max_upload_bytes == 0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("{ENV_PREFIX}MAX_UPLOAD_BYTES"),
                    value: raw,
                });
            }
        }

        if config.min_probability >= config.max_probability {
            return Err(ConfigError::OutOfRange {
                key: format!("{ENV_PREFIX}MIN_PROBABILITY"),
                value: config.min_probability,
                min: 0.0,
                max: config.max_probability,
            });
        }

        tracing::debug!(?config, "Classifier configuration resolved");
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(raw: &str, key: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: format!("{ENV_PREFIX}{key}"),
        value: raw.to_string(),
    })
}

fn read_f64<F>(lookup: &F, key: &str, min: f64, max: f64) -> Result<Option<f64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(&format!("{ENV_PREFIX}{key}")) else {
        return Ok(None);
    };
    let value: f64 = parse_value(&raw, key)?;
    if !(min..=max).contains(&value) {
        return Err(ConfigError::OutOfRange {
            key: format!("{ENV_PREFIX}{key}"),
            value,
            min,
            max,
        });
    }
    Ok(Some(value))
}
