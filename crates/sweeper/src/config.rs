//! Environment-driven configuration for the sweeper daemon.
//!
//! Parsing is split from `std::env` access so tests can feed in variables
//! through a closure instead of mutating process-global state.

use std::path::PathBuf;
use std::time::Duration;

use scratchkeeper_core::error::CoreError;
use scratchkeeper_core::retention::{RetentionConfig, DEFAULT_MAX_COUNT};

/// Default number of days before a scratch file goes stale.
pub const DEFAULT_MAX_AGE_DAYS: i64 = 30;

/// Default seconds between sweep passes.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 3600;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Runtime configuration for the sweeper daemon.
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// Directory whose regular files are subject to retention.
    pub scratch_dir: PathBuf,
    pub retention: RetentionConfig,
    pub sweep_interval: Duration,
}

impl SweeperConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build configuration from a variable lookup.
    ///
    /// `SCRATCH_DIR` is required; `RETENTION_MAX_FILES`,
    /// `RETENTION_MAX_AGE_DAYS`, and `SWEEP_INTERVAL_SECS` fall back to
    /// defaults when absent. A present-but-unparseable value is a hard
    /// error rather than a silent fallback.
    pub fn from_vars<F>(vars: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let scratch_dir = vars("SCRATCH_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or_else(|| {
                CoreError::Validation("SCRATCH_DIR environment variable is required".into())
            })?;

        let max_count: usize = parse_or_default(&vars, "RETENTION_MAX_FILES", DEFAULT_MAX_COUNT)?;
        let max_age_days: i64 =
            parse_or_default(&vars, "RETENTION_MAX_AGE_DAYS", DEFAULT_MAX_AGE_DAYS)?;
        let interval_secs: u64 =
            parse_or_default(&vars, "SWEEP_INTERVAL_SECS", DEFAULT_SWEEP_INTERVAL_SECS)?;

        if max_age_days < 0 {
            return Err(CoreError::Validation(
                "RETENTION_MAX_AGE_DAYS must not be negative".into(),
            ));
        }

        // tokio::time::interval panics on a zero period, so catch it here.
        if interval_secs == 0 {
            return Err(CoreError::Validation(
                "SWEEP_INTERVAL_SECS must be greater than zero".into(),
            ));
        }

        Ok(Self {
            scratch_dir,
            retention: RetentionConfig {
                max_count,
                max_age_ms: max_age_days.saturating_mul(MS_PER_DAY),
            },
            sweep_interval: Duration::from_secs(interval_secs),
        })
    }
}

/// Parse an optional variable, falling back to `default` only when unset.
fn parse_or_default<F, T>(vars: &F, name: &str, default: T) -> Result<T, CoreError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match vars(name) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            CoreError::Validation(format!("{name} has invalid value '{raw}'"))
        }),
        None => Ok(default),
    }
}
