use clap::Parser;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_LOCKOUT: Duration = Duration::from_secs(15 * 60);

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "attempt-limiter")]
#[command(about = "Per-key attempt limiting with lockout")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, env = "ATTEMPT_LIMITER_PORT", default_value_t = 8080)]
    pub port: u16,

    // Attempts allowed before a key gets locked out
    #[arg(long, env = "ATTEMPT_LIMITER_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    // Minimum gap between two attempts on the same key, in milliseconds
    #[arg(long, env = "ATTEMPT_LIMITER_MIN_INTERVAL_MS", default_value_t = 1000)]
    pub min_interval_ms: u64,

    // Lockout length in milliseconds
    #[arg(long, env = "ATTEMPT_LIMITER_LOCKOUT_MS", default_value_t = 900_000)]
    pub lockout_ms: u64,

    // Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    pub fn limiter_config(&self) -> Result<LimiterConfig, ConfigError> {
        LimiterConfig {
            max_attempts: self.max_attempts,
            min_interval: Duration::from_millis(self.min_interval_ms),
            lockout: Duration::from_millis(self.lockout_ms),
        }
        .validate()
    }
}

/// Limits applied to every key of one limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimiterConfig {
    pub max_attempts: u32,
    pub min_interval: Duration,
    pub lockout: Duration,
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            min_interval: DEFAULT_MIN_INTERVAL,
            lockout: DEFAULT_LOCKOUT,
        }
    }
}

impl LimiterConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        Ok(self)
    }
}
