use crate::clock::SystemClock;
use crate::config::LimiterConfig;
use crate::rate_limit::AttemptLimiter;

// app's shared state
pub struct AppState {
    pub limiter: AttemptLimiter<SystemClock>,
}

impl AppState {
    pub fn new(config: LimiterConfig) -> Self {
        Self {
            limiter: AttemptLimiter::new(config, SystemClock),
        }
    }
}
