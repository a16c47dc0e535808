pub mod clock;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod rate_limit;
pub mod sanitize;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::handlers::{check_handler, health_handler, metrics_handler, reset_handler};
use crate::state::AppState;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::LimiterConfig;
pub use rate_limit::{AttemptKey, AttemptLimiter, AttemptRecord, Decision};

// creating the router with routes
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/attempt", post(check_handler).delete(reset_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}
