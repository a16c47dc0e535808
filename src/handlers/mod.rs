mod attempt;
mod health;
mod metrics;

pub use attempt::{check_handler, reset_handler};
pub use health::health_handler;
pub use metrics::metrics_handler;
