use lazy_static::lazy_static;
use prometheus::{
    Counter, Encoder, Gauge, IntCounterVec, TextEncoder, register_counter, register_gauge,
    register_int_counter_vec,
};

use crate::error::ApiError;

lazy_static! {
    pub static ref CHECKS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "attempt_limiter_checks_total",
        "Attempt checks by decision",
        &["decision"]
    )
    .unwrap();
    pub static ref RESETS_TOTAL: Counter =
        register_counter!("attempt_limiter_resets_total", "Total key resets").unwrap();
    pub static ref TRACKED_KEYS: Gauge =
        register_gauge!("attempt_limiter_tracked_keys", "Keys currently tracked").unwrap();
}

// Render the default registry in text exposition format
pub fn render() -> Result<String, ApiError> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| ApiError::Metrics(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| ApiError::Metrics(e.to_string()))
}
