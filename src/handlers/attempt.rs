use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::metrics::{CHECKS_TOTAL, RESETS_TOTAL, TRACKED_KEYS};
use crate::models::{AttemptRequest, AttemptResponse};
use crate::rate_limit::AttemptKey;
use crate::sanitize::is_valid_length;
use crate::state::AppState;

const MAX_FIELD_LEN: usize = 128;

// Pull a usable (action, identifier) pair out of the request
fn key_parts(req: &AttemptRequest) -> Result<(&str, &str), ApiError> {
    let action = req.action.trim();
    if action.is_empty() {
        return Err(ApiError::EmptyAction);
    }
    if !is_valid_length(action, 1, MAX_FIELD_LEN) {
        return Err(ApiError::TooLong {
            field: "action",
            max: MAX_FIELD_LEN,
        });
    }

    let identifier = req.identifier();
    if !is_valid_length(identifier, 1, MAX_FIELD_LEN) {
        return Err(ApiError::TooLong {
            field: "identifier",
            max: MAX_FIELD_LEN,
        });
    }
    Ok((action, identifier))
}

pub async fn check_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AttemptRequest>,
) -> Result<Response, ApiError> {
    let (action, identifier) = key_parts(&payload)?;
    let key = AttemptKey::new(action, identifier);

    let decision = state.limiter.check(action, identifier);
    CHECKS_TOTAL.with_label_values(&[decision.as_str()]).inc();
    TRACKED_KEYS.set(state.limiter.len() as f64);

    let status = if decision.is_allowed() {
        tracing::debug!(key = %key, "Attempt allowed");
        StatusCode::OK
    } else {
        tracing::warn!(key = %key, reason = decision.as_str(), "Attempt denied");
        StatusCode::TOO_MANY_REQUESTS
    };

    let body = AttemptResponse {
        key: key.to_string(),
        allowed: decision.is_allowed(),
        decision: decision.as_str().to_string(),
    };
    Ok((status, Json(body)).into_response())
}

pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AttemptRequest>,
) -> Result<StatusCode, ApiError> {
    let (action, identifier) = key_parts(&payload)?;

    state.limiter.reset(action, identifier);
    RESETS_TOTAL.inc();
    TRACKED_KEYS.set(state.limiter.len() as f64);
    tracing::info!(key = %AttemptKey::new(action, identifier), "Attempts reset");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LimiterConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    fn router() -> axum::Router {
        crate::app(Arc::new(AppState::new(LimiterConfig::default())))
    }

    fn attempt(method: Method, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri("/api/attempt")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn decode(response: Response) -> AttemptResponse {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn first_attempt_allowed_second_too_fast() {
        let app = router();
        let body = r#"{"action":"button_click","identifier":"submit-btn"}"#;

        let first = app.clone().oneshot(attempt(Method::POST, body)).await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first = decode(first).await;
        assert_eq!(first.key, "button_click:submit-btn");
        assert!(first.allowed);
        assert_eq!(first.decision, "allowed");

        let second = app.oneshot(attempt(Method::POST, body)).await.unwrap();
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        let second = decode(second).await;
        assert!(!second.allowed);
        assert_eq!(second.decision, "too_fast");
    }

    #[tokio::test]
    async fn reset_clears_the_key() {
        let app = router();
        let body = r#"{"action":"login","identifier":"alice"}"#;

        let res = app.clone().oneshot(attempt(Method::POST, body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app.clone().oneshot(attempt(Method::DELETE, body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app.oneshot(attempt(Method::POST, body)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_identifier_uses_anonymous() {
        let res = router()
            .oneshot(attempt(Method::POST, r#"{"action":"button_click"}"#))
            .await
            .unwrap();
        assert_eq!(decode(res).await.key, "button_click:anonymous");
    }

    #[tokio::test]
    async fn blank_action_is_rejected() {
        let res = router()
            .oneshot(attempt(Method::POST, r#"{"action":"  ","identifier":"x"}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_identifier_is_rejected() {
        let body = serde_json::json!({ "action": "login", "identifier": "x".repeat(200) });
        let res = router()
            .oneshot(attempt(Method::POST, &body.to_string()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_and_metrics_respond() {
        let app = router();
        app.clone()
            .oneshot(attempt(Method::POST, r#"{"action":"login"}"#))
            .await
            .unwrap();

        let res = app
            .clone()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("attempt_limiter_checks_total"));
    }
}
