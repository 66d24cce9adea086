//! Slack Events API webhook endpoint.

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde_json::Value;
use std::sync::Arc;
use tokio::time::Instant;

use crate::models::EventAck;
use crate::services::{events, signature};
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;

/// POST /slack-events
///
/// Verifies the `X-Slack-Signature` header over the raw body bytes, acks
/// immediately and hands the payload to a detached background task. The
/// task's outcome is never reported back; failures inside it are logged only.
pub async fn slack_events(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request<Body>,
) -> Result<Json<EventAck>, AppError> {
    let start_time = Instant::now();
    log_request_received("/slack-events", "POST");

    let body_bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to read request body: {}", e)))?;

    let slack_signature = header_str(&headers, "X-Slack-Signature");
    let slack_timestamp = header_str(&headers, "X-Slack-Request-Timestamp");

    if !signature::verify(
        slack_signature,
        slack_timestamp,
        &body_bytes,
        &state.settings.slack.signing_secret,
    ) {
        log_validation_error("slack_signature", "Invalid signature");
        return Err(AppError::InvalidSignature);
    }

    let payload: Value = serde_json::from_slice(&body_bytes)?;

    // Process in the background; the response does not wait for it
    let slack = state.slack.clone();
    tokio::spawn(async move {
        if let Err(e) = events::process_event(&slack, &payload).await {
            log_error(&format!("Background event processing error: {}", e));
        }
    });

    let processing_time = start_time.elapsed().as_millis() as u64;
    log_request_processed("/slack-events", 200, processing_time);

    Ok(Json(EventAck { ok: true }))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}
