//! Webhook endpoint for OAuth client change events
//!
//! Endpoint: POST /api/events/oauth-client
//!
//! The body is the raw event envelope. The reply is the normalized response
//! and the HTTP status mirrors its `statusCode`.

use axum::{body::Bytes, extract::State};
use serde_json::Value;
use tracing::warn;

use crate::state::AppState;
use crate::utils::{AppError, ProcessorResponse};

pub async fn handle_oauth_client_event(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ProcessorResponse, AppError> {
    let event: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Failed to parse event body");
        AppError::invalid_event(format!("Invalid event structure - {}", e))
    })?;

    Ok(state.processor.process(&event).await)
}
