use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use super::response::ProcessorResponse;
use crate::config::ConfigError;
use crate::domain::incident::IncidentError;

/// Message returned when the envelope has no usable `detail` object.
pub const MISSING_DETAIL_MESSAGE: &str = "Invalid event structure - missing detail";

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The inbound envelope failed structural validation
    #[error("{0}")]
    InvalidEvent(String),
    /// The incident-management call failed
    #[error(transparent)]
    Incident(#[from] IncidentError),
    /// The local harness could not load the event file
    #[error("{0}")]
    EventFile(String),
    /// Startup configuration is missing or malformed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AppError {
    /// Message carried in the normalized response body
    pub fn message(&self) -> String {
        match self {
            AppError::Incident(IncidentError::UpstreamHttp { message, .. }) => message.clone(),
            AppError::Incident(IncidentError::Transport { description }) => description.clone(),
            other => other.to_string(),
        }
    }

    /// Status code carried in the normalized response
    ///
    /// Structured upstream failures keep the upstream status verbatim.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidEvent(_) => 400,
            AppError::Incident(IncidentError::UpstreamHttp { status, .. }) => *status,
            AppError::Incident(IncidentError::Transport { .. }) => 500,
            AppError::EventFile(_) => 400,
            AppError::Config(_) => 500,
        }
    }

    pub fn invalid_event(msg: impl Into<String>) -> Self {
        AppError::InvalidEvent(msg.into())
    }

    pub fn missing_detail() -> Self {
        AppError::InvalidEvent(MISSING_DETAIL_MESSAGE.to_string())
    }

    pub fn event_file(msg: impl Into<String>) -> Self {
        AppError::EventFile(msg.into())
    }
}

impl From<AppError> for ProcessorResponse {
    fn from(err: AppError) -> Self {
        match &err {
            AppError::InvalidEvent(_) | AppError::EventFile(_) => {
                warn!(status = err.status_code(), "Rejected event: {}", err);
            }
            _ => {
                error!(status = err.status_code(), "Event processing failed: {}", err);
            }
        }

        ProcessorResponse::new(err.status_code(), err.message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ProcessorResponse::from(self).into_response()
    }
}
