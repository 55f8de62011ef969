use std::sync::Arc;

use reqwest::{
    header::{ACCEPT, AUTHORIZATION},
    Client, StatusCode,
};
use tracing::{debug, error, info};

use super::dto::{Incident, IncidentEnvelope, IncidentRequest, PagerDutyErrorResponse};
use crate::config::PagerDutyConfig;

/// Media type selecting version 2 of the PagerDuty REST API
const PAGERDUTY_ACCEPT: &str = "application/vnd.pagerduty+json;version=2";

/// Failure of the incident-creation call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IncidentError {
    /// The service answered with a non-success HTTP status
    #[error("PagerDuty returned HTTP {status}: {message}")]
    UpstreamHttp { status: u16, message: String },
    /// No HTTP response was received (connect, TLS, timeout, ...)
    #[error("{description}")]
    Transport { description: String },
}

impl IncidentError {
    pub fn transport(description: impl Into<String>) -> Self {
        IncidentError::Transport {
            description: description.into(),
        }
    }
}

/// Incident-management client interface
///
/// Abstracts the PagerDuty call so tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IncidentClientTrait: Send + Sync {
    /// Create one incident. Exactly one request is attempted.
    async fn create_incident(&self, request: &IncidentRequest) -> Result<Incident, IncidentError>;
}

/// Shared incident client
pub type IncidentClient = Arc<dyn IncidentClientTrait>;

/// PagerDuty REST API v2 client
#[derive(Clone)]
pub struct PagerDutyClient {
    client: Client,
    api_url: String,
    api_key: String,
    from_email: Option<String>,
}

impl PagerDutyClient {
    pub fn new(config: &PagerDutyConfig) -> Result<Self, IncidentError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| IncidentError::transport(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            from_email: config.from_email.clone(),
        })
    }

    fn incidents_url(&self) -> String {
        format!("{}/incidents", self.api_url)
    }
}

#[async_trait::async_trait]
impl IncidentClientTrait for PagerDutyClient {
    async fn create_incident(&self, request: &IncidentRequest) -> Result<Incident, IncidentError> {
        let url = self.incidents_url();
        debug!(url = %url, service_id = %request.service.id, "Posting incident to PagerDuty");

        let mut builder = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Token token={}", self.api_key))
            .header(ACCEPT, PAGERDUTY_ACCEPT)
            .json(&IncidentEnvelope { incident: request });

        if let Some(from_email) = &self.from_email {
            builder = builder.header("From", from_email);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, "Failed to reach PagerDuty");
            IncidentError::transport(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = upstream_message(status, &body);
            error!(status = %status, message = %message, "PagerDuty rejected incident");
            return Err(IncidentError::UpstreamHttp {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| IncidentError::transport(e.to_string()))?;

        // The incident may exist already; the status is still reported back.
        let envelope: IncidentEnvelope<Incident> = serde_json::from_str(&body).map_err(|e| {
            error!(status = %status, error = %e, "Unexpected PagerDuty response body");
            IncidentError::UpstreamHttp {
                status: status.as_u16(),
                message: format!("Unexpected PagerDuty response: {}", e),
            }
        })?;

        info!(incident_id = %envelope.incident.id, "PagerDuty incident created");
        Ok(envelope.incident)
    }
}

/// Pick the most specific message available for a failed response
fn upstream_message(status: StatusCode, body: &str) -> String {
    if let Some(summary) = serde_json::from_str::<PagerDutyErrorResponse>(body)
        .ok()
        .and_then(|parsed| parsed.error.summary())
    {
        return summary;
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
