//! PagerDuty incident payloads
//!
//! Request and response shapes for `POST /incidents` of the PagerDuty REST API v2.

use serde::{Deserialize, Serialize};

/// Title used for every OAuth client deletion incident
pub const OAUTH_CLIENT_DELETED_TITLE: &str = "OAuth Client Deleted";

/// Incident creation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentRequest {
    /// Always `"incident"`
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub service: ServiceReference,
    pub body: IncidentBody,
}

/// Reference to the service the incident is filed against
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceReference {
    pub id: String,
    /// Always `"service_reference"`
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncidentBody {
    /// Always `"incident_body"`
    #[serde(rename = "type")]
    pub kind: String,
    pub details: String,
}

impl IncidentRequest {
    pub fn new(
        title: impl Into<String>,
        service_id: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            kind: "incident".to_string(),
            title: title.into(),
            service: ServiceReference {
                id: service_id.into(),
                kind: "service_reference".to_string(),
            },
            body: IncidentBody {
                kind: "incident_body".to_string(),
                details: details.into(),
            },
        }
    }

    /// Build the request reporting a deleted OAuth client
    pub fn oauth_client_deleted(client_id: &str, deleted_on: &str, service_id: &str) -> Self {
        let details = format!(
            "OAuth Client with ID {} has been deleted at {}",
            client_id, deleted_on
        );

        Self::new(OAUTH_CLIENT_DELETED_TITLE, service_id, details)
    }
}

/// Entity envelope PagerDuty expects around request and response bodies
#[derive(Debug, Serialize, Deserialize)]
pub struct IncidentEnvelope<T> {
    pub incident: T,
}

/// Created incident as returned by PagerDuty
///
/// Only the fields this service reads are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Incident {
    pub id: String,
    #[serde(default)]
    pub incident_number: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// PagerDuty error document: `{"error": {"message": ..., "errors": [...]}}`
///
/// The numeric `code` PagerDuty also sends is not read.
#[derive(Debug, Deserialize)]
pub struct PagerDutyErrorResponse {
    pub error: PagerDutyError,
}

#[derive(Debug, Deserialize)]
pub struct PagerDutyError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl PagerDutyError {
    /// Human-readable summary: the message followed by any detail strings
    pub fn summary(&self) -> Option<String> {
        let message = self.message.as_deref().filter(|m| !m.is_empty())?;

        if self.errors.is_empty() {
            Some(message.to_string())
        } else {
            Some(format!("{}: {}", message, self.errors.join(", ")))
        }
    }
}
