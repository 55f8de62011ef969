use serde_json::Value;
use tracing::{info, instrument};

use super::dto::{EventClassification, OAuthClientDeletion};
use crate::domain::incident::{self, IncidentClient};
use crate::utils::{AppError, ProcessorResponse};

pub const NOT_OAUTH_CLIENT_MESSAGE: &str = "Not an OAuth Client event";
pub const NOT_DELETED_MESSAGE: &str = "OAuth Client not deleted";
pub const INCIDENT_CREATED_MESSAGE: &str = "PagerDuty incident created";

/// Turns OAuth client change events into PagerDuty incidents
#[derive(Clone)]
pub struct EventProcessor {
    incident_client: IncidentClient,
    service_id: String,
}

impl EventProcessor {
    pub fn new(incident_client: IncidentClient, service_id: impl Into<String>) -> Self {
        Self {
            incident_client,
            service_id: service_id.into(),
        }
    }

    /// Handle one event envelope.
    ///
    /// Never fails: every outcome, including upstream errors, becomes a
    /// [`ProcessorResponse`].
    #[instrument(skip(self, event))]
    pub async fn process(&self, event: &Value) -> ProcessorResponse {
        info!("Event Received: {}", event);

        match self.try_process(event).await {
            Ok(response) => response,
            Err(err) => ProcessorResponse::from(err),
        }
    }

    async fn try_process(&self, event: &Value) -> Result<ProcessorResponse, AppError> {
        let deletion = match EventClassification::from_envelope(event)? {
            EventClassification::NotOAuthClient => {
                return Ok(ProcessorResponse::ok(NOT_OAUTH_CLIENT_MESSAGE));
            }
            EventClassification::NotDeleted => {
                return Ok(ProcessorResponse::ok(NOT_DELETED_MESSAGE));
            }
            EventClassification::Deleted(deletion) => deletion,
        };

        self.notify(&deletion).await?;

        Ok(ProcessorResponse::ok(INCIDENT_CREATED_MESSAGE))
    }

    async fn notify(&self, deletion: &OAuthClientDeletion) -> Result<(), AppError> {
        info!(
            client_name = %deletion.client_name,
            deleted_on = %deletion.deleted_on,
            "{} has been deleted at {}",
            deletion.client_name,
            deletion.deleted_on
        );

        let created = incident::create_incident(
            self.incident_client.as_ref(),
            &deletion.client_id,
            &deletion.deleted_on,
            &self.service_id,
        )
        .await?;

        info!(
            client_id = %deletion.client_id,
            incident_id = %created.id,
            "PagerDuty incident created for OAuth Client {}",
            deletion.client_id
        );

        Ok(())
    }
}
