use std::sync::Arc;

use crate::config::PagerDutyConfig;
use crate::domain::incident::{IncidentClient, IncidentError, PagerDutyClient};
use crate::domain::oauth_client::EventProcessor;

#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<EventProcessor>,
}

impl AppState {
    pub fn new(processor: EventProcessor) -> Self {
        Self {
            processor: Arc::new(processor),
        }
    }

    /// Wire a processor backed by the real PagerDuty client
    pub fn from_config(config: &PagerDutyConfig) -> Result<Self, IncidentError> {
        let client: IncidentClient = Arc::new(PagerDutyClient::new(config)?);
        Ok(Self::new(EventProcessor::new(
            client,
            config.service_id.clone(),
        )))
    }
}
