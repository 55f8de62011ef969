use tracing::instrument;

use super::client::{IncidentClientTrait, IncidentError};
use super::dto::{Incident, IncidentRequest};

/// File an "OAuth Client Deleted" incident against `service_id`.
///
/// One attempt only: no retry, no backoff and no idempotency key, so calling
/// this twice files two incidents.
#[instrument(skip(client))]
pub async fn create_incident(
    client: &dyn IncidentClientTrait,
    client_id: &str,
    deleted_on: &str,
    service_id: &str,
) -> Result<Incident, IncidentError> {
    let request = IncidentRequest::oauth_client_deleted(client_id, deleted_on, service_id);
    client.create_incident(&request).await
}
