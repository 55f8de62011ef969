//! OAuth client change-event payloads
//!
//! Envelope shape:
//! ```json
//! {
//!   "detail": {
//!     "topicName": "...OAuthClient...",
//!     "eventBody": {
//!       "action": "Delete",
//!       "propertyChanges": [{"property": "deleted_on", "newValues": ["..."]}],
//!       "entity": {"id": "...", "name": "..."}
//!     }
//!   }
//! }
//! ```
//!
//! Only `detail` is required. Every other field falls back to a default when it
//! is absent or has an unexpected type.

use serde_json::Value;

use crate::utils::AppError;

/// Marker a topic name must contain to be an OAuth client event
pub const OAUTH_CLIENT_TOPIC_MARKER: &str = "OAuthClient";
/// Action value that marks a deletion
pub const DELETE_ACTION: &str = "Delete";
/// Property change carrying the deletion timestamp
pub const DELETED_ON_PROPERTY: &str = "deleted_on";
/// Placeholder for a missing entity id or name
pub const UNKNOWN: &str = "Unknown";

/// Fields extracted from a qualifying deletion event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthClientDeletion {
    pub client_id: String,
    /// Used for logging only
    pub client_name: String,
    /// Empty when the event carries no `deleted_on` change
    pub deleted_on: String,
}

/// Outcome of inspecting an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventClassification {
    /// Topic does not name an OAuth client
    NotOAuthClient,
    /// OAuth client event whose action is not a deletion
    NotDeleted,
    Deleted(OAuthClientDeletion),
}

impl EventClassification {
    /// Inspect an envelope without modifying it.
    ///
    /// Checks run in order and stop at the first match: `detail` presence,
    /// topic marker, then action.
    pub fn from_envelope(envelope: &Value) -> Result<Self, AppError> {
        let detail = envelope
            .get("detail")
            .filter(|d| d.is_object())
            .ok_or_else(AppError::missing_detail)?;

        let topic_name = detail
            .get("topicName")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        if !topic_name.contains(OAUTH_CLIENT_TOPIC_MARKER) {
            return Ok(EventClassification::NotOAuthClient);
        }

        let empty = Value::Null;
        let event_body = detail.get("eventBody").unwrap_or(&empty);

        let action = event_body.get("action").and_then(|v| v.as_str());
        if action != Some(DELETE_ACTION) {
            return Ok(EventClassification::NotDeleted);
        }

        let entity = event_body.get("entity").unwrap_or(&empty);

        Ok(EventClassification::Deleted(OAuthClientDeletion {
            client_id: text_or(entity.get("id"), UNKNOWN),
            client_name: text_or(entity.get("name"), UNKNOWN),
            deleted_on: deletion_time(event_body),
        }))
    }
}

/// First value of the first `deleted_on` property change, or `""`
fn deletion_time(event_body: &Value) -> String {
    let Some(changes) = event_body.get("propertyChanges").and_then(|v| v.as_array()) else {
        return String::new();
    };

    changes
        .iter()
        .find(|change| {
            change.get("property").and_then(|p| p.as_str()) == Some(DELETED_ON_PROPERTY)
        })
        .and_then(|change| change.get("newValues"))
        .and_then(|values| values.as_array())
        .and_then(|values| values.first())
        .map(|value| text_or(Some(value), ""))
        .unwrap_or_default()
}

/// Strings as-is, other scalars as their JSON text, null/absent as `default`
fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn delete_event(property_changes: Value, entity: Value) -> Value {
        json!({
            "detail": {
                "topicName": "v2.OAuthClient",
                "eventBody": {
                    "action": "Delete",
                    "propertyChanges": property_changes,
                    "entity": entity
                }
            }
        })
    }

    #[test]
    fn should_reject_envelope_without_detail() {
        // Arrange
        let envelope = json!({"source": "aws.partner"});

        // Act
        let result = EventClassification::from_envelope(&envelope);

        // Assert
        let err = result.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.message(), "Invalid event structure - missing detail");
    }

    #[test]
    fn should_reject_non_object_detail() {
        // Arrange
        let envelope = json!({"detail": "OAuthClient"});

        // Act
        let result = EventClassification::from_envelope(&envelope);

        // Assert
        assert!(matches!(result, Err(AppError::InvalidEvent(_))));
    }

    #[test]
    fn should_ignore_topic_without_marker() {
        // Arrange
        let envelope = json!({"detail": {"topicName": "v2.User", "eventBody": {"action": "Delete"}}});

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        assert_eq!(result, EventClassification::NotOAuthClient);
    }

    #[test]
    fn should_treat_missing_topic_as_not_oauth_client() {
        // Arrange
        let envelope = json!({"detail": {}});

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        assert_eq!(result, EventClassification::NotOAuthClient);
    }

    #[test]
    fn should_ignore_non_delete_action() {
        // Arrange
        let envelope = json!({
            "detail": {"topicName": "v2.OAuthClient", "eventBody": {"action": "Update"}}
        });

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        assert_eq!(result, EventClassification::NotDeleted);
    }

    #[test]
    fn should_match_action_case_sensitively() {
        // Arrange
        let envelope = json!({
            "detail": {"topicName": "v2.OAuthClient", "eventBody": {"action": "delete"}}
        });

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        assert_eq!(result, EventClassification::NotDeleted);
    }

    #[test]
    fn should_extract_deletion_fields() {
        // Arrange
        let envelope = delete_event(
            json!([{"property": "deleted_on", "newValues": ["2024-01-01T00:00:00Z"]}]),
            json!({"id": "abc123", "name": "TestClient"}),
        );

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        assert_eq!(
            result,
            EventClassification::Deleted(OAuthClientDeletion {
                client_id: "abc123".to_string(),
                client_name: "TestClient".to_string(),
                deleted_on: "2024-01-01T00:00:00Z".to_string(),
            })
        );
    }

    #[test]
    fn should_use_first_deleted_on_change() {
        // Arrange
        let envelope = delete_event(
            json!([
                {"property": "name", "newValues": ["renamed"]},
                {"property": "deleted_on", "newValues": ["2024-01-01T00:00:00Z", "later"]},
                {"property": "deleted_on", "newValues": ["2025-06-30T12:00:00Z"]}
            ]),
            json!({"id": "abc123", "name": "TestClient"}),
        );

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        match result {
            EventClassification::Deleted(deletion) => {
                assert_eq!(deletion.deleted_on, "2024-01-01T00:00:00Z");
            }
            other => panic!("Expected Deleted, got {:?}", other),
        }
    }

    #[test]
    fn should_default_missing_fields() {
        // Arrange
        let envelope = json!({"detail": {"topicName": "OAuthClient", "eventBody": {"action": "Delete"}}});

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        assert_eq!(
            result,
            EventClassification::Deleted(OAuthClientDeletion {
                client_id: "Unknown".to_string(),
                client_name: "Unknown".to_string(),
                deleted_on: String::new(),
            })
        );
    }

    #[test]
    fn should_default_deleted_on_when_new_values_empty() {
        // Arrange
        let envelope = delete_event(
            json!([{"property": "deleted_on", "newValues": []}]),
            json!({"id": "abc123"}),
        );

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        match result {
            EventClassification::Deleted(deletion) => {
                assert_eq!(deletion.deleted_on, "");
                assert_eq!(deletion.client_name, "Unknown");
            }
            other => panic!("Expected Deleted, got {:?}", other),
        }
    }

    #[test]
    fn should_render_numeric_entity_id_as_text() {
        // Arrange
        let envelope = delete_event(json!([]), json!({"id": 42, "name": null}));

        // Act
        let result = EventClassification::from_envelope(&envelope).unwrap();

        // Assert
        match result {
            EventClassification::Deleted(deletion) => {
                assert_eq!(deletion.client_id, "42");
                assert_eq!(deletion.client_name, "Unknown");
            }
            other => panic!("Expected Deleted, got {:?}", other),
        }
    }

    #[test]
    fn should_not_modify_envelope() {
        // Arrange
        let envelope = delete_event(
            json!([{"property": "deleted_on", "newValues": ["2024-01-01T00:00:00Z"]}]),
            json!({"id": "abc123", "name": "TestClient"}),
        );
        let before = envelope.clone();

        // Act
        let _ = EventClassification::from_envelope(&envelope);

        // Assert
        assert_eq!(envelope, before);
    }
}
