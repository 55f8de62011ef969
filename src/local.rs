//! Local-test harness support: run the processor against an event stored on disk.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::domain::oauth_client::EventProcessor;
use crate::utils::{AppError, ProcessorResponse};

/// Read one JSON event envelope from `path`
pub fn load_event(path: &Path) -> Result<Value, AppError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::event_file(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        AppError::event_file(format!("Failed to parse {} as JSON: {}", path.display(), e))
    })
}

/// Load the event at `path` and run it through `processor`
pub async fn invoke_from_file(
    processor: &EventProcessor,
    path: &Path,
) -> Result<ProcessorResponse, AppError> {
    info!(path = %path.display(), "Invoking processor with local event file");
    let event = load_event(path)?;
    Ok(processor.process(&event).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn should_load_event_from_file() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"detail": {{"topicName": "v2.OAuthClient"}}}}"#).unwrap();

        // Act
        let event = load_event(file.path()).unwrap();

        // Assert
        assert_eq!(event["detail"]["topicName"], "v2.OAuthClient");
    }

    #[test]
    fn should_fail_for_missing_file() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");

        // Act
        let result = load_event(&path);

        // Assert
        assert!(matches!(result, Err(AppError::EventFile(_))));
    }

    #[test]
    fn should_fail_for_invalid_json() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        // Act
        let result = load_event(file.path());

        // Assert
        let err = result.unwrap_err();
        assert!(err.message().contains("Failed to parse"));
    }
}
