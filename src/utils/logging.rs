//! Logging initialisation
//!
//! Structured JSON logs on stdout. When `LOG_DIR` is set, the same events are
//! also written to a daily rolling file in that directory.

use tracing_appender::{non_blocking::WorkerGuard, rolling};
use std::error::Error;

use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter,
};

const DEFAULT_FILTER: &str = "info,oauth_client_notifier=debug";

/// Initialise the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` and defaults to `info,oauth_client_notifier=debug`.
///
/// The returned guard must be held by `main` so buffered file output is
/// flushed on exit. It is `None` when file logging is disabled.
pub fn init_logging() -> Option<WorkerGuard> {
    let (file_writer, guard) = match std::env::var("LOG_DIR") {
        Ok(log_dir) if !log_dir.is_empty() => {
            let file_appender = rolling::daily(log_dir, "oauth-client-notifier.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(non_blocking), Some(guard))
        }
        _ => (None, None),
    };

    let stdout_layer = fmt::layer()
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_current_span(true)
        .flatten_event(false);

    let file_layer = file_writer.map(|writer| {
        fmt::layer()
            .json()
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .with_current_span(true)
            .flatten_event(false)
            .with_ansi(false)
            .with_writer(writer)
    });

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if let Err(err) = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
    {
        if !is_already_initialized(&err) {
            eprintln!("Failed to initialize tracing: {}", err);
        }
    }

    guard
}

/// A second `try_init` in the same process fails with `SetGlobalDefaultError`
fn is_already_initialized(err: &TryInitError) -> bool {
    err.source()
        .and_then(|s| s.downcast_ref::<tracing::dispatcher::SetGlobalDefaultError>())
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_tolerate_repeated_initialization() {
        // Arrange
        let _ = tracing_subscriber::registry().try_init();

        // Act
        let second = tracing_subscriber::registry().try_init();

        // Assert
        let err = second.expect_err("global subscriber is already set");
        assert!(is_already_initialized(&err));
    }
}
