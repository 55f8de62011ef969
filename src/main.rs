use std::net::SocketAddr;

use oauth_client_notifier::{app, config::AppConfig, state::AppState, utils::logging};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load .env
    dotenvy::dotenv().ok();

    // 2. Logging
    let _guard = logging::init_logging();

    // 3. Config and wiring
    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;
    let state = AppState::from_config(&config.pagerduty)?;

    // 4. Serve
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!(service_id = %config.pagerduty.service_id, "Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
