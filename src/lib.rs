pub mod config;
pub mod domain;
pub mod local;
pub mod state;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/events/oauth-client",
            post(domain::oauth_client::handle_oauth_client_event),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
