//! Axum router assembly.

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use skillhub_app::ports::{Authority, DeviceGateway};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<G, A>(state: AppState<G, A>) -> Router
where
    G: DeviceGateway + Send + Sync + 'static,
    A: Authority + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/directives", post(crate::api::handle_directive::<G, A>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
