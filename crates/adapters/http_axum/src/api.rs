//! Directive endpoint.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;

use skillhub_app::ports::{Authority, DeviceGateway};
use skillhub_domain::response::ResponseEnvelope;

use crate::state::AppState;

/// `POST /api/directives`: answer one directive.
///
/// The body is read as raw bytes so that a payload which is not JSON still
/// produces an `INVALID_DIRECTIVE` envelope instead of an axum rejection.
pub async fn handle_directive<G, A>(
    State(state): State<AppState<G, A>>,
    body: Bytes,
) -> Json<ResponseEnvelope>
where
    G: DeviceGateway + Send + Sync + 'static,
    A: Authority + Send + Sync + 'static,
{
    let request = serde_json::from_slice(&body).unwrap_or_else(|err| {
        tracing::debug!(error = %err, "request body is not JSON");
        Value::Null
    });
    Json(state.router.handle(&request).await)
}
