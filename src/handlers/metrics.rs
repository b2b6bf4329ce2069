//! `/metrics`: JSON snapshot of the gateway counters (tokens verified and
//! rejected, documents and static assets served, fetch failures).
//! Used by: server.

use axum::extract::State;
use axum::Json;

use crate::state::AppState;
use crate::telemetry::MetricsSnapshot;

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    let snapshot = state.metrics.snapshot();
    tracing::debug!(
        verified = snapshot.tokens_verified,
        rejected = snapshot.tokens_rejected,
        "metrics requested"
    );
    Json(snapshot)
}
