//! Liveness endpoints.

use axum::extract::State;
use crate::services::FormService;

/// **Route**: `GET /`
pub async fn root() -> &'static str {
    "Inquiry intake API is running"
}

/// **Route**: `GET /health`
///
/// Reports process liveness only; the store is not probed.
pub async fn health(State(forms): State<FormService>) -> &'static str {
    tracing::trace!("[HEALTH] ok (store backend: {})", forms.backend());
    "OK"
}
