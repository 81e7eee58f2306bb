//! Route definitions for the moderation console.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::moderation;
use crate::state::AppState;

/// Routes mounted at `/moderation`.
///
/// ```text
/// GET    /requests                 -> list_requests
/// GET    /requests/{id}            -> get_request
/// PATCH  /requests/{id}            -> edit_request
/// POST   /requests/{id}/approve    -> approve_request
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/requests", get(moderation::list_requests))
        .route(
            "/requests/{id}",
            get(moderation::get_request).patch(moderation::edit_request),
        )
        .route("/requests/{id}/approve", post(moderation::approve_request))
}
