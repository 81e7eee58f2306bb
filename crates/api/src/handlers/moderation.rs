//! Handlers for the moderation console (`/moderation/requests`).
//!
//! Admins review pending change-requests, optionally adjust them, and
//! approve them. Approval performs exactly one catalog write; if that write
//! fails the request stays pending and the error is returned.

use axum::extract::{Path, State};
use axum::Json;
use fwip_core::change_request::{ChangeRequest, ChangeRequestEdit};
use fwip_core::console::ApprovalOutcome;
use fwip_core::types::DbId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/moderation/requests
///
/// Pending requests in submission order.
pub async fn list_requests(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ChangeRequest>>>> {
    let requests = state.console().pending().await?;
    Ok(Json(DataResponse { data: requests }))
}

/// GET /api/v1/moderation/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ChangeRequest>>> {
    let request = state.console().get(id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PATCH /api/v1/moderation/requests/{id}
///
/// Adjust a pending request before approving it. Payload fields are merged
/// over the submitted ones.
pub async fn edit_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(edit): Json<ChangeRequestEdit>,
) -> AppResult<Json<DataResponse<ChangeRequest>>> {
    let request = state.console().edit(id, edit).await?;
    Ok(Json(DataResponse { data: request }))
}

/// POST /api/v1/moderation/requests/{id}/approve
pub async fn approve_request(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ApprovalOutcome>>> {
    let outcome = state.console().approve(id).await?;
    Ok(Json(DataResponse { data: outcome }))
}
