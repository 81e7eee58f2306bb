//! Handler for `/submissions`: the user-facing edit / add / move-delete
//! dialogs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use fwip_core::change_request::ChangeRequest;
use fwip_core::error::CoreError;
use fwip_core::submission::{submit_request, SubmissionForm};
use fwip_core::types::DbId;
use fwip_db::repositories::ServiceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/submissions
///
/// Validate a form, check its target title, and enqueue it for moderation.
/// Nothing reaches the catalog until an admin approves the resulting
/// change-request.
pub async fn create_submission(
    State(state): State<AppState>,
    Json(form): Json<SubmissionForm>,
) -> AppResult<(StatusCode, Json<DataResponse<ChangeRequest>>)> {
    // Shape errors first so a malformed form reports what is missing rather
    // than an unknown service.
    let request = form.build()?;
    ensure_service(&state, request.service_id).await?;
    if let Some(destination) = request.destination_service_id {
        ensure_service(&state, destination).await?;
    }

    let stored = submit_request(state.queue.as_ref(), state.catalog.as_ref(), request).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}

async fn ensure_service(state: &AppState, id: DbId) -> AppResult<()> {
    ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Service",
            id,
        })?;
    Ok(())
}
