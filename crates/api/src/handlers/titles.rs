//! Handlers for the `/titles` resource.
//!
//! Titles are read-only through this API. Content changes go through
//! `/submissions` and the moderation console.

use axum::extract::{Path, Query, State};
use axum::Json;
use fwip_core::error::CoreError;
use fwip_core::title::Title;
use fwip_core::types::DbId;

use crate::error::AppResult;
use crate::query::ServiceParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/titles
///
/// List the catalog, optionally filtered with `?service=`.
pub async fn list_titles(
    State(state): State<AppState>,
    Query(params): Query<ServiceParams>,
) -> AppResult<Json<DataResponse<Vec<Title>>>> {
    let titles = state.catalog.list_titles(params.service).await?;
    Ok(Json(DataResponse { data: titles }))
}

/// GET /api/v1/titles/{id}
pub async fn get_title(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Title>>> {
    let title = state
        .catalog
        .get_title(id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Title", id })?;
    Ok(Json(DataResponse { data: title }))
}
