use axum::extract::{Path, State};
use axum::Json;
use fwip_core::error::CoreError;
use fwip_core::types::DbId;
use fwip_db::models::service::Service;
use fwip_db::repositories::ServiceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/services
pub async fn list_services(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Service>>>> {
    let services = ServiceRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: services }))
}

/// GET /api/v1/services/{id}
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Service>>> {
    let service = ServiceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Service",
            id,
        })?;
    Ok(Json(DataResponse { data: service }))
}
