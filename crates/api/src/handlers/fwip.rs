//! Handlers for the FWIP view: random pick and card watch-state buttons.

use axum::extract::{Path, Query, State};
use axum::Json;
use fwip_core::fwip::{pick, FwipCard, FwipFilter, WatchToggle};
use fwip_core::locator::title_id_from_locator;
use fwip_core::watch::WatchEntry;

use crate::error::{AppError, AppResult};
use crate::handlers::users::record_watch_state;
use crate::query::{FwipParams, UserParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/fwip?service=&content=
///
/// Pick one title uniformly at random among those matching the filters.
/// 404 when nothing matches.
pub async fn pick_title(
    State(state): State<AppState>,
    Query(params): Query<FwipParams>,
) -> AppResult<Json<DataResponse<FwipCard>>> {
    let filter = FwipFilter::from(params);
    let titles = state.catalog.list_titles(filter.service_id).await?;

    let picked = pick(&titles, &filter, &mut rand::rng()).cloned();
    let Some(title) = picked else {
        tracing::debug!(service_id = ?filter.service_id, content = ?filter.content, "No title matches FWIP filters");
        return Err(AppError::NotFound(
            "No title matches the selected filters".into(),
        ));
    };

    Ok(Json(DataResponse {
        data: FwipCard::new(title),
    }))
}

/// POST /api/v1/fwip/{reference}/{action}?user={id}
///
/// `action` is one of `seen`, `unseen`, `star`. `reference` is the base-36
/// part of the card locator. The flag is written to `user`'s watch history.
pub async fn toggle(
    State(state): State<AppState>,
    Path((reference, action)): Path<(String, String)>,
    Query(params): Query<UserParams>,
) -> AppResult<Json<DataResponse<WatchEntry>>> {
    let toggle = WatchToggle::from_action(&action)?;
    let title_id = title_id_from_locator(&reference)?;

    let entry = record_watch_state(&state, params.user, title_id, &toggle.patch()).await?;
    tracing::info!(user_id = params.user, title_id, ?toggle, "FWIP card toggled");
    Ok(Json(DataResponse { data: entry }))
}
