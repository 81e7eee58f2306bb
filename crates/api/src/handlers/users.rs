//! Handlers for `/users` and per-user watch history.
//!
//! Watch flags are written directly, without moderation. Users carry no
//! credentials; the id in the path picks whose history is read or written.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use fwip_core::error::CoreError;
use fwip_core::title::Title;
use fwip_core::types::DbId;
use fwip_core::user::NewUser;
use fwip_core::watch::{seen_titles, WatchEntry, WatchStatePatch};
use fwip_db::models::user::User;
use fwip_db::repositories::{UserRepo, WatchHistoryRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body of `POST /users/{id}/watch_history`.
#[derive(Debug, Deserialize)]
pub struct WatchHistoryUpdate {
    pub title_id: DbId,
    pub watched: Option<bool>,
    pub important: Option<bool>,
}

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let users = UserRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// POST /api/v1/users
///
/// 409 when the username is taken.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> AppResult<(StatusCode, Json<DataResponse<User>>)> {
    let username = input.into_username()?;
    let user = UserRepo::create(&state.pool, &username).await?;
    tracing::info!(user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<User>>> {
    let user = ensure_user(&state, id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/{id}/watch_history
pub async fn list_watch_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<WatchEntry>>>> {
    ensure_user(&state, id).await?;
    let entries = WatchHistoryRepo::list_for_user(&state.pool, id)
        .await?
        .into_iter()
        .map(WatchEntry::from)
        .collect();
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/users/{id}/watch_history
///
/// Set `watched` and/or `important` for one title.
pub async fn record_watch_history(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(update): Json<WatchHistoryUpdate>,
) -> AppResult<Json<DataResponse<WatchEntry>>> {
    let patch = WatchStatePatch {
        watched: update.watched,
        important: update.important,
    };
    let entry = record_watch_state(&state, id, update.title_id, &patch).await?;
    Ok(Json(DataResponse { data: entry }))
}

/// GET /api/v1/users/{id}/seen
///
/// The user's seen list: every catalog title they marked watched.
pub async fn list_seen(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Title>>>> {
    ensure_user(&state, id).await?;
    let history: Vec<WatchEntry> = WatchHistoryRepo::list_for_user(&state.pool, id)
        .await?
        .into_iter()
        .map(WatchEntry::from)
        .collect();
    let titles = state.catalog.list_titles(None).await?;
    let seen = seen_titles(&titles, &history).into_iter().cloned().collect();
    Ok(Json(DataResponse { data: seen }))
}

// ---------------------------------------------------------------------------
// Shared with the FWIP card buttons
// ---------------------------------------------------------------------------

pub(crate) async fn ensure_user(state: &AppState, id: DbId) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;
    Ok(user)
}

/// Apply a watch-state write for one user and one catalog title.
pub(crate) async fn record_watch_state(
    state: &AppState,
    user_id: DbId,
    title_id: DbId,
    patch: &WatchStatePatch,
) -> AppResult<WatchEntry> {
    if patch.is_empty() {
        return Err(AppError::BadRequest(
            "At least one of watched, important must be provided".into(),
        ));
    }
    ensure_user(state, user_id).await?;
    state
        .catalog
        .get_title(title_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Title",
            id: title_id,
        })?;

    let row = WatchHistoryRepo::upsert(&state.pool, user_id, title_id, patch).await?;
    tracing::info!(
        user_id,
        title_id,
        watched = row.watched,
        important = row.important,
        "Watch state updated"
    );
    Ok(WatchEntry::from(row))
}
