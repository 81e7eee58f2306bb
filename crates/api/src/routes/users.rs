//! Route definitions for the `/users` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /                      -> list_users
/// POST   /                      -> create_user
/// GET    /{id}                  -> get_user
/// GET    /{id}/watch_history    -> list_watch_history
/// POST   /{id}/watch_history    -> record_watch_history
/// GET    /{id}/seen             -> list_seen
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user))
        .route(
            "/{id}/watch_history",
            get(users::list_watch_history).post(users::record_watch_history),
        )
        .route("/{id}/seen", get(users::list_seen))
}
