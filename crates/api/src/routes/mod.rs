pub mod fwip;
pub mod health;
pub mod moderation;
pub mod services;
pub mod submissions;
pub mod titles;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /titles                               list (?service=)
/// /titles/{id}                          get
///
/// /services                             list
/// /services/{id}                        get
///
/// /submissions                          submit a form (POST)
///
/// /moderation/requests                  pending requests
/// /moderation/requests/{id}             get, edit (PATCH)
/// /moderation/requests/{id}/approve     approve (POST)
///
/// /users                                list, create (POST)
/// /users/{id}                           get
/// /users/{id}/watch_history             list, record (POST)
/// /users/{id}/seen                      seen list
///
/// /fwip                                 random pick (?service=&content=)
/// /fwip/{reference}/{action}            seen, unseen, star (POST, ?user=)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/titles", titles::router())
        .nest("/services", services::router())
        .nest("/submissions", submissions::router())
        .nest("/moderation", moderation::router())
        .nest("/users", users::router())
        .nest("/fwip", fwip::router())
}
