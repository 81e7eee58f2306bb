//! Route definitions for the `/titles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::titles;
use crate::state::AppState;

/// Routes mounted at `/titles`.
///
/// ```text
/// GET    /          -> list_titles (?service=)
/// GET    /{id}      -> get_title
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(titles::list_titles))
        .route("/{id}", get(titles::get_title))
}
