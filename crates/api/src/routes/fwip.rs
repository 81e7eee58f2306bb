//! Route definitions for the FWIP view.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::fwip;
use crate::state::AppState;

/// Routes mounted at `/fwip`.
///
/// ```text
/// GET    /                          -> pick_title (?service=&content=)
/// POST   /{reference}/{action}      -> toggle (seen | unseen | star, ?user=)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fwip::pick_title))
        .route("/{reference}/{action}", post(fwip::toggle))
}
