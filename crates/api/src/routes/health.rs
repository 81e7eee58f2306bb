use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// `local` for the `titles` table, `remote` when `CATALOG_URL` is set.
    pub catalog: &'static str,
}

/// GET /health
///
/// Liveness plus a database round-trip. The remote catalog is not checked;
/// its failures surface per request as 502.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = fwip_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        catalog: if state.config.catalog_url.is_some() {
            "remote"
        } else {
            "local"
        },
    })
}

/// Mounted at the root, outside `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
