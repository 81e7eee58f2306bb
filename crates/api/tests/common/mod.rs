#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use fwip_api::config::ServerConfig;
use fwip_api::router::build_app_router;
use fwip_api::state::AppState;
use fwip_core::catalog::CatalogStore;
use fwip_core::title::{Title, TitleFields, TitleKind, TitleWrite};
use fwip_core::types::DbId;
use fwip_db::models::user::User;
use fwip_db::repositories::UserRepo;
use fwip_db::stores::PgCatalogStore;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

/// Test `ServerConfig`: local catalog, dev CORS origin, 30-second timeouts.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        catalog_url: None,
        catalog_timeout_secs: 10,
    }
}

/// The production router over the local Postgres catalog and queue.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::local(pool, test_config()))
}

/// The production router with a substitute catalog. The moderation queue
/// stays in Postgres.
pub fn build_test_app_with_catalog(pool: PgPool, catalog: Arc<dyn CatalogStore>) -> Router {
    build_app_router(AppState::local(pool, test_config()).with_catalog(catalog))
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a title straight into the local catalog, bypassing moderation.
pub async fn seed_title(pool: &PgPool, service_id: DbId, name: &str, kind: TitleKind) -> Title {
    PgCatalogStore::new(pool.clone())
        .upsert_title(&TitleWrite {
            title_id: None,
            service_id: Some(service_id),
            fields: TitleFields {
                name: Some(name.into()),
                kind: Some(kind),
                year: Some(2010),
                ..Default::default()
            },
        })
        .await
        .unwrap()
}

pub async fn seed_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(pool, username).await.unwrap()
}
