//! REST client for an external title catalog.
//!
//! Talks to a catalog exposing `GET/POST /titles` and
//! `GET/PATCH/DELETE /titles/{id}` with plain JSON bodies, and adapts it to
//! [`CatalogStore`].

use std::time::Duration;

use async_trait::async_trait;
use fwip_core::catalog::CatalogStore;
use fwip_core::error::CoreError;
use fwip_core::title::{Title, TitleFields, TitleWrite};
use fwip_core::types::DbId;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A request body could not be encoded.
    #[error("Invalid request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<CatalogClientError> for CoreError {
    fn from(err: CatalogClientError) -> Self {
        CoreError::Upstream(err.to_string())
    }
}

/// HTTP-backed catalog store.
#[derive(Clone)]
pub struct HttpCatalogStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalogStore {
    /// Create a client for the catalog at `base_url`, e.g. `http://host:8080`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn title_url(&self, id: DbId) -> String {
        format!("{}/titles/{id}", self.base_url)
    }

    /// Parse a successful JSON response, or turn the status into an error.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, CatalogClientError> {
        let response = Self::check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CatalogClientError::ApiError {
            status: status.as_u16(),
            body,
        })
    }
}

/// Request body for POST / PATCH: only the fields that are set, so absent
/// fields stay unchanged on the catalog side. `service_id` is sent only when
/// the write sets it (adds and moves).
fn write_body(
    service_id: Option<DbId>,
    fields: &TitleFields,
) -> Result<serde_json::Value, CatalogClientError> {
    let mut body = serde_json::to_value(fields)?;
    if let serde_json::Value::Object(map) = &mut body {
        map.retain(|_, value| !value.is_null());
        if let Some(service_id) = service_id {
            map.insert("service_id".into(), service_id.into());
        }
    }
    Ok(body)
}

#[async_trait]
impl CatalogStore for HttpCatalogStore {
    async fn list_titles(&self, service_id: Option<DbId>) -> Result<Vec<Title>, CoreError> {
        let mut request = self.client.get(format!("{}/titles", self.base_url));
        if let Some(id) = service_id {
            request = request.query(&[("service", id)]);
        }
        let response = request.send().await.map_err(CatalogClientError::from)?;
        Ok(Self::parse_response(response).await?)
    }

    async fn get_title(&self, id: DbId) -> Result<Option<Title>, CoreError> {
        let response = self
            .client
            .get(self.title_url(id))
            .send()
            .await
            .map_err(CatalogClientError::from)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Ok(Some(Self::parse_response(response).await?))
    }

    async fn upsert_title(&self, write: &TitleWrite) -> Result<Title, CoreError> {
        let body = write_body(write.service_id, &write.fields)?;
        let request = match write.title_id {
            Some(id) => self.client.patch(self.title_url(id)),
            None => self.client.post(format!("{}/titles", self.base_url)),
        };
        let response = request
            .json(&body)
            .send()
            .await
            .map_err(CatalogClientError::from)?;

        if let Some(id) = write.title_id {
            if response.status() == StatusCode::NOT_FOUND {
                return Err(CoreError::NotFound { entity: "Title", id });
            }
        }
        let title: Title = Self::parse_response(response).await?;
        tracing::info!(title_id = title.id, base_url = %self.base_url, "Catalog title upserted");
        Ok(title)
    }

    async fn delete_title(&self, id: DbId) -> Result<bool, CoreError> {
        let response = self
            .client
            .delete(self.title_url(id))
            .send()
            .await
            .map_err(CatalogClientError::from)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        Self::check_status(response).await?;
        tracing::info!(title_id = id, base_url = %self.base_url, "Catalog title deleted");
        Ok(true)
    }
}
