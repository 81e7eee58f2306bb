//! Catalog store seam.
//!
//! The canonical title catalog is reached through [`CatalogStore`] so the
//! moderation console and FWIP view work the same against the local
//! PostgreSQL catalog (`fwip-db`) or an external REST catalog
//! (`fwip-catalog`).

use async_trait::async_trait;

use crate::error::CoreError;
use crate::title::{Title, TitleWrite};
use crate::types::DbId;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// List titles, optionally restricted to one streaming service.
    async fn list_titles(&self, service_id: Option<DbId>) -> Result<Vec<Title>, CoreError>;

    /// Fetch one title. `Ok(None)` when it does not exist.
    async fn get_title(&self, id: DbId) -> Result<Option<Title>, CoreError>;

    /// Insert (`title_id = None`) or update a title.
    async fn upsert_title(&self, write: &TitleWrite) -> Result<Title, CoreError>;

    /// Remove a title. Returns `false` when no such title existed.
    async fn delete_title(&self, id: DbId) -> Result<bool, CoreError>;
}
