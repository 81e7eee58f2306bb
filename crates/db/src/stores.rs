//! PostgreSQL-backed implementations of the `fwip_core` store traits.

use async_trait::async_trait;
use fwip_core::catalog::CatalogStore;
use fwip_core::change_request::{ChangeRequest, NewChangeRequest};
use fwip_core::error::CoreError;
use fwip_core::moderation::ModerationQueue;
use fwip_core::title::{validate_fields, Title, TitleWrite};
use fwip_core::types::DbId;

use crate::repositories::{ChangeRequestRepo, ServiceRepo, TitleRepo};
use crate::DbPool;

fn db_error(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Database error");
    CoreError::Internal(format!("Database error: {err}"))
}

async fn ensure_service_exists(pool: &DbPool, service_id: DbId) -> Result<(), CoreError> {
    ServiceRepo::find_by_id(pool, service_id)
        .await
        .map_err(db_error)?
        .ok_or(CoreError::NotFound {
            entity: "Service",
            id: service_id,
        })?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// The local catalog, stored in the `titles` table.
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: DbPool,
}

impl PgCatalogStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_titles(&self, service_id: Option<DbId>) -> Result<Vec<Title>, CoreError> {
        let rows = match service_id {
            Some(id) => TitleRepo::list_by_service(&self.pool, id).await,
            None => TitleRepo::list(&self.pool).await,
        }
        .map_err(db_error)?;
        rows.into_iter().map(Title::try_from).collect()
    }

    async fn get_title(&self, id: DbId) -> Result<Option<Title>, CoreError> {
        TitleRepo::find_by_id(&self.pool, id)
            .await
            .map_err(db_error)?
            .map(Title::try_from)
            .transpose()
    }

    async fn upsert_title(&self, write: &TitleWrite) -> Result<Title, CoreError> {
        if let Some(service_id) = write.service_id {
            ensure_service_exists(&self.pool, service_id).await?;
        }

        let Some(title_id) = write.title_id else {
            validate_fields(&write.fields, None)?;
            let title = write.to_new_title()?;
            let row = TitleRepo::create(&self.pool, &title)
                .await
                .map_err(db_error)?;
            tracing::info!(title_id = row.id, service_id = row.service_id, "Title created");
            return Title::try_from(row);
        };

        let mut title = self.get_title(title_id).await?.ok_or(CoreError::NotFound {
            entity: "Title",
            id: title_id,
        })?;
        validate_fields(&write.fields, Some(title.kind))?;
        title.apply(&write.fields);
        if let Some(service_id) = write.service_id {
            title.service_id = service_id;
        }

        let row = TitleRepo::update(&self.pool, title_id, &title)
            .await
            .map_err(db_error)?
            .ok_or(CoreError::NotFound {
                entity: "Title",
                id: title_id,
            })?;
        tracing::info!(title_id, service_id = row.service_id, "Title updated");
        Title::try_from(row)
    }

    async fn delete_title(&self, id: DbId) -> Result<bool, CoreError> {
        let deleted = TitleRepo::delete(&self.pool, id).await.map_err(db_error)?;
        if deleted {
            tracing::info!(title_id = id, "Title deleted");
        }
        Ok(deleted)
    }
}

// ---------------------------------------------------------------------------
// Moderation queue
// ---------------------------------------------------------------------------

/// The moderation queue, stored in the `change_requests` table.
#[derive(Clone)]
pub struct PgModerationQueue {
    pool: DbPool,
}

impl PgModerationQueue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModerationQueue for PgModerationQueue {
    async fn enqueue(&self, request: NewChangeRequest) -> Result<ChangeRequest, CoreError> {
        let row = ChangeRequestRepo::create(&self.pool, &request)
            .await
            .map_err(db_error)?;
        ChangeRequest::try_from(row)
    }

    async fn list(&self) -> Result<Vec<ChangeRequest>, CoreError> {
        ChangeRequestRepo::list_pending(&self.pool)
            .await
            .map_err(db_error)?
            .into_iter()
            .map(ChangeRequest::try_from)
            .collect()
    }

    async fn get(&self, id: DbId) -> Result<Option<ChangeRequest>, CoreError> {
        ChangeRequestRepo::find_pending_by_id(&self.pool, id)
            .await
            .map_err(db_error)?
            .map(ChangeRequest::try_from)
            .transpose()
    }

    async fn update(&self, request: &ChangeRequest) -> Result<Option<ChangeRequest>, CoreError> {
        ChangeRequestRepo::update(&self.pool, request)
            .await
            .map_err(db_error)?
            .map(ChangeRequest::try_from)
            .transpose()
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        ChangeRequestRepo::delete(&self.pool, id)
            .await
            .map_err(db_error)
    }
}
