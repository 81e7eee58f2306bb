//! Repository for the `services` table.

use fwip_core::types::DbId;
use sqlx::PgPool;

use crate::models::service::Service;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Read access to streaming services.
pub struct ServiceRepo;

impl ServiceRepo {
    /// List all services, ordered by name ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services ORDER BY name ASC");
        sqlx::query_as::<_, Service>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Service>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM services WHERE id = $1");
        sqlx::query_as::<_, Service>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
