//! Repository for the `change_requests` table (moderation queue).

use fwip_core::change_request::{ChangeRequest, NewChangeRequest};
use fwip_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::change_request::{ChangeRequestRow, STATUS_PENDING};

const COLUMNS: &str = "id, source, target_title_id, service_id, destination_service_id, \
    payload, reason, status, created_at, updated_at";

/// Provides queue operations over pending change-requests.
pub struct ChangeRequestRepo;

impl ChangeRequestRepo {
    /// Insert a new pending request, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NewChangeRequest,
    ) -> Result<ChangeRequestRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_requests
                (source, target_title_id, service_id, destination_service_id, payload, reason)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(input.source.as_str())
            .bind(input.target_title_id)
            .bind(input.service_id)
            .bind(input.destination_service_id)
            .bind(Json(&input.payload))
            .bind(&input.reason)
            .fetch_one(pool)
            .await
    }

    /// List pending requests in submission order (oldest first).
    pub async fn list_pending(pool: &PgPool) -> Result<Vec<ChangeRequestRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_requests WHERE status = $1 ORDER BY id ASC"
        );
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(STATUS_PENDING)
            .fetch_all(pool)
            .await
    }

    /// Find a pending request by id.
    pub async fn find_pending_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ChangeRequestRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM change_requests WHERE id = $1 AND status = $2");
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(id)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the editable columns of a pending request.
    ///
    /// Returns `None` if the request is no longer pending.
    pub async fn update(
        pool: &PgPool,
        request: &ChangeRequest,
    ) -> Result<Option<ChangeRequestRow>, sqlx::Error> {
        let query = format!(
            "UPDATE change_requests SET
                target_title_id = $2,
                service_id = $3,
                destination_service_id = $4,
                payload = $5,
                reason = $6,
                updated_at = NOW()
             WHERE id = $1 AND status = $7
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeRequestRow>(&query)
            .bind(request.id)
            .bind(request.target_title_id)
            .bind(request.service_id)
            .bind(request.destination_service_id)
            .bind(Json(&request.payload))
            .bind(&request.reason)
            .bind(STATUS_PENDING)
            .fetch_optional(pool)
            .await
    }

    /// Remove a request from the queue. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM change_requests WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
