//! Repository for the `watch_history` table.

use fwip_core::types::DbId;
use fwip_core::watch::WatchStatePatch;
use sqlx::PgPool;

use crate::models::watch_history::WatchHistoryRow;

const COLUMNS: &str = "user_id, title_id, watched, important, created_at, updated_at";

/// Per-user watch flags, keyed by `(user_id, title_id)`.
pub struct WatchHistoryRepo;

impl WatchHistoryRepo {
    /// All entries for a user, most recently changed first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WatchHistoryRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM watch_history
             WHERE user_id = $1
             ORDER BY updated_at DESC, title_id ASC"
        );
        sqlx::query_as::<_, WatchHistoryRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        title_id: DbId,
    ) -> Result<Option<WatchHistoryRow>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM watch_history WHERE user_id = $1 AND title_id = $2");
        sqlx::query_as::<_, WatchHistoryRow>(&query)
            .bind(user_id)
            .bind(title_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or update one entry. Only non-`None` flags are applied; a new
    /// entry starts with both flags `false`.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        title_id: DbId,
        patch: &WatchStatePatch,
    ) -> Result<WatchHistoryRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO watch_history (user_id, title_id, watched, important)
             VALUES ($1, $2, COALESCE($3, FALSE), COALESCE($4, FALSE))
             ON CONFLICT (user_id, title_id) DO UPDATE SET
                watched = COALESCE($3, watch_history.watched),
                important = COALESCE($4, watch_history.important),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WatchHistoryRow>(&query)
            .bind(user_id)
            .bind(title_id)
            .bind(patch.watched)
            .bind(patch.important)
            .fetch_one(pool)
            .await
    }
}
