//! Watch history row model.

use fwip_core::types::{DbId, Timestamp};
use fwip_core::watch::WatchEntry;
use sqlx::FromRow;

/// A row from the `watch_history` table.
#[derive(Debug, Clone, FromRow)]
pub struct WatchHistoryRow {
    pub user_id: DbId,
    pub title_id: DbId,
    pub watched: bool,
    pub important: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<WatchHistoryRow> for WatchEntry {
    fn from(row: WatchHistoryRow) -> Self {
        WatchEntry {
            user_id: row.user_id,
            title_id: row.title_id,
            watched: row.watched,
            important: row.important,
            updated_at: row.updated_at,
        }
    }
}
