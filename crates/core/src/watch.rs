//! Per-user watch history.
//!
//! Watched / important flags belong to a user, not to the catalog, so they
//! live in their own records keyed by `(user_id, title_id)`. Writes bypass
//! moderation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::title::Title;
use crate::types::{DbId, Timestamp};

/// One user's flags for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchEntry {
    pub user_id: DbId,
    pub title_id: DbId,
    pub watched: bool,
    pub important: bool,
    pub updated_at: Timestamp,
}

/// Sparse watch-state write. Absent flags stay unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchStatePatch {
    pub watched: Option<bool>,
    pub important: Option<bool>,
}

impl WatchStatePatch {
    pub fn is_empty(&self) -> bool {
        self.watched.is_none() && self.important.is_none()
    }
}

/// Titles on a user's seen list, in catalog order.
pub fn seen_titles<'a>(titles: &'a [Title], history: &[WatchEntry]) -> Vec<&'a Title> {
    let seen: HashSet<DbId> = history
        .iter()
        .filter(|entry| entry.watched)
        .map(|entry| entry.title_id)
        .collect();
    titles.iter().filter(|t| seen.contains(&t.id)).collect()
}
