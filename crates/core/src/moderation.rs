//! Moderation queue seam and an in-memory implementation.
//!
//! The queue holds pending change-requests keyed by id, in submission
//! order. It is injected wherever it is needed (the submission builder, the
//! moderation console, HTTP state) instead of living in shared global state.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::change_request::{ChangeRequest, NewChangeRequest, RequestStatus};
use crate::error::CoreError;
use crate::types::DbId;

#[async_trait]
pub trait ModerationQueue: Send + Sync {
    /// Append a request, assigning it a fresh unique id.
    async fn enqueue(&self, request: NewChangeRequest) -> Result<ChangeRequest, CoreError>;

    /// All pending requests, oldest submission first.
    async fn list(&self) -> Result<Vec<ChangeRequest>, CoreError>;

    async fn get(&self, id: DbId) -> Result<Option<ChangeRequest>, CoreError>;

    /// Persist an edited request. Returns `Ok(None)` if it is no longer queued.
    async fn update(&self, request: &ChangeRequest) -> Result<Option<ChangeRequest>, CoreError>;

    /// Drop a request. Returns `false` if it was not queued.
    async fn remove(&self, id: DbId) -> Result<bool, CoreError>;
}

// ---------------------------------------------------------------------------
// In-memory queue
// ---------------------------------------------------------------------------

#[derive(Default)]
struct QueueInner {
    next_id: DbId,
    requests: BTreeMap<DbId, ChangeRequest>,
}

/// Process-local queue. Ids are monotonically increasing and never reused,
/// so key order is submission order.
#[derive(Default)]
pub struct InMemoryModerationQueue {
    inner: Mutex<QueueInner>,
}

impl InMemoryModerationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.requests.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ModerationQueue for InMemoryModerationQueue {
    async fn enqueue(&self, request: NewChangeRequest) -> Result<ChangeRequest, CoreError> {
        let mut inner = self.inner.lock().await;
        inner.next_id += 1;
        let id = inner.next_id;
        let now = chrono::Utc::now();
        let stored = ChangeRequest {
            id,
            source: request.source,
            target_title_id: request.target_title_id,
            service_id: request.service_id,
            destination_service_id: request.destination_service_id,
            payload: request.payload,
            reason: request.reason,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        inner.requests.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<ChangeRequest>, CoreError> {
        Ok(self.inner.lock().await.requests.values().cloned().collect())
    }

    async fn get(&self, id: DbId) -> Result<Option<ChangeRequest>, CoreError> {
        Ok(self.inner.lock().await.requests.get(&id).cloned())
    }

    async fn update(&self, request: &ChangeRequest) -> Result<Option<ChangeRequest>, CoreError> {
        let mut inner = self.inner.lock().await;
        let Some(slot) = inner.requests.get_mut(&request.id) else {
            return Ok(None);
        };
        let mut updated = request.clone();
        updated.created_at = slot.created_at;
        updated.updated_at = chrono::Utc::now();
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn remove(&self, id: DbId) -> Result<bool, CoreError> {
        Ok(self.inner.lock().await.requests.remove(&id).is_some())
    }
}
