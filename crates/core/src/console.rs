//! Moderation console: admin review, payload edits, and approval.
//!
//! Approval plans exactly one catalog write from the (possibly edited)
//! request with [`plan_write`], dispatches it, and only then removes the
//! request from the queue. A failed write leaves the request pending.

use std::sync::Arc;

use serde::Serialize;

use crate::catalog::CatalogStore;
use crate::change_request::{ChangeRequest, ChangeRequestEdit, RequestStatus, SourceKind};
use crate::error::CoreError;
use crate::moderation::ModerationQueue;
use crate::submission::{check_target, validate_new_request};
use crate::title::{Title, TitleWrite};
use crate::types::DbId;

/// The single catalog write an approval performs.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogWrite {
    Upsert(TitleWrite),
    Delete { title_id: DbId },
}

/// What an approval changed in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum AppliedChange {
    Upserted { title: Title },
    Deleted { title_id: DbId },
}

/// Result of a successful approval.
#[derive(Debug, Clone, Serialize)]
pub struct ApprovalOutcome {
    /// The request as approved, with `status = approved`.
    pub request: ChangeRequest,
    pub applied: AppliedChange,
}

/// Map a change-request onto its catalog write.
///
/// - `add`    → insert on `service_id`
/// - `edit`   → update of the target, which stays on its service
/// - `move`   → update of the target onto `destination_service_id`
/// - `delete` → delete of the target
pub fn plan_write(request: &ChangeRequest) -> Result<CatalogWrite, CoreError> {
    let target = || {
        request.target_title_id.ok_or_else(|| {
            CoreError::Validation(format!(
                "{} request {} has no target title",
                request.source, request.id
            ))
        })
    };

    let write = match request.source {
        SourceKind::Add => CatalogWrite::Upsert(TitleWrite {
            title_id: None,
            service_id: Some(request.service_id),
            fields: request.payload.clone(),
        }),
        SourceKind::Edit => CatalogWrite::Upsert(TitleWrite {
            title_id: Some(target()?),
            service_id: None,
            fields: request.payload.clone(),
        }),
        SourceKind::Move => {
            let destination = request.destination_service_id.ok_or_else(|| {
                CoreError::Validation(format!(
                    "move request {} has no destination service",
                    request.id
                ))
            })?;
            CatalogWrite::Upsert(TitleWrite {
                title_id: Some(target()?),
                service_id: Some(destination),
                fields: request.payload.clone(),
            })
        }
        SourceKind::Delete => CatalogWrite::Delete {
            title_id: target()?,
        },
    };
    Ok(write)
}

/// Admin-facing operations over a queue and a catalog.
#[derive(Clone)]
pub struct ModerationConsole {
    queue: Arc<dyn ModerationQueue>,
    catalog: Arc<dyn CatalogStore>,
}

impl ModerationConsole {
    pub fn new(queue: Arc<dyn ModerationQueue>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { queue, catalog }
    }

    /// Pending requests in submission order.
    pub async fn pending(&self) -> Result<Vec<ChangeRequest>, CoreError> {
        self.queue.list().await
    }

    pub async fn get(&self, id: DbId) -> Result<ChangeRequest, CoreError> {
        self.queue.get(id).await?.ok_or(CoreError::NotFound {
            entity: "ChangeRequest",
            id,
        })
    }

    /// Modify a pending request's payload. The edited request must still
    /// satisfy the submission rules for its source kind and its target.
    pub async fn edit(
        &self,
        id: DbId,
        edit: ChangeRequestEdit,
    ) -> Result<ChangeRequest, CoreError> {
        let mut request = self.get(id).await?;
        request.apply_edit(edit);
        let checked = request.as_new();
        validate_new_request(&checked)?;
        check_target(self.catalog.as_ref(), &checked).await?;

        let updated = self.queue.update(&request).await?.ok_or(CoreError::NotFound {
            entity: "ChangeRequest",
            id,
        })?;
        tracing::info!(request_id = id, source = %updated.source, "Change request edited");
        Ok(updated)
    }

    /// Apply a pending request to the catalog and drop it from the queue.
    pub async fn approve(&self, id: DbId) -> Result<ApprovalOutcome, CoreError> {
        let request = self.get(id).await?;
        let write = plan_write(&request)?;

        let applied = match write {
            CatalogWrite::Upsert(write) => {
                let title = self.catalog.upsert_title(&write).await.map_err(|e| {
                    tracing::warn!(request_id = id, error = %e, "Catalog upsert failed, request left pending");
                    e
                })?;
                AppliedChange::Upserted { title }
            }
            CatalogWrite::Delete { title_id } => {
                let deleted = self.catalog.delete_title(title_id).await.map_err(|e| {
                    tracing::warn!(request_id = id, error = %e, "Catalog delete failed, request left pending");
                    e
                })?;
                if !deleted {
                    tracing::warn!(request_id = id, title_id, "Delete target missing, request left pending");
                    return Err(CoreError::NotFound {
                        entity: "Title",
                        id: title_id,
                    });
                }
                AppliedChange::Deleted { title_id }
            }
        };

        if !self.queue.remove(id).await? {
            tracing::warn!(request_id = id, "Approved request was already gone from the queue");
        }

        tracing::info!(request_id = id, source = %request.source, "Change request approved");

        Ok(ApprovalOutcome {
            request: ChangeRequest {
                status: RequestStatus::Approved,
                ..request
            },
            applied,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::change_request::NewChangeRequest;
    use crate::moderation::InMemoryModerationQueue;
    use crate::title::{TitleFields, TitleKind};

    /// Catalog fake that records every write and can be told to fail.
    #[derive(Default)]
    struct RecordingCatalog {
        upserts: Mutex<Vec<TitleWrite>>,
        deletes: Mutex<Vec<DbId>>,
        fail: bool,
    }

    impl RecordingCatalog {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl CatalogStore for RecordingCatalog {
        async fn list_titles(&self, _service_id: Option<DbId>) -> Result<Vec<Title>, CoreError> {
            Ok(vec![])
        }

        /// Title 7 is a series on service 1; nothing else exists.
        async fn get_title(&self, id: DbId) -> Result<Option<Title>, CoreError> {
            if id != 7 {
                return Ok(None);
            }
            let mut title = TitleWrite {
                title_id: None,
                service_id: Some(1),
                fields: TitleFields {
                    name: Some("Existing".into()),
                    kind: Some(TitleKind::Tv),
                    ..Default::default()
                },
            }
            .to_new_title()?;
            title.id = 7;
            Ok(Some(title))
        }

        async fn upsert_title(&self, write: &TitleWrite) -> Result<Title, CoreError> {
            if self.fail {
                return Err(CoreError::Upstream("catalog unavailable".into()));
            }
            self.upserts.lock().unwrap().push(write.clone());
            let mut title = TitleWrite {
                fields: TitleFields {
                    name: Some(write.fields.name.clone().unwrap_or_else(|| "Existing".into())),
                    kind: Some(write.fields.kind.unwrap_or(TitleKind::Movie)),
                    ..write.fields.clone()
                },
                service_id: Some(write.service_id.unwrap_or(1)),
                ..write.clone()
            }
            .to_new_title()?;
            title.id = write.title_id.unwrap_or(100);
            Ok(title)
        }

        async fn delete_title(&self, id: DbId) -> Result<bool, CoreError> {
            if self.fail {
                return Err(CoreError::Upstream("catalog unavailable".into()));
            }
            self.deletes.lock().unwrap().push(id);
            Ok(id != 404)
        }
    }

    fn console_with(
        catalog: Arc<RecordingCatalog>,
    ) -> (ModerationConsole, Arc<InMemoryModerationQueue>) {
        let queue = Arc::new(InMemoryModerationQueue::new());
        let console = ModerationConsole::new(queue.clone(), catalog);
        (console, queue)
    }

    fn new_request(source: SourceKind) -> NewChangeRequest {
        let mut request = NewChangeRequest {
            source,
            target_title_id: Some(7),
            service_id: 1,
            destination_service_id: None,
            payload: TitleFields::default(),
            reason: None,
        };
        match source {
            SourceKind::Add => {
                request.target_title_id = None;
                request.payload.name = Some("Added".into());
                request.payload.kind = Some(TitleKind::Tv);
            }
            SourceKind::Edit => request.payload.year = Some(2010),
            SourceKind::Move => request.destination_service_id = Some(2),
            SourceKind::Delete => request.reason = Some("Expired".into()),
        }
        request
    }

    #[test]
    fn test_plan_write_move_targets_destination_service() {
        let now = chrono::Utc::now();
        let request = ChangeRequest {
            id: 1,
            source: SourceKind::Move,
            target_title_id: Some(7),
            service_id: 1,
            destination_service_id: Some(2),
            payload: TitleFields::default(),
            reason: None,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        assert_matches!(
            plan_write(&request),
            Ok(CatalogWrite::Upsert(TitleWrite { title_id: Some(7), service_id: Some(2), .. }))
        );
    }

    #[test]
    fn test_plan_write_edit_never_changes_service() {
        let now = chrono::Utc::now();
        let request = ChangeRequest {
            id: 2,
            source: SourceKind::Edit,
            target_title_id: Some(7),
            service_id: 2,
            destination_service_id: None,
            payload: TitleFields {
                year: Some(2016),
                ..Default::default()
            },
            reason: None,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        assert_matches!(
            plan_write(&request),
            Ok(CatalogWrite::Upsert(TitleWrite { title_id: Some(7), service_id: None, .. }))
        );
    }

    #[tokio::test]
    async fn test_approve_upsert_kinds_issue_exactly_one_upsert() {
        for source in [SourceKind::Add, SourceKind::Edit, SourceKind::Move] {
            let catalog = Arc::new(RecordingCatalog::default());
            let (console, queue) = console_with(catalog.clone());
            let stored = queue.enqueue(new_request(source)).await.unwrap();

            let outcome = console.approve(stored.id).await.unwrap();

            assert_eq!(catalog.upserts.lock().unwrap().len(), 1, "{source}");
            assert!(catalog.deletes.lock().unwrap().is_empty(), "{source}");
            assert_eq!(outcome.request.status, RequestStatus::Approved);
            assert_matches!(outcome.applied, AppliedChange::Upserted { .. });
            assert!(queue.is_empty().await, "{source}");
        }
    }

    #[tokio::test]
    async fn test_approve_delete_issues_exactly_one_delete() {
        let catalog = Arc::new(RecordingCatalog::default());
        let (console, queue) = console_with(catalog.clone());
        let stored = queue.enqueue(new_request(SourceKind::Delete)).await.unwrap();

        let outcome = console.approve(stored.id).await.unwrap();

        assert_eq!(*catalog.deletes.lock().unwrap(), vec![7]);
        assert!(catalog.upserts.lock().unwrap().is_empty());
        assert_matches!(outcome.applied, AppliedChange::Deleted { title_id: 7 });
        assert!(queue.is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_request_pending() {
        let catalog = Arc::new(RecordingCatalog::failing());
        let (console, queue) = console_with(catalog);
        let stored = queue.enqueue(new_request(SourceKind::Edit)).await.unwrap();

        assert_matches!(console.approve(stored.id).await, Err(CoreError::Upstream(_)));

        let pending = console.pending().await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_of_missing_title_leaves_request_pending() {
        let catalog = Arc::new(RecordingCatalog::default());
        let (console, queue) = console_with(catalog);
        let mut request = new_request(SourceKind::Delete);
        request.target_title_id = Some(404);
        let stored = queue.enqueue(request).await.unwrap();

        assert_matches!(
            console.approve(stored.id).await,
            Err(CoreError::NotFound { entity: "Title", id: 404 })
        );
        assert_eq!(queue.len().await, 1);
    }

    #[tokio::test]
    async fn test_approve_unknown_request_is_not_found() {
        let (console, _queue) = console_with(Arc::new(RecordingCatalog::default()));
        assert_matches!(
            console.approve(99).await,
            Err(CoreError::NotFound { entity: "ChangeRequest", id: 99 })
        );
    }

    #[tokio::test]
    async fn test_admin_edit_is_applied_on_approval() {
        let catalog = Arc::new(RecordingCatalog::default());
        let (console, queue) = console_with(catalog.clone());
        let stored = queue.enqueue(new_request(SourceKind::Edit)).await.unwrap();

        console
            .edit(
                stored.id,
                ChangeRequestEdit {
                    payload: Some(TitleFields {
                        name: Some("Corrected".into()),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        console.approve(stored.id).await.unwrap();

        let upserts = catalog.upserts.lock().unwrap();
        assert_eq!(upserts[0].fields.name.as_deref(), Some("Corrected"));
        assert_eq!(upserts[0].fields.year, Some(2010));
    }

    #[tokio::test]
    async fn test_admin_edit_cannot_rehome_an_edit() {
        let (console, queue) = console_with(Arc::new(RecordingCatalog::default()));
        let stored = queue.enqueue(new_request(SourceKind::Edit)).await.unwrap();

        let result = console
            .edit(
                stored.id,
                ChangeRequestEdit {
                    service_id: Some(2),
                    ..Default::default()
                },
            )
            .await;

        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(console.get(stored.id).await.unwrap().service_id, 1);
    }

    #[tokio::test]
    async fn test_admin_edit_to_missing_target_is_not_found() {
        let (console, queue) = console_with(Arc::new(RecordingCatalog::default()));
        let stored = queue.enqueue(new_request(SourceKind::Edit)).await.unwrap();

        let result = console
            .edit(
                stored.id,
                ChangeRequestEdit {
                    target_title_id: Some(8),
                    ..Default::default()
                },
            )
            .await;

        assert_matches!(result, Err(CoreError::NotFound { entity: "Title", id: 8 }));
    }

    #[tokio::test]
    async fn test_admin_edit_cannot_blank_delete_reason() {
        let (console, queue) = console_with(Arc::new(RecordingCatalog::default()));
        let stored = queue.enqueue(new_request(SourceKind::Delete)).await.unwrap();

        let result = console
            .edit(
                stored.id,
                ChangeRequestEdit {
                    reason: Some("  ".into()),
                    ..Default::default()
                },
            )
            .await;

        assert_matches!(result, Err(CoreError::Validation(_)));
        let unchanged = console.get(stored.id).await.unwrap();
        assert_eq!(unchanged.reason.as_deref(), Some("Expired"));
    }
}
