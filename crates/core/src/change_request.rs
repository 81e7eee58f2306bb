//! Change-request model.
//!
//! A change-request is a user-submitted catalog change awaiting moderation.
//! It is created by the submission builder, mutated only by the moderation
//! console, and removed from the queue once approved.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::title::TitleFields;
use crate::types::{DbId, Timestamp};

/// Which dialog a change-request originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Edit,
    Add,
    Move,
    Delete,
}

/// All source kinds, in display order.
pub const ALL_SOURCE_KINDS: &[SourceKind] = &[
    SourceKind::Edit,
    SourceKind::Add,
    SourceKind::Move,
    SourceKind::Delete,
];

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Edit => "edit",
            SourceKind::Add => "add",
            SourceKind::Move => "move",
            SourceKind::Delete => "delete",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        ALL_SOURCE_KINDS
            .iter()
            .copied()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid source kind '{value}'. Must be one of: edit, add, move, delete"
                ))
            })
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status. Requests are removed from the queue on approval, so
/// `Approved` is only ever seen on the request returned by an approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
}

/// A well-formed change-request ready to be enqueued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewChangeRequest {
    pub source: SourceKind,
    /// Absent for `add`.
    pub target_title_id: Option<DbId>,
    pub service_id: DbId,
    /// Only set for `move`.
    pub destination_service_id: Option<DbId>,
    #[serde(default)]
    pub payload: TitleFields,
    /// Required for `delete`.
    pub reason: Option<String>,
}

/// A change-request held by the moderation queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    pub id: DbId,
    pub source: SourceKind,
    pub target_title_id: Option<DbId>,
    pub service_id: DbId,
    pub destination_service_id: Option<DbId>,
    pub payload: TitleFields,
    pub reason: Option<String>,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ChangeRequest {
    /// The enqueue-time view of this request, used to re-run submission
    /// rules after an admin edit.
    pub fn as_new(&self) -> NewChangeRequest {
        NewChangeRequest {
            source: self.source,
            target_title_id: self.target_title_id,
            service_id: self.service_id,
            destination_service_id: self.destination_service_id,
            payload: self.payload.clone(),
            reason: self.reason.clone(),
        }
    }

    /// Apply an admin edit in place. The source kind never changes.
    pub fn apply_edit(&mut self, edit: ChangeRequestEdit) {
        if edit.target_title_id.is_some() {
            self.target_title_id = edit.target_title_id;
        }
        if let Some(service_id) = edit.service_id {
            self.service_id = service_id;
        }
        if edit.destination_service_id.is_some() {
            self.destination_service_id = edit.destination_service_id;
        }
        if let Some(payload) = edit.payload {
            self.payload.merge(payload);
        }
        if edit.reason.is_some() {
            self.reason = edit.reason;
        }
    }
}

/// Admin modifications to a pending request. Absent fields are unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequestEdit {
    pub target_title_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub destination_service_id: Option<DbId>,
    pub payload: Option<TitleFields>,
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_edit() -> ChangeRequest {
        let now = chrono::Utc::now();
        ChangeRequest {
            id: 1,
            source: SourceKind::Edit,
            target_title_id: Some(10),
            service_id: 2,
            destination_service_id: None,
            payload: TitleFields {
                name: Some("Old".into()),
                year: Some(1990),
                ..Default::default()
            },
            reason: None,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_source_kind_parse_accepts_all_kinds() {
        for kind in ALL_SOURCE_KINDS {
            assert_eq!(SourceKind::parse(kind.as_str()).unwrap(), *kind);
        }
        assert!(SourceKind::parse("rename").is_err());
    }

    #[test]
    fn test_source_kind_serializes_lowercase() {
        let json = serde_json::to_string(&SourceKind::Delete).unwrap();
        assert_eq!(json, "\"delete\"");
    }

    #[test]
    fn test_apply_edit_merges_payload_fields() {
        let mut request = pending_edit();
        request.apply_edit(ChangeRequestEdit {
            payload: Some(TitleFields {
                name: Some("New".into()),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(request.payload.name.as_deref(), Some("New"));
        assert_eq!(request.payload.year, Some(1990));
        assert_eq!(request.source, SourceKind::Edit);
    }

    #[test]
    fn test_apply_edit_can_retarget() {
        let mut request = pending_edit();
        request.apply_edit(ChangeRequestEdit {
            target_title_id: Some(11),
            service_id: Some(4),
            ..Default::default()
        });
        assert_eq!(request.target_title_id, Some(11));
        assert_eq!(request.service_id, 4);
    }

    #[test]
    fn test_as_new_preserves_fields() {
        let request = pending_edit();
        let new = request.as_new();
        assert_eq!(new.source, SourceKind::Edit);
        assert_eq!(new.target_title_id, Some(10));
        assert_eq!(new.payload, request.payload);
    }
}
