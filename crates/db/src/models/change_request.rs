//! Change-request row model (moderation queue).

use fwip_core::change_request::{ChangeRequest, RequestStatus, SourceKind};
use fwip_core::error::CoreError;
use fwip_core::title::TitleFields;
use fwip_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// Stored status of a queued request.
pub const STATUS_PENDING: &str = "pending";

/// A row from the `change_requests` table.
#[derive(Debug, Clone, FromRow)]
pub struct ChangeRequestRow {
    pub id: DbId,
    pub source: String,
    pub target_title_id: Option<DbId>,
    pub service_id: DbId,
    pub destination_service_id: Option<DbId>,
    pub payload: Json<TitleFields>,
    pub reason: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<ChangeRequestRow> for ChangeRequest {
    type Error = CoreError;

    fn try_from(row: ChangeRequestRow) -> Result<Self, Self::Error> {
        let status = match row.status.as_str() {
            "pending" => RequestStatus::Pending,
            "approved" => RequestStatus::Approved,
            other => {
                return Err(CoreError::Internal(format!(
                    "change request {} has unknown status '{other}'",
                    row.id
                )))
            }
        };
        Ok(ChangeRequest {
            id: row.id,
            source: SourceKind::parse(&row.source)?,
            target_title_id: row.target_title_id,
            service_id: row.service_id,
            destination_service_id: row.destination_service_id,
            payload: row.payload.0,
            reason: row.reason,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
