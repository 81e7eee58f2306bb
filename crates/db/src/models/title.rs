//! Title row model.

use chrono::NaiveDate;
use fwip_core::error::CoreError;
use fwip_core::title::{Title, TitleKind};
use fwip_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `titles` table.
#[derive(Debug, Clone, FromRow)]
pub struct TitleRow {
    pub id: DbId,
    pub name: String,
    pub service_id: DbId,
    pub kind: String,
    pub imdb_id: Option<String>,
    pub year: Option<i32>,
    pub release_date: Option<NaiveDate>,
    pub runtime_minutes: Option<i32>,
    pub episode_runtime_minutes: Option<i32>,
    pub episode_count: Option<i32>,
    pub rating: Option<String>,
    pub director: Option<String>,
    pub cast_members: Vec<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TitleRow> for Title {
    type Error = CoreError;

    fn try_from(row: TitleRow) -> Result<Self, Self::Error> {
        Ok(Title {
            id: row.id,
            name: row.name,
            service_id: row.service_id,
            kind: TitleKind::parse(&row.kind)?,
            imdb_id: row.imdb_id,
            year: row.year,
            release_date: row.release_date,
            runtime_minutes: row.runtime_minutes,
            episode_runtime_minutes: row.episode_runtime_minutes,
            episode_count: row.episode_count,
            rating: row.rating,
            director: row.director,
            cast: row.cast_members,
            description: row.description,
        })
    }
}
