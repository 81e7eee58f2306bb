//! Repository for the `titles` table.

use fwip_core::title::Title;
use fwip_core::types::DbId;
use sqlx::PgPool;

use crate::models::title::TitleRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, service_id, kind, imdb_id, year, release_date, \
    runtime_minutes, episode_runtime_minutes, episode_count, rating, director, cast_members, \
    description, created_at, updated_at";

/// Provides CRUD operations for catalog titles.
pub struct TitleRepo;

impl TitleRepo {
    /// Insert a new title, returning the created row. `title.id` is ignored.
    pub async fn create(pool: &PgPool, title: &Title) -> Result<TitleRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO titles
                (name, service_id, kind, imdb_id, year, release_date, runtime_minutes,
                 episode_runtime_minutes, episode_count, rating, director, cast_members,
                 description)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(&title.name)
            .bind(title.service_id)
            .bind(title.kind.as_str())
            .bind(&title.imdb_id)
            .bind(title.year)
            .bind(title.release_date)
            .bind(title.runtime_minutes)
            .bind(title.episode_runtime_minutes)
            .bind(title.episode_count)
            .bind(&title.rating)
            .bind(&title.director)
            .bind(&title.cast)
            .bind(&title.description)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<TitleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles WHERE id = $1");
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all titles ordered by name, then id.
    pub async fn list(pool: &PgPool) -> Result<Vec<TitleRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM titles ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, TitleRow>(&query).fetch_all(pool).await
    }

    /// List titles on one service ordered by name, then id.
    pub async fn list_by_service(
        pool: &PgPool,
        service_id: DbId,
    ) -> Result<Vec<TitleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM titles WHERE service_id = $1 ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(service_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite every column of a title except its id and `created_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        title: &Title,
    ) -> Result<Option<TitleRow>, sqlx::Error> {
        let query = format!(
            "UPDATE titles SET
                name = $2,
                service_id = $3,
                kind = $4,
                imdb_id = $5,
                year = $6,
                release_date = $7,
                runtime_minutes = $8,
                episode_runtime_minutes = $9,
                episode_count = $10,
                rating = $11,
                director = $12,
                cast_members = $13,
                description = $14,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TitleRow>(&query)
            .bind(id)
            .bind(&title.name)
            .bind(title.service_id)
            .bind(title.kind.as_str())
            .bind(&title.imdb_id)
            .bind(title.year)
            .bind(title.release_date)
            .bind(title.runtime_minutes)
            .bind(title.episode_runtime_minutes)
            .bind(title.episode_count)
            .bind(&title.rating)
            .bind(&title.director)
            .bind(&title.cast)
            .bind(&title.description)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a title. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM titles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
