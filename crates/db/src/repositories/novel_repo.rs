//! Repository for the `novels` table.

use fabula_core::types::DbId;
use sqlx::PgPool;

use crate::models::novel::{CreateNovel, Novel, UpdateNovel};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, year, plot, author_id, created_at, updated_at";

/// Provides CRUD operations for novels plus the by-author listing.
pub struct NovelRepo;

impl NovelRepo {
    /// Insert a new novel, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateNovel) -> Result<Novel, sqlx::Error> {
        let query = format!(
            "INSERT INTO novels (name, year, plot, author_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(&input.name)
            .bind(input.year)
            .bind(&input.plot)
            .bind(input.author_id)
            .fetch_one(pool)
            .await
    }

    /// Find a novel by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novels WHERE id = $1");
        sqlx::query_as::<_, Novel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all novels in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novels ORDER BY id ASC");
        sqlx::query_as::<_, Novel>(&query).fetch_all(pool).await
    }

    /// List the novels written by one author.
    pub async fn list_by_author(pool: &PgPool, author_id: DbId) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novels
             WHERE author_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(author_id)
            .fetch_all(pool)
            .await
    }

    /// Update a novel. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNovel,
    ) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!(
            "UPDATE novels SET
                name = COALESCE($2, name),
                year = COALESCE($3, year),
                plot = COALESCE($4, plot),
                author_id = COALESCE($5, author_id),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.year)
            .bind(&input.plot)
            .bind(input.author_id)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a novel. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM novels WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
