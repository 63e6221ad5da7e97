//! Repository for the `filters` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::filter::{CreateFilter, Filter, UpdateFilter};

const COLUMNS: &str = "id, title, name, value, type, position, created_at, updated_at";

pub struct FilterRepo;

impl FilterRepo {
    pub async fn create(pool: &PgPool, input: &CreateFilter) -> Result<Filter, sqlx::Error> {
        let query = format!(
            "INSERT INTO filters (title, name, value, type, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Filter>(&query)
            .bind(&input.title)
            .bind(&input.name)
            .bind(&input.value)
            .bind(input.kind.as_str())
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Filter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM filters WHERE id = $1");
        sqlx::query_as::<_, Filter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All filters in storefront order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Filter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM filters ORDER BY position, id");
        sqlx::query_as::<_, Filter>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateFilter,
    ) -> Result<Option<Filter>, sqlx::Error> {
        let query = format!(
            "UPDATE filters SET \
                 title = COALESCE($2, title), \
                 name = COALESCE($3, name), \
                 value = COALESCE($4, value), \
                 type = COALESCE($5, type), \
                 position = COALESCE($6, position) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Filter>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.name)
            .bind(&input.value)
            .bind(input.kind.map(|k| k.as_str()))
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM filters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
