//! Repository for the `settings` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::settings::{CreateSettings, Settings, UpdateSettings};

const COLUMNS: &str = "id, title, content, created_at, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    pub async fn create(pool: &PgPool, input: &CreateSettings) -> Result<Settings, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (title, content) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Settings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE id = $1");
        sqlx::query_as::<_, Settings>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Settings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings ORDER BY id");
        sqlx::query_as::<_, Settings>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSettings,
    ) -> Result<Option<Settings>, sqlx::Error> {
        let query = format!(
            "UPDATE settings SET \
                 title = COALESCE($2, title), \
                 content = CASE WHEN $4 THEN $3::TEXT ELSE content END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.content.as_ref().and_then(|v| v.as_deref()))
            .bind(input.content.is_some())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM settings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
