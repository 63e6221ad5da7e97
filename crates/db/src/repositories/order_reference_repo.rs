//! Repository for the `order_references` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::order_reference::{CreateOrderReference, OrderReference, UpdateOrderReference};

const COLUMNS: &str =
    "id, name, official, field_name, field_order, position, created_at, updated_at";

pub struct OrderReferenceRepo;

impl OrderReferenceRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateOrderReference,
    ) -> Result<OrderReference, sqlx::Error> {
        let query = format!(
            "INSERT INTO order_references (name, official, field_name, field_order, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderReference>(&query)
            .bind(&input.name)
            .bind(&input.official)
            .bind(&input.field_name)
            .bind(input.field_order)
            .bind(input.position)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<OrderReference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM order_references WHERE id = $1");
        sqlx::query_as::<_, OrderReference>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<OrderReference>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM order_references ORDER BY position, id");
        sqlx::query_as::<_, OrderReference>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateOrderReference,
    ) -> Result<Option<OrderReference>, sqlx::Error> {
        let query = format!(
            "UPDATE order_references SET \
                 name = COALESCE($2, name), \
                 official = COALESCE($3, official), \
                 field_name = COALESCE($4, field_name), \
                 field_order = COALESCE($5, field_order), \
                 position = COALESCE($6, position) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OrderReference>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.official)
            .bind(&input.field_name)
            .bind(input.field_order)
            .bind(input.position)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM order_references WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
