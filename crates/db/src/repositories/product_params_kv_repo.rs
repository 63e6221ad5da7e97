//! Repository for the `product_params_kvs` table.

use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::product_params_kv::{CreateProductParamsKv, ProductParamsKv};

const COLUMNS: &str = "id, product_id, abbr, name, value, position, created_at, updated_at";

pub struct ProductParamsKvRepo;

impl ProductParamsKvRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
        input: &CreateProductParamsKv,
    ) -> Result<ProductParamsKv, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_params_kvs (product_id, abbr, name, value, position) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductParamsKv>(&query)
            .bind(product_id)
            .bind(&input.abbr)
            .bind(&input.name)
            .bind(&input.value)
            .bind(input.position)
            .fetch_one(executor)
            .await
    }

    /// Parameters of a product in display order.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductParamsKv>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_params_kvs WHERE product_id = $1 \
             ORDER BY position NULLS LAST, id"
        );
        sqlx::query_as::<_, ProductParamsKv>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete_for_product<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_params_kvs WHERE product_id = $1")
            .bind(product_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
