//! Repository for the `product_stocks` table.

use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::product_stock::{CreateProductStock, ProductStock};

const COLUMNS: &str = "id, maker_id, product_id, geo, type, value, created_at, updated_at";

pub struct ProductStockRepo;

impl ProductStockRepo {
    /// Insert a stock level, copying `maker_id` from the product.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
        input: &CreateProductStock,
    ) -> Result<ProductStock, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_stocks (maker_id, product_id, geo, type, value) \
             SELECT p.maker_id, p.id, $2, $3, $4 FROM products p WHERE p.id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductStock>(&query)
            .bind(product_id)
            .bind(&input.geo)
            .bind(&input.kind)
            .bind(input.value)
            .fetch_one(executor)
            .await
    }

    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductStock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_stocks WHERE product_id = $1 ORDER BY geo, type"
        );
        sqlx::query_as::<_, ProductStock>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Total quantity across all locations.
    pub async fn total_for_product(pool: &PgPool, product_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COALESCE(SUM(value), 0)::BIGINT FROM product_stocks WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete_for_product<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_stocks WHERE product_id = $1")
            .bind(product_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
