//! Repository for the `product_pack_kvs` table.

use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::product_pack_kv::{CreateProductPackKv, ProductPackKv};

const COLUMNS: &str =
    "id, maker_id, product_id, pack_id, abbr, name, value, position, created_at, updated_at";

pub struct ProductPackKvRepo;

impl ProductPackKvRepo {
    /// Insert a pack attribute. `maker_id` is copied from the product; an
    /// unknown product yields `RowNotFound`.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
        input: &CreateProductPackKv,
    ) -> Result<ProductPackKv, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_pack_kvs (maker_id, product_id, pack_id, abbr, name, value, position) \
             SELECT p.maker_id, p.id, $2, $3, $4, $5, $6 FROM products p WHERE p.id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductPackKv>(&query)
            .bind(product_id)
            .bind(input.pack_id)
            .bind(&input.abbr)
            .bind(&input.name)
            .bind(&input.value)
            .bind(input.position)
            .fetch_one(executor)
            .await
    }

    /// Pack attributes grouped by pack, then in display order.
    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductPackKv>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_pack_kvs WHERE product_id = $1 \
             ORDER BY pack_id, position NULLS LAST, id"
        );
        sqlx::query_as::<_, ProductPackKv>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    pub async fn delete_for_product<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_pack_kvs WHERE product_id = $1")
            .bind(product_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
