//! Repository for the `brand_makers` table.

use catalog_core::types::DbId;
use sqlx::PgPool;

use crate::models::brand_maker::{BrandMaker, BrandMakerLabel, CreateBrandMaker, UpdateBrandMaker};

const COLUMNS: &str =
    "id, maker_id, title, code, brand_id, prov_brand_id, created_at, updated_at";

/// Provides CRUD operations for supplier brand mappings.
pub struct BrandMakerRepo;

impl BrandMakerRepo {
    pub async fn create(pool: &PgPool, input: &CreateBrandMaker) -> Result<BrandMaker, sqlx::Error> {
        let query = format!(
            "INSERT INTO brand_makers (maker_id, title, code, brand_id, prov_brand_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BrandMaker>(&query)
            .bind(input.maker_id)
            .bind(&input.title)
            .bind(&input.code)
            .bind(input.brand_id)
            .bind(&input.prov_brand_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BrandMaker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brand_makers WHERE id = $1");
        sqlx::query_as::<_, BrandMaker>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<BrandMaker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brand_makers ORDER BY maker_id, title");
        sqlx::query_as::<_, BrandMaker>(&query).fetch_all(pool).await
    }

    /// Brand mappings of one supplier.
    pub async fn list_by_maker(pool: &PgPool, maker_id: DbId) -> Result<Vec<BrandMaker>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brand_makers WHERE maker_id = $1 ORDER BY title");
        sqlx::query_as::<_, BrandMaker>(&query)
            .bind(maker_id)
            .fetch_all(pool)
            .await
    }

    /// Choice labels for every mapping, e.g. `"Ikea (Acme)"`.
    pub async fn labels(pool: &PgPool) -> Result<Vec<BrandMakerLabel>, sqlx::Error> {
        sqlx::query_as::<_, BrandMakerLabel>(
            "SELECT b.id, b.title, m.official AS maker_official \
             FROM brand_makers b JOIN makers m ON m.id = b.maker_id \
             ORDER BY m.official, b.title",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBrandMaker,
    ) -> Result<Option<BrandMaker>, sqlx::Error> {
        let query = format!(
            "UPDATE brand_makers SET \
                 title = COALESCE($2, title), \
                 code = COALESCE($3, code), \
                 brand_id = CASE WHEN $6 THEN $4::BIGINT ELSE brand_id END, \
                 prov_brand_id = COALESCE($5, prov_brand_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BrandMaker>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.code)
            .bind(input.brand_id.flatten())
            .bind(&input.prov_brand_id)
            .bind(input.brand_id.is_some())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brand_makers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
