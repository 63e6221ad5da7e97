//! Repository for the `products` table and its category/filter links.

use catalog_core::error::CoreError;
use catalog_core::identity::FirstSave;
use catalog_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use super::{clamp_limit, clamp_offset};
use crate::error::DbError;
use crate::models::product::{CreateProduct, Product, ProductDraft, ProductListParams, UpdateProduct};

/// Column list for the `products` table used in SELECT queries.
const COLUMNS: &str = "\
    id, maker_id, parent_id, brand_maker_id, status_id, product_type_id, title, \
    prov_product_id, prov_main_product_id, slug_title, code, content, long_content, \
    price, stock, show, import_fl, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a product.
    ///
    /// Locally created products get `code` and `slug_title` derived from the
    /// title and the maker's display name. Imported products must bring both.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, DbError> {
        let mut tx = pool.begin().await?;
        let product = Self::create_in(&mut tx, input).await?;
        tx.commit().await?;
        Ok(product)
    }

    /// Insert a product within an existing transaction.
    pub async fn create_in(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateProduct,
    ) -> Result<Product, DbError> {
        let maker_official: Option<String> =
            sqlx::query_scalar("SELECT official FROM makers WHERE id = $1")
                .bind(input.maker_id)
                .fetch_optional(&mut **tx)
                .await?;
        let maker_official = maker_official.ok_or(CoreError::NotFound {
            entity: "Maker",
            id: input.maker_id,
        })?;

        let mut draft = ProductDraft::new(input, &maker_official);
        draft.prepare_save();
        if draft.import_fl && (draft.code.is_empty() || draft.slug_title.is_empty()) {
            return Err(CoreError::Validation(
                "Imported products require code and slug_title".to_string(),
            )
            .into());
        }

        let query = format!(
            "INSERT INTO products \
                 (maker_id, parent_id, brand_maker_id, status_id, product_type_id, title, \
                  prov_product_id, prov_main_product_id, slug_title, code, content, \
                  long_content, price, stock, show, import_fl) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, \
                     COALESCE($15, TRUE), $16) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Product>(&query)
            .bind(input.maker_id)
            .bind(input.parent_id)
            .bind(input.brand_maker_id)
            .bind(input.status_id)
            .bind(input.product_type_id)
            .bind(&input.title)
            .bind(&input.prov_product_id)
            .bind(&input.prov_main_product_id)
            .bind(&draft.slug_title)
            .bind(&draft.code)
            .bind(&input.content)
            .bind(&input.long_content)
            .bind(input.price)
            .bind(input.stock)
            .bind(input.show)
            .bind(input.import_fl)
            .fetch_one(&mut **tx)
            .await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(pool: &PgPool, slug_title: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE slug_title = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(slug_title)
            .fetch_optional(pool)
            .await
    }

    /// Find a product by the supplier's article number.
    pub async fn find_by_code(
        pool: &PgPool,
        maker_id: DbId,
        code: &str,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE maker_id = $1 AND code = $2");
        sqlx::query_as::<_, Product>(&query)
            .bind(maker_id)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List products ordered by price, unpriced products last.
    pub async fn list(pool: &PgPool, params: &ProductListParams) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products \
             WHERE ($1::BIGINT IS NULL OR maker_id = $1) \
               AND (NOT $2 OR show) \
             ORDER BY price ASC NULLS LAST, id \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(params.maker_id)
            .bind(params.only_visible)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Products of one supplier ordered by price.
    pub async fn list_by_maker(pool: &PgPool, maker_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE maker_id = $1 ORDER BY price ASC NULLS LAST, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(maker_id)
            .fetch_all(pool)
            .await
    }

    /// Variants of a main product.
    pub async fn children(pool: &PgPool, parent_id: DbId) -> Result<Vec<Product>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM products WHERE parent_id = $1 ORDER BY price ASC NULLS LAST, id"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Update mutable fields. Identifier columns are never touched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let product = Self::update_in(&mut tx, id, input).await?;
        tx.commit().await?;
        Ok(product)
    }

    /// Update a product within an existing transaction.
    pub async fn update_in(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                 parent_id = CASE WHEN $14 THEN $2::BIGINT ELSE parent_id END, \
                 brand_maker_id = CASE WHEN $15 THEN $3::BIGINT ELSE brand_maker_id END, \
                 status_id = CASE WHEN $16 THEN $4::BIGINT ELSE status_id END, \
                 product_type_id = CASE WHEN $17 THEN $5::BIGINT ELSE product_type_id END, \
                 title = COALESCE($6, title), \
                 prov_product_id = COALESCE($7, prov_product_id), \
                 prov_main_product_id = COALESCE($8, prov_main_product_id), \
                 content = COALESCE($9, content), \
                 long_content = COALESCE($10, long_content), \
                 price = CASE WHEN $18 THEN $11::NUMERIC ELSE price END, \
                 stock = CASE WHEN $19 THEN $12::INTEGER ELSE stock END, \
                 show = COALESCE($13, show) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(input.parent_id.flatten())
            .bind(input.brand_maker_id.flatten())
            .bind(input.status_id.flatten())
            .bind(input.product_type_id.flatten())
            .bind(&input.title)
            .bind(&input.prov_product_id)
            .bind(&input.prov_main_product_id)
            .bind(&input.content)
            .bind(&input.long_content)
            .bind(input.price.flatten())
            .bind(input.stock.flatten())
            .bind(input.show)
            .bind(input.parent_id.is_some())
            .bind(input.brand_maker_id.is_some())
            .bind(input.status_id.is_some())
            .bind(input.product_type_id.is_some())
            .bind(input.price.is_some())
            .bind(input.stock.is_some())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete a product. Satellite rows and variants cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the supplier categories a product belongs to.
    pub async fn set_categories(
        tx: &mut Transaction<'_, Postgres>,
        product_id: DbId,
        category_xml_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM product_category_xmls WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query(
            "INSERT INTO product_category_xmls (product_id, category_xml_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT (product_id, category_xml_id) DO NOTHING",
        )
        .bind(product_id)
        .bind(category_xml_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn category_ids(pool: &PgPool, product_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT category_xml_id FROM product_category_xmls \
             WHERE product_id = $1 ORDER BY category_xml_id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }

    /// Replace the filters a product is tagged with.
    pub async fn set_filters(
        tx: &mut Transaction<'_, Postgres>,
        product_id: DbId,
        filter_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM product_filters WHERE product_id = $1")
            .bind(product_id)
            .execute(&mut **tx)
            .await?;
        sqlx::query(
            "INSERT INTO product_filters (product_id, filter_id) \
             SELECT $1, UNNEST($2::BIGINT[]) \
             ON CONFLICT (product_id, filter_id) DO NOTHING",
        )
        .bind(product_id)
        .bind(filter_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    pub async fn filter_ids(pool: &PgPool, product_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT filter_id FROM product_filters WHERE product_id = $1 ORDER BY filter_id",
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }

    /// Display name of the product's maker, used for upload paths.
    pub async fn maker_name(pool: &PgPool, product_id: DbId) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT m.name FROM products p JOIN makers m ON m.id = p.maker_id WHERE p.id = $1",
        )
        .bind(product_id)
        .fetch_optional(pool)
        .await
    }
}
