//! Repository for the `product_attachments` table.

use catalog_core::catalog::AttachmentMeaning;
use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::product_attachment::{CreateProductAttachment, ProductAttachment};

const COLUMNS: &str = "\
    id, maker_id, product_id, meaning, file, image, type, description, position, \
    created_at, updated_at";

/// Provides CRUD operations for product attachments.
pub struct ProductAttachmentRepo;

impl ProductAttachmentRepo {
    /// Insert an attachment, copying `maker_id` from the owning product.
    ///
    /// Returns `RowNotFound` if the product does not exist.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
        input: &CreateProductAttachment,
    ) -> Result<ProductAttachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO product_attachments \
                 (maker_id, product_id, meaning, file, image, type, description, position) \
             SELECT p.maker_id, p.id, $2, $3, $4, $5, $6, $7 FROM products p WHERE p.id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProductAttachment>(&query)
            .bind(product_id)
            .bind(input.meaning.id())
            .bind(&input.file)
            .bind(&input.image)
            .bind(&input.kind)
            .bind(&input.description)
            .bind(input.position)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProductAttachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM product_attachments WHERE id = $1");
        sqlx::query_as::<_, ProductAttachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductAttachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_attachments WHERE product_id = $1 \
             ORDER BY position NULLS LAST, id"
        );
        sqlx::query_as::<_, ProductAttachment>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Image attachments of a product ordered by position.
    pub async fn photos(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ProductAttachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_attachments \
             WHERE product_id = $1 AND meaning = $2 \
             ORDER BY position NULLS LAST, id"
        );
        sqlx::query_as::<_, ProductAttachment>(&query)
            .bind(product_id)
            .bind(AttachmentMeaning::Image.id())
            .fetch_all(pool)
            .await
    }

    /// The image at position 0, if any.
    pub async fn main_image(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Option<ProductAttachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM product_attachments \
             WHERE product_id = $1 AND meaning = $2 AND position = 0 \
             ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, ProductAttachment>(&query)
            .bind(product_id)
            .bind(AttachmentMeaning::Image.id())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_attachments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_for_product<'e>(
        executor: impl PgExecutor<'e>,
        product_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM product_attachments WHERE product_id = $1")
            .bind(product_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
