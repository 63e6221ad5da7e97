//! Repository for the `category_sites` tree.

use catalog_core::identity::FirstSave;
use catalog_core::tree;
use catalog_core::types::DbId;
use sqlx::PgPool;

use super::tree_support::{allocate_path, delete_subtree};
use crate::error::DbError;
use crate::models::category_site::{CategorySite, CreateCategorySite, UpdateCategorySite};

const TABLE: &str = "category_sites";

const COLUMNS: &str = "\
    id, path, depth, numchild, title, slug_title, preview, content, show, \
    image, position, created_at, updated_at";

/// Provides tree-aware CRUD operations for site categories.
pub struct CategorySiteRepo;

impl CategorySiteRepo {
    /// Insert a category as a new root or as the last child of `parent_id`.
    ///
    /// The slug is derived from the title.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCategorySite,
    ) -> Result<CategorySite, DbError> {
        let mut draft = input.clone();
        draft.prepare_save();

        let mut tx = pool.begin().await?;
        let path = allocate_path(&mut tx, TABLE, draft.parent_id).await?;

        let query = format!(
            "INSERT INTO category_sites \
                 (path, depth, title, slug_title, preview, content, show, image, position) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, TRUE), $8, $9) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategorySite>(&query)
            .bind(&path)
            .bind(tree::depth(&path))
            .bind(&draft.title)
            .bind(&draft.slug_title)
            .bind(&draft.preview)
            .bind(&draft.content)
            .bind(draft.show)
            .bind(&draft.image)
            .bind(draft.position)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CategorySite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category_sites WHERE id = $1");
        sqlx::query_as::<_, CategorySite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug_title: &str,
    ) -> Result<Option<CategorySite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category_sites WHERE slug_title = $1");
        sqlx::query_as::<_, CategorySite>(&query)
            .bind(slug_title)
            .fetch_optional(pool)
            .await
    }

    /// Every category in depth-first order.
    pub async fn list(pool: &PgPool) -> Result<Vec<CategorySite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category_sites ORDER BY path");
        sqlx::query_as::<_, CategorySite>(&query).fetch_all(pool).await
    }

    /// Visible root categories.
    pub async fn roots(pool: &PgPool) -> Result<Vec<CategorySite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_sites WHERE depth = 1 AND show ORDER BY path"
        );
        sqlx::query_as::<_, CategorySite>(&query).fetch_all(pool).await
    }

    /// Direct children of a category. Hidden children are never returned.
    pub async fn children(pool: &PgPool, id: DbId) -> Result<Vec<CategorySite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_sites c \
             WHERE c.show \
               AND c.path LIKE (SELECT path FROM category_sites WHERE id = $1) || '%' \
               AND c.depth = (SELECT depth FROM category_sites WHERE id = $1) + 1 \
             ORDER BY c.path"
        );
        sqlx::query_as::<_, CategorySite>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// All nodes below a category, hidden ones included.
    pub async fn descendants(pool: &PgPool, id: DbId) -> Result<Vec<CategorySite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_sites c \
             WHERE c.path LIKE (SELECT path FROM category_sites WHERE id = $1) || '%' \
               AND c.id <> $1 \
             ORDER BY c.path"
        );
        sqlx::query_as::<_, CategorySite>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Update descriptive fields. Slug and position in the tree are fixed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategorySite,
    ) -> Result<Option<CategorySite>, sqlx::Error> {
        let query = format!(
            "UPDATE category_sites SET \
                 title = COALESCE($2, title), \
                 preview = CASE WHEN $8 THEN $3::TEXT ELSE preview END, \
                 content = CASE WHEN $9 THEN $4::TEXT ELSE content END, \
                 show = COALESCE($5, show), \
                 image = CASE WHEN $10 THEN $6::VARCHAR ELSE image END, \
                 position = CASE WHEN $11 THEN $7::INTEGER ELSE position END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategorySite>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.preview.as_ref().and_then(|v| v.as_deref()))
            .bind(input.content.as_ref().and_then(|v| v.as_deref()))
            .bind(input.show)
            .bind(input.image.as_ref().and_then(|v| v.as_deref()))
            .bind(input.position.flatten())
            .bind(input.preview.is_some())
            .bind(input.content.is_some())
            .bind(input.image.is_some())
            .bind(input.position.is_some())
            .fetch_optional(pool)
            .await
    }

    /// Delete a category together with its subtree.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        delete_subtree(pool, TABLE, id).await
    }
}
