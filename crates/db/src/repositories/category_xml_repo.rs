//! Repository for the per-supplier `category_xmls` trees.

use catalog_core::identity::FirstSave;
use catalog_core::tree;
use catalog_core::types::DbId;
use sqlx::PgPool;

use super::tree_support::{allocate_path, delete_subtree};
use crate::error::DbError;
use crate::models::category_xml::{
    CategoryXml, CategoryXmlWithMaker, CreateCategoryXml, UpdateCategoryXml,
};

const TABLE: &str = "category_xmls";

const COLUMNS: &str = "\
    id, path, depth, numchild, maker_id, category_site_id, title, cat_id, \
    status_id, import_fl, created_at, updated_at";

/// Columns for [`CategoryXmlWithMaker`]; expects the alias `c` for the
/// category and `m` for the maker.
const LABEL_COLUMNS: &str = "c.id, c.depth, c.numchild, c.title, c.cat_id, m.official AS maker_official";

/// Provides tree-aware CRUD operations for supplier categories.
pub struct CategoryXmlRepo;

impl CategoryXmlRepo {
    /// Insert a supplier category. `cat_id` is derived unless the row is imported.
    pub async fn create(pool: &PgPool, input: &CreateCategoryXml) -> Result<CategoryXml, DbError> {
        let mut draft = input.clone();
        draft.prepare_save();

        let mut tx = pool.begin().await?;
        let path = allocate_path(&mut tx, TABLE, draft.parent_id).await?;

        let query = format!(
            "INSERT INTO category_xmls \
                 (path, depth, maker_id, category_site_id, title, cat_id, status_id, import_fl) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CategoryXml>(&query)
            .bind(&path)
            .bind(tree::depth(&path))
            .bind(draft.maker_id)
            .bind(draft.category_site_id)
            .bind(&draft.title)
            .bind(&draft.cat_id)
            .bind(draft.status_id)
            .bind(draft.import_fl)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CategoryXml>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category_xmls WHERE id = $1");
        sqlx::query_as::<_, CategoryXml>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a supplier category by the supplier's identifier.
    pub async fn find_by_cat_id(
        pool: &PgPool,
        maker_id: DbId,
        cat_id: &str,
    ) -> Result<Option<CategoryXml>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM category_xmls WHERE maker_id = $1 AND cat_id = $2");
        sqlx::query_as::<_, CategoryXml>(&query)
            .bind(maker_id)
            .bind(cat_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<CategoryXml>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM category_xmls ORDER BY path");
        sqlx::query_as::<_, CategoryXml>(&query).fetch_all(pool).await
    }

    /// One supplier's categories in depth-first order.
    pub async fn list_by_maker(
        pool: &PgPool,
        maker_id: DbId,
    ) -> Result<Vec<CategoryXml>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM category_xmls WHERE maker_id = $1 ORDER BY path");
        sqlx::query_as::<_, CategoryXml>(&query)
            .bind(maker_id)
            .fetch_all(pool)
            .await
    }

    /// Direct children with display labels.
    pub async fn children(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Vec<CategoryXmlWithMaker>, sqlx::Error> {
        let query = format!(
            "SELECT {LABEL_COLUMNS} FROM category_xmls c \
             JOIN makers m ON m.id = c.maker_id \
             WHERE c.path LIKE (SELECT path FROM category_xmls WHERE id = $1) || '%' \
               AND c.depth = (SELECT depth FROM category_xmls WHERE id = $1) + 1 \
             ORDER BY c.path"
        );
        sqlx::query_as::<_, CategoryXmlWithMaker>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// All nodes below a supplier category.
    pub async fn descendants(pool: &PgPool, id: DbId) -> Result<Vec<CategoryXml>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_xmls \
             WHERE path LIKE (SELECT path FROM category_xmls WHERE id = $1) || '%' \
               AND id <> $1 \
             ORDER BY path"
        );
        sqlx::query_as::<_, CategoryXml>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    /// Supplier categories mapped onto a site category.
    pub async fn list_for_site_category(
        pool: &PgPool,
        category_site_id: DbId,
    ) -> Result<Vec<CategoryXml>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM category_xmls WHERE category_site_id = $1 ORDER BY path"
        );
        sqlx::query_as::<_, CategoryXml>(&query)
            .bind(category_site_id)
            .fetch_all(pool)
            .await
    }

    /// Update the mapping, title or status. `cat_id` is fixed.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategoryXml,
    ) -> Result<Option<CategoryXml>, sqlx::Error> {
        let query = format!(
            "UPDATE category_xmls SET \
                 category_site_id = CASE WHEN $5 THEN $2::BIGINT ELSE category_site_id END, \
                 title = COALESCE($3, title), \
                 status_id = CASE WHEN $6 THEN $4::BIGINT ELSE status_id END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CategoryXml>(&query)
            .bind(id)
            .bind(input.category_site_id.flatten())
            .bind(&input.title)
            .bind(input.status_id.flatten())
            .bind(input.category_site_id.is_some())
            .bind(input.status_id.is_some())
            .fetch_optional(pool)
            .await
    }

    /// Delete a supplier category together with its subtree.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        delete_subtree(pool, TABLE, id).await
    }
}
