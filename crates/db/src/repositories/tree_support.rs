//! Shared materialized-path bookkeeping for the two category tables.
//!
//! Tree writes take a table lock so concurrent inserts under the same parent
//! cannot compute the same next path.

use catalog_core::tree;
use catalog_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::DbError;

async fn lock_tree(tx: &mut Transaction<'_, Postgres>, table: &str) -> Result<(), sqlx::Error> {
    let query = format!("LOCK TABLE {table} IN SHARE ROW EXCLUSIVE MODE");
    sqlx::query(&query).execute(&mut **tx).await?;
    Ok(())
}

/// Reserve the path for a new node and bump the parent's child counter.
///
/// A missing parent surfaces as `sqlx::Error::RowNotFound`.
pub(crate) async fn allocate_path(
    tx: &mut Transaction<'_, Postgres>,
    table: &str,
    parent_id: Option<DbId>,
) -> Result<String, DbError> {
    lock_tree(tx, table).await?;

    let Some(parent_id) = parent_id else {
        let query =
            format!("SELECT path FROM {table} WHERE depth = 1 ORDER BY path DESC LIMIT 1");
        let last_root: Option<String> = sqlx::query_scalar(&query)
            .fetch_optional(&mut **tx)
            .await?;
        return Ok(tree::new_root_path(last_root.as_deref())?);
    };

    let query = format!("SELECT path FROM {table} WHERE id = $1");
    let parent_path: String = sqlx::query_scalar(&query)
        .bind(parent_id)
        .fetch_one(&mut **tx)
        .await?;

    let query = format!(
        "SELECT path FROM {table} WHERE path LIKE $1 AND depth = $2 \
         ORDER BY path DESC LIMIT 1"
    );
    let last_child: Option<String> = sqlx::query_scalar(&query)
        .bind(format!("{parent_path}%"))
        .bind(tree::depth(&parent_path) + 1)
        .fetch_optional(&mut **tx)
        .await?;

    let path = tree::new_child_path(&parent_path, last_child.as_deref())?;

    let query = format!("UPDATE {table} SET numchild = numchild + 1 WHERE id = $1");
    sqlx::query(&query)
        .bind(parent_id)
        .execute(&mut **tx)
        .await?;

    Ok(path)
}

/// Delete a node with its whole subtree. Returns `false` if `id` is unknown.
pub(crate) async fn delete_subtree(pool: &PgPool, table: &str, id: DbId) -> Result<bool, DbError> {
    let mut tx = pool.begin().await?;
    lock_tree(&mut tx, table).await?;

    let query = format!("SELECT path FROM {table} WHERE id = $1");
    let path: Option<String> = sqlx::query_scalar(&query)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
    let Some(path) = path else {
        return Ok(false);
    };

    let query = format!("DELETE FROM {table} WHERE path LIKE $1");
    let removed = sqlx::query(&query)
        .bind(format!("{path}%"))
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if let Some(parent) = tree::parent_path(&path) {
        let query = format!("UPDATE {table} SET numchild = numchild - 1 WHERE path = $1");
        sqlx::query(&query).bind(parent).execute(&mut *tx).await?;
    }

    tx.commit().await?;
    tracing::debug!(table, id, removed, "Deleted category subtree");
    Ok(true)
}
