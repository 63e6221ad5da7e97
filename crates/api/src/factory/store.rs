use async_trait::async_trait;
use catalog_core::types::DbId;
use serde_json::Value;
use sqlx::PgPool;

use super::form::FormData;
use crate::error::AppResult;
use crate::query::PaginationParams;

/// Cleaned data of one submission: the master form plus, per slave form,
/// the rows submitted for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub master: FormData,
    pub slaves: Vec<Vec<FormData>>,
}

impl Submission {
    /// Rows for the slave form at `index`, or `None` if none were submitted.
    pub fn slave(&self, index: usize) -> Option<&[FormData]> {
        self.slaves.get(index).map(Vec::as_slice)
    }
}

/// The entity a factory edits. Records travel as JSON so views stay
/// independent of the row types.
#[async_trait]
pub trait EntityStore: Send + Sync + 'static {
    /// Entity name used in not-found errors and logs.
    fn entity(&self) -> &'static str;

    async fn list(&self, pool: &PgPool, page: &PaginationParams) -> AppResult<Vec<Value>>;

    async fn fetch(&self, pool: &PgPool, id: DbId) -> AppResult<Option<Value>>;

    async fn create(&self, pool: &PgPool, submission: Submission) -> AppResult<Value>;

    /// Returns `None` if no record with `id` exists.
    async fn update(
        &self,
        pool: &PgPool,
        id: DbId,
        submission: Submission,
    ) -> AppResult<Option<Value>>;

    /// Returns `false` if no record with `id` exists.
    async fn delete(&self, pool: &PgPool, id: DbId) -> AppResult<bool>;
}
