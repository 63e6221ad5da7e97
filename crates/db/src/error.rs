use catalog_core::error::CoreError;

/// Failure of a repository operation that does more than run one query.
///
/// Tree inserts can fail on path arithmetic as well as on the database, so
/// those repositories return this instead of a bare `sqlx::Error`.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
