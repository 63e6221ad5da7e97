//! [`EntityStore`](crate::factory::EntityStore) implementations backed by
//! the catalog repositories.

mod category;
mod lookup;
mod product;
mod reference;

pub use category::{CategorySiteStore, CategoryXmlStore};
pub use lookup::{BrandStore, MakerStore, ProductTypeStore, StatusStore};
pub use product::ProductStore;
pub use reference::{BrandMakerStore, FilterStore, OrderReferenceStore, SettingsStore};

use catalog_db::repositories::{clamp_limit, clamp_offset};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::factory::{FormData, FormErrors};
use crate::query::PaginationParams;

/// Deserialize cleaned form data into a DTO and run its validators.
pub(crate) fn parse_form<T: DeserializeOwned + Validate>(data: FormData) -> AppResult<T> {
    let input: T = serde_json::from_value(Value::Object(data))
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {e}")))?;
    input.validate().map_err(FormErrors::from)?;
    Ok(input)
}

/// Like [`parse_form`], but drops `null` values first so a new row takes
/// the DTO defaults for cleared fields.
pub(crate) fn parse_new<T: DeserializeOwned + Validate>(mut data: FormData) -> AppResult<T> {
    data.retain(|_, value| !value.is_null());
    parse_form(data)
}

pub(crate) fn to_record<T: Serialize>(row: T) -> AppResult<Value> {
    serde_json::to_value(row).map_err(|e| AppError::InternalError(e.to_string()))
}

/// Serialize one page of rows from an unpaginated listing.
pub(crate) fn to_page<T: Serialize>(rows: Vec<T>, page: &PaginationParams) -> AppResult<Vec<Value>> {
    let offset = usize::try_from(clamp_offset(page.offset)).unwrap_or(0);
    let limit = usize::try_from(clamp_limit(page.limit)).unwrap_or(0);
    rows.into_iter()
        .skip(offset)
        .take(limit)
        .map(to_record)
        .collect()
}

/// Implements [`EntityStore`](crate::factory::EntityStore) for an entity
/// whose repository has the plain `create`/`find_by_id`/`list`/`update`/
/// `delete` shape and no slave forms.
macro_rules! define_store {
    (
        $(#[$meta:meta])*
        $store:ident, $entity:literal, $repo:ty, $create:ty, $update:ty
    ) => {
        $(#[$meta])*
        pub struct $store;

        #[async_trait::async_trait]
        impl $crate::factory::EntityStore for $store {
            fn entity(&self) -> &'static str {
                $entity
            }

            async fn list(
                &self,
                pool: &sqlx::PgPool,
                page: &$crate::query::PaginationParams,
            ) -> $crate::error::AppResult<Vec<serde_json::Value>> {
                $crate::stores::to_page(<$repo>::list(pool).await?, page)
            }

            async fn fetch(
                &self,
                pool: &sqlx::PgPool,
                id: catalog_core::types::DbId,
            ) -> $crate::error::AppResult<Option<serde_json::Value>> {
                <$repo>::find_by_id(pool, id)
                    .await?
                    .map($crate::stores::to_record)
                    .transpose()
            }

            async fn create(
                &self,
                pool: &sqlx::PgPool,
                submission: $crate::factory::Submission,
            ) -> $crate::error::AppResult<serde_json::Value> {
                let input: $create = $crate::stores::parse_new(submission.master)?;
                $crate::stores::to_record(<$repo>::create(pool, &input).await?)
            }

            async fn update(
                &self,
                pool: &sqlx::PgPool,
                id: catalog_core::types::DbId,
                submission: $crate::factory::Submission,
            ) -> $crate::error::AppResult<Option<serde_json::Value>> {
                let input: $update = $crate::stores::parse_form(submission.master)?;
                <$repo>::update(pool, id, &input)
                    .await?
                    .map($crate::stores::to_record)
                    .transpose()
            }

            async fn delete(
                &self,
                pool: &sqlx::PgPool,
                id: catalog_core::types::DbId,
            ) -> $crate::error::AppResult<bool> {
                Ok(<$repo>::delete(pool, id).await?)
            }
        }
    };
}

pub(crate) use define_store;
