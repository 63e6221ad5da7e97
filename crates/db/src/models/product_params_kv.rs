//! Free-form product parameters (key/value).

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `product_params_kvs`. `(product_id, abbr)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductParamsKv {
    pub id: DbId,
    pub product_id: DbId,
    pub abbr: String,
    pub name: String,
    pub value: String,
    pub position: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One parameter submitted alongside a product; the product comes from the URL.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductParamsKv {
    /// Search key of the parameter.
    #[validate(length(min = 1, max = 255))]
    pub abbr: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 4000))]
    pub value: String,
    pub position: Option<i32>,
}
