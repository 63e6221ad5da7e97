//! Stock levels per location.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `product_stocks`. `(product_id, geo, type)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductStock {
    pub id: DbId,
    pub maker_id: DbId,
    pub product_id: DbId,
    /// Location tag (warehouse, city).
    pub geo: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductStock {
    #[validate(length(min = 1, max = 100))]
    pub geo: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 255))]
    pub kind: String,
    pub value: i32,
}
