//! Packaging attributes, grouped per numbered pack of a product.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `product_pack_kvs`. `(product_id, pack_id, abbr)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductPackKv {
    pub id: DbId,
    pub maker_id: DbId,
    pub product_id: DbId,
    pub pack_id: i32,
    pub abbr: String,
    pub name: String,
    pub value: String,
    pub position: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductPackKv {
    /// Ordinal of the pack within the product.
    #[serde(default)]
    pub pack_id: i32,
    #[validate(length(min = 1, max = 255))]
    pub abbr: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 255))]
    pub value: String,
    pub position: Option<i32>,
}
