//! Product sort orders offered on the storefront.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `order_references`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderReference {
    pub id: DbId,
    pub name: String,
    pub official: String,
    /// Product column the listing is sorted by.
    pub field_name: String,
    /// `true` for ascending.
    pub field_order: bool,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderReference {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub official: String,
    #[validate(length(min = 1, max = 30))]
    pub field_name: String,
    pub field_order: bool,
    pub position: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateOrderReference {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub official: Option<String>,
    #[validate(length(min = 1, max = 30))]
    pub field_name: Option<String>,
    pub field_order: Option<bool>,
    pub position: Option<i32>,
}
