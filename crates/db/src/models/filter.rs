//! Storefront filter definitions.

use catalog_core::catalog::FilterType;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `filters` table. `value` and `type` are each unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Filter {
    pub id: DbId,
    pub title: String,
    pub name: String,
    pub value: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub position: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFilter {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub value: String,
    #[serde(rename = "type")]
    pub kind: FilterType,
    pub position: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateFilter {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<FilterType>,
    pub position: Option<i32>,
}
