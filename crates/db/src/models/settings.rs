//! Catalog section settings.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Settings {
    pub id: DbId,
    pub title: String,
    pub content: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSettings {
    #[validate(length(min = 1, max = 128))]
    pub title: String,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSettings {
    #[validate(length(min = 1, max = 128))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub content: Option<Option<String>>,
}
