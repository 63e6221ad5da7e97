//! Supplier-side brand mapping onto site brands.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `brand_makers` table. `(maker_id, title)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandMaker {
    pub id: DbId,
    pub maker_id: DbId,
    pub title: String,
    pub code: String,
    pub brand_id: Option<DbId>,
    pub prov_brand_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBrandMaker {
    pub maker_id: DbId,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub code: String,
    pub brand_id: Option<DbId>,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub prov_brand_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBrandMaker {
    #[validate(length(max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub code: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub brand_id: Option<Option<DbId>>,
    #[validate(length(max = 255))]
    pub prov_brand_id: Option<String>,
}

/// Brand mapping joined with its supplier's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandMakerLabel {
    pub id: DbId,
    pub title: String,
    pub maker_official: String,
}

impl BrandMakerLabel {
    /// `"{title} ({maker})"`.
    pub fn label(&self) -> String {
        catalog_core::catalog::brand_maker_label(&self.title, &self.maker_official)
    }
}
