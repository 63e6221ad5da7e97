//! Product entity model and DTOs.

use catalog_core::identity::{code_or_default, default_product_slug, FirstSave};
use catalog_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A product row from the `products` table.
///
/// `(maker_id, code)` and `slug_title` are unique. `parent_id` links a
/// variant to its main product.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub maker_id: DbId,
    pub parent_id: Option<DbId>,
    pub brand_maker_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub product_type_id: Option<DbId>,
    pub title: String,
    pub prov_product_id: String,
    pub prov_main_product_id: String,
    pub slug_title: String,
    pub code: String,
    pub content: String,
    pub long_content: String,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub show: bool,
    pub import_fl: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    pub maker_id: DbId,
    pub parent_id: Option<DbId>,
    pub brand_maker_id: Option<DbId>,
    pub status_id: Option<DbId>,
    pub product_type_id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub prov_product_id: String,
    #[serde(default)]
    #[validate(length(max = 50))]
    pub prov_main_product_id: String,
    /// Only honoured for imported products.
    #[serde(default)]
    #[validate(length(max = 255))]
    pub slug_title: String,
    /// Optional article number; derived from the title when blank.
    #[serde(default)]
    #[validate(length(max = 50))]
    pub code: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub long_content: String,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub show: Option<bool>,
    #[serde(default)]
    pub import_fl: bool,
}

/// DTO for updating a product. `code`, `slug_title` and `maker_id` are fixed.
///
/// Nullable references, `price` and `stock` can be cleared with `null`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "super::nullable")]
    pub parent_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub brand_maker_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub status_id: Option<Option<DbId>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub product_type_id: Option<Option<DbId>>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(max = 50))]
    pub prov_product_id: Option<String>,
    #[validate(length(max = 50))]
    pub prov_main_product_id: Option<String>,
    pub content: Option<String>,
    pub long_content: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub price: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub stock: Option<Option<i32>>,
    pub show: Option<bool>,
}

/// Identifier fields of a product about to be inserted.
///
/// The slug embeds the supplier's display name, which the create DTO does
/// not carry, so derivation runs on this draft once the maker is known.
#[derive(Debug, Clone)]
pub struct ProductDraft<'a> {
    pub maker_official: &'a str,
    pub title: &'a str,
    pub import_fl: bool,
    pub code: String,
    pub slug_title: String,
}

impl<'a> ProductDraft<'a> {
    pub fn new(input: &'a CreateProduct, maker_official: &'a str) -> Self {
        Self {
            maker_official,
            title: &input.title,
            import_fl: input.import_fl,
            code: input.code.clone(),
            slug_title: input.slug_title.clone(),
        }
    }
}

impl FirstSave for ProductDraft<'_> {
    fn is_persisted(&self) -> bool {
        false
    }

    fn is_imported(&self) -> bool {
        self.import_fl
    }

    fn derive_identity(&mut self) {
        self.code = code_or_default(Some(&self.code), self.title);
        self.slug_title = default_product_slug(self.maker_official, self.title, &self.code);
    }
}

/// Query parameters for product listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
    pub maker_id: Option<DbId>,
    #[serde(default)]
    pub only_visible: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
