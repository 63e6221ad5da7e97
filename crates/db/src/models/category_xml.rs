//! Supplier category trees, one forest per maker.

use catalog_core::catalog::supplier_category_label;
use catalog_core::identity::{default_cat_id, FirstSave};
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::category_site::CategoryNode;

/// A row from the `category_xmls` table. `(maker_id, cat_id)` is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryXml {
    pub id: DbId,
    pub path: String,
    pub depth: i32,
    pub numchild: i32,
    pub maker_id: DbId,
    pub category_site_id: Option<DbId>,
    pub title: String,
    pub cat_id: String,
    pub status_id: Option<DbId>,
    pub import_fl: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a supplier category.
///
/// Imported rows (`import_fl = true`) must bring the supplier's `cat_id`;
/// for locally created rows it is derived from the title.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategoryXml {
    pub parent_id: Option<DbId>,
    pub maker_id: DbId,
    pub category_site_id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub cat_id: String,
    pub status_id: Option<DbId>,
    #[serde(default)]
    pub import_fl: bool,
}

impl FirstSave for CreateCategoryXml {
    fn is_persisted(&self) -> bool {
        false
    }

    fn is_imported(&self) -> bool {
        self.import_fl
    }

    fn derive_identity(&mut self) {
        self.cat_id = default_cat_id(&self.title);
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategoryXml {
    #[serde(default, deserialize_with = "super::nullable")]
    pub category_site_id: Option<Option<DbId>>,
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub status_id: Option<Option<DbId>>,
}

/// Supplier category joined with the maker's display name.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryXmlWithMaker {
    pub id: DbId,
    pub depth: i32,
    pub numchild: i32,
    pub title: String,
    pub cat_id: String,
    pub maker_official: String,
}

impl CategoryXmlWithMaker {
    /// Indented label with the supplier in parentheses.
    pub fn label(&self) -> String {
        supplier_category_label(self.depth, &self.title, &self.maker_official)
    }
}

impl From<&CategoryXmlWithMaker> for CategoryNode {
    fn from(row: &CategoryXmlWithMaker) -> Self {
        Self {
            id: row.id,
            label: row.label(),
            depth: row.depth,
            numchild: row.numchild,
        }
    }
}
