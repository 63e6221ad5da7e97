//! Site-facing category tree.

use catalog_core::catalog::site_category_label;
use catalog_core::identity::{category_slug, FirstSave};
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `category_sites` table (materialized-path node).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategorySite {
    pub id: DbId,
    pub path: String,
    pub depth: i32,
    pub numchild: i32,
    pub title: String,
    pub slug_title: String,
    pub preview: Option<String>,
    pub content: Option<String>,
    pub show: bool,
    pub image: Option<String>,
    pub position: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CategorySite {
    /// Indented label, e.g. `---chairs` for a second-level node.
    pub fn label(&self) -> String {
        site_category_label(self.depth, &self.slug_title)
    }
}

/// DTO for creating a category. Without `parent_id` it becomes a new root.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategorySite {
    pub parent_id: Option<DbId>,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(skip_deserializing, default)]
    pub slug_title: String,
    pub preview: Option<String>,
    pub content: Option<String>,
    pub show: Option<bool>,
    #[validate(length(max = 255))]
    pub image: Option<String>,
    pub position: Option<i32>,
}

impl FirstSave for CreateCategorySite {
    fn is_persisted(&self) -> bool {
        false
    }

    fn derive_identity(&mut self) {
        self.slug_title = category_slug(&self.title);
    }
}

/// DTO for updating a category. The slug and tree position are fixed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCategorySite {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub preview: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub content: Option<Option<String>>,
    pub show: Option<bool>,
    #[validate(length(max = 255))]
    #[serde(default, deserialize_with = "super::nullable")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::nullable")]
    pub position: Option<Option<i32>>,
}

/// Compact tree node returned by child listings.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryNode {
    pub id: DbId,
    pub label: String,
    pub depth: i32,
    pub numchild: i32,
}

impl From<&CategorySite> for CategoryNode {
    fn from(row: &CategorySite) -> Self {
        Self {
            id: row.id,
            label: row.label(),
            depth: row.depth,
            numchild: row.numchild,
        }
    }
}
