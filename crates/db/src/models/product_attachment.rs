//! Files and images attached to products.

use catalog_core::catalog::AttachmentMeaning;
use catalog_core::error::CoreError;
use catalog_core::identity::attachment_upload_path;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from `product_attachments`.
///
/// `maker_id` always equals the owning product's maker; the repository
/// copies it on insert.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductAttachment {
    pub id: DbId,
    pub maker_id: DbId,
    pub product_id: DbId,
    /// 0 = image, 1 = file.
    pub meaning: i16,
    pub file: String,
    pub image: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub position: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ProductAttachment {
    pub fn meaning(&self) -> Result<AttachmentMeaning, CoreError> {
        AttachmentMeaning::from_id(self.meaning)
    }

    /// Storage location for this attachment under the maker's directory.
    pub fn upload_path(&self, maker_name: &str) -> String {
        attachment_upload_path(maker_name, &self.description)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductAttachment {
    pub meaning: AttachmentMeaning,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub file: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub image: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 20))]
    pub kind: String,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    pub position: Option<i32>,
}
