//! Catalog enums, column limits and display helpers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Maximum length of ordinary `VARCHAR` columns.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of a product code (article number).
pub const MAX_CODE_LEN: usize = 50;

/// Maximum length of a supplier category identifier.
pub const MAX_CAT_ID_LEN: usize = 100;

/// Maximum length of a product parameter value.
pub const MAX_PARAM_VALUE_LEN: usize = 4000;

/// Prefix repeated once per tree level below the root in category labels.
pub const DEPTH_MARKER: &str = "---";

/// Kind of file attached to a product. Stored as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentMeaning {
    Image,
    File,
}

impl AttachmentMeaning {
    /// Database value.
    pub fn id(self) -> i16 {
        match self {
            AttachmentMeaning::Image => 0,
            AttachmentMeaning::File => 1,
        }
    }

    pub fn from_id(id: i16) -> Result<Self, CoreError> {
        match id {
            0 => Ok(AttachmentMeaning::Image),
            1 => Ok(AttachmentMeaning::File),
            other => Err(CoreError::Validation(format!(
                "Unknown attachment meaning {other}. Valid meanings: 0 (image), 1 (file)"
            ))),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttachmentMeaning::Image => "Image",
            AttachmentMeaning::File => "File",
        }
    }
}

/// How a storefront filter selects products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FilterType {
    /// Product price range.
    Price,
    /// Quantity in stock.
    Stock,
    /// Many-to-many relation to an auxiliary table.
    M2m,
    /// One-to-many relation to an auxiliary table.
    Fk,
    /// Product parameter key/value storage.
    Kv,
}

impl FilterType {
    pub const ALL: [FilterType; 5] = [
        FilterType::Price,
        FilterType::Stock,
        FilterType::M2m,
        FilterType::Fk,
        FilterType::Kv,
    ];

    /// Value stored in `filters.type`.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::Price => "PRICE",
            FilterType::Stock => "STOCK",
            FilterType::M2m => "M2M",
            FilterType::Fk => "FK",
            FilterType::Kv => "KV",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == value)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid filter type '{value}'. Valid types: PRICE, STOCK, M2M, FK, KV"
                ))
            })
    }
}

/// Indentation prefix for a node at `depth` (roots have depth 1).
pub fn depth_prefix(depth: i32) -> String {
    let levels = usize::try_from(depth.saturating_sub(1)).unwrap_or(0);
    DEPTH_MARKER.repeat(levels)
}

/// Label for a site category: depth prefix followed by its slug.
pub fn site_category_label(depth: i32, slug_title: &str) -> String {
    format!("{}{slug_title}", depth_prefix(depth))
}

/// Label for a supplier category: depth prefix, title and supplier name.
pub fn supplier_category_label(depth: i32, title: &str, maker: &str) -> String {
    format!("{}{title} ({maker})", depth_prefix(depth))
}

/// Label for a supplier brand mapping.
pub fn brand_maker_label(title: &str, maker: &str) -> String {
    format!("{title} ({maker})")
}

/// Reject blank values for required text fields.
pub fn validate_required(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
