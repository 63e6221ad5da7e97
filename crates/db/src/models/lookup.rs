//! Name/official lookup entities: makers, brands, statuses, product types.
//!
//! All four share one shape. `official` is the display name typed by staff;
//! `name` is its slug, derived on first save and unique per table.

use std::fmt;

use catalog_core::identity::{lookup_name, FirstSave};
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

macro_rules! define_lookup_model {
    (
        $(#[$meta:meta])*
        $row:ident, $create:ident, $update:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, FromRow, Serialize)]
        pub struct $row {
            pub id: DbId,
            pub name: String,
            pub official: String,
            pub created_at: Timestamp,
            pub updated_at: Timestamp,
        }

        impl fmt::Display for $row {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.official)
            }
        }

        /// Create DTO. `name` is never read from the request.
        #[derive(Debug, Clone, Deserialize, Validate)]
        pub struct $create {
            #[serde(skip_deserializing, default)]
            pub name: String,
            #[validate(length(min = 1, max = 255))]
            pub official: String,
        }

        impl $create {
            pub fn new(official: impl Into<String>) -> Self {
                Self {
                    name: String::new(),
                    official: official.into(),
                }
            }
        }

        impl FirstSave for $create {
            fn is_persisted(&self) -> bool {
                false
            }

            fn derive_identity(&mut self) {
                self.name = lookup_name(&self.official);
            }
        }

        /// Update DTO. The derived `name` stays fixed.
        #[derive(Debug, Clone, Deserialize, Validate)]
        pub struct $update {
            #[validate(length(min = 1, max = 255))]
            pub official: Option<String>,
        }
    };
}

define_lookup_model! {
    /// A supplier feeding catalog data.
    Maker, CreateMaker, UpdateMaker
}

define_lookup_model! {
    /// A brand as shown on the site.
    Brand, CreateBrand, UpdateBrand
}

define_lookup_model! {
    /// Workflow status shared by supplier categories and products.
    Status, CreateStatus, UpdateStatus
}

define_lookup_model! {
    /// Kind of product.
    ProductType, CreateProductType, UpdateProductType
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_save_slugifies_official_name() {
        let mut input = CreateMaker::new("Мебель Плюс");
        assert!(input.prepare_save());
        assert_eq!(input.name, "mebel-plyus");
    }

    #[test]
    fn request_cannot_set_name() {
        let input: CreateBrand =
            serde_json::from_value(serde_json::json!({"name": "forged", "official": "Acme"}))
                .unwrap();
        assert_eq!(input.name, "");
    }

    #[test]
    fn empty_official_fails_validation() {
        assert!(CreateStatus::new("").validate().is_err());
        assert!(CreateStatus::new("Active").validate().is_ok());
    }
}
