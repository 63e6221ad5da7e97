//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod brand_maker_repo;
pub mod category_site_repo;
pub mod category_xml_repo;
pub mod filter_repo;
pub mod lookup_repo;
pub mod order_reference_repo;
pub mod product_attachment_repo;
pub mod product_pack_kv_repo;
pub mod product_params_kv_repo;
pub mod product_repo;
pub mod product_stock_repo;
pub mod settings_repo;

mod tree_support;

pub use brand_maker_repo::BrandMakerRepo;
pub use category_site_repo::CategorySiteRepo;
pub use category_xml_repo::CategoryXmlRepo;
pub use filter_repo::FilterRepo;
pub use lookup_repo::{BrandRepo, MakerRepo, ProductTypeRepo, StatusRepo};
pub use order_reference_repo::OrderReferenceRepo;
pub use product_attachment_repo::ProductAttachmentRepo;
pub use product_pack_kv_repo::ProductPackKvRepo;
pub use product_params_kv_repo::ProductParamsKvRepo;
pub use product_repo::ProductRepo;
pub use product_stock_repo::ProductStockRepo;
pub use settings_repo::SettingsRepo;

/// Default page size for list queries.
pub const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for list queries.
pub const MAX_LIMIT: i64 = 500;

/// Clamp a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Negative offsets are treated as zero.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(10_000)), MAX_LIMIT);
    }

    #[test]
    fn offset_never_negative() {
        assert_eq!(clamp_offset(Some(-5)), 0);
        assert_eq!(clamp_offset(Some(20)), 20);
    }
}
