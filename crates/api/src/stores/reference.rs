use catalog_db::models::brand_maker::{CreateBrandMaker, UpdateBrandMaker};
use catalog_db::models::filter::{CreateFilter, UpdateFilter};
use catalog_db::models::order_reference::{CreateOrderReference, UpdateOrderReference};
use catalog_db::models::settings::{CreateSettings, UpdateSettings};
use catalog_db::repositories::{BrandMakerRepo, FilterRepo, OrderReferenceRepo, SettingsRepo};

use super::define_store;

define_store! {
    /// Supplier brand mappings.
    BrandMakerStore, "BrandMaker", BrandMakerRepo, CreateBrandMaker, UpdateBrandMaker
}

define_store! {
    FilterStore, "Filter", FilterRepo, CreateFilter, UpdateFilter
}

define_store! {
    OrderReferenceStore, "OrderReference", OrderReferenceRepo, CreateOrderReference, UpdateOrderReference
}

define_store! {
    SettingsStore, "Settings", SettingsRepo, CreateSettings, UpdateSettings
}
