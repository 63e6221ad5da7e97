use catalog_db::models::lookup::{
    CreateBrand, CreateMaker, CreateProductType, CreateStatus, UpdateBrand, UpdateMaker,
    UpdateProductType, UpdateStatus,
};
use catalog_db::repositories::{BrandRepo, MakerRepo, ProductTypeRepo, StatusRepo};

use super::define_store;

define_store! {
    /// Suppliers.
    MakerStore, "Maker", MakerRepo, CreateMaker, UpdateMaker
}

define_store! {
    BrandStore, "Brand", BrandRepo, CreateBrand, UpdateBrand
}

define_store! {
    StatusStore, "Status", StatusRepo, CreateStatus, UpdateStatus
}

define_store! {
    ProductTypeStore, "ProductType", ProductTypeRepo, CreateProductType, UpdateProductType
}
