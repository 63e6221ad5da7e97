use catalog_db::models::category_site::{CreateCategorySite, UpdateCategorySite};
use catalog_db::models::category_xml::{CreateCategoryXml, UpdateCategoryXml};
use catalog_db::repositories::{CategorySiteRepo, CategoryXmlRepo};

use super::define_store;

define_store! {
    /// Site category tree. New nodes go under `parent_id`, or become roots.
    CategorySiteStore, "CategorySite", CategorySiteRepo, CreateCategorySite, UpdateCategorySite
}

define_store! {
    /// Supplier category trees.
    CategoryXmlStore, "CategoryXml", CategoryXmlRepo, CreateCategoryXml, UpdateCategoryXml
}
