//! Admin CRUD routes, one factory per catalog entity.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::Router;
use serde_json::Value;

use crate::factory::{
    BlankAsNull, ConfigurationError, CrudAction, DeleteView, DetailView, FactoryConfig,
    FactoryConfigBuilder, MasterParamsValidation, StripWhitespace, UpdateView, ViewFactory,
};
use crate::forms;
use crate::handlers::admin::list_records;
use crate::query::PaginationParams;
use crate::state::AppState;
use crate::stores::{
    BrandMakerStore, BrandStore, CategorySiteStore, CategoryXmlStore, FilterStore, MakerStore,
    OrderReferenceStore, ProductStore, ProductTypeStore, SettingsStore, StatusStore,
};

/// Mount point of the admin routes, used to build redirect targets.
pub const ADMIN_PREFIX: &str = "/api/v1/admin";

const DIRECTORIES: &str = "Directories";
const CATALOG: &str = "Catalog";
const STOREFRONT: &str = "Storefront";

/// Shared admin setup: every action registered, whitespace stripped, blank
/// master values treated as absent, redirects back to the listing.
fn admin_factory(name: &str, slug: &str, section: &str) -> FactoryConfigBuilder {
    FactoryConfig::builder(name)
        .view(CrudAction::Update, UpdateView)
        .view(CrudAction::Detail, DetailView)
        .view(CrudAction::Delete, DeleteView)
        .mixin(CrudAction::Update, MasterParamsValidation)
        .master_form_internal_mixin(StripWhitespace)
        .master_form_internal_mixin(BlankAsNull)
        .slave_form_internal_mixin(StripWhitespace)
        .success_url(format!("{ADMIN_PREFIX}/{slug}"))
        .section(section)
}

/// Factories keyed by URL segment.
pub fn factories() -> Vec<(&'static str, ViewFactory)> {
    let entries = [
        (
            "makers",
            admin_factory("makers", "makers", DIRECTORIES)
                .master_form(forms::MAKER)
                .model(MakerStore),
        ),
        (
            "brands",
            admin_factory("brands", "brands", DIRECTORIES)
                .master_form(forms::BRAND)
                .model(BrandStore),
        ),
        (
            "brand-makers",
            admin_factory("brand_makers", "brand-makers", DIRECTORIES)
                .master_form(forms::BRAND_MAKER)
                .model(BrandMakerStore),
        ),
        (
            "statuses",
            admin_factory("statuses", "statuses", DIRECTORIES)
                .master_form(forms::STATUS)
                .model(StatusStore),
        ),
        (
            "product-types",
            admin_factory("product_types", "product-types", DIRECTORIES)
                .master_form(forms::PRODUCT_TYPE)
                .model(ProductTypeStore),
        ),
        (
            "category-sites",
            admin_factory("category_sites", "category-sites", CATALOG)
                .master_form(forms::CATEGORY_SITE)
                .model(CategorySiteStore),
        ),
        (
            "category-xmls",
            admin_factory("category_xmls", "category-xmls", CATALOG)
                .master_form(forms::CATEGORY_XML)
                .model(CategoryXmlStore),
        ),
        (
            "products",
            admin_factory("products", "products", CATALOG)
                .master_form(forms::PRODUCT)
                .slave_form(forms::PARAMS_KV)
                .slave_form(forms::PACK_KV)
                .slave_form(forms::STOCK)
                .slave_form(forms::ATTACHMENT)
                .model(ProductStore),
        ),
        (
            "filters",
            admin_factory("filters", "filters", STOREFRONT)
                .master_form(forms::FILTER)
                .model(FilterStore),
        ),
        (
            "order-references",
            admin_factory("order_references", "order-references", STOREFRONT)
                .master_form(forms::ORDER_REFERENCE)
                .model(OrderReferenceStore),
        ),
        (
            "settings",
            admin_factory("settings", "settings", STOREFRONT)
                .master_form(forms::SETTINGS)
                .model(SettingsStore),
        ),
    ];

    entries
        .into_iter()
        .map(|(slug, builder)| (slug, ViewFactory::new(builder.build())))
        .collect()
}

/// Routes for one entity.
///
/// ```text
/// GET          /             -> list
/// GET|POST     /create       -> create handler
/// GET          /{id}         -> detail handler
/// GET|PUT|POST /{id}/update  -> update handler
/// GET|DELETE|POST /{id}/delete -> delete handler
/// ```
pub fn entity_router(factory: &ViewFactory) -> Result<Router<AppState>, ConfigurationError> {
    let store = factory.config().model()?;
    let create = factory.build_handler(CrudAction::Create, &[])?;
    let detail = factory.build_handler(CrudAction::Detail, &[])?;
    let update = factory.build_handler(CrudAction::Update, &[])?;
    let delete = factory.build_handler(
        CrudAction::Delete,
        &[(
            "template_name",
            Value::String("admin/confirm_delete".to_string()),
        )],
    )?;

    let list = get(
        move |State(state): State<AppState>, Query(page): Query<PaginationParams>| {
            list_records(Arc::clone(&store), state, page)
        },
    );

    Ok(Router::new()
        .route("/", list)
        .route("/create", create.into_method_router())
        .route("/{id}", detail.into_method_router())
        .route("/{id}/update", update.into_method_router())
        .route("/{id}/delete", delete.into_method_router()))
}

/// Admin routes mounted at `/admin`.
pub fn router() -> Result<Router<AppState>, ConfigurationError> {
    factories()
        .iter()
        .try_fold(Router::new(), |router, (slug, factory)| {
            Ok(router.nest(&format!("/{slug}"), entity_router(factory)?))
        })
}
