//! Route definitions for the public catalog reads.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Catalog routes mounted at `/catalog`.
///
/// ```text
/// GET /categories                        -> list_root_categories
/// GET /categories/{id}/children          -> list_category_children
/// GET /supplier-categories/{id}/children -> list_supplier_category_children
/// GET /products/{id}/photos              -> list_product_photos
/// GET /products/{id}/main-image          -> get_product_main_image
/// GET /products/{id}/variants            -> list_product_variants
/// GET /products/{id}/upload-path         -> get_product_upload_path
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(catalog::list_root_categories))
        .route(
            "/categories/{id}/children",
            get(catalog::list_category_children),
        )
        .route(
            "/supplier-categories/{id}/children",
            get(catalog::list_supplier_category_children),
        )
        .route("/products/{id}/photos", get(catalog::list_product_photos))
        .route(
            "/products/{id}/main-image",
            get(catalog::get_product_main_image),
        )
        .route("/products/{id}/variants", get(catalog::list_product_variants))
        .route(
            "/products/{id}/upload-path",
            get(catalog::get_product_upload_path),
        )
}
