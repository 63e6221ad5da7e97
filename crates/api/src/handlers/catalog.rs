//! Read-only catalog endpoints: category navigation and product media.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::error::CoreError;
use catalog_core::identity::product_upload_path;
use catalog_core::types::DbId;
use catalog_db::models::category_site::CategoryNode;
use catalog_db::models::product::Product;
use catalog_db::repositories::{
    CategorySiteRepo, CategoryXmlRepo, ProductAttachmentRepo, ProductRepo,
};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

async fn find_product(pool: &sqlx::PgPool, id: DbId) -> AppResult<Product> {
    ProductRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        }))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /api/v1/catalog/categories
///
/// Visible root categories of the site tree.
pub async fn list_root_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let roots = CategorySiteRepo::roots(&state.pool).await?;
    let nodes: Vec<CategoryNode> = roots.iter().map(CategoryNode::from).collect();
    Ok(Json(DataResponse { data: nodes }))
}

/// GET /api/v1/catalog/categories/{id}/children
pub async fn list_category_children(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if CategorySiteRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CategorySite",
            id,
        }));
    }
    let children = CategorySiteRepo::children(&state.pool, id).await?;
    let nodes: Vec<CategoryNode> = children.iter().map(CategoryNode::from).collect();
    Ok(Json(DataResponse { data: nodes }))
}

/// GET /api/v1/catalog/supplier-categories/{id}/children
pub async fn list_supplier_category_children(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if CategoryXmlRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CategoryXml",
            id,
        }));
    }
    let children = CategoryXmlRepo::children(&state.pool, id).await?;
    let nodes: Vec<CategoryNode> = children.iter().map(CategoryNode::from).collect();
    Ok(Json(DataResponse { data: nodes }))
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// GET /api/v1/catalog/products/{id}/photos
pub async fn list_product_photos(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_product(&state.pool, id).await?;
    let photos = ProductAttachmentRepo::photos(&state.pool, id).await?;
    Ok(Json(DataResponse { data: photos }))
}

/// GET /api/v1/catalog/products/{id}/main-image
///
/// `data` is null when the product has no image at position 0.
pub async fn get_product_main_image(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_product(&state.pool, id).await?;
    let image = ProductAttachmentRepo::main_image(&state.pool, id).await?;
    Ok(Json(DataResponse { data: image }))
}

/// GET /api/v1/catalog/products/{id}/variants
pub async fn list_product_variants(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    find_product(&state.pool, id).await?;
    let variants = ProductRepo::children(&state.pool, id).await?;
    Ok(Json(DataResponse { data: variants }))
}

#[derive(Debug, Serialize)]
pub struct UploadPath {
    /// Path relative to the media root.
    pub relative: String,
    pub path: String,
}

/// GET /api/v1/catalog/products/{id}/upload-path
///
/// Where the product's main picture is stored.
pub async fn get_product_upload_path(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = find_product(&state.pool, id).await?;
    let maker = ProductRepo::maker_name(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Maker",
            id: product.maker_id,
        }))?;

    let relative = product_upload_path(&maker, &product.title);
    let path = state.config.media_path(&relative);
    Ok(Json(DataResponse {
        data: UploadPath { relative, path },
    }))
}
