pub mod admin;
pub mod catalog;
pub mod health;

use axum::Router;

use crate::factory::ConfigurationError;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /admin/{entity}                                  list
/// /admin/{entity}/create                           create (GET form, POST)
/// /admin/{entity}/{id}                             detail
/// /admin/{entity}/{id}/update                      update (GET, PUT|POST)
/// /admin/{entity}/{id}/delete                      delete (GET confirm, DELETE|POST)
///
/// /catalog/categories                              visible root categories
/// /catalog/categories/{id}/children                visible child categories
/// /catalog/supplier-categories/{id}/children       supplier child categories
/// /catalog/products/{id}/photos                    image attachments
/// /catalog/products/{id}/main-image                image at position 0
/// /catalog/products/{id}/variants                  child products
/// /catalog/products/{id}/upload-path               main picture location
/// ```
///
/// Fails if an admin factory is misconfigured.
pub fn api_routes() -> Result<Router<AppState>, ConfigurationError> {
    Ok(Router::new()
        .nest("/admin", admin::router()?)
        .nest("/catalog", catalog::router()))
}
