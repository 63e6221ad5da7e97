//! List endpoints for the admin entities.
//!
//! Create, detail, update and delete are served by factory handlers; the
//! listing reads straight from the factory's store.

use std::sync::Arc;

use axum::Json;
use serde_json::Value;

use crate::error::AppResult;
use crate::factory::EntityStore;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/{entity}
pub async fn list_records(
    store: Arc<dyn EntityStore>,
    state: AppState,
    page: PaginationParams,
) -> AppResult<Json<DataResponse<Vec<Value>>>> {
    let records = store.list(&state.pool, &page).await?;
    Ok(Json(DataResponse { data: records }))
}
