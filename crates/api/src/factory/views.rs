//! Base views, one per CRUD action.
//!
//! Each base view answers the HTTP methods its action supports and rejects
//! the rest with 405, so a composed view always has a dispatching layer.

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use catalog_core::error::CoreError;
use catalog_core::types::DbId;
use serde_json::Value;

use super::handler::UnitContext;
use super::view::{ViewLayer, ViewRequest, ViewResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

fn not_allowed(request: &ViewRequest) -> AppError {
    AppError::MethodNotAllowed(request.method.to_string())
}

fn record_id(record: &Value) -> Option<DbId> {
    record.get("id").and_then(Value::as_i64)
}

async fn fetch_existing(unit: &UnitContext, state: &AppState, id: DbId) -> AppResult<Value> {
    unit.model
        .fetch(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: unit.model.entity(),
                id,
            })
        })
}

/// GET describes the forms; POST creates a record.
pub struct CreateView;

impl CreateView {
    async fn create(
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> AppResult<ViewResponse> {
        let submission = unit.validate(request.require_payload()?)?;
        let record = unit.model.create(&state.pool, submission).await?;
        let id = record_id(&record);
        tracing::info!(entity = unit.model.entity(), ?id, "Record created");

        Ok(ViewResponse::new(unit, StatusCode::CREATED)
            .with_redirect(unit.success_url(id))
            .with_record(record))
    }
}

#[async_trait]
impl ViewLayer for CreateView {
    fn name(&self) -> &'static str {
        "CreateView"
    }

    async fn dispatch(
        &self,
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> Option<AppResult<ViewResponse>> {
        let result = match request.method {
            Method::GET => Ok(ViewResponse::new(unit, StatusCode::OK).with_forms(unit.forms())),
            Method::POST => Self::create(unit, state, request).await,
            _ => Err(not_allowed(request)),
        };
        Some(result)
    }
}

/// GET returns the record with its forms; PUT or POST saves changes.
pub struct UpdateView;

impl UpdateView {
    async fn show(
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> AppResult<ViewResponse> {
        let record = fetch_existing(unit, state, request.record_id()?).await?;
        Ok(ViewResponse::new(unit, StatusCode::OK)
            .with_forms(unit.forms())
            .with_record(record))
    }

    async fn save(
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> AppResult<ViewResponse> {
        let id = request.record_id()?;
        let submission = unit.validate(request.require_payload()?)?;
        let record = unit
            .model
            .update(&state.pool, id, submission)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: unit.model.entity(),
                    id,
                })
            })?;
        tracing::info!(entity = unit.model.entity(), id, "Record updated");

        Ok(ViewResponse::new(unit, StatusCode::OK)
            .with_redirect(unit.success_url(Some(id)))
            .with_record(record))
    }
}

#[async_trait]
impl ViewLayer for UpdateView {
    fn name(&self) -> &'static str {
        "UpdateView"
    }

    async fn dispatch(
        &self,
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> Option<AppResult<ViewResponse>> {
        let result = match request.method {
            Method::GET => Self::show(unit, state, request).await,
            Method::PUT | Method::POST => Self::save(unit, state, request).await,
            _ => Err(not_allowed(request)),
        };
        Some(result)
    }
}

/// GET returns the record.
pub struct DetailView;

#[async_trait]
impl ViewLayer for DetailView {
    fn name(&self) -> &'static str {
        "DetailView"
    }

    async fn dispatch(
        &self,
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> Option<AppResult<ViewResponse>> {
        if request.method != Method::GET {
            return Some(Err(not_allowed(request)));
        }
        let result = match request.record_id() {
            Ok(id) => fetch_existing(unit, state, id)
                .await
                .map(|record| ViewResponse::new(unit, StatusCode::OK).with_record(record)),
            Err(e) => Err(e),
        };
        Some(result)
    }
}

/// GET returns the record to confirm; DELETE or POST removes it.
pub struct DeleteView;

impl DeleteView {
    async fn confirm(
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> AppResult<ViewResponse> {
        let record = fetch_existing(unit, state, request.record_id()?).await?;
        Ok(ViewResponse::new(unit, StatusCode::OK).with_record(record))
    }

    async fn delete(
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> AppResult<ViewResponse> {
        let id = request.record_id()?;
        if !unit.model.delete(&state.pool, id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: unit.model.entity(),
                id,
            }));
        }
        tracing::info!(entity = unit.model.entity(), id, "Record deleted");

        Ok(ViewResponse::new(unit, StatusCode::OK).with_redirect(unit.success_url(Some(id))))
    }
}

#[async_trait]
impl ViewLayer for DeleteView {
    fn name(&self) -> &'static str {
        "DeleteView"
    }

    async fn dispatch(
        &self,
        unit: &UnitContext,
        state: &AppState,
        request: &ViewRequest,
    ) -> Option<AppResult<ViewResponse>> {
        let result = match request.method {
            Method::GET => Self::confirm(unit, state, request).await,
            Method::DELETE | Method::POST => Self::delete(unit, state, request).await,
            _ => Err(not_allowed(request)),
        };
        Some(result)
    }
}
