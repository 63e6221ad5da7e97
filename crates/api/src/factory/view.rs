//! View layers, the per-request context they see, and their responses.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::types::DbId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::action::CrudAction;
use super::form::{FormData, FormDescription};
use super::handler::UnitContext;
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// JSON body accepted by write requests.
///
/// `slaves[i]` holds the rows for the i-th configured slave form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormPayload {
    #[serde(default)]
    pub master: FormData,
    #[serde(default)]
    pub slaves: Vec<Vec<FormData>>,
}

/// What a composed view sees of an incoming request.
#[derive(Debug, Clone)]
pub struct ViewRequest {
    pub method: Method,
    pub id: Option<DbId>,
    pub query: HashMap<String, String>,
    pub payload: Option<FormPayload>,
}

impl ViewRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            id: None,
            query: HashMap::new(),
            payload: None,
        }
    }

    pub fn with_id(mut self, id: DbId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_payload(mut self, payload: FormPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn record_id(&self) -> AppResult<DbId> {
        self.id
            .ok_or_else(|| AppError::BadRequest("Record id is required".to_string()))
    }

    pub fn require_payload(&self) -> AppResult<FormPayload> {
        self.payload
            .clone()
            .ok_or_else(|| AppError::BadRequest("Request body is required".to_string()))
    }

    /// Whether the request is one of the write methods.
    pub fn is_write(&self) -> bool {
        matches!(
            self.method,
            Method::POST | Method::PUT | Method::PATCH | Method::DELETE
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormsDescription {
    pub master: FormDescription,
    pub slaves: Vec<FormDescription>,
}

/// Payload produced by a composed view, wrapped in `{ "data": ... }`.
#[derive(Debug, Clone, Serialize)]
pub struct ViewResponse {
    #[serde(skip)]
    pub status: StatusCode,
    pub action: CrudAction,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    pub section: Option<String>,
    pub template: Option<String>,
    pub record: Option<Value>,
    pub forms: Option<FormsDescription>,
    pub redirect: Option<String>,
}

impl ViewResponse {
    /// An empty response carrying the unit's title, section and template.
    pub fn new(unit: &UnitContext, status: StatusCode) -> Self {
        Self {
            status,
            action: unit.action,
            title: unit.page_title(),
            heading: unit.title.clone(),
            section: unit.section.clone(),
            template: unit.template_name.clone(),
            record: None,
            forms: None,
            redirect: None,
        }
    }

    pub fn with_record(mut self, record: Value) -> Self {
        self.record = Some(record);
        self
    }

    pub fn with_forms(mut self, forms: FormsDescription) -> Self {
        self.forms = Some(forms);
        self
    }

    pub fn with_redirect(mut self, redirect: Option<String>) -> Self {
        self.redirect = redirect;
        self
    }
}

impl IntoResponse for ViewResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(DataResponse { data: self })).into_response()
    }
}

/// A composable view capability.
///
/// Override points (`page_title`, `success_url`, `dispatch`) are resolved
/// from the last layer in the composed order that returns `Some`. The
/// `check_request` hook runs on every layer in composed order before
/// dispatch.
#[async_trait]
pub trait ViewLayer: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    fn check_request(&self, _unit: &UnitContext, _request: &ViewRequest) -> AppResult<()> {
        Ok(())
    }

    fn page_title(&self, _unit: &UnitContext) -> Option<String> {
        None
    }

    fn success_url(&self, _unit: &UnitContext, _id: Option<DbId>) -> Option<String> {
        None
    }

    async fn dispatch(
        &self,
        _unit: &UnitContext,
        _state: &AppState,
        _request: &ViewRequest,
    ) -> Option<AppResult<ViewResponse>> {
        None
    }
}

/// An ordered stack of view layers acting as one view.
#[derive(Clone)]
pub struct ComposedView {
    layers: Vec<Arc<dyn ViewLayer>>,
}

impl ComposedView {
    /// Stack `internal` mixins, then `base`, then the action's `mixins`.
    pub fn compose(
        internal: &[Arc<dyn ViewLayer>],
        base: &Arc<dyn ViewLayer>,
        mixins: &[Arc<dyn ViewLayer>],
    ) -> Self {
        let mut layers = Vec::with_capacity(internal.len() + 1 + mixins.len());
        layers.extend(internal.iter().cloned());
        layers.push(Arc::clone(base));
        layers.extend(mixins.iter().cloned());
        Self { layers }
    }

    pub fn layers(&self) -> &[Arc<dyn ViewLayer>] {
        &self.layers
    }

    /// Layer names in composition order.
    pub fn resolution_order(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name()).collect()
    }
}
