//! Building request handlers from a [`FactoryConfig`].

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::routing::{any, MethodRouter};
use catalog_core::types::DbId;
use serde_json::Value;

use super::action::CrudAction;
use super::config::FactoryConfig;
use super::error::ConfigurationError;
use super::form::{ComposedForm, FormErrors, NON_FIELD_ERRORS};
use super::store::{EntityStore, Submission};
use super::view::{ComposedView, FormPayload, FormsDescription, ViewRequest, ViewResponse};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// HTTP method names that can never be passed as overrides.
pub const HTTP_METHOD_NAMES: [&str; 8] = [
    "get", "post", "put", "patch", "delete", "head", "options", "trace",
];

/// Attribute names a factory recognises.
pub const ATTRIBUTE_NAMES: &[&str] = &[
    "create_view",
    "update_view",
    "detail_view",
    "delete_view",
    "create_mixins",
    "update_mixins",
    "detail_mixins",
    "delete_mixins",
    "view_internal_mixins",
    "master_form_internal_mixins",
    "slave_form_internal_mixins",
    "action",
    "model",
    "master_form",
    "slave_forms",
    "success_url",
    "template_name",
    "title",
    "section",
];

/// Attributes that may be overridden per handler with a string value.
const STRING_ATTRIBUTES: [&str; 4] = ["template_name", "success_url", "title", "section"];

/// Produces one [`UnitHandler`] per CRUD action from a shared configuration.
#[derive(Clone)]
pub struct ViewFactory {
    config: Arc<FactoryConfig>,
}

impl ViewFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Like [`build_handler`](Self::build_handler) with the action given by name.
    pub fn build_named(
        &self,
        action: &str,
        overrides: &[(&str, Value)],
    ) -> Result<UnitHandler, ConfigurationError> {
        self.build_handler(action.parse()?, overrides)
    }

    /// Compose the forms and view for `action` and return a fresh handler.
    ///
    /// `overrides` may only name existing attributes, never an HTTP method
    /// name. Only string attributes can take a value here; layers, forms
    /// and the model are set on the [`FactoryConfig`].
    pub fn build_handler(
        &self,
        action: CrudAction,
        overrides: &[(&str, Value)],
    ) -> Result<UnitHandler, ConfigurationError> {
        let config = &self.config;
        let mut strings = StringAttributes {
            success_url: config.success_url.clone(),
            template_name: config.template_name.clone(),
            title: config.title.clone(),
            section: config.section.clone(),
        };
        for (key, value) in overrides {
            strings.apply(config.name(), key, value)?;
        }

        let master_form =
            ComposedForm::compose(&config.master_form_internal_mixins, config.master_form()?);
        let slave_forms = config
            .slave_forms
            .iter()
            .map(|form| ComposedForm::compose(&config.slave_form_internal_mixins, form))
            .collect();
        let view = ComposedView::compose(
            &config.view_internal_mixins,
            config.view(action)?,
            config.mixins(action),
        );
        let model = config.model()?;

        tracing::debug!(
            factory = config.name(),
            %action,
            layers = ?view.resolution_order(),
            "Composed view handler"
        );

        Ok(UnitHandler {
            unit: Arc::new(UnitContext {
                factory: config.name().to_string(),
                action,
                master_form,
                slave_forms,
                view,
                model,
                template_name: strings.template_name,
                success_url: strings.success_url,
                title: strings.title,
                section: strings.section,
            }),
        })
    }
}

struct StringAttributes {
    success_url: Option<String>,
    template_name: Option<String>,
    title: Option<String>,
    section: Option<String>,
}

impl StringAttributes {
    fn apply(&mut self, factory: &str, key: &str, value: &Value) -> Result<(), ConfigurationError> {
        if HTTP_METHOD_NAMES.contains(&key) {
            return Err(ConfigurationError::ReservedName {
                factory: factory.to_string(),
                key: key.to_string(),
            });
        }
        if !ATTRIBUTE_NAMES.contains(&key) {
            return Err(ConfigurationError::InvalidKeyword {
                factory: factory.to_string(),
                key: key.to_string(),
            });
        }
        let text = match value {
            Value::String(s) if STRING_ATTRIBUTES.contains(&key) => s.clone(),
            _ => {
                return Err(ConfigurationError::InvalidValue {
                    factory: factory.to_string(),
                    key: key.to_string(),
                    value: value.to_string(),
                })
            }
        };
        let slot = match key {
            "success_url" => &mut self.success_url,
            "template_name" => &mut self.template_name,
            "title" => &mut self.title,
            _ => &mut self.section,
        };
        *slot = Some(text);
        Ok(())
    }
}

/// Everything a composed view sees while serving a request.
pub struct UnitContext {
    pub factory: String,
    pub action: CrudAction,
    pub master_form: ComposedForm,
    pub slave_forms: Vec<ComposedForm>,
    pub view: ComposedView,
    pub model: Arc<dyn EntityStore>,
    pub template_name: Option<String>,
    pub success_url: Option<String>,
    pub title: Option<String>,
    pub section: Option<String>,
}

impl UnitContext {
    /// Page title: the last layer's override, else the action's title.
    pub fn page_title(&self) -> String {
        self.view
            .layers()
            .iter()
            .rev()
            .find_map(|layer| layer.page_title(self))
            .unwrap_or_else(|| self.action.title().to_string())
    }

    /// Redirect target: the last layer's override, else the configured URL
    /// with `{id}` filled in.
    pub fn success_url(&self, id: Option<DbId>) -> Option<String> {
        if let Some(url) = self
            .view
            .layers()
            .iter()
            .rev()
            .find_map(|layer| layer.success_url(self, id))
        {
            return Some(url);
        }
        let url = self.success_url.as_deref()?;
        Some(match id {
            Some(id) => url.replace("{id}", &id.to_string()),
            None => url.to_string(),
        })
    }

    pub fn forms(&self) -> FormsDescription {
        FormsDescription {
            master: self.master_form.describe(),
            slaves: self.slave_forms.iter().map(ComposedForm::describe).collect(),
        }
    }

    /// Validate a payload through the master form and each slave form.
    ///
    /// Slave errors are keyed `slaves.{form}.{row}.{field}`.
    pub fn validate(&self, payload: FormPayload) -> AppResult<Submission> {
        let mut errors = FormErrors::default();

        if payload.slaves.len() > self.slave_forms.len() {
            errors.add(
                NON_FIELD_ERRORS,
                format!(
                    "Expected at most {} slave form groups, got {}",
                    self.slave_forms.len(),
                    payload.slaves.len()
                ),
            );
        }

        let master = match self.master_form.validate(payload.master) {
            Ok(cleaned) => cleaned,
            Err(e) => {
                errors.extend_prefixed("master", e);
                Default::default()
            }
        };

        let mut slaves = Vec::with_capacity(payload.slaves.len());
        for (index, (form, rows)) in self.slave_forms.iter().zip(payload.slaves).enumerate() {
            let mut cleaned_rows = Vec::with_capacity(rows.len());
            for (row, data) in rows.into_iter().enumerate() {
                match form.validate(data) {
                    Ok(cleaned) => cleaned_rows.push(cleaned),
                    Err(e) => errors.extend_prefixed(&format!("slaves.{index}.{row}"), e),
                }
            }
            slaves.push(cleaned_rows);
        }

        if errors.is_empty() {
            Ok(Submission { master, slaves })
        } else {
            Err(AppError::Form(errors))
        }
    }
}

/// A composed, ready-to-route handler for one action.
///
/// Every call to [`ViewFactory::build_handler`] yields a new unit, even for
/// the same action.
#[derive(Clone)]
pub struct UnitHandler {
    unit: Arc<UnitContext>,
}

impl UnitHandler {
    pub fn action(&self) -> CrudAction {
        self.unit.action
    }

    pub fn context(&self) -> &UnitContext {
        &self.unit
    }

    /// View layer names in composition order.
    pub fn resolution_order(&self) -> Vec<&'static str> {
        self.unit.view.resolution_order()
    }

    /// Whether both handlers share the same composed unit.
    pub fn same_unit(&self, other: &UnitHandler) -> bool {
        Arc::ptr_eq(&self.unit, &other.unit)
    }

    /// Run the request hooks, then dispatch to the last layer that answers.
    pub async fn handle(&self, state: &AppState, request: ViewRequest) -> AppResult<ViewResponse> {
        let unit = &*self.unit;
        for layer in unit.view.layers() {
            layer.check_request(unit, &request)?;
        }
        for layer in unit.view.layers().iter().rev() {
            if let Some(result) = layer.dispatch(unit, state, &request).await {
                return result;
            }
        }
        Err(AppError::MethodNotAllowed(request.method.to_string()))
    }

    /// Adapt the handler to an axum route. Actions on an existing record
    /// expect an `{id}` path parameter.
    pub fn into_method_router(self) -> MethodRouter<AppState> {
        if self.action().targets_record() {
            any(
                move |State(state): State<AppState>,
                      method: Method,
                      Path(id): Path<DbId>,
                      Query(query): Query<HashMap<String, String>>,
                      body: Bytes| {
                    let handler = self.clone();
                    async move { handler.serve(state, method, Some(id), query, body).await }
                },
            )
        } else {
            any(
                move |State(state): State<AppState>,
                      method: Method,
                      Query(query): Query<HashMap<String, String>>,
                      body: Bytes| {
                    let handler = self.clone();
                    async move { handler.serve(state, method, None, query, body).await }
                },
            )
        }
    }

    async fn serve(
        &self,
        state: AppState,
        method: Method,
        id: Option<DbId>,
        query: HashMap<String, String>,
        body: Bytes,
    ) -> AppResult<ViewResponse> {
        let payload = if body.is_empty() {
            None
        } else {
            let payload: FormPayload = serde_json::from_slice(&body)
                .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
            Some(payload)
        };
        let request = ViewRequest {
            method,
            id,
            query,
            payload,
        };
        self.handle(&state, request).await
    }
}
