//! Immutable per-entity factory configuration.

use std::collections::HashMap;
use std::sync::Arc;

use super::action::CrudAction;
use super::error::ConfigurationError;
use super::form::FormLayer;
use super::mixins::MasterParamsValidation;
use super::store::EntityStore;
use super::view::ViewLayer;
use super::views::CreateView;

/// Everything a [`ViewFactory`](super::ViewFactory) composes handlers from.
///
/// Built once per entity with [`FactoryConfig::builder`] and never mutated
/// afterwards; handlers built from it share it read-only.
#[derive(Clone)]
pub struct FactoryConfig {
    pub(crate) name: String,
    pub(crate) views: HashMap<CrudAction, Arc<dyn ViewLayer>>,
    pub(crate) action_mixins: HashMap<CrudAction, Vec<Arc<dyn ViewLayer>>>,
    pub(crate) view_internal_mixins: Vec<Arc<dyn ViewLayer>>,
    pub(crate) master_form_internal_mixins: Vec<Arc<dyn FormLayer>>,
    pub(crate) slave_form_internal_mixins: Vec<Arc<dyn FormLayer>>,
    pub(crate) master_form: Option<Arc<dyn FormLayer>>,
    pub(crate) slave_forms: Vec<Arc<dyn FormLayer>>,
    pub(crate) model: Option<Arc<dyn EntityStore>>,
    pub(crate) success_url: Option<String>,
    pub(crate) template_name: Option<String>,
    pub(crate) title: Option<String>,
    pub(crate) section: Option<String>,
}

impl FactoryConfig {
    /// Start a configuration with the defaults: `CreateView` as the create
    /// base view and `MasterParamsValidation` as the only create mixin.
    pub fn builder(name: impl Into<String>) -> FactoryConfigBuilder {
        let mut views: HashMap<CrudAction, Arc<dyn ViewLayer>> = HashMap::new();
        views.insert(CrudAction::Create, Arc::new(CreateView));

        let mut action_mixins: HashMap<CrudAction, Vec<Arc<dyn ViewLayer>>> = HashMap::new();
        action_mixins.insert(
            CrudAction::Create,
            vec![Arc::new(MasterParamsValidation) as Arc<dyn ViewLayer>],
        );

        FactoryConfigBuilder {
            config: FactoryConfig {
                name: name.into(),
                views,
                action_mixins,
                view_internal_mixins: Vec::new(),
                master_form_internal_mixins: Vec::new(),
                slave_form_internal_mixins: Vec::new(),
                master_form: None,
                slave_forms: Vec::new(),
                model: None,
                success_url: None,
                template_name: None,
                title: None,
                section: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self, action: CrudAction) -> Result<&Arc<dyn ViewLayer>, ConfigurationError> {
        self.views.get(&action).ok_or_else(|| self.missing(action.view_attribute()))
    }

    pub fn mixins(&self, action: CrudAction) -> &[Arc<dyn ViewLayer>] {
        self.action_mixins
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn master_form(&self) -> Result<&Arc<dyn FormLayer>, ConfigurationError> {
        self.master_form
            .as_ref()
            .ok_or_else(|| self.missing("master_form"))
    }

    pub fn model(&self) -> Result<Arc<dyn EntityStore>, ConfigurationError> {
        self.model.clone().ok_or_else(|| self.missing("model"))
    }

    pub(crate) fn missing(&self, attribute: &'static str) -> ConfigurationError {
        ConfigurationError::Missing {
            factory: self.name.clone(),
            attribute,
        }
    }
}

/// Builder for [`FactoryConfig`].
pub struct FactoryConfigBuilder {
    config: FactoryConfig,
}

impl FactoryConfigBuilder {
    /// Register the base view for an action, replacing any previous one.
    pub fn view(mut self, action: CrudAction, view: impl ViewLayer) -> Self {
        self.config.views.insert(action, Arc::new(view));
        self
    }

    /// Append a mixin applied after the action's base view.
    pub fn mixin(mut self, action: CrudAction, mixin: impl ViewLayer) -> Self {
        self.config
            .action_mixins
            .entry(action)
            .or_default()
            .push(Arc::new(mixin));
        self
    }

    /// Drop all mixins registered for an action, defaults included.
    pub fn clear_mixins(mut self, action: CrudAction) -> Self {
        self.config.action_mixins.remove(&action);
        self
    }

    /// Append a mixin placed before the base view of every action.
    pub fn view_internal_mixin(mut self, mixin: impl ViewLayer) -> Self {
        self.config.view_internal_mixins.push(Arc::new(mixin));
        self
    }

    pub fn master_form_internal_mixin(mut self, mixin: impl FormLayer) -> Self {
        self.config.master_form_internal_mixins.push(Arc::new(mixin));
        self
    }

    pub fn slave_form_internal_mixin(mut self, mixin: impl FormLayer) -> Self {
        self.config.slave_form_internal_mixins.push(Arc::new(mixin));
        self
    }

    pub fn master_form(mut self, form: impl FormLayer) -> Self {
        self.config.master_form = Some(Arc::new(form));
        self
    }

    /// Append a slave form. Payload rows are matched to slave forms by position.
    pub fn slave_form(mut self, form: impl FormLayer) -> Self {
        self.config.slave_forms.push(Arc::new(form));
        self
    }

    pub fn model(mut self, model: impl EntityStore) -> Self {
        self.config.model = Some(Arc::new(model));
        self
    }

    /// Redirect target after a successful write; `{id}` is replaced by the
    /// record id.
    pub fn success_url(mut self, url: impl Into<String>) -> Self {
        self.config.success_url = Some(url.into());
        self
    }

    pub fn template_name(mut self, name: impl Into<String>) -> Self {
        self.config.template_name = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.config.section = Some(section.into());
        self
    }

    pub fn build(self) -> FactoryConfig {
        self.config
    }
}
