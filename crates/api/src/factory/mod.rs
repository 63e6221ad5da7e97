//! Composition of CRUD handlers from configured views, mixins and forms.
//!
//! A [`ViewFactory`] holds one immutable [`FactoryConfig`] per entity. For
//! each [`CrudAction`] it stacks layers in a fixed order:
//!
//! - master form: master form internal mixins, then the master form
//! - each slave form: slave form internal mixins, then the slave form
//! - view: view internal mixins, the action's base view, then the action's
//!   mixins
//!
//! Override points resolve to the last layer that provides them; hooks run
//! on every layer in order.

pub mod action;
pub mod config;
pub mod error;
pub mod form;
pub mod handler;
pub mod mixins;
pub mod store;
pub mod view;
pub mod views;

pub use action::CrudAction;
pub use config::{FactoryConfig, FactoryConfigBuilder};
pub use error::ConfigurationError;
pub use form::{ComposedForm, FieldKind, FieldSpec, FormData, FormErrors, FormLayer, StaticForm};
pub use handler::{UnitContext, UnitHandler, ViewFactory};
pub use mixins::{BlankAsNull, MasterParamsValidation, StripWhitespace};
pub use store::{EntityStore, Submission};
pub use view::{ComposedView, FormPayload, ViewLayer, ViewRequest, ViewResponse};
pub use views::{CreateView, DeleteView, DetailView, UpdateView};
