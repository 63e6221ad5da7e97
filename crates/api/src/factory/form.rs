//! Form layers and their composition.
//!
//! A composed form is an ordered stack of [`FormLayer`]s: the configured
//! internal mixins first, the concrete form last. `fields` resolves to the
//! last layer that declares any; `prepare` and `clean` run on every layer in
//! stack order.

use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

/// Raw or cleaned form data, keyed by field name.
pub type FormData = serde_json::Map<String, Value>;

/// Key under which errors not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "__all__";

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text { max_len: usize },
    LongText,
    Integer,
    Decimal,
    Bool,
    /// Id of a row in another entity.
    Reference { entity: &'static str },
    /// List of ids of rows in another entity.
    References { entity: &'static str },
    Choice { options: &'static [&'static str] },
}

/// Declaration of a single form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    pub const fn text(name: &'static str, label: &'static str, max_len: usize) -> Self {
        Self::new(name, label, FieldKind::Text { max_len })
    }

    pub const fn long_text(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::LongText)
    }

    pub const fn integer(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Integer)
    }

    pub const fn decimal(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Decimal)
    }

    pub const fn boolean(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Bool)
    }

    pub const fn reference(name: &'static str, label: &'static str, entity: &'static str) -> Self {
        Self::new(name, label, FieldKind::Reference { entity })
    }

    pub const fn references(name: &'static str, label: &'static str, entity: &'static str) -> Self {
        Self::new(name, label, FieldKind::References { entity })
    }

    pub const fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
    ) -> Self {
        Self::new(name, label, FieldKind::Choice { options })
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    /// Check a submitted value against the field's kind and requiredness.
    pub fn check(&self, value: Option<&Value>) -> Result<(), String> {
        let value = match value {
            None | Some(Value::Null) if self.required => return Err(REQUIRED.to_string()),
            None | Some(Value::Null) => return Ok(()),
            Some(v) => v,
        };

        match self.kind {
            FieldKind::Text { max_len } => {
                let text = value.as_str().ok_or("Enter a text value.")?;
                if self.required && text.is_empty() {
                    return Err(REQUIRED.to_string());
                }
                let len = text.chars().count();
                if len > max_len {
                    return Err(format!(
                        "Ensure this value has at most {max_len} characters (it has {len})."
                    ));
                }
                Ok(())
            }
            FieldKind::LongText => {
                let text = value.as_str().ok_or("Enter a text value.")?;
                if self.required && text.is_empty() {
                    return Err(REQUIRED.to_string());
                }
                Ok(())
            }
            FieldKind::Integer => value
                .as_i64()
                .map(|_| ())
                .ok_or_else(|| "Enter a whole number.".to_string()),
            FieldKind::Decimal => match value {
                Value::Number(_) => Ok(()),
                Value::String(s) => s
                    .parse::<Decimal>()
                    .map(|_| ())
                    .map_err(|_| "Enter a number.".to_string()),
                _ => Err("Enter a number.".to_string()),
            },
            FieldKind::Bool => value
                .as_bool()
                .map(|_| ())
                .ok_or_else(|| "Enter true or false.".to_string()),
            FieldKind::Reference { entity } => value
                .as_i64()
                .map(|_| ())
                .ok_or_else(|| format!("Select a valid {entity} id.")),
            FieldKind::References { entity } => {
                let items = value
                    .as_array()
                    .ok_or_else(|| format!("Enter a list of {entity} ids."))?;
                if items.iter().all(Value::is_i64) {
                    Ok(())
                } else {
                    Err(format!("Enter a list of {entity} ids."))
                }
            }
            FieldKind::Choice { options } => {
                let choice = value.as_str().unwrap_or_default();
                if options.contains(&choice) {
                    Ok(())
                } else {
                    Err(format!(
                        "Select a valid choice. {value} is not one of the available choices."
                    ))
                }
            }
        }
    }
}

/// Validation errors keyed by field name.
///
/// Slave form errors are merged in under `"{prefix}.{field}"` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.add(NON_FIELD_ERRORS, message);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Merge `other` with every key prefixed by `prefix`.
    pub fn extend_prefixed(&mut self, prefix: &str, other: FormErrors) {
        for (field, messages) in other.0 {
            self.0
                .entry(format!("{prefix}.{field}"))
                .or_default()
                .extend(messages);
        }
    }
}

impl From<validator::ValidationErrors> for FormErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for err in field_errors {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                out.add(field.to_string(), message);
            }
        }
        out
    }
}

/// A composable form capability.
pub trait FormLayer: Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// Override point: the declared fields. The last layer returning
    /// `Some` wins.
    fn fields(&self) -> Option<&'static [FieldSpec]> {
        None
    }

    /// Hook run on every layer before field checks.
    fn prepare(&self, _data: &mut FormData) {}

    /// Hook run on every layer after field checks, for cross-field rules.
    fn clean(&self, _data: &FormData, _errors: &mut FormErrors) {}
}

/// A concrete form declared as a constant.
#[derive(Debug, Clone, Copy)]
pub struct StaticForm {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
    pub clean: Option<fn(&FormData, &mut FormErrors)>,
}

impl StaticForm {
    pub const fn new(name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            name,
            fields,
            clean: None,
        }
    }

    pub const fn with_clean(self, clean: fn(&FormData, &mut FormErrors)) -> Self {
        Self {
            clean: Some(clean),
            ..self
        }
    }
}

impl FormLayer for StaticForm {
    fn name(&self) -> &'static str {
        self.name
    }

    fn fields(&self) -> Option<&'static [FieldSpec]> {
        Some(self.fields)
    }

    fn clean(&self, data: &FormData, errors: &mut FormErrors) {
        if let Some(clean) = self.clean {
            clean(data, errors);
        }
    }
}

/// Serializable description of a composed form, returned on GET.
#[derive(Debug, Clone, Serialize)]
pub struct FormDescription {
    pub name: &'static str,
    pub layers: Vec<&'static str>,
    pub fields: &'static [FieldSpec],
}

/// An ordered stack of form layers acting as one form.
#[derive(Clone)]
pub struct ComposedForm {
    layers: Vec<Arc<dyn FormLayer>>,
}

impl ComposedForm {
    /// Stack `mixins` in order, then `form`.
    pub fn compose(mixins: &[Arc<dyn FormLayer>], form: &Arc<dyn FormLayer>) -> Self {
        let mut layers = Vec::with_capacity(mixins.len() + 1);
        layers.extend(mixins.iter().cloned());
        layers.push(Arc::clone(form));
        Self { layers }
    }

    /// Layer names in composition order.
    pub fn resolution_order(&self) -> Vec<&'static str> {
        self.layers.iter().map(|l| l.name()).collect()
    }

    /// Name of the concrete form (the last layer).
    pub fn name(&self) -> &'static str {
        self.layers.last().map(|l| l.name()).unwrap_or("Form")
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.layers
            .iter()
            .rev()
            .find_map(|l| l.fields())
            .unwrap_or(&[])
    }

    pub fn describe(&self) -> FormDescription {
        FormDescription {
            name: self.name(),
            layers: self.resolution_order(),
            fields: self.fields(),
        }
    }

    /// Run all layers over `data` and return only the declared fields.
    ///
    /// Absent fields stay absent. Optional fields submitted as `null` are kept
    /// so an update can clear them.
    pub fn validate(&self, mut data: FormData) -> Result<FormData, FormErrors> {
        for layer in &self.layers {
            layer.prepare(&mut data);
        }

        let mut errors = FormErrors::default();
        let mut cleaned = FormData::new();
        for field in self.fields() {
            let value = data.remove(field.name);
            match field.check(value.as_ref()) {
                Ok(()) => {
                    if let Some(value) = value {
                        cleaned.insert(field.name.to_string(), value);
                    }
                }
                Err(message) => errors.add(field.name, message),
            }
        }
        if !data.is_empty() {
            tracing::debug!(
                form = self.name(),
                ignored = ?data.keys().collect::<Vec<_>>(),
                "Dropped undeclared form fields"
            );
        }

        for layer in &self.layers {
            layer.clean(&cleaned, &mut errors);
        }

        if errors.is_empty() {
            Ok(cleaned)
        } else {
            Err(errors)
        }
    }
}
