//! Stock mixins for views and forms.

use async_trait::async_trait;
use serde_json::Value;

use super::action::CrudAction;
use super::form::{FormData, FormLayer};
use super::handler::UnitContext;
use super::view::{ViewLayer, ViewRequest};
use crate::error::{AppError, AppResult};

/// Rejects create/update writes that carry no master form data.
pub struct MasterParamsValidation;

#[async_trait]
impl ViewLayer for MasterParamsValidation {
    fn name(&self) -> &'static str {
        "MasterParamsValidation"
    }

    fn check_request(&self, unit: &UnitContext, request: &ViewRequest) -> AppResult<()> {
        if unit.action == CrudAction::Delete || !request.is_write() {
            return Ok(());
        }
        match &request.payload {
            Some(payload) if !payload.master.is_empty() => Ok(()),
            _ => Err(AppError::BadRequest(
                "Master form data is required".to_string(),
            )),
        }
    }
}

/// Trims surrounding whitespace from every string value.
pub struct StripWhitespace;

impl FormLayer for StripWhitespace {
    fn name(&self) -> &'static str {
        "StripWhitespace"
    }

    fn prepare(&self, data: &mut FormData) {
        for value in data.values_mut() {
            if let Value::String(s) = value {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
        }
    }
}

/// Treats empty strings as absent values.
pub struct BlankAsNull;

impl FormLayer for BlankAsNull {
    fn name(&self) -> &'static str {
        "BlankAsNull"
    }

    fn prepare(&self, data: &mut FormData) {
        for value in data.values_mut() {
            if value.as_str() == Some("") {
                *value = Value::Null;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn data(value: Value) -> FormData {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn strip_whitespace_trims_strings_only() {
        let mut form = data(json!({"title": "  Chair ", "position": 3}));
        StripWhitespace.prepare(&mut form);
        assert_eq!(form["title"], "Chair");
        assert_eq!(form["position"], 3);
    }

    #[test]
    fn blank_as_null() {
        let mut form = data(json!({"code": "", "title": "x"}));
        BlankAsNull.prepare(&mut form);
        assert!(form["code"].is_null());
        assert_eq!(form["title"], "x");
    }
}
