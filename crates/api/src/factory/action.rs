use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::error::ConfigurationError;

/// One of the four CRUD screens a factory can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrudAction {
    Create,
    Update,
    Detail,
    Delete,
}

impl CrudAction {
    pub const ALL: [CrudAction; 4] = [
        CrudAction::Create,
        CrudAction::Update,
        CrudAction::Detail,
        CrudAction::Delete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CrudAction::Create => "create",
            CrudAction::Update => "update",
            CrudAction::Detail => "detail",
            CrudAction::Delete => "delete",
        }
    }

    /// Page title shown for this action.
    pub fn title(self) -> &'static str {
        match self {
            CrudAction::Create => "Addition",
            CrudAction::Update => "View/Edit",
            CrudAction::Detail => "Details",
            CrudAction::Delete => "Deletion",
        }
    }

    /// Factory attribute holding the base view for this action.
    pub fn view_attribute(self) -> &'static str {
        match self {
            CrudAction::Create => "create_view",
            CrudAction::Update => "update_view",
            CrudAction::Detail => "detail_view",
            CrudAction::Delete => "delete_view",
        }
    }

    /// Factory attribute holding the mixins applied after the base view.
    pub fn mixins_attribute(self) -> &'static str {
        match self {
            CrudAction::Create => "create_mixins",
            CrudAction::Update => "update_mixins",
            CrudAction::Detail => "detail_mixins",
            CrudAction::Delete => "delete_mixins",
        }
    }

    /// Whether the action operates on an existing record.
    pub fn targets_record(self) -> bool {
        !matches!(self, CrudAction::Create)
    }
}

impl fmt::Display for CrudAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrudAction {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ConfigurationError::UnknownAction(s.to_string()))
    }
}
