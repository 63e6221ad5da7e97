/// A factory was registered or asked for a handler with an invalid setup.
///
/// These are programming errors. They surface while the router is being
/// built, never while a request is served.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error(
        "{factory} received an invalid keyword '{key}'; only existing factory attributes \
         may be overridden"
    )]
    InvalidKeyword { factory: String, key: String },

    #[error("{factory}: '{key}' is an HTTP method name and cannot be passed as a keyword")]
    ReservedName { factory: String, key: String },

    #[error("{factory}: attribute '{key}' cannot be overridden with {value}")]
    InvalidValue {
        factory: String,
        key: String,
        value: String,
    },

    #[error("{factory}: required attribute '{attribute}' is not configured")]
    Missing {
        factory: String,
        attribute: &'static str,
    },

    #[error("Unknown action '{0}'. Valid actions: create, update, detail, delete")]
    UnknownAction(String),
}
