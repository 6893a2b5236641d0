use thiserror::Error;

/// Reasons a set of parameters can not become an [`FcmPackage`](crate::models::fcm::FcmPackage).
///
/// `TooManyConditions`, `InvalidPriority`, `InvalidTimeToLive` and
/// `InvalidDataKey` are the specific kinds. Every other variant is a generic
/// shape error, see [`ValidationError::is_generic`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{field}' should be of type '{expected}'. Found {found}")]
    InvalidType {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("'{0}' is required")]
    MissingField(&'static str),

    #[error("Unknown parameter '{0}'")]
    UnknownField(String),

    #[error("'registration_ids' can not be empty")]
    EmptyRegistrationIds,

    #[error("Can not specify both 'to' and 'condition'")]
    ConflictingTarget,

    #[error("Max number of conditional operators is 2. We found {0}")]
    TooManyConditions(usize),

    #[error("Accepted priorities are 'normal' and 'high'. You gave {0}")]
    InvalidPriority(String),

    #[error("Max TTL length is 2419200. You gave {0}")]
    InvalidTimeToLive(String),

    #[error("'data' can not contain a key '{key}': {reason}")]
    InvalidDataKey { key: String, reason: &'static str },
}

impl ValidationError {
    pub(crate) fn invalid_type(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        ValidationError::InvalidType {
            field: field.into(),
            expected,
            found: found.to_string(),
        }
    }

    /// True for type/shape errors and the `to`/`condition` conflict.
    pub fn is_generic(&self) -> bool {
        !matches!(
            self,
            ValidationError::TooManyConditions(_)
                | ValidationError::InvalidPriority(_)
                | ValidationError::InvalidTimeToLive(_)
                | ValidationError::InvalidDataKey { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Failed to build FCM request: {0}")]
    Request(#[from] reqwest::Error),
}
