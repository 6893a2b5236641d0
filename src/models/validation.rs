use crate::{
    errors::ValidationError,
    models::fcm::{DataPayload, MessageTarget, Priority},
};

/// Four weeks, in seconds.
pub const MAX_TIME_TO_LIVE: u32 = 60 * 60 * 24 * 7 * 4;

pub const MAX_CONDITION_OPERATORS: usize = 2;

/// Top level keys of a send request. None of them may be used inside `data`.
pub const RESERVED_DATA_KEYS: [&str; 14] = [
    "from",
    "to",
    "registration_ids",
    "condition",
    "notification_key",
    "collapse_key",
    "priority",
    "content_available",
    "delay_while_idle",
    "time_to_live",
    "restricted_package_name",
    "dry_run",
    "data",
    "notification",
];

pub const RESERVED_DATA_KEY_PREFIXES: [&str; 2] = ["google", "gcm"];

pub fn validate_registration_ids(registration_ids: &[String]) -> Result<(), ValidationError> {
    if registration_ids.is_empty() {
        return Err(ValidationError::EmptyRegistrationIds);
    }

    Ok(())
}

pub fn resolve_target(
    to: Option<&str>,
    condition: Option<&str>,
) -> Result<MessageTarget, ValidationError> {
    match (to, condition) {
        (Some(_), Some(_)) => Err(ValidationError::ConflictingTarget),
        (Some(to), None) => Ok(MessageTarget::To(to.to_string())),
        (None, Some(condition)) => {
            validate_condition(condition)?;
            Ok(MessageTarget::Condition(condition.to_string()))
        }
        (None, None) => Ok(MessageTarget::None),
    }
}

pub fn validate_condition(condition: &str) -> Result<(), ValidationError> {
    let operators = condition.matches("&&").count() + condition.matches("||").count();

    if operators > MAX_CONDITION_OPERATORS {
        return Err(ValidationError::TooManyConditions(operators));
    }

    Ok(())
}

pub fn validate_priority(priority: &str) -> Result<Priority, ValidationError> {
    priority.parse()
}

pub fn validate_time_to_live(seconds: u32) -> Result<(), ValidationError> {
    if seconds > MAX_TIME_TO_LIVE {
        return Err(ValidationError::InvalidTimeToLive(seconds.to_string()));
    }

    Ok(())
}

pub fn validate_data_key(key: &str) -> Result<(), ValidationError> {
    if RESERVED_DATA_KEY_PREFIXES
        .iter()
        .any(|prefix| key.starts_with(prefix))
    {
        return Err(ValidationError::InvalidDataKey {
            key: key.to_string(),
            reason: "keys can not begin with 'google' or 'gcm'",
        });
    }

    if RESERVED_DATA_KEYS.contains(&key) {
        return Err(ValidationError::InvalidDataKey {
            key: key.to_string(),
            reason: "reserved word",
        });
    }

    Ok(())
}

pub fn validate_data(data: &DataPayload) -> Result<(), ValidationError> {
    data.keys().try_for_each(|key| validate_data_key(key))
}
