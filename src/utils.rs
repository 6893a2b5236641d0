use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::{
    errors::ValidationError,
    models::{
        fcm::{DataPayload, FcmPackage, FcmParams, Notice, NotificationPayload, NotificationValue},
        validation::{
            resolve_target, validate_data, validate_priority, validate_registration_ids,
            validate_time_to_live,
        },
    },
};

const PARAMETERS: [&str; 13] = [
    "registration_ids",
    "to",
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

/// Validates `params` and builds the package, logging any notices as warnings.
pub fn build_package(params: FcmParams) -> Result<FcmPackage, ValidationError> {
    let (package, notices) = build_package_with_notices(params)?;

    for notice in &notices {
        warn!(notice = %notice, "FCM package built with a deprecated parameter");
    }

    debug!(
        registration_ids = package.registration_ids().len(),
        "FCM package validated"
    );

    Ok(package)
}

/// Same as [`build_package`] but hands the notices back instead of logging them.
pub fn build_package_with_notices(
    params: FcmParams,
) -> Result<(FcmPackage, Vec<Notice>), ValidationError> {
    validate_registration_ids(&params.registration_ids)?;

    assemble(params)
}

/// Runs every check except the registration id one, which callers do first.
fn assemble(params: FcmParams) -> Result<(FcmPackage, Vec<Notice>), ValidationError> {
    let target = resolve_target(params.to.as_deref(), params.condition.as_deref())?;

    let mut notices = Vec::new();
    if params.notification_key.is_some() {
        notices.push(Notice::DeprecatedField {
            field: "notification_key",
            replacement: "to",
        });
    }

    let priority = params
        .priority
        .as_deref()
        .map(validate_priority)
        .transpose()?;

    if let Some(seconds) = params.time_to_live {
        validate_time_to_live(seconds)?;
    }

    if let Some(data) = &params.data {
        validate_data(data)?;
    }

    let package = FcmPackage {
        registration_ids: params.registration_ids,
        target,
        notification_key: params.notification_key,
        collapse_key: params.collapse_key,
        priority,
        content_available: params.content_available,
        delay_while_idle: params.delay_while_idle,
        time_to_live: params.time_to_live,
        restricted_package_name: params.restricted_package_name,
        dry_run: params.dry_run,
        data: params.data,
        notification: params.notification,
    };

    Ok((package, notices))
}

/// Builds a package from untyped JSON parameters. The type of every field is
/// checked here, the value rules afterwards. `null` is treated as an absent
/// field.
pub fn build_package_from_value(
    value: &Value,
) -> Result<(FcmPackage, Vec<Notice>), ValidationError> {
    let object = value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type("parameters", "object", value))?;

    let registration_ids = match field(object, "registration_ids") {
        Some(ids) => string_list("registration_ids", ids)?,
        None => return Err(ValidationError::MissingField("registration_ids")),
    };
    validate_registration_ids(&registration_ids)?;

    if let Some(unknown) = object
        .keys()
        .find(|key| !PARAMETERS.contains(&key.as_str()))
    {
        return Err(ValidationError::UnknownField(unknown.clone()));
    }

    let mut params = FcmParams::new(registration_ids);

    params.to = optional_string(object, "to")?;
    params.condition = optional_string(object, "condition")?;

    params.notification_key = optional_string(object, "notification_key")?;
    params.collapse_key = optional_string(object, "collapse_key")?;

    if let Some(priority) = field(object, "priority") {
        let priority = priority
            .as_str()
            .ok_or_else(|| ValidationError::InvalidPriority(priority.to_string()))?;
        params.priority = Some(priority.to_string());
    }

    params.content_available = optional_bool(object, "content_available")?;
    params.delay_while_idle = optional_bool(object, "delay_while_idle")?;

    if let Some(ttl) = field(object, "time_to_live") {
        let seconds = ttl
            .as_u64()
            .and_then(|seconds| u32::try_from(seconds).ok())
            .ok_or_else(|| ValidationError::InvalidTimeToLive(ttl.to_string()))?;
        params.time_to_live = Some(seconds);
    }

    params.restricted_package_name = optional_string(object, "restricted_package_name")?;
    params.dry_run = optional_bool(object, "dry_run")?;

    if let Some(data) = field(object, "data") {
        params.data = Some(data_payload(data)?);
    }

    if let Some(notification) = field(object, "notification") {
        params.notification = Some(notification_payload(notification)?);
    }

    assemble(params)
}

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|value| !value.is_null())
}

fn string_list(name: &str, value: &Value) -> Result<Vec<String>, ValidationError> {
    let items = value
        .as_array()
        .ok_or_else(|| ValidationError::invalid_type(name, "list", value))?;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::invalid_type(format!("{}[{}]", name, index), "str", item))
        })
        .collect()
}

fn optional_string(
    object: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<String>, ValidationError> {
    field(object, name)
        .map(|value| {
            value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| ValidationError::invalid_type(name, "str", value))
        })
        .transpose()
}

fn optional_bool(
    object: &Map<String, Value>,
    name: &'static str,
) -> Result<Option<bool>, ValidationError> {
    field(object, name)
        .map(|value| {
            value
                .as_bool()
                .ok_or_else(|| ValidationError::invalid_type(name, "bool", value))
        })
        .transpose()
}

fn data_payload(value: &Value) -> Result<DataPayload, ValidationError> {
    let entries = value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type("data", "dict", value))?;

    let mut data = DataPayload::new();
    for (key, value) in entries {
        let text = value
            .as_str()
            .ok_or_else(|| ValidationError::invalid_type(format!("data['{}']", key), "str", value))?;
        data.insert(key.clone(), text.to_string());
    }

    Ok(data)
}

fn notification_payload(value: &Value) -> Result<NotificationPayload, ValidationError> {
    let entries = value
        .as_object()
        .ok_or_else(|| ValidationError::invalid_type("notification", "dict", value))?;

    entries
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => NotificationValue::Text(text.clone()),
                Value::Number(number) => NotificationValue::Number(number.clone()),
                other => {
                    return Err(ValidationError::invalid_type(
                        format!("notification['{}']", key),
                        "str or number",
                        other,
                    ));
                }
            };
            Ok((key.clone(), value))
        })
        .collect()
}
