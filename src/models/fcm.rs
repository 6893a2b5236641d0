use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::errors::ValidationError;

pub type DataPayload = BTreeMap<String, String>;

pub type NotificationPayload = BTreeMap<String, NotificationValue>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NotificationValue {
    Text(String),
    Number(serde_json::Number),
}

impl From<&str> for NotificationValue {
    fn from(value: &str) -> Self {
        NotificationValue::Text(value.to_string())
    }
}

impl From<String> for NotificationValue {
    fn from(value: String) -> Self {
        NotificationValue::Text(value)
    }
}

impl From<i64> for NotificationValue {
    fn from(value: i64) -> Self {
        NotificationValue::Number(value.into())
    }
}

impl From<u64> for NotificationValue {
    fn from(value: u64) -> Self {
        NotificationValue::Number(value.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &str {
        match self {
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidPriority(other.to_string())),
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Addressing mode of a message. A package carries at most one of the two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MessageTarget {
    #[default]
    None,
    To(String),
    Condition(String),
}

/// Parameters of a push message before validation.
///
/// `to` and `condition` are kept apart here so that a request naming both can
/// be rejected; [`FcmPackage`] stores the resolved [`MessageTarget`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FcmParams {
    pub registration_ids: Vec<String>,
    pub to: Option<String>,
    pub condition: Option<String>,
    pub notification_key: Option<String>,
    pub collapse_key: Option<String>,
    pub priority: Option<String>,
    pub content_available: Option<bool>,
    pub delay_while_idle: Option<bool>,
    pub time_to_live: Option<u32>,
    pub restricted_package_name: Option<String>,
    pub dry_run: Option<bool>,
    pub data: Option<DataPayload>,
    pub notification: Option<NotificationPayload>,
}

impl FcmParams {
    pub fn new<I, S>(registration_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            registration_ids: registration_ids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    pub fn notification_key(mut self, notification_key: impl Into<String>) -> Self {
        self.notification_key = Some(notification_key.into());
        self
    }

    pub fn collapse_key(mut self, collapse_key: impl Into<String>) -> Self {
        self.collapse_key = Some(collapse_key.into());
        self
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    pub fn content_available(mut self, content_available: bool) -> Self {
        self.content_available = Some(content_available);
        self
    }

    pub fn delay_while_idle(mut self, delay_while_idle: bool) -> Self {
        self.delay_while_idle = Some(delay_while_idle);
        self
    }

    pub fn time_to_live(mut self, seconds: u32) -> Self {
        self.time_to_live = Some(seconds);
        self
    }

    pub fn restricted_package_name(mut self, name: impl Into<String>) -> Self {
        self.restricted_package_name = Some(name.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    pub fn data<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.data = Some(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn notification<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NotificationValue>,
    {
        self.notification = Some(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }
}

/// A validated legacy HTTP API body, ready to be serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct FcmPackage {
    pub(crate) registration_ids: Vec<String>,
    pub(crate) target: MessageTarget,
    pub(crate) notification_key: Option<String>,
    pub(crate) collapse_key: Option<String>,
    pub(crate) priority: Option<Priority>,
    pub(crate) content_available: Option<bool>,
    pub(crate) delay_while_idle: Option<bool>,
    pub(crate) time_to_live: Option<u32>,
    pub(crate) restricted_package_name: Option<String>,
    pub(crate) dry_run: Option<bool>,
    pub(crate) data: Option<DataPayload>,
    pub(crate) notification: Option<NotificationPayload>,
}

impl FcmPackage {
    pub fn registration_ids(&self) -> &[String] {
        &self.registration_ids
    }

    pub fn target(&self) -> &MessageTarget {
        &self.target
    }

    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    pub fn time_to_live(&self) -> Option<u32> {
        self.time_to_live
    }

    pub fn data(&self) -> Option<&DataPayload> {
        self.data.as_ref()
    }

    pub fn notification(&self) -> Option<&NotificationPayload> {
        self.notification.as_ref()
    }

    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    fn field_count(&self) -> usize {
        let optional = [
            !matches!(self.target, MessageTarget::None),
            self.notification_key.is_some(),
            self.collapse_key.is_some(),
            self.priority.is_some(),
            self.content_available.is_some(),
            self.delay_while_idle.is_some(),
            self.time_to_live.is_some(),
            self.restricted_package_name.is_some(),
            self.dry_run.is_some(),
            self.data.is_some(),
            self.notification.is_some(),
        ];

        1 + optional.iter().filter(|present| **present).count()
    }
}

impl Serialize for FcmPackage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.field_count()))?;

        map.serialize_entry("registration_ids", &self.registration_ids)?;

        match &self.target {
            MessageTarget::None => {}
            MessageTarget::To(to) => map.serialize_entry("to", to)?,
            MessageTarget::Condition(condition) => map.serialize_entry("condition", condition)?,
        }

        if let Some(notification_key) = &self.notification_key {
            map.serialize_entry("notification_key", notification_key)?;
        }
        if let Some(collapse_key) = &self.collapse_key {
            map.serialize_entry("collapse_key", collapse_key)?;
        }
        if let Some(priority) = &self.priority {
            map.serialize_entry("priority", priority)?;
        }
        if let Some(content_available) = &self.content_available {
            map.serialize_entry("content_available", content_available)?;
        }
        if let Some(delay_while_idle) = &self.delay_while_idle {
            map.serialize_entry("delay_while_idle", delay_while_idle)?;
        }
        if let Some(time_to_live) = &self.time_to_live {
            map.serialize_entry("time_to_live", time_to_live)?;
        }
        if let Some(restricted_package_name) = &self.restricted_package_name {
            map.serialize_entry("restricted_package_name", restricted_package_name)?;
        }
        if let Some(dry_run) = &self.dry_run {
            map.serialize_entry("dry_run", dry_run)?;
        }
        if let Some(data) = &self.data {
            map.serialize_entry("data", data)?;
        }
        if let Some(notification) = &self.notification {
            map.serialize_entry("notification", notification)?;
        }

        map.end()
    }
}

/// Non-fatal diagnostic produced while building a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    DeprecatedField {
        field: &'static str,
        replacement: &'static str,
    },
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::DeprecatedField { field, replacement } => {
                write!(f, "'{}' is deprecated. use '{}' instead", field, replacement)
            }
        }
    }
}
