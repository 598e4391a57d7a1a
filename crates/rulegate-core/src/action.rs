//! Action types and their configuration schema
//!
//! Every action type has a fixed set of required and optional config keys.
//! Keys outside both lists are tolerated; only required keys are enforced.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

const MESSAGE_FIELDS: &[&str] = &["message"];
const NOTIFY_FIELDS: &[&str] = &["message", "recipients"];
const SET_FIELD_FIELDS: &[&str] = &["field", "value"];
const CALL_WEBHOOK_FIELDS: &[&str] = &["url"];
const EMIT_EVENT_FIELDS: &[&str] = &["eventName"];

const LOG_OPTIONAL_FIELDS: &[&str] = &["level"];
const NOTIFY_OPTIONAL_FIELDS: &[&str] = &["template"];
const CALL_WEBHOOK_OPTIONAL_FIELDS: &[&str] = &["method", "headers", "body"];
const EMIT_EVENT_OPTIONAL_FIELDS: &[&str] = &["payload"];

/// Kind of side effect an action performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    AllowTransition,
    BlockTransition,
    Log,
    ShowError,
    ShowWarning,
    ShowInfo,
    Notify,
    SetField,
    CallWebhook,
    EmitEvent,
}

impl ActionType {
    /// All action types, in wire order
    pub const ALL: [ActionType; 10] = [
        Self::AllowTransition,
        Self::BlockTransition,
        Self::Log,
        Self::ShowError,
        Self::ShowWarning,
        Self::ShowInfo,
        Self::Notify,
        Self::SetField,
        Self::CallWebhook,
        Self::EmitEvent,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::AllowTransition => "ALLOW_TRANSITION",
            ActionType::BlockTransition => "BLOCK_TRANSITION",
            ActionType::Log => "LOG",
            ActionType::ShowError => "SHOW_ERROR",
            ActionType::ShowWarning => "SHOW_WARNING",
            ActionType::ShowInfo => "SHOW_INFO",
            ActionType::Notify => "NOTIFY",
            ActionType::SetField => "SET_FIELD",
            ActionType::CallWebhook => "CALL_WEBHOOK",
            ActionType::EmitEvent => "EMIT_EVENT",
        }
    }

    /// Catalog key for the human-readable label of this action type
    pub fn label_key(&self) -> String {
        format!("action_types.{}", self.as_str())
    }

    /// Config keys that must be present and truthy
    pub fn required_config_fields(&self) -> &'static [&'static str] {
        match self {
            ActionType::Log
            | ActionType::ShowError
            | ActionType::ShowWarning
            | ActionType::ShowInfo => MESSAGE_FIELDS,
            ActionType::Notify => NOTIFY_FIELDS,
            ActionType::SetField => SET_FIELD_FIELDS,
            ActionType::CallWebhook => CALL_WEBHOOK_FIELDS,
            ActionType::EmitEvent => EMIT_EVENT_FIELDS,
            ActionType::AllowTransition | ActionType::BlockTransition => &[],
        }
    }

    /// Config keys the action understands but does not require
    pub fn optional_config_fields(&self) -> &'static [&'static str] {
        match self {
            ActionType::Log => LOG_OPTIONAL_FIELDS,
            ActionType::Notify => NOTIFY_OPTIONAL_FIELDS,
            ActionType::CallWebhook => CALL_WEBHOOK_OPTIONAL_FIELDS,
            ActionType::EmitEvent => EMIT_EVENT_OPTIONAL_FIELDS,
            _ => &[],
        }
    }

    /// Returns true if `key` is part of this type's schema
    pub fn knows_config_field(&self, key: &str) -> bool {
        self.required_config_fields().contains(&key) || self.optional_config_fields().contains(&key)
    }

    /// Comma separated list of the valid wire values
    pub fn valid_values() -> String {
        Self::ALL.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = UnknownActionType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownActionType(s.to_string()))
    }
}

/// Returned when an action type string is outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action type '{0}'")]
pub struct UnknownActionType(pub String);

/// A typed action, produced from raw JSON once validation has passed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Map<String, Value>>,
}

impl Action {
    /// Create an action without configuration
    pub fn new(action_type: ActionType) -> Self {
        Self { action_type, config: None }
    }

    /// Set a config entry
    pub fn with_config(mut self, key: impl Into<String>, value: Value) -> Self {
        self.config.get_or_insert_with(Map::new).insert(key.into(), value);
        self
    }

    /// Look up a config entry
    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config.as_ref().and_then(|c| c.get(key))
    }

    /// Convert a raw action that already passed validation.
    ///
    /// A `config` that is not an object carries no keys and is dropped.
    pub fn from_json(value: &Value) -> serde_json::Result<Self> {
        let mut value = value.clone();
        if let Value::Object(obj) = &mut value {
            if obj.get("config").is_some_and(|c| !c.is_object()) {
                obj.remove("config");
            }
        }
        serde_json::from_value(value)
    }
}
