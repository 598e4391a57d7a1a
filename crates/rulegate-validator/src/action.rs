//! Action list validation
//!
//! Each action needs a known `type` and, for types with required config keys,
//! a `config` object where every required key is truthy. `null`, `false`, `0`
//! and `""` all count as missing.

use rulegate_core::value::is_truthy;
use rulegate_core::{ActionType, ValidationIssue, ValidationResult};
use serde_json::Value;

/// Validate a single raw action
pub fn validate_action(action: &Value) -> ValidationResult {
    let obj = match action {
        Value::Null => return ValidationResult::failure(ValidationIssue::ActionRequired),
        Value::Object(obj) => obj,
        _ => return ValidationResult::failure(ValidationIssue::ActionNotObject),
    };

    let mut issues = Vec::new();

    let action_type = match obj.get("type") {
        Some(Value::String(name)) if !name.is_empty() => match name.parse::<ActionType>() {
            Ok(action_type) => Some(action_type),
            Err(_) => {
                issues.push(ValidationIssue::UnknownActionType {
                    action_type: name.clone(),
                });
                None
            }
        },
        _ => {
            issues.push(ValidationIssue::ActionTypeRequired);
            None
        }
    };

    // Unknown types have no schema, so there is nothing more to check
    if let Some(action_type) = action_type {
        issues.extend(check_config(action_type, obj.get("config")));
    }

    ValidationResult::from_issues(issues)
}

/// Validate an ordered list of raw actions. An empty list is valid.
pub fn validate_actions(actions: &[Value]) -> ValidationResult {
    let issues: Vec<ValidationIssue> = actions
        .iter()
        .enumerate()
        .filter_map(|(i, action)| {
            let result = validate_action(action);
            (!result.valid).then(|| ValidationIssue::Action {
                index: i + 1,
                issues: result.errors,
            })
        })
        .collect();

    tracing::debug!(
        actions = actions.len(),
        invalid = issues.len(),
        "Validated action list"
    );
    ValidationResult::from_issues(issues)
}

/// Validate a config mapping for an action type on its own
pub fn validate_action_config(action_type: ActionType, config: Option<&Value>) -> ValidationResult {
    ValidationResult::from_issues(check_config(action_type, config))
}

fn check_config(action_type: ActionType, config: Option<&Value>) -> Vec<ValidationIssue> {
    let required = action_type.required_config_fields();
    let config = config.filter(|c| is_truthy(c));

    if let Some(Value::Object(map)) = config {
        let unknown: Vec<&str> = map
            .keys()
            .map(|k| k.as_str())
            .filter(|k| !action_type.knows_config_field(k))
            .collect();
        if !unknown.is_empty() {
            tracing::debug!(%action_type, ?unknown, "Action config has keys outside its schema");
        }
    }

    if required.is_empty() {
        return Vec::new();
    }

    let Some(config) = config else {
        return vec![ValidationIssue::ConfigRequired {
            action_type,
            fields: required.iter().map(|f| f.to_string()).collect(),
        }];
    };

    required
        .iter()
        .filter(|field| !config.get(**field).map(is_truthy).unwrap_or(false))
        .map(|field| ValidationIssue::ConfigFieldMissing {
            field: field.to_string(),
        })
        .collect()
}
