//! Rule payload validation
//!
//! Validates the three sections of a stored business rule independently and
//! aggregates their issues into one flat list, each wrapped with its section
//! (`Condition:`, `Success actions:`, `Failure actions:`).
//!
//! A panic inside a section is caught and reported as an internal issue for
//! that section, so validating well-typed JSON never fails abnormally.

use crate::action::validate_actions;
use crate::condition::ConditionValidator;
use crate::safety::SafetyGuard;
use rulegate_core::{PayloadSection, ValidationIssue, ValidationResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};

/// Incoming rule payload; every section is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RulePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success_actions: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_actions: Option<Value>,
}

impl RulePayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: Value) -> Self {
        self.condition_expression = Some(condition);
        self
    }

    pub fn with_success_actions(mut self, actions: Value) -> Self {
        self.success_actions = Some(actions);
        self
    }

    pub fn with_failure_actions(mut self, actions: Value) -> Self {
        self.failure_actions = Some(actions);
        self
    }
}

/// Wire form of a payload validation outcome
///
/// `error` joins all messages with `"; "`; both `error` and `errors` are
/// omitted when the payload is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadResponse {
    pub valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl PayloadResponse {
    /// Build from a result using already rendered messages
    pub fn from_messages(valid: bool, messages: Vec<String>) -> Self {
        if valid {
            return Self {
                valid,
                error: None,
                errors: None,
            };
        }

        Self {
            valid,
            error: Some(messages.join("; ")),
            errors: Some(messages),
        }
    }
}

impl From<&ValidationResult> for PayloadResponse {
    fn from(result: &ValidationResult) -> Self {
        Self::from_messages(result.valid, result.messages())
    }
}

/// Orchestrates condition and action validation for a full payload
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadValidator {
    conditions: ConditionValidator,
    /// When set, the condition must pass the guard before full validation
    guard: Option<SafetyGuard>,
}

impl PayloadValidator {
    pub fn new(conditions: ConditionValidator) -> Self {
        Self {
            conditions,
            guard: None,
        }
    }

    /// Gate the condition section on a safety guard
    pub fn with_guard(mut self, guard: SafetyGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Validate a typed payload
    pub fn validate(&self, payload: &RulePayload) -> ValidationResult {
        self.validate_sections(
            payload.condition_expression.as_ref(),
            payload.success_actions.as_ref(),
            payload.failure_actions.as_ref(),
        )
    }

    /// Validate a raw JSON payload; anything but an object is rejected
    pub fn validate_value(&self, payload: &Value) -> ValidationResult {
        let Value::Object(obj) = payload else {
            return ValidationResult::failure(ValidationIssue::PayloadNotObject);
        };

        self.validate_sections(
            obj.get(PayloadSection::ConditionExpression.field_name()),
            obj.get(PayloadSection::SuccessActions.field_name()),
            obj.get(PayloadSection::FailureActions.field_name()),
        )
    }

    fn validate_sections(
        &self,
        condition: Option<&Value>,
        success_actions: Option<&Value>,
        failure_actions: Option<&Value>,
    ) -> ValidationResult {
        let condition_result = self.check_section(PayloadSection::ConditionExpression, || {
            self.check_condition(condition)
        });
        let success_result = self.check_section(PayloadSection::SuccessActions, || {
            check_actions(PayloadSection::SuccessActions, success_actions)
        });
        let failure_result = self.check_section(PayloadSection::FailureActions, || {
            check_actions(PayloadSection::FailureActions, failure_actions)
        });

        let sections = [
            (PayloadSection::ConditionExpression, condition_result),
            (PayloadSection::SuccessActions, success_result),
            (PayloadSection::FailureActions, failure_result),
        ];

        let issues: Vec<ValidationIssue> = sections
            .into_iter()
            .flat_map(|(section, result)| {
                result.errors.into_iter().map(move |issue| ValidationIssue::Section {
                    section,
                    inner: Box::new(issue),
                })
            })
            .collect();

        let result = ValidationResult::from_issues(issues);
        if result.valid {
            tracing::debug!("Rule payload is valid");
        } else {
            tracing::debug!(errors = result.errors.len(), "Rule payload rejected");
        }
        result
    }

    fn check_condition(&self, condition: Option<&Value>) -> ValidationResult {
        if let Some(guard) = &self.guard {
            if !guard.is_safe(condition) {
                tracing::warn!(
                    limits = ?guard.limits(),
                    "Condition expression exceeds safety limits"
                );
                return ValidationResult::failure(ValidationIssue::UnsafeExpression);
            }
        }
        self.conditions.validate(condition)
    }

    /// Run one section, converting a panic into an internal issue
    fn check_section<F>(&self, section: PayloadSection, check: F) -> ValidationResult
    where
        F: FnOnce() -> ValidationResult,
    {
        match panic::catch_unwind(AssertUnwindSafe(check)) {
            Ok(result) => result,
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "Unknown error".to_string());
                tracing::warn!(
                    section = section.field_name(),
                    %message,
                    "Internal failure during validation"
                );
                ValidationResult::failure(ValidationIssue::Internal {
                    field_name: section.field_name().to_string(),
                    message,
                })
            }
        }
    }
}

fn check_actions(section: PayloadSection, actions: Option<&Value>) -> ValidationResult {
    match actions {
        None | Some(Value::Null) => ValidationResult::ok(),
        Some(Value::Array(actions)) => validate_actions(actions),
        Some(_) => ValidationResult::failure(ValidationIssue::NotAnArray {
            field_name: section.field_name().to_string(),
        }),
    }
}

/// Validate a typed payload with default settings
pub fn validate_rule_payload(payload: &RulePayload) -> ValidationResult {
    PayloadValidator::default().validate(payload)
}

/// Validate a raw JSON payload with default settings
pub fn validate_rule_payload_value(payload: &Value) -> ValidationResult {
    PayloadValidator::default().validate_value(payload)
}
