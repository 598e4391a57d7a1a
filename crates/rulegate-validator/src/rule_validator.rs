//! Configured entry point bundling all validators

use crate::action::{validate_action, validate_actions};
use crate::condition::ConditionValidator;
use crate::error::{Result, ValidatorError};
use crate::payload::{PayloadValidator, RulePayload};
use crate::safety::SafetyGuard;
use rulegate_core::{
    Action, ConditionExpression, ValidationIssue, ValidationResult, ValidatorConfig,
};
use serde_json::Value;

/// Rule validator configured from a [`ValidatorConfig`]
#[derive(Debug, Clone)]
pub struct RuleValidator {
    config: ValidatorConfig,
    conditions: ConditionValidator,
    guard: SafetyGuard,
    payloads: PayloadValidator,
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleValidator {
    /// Create a validator with default configuration
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Create a validator with custom configuration
    pub fn with_config(config: ValidatorConfig) -> Self {
        let conditions = ConditionValidator::with_max_depth(config.max_depth);
        let guard = SafetyGuard::with_limits(config.safety);

        let mut payloads = PayloadValidator::new(conditions);
        if config.enforce_safety_limits {
            payloads = payloads.with_guard(guard);
        }

        Self {
            config,
            conditions,
            guard,
            payloads,
        }
    }

    /// Create a validator from `config/validator` and `RULEGATE_*` variables
    pub fn load() -> Result<Self> {
        Ok(Self::with_config(ValidatorConfig::load()?))
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Validate an optional condition tree
    pub fn validate_condition(&self, expr: Option<&Value>) -> ValidationResult {
        self.conditions.validate(expr)
    }

    /// Validate a single action
    pub fn validate_action(&self, action: &Value) -> ValidationResult {
        validate_action(action)
    }

    /// Validate an ordered action list
    pub fn validate_actions(&self, actions: &[Value]) -> ValidationResult {
        validate_actions(actions)
    }

    /// Check the condition tree against the safety ceilings
    pub fn is_safe(&self, expr: Option<&Value>) -> bool {
        self.guard.is_safe(expr)
    }

    /// Validate a typed rule payload
    pub fn validate_payload(&self, payload: &RulePayload) -> ValidationResult {
        self.payloads.validate(payload)
    }

    /// Validate a raw JSON rule payload
    pub fn validate_payload_value(&self, payload: &Value) -> ValidationResult {
        self.payloads.validate_value(payload)
    }

    /// Validate a condition and convert it to the typed model.
    ///
    /// The safety guard runs first, then full validation; only a tree that
    /// passes both is converted. A `null` condition gives `None`.
    pub fn parse_condition(&self, expr: &Value) -> Result<Option<ConditionExpression>> {
        if !self.guard.is_safe(Some(expr)) {
            return Err(ValidatorError::Invalid {
                issues: vec![ValidationIssue::UnsafeExpression],
            });
        }

        let result = self.conditions.validate(Some(expr));
        if !result.valid {
            return Err(ValidatorError::Invalid { issues: result.errors });
        }

        Ok(ConditionExpression::from_json(expr)?)
    }

    /// Validate an action list and convert it to the typed model
    pub fn parse_actions(&self, actions: &Value) -> Result<Vec<Action>> {
        let Value::Array(items) = actions else {
            return Err(ValidatorError::Invalid {
                issues: vec![ValidationIssue::NotAnArray {
                    field_name: "actions".to_string(),
                }],
            });
        };

        let result = validate_actions(items);
        if !result.valid {
            return Err(ValidatorError::Invalid { issues: result.errors });
        }

        Ok(items.iter().map(Action::from_json).collect::<serde_json::Result<Vec<_>>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulegate_core::{ActionType, ComparisonOperator, LogicalOperator};
    use serde_json::json;

    #[test]
    fn test_config_is_applied() {
        let validator = RuleValidator::with_config(ValidatorConfig::new().with_max_depth(1));
        let expr = json!({ "operator": "AND", "rules": [
            { "operator": "OR", "rules": [{ "field": "a", "operator": "=", "value": 1 }] }
        ]});

        assert!(!validator.validate_condition(Some(&expr)).valid);
        assert!(RuleValidator::new().validate_condition(Some(&expr)).valid);
    }

    #[test]
    fn test_enforced_safety_limits() {
        let wide = json!({
            "operator": "OR",
            "rules": vec![json!({ "field": "a", "operator": "=", "value": 1 }); 60]
        });
        let payload = RulePayload::new().with_condition(wide);

        // Wide groups pass full validation on their own
        assert!(RuleValidator::new().validate_payload(&payload).valid);

        let strict = RuleValidator::with_config(ValidatorConfig::new().enforce_safety_limits(true));
        let result = strict.validate_payload(&payload);
        assert_eq!(
            result.messages(),
            vec!["Condition: Expression exceeds safety limits".to_string()]
        );
    }

    #[test]
    fn test_parse_condition() {
        let validator = RuleValidator::new();
        let expr = validator
            .parse_condition(&json!({
                "operator": "NOT",
                "rules": [{ "field": "email", "operator": "IS_EMPTY" }]
            }))
            .unwrap()
            .unwrap();

        match expr {
            ConditionExpression::Group(group) => {
                assert_eq!(group.operator, LogicalOperator::Not);
                match &group.rules[0] {
                    ConditionExpression::Simple(s) => {
                        assert_eq!(s.operator, ComparisonOperator::IsEmpty)
                    }
                    _ => panic!("Expected simple condition"),
                }
            }
            _ => panic!("Expected group"),
        }
    }

    #[test]
    fn test_parse_condition_keeps_explicit_null_value() {
        let validator = RuleValidator::new();
        let raw = json!({ "field": "deleted_at", "operator": "=", "value": null });

        let expr = validator.parse_condition(&raw).unwrap().unwrap();
        assert_eq!(expr.to_json(), raw);
        assert!(validator.validate_condition(Some(&expr.to_json())).valid);
    }

    #[test]
    fn test_parse_condition_accepts_what_validation_accepts() {
        let validator = RuleValidator::new();
        let trees = [
            json!({
                "operator": "AND",
                "rules": [null, { "field": "a", "operator": "=", "value": 1 }]
            }),
            json!({ "field": "total", "operator": ">", "value": 5, "valueField": false }),
            json!({ "field": "total", "operator": ">", "value": 5, "valueField": 0 }),
        ];

        for raw in &trees {
            assert!(validator.validate_condition(Some(raw)).valid, "{}", raw);
            let expr = validator.parse_condition(raw).unwrap().unwrap();
            assert!(validator.validate_condition(Some(&expr.to_json())).valid, "{}", raw);
        }

        assert_eq!(validator.parse_condition(&Value::Null).unwrap(), None);
    }

    #[test]
    fn test_parse_condition_rejects_invalid() {
        let err = RuleValidator::new()
            .parse_condition(&json!({ "operator": "AND", "rules": [] }))
            .unwrap_err();

        match err {
            ValidatorError::Invalid { issues } => {
                assert_eq!(issues, vec![ValidationIssue::EmptyGroup])
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_actions() {
        let validator = RuleValidator::new();
        let actions = validator
            .parse_actions(&json!([
                { "type": "BLOCK_TRANSITION" },
                { "type": "SHOW_ERROR", "config": { "message": "Order total too high" } }
            ]))
            .unwrap();

        assert_eq!(actions.len(), 2);
        assert_eq!(actions[1].action_type, ActionType::ShowError);

        let actions = validator
            .parse_actions(&json!([{ "type": "ALLOW_TRANSITION", "config": false }]))
            .unwrap();
        assert_eq!(actions[0].config, None);

        assert!(matches!(
            validator.parse_actions(&json!({ "type": "LOG" })),
            Err(ValidatorError::Invalid { .. })
        ));
    }
}
