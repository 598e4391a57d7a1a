//! Integration tests for rule validation
//!
//! Exercises the public API end to end: conditions, actions, the safety guard
//! and full payloads.

use rulegate_validator::*;
use serde_json::{json, Value};

fn predicate() -> Value {
    json!({ "field": "age", "operator": ">", "value": 18 })
}

fn group_chain(levels: usize) -> Value {
    let mut expr = predicate();
    for _ in 0..levels {
        expr = json!({ "operator": "AND", "rules": [expr] });
    }
    expr
}

// =============================================================================
// Optionality
// =============================================================================

#[test]
fn test_absent_inputs_are_valid() {
    let result = validate_condition(None);
    assert!(result.valid);
    assert!(result.errors.is_empty());

    let result = validate_actions(&[]);
    assert!(result.valid);
    assert!(result.errors.is_empty());

    let result = validate_rule_payload_value(&json!({
        "conditionExpression": null,
        "successActions": [],
        "failureActions": null
    }));
    assert!(result.valid);
}

// =============================================================================
// Conditions
// =============================================================================

#[test]
fn test_and_group_with_single_predicate() {
    let expr = json!({ "operator": "AND", "rules": [predicate()] });
    assert_eq!(validate_condition(Some(&expr)), ValidationResult::ok());
}

#[test]
fn test_xor_group_is_rejected() {
    let expr = json!({ "operator": "XOR", "rules": [predicate()] });
    let result = validate_condition(Some(&expr));

    assert!(!result.valid);
    assert_eq!(result.kinds(), vec![IssueKind::UnknownOperator]);
    assert_eq!(
        result.messages(),
        vec!["Invalid logical operator 'XOR'. Valid operators: AND, OR, NOT".to_string()]
    );
}

#[test]
fn test_every_comparison_operator_is_accepted() {
    for op in ComparisonOperator::ALL {
        let expr = json!({ "field": "x", "operator": op.as_str(), "value": 1 });
        assert!(validate_condition(Some(&expr)).valid, "{}", op);
    }
}

#[test]
fn test_operator_vocabulary_is_not_coerced() {
    for op in ["and", "eq", "in", "like", "==="] {
        let expr = json!({ "field": "x", "operator": op, "value": 1 });
        let result = validate_condition(Some(&expr));
        assert_eq!(result.kinds(), vec![IssueKind::UnknownOperator], "{}", op);
    }
}

#[test]
fn test_empty_group_is_rejected_at_any_level() {
    let expr = json!({
        "operator": "OR",
        "rules": [predicate(), { "operator": "AND", "rules": [] }]
    });
    let result = validate_condition(Some(&expr));

    assert!(result.has_kind(IssueKind::EmptyGroup));
    assert_eq!(result.messages(), vec!["Rule 2: Group must contain at least one rule".to_string()]);
}

#[test]
fn test_depth_beyond_limit_is_rejected() {
    for levels in 6..9 {
        let result = validate_condition(Some(&group_chain(levels)));
        assert!(!result.valid);
        assert_eq!(result.kinds(), vec![IssueKind::DepthExceeded]);
    }
}

#[test]
fn test_custom_max_depth() {
    let validator = ConditionValidator::with_max_depth(2);
    assert!(validator.validate(Some(&group_chain(2))).valid);
    assert!(!validator.validate(Some(&group_chain(3))).valid);
}

#[test]
fn test_field_paths() {
    for field in ["order.items[0].sku", "a.b[0].c", "_meta", "x1"] {
        let expr = json!({ "field": field, "operator": "=", "value": 1 });
        assert!(validate_condition(Some(&expr)).valid, "{}", field);
    }

    for field in ["1st", "a-b", "a b", "$x"] {
        let expr = json!({ "field": field, "operator": "=", "value": 1 });
        assert_eq!(
            validate_condition(Some(&expr)).kinds(),
            vec![IssueKind::InvalidFieldPath],
            "{}",
            field
        );
    }
}

#[test]
fn test_presence_operators() {
    let ok = json!({ "field": "email", "operator": "IS_NOT_EMPTY" });
    assert!(validate_condition(Some(&ok)).valid);

    let missing = json!({ "field": "email", "operator": "CONTAINS" });
    assert_eq!(
        validate_condition(Some(&missing)).kinds(),
        vec![IssueKind::MissingRequiredField]
    );
}

#[test]
fn test_errors_are_distinct_per_defect() {
    let expr = json!({
        "operator": "AND",
        "rules": [
            { "field": "ok", "operator": "=", "value": 1 },
            { "field": "bad path", "operator": "=", "value": 1 },
            { "field": "also ok", "operator": "??" }
        ]
    });
    let result = validate_condition(Some(&expr));

    assert_eq!(result.errors.len(), 2);
    assert_eq!(
        result.kinds(),
        vec![
            IssueKind::InvalidFieldPath,
            IssueKind::InvalidFieldPath,
            IssueKind::UnknownOperator,
            IssueKind::MissingRequiredField,
        ]
    );
    assert!(result.messages()[0].starts_with("Rule 2: "));
    assert!(result.messages()[1].starts_with("Rule 3: "));
}

#[test]
fn test_validation_is_idempotent() {
    let expr = json!({
        "operator": "OR",
        "rules": [{ "field": "", "operator": "" }, { "bogus": 1 }]
    });
    let first = validate_condition(Some(&expr));
    let second = validate_condition(Some(&expr));
    assert_eq!(first, second);
}

// =============================================================================
// Actions
// =============================================================================

#[test]
fn test_notify_without_recipients() {
    let result = validate_action(&json!({ "type": "NOTIFY", "config": { "message": "hi" } }));

    assert!(!result.valid);
    assert!(result.messages()[0].contains("recipients"));
}

#[test]
fn test_log_with_optional_level() {
    let action = json!({ "type": "LOG", "config": { "message": "x", "level": "debug" } });
    let result = validate_action(&action);
    assert!(result.valid);
}

#[test]
fn test_every_action_type_with_required_fields() {
    for action_type in ActionType::ALL {
        let config: serde_json::Map<String, Value> = action_type
            .required_config_fields()
            .iter()
            .map(|f| (f.to_string(), json!("set")))
            .collect();
        let action = json!({ "type": action_type.as_str(), "config": config });
        assert!(validate_action(&action).valid, "{}", action_type);
    }
}

#[test]
fn test_unknown_action_type_keeps_validating_list() {
    let actions = vec![
        json!({ "type": "SEND_SMS", "config": { "to": "+1" } }),
        json!({ "type": "SET_FIELD", "config": { "field": "status", "value": 0 } }),
        json!({ "type": "ALLOW_TRANSITION" }),
    ];
    let result = validate_actions(&actions);

    assert_eq!(result.errors.len(), 2);
    assert_eq!(
        result.kinds(),
        vec![IssueKind::UnknownActionType, IssueKind::MissingRequiredField]
    );
    assert_eq!(result.messages()[1], "Action 2: Required field 'value' is missing");
}

// =============================================================================
// Safety guard
// =============================================================================

#[test]
fn test_safety_guard_rejects_eleven_levels() {
    assert!(is_safe_expression(Some(&group_chain(10))));
    assert!(!is_safe_expression(Some(&group_chain(11))));
}

#[test]
fn test_safety_guard_is_independent_of_validation() {
    // Valid to the guard, invalid to the validator
    let expr = json!({ "operator": "XOR", "rules": [] });
    assert!(is_safe_expression(Some(&expr)));
    assert!(!validate_condition(Some(&expr)).valid);

    // Valid to the validator, unsafe to the guard
    let expr = json!({ "field": format!("a{}", ".b".repeat(100)), "operator": "=", "value": 1 });
    assert!(validate_condition(Some(&expr)).valid);
    assert!(!is_safe_expression(Some(&expr)));
}

// =============================================================================
// Payloads
// =============================================================================

#[test]
fn test_payload_errors_only_from_invalid_sections() {
    let payload = json!({
        "conditionExpression": { "operator": "AND", "rules": [] },
        "successActions": [{ "type": "LOG", "config": { "message": "ok" } }],
        "failureActions": [{ "type": "EMIT_EVENT", "config": {} }]
    });
    let result = validate_rule_payload_value(&payload);

    assert!(!result.valid);
    let messages = result.messages();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("Condition: "));
    assert!(messages[1].starts_with("Failure actions: "));
    assert!(!messages.iter().any(|m| m.starts_with("Success actions: ")));
}

#[test]
fn test_payload_response_joins_errors() {
    let payload: RulePayload = serde_json::from_value(json!({
        "successActions": [{ "type": "CALL_WEBHOOK", "config": { "url": "" } }],
        "failureActions": [{}]
    }))
    .unwrap();
    let response = PayloadResponse::from(&validate_rule_payload(&payload));

    assert!(!response.valid);
    assert_eq!(
        response.error.as_deref(),
        Some(
            "Success actions: Action 1: Required field 'url' is missing; \
             Failure actions: Action 1: Action type is required"
        )
    );
    assert_eq!(response.errors.map(|e| e.len()), Some(2));
}

#[test]
fn test_valid_payload_response_has_no_errors() {
    let payload = RulePayload::new()
        .with_condition(json!({
            "operator": "OR",
            "rules": [predicate(), { "field": "vip", "operator": "=", "value": true }]
        }))
        .with_success_actions(json!([{ "type": "ALLOW_TRANSITION" }]));

    let response = PayloadResponse::from(&validate_rule_payload(&payload));
    assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "valid": true }));
}
