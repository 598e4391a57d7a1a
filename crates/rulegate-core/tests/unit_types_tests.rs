//! Unit tests for core rule types
//!
//! Covers the typed models, raw JSON classification and message catalogs.

use rulegate_core::condition::ConditionNode;
use rulegate_core::*;
use serde_json::json;
use std::collections::HashMap;

// =============================================================================
// Typed models
// =============================================================================

#[test]
fn test_condition_expression_round_trip_through_json() -> anyhow::Result<()> {
    let expr = ConditionExpression::and(vec![
        ConditionExpression::compare("order.total", ComparisonOperator::GreaterThan, json!(100)),
        ConditionExpression::compare_fields(
            "order.total",
            ComparisonOperator::LessThanOrEqual,
            "customer.limit",
        ),
        ConditionExpression::not(vec![ConditionExpression::presence(
            "customer.email",
            ComparisonOperator::IsEmpty,
        )]),
    ]);

    let parsed: ConditionExpression = serde_json::from_value(expr.to_json())?;
    assert_eq!(parsed, expr);
    assert_eq!(parsed.depth(), 2);
    assert_eq!(parsed.predicates().len(), 3);
    Ok(())
}

#[test]
fn test_simple_condition_uses_camel_case_value_field() {
    let expr = ConditionExpression::compare_fields("a", ComparisonOperator::Equals, "b");
    assert_eq!(expr.to_json(), json!({ "field": "a", "operator": "=", "valueField": "b" }));
}

#[test]
fn test_action_rejects_unknown_type_when_typed() {
    let result: Result<Action, _> = serde_json::from_value(json!({ "type": "SEND_SMS" }));
    assert!(result.is_err());
}

#[test]
fn test_label_keys() {
    assert_eq!(LogicalOperator::Or.label_key(), "logical.or");
    assert_eq!(ComparisonOperator::NotContains.label_key(), "operators.not_contains");
    assert_eq!(ActionType::EmitEvent.label_key(), "action_types.EMIT_EVENT");
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn test_group_takes_precedence_over_predicate() {
    // Carries both shapes; the array-valued rules key decides
    let value = json!({ "operator": "AND", "rules": [], "field": "a" });
    assert!(matches!(ConditionNode::classify(&value), ConditionNode::Group(_)));
}

#[test]
fn test_scalars_are_malformed() {
    for value in [json!(true), json!(0), json!(""), json!([1])] {
        assert!(
            matches!(ConditionNode::classify(&value), ConditionNode::Malformed(_)),
            "{}",
            value
        );
    }
}

// =============================================================================
// Issues and catalogs
// =============================================================================

#[test]
fn test_catalog_renders_sections_and_positions() {
    let issue = ValidationIssue::Section {
        section: PayloadSection::FailureActions,
        inner: Box::new(ValidationIssue::Action {
            index: 3,
            issues: vec![ValidationIssue::ConfigFieldMissing { field: "url".to_string() }],
        }),
    };

    let mut catalog = HashMap::new();
    catalog.insert("action.field_missing".to_string(), "champ '{field}' manquant".to_string());
    catalog.insert("action.index_error".to_string(), "Action n°{index} : {errors}".to_string());

    assert_eq!(issue.render(&catalog), "Failure actions: Action n°3 : champ 'url' manquant");
    assert_eq!(issue.to_string(), "Failure actions: Action 3: Required field 'url' is missing");
}

#[test]
fn test_result_render_with_default_messages() {
    let result = ValidationResult::from_issues(vec![
        ValidationIssue::DepthExceeded { max_depth: 5 },
        ValidationIssue::InvalidFieldPath { field: "a b".to_string() },
    ]);

    assert_eq!(result.render(&DefaultMessages), result.messages());
    assert_eq!(
        result.messages(),
        vec![
            "Maximum nesting depth of 5 exceeded".to_string(),
            "Invalid field path 'a b'".to_string(),
        ]
    );
}

#[test]
fn test_issue_serializes_structurally() {
    let issue = ValidationIssue::Rule {
        index: 1,
        issues: vec![ValidationIssue::EmptyGroup],
    };
    assert_eq!(
        serde_json::to_value(&issue).unwrap(),
        json!({ "issue": "rule", "index": 1, "issues": [{ "issue": "empty_group" }] })
    );
}

#[test]
fn test_section_issue_serializes_with_inner_issue() {
    let issue = ValidationIssue::Section {
        section: PayloadSection::SuccessActions,
        inner: Box::new(ValidationIssue::NotAnArray {
            field_name: "successActions".to_string(),
        }),
    };
    assert_eq!(
        serde_json::to_value(&issue).unwrap(),
        json!({
            "issue": "section",
            "section": "successActions",
            "inner": { "issue": "not_an_array", "field_name": "successActions" }
        })
    );
}

#[test]
fn test_every_kind_has_a_distinct_code() {
    let kinds = [
        IssueKind::Structural,
        IssueKind::UnknownOperator,
        IssueKind::UnknownActionType,
        IssueKind::MissingRequiredField,
        IssueKind::InvalidFieldPath,
        IssueKind::DepthExceeded,
        IssueKind::EmptyGroup,
        IssueKind::SafetyLimitExceeded,
        IssueKind::InternalValidation,
    ];
    let mut codes: Vec<&str> = kinds.iter().map(|k| k.code()).collect();
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), kinds.len());
}
