//! Condition expression validation
//!
//! Walks a raw condition tree recursively. Each node is classified as a group
//! or a predicate and checked against the operator vocabularies, the field
//! path grammar and the required keys. All problems at a level are collected;
//! a failing child is reported once, as `Rule <n>: <child messages>`.
//!
//! Depth is checked on entry to every node, before anything below it is
//! visited, so nesting beyond `max_depth` never recurses further.

use rulegate_core::condition::{ConditionNode, GroupNode, PredicateNode};
use rulegate_core::value::{display_value, is_truthy, is_valid_field_path};
use rulegate_core::{ComparisonOperator, LogicalOperator, ValidationIssue, ValidationResult};
use serde_json::Value;

/// Default maximum nesting depth for interactive validation
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Recursive condition validator
#[derive(Debug, Clone, Copy)]
pub struct ConditionValidator {
    max_depth: usize,
}

impl Default for ConditionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionValidator {
    /// Create a validator with the default depth limit
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Create a validator with a custom depth limit
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Validate an optional condition tree from its root
    pub fn validate(&self, expr: Option<&Value>) -> ValidationResult {
        let result = self.validate_at(expr, 0);
        tracing::debug!(
            valid = result.valid,
            errors = result.errors.len(),
            max_depth = self.max_depth,
            "Validated condition expression"
        );
        result
    }

    /// Validate a node found at `depth`
    pub fn validate_at(&self, expr: Option<&Value>, depth: usize) -> ValidationResult {
        let node = ConditionNode::classify_opt(expr);
        if let ConditionNode::Absent = node {
            return ValidationResult::ok();
        }

        if depth > self.max_depth {
            return ValidationResult::failure(ValidationIssue::DepthExceeded {
                max_depth: self.max_depth,
            });
        }

        let issues = match node {
            ConditionNode::Group(group) => self.check_group(&group, depth),
            ConditionNode::Predicate(predicate) => check_predicate(&predicate),
            ConditionNode::Malformed(_) => vec![ValidationIssue::InvalidStructure],
            ConditionNode::Absent => Vec::new(),
        };

        ValidationResult::from_issues(issues)
    }

    fn check_group(&self, group: &GroupNode<'_>, depth: usize) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        let known = group
            .operator
            .as_str()
            .map(|op| op.parse::<LogicalOperator>().is_ok())
            .unwrap_or(false);
        if !known {
            issues.push(ValidationIssue::InvalidLogicalOperator {
                operator: display_value(group.operator),
            });
        }

        if group.rules.is_empty() {
            issues.push(ValidationIssue::EmptyGroup);
            return issues;
        }

        for (i, rule) in group.rules.iter().enumerate() {
            let child = self.validate_at(Some(rule), depth + 1);
            if !child.valid {
                issues.push(ValidationIssue::Rule {
                    index: i + 1,
                    issues: child.errors,
                });
            }
        }

        issues
    }
}

fn check_predicate(predicate: &PredicateNode<'_>) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    // Field
    match predicate.field {
        Value::String(field) if !field.is_empty() => {
            if !is_valid_field_path(field) {
                issues.push(ValidationIssue::InvalidFieldPath { field: field.clone() });
            }
        }
        _ => issues.push(ValidationIssue::FieldRequired),
    }

    // Operator
    let operator = if !is_truthy(predicate.operator) {
        issues.push(ValidationIssue::OperatorRequired);
        None
    } else {
        let parsed = predicate
            .operator
            .as_str()
            .and_then(|op| op.parse::<ComparisonOperator>().ok());
        if parsed.is_none() {
            issues.push(ValidationIssue::InvalidComparisonOperator {
                operator: display_value(predicate.operator),
            });
        }
        parsed
    };

    // Value or valueField
    let value_field = predicate.value_field.filter(|v| is_truthy(v));
    let requires_value = operator.map(|op| op.requires_value()).unwrap_or(true);
    if requires_value && predicate.value.is_none() && value_field.is_none() {
        issues.push(ValidationIssue::ValueRequired);
    }

    match value_field {
        Some(Value::String(path)) => {
            if !is_valid_field_path(path) {
                issues.push(ValidationIssue::InvalidValueFieldPath {
                    value_field: path.clone(),
                });
            }
        }
        Some(_) => issues.push(ValidationIssue::ValueFieldNotString),
        None => {}
    }

    issues
}

/// Validate a condition tree with the default depth limit
pub fn validate_condition(expr: Option<&Value>) -> ValidationResult {
    ConditionValidator::new().validate(expr)
}

/// Validate a condition node at `depth` against `max_depth`
pub fn validate_condition_at(
    expr: Option<&Value>,
    depth: usize,
    max_depth: usize,
) -> ValidationResult {
    ConditionValidator::with_max_depth(max_depth).validate_at(expr, depth)
}
