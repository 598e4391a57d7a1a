//! Validation issues and results
//!
//! Problems found while validating are data, not errors: every issue is
//! collected into a [`ValidationResult`]. Issues found below the top level are
//! wrapped with their position (`Rule 2`, `Action 1`, `Condition`) so that the
//! rendered message reads as a breadcrumb to the offending node.
//!
//! `Display` gives the default English message. Callers that localize can
//! supply a [`MessageCatalog`] keyed by [`ValidationIssue::message_key`].

use crate::action::ActionType;
use crate::operator::{ComparisonOperator, LogicalOperator};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Semantic kind of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// Shape matches neither a group nor a predicate (or is otherwise mistyped)
    Structural,
    /// Comparison or logical operator outside its closed set
    UnknownOperator,
    UnknownActionType,
    /// Condition field/operator/value or action config key missing
    MissingRequiredField,
    InvalidFieldPath,
    DepthExceeded,
    EmptyGroup,
    /// Rejected by the safety guard
    SafetyLimitExceeded,
    /// Unexpected failure while validating
    InternalValidation,
}

impl IssueKind {
    /// Stable code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::Structural => "E001",
            IssueKind::UnknownOperator => "E002",
            IssueKind::UnknownActionType => "E003",
            IssueKind::MissingRequiredField => "E004",
            IssueKind::InvalidFieldPath => "E005",
            IssueKind::DepthExceeded => "E006",
            IssueKind::EmptyGroup => "E007",
            IssueKind::SafetyLimitExceeded => "E008",
            IssueKind::InternalValidation => "E009",
        }
    }
}

/// Section of a rule payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PayloadSection {
    ConditionExpression,
    SuccessActions,
    FailureActions,
}

impl PayloadSection {
    /// Prefix used in aggregated messages
    pub fn label(&self) -> &'static str {
        match self {
            PayloadSection::ConditionExpression => "Condition",
            PayloadSection::SuccessActions => "Success actions",
            PayloadSection::FailureActions => "Failure actions",
        }
    }

    /// Key of the section in the wire payload
    pub fn field_name(&self) -> &'static str {
        match self {
            PayloadSection::ConditionExpression => "conditionExpression",
            PayloadSection::SuccessActions => "successActions",
            PayloadSection::FailureActions => "failureActions",
        }
    }
}

impl fmt::Display for PayloadSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single problem found during validation
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    // Condition issues
    #[error("Maximum nesting depth of {max_depth} exceeded")]
    DepthExceeded { max_depth: usize },

    #[error("Invalid condition structure: expected a group with operator and rules, or a condition with field and operator")]
    InvalidStructure,

    #[error("Invalid logical operator '{operator}'. Valid operators: {}", LogicalOperator::valid_values())]
    InvalidLogicalOperator { operator: String },

    #[error("Group must contain at least one rule")]
    EmptyGroup,

    #[error("Rule {index}: {}", join_issues(.issues))]
    Rule { index: usize, issues: Vec<ValidationIssue> },

    #[error("Field is required")]
    FieldRequired,

    #[error("Invalid field path '{field}'")]
    InvalidFieldPath { field: String },

    #[error("Operator is required")]
    OperatorRequired,

    #[error("Invalid comparison operator '{operator}'. Valid operators: {}", ComparisonOperator::valid_values())]
    InvalidComparisonOperator { operator: String },

    #[error("Value is required (or specify valueField)")]
    ValueRequired,

    #[error("valueField must be a string")]
    ValueFieldNotString,

    #[error("Invalid valueField path '{value_field}'")]
    InvalidValueFieldPath { value_field: String },

    #[error("Expression exceeds safety limits")]
    UnsafeExpression,

    // Action issues
    #[error("Action is required")]
    ActionRequired,

    #[error("Action must be an object")]
    ActionNotObject,

    #[error("Action type is required")]
    ActionTypeRequired,

    #[error("Unknown action type '{action_type}'. Valid types: {}", ActionType::valid_values())]
    UnknownActionType { action_type: String },

    #[error("Configuration is required for {action_type} (fields: {})", .fields.join(", "))]
    ConfigRequired { action_type: ActionType, fields: Vec<String> },

    #[error("Required field '{field}' is missing")]
    ConfigFieldMissing { field: String },

    #[error("Action {index}: {}", join_issues(.issues))]
    Action { index: usize, issues: Vec<ValidationIssue> },

    // Payload issues
    #[error("{field_name} must be an array")]
    NotAnArray { field_name: String },

    #[error("Rule payload must be an object")]
    PayloadNotObject,

    #[error("{section}: {inner}")]
    Section { section: PayloadSection, inner: Box<ValidationIssue> },

    #[error("Failed to validate {field_name}: {message}")]
    Internal { field_name: String, message: String },
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

impl ValidationIssue {
    /// Semantic kind. Wrappers report the kind of their first inner issue.
    pub fn kind(&self) -> IssueKind {
        match self {
            ValidationIssue::DepthExceeded { .. } => IssueKind::DepthExceeded,
            ValidationIssue::InvalidStructure
            | ValidationIssue::ValueFieldNotString
            | ValidationIssue::ActionNotObject
            | ValidationIssue::NotAnArray { .. }
            | ValidationIssue::PayloadNotObject => IssueKind::Structural,
            ValidationIssue::InvalidLogicalOperator { .. }
            | ValidationIssue::InvalidComparisonOperator { .. } => IssueKind::UnknownOperator,
            ValidationIssue::EmptyGroup => IssueKind::EmptyGroup,
            ValidationIssue::FieldRequired
            | ValidationIssue::OperatorRequired
            | ValidationIssue::ValueRequired
            | ValidationIssue::ActionRequired
            | ValidationIssue::ActionTypeRequired
            | ValidationIssue::ConfigRequired { .. }
            | ValidationIssue::ConfigFieldMissing { .. } => IssueKind::MissingRequiredField,
            ValidationIssue::InvalidFieldPath { .. }
            | ValidationIssue::InvalidValueFieldPath { .. } => IssueKind::InvalidFieldPath,
            ValidationIssue::UnsafeExpression => IssueKind::SafetyLimitExceeded,
            ValidationIssue::UnknownActionType { .. } => IssueKind::UnknownActionType,
            ValidationIssue::Internal { .. } => IssueKind::InternalValidation,
            ValidationIssue::Rule { issues, .. } | ValidationIssue::Action { issues, .. } => issues
                .first()
                .map(|i| i.kind())
                .unwrap_or(IssueKind::InternalValidation),
            ValidationIssue::Section { inner, .. } => inner.kind(),
        }
    }

    /// Stable code of [`kind`](Self::kind)
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Innermost issues, depth first
    pub fn leaves(&self) -> Vec<&ValidationIssue> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a ValidationIssue>) {
        match self {
            ValidationIssue::Rule { issues, .. } | ValidationIssue::Action { issues, .. } => {
                for issue in issues {
                    issue.collect_leaves(out);
                }
            }
            ValidationIssue::Section { inner, .. } => inner.collect_leaves(out),
            leaf => out.push(leaf),
        }
    }

    /// Catalog key identifying the message template for this issue
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationIssue::DepthExceeded { .. } => "condition.max_depth_exceeded",
            ValidationIssue::InvalidStructure => "condition.invalid_structure",
            ValidationIssue::InvalidLogicalOperator { .. } => "condition.invalid_logical_operator",
            ValidationIssue::EmptyGroup => "condition.group_must_have_rules",
            ValidationIssue::Rule { .. } => "condition.rule_error",
            ValidationIssue::FieldRequired => "condition.field_required",
            ValidationIssue::InvalidFieldPath { .. } => "condition.invalid_field_path",
            ValidationIssue::OperatorRequired => "condition.operator_required",
            ValidationIssue::InvalidComparisonOperator { .. } => {
                "condition.invalid_comparison_operator"
            }
            ValidationIssue::ValueRequired => "condition.value_required",
            ValidationIssue::ValueFieldNotString => "condition.value_field_must_be_string",
            ValidationIssue::InvalidValueFieldPath { .. } => "condition.invalid_value_field_path",
            ValidationIssue::UnsafeExpression => "condition.unsafe_expression",
            ValidationIssue::ActionRequired => "action.required",
            ValidationIssue::ActionNotObject => "action.not_object",
            ValidationIssue::ActionTypeRequired => "action.type_required",
            ValidationIssue::UnknownActionType { .. } => "action.unknown_type",
            ValidationIssue::ConfigRequired { .. } => "action.config_required",
            ValidationIssue::ConfigFieldMissing { .. } => "action.field_missing",
            ValidationIssue::Action { .. } => "action.index_error",
            ValidationIssue::NotAnArray { .. } => "payload.not_an_array",
            ValidationIssue::PayloadNotObject => "payload.not_object",
            ValidationIssue::Section { .. } => "payload.section",
            ValidationIssue::Internal { .. } => "payload.internal",
        }
    }

    /// Template parameters; nested messages are rendered through `catalog`
    pub fn params(&self, catalog: &dyn MessageCatalog) -> Vec<(&'static str, String)> {
        match self {
            ValidationIssue::DepthExceeded { max_depth } => {
                vec![("max_depth", max_depth.to_string())]
            }
            ValidationIssue::InvalidLogicalOperator { operator } => vec![
                ("operator", operator.clone()),
                ("valid_operators", LogicalOperator::valid_values()),
            ],
            ValidationIssue::InvalidComparisonOperator { operator } => vec![
                ("operator", operator.clone()),
                ("valid_operators", ComparisonOperator::valid_values()),
            ],
            ValidationIssue::InvalidFieldPath { field } => vec![("field", field.clone())],
            ValidationIssue::InvalidValueFieldPath { value_field } => {
                vec![("value_field", value_field.clone())]
            }
            ValidationIssue::UnknownActionType { action_type } => vec![
                ("type", action_type.clone()),
                ("valid_types", ActionType::valid_values()),
            ],
            ValidationIssue::ConfigRequired { action_type, fields } => vec![
                ("type", action_type.to_string()),
                ("fields", fields.join(", ")),
            ],
            ValidationIssue::ConfigFieldMissing { field } => vec![("field", field.clone())],
            ValidationIssue::Rule { index, issues } | ValidationIssue::Action { index, issues } => {
                vec![
                    ("index", index.to_string()),
                    ("errors", render_all(issues, catalog).join(", ")),
                ]
            }
            ValidationIssue::NotAnArray { field_name } => vec![("field_name", field_name.clone())],
            ValidationIssue::Section { section, inner } => vec![
                ("section", section.label().to_string()),
                ("message", inner.render(catalog)),
            ],
            ValidationIssue::Internal { field_name, message } => vec![
                ("field_name", field_name.clone()),
                ("message", message.clone()),
            ],
            _ => Vec::new(),
        }
    }

    /// Render through a caller-supplied catalog, falling back to the default text
    pub fn render(&self, catalog: &dyn MessageCatalog) -> String {
        let params = self.params(catalog);
        if let Some(template) = catalog.template(self.message_key()) {
            return fill_template(template, &params);
        }

        match self {
            ValidationIssue::Rule { index, .. } => {
                format!("Rule {}: {}", index, param(&params, "errors"))
            }
            ValidationIssue::Action { index, .. } => {
                format!("Action {}: {}", index, param(&params, "errors"))
            }
            ValidationIssue::Section { section, .. } => {
                format!("{}: {}", section.label(), param(&params, "message"))
            }
            leaf => leaf.to_string(),
        }
    }
}

fn param<'a>(params: &'a [(&'static str, String)], name: &str) -> &'a str {
    params
        .iter()
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.as_str())
        .unwrap_or_default()
}

fn render_all(issues: &[ValidationIssue], catalog: &dyn MessageCatalog) -> Vec<String> {
    issues.iter().map(|i| i.render(catalog)).collect()
}

/// Replace `{name}` placeholders with parameter values
fn fill_template(template: &str, params: &[(&'static str, String)]) -> String {
    params.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

/// Caller-supplied source of message templates, keyed by
/// [`ValidationIssue::message_key`]. Templates use `{name}` placeholders.
pub trait MessageCatalog {
    fn template(&self, key: &str) -> Option<&str>;
}

impl MessageCatalog for HashMap<String, String> {
    fn template(&self, key: &str) -> Option<&str> {
        self.get(key).map(|s| s.as_str())
    }
}

/// Catalog with no entries; renders the default messages
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl MessageCatalog for DefaultMessages {
    fn template(&self, _key: &str) -> Option<&str> {
        None
    }
}

/// Outcome of a validation call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    /// True when no issue was found
    pub valid: bool,
    /// All issues, in discovery order
    pub errors: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// A passing result
    pub fn ok() -> Self {
        Self { valid: true, errors: Vec::new() }
    }

    /// A result holding a single issue
    pub fn failure(issue: ValidationIssue) -> Self {
        Self { valid: false, errors: vec![issue] }
    }

    /// Build from collected issues; valid iff there are none
    pub fn from_issues(errors: Vec<ValidationIssue>) -> Self {
        Self { valid: errors.is_empty(), errors }
    }

    /// Default English messages
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Messages rendered through a catalog
    pub fn render(&self, catalog: &dyn MessageCatalog) -> Vec<String> {
        render_all(&self.errors, catalog)
    }

    /// Kinds of all innermost issues
    pub fn kinds(&self) -> Vec<IssueKind> {
        self.errors
            .iter()
            .flat_map(|e| e.leaves())
            .map(|leaf| leaf.kind())
            .collect()
    }

    /// True if any innermost issue has the given kind
    pub fn has_kind(&self, kind: IssueKind) -> bool {
        self.kinds().contains(&kind)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire {
            valid: bool,
            errors: Vec<String>,
        }

        Wire {
            valid: self.valid,
            errors: self.messages(),
        }
        .serialize(serializer)
    }
}
