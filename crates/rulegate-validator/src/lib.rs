//! Rulegate Validator - structural validation for business rules
//!
//! Validates the two artifacts of a business rule before they are stored or
//! executed:
//! - Condition expressions: recursive boolean trees of groups and predicates
//! - Action lists: ordered, typed side-effect directives
//!
//! Components:
//! - [`condition`]: recursive condition validation with a depth limit
//! - [`action`]: per-type config contract checks
//! - [`safety`]: hard structural ceilings, answered with a single boolean
//! - [`payload`]: aggregates all sections of a rule payload
//!
//! All validators are pure functions over borrowed input and keep no state
//! between calls.
//!
//! ```rust
//! use rulegate_validator::{validate_condition, validate_rule_payload, RulePayload};
//! use serde_json::json;
//!
//! let expr = json!({
//!     "operator": "AND",
//!     "rules": [{ "field": "age", "operator": ">", "value": 18 }]
//! });
//! assert!(validate_condition(Some(&expr)).valid);
//!
//! let payload = RulePayload::new()
//!     .with_condition(expr)
//!     .with_failure_actions(json!([{ "type": "NOTIFY", "config": { "message": "hi" } }]));
//! let result = validate_rule_payload(&payload);
//! assert!(!result.valid);
//! assert_eq!(
//!     result.messages(),
//!     vec!["Failure actions: Action 1: Required field 'recipients' is missing".to_string()]
//! );
//! ```

pub mod action;
pub mod condition;
pub mod error;
pub mod payload;
pub mod rule_validator;
pub mod safety;

pub use action::{validate_action, validate_action_config, validate_actions};
pub use condition::{
    validate_condition, validate_condition_at, ConditionValidator, DEFAULT_MAX_DEPTH,
};
pub use error::{Result, ValidatorError};
pub use payload::{
    validate_rule_payload, validate_rule_payload_value, PayloadResponse, PayloadValidator,
    RulePayload,
};
pub use rule_validator::RuleValidator;
pub use safety::{is_safe_expression, SafetyGuard};

// Re-export core types for convenience
pub use rulegate_core::{
    Action, ActionType, ComparisonOperator, ConditionExpression, IssueKind, LogicalOperator,
    MessageCatalog, PayloadSection, SafetyLimits, ValidationIssue, ValidationResult,
    ValidatorConfig,
};
