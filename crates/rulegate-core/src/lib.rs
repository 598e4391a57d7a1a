//! Rulegate Core - shared types for business rule validation
//!
//! This crate provides the types used by the validators:
//! - Operator and action type vocabularies
//! - Typed condition and action models
//! - Structural classification of raw condition JSON
//! - Validation issues, results and message catalogs
//! - Validator configuration

pub mod action;
pub mod condition;
pub mod config;
pub mod error;
pub mod issue;
pub mod operator;
pub mod value;

// Re-export commonly used types
pub use action::{Action, ActionType};
pub use condition::{ConditionExpression, ConditionNode, GroupCondition, SimpleCondition};
pub use config::{SafetyLimits, ValidatorConfig};
pub use error::CoreError;
pub use issue::{
    DefaultMessages, IssueKind, MessageCatalog, PayloadSection, ValidationIssue, ValidationResult,
};
pub use operator::{ComparisonOperator, LogicalOperator};
pub use value::{is_truthy, is_valid_field_path};
