//! Operators used in condition expressions
//!
//! Both vocabularies are closed: any operator string outside these sets is
//! rejected by validation, never coerced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical operators combining the rules of a group condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOperator {
    /// Every child rule must hold
    #[serde(rename = "AND")]
    And,
    /// At least one child rule must hold
    #[serde(rename = "OR")]
    Or,
    /// Negation of the child rules
    #[serde(rename = "NOT")]
    Not,
}

impl LogicalOperator {
    /// All logical operators, in wire order
    pub const ALL: [LogicalOperator; 3] = [Self::And, Self::Or, Self::Not];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
            LogicalOperator::Not => "NOT",
        }
    }

    /// Catalog key for the human-readable label of this operator
    pub fn label_key(&self) -> &'static str {
        match self {
            LogicalOperator::And => "logical.and",
            LogicalOperator::Or => "logical.or",
            LogicalOperator::Not => "logical.not",
        }
    }

    /// Comma separated list of the valid wire values
    pub fn valid_values() -> String {
        Self::ALL.iter().map(|op| op.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicalOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Comparison operators of a simple condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Loose equality (=)
    #[serde(rename = "=")]
    Equals,
    /// Strict equality (==)
    #[serde(rename = "==")]
    StrictEquals,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    NotEquals,
    /// Greater than (>)
    #[serde(rename = ">")]
    GreaterThan,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    /// Less than (<)
    #[serde(rename = "<")]
    LessThan,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    LessThanOrEqual,

    // Membership operators
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "NOT_IN")]
    NotIn,

    // String operators
    #[serde(rename = "CONTAINS")]
    Contains,
    #[serde(rename = "NOT_CONTAINS")]
    NotContains,
    #[serde(rename = "STARTS_WITH")]
    StartsWith,
    #[serde(rename = "ENDS_WITH")]
    EndsWith,
    /// Regex match
    #[serde(rename = "MATCHES")]
    Matches,

    // Presence operators (no comparison value)
    #[serde(rename = "IS_EMPTY")]
    IsEmpty,
    #[serde(rename = "IS_NOT_EMPTY")]
    IsNotEmpty,
}

impl ComparisonOperator {
    /// All comparison operators, in wire order
    pub const ALL: [ComparisonOperator; 16] = [
        Self::Equals,
        Self::StrictEquals,
        Self::NotEquals,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::In,
        Self::NotIn,
        Self::Contains,
        Self::NotContains,
        Self::StartsWith,
        Self::EndsWith,
        Self::Matches,
        Self::IsEmpty,
        Self::IsNotEmpty,
    ];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Equals => "=",
            ComparisonOperator::StrictEquals => "==",
            ComparisonOperator::NotEquals => "!=",
            ComparisonOperator::GreaterThan => ">",
            ComparisonOperator::GreaterThanOrEqual => ">=",
            ComparisonOperator::LessThan => "<",
            ComparisonOperator::LessThanOrEqual => "<=",
            ComparisonOperator::In => "IN",
            ComparisonOperator::NotIn => "NOT_IN",
            ComparisonOperator::Contains => "CONTAINS",
            ComparisonOperator::NotContains => "NOT_CONTAINS",
            ComparisonOperator::StartsWith => "STARTS_WITH",
            ComparisonOperator::EndsWith => "ENDS_WITH",
            ComparisonOperator::Matches => "MATCHES",
            ComparisonOperator::IsEmpty => "IS_EMPTY",
            ComparisonOperator::IsNotEmpty => "IS_NOT_EMPTY",
        }
    }

    /// Catalog key for the human-readable label of this operator
    pub fn label_key(&self) -> &'static str {
        match self {
            ComparisonOperator::Equals => "operators.equals",
            ComparisonOperator::StrictEquals => "operators.equals_strict",
            ComparisonOperator::NotEquals => "operators.not_equals",
            ComparisonOperator::GreaterThan => "operators.greater_than",
            ComparisonOperator::GreaterThanOrEqual => "operators.greater_than_or_equal",
            ComparisonOperator::LessThan => "operators.less_than",
            ComparisonOperator::LessThanOrEqual => "operators.less_than_or_equal",
            ComparisonOperator::In => "operators.in",
            ComparisonOperator::NotIn => "operators.not_in",
            ComparisonOperator::Contains => "operators.contains",
            ComparisonOperator::NotContains => "operators.not_contains",
            ComparisonOperator::StartsWith => "operators.starts_with",
            ComparisonOperator::EndsWith => "operators.ends_with",
            ComparisonOperator::Matches => "operators.matches",
            ComparisonOperator::IsEmpty => "operators.is_empty",
            ComparisonOperator::IsNotEmpty => "operators.is_not_empty",
        }
    }

    /// Returns true unless the operator only tests for presence
    pub fn requires_value(&self) -> bool {
        !matches!(self, ComparisonOperator::IsEmpty | ComparisonOperator::IsNotEmpty)
    }

    /// Comma separated list of the valid wire values
    pub fn valid_values() -> String {
        Self::ALL.iter().map(|op| op.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComparisonOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| UnknownOperator(s.to_string()))
    }
}

/// Returned when an operator string is outside its vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator '{0}'")]
pub struct UnknownOperator(pub String);
