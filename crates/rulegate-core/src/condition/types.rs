//! Typed condition expression model

use super::node::ConditionNode;
use crate::operator::{ComparisonOperator, LogicalOperator};
use crate::value::is_truthy;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A condition expression: either a logical group or a single predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionExpression {
    /// AND/OR/NOT combination of child expressions
    Group(GroupCondition),
    /// Single field comparison
    Simple(SimpleCondition),
}

/// Logical group of child expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupCondition {
    pub operator: LogicalOperator,
    pub rules: Vec<ConditionExpression>,
}

/// Field/operator/value predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleCondition {
    /// Field path (e.g. `order.items[0].sku`)
    pub field: String,

    pub operator: ComparisonOperator,

    /// Literal to compare against. An explicit `null` is `Some(Value::Null)`.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,

    /// Other field to compare against (field-to-field comparison)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_field: Option<String>,
}

impl ConditionExpression {
    /// Create an AND group
    pub fn and(rules: Vec<ConditionExpression>) -> Self {
        Self::group(LogicalOperator::And, rules)
    }

    /// Create an OR group
    pub fn or(rules: Vec<ConditionExpression>) -> Self {
        Self::group(LogicalOperator::Or, rules)
    }

    /// Create a NOT group
    pub fn not(rules: Vec<ConditionExpression>) -> Self {
        Self::group(LogicalOperator::Not, rules)
    }

    /// Create a group with the given operator
    pub fn group(operator: LogicalOperator, rules: Vec<ConditionExpression>) -> Self {
        ConditionExpression::Group(GroupCondition { operator, rules })
    }

    /// Compare a field against a literal
    pub fn compare(field: impl Into<String>, operator: ComparisonOperator, value: Value) -> Self {
        ConditionExpression::Simple(SimpleCondition {
            field: field.into(),
            operator,
            value: Some(value),
            value_field: None,
        })
    }

    /// Compare a field against another field
    pub fn compare_fields(
        field: impl Into<String>,
        operator: ComparisonOperator,
        value_field: impl Into<String>,
    ) -> Self {
        ConditionExpression::Simple(SimpleCondition {
            field: field.into(),
            operator,
            value: None,
            value_field: Some(value_field.into()),
        })
    }

    /// Presence test (`IS_EMPTY` / `IS_NOT_EMPTY`) on a field
    pub fn presence(field: impl Into<String>, operator: ComparisonOperator) -> Self {
        ConditionExpression::Simple(SimpleCondition {
            field: field.into(),
            operator,
            value: None,
            value_field: None,
        })
    }

    /// Nesting depth; a lone predicate has depth 0
    pub fn depth(&self) -> usize {
        match self {
            ConditionExpression::Simple(_) => 0,
            ConditionExpression::Group(group) => {
                1 + group.rules.iter().map(|r| r.depth()).max().unwrap_or(0)
            }
        }
    }

    /// All predicates in the tree (flattened, left to right)
    pub fn predicates(&self) -> Vec<&SimpleCondition> {
        let mut result = Vec::new();
        self.collect_predicates(&mut result);
        result
    }

    fn collect_predicates<'a>(&'a self, result: &mut Vec<&'a SimpleCondition>) {
        match self {
            ConditionExpression::Simple(s) => result.push(s),
            ConditionExpression::Group(g) => {
                for rule in &g.rules {
                    rule.collect_predicates(result);
                }
            }
        }
    }

    /// Convert back to raw JSON
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Convert a raw tree, reading it the way validation does.
    ///
    /// A `null` root gives `None`. `null` children are dropped and a falsy
    /// `valueField` is treated as unset.
    pub fn from_json(value: &Value) -> serde_json::Result<Option<Self>> {
        normalize(value)
            .map(serde_json::from_value::<Self>)
            .transpose()
    }
}

/// Keep a present `null` distinct from a missing key
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

fn normalize(value: &Value) -> Option<Value> {
    match ConditionNode::classify(value) {
        ConditionNode::Absent => None,
        ConditionNode::Group(group) => {
            let mut obj = value.as_object()?.clone();
            let rules = group.rules.iter().filter_map(normalize).collect();
            obj.insert("rules".to_string(), Value::Array(rules));
            Some(Value::Object(obj))
        }
        ConditionNode::Predicate(predicate) => {
            let mut obj = value.as_object()?.clone();
            if predicate.value_field.is_some_and(|v| !is_truthy(v)) {
                obj.remove("valueField");
            }
            Some(Value::Object(obj))
        }
        ConditionNode::Malformed(other) => Some(other.clone()),
    }
}
