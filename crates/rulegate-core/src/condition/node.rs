//! Structural classification of raw condition JSON
//!
//! Incoming payloads are untyped. Before any semantic checks run, each node
//! is classified once into a [`ConditionNode`] so later stages match on the
//! variant instead of probing keys again.

use serde_json::Value;

/// Borrowed view of one node of a raw condition tree
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConditionNode<'a> {
    /// `null`: conditions are optional at every level
    Absent,
    /// Object with an `operator` key and an array-valued `rules` key
    Group(GroupNode<'a>),
    /// Object with `field` and `operator` keys
    Predicate(PredicateNode<'a>),
    /// Anything else
    Malformed(&'a Value),
}

/// Raw group node; the operator is not yet checked against the vocabulary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupNode<'a> {
    pub operator: &'a Value,
    pub rules: &'a [Value],
}

/// Raw predicate node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredicateNode<'a> {
    pub field: &'a Value,
    pub operator: &'a Value,
    /// `None` only when the key is missing; an explicit `null` is `Some`
    pub value: Option<&'a Value>,
    pub value_field: Option<&'a Value>,
}

impl<'a> ConditionNode<'a> {
    /// Classify a raw JSON value
    pub fn classify(value: &'a Value) -> Self {
        let obj = match value {
            Value::Null => return ConditionNode::Absent,
            Value::Object(obj) => obj,
            other => return ConditionNode::Malformed(other),
        };

        if let (Some(operator), Some(Value::Array(rules))) = (obj.get("operator"), obj.get("rules"))
        {
            return ConditionNode::Group(GroupNode {
                operator,
                rules: rules.as_slice(),
            });
        }

        if let (Some(field), Some(operator)) = (obj.get("field"), obj.get("operator")) {
            return ConditionNode::Predicate(PredicateNode {
                field,
                operator,
                value: obj.get("value"),
                value_field: obj.get("valueField"),
            });
        }

        ConditionNode::Malformed(value)
    }

    /// Classify an optional value; a missing value is [`ConditionNode::Absent`]
    pub fn classify_opt(value: Option<&'a Value>) -> Self {
        value.map(Self::classify).unwrap_or(ConditionNode::Absent)
    }
}
