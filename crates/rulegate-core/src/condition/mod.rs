//! Condition expressions
//!
//! A condition is a boolean tree. Inner nodes are groups combining child
//! expressions with `AND`, `OR` or `NOT`; leaves are predicates comparing a
//! field path against a literal or against another field.
//!
//! ```json
//! {
//!   "operator": "AND",
//!   "rules": [
//!     { "field": "order.total", "operator": ">", "value": 100 },
//!     { "field": "customer.email", "operator": "IS_NOT_EMPTY" },
//!     { "field": "order.total", "operator": "<=", "valueField": "customer.credit_limit" }
//!   ]
//! }
//! ```
//!
//! [`ConditionExpression`] is the typed model. [`ConditionNode`] is the
//! borrowed classification of raw JSON that validation works on, so that
//! malformed input can be reported instead of failing deserialization.

mod node;
mod types;

pub use node::{ConditionNode, GroupNode, PredicateNode};
pub use types::{ConditionExpression, GroupCondition, SimpleCondition};
