//! Safety guard for condition expressions
//!
//! A cheap structural pre-flight check, independent of semantic validity. It
//! enforces hard ceilings on depth, group width and field path length and
//! answers with a single boolean, stopping at the first ceiling exceeded.

use rulegate_core::SafetyLimits;
use rulegate_core::value::display_value;
use serde_json::Value;

/// Structural ceiling check for raw condition trees
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyGuard {
    limits: SafetyLimits,
}

impl SafetyGuard {
    /// Create a guard with the default ceilings (depth 10, 50 rules, 200 chars)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a guard with custom ceilings
    pub fn with_limits(limits: SafetyLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SafetyLimits {
        &self.limits
    }

    /// Returns false as soon as any ceiling is exceeded anywhere in the tree
    pub fn is_safe(&self, expr: Option<&Value>) -> bool {
        match expr {
            None | Some(Value::Null) => true,
            Some(value) => self.check(value, 0),
        }
    }

    fn check(&self, expr: &Value, depth: usize) -> bool {
        if depth > self.limits.max_depth {
            return false;
        }

        let Value::Object(obj) = expr else {
            return true;
        };

        if let Some(Value::Array(rules)) = obj.get("rules") {
            if rules.len() > self.limits.max_rules_per_group {
                return false;
            }
            return rules.iter().all(|rule| self.check(rule, depth + 1));
        }

        if let Some(field) = obj.get("field") {
            let length = match field {
                Value::String(path) => path.chars().count(),
                other => display_value(other).chars().count(),
            };
            if length > self.limits.max_field_path_length {
                return false;
            }
        }

        true
    }
}

/// Check a condition tree against the default safety ceilings
pub fn is_safe_expression(expr: Option<&Value>) -> bool {
    SafetyGuard::new().is_safe(expr)
}
