//! Request payload validation. Pure logic, no I/O.
//!
//! Handlers declare a rule set per operation and run the payload through
//! [`validate`] before touching the store. Evaluation is first-error-wins:
//! the reported error carries the label of the first failing rule only,
//! so clients always see a single, stable message per bad request.

use serde_json::Value;

/// Expected JSON type of a payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
}

/// A declarative rule for one payload field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Exact human-readable message reported when this rule fails.
    /// These strings are part of the API contract.
    pub label: &'static str,
}

/// The first rule failure found in a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{label}")]
pub struct ValidationError {
    pub field: &'static str,
    pub label: &'static str,
}

/// Validate `payload` against `rules` in declaration order.
///
/// Fields present in the payload but not named by any rule are ignored.
pub fn validate(
    payload: &serde_json::Map<String, Value>,
    rules: &[FieldRule],
) -> Result<(), ValidationError> {
    for rule in rules {
        check_rule(rule, payload.get(rule.field))?;
    }
    Ok(())
}

fn check_rule(rule: &FieldRule, value: Option<&Value>) -> Result<(), ValidationError> {
    let fail = Err(ValidationError {
        field: rule.field,
        label: rule.label,
    });
    match value {
        // Missing and null are equivalent: only an error if required.
        None | Some(Value::Null) => {
            if rule.required {
                fail
            } else {
                Ok(())
            }
        }
        // An empty string does not satisfy a required field.
        Some(Value::String(s)) if rule.required && s.is_empty() => fail,
        Some(v) => {
            if kind_matches(rule.kind, v) {
                Ok(())
            } else {
                fail
            }
        }
    }
}

fn kind_matches(kind: FieldKind, value: &Value) -> bool {
    match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Integer => value.is_i64() || value.is_u64(),
    }
}
