//! Declarative DTO validation
//!
//! Each DTO declares a static list of [`FieldRule`]s; one generic walker
//! evaluates them against the DTO's serialized form and aggregates every
//! violation before reporting. Absent or null fields only trip the
//! `Required` check, so the same rule lists serve both create and patched
//! documents.

use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, FieldViolation};

/// A single constraint kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Check {
    /// Field must be present, non-null, and not an empty string
    Required,
    /// String length cap, counted in characters
    MaxLen(usize),
    /// Inclusive integer bounds
    Range { min: i64, max: i64 },
    /// Inclusive float bounds
    RangeF { min: f64, max: f64 },
}

/// A named field paired with one constraint
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub check: Check,
}

impl FieldRule {
    #[must_use]
    pub const fn required(field: &'static str) -> Self {
        Self {
            field,
            check: Check::Required,
        }
    }

    #[must_use]
    pub const fn max_len(field: &'static str, max: usize) -> Self {
        Self {
            field,
            check: Check::MaxLen(max),
        }
    }

    #[must_use]
    pub const fn range(field: &'static str, min: i64, max: i64) -> Self {
        Self {
            field,
            check: Check::Range { min, max },
        }
    }

    #[must_use]
    pub const fn range_f(field: &'static str, min: f64, max: f64) -> Self {
        Self {
            field,
            check: Check::RangeF { min, max },
        }
    }
}

/// A DTO carrying its own validation rules
pub trait Validate {
    fn rules() -> &'static [FieldRule];
}

/// Evaluate a DTO against its rules, aggregating every violation
pub fn validate<T>(dto: &T) -> Result<(), ApiError>
where
    T: Validate + Serialize,
{
    let doc = serde_json::to_value(dto).unwrap_or(Value::Null);
    let violations = check(T::rules(), &doc);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(violations))
    }
}

/// Run a rule list against a serialized document
#[must_use]
pub fn check(rules: &[FieldRule], doc: &Value) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    for rule in rules {
        let value = doc.get(rule.field).unwrap_or(&Value::Null);
        check_one(rule, value, &mut violations);
    }
    violations
}

fn check_one(rule: &FieldRule, value: &Value, violations: &mut Vec<FieldViolation>) {
    let field = rule.field;
    match rule.check {
        Check::Required => {
            let empty = match value {
                Value::Null => true,
                Value::String(s) => s.trim().is_empty(),
                _ => false,
            };
            if empty {
                violations.push(FieldViolation::new(
                    field,
                    "required",
                    format!("{field} must not be empty"),
                ));
            }
        }
        Check::MaxLen(max) => match value {
            Value::Null => {}
            Value::String(s) => {
                if s.chars().count() > max {
                    violations.push(FieldViolation::new(
                        field,
                        "max_length",
                        format!("{field} must be at most {max} characters"),
                    ));
                }
            }
            _ => violations.push(type_violation(field, "a string")),
        },
        Check::Range { min, max } => match value {
            Value::Null => {}
            Value::Number(n) => match n.as_i64() {
                Some(n) if (min..=max).contains(&n) => {}
                Some(_) => violations.push(range_violation(field, min, max)),
                None => violations.push(type_violation(field, "an integer")),
            },
            _ => violations.push(type_violation(field, "an integer")),
        },
        Check::RangeF { min, max } => match value {
            Value::Null => {}
            Value::Number(n) => match n.as_f64() {
                Some(n) if n >= min && n <= max => {}
                _ => violations.push(FieldViolation::new(
                    field,
                    "range",
                    format!("{field} must be between {min} and {max}"),
                )),
            },
            _ => violations.push(type_violation(field, "a number")),
        },
    }
}

fn range_violation(field: &str, min: i64, max: i64) -> FieldViolation {
    FieldViolation::new(
        field,
        "range",
        format!("{field} must be between {min} and {max}"),
    )
}

fn type_violation(field: &str, expected: &str) -> FieldViolation {
    FieldViolation::new(field, "type", format!("{field} must be {expected}"))
}
