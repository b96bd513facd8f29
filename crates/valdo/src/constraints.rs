//! Validation constraints for different types
//!
//! A [`Constraint`] is a predicate over an already type-resolved value plus the
//! JSON Schema keyword documenting it. The keyword is fixed at construction, so
//! schema generation never runs the predicate.
//!
//! - Numeric (`i64`, `f64`): [`multiple_of`], [`min`], [`excl_min`], [`max`], [`excl_max`]
//! - String: [`min_len`], [`max_len`], [`pattern`]
//! - Array: [`min_items`], [`max_items`], [`contains`]
//! - Object: [`min_properties`], [`max_properties`], [`property_names`]

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde_json::json;

use crate::errors::{BuildError, Error, ValidationResult};
use crate::types::{Number, Value};
use crate::validators::Validator;

/// Members of an object value, in input order
pub type Members = [(String, Value)];

type Check<T> = dyn Fn(&T) -> ValidationResult + Send + Sync;

// ============================================================================
// Constraint
// ============================================================================

/// A named predicate paired with its JSON Schema keyword
pub struct Constraint<T: ?Sized> {
    check: Arc<Check<T>>,
    key: &'static str,
    schema: serde_json::Value,
}

impl<T: ?Sized> Constraint<T> {
    /// Create a custom constraint.
    ///
    /// `key` and `schema` are emitted as-is into the validator's schema.
    pub fn new<F>(key: &'static str, schema: serde_json::Value, check: F) -> Self
    where
        F: Fn(&T) -> ValidationResult + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            key,
            schema,
        }
    }

    /// Run the predicate
    pub fn check(&self, value: &T) -> ValidationResult {
        (self.check)(value)
    }

    /// The JSON Schema keyword
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The JSON Schema value for [`Constraint::key`]
    pub fn schema_value(&self) -> &serde_json::Value {
        &self.schema
    }
}

impl<T: ?Sized> Clone for Constraint<T> {
    fn clone(&self) -> Self {
        Self {
            check: Arc::clone(&self.check),
            key: self.key,
            schema: self.schema.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Constraint<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("key", &self.key)
            .field("schema", &self.schema)
            .finish()
    }
}

// ============================================================================
// Numeric Constraints
// ============================================================================

/// Numbers that numeric constraints can be built for
pub trait Numeric: Copy + PartialOrd + Into<Number> + Send + Sync + 'static {
    /// Whether `self` divided by `divisor` is an integer
    fn is_multiple_of(self, divisor: Self) -> bool;

    fn is_positive(self) -> bool;
}

impl Numeric for i64 {
    fn is_multiple_of(self, divisor: Self) -> bool {
        self % divisor == 0
    }

    fn is_positive(self) -> bool {
        self > 0
    }
}

impl Numeric for f64 {
    fn is_multiple_of(self, divisor: Self) -> bool {
        let quotient = self / divisor;
        // relative tolerance absorbs binary rounding, e.g. 0.3 / 0.1
        (quotient - quotient.round()).abs() <= 1e-9 * quotient.abs().max(1.0)
    }

    fn is_positive(self) -> bool {
        self > 0.0
    }
}

fn number_schema<T: Numeric>(v: T) -> serde_json::Value {
    let n: Number = v.into();
    n.into()
}

/// A numeric instance is valid only if division by `v` results in an integer.
///
/// `v` must be strictly positive.
///
/// <https://json-schema.org/draft/2020-12/json-schema-validation#name-multipleof>
pub fn multiple_of<T: Numeric>(v: T) -> Result<Constraint<T>, BuildError> {
    if !v.is_positive() {
        return Err(BuildError::NonPositiveMultiple(v.into()));
    }
    Ok(Constraint::new("multipleOf", number_schema(v), move |n: &T| {
        if n.is_multiple_of(v) {
            Ok(())
        } else {
            Err(Error::MultipleOf {
                value: v.into(),
                format: None,
            })
        }
    }))
}

/// The value must be greater than or equal to `v`.
pub fn min<T: Numeric>(v: T) -> Constraint<T> {
    Constraint::new("minimum", number_schema(v), move |n: &T| {
        if *n >= v {
            Ok(())
        } else {
            Err(Error::Min {
                value: v.into(),
                format: None,
            })
        }
    })
}

/// The value must be strictly greater than `v`.
pub fn excl_min<T: Numeric>(v: T) -> Constraint<T> {
    Constraint::new("exclusiveMinimum", number_schema(v), move |n: &T| {
        if *n > v {
            Ok(())
        } else {
            Err(Error::ExclMin {
                value: v.into(),
                format: None,
            })
        }
    })
}

/// The value must be less than or equal to `v`.
pub fn max<T: Numeric>(v: T) -> Constraint<T> {
    Constraint::new("maximum", number_schema(v), move |n: &T| {
        if *n <= v {
            Ok(())
        } else {
            Err(Error::Max {
                value: v.into(),
                format: None,
            })
        }
    })
}

/// The value must be strictly less than `v`.
pub fn excl_max<T: Numeric>(v: T) -> Constraint<T> {
    Constraint::new("exclusiveMaximum", number_schema(v), move |n: &T| {
        if *n < v {
            Ok(())
        } else {
            Err(Error::ExclMax {
                value: v.into(),
                format: None,
            })
        }
    })
}

// ============================================================================
// String Constraints
// ============================================================================

/// Minimum length, in characters (not bytes)
pub fn min_len(v: usize) -> Constraint<str> {
    Constraint::new("minLength", json!(v), move |s: &str| {
        if s.chars().count() >= v {
            Ok(())
        } else {
            Err(Error::MinLen {
                value: v,
                format: None,
            })
        }
    })
}

/// Maximum length, in characters (not bytes)
pub fn max_len(v: usize) -> Constraint<str> {
    Constraint::new("maxLength", json!(v), move |s: &str| {
        if s.chars().count() <= v {
            Ok(())
        } else {
            Err(Error::MaxLen {
                value: v,
                format: None,
            })
        }
    })
}

/// The string must contain a match of the regular expression.
///
/// The expression is not implicitly anchored, same as JSON Schema.
pub fn pattern(pattern: &str) -> Result<Constraint<str>, BuildError> {
    Ok(pattern_regex(Regex::new(pattern)?))
}

/// Same as [`pattern`] for an already compiled expression.
pub fn pattern_regex(re: Regex) -> Constraint<str> {
    let source = re.as_str().to_string();
    Constraint::new("pattern", json!(source), move |s: &str| {
        if re.is_match(s) {
            Ok(())
        } else {
            Err(Error::Pattern {
                pattern: re.as_str().to_string(),
                format: None,
            })
        }
    })
}

// ============================================================================
// Array Constraints
// ============================================================================

pub fn min_items(v: usize) -> Constraint<[Value]> {
    Constraint::new("minItems", json!(v), move |items: &[Value]| {
        if items.len() >= v {
            Ok(())
        } else {
            Err(Error::MinItems {
                value: v,
                format: None,
            })
        }
    })
}

pub fn max_items(v: usize) -> Constraint<[Value]> {
    Constraint::new("maxItems", json!(v), move |items: &[Value]| {
        if items.len() <= v {
            Ok(())
        } else {
            Err(Error::MaxItems {
                value: v,
                format: None,
            })
        }
    })
}

/// At least one element must pass `validator`.
///
/// On failure the error wraps the last element's error, or
/// [`Error::MinItems`] when the array is empty.
pub fn contains(validator: impl Into<Validator>) -> Constraint<[Value]> {
    let validator: Validator = validator.into();
    let schema = validator.schema().into_value();
    Constraint::new("contains", schema, move |items: &[Value]| {
        let mut last = Error::MinItems {
            value: 1,
            format: None,
        };
        for item in items {
            match validator.validate_value(item) {
                Ok(()) => return Ok(()),
                Err(err) => last = err,
            }
        }
        Err(Error::contains(last))
    })
}

// ============================================================================
// Object Constraints
// ============================================================================

pub fn min_properties(v: usize) -> Constraint<Members> {
    Constraint::new("minProperties", json!(v), move |members: &Members| {
        if members.len() >= v {
            Ok(())
        } else {
            Err(Error::MinProperties {
                value: v,
                format: None,
            })
        }
    })
}

pub fn max_properties(v: usize) -> Constraint<Members> {
    Constraint::new("maxProperties", json!(v), move |members: &Members| {
        if members.len() <= v {
            Ok(())
        } else {
            Err(Error::MaxProperties {
                value: v,
                format: None,
            })
        }
    })
}

/// Every property name must satisfy the string constraint.
///
/// Reports the first offending name.
pub fn property_names(constraint: Constraint<str>) -> Constraint<Members> {
    let mut schema = serde_json::Map::new();
    schema.insert(constraint.key().to_string(), constraint.schema_value().clone());
    Constraint::new(
        "propertyNames",
        serde_json::Value::Object(schema),
        move |members: &Members| {
            for (name, _) in members {
                if let Err(err) = constraint.check(name) {
                    return Err(Error::property_names(name.clone(), err));
                }
            }
            Ok(())
        },
    )
}
