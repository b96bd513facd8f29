//! Array and tuple validators
//!
//! Element validation stops at the first invalid element; constraints over the
//! whole array still run and their errors are collected alongside it.

use serde_json::Value as JsonValue;

use crate::config::Extra;
use crate::constraints::Constraint;
use crate::errors::{Error, Errors, ValidationResult};
use crate::json_schema::JsonSchema;
use crate::types::Value;
use crate::validators::Validator;

fn as_list<'a>(value: &'a Value) -> ValidationResult<&'a [Value]> {
    match value {
        Value::List(items) => Ok(items),
        other => Err(Error::type_mismatch(other.type_name(), "array")),
    }
}

// ============================================================================
// Array
// ============================================================================

/// Array with every element matching the same validator
#[derive(Debug, Clone)]
pub struct ArrayType {
    items: Box<Validator>,
    constraints: Vec<Constraint<[Value]>>,
}

impl ArrayType {
    pub fn new(items: impl Into<Validator>) -> Self {
        Self {
            items: Box::new(items.into()),
            constraints: Vec::new(),
        }
    }

    /// Add a constraint: [`crate::min_items`], [`crate::max_items`] or [`crate::contains`].
    pub fn constrain(mut self, constraint: Constraint<[Value]>) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn items(&self) -> &Validator {
        &self.items
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        let items = as_list(value)?;
        let mut errors = Errors::new();
        for (i, item) in items.iter().enumerate() {
            if let Err(err) = self.items.validate_value(item) {
                errors.add(Error::index(i, err));
                break;
            }
        }
        for constraint in &self.constraints {
            errors.check(constraint.check(items));
        }
        errors.into_result()
    }

    pub fn schema(&self) -> JsonSchema {
        let mut schema = JsonSchema::with_type("array");
        let items = self.items.schema();
        if !items.is_empty() {
            schema.push("items", items);
        }
        for constraint in &self.constraints {
            schema.push_constraint(constraint);
        }
        schema
    }
}

// ============================================================================
// Tuple
// ============================================================================

/// Array with every position having its own validator.
///
/// <https://json-schema.org/understanding-json-schema/reference/array#tupleValidation>
#[derive(Debug, Clone)]
pub struct TupleType {
    items: Vec<Validator>,
    extra: Extra,
    constraints: Vec<Constraint<[Value]>>,
}

impl TupleType {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Validator>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            extra: Extra::Forbid,
            constraints: Vec::new(),
        }
    }

    pub fn constrain(mut self, constraint: Constraint<[Value]>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Allow items after the declared positions, validated by `validator`.
    pub fn allow_extra(mut self, validator: impl Into<Validator>) -> Self {
        self.extra = Extra::Validate(Box::new(validator.into()));
        self
    }

    /// Allow any items after the declared positions.
    pub fn allow_any_extra(mut self) -> Self {
        self.extra = Extra::Allow;
        self
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        let items = as_list(value)?;
        let expected = self.items.len();
        if items.len() < expected {
            return Err(Error::MinItems {
                value: expected,
                format: None,
            });
        }
        if !self.extra.allows_extra() && items.len() > expected {
            return Err(Error::MaxItems {
                value: expected,
                format: None,
            });
        }

        let mut errors = Errors::new();
        for (i, (validator, item)) in self.items.iter().zip(items).enumerate() {
            if let Err(err) = validator.validate_value(item) {
                errors.add(Error::index(i, err));
                break;
            }
        }
        if let Some(extra) = self.extra.validator() {
            for (i, item) in items.iter().enumerate().skip(expected) {
                if let Err(err) = extra.validate_value(item) {
                    errors.add(Error::index(i, err));
                    break;
                }
            }
        }
        for constraint in &self.constraints {
            errors.check(constraint.check(items));
        }
        errors.into_result()
    }

    pub fn schema(&self) -> JsonSchema {
        let mut schema = JsonSchema::with_type("array");
        match &self.extra {
            Extra::Forbid => schema.push("items", false),
            Extra::Validate(validator) => {
                let items = validator.schema();
                if !items.is_empty() {
                    schema.push("items", items);
                }
            }
            Extra::Allow => {}
        }
        if !self.items.is_empty() {
            let prefix: Vec<JsonValue> = self.items.iter().map(|v| v.schema().into_value()).collect();
            schema.push("prefixItems", prefix);
        }
        for constraint in &self.constraints {
            schema.push_constraint(constraint);
        }
        schema
    }
}
