//! Primitive validators: booleans, numbers, strings, constants and enums
//!
//! Validation first resolves the value into the primitive's Rust type. The
//! accepted source shapes are fixed per type:
//!
//! | target   | accepted values                                      |
//! |----------|------------------------------------------------------|
//! | `bool`   | `Bool`                                               |
//! | `i64`    | `Int`, `Float` with no fractional part within range  |
//! | `f64`    | `Float`, `Int`                                       |
//! | `str`    | `String`                                             |
//!
//! Anything else is an [`Error::Type`].

use std::borrow::Cow;
use std::fmt;

use serde_json::json;

use crate::constraints::Constraint;
use crate::errors::{Error, Errors, ValidationResult};
use crate::json_schema::JsonSchema;
use crate::types::Value;

// ============================================================================
// Type resolution
// ============================================================================

/// A primitive type that validators can resolve values into
pub trait Primitive: ToOwned + 'static {
    /// JSON Schema type name
    const TYPE_NAME: &'static str;

    /// Resolve the value, or `None` if it has an unsupported shape
    fn resolve(value: &Value) -> Option<Cow<'_, Self>>;
}

impl Primitive for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn resolve(value: &Value) -> Option<Cow<'_, Self>> {
        match value {
            Value::Bool(b) => Some(Cow::Borrowed(b)),
            _ => None,
        }
    }
}

// 2^63, exclusive upper bound of i64 as f64
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

impl Primitive for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn resolve(value: &Value) -> Option<Cow<'_, Self>> {
        match value {
            Value::Int(i) => Some(Cow::Borrowed(i)),
            Value::Float(f) if f.fract() == 0.0 && *f >= -I64_BOUND && *f < I64_BOUND => {
                Some(Cow::Owned(*f as i64))
            }
            _ => None,
        }
    }
}

impl Primitive for f64 {
    const TYPE_NAME: &'static str = "number";

    fn resolve(value: &Value) -> Option<Cow<'_, Self>> {
        match value {
            Value::Float(f) => Some(Cow::Borrowed(f)),
            Value::Int(i) => Some(Cow::Owned(*i as f64)),
            Value::Uint(u) => Some(Cow::Owned(*u as f64)),
            _ => None,
        }
    }
}

impl Primitive for str {
    const TYPE_NAME: &'static str = "string";

    fn resolve(value: &Value) -> Option<Cow<'_, Self>> {
        match value {
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            _ => None,
        }
    }
}

/// Resolve a value or report the type mismatch
pub(crate) fn resolve<T: Primitive + ?Sized>(value: &Value) -> ValidationResult<Cow<'_, T>> {
    T::resolve(value).ok_or_else(|| Error::type_mismatch(value.type_name(), T::TYPE_NAME))
}

// ============================================================================
// Primitive Type
// ============================================================================

/// A primitive type with constraints.
///
/// Every failing constraint is reported, not only the first one.
pub struct PrimitiveType<T: Primitive + ?Sized> {
    constraints: Vec<Constraint<T>>,
}

impl<T: Primitive + ?Sized> PrimitiveType<T> {
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
        }
    }

    /// Add a constraint. Returns a new type, `self` is not modified in place.
    pub fn constrain(mut self, constraint: Constraint<T>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Add several constraints, in order
    pub fn constrain_all(mut self, constraints: impl IntoIterator<Item = Constraint<T>>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn constraints(&self) -> &[Constraint<T>] {
        &self.constraints
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        let resolved = resolve::<T>(value)?;
        let mut errors = Errors::new();
        for constraint in &self.constraints {
            errors.check(constraint.check(&resolved));
        }
        errors.into_result()
    }

    pub fn schema(&self) -> JsonSchema {
        let mut schema = JsonSchema::with_type(T::TYPE_NAME);
        for constraint in &self.constraints {
            schema.push_constraint(constraint);
        }
        schema
    }
}

impl<T: Primitive + ?Sized> Default for PrimitiveType<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Primitive + ?Sized> Clone for PrimitiveType<T> {
    fn clone(&self) -> Self {
        Self {
            constraints: self.constraints.clone(),
        }
    }
}

impl<T: Primitive + ?Sized> fmt::Debug for PrimitiveType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrimitiveType")
            .field("type", &T::TYPE_NAME)
            .field("constraints", &self.constraints)
            .finish()
    }
}

// ============================================================================
// Const
// ============================================================================

/// The single value a [`ConstType`] accepts
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    String(String),
}

impl From<&ConstValue> for Value {
    fn from(c: &ConstValue) -> Self {
        match c {
            ConstValue::Bool(b) => Value::Bool(*b),
            ConstValue::Int(i) => Value::Int(*i),
            ConstValue::String(s) => Value::String(s.clone()),
        }
    }
}

/// Restricts a value to a single constant.
///
/// <https://json-schema.org/understanding-json-schema/reference/const>
#[derive(Debug, Clone, PartialEq)]
pub struct ConstType {
    expected: ConstValue,
}

impl ConstType {
    pub fn new(expected: ConstValue) -> Self {
        Self { expected }
    }

    pub fn expected(&self) -> &ConstValue {
        &self.expected
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        let got = match &self.expected {
            ConstValue::Bool(exp) => {
                let got = *resolve::<bool>(value)?;
                (got != *exp).then_some(Value::Bool(got))
            }
            ConstValue::Int(exp) => {
                let got = *resolve::<i64>(value)?;
                (got != *exp).then_some(Value::Int(got))
            }
            ConstValue::String(exp) => {
                let got = resolve::<str>(value)?;
                (*got != **exp).then(|| Value::String(got.into_owned()))
            }
        };
        match got {
            Some(got) => Err(Error::Const {
                got,
                expected: Value::from(&self.expected),
                format: None,
            }),
            None => Ok(()),
        }
    }

    pub fn schema(&self) -> JsonSchema {
        let expected = serde_json::Value::from(&Value::from(&self.expected));
        JsonSchema::new().field("const", expected)
    }
}

// ============================================================================
// Enum
// ============================================================================

/// Requires the value to be one of the given strings.
///
/// <https://json-schema.org/understanding-json-schema/reference/enum>
#[derive(Debug, Clone, PartialEq)]
pub struct EnumType {
    values: Vec<String>,
}

impl EnumType {
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        let got = resolve::<str>(value)?;
        if self.values.iter().any(|v| *v == *got) {
            return Ok(());
        }
        Err(Error::Enum {
            got: got.into_owned(),
            expected: self.values.clone(),
            format: None,
        })
    }

    pub fn schema(&self) -> JsonSchema {
        JsonSchema::new().field("enum", json!(self.values))
    }
}
