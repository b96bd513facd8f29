//! Core validation engine
//!
//! [`Validator`] is the closed set of every validator the crate provides.
//! The functions in the "Public API" section are the byte-level entry points:
//! they decode the input with `serde_json` and run the validator on the result.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::array::{ArrayType, TupleType};
use crate::compose;
use crate::config::ValidationConfig;
use crate::errors::{Error, ValidateError, ValidationResult};
use crate::json_schema::JsonSchema;
use crate::locale::Localized;
use crate::meta::Meta;
use crate::object::{ObjectType, Property};
use crate::primitive::{ConstType, ConstValue, EnumType, PrimitiveType};
use crate::types::Value;

// ============================================================================
// Public API
// ============================================================================

/// Validate JSON input
///
/// # Example
///
/// ```
/// use valdo::{int, min, validate, Validator};
///
/// let validator = Validator::from(int().constrain(min(18)));
/// assert!(validate(&validator, b"42").is_ok());
/// assert!(validate(&validator, b"12").is_err());
/// ```
pub fn validate(validator: &Validator, input: &[u8]) -> Result<(), ValidateError> {
    validate_with_config(validator, input, &ValidationConfig::default())
}

/// Validate JSON input, rejecting inputs over the configured limits
pub fn validate_with_config(
    validator: &Validator,
    input: &[u8],
    config: &ValidationConfig,
) -> Result<(), ValidateError> {
    debug!(len = input.len(), "validating input");
    let value = decode(input, config)?;
    validator.validate_value(&value).map_err(|err| {
        let errors = match &err {
            Error::Multiple(errors) => errors.len(),
            _ => 1,
        };
        debug!(errors, "input is invalid");
        ValidateError::from(err)
    })
}

/// Validate JSON input and deserialize it
pub fn unmarshal<T: DeserializeOwned>(validator: &Validator, input: &[u8]) -> Result<T, ValidateError> {
    unmarshal_with_config(validator, input, &ValidationConfig::default())
}

pub fn unmarshal_with_config<T: DeserializeOwned>(
    validator: &Validator,
    input: &[u8],
    config: &ValidationConfig,
) -> Result<T, ValidateError> {
    validate_with_config(validator, input, config)?;
    Ok(serde_json::from_slice(input)?)
}

/// JSON Schema of the validator, as compact JSON
pub fn schema(validator: &Validator) -> Vec<u8> {
    validator.schema().to_vec()
}

fn decode(input: &[u8], config: &ValidationConfig) -> Result<Value, ValidateError> {
    if input.is_empty() {
        return Err(Error::no_input().into());
    }
    if let Some(max) = config.max_input_len {
        if input.len() > max {
            return Err(ValidateError::InputTooLarge {
                len: input.len(),
                max,
            });
        }
    }
    let value: serde_json::Value = serde_json::from_slice(input)?;
    let value = Value::from(value);
    if let Some(max) = config.max_depth {
        let depth = value.depth();
        if depth > max {
            return Err(ValidateError::TooDeep { depth, max });
        }
    }
    Ok(value)
}

// ============================================================================
// Validator
// ============================================================================

/// Any validator
#[derive(Debug, Clone)]
pub enum Validator {
    /// Accepts everything
    Any,
    /// Accepts only null
    Null,
    Bool(PrimitiveType<bool>),
    Int(PrimitiveType<i64>),
    Float(PrimitiveType<f64>),
    String(PrimitiveType<str>),
    Const(ConstType),
    Enum(EnumType),
    Array(ArrayType),
    Tuple(TupleType),
    Object(ObjectType),
    AllOf(Vec<Validator>),
    AnyOf(Vec<Validator>),
    Not(Box<Validator>),
    Meta(Meta),
    Localized(Localized),
}

impl Validator {
    /// Validate an already decoded value
    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        match self {
            Self::Any => Ok(()),
            Self::Null => match value {
                Value::Null => Ok(()),
                other => Err(Error::type_mismatch(other.type_name(), "null")),
            },
            Self::Bool(v) => v.validate_value(value),
            Self::Int(v) => v.validate_value(value),
            Self::Float(v) => v.validate_value(value),
            Self::String(v) => v.validate_value(value),
            Self::Const(v) => v.validate_value(value),
            Self::Enum(v) => v.validate_value(value),
            Self::Array(v) => v.validate_value(value),
            Self::Tuple(v) => v.validate_value(value),
            Self::Object(v) => v.validate_value(value),
            Self::AllOf(vs) => compose::validate_all_of(vs, value),
            Self::AnyOf(vs) => compose::validate_any_of(vs, value),
            Self::Not(v) => compose::validate_not(v, value),
            Self::Meta(v) => v.validate_value(value),
            Self::Localized(v) => v.validate_value(value),
        }
    }

    /// JSON Schema describing what the validator accepts
    pub fn schema(&self) -> JsonSchema {
        match self {
            Self::Any => JsonSchema::new(),
            Self::Null => JsonSchema::with_type("null"),
            Self::Bool(v) => v.schema(),
            Self::Int(v) => v.schema(),
            Self::Float(v) => v.schema(),
            Self::String(v) => v.schema(),
            Self::Const(v) => v.schema(),
            Self::Enum(v) => v.schema(),
            Self::Array(v) => v.schema(),
            Self::Tuple(v) => v.schema(),
            Self::Object(v) => v.schema(),
            Self::AllOf(vs) => compose::all_of_schema(vs),
            Self::AnyOf(vs) => compose::any_of_schema(vs),
            Self::Not(v) => compose::not_schema(v),
            Self::Meta(v) => v.schema(),
            Self::Localized(v) => v.schema(),
        }
    }

    fn annotate(self, f: impl FnOnce(&mut Meta)) -> Validator {
        let mut meta = match self {
            Self::Meta(meta) => meta,
            other => Meta::new(other),
        };
        f(&mut meta);
        Self::Meta(meta)
    }

    pub fn title(self, title: impl Into<String>) -> Validator {
        self.annotate(|m| m.title = Some(title.into()))
    }

    pub fn description(self, description: impl Into<String>) -> Validator {
        self.annotate(|m| m.description = Some(description.into()))
    }

    /// Set `$comment`
    pub fn comment(self, comment: impl Into<String>) -> Validator {
        self.annotate(|m| m.comment = Some(comment.into()))
    }

    pub fn deprecated(self) -> Validator {
        self.annotate(|m| m.deprecated = true)
    }
}

macro_rules! impl_from_validator {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Validator {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_validator! {
    PrimitiveType<bool> => Bool,
    PrimitiveType<i64> => Int,
    PrimitiveType<f64> => Float,
    PrimitiveType<str> => String,
    ConstType => Const,
    EnumType => Enum,
    ArrayType => Array,
    TupleType => Tuple,
    ObjectType => Object,
    Meta => Meta,
    Localized => Localized,
}

// ============================================================================
// Constructors
// ============================================================================

/// Accepts any value. The schema is `{}`.
pub fn any() -> Validator {
    Validator::Any
}

pub fn null() -> Validator {
    Validator::Null
}

pub fn boolean() -> PrimitiveType<bool> {
    PrimitiveType::new()
}

/// Integer. Floats without a fractional part are accepted too.
pub fn int() -> PrimitiveType<i64> {
    PrimitiveType::new()
}

/// Any number, integer or not
pub fn float() -> PrimitiveType<f64> {
    PrimitiveType::new()
}

pub fn string() -> PrimitiveType<str> {
    PrimitiveType::new()
}

pub fn bool_const(value: bool) -> ConstType {
    ConstType::new(ConstValue::Bool(value))
}

pub fn int_const(value: i64) -> ConstType {
    ConstType::new(ConstValue::Int(value))
}

pub fn string_const(value: impl Into<String>) -> ConstType {
    ConstType::new(ConstValue::String(value.into()))
}

/// A string from a fixed set
pub fn enum_of<I, S>(values: I) -> EnumType
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    EnumType::new(values)
}

pub fn array(items: impl Into<Validator>) -> ArrayType {
    ArrayType::new(items)
}

pub fn tuple<I>(items: I) -> TupleType
where
    I: IntoIterator,
    I::Item: Into<Validator>,
{
    TupleType::new(items)
}

pub fn object(properties: impl IntoIterator<Item = Property>) -> ObjectType {
    ObjectType::new(properties)
}

/// Object with arbitrary keys and every value matching `values`
pub fn map(values: impl Into<Validator>) -> ObjectType {
    ObjectType::new([]).allow_extra(values)
}

pub fn all_of<I>(validators: I) -> Validator
where
    I: IntoIterator,
    I::Item: Into<Validator>,
{
    Validator::AllOf(validators.into_iter().map(Into::into).collect())
}

pub fn any_of<I>(validators: I) -> Validator
where
    I: IntoIterator,
    I::Item: Into<Validator>,
{
    Validator::AnyOf(validators.into_iter().map(Into::into).collect())
}

pub fn not(validator: impl Into<Validator>) -> Validator {
    Validator::Not(Box::new(validator.into()))
}

/// The value or null
pub fn nullable(validator: impl Into<Validator>) -> Validator {
    Validator::AnyOf(vec![validator.into(), Validator::Null])
}
