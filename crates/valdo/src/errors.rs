//! Validation error types
//!
//! Every failure is a variant of the closed [`Error`] enum. Errors form a tree:
//! positional variants ([`Error::Property`], [`Error::Index`], ...) wrap the
//! failure of a nested value, and [`Errors`] collects siblings.
//!
//! Each variant can have its message template replaced ([`Error::with_format`]),
//! which is what [`crate::locale`] uses to translate a whole tree after
//! validation has already happened.

use std::fmt;

use thiserror::Error as ThisError;

use crate::types::{Number, Value};

// ============================================================================
// Validation Result
// ============================================================================

/// Validation result type
pub type ValidationResult<T = ()> = Result<T, Error>;

// ============================================================================
// Error Kind
// ============================================================================

/// Shape of an [`Error`], ignoring every value it carries.
///
/// Two errors of the same variant always have the same kind, which makes the
/// kind usable as a lookup key for message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorKind {
    Type,
    Required,
    Unexpected,
    Property,
    Index,
    Contains,
    PropertyNames,
    Not,
    AnyOf,
    MultipleOf,
    Min,
    ExclMin,
    Max,
    ExclMax,
    MinLen,
    MaxLen,
    Pattern,
    MinItems,
    MaxItems,
    MinProperties,
    MaxProperties,
    Const,
    Enum,
    NoInput,
    Errors,
}

impl ErrorKind {
    /// Message template used when no custom format is set
    pub fn default_template(self) -> &'static str {
        match self {
            Self::Type => "invalid type: got {got}, expected {expected}",
            Self::Required => "{name} is required but not found",
            Self::Unexpected => "unexpected property: {name}",
            Self::Property => "{name}: {error}",
            Self::Index => "at {index}: {error}",
            Self::Contains => "at least one item {error}",
            Self::PropertyNames => "property name {name} {error}",
            Self::Not => "must not match the schema",
            Self::AnyOf => "must match at least one schema: {error}",
            Self::MultipleOf => "must be a multiple of {value}",
            Self::Min => "must be greater than or equal to {value}",
            Self::ExclMin => "must be greater than {value}",
            Self::Max => "must be less than or equal to {value}",
            Self::ExclMax => "must be less than {value}",
            Self::MinLen => "must be at least {value} characters long",
            Self::MaxLen => "must be at most {value} characters long",
            Self::Pattern => "must match the pattern",
            Self::MinItems => "must contain at least {value} items",
            Self::MaxItems => "must contain at most {value} items",
            Self::MinProperties => "must have at least {value} properties",
            Self::MaxProperties => "must have at most {value} properties",
            Self::Const => "must be equal to {expected}",
            Self::Enum => "must be one of: {expected}",
            Self::NoInput => "no input provided",
            Self::Errors => DEFAULT_SEPARATOR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Type => "type",
            Self::Required => "required",
            Self::Unexpected => "unexpected",
            Self::Property => "property",
            Self::Index => "index",
            Self::Contains => "contains",
            Self::PropertyNames => "property_names",
            Self::Not => "not",
            Self::AnyOf => "any_of",
            Self::MultipleOf => "multiple_of",
            Self::Min => "min",
            Self::ExclMin => "excl_min",
            Self::Max => "max",
            Self::ExclMax => "excl_max",
            Self::MinLen => "min_len",
            Self::MaxLen => "max_len",
            Self::Pattern => "pattern",
            Self::MinItems => "min_items",
            Self::MaxItems => "max_items",
            Self::MinProperties => "min_properties",
            Self::MaxProperties => "max_properties",
            Self::Const => "const",
            Self::Enum => "enum",
            Self::NoInput => "no_input",
            Self::Errors => "errors",
        };
        write!(f, "{}", name)
    }
}

impl From<&Error> for ErrorKind {
    fn from(err: &Error) -> Self {
        err.kind()
    }
}

impl From<Error> for ErrorKind {
    fn from(err: Error) -> Self {
        err.kind()
    }
}

// ============================================================================
// Single Validation Error
// ============================================================================

/// A validation failure.
///
/// `format` holds a message template overriding [`ErrorKind::default_template`].
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The value has a type the validator does not accept
    Type {
        got: String,
        expected: String,
        format: Option<String>,
    },
    /// A required property is missing
    Required { name: String, format: Option<String> },
    /// A property is not allowed by the object
    Unexpected { name: String, format: Option<String> },
    /// A property value is invalid
    Property {
        name: String,
        error: Box<Error>,
        format: Option<String>,
    },
    /// An array element is invalid
    Index {
        index: usize,
        error: Box<Error>,
        format: Option<String>,
    },
    /// No array element matches the `contains` validator
    Contains {
        error: Box<Error>,
        format: Option<String>,
    },
    /// A property name violates the `propertyNames` constraint
    PropertyNames {
        name: String,
        error: Box<Error>,
        format: Option<String>,
    },
    /// The value matches a schema it must not match
    Not { format: Option<String> },
    /// The value matches none of the `anyOf` schemas
    AnyOf { errors: Errors, format: Option<String> },
    MultipleOf { value: Number, format: Option<String> },
    Min { value: Number, format: Option<String> },
    ExclMin { value: Number, format: Option<String> },
    Max { value: Number, format: Option<String> },
    ExclMax { value: Number, format: Option<String> },
    MinLen { value: usize, format: Option<String> },
    MaxLen { value: usize, format: Option<String> },
    Pattern { pattern: String, format: Option<String> },
    MinItems { value: usize, format: Option<String> },
    MaxItems { value: usize, format: Option<String> },
    MinProperties { value: usize, format: Option<String> },
    MaxProperties { value: usize, format: Option<String> },
    /// The value differs from the expected constant
    Const {
        got: Value,
        expected: Value,
        format: Option<String>,
    },
    /// The value is not one of the allowed strings
    Enum {
        got: String,
        expected: Vec<String>,
        format: Option<String>,
    },
    /// The input is empty
    NoInput { format: Option<String> },
    /// Several sibling errors
    Multiple(Errors),
}

impl Error {
    /// Create a type mismatch error
    pub fn type_mismatch(got: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Type {
            got: got.into(),
            expected: expected.into(),
            format: None,
        }
    }

    /// Create a missing property error
    pub fn required(name: impl Into<String>) -> Self {
        Self::Required {
            name: name.into(),
            format: None,
        }
    }

    /// Create an error for a property the object does not allow
    pub fn unexpected(name: impl Into<String>) -> Self {
        Self::Unexpected {
            name: name.into(),
            format: None,
        }
    }

    /// Attach an error to an object property
    pub fn property(name: impl Into<String>, error: Error) -> Self {
        Self::Property {
            name: name.into(),
            error: Box::new(error),
            format: None,
        }
    }

    /// Attach an error to an array element
    pub fn index(index: usize, error: Error) -> Self {
        Self::Index {
            index,
            error: Box::new(error),
            format: None,
        }
    }

    pub fn contains(error: Error) -> Self {
        Self::Contains {
            error: Box::new(error),
            format: None,
        }
    }

    pub fn property_names(name: impl Into<String>, error: Error) -> Self {
        Self::PropertyNames {
            name: name.into(),
            error: Box::new(error),
            format: None,
        }
    }

    pub fn not() -> Self {
        Self::Not { format: None }
    }

    pub fn any_of(errors: Errors) -> Self {
        Self::AnyOf {
            errors,
            format: None,
        }
    }

    pub fn no_input() -> Self {
        Self::NoInput { format: None }
    }

    /// The variant of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Type { .. } => ErrorKind::Type,
            Self::Required { .. } => ErrorKind::Required,
            Self::Unexpected { .. } => ErrorKind::Unexpected,
            Self::Property { .. } => ErrorKind::Property,
            Self::Index { .. } => ErrorKind::Index,
            Self::Contains { .. } => ErrorKind::Contains,
            Self::PropertyNames { .. } => ErrorKind::PropertyNames,
            Self::Not { .. } => ErrorKind::Not,
            Self::AnyOf { .. } => ErrorKind::AnyOf,
            Self::MultipleOf { .. } => ErrorKind::MultipleOf,
            Self::Min { .. } => ErrorKind::Min,
            Self::ExclMin { .. } => ErrorKind::ExclMin,
            Self::Max { .. } => ErrorKind::Max,
            Self::ExclMax { .. } => ErrorKind::ExclMax,
            Self::MinLen { .. } => ErrorKind::MinLen,
            Self::MaxLen { .. } => ErrorKind::MaxLen,
            Self::Pattern { .. } => ErrorKind::Pattern,
            Self::MinItems { .. } => ErrorKind::MinItems,
            Self::MaxItems { .. } => ErrorKind::MaxItems,
            Self::MinProperties { .. } => ErrorKind::MinProperties,
            Self::MaxProperties { .. } => ErrorKind::MaxProperties,
            Self::Const { .. } => ErrorKind::Const,
            Self::Enum { .. } => ErrorKind::Enum,
            Self::NoInput { .. } => ErrorKind::NoInput,
            Self::Multiple(_) => ErrorKind::Errors,
        }
    }

    /// A zero-valued error of the same variant.
    ///
    /// Wrapping variants get an empty [`Errors`] as their child.
    pub fn default_shape(&self) -> Error {
        let empty = || Box::new(Error::Multiple(Errors::default()));
        match self.kind() {
            ErrorKind::Type => Self::type_mismatch("", ""),
            ErrorKind::Required => Self::required(""),
            ErrorKind::Unexpected => Self::unexpected(""),
            ErrorKind::Property => Self::Property {
                name: String::new(),
                error: empty(),
                format: None,
            },
            ErrorKind::Index => Self::Index {
                index: 0,
                error: empty(),
                format: None,
            },
            ErrorKind::Contains => Self::Contains {
                error: empty(),
                format: None,
            },
            ErrorKind::PropertyNames => Self::PropertyNames {
                name: String::new(),
                error: empty(),
                format: None,
            },
            ErrorKind::Not => Self::not(),
            ErrorKind::AnyOf => Self::any_of(Errors::default()),
            ErrorKind::MultipleOf => Self::MultipleOf {
                value: Number::default(),
                format: None,
            },
            ErrorKind::Min => Self::Min {
                value: Number::default(),
                format: None,
            },
            ErrorKind::ExclMin => Self::ExclMin {
                value: Number::default(),
                format: None,
            },
            ErrorKind::Max => Self::Max {
                value: Number::default(),
                format: None,
            },
            ErrorKind::ExclMax => Self::ExclMax {
                value: Number::default(),
                format: None,
            },
            ErrorKind::MinLen => Self::MinLen { value: 0, format: None },
            ErrorKind::MaxLen => Self::MaxLen { value: 0, format: None },
            ErrorKind::Pattern => Self::Pattern {
                pattern: String::new(),
                format: None,
            },
            ErrorKind::MinItems => Self::MinItems { value: 0, format: None },
            ErrorKind::MaxItems => Self::MaxItems { value: 0, format: None },
            ErrorKind::MinProperties => Self::MinProperties { value: 0, format: None },
            ErrorKind::MaxProperties => Self::MaxProperties { value: 0, format: None },
            ErrorKind::Const => Self::Const {
                got: Value::Null,
                expected: Value::Null,
                format: None,
            },
            ErrorKind::Enum => Self::Enum {
                got: String::new(),
                expected: Vec::new(),
                format: None,
            },
            ErrorKind::NoInput => Self::no_input(),
            ErrorKind::Errors => Self::Multiple(Errors::default()),
        }
    }

    /// The custom message template, if one is set.
    ///
    /// For [`Error::Multiple`] this is the separator.
    pub fn format(&self) -> Option<&str> {
        match self {
            Self::Multiple(errors) => errors.separator.as_deref(),
            Self::Type { format, .. }
            | Self::Required { format, .. }
            | Self::Unexpected { format, .. }
            | Self::Property { format, .. }
            | Self::Index { format, .. }
            | Self::Contains { format, .. }
            | Self::PropertyNames { format, .. }
            | Self::Not { format }
            | Self::AnyOf { format, .. }
            | Self::MultipleOf { format, .. }
            | Self::Min { format, .. }
            | Self::ExclMin { format, .. }
            | Self::Max { format, .. }
            | Self::ExclMax { format, .. }
            | Self::MinLen { format, .. }
            | Self::MaxLen { format, .. }
            | Self::Pattern { format, .. }
            | Self::MinItems { format, .. }
            | Self::MaxItems { format, .. }
            | Self::MinProperties { format, .. }
            | Self::MaxProperties { format, .. }
            | Self::Const { format, .. }
            | Self::Enum { format, .. }
            | Self::NoInput { format } => format.as_deref(),
        }
    }

    /// Replace the message template, keeping every carried value.
    pub fn with_format(mut self, template: impl Into<String>) -> Self {
        let template = Some(template.into());
        match &mut self {
            Self::Multiple(errors) => errors.separator = template,
            Self::Type { format, .. }
            | Self::Required { format, .. }
            | Self::Unexpected { format, .. }
            | Self::Property { format, .. }
            | Self::Index { format, .. }
            | Self::Contains { format, .. }
            | Self::PropertyNames { format, .. }
            | Self::Not { format }
            | Self::AnyOf { format, .. }
            | Self::MultipleOf { format, .. }
            | Self::Min { format, .. }
            | Self::ExclMin { format, .. }
            | Self::Max { format, .. }
            | Self::ExclMax { format, .. }
            | Self::MinLen { format, .. }
            | Self::MaxLen { format, .. }
            | Self::Pattern { format, .. }
            | Self::MinItems { format, .. }
            | Self::MaxItems { format, .. }
            | Self::MinProperties { format, .. }
            | Self::MaxProperties { format, .. }
            | Self::Const { format, .. }
            | Self::Enum { format, .. }
            | Self::NoInput { format } => *format = template,
        }
        self
    }

    /// Whether this variant carries nested errors
    pub fn is_wrapper(&self) -> bool {
        matches!(
            self,
            Self::Property { .. }
                | Self::Index { .. }
                | Self::Contains { .. }
                | Self::PropertyNames { .. }
                | Self::AnyOf { .. }
                | Self::Multiple(_)
        )
    }

    /// The immediate nested errors. Empty for leaf variants.
    pub fn children(&self) -> &[Error] {
        match self {
            Self::Property { error, .. }
            | Self::Index { error, .. }
            | Self::Contains { error, .. }
            | Self::PropertyNames { error, .. } => std::slice::from_ref(&**error),
            Self::AnyOf { errors, .. } | Self::Multiple(errors) => &errors.errors,
            _ => &[],
        }
    }

    /// Rebuild the error with `f` applied to each immediate child.
    ///
    /// Only one level is visited; `f` has to recurse itself to reach deeper
    /// errors. Leaf variants are returned unchanged.
    pub fn map<F>(self, mut f: F) -> Error
    where
        F: FnMut(Error) -> Error,
    {
        match self {
            Self::Property {
                name,
                error,
                format,
            } => Self::Property {
                name,
                error: Box::new(f(*error)),
                format,
            },
            Self::Index {
                index,
                error,
                format,
            } => Self::Index {
                index,
                error: Box::new(f(*error)),
                format,
            },
            Self::Contains { error, format } => Self::Contains {
                error: Box::new(f(*error)),
                format,
            },
            Self::PropertyNames {
                name,
                error,
                format,
            } => Self::PropertyNames {
                name,
                error: Box::new(f(*error)),
                format,
            },
            Self::AnyOf { errors, format } => Self::AnyOf {
                errors: errors.map(f),
                format,
            },
            Self::Multiple(errors) => Self::Multiple(errors.map(f)),
            leaf => leaf,
        }
    }

    /// Value of a named placeholder for this error
    fn placeholder(&self, key: &str) -> Option<String> {
        let value = match (self, key) {
            (Self::Type { got, .. }, "got") if got.is_empty() => "unknown type".to_string(),
            (Self::Type { got, .. }, "got") => got.clone(),
            (Self::Type { expected, .. }, "expected") => expected.clone(),
            (Self::Required { name, .. }, "name")
            | (Self::Unexpected { name, .. }, "name")
            | (Self::Property { name, .. }, "name")
            | (Self::PropertyNames { name, .. }, "name") => name.clone(),
            (Self::Index { index, .. }, "index") => index.to_string(),
            (Self::Property { error, .. }, "error")
            | (Self::Index { error, .. }, "error")
            | (Self::Contains { error, .. }, "error")
            | (Self::PropertyNames { error, .. }, "error") => error.to_string(),
            (Self::AnyOf { errors, .. }, "error") => errors.to_string(),
            (Self::MultipleOf { value, .. }, "value")
            | (Self::Min { value, .. }, "value")
            | (Self::ExclMin { value, .. }, "value")
            | (Self::Max { value, .. }, "value")
            | (Self::ExclMax { value, .. }, "value") => value.to_string(),
            (Self::MinLen { value, .. }, "value")
            | (Self::MaxLen { value, .. }, "value")
            | (Self::MinItems { value, .. }, "value")
            | (Self::MaxItems { value, .. }, "value")
            | (Self::MinProperties { value, .. }, "value")
            | (Self::MaxProperties { value, .. }, "value") => value.to_string(),
            (Self::Pattern { pattern, .. }, "pattern") => pattern.clone(),
            (Self::Const { got, .. }, "got") => got.to_string(),
            (Self::Const { expected, .. }, "expected") => expected.to_string(),
            (Self::Enum { got, .. }, "got") => got.clone(),
            (Self::Enum { expected, .. }, "expected") => expected.join(", "),
            _ => return None,
        };
        Some(value)
    }
}

/// Substitute `{name}` placeholders. Unknown placeholders are kept verbatim.
fn render(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let key = &after[..end];
                match lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(key);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Multiple(errors) => write!(f, "{}", errors),
            other => {
                let template = other
                    .format()
                    .unwrap_or_else(|| other.kind().default_template());
                write!(f, "{}", render(template, |key| other.placeholder(key)))
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Property { error, .. }
            | Self::Index { error, .. }
            | Self::Contains { error, .. }
            | Self::PropertyNames { error, .. } => Some(&**error),
            _ => None,
        }
    }
}

// ============================================================================
// Validation Errors Collection
// ============================================================================

const DEFAULT_SEPARATOR: &str = "; ";

/// Ordered collection of sibling errors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Errors {
    /// Individual errors, in the order they were found
    pub errors: Vec<Error>,
    /// Separator used to join messages; `"; "` when unset
    pub separator: Option<String>,
}

impl Errors {
    /// Create a new empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any errors
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: Error) {
        self.errors.push(error);
    }

    /// Add the error of a failed result, if any
    pub fn check(&mut self, result: ValidationResult) {
        if let Err(error) = result {
            self.errors.push(error);
        }
    }

    /// Collapse the collection: nothing, the only error, or all of them.
    pub fn flatten(mut self) -> Option<Error> {
        match self.errors.len() {
            0 => None,
            1 => self.errors.pop(),
            _ => Some(Error::Multiple(self)),
        }
    }

    /// Convert to Result - Ok if no errors, Err otherwise
    pub fn into_result(self) -> ValidationResult {
        match self.flatten() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Get errors as a slice
    pub fn as_slice(&self) -> &[Error] {
        &self.errors
    }

    /// Apply `f` to every error in the collection
    pub fn map<F>(self, f: F) -> Errors
    where
        F: FnMut(Error) -> Error,
    {
        Errors {
            errors: self.errors.into_iter().map(f).collect(),
            separator: self.separator,
        }
    }
}

impl From<Vec<Error>> for Errors {
    fn from(errors: Vec<Error>) -> Self {
        Self {
            errors,
            separator: None,
        }
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = self.separator.as_deref().unwrap_or(DEFAULT_SEPARATOR);
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(sep)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

// ============================================================================
// Envelope and construction errors
// ============================================================================

/// Error returned by the byte-level entry points
#[derive(ThisError, Debug)]
pub enum ValidateError {
    /// The input was decoded but does not satisfy the validator
    #[error(transparent)]
    Invalid(#[from] Error),

    /// The input could not be decoded
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// The input exceeds the configured size limit
    #[error("input is {len} bytes long, the limit is {max}")]
    InputTooLarge { len: usize, max: usize },

    /// The decoded input exceeds the configured nesting limit
    #[error("input is nested {depth} levels deep, the limit is {max}")]
    TooDeep { depth: usize, max: usize },
}

impl ValidateError {
    /// The validation error tree, if validation is what failed
    pub fn as_invalid(&self) -> Option<&Error> {
        match self {
            Self::Invalid(error) => Some(error),
            _ => None,
        }
    }
}

/// Error raised while constructing a validator
#[derive(ThisError, Debug)]
pub enum BuildError {
    #[error("invalid regular expression: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("multipleOf must be positive, got {0}")]
    NonPositiveMultiple(Number),
}
