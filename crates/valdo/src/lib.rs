//! Valdo
//!
//! Composable validators for JSON documents.
//!
//! A validator is built once from small pieces (primitives with constraints,
//! arrays, tuples, objects, combinators) and can then:
//! - validate JSON input, reporting every failure with its location
//! - describe itself as a JSON Schema (2020-12) document
//! - translate its error messages into another language
//!
//! Validators are immutable: every builder method returns a new value, and a
//! finished [`Validator`] can be shared across threads.
//!
//! # Example
//!
//! ```rust
//! use valdo::{boolean, min_len, object, string, validate, Property, Validator};
//!
//! let user: Validator = object([
//!     Property::new("name", string().constrain(min_len(2))),
//!     Property::new("admin", boolean()),
//! ])
//! .into();
//!
//! assert!(validate(&user, br#"{"name": "Aragorn", "admin": true}"#).is_ok());
//!
//! let err = validate(&user, br#"{"name": "", "admin": false}"#).unwrap_err();
//! assert_eq!(err.to_string(), "name: must be at least 2 characters long");
//!
//! assert_eq!(
//!     valdo::schema(&user),
//!     br#"{"type":"object","properties":{"name":{"type":"string","minLength":2},"admin":{"type":"boolean"}},"required":["name","admin"],"additionalProperties":false}"#.to_vec(),
//! );
//! ```

// Public modules
pub mod array;
pub mod compose;
pub mod config;
pub mod constraints;
pub mod errors;
pub mod json_schema;
pub mod locale;
pub mod meta;
pub mod object;
pub mod primitive;
pub mod types;
pub mod validators;

// Re-export commonly used types
pub use array::{ArrayType, TupleType};
pub use config::{Extra, ValidationConfig};
pub use constraints::{
    contains, excl_max, excl_min, max, max_items, max_len, max_properties, min, min_items, min_len,
    min_properties, multiple_of, pattern, pattern_regex, property_names, Constraint, Members,
    Numeric,
};
pub use errors::{BuildError, Error, ErrorKind, Errors, ValidateError, ValidationResult};
pub use json_schema::JsonSchema;
pub use locale::{default_locales, Locale, Localized, Locales};
pub use meta::Meta;
pub use object::{ObjectType, Property};
pub use primitive::{ConstType, ConstValue, EnumType, Primitive, PrimitiveType};
pub use types::{Number, Value};
pub use validators::{
    all_of, any, any_of, array, bool_const, boolean, enum_of, float, int, int_const, map, not,
    null, nullable, object, schema, string, string_const, tuple, unmarshal, unmarshal_with_config,
    validate, validate_with_config, Validator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
