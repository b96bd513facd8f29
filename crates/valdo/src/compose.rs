//! Composition of validators: `allOf`, `anyOf` and `not`

use serde_json::Value as JsonValue;

use crate::errors::{Error, Errors, ValidationResult};
use crate::json_schema::JsonSchema;
use crate::types::Value;
use crate::validators::Validator;

/// Every validator must pass. Returns the first failure as-is.
pub(crate) fn validate_all_of(validators: &[Validator], value: &Value) -> ValidationResult {
    validators.iter().try_for_each(|v| v.validate_value(value))
}

/// At least one validator must pass.
pub(crate) fn validate_any_of(validators: &[Validator], value: &Value) -> ValidationResult {
    let mut errors = Errors::new();
    for validator in validators {
        match validator.validate_value(value) {
            Ok(()) => return Ok(()),
            Err(err) => errors.add(err),
        }
    }
    Err(Error::any_of(errors))
}

/// The validator must fail. Its error is discarded.
pub(crate) fn validate_not(validator: &Validator, value: &Value) -> ValidationResult {
    match validator.validate_value(value) {
        Ok(()) => Err(Error::not()),
        Err(_) => Ok(()),
    }
}

fn schemas(validators: &[Validator]) -> Vec<JsonValue> {
    validators.iter().map(|v| v.schema().into_value()).collect()
}

/// <https://json-schema.org/understanding-json-schema/reference/combining#allOf>
pub(crate) fn all_of_schema(validators: &[Validator]) -> JsonSchema {
    JsonSchema::new().field("allOf", schemas(validators))
}

/// <https://json-schema.org/understanding-json-schema/reference/combining#anyOf>
pub(crate) fn any_of_schema(validators: &[Validator]) -> JsonSchema {
    JsonSchema::new().field("anyOf", schemas(validators))
}

/// <https://json-schema.org/understanding-json-schema/reference/combining#not>
pub(crate) fn not_schema(validator: &Validator) -> JsonSchema {
    JsonSchema::new().field("not", validator.schema())
}
