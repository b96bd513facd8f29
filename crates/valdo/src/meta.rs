//! Schema annotations
//!
//! [`Meta`] only adds documentation keywords to the schema. Validation is
//! delegated to the wrapped validator untouched.

use crate::errors::ValidationResult;
use crate::json_schema::JsonSchema;
use crate::types::Value;
use crate::validators::Validator;

/// A validator with annotations.
///
/// <https://json-schema.org/understanding-json-schema/reference/annotations>
#[derive(Debug, Clone)]
pub struct Meta {
    validator: Box<Validator>,
    pub comment: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub deprecated: bool,
}

impl Meta {
    pub fn new(validator: impl Into<Validator>) -> Self {
        Self {
            validator: Box::new(validator.into()),
            comment: None,
            title: None,
            description: None,
            deprecated: false,
        }
    }

    pub fn inner(&self) -> &Validator {
        &self.validator
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        self.validator.validate_value(value)
    }

    pub fn schema(&self) -> JsonSchema {
        let mut schema = self.validator.schema();
        if let Some(comment) = &self.comment {
            schema.push("$comment", comment.as_str());
        }
        if let Some(title) = &self.title {
            schema.push("title", title.as_str());
        }
        if let Some(description) = &self.description {
            schema.push("description", description.as_str());
        }
        if self.deprecated {
            schema.push("deprecated", true);
        }
        schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::int;

    #[test]
    fn test_annotations_follow_inner_fields() {
        let mut meta = Meta::new(int());
        meta.description = Some("Age in years".into());
        meta.comment = Some("internal".into());
        meta.deprecated = true;
        assert_eq!(
            meta.schema().to_json(),
            r#"{"type":"integer","$comment":"internal","description":"Age in years","deprecated":true}"#
        );
    }

    #[test]
    fn test_validation_passes_through() {
        let meta = Meta::new(int());
        assert!(meta.validate_value(&Value::Int(1)).is_ok());
        assert!(meta.validate_value(&Value::from("1")).is_err());
    }
}
