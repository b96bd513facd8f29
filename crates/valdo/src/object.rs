//! Object and map validators
//!
//! Property failures never stop validation of the other properties: every
//! missing, invalid and unexpected property ends up in the same [`Errors`].

use regex::Regex;
use serde_json::{Map, Value as JsonValue};

use crate::config::Extra;
use crate::constraints::{Constraint, Members};
use crate::errors::{BuildError, Error, Errors, ValidationResult};
use crate::json_schema::JsonSchema;
use crate::types::Value;
use crate::validators::Validator;

// ============================================================================
// Property
// ============================================================================

#[derive(Debug, Clone)]
enum PropertyKey {
    Name(String),
    Pattern(Regex),
}

/// A declared object property
#[derive(Debug, Clone)]
pub struct Property {
    key: PropertyKey,
    validator: Validator,
    optional: bool,
    also_require: Vec<String>,
}

impl Property {
    /// A required property with an exact name
    pub fn new(name: impl Into<String>, validator: impl Into<Validator>) -> Self {
        Self {
            key: PropertyKey::Name(name.into()),
            validator: validator.into(),
            optional: false,
            also_require: Vec::new(),
        }
    }

    /// Every key matching the regular expression.
    ///
    /// Pattern properties are always optional.
    pub fn pattern(pattern: &str, validator: impl Into<Validator>) -> Result<Self, BuildError> {
        Ok(Self::pattern_regex(Regex::new(pattern)?, validator))
    }

    pub fn pattern_regex(re: Regex, validator: impl Into<Validator>) -> Self {
        Self {
            key: PropertyKey::Pattern(re),
            validator: validator.into(),
            optional: true,
            also_require: Vec::new(),
        }
    }

    /// Don't report the property when it is missing.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// When this property is present, the given ones must be present too.
    ///
    /// <https://json-schema.org/understanding-json-schema/reference/conditionals#dependentRequired>
    ///
    /// Only applies to properties with an exact name.
    pub fn also_require<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.also_require.extend(names.into_iter().map(Into::into));
        self
    }

    /// The property name, or the expression source for pattern properties
    pub fn name(&self) -> &str {
        match &self.key {
            PropertyKey::Name(name) => name,
            PropertyKey::Pattern(re) => re.as_str(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self.key, PropertyKey::Pattern(_))
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    fn matches(&self, key: &str) -> bool {
        match &self.key {
            PropertyKey::Name(name) => name == key,
            PropertyKey::Pattern(re) => re.is_match(key),
        }
    }
}

fn lookup<'a>(members: &'a Members, name: &str) -> Option<&'a Value> {
    members.iter().find(|(k, _)| k == name).map(|(_, v)| v)
}

// ============================================================================
// Object
// ============================================================================

/// String-keyed mapping with declared properties.
///
/// Undeclared properties are forbidden unless [`ObjectType::allow_extra`] or
/// [`ObjectType::allow_any_extra`] is used.
#[derive(Debug, Clone, Default)]
pub struct ObjectType {
    properties: Vec<Property>,
    constraints: Vec<Constraint<Members>>,
    extra: Extra,
}

impl ObjectType {
    pub fn new(properties: impl IntoIterator<Item = Property>) -> Self {
        Self {
            properties: properties.into_iter().collect(),
            constraints: Vec::new(),
            extra: Extra::Forbid,
        }
    }

    /// Add a constraint: [`crate::min_properties`], [`crate::max_properties`]
    /// or [`crate::property_names`].
    pub fn constrain(mut self, constraint: Constraint<Members>) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Allow undeclared properties, validated by `validator`.
    pub fn allow_extra(mut self, validator: impl Into<Validator>) -> Self {
        self.extra = Extra::Validate(Box::new(validator.into()));
        self
    }

    /// Allow undeclared properties of any value.
    pub fn allow_any_extra(mut self) -> Self {
        self.extra = Extra::Allow;
        self
    }

    pub fn with_extra(mut self, extra: Extra) -> Self {
        self.extra = extra;
        self
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn extra(&self) -> &Extra {
        &self.extra
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        let Value::Object(members) = value else {
            return Err(Error::type_mismatch(value.type_name(), "object"));
        };
        let mut errors = Errors::new();

        for prop in &self.properties {
            match &prop.key {
                PropertyKey::Name(name) => {
                    let Some(item) = lookup(members, name) else {
                        if !prop.optional {
                            errors.add(Error::required(name.as_str()));
                        }
                        continue;
                    };
                    if let Err(err) = prop.validator.validate_value(item) {
                        errors.add(Error::property(name.as_str(), err));
                    }
                    for dep in &prop.also_require {
                        if lookup(members, dep).is_none() {
                            errors.add(Error::required(dep.as_str()));
                        }
                    }
                }
                PropertyKey::Pattern(re) => {
                    for (key, item) in members.iter().filter(|(k, _)| re.is_match(k)) {
                        if let Err(err) = prop.validator.validate_value(item) {
                            errors.add(Error::property(key.as_str(), err));
                        }
                    }
                }
            }
        }

        for constraint in &self.constraints {
            errors.check(constraint.check(members));
        }

        for (key, item) in members {
            if self.properties.iter().any(|p| p.matches(key)) {
                continue;
            }
            match &self.extra {
                Extra::Forbid => errors.add(Error::unexpected(key.as_str())),
                Extra::Allow => {}
                Extra::Validate(validator) => {
                    if let Err(err) = validator.validate_value(item) {
                        errors.add(Error::property(key.as_str(), err));
                    }
                }
            }
        }

        errors.into_result()
    }

    pub fn schema(&self) -> JsonSchema {
        let mut schema = JsonSchema::with_type("object");

        let mut properties = Map::new();
        let mut patterns = Map::new();
        let mut required = Vec::new();
        let mut dependent = Map::new();
        for prop in &self.properties {
            let sub = prop.validator.schema().into_value();
            match &prop.key {
                PropertyKey::Name(name) => {
                    properties.insert(name.clone(), sub);
                    if !prop.optional {
                        required.push(JsonValue::from(name.as_str()));
                    }
                    if !prop.also_require.is_empty() {
                        dependent.insert(name.clone(), JsonValue::from(prop.also_require.clone()));
                    }
                }
                PropertyKey::Pattern(re) => {
                    patterns.insert(re.as_str().to_string(), sub);
                }
            }
        }
        if !properties.is_empty() {
            schema.push("properties", properties);
        }
        if !patterns.is_empty() {
            schema.push("patternProperties", patterns);
        }
        if !required.is_empty() {
            schema.push("required", required);
        }
        if !dependent.is_empty() {
            schema.push("dependentRequired", dependent);
        }

        match &self.extra {
            Extra::Forbid => schema.push("additionalProperties", false),
            Extra::Allow => {}
            Extra::Validate(validator) => {
                let extra = validator.schema();
                if !extra.is_empty() {
                    schema.push("additionalProperties", extra);
                }
            }
        }

        for constraint in &self.constraints {
            schema.push_constraint(constraint);
        }
        schema
    }
}
