//! End-to-end validation tests over JSON input

use serde::Deserialize;
use valdo::*;

fn check(validator: &Validator, input: &str) -> Result<(), Error> {
    match validate(validator, input.as_bytes()) {
        Ok(()) => Ok(()),
        Err(ValidateError::Invalid(err)) => Err(err),
        Err(other) => panic!("unexpected error for {}: {}", input, other),
    }
}

fn kind_of(validator: &Validator, input: &str) -> ErrorKind {
    match check(validator, input) {
        Ok(()) => panic!("expected {} to be invalid", input),
        Err(err) => err.kind(),
    }
}

fn schema_str(validator: &Validator) -> String {
    String::from_utf8(schema(validator)).unwrap()
}

// ============================================================================
// Object Tests
// ============================================================================

fn user() -> Validator {
    object([
        Property::new("name", string().constrain(min_len(2))),
        Property::new("admin", boolean()),
    ])
    .into()
}

#[test]
fn test_object_validate() {
    let v = user();
    assert!(check(&v, r#"{"name": "aragorn", "admin": true}"#).is_ok());
    assert_eq!(kind_of(&v, r#"{"name": "aragorn"}"#), ErrorKind::Required);
    assert_eq!(kind_of(&v, r#"{"name": "", "admin": false}"#), ErrorKind::Property);
    assert_eq!(kind_of(&v, r#"{"name": 123, "admin": false}"#), ErrorKind::Property);
    assert_eq!(kind_of(&v, r#"{"name": "aragorn", "admin": ""}"#), ErrorKind::Property);
    assert_eq!(
        kind_of(&v, r#"{"name": "aragorn", "admin": true, "hi": 1}"#),
        ErrorKind::Unexpected
    );
    for input in [r#"["aragorn"]"#, r#""aragorn""#, "123", "null"] {
        assert_eq!(kind_of(&v, input), ErrorKind::Type, "{}", input);
    }
    assert_eq!(kind_of(&v, "{}"), ErrorKind::Errors);
}

#[test]
fn test_object_property_error_example() {
    let err = check(&user(), r#"{"name":"","admin":false}"#).unwrap_err();
    assert_eq!(
        err,
        Error::property(
            "name",
            Error::MinLen {
                value: 2,
                format: None
            }
        )
    );
}

#[test]
fn test_object_schema() {
    let v: Validator = object([Property::new("name", string())]).into();
    assert_eq!(
        schema_str(&v),
        r#"{"type":"object","properties":{"name":{"type":"string"}},"required":["name"],"additionalProperties":false}"#
    );

    let v: Validator = object([Property::new("name", string().constrain(min_len(2)))]).into();
    assert_eq!(
        schema_str(&v),
        r#"{"type":"object","properties":{"name":{"type":"string","minLength":2}},"required":["name"],"additionalProperties":false}"#
    );

    let v: Validator = object([Property::new("name", string()).optional()]).into();
    assert_eq!(
        schema_str(&v),
        r#"{"type":"object","properties":{"name":{"type":"string"}},"additionalProperties":false}"#
    );
}

#[test]
fn test_nested_error_keeps_every_location() {
    let v: Validator = object([Property::new(
        "users",
        array(object([Property::new("age", int())])),
    )])
    .into();
    let err = check(&v, r#"{"users": [{"age": 1}, {"age": "x"}]}"#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "users: at 1: age: invalid type: got string, expected integer"
    );
}

// ============================================================================
// Array and Tuple Tests
// ============================================================================

#[test]
fn test_array_validate() {
    let v: Validator = array(int().constrain(min(0))).constrain(min_items(1)).into();
    assert!(check(&v, "[1, 3, 4]").is_ok());
    assert_eq!(kind_of(&v, "[1, -3, 4]"), ErrorKind::Index);
    assert_eq!(kind_of(&v, r#"["aragorn"]"#), ErrorKind::Index);
    assert_eq!(kind_of(&v, "[]"), ErrorKind::MinItems);
    for input in [r#""aragorn""#, "123", "null"] {
        assert_eq!(kind_of(&v, input), ErrorKind::Type, "{}", input);
    }
    assert_eq!(
        schema_str(&v),
        r#"{"type":"array","items":{"type":"integer","minimum":0},"minItems":1}"#
    );
}

#[test]
fn test_tuple_validate() {
    let v: Validator = tuple([Validator::from(string()), int().into()]).into();
    assert!(check(&v, r#"["aragorn", 82]"#).is_ok());
    assert_eq!(kind_of(&v, r#"{"name": "aragorn"}"#), ErrorKind::Type);
    assert_eq!(kind_of(&v, "null"), ErrorKind::Type);
    assert_eq!(
        check(&v, r#"["aragorn"]"#).unwrap_err(),
        Error::MinItems {
            value: 2,
            format: None
        }
    );
    assert_eq!(
        check(&v, r#"["aragorn", 82, 42]"#).unwrap_err(),
        Error::MaxItems {
            value: 2,
            format: None
        }
    );
    assert_eq!(kind_of(&v, r#"["aragorn", "82"]"#), ErrorKind::Index);
    assert_eq!(kind_of(&v, "[14, 82]"), ErrorKind::Index);
    assert_eq!(kind_of(&v, r#"[14, "aragorn"]"#), ErrorKind::Index);
    assert_eq!(
        schema_str(&v),
        r#"{"type":"array","items":false,"prefixItems":[{"type":"string"},{"type":"integer"}]}"#
    );
}

// ============================================================================
// Composition Tests
// ============================================================================

#[test]
fn test_all_of() {
    let v = all_of([int().constrain(min(2)), int().constrain(max(4))]);
    for input in ["2", "3", "4"] {
        assert!(check(&v, input).is_ok());
    }
    assert_eq!(kind_of(&v, "1"), ErrorKind::Min);
    assert_eq!(kind_of(&v, "5"), ErrorKind::Max);
    assert_eq!(
        schema_str(&v),
        r#"{"allOf":[{"type":"integer","minimum":2},{"type":"integer","maximum":4}]}"#
    );
}

#[test]
fn test_any_of() {
    let v = any_of([int().constrain(min(5)), int().constrain(max(2))]);
    for input in ["1", "2", "5"] {
        assert!(check(&v, input).is_ok());
    }
    let Error::AnyOf { errors, .. } = check(&v, "3").unwrap_err() else {
        panic!("expected anyOf error");
    };
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.as_slice()[0].kind(), ErrorKind::Min);
    assert_eq!(errors.as_slice()[1].kind(), ErrorKind::Max);
    assert_eq!(
        schema_str(&v),
        r#"{"anyOf":[{"type":"integer","minimum":5},{"type":"integer","maximum":2}]}"#
    );
}

#[test]
fn test_not() {
    let v = not(int().constrain(min(4)));
    for input in ["1", "2", "3"] {
        assert!(check(&v, input).is_ok());
    }
    assert_eq!(kind_of(&v, "4"), ErrorKind::Not);
    assert_eq!(kind_of(&v, "5"), ErrorKind::Not);
    assert_eq!(schema_str(&v), r#"{"not":{"type":"integer","minimum":4}}"#);
}

#[test]
fn test_nullable() {
    let v = nullable(int());
    for input in ["1", "2", "3", "null"] {
        assert!(check(&v, input).is_ok());
    }
    assert_eq!(kind_of(&v, "false"), ErrorKind::AnyOf);
}

// ============================================================================
// Constraint Tests
// ============================================================================

#[test]
fn test_multiple_of() {
    let v: Validator = int().constrain(multiple_of(3).unwrap()).into();
    for input in ["0", "3", "6", "-6"] {
        assert!(check(&v, input).is_ok());
    }
    for input in ["1", "-1", "2", "-2", "10", "-10"] {
        assert_eq!(kind_of(&v, input), ErrorKind::MultipleOf);
    }
    assert_eq!(schema_str(&v), r#"{"type":"integer","multipleOf":3}"#);
}

#[test]
fn test_numeric_bounds() {
    let v: Validator = int().constrain(min(3)).into();
    assert!(check(&v, "3").is_ok());
    assert_eq!(kind_of(&v, "-6"), ErrorKind::Min);
    assert_eq!(schema_str(&v), r#"{"type":"integer","minimum":3}"#);

    let v: Validator = int().constrain(excl_min(3)).into();
    assert!(check(&v, "4").is_ok());
    assert_eq!(kind_of(&v, "3"), ErrorKind::ExclMin);
    assert_eq!(schema_str(&v), r#"{"type":"integer","exclusiveMinimum":3}"#);

    let v: Validator = int().constrain(max(3)).into();
    assert!(check(&v, "-6").is_ok());
    assert_eq!(kind_of(&v, "4"), ErrorKind::Max);
    assert_eq!(schema_str(&v), r#"{"type":"integer","maximum":3}"#);

    let v: Validator = int().constrain(excl_max(3)).into();
    assert!(check(&v, "2").is_ok());
    assert_eq!(kind_of(&v, "3"), ErrorKind::ExclMax);
    assert_eq!(schema_str(&v), r#"{"type":"integer","exclusiveMaximum":3}"#);
}

#[test]
fn test_float_constraints() {
    let v: Validator = float().constrain(excl_min(0.0)).constrain(max(1.5)).into();
    assert!(check(&v, "1").is_ok());
    assert!(check(&v, "0.25").is_ok());
    assert_eq!(kind_of(&v, "0"), ErrorKind::ExclMin);
    assert_eq!(kind_of(&v, "1.75"), ErrorKind::Max);
    assert_eq!(
        schema_str(&v),
        r#"{"type":"number","exclusiveMinimum":0.0,"maximum":1.5}"#
    );
}

#[test]
fn test_float_bound_renders_like_schema() {
    let v: Validator = float().constrain(min(2.0)).into();
    assert_eq!(schema_str(&v), r#"{"type":"number","minimum":2.0}"#);
    assert_eq!(
        check(&v, "1").unwrap_err().to_string(),
        "must be greater than or equal to 2.0"
    );
}

#[test]
fn test_string_length() {
    let v: Validator = string().constrain(min_len(3)).into();
    for input in [r#""hel""#, r#""hello""#, r#""héé""#] {
        assert!(check(&v, input).is_ok());
    }
    for input in [r#""hi""#, r#""!""#, r#""""#] {
        assert_eq!(kind_of(&v, input), ErrorKind::MinLen);
    }
    assert_eq!(schema_str(&v), r#"{"type":"string","minLength":3}"#);

    let v: Validator = string().constrain(max_len(3)).into();
    assert!(check(&v, r#""""#).is_ok());
    assert_eq!(kind_of(&v, r#""hell""#), ErrorKind::MaxLen);
    assert_eq!(schema_str(&v), r#"{"type":"string","maxLength":3}"#);
}

#[test]
fn test_pattern() {
    let v: Validator = string().constrain(pattern("[AB]").unwrap()).into();
    for input in [r#""A""#, r#""B""#, r#""Bxx""#, r#""xxB""#, r#""xxBxx""#] {
        assert!(check(&v, input).is_ok());
    }
    for input in [r#""xxxx""#, r#""hello""#, r#""""#] {
        assert_eq!(kind_of(&v, input), ErrorKind::Pattern);
    }
    assert_eq!(schema_str(&v), r#"{"type":"string","pattern":"[AB]"}"#);
    assert!(pattern("[").is_err());
}

#[test]
fn test_contains() {
    let v: Validator = array(any()).constrain(contains(int())).into();
    for input in ["[1, 2, 3]", r#"["", 2]"#, r#"[2, ""]"#, r#"[2, "", 3]"#] {
        assert!(check(&v, input).is_ok());
    }
    for input in ["[]", r#"[""]"#, r#"["", 2.3]"#, "[true, 2.3]", "[true]"] {
        assert_eq!(kind_of(&v, input), ErrorKind::Contains);
    }
    assert_eq!(schema_str(&v), r#"{"type":"array","contains":{"type":"integer"}}"#);
}

#[test]
fn test_item_counts() {
    let v: Validator = array(any()).constrain(min_items(3)).into();
    assert!(check(&v, "[5, 6, 7]").is_ok());
    assert_eq!(kind_of(&v, "[5, 6]"), ErrorKind::MinItems);
    assert_eq!(schema_str(&v), r#"{"type":"array","minItems":3}"#);

    let v: Validator = array(any()).constrain(max_items(3)).into();
    assert!(check(&v, "[]").is_ok());
    assert_eq!(kind_of(&v, "[5, 6, 7, 8]"), ErrorKind::MaxItems);
    assert_eq!(schema_str(&v), r#"{"type":"array","maxItems":3}"#);
}

#[test]
fn test_property_names() {
    let v: Validator = map(any()).constrain(property_names(max_len(2))).into();
    assert!(check(&v, "{}").is_ok());
    assert!(check(&v, r#"{"hi": 1, "h": 2}"#).is_ok());
    for input in [
        r#"{"hel": 1, "h": 2}"#,
        r#"{"h": 1, "hel": 2}"#,
        r#"{"hello": 1, "h": 2}"#,
        r#"{"hello": 1}"#,
    ] {
        assert_eq!(kind_of(&v, input), ErrorKind::PropertyNames);
    }
    assert_eq!(
        schema_str(&v),
        r#"{"type":"object","propertyNames":{"maxLength":2}}"#
    );
}

#[test]
fn test_property_counts() {
    let v: Validator = map(any()).constrain(min_properties(2)).into();
    assert!(check(&v, r#"{"a": 1, "b": 2}"#).is_ok());
    assert_eq!(kind_of(&v, "{}"), ErrorKind::MinProperties);
    assert_eq!(schema_str(&v), r#"{"type":"object","minProperties":2}"#);

    let v: Validator = map(any()).constrain(max_properties(2)).into();
    assert!(check(&v, "{}").is_ok());
    assert_eq!(kind_of(&v, r#"{"a": 1, "b": 2, "c": 3}"#), ErrorKind::MaxProperties);
    assert_eq!(schema_str(&v), r#"{"type":"object","maxProperties":2}"#);
}

// ============================================================================
// Const and Enum Tests
// ============================================================================

#[test]
fn test_const() {
    let v: Validator = string_const("admin").into();
    assert!(check(&v, r#""admin""#).is_ok());
    let err = check(&v, r#""user""#).unwrap_err();
    assert_eq!(err.to_string(), r#"must be equal to "admin""#);
    assert_eq!(schema_str(&v), r#"{"const":"admin"}"#);

    let v: Validator = bool_const(true).into();
    assert_eq!(kind_of(&v, "false"), ErrorKind::Const);
    assert_eq!(kind_of(&v, "1"), ErrorKind::Type);

    let v: Validator = int_const(13).into();
    assert!(check(&v, "13").is_ok());
    assert!(check(&v, "13.0").is_ok());
    assert_eq!(kind_of(&v, "14"), ErrorKind::Const);
}

#[test]
fn test_enum() {
    let v: Validator = enum_of(["red", "green", "blue"]).into();
    assert!(check(&v, r#""green""#).is_ok());
    assert_eq!(kind_of(&v, r#""pink""#), ErrorKind::Enum);
    assert_eq!(kind_of(&v, "1"), ErrorKind::Type);
    assert_eq!(schema_str(&v), r#"{"enum":["red","green","blue"]}"#);
}

// ============================================================================
// Localization Tests
// ============================================================================

fn russian() -> Locales {
    Locales::new().with(
        "ru-RU",
        Locale::new().with(ErrorKind::Min, "значение должно быть не меньше {value}"),
    )
}

#[test]
fn test_translate_supported_language() {
    let original: Validator = int().constrain(min(2)).constrain(max(8)).into();
    let v = russian().wrap("ru-RU", original.clone());
    assert!(check(&v, "4").is_ok());
    assert_eq!(
        check(&v, "1").unwrap_err().to_string(),
        "значение должно быть не меньше 2"
    );
    assert_eq!(
        check(&v, "10").unwrap_err().to_string(),
        "must be less than or equal to 8"
    );
    assert_eq!(schema(&v), schema(&original));
}

#[test]
fn test_translate_unknown_language() {
    let original: Validator = int().constrain(min(2)).constrain(max(8)).into();
    let v = russian().wrap("nl-BE", original.clone());
    assert_eq!(
        check(&v, "1").unwrap_err().to_string(),
        "must be greater than or equal to 2"
    );
    assert_eq!(schema(&v), schema(&original));
}

#[test]
fn test_default_locales() {
    let v = default_locales().wrap("nl", int());
    let err = validate(&v, br#""hi""#).unwrap_err();
    assert_eq!(err.to_string(), "ongeldig type: kreeg string, verwachtte integer");
}

#[test]
fn test_translate_nested_chain() {
    let locale = Locale::new().with(ErrorKind::Type, "ongeldig type: kreeg {got}, verwachtte {expected}");
    let original: Validator = object([Property::new("xs", array(int()))]).into();
    let v = Locales::new().with("nl", locale).wrap("nl", original.clone());
    let input = r#"{"xs": [1, "a"]}"#;

    let translated = check(&v, input).unwrap_err();
    let plain = check(&original, input).unwrap_err();
    assert_eq!(translated.kind(), ErrorKind::Property);
    assert_eq!(translated.children()[0].kind(), ErrorKind::Index);
    assert_eq!(translated.default_shape(), plain.default_shape());
    assert_eq!(
        translated.to_string(),
        "xs: at 1: ongeldig type: kreeg string, verwachtte integer"
    );
}

#[test]
fn test_translate_any_of_children() {
    let v = default_locales().wrap(
        "de-DE",
        any_of([int().constrain(min(5)), int().constrain(max(2))]),
    );
    let err = check(&v, "3").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AnyOf);
    assert_eq!(err.children().len(), 2);
    assert_eq!(
        err.to_string(),
        "muss mindestens einem Schema entsprechen: muss größer oder gleich 5 sein; muss kleiner oder gleich 2 sein"
    );
}

#[test]
fn test_translate_multiple_errors() {
    let original: Validator = object([
        Property::new("a", int()),
        Property::new("b", string()),
    ])
    .into();
    let locale = Locale::new()
        .with(ErrorKind::Errors, " | ")
        .with(ErrorKind::Required, "{name} fehlt");

    let err = check(&locale.wrap(original.clone()), "{}").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Errors);
    assert_eq!(err.children().len(), 2);
    assert!(err.children().iter().all(|e| e.kind() == ErrorKind::Required));
    assert_eq!(err.to_string(), "a fehlt | b fehlt");

    let separator_only = Locale::new().with(ErrorKind::Errors, " | ");
    assert_eq!(
        check(&separator_only.wrap(original), "{}").unwrap_err().to_string(),
        "a is required but not found | b is required but not found"
    );
}

// ============================================================================
// Entry Point Tests
// ============================================================================

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    name: String,
    admin: bool,
}

#[test]
fn test_unmarshal() {
    let v = user();
    let parsed: User = unmarshal(&v, br#"{"name": "aragorn", "admin": true}"#).unwrap();
    assert_eq!(
        parsed,
        User {
            name: "aragorn".into(),
            admin: true
        }
    );
    let err = unmarshal::<User>(&v, br#"{"name": "a", "admin": true}"#).unwrap_err();
    assert!(err.as_invalid().is_some());
}

#[test]
fn test_integer_above_i64_range() {
    let huge = "18446744073709551615";
    let err = check(&int().into(), huge).unwrap_err();
    assert_eq!(err, Error::type_mismatch("unsigned integer", "integer"));
    assert_eq!(err.to_string(), "invalid type: got unsigned integer, expected integer");
    assert!(check(&float().into(), huge).is_ok());
    assert!(check(&float().constrain(max(2e19)).into(), huge).is_ok());
}

#[test]
fn test_no_input() {
    let err = validate(&user(), b"").unwrap_err();
    assert_eq!(err.as_invalid().map(Error::kind), Some(ErrorKind::NoInput));
}

#[test]
fn test_unmarshal_with_config() {
    let config = ValidationConfig::new().max_input_len(8);
    let err = unmarshal_with_config::<User>(&user(), br#"{"name": "aragorn", "admin": true}"#, &config)
        .unwrap_err();
    assert!(matches!(err, ValidateError::InputTooLarge { max: 8, .. }));
}

#[test]
fn test_schema_examples() {
    assert_eq!(schema_str(&int().into()), r#"{"type":"integer"}"#);
    assert_eq!(schema_str(&any()), "{}");
    let v: Validator = tuple([string()]).allow_extra(int()).into();
    assert_eq!(
        schema_str(&v),
        r#"{"type":"array","items":{"type":"integer"},"prefixItems":[{"type":"string"}]}"#
    );
}

// ============================================================================
// Property Tests
// ============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Values satisfying every constraint are accepted.
        #[test]
        fn primitive_accepts_valid_values(lo in -1000i64..0, hi in 0i64..1000, n in -1000i64..1000) {
            let v: Validator = int().constrain(min(lo)).constrain(max(hi)).into();
            let n = n.clamp(lo, hi);
            prop_assert!(check(&v, &n.to_string()).is_ok());
        }

        /// Every violated constraint of a primitive is reported.
        #[test]
        fn primitive_accumulates(n in -1000i64..1000) {
            let v: Validator = int().constrain(min(n + 1)).constrain(max(n - 1)).into();
            let err = check(&v, &n.to_string()).unwrap_err();
            let Error::Multiple(errors) = err else {
                return Err(TestCaseError::fail("expected several errors"));
            };
            prop_assert_eq!(errors.len(), 2);
            prop_assert_eq!(errors.as_slice()[0].kind(), ErrorKind::Min);
            prop_assert_eq!(errors.as_slice()[1].kind(), ErrorKind::Max);
        }

        /// Only the first invalid element is reported, with its index.
        #[test]
        fn array_reports_first_invalid_index(
            valid in prop::collection::vec(0i64..100, 0..10),
            tail in prop::collection::vec(-100i64..0, 1..5),
        ) {
            let v: Validator = array(int().constrain(min(0))).into();
            let items: Vec<i64> = valid.iter().chain(tail.iter()).copied().collect();
            let input = serde_json::to_string(&items).unwrap();
            let err = check(&v, &input).unwrap_err();
            let Error::Index { index, .. } = err else {
                return Err(TestCaseError::fail("expected index error"));
            };
            prop_assert_eq!(index, valid.len());
        }

        /// Each missing required property gets its own error.
        #[test]
        fn missing_properties_all_reported(names in prop::collection::btree_set("[a-z]{1,8}", 1..6)) {
            let v: Validator = object(names.iter().map(|n| Property::new(n.as_str(), Validator::Any))).into();
            let err = check(&v, "{}").unwrap_err();
            let reported: Vec<Error> = match err {
                Error::Multiple(errors) => errors.errors,
                single => vec![single],
            };
            let expected: Vec<Error> = names.iter().map(|n| Error::required(n.as_str())).collect();
            prop_assert_eq!(reported, expected);
        }

        /// Schema output does not change between calls.
        #[test]
        fn schema_is_deterministic(names in prop::collection::vec("[a-z]{1,8}", 0..6), n in 0usize..10) {
            let v: Validator = object(names.iter().map(|k| {
                Property::new(k.as_str(), string().constrain(min_len(n)))
            }))
            .constrain(max_properties(n))
            .into();
            prop_assert_eq!(schema(&v), schema(&v));
        }

        /// Wrapping twice with the same locale renders like wrapping once.
        #[test]
        fn localization_is_idempotent(n in -100i64..100) {
            let locale = Locale::new()
                .with(ErrorKind::Min, "minstens {value}")
                .with(ErrorKind::Index, "op {index}: {error}");
            let original: Validator = array(int().constrain(min(0))).into();
            let once = locale.wrap(original.clone());
            let twice = locale.wrap(locale.wrap(original));
            let input = format!("[{}]", n);
            let a = check(&once, &input).map_err(|e| e.to_string());
            let b = check(&twice, &input).map_err(|e| e.to_string());
            prop_assert_eq!(a, b);
        }
    }
}
