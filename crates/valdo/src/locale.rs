//! Translation of error messages
//!
//! A [`Locale`] maps an [`ErrorKind`] to a message template. Wrapping a
//! validator with a locale rewrites the templates of every error in the tree
//! the validator returns; the errors themselves (and the schema) stay the same.
//!
//! ```
//! use valdo::{int, validate, ErrorKind, Locale};
//!
//! let locale = Locale::new().with(ErrorKind::Type, "ongeldig type: kreeg {got}, verwachtte {expected}");
//! let validator = locale.wrap(int());
//! let err = validate(&validator, br#""hi""#).unwrap_err();
//! assert_eq!(err.to_string(), "ongeldig type: kreeg string, verwachtte integer");
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::errors::{Error, ErrorKind, ValidationResult};
use crate::json_schema::JsonSchema;
use crate::types::Value;
use crate::validators::Validator;

// ============================================================================
// Locale
// ============================================================================

/// Message templates for one language
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locale {
    templates: HashMap<ErrorKind, String>,
}

impl Locale {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template for a kind of error. Accepts an [`ErrorKind`] or an
    /// [`Error`] of the same shape.
    pub fn insert(&mut self, kind: impl Into<ErrorKind>, template: impl Into<String>) {
        self.templates.insert(kind.into(), template.into());
    }

    pub fn with(mut self, kind: impl Into<ErrorKind>, template: impl Into<String>) -> Self {
        self.insert(kind, template);
        self
    }

    pub fn template(&self, kind: ErrorKind) -> Option<&str> {
        self.templates.get(&kind).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Wrap the validator so its errors use this locale
    pub fn wrap(&self, validator: impl Into<Validator>) -> Validator {
        Validator::Localized(Localized::new(Arc::new(self.clone()), validator))
    }

    /// Rewrite the templates of the error tree.
    ///
    /// Children are translated before their parent, and the lookup uses the
    /// original kind of each node.
    pub fn translate(&self, err: Error) -> Error {
        let err = err.map(|child| self.translate(child));
        match self.template(err.kind()) {
            Some(template) => {
                trace!(kind = %err.kind(), "translating error");
                err.with_format(template)
            }
            None => err,
        }
    }
}

impl<K, S> FromIterator<(K, S)> for Locale
where
    K: Into<ErrorKind>,
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let mut locale = Locale::new();
        for (kind, template) in iter {
            locale.insert(kind, template);
        }
        locale
    }
}

// ============================================================================
// Localized validator
// ============================================================================

/// Validator whose errors are translated with a [`Locale`]
#[derive(Debug, Clone)]
pub struct Localized {
    validator: Box<Validator>,
    locale: Arc<Locale>,
}

impl Localized {
    pub fn new(locale: Arc<Locale>, validator: impl Into<Validator>) -> Self {
        Self {
            validator: Box::new(validator.into()),
            locale,
        }
    }

    pub fn inner(&self) -> &Validator {
        &self.validator
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        self.validator
            .validate_value(value)
            .map_err(|err| self.locale.translate(err))
    }

    pub fn schema(&self) -> JsonSchema {
        self.validator.schema()
    }
}

// ============================================================================
// Locales
// ============================================================================

/// Locales by language tag
#[derive(Debug, Clone, Default)]
pub struct Locales {
    locales: HashMap<String, Arc<Locale>>,
}

/// Primary subtag of a language tag: `nl` for `nl-BE` or `nl_BE`
fn primary_subtag(lang: &str) -> Option<&str> {
    lang.split_once(|c: char| c == '-' || c == '_')
        .map(|(primary, _)| primary)
}

impl Locales {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lang: impl Into<String>, locale: Locale) {
        self.locales.insert(lang.into(), Arc::new(locale));
    }

    pub fn with(mut self, lang: impl Into<String>, locale: Locale) -> Self {
        self.insert(lang, locale);
        self
    }

    /// Locale for the language tag, falling back to its primary subtag
    pub fn get(&self, lang: &str) -> Option<&Locale> {
        self.resolve(lang).map(|(_, locale)| &**locale)
    }

    fn resolve(&self, lang: &str) -> Option<(&str, &Arc<Locale>)> {
        if let Some((tag, locale)) = self.locales.get_key_value(lang) {
            return Some((tag.as_str(), locale));
        }
        let primary = primary_subtag(lang)?;
        self.locales
            .get_key_value(primary)
            .map(|(tag, locale)| (tag.as_str(), locale))
    }

    /// Wrap the validator with the locale for `lang`.
    ///
    /// If there is no locale for the language, the validator is returned as is.
    pub fn wrap(&self, lang: &str, validator: impl Into<Validator>) -> Validator {
        let validator = validator.into();
        match self.resolve(lang) {
            Some((tag, locale)) => {
                debug!(lang, resolved = tag, "localizing validator");
                Validator::Localized(Localized::new(Arc::clone(locale), validator))
            }
            None => {
                debug!(lang, "no locale for language");
                validator
            }
        }
    }
}

// ============================================================================
// Built-in locales
// ============================================================================

const DUTCH: &[(ErrorKind, &str)] = &[
    (ErrorKind::Type, "ongeldig type: kreeg {got}, verwachtte {expected}"),
    (ErrorKind::Required, "{name} is verplicht maar niet gevonden"),
    (ErrorKind::Unexpected, "onverwachte eigenschap: {name}"),
    (ErrorKind::Index, "op {index}: {error}"),
    (ErrorKind::Contains, "ten minste één item {error}"),
    (ErrorKind::PropertyNames, "eigenschapsnaam {name} {error}"),
    (ErrorKind::Not, "mag niet overeenkomen met het schema"),
    (ErrorKind::AnyOf, "moet overeenkomen met ten minste één schema: {error}"),
    (ErrorKind::MultipleOf, "moet een veelvoud zijn van {value}"),
    (ErrorKind::Min, "moet groter dan of gelijk aan {value} zijn"),
    (ErrorKind::ExclMin, "moet groter dan {value} zijn"),
    (ErrorKind::Max, "moet kleiner dan of gelijk aan {value} zijn"),
    (ErrorKind::ExclMax, "moet kleiner dan {value} zijn"),
    (ErrorKind::MinLen, "moet ten minste {value} tekens lang zijn"),
    (ErrorKind::MaxLen, "mag ten hoogste {value} tekens lang zijn"),
    (ErrorKind::Pattern, "moet overeenkomen met het patroon"),
    (ErrorKind::MinItems, "moet ten minste {value} items bevatten"),
    (ErrorKind::MaxItems, "mag ten hoogste {value} items bevatten"),
    (ErrorKind::MinProperties, "moet ten minste {value} eigenschappen hebben"),
    (ErrorKind::MaxProperties, "mag ten hoogste {value} eigenschappen hebben"),
    (ErrorKind::Const, "moet gelijk zijn aan {expected}"),
    (ErrorKind::Enum, "moet een van de volgende zijn: {expected}"),
    (ErrorKind::NoInput, "geen invoer opgegeven"),
];

const GERMAN: &[(ErrorKind, &str)] = &[
    (ErrorKind::Type, "ungültiger Typ: {got} erhalten, {expected} erwartet"),
    (ErrorKind::Required, "{name} ist erforderlich, wurde aber nicht gefunden"),
    (ErrorKind::Unexpected, "unerwartete Eigenschaft: {name}"),
    (ErrorKind::Index, "bei {index}: {error}"),
    (ErrorKind::Contains, "mindestens ein Element {error}"),
    (ErrorKind::PropertyNames, "Eigenschaftsname {name} {error}"),
    (ErrorKind::Not, "darf nicht dem Schema entsprechen"),
    (ErrorKind::AnyOf, "muss mindestens einem Schema entsprechen: {error}"),
    (ErrorKind::MultipleOf, "muss ein Vielfaches von {value} sein"),
    (ErrorKind::Min, "muss größer oder gleich {value} sein"),
    (ErrorKind::ExclMin, "muss größer als {value} sein"),
    (ErrorKind::Max, "muss kleiner oder gleich {value} sein"),
    (ErrorKind::ExclMax, "muss kleiner als {value} sein"),
    (ErrorKind::MinLen, "muss mindestens {value} Zeichen lang sein"),
    (ErrorKind::MaxLen, "darf höchstens {value} Zeichen lang sein"),
    (ErrorKind::Pattern, "muss dem Muster entsprechen"),
    (ErrorKind::MinItems, "muss mindestens {value} Elemente enthalten"),
    (ErrorKind::MaxItems, "darf höchstens {value} Elemente enthalten"),
    (ErrorKind::MinProperties, "muss mindestens {value} Eigenschaften haben"),
    (ErrorKind::MaxProperties, "darf höchstens {value} Eigenschaften haben"),
    (ErrorKind::Const, "muss gleich {expected} sein"),
    (ErrorKind::Enum, "muss einer der folgenden Werte sein: {expected}"),
    (ErrorKind::NoInput, "keine Eingabe angegeben"),
];

const RUSSIAN: &[(ErrorKind, &str)] = &[
    (ErrorKind::Type, "неверный тип: получено {got}, ожидалось {expected}"),
    (ErrorKind::Required, "{name} обязательно, но не найдено"),
    (ErrorKind::Unexpected, "неожиданное свойство: {name}"),
    (ErrorKind::Index, "в позиции {index}: {error}"),
    (ErrorKind::Contains, "хотя бы один элемент {error}"),
    (ErrorKind::PropertyNames, "имя свойства {name} {error}"),
    (ErrorKind::Not, "не должно соответствовать схеме"),
    (ErrorKind::AnyOf, "должно соответствовать хотя бы одной схеме: {error}"),
    (ErrorKind::MultipleOf, "значение должно быть кратно {value}"),
    (ErrorKind::Min, "значение должно быть не меньше {value}"),
    (ErrorKind::ExclMin, "значение должно быть больше {value}"),
    (ErrorKind::Max, "значение должно быть не больше {value}"),
    (ErrorKind::ExclMax, "значение должно быть меньше {value}"),
    (ErrorKind::MinLen, "длина должна быть не меньше {value} символов"),
    (ErrorKind::MaxLen, "длина должна быть не больше {value} символов"),
    (ErrorKind::Pattern, "должно соответствовать шаблону"),
    (ErrorKind::MinItems, "должно содержать не меньше {value} элементов"),
    (ErrorKind::MaxItems, "должно содержать не больше {value} элементов"),
    (ErrorKind::MinProperties, "должно иметь не меньше {value} свойств"),
    (ErrorKind::MaxProperties, "должно иметь не больше {value} свойств"),
    (ErrorKind::Const, "должно быть равно {expected}"),
    (ErrorKind::Enum, "должно быть одним из: {expected}"),
    (ErrorKind::NoInput, "входные данные отсутствуют"),
];

static DEFAULT_LOCALES: Lazy<Locales> = Lazy::new(|| {
    Locales::new()
        .with("nl", DUTCH.iter().copied().collect())
        .with("de", GERMAN.iter().copied().collect())
        .with("ru", RUSSIAN.iter().copied().collect())
});

/// Built-in translations: Dutch (`nl`), German (`de`) and Russian (`ru`)
pub fn default_locales() -> &'static Locales {
    &DEFAULT_LOCALES
}
