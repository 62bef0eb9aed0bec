// crates/view/src/params.rs

//! Request-scoped parameter bag.
//!
//! Values are tagged so the resolvers can tell a raw identifier from an
//! already loaded repository object under the same key.

use crate::Error;
use domain::{Content, ContentType, Language, Location};
use forms::ContentForm;
use serde_json::Value as Json;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Language(Language),
    Location(Location),
    ContentType(ContentType),
    Content(Content),
    Form(ContentForm),
    Json(Json),
}

impl ParamValue {
    /// Mirrors "is set": JSON `null` counts as absent.
    pub fn is_set(&self) -> bool {
        !matches!(self, ParamValue::Json(Json::Null))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ParamValue::Str(_) => "string",
            ParamValue::Int(_) => "integer",
            ParamValue::Language(_) => "Language",
            ParamValue::Location(_) => "Location",
            ParamValue::ContentType(_) => "ContentType",
            ParamValue::Content(_) => "Content",
            ParamValue::Form(_) => "Form",
            ParamValue::Json(_) => "json",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            ParamValue::Json(Json::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Integers, numeric strings and JSON numbers.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            ParamValue::Str(s) => s.trim().parse().ok(),
            ParamValue::Json(j) => j.as_i64(),
            _ => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<Language> for ParamValue {
    fn from(v: Language) -> Self {
        ParamValue::Language(v)
    }
}

impl From<Location> for ParamValue {
    fn from(v: Location) -> Self {
        ParamValue::Location(v)
    }
}

impl From<ContentType> for ParamValue {
    fn from(v: ContentType) -> Self {
        ParamValue::ContentType(v)
    }
}

impl From<Content> for ParamValue {
    fn from(v: Content) -> Self {
        ParamValue::Content(v)
    }
}

impl From<ContentForm> for ParamValue {
    fn from(v: ContentForm) -> Self {
        ParamValue::Form(v)
    }
}

impl From<Json> for ParamValue {
    fn from(v: Json) -> Self {
        ParamValue::Json(v)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestParameters(BTreeMap<String, ParamValue>);

impl RequestParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Insert every entry of `other`, replacing existing keys.
    pub fn add<I, K>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, ParamValue)>,
        K: Into<String>,
    {
        for (k, v) in other {
            self.0.insert(k.into(), v);
        }
    }

    /// Only values that are set; see `ParamValue::is_set`.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key).filter(|v| v.is_set())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn form(&self) -> Option<&ContentForm> {
        match self.get("form") {
            Some(ParamValue::Form(f)) => Some(f),
            _ => None,
        }
    }

    /// Required integer attribute.
    pub fn require_int(&self, name: &'static str) -> Result<i64, Error> {
        let value = self.get(name).ok_or(Error::MissingParameter {
            name,
            reason: "request attribute is not set",
        })?;
        value.as_int().ok_or_else(|| {
            Error::invalid_parameter(name, format!("expected an integer, got {}", value.kind()))
        })
    }

    /// Optional integer attribute; present but non-numeric is an error.
    pub fn optional_int(&self, name: &'static str) -> Result<Option<i64>, Error> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.require_int(name).map(Some),
        }
    }

    pub fn require_str(&self, name: &'static str) -> Result<&str, Error> {
        let value = self.get(name).ok_or(Error::MissingParameter {
            name,
            reason: "request attribute is not set",
        })?;
        value.as_str().ok_or_else(|| {
            Error::invalid_parameter(name, format!("expected a string, got {}", value.kind()))
        })
    }
}

impl<K: Into<String>> FromIterator<(K, ParamValue)> for RequestParameters {
    fn from_iter<I: IntoIterator<Item = (K, ParamValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// The incoming request as seen by view building: route attributes and the
/// submitted form input (`null` when nothing was posted).
#[derive(Debug, Clone, Default)]
pub struct ViewRequest {
    pub attributes: RequestParameters,
    pub input: Json,
}

impl ViewRequest {
    pub fn new(attributes: RequestParameters, input: Json) -> Self {
        Self { attributes, input }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_json_is_not_set() {
        let params = RequestParameters::new()
            .with("language", Json::Null)
            .with("languageCode", "eng-GB");
        assert!(!params.contains("language"));
        assert!(params.contains("languageCode"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn int_accepts_numeric_strings_and_json_numbers() {
        assert_eq!(ParamValue::from("42").as_int(), Some(42));
        assert_eq!(ParamValue::from(json!(7)).as_int(), Some(7));
        assert_eq!(ParamValue::from("x2").as_int(), None);
    }

    #[test]
    fn require_int_distinguishes_missing_from_invalid() {
        let params = RequestParameters::new().with("versionNo", "two");
        assert!(matches!(
            params.require_int("contentId"),
            Err(Error::MissingParameter { name: "contentId", .. })
        ));
        assert!(matches!(
            params.require_int("versionNo"),
            Err(Error::InvalidParameter { .. })
        ));
        assert_eq!(params.optional_int("locationId").unwrap(), None);
    }

    #[test]
    fn add_replaces_existing_keys() {
        let mut params = RequestParameters::new().with("a", 1i64);
        params.add([("a", ParamValue::Int(2)), ("b", ParamValue::from("x"))]);
        assert_eq!(params.get("a").and_then(ParamValue::as_int), Some(2));
        assert_eq!(params.require_str("b").unwrap(), "x");
    }
}
