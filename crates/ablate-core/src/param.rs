//! Typed parameters, the pure [`decode`] function, and the [`ParameterStore`].
//!
//! Parameters arrive as raw text with an optional type tag. The tag is kept
//! verbatim for the output document and decides how the text is decoded on
//! each read. Stores are populated at load time and never mutated during
//! compilation.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

use crate::error::ParameterError;
use crate::geometry::Vec3;

// ── TypeTag ────────────────────────────────────────────────────────

/// Declared type of a raw parameter value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// `float`: decoded as an `f64`.
    Float,
    /// `integer`: decoded as an `i64`.
    Integer,
    /// `boolean`: `true`/`false` (case-insensitive) or `1`/`0`.
    Boolean,
    /// `string`: passed through verbatim, never parsed as JSON.
    String,
    /// `array(<elem>)`: a JSON array. The element tag is kept verbatim.
    Array(String),
    /// Any other tag. Preserved for output, decoded like an untagged value.
    Other(String),
}

impl TypeTag {
    /// Parse a tag as written in the input description.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "float" => Self::Float,
            "integer" => Self::Integer,
            "boolean" => Self::Boolean,
            "string" => Self::String,
            _ => match tag
                .strip_prefix("array(")
                .and_then(|rest| rest.strip_suffix(')'))
            {
                Some(elem) => Self::Array(elem.to_owned()),
                None => Self::Other(tag.to_owned()),
            },
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float => f.write_str("float"),
            Self::Integer => f.write_str("integer"),
            Self::Boolean => f.write_str("boolean"),
            Self::String => f.write_str("string"),
            Self::Array(elem) => write!(f, "array({elem})"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}

// ── RawValue / Parameter ───────────────────────────────────────────

/// Raw parameter text, with or without a type tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    /// Untagged text. Decoding is pass-through, or opportunistic JSON
    /// under [`DecodeMode::Structured`].
    Raw(String),
    /// Text whose decoding is fixed by `tag`.
    Typed {
        /// The declared type.
        tag: TypeTag,
        /// The raw text.
        text: String,
    },
}

impl RawValue {
    /// Build a raw value from text and an optional tag string.
    pub fn new(text: impl Into<String>, tag: Option<&str>) -> Self {
        let text = text.into();
        match tag {
            Some(tag) => Self::Typed {
                tag: TypeTag::parse(tag),
                text,
            },
            None => Self::Raw(text),
        }
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        match self {
            Self::Raw(text) | Self::Typed { text, .. } => text,
        }
    }

    /// The type tag, if one was declared.
    pub fn tag(&self) -> Option<&TypeTag> {
        match self {
            Self::Raw(_) => None,
            Self::Typed { tag, .. } => Some(tag),
        }
    }

    /// Decode this value. See [`decode`].
    pub fn decode(&self, mode: DecodeMode) -> Result<Option<ParamValue>, DecodeError> {
        decode(self.tag(), self.text(), mode)
    }
}

/// A keyed raw parameter, as yielded by [`ParameterStore::iter`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameter<'a> {
    /// Parameter key.
    pub key: &'a str,
    /// Raw value and tag.
    pub value: &'a RawValue,
}

// ── ParamValue ─────────────────────────────────────────────────────

/// A decoded parameter value.
///
/// Serializes as plain JSON (`1.0`, `true`, `"text"`, `[1.0, 2.0]`), which
/// is how values appear in the constants section.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// JSON `null` nested inside a list or map.
    Null,
    /// A boolean.
    Boolean(bool),
    /// An integer.
    Integer(i64),
    /// A floating-point number.
    Float(f64),
    /// Text.
    Text(String),
    /// An ordered list.
    List(Vec<ParamValue>),
    /// A string-keyed map.
    Map(IndexMap<String, ParamValue>),
}

impl ParamValue {
    fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Numeric view: integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean view. Only [`ParamValue::Boolean`] qualifies.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Text view. Only [`ParamValue::Text`] qualifies.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// List view.
    pub fn as_list(&self) -> Option<&[ParamValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// A list of exactly three numbers, read as a coordinate.
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self.as_list()? {
            [x, y, z] => Some(Vec3::new(x.as_f64()?, y.as_f64()?, z.as_f64()?)),
            _ => None,
        }
    }

    /// Truthiness: `false`, zero, empty text and empty collections are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Boolean(b) => *b,
            Self::Integer(i) => *i != 0,
            Self::Float(v) => *v != 0.0,
            Self::Text(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Map(map) => !map.is_empty(),
        }
    }
}

/// Attribute rendering: text verbatim, scalars in their shortest form,
/// collections as JSON.
impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Text(s) => f.write_str(s),
            Self::List(_) | Self::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Render a float so that integral values keep a trailing `.0`.
pub fn format_float(v: f64) -> String {
    format!("{v:?}")
}

// ── decode ─────────────────────────────────────────────────────────

/// How untagged values are decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DecodeMode {
    /// Try to parse untagged text as JSON, falling back to text.
    #[default]
    Structured,
    /// Untagged text is returned verbatim.
    Declared,
}

/// A raw value that does not match its type tag.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot decode {raw:?} as {tag}: {reason}")]
pub struct DecodeError {
    /// The tag the text was decoded against.
    pub tag: String,
    /// The offending text.
    pub raw: String,
    /// Why decoding failed.
    pub reason: String,
}

impl DecodeError {
    fn new(tag: &TypeTag, raw: &str, reason: impl fmt::Display) -> Self {
        Self {
            tag: tag.to_string(),
            raw: raw.to_owned(),
            reason: reason.to_string(),
        }
    }

    /// Attach the parameter key this error came from.
    pub fn for_key(self, key: &str) -> ParameterError {
        ParameterError::Malformed {
            key: key.to_owned(),
            tag: self.tag,
            raw: self.raw,
            reason: self.reason,
        }
    }
}

/// Decode raw parameter text according to its type tag.
///
/// Pure. Returns `Ok(None)` when the text decodes to JSON `null`, which
/// callers treat like an absent parameter.
pub fn decode(
    tag: Option<&TypeTag>,
    text: &str,
    mode: DecodeMode,
) -> Result<Option<ParamValue>, DecodeError> {
    match tag {
        Some(t @ TypeTag::Float) => text
            .trim()
            .parse::<f64>()
            .map(|v| Some(ParamValue::Float(v)))
            .map_err(|e| DecodeError::new(t, text, e)),
        Some(t @ TypeTag::Integer) => text
            .trim()
            .parse::<i64>()
            .map(|v| Some(ParamValue::Integer(v)))
            .map_err(|e| DecodeError::new(t, text, e)),
        Some(t @ TypeTag::Boolean) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(Some(ParamValue::Boolean(true))),
            "false" | "0" => Ok(Some(ParamValue::Boolean(false))),
            _ => Err(DecodeError::new(t, text, "expected true or false")),
        },
        Some(TypeTag::String) => Ok(Some(ParamValue::Text(text.to_owned()))),
        Some(t @ TypeTag::Array(_)) => {
            match serde_json::from_str::<serde_json::Value>(text) {
                Ok(serde_json::Value::Null) => Ok(None),
                Ok(v @ serde_json::Value::Array(_)) => Ok(Some(ParamValue::from_json(v))),
                Ok(_) => Err(DecodeError::new(t, text, "expected a JSON array")),
                Err(e) => Err(DecodeError::new(t, text, e)),
            }
        }
        Some(TypeTag::Other(_)) | None => match mode {
            DecodeMode::Declared => Ok(Some(ParamValue::Text(text.to_owned()))),
            DecodeMode::Structured => match serde_json::from_str::<serde_json::Value>(text) {
                Ok(serde_json::Value::Null) => Ok(None),
                Ok(v) => Ok(Some(ParamValue::from_json(v))),
                Err(_) => Ok(Some(ParamValue::Text(text.to_owned()))),
            },
        },
    }
}

// ── ParameterStore ─────────────────────────────────────────────────

/// Insertion-ordered map of parameter key to raw value.
///
/// Lookups decode on demand; a miss is `Ok(None)`, never an error.
/// Iteration order is insertion order, which the constants section
/// depends on for reproducible output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterStore {
    entries: IndexMap<String, RawValue>,
}

impl ParameterStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the previous value under the same key.
    ///
    /// A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) -> Option<RawValue> {
        self.entries.insert(key.into(), value)
    }

    /// Decode `key` with [`DecodeMode::Structured`].
    pub fn get(&self, key: &str) -> Result<Option<ParamValue>, ParameterError> {
        self.get_with(key, DecodeMode::Structured)
    }

    /// Decode `key` with an explicit mode.
    pub fn get_with(
        &self,
        key: &str,
        mode: DecodeMode,
    ) -> Result<Option<ParamValue>, ParameterError> {
        match self.entries.get(key) {
            Some(raw) => raw.decode(mode).map_err(|e| e.for_key(key)),
            None => Ok(None),
        }
    }

    /// Decode `key` as a number.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>, ParameterError> {
        self.get(key)?
            .map(|v| v.as_f64().ok_or_else(|| wrong_shape(key, "a number")))
            .transpose()
    }

    /// Decode `key` as a boolean.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ParameterError> {
        self.get(key)?
            .map(|v| v.as_bool().ok_or_else(|| wrong_shape(key, "a boolean")))
            .transpose()
    }

    /// Decode `key` as a three-component coordinate.
    pub fn get_vec3(&self, key: &str) -> Result<Option<Vec3>, ParameterError> {
        self.get(key)?
            .map(|v| {
                v.as_vec3()
                    .ok_or_else(|| wrong_shape(key, "a list of three numbers"))
            })
            .transpose()
    }

    /// Whether `key` is present and truthy. Absent keys are false.
    pub fn is_truthy(&self, key: &str) -> Result<bool, ParameterError> {
        Ok(self.get(key)?.is_some_and(|v| v.is_truthy()))
    }

    /// Raw access without decoding.
    pub fn raw(&self, key: &str) -> Option<&RawValue> {
        self.entries.get(key)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Parameter<'_>> {
        self.entries
            .iter()
            .map(|(key, value)| Parameter { key, value })
    }
}

impl<K: Into<String>> FromIterator<(K, RawValue)> for ParameterStore {
    fn from_iter<I: IntoIterator<Item = (K, RawValue)>>(iter: I) -> Self {
        let mut store = Self::new();
        for (key, value) in iter {
            store.insert(key, value);
        }
        store
    }
}

fn wrong_shape(key: &str, expected: &'static str) -> ParameterError {
    ParameterError::WrongShape {
        key: key.to_owned(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn typed(tag: &str, text: &str) -> RawValue {
        RawValue::new(text, Some(tag))
    }

    #[test]
    fn tag_parse_display_preserves_text() {
        for tag in ["float", "integer", "boolean", "string", "array(float)", "vector"] {
            assert_eq!(TypeTag::parse(tag).to_string(), tag);
        }
        assert_eq!(TypeTag::parse("array(float)"), TypeTag::Array("float".into()));
        assert_eq!(TypeTag::parse("vector"), TypeTag::Other("vector".into()));
    }

    #[test]
    fn float_tag_decodes_number() {
        let v = typed("float", " 2.5 ").decode(DecodeMode::Structured).unwrap();
        assert_eq!(v, Some(ParamValue::Float(2.5)));
    }

    #[test]
    fn float_tag_rejects_text() {
        let err = typed("float", "abc").decode(DecodeMode::Structured).unwrap_err();
        assert_eq!(err.tag, "float");
        assert_eq!(err.raw, "abc");
    }

    #[test]
    fn boolean_tag_accepts_common_spellings() {
        for (text, expected) in [("True", true), ("false", false), ("1", true), ("0", false)] {
            let v = typed("boolean", text).decode(DecodeMode::Structured).unwrap();
            assert_eq!(v, Some(ParamValue::Boolean(expected)));
        }
        assert!(typed("boolean", "maybe")
            .decode(DecodeMode::Structured)
            .is_err());
    }

    #[test]
    fn string_tag_never_parses_json() {
        let v = typed("string", "[1, 2]").decode(DecodeMode::Structured).unwrap();
        assert_eq!(v, Some(ParamValue::Text("[1, 2]".into())));
    }

    #[test]
    fn array_tag_requires_json_array() {
        let v = typed("array(float)", "[1.0, 2, 3.5]")
            .decode(DecodeMode::Structured)
            .unwrap()
            .unwrap();
        assert_eq!(v.as_vec3(), Some(Vec3::new(1.0, 2.0, 3.5)));
        assert!(typed("array(float)", "{\"a\": 1}")
            .decode(DecodeMode::Structured)
            .is_err());
    }

    #[test]
    fn untagged_structured_parses_json_or_falls_back() {
        let raw = RawValue::Raw("[1, 2]".into());
        assert!(matches!(
            raw.decode(DecodeMode::Structured).unwrap(),
            Some(ParamValue::List(_))
        ));
        let raw = RawValue::Raw("centroid-of-tips".into());
        assert_eq!(
            raw.decode(DecodeMode::Structured).unwrap(),
            Some(ParamValue::Text("centroid-of-tips".into()))
        );
    }

    #[test]
    fn untagged_declared_is_verbatim() {
        let raw = RawValue::Raw("\"temperature\"".into());
        assert_eq!(
            raw.decode(DecodeMode::Declared).unwrap(),
            Some(ParamValue::Text("\"temperature\"".into()))
        );
    }

    #[test]
    fn json_null_is_absent() {
        let raw = RawValue::Raw("null".into());
        assert_eq!(raw.decode(DecodeMode::Structured).unwrap(), None);
    }

    #[test]
    fn store_miss_is_not_an_error() {
        let store = ParameterStore::new();
        assert_eq!(store.get("MISSING").unwrap(), None);
        assert_eq!(store.get_f64("MISSING").unwrap(), None);
        assert!(!store.is_truthy("MISSING").unwrap());
    }

    #[test]
    fn store_malformed_carries_key() {
        let store: ParameterStore = [("RADIUS", typed("float", "wide"))].into_iter().collect();
        match store.get("RADIUS") {
            Err(ParameterError::Malformed { key, .. }) => assert_eq!(key, "RADIUS"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn store_wrong_shape() {
        let store: ParameterStore = [("TIP", typed("array(float)", "[1, 2]"))]
            .into_iter()
            .collect();
        assert_eq!(
            store.get_vec3("TIP"),
            Err(ParameterError::WrongShape {
                key: "TIP".into(),
                expected: "a list of three numbers",
            })
        );
    }

    #[test]
    fn store_preserves_insertion_order() {
        let store: ParameterStore = [
            ("Z", RawValue::Raw("1".into())),
            ("A", RawValue::Raw("2".into())),
            ("M", RawValue::Raw("3".into())),
        ]
        .into_iter()
        .collect();
        let keys: Vec<_> = store.iter().map(|p| p.key).collect();
        assert_eq!(keys, ["Z", "A", "M"]);
    }

    #[test]
    fn display_renders_attribute_text() {
        assert_eq!(ParamValue::Float(1.0).to_string(), "1.0");
        assert_eq!(ParamValue::Integer(50).to_string(), "50");
        assert_eq!(ParamValue::Boolean(true).to_string(), "true");
        assert_eq!(ParamValue::Text("temp".into()).to_string(), "temp");
        let list = ParamValue::List(vec![ParamValue::Float(1.5), ParamValue::Integer(2)]);
        assert_eq!(list.to_string(), "[1.5,2]");
    }

    #[test]
    fn truthiness() {
        assert!(!ParamValue::Float(0.0).is_truthy());
        assert!(ParamValue::Float(1.5).is_truthy());
        assert!(!ParamValue::Text(String::new()).is_truthy());
        assert!(!ParamValue::List(vec![]).is_truthy());
        assert!(ParamValue::Boolean(true).is_truthy());
    }

    proptest! {
        #[test]
        fn float_tag_decodes_any_finite(
            v in proptest::num::f64::NORMAL | proptest::num::f64::ZERO,
        ) {
            let decoded = typed("float", &format!("{v}")).decode(DecodeMode::Structured).unwrap();
            prop_assert_eq!(decoded, Some(ParamValue::Float(v)));
        }

        #[test]
        fn declared_mode_is_identity_for_untagged(text in "[ -~]{0,32}") {
            let decoded = RawValue::Raw(text.clone()).decode(DecodeMode::Declared).unwrap();
            prop_assert_eq!(decoded, Some(ParamValue::Text(text)));
        }
    }
}
