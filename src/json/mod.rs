//! JSON element tree, reader and writer.
//!
//! [`JsonElement`] is the dynamically-typed representation of a parsed JSON
//! document. Scalars keep their stored type: a string element holding
//! `"true"` stays a string and re-serializes quoted, never silently
//! reinterpreting as a boolean. Use [`JsonElement::parsed`] when you
//! explicitly want the get-as-parsed view.
//!
//! ## Examples
//!
//! ```rust
//! use polyform::json;
//!
//! let doc = json::from_str(r#"{"key": "value"}"#).unwrap();
//! let obj = doc.as_object().unwrap();
//! assert_eq!(obj.get("key").and_then(|v| v.as_str()), Some("value"));
//!
//! let text = json::to_string(&doc);
//! assert_eq!(json::from_str(&text).unwrap(), doc);
//! ```

mod read;
mod write;

pub use read::JsonReader;
pub use write::JsonWriter;

use crate::config::JsonConfig;
use crate::error::{Result, SyntaxError};
use crate::map::ElementMap;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::io;

/// A node in a parsed JSON document tree.
///
/// The variant set is closed and exhaustively matched by the writer and the
/// codec provider. Containers are the only mutable surface; readers always
/// construct fresh containers.
///
/// # Examples
///
/// ```rust
/// use polyform::JsonElement;
///
/// let num = JsonElement::from(42);
/// assert!(num.is_number());
/// assert_eq!(num.as_i64(), Some(42));
///
/// // A string that *looks* like a boolean is still a string
/// let s = JsonElement::from("true");
/// assert!(s.is_string());
/// assert_eq!(s.as_bool(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonElement {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<JsonElement>),
    Object(ElementMap<JsonElement>),
}

impl JsonElement {
    /// Returns `true` if the element is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonElement::Null)
    }

    /// Returns `true` if the element is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, JsonElement::Bool(_))
    }

    /// Returns `true` if the element is an integral or floating number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, JsonElement::Integer(_) | JsonElement::Float(_))
    }

    /// Returns `true` if the element is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, JsonElement::String(_))
    }

    /// Returns `true` if the element is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, JsonElement::Array(_))
    }

    /// Returns `true` if the element is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, JsonElement::Object(_))
    }

    /// If the element is a boolean, returns it.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonElement::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the element is an integer, or a float with no fractional part in
    /// i64 range, returns it.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonElement::Integer(i) => Some(*i),
            JsonElement::Float(f)
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 =>
            {
                Some(*f as i64)
            }
            _ => None,
        }
    }

    /// If the element is numeric, returns it widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonElement::Integer(i) => Some(*i as f64),
            JsonElement::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the element is a string, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonElement::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the element is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<JsonElement>> {
        match self {
            JsonElement::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the element is an array, returns a mutable reference to it.
    #[inline]
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<JsonElement>> {
        match self {
            JsonElement::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the element is an object, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ElementMap<JsonElement>> {
        match self {
            JsonElement::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// If the element is an object, returns a mutable reference to it.
    #[inline]
    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut ElementMap<JsonElement>> {
        match self {
            JsonElement::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// The explicit get-as-parsed view: if this is a string whose content
    /// spells a boolean, null or number, returns the reinterpreted element.
    /// Non-strings and non-ambiguous strings come back unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyform::JsonElement;
    ///
    /// assert_eq!(JsonElement::from("true").parsed(), JsonElement::Bool(true));
    /// assert_eq!(JsonElement::from("12").parsed(), JsonElement::Integer(12));
    /// assert_eq!(JsonElement::from("hi").parsed(), JsonElement::from("hi"));
    /// ```
    #[must_use]
    pub fn parsed(&self) -> JsonElement {
        let JsonElement::String(s) = self else {
            return self.clone();
        };
        match s.as_str() {
            "null" => JsonElement::Null,
            "true" => JsonElement::Bool(true),
            "false" => JsonElement::Bool(false),
            _ => {
                if let Ok(i) = s.parse::<i64>() {
                    JsonElement::Integer(i)
                } else if let Ok(f) = s.parse::<f64>() {
                    JsonElement::Float(f)
                } else {
                    self.clone()
                }
            }
        }
    }

    /// Returns `true` for a non-empty array or object. Used by the writer's
    /// simplification heuristic: a container with a complex direct child is
    /// never collapsed onto one line.
    #[must_use]
    pub(crate) fn is_complex(&self) -> bool {
        match self {
            JsonElement::Array(arr) => !arr.is_empty(),
            JsonElement::Object(obj) => !obj.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for JsonElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_string_with(self, &JsonConfig::compact()))
    }
}

impl From<bool> for JsonElement {
    fn from(value: bool) -> Self {
        JsonElement::Bool(value)
    }
}

impl From<i8> for JsonElement {
    fn from(value: i8) -> Self {
        JsonElement::Integer(value as i64)
    }
}

impl From<i16> for JsonElement {
    fn from(value: i16) -> Self {
        JsonElement::Integer(value as i64)
    }
}

impl From<i32> for JsonElement {
    fn from(value: i32) -> Self {
        JsonElement::Integer(value as i64)
    }
}

impl From<i64> for JsonElement {
    fn from(value: i64) -> Self {
        JsonElement::Integer(value)
    }
}

impl From<u8> for JsonElement {
    fn from(value: u8) -> Self {
        JsonElement::Integer(value as i64)
    }
}

impl From<u16> for JsonElement {
    fn from(value: u16) -> Self {
        JsonElement::Integer(value as i64)
    }
}

impl From<u32> for JsonElement {
    fn from(value: u32) -> Self {
        JsonElement::Integer(value as i64)
    }
}

impl From<f32> for JsonElement {
    fn from(value: f32) -> Self {
        JsonElement::Float(value as f64)
    }
}

impl From<f64> for JsonElement {
    fn from(value: f64) -> Self {
        JsonElement::Float(value)
    }
}

impl From<String> for JsonElement {
    fn from(value: String) -> Self {
        JsonElement::String(value)
    }
}

impl From<&str> for JsonElement {
    fn from(value: &str) -> Self {
        JsonElement::String(value.to_string())
    }
}

impl From<Vec<JsonElement>> for JsonElement {
    fn from(value: Vec<JsonElement>) -> Self {
        JsonElement::Array(value)
    }
}

impl From<ElementMap<JsonElement>> for JsonElement {
    fn from(value: ElementMap<JsonElement>) -> Self {
        JsonElement::Object(value)
    }
}

impl Serialize for JsonElement {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonElement::Null => serializer.serialize_unit(),
            JsonElement::Bool(b) => serializer.serialize_bool(*b),
            JsonElement::Integer(i) => serializer.serialize_i64(*i),
            JsonElement::Float(f) => serializer.serialize_f64(*f),
            JsonElement::String(s) => serializer.serialize_str(s),
            JsonElement::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            JsonElement::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonElement {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ElementVisitor;

        impl<'de> Visitor<'de> for ElementVisitor {
            type Value = JsonElement;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(JsonElement::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E> {
                Ok(JsonElement::Integer(value))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(JsonElement::Integer(value as i64))
                } else {
                    Ok(JsonElement::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E> {
                Ok(JsonElement::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(JsonElement::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(JsonElement::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(JsonElement::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(JsonElement::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(JsonElement::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ElementMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(JsonElement::Object(values))
            }
        }

        deserializer.deserialize_any(ElementVisitor)
    }
}

/// Parses a JSON document from a string with the default (strict) config.
///
/// # Examples
///
/// ```rust
/// use polyform::json;
///
/// let arr = json::from_str("[1, 2, 3]").unwrap();
/// assert_eq!(arr.as_array().map(Vec::len), Some(3));
/// ```
///
/// # Errors
///
/// Returns a [`SyntaxError`] on malformed input; no partial tree is produced.
pub fn from_str(input: &str) -> Result<JsonElement> {
    JsonReader::new(input).read_json()
}

/// Parses a JSON document from a string with an explicit config.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on malformed input.
pub fn from_str_with(input: &str, config: &JsonConfig) -> Result<JsonElement> {
    JsonReader::with_config(input, config.clone()).read_json()
}

/// Parses a JSON document from any byte stream.
///
/// The stream is drained up front; the bytes must be valid UTF-8.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if reading fails, the bytes are not UTF-8, or
/// the text is malformed.
pub fn from_reader<R: io::Read>(mut reader: R, config: &JsonConfig) -> Result<JsonElement> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| SyntaxError::io(e.to_string()))?;
    from_str_with(&text, config)
}

/// Serializes an element to a string with the default config.
#[must_use]
pub fn to_string(element: &JsonElement) -> String {
    to_string_with(element, &JsonConfig::default())
}

/// Serializes an element to a string with an explicit config.
#[must_use]
pub fn to_string_with(element: &JsonElement, config: &JsonConfig) -> String {
    let mut out = Vec::new();
    let mut writer = JsonWriter::with_config(&mut out, config.clone());
    // Writing to an in-memory buffer cannot fail
    writer
        .write_json(element)
        .expect("in-memory write cannot fail");
    String::from_utf8(out).expect("writer emits UTF-8")
}

/// Serializes an element to any byte stream.
///
/// # Errors
///
/// Returns a [`SyntaxError::Io`] if the underlying write fails.
pub fn to_writer<W: io::Write>(
    writer: W,
    element: &JsonElement,
    config: &JsonConfig,
) -> Result<()> {
    JsonWriter::with_config(writer, config.clone()).write_json(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_primitives() {
        assert_eq!(JsonElement::from(true), JsonElement::Bool(true));
        assert_eq!(JsonElement::from(42i32), JsonElement::Integer(42));
        assert_eq!(JsonElement::from(3.5f64), JsonElement::Float(3.5));
        assert_eq!(
            JsonElement::from("test"),
            JsonElement::String("test".to_string())
        );
    }

    #[test]
    fn test_string_scalar_keeps_stored_type() {
        let s = JsonElement::from("42");
        assert!(s.is_string());
        assert_ne!(s, JsonElement::Integer(42));
        assert_eq!(s.parsed(), JsonElement::Integer(42));
    }

    #[test]
    fn test_as_i64_widening() {
        assert_eq!(JsonElement::Float(42.0).as_i64(), Some(42));
        assert_eq!(JsonElement::Float(42.5).as_i64(), None);
        assert_eq!(JsonElement::Integer(7).as_f64(), Some(7.0));
    }

    #[test]
    fn test_object_equality_ignores_order() {
        let mut a = ElementMap::new();
        a.insert("x".to_string(), JsonElement::from(1));
        a.insert("y".to_string(), JsonElement::from(2));

        let mut b = ElementMap::new();
        b.insert("y".to_string(), JsonElement::from(2));
        b.insert("x".to_string(), JsonElement::from(1));

        assert_eq!(JsonElement::Object(a), JsonElement::Object(b));
    }

    #[test]
    fn test_display_is_compact_json() {
        let mut obj = ElementMap::new();
        obj.insert("k".to_string(), JsonElement::from(1));
        assert_eq!(JsonElement::Object(obj).to_string(), r#"{"k":1}"#);
    }

    #[test]
    fn test_serde_bridge() {
        let element = from_str(r#"{"a": [1, 2], "b": null}"#).unwrap();
        let json = serde_json::to_string(&element).unwrap();
        let back: JsonElement = serde_json::from_str(&json).unwrap();
        assert_eq!(element, back);
    }
}
