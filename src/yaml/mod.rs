//! YAML reading and writing over [`YamlElement`] trees.
//!
//! Covers block and flow collections, plain/quoted scalars, literal and
//! folded block scalars with chomping, comments, document markers, and
//! anchors/aliases. Not full YAML 1.2: no tag directives, no merge keys,
//! no complex keys.
//!
//! Anchors are resolved at read time by default, so an alias becomes an
//! independent copy of the anchored value. [`crate::AnchorMode::Preserve`]
//! keeps [`YamlElement::Anchor`] and [`YamlElement::Alias`] wrappers instead,
//! for round-trip fidelity.
//!
//! ## Examples
//!
//! ```rust
//! use polyform::yaml;
//!
//! let doc = yaml::from_str("name: demo\nitems:\n  - 1\n  - 2").unwrap();
//! let map = doc.as_mapping().unwrap();
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("demo"));
//! assert_eq!(map.get("items").and_then(|v| v.as_sequence()).map(Vec::len), Some(2));
//! ```

mod read;
mod write;

pub use read::YamlReader;
pub use write::YamlWriter;

use crate::config::YamlConfig;
use crate::error::{Result, SyntaxError};
use crate::map::ElementMap;
use std::io;

/// One node of a parsed YAML document.
///
/// `Anchor` and `Alias` appear only under [`crate::AnchorMode::Preserve`];
/// the default read mode substitutes the anchored value, so trees never
/// contain them unless asked for.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum YamlElement {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<YamlElement>),
    Mapping(ElementMap<YamlElement>),
    /// A named node, `&name value`. First occurrence of the name.
    Anchor(String, Box<YamlElement>),
    /// A reference to a previously anchored node, `*name`.
    Alias(String),
}

impl YamlElement {
    pub fn is_null(&self) -> bool {
        matches!(self, YamlElement::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, YamlElement::Bool(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, YamlElement::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, YamlElement::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, YamlElement::String(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, YamlElement::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, YamlElement::Mapping(_))
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self, YamlElement::Anchor(..))
    }

    pub fn is_alias(&self) -> bool {
        matches!(self, YamlElement::Alias(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            YamlElement::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            YamlElement::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            YamlElement::Float(f) => Some(*f),
            YamlElement::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            YamlElement::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<YamlElement>> {
        match self {
            YamlElement::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<YamlElement>> {
        match self {
            YamlElement::Sequence(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&ElementMap<YamlElement>> {
        match self {
            YamlElement::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut ElementMap<YamlElement>> {
        match self {
            YamlElement::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// The name on an anchor or alias node.
    pub fn anchor_name(&self) -> Option<&str> {
        match self {
            YamlElement::Anchor(name, _) | YamlElement::Alias(name) => Some(name),
            _ => None,
        }
    }

    /// The value under an anchor wrapper, or the element itself.
    pub fn unwrapped(&self) -> &YamlElement {
        match self {
            YamlElement::Anchor(_, inner) => inner,
            other => other,
        }
    }
}

impl From<bool> for YamlElement {
    fn from(b: bool) -> Self {
        YamlElement::Bool(b)
    }
}

impl From<i32> for YamlElement {
    fn from(i: i32) -> Self {
        YamlElement::Integer(i64::from(i))
    }
}

impl From<i64> for YamlElement {
    fn from(i: i64) -> Self {
        YamlElement::Integer(i)
    }
}

impl From<f64> for YamlElement {
    fn from(f: f64) -> Self {
        YamlElement::Float(f)
    }
}

impl From<&str> for YamlElement {
    fn from(s: &str) -> Self {
        YamlElement::String(s.to_string())
    }
}

impl From<String> for YamlElement {
    fn from(s: String) -> Self {
        YamlElement::String(s)
    }
}

impl From<Vec<YamlElement>> for YamlElement {
    fn from(seq: Vec<YamlElement>) -> Self {
        YamlElement::Sequence(seq)
    }
}

impl From<ElementMap<YamlElement>> for YamlElement {
    fn from(map: ElementMap<YamlElement>) -> Self {
        YamlElement::Mapping(map)
    }
}

/// Parses one YAML document from a string with the default config.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on malformed input.
pub fn from_str(input: &str) -> Result<YamlElement> {
    YamlReader::new(input).read_yaml()
}

/// Parses one YAML document from a string with an explicit config.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on malformed input.
pub fn from_str_with(input: &str, config: &YamlConfig) -> Result<YamlElement> {
    YamlReader::with_config(input, config.clone()).read_yaml()
}

/// Parses one YAML document from any byte stream.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if reading fails or the text is malformed.
pub fn from_reader<R: io::Read>(mut reader: R, config: &YamlConfig) -> Result<YamlElement> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| SyntaxError::io(e.to_string()))?;
    from_str_with(&text, config)
}

/// Serializes an element to a string with the default config.
#[must_use]
pub fn to_string(element: &YamlElement) -> String {
    to_string_with(element, &YamlConfig::new())
}

/// Serializes an element to a string with an explicit config.
#[must_use]
pub fn to_string_with(element: &YamlElement, config: &YamlConfig) -> String {
    let mut out = Vec::new();
    let mut writer = YamlWriter::with_config(&mut out, config.clone());
    writer
        .write_yaml(element)
        .expect("in-memory write cannot fail");
    String::from_utf8(out).expect("writer emits UTF-8")
}

/// Serializes an element to any byte stream.
///
/// # Errors
///
/// Returns [`SyntaxError::Io`] if the underlying write fails.
pub fn to_writer<W: io::Write>(
    writer: W,
    element: &YamlElement,
    config: &YamlConfig,
) -> Result<()> {
    YamlWriter::with_config(writer, config.clone()).write_yaml(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert!(YamlElement::Null.is_null());
        assert_eq!(YamlElement::from(3).as_i64(), Some(3));
        assert_eq!(YamlElement::from(3).as_f64(), Some(3.0));
        assert_eq!(YamlElement::from("x").as_str(), Some("x"));
        assert!(YamlElement::Alias("a".into()).is_alias());
    }

    #[test]
    fn test_unwrapped() {
        let anchored = YamlElement::Anchor("v".into(), Box::new(YamlElement::from("test")));
        assert_eq!(anchored.anchor_name(), Some("v"));
        assert_eq!(anchored.unwrapped().as_str(), Some("test"));
        assert_eq!(YamlElement::Integer(1).unwrapped(), &YamlElement::Integer(1));
    }

    #[test]
    fn test_default_is_null() {
        assert_eq!(YamlElement::default(), YamlElement::Null);
    }
}
