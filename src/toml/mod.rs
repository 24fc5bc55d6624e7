//! TOML element tree, reader and writer.
//!
//! TOML documents parse into a [`TomlTable`] of [`TomlElement`]s. Date and
//! time literals are recognized by grammar shape at parse time and stored as
//! typed scalars (chrono values), never as strings, so the writer re-emits
//! canonical RFC 3339-style forms.
//!
//! Tables carry an *inline* flag and arrays an *of-tables* flag. These are
//! serialization hints: an inline table writes as `{ k = v }` on one line, a
//! standard table as a `[section]` header, and an array-of-tables as repeated
//! `[[section]]` headers. The flags never change what a value *is*.
//!
//! ## Examples
//!
//! ```rust
//! use polyform::toml;
//!
//! let doc = toml::from_str("[database]\nhost = \"localhost\"\nport = 5432").unwrap();
//! let db = doc.get("database").and_then(|v| v.as_table()).unwrap();
//! assert_eq!(db.get("port").and_then(|v| v.as_i64()), Some(5432));
//! ```

mod read;
mod write;

pub use read::TomlReader;
pub use write::TomlWriter;

use crate::config::TomlConfig;
use crate::error::{Result, SyntaxError};
use crate::map::ElementMap;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use std::io;

/// A table of key→element entries.
///
/// Insertion order is preserved for serialization; equality ignores it. The
/// `inline` flag chooses between `{ }` single-line output and a `[section]`
/// header.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TomlTable {
    entries: ElementMap<TomlElement>,
    inline: bool,
}

impl TomlTable {
    /// Creates an empty standard (header-style) table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty inline (`{ }`) table.
    #[must_use]
    pub fn inline() -> Self {
        TomlTable {
            entries: ElementMap::new(),
            inline: true,
        }
    }

    /// Returns `true` if this table serializes inline.
    #[must_use]
    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Switches the serialization hint.
    pub fn set_inline(&mut self, inline: bool) {
        self.inline = inline;
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<TomlElement>) -> Option<TomlElement> {
        self.entries.insert(key.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&TomlElement> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut TomlElement> {
        self.entries.get_mut(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<TomlElement> {
        self.entries.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, TomlElement> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, TomlElement> {
        self.entries.keys()
    }
}

impl IntoIterator for TomlTable {
    type Item = (String, TomlElement);
    type IntoIter = indexmap::map::IntoIter<String, TomlElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// An array of elements.
///
/// The `of_tables` flag marks arrays populated by `[[section]]` headers,
/// which serialize back as repeated headers rather than `[ ]` syntax.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct TomlArray {
    items: Vec<TomlElement>,
    of_tables: bool,
}

impl TomlArray {
    /// Creates an empty plain array.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty array-of-tables.
    #[must_use]
    pub fn of_tables() -> Self {
        TomlArray {
            items: Vec::new(),
            of_tables: true,
        }
    }

    /// Returns `true` if this array serializes as `[[section]]` headers.
    #[must_use]
    pub fn is_of_tables(&self) -> bool {
        self.of_tables
    }

    pub fn push(&mut self, value: impl Into<TomlElement>) {
        self.items.push(value.into());
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&TomlElement> {
        self.items.get(index)
    }

    #[must_use]
    pub fn last_mut(&mut self) -> Option<&mut TomlElement> {
        self.items.last_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TomlElement> {
        self.items.iter()
    }
}

impl From<Vec<TomlElement>> for TomlArray {
    fn from(items: Vec<TomlElement>) -> Self {
        TomlArray {
            items,
            of_tables: false,
        }
    }
}

impl IntoIterator for TomlArray {
    type Item = TomlElement;
    type IntoIter = std::vec::IntoIter<TomlElement>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// A node in a parsed TOML document.
///
/// TOML has no null; every value is typed. The four date/time variants are
/// distinguished by literal shape at parse time (`1979-05-27`, `07:32:00`,
/// `1979-05-27T07:32:00`, `1979-05-27T07:32:00-07:00`).
#[derive(Clone, Debug, PartialEq)]
pub enum TomlElement {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    Array(TomlArray),
    Table(TomlTable),
}

impl TomlElement {
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, TomlElement::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, TomlElement::Integer(_) | TomlElement::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, TomlElement::String(_))
    }

    /// Returns `true` for any of the four date/time variants.
    #[inline]
    #[must_use]
    pub const fn is_temporal(&self) -> bool {
        matches!(
            self,
            TomlElement::Date(_)
                | TomlElement::Time(_)
                | TomlElement::DateTime(_)
                | TomlElement::OffsetDateTime(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, TomlElement::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, TomlElement::Table(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TomlElement::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            TomlElement::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TomlElement::Integer(i) => Some(*i as f64),
            TomlElement::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TomlElement::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&TomlArray> {
        match self {
            TomlElement::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut TomlArray> {
        match self {
            TomlElement::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&TomlTable> {
        match self {
            TomlElement::Table(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table_mut(&mut self) -> Option<&mut TomlTable> {
        match self {
            TomlElement::Table(t) => Some(t),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            TomlElement::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_offset_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            TomlElement::OffsetDateTime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl From<bool> for TomlElement {
    fn from(value: bool) -> Self {
        TomlElement::Bool(value)
    }
}

impl From<i32> for TomlElement {
    fn from(value: i32) -> Self {
        TomlElement::Integer(value as i64)
    }
}

impl From<i64> for TomlElement {
    fn from(value: i64) -> Self {
        TomlElement::Integer(value)
    }
}

impl From<f64> for TomlElement {
    fn from(value: f64) -> Self {
        TomlElement::Float(value)
    }
}

impl From<&str> for TomlElement {
    fn from(value: &str) -> Self {
        TomlElement::String(value.to_string())
    }
}

impl From<String> for TomlElement {
    fn from(value: String) -> Self {
        TomlElement::String(value)
    }
}

impl From<TomlTable> for TomlElement {
    fn from(value: TomlTable) -> Self {
        TomlElement::Table(value)
    }
}

impl From<TomlArray> for TomlElement {
    fn from(value: TomlArray) -> Self {
        TomlElement::Array(value)
    }
}

impl From<NaiveDate> for TomlElement {
    fn from(value: NaiveDate) -> Self {
        TomlElement::Date(value)
    }
}

impl From<DateTime<FixedOffset>> for TomlElement {
    fn from(value: DateTime<FixedOffset>) -> Self {
        TomlElement::OffsetDateTime(value)
    }
}

/// Parses a TOML document from a string with the default config.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on malformed input.
pub fn from_str(input: &str) -> Result<TomlTable> {
    TomlReader::new(input).read_toml()
}

/// Parses a TOML document from a string with an explicit config.
///
/// # Errors
///
/// Returns a [`SyntaxError`] on malformed input.
pub fn from_str_with(input: &str, config: &TomlConfig) -> Result<TomlTable> {
    TomlReader::with_config(input, config.clone()).read_toml()
}

/// Parses a TOML document from any byte stream.
///
/// # Errors
///
/// Returns a [`SyntaxError`] if reading fails or the text is malformed.
pub fn from_reader<R: io::Read>(mut reader: R, config: &TomlConfig) -> Result<TomlTable> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| SyntaxError::io(e.to_string()))?;
    from_str_with(&text, config)
}

/// Serializes a table to a string with the default config.
#[must_use]
pub fn to_string(table: &TomlTable) -> String {
    to_string_with(table, &TomlConfig::new())
}

/// Serializes a table to a string with an explicit config.
#[must_use]
pub fn to_string_with(table: &TomlTable, config: &TomlConfig) -> String {
    let mut out = Vec::new();
    let mut writer = TomlWriter::with_config(&mut out, config.clone());
    writer
        .write_toml(table)
        .expect("in-memory write cannot fail");
    String::from_utf8(out).expect("writer emits UTF-8")
}

/// Serializes a table to any byte stream.
///
/// # Errors
///
/// Returns [`SyntaxError::Io`] if the underlying write fails.
pub fn to_writer<W: io::Write>(writer: W, table: &TomlTable, config: &TomlConfig) -> Result<()> {
    TomlWriter::with_config(writer, config.clone()).write_toml(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_inline_flag() {
        let mut table = TomlTable::inline();
        assert!(table.is_inline());
        table.set_inline(false);
        assert!(!table.is_inline());
    }

    #[test]
    fn test_tables_compare_entries_and_hint() {
        let mut a = TomlTable::new();
        a.insert("k", 1i64);
        let mut b = TomlTable::inline();
        b.insert("k", 1i64);
        assert_ne!(a, b);
        b.set_inline(false);
        assert_eq!(a, b);
    }

    #[test]
    fn test_temporal_classification() {
        let date = TomlElement::Date(NaiveDate::from_ymd_opt(1979, 5, 27).unwrap());
        assert!(date.is_temporal());
        assert!(!TomlElement::Integer(1).is_temporal());
    }

    #[test]
    fn test_typed_access() {
        let mut table = TomlTable::new();
        table.insert("port", 5432i64);
        table.insert("host", "localhost");
        assert_eq!(table.get("port").and_then(|v| v.as_i64()), Some(5432));
        assert_eq!(table.get("host").and_then(|v| v.as_str()), Some("localhost"));
        assert_eq!(table.get("port").and_then(|v| v.as_str()), None);
    }
}
