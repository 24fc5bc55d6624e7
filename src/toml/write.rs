//! TOML writing.
//!
//! [`TomlWriter::write_toml`] serializes a whole table: scalar and inline
//! entries of each table come first as `key = value` lines, then nested
//! standard tables depth-first under `[dotted.path]` headers and
//! arrays-of-tables under `[[dotted.path]]`.
//!
//! The incremental primitives ([`TomlWriter::write_property`],
//! [`TomlWriter::write_table_header`], [`TomlWriter::write_comment`] and
//! friends) let callers stream a document without building a tree first.

use super::{TomlArray, TomlElement, TomlTable};
use crate::config::{DateTimeStyle, TomlConfig};
use crate::error::Result;
use std::io::Write;

/// A TOML serializer over any byte sink.
pub struct TomlWriter<W: Write> {
    out: W,
    config: TomlConfig,
    /// Whether anything has been written yet, to place blank lines
    /// between header sections but not before the first.
    started: bool,
}

impl<W: Write> TomlWriter<W> {
    /// Creates a writer with the default config.
    pub fn new(out: W) -> Self {
        Self::with_config(out, TomlConfig::new())
    }

    /// Creates a writer with an explicit config.
    pub fn with_config(out: W, config: TomlConfig) -> Self {
        TomlWriter {
            out,
            config,
            started: false,
        }
    }

    /// Releases the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Serializes a whole document rooted at `table`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SyntaxError::Io`] if the underlying write fails.
    pub fn write_toml(&mut self, table: &TomlTable) -> Result<()> {
        self.write_table_contents(&mut Vec::new(), table)
    }

    /// Writes one `key = value` line.
    pub fn write_property(&mut self, key: &str, value: &TomlElement) -> Result<()> {
        self.started = true;
        self.write_key(key)?;
        self.out.write_all(b" = ")?;
        self.write_value(value)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Writes a `[dotted.path]` standard table header.
    pub fn write_table_header(&mut self, path: &[String]) -> Result<()> {
        if self.started {
            self.out.write_all(b"\n")?;
        }
        self.started = true;
        self.out.write_all(b"[")?;
        self.write_path(path)?;
        self.out.write_all(b"]\n")?;
        Ok(())
    }

    /// Writes a `[[dotted.path]]` array-of-tables header.
    pub fn write_array_header(&mut self, path: &[String]) -> Result<()> {
        if self.started {
            self.out.write_all(b"\n")?;
        }
        self.started = true;
        self.out.write_all(b"[[")?;
        self.write_path(path)?;
        self.out.write_all(b"]]\n")?;
        Ok(())
    }

    /// Writes a `# text` comment line.
    pub fn write_comment(&mut self, text: &str) -> Result<()> {
        self.started = true;
        writeln!(self.out, "# {text}")?;
        Ok(())
    }

    /// Writes an empty line.
    pub fn write_blank_line(&mut self) -> Result<()> {
        self.started = true;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn write_table_contents(&mut self, path: &mut Vec<String>, table: &TomlTable) -> Result<()> {
        // Properties first so they cannot be captured by a later header
        for (key, value) in table.iter() {
            if !Self::needs_header(value) {
                self.write_property(key, value)?;
            }
        }

        for (key, value) in table.iter() {
            match value {
                TomlElement::Table(sub) if !sub.is_inline() => {
                    path.push(key.clone());
                    self.write_table_header(path)?;
                    self.write_table_contents(path, sub)?;
                    path.pop();
                }
                TomlElement::Array(arr) if arr.is_of_tables() => {
                    path.push(key.clone());
                    for item in arr.iter() {
                        self.write_array_header(path)?;
                        if let TomlElement::Table(sub) = item {
                            self.write_table_contents(path, sub)?;
                        }
                    }
                    path.pop();
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Standard tables and arrays-of-tables get their own header sections;
    /// everything else is a property value.
    fn needs_header(value: &TomlElement) -> bool {
        match value {
            TomlElement::Table(t) => !t.is_inline(),
            TomlElement::Array(arr) => arr.is_of_tables(),
            _ => false,
        }
    }

    fn write_path(&mut self, path: &[String]) -> Result<()> {
        for (i, segment) in path.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b".")?;
            }
            self.write_key(segment)?;
        }
        Ok(())
    }

    fn write_key(&mut self, key: &str) -> Result<()> {
        let bare = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if bare {
            write!(self.out, "{key}")?;
        } else {
            self.write_string(key)?;
        }
        Ok(())
    }

    fn write_value(&mut self, value: &TomlElement) -> Result<()> {
        match value {
            TomlElement::Bool(true) => self.out.write_all(b"true")?,
            TomlElement::Bool(false) => self.out.write_all(b"false")?,
            TomlElement::Integer(i) => write!(self.out, "{i}")?,
            TomlElement::Float(f) => self.write_float(*f)?,
            TomlElement::String(s) => self.write_string(s)?,
            TomlElement::Date(d) => write!(self.out, "{}", d.format("%Y-%m-%d"))?,
            TomlElement::Time(t) => write!(self.out, "{}", t.format("%H:%M:%S%.f"))?,
            TomlElement::DateTime(dt) => {
                write!(self.out, "{}", dt.format(self.datetime_format()))?
            }
            TomlElement::OffsetDateTime(dt) => {
                write!(self.out, "{}", dt.format(self.offset_datetime_format()))?
            }
            TomlElement::Array(arr) => self.write_inline_array(arr)?,
            TomlElement::Table(table) => self.write_inline_table(table)?,
        }
        Ok(())
    }

    fn datetime_format(&self) -> &'static str {
        match self.config.datetime_style {
            DateTimeStyle::Rfc3339 => "%Y-%m-%dT%H:%M:%S%.f",
            DateTimeStyle::Spaced => "%Y-%m-%d %H:%M:%S%.f",
        }
    }

    fn offset_datetime_format(&self) -> &'static str {
        match self.config.datetime_style {
            DateTimeStyle::Rfc3339 => "%Y-%m-%dT%H:%M:%S%.f%:z",
            DateTimeStyle::Spaced => "%Y-%m-%d %H:%M:%S%.f%:z",
        }
    }

    fn write_float(&mut self, f: f64) -> Result<()> {
        if f.is_nan() {
            self.out.write_all(b"nan")?;
        } else if f == f64::INFINITY {
            self.out.write_all(b"inf")?;
        } else if f == f64::NEG_INFINITY {
            self.out.write_all(b"-inf")?;
        } else {
            // Debug form keeps the trailing ".0" on whole floats
            write!(self.out, "{f:?}")?;
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        self.out.write_all(b"\"")?;
        for ch in s.chars() {
            match ch {
                '"' => self.out.write_all(b"\\\"")?,
                '\\' => self.out.write_all(b"\\\\")?,
                '\n' => self.out.write_all(b"\\n")?,
                '\r' => self.out.write_all(b"\\r")?,
                '\t' => self.out.write_all(b"\\t")?,
                '\u{0008}' => self.out.write_all(b"\\b")?,
                '\u{000C}' => self.out.write_all(b"\\f")?,
                c if (c as u32) < 0x20 => write!(self.out, "\\u{:04X}", c as u32)?,
                c => write!(self.out, "{c}")?,
            }
        }
        self.out.write_all(b"\"")?;
        Ok(())
    }

    fn write_inline_array(&mut self, arr: &TomlArray) -> Result<()> {
        self.out.write_all(b"[")?;
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b", ")?;
            }
            self.write_value(item)?;
        }
        self.out.write_all(b"]")?;
        Ok(())
    }

    fn write_inline_table(&mut self, table: &TomlTable) -> Result<()> {
        if table.is_empty() {
            self.out.write_all(b"{}")?;
            return Ok(());
        }
        self.out.write_all(b"{ ")?;
        for (i, (key, value)) in table.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b", ")?;
            }
            self.write_key(key)?;
            self.out.write_all(b" = ")?;
            self.write_value(value)?;
        }
        self.out.write_all(b" }")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml;
    use chrono::NaiveDate;

    #[test]
    fn test_properties_before_subtables() {
        let doc = toml::from_str("title = \"x\"\n\n[server]\nport = 80").unwrap();
        let text = toml::to_string(&doc);
        assert_eq!(text, "title = \"x\"\n\n[server]\nport = 80\n");
    }

    #[test]
    fn test_nested_headers_are_dotted() {
        let doc = toml::from_str("[a.b.c]\nx = 1").unwrap();
        let text = toml::to_string(&doc);
        assert!(text.contains("[a.b.c]") || text.contains("[a]"));
        assert_eq!(toml::from_str(&text).unwrap(), doc);
    }

    #[test]
    fn test_array_of_tables_round_trip() {
        let input = "[[fruit]]\nname = \"apple\"\n\n[[fruit]]\nname = \"pear\"\n";
        let doc = toml::from_str(input).unwrap();
        assert_eq!(toml::to_string(&doc), input);
    }

    #[test]
    fn test_inline_table_stays_inline() {
        let doc = toml::from_str("point = { x = 1, y = 2 }").unwrap();
        assert_eq!(toml::to_string(&doc), "point = { x = 1, y = 2 }\n");
    }

    #[test]
    fn test_quoted_keys() {
        let doc = toml::from_str("\"a b\" = 1\n\"\" = 2").unwrap();
        let text = toml::to_string(&doc);
        assert!(text.contains("\"a b\" = 1"));
        assert!(text.contains("\"\" = 2"));
        assert_eq!(toml::from_str(&text).unwrap(), doc);
    }

    #[test]
    fn test_datetime_styles() {
        let mut table = TomlTable::new();
        table.insert(
            "ts",
            TomlElement::DateTime(
                NaiveDate::from_ymd_opt(1979, 5, 27)
                    .unwrap()
                    .and_hms_opt(7, 32, 0)
                    .unwrap(),
            ),
        );

        assert_eq!(toml::to_string(&table), "ts = 1979-05-27T07:32:00\n");

        let spaced = crate::TomlConfig::new().with_datetime_style(crate::DateTimeStyle::Spaced);
        assert_eq!(
            toml::to_string_with(&table, &spaced),
            "ts = 1979-05-27 07:32:00\n"
        );
    }

    #[test]
    fn test_special_floats() {
        let doc = toml::from_str("a = inf\nb = -inf\nc = nan").unwrap();
        let text = toml::to_string(&doc);
        assert_eq!(text, "a = inf\nb = -inf\nc = nan\n");
    }

    #[test]
    fn test_incremental_primitives() {
        let mut out = Vec::new();
        let mut writer = TomlWriter::new(&mut out);
        writer.write_comment("generated").unwrap();
        writer.write_property("name", &TomlElement::from("demo")).unwrap();
        writer.write_blank_line().unwrap();
        writer.write_table_header(&["owner".to_string()]).unwrap();
        writer.write_property("id", &TomlElement::Integer(7)).unwrap();
        drop(writer);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "# generated\nname = \"demo\"\n\n\n[owner]\nid = 7\n"
        );
        assert!(toml::from_str(&text).is_ok());
    }

    #[test]
    fn test_full_round_trip() {
        let input = concat!(
            "title = \"demo\"\n",
            "ratio = 0.5\n",
            "when = 1979-05-27T07:32:00Z\n",
            "tags = [\"a\", \"b\"]\n",
            "\n",
            "[owner]\n",
            "name = \"tom\"\n",
            "dob = 1979-05-27\n",
        );
        let doc = toml::from_str(input).unwrap();
        let text = toml::to_string(&doc);
        assert_eq!(toml::from_str(&text).unwrap(), doc);
    }
}
