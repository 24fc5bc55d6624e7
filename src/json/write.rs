//! JSON writing.
//!
//! [`JsonWriter`] serializes an element tree back to text under a
//! [`JsonConfig`]. When pretty-printing, containers at or below the
//! configured simplification threshold whose direct children are all
//! non-complex render on one line (`{ "key": "value" }`); everything else is
//! multi-line with the indent string repeated per nesting depth.
//!
//! Non-finite floats are emitted as the bare tokens `Infinity`, `-Infinity`
//! and `NaN`. This is not valid under the strict JSON grammar; it is an
//! intentional convention of this library, and [`super::JsonReader`] accepts
//! the tokens in both modes so output always round-trips.

use super::JsonElement;
use crate::config::JsonConfig;
use crate::error::Result;
use std::io::Write;

/// A single-use JSON serializer over any byte sink.
///
/// Repeated [`JsonWriter::write_json`] calls append sequential documents,
/// newline-separated. [`JsonWriter::into_inner`] releases the sink.
pub struct JsonWriter<W: Write> {
    out: W,
    config: JsonConfig,
    documents: usize,
}

impl<W: Write> JsonWriter<W> {
    /// Creates a writer with the default config.
    pub fn new(out: W) -> Self {
        Self::with_config(out, JsonConfig::default())
    }

    /// Creates a writer with an explicit config.
    pub fn with_config(out: W, config: JsonConfig) -> Self {
        JsonWriter {
            out,
            config,
            documents: 0,
        }
    }

    /// Releases the underlying sink.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Serializes one element tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SyntaxError::Io`] if the underlying write fails.
    pub fn write_json(&mut self, element: &JsonElement) -> Result<()> {
        if self.documents > 0 {
            self.out.write_all(b"\n")?;
        }
        self.documents += 1;
        self.write_element(element, 0)
    }

    fn write_element(&mut self, element: &JsonElement, depth: usize) -> Result<()> {
        match element {
            JsonElement::Null => self.out.write_all(b"null")?,
            JsonElement::Bool(true) => self.out.write_all(b"true")?,
            JsonElement::Bool(false) => self.out.write_all(b"false")?,
            JsonElement::Integer(i) => write!(self.out, "{i}")?,
            JsonElement::Float(f) => self.write_float(*f)?,
            JsonElement::String(s) => self.write_string(s)?,
            JsonElement::Array(arr) => self.write_array(arr, depth)?,
            JsonElement::Object(obj) => self.write_object(obj, depth)?,
        }
        Ok(())
    }

    fn write_float(&mut self, f: f64) -> Result<()> {
        if f.is_nan() {
            self.out.write_all(b"NaN")?;
        } else if f == f64::INFINITY {
            self.out.write_all(b"Infinity")?;
        } else if f == f64::NEG_INFINITY {
            self.out.write_all(b"-Infinity")?;
        } else {
            // Debug form keeps the trailing ".0" on whole floats so the
            // integral/floating distinction survives a round trip
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
                c if (c as u32) < 0x20 => write!(self.out, "\\u{:04x}", c as u32)?,
                c => write!(self.out, "{c}")?,
            }
        }
        self.out.write_all(b"\"")?;
        Ok(())
    }

    fn simplify(&self, len: usize, threshold: usize, children_complex: bool) -> bool {
        self.config.pretty && len <= threshold && !children_complex
    }

    fn write_array(&mut self, arr: &[JsonElement], depth: usize) -> Result<()> {
        if arr.is_empty() {
            self.out.write_all(b"[]")?;
            return Ok(());
        }

        let complex = arr.iter().any(JsonElement::is_complex);
        if !self.config.pretty {
            self.out.write_all(b"[")?;
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    self.out.write_all(b",")?;
                }
                self.write_element(item, depth)?;
            }
            self.out.write_all(b"]")?;
        } else if self.simplify(arr.len(), self.config.simplify_arrays, complex) {
            self.out.write_all(b"[")?;
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    self.out.write_all(b", ")?;
                }
                self.write_element(item, depth)?;
            }
            self.out.write_all(b"]")?;
        } else {
            self.out.write_all(b"[\n")?;
            for (i, item) in arr.iter().enumerate() {
                self.write_indent(depth + 1)?;
                self.write_element(item, depth + 1)?;
                if i + 1 < arr.len() {
                    self.out.write_all(b",")?;
                }
                self.out.write_all(b"\n")?;
            }
            self.write_indent(depth)?;
            self.out.write_all(b"]")?;
        }
        Ok(())
    }

    fn write_object(
        &mut self,
        obj: &crate::ElementMap<JsonElement>,
        depth: usize,
    ) -> Result<()> {
        if obj.is_empty() {
            self.out.write_all(b"{}")?;
            return Ok(());
        }

        let complex = obj.values().any(JsonElement::is_complex);
        if !self.config.pretty {
            self.out.write_all(b"{")?;
            for (i, (key, value)) in obj.iter().enumerate() {
                if i > 0 {
                    self.out.write_all(b",")?;
                }
                self.write_string(key)?;
                self.out.write_all(b":")?;
                self.write_element(value, depth)?;
            }
            self.out.write_all(b"}")?;
        } else if self.simplify(obj.len(), self.config.simplify_objects, complex) {
            self.out.write_all(b"{ ")?;
            for (i, (key, value)) in obj.iter().enumerate() {
                if i > 0 {
                    self.out.write_all(b", ")?;
                }
                self.write_string(key)?;
                self.out.write_all(b": ")?;
                self.write_element(value, depth)?;
            }
            self.out.write_all(b" }")?;
        } else {
            self.out.write_all(b"{\n")?;
            for (i, (key, value)) in obj.iter().enumerate() {
                self.write_indent(depth + 1)?;
                self.write_string(key)?;
                self.out.write_all(b": ")?;
                self.write_element(value, depth + 1)?;
                if i + 1 < obj.len() {
                    self.out.write_all(b",")?;
                }
                self.out.write_all(b"\n")?;
            }
            self.write_indent(depth)?;
            self.out.write_all(b"}")?;
        }
        Ok(())
    }

    fn write_indent(&mut self, depth: usize) -> Result<()> {
        for _ in 0..depth {
            self.out.write_all(self.config.indent.as_bytes())?;
        }
        Ok(())
    }
}
