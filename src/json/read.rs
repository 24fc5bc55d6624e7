//! JSON reading.
//!
//! [`JsonReader`] is a recursive-descent parser over the shared [`Scanner`].
//! Top-level dispatch is on the next non-whitespace character: `{` opens an
//! object, `[` an array, `"` a string, `t`/`f`/`n` a literal, a digit or `-`
//! a number. Anything else is a syntax error.
//!
//! Strict mode (the default) rejects trailing commas, case-variant literals,
//! bare object keys, duplicate keys and trailing content after the first
//! value. Lenient mode tolerates all of these (duplicate keys: last value
//! wins). `Infinity`, `-Infinity` and `NaN` are accepted in both modes
//! because [`super::JsonWriter`] emits them.
//!
//! ## Examples
//!
//! ```rust
//! use polyform::{json, JsonConfig};
//!
//! assert!(json::from_str("[1, 2, 3,]").is_err());
//!
//! let lenient = JsonConfig::new().with_strict(false);
//! assert!(json::from_str_with("[1, 2, 3,]", &lenient).is_ok());
//! ```

use super::JsonElement;
use crate::config::JsonConfig;
use crate::error::{Result, SyntaxError};
use crate::map::ElementMap;
use crate::scan::{EscapeStyle, Number, NumberStyle, Scanner};

const NUMBER_STYLE: NumberStyle = NumberStyle {
    underscores: false,
    radix_prefixes: false,
    leading_plus: false,
    overflow_to_float: true,
};

/// A single-use JSON parser over a borrowed input string.
///
/// Created via [`JsonReader::new`] or [`JsonReader::with_config`]; one call
/// to [`JsonReader::read_json`] consumes the document.
pub struct JsonReader<'a> {
    scanner: Scanner<'a>,
    config: JsonConfig,
}

impl<'a> JsonReader<'a> {
    /// Creates a reader with the default (strict) config.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, JsonConfig::default())
    }

    /// Creates a reader with an explicit config.
    pub fn with_config(input: &'a str, config: JsonConfig) -> Self {
        JsonReader {
            scanner: Scanner::new(input),
            config,
        }
    }

    /// Parses one JSON document, consuming the reader.
    ///
    /// # Errors
    ///
    /// Any structural violation aborts the read with a [`SyntaxError`]; no
    /// recovery or partial tree.
    pub fn read_json(mut self) -> Result<JsonElement> {
        self.scanner.skip_whitespace();
        let element = self.parse_value()?;
        self.scanner.skip_whitespace();
        if self.config.strict && !self.scanner.at_end() {
            return Err(SyntaxError::TrailingContent {
                line: self.scanner.line(),
                column: self.scanner.column(),
            });
        }
        Ok(element)
    }

    fn parse_value(&mut self) -> Result<JsonElement> {
        self.scanner.skip_whitespace();
        match self.scanner.peek() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') => Ok(JsonElement::String(
                self.scanner.read_quoted('"', EscapeStyle::Json)?,
            )),
            Some(ch) if ch.is_ascii_digit() || ch == '-' => self.parse_number(),
            Some(ch) if ch.is_ascii_alphabetic() => self.parse_literal(),
            Some(ch) => Err(self.scanner.error(format!("unexpected character '{ch}'"))),
            None => Err(self.scanner.eof("a JSON value")),
        }
    }

    fn parse_object(&mut self) -> Result<JsonElement> {
        self.scanner.expect('{')?;
        let mut object = ElementMap::new();

        self.scanner.skip_whitespace();
        if self.scanner.eat('}') {
            return Ok(JsonElement::Object(object));
        }

        loop {
            self.scanner.skip_whitespace();
            let (line, column) = (self.scanner.line(), self.scanner.column());
            let key = self.parse_key()?;
            self.scanner.skip_whitespace();
            self.scanner.expect(':')?;
            let value = self.parse_value()?;
            if object.insert(key.clone(), value).is_some() && self.config.strict {
                return Err(SyntaxError::duplicate_key(line, column, key));
            }

            self.scanner.skip_whitespace();
            if self.scanner.eat(',') {
                self.scanner.skip_whitespace();
                if self.scanner.peek() == Some('}') {
                    if self.config.strict {
                        return Err(self.scanner.error("trailing comma in object"));
                    }
                    self.scanner.next();
                    break;
                }
            } else {
                self.scanner.expect('}')?;
                break;
            }
        }

        Ok(JsonElement::Object(object))
    }

    fn parse_key(&mut self) -> Result<String> {
        if self.scanner.peek() == Some('"') {
            return self.scanner.read_quoted('"', EscapeStyle::Json);
        }
        if self.config.strict {
            return Err(self.scanner.error("expected quoted object key"));
        }
        // Lenient mode: bare identifier keys
        let key = self
            .scanner
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if key.is_empty() {
            Err(self.scanner.error("expected object key"))
        } else {
            Ok(key.to_string())
        }
    }

    fn parse_array(&mut self) -> Result<JsonElement> {
        self.scanner.expect('[')?;
        let mut array = Vec::new();

        self.scanner.skip_whitespace();
        if self.scanner.eat(']') {
            return Ok(JsonElement::Array(array));
        }

        loop {
            array.push(self.parse_value()?);

            self.scanner.skip_whitespace();
            if self.scanner.eat(',') {
                self.scanner.skip_whitespace();
                if self.scanner.peek() == Some(']') {
                    if self.config.strict {
                        return Err(self.scanner.error("trailing comma in array"));
                    }
                    self.scanner.next();
                    break;
                }
            } else {
                self.scanner.expect(']')?;
                break;
            }
        }

        Ok(JsonElement::Array(array))
    }

    fn parse_number(&mut self) -> Result<JsonElement> {
        // -Infinity is a word, not a numeric literal
        if self.scanner.eat_str("-Infinity") {
            return Ok(JsonElement::Float(f64::NEG_INFINITY));
        }
        Ok(match self.scanner.read_number(NUMBER_STYLE)? {
            Number::Integer(i) => JsonElement::Integer(i),
            Number::Float(f) => JsonElement::Float(f),
        })
    }

    fn parse_literal(&mut self) -> Result<JsonElement> {
        let word = self
            .scanner
            .take_while(|c| c.is_ascii_alphabetic())
            .to_string();

        match word.as_str() {
            "true" => return Ok(JsonElement::Bool(true)),
            "false" => return Ok(JsonElement::Bool(false)),
            "null" => return Ok(JsonElement::Null),
            "Infinity" => return Ok(JsonElement::Float(f64::INFINITY)),
            "NaN" => return Ok(JsonElement::Float(f64::NAN)),
            _ => {}
        }

        if !self.config.strict {
            match word.to_ascii_lowercase().as_str() {
                "true" => return Ok(JsonElement::Bool(true)),
                "false" => return Ok(JsonElement::Bool(false)),
                "null" => return Ok(JsonElement::Null),
                _ => {}
            }
        }

        Err(self
            .scanner
            .error(format!("unexpected literal '{word}'")))
    }
}
