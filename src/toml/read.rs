//! TOML reading.
//!
//! Line-oriented recursive-descent parser: a line is a `[section]` header, a
//! `[[section]]` array-of-tables header, or a `key = value` pair accumulated
//! into the current table context. Dotted paths in headers and keys create
//! intermediate tables on demand; walking through an array-of-tables descends
//! into its most recently appended table.
//!
//! Date/time literals are recognized by shape before numeric parsing, so
//! `1979-05-27` becomes a typed date, never the subtraction-looking string
//! it would be as a number.

use super::{TomlArray, TomlElement, TomlTable};
use crate::config::TomlConfig;
use crate::error::{Result, SyntaxError};
use crate::scan::{EscapeStyle, Number, NumberStyle, Scanner};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

const NUMBER_STYLE: NumberStyle = NumberStyle {
    underscores: true,
    radix_prefixes: true,
    leading_plus: true,
    overflow_to_float: false,
};

/// A single-use TOML parser over a borrowed input string.
pub struct TomlReader<'a> {
    scanner: Scanner<'a>,
    config: TomlConfig,
    /// Dotted path of the most recently opened header.
    current: Vec<String>,
    /// Joined header paths already defined, for duplicate detection.
    defined: Vec<String>,
}

impl<'a> TomlReader<'a> {
    /// Creates a reader with the default config.
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, TomlConfig::new())
    }

    /// Creates a reader with an explicit config.
    pub fn with_config(input: &'a str, config: TomlConfig) -> Self {
        TomlReader {
            scanner: Scanner::new(input),
            config,
            current: Vec::new(),
            defined: Vec::new(),
        }
    }

    /// Parses the whole document into its root table, consuming the reader.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] on the first structural violation.
    pub fn read_toml(mut self) -> Result<TomlTable> {
        let mut root = TomlTable::new();

        loop {
            self.skip_trivia();
            if self.scanner.at_end() {
                break;
            }

            if self.scanner.peek() == Some('[') {
                self.parse_header(&mut root)?;
            } else {
                let path = self.parse_key_path()?;
                self.scanner.skip_spaces();
                self.scanner.expect('=')?;
                self.scanner.skip_spaces();
                let value = self.parse_value()?;
                self.insert_pair(&mut root, &path, value)?;
            }
            self.expect_line_end()?;
        }

        Ok(root)
    }

    /// Skips whitespace, comments and blank lines between statements.
    fn skip_trivia(&mut self) {
        loop {
            self.scanner.skip_whitespace();
            if self.scanner.peek() == Some('#') {
                self.scanner.take_while(|c| c != '\n');
            } else {
                break;
            }
        }
    }

    /// After a statement: spaces, optional comment, then newline or EOF.
    fn expect_line_end(&mut self) -> Result<()> {
        self.scanner.skip_spaces();
        if self.scanner.peek() == Some('#') {
            self.scanner.take_while(|c| c != '\n');
        }
        match self.scanner.peek() {
            None | Some('\n') => Ok(()),
            Some('\r') if self.scanner.peek_second() == Some('\n') => Ok(()),
            Some(ch) => Err(self
                .scanner
                .error(format!("expected end of line, found '{ch}'"))),
        }
    }

    fn parse_header(&mut self, root: &mut TomlTable) -> Result<()> {
        let line = self.scanner.line();
        let column = self.scanner.column();
        self.scanner.expect('[')?;
        let array_of_tables = self.scanner.eat('[');

        self.scanner.skip_spaces();
        let path = self.parse_key_path()?;
        self.scanner.skip_spaces();
        self.scanner.expect(']')?;
        if array_of_tables {
            self.scanner.expect(']')?;
        }

        if array_of_tables {
            let (parent, last) = path.split_at(path.len() - 1);
            let table = self.navigate(root, parent, line, column)?;
            let key = &last[0];
            match table.get_mut(key) {
                None => {
                    let mut array = TomlArray::of_tables();
                    array.push(TomlTable::new());
                    table.insert(key.clone(), array);
                }
                Some(TomlElement::Array(array)) if array.is_of_tables() => {
                    array.push(TomlTable::new());
                }
                Some(_) => {
                    return Err(SyntaxError::unexpected(
                        line,
                        column,
                        format!("'{}' is not an array of tables", path.join(".")),
                    ))
                }
            }
        } else {
            let joined = path.join(".");
            if self.defined.iter().any(|d| d == &joined) {
                return Err(SyntaxError::duplicate_key(line, column, joined));
            }
            self.defined.push(joined);
            // Creates the table (and any intermediates) if missing
            self.navigate(root, &path, line, column)?;
        }

        self.current = path;
        Ok(())
    }

    /// Walks `path` from `root`, creating standard tables for missing
    /// segments and descending into the last element of any array-of-tables
    /// met along the way.
    fn navigate<'t>(
        &self,
        root: &'t mut TomlTable,
        path: &[String],
        line: usize,
        column: usize,
    ) -> Result<&'t mut TomlTable> {
        let mut table = root;
        for segment in path {
            if !table.contains_key(segment) {
                table.insert(segment.clone(), TomlTable::new());
            }
            let next = table.get_mut(segment).expect("just inserted");
            table = match next {
                TomlElement::Table(t) => t,
                TomlElement::Array(arr) if arr.is_of_tables() => arr
                    .last_mut()
                    .and_then(TomlElement::as_table_mut)
                    .ok_or_else(|| {
                        SyntaxError::unexpected(line, column, "empty array of tables")
                    })?,
                _ => {
                    return Err(SyntaxError::unexpected(
                        line,
                        column,
                        format!("key '{segment}' already has a non-table value"),
                    ))
                }
            };
        }
        Ok(table)
    }

    fn insert_pair(
        &mut self,
        root: &mut TomlTable,
        path: &[String],
        value: TomlElement,
    ) -> Result<()> {
        let line = self.scanner.line();
        let column = self.scanner.column();

        let mut full = self.current.clone();
        full.extend_from_slice(&path[..path.len() - 1]);
        let table = self.navigate(root, &full, line, column)?;
        let key = path.last().expect("key path is never empty").clone();

        if table.contains_key(&key) && self.config.strict {
            return Err(SyntaxError::duplicate_key(line, column, key));
        }
        table.insert(key, value);
        Ok(())
    }

    /// Parses a dot-separated key path; each segment is bare or quoted.
    fn parse_key_path(&mut self) -> Result<Vec<String>> {
        let mut path = vec![self.parse_key_segment()?];
        loop {
            self.scanner.skip_spaces();
            if !self.scanner.eat('.') {
                break;
            }
            self.scanner.skip_spaces();
            path.push(self.parse_key_segment()?);
        }
        Ok(path)
    }

    fn parse_key_segment(&mut self) -> Result<String> {
        match self.scanner.peek() {
            Some('"') => self.scanner.read_quoted('"', EscapeStyle::Toml),
            Some('\'') => self.scanner.read_quoted('\'', EscapeStyle::Toml),
            _ => {
                let bare = self
                    .scanner
                    .take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if bare.is_empty() {
                    Err(self.scanner.error("expected key"))
                } else {
                    Ok(bare.to_string())
                }
            }
        }
    }

    fn parse_value(&mut self) -> Result<TomlElement> {
        match self.scanner.peek() {
            Some('"') if self.scanner.starts_with("\"\"\"") => self.parse_multiline_basic(),
            Some('"') => Ok(TomlElement::String(
                self.scanner.read_quoted('"', EscapeStyle::Toml)?,
            )),
            Some('\'') if self.scanner.starts_with("'''") => self.parse_multiline_literal(),
            Some('\'') => Ok(TomlElement::String(
                self.scanner.read_quoted('\'', EscapeStyle::Toml)?,
            )),
            Some('[') => self.parse_array(),
            Some('{') => self.parse_inline_table(),
            Some('t') | Some('f') => self.parse_bool(),
            Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' => self.parse_numeric_like(),
            Some('i') | Some('n') => self.parse_special_float(),
            Some(ch) => Err(self.scanner.error(format!("unexpected character '{ch}'"))),
            None => Err(self.scanner.eof("a TOML value")),
        }
    }

    fn parse_bool(&mut self) -> Result<TomlElement> {
        if self.scanner.eat_str("true") {
            Ok(TomlElement::Bool(true))
        } else if self.scanner.eat_str("false") {
            Ok(TomlElement::Bool(false))
        } else {
            Err(self.scanner.error("expected boolean"))
        }
    }

    fn parse_special_float(&mut self) -> Result<TomlElement> {
        if self.scanner.eat_str("inf") {
            Ok(TomlElement::Float(f64::INFINITY))
        } else if self.scanner.eat_str("nan") {
            Ok(TomlElement::Float(f64::NAN))
        } else {
            Err(self.scanner.error("expected value"))
        }
    }

    /// Digits can open a number or any of the four date/time literal shapes;
    /// the shape is decided by lookahead before any parsing commits.
    fn parse_numeric_like(&mut self) -> Result<TomlElement> {
        if self.scanner.eat_str("+inf") {
            return Ok(TomlElement::Float(f64::INFINITY));
        }
        if self.scanner.eat_str("-inf") {
            return Ok(TomlElement::Float(f64::NEG_INFINITY));
        }
        if self.scanner.eat_str("+nan") || self.scanner.eat_str("-nan") {
            return Ok(TomlElement::Float(f64::NAN));
        }

        if let Some(element) = self.try_parse_datetime()? {
            return Ok(element);
        }

        Ok(match self.scanner.read_number(NUMBER_STYLE)? {
            Number::Integer(i) => TomlElement::Integer(i),
            Number::Float(f) => TomlElement::Float(f),
        })
    }

    /// Recognizes `HH:MM:SS`, `YYYY-MM-DD`, and date-time/offset-date-time
    /// forms (with `T`, `t` or a single space separating date and time).
    fn try_parse_datetime(&mut self) -> Result<Option<TomlElement>> {
        let rest = self.scanner.rest();
        let line = self.scanner.line();
        let column = self.scanner.column();

        let digits = |s: &str, n: usize| s.len() >= n && s.as_bytes()[..n].iter().all(u8::is_ascii_digit);

        // Local time: HH:MM:SS(.frac)
        if digits(rest, 2) && rest.as_bytes().get(2) == Some(&b':') {
            let token = Self::take_temporal_token(rest, false);
            let time = NaiveTime::parse_from_str(token, "%H:%M:%S%.f")
                .map_err(|_| SyntaxError::invalid_number(line, column, token))?;
            self.advance_over(token);
            return Ok(Some(TomlElement::Time(time)));
        }

        // Anything date-like starts YYYY-MM-DD
        if !(digits(rest, 4) && rest.as_bytes().get(4) == Some(&b'-')) {
            return Ok(None);
        }

        let token = Self::take_temporal_token(rest, true);
        if token.len() == 10 {
            let date = NaiveDate::parse_from_str(token, "%Y-%m-%d")
                .map_err(|_| SyntaxError::invalid_number(line, column, token))?;
            self.advance_over(token);
            return Ok(Some(TomlElement::Date(date)));
        }

        let normalized: String = token
            .chars()
            .enumerate()
            .map(|(i, c)| match c {
                ' ' | 't' if i == 10 => 'T',
                'z' => 'Z',
                c => c,
            })
            .collect();

        let has_offset = normalized.ends_with('Z')
            || normalized[10..].contains('+')
            || normalized[10..].rfind('-').is_some_and(|i| i > 0);

        let element = if has_offset {
            let dt = DateTime::parse_from_rfc3339(&normalized)
                .map_err(|_| SyntaxError::invalid_number(line, column, token))?;
            TomlElement::OffsetDateTime(dt)
        } else {
            let dt = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
                .map_err(|_| SyntaxError::invalid_number(line, column, token))?;
            TomlElement::DateTime(dt)
        };
        self.advance_over(token);
        Ok(Some(element))
    }

    /// Extracts the maximal date/time-shaped prefix: digits and temporal
    /// punctuation, plus at most one embedded space joining date and time.
    fn take_temporal_token(rest: &str, allow_space: bool) -> &str {
        let bytes = rest.as_bytes();
        let mut end = 0;
        while end < bytes.len() {
            let b = bytes[end];
            let temporal = b.is_ascii_digit()
                || matches!(b, b'-' | b':' | b'.' | b'+' | b'T' | b't' | b'Z' | b'z');
            if temporal {
                end += 1;
            } else if allow_space
                && b == b' '
                && end == 10
                && bytes.get(end + 1).is_some_and(u8::is_ascii_digit)
            {
                end += 1;
            } else {
                break;
            }
        }
        &rest[..end]
    }

    fn advance_over(&mut self, token: &str) {
        for _ in token.chars() {
            self.scanner.next();
        }
    }

    fn parse_array(&mut self) -> Result<TomlElement> {
        self.scanner.expect('[')?;
        let mut array = TomlArray::new();

        loop {
            self.skip_trivia();
            if self.scanner.eat(']') {
                break;
            }
            array.push(self.parse_value()?);
            self.skip_trivia();
            if !self.scanner.eat(',') {
                self.skip_trivia();
                self.scanner.expect(']')?;
                break;
            }
        }

        Ok(TomlElement::Array(array))
    }

    fn parse_inline_table(&mut self) -> Result<TomlElement> {
        self.scanner.expect('{')?;
        let mut table = TomlTable::inline();

        self.scanner.skip_spaces();
        if self.scanner.eat('}') {
            return Ok(TomlElement::Table(table));
        }

        loop {
            self.scanner.skip_spaces();
            let line = self.scanner.line();
            let column = self.scanner.column();
            let key = self.parse_key_segment()?;
            self.scanner.skip_spaces();
            self.scanner.expect('=')?;
            self.scanner.skip_spaces();
            let value = self.parse_value()?;
            if table.contains_key(&key) && self.config.strict {
                return Err(SyntaxError::duplicate_key(line, column, key));
            }
            table.insert(key, value);

            self.scanner.skip_spaces();
            if !self.scanner.eat(',') {
                self.scanner.expect('}')?;
                break;
            }
        }

        Ok(TomlElement::Table(table))
    }

    fn parse_multiline_basic(&mut self) -> Result<TomlElement> {
        self.scanner.eat_str("\"\"\"");
        // A newline right after the opening delimiter is trimmed
        self.scanner.eat('\r');
        self.scanner.eat('\n');

        let mut result = String::new();
        loop {
            if self.scanner.eat_str("\"\"\"") {
                return Ok(TomlElement::String(result));
            }
            let Some(ch) = self.scanner.next() else {
                return Err(self.scanner.eof("closing \"\"\""));
            };
            if ch == '\\' {
                // Line-ending backslash swallows the newline and any
                // following whitespace
                if matches!(self.scanner.peek(), Some('\n') | Some('\r')) {
                    self.scanner.skip_whitespace();
                    continue;
                }
                let mark = self.scanner.mark();
                match self.read_basic_escape() {
                    Ok(decoded) => result.push(decoded),
                    Err(err) => {
                        self.scanner.reset(mark);
                        return Err(err);
                    }
                }
            } else {
                result.push(ch);
            }
        }
    }

    fn read_basic_escape(&mut self) -> Result<char> {
        let Some(ch) = self.scanner.next() else {
            return Err(self.scanner.eof("escape character"));
        };
        match ch {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            'u' => self.read_hex_escape(4),
            'U' => self.read_hex_escape(8),
            other => Err(SyntaxError::invalid_escape(
                self.scanner.line(),
                self.scanner.column(),
                format!("unknown escape '\\{other}'"),
            )),
        }
    }

    fn read_hex_escape(&mut self, digits: usize) -> Result<char> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.scanner.next() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                _ => {
                    return Err(SyntaxError::invalid_escape(
                        self.scanner.line(),
                        self.scanner.column(),
                        format!("expected {digits} hex digits"),
                    ))
                }
            }
        }
        u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .ok_or_else(|| {
                SyntaxError::invalid_escape(
                    self.scanner.line(),
                    self.scanner.column(),
                    "invalid code point",
                )
            })
    }

    fn parse_multiline_literal(&mut self) -> Result<TomlElement> {
        self.scanner.eat_str("'''");
        self.scanner.eat('\r');
        self.scanner.eat('\n');

        let mut result = String::new();
        loop {
            if self.scanner.eat_str("'''") {
                return Ok(TomlElement::String(result));
            }
            let Some(ch) = self.scanner.next() else {
                return Err(self.scanner.eof("closing '''"));
            };
            result.push(ch);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toml;

    #[test]
    fn test_basic_key_values() {
        let doc = toml::from_str("title = \"example\"\nenabled = true\ncount = 3").unwrap();
        assert_eq!(doc.get("title").and_then(|v| v.as_str()), Some("example"));
        assert_eq!(doc.get("enabled").and_then(|v| v.as_bool()), Some(true));
        assert_eq!(doc.get("count").and_then(|v| v.as_i64()), Some(3));
    }

    #[test]
    fn test_table_headers() {
        let doc = toml::from_str("[database]\nhost = \"localhost\"\nport = 5432").unwrap();
        let db = doc.get("database").and_then(|v| v.as_table()).unwrap();
        assert_eq!(db.get("host").and_then(|v| v.as_str()), Some("localhost"));
        assert_eq!(db.get("port").and_then(|v| v.as_i64()), Some(5432));
    }

    #[test]
    fn test_dotted_headers_merge() {
        let doc = toml::from_str("[a.b]\nx = 1\n[a.c]\ny = 2").unwrap();
        let a = doc.get("a").and_then(|v| v.as_table()).unwrap();
        assert!(a.get("b").is_some());
        assert!(a.get("c").is_some());
    }

    #[test]
    fn test_dotted_keys() {
        let doc = toml::from_str("server.http.port = 80").unwrap();
        let port = doc
            .get("server")
            .and_then(|v| v.as_table())
            .and_then(|t| t.get("http"))
            .and_then(|v| v.as_table())
            .and_then(|t| t.get("port"))
            .and_then(|v| v.as_i64());
        assert_eq!(port, Some(80));
    }

    #[test]
    fn test_array_of_tables() {
        let doc = toml::from_str("[[fruit]]\nname = \"apple\"\n[[fruit]]\nname = \"pear\"").unwrap();
        let fruit = doc.get("fruit").and_then(|v| v.as_array()).unwrap();
        assert!(fruit.is_of_tables());
        assert_eq!(fruit.len(), 2);
        assert_eq!(
            fruit.get(1).and_then(|v| v.as_table()).and_then(|t| t.get("name")).and_then(|v| v.as_str()),
            Some("pear")
        );
    }

    #[test]
    fn test_subtable_of_array_of_tables() {
        let doc =
            toml::from_str("[[fruit]]\nname = \"apple\"\n[fruit.physical]\ncolor = \"red\"").unwrap();
        let fruit = doc.get("fruit").and_then(|v| v.as_array()).unwrap();
        let physical = fruit
            .get(0)
            .and_then(|v| v.as_table())
            .and_then(|t| t.get("physical"))
            .and_then(|v| v.as_table())
            .unwrap();
        assert_eq!(physical.get("color").and_then(|v| v.as_str()), Some("red"));
    }

    #[test]
    fn test_inline_tables_and_arrays() {
        let doc = toml::from_str("point = { x = 1, y = 2 }\nnums = [1, 2, 3]").unwrap();
        let point = doc.get("point").and_then(|v| v.as_table()).unwrap();
        assert!(point.is_inline());
        assert_eq!(point.get("y").and_then(|v| v.as_i64()), Some(2));

        let nums = doc.get("nums").and_then(|v| v.as_array()).unwrap();
        assert!(!nums.is_of_tables());
        assert_eq!(nums.len(), 3);
    }

    #[test]
    fn test_multiline_array_with_trailing_comma() {
        let doc = toml::from_str("nums = [\n  1,\n  2, # two\n  3,\n]").unwrap();
        assert_eq!(doc.get("nums").and_then(|v| v.as_array()).map(TomlArray::len), Some(3));
    }

    #[test]
    fn test_integer_forms() {
        let doc = toml::from_str(
            "plain = 1_000\nhex = 0xDEADBEEF\noct = 0o755\nbin = 0b11010110\nneg = -17",
        )
        .unwrap();
        assert_eq!(doc.get("plain").and_then(|v| v.as_i64()), Some(1000));
        assert_eq!(doc.get("hex").and_then(|v| v.as_i64()), Some(0xDEAD_BEEF));
        assert_eq!(doc.get("oct").and_then(|v| v.as_i64()), Some(0o755));
        assert_eq!(doc.get("bin").and_then(|v| v.as_i64()), Some(0b1101_0110));
        assert_eq!(doc.get("neg").and_then(|v| v.as_i64()), Some(-17));
    }

    #[test]
    fn test_float_forms() {
        let doc = toml::from_str("a = 3.5\nb = 1e6\nc = 6.626e-34\nd = inf\ne = -inf\nf = nan").unwrap();
        assert_eq!(doc.get("a").and_then(|v| v.as_f64()), Some(3.5));
        assert_eq!(doc.get("b").and_then(|v| v.as_f64()), Some(1e6));
        assert_eq!(doc.get("c").and_then(|v| v.as_f64()), Some(6.626e-34));
        assert_eq!(doc.get("d").and_then(|v| v.as_f64()), Some(f64::INFINITY));
        assert_eq!(doc.get("e").and_then(|v| v.as_f64()), Some(f64::NEG_INFINITY));
        assert!(doc.get("f").and_then(|v| v.as_f64()).unwrap().is_nan());
    }

    #[test]
    fn test_datetime_forms() {
        let doc = toml::from_str(concat!(
            "odt = 1979-05-27T07:32:00Z\n",
            "odt_space = 1979-05-27 07:32:00-07:00\n",
            "ldt = 1979-05-27T07:32:00.999\n",
            "ld = 1979-05-27\n",
            "lt = 07:32:00\n",
        ))
        .unwrap();

        assert!(matches!(doc.get("odt"), Some(TomlElement::OffsetDateTime(_))));
        assert!(matches!(doc.get("odt_space"), Some(TomlElement::OffsetDateTime(_))));
        assert!(matches!(doc.get("ldt"), Some(TomlElement::DateTime(_))));
        assert_eq!(
            doc.get("ld").and_then(|v| v.as_date()),
            NaiveDate::from_ymd_opt(1979, 5, 27)
        );
        assert!(matches!(doc.get("lt"), Some(TomlElement::Time(_))));
    }

    #[test]
    fn test_string_forms() {
        let doc = toml::from_str(concat!(
            "basic = \"tab\\there\"\n",
            "literal = 'C:\\path\\no_escape'\n",
            "ml = \"\"\"\nline one\nline two\"\"\"\n",
            "mll = '''raw ''text'''\n",
        ))
        .unwrap();
        assert_eq!(doc.get("basic").and_then(|v| v.as_str()), Some("tab\there"));
        assert_eq!(
            doc.get("literal").and_then(|v| v.as_str()),
            Some("C:\\path\\no_escape")
        );
        assert_eq!(
            doc.get("ml").and_then(|v| v.as_str()),
            Some("line one\nline two")
        );
        assert_eq!(doc.get("mll").and_then(|v| v.as_str()), Some("raw ''text"));
    }

    #[test]
    fn test_duplicate_key_is_error() {
        assert!(toml::from_str("a = 1\na = 2").is_err());
        assert!(toml::from_str("[t]\n[t]").is_err());

        let lenient = crate::TomlConfig::new().with_strict(false);
        let doc = toml::from_str_with("a = 1\na = 2", &lenient).unwrap();
        assert_eq!(doc.get("a").and_then(|v| v.as_i64()), Some(2));
    }

    #[test]
    fn test_value_must_end_line() {
        assert!(toml::from_str("a = 1 b = 2").is_err());
        assert!(toml::from_str("a = 1 # comment\nb = 2").is_ok());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let doc = toml::from_str("# top\n\na = 1 # inline\n\n# middle\nb = 2\n").unwrap();
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_integer_overflow_is_error() {
        assert!(toml::from_str("big = 99999999999999999999").is_err());
    }
}
