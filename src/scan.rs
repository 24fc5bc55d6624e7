//! Shared character-level scanner.
//!
//! All three format readers are built on [`Scanner`] so that escape handling
//! and numeric-literal grammar stay centralized. Format differences (TOML's
//! underscores and radix prefixes, YAML's `\xXX` escapes) are expressed as
//! [`NumberStyle`]/[`EscapeStyle`] knobs rather than duplicated scanning
//! code.
//!
//! Lookahead (`peek`, `eat`, `eat_str`) never fails; only mandatory reads
//! (`expect`, `read_quoted`, `read_number`) return a [`SyntaxError`], always
//! carrying the current line and column.

use crate::error::{Result, SyntaxError};

/// A numeric literal, already disambiguated between integral and floating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// Per-format numeric literal grammar knobs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NumberStyle {
    /// Allow `_` separators between digits (TOML).
    pub underscores: bool,
    /// Allow `0x`/`0o`/`0b` radix prefixes (TOML, YAML).
    pub radix_prefixes: bool,
    /// Allow a leading `+` sign (TOML, YAML).
    pub leading_plus: bool,
    /// On i64 overflow of a decimal integer literal, fall back to `f64`
    /// (JSON, YAML) instead of failing (TOML).
    pub overflow_to_float: bool,
}

/// Per-format backslash-escape grammar inside quoted strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeStyle {
    /// `\" \\ \/ \b \f \n \r \t \uXXXX`
    Json,
    /// JSON set plus `\UXXXXXXXX`, minus `\/`
    Toml,
    /// JSON set plus `\0`, `\xXX`, `\UXXXXXXXX`
    Yaml,
}

/// A saved scanner position, restorable with [`Scanner::reset`].
#[derive(Clone, Copy, Debug)]
pub struct Checkpoint {
    position: usize,
    line: usize,
    column: usize,
}

/// Character cursor over a borrowed input string.
///
/// Tracks byte position plus 1-based line/column for error reporting.
pub struct Scanner<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Scanner {
            input,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current 1-based line.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Current 1-based column.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    /// Returns `true` once the whole input has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Returns the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the character after the next one without consuming anything.
    #[must_use]
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.input[self.position..].chars();
        chars.next();
        chars.next()
    }

    /// Returns the unconsumed remainder of the input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Returns `true` if the unconsumed input starts with `prefix`.
    #[must_use]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.position..].starts_with(prefix)
    }

    /// Consumes and returns the next character.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.input[self.position..].chars().next()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes the next character if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.next();
            true
        } else {
            false
        }
    }

    /// Consumes `literal` if the input starts with it.
    pub fn eat_str(&mut self, literal: &str) -> bool {
        if self.starts_with(literal) {
            for _ in literal.chars() {
                self.next();
            }
            true
        } else {
            false
        }
    }

    /// Consumes the next character, failing with a positioned error if it is
    /// not `expected`.
    pub fn expect(&mut self, expected: char) -> Result<()> {
        match self.peek() {
            Some(ch) if ch == expected => {
                self.next();
                Ok(())
            }
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.eof(format!("'{expected}'"))),
        }
    }

    /// Skips spaces and tabs on the current line.
    pub fn skip_spaces(&mut self) {
        while matches!(self.peek(), Some(' ') | Some('\t')) {
            self.next();
        }
    }

    /// Skips all whitespace, including newlines.
    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.next();
        }
    }

    /// Consumes characters while `pred` holds, returning the consumed slice.
    pub fn take_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.position;
        while let Some(ch) = self.peek() {
            if pred(ch) {
                self.next();
            } else {
                break;
            }
        }
        &self.input[start..self.position]
    }

    /// Saves the current position.
    #[must_use]
    pub fn mark(&self) -> Checkpoint {
        Checkpoint {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    /// Restores a previously saved position.
    pub fn reset(&mut self, checkpoint: Checkpoint) {
        self.position = checkpoint.position;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    /// Builds a positioned syntax error at the current cursor.
    #[must_use]
    pub fn error(&self, msg: impl Into<String>) -> SyntaxError {
        SyntaxError::unexpected(self.line, self.column, msg)
    }

    /// Builds a positioned end-of-input error at the current cursor.
    #[must_use]
    pub fn eof(&self, expected: impl Into<String>) -> SyntaxError {
        SyntaxError::unexpected_eof(self.line, self.column, expected)
    }

    /// Reads a quoted string, including the opening and closing quote,
    /// decoding backslash escapes per `style`.
    ///
    /// Single-quoted strings (`quote == '\''`) use `''` as the only escape
    /// and treat backslashes literally, matching TOML literal strings and
    /// YAML single-quoted scalars.
    pub fn read_quoted(&mut self, quote: char, style: EscapeStyle) -> Result<String> {
        self.expect(quote)?;
        let mut result = String::new();

        loop {
            let Some(ch) = self.next() else {
                return Err(self.eof(format!("closing {quote}")));
            };

            if ch == quote {
                // '' inside a single-quoted string is an escaped quote
                if quote == '\'' && self.peek() == Some('\'') {
                    self.next();
                    result.push('\'');
                    continue;
                }
                return Ok(result);
            }

            if ch == '\\' && quote != '\'' {
                result.push(self.read_escape(style)?);
            } else {
                result.push(ch);
            }
        }
    }

    fn read_escape(&mut self, style: EscapeStyle) -> Result<char> {
        let Some(ch) = self.next() else {
            return Err(self.eof("escape character"));
        };

        match ch {
            'n' => Ok('\n'),
            't' => Ok('\t'),
            'r' => Ok('\r'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            '/' if style != EscapeStyle::Toml => Ok('/'),
            '0' if style == EscapeStyle::Yaml => Ok('\0'),
            'u' => self.read_unicode_escape(4),
            'x' if style == EscapeStyle::Yaml => self.read_unicode_escape(2),
            'U' if style != EscapeStyle::Json => self.read_unicode_escape(8),
            other => Err(SyntaxError::invalid_escape(
                self.line,
                self.column,
                format!("unknown escape '\\{other}'"),
            )),
        }
    }

    fn read_unicode_escape(&mut self, digits: usize) -> Result<char> {
        let mut hex = String::with_capacity(digits);
        for _ in 0..digits {
            match self.next() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                Some(_) | None => {
                    return Err(SyntaxError::invalid_escape(
                        self.line,
                        self.column,
                        format!("expected {digits} hex digits"),
                    ))
                }
            }
        }
        let code_point = u32::from_str_radix(&hex, 16).map_err(|_| {
            SyntaxError::invalid_escape(self.line, self.column, "invalid hex digits")
        })?;
        char::from_u32(code_point).ok_or_else(|| {
            SyntaxError::invalid_escape(
                self.line,
                self.column,
                format!("U+{code_point:X} is not a valid code point"),
            )
        })
    }

    /// Reads a numeric literal, distinguishing integral from floating forms.
    ///
    /// A literal is floating if it contains a fraction or exponent part;
    /// everything else parses as `i64` (subject to
    /// [`NumberStyle::overflow_to_float`]).
    pub fn read_number(&mut self, style: NumberStyle) -> Result<Number> {
        let start_line = self.line;
        let start_column = self.column;

        let sign = match self.peek() {
            Some('-') => {
                self.next();
                Some('-')
            }
            Some('+') if style.leading_plus => {
                self.next();
                Some('+')
            }
            _ => None,
        };
        let negative = sign == Some('-');

        if style.radix_prefixes && self.peek() == Some('0') {
            let prefix = match self.peek_second() {
                Some('x') => Some(('x', 16)),
                Some('o') => Some(('o', 8)),
                Some('b') => Some(('b', 2)),
                _ => None,
            };
            if let Some((marker, radix)) = prefix {
                // Radix literals are unsigned
                if let Some(sign) = sign {
                    return Err(SyntaxError::invalid_number(
                        start_line,
                        start_column,
                        format!("{sign}0{marker}"),
                    ));
                }
                self.next();
                self.next();
                let digits = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let cleaned = self.validate_digits(digits, style, start_line, start_column)?;
                let value = i64::from_str_radix(&cleaned, radix).map_err(|_| {
                    SyntaxError::invalid_number(start_line, start_column, digits)
                })?;
                return Ok(Number::Integer(value));
            }
        }

        let digit = |c: char| c.is_ascii_digit() || (style.underscores && c == '_');

        let int_part = self.take_while(digit);
        if int_part.is_empty() {
            return Err(SyntaxError::invalid_number(
                start_line,
                start_column,
                self.peek().map(String::from).unwrap_or_default(),
            ));
        }
        let int_digits = self.validate_digits(int_part, style, start_line, start_column)?;

        let mut is_float = false;
        let mut literal = int_digits;

        if self.peek() == Some('.') && self.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            self.next();
            is_float = true;
            let frac = self.take_while(digit);
            let frac = self.validate_digits(frac, style, start_line, start_column)?;
            literal.push('.');
            literal.push_str(&frac);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let next = self.peek_second();
            if next.is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-') {
                self.next();
                is_float = true;
                literal.push('e');
                if let Some(sign @ ('+' | '-')) = self.peek() {
                    self.next();
                    literal.push(sign);
                }
                let exp = self.take_while(digit);
                let exp = self.validate_digits(exp, style, start_line, start_column)?;
                if exp.is_empty() {
                    return Err(SyntaxError::invalid_number(
                        start_line,
                        start_column,
                        literal,
                    ));
                }
                literal.push_str(&exp);
            }
        }

        if negative {
            literal.insert(0, '-');
        }

        if is_float {
            literal
                .parse::<f64>()
                .map(Number::Float)
                .map_err(|_| SyntaxError::invalid_number(start_line, start_column, literal.clone()))
        } else {
            match literal.parse::<i64>() {
                Ok(value) => Ok(Number::Integer(value)),
                Err(_) if style.overflow_to_float => literal
                    .parse::<f64>()
                    .map(Number::Float)
                    .map_err(|_| {
                        SyntaxError::invalid_number(start_line, start_column, literal.clone())
                    }),
                Err(_) => Err(SyntaxError::invalid_number(
                    start_line,
                    start_column,
                    literal,
                )),
            }
        }
    }

    /// Strips underscore separators, rejecting leading/trailing/doubled ones.
    fn validate_digits(
        &self,
        digits: &str,
        style: NumberStyle,
        line: usize,
        column: usize,
    ) -> Result<String> {
        if !digits.contains('_') {
            return Ok(digits.to_string());
        }
        if !style.underscores
            || digits.starts_with('_')
            || digits.ends_with('_')
            || digits.contains("__")
        {
            return Err(SyntaxError::invalid_number(line, column, digits));
        }
        Ok(digits.chars().filter(|&c| c != '_').collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let scanner = Scanner::new("abc");
        assert_eq!(scanner.peek(), Some('a'));
        assert_eq!(scanner.peek(), Some('a'));
    }

    #[test]
    fn test_line_column_tracking() {
        let mut scanner = Scanner::new("ab\ncd");
        scanner.next();
        scanner.next();
        scanner.next(); // newline
        assert_eq!(scanner.line(), 2);
        assert_eq!(scanner.column(), 1);
        scanner.next();
        assert_eq!(scanner.column(), 2);
    }

    #[test]
    fn test_eat_str() {
        let mut scanner = Scanner::new("true!");
        assert!(scanner.eat_str("true"));
        assert_eq!(scanner.peek(), Some('!'));
        assert!(!scanner.eat_str("false"));
    }

    #[test]
    fn test_expect_reports_position() {
        let mut scanner = Scanner::new("x");
        let err = scanner.expect(':').unwrap_err();
        assert!(err.to_string().contains("':'"));
    }

    #[test]
    fn test_checkpoint_reset() {
        let mut scanner = Scanner::new("hello");
        let mark = scanner.mark();
        scanner.next();
        scanner.next();
        scanner.reset(mark);
        assert_eq!(scanner.peek(), Some('h'));
    }

    #[test]
    fn test_read_quoted_json_escapes() {
        let mut scanner = Scanner::new(r#""a\nbA""#);
        let s = scanner.read_quoted('"', EscapeStyle::Json).unwrap();
        assert_eq!(s, "a\nbA");
    }

    #[test]
    fn test_read_quoted_yaml_hex_escape() {
        let mut scanner = Scanner::new(r#""\x41\0""#);
        let s = scanner.read_quoted('"', EscapeStyle::Yaml).unwrap();
        assert_eq!(s, "A\0");
    }

    #[test]
    fn test_hex_escape_rejected_in_json() {
        let mut scanner = Scanner::new(r#""\x41""#);
        assert!(scanner.read_quoted('"', EscapeStyle::Json).is_err());
    }

    #[test]
    fn test_single_quote_doubling() {
        let mut scanner = Scanner::new("'it''s'");
        let s = scanner.read_quoted('\'', EscapeStyle::Toml).unwrap();
        assert_eq!(s, "it's");
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("\"abc");
        assert!(scanner.read_quoted('"', EscapeStyle::Json).is_err());
    }

    #[test]
    fn test_read_number_integer_vs_float() {
        let mut scanner = Scanner::new("42");
        assert_eq!(
            scanner.read_number(NumberStyle::default()).unwrap(),
            Number::Integer(42)
        );

        let mut scanner = Scanner::new("42.5");
        assert_eq!(
            scanner.read_number(NumberStyle::default()).unwrap(),
            Number::Float(42.5)
        );

        let mut scanner = Scanner::new("1e3");
        assert_eq!(
            scanner.read_number(NumberStyle::default()).unwrap(),
            Number::Float(1000.0)
        );

        let mut scanner = Scanner::new("-7");
        assert_eq!(
            scanner.read_number(NumberStyle::default()).unwrap(),
            Number::Integer(-7)
        );
    }

    #[test]
    fn test_read_number_underscores() {
        let style = NumberStyle {
            underscores: true,
            ..Default::default()
        };
        let mut scanner = Scanner::new("1_000_000");
        assert_eq!(scanner.read_number(style).unwrap(), Number::Integer(1_000_000));

        let mut scanner = Scanner::new("1__0");
        assert!(scanner.read_number(style).is_err());

        // Underscores rejected when the style does not allow them
        let mut scanner = Scanner::new("1_0");
        assert_eq!(
            scanner.read_number(NumberStyle::default()).unwrap(),
            Number::Integer(1)
        );
    }

    #[test]
    fn test_read_number_radix_prefixes() {
        let style = NumberStyle {
            radix_prefixes: true,
            underscores: true,
            ..Default::default()
        };
        let mut scanner = Scanner::new("0xdead_beef");
        assert_eq!(
            scanner.read_number(style).unwrap(),
            Number::Integer(0xdead_beef)
        );
        let mut scanner = Scanner::new("0o755");
        assert_eq!(scanner.read_number(style).unwrap(), Number::Integer(0o755));
        let mut scanner = Scanner::new("0b1010");
        assert_eq!(scanner.read_number(style).unwrap(), Number::Integer(10));
    }

    #[test]
    fn test_read_number_rejects_signed_radix_literals() {
        let style = NumberStyle {
            radix_prefixes: true,
            leading_plus: true,
            ..Default::default()
        };
        for input in ["-0x10", "+0x10", "-0o7", "+0b1"] {
            let mut scanner = Scanner::new(input);
            assert!(
                matches!(
                    scanner.read_number(style),
                    Err(SyntaxError::InvalidNumber { .. })
                ),
                "accepted {input}"
            );
        }

        // A signed decimal zero is still fine
        let mut scanner = Scanner::new("-0");
        assert_eq!(scanner.read_number(style).unwrap(), Number::Integer(0));
    }

    #[test]
    fn test_read_number_overflow() {
        let huge = "99999999999999999999";

        let mut scanner = Scanner::new(huge);
        assert!(scanner.read_number(NumberStyle::default()).is_err());

        let style = NumberStyle {
            overflow_to_float: true,
            ..Default::default()
        };
        let mut scanner = Scanner::new(huge);
        assert!(matches!(
            scanner.read_number(style).unwrap(),
            Number::Float(_)
        ));
    }
}
