//! Error types for reading and writing structured documents.
//!
//! Malformed input text is reported through [`SyntaxError`]: a terminal,
//! format-specific error carrying line/column context. Readers never recover
//! from a syntax error and never return a partial tree.
//!
//! Codec encode/decode mismatches use a separate value-based channel
//! ([`crate::codec::CodecError`]) so composite codecs can attempt multiple
//! strategies without error-driven control flow. Keep the two apart: a syntax
//! error means the *text* is broken, a codec error means the *tree* does not
//! fit the target type.
//!
//! ## Examples
//!
//! ```rust
//! use polyform::json;
//!
//! let result = json::from_str("[1, 2");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     eprintln!("parse error: {}", err);
//!     // Messages include line and column information
//! }
//! ```

use thiserror::Error;

/// All errors a reader or writer can produce.
///
/// Every parsing variant includes the line and column (1-based) at which the
/// problem was detected.
#[derive(Debug, Clone, Error)]
pub enum SyntaxError {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Generic structural violation
    #[error("syntax error at line {line}, column {column}: {msg}")]
    Unexpected {
        line: usize,
        column: usize,
        msg: String,
    },

    /// Input ended while a construct was still open
    #[error("unexpected end of input at line {line}, column {column}: expected {expected}")]
    UnexpectedEof {
        line: usize,
        column: usize,
        expected: String,
    },

    /// Malformed backslash escape inside a quoted string
    #[error("invalid escape sequence at line {line}, column {column}: {msg}")]
    InvalidEscape {
        line: usize,
        column: usize,
        msg: String,
    },

    /// Unparseable numeric literal
    #[error("invalid number at line {line}, column {column}: '{literal}'")]
    InvalidNumber {
        line: usize,
        column: usize,
        literal: String,
    },

    /// Key defined twice where the format or config forbids it
    #[error("duplicate key '{key}' at line {line}, column {column}")]
    DuplicateKey {
        line: usize,
        column: usize,
        key: String,
    },

    /// Inconsistent or forbidden indentation (YAML block context)
    #[error("indentation error at line {line}, column {column}: {msg}")]
    Indentation {
        line: usize,
        column: usize,
        msg: String,
    },

    /// YAML alias naming an anchor that was never defined
    #[error("unknown anchor '{name}' at line {line}, column {column}")]
    UnknownAnchor {
        line: usize,
        column: usize,
        name: String,
    },

    /// Leftover content after the document in strict mode
    #[error("trailing content after document at line {line}, column {column}")]
    TrailingContent { line: usize, column: usize },
}

impl SyntaxError {
    /// Creates a generic syntax error with position information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use polyform::SyntaxError;
    ///
    /// let err = SyntaxError::unexpected(10, 5, "expected ':' after key");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn unexpected(line: usize, column: usize, msg: impl Into<String>) -> Self {
        SyntaxError::Unexpected {
            line,
            column,
            msg: msg.into(),
        }
    }

    /// Creates an unexpected end-of-input error.
    pub fn unexpected_eof(line: usize, column: usize, expected: impl Into<String>) -> Self {
        SyntaxError::UnexpectedEof {
            line,
            column,
            expected: expected.into(),
        }
    }

    /// Creates an invalid-escape error.
    pub fn invalid_escape(line: usize, column: usize, msg: impl Into<String>) -> Self {
        SyntaxError::InvalidEscape {
            line,
            column,
            msg: msg.into(),
        }
    }

    /// Creates an invalid numeric literal error.
    pub fn invalid_number(line: usize, column: usize, literal: impl Into<String>) -> Self {
        SyntaxError::InvalidNumber {
            line,
            column,
            literal: literal.into(),
        }
    }

    /// Creates a duplicate-key error.
    pub fn duplicate_key(line: usize, column: usize, key: impl Into<String>) -> Self {
        SyntaxError::DuplicateKey {
            line,
            column,
            key: key.into(),
        }
    }

    /// Creates an indentation error (YAML block context).
    pub fn indentation(line: usize, column: usize, msg: impl Into<String>) -> Self {
        SyntaxError::Indentation {
            line,
            column,
            msg: msg.into(),
        }
    }

    /// Creates an unknown-anchor error for an alias with no matching anchor.
    pub fn unknown_anchor(line: usize, column: usize, name: impl Into<String>) -> Self {
        SyntaxError::UnknownAnchor {
            line,
            column,
            name: name.into(),
        }
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: impl Into<String>) -> Self {
        SyntaxError::Io(msg.into())
    }
}

impl From<std::io::Error> for SyntaxError {
    fn from(err: std::io::Error) -> Self {
        SyntaxError::Io(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_position() {
        let err = SyntaxError::unexpected(3, 14, "expected value");
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("column 14"));
        assert!(msg.contains("expected value"));
    }

    #[test]
    fn test_duplicate_key_names_the_key() {
        let err = SyntaxError::duplicate_key(2, 1, "port");
        assert!(err.to_string().contains("'port'"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: SyntaxError = io.into();
        assert!(matches!(err, SyntaxError::Io(_)));
    }
}
