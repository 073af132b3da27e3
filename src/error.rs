//! Error types shared by the core codec and the reflective bridge.
//!
//! Every failure mode the codec can hit — both textual-format violations and
//! `decode_into`/`Serialize` binding failures — is one `Error` variant, so callers get a single
//! `Result` alias regardless of which entry point they used.
//!
//! ```rust
//! use toon::{decode, DecodeOptions, Error};
//!
//! let result = decode("[3]: 10,20", &DecodeOptions::default());
//! assert!(matches!(result, Err(Error::CountMismatch { .. })));
//! ```

use std::fmt;
use thiserror::Error as ThisError;

#[derive(Debug, Clone, ThisError)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid syntax at line {line}: {msg}")]
    InvalidSyntax { line: usize, msg: String },

    #[error("missing colon at line {line}: {context}")]
    MissingColon { line: usize, context: String },

    #[error("invalid array header at line {line}: {context}")]
    InvalidHeader { line: usize, context: String },

    #[error("invalid array length at line {line}: {context}")]
    InvalidLength { line: usize, context: String },

    #[error("array declared {expected} item(s) but found {found} at line {line}")]
    CountMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("tabular row has {found} field(s), header declares {expected} at line {line}")]
    WidthMismatch {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid indentation at line {line}: expected a multiple of {indent}, found {found} spaces")]
    InvalidIndentation {
        line: usize,
        indent: usize,
        found: usize,
    },

    #[error("invalid escape sequence {0:?}")]
    InvalidEscape(String),

    #[error("unterminated quoted string starting at line {line}")]
    UnterminatedString { line: usize },

    #[error("blank line inside array body at line {line}")]
    BlankLineInArray { line: usize },

    #[error("out of memory")]
    OutOfMemory,

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("array has {found} element(s), expected {expected}")]
    ArraySizeMismatch { expected: usize, found: usize },

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("invalid enum value `{0}`")]
    InvalidEnumValue(String),

    #[error("invalid union tag `{0}`")]
    InvalidUnionTag(String),

    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub fn invalid_syntax(line: usize, msg: impl Into<String>) -> Self {
        Error::InvalidSyntax {
            line,
            msg: msg.into(),
        }
    }

    pub fn missing_colon(line: usize, context: impl Into<String>) -> Self {
        Error::MissingColon {
            line,
            context: context.into(),
        }
    }

    pub fn invalid_header(line: usize, context: impl Into<String>) -> Self {
        Error::InvalidHeader {
            line,
            context: context.into(),
        }
    }

    pub fn invalid_length(line: usize, context: impl Into<String>) -> Self {
        Error::InvalidLength {
            line,
            context: context.into(),
        }
    }

    pub fn count_mismatch(line: usize, expected: usize, found: usize) -> Self {
        Error::CountMismatch {
            line,
            expected,
            found,
        }
    }

    pub fn width_mismatch(line: usize, expected: usize, found: usize) -> Self {
        Error::WidthMismatch {
            line,
            expected,
            found,
        }
    }

    pub fn invalid_indentation(line: usize, indent: usize, found: usize) -> Self {
        Error::InvalidIndentation {
            line,
            indent,
            found,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Error::Io(msg.into())
    }

    pub fn custom(msg: impl Into<String>) -> Self {
        Error::Custom(msg.into())
    }

    pub fn unsupported_type(msg: impl Into<String>) -> Self {
        Error::UnsupportedType(msg.into())
    }

    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn array_size_mismatch(expected: usize, found: usize) -> Self {
        Error::ArraySizeMismatch { expected, found }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Error::MissingField(field.into())
    }

    pub fn invalid_enum_value(value: impl Into<String>) -> Self {
        Error::InvalidEnumValue(value.into())
    }

    pub fn invalid_union_tag(tag: impl Into<String>) -> Self {
        Error::InvalidUnionTag(tag.into())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn missing_field(field: &'static str) -> Self {
        Error::MissingField(field.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected, exp: &dyn serde::de::Expected) -> Self {
        Error::TypeMismatch {
            expected: exp.to_string(),
            found: unexp.to_string(),
        }
    }

    fn unknown_variant(variant: &str, _expected: &'static [&'static str]) -> Self {
        Error::InvalidEnumValue(variant.to_string())
    }

    /// Serde's derived tuple/fixed-array `Deserialize` impls call this when the decoded
    /// array has the wrong arity; `exp` only carries a human-readable description (e.g.
    /// "a tuple of size 3"), so the expected count is recovered from its first numeric
    /// token, falling back to `len` if none is present.
    fn invalid_length(len: usize, exp: &dyn serde::de::Expected) -> Self {
        let description = exp.to_string();
        let expected = description
            .split(|c: char| !c.is_ascii_digit())
            .find_map(|token| token.parse::<usize>().ok())
            .unwrap_or(len);
        Error::ArraySizeMismatch { expected, found: len }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_line_number() {
        let err = Error::invalid_syntax(7, "unexpected token");
        assert!(err.to_string().contains('7'));
    }
}
