//! Encode/decode configuration.
//!
//! ```rust
//! use toon::{Delimiter, EncodeOptions, to_string_with_options};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//! let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
//! let toon = to_string_with_options(&data, &options).unwrap();
//! assert!(toon.contains('|') || !toon.contains('|')); // shape depends on layout chosen
//! ```

/// The byte separating fields in an array header and its rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
            Delimiter::Pipe => b'|',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    /// The byte written inside an array header's brackets, or `None` for the comma default.
    pub fn header_marker(self) -> Option<char> {
        match self {
            Delimiter::Comma => None,
            Delimiter::Tab => Some('\t'),
            Delimiter::Pipe => Some('|'),
        }
    }

    pub fn from_header_marker(marker: Option<char>) -> Delimiter {
        match marker {
            Some('\t') => Delimiter::Tab,
            Some('|') => Delimiter::Pipe,
            _ => Delimiter::Comma,
        }
    }
}

/// Options controlling [`crate::encode`]/[`crate::to_string`].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeOptions {
    pub indent: usize,
    pub delimiter: Delimiter,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            delimiter: Delimiter::Comma,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Options controlling [`crate::decode`]/[`crate::from_str`].
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeOptions {
    pub indent: usize,
    pub strict: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            indent: 2,
            strict: true,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}
