//! # toon
//!
//! A codec for **TOON** (Token-Oriented Object Notation), a compact, indentation-structured text
//! format designed as a token-efficient alternative to JSON for transferring structured data to
//! large language models. TOON borrows indentation from YAML and delimited rows from CSV, plus
//! an explicit length-and-shape header for every array, so repetitive/tabular data costs far
//! fewer tokens than the equivalent JSON while staying human-readable.
//!
//! ## Two ways in
//!
//! - The **core codec** — [`encode`]/[`decode`] — works directly against [`Value`], the generic
//!   six-variant tree every TOON document maps to. Use this when you're building or inspecting
//!   data dynamically, or writing a frontend (like the `toon` CLI binary) around the format.
//! - The **reflective bridge** — [`to_string`]/[`from_str`]/[`decode_into`] and friends — is a
//!   thin `serde` adapter on top of the core codec, for working with your own `#[derive(Serialize,
//!   Deserialize)]` types.
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use toon::{to_string, from_str};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//! let encoded = to_string(&user).unwrap();
//! assert_eq!(encoded, "id: 123\nname: Alice\nactive: true");
//!
//! let decoded: User = from_str(&encoded).unwrap();
//! assert_eq!(user, decoded);
//! ```
//!
//! ### Tabular arrays
//!
//! Arrays of homogeneous objects serialize as compact tables, using the first item's key order
//! as the column order:
//!
//! ```rust
//! use serde::Serialize;
//! use toon::to_string;
//!
//! #[derive(Serialize)]
//! struct Product { id: u32, name: String }
//!
//! let products = vec![
//!     Product { id: 1, name: "Widget".to_string() },
//!     Product { id: 2, name: "Gadget".to_string() },
//! ];
//! assert_eq!(to_string(&products).unwrap(), "[2]{id,name}:\n  1,Widget\n  2,Gadget");
//! ```
//!
//! ### Dynamic values with the `toon!` macro
//!
//! ```rust
//! use toon::{toon, Value};
//!
//! let data = toon!({ "name": "Alice", "age": 30 });
//! let Value::Object(obj) = &data else { unreachable!() };
//! assert_eq!(obj.get("name").and_then(Value::as_str), Some("Alice"));
//! ```
//!
//! ## Format reference
//!
//! The `demos/` directory has runnable, focused examples (`cargo run --example <name>`).

pub mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod header;
pub mod macros;
pub mod map;
pub mod options;
pub mod quoting;
pub mod tokenizer;
pub mod value;

pub use de::from_value;
pub use decoder::decode;
pub use encoder::encode;
pub use error::{Error, Result};
pub use map::ToonMap;
pub use options::{Delimiter, DecodeOptions, EncodeOptions};
pub use ser::{to_value, ValueSerializer};
pub use value::Value;

mod ser;

use serde::{Deserialize, Serialize};
use std::io;

/// Serialize any `T: Serialize` to a TOON string, via [`to_value`] then [`encode`].
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a [`Value`] (an unsupported `serde`
/// construct such as a map with a non-string key, see `Error::UnsupportedType`).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a TOON string with custom [`EncodeOptions`].
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    encode(&value, options)
}

/// Serialize any `T: Serialize` to a writer in TOON format.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a writer in TOON format with custom [`EncodeOptions`].
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string_with_options(value, options)?;
    writer.write_all(text.as_bytes()).map_err(|e| Error::io(e.to_string()))
}

/// Deserialize an instance of type `T` from a string of TOON text, via [`decode`] then the
/// reflective bridge.
///
/// # Errors
///
/// Returns an error if the input is not valid TOON, or cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    decode_into(s, &DecodeOptions::default())
}

/// The externally-specified reflective adapter: [`decode`] `source` under `options`, then drive
/// a `serde::Deserialize` impl over the resulting [`Value`].
///
/// # Errors
///
/// Returns an error if the input is not valid TOON under `options`, or cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_into<'a, T>(source: &str, options: &DecodeOptions) -> Result<T>
where
    T: Deserialize<'a>,
{
    let value = decode(source, options)?;
    T::deserialize(value)
}

/// Deserialize an instance of type `T` from an I/O stream of TOON text.
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid TOON, or the data
/// cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: for<'de> Deserialize<'de>,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(e.to_string()))?;
    from_str(&text)
}

/// Deserialize an instance of type `T` from bytes of TOON text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8, not valid TOON, or cannot be bound to `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    let s = std::str::from_utf8(v).map_err(|e| Error::custom(e.to_string()))?;
    from_str(s)
}
