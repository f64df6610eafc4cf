//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, most notably `.torrent` files.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! Byte strings are raw bytes. They are only interpreted as text on request
//! through [`Value::as_str`].
//!
//! # Examples
//!
//! ## Decoding from a slice
//!
//! ```
//! use bentor::bencode::decode;
//!
//! let (value, consumed) = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//! assert_eq!(list[0].as_str(), Some("spam"));
//! assert_eq!(consumed, 12);
//! ```
//!
//! ## Decoding from a reader
//!
//! ```
//! use bentor::bencode::{Decoder, DecoderConfig};
//! use std::io::Cursor;
//!
//! let config = DecoderConfig::default().with_max_depth(8);
//! let mut decoder = Decoder::with_config(Cursor::new(b"d3:foo3:bare"), config);
//! let value = decoder.decode_value().unwrap();
//! assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
//! ```
//!
//! # Error Handling
//!
//! - [`DecodeError::MalformedHeader`] - A value starts with an unknown byte
//! - [`DecodeError::InvalidInteger`] - Malformed integer (e.g., leading zeros, `-0`)
//! - [`DecodeError::InvalidLength`] - Malformed byte string length prefix
//! - [`DecodeError::InvalidKey`] - A dictionary key is not a byte string
//! - [`DecodeError::UnexpectedEof`] - Input ended inside a value
//! - [`DecodeError::TooDeep`] - Nesting limit exceeded
//! - [`DecodeError::SourceFailure`] - The reader returned an error
//! - [`DecodeError::TrailingData`] - Extra data after the value ([`decode_complete`] only)
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_complete, Decoder, DecoderConfig};
pub use encode::{encode, encode_to};
pub use error::DecodeError;
pub use value::{Dict, Value};

#[cfg(test)]
mod tests;
