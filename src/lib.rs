//! bentor - bencode decoding and typed BitTorrent metainfo
//!
//! Turns the bytes of a `.torrent` file into a [`Metainfo`] record in two
//! layered steps: the [`bencode`] decoder produces a generic [`Value`] tree,
//! and the [`metainfo`] mapper validates that tree into typed fields.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 Bencode decoding and encoding
//! - [`metainfo`] - BEP-3 torrent metainfo mapping
//! - [`constants`] - Format constants and default limits
//!
//! # Example
//!
//! ```
//! use bentor::Metainfo;
//!
//! let data = b"d8:announce13:http://t.com/4:infod5:filesle4:name4:test\
//!              12:piece lengthi50e6:pieces20:AAAAAAAAAAAAAAAAAAAAee";
//! let metainfo = Metainfo::from_bytes(data).unwrap();
//! assert_eq!(metainfo.announce, "http://t.com/");
//! assert_eq!(metainfo.info.name, "test");
//! assert_eq!(metainfo.info.piece_count(), 1);
//! ```

pub mod bencode;
pub mod constants;
mod error;
pub mod metainfo;

pub use bencode::{decode, encode, DecodeError, Decoder, DecoderConfig, Value};
pub use error::Error;
pub use metainfo::{
    unmarshal, File, Info, InfoHash, MapperOptions, Metainfo, MetainfoError, PieceHash,
};
