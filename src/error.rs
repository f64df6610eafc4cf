use thiserror::Error;

use crate::bencode::DecodeError;
use crate::metainfo::MetainfoError;

/// Failure of the combined decode-then-map pipeline.
///
/// Decoding and mapping keep their own error types; this enum only says
/// which stage failed.
#[derive(Debug, Error)]
pub enum Error {
    /// The input is not valid bencode.
    #[error("bencode error: {0}")]
    Decode(#[from] DecodeError),

    /// The input is valid bencode but not a valid torrent.
    #[error("metainfo error: {0}")]
    Metainfo(#[from] MetainfoError),
}
