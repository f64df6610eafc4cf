use thiserror::Error;

/// Structural defects found while mapping a decoded value into [`Metainfo`].
///
/// Only required fields produce errors. Field names are the bencode keys
/// (`"announce"`, `"piece length"`, ...) so messages match the file contents.
///
/// [`Metainfo`]: super::Metainfo
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetainfoError {
    /// The top-level value is not a dictionary.
    #[error("metainfo is not a dictionary")]
    NotADictionary,

    /// A required field is missing from the torrent file.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field has an invalid value or type.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// An entry of the `files` list is missing a field or has the wrong shape.
    #[error("invalid file entry {index}: {field}")]
    InvalidFileEntry {
        /// Position of the entry in the `files` list.
        index: usize,
        /// The offending key, or `"entry"` when the entry is not a dictionary.
        field: &'static str,
    },

    /// The `pieces` string does not split evenly into 20-byte hashes.
    #[error("pieces length {len} is not a multiple of 20")]
    PartialPieces {
        /// Length of the `pieces` byte string.
        len: usize,
    },
}
