use super::info_hash::InfoHash;
use super::options::MapperOptions;
use super::unmarshal::unmarshal_with;
use crate::bencode::{decode, Decoder};
use crate::constants::PIECE_HASH_LEN;
use crate::error::Error;
use bytes::Bytes;
use std::io::{BufReader, Read};
use tracing::warn;

/// SHA-1 hash of one piece.
pub type PieceHash = [u8; PIECE_HASH_LEN];

/// A parsed torrent file.
///
/// Built by [`unmarshal`](super::unmarshal) from a decoded value, or straight
/// from bytes with [`Metainfo::from_bytes`]. Owns all of its data; nothing
/// borrows from the decoded tree.
///
/// # Examples
///
/// ```no_run
/// use bentor::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let file = std::fs::File::open("example.torrent")?;
/// let metainfo = Metainfo::from_reader(file)?;
///
/// println!("Torrent: {}", metainfo.info.name);
/// println!("Pieces: {}", metainfo.info.piece_count());
/// println!("Info hash: {}", metainfo.info_hash);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metainfo {
    /// Primary tracker URL.
    pub announce: String,
    /// One URL per `announce-list` tier (the first of each), or `None` if the
    /// torrent has no `announce-list`.
    pub announce_list: Option<Vec<String>>,
    /// The info dictionary containing file and piece information.
    pub info: Info,
    /// SHA-1 of the bencoded info dictionary.
    pub info_hash: InfoHash,
    /// Unix timestamp when the torrent was created.
    pub creation_date: Option<i64>,
    /// Optional comment about the torrent.
    pub comment: Option<String>,
    /// Name/version of the program that created the torrent.
    pub created_by: Option<String>,
    pub(crate) raw_info: Bytes,
}

/// The info dictionary from a torrent file.
///
/// `name`, `length` and `private` are optional in the source and hold their
/// zero value when absent or malformed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Info {
    /// Suggested name for the file or directory.
    pub name: String,
    /// Size in bytes of a single-file torrent.
    pub length: i64,
    /// Number of bytes per piece.
    pub piece_length: i64,
    /// SHA-1 hash of each piece.
    pub pieces: Vec<PieceHash>,
    /// `1` if clients should only use the trackers listed in the metainfo.
    pub private: i64,
    /// Files of a multi-file torrent, in listed order.
    pub files: Vec<File>,
}

/// A file within a multi-file torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    /// Size of the file in bytes.
    pub length: i64,
    /// Path of the file; see [`MapperOptions::join_path_segments`].
    pub path: String,
    /// Every segment of the `path` list, in order.
    pub path_segments: Vec<String>,
}

impl Metainfo {
    /// Decodes and maps a torrent file held in memory, with default options.
    ///
    /// Bytes following the top-level dictionary are ignored.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        Self::from_bytes_with(data, &MapperOptions::default())
    }

    /// Like [`from_bytes`](Self::from_bytes) with explicit mapping options.
    pub fn from_bytes_with(data: &[u8], options: &MapperOptions) -> Result<Self, Error> {
        let (value, consumed) = decode(data)?;

        if consumed < data.len() {
            warn!(
                trailing = data.len() - consumed,
                "ignoring bytes after the metainfo dictionary"
            );
        }

        Ok(unmarshal_with(value, options)?)
    }

    /// Decodes and maps a torrent file from a reader, with default options.
    ///
    /// The reader is buffered internally and is read up to the end of the
    /// top-level value only.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        Self::from_reader_with(reader, &MapperOptions::default())
    }

    /// Like [`from_reader`](Self::from_reader) with explicit mapping options.
    pub fn from_reader_with<R: Read>(reader: R, options: &MapperOptions) -> Result<Self, Error> {
        let mut decoder = Decoder::new(BufReader::new(reader));
        let value = decoder.decode_value()?;
        Ok(unmarshal_with(value, options)?)
    }

    /// Returns the bencoded info dictionary the info hash was computed from.
    ///
    /// This is the info value re-encoded in the order it was read, which
    /// matches the original bytes unless the dictionary repeated a key.
    pub fn raw_info(&self) -> &Bytes {
        &self.raw_info
    }

    /// Returns all tracker URLs from both `announce` and `announce-list`.
    ///
    /// The primary tracker comes first. Duplicates are removed.
    pub fn trackers(&self) -> Vec<String> {
        let mut trackers = vec![self.announce.clone()];

        for tracker in self.announce_list.iter().flatten() {
            if !trackers.contains(tracker) {
                trackers.push(tracker.clone());
            }
        }

        trackers
    }
}

impl Info {
    /// Number of piece hashes.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// Total content size: the sum of file lengths, or `length` when the
    /// torrent lists no files.
    ///
    /// Returns `None` if the file lengths overflow an `i64`.
    pub fn total_length(&self) -> Option<i64> {
        if self.files.is_empty() {
            return Some(self.length);
        }
        self.files
            .iter()
            .try_fold(0i64, |total, file| total.checked_add(file.length))
    }

    /// Returns `true` if the torrent is marked private.
    pub fn is_private(&self) -> bool {
        self.private == 1
    }
}
