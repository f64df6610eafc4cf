/// Knobs for the places where real-world torrents and the historical mapping
/// behavior disagree.
///
/// [`MapperOptions::compatible`] (the default) reproduces the historical
/// behavior exactly. [`MapperOptions::standard`] follows BEP-3 instead.
///
/// # Examples
///
/// ```
/// use bentor::metainfo::{unmarshal_with, MapperOptions};
/// use bentor::bencode::decode;
///
/// // A single-file torrent: no `files` list.
/// let data = b"d8:announce3:url4:infod6:lengthi5e4:name1:a12:piece lengthi16e6:pieces20:AAAAAAAAAAAAAAAAAAAAee";
/// let (value, _) = decode(data).unwrap();
///
/// assert!(unmarshal_with(value.clone(), &MapperOptions::compatible()).is_err());
/// let metainfo = unmarshal_with(value, &MapperOptions::standard()).unwrap();
/// assert_eq!(metainfo.info.total_length(), Some(5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// Require a `files` list even when the info dictionary describes a
    /// single file through `length`.
    pub require_files: bool,
    /// Fail instead of dropping trailing bytes when `pieces` is not a
    /// multiple of 20 bytes long.
    pub reject_partial_pieces: bool,
    /// Build [`File::path`](super::File::path) from every path segment
    /// instead of the first one only.
    pub join_path_segments: bool,
    /// Fail on a `piece length` below 1 or a negative file `length`.
    pub reject_invalid_lengths: bool,
}

impl MapperOptions {
    /// Historical behavior: `files` required, partial pieces dropped, first
    /// path segment only, lengths taken as given.
    pub const fn compatible() -> Self {
        Self {
            require_files: true,
            reject_partial_pieces: false,
            join_path_segments: false,
            reject_invalid_lengths: false,
        }
    }

    /// BEP-3 behavior: single- and multi-file layouts, exact pieces, full
    /// paths, no negative sizes.
    pub const fn standard() -> Self {
        Self {
            require_files: false,
            reject_partial_pieces: true,
            join_path_segments: true,
            reject_invalid_lengths: true,
        }
    }
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self::compatible()
    }
}
