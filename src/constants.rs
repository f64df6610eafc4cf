//! Format constants and decoder limits.
//!
//! Values shared by the bencode decoder and the metainfo mapper. Anything a
//! caller may want to tune is also exposed through [`DecoderConfig`] or
//! [`MapperOptions`]; the constants here are the defaults.
//!
//! [`DecoderConfig`]: crate::bencode::DecoderConfig
//! [`MapperOptions`]: crate::metainfo::MapperOptions

// ============================================================================
// Bencode
// ============================================================================

/// Default maximum number of nested lists/dictionaries the decoder will open.
///
/// Well-formed torrents nest a handful of levels deep. Open containers live
/// on a heap stack, so the limit bounds memory rather than call depth.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Longest digit run accepted for an integer (sign excluded).
/// `i64::MIN` has 19 digits.
pub const MAX_INTEGER_DIGITS: usize = 19;

/// Upper bound on the buffer reserved up front for a byte string body.
/// Larger strings grow as bytes actually arrive from the source.
pub const MAX_BODY_PREALLOC: usize = 64 * 1024;

// ============================================================================
// Metainfo
// ============================================================================

/// Length of a single SHA-1 piece hash in the `pieces` field.
pub const PIECE_HASH_LEN: usize = 20;

/// Separator used when joining multi-segment file paths.
pub const PATH_SEPARATOR: &str = "/";
