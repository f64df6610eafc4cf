//! Mapping from a decoded bencode tree to [`Metainfo`].
//!
//! Required fields are checked in a fixed order so that the same input always
//! reports the same first defect:
//!
//! 1. `announce`
//! 2. `announce-list` (only when present)
//! 3. `info`
//! 4. `files`
//! 5. `piece length`
//! 6. `pieces`
//!
//! `name`, `length` and `private` inside `info`, as well as `creation date`,
//! `comment` and `created by`, are soft-optional: a missing or malformed value
//! leaves the field at its zero value and never fails the mapping.

use super::error::MetainfoError;
use super::info_hash::InfoHash;
use super::options::MapperOptions;
use super::torrent::{File, Info, Metainfo, PieceHash};
use crate::bencode::{encode, Dict, Value};
use crate::constants::{PATH_SEPARATOR, PIECE_HASH_LEN};
use bytes::Bytes;
use tracing::{debug, trace, warn};

/// Maps a decoded value into [`Metainfo`] with the default options.
///
/// # Errors
///
/// Returns the first defect found along the fixed check order, or
/// [`MetainfoError::NotADictionary`] if `value` is not a dictionary.
///
/// # Examples
///
/// ```
/// use bentor::bencode::decode;
/// use bentor::metainfo::unmarshal;
///
/// let data = b"d8:announce13:http://t.com/4:infod5:filesle12:piece lengthi16e6:pieces0:ee";
/// let (value, _) = decode(data).unwrap();
/// let metainfo = unmarshal(value).unwrap();
/// assert_eq!(metainfo.announce, "http://t.com/");
/// assert_eq!(metainfo.info.piece_length, 16);
/// ```
pub fn unmarshal(value: Value) -> Result<Metainfo, MetainfoError> {
    unmarshal_with(value, &MapperOptions::default())
}

/// Maps a decoded value into [`Metainfo`] with explicit options.
pub fn unmarshal_with(value: Value, options: &MapperOptions) -> Result<Metainfo, MetainfoError> {
    let root = value.into_dict().ok_or(MetainfoError::NotADictionary)?;

    let announce = required(&root, "announce", text)?;

    let announce_list = match root.get(b"announce-list".as_slice()) {
        Some(value) => Some(parse_announce_list(value)?),
        None => None,
    };

    let info_value = root
        .get(b"info".as_slice())
        .ok_or(MetainfoError::MissingField("info"))?;
    let info_dict = info_value
        .as_dict()
        .ok_or(MetainfoError::InvalidField("info"))?;

    let info = parse_info(info_dict, options)?;

    let raw_info = Bytes::from(encode(info_value));
    let info_hash = InfoHash::from_info_bytes(&raw_info);

    let creation_date = optional(&root, "creation date", Value::as_integer);
    let comment = optional(&root, "comment", text);
    let created_by = optional(&root, "created by", text);

    debug!(
        %announce,
        %info_hash,
        pieces = info.pieces.len(),
        files = info.files.len(),
        "mapped metainfo"
    );

    Ok(Metainfo {
        announce,
        announce_list,
        info,
        info_hash,
        creation_date,
        comment,
        created_by,
        raw_info,
    })
}

fn parse_info(dict: &Dict, options: &MapperOptions) -> Result<Info, MetainfoError> {
    let files = parse_files(dict, options)?;

    let name = optional(dict, "name", text).unwrap_or_default();
    let length = optional(dict, "length", Value::as_integer).unwrap_or_default();
    let private = optional(dict, "private", Value::as_integer).unwrap_or_default();

    let piece_length = required(dict, "piece length", Value::as_integer)?;
    if options.reject_invalid_lengths && piece_length < 1 {
        return Err(MetainfoError::InvalidField("piece length"));
    }
    let pieces = parse_pieces(dict, options)?;

    Ok(Info {
        name,
        length,
        piece_length,
        pieces,
        private,
        files,
    })
}

/// Each tier contributes its first URL. Empty tiers contribute nothing.
fn parse_announce_list(value: &Value) -> Result<Vec<String>, MetainfoError> {
    const FIELD: &str = "announce-list";

    let tiers = value.as_list().ok_or(MetainfoError::InvalidField(FIELD))?;
    let mut urls = Vec::with_capacity(tiers.len());

    for tier in tiers {
        let tier = tier.as_list().ok_or(MetainfoError::InvalidField(FIELD))?;
        if !tier.iter().all(|url| url.as_bytes().is_some()) {
            return Err(MetainfoError::InvalidField(FIELD));
        }

        match tier.first() {
            Some(url) => urls.push(text(url).ok_or(MetainfoError::InvalidField(FIELD))?),
            None => trace!("skipping empty announce-list tier"),
        }
    }

    Ok(urls)
}

fn parse_files(dict: &Dict, options: &MapperOptions) -> Result<Vec<File>, MetainfoError> {
    let entries = match dict.get(b"files".as_slice()) {
        Some(Value::List(entries)) => entries,
        Some(_) => return Err(MetainfoError::InvalidField("files")),
        None if options.require_files => return Err(MetainfoError::MissingField("files")),
        None => {
            match dict.get(b"length".as_slice()).and_then(Value::as_integer) {
                None => return Err(MetainfoError::MissingField("length or files")),
                Some(length) if length < 0 && options.reject_invalid_lengths => {
                    return Err(MetainfoError::InvalidField("length"));
                }
                Some(_) => {}
            }
            return Ok(Vec::new());
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_file(index, entry, options))
        .collect()
}

fn parse_file(index: usize, entry: &Value, options: &MapperOptions) -> Result<File, MetainfoError> {
    let invalid = |field| MetainfoError::InvalidFileEntry { index, field };

    let dict = entry.as_dict().ok_or_else(|| invalid("entry"))?;

    let length = dict
        .get(b"length".as_slice())
        .and_then(Value::as_integer)
        .filter(|&length| length >= 0 || !options.reject_invalid_lengths)
        .ok_or_else(|| invalid("length"))?;

    let path_segments = dict
        .get(b"path".as_slice())
        .and_then(Value::as_list)
        .and_then(|segments| segments.iter().map(text).collect::<Option<Vec<_>>>())
        .filter(|segments| !segments.is_empty())
        .ok_or_else(|| invalid("path"))?;

    let path = if options.join_path_segments {
        path_segments.join(PATH_SEPARATOR)
    } else {
        path_segments[0].clone()
    };

    Ok(File {
        length,
        path,
        path_segments,
    })
}

fn parse_pieces(dict: &Dict, options: &MapperOptions) -> Result<Vec<PieceHash>, MetainfoError> {
    let raw = required(dict, "pieces", Value::as_bytes)?;

    let remainder = raw.len() % PIECE_HASH_LEN;
    if remainder != 0 {
        if options.reject_partial_pieces {
            return Err(MetainfoError::PartialPieces { len: raw.len() });
        }
        warn!(
            len = raw.len(),
            dropped = remainder,
            "pieces length is not a multiple of {}, dropping trailing bytes",
            PIECE_HASH_LEN
        );
    }

    Ok(raw
        .chunks_exact(PIECE_HASH_LEN)
        .map(|chunk| {
            let mut hash = [0u8; PIECE_HASH_LEN];
            hash.copy_from_slice(chunk);
            hash
        })
        .collect())
}

fn text(value: &Value) -> Option<String> {
    value.as_str().map(String::from)
}

fn required<'a, T>(
    dict: &'a Dict,
    key: &'static str,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> Result<T, MetainfoError> {
    let value = dict
        .get(key.as_bytes())
        .ok_or(MetainfoError::MissingField(key))?;
    extract(value).ok_or(MetainfoError::InvalidField(key))
}

fn optional<'a, T>(
    dict: &'a Dict,
    key: &'static str,
    extract: impl FnOnce(&'a Value) -> Option<T>,
) -> Option<T> {
    let value = dict.get(key.as_bytes())?;
    let extracted = extract(value);

    if extracted.is_none() {
        debug!(
            field = key,
            found = value.kind(),
            "ignoring malformed optional field"
        );
    }

    extracted
}
