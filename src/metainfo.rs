//! Torrent metainfo mapping ([BEP-3]).
//!
//! This module turns a decoded bencode tree into a typed [`Metainfo`] record.
//! It never touches raw bytes itself except through the [`bencode`] layer:
//! decode first, then [`unmarshal`].
//!
//! # Overview
//!
//! A torrent file (`.torrent`) contains metadata about files to be shared:
//! - Tracker URLs for peer discovery
//! - Piece length and the concatenated SHA-1 hash of every piece
//! - File names and sizes
//!
//! # Examples
//!
//! ## Parsing a torrent file
//!
//! ```no_run
//! use bentor::metainfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("example.torrent")?;
//! let torrent = Metainfo::from_bytes(&data)?;
//!
//! println!("Name: {}", torrent.info.name);
//! println!("Info hash: {}", torrent.info_hash);
//! println!("Piece length: {} bytes", torrent.info.piece_length);
//! println!("Number of pieces: {}", torrent.info.piece_count());
//!
//! for file in &torrent.info.files {
//!     println!("  {} ({} bytes)", file.path, file.length);
//! }
//!
//! for tracker in torrent.trackers() {
//!     println!("Tracker: {}", tracker);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Mapping an already decoded value
//!
//! ```
//! use bentor::bencode::decode;
//! use bentor::metainfo::{unmarshal, MetainfoError};
//!
//! let (value, _) = decode(b"d4:infodee").unwrap();
//! assert_eq!(unmarshal(value), Err(MetainfoError::MissingField("announce")));
//! ```
//!
//! # Torrent Structure
//!
//! - **announce** - Primary tracker URL (required)
//! - **announce-list** - Tracker tiers ([BEP-12]); the first URL of each tier is kept
//! - **info** - Core torrent metadata (hashed to create the info hash)
//!   - `files` - List of `{length, path}` entries
//!   - `name` - Suggested file/directory name (optional)
//!   - `length` - Size of a single-file torrent (optional)
//!   - `private` - Private flag (optional)
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA-1 hashes of each piece
//! - **creation date**, **comment**, **created by** - Optional descriptive fields
//!
//! See [`MapperOptions`] for how single-file torrents, partial piece hashes
//! and multi-segment paths are handled.
//!
//! [`bencode`]: crate::bencode
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html
//! [BEP-12]: http://bittorrent.org/beps/bep_0012.html

mod error;
mod info_hash;
mod options;
mod torrent;
mod unmarshal;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use options::MapperOptions;
pub use torrent::{File, Info, Metainfo, PieceHash};
pub use unmarshal::{unmarshal, unmarshal_with};
