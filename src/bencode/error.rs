use thiserror::Error;

/// Errors that can occur while decoding bencode.
///
/// Every variant is terminal for the decode call that produced it.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The lead byte does not start any bencode value.
    #[error("malformed header: unexpected byte 0x{0:02x}")]
    MalformedHeader(u8),

    /// An integer is empty, non-canonical, or out of range.
    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    /// A byte string length prefix is non-numeric, non-canonical, or lacks the `:` separator.
    #[error("invalid string length")]
    InvalidLength,

    /// A dictionary key is not a byte string.
    #[error("dictionary key is not a byte string")]
    InvalidKey,

    /// The source ran out before the value was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Containers are nested deeper than the configured limit.
    #[error("nesting deeper than {0} levels")]
    TooDeep(usize),

    /// The byte source itself failed.
    #[error("source failure: {0}")]
    SourceFailure(#[from] std::io::Error),

    /// Bytes remain after a value that was expected to span the whole input.
    #[error("trailing data after value")]
    TrailingData,
}
