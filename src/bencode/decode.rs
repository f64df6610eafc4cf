use super::error::DecodeError;
use super::value::{Dict, Value};
use crate::constants::{DEFAULT_MAX_DEPTH, MAX_BODY_PREALLOC, MAX_INTEGER_DIGITS};
use bytes::Bytes;
use std::io::{self, Read};
use tracing::{debug, trace};

/// Decoder limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of lists/dictionaries that may be open at once.
    pub max_depth: usize,
}

impl DecoderConfig {
    /// Returns a copy of this config with a different nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Decodes one bencode value from the start of `data`.
///
/// Returns the value together with the number of bytes it occupied. Bytes
/// after the value are left untouched, so a concatenation of values can be
/// walked by slicing at the returned offset.
///
/// # Examples
///
/// ```
/// use bentor::bencode::{decode, Value};
///
/// let (value, consumed) = decode(b"i42e4:spam").unwrap();
/// assert_eq!(value, Value::Integer(42));
/// assert_eq!(consumed, 4);
/// ```
pub fn decode(data: &[u8]) -> Result<(Value, usize), DecodeError> {
    let mut decoder = Decoder::new(data);
    let value = decoder.decode_value()?;
    Ok((value, decoder.bytes_consumed()))
}

/// Decodes a value that must span all of `data`.
///
/// # Errors
///
/// Fails with [`DecodeError::TrailingData`] if anything follows the value.
pub fn decode_complete(data: &[u8]) -> Result<Value, DecodeError> {
    let (value, consumed) = decode(data)?;

    if consumed != data.len() {
        return Err(DecodeError::TrailingData);
    }

    Ok(value)
}

/// Streaming bencode decoder over any [`Read`] source.
///
/// The decoder pulls bytes one at a time while parsing headers and reads byte
/// string bodies in bulk, so unbuffered sources such as files should be
/// wrapped in a [`std::io::BufReader`].
///
/// Each call to [`decode_value`](Self::decode_value) consumes exactly one
/// complete value and leaves the source positioned right after it.
///
/// # Examples
///
/// ```
/// use bentor::bencode::{Decoder, Value};
///
/// let mut decoder = Decoder::new(&b"i1ei2e"[..]);
/// assert_eq!(decoder.decode_value().unwrap(), Value::Integer(1));
/// assert_eq!(decoder.decode_value().unwrap(), Value::Integer(2));
/// assert!(decoder.is_exhausted().unwrap());
/// ```
pub struct Decoder<R> {
    reader: R,
    peeked: Option<u8>,
    consumed: usize,
    config: DecoderConfig,
}

/// A container that has been opened but not yet closed.
enum Frame {
    List(Vec<Value>),
    Dict { dict: Dict, key: Option<Bytes> },
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder with the default limits.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    /// Creates a decoder with explicit limits.
    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader,
            peeked: None,
            consumed: 0,
            config,
        }
    }

    /// Total bytes consumed by the values decoded so far.
    pub fn bytes_consumed(&self) -> usize {
        self.consumed
    }

    /// Returns `true` if the source has no more bytes.
    ///
    /// This may read one byte ahead; the byte is kept for the next decode.
    pub fn is_exhausted(&mut self) -> Result<bool, DecodeError> {
        Ok(self.peek()?.is_none())
    }

    /// Returns the underlying reader.
    ///
    /// A byte read ahead by [`is_exhausted`](Self::is_exhausted) is lost.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decodes the next complete value from the source.
    pub fn decode_value(&mut self) -> Result<Value, DecodeError> {
        let start = self.consumed;
        let value = self.value()?;
        trace!(
            kind = value.kind(),
            len = self.consumed - start,
            "decoded bencode value"
        );
        Ok(value)
    }

    /// Decodes one value, keeping open containers on a heap stack so the
    /// nesting depth never grows the call stack.
    fn value(&mut self) -> Result<Value, DecodeError> {
        let mut open: Vec<Frame> = Vec::new();

        loop {
            let lead = self.peek()?.ok_or(DecodeError::UnexpectedEof)?;

            let value = match (open.pop(), lead) {
                (Some(Frame::List(list)), b'e') => {
                    self.next_byte()?;
                    Value::List(list)
                }
                (Some(Frame::Dict { dict, key: None }), b'e') => {
                    self.next_byte()?;
                    Value::Dict(dict)
                }
                (Some(Frame::Dict { dict, key: None }), b'0'..=b'9') => {
                    let key = self.byte_string()?;
                    open.push(Frame::Dict {
                        dict,
                        key: Some(key),
                    });
                    continue;
                }
                (Some(Frame::Dict { key: None, .. }), _) => return Err(DecodeError::InvalidKey),
                (top, _) => {
                    open.extend(top);
                    match lead {
                        b'i' => self.integer()?,
                        b'0'..=b'9' => Value::Bytes(self.byte_string()?),
                        b'l' | b'd' => {
                            self.open_container(open.len())?;
                            open.push(if lead == b'l' {
                                Frame::List(Vec::new())
                            } else {
                                Frame::Dict {
                                    dict: Dict::new(),
                                    key: None,
                                }
                            });
                            continue;
                        }
                        c => return Err(DecodeError::MalformedHeader(c)),
                    }
                }
            };

            match open.last_mut() {
                None => return Ok(value),
                Some(Frame::List(list)) => list.push(value),
                // A value is only read once its key is pending.
                Some(Frame::Dict { dict, key }) => {
                    if let Some(key) = key.take() {
                        if let Some(previous) = dict.insert(key, value) {
                            debug!(
                                replaced = previous.kind(),
                                "duplicate dictionary key, keeping the last value"
                            );
                        }
                    }
                }
            }
        }
    }

    fn integer(&mut self) -> Result<Value, DecodeError> {
        self.next_byte()?;

        // Sign plus the widest i64 magnitude.
        let mut raw = Vec::with_capacity(MAX_INTEGER_DIGITS + 1);
        loop {
            match self.next_byte()? {
                b'e' => break,
                c if raw.len() > MAX_INTEGER_DIGITS => {
                    raw.push(c);
                    return Err(DecodeError::InvalidInteger(format!(
                        "{}...",
                        String::from_utf8_lossy(&raw)
                    )));
                }
                c => raw.push(c),
            }
        }

        parse_integer(&raw).map(Value::Integer)
    }

    fn byte_string(&mut self) -> Result<Bytes, DecodeError> {
        let len = self.length_prefix()?;

        // The prefix ends on ':' which is always consumed, never peeked.
        debug_assert!(self.peeked.is_none());

        let mut body = Vec::with_capacity(len.min(MAX_BODY_PREALLOC));
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut body)?;
        self.consumed += read;

        if read < len {
            return Err(DecodeError::UnexpectedEof);
        }

        Ok(Bytes::from(body))
    }

    fn length_prefix(&mut self) -> Result<usize, DecodeError> {
        let mut len: usize = 0;
        let mut digits = 0;

        loop {
            match self.next_byte()? {
                b':' if digits > 0 => return Ok(len),
                c @ b'0'..=b'9' => {
                    if digits == 1 && len == 0 {
                        return Err(DecodeError::InvalidLength);
                    }
                    digits += 1;
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(c - b'0')))
                        .ok_or(DecodeError::InvalidLength)?;
                }
                _ => return Err(DecodeError::InvalidLength),
            }
        }
    }

    /// Consumes the `l`/`d` lead byte once the nesting limit allows it.
    /// `depth` is the number of containers already open.
    fn open_container(&mut self, depth: usize) -> Result<(), DecodeError> {
        if depth >= self.config.max_depth {
            return Err(DecodeError::TooDeep(self.config.max_depth));
        }
        self.next_byte()?;
        Ok(())
    }

    fn peek(&mut self) -> Result<Option<u8>, DecodeError> {
        if self.peeked.is_none() {
            self.peeked = self.read_byte()?;
        }
        Ok(self.peeked)
    }

    fn next_byte(&mut self) -> Result<u8, DecodeError> {
        let byte = match self.peeked.take() {
            Some(b) => b,
            None => self.read_byte()?.ok_or(DecodeError::UnexpectedEof)?,
        };
        self.consumed += 1;
        Ok(byte)
    }

    fn read_byte(&mut self) -> Result<Option<u8>, DecodeError> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(DecodeError::SourceFailure(e)),
            }
        }
    }
}

fn parse_integer(raw: &[u8]) -> Result<i64, DecodeError> {
    let text = String::from_utf8_lossy(raw);
    let magnitude = raw.strip_prefix(b"-").unwrap_or(raw);

    if magnitude.is_empty() {
        return Err(DecodeError::InvalidInteger("empty".into()));
    }

    if !magnitude.iter().all(u8::is_ascii_digit) {
        return Err(DecodeError::InvalidInteger(text.into_owned()));
    }

    if magnitude[0] == b'0' && raw.len() > 1 {
        return Err(DecodeError::InvalidInteger("leading zeros".into()));
    }

    text.parse()
        .map_err(|_| DecodeError::InvalidInteger(text.into_owned()))
}
