use std::io::{self, Read};

use bytes::Bytes;

use super::*;

fn bytes(s: &'static [u8]) -> Value {
    Value::Bytes(Bytes::from_static(s))
}

/// Reader that yields its data and then fails instead of reporting EOF.
struct FailingReader {
    data: &'static [u8],
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "gone"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), (Value::Integer(42), 4));
    assert_eq!(decode(b"i-42e").unwrap().0, Value::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap().0, Value::Integer(0));
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap().0,
        Value::Integer(i64::MIN)
    );
}

#[test]
fn test_decode_integer_invalid() {
    for input in [
        &b"i-0e"[..],
        b"i04e",
        b"i-04e",
        b"ie",
        b"i-e",
        b"i1x2e",
        b"i9223372036854775808e",
        b"i123456789012345678901234567890e",
    ] {
        assert!(
            matches!(decode(input), Err(DecodeError::InvalidInteger(_))),
            "{:?}",
            String::from_utf8_lossy(input)
        );
    }
}

#[test]
fn test_decode_integer_unterminated() {
    assert!(matches!(decode(b"i42"), Err(DecodeError::UnexpectedEof)));
}

#[test]
fn test_decode_bytes() {
    assert_eq!(decode(b"4:spam").unwrap(), (bytes(b"spam"), 6));
    assert_eq!(decode(b"0:").unwrap(), (bytes(b""), 2));
}

#[test]
fn test_decode_bytes_binary() {
    let (value, _) = decode(b"4:\x00\xff\xfe\x01").unwrap();
    assert_eq!(value.as_bytes().unwrap().as_ref(), b"\x00\xff\xfe\x01");
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_decode_bytes_short() {
    assert!(matches!(decode(b"10:spam"), Err(DecodeError::UnexpectedEof)));
    assert!(matches!(decode(b"4:"), Err(DecodeError::UnexpectedEof)));
}

#[test]
fn test_decode_bytes_invalid_length() {
    assert!(matches!(decode(b"4spam"), Err(DecodeError::InvalidLength)));
    assert!(matches!(decode(b"04:spam"), Err(DecodeError::InvalidLength)));
    assert!(matches!(decode(b"00:"), Err(DecodeError::InvalidLength)));
    assert!(matches!(
        decode(b"99999999999999999999999:x"),
        Err(DecodeError::InvalidLength)
    ));
}

#[test]
fn test_decode_huge_length_prefix() {
    // Fails on missing input rather than trying to allocate the announced size.
    assert!(matches!(
        decode(b"999999999999:abc"),
        Err(DecodeError::UnexpectedEof)
    ));
}

#[test]
fn test_decode_list() {
    let (value, consumed) = decode(b"l4:spam4:eggse").unwrap();
    assert_eq!(value, Value::List(vec![bytes(b"spam"), bytes(b"eggs")]));
    assert_eq!(consumed, 14);

    assert_eq!(decode(b"le").unwrap().0, Value::List(vec![]));
}

#[test]
fn test_decode_dict() {
    let (value, _) = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get(b"cow".as_slice()), Some(&bytes(b"moo")));
    assert_eq!(dict.get(b"spam".as_slice()), Some(&bytes(b"eggs")));
}

#[test]
fn test_decode_dict_keeps_read_order() {
    let (value, _) = decode(b"d4:spam4:eggs3:cow3:mooe").unwrap();
    let keys: Vec<&[u8]> = value.as_dict().unwrap().keys().map(|k| &k[..]).collect();
    assert_eq!(keys, vec![b"spam".as_slice(), b"cow".as_slice()]);
}

#[test]
fn test_decode_dict_duplicate_key_last_wins() {
    let (value, _) = decode(b"d1:ai1e1:bi2e1:ai3ee").unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(value.get(b"a"), Some(&Value::Integer(3)));
    assert_eq!(dict.get_index(0).map(|(k, _)| &k[..]), Some(b"a".as_slice()));
}

#[test]
fn test_decode_dict_invalid_key() {
    assert!(matches!(decode(b"di1ei2ee"), Err(DecodeError::InvalidKey)));
    assert!(matches!(decode(b"dle1:ae"), Err(DecodeError::InvalidKey)));
}

#[test]
fn test_decode_dict_missing_value() {
    assert!(matches!(
        decode(b"d3:fooe"),
        Err(DecodeError::MalformedHeader(b'e'))
    ));
}

#[test]
fn test_decode_unterminated_containers() {
    assert!(matches!(decode(b"l4:spam"), Err(DecodeError::UnexpectedEof)));
    assert!(matches!(decode(b"d3:foo"), Err(DecodeError::UnexpectedEof)));
    assert!(matches!(decode(b"d3:fooi1e"), Err(DecodeError::UnexpectedEof)));
}

#[test]
fn test_decode_malformed_header() {
    assert!(matches!(decode(b"x"), Err(DecodeError::MalformedHeader(b'x'))));
    assert!(matches!(decode(b"e"), Err(DecodeError::MalformedHeader(b'e'))));
    assert!(matches!(decode(b"-1"), Err(DecodeError::MalformedHeader(b'-'))));
}

#[test]
fn test_decode_empty_input() {
    assert!(matches!(decode(b""), Err(DecodeError::UnexpectedEof)));
}

#[test]
fn test_decode_leaves_trailing_bytes() {
    let data = b"i42eextra";
    let (value, consumed) = decode(data).unwrap();
    assert_eq!(value, Value::Integer(42));
    assert_eq!(&data[consumed..], b"extra");
}

#[test]
fn test_decode_complete_rejects_trailing_data() {
    assert!(matches!(
        decode_complete(b"i42eextra"),
        Err(DecodeError::TrailingData)
    ));
    assert_eq!(decode_complete(b"i42e").unwrap(), Value::Integer(42));
}

#[test]
fn test_decoder_sibling_values() {
    let mut decoder = Decoder::new(&b"4:spamli1eed1:ai2ee"[..]);

    assert_eq!(decoder.decode_value().unwrap(), bytes(b"spam"));
    assert_eq!(decoder.bytes_consumed(), 6);

    assert_eq!(
        decoder.decode_value().unwrap(),
        Value::List(vec![Value::Integer(1)])
    );
    assert_eq!(decoder.bytes_consumed(), 11);

    assert_eq!(decoder.decode_value().unwrap().get(b"a"), Some(&Value::Integer(2)));
    assert!(decoder.is_exhausted().unwrap());
    assert!(matches!(decoder.decode_value(), Err(DecodeError::UnexpectedEof)));
}

#[test]
fn test_decoder_source_failure() {
    let mut decoder = Decoder::new(FailingReader { data: b"l4:spam" });
    assert!(matches!(
        decoder.decode_value(),
        Err(DecodeError::SourceFailure(e)) if e.kind() == io::ErrorKind::ConnectionReset
    ));

    let mut decoder = Decoder::new(FailingReader { data: b"10:spam" });
    assert!(matches!(
        decoder.decode_value(),
        Err(DecodeError::SourceFailure(_))
    ));
}

#[test]
fn test_nesting_limit() {
    let config = DecoderConfig::default().with_max_depth(2);

    let mut decoder = Decoder::with_config(&b"lli1eee"[..], config);
    assert!(decoder.decode_value().is_ok());

    let mut decoder = Decoder::with_config(&b"llleee"[..], config);
    assert!(matches!(decoder.decode_value(), Err(DecodeError::TooDeep(2))));

    let mut decoder = Decoder::with_config(&b"d1:ad1:bleee"[..], config);
    assert!(matches!(decoder.decode_value(), Err(DecodeError::TooDeep(2))));
}

#[test]
fn test_default_nesting_limit() {
    let depth = crate::constants::DEFAULT_MAX_DEPTH;

    let mut ok = vec![b'l'; depth];
    ok.extend(vec![b'e'; depth]);
    assert!(decode(&ok).is_ok());

    let mut deep = vec![b'l'; depth + 1];
    deep.extend(vec![b'e'; depth + 1]);
    assert!(matches!(decode(&deep), Err(DecodeError::TooDeep(_))));
}

#[test]
fn test_default_nesting_limit_dicts() {
    let depth = crate::constants::DEFAULT_MAX_DEPTH;

    let nested = |levels: usize| {
        let mut data = b"d1:a".repeat(levels);
        data.extend_from_slice(b"i1e");
        data.extend(vec![b'e'; levels]);
        data
    };

    let (value, consumed) = decode(&nested(depth)).unwrap();
    assert_eq!(consumed, depth * 5 + 3);
    assert_eq!(
        value.get(b"a").and_then(|v| v.get(b"a")).map(Value::kind),
        Some("dictionary")
    );

    assert!(matches!(
        decode(&nested(depth + 1)),
        Err(DecodeError::TooDeep(limit)) if limit == depth
    ));
}

#[test]
fn test_nesting_does_not_grow_call_stack() {
    let depth = 100_000;
    let data = vec![b'l'; depth];

    let result = std::thread::Builder::new()
        .stack_size(64 * 1024)
        .spawn(move || {
            let config = DecoderConfig::default().with_max_depth(depth);
            Decoder::with_config(&data[..], config).decode_value()
        })
        .unwrap()
        .join()
        .unwrap();

    assert!(matches!(result, Err(DecodeError::UnexpectedEof)));
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(42)), b"i42e");
    assert_eq!(encode(&Value::Integer(-42)), b"i-42e");
    assert_eq!(encode(&Value::Integer(0)), b"i0e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode(&bytes(b"spam")), b"4:spam");
    assert_eq!(encode(&bytes(b"")), b"0:");
}

#[test]
fn test_encode_list() {
    let list = Value::List(vec![bytes(b"spam"), Value::Integer(42)]);
    assert_eq!(encode(&list), b"l4:spami42ee");
}

#[test]
fn test_encode_dict_preserves_order() {
    let mut dict = Dict::new();
    dict.insert(Bytes::from_static(b"spam"), bytes(b"eggs"));
    dict.insert(Bytes::from_static(b"cow"), bytes(b"moo"));
    assert_eq!(encode(&Value::Dict(dict)), b"d4:spam4:eggs3:cow3:mooe");
}

#[test]
fn test_encode_to_writer() {
    let mut out = Vec::new();
    encode_to(&Value::List(vec![Value::Integer(7)]), &mut out).unwrap();
    assert_eq!(out, b"li7ee");
}

#[test]
fn test_roundtrip() {
    let original =
        b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let (decoded, _) = decode(original).unwrap();
    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_roundtrip_values() {
    let mut inner = Dict::new();
    inner.insert(Bytes::from_static(b"z"), Value::Integer(i64::MAX));
    inner.insert(Bytes::from_static(b"a"), Value::Integer(i64::MIN));

    let value = Value::List(vec![
        Value::Integer(0),
        Value::Integer(-1),
        bytes(b"\x00\x01\x02"),
        Value::List(vec![]),
        Value::Dict(Dict::new()),
        Value::Dict(inner),
    ]);

    let encoded = encode(&value);
    assert_eq!(decode_complete(&encoded).unwrap(), value);
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert_eq!(value.kind(), "integer");

    let value = bytes(b"test");
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
    assert!(value.get(b"x").is_none());
}
