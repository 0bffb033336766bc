use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{DecodeError, Result};

/// Default maximum decoded payload size: 1024 bytes.
///
/// Matches the transmit buffer the tool has always used. Inputs that decode
/// past this fail with [`DecodeError::PayloadTooLarge`] instead of being
/// silently truncated.
pub const DEFAULT_MAX_PAYLOAD: usize = 1024;

/// How a textual argument is turned into wire bytes.
///
/// Chosen once per invocation from the argument shape and immutable for the
/// run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingMode {
    /// The argument's bytes, unmodified.
    Raw,
    /// `\xHH` escapes expanded; everything else (including malformed escapes)
    /// passed through literally.
    EscapedHex,
    /// A bare hex string, two digits per byte, rejected atomically on any
    /// malformation.
    PackedHex,
}

/// Decode `input` under `mode` with the default payload limit.
pub fn decode(mode: EncodingMode, input: &str) -> Result<Bytes> {
    decode_with_limit(mode, input, DEFAULT_MAX_PAYLOAD)
}

/// Decode `input` under `mode`, failing if the result exceeds `max` bytes.
pub fn decode_with_limit(mode: EncodingMode, input: &str, max: usize) -> Result<Bytes> {
    let out = match mode {
        EncodingMode::Raw => BytesMut::from(input.as_bytes()),
        EncodingMode::EscapedHex => decode_escaped(input.as_bytes()),
        EncodingMode::PackedHex => decode_packed(input)?,
    };

    if out.len() > max {
        return Err(DecodeError::PayloadTooLarge {
            size: out.len(),
            max,
        });
    }

    Ok(out.freeze())
}

/// Expand `\xHH` escapes in a single greedy, non-backtracking pass.
///
/// At each offset: a literal `\x` followed by two hex digits emits one byte
/// and consumes four input bytes. Anything else emits the current byte and
/// consumes one. A malformed escape is never re-attempted as a shorter match,
/// so `\xZZ` comes through as the six literal bytes `\`, `x`, `Z`, `Z`.
fn decode_escaped(input: &[u8]) -> BytesMut {
    let mut out = BytesMut::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'\\' && i + 3 < input.len() && input[i + 1] == b'x' {
            if let (Some(hi), Some(lo)) = (hex_value(input[i + 2]), hex_value(input[i + 3])) {
                out.put_u8((hi << 4) | lo);
                i += 4;
                continue;
            }
        }
        out.put_u8(input[i]);
        i += 1;
    }
    out
}

/// Decode a packed hex string: every adjacent digit pair becomes one byte.
///
/// Fails atomically — no partial output — on odd length or any non-hex
/// character.
fn decode_packed(input: &str) -> Result<BytesMut> {
    if input.len() % 2 != 0 {
        return Err(DecodeError::OddLength { len: input.len() });
    }

    let mut out = BytesMut::with_capacity(input.len() / 2);
    let mut high: Option<u8> = None;
    for (position, c) in input.char_indices() {
        let digit = match c.to_digit(16) {
            Some(d) => d as u8,
            None => return Err(DecodeError::InvalidHexDigit { position, found: c }),
        };
        match high.take() {
            None => high = Some(digit),
            Some(hi) => out.put_u8((hi << 4) | digit),
        }
    }
    Ok(out)
}

fn hex_value(b: u8) -> Option<u8> {
    (b as char).to_digit(16).map(|d| d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_is_identity() {
        let out = decode(EncodingMode::Raw, "hello \\x41 world").unwrap();
        assert_eq!(out.as_ref(), b"hello \\x41 world");
    }

    #[test]
    fn escaped_identity_without_escapes() {
        let input = "The quick brown fox, 0123456789!";
        let out = decode(EncodingMode::EscapedHex, input).unwrap();
        assert_eq!(out.as_ref(), input.as_bytes());
    }

    #[test]
    fn escaped_expands_hello() {
        let out = decode(EncodingMode::EscapedHex, "\\x48\\x65\\x6c\\x6c\\x6f").unwrap();
        assert_eq!(out.as_ref(), &[0x48, 0x65, 0x6c, 0x6c, 0x6f]);
    }

    #[test]
    fn escaped_mixes_literals_and_escapes() {
        let out = decode(EncodingMode::EscapedHex, "at\\x09end\\x0A").unwrap();
        assert_eq!(out.as_ref(), b"at\x09end\x0a");
    }

    #[test]
    fn escaped_is_case_insensitive() {
        let out = decode(EncodingMode::EscapedHex, "\\xaB\\xCd").unwrap();
        assert_eq!(out.as_ref(), &[0xab, 0xcd]);
    }

    #[test]
    fn malformed_escape_passes_through_literally() {
        let out = decode(EncodingMode::EscapedHex, "A\\xZZB").unwrap();
        assert_eq!(out.as_ref(), b"A\\xZZB");
    }

    #[test]
    fn truncated_escape_at_end_is_literal() {
        let out = decode(EncodingMode::EscapedHex, "tail\\x4").unwrap();
        assert_eq!(out.as_ref(), b"tail\\x4");

        let out = decode(EncodingMode::EscapedHex, "tail\\").unwrap();
        assert_eq!(out.as_ref(), b"tail\\");
    }

    #[test]
    fn lone_backslash_is_not_consumed() {
        // A backslash not followed by `x` never starts an escape.
        let out = decode(EncodingMode::EscapedHex, "a\\nb").unwrap();
        assert_eq!(out.as_ref(), b"a\\nb");
    }

    #[test]
    fn packed_decodes_hello() {
        let out = decode(EncodingMode::PackedHex, "48656c6c6f").unwrap();
        assert_eq!(out.as_ref(), &[0x48, 0x65, 0x6c, 0x6c, 0x6f]);
    }

    #[test]
    fn packed_empty_input_yields_no_bytes() {
        let out = decode(EncodingMode::PackedHex, "").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn packed_rejects_odd_length() {
        let err = decode(EncodingMode::PackedHex, "48656").unwrap_err();
        assert!(matches!(err, DecodeError::OddLength { len: 5 }));
    }

    #[test]
    fn packed_rejects_non_hex_digit_with_position() {
        let err = decode(EncodingMode::PackedHex, "48g5").unwrap_err();
        match err {
            DecodeError::InvalidHexDigit { position, found } => {
                assert_eq!(position, 2);
                assert_eq!(found, 'g');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oversized_payload_is_an_error_not_a_truncation() {
        let input = "a".repeat(DEFAULT_MAX_PAYLOAD + 1);
        let err = decode(EncodingMode::Raw, &input).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::PayloadTooLarge { size, max }
                if size == DEFAULT_MAX_PAYLOAD + 1 && max == DEFAULT_MAX_PAYLOAD
        ));
    }

    #[test]
    fn limit_applies_to_decoded_size_not_input_size() {
        // 8 escaped bytes from 32 input characters fits a limit of 8.
        let input = "\\x00".repeat(8);
        let out = decode_with_limit(EncodingMode::EscapedHex, &input, 8).unwrap();
        assert_eq!(out.len(), 8);
    }
}
