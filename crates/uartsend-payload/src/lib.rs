//! Textual payload decoding for uartsend.
//!
//! Turns a user-supplied command-line argument into the exact byte sequence
//! that goes on the wire, under one of three encodings:
//!
//! - [`EncodingMode::Raw`] — the argument's bytes, unmodified
//! - [`EncodingMode::EscapedHex`] — `\xHH` escapes expanded, everything else
//!   passed through literally
//! - [`EncodingMode::PackedHex`] — a bare hex string, two digits per byte,
//!   rejected atomically on any malformation

pub mod decode;
pub mod error;

pub use decode::{decode, decode_with_limit, EncodingMode, DEFAULT_MAX_PAYLOAD};
pub use error::{DecodeError, Result};
