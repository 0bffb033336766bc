/// Errors that can occur while decoding a textual payload argument.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// A packed-hex string has an odd number of digits.
    #[error("packed hex input has odd length ({len} digits)")]
    OddLength { len: usize },

    /// A packed-hex string contains a character outside `[0-9a-fA-F]`.
    #[error("invalid hex digit {found:?} at position {position}")]
    InvalidHexDigit { position: usize, found: char },

    /// The decoded payload exceeds the configured maximum size.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
