use thiserror::Error;

/// Errors that can occur while parsing or deriving account identifiers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid hexadecimal string format
    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    /// Hex string exceeds maximum allowed length
    #[error("Hex string too long: {len} chars, maximum: {max} chars")]
    HexTooLong { len: usize, max: usize },

    /// Address has invalid length
    #[error("Invalid address length: {len} bytes, expected: {expected} bytes")]
    InvalidAddressLength { len: usize, expected: usize },
}
