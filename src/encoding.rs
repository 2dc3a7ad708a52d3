//! Hex and Base64 encoding helpers (component C5).
//!
//! A thin leaf used only by [`crate::entropy::random`]'s textual-output
//! convenience functions. Hex is always lowercase with no separators.
//! Base64 supports the four variants spec.md §4.5 names, all emitted as a
//! single continuous string with no line breaks.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose, Engine as _};

/// Which Base64 alphabet/padding combination to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Base64Flag {
    /// Standard alphabet, padded.
    Default,
    /// Standard alphabet, no padding.
    NoPadding,
    /// URL-safe alphabet, padded.
    UrlSafe,
    /// URL-safe alphabet, no padding.
    UrlSafeNoPadding,
}

pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

pub fn decode_hex(s: &str) -> CryptoResult<Vec<u8>> {
    hex::decode(s).map_err(|e| CryptoError::EncodingFailure(format!("invalid hex: {}", e)))
}

pub fn encode_base64(bytes: &[u8], flag: Base64Flag) -> String {
    match flag {
        Base64Flag::Default => general_purpose::STANDARD.encode(bytes),
        Base64Flag::NoPadding => general_purpose::STANDARD_NO_PAD.encode(bytes),
        Base64Flag::UrlSafe => general_purpose::URL_SAFE.encode(bytes),
        Base64Flag::UrlSafeNoPadding => general_purpose::URL_SAFE_NO_PAD.encode(bytes),
    }
}

pub fn decode_base64(s: &str, flag: Base64Flag) -> CryptoResult<Vec<u8>> {
    let result = match flag {
        Base64Flag::Default => general_purpose::STANDARD.decode(s),
        Base64Flag::NoPadding => general_purpose::STANDARD_NO_PAD.decode(s),
        Base64Flag::UrlSafe => general_purpose::URL_SAFE.decode(s),
        Base64Flag::UrlSafeNoPadding => general_purpose::URL_SAFE_NO_PAD.decode(s),
    };
    result.map_err(|e| CryptoError::EncodingFailure(format!("invalid base64: {}", e)))
}
