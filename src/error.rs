use thiserror::Error;

/// Error taxonomy for the library (spec.md §7).
///
/// Every fallible operation returns one of these kinds. No error is ever
/// recovered internally — it is always surfaced to the caller. Variants may
/// carry sizes, algorithm names, or a parse sub-reason, but never byte
/// values from a sensitive buffer; see [`crate::error_sanitization`].
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Header parsing failed. The string is the specific sub-reason from
    /// spec.md §4.4's ordered validation steps (e.g. "invalid magic").
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// GCM tag mismatch on decrypt — wrong key or tampered ciphertext.
    /// Never raised for a malformed header; header validation always
    /// precedes cipher init.
    #[error("authentication failed")]
    AuthFailure,

    /// The platform-identity handle used by the enhanced entropy mixer
    /// could not be obtained, or CSPRNG initialization failed.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("I/O failure: {0}")]
    IoFailure(#[from] std::io::Error),

    #[error("encoding failure: {0}")]
    EncodingFailure(String),
}

pub type CryptoResult<T> = Result<T, CryptoError>;
