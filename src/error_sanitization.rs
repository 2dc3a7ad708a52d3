//! Error message sanitization.
//!
//! spec.md §7's propagation policy: "Logs MUST NOT include key bytes,
//! plaintext, ciphertext, IVs, or derived-key material. Error messages MAY
//! include sizes, algorithm names, and sub-reasons but MUST NOT include
//! byte values from sensitive buffers." None of the error variants in
//! [`crate::error`] ever carry sensitive bytes directly, but
//! `InvalidArgument`/`InvalidHeader` carry free-form strings built from
//! caller-supplied paths or sub-reasons; this module gives callers that
//! forward errors to their own logging layer a way to scrub those strings
//! of paths and hex-looking byte runs before they leave the process.

use crate::error::CryptoError;

/// Sanitize an error for safe inclusion in logs or telemetry.
pub fn sanitize_error(error: &CryptoError) -> String {
    match error {
        CryptoError::InvalidArgument(msg) => sanitize_message(msg),
        CryptoError::InvalidHeader(reason) => format!("invalid header: {}", reason),
        CryptoError::AuthFailure => "authentication failed".to_string(),
        CryptoError::BackendUnavailable(_) => "backend unavailable".to_string(),
        CryptoError::IoFailure(_) => "I/O operation failed".to_string(),
        CryptoError::EncodingFailure(_) => "encoding failure".to_string(),
    }
}

/// Remove file paths and hex-looking byte runs from a message string.
fn sanitize_message(msg: &str) -> String {
    let mut sanitized = msg.to_string();

    sanitized = regex::Regex::new(r"/[^\s]+")
        .unwrap()
        .replace_all(&sanitized, "[path]")
        .to_string();

    sanitized = regex::Regex::new(r"[A-Z]:\\[^\s]+")
        .unwrap()
        .replace_all(&sanitized, "[path]")
        .to_string();

    // Memory addresses and any other 0x-prefixed hex run — a conservative
    // stand-in for accidentally-formatted byte material.
    sanitized = regex::Regex::new(r"0x[0-9a-fA-F]+")
        .unwrap()
        .replace_all(&sanitized, "[hex]")
        .to_string();

    sanitized
}

/// A stable, generic code suitable for metrics dimensions (never the
/// message text itself, which may still carry caller-supplied detail).
pub fn error_code(error: &CryptoError) -> &'static str {
    match error {
        CryptoError::InvalidArgument(_) => "ERR_INVALID_ARGUMENT",
        CryptoError::InvalidHeader(_) => "ERR_INVALID_HEADER",
        CryptoError::AuthFailure => "ERR_AUTH_FAILURE",
        CryptoError::BackendUnavailable(_) => "ERR_BACKEND_UNAVAILABLE",
        CryptoError::IoFailure(_) => "ERR_IO",
        CryptoError::EncodingFailure(_) => "ERR_ENCODING",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_removes_unix_paths() {
        let error = CryptoError::InvalidArgument("file /home/user/secret.bin too large".to_string());
        let sanitized = sanitize_error(&error);
        assert!(!sanitized.contains("/home/user/secret.bin"));
        assert!(sanitized.contains("[path]"));
    }

    #[test]
    fn sanitize_removes_hex_runs() {
        let error = CryptoError::InvalidArgument("unexpected byte 0x7fff1234".to_string());
        let sanitized = sanitize_error(&error);
        assert!(!sanitized.contains("0x7fff1234"));
    }

    #[test]
    fn error_code_is_stable() {
        assert_eq!(error_code(&CryptoError::AuthFailure), "ERR_AUTH_FAILURE");
    }
}
