//! Secure buffer, entropy, HKDF key derivation, and framed AES-256-GCM
//! encryption for mobile applications.
//!
//! # Components
//!
//! - [`secure_buffer`] — a zeroizing byte container (C1).
//! - [`entropy`] — the OS-backed random generator and its HKDF-enhanced
//!   variant (C2).
//! - [`kdf`] — domain-separated HKDF key derivation (C3).
//! - [`cipher`] — the framed AES-256-GCM ciphertext container (C4).
//! - [`encoding`] — hex and Base64 rendering (C5).
//!
//! `error`, `config`, `io`, and `error_sanitization` are the ambient
//! support modules shared across all five.

pub mod cipher;
pub mod config;
pub mod encoding;
pub mod entropy;
pub mod error;
pub mod error_sanitization;
pub mod io;
pub mod kdf;
pub mod secure_buffer;

pub use cipher::{decrypt_bytes, decrypt_file, decrypt_string, encrypt_bytes, encrypt_file, encrypt_string};
pub use encoding::{decode_base64, decode_hex, encode_base64, encode_hex, Base64Flag};
pub use entropy::{
    generate_array, generate_as_base64, generate_as_hex, generate_bytes, EnhancedRandomGenerator,
    EntropyQuality, RandomGenerator,
};
pub use error::{CryptoError, CryptoResult};
pub use error_sanitization::{error_code, sanitize_error};
pub use kdf::{derive_key, HkdfAlgorithm};
pub use secure_buffer::SecureBuffer;
