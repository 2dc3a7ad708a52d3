//! Framed AES-256-GCM ciphertext container (component C4).

pub mod format;
pub mod header;

pub use format::{decrypt_bytes, decrypt_file, decrypt_string, encrypt_bytes, encrypt_file, encrypt_string};
pub use header::{AlgorithmId, CiphertextHeader};
