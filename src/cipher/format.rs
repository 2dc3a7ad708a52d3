//! Framed AES-256-GCM ciphertext container (component C4).
//!
//! `encrypt_bytes`/`decrypt_bytes` are the core operations; `encrypt_string`/
//! `decrypt_string` and `encrypt_file`/`decrypt_file` are thin convenience
//! wrappers that add a Base64 text encoding or bounded file I/O around the
//! same framed format. The wire format is: [`CiphertextHeader`] followed
//! immediately by the AES-GCM output (ciphertext with the 16-byte
//! authentication tag appended, as the `aes-gcm` crate produces it).

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use std::fs;
use std::path::Path;

use crate::cipher::header::{AlgorithmId, CiphertextHeader};
use crate::config::SecurityConfig;
use crate::encoding::{decode_base64, encode_base64, Base64Flag};
use crate::entropy::random::RandomGenerator;
use crate::error::{CryptoError, CryptoResult};
use crate::io::read_bounded;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_BITS: u32 = 128;
const PARAMS_LEN: usize = NONCE_LEN + 4;

fn require_key_len(key: &[u8]) -> CryptoResult<()> {
    if key.len() != KEY_LEN {
        return Err(CryptoError::InvalidArgument(
            "Key must be 32 bytes for AES-GCM".to_string(),
        ));
    }
    Ok(())
}

/// Build the AES-GCM parameter block: the 12-byte nonce followed by the
/// 4-byte big-endian tag bit length (spec.md §4.4's parameter block
/// layout, always `128`).
fn encode_params(nonce: &[u8]) -> Vec<u8> {
    let mut params = Vec::with_capacity(PARAMS_LEN);
    params.extend_from_slice(nonce);
    params.extend_from_slice(&TAG_BITS.to_be_bytes());
    params
}

/// Split a decoded AES-GCM parameter block back into its nonce and
/// validated tag bit length.
fn decode_params(params: &[u8]) -> CryptoResult<&[u8]> {
    if params.len() != PARAMS_LEN {
        return Err(CryptoError::InvalidHeader(format!(
            "expected {}-byte AES-GCM parameter block, got {}",
            PARAMS_LEN,
            params.len()
        )));
    }
    let nonce = &params[..NONCE_LEN];
    let tag_bits = u32::from_be_bytes(params[NONCE_LEN..PARAMS_LEN].try_into().unwrap());
    if tag_bits != TAG_BITS {
        return Err(CryptoError::InvalidHeader(
            "unexpected tag length".to_string(),
        ));
    }
    Ok(nonce)
}

/// Encrypt `plaintext` under `key` (32 bytes), returning a framed
/// ciphertext: header + nonce-tagged AES-256-GCM output.
///
/// A fresh random nonce is drawn for every call via [`RandomGenerator`];
/// callers never supply or manage nonces directly, which rules out the
/// nonce-reuse failure mode by construction.
pub fn encrypt_bytes(key: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    require_key_len(key)?;

    let nonce_bytes = RandomGenerator::new()
        .next_secure_bytes(NONCE_LEN)?
        .consume(|b| b.to_vec());
    let nonce = Nonce::from_slice(&nonce_bytes);
    let cipher_key = Key::<Aes256Gcm>::from_slice(key);
    let cipher = Aes256Gcm::new(cipher_key);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CryptoError::AuthFailure)?;

    let header = CiphertextHeader::new(AlgorithmId::Aes256Gcm, encode_params(&nonce_bytes));
    let mut out = header.encode()?;
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Decrypt a framed ciphertext produced by [`encrypt_bytes`].
///
/// Returns [`CryptoError::AuthFailure`] if the tag does not verify, which
/// covers both a wrong key and any tampering with the header, nonce, or
/// ciphertext bytes — the header is not itself authenticated separately,
/// but its bytes have no effect on decryption beyond selecting the nonce,
/// so a tampered header either fails to parse ([`CryptoError::InvalidHeader`])
/// or yields a nonce that fails AEAD verification.
pub fn decrypt_bytes(key: &[u8], framed: &[u8]) -> CryptoResult<Vec<u8>> {
    require_key_len(key)?;

    let (header, consumed) = CiphertextHeader::decode(framed)?;
    let nonce_bytes = decode_params(&header.params)?;

    let nonce = Nonce::from_slice(nonce_bytes);
    let cipher_key = Key::<Aes256Gcm>::from_slice(key);
    let cipher = Aes256Gcm::new(cipher_key);

    cipher
        .decrypt(nonce, &framed[consumed..])
        .map_err(|_| CryptoError::AuthFailure)
}

/// Encrypt a UTF-8 string, returning the framed ciphertext rendered as
/// standard, padded Base64 (safe to embed in JSON or a single text field).
pub fn encrypt_string(key: &[u8], plaintext: &str) -> CryptoResult<String> {
    let framed = encrypt_bytes(key, plaintext.as_bytes())?;
    Ok(encode_base64(&framed, Base64Flag::Default))
}

/// Decrypt a Base64 string produced by [`encrypt_string`] back to UTF-8.
pub fn decrypt_string(key: &[u8], encoded: &str) -> CryptoResult<String> {
    let framed = decode_base64(encoded, Base64Flag::Default)?;
    let plaintext = decrypt_bytes(key, &framed)?;
    String::from_utf8(plaintext)
        .map_err(|e| CryptoError::EncodingFailure(format!("decrypted bytes were not UTF-8: {}", e)))
}

/// Encrypt the file at `source` and write the framed ciphertext to
/// `destination`, enforcing the [`SecurityConfig`] size cap before reading.
///
/// The destination is written atomically: ciphertext is staged in a
/// sibling temp file, then renamed into place, so a crash or concurrent
/// read never observes a partially-written destination.
pub fn encrypt_file(key: &[u8], source: &Path, destination: &Path) -> CryptoResult<()> {
    let config = SecurityConfig::default();
    let metadata = fs::metadata(source).map_err(CryptoError::IoFailure)?;
    config.check_file_size(metadata.len())?;

    let file = fs::File::open(source).map_err(CryptoError::IoFailure)?;
    let plaintext = read_bounded(file, config.max_file_size)?;
    let framed = encrypt_bytes(key, &plaintext)?;

    write_atomic(destination, &framed)
}

/// Decrypt the framed ciphertext at `source` and write the recovered
/// plaintext to `destination`, under the same size cap and atomic-write
/// discipline as [`encrypt_file`].
pub fn decrypt_file(key: &[u8], source: &Path, destination: &Path) -> CryptoResult<()> {
    let config = SecurityConfig::default();
    let metadata = fs::metadata(source).map_err(CryptoError::IoFailure)?;
    config.check_file_size(metadata.len())?;

    let file = fs::File::open(source).map_err(CryptoError::IoFailure)?;
    let framed = read_bounded(file, config.max_file_size)?;
    let plaintext = decrypt_bytes(key, &framed)?;

    write_atomic(destination, &plaintext)
}

fn write_atomic(destination: &Path, data: &[u8]) -> CryptoResult<()> {
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    let temp_path = parent.join(format!(
        ".{}.tmp",
        destination
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("secure-crypto-output")
    ));

    fs::write(&temp_path, data).map_err(CryptoError::IoFailure)?;
    fs::rename(&temp_path, destination).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CryptoError::IoFailure(e)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> Vec<u8> {
        vec![0x42u8; KEY_LEN]
    }

    #[test]
    fn round_trips_bytes() {
        let key = test_key();
        let plaintext = b"the quick brown fox jumps over the lazy dog";
        let framed = encrypt_bytes(&key, plaintext).unwrap();
        let decrypted = decrypt_bytes(&key, &framed).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn round_trips_empty_plaintext() {
        let key = test_key();
        let framed = encrypt_bytes(&key, b"").unwrap();
        let decrypted = decrypt_bytes(&key, &framed).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn empty_plaintext_frames_to_exactly_40_bytes() {
        // spec.md §8 scenario 6: 24-byte header (8 fixed + 16 param block)
        // plus the 16-byte GCM tag and no plaintext.
        let key = test_key();
        let framed = encrypt_bytes(&key, b"").unwrap();
        assert_eq!(framed.len(), 40);
    }

    #[test]
    fn tampered_tag_bit_length_is_invalid_header_not_auth_failure() {
        let key = test_key();
        let mut framed = encrypt_bytes(&key, b"secret message").unwrap();
        // Tag-bit-length field occupies the last 4 bytes of the 16-byte
        // parameter block, which starts right after the 8-byte fixed prefix.
        framed[8 + NONCE_LEN] ^= 0xFF;
        let result = decrypt_bytes(&key, &framed);
        assert!(matches!(result, Err(CryptoError::InvalidHeader(_))));
    }

    #[test]
    fn rejects_wrong_key_length() {
        let result = encrypt_bytes(&[0u8; 16], b"data");
        assert!(matches!(result, Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let key_a = test_key();
        let key_b = vec![0x24u8; KEY_LEN];
        let framed = encrypt_bytes(&key_a, b"secret").unwrap();
        let result = decrypt_bytes(&key_b, &framed);
        assert!(matches!(result, Err(CryptoError::AuthFailure)));
    }

    #[test]
    fn tampered_ciphertext_fails_authentication() {
        let key = test_key();
        let mut framed = encrypt_bytes(&key, b"secret message").unwrap();
        let last = framed.len() - 1;
        framed[last] ^= 0xFF;
        let result = decrypt_bytes(&key, &framed);
        assert!(matches!(result, Err(CryptoError::AuthFailure)));
    }

    #[test]
    fn tampered_nonce_fails_authentication() {
        let key = test_key();
        let mut framed = encrypt_bytes(&key, b"secret message").unwrap();
        framed[8] ^= 0xFF; // first byte of the nonce parameter block
        let result = decrypt_bytes(&key, &framed);
        assert!(matches!(result, Err(CryptoError::AuthFailure)));
    }

    #[test]
    fn successive_encryptions_use_distinct_nonces() {
        let key = test_key();
        let a = encrypt_bytes(&key, b"same plaintext").unwrap();
        let b = encrypt_bytes(&key, b"same plaintext").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn string_round_trip() {
        let key = test_key();
        let encoded = encrypt_string(&key, "hello, world").unwrap();
        let decoded = decrypt_string(&key, &encoded).unwrap();
        assert_eq!(decoded, "hello, world");
    }

    #[test]
    fn string_output_is_valid_base64() {
        let key = test_key();
        let encoded = encrypt_string(&key, "hello").unwrap();
        assert!(decode_base64(&encoded, Base64Flag::Default).is_ok());
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let key = test_key();
        let source = dir.path().join("plaintext.txt");
        let encrypted = dir.path().join("ciphertext.bin");
        let decrypted = dir.path().join("decrypted.txt");

        fs::write(&source, b"file contents to protect").unwrap();
        encrypt_file(&key, &source, &encrypted).unwrap();
        decrypt_file(&key, &encrypted, &decrypted).unwrap();

        let result = fs::read(&decrypted).unwrap();
        assert_eq!(result, b"file contents to protect");
    }

    #[test]
    fn file_exceeding_size_cap_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let key = test_key();
        let source = dir.path().join("too_big.bin");
        let destination = dir.path().join("out.bin");

        let config = SecurityConfig::default();
        fs::write(&source, vec![0u8; (config.max_file_size + 1) as usize]).unwrap();

        let result = encrypt_file(&key, &source, &destination);
        assert!(matches!(result, Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn malformed_header_is_rejected() {
        let key = test_key();
        let result = decrypt_bytes(&key, b"not a valid framed ciphertext");
        assert!(matches!(result, Err(CryptoError::InvalidHeader(_))));
    }
}
