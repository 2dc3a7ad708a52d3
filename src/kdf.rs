//! HKDF key derivation (component C3), RFC 5869.
//!
//! The public operation, [`derive_key`], is domain-separated: callers
//! supply a `domain` and a `context`, which this module combines into an
//! `info` string of the form
//! `com.mavbozo.androidsecurecrypto.<domain>.v1:<context>` before calling
//! HKDF-Expand. Two calls with the same master key but different domain or
//! context produce unrelated output, even under the same hash algorithm
//! (spec.md §4.3 determinism/domain-separation properties). The Extract
//! step always uses an all-zero salt of length equal to the hash's MAC
//! length — RFC 5869 §2.2's "salt not provided" case — so the only caller
//! inputs that affect the derivation are the master key, domain, and
//! context.
//!
//! [`entropy::enhanced`](crate::entropy::enhanced) needs a lower-level
//! HKDF call with its own salt and info (the platform-identity mixer is
//! not a domain-separated key derivation from a master key), so the raw
//! expand step is factored out as `hkdf_expand` and kept `pub(crate)`.

use hkdf::Hkdf;
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use crate::error::{CryptoError, CryptoResult};
use crate::secure_buffer::SecureBuffer;

const INFO_PREFIX: &str = "com.mavbozo.androidsecurecrypto";

/// Minimum length spec.md §3 Invariant 5 requires of `derive_key`'s master
/// key input.
const MIN_MASTER_KEY_LEN: usize = 16;

/// Hash function backing an HKDF derivation.
///
/// `Sha1` is offered only for interoperating with legacy peers that
/// already settled on SHA-1 HKDF; new call sites should prefer
/// [`HkdfAlgorithm::Sha256`] or [`HkdfAlgorithm::Sha512`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HkdfAlgorithm {
    Sha256,
    Sha512,
    Sha1,
}

impl HkdfAlgorithm {
    /// HMAC output length in bytes for this algorithm (spec.md §3's
    /// `SHA256 (32)` / `SHA512 (64)` / `SHA1 (20, deprecated)` table).
    pub fn mac_len(&self) -> usize {
        match self {
            HkdfAlgorithm::Sha256 => 32,
            HkdfAlgorithm::Sha512 => 64,
            HkdfAlgorithm::Sha1 => 20,
        }
    }

    /// Byte length HKDF-Expand can safely produce under RFC 5869 §2.3's
    /// `255 * HashLen` bound for this algorithm.
    pub fn max_output_len(&self) -> usize {
        255 * self.mac_len()
    }
}

impl Default for HkdfAlgorithm {
    fn default() -> Self {
        HkdfAlgorithm::Sha256
    }
}

/// Raw HKDF-Extract-then-Expand over caller-supplied salt and info, with no
/// domain-separation or master-key-length policy applied.
///
/// Used internally by [`derive_key`] (with the all-zero salt and the
/// `com.mavbozo...` info string) and by the enhanced entropy mixer (with a
/// platform-identity salt and its own info string). Not exposed outside the
/// crate: external callers go through [`derive_key`], which is the only
/// operation spec.md names as C3's public surface.
pub(crate) fn hkdf_expand(
    algorithm: HkdfAlgorithm,
    ikm: &[u8],
    salt: &[u8],
    info: &[u8],
    output_len: usize,
) -> CryptoResult<Vec<u8>> {
    let mut output = vec![0u8; output_len];
    match algorithm {
        HkdfAlgorithm::Sha256 => {
            let hk = Hkdf::<Sha256>::new(Some(salt), ikm);
            hk.expand(info, &mut output)
                .map_err(|_| CryptoError::InvalidArgument("HKDF expand failed".to_string()))?;
        }
        HkdfAlgorithm::Sha512 => {
            let hk = Hkdf::<Sha512>::new(Some(salt), ikm);
            hk.expand(info, &mut output)
                .map_err(|_| CryptoError::InvalidArgument("HKDF expand failed".to_string()))?;
        }
        HkdfAlgorithm::Sha1 => {
            let hk = Hkdf::<Sha1>::new(Some(salt), ikm);
            hk.expand(info, &mut output)
                .map_err(|_| CryptoError::InvalidArgument("HKDF expand failed".to_string()))?;
        }
    }
    Ok(output)
}

/// Derive `key_size` bytes of key material from `master_key`, domain-separated
/// by `domain` and `context`.
///
/// Preconditions are checked in the order spec.md §4.3 specifies, returning
/// on the first failure:
///
/// 1. `key_size > 0`
/// 2. `master_key.len() >= 16`
/// 3. `domain` is non-empty
/// 4. `context` is non-empty
///
/// The returned key is wrapped in a [`SecureBuffer`] so it is zeroized on
/// its first (and any later) use.
pub fn derive_key(
    master_key: &[u8],
    domain: &str,
    context: &str,
    key_size: usize,
    algorithm: HkdfAlgorithm,
) -> CryptoResult<SecureBuffer> {
    if key_size == 0 {
        return Err(CryptoError::InvalidArgument(
            "Key size must be positive".to_string(),
        ));
    }
    if master_key.len() < MIN_MASTER_KEY_LEN {
        return Err(CryptoError::InvalidArgument(
            "Master key too short".to_string(),
        ));
    }
    if domain.is_empty() {
        return Err(CryptoError::InvalidArgument(
            "Domain must not be empty".to_string(),
        ));
    }
    if context.is_empty() {
        return Err(CryptoError::InvalidArgument(
            "Context must not be empty".to_string(),
        ));
    }
    if key_size > algorithm.max_output_len() {
        return Err(CryptoError::InvalidArgument(format!(
            "key_size {} exceeds maximum of {} bytes for this algorithm",
            key_size,
            algorithm.max_output_len()
        )));
    }

    let info = format!("{}.{}.v1:{}", INFO_PREFIX, domain, context).into_bytes();
    let mut salt = vec![0u8; algorithm.mac_len()];

    let output = hkdf_expand(algorithm, master_key, &salt, &info, key_size);

    use zeroize::Zeroize;
    salt.zeroize();

    Ok(SecureBuffer::wrap(output?))
}
