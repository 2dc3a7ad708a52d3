//! Base random generator (component C2): a thin, labelled wrapper over the
//! process CSPRNG.
//!
//! Every byte returned ultimately comes from [`rand_core::OsRng`], which on
//! the platforms this crate targets is backed by the OS's cryptographic
//! random source (`getrandom(2)` on Linux/Android, `SecRandomCopyBytes` on
//! iOS, `BCryptGenRandom` on Windows).

use crate::encoding::{encode_base64, encode_hex, Base64Flag};
use crate::error::{CryptoError, CryptoResult};
use crate::secure_buffer::SecureBuffer;
use rand_core::{OsRng, RngCore};

/// Describes whether the underlying CSPRNG is vendor/TEE-backed or a
/// software-only source (spec.md §3's two-variant `EntropyQuality`).
///
/// This is a heuristic label attached at construction time, never a gate:
/// generation proceeds identically either way. spec.md §4.2.1 names the
/// reference heuristic as a provider-identifier/registry check for
/// `AndroidOpenSSL`/`AndroidKeyStore`, and explicitly allows an
/// off-platform implementation to "substitute an equivalent heuristic...
/// and MUST document the mapping." This crate has no such platform
/// registry to inspect (`rand_core::OsRng` does not expose provider
/// identity), so the documented mapping is: `target_os = "android"` is
/// labelled [`EntropyQuality::Hardware`] (Android's `getrandom(2)` draws
/// from the kernel CRNG that the reference heuristic's
/// `AndroidKeyStore`/`AndroidOpenSSL` check is itself approximating);
/// every other target is labelled [`EntropyQuality::Fallback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntropyQuality {
    /// The CSPRNG is vendor- or TEE-backed.
    Hardware,
    /// Software-only CSPRNG source.
    Fallback,
}

/// Apply the documented `EntropyQuality` heuristic (see [`EntropyQuality`])
/// for the current compile target.
fn detect_quality() -> EntropyQuality {
    if cfg!(target_os = "android") {
        EntropyQuality::Hardware
    } else {
        EntropyQuality::Fallback
    }
}

/// A labelled handle onto the process CSPRNG.
///
/// Stateless apart from the quality label computed once at construction
/// (spec.md §4.2.1: construction "inspects provider metadata to pick" a
/// quality). Kept as a struct (rather than free functions only) so call
/// sites can hold a generic handle to an entropy source without committing
/// to `OsRng` directly, matching the spec's framing of the provider as a
/// capability, not a global function.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    quality: EntropyQuality,
}

impl RandomGenerator {
    pub fn new() -> Self {
        RandomGenerator {
            quality: detect_quality(),
        }
    }

    /// The quality label for bytes produced by this generator.
    pub fn quality(&self) -> EntropyQuality {
        self.quality
    }

    /// Fill a caller-provided buffer with random bytes.
    pub fn next_bytes(&self, buf: &mut [u8]) {
        OsRng.fill_bytes(buf);
    }

    /// Allocate `len` random bytes, wrapped in a [`SecureBuffer`] so the
    /// internal copy is zeroized on first use (spec.md §4.2.1:
    /// `next_secure_bytes(size) → Result<SecureBuffer>`, "as above, wrapped
    /// for zeroization").
    ///
    /// Fails with [`CryptoError::InvalidArgument`] if `len == 0`, per
    /// spec.md §4.2.1's `next_bytes`/`next_secure_bytes` contract ("Fails
    /// with `InvalidArgument` if `size ≤ 0`") and §8's boundary case
    /// `generate_bytes(0) → InvalidArgument`.
    pub fn next_secure_bytes(&self, len: usize) -> CryptoResult<SecureBuffer> {
        if len == 0 {
            return Err(CryptoError::InvalidArgument(
                "size must be positive".to_string(),
            ));
        }
        let mut buf = vec![0u8; len];
        self.next_bytes(&mut buf);
        Ok(SecureBuffer::wrap(buf))
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate `len` random bytes from the OS CSPRNG.
///
/// Creates an ephemeral [`RandomGenerator`], draws the bytes into a
/// [`SecureBuffer`], then clones them back out so the internal copy is
/// zeroized before returning (spec.md §4.2.1's `generate_bytes`
/// convenience note).
pub fn generate_bytes(len: usize) -> CryptoResult<Vec<u8>> {
    let mut secure = RandomGenerator::new().next_secure_bytes(len)?;
    Ok(secure.consume(|bytes| bytes.to_vec()))
}

/// Generate `len` random bytes and render them as lowercase hex.
pub fn generate_as_hex(len: usize) -> CryptoResult<String> {
    Ok(encode_hex(&generate_bytes(len)?))
}

/// Generate `len` random bytes and render them as Base64 using `flag`.
pub fn generate_as_base64(len: usize, flag: Base64Flag) -> CryptoResult<String> {
    Ok(encode_base64(&generate_bytes(len)?, flag))
}

/// Generate a random byte array of fixed size `N`, e.g. a 12-byte nonce or
/// 32-byte key. Infallible: array allocation can't fail the way a runtime
/// `Vec` length check could, and `N` is always known at compile time.
pub fn generate_array<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    OsRng.fill_bytes(&mut buf);
    buf
}
