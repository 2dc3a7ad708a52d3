//! Secure byte container with guaranteed zeroization (component C1).
//!
//! This module provides the one primitive every other component in the
//! crate relies on for holding sensitive byte material: a buffer that can
//! be borrowed exactly through a scoped callback, and that is always
//! zeroized before that callback's result is handed back to the caller —
//! on normal return, on a propagated panic, and again on every later
//! invocation or final drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A heap-allocated byte region that zeroizes itself on every exit path.
///
/// `SecureBuffer` exposes exactly one operation for content access —
/// [`SecureBuffer::consume`] — a scoped borrow that hands the caller a
/// mutable view of the bytes and zeroizes the entire region afterwards,
/// regardless of how the callback returns. Calling `consume` again after
/// the buffer has already been used is defined behavior: the callback
/// observes an all-zero region.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecureBuffer {
    bytes: Vec<u8>,
}

/// Zeroizes the wrapped slice when dropped, including on unwind.
///
/// This is what makes `consume`'s zeroization happen on every exit path
/// from the caller's closure: the guard's `Drop` runs whether the closure
/// returns normally or panics.
struct ZeroizeGuard<'a>(&'a mut [u8]);

impl Drop for ZeroizeGuard<'_> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl SecureBuffer {
    /// Takes ownership of a buffer produced upstream. Never fails.
    pub fn wrap(bytes: Vec<u8>) -> Self {
        SecureBuffer { bytes }
    }

    /// Number of bytes in the buffer. Does not expose content.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Invokes `f` with a mutable view of the buffer, then zeroizes the
    /// entire region before returning — including when `f` panics.
    ///
    /// The zeroizing write goes through [`zeroize::Zeroize`], which uses a
    /// volatile write the compiler cannot optimize away, as required by the
    /// "use-then-zeroed" contract.
    pub fn consume<T>(&mut self, f: impl FnOnce(&mut [u8]) -> T) -> T {
        let mut guard = ZeroizeGuard(&mut self.bytes);
        f(&mut *guard.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_preserves_length() {
        let buf = SecureBuffer::wrap(vec![1u8, 2, 3, 4, 5]);
        assert_eq!(buf.len(), 5);
        assert!(!buf.is_empty());
    }

    #[test]
    fn wrap_empty_is_empty() {
        let buf = SecureBuffer::wrap(Vec::new());
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn consume_sees_original_bytes() {
        let mut buf = SecureBuffer::wrap(vec![0xAA; 8]);
        let seen = buf.consume(|bytes| bytes.to_vec());
        assert_eq!(seen, vec![0xAAu8; 8]);
    }

    #[test]
    fn consume_zeroizes_after_return() {
        let mut buf = SecureBuffer::wrap(vec![0xFFu8; 16]);
        buf.consume(|_| ());
        // Second use observes an all-zero region (spec.md §8 quantified invariant).
        let after = buf.consume(|bytes| bytes.to_vec());
        assert_eq!(after, vec![0u8; 16]);
    }

    #[test]
    fn consume_zeroizes_even_on_panic() {
        let mut buf = SecureBuffer::wrap(vec![0x42u8; 4]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            buf.consume(|_bytes| {
                panic!("simulated failure inside scope");
            })
        }));
        assert!(result.is_err());
        let after = buf.consume(|bytes| bytes.to_vec());
        assert_eq!(after, vec![0u8; 4]);
    }

    #[test]
    fn consume_propagates_return_value() {
        let mut buf = SecureBuffer::wrap(vec![1, 2, 3]);
        let sum: u32 = buf.consume(|bytes| bytes.iter().map(|&b| b as u32).sum());
        assert_eq!(sum, 6);
    }

    #[test]
    fn drop_without_use_still_zeroizes() {
        // We can't observe the freed allocation directly; this just checks
        // that construction and drop of an unused buffer don't panic or
        // leak, matching the "wrapping never fails" contract.
        let buf = SecureBuffer::wrap(vec![9u8; 32]);
        drop(buf);
    }
}
