//! Size configuration for file-based encrypt/decrypt operations.
//!
//! Generalized from the teacher's document-archive size tiers down to the
//! one limit spec.md's Non-goals leave in scope: the 10 MiB cap on
//! `encrypt_file`/`decrypt_file` inputs (spec.md §4.4).

use crate::error::{CryptoError, CryptoResult};

/// Size limit applied to `encrypt_file`/`decrypt_file` source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityConfig {
    pub max_file_size: u64,
}

impl SecurityConfig {
    /// The 10 MiB cap spec.md §4.4 mandates for whole-file encrypt/decrypt.
    pub const fn default_tier() -> Self {
        SecurityConfig {
            max_file_size: 10 * 1024 * 1024,
        }
    }

    pub fn check_file_size(&self, size: u64) -> CryptoResult<()> {
        if size > self.max_file_size {
            return Err(CryptoError::InvalidArgument(format!(
                "file size {} exceeds maximum allowed size of {} bytes",
                size, self.max_file_size
            )));
        }
        Ok(())
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::default_tier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn within_limit_ok() {
        let config = SecurityConfig::default();
        assert!(config.check_file_size(1024).is_ok());
    }

    #[test]
    fn exceeds_limit_fails() {
        let config = SecurityConfig::default();
        let result = config.check_file_size(11 * 1024 * 1024);
        assert!(matches!(result, Err(CryptoError::InvalidArgument(_))));
    }

    #[test]
    fn exactly_at_limit_ok() {
        let config = SecurityConfig::default();
        assert!(config.check_file_size(config.max_file_size).is_ok());
    }
}
