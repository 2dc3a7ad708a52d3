//! Self-describing ciphertext header (component C4).
//!
//! Every framed ciphertext begins with a fixed 4-byte magic, a version
//! byte, an algorithm id byte, and a big-endian 16-bit parameter length,
//! followed by that many bytes of algorithm-specific parameters (for
//! AES-256-GCM, a 12-byte nonce followed by a 4-byte big-endian tag-bit
//! length, always 16 bytes total). This lets a decoder reject malformed
//! or unsupported input before touching the AEAD layer at all, and leaves
//! room to add algorithms later without changing the header shape.

use crate::error::{CryptoError, CryptoResult};

pub const MAGIC: [u8; 4] = *b"SECB";
pub const CURRENT_VERSION: u8 = 1;

/// Algorithm identifier carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmId {
    Aes256Gcm,
}

impl AlgorithmId {
    fn to_byte(self) -> u8 {
        match self {
            AlgorithmId::Aes256Gcm => 1,
        }
    }

    fn from_byte(b: u8) -> CryptoResult<Self> {
        match b {
            1 => Ok(AlgorithmId::Aes256Gcm),
            other => Err(CryptoError::InvalidHeader(format!(
                "unsupported algorithm id {}",
                other
            ))),
        }
    }

    /// Fixed parameter-block length for this format descriptor (spec.md
    /// §3's Cipher Format Descriptor: 16 bytes for `AES_GCM` — a 12-byte IV
    /// plus a 4-byte big-endian tag-bit-length field).
    fn params_len(self) -> usize {
        match self {
            AlgorithmId::Aes256Gcm => 16,
        }
    }
}

/// The decoded fixed-layout prefix of a framed ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiphertextHeader {
    pub version: u8,
    pub algorithm: AlgorithmId,
    pub params: Vec<u8>,
}

impl CiphertextHeader {
    pub fn new(algorithm: AlgorithmId, params: Vec<u8>) -> Self {
        CiphertextHeader {
            version: CURRENT_VERSION,
            algorithm,
            params,
        }
    }

    /// Serialized byte length of this header (magic + version + algorithm
    /// id + param length field + params).
    pub fn encoded_len(&self) -> usize {
        4 + 1 + 1 + 2 + self.params.len()
    }

    pub fn encode(&self) -> CryptoResult<Vec<u8>> {
        if self.params.len() > u16::MAX as usize {
            return Err(CryptoError::InvalidArgument(
                "header parameter block too large".to_string(),
            ));
        }
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&MAGIC);
        out.push(self.version);
        out.push(self.algorithm.to_byte());
        out.extend_from_slice(&(self.params.len() as u16).to_be_bytes());
        out.extend_from_slice(&self.params);
        Ok(out)
    }

    /// Parse a header from the front of `data`, returning the header and
    /// the number of bytes it consumed.
    pub fn decode(data: &[u8]) -> CryptoResult<(Self, usize)> {
        if data.len() < 8 {
            return Err(CryptoError::InvalidHeader(
                "input shorter than minimum header size".to_string(),
            ));
        }
        if data[0..4] != MAGIC {
            return Err(CryptoError::InvalidHeader(
                "magic bytes do not match".to_string(),
            ));
        }
        let version = data[4];
        if version != CURRENT_VERSION {
            return Err(CryptoError::InvalidHeader(format!(
                "unsupported header version {}",
                version
            )));
        }
        let algorithm = AlgorithmId::from_byte(data[5])?;
        let param_len = u16::from_be_bytes([data[6], data[7]]) as usize;
        if param_len == 0 || param_len != algorithm.params_len() {
            return Err(CryptoError::InvalidHeader(
                "invalid params length".to_string(),
            ));
        }
        let header_len = 8 + param_len;
        if data.len() < header_len {
            return Err(CryptoError::InvalidHeader(
                "input truncated before end of parameter block".to_string(),
            ));
        }
        let params = data[8..header_len].to_vec();
        Ok((
            CiphertextHeader {
                version,
                algorithm,
                params,
            },
            header_len,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_encode_decode() {
        let header = CiphertextHeader::new(AlgorithmId::Aes256Gcm, vec![0u8; 16]);
        let encoded = header.encode().unwrap();
        let (decoded, consumed) = CiphertextHeader::decode(&encoded).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn rejects_wrong_magic() {
        let mut bytes = CiphertextHeader::new(AlgorithmId::Aes256Gcm, vec![0u8; 16])
            .encode()
            .unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            CiphertextHeader::decode(&bytes),
            Err(CryptoError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut bytes = CiphertextHeader::new(AlgorithmId::Aes256Gcm, vec![0u8; 16])
            .encode()
            .unwrap();
        bytes[4] = 99;
        assert!(matches!(
            CiphertextHeader::decode(&bytes),
            Err(CryptoError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_unsupported_algorithm_id() {
        let mut bytes = CiphertextHeader::new(AlgorithmId::Aes256Gcm, vec![0u8; 16])
            .encode()
            .unwrap();
        bytes[5] = 200;
        assert!(matches!(
            CiphertextHeader::decode(&bytes),
            Err(CryptoError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_truncated_input() {
        let bytes = CiphertextHeader::new(AlgorithmId::Aes256Gcm, vec![0u8; 16])
            .encode()
            .unwrap();
        let truncated = &bytes[..bytes.len() - 1];
        assert!(matches!(
            CiphertextHeader::decode(truncated),
            Err(CryptoError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_input_shorter_than_minimum() {
        assert!(matches!(
            CiphertextHeader::decode(&[0u8; 3]),
            Err(CryptoError::InvalidHeader(_))
        ));
    }

    #[test]
    fn rejects_params_length_mismatched_with_algorithm() {
        let mut bytes = CiphertextHeader::new(AlgorithmId::Aes256Gcm, vec![0u8; 16])
            .encode()
            .unwrap();
        // Declare a 12-byte params block instead of the 16 AES-GCM requires.
        bytes[6..8].copy_from_slice(&12u16.to_be_bytes());
        assert!(matches!(
            CiphertextHeader::decode(&bytes),
            Err(CryptoError::InvalidHeader(_))
        ));
    }
}
