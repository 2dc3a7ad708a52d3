//! Bounded file reading for `encrypt_file`/`decrypt_file`.
//!
//! Carried from the teacher's archive-reading hardening: a reader wrapper
//! that refuses to yield more than `limit` bytes, so a whole-file read
//! never allocates past the 10 MiB cap spec.md §4.4 imposes, even if the
//! caller's size check on file metadata raced with something replacing the
//! file underneath it.

use crate::error::{CryptoError, CryptoResult};
use std::io::{self, Read};

pub struct BoundedReader<R: Read> {
    inner: R,
    limit: u64,
    read: u64,
}

impl<R: Read> BoundedReader<R> {
    pub fn new(reader: R, limit: u64) -> Self {
        Self {
            inner: reader,
            limit,
            read: 0,
        }
    }

    pub fn bytes_read(&self) -> u64 {
        self.read
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.read >= self.limit {
            let mut probe = [0u8; 1];
            return match self.inner.read(&mut probe) {
                Ok(0) => Ok(0),
                Ok(_) => Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!(
                        "read limit exceeded: attempted to read beyond {} bytes",
                        self.limit
                    ),
                )),
                Err(e) => Err(e),
            };
        }

        let remaining = (self.limit - self.read) as usize;
        let to_read = buf.len().min(remaining);
        let n = self.inner.read(&mut buf[..to_read])?;
        self.read += n as u64;
        Ok(n)
    }
}

/// Read `reader` to completion, failing if it would exceed `limit` bytes.
pub fn read_bounded<R: Read>(reader: R, limit: u64) -> CryptoResult<Vec<u8>> {
    let mut bounded = BoundedReader::new(reader, limit);
    let mut buf = Vec::new();
    match bounded.read_to_end(&mut buf) {
        Ok(_) => Ok(buf),
        Err(e) if e.kind() == io::ErrorKind::Other => Err(CryptoError::InvalidArgument(format!(
            "input exceeds maximum allowed size of {} bytes",
            limit
        ))),
        Err(e) => Err(CryptoError::IoFailure(e)),
    }
}
