//! Little-endian readers and writers for the solver's flat binary files.
//!
//! Every file is read whole and then decoded field by field; a short file is
//! reported as [`LoadError::Truncated`] with the byte count the layout needed.

use std::fs;
use std::path::Path;

use crate::error::{LoadError, Result};

pub(crate) const F64_SIZE: usize = std::mem::size_of::<f64>();
pub(crate) const U16_SIZE: usize = std::mem::size_of::<u16>();

/// Read a whole file into memory.
pub(crate) fn read_file(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read binary file");
    Ok(bytes)
}

/// Write a whole file, replacing any previous content.
pub(crate) fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Cursor over an in-memory binary file
pub(crate) struct ByteReader<'a> {
    path: &'a Path,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(path: &'a Path, bytes: &'a [u8]) -> Self {
        Self {
            path,
            bytes,
            pos: 0,
        }
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos + count;
        if end > self.bytes.len() {
            return Err(LoadError::Truncated {
                path: self.path.to_path_buf(),
                expected: end,
                actual: self.bytes.len(),
            });
        }
        let chunk = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(chunk)
    }

    /// Fail early when the remaining bytes cannot hold `count` more bytes.
    pub(crate) fn require(&self, count: usize) -> Result<()> {
        let end = self.pos + count;
        if end > self.bytes.len() {
            return Err(LoadError::Truncated {
                path: self.path.to_path_buf(),
                expected: end,
                actual: self.bytes.len(),
            });
        }
        Ok(())
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        let chunk = self.take(U16_SIZE)?;
        Ok(u16::from_le_bytes([chunk[0], chunk[1]]))
    }

    pub(crate) fn read_f64(&mut self) -> Result<f64> {
        let chunk = self.take(F64_SIZE)?;
        let mut raw = [0u8; F64_SIZE];
        raw.copy_from_slice(chunk);
        Ok(f64::from_le_bytes(raw))
    }

    pub(crate) fn read_f64s(&mut self, count: usize) -> Result<Vec<f64>> {
        self.require(count * F64_SIZE)?;
        (0..count).map(|_| self.read_f64()).collect()
    }

    pub(crate) fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

/// Growable little-endian output buffer
#[derive(Default)]
pub(crate) struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Write a length header, rejecting sizes the 16-bit header cannot hold.
    pub(crate) fn write_len(&mut self, what: &'static str, len: usize) -> Result<()> {
        let value =
            u16::try_from(len).map_err(|_| LoadError::size_mismatch(what, u16::MAX as usize, len))?;
        self.bytes.extend_from_slice(&value.to_le_bytes());
        Ok(())
    }

    pub(crate) fn write_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
