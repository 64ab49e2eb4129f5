//! Canonical msgpack helpers.
//!
//! Algorand hashes and signs the msgpack encoding of transactions, so the
//! encoding has to be canonical: map keys sorted, empty fields omitted and
//! integers written in their shortest form. `rmp` provides the shortest
//! form; callers are responsible for key order and omission.

use crate::errors::ProtocolError;

/// Writes a map header.
pub fn write_map_len(buf: &mut Vec<u8>, len: u32) -> Result<(), ProtocolError> {
    rmp::encode::write_map_len(buf, len).map_err(|e| ProtocolError::Encoding(e.to_string()))?;
    Ok(())
}

/// Writes a string.
pub fn write_str(buf: &mut Vec<u8>, value: &str) -> Result<(), ProtocolError> {
    rmp::encode::write_str(buf, value).map_err(|e| ProtocolError::Encoding(e.to_string()))
}

/// Writes an unsigned integer in its shortest form.
pub fn write_uint(buf: &mut Vec<u8>, value: u64) -> Result<(), ProtocolError> {
    rmp::encode::write_uint(buf, value).map_err(|e| ProtocolError::Encoding(e.to_string()))?;
    Ok(())
}

/// Writes a byte string.
pub fn write_bin(buf: &mut Vec<u8>, value: &[u8]) -> Result<(), ProtocolError> {
    rmp::encode::write_bin(buf, value).map_err(|e| ProtocolError::Encoding(e.to_string()))
}

/// Sequential reader over a msgpack byte slice.
#[derive(Clone)]
pub struct Reader<'a> {
    rest: &'a [u8],
}

impl<'a> Reader<'a> {
    /// Creates a reader over the given bytes.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { rest: bytes }
    }

    /// Returns true once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Reads a map header.
    pub fn read_map_len(&mut self) -> Result<u32, ProtocolError> {
        rmp::decode::read_map_len(&mut self.rest).map_err(|e| ProtocolError::Decoding(e.to_string()))
    }

    /// Reads an array header.
    pub fn read_array_len(&mut self) -> Result<u32, ProtocolError> {
        rmp::decode::read_array_len(&mut self.rest).map_err(|e| ProtocolError::Decoding(e.to_string()))
    }

    /// Reads a string.
    pub fn read_str(&mut self) -> Result<&'a str, ProtocolError> {
        let len = rmp::decode::read_str_len(&mut self.rest)
            .map_err(|e| ProtocolError::Decoding(e.to_string()))?;
        let raw = self.take(len as usize)?;
        std::str::from_utf8(raw).map_err(|e| ProtocolError::Decoding(e.to_string()))
    }

    /// Reads an unsigned integer of any width.
    pub fn read_uint(&mut self) -> Result<u64, ProtocolError> {
        rmp::decode::read_int(&mut self.rest).map_err(|e| ProtocolError::Decoding(e.to_string()))
    }

    /// Reads a byte string.
    pub fn read_bin(&mut self) -> Result<&'a [u8], ProtocolError> {
        let len = rmp::decode::read_bin_len(&mut self.rest)
            .map_err(|e| ProtocolError::Decoding(e.to_string()))?;
        self.take(len as usize)
    }

    /// Reads a byte string of exactly `N` bytes.
    pub fn read_fixed_bin<const N: usize>(&mut self) -> Result<[u8; N], ProtocolError> {
        let raw = self.read_bin()?;
        if raw.len() != N {
            return Err(ProtocolError::Decoding(format!(
                "expected {} bytes, got {}",
                N,
                raw.len()
            )));
        }
        let mut out = [0u8; N];
        out.copy_from_slice(raw);
        Ok(out)
    }

    /// Returns the next `len` raw bytes, advancing past them.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], ProtocolError> {
        if self.rest.len() < len {
            return Err(ProtocolError::Decoding(format!(
                "unexpected end of input: need {} bytes, have {}",
                len,
                self.rest.len()
            )));
        }
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        Ok(head)
    }

    /// Returns the unread remainder.
    pub fn remaining(&self) -> &'a [u8] {
        self.rest
    }
}
