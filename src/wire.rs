//! Bounded reads over raw frame bytes
//!
//! Radio hardware hands the decoder opaque, attacker-controlled buffers.
//! Every field access goes through `FrameReader`, which tracks the bytes
//! remaining and refuses any read that would cross the declared buffer
//! length, instead of trusting a structure overlay to match the real size.

use crate::{Result, SniffError, MAC_ADDR_LEN};

/// Read-only cursor over a captured frame.
#[derive(Debug)]
pub struct FrameReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FrameReader<'a> {
    /// Create a reader over the full buffer.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Current read offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    fn check(&self, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(SniffError::Truncated {
                needed,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read a slice of `len` bytes, advancing the cursor.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.check(len)?;
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Skip `len` bytes without reading them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.check(len)?;
        self.pos += len;
        Ok(())
    }

    /// Read single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    /// Read u16 in little endian.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        self.check(2)?;
        let bytes = [self.data[self.pos], self.data[self.pos + 1]];
        self.pos += 2;
        Ok(u16::from_le_bytes(bytes))
    }

    /// Read a 6-byte hardware address.
    pub fn read_mac(&mut self) -> Result<[u8; MAC_ADDR_LEN]> {
        let mut addr = [0u8; MAC_ADDR_LEN];
        addr.copy_from_slice(self.read_bytes(MAC_ADDR_LEN)?);
        Ok(addr)
    }
}
