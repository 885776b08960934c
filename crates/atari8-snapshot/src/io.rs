use crate::error::{Result, SnapshotError};
use crate::format::Stage;

/// Forward-only cursor over a fully decompressed state buffer.
///
/// All multi-byte reads are little-endian. A read past the end of the
/// buffer reports the byte offset it failed at and the section being
/// decoded; there is no seeking and no rewinding.
pub struct StateReader<'a> {
    buf: &'a [u8],
    pos: usize,
    stage: Stage,
}

impl<'a> StateReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            stage: Stage::Header,
        }
    }

    /// Marks the section subsequent reads belong to, for error reporting.
    pub fn enter(&mut self, stage: Stage) {
        self.stage = stage;
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or(SnapshotError::TruncatedInput {
                stage: self.stage,
                offset: self.pos,
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Exactly `n` bytes, borrowed from the underlying buffer.
    pub fn read_block(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// A u16 length prefix followed by that many bytes. An empty name is
    /// legal and denotes "no file attached".
    pub fn read_filename(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u16()? as usize;
        Ok(self.read_block(len)?.to_vec())
    }
}
