// crates/dgus-core/src/view.rs
use crate::{Area, Color, Coord, DgusError, Pic, Result};

/// Read-only big-endian window over one fixed-size record of a resource.
///
/// The window length is checked once at construction, so the accessors index
/// straight into the slice. Offsets passed to accessors are relative to the
/// record start.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> RecordView<'a> {
    pub fn new(buf: &'a [u8], offset: usize, len: usize, shape: &'static str) -> Result<Self> {
        let available = buf.len().saturating_sub(offset);
        let bytes = buf
            .get(offset..offset + len)
            .ok_or(DgusError::Truncated {
                shape,
                offset,
                needed: len,
                available,
            })?;
        Ok(Self { bytes, offset })
    }

    /// File offset of the record.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn u8(&self, at: usize) -> u8 {
        self.bytes[at]
    }

    pub fn flag(&self, at: usize) -> bool {
        self.bytes[at] != 0
    }

    pub fn u16(&self, at: usize) -> u16 {
        u16::from_be_bytes([self.bytes[at], self.bytes[at + 1]])
    }

    pub fn u32(&self, at: usize) -> u32 {
        u32::from_be_bytes([
            self.bytes[at],
            self.bytes[at + 1],
            self.bytes[at + 2],
            self.bytes[at + 3],
        ])
    }

    pub fn i32(&self, at: usize) -> i32 {
        self.u32(at) as i32
    }

    /// Upper and lower nibble of one byte, in that order.
    pub fn nibbles(&self, at: usize) -> (u8, u8) {
        let byte = self.bytes[at];
        (byte >> 4, byte & 0x0f)
    }

    pub fn bytes(&self, at: usize, len: usize) -> &'a [u8] {
        &self.bytes[at..at + len]
    }

    pub fn pic(&self, at: usize) -> Pic {
        Pic(self.u16(at))
    }

    pub fn color(&self, at: usize) -> Color {
        Color(self.u16(at))
    }

    pub fn coord(&self, at: usize) -> Coord {
        Coord::new(self.u16(at), self.u16(at + 2))
    }

    pub fn area(&self, at: usize) -> Area {
        Area::new(self.coord(at), self.coord(at + 4))
    }
}
