// crates/dgus-core/src/vp.rs
//! Variable-pointer (VP) regions: where in the 4 KiB register RAM a record
//! reads or writes, and how wide the value is.
//!
//! Records store VP addresses in words; regions are kept in bytes. Every
//! constructor here is a pure function of the raw format fields.

use std::fmt;
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteHalf {
    High,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VpKind {
    None,
    /// Bit index inside the addressed byte.
    Bit(u8),
    Byte(ByteHalf),
    Word,
    DWord,
    QWord,
    /// Text buffer, length in bytes.
    Text(u32),
}

impl VpKind {
    /// Same interpretation width, ignoring bit index, byte half and text length.
    pub fn same_width(&self, other: &VpKind) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }

    pub fn name(&self) -> &'static str {
        match self {
            VpKind::None => "none",
            VpKind::Bit(_) => "bit",
            VpKind::Byte(_) => "byte",
            VpKind::Word => "word",
            VpKind::DWord => "dword",
            VpKind::QWord => "qword",
            VpKind::Text(_) => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VpError {
    #[error("invalid {context} VP format {code}")]
    InvalidFormat { context: &'static str, code: u16 },

    #[error("bit index {0} out of range")]
    BitOutOfRange(u8),

    #[error("unsupported icon bitmask 0x{0:04x}")]
    InvalidBitmask(u16),

    #[error("length prefix moves VP 0x{0:04x} below zero")]
    AddressUnderflow(u32),
}

/// Byte region of register RAM bound by one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VpRegion {
    pub addr: u32,
    pub size: u32,
    pub kind: VpKind,
}

impl VpRegion {
    pub const NONE: VpRegion = VpRegion {
        addr: 0,
        size: 0,
        kind: VpKind::None,
    };

    pub fn byte_addr(vp_word: u16) -> u32 {
        u32::from(vp_word) * 2
    }

    pub fn end(&self) -> u32 {
        self.addr + self.size
    }

    pub fn is_bound(&self) -> bool {
        self.size != 0
    }

    pub fn word(vp_word: u16) -> Self {
        Self::sized(vp_word, VpKind::Word, 2)
    }

    pub fn dword(vp_word: u16) -> Self {
        Self::sized(vp_word, VpKind::DWord, 4)
    }

    pub fn qword(vp_word: u16) -> Self {
        Self::sized(vp_word, VpKind::QWord, 8)
    }

    /// Single byte; the low half lives one byte above the word address.
    pub fn byte(vp_word: u16, half: ByteHalf) -> Self {
        let addr = Self::byte_addr(vp_word)
            + match half {
                ByteHalf::High => 0,
                ByteHalf::Low => 1,
            };
        VpRegion {
            addr,
            size: 1,
            kind: VpKind::Byte(half),
        }
    }

    /// Bit 0..15 of the word at `vp_word`, narrowed down to the byte holding it.
    pub fn bit(vp_word: u16, bit: u8) -> Result<Self, VpError> {
        if bit >= 16 {
            return Err(VpError::BitOutOfRange(bit));
        }
        let (addr, bit) = if bit < 8 {
            (Self::byte_addr(vp_word) + 1, bit)
        } else {
            (Self::byte_addr(vp_word), bit - 8)
        };
        Ok(VpRegion {
            addr,
            size: 1,
            kind: VpKind::Bit(bit),
        })
    }

    /// Text buffer of `len` bytes.
    pub fn text(vp_word: u16, len: u32) -> Self {
        Self::sized(vp_word, VpKind::Text(len), len)
    }

    /// Keyboard input buffer. The optional length prefix occupies the word
    /// right before the text.
    pub fn keyboard_text(vp_word: u16, len_words: u8, len_prefix: bool) -> Result<Self, VpError> {
        // +1 word: kept as the firmware tooling computes it, not confirmed against hardware
        let mut size = (u32::from(len_words) + 1) * 2;
        let mut addr = Self::byte_addr(vp_word);
        if len_prefix {
            addr = addr
                .checked_sub(2)
                .ok_or(VpError::AddressUnderflow(addr))?;
            size += 2;
        }
        Ok(VpRegion {
            addr,
            size,
            kind: VpKind::Text(size),
        })
    }

    /// 2-bit "standard" format used by sliders, increments and buttons.
    pub fn from_standard_format(vp_word: u16, code: u8) -> Result<Self, VpError> {
        match code {
            0 => Ok(Self::word(vp_word)),
            1 => Ok(Self::byte(vp_word, ByteHalf::High)),
            2 => Ok(Self::byte(vp_word, ByteHalf::Low)),
            _ => Err(VpError::InvalidFormat {
                context: "standard",
                code: u16::from(code),
            }),
        }
    }

    /// Numeric format used by numpads and numeric displays.
    pub fn from_numeric_format(vp_word: u16, code: u8) -> Result<Self, VpError> {
        match code {
            0 | 5 => Ok(Self::word(vp_word)),
            1 | 6 => Ok(Self::dword(vp_word)),
            2 => Ok(Self::byte(vp_word, ByteHalf::High)),
            3 => Ok(Self::byte(vp_word, ByteHalf::Low)),
            4 => Ok(Self::qword(vp_word)),
            _ => Err(VpError::InvalidFormat {
                context: "numeric",
                code: u16::from(code),
            }),
        }
    }

    /// Button/increment format byte: either a bit index or a standard format.
    pub fn from_bit_or_standard(vp_word: u16, bit_mode: bool, code: u8) -> Result<Self, VpError> {
        if bit_mode {
            Self::bit(vp_word, code)
        } else {
            Self::from_standard_format(vp_word, code)
        }
    }

    /// Bit icons pick their slice of the word through a 16-bit mask.
    pub fn from_bitmask(vp_word: u16, mask: u16) -> Result<Self, VpError> {
        if mask.count_ones() == 1 {
            let bit_length = 16 - mask.leading_zeros();
            Self::bit(vp_word, (bit_length - 1) as u8)
        } else if mask == 0 {
            Err(VpError::InvalidBitmask(mask))
        } else if mask & 0x00ff == 0 {
            Ok(Self::byte(vp_word, ByteHalf::High))
        } else if mask & 0xff00 == 0 {
            Ok(Self::byte(vp_word, ByteHalf::Low))
        } else {
            Err(VpError::InvalidBitmask(mask))
        }
    }

    /// Auxiliary pointer block of bit icons: two words.
    pub fn aux_pointer(vp_word: u16) -> Self {
        Self::dword(vp_word)
    }

    fn sized(vp_word: u16, kind: VpKind, size: u32) -> Self {
        VpRegion {
            addr: Self::byte_addr(vp_word),
            size,
            kind,
        }
    }
}

impl Default for VpRegion {
    fn default() -> Self {
        VpRegion::NONE
    }
}

impl fmt::Display for VpRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            VpKind::None => Ok(()),
            VpKind::Bit(bit) => write!(f, "VP {:04x} b{}", self.addr, bit),
            VpKind::Text(_) => write!(f, "VP {:04x} T{:02x}", self.addr, self.size),
            _ => write!(f, "VP {:04x} +{:02x}", self.addr, self.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_format_table() {
        assert_eq!(
            VpRegion::from_standard_format(0x10, 0).unwrap(),
            VpRegion { addr: 0x20, size: 2, kind: VpKind::Word }
        );
        assert_eq!(
            VpRegion::from_standard_format(0x10, 1).unwrap(),
            VpRegion { addr: 0x20, size: 1, kind: VpKind::Byte(ByteHalf::High) }
        );
        assert_eq!(
            VpRegion::from_standard_format(0x10, 2).unwrap(),
            VpRegion { addr: 0x21, size: 1, kind: VpKind::Byte(ByteHalf::Low) }
        );
        assert!(matches!(
            VpRegion::from_standard_format(0x10, 3),
            Err(VpError::InvalidFormat { context: "standard", code: 3 })
        ));
    }

    #[test]
    fn test_numeric_format_table() {
        for (code, size) in [(0, 2), (5, 2), (1, 4), (6, 4), (4, 8)] {
            let vp = VpRegion::from_numeric_format(0x100, code).unwrap();
            assert_eq!((vp.addr, vp.size), (0x200, size), "code {}", code);
        }
        assert_eq!(VpRegion::from_numeric_format(0x100, 3).unwrap().addr, 0x201);
        assert_eq!(VpRegion::from_numeric_format(0x100, 4).unwrap().kind, VpKind::QWord);
        assert!(VpRegion::from_numeric_format(0x100, 7).is_err());
    }

    #[test]
    fn test_bit_mode_moves_low_bits_to_odd_byte() {
        let low = VpRegion::bit(0x08, 3).unwrap();
        assert_eq!((low.addr, low.size, low.kind), (0x11, 1, VpKind::Bit(3)));

        let high = VpRegion::bit(0x08, 12).unwrap();
        assert_eq!((high.addr, high.size, high.kind), (0x10, 1, VpKind::Bit(4)));

        assert_eq!(VpRegion::bit(0x08, 16), Err(VpError::BitOutOfRange(16)));
    }

    #[test]
    fn test_keyboard_text_with_length_prefix() {
        let plain = VpRegion::keyboard_text(0x40, 9, false).unwrap();
        assert_eq!((plain.addr, plain.size), (0x80, 20));

        let prefixed = VpRegion::keyboard_text(0x40, 9, true).unwrap();
        assert_eq!((prefixed.addr, prefixed.size), (0x7e, 22));

        assert_eq!(
            VpRegion::keyboard_text(0, 1, true),
            Err(VpError::AddressUnderflow(0))
        );
    }

    #[test]
    fn test_bitmask() {
        assert_eq!(VpRegion::from_bitmask(0x10, 0x0001).unwrap().kind, VpKind::Bit(0));
        assert_eq!(VpRegion::from_bitmask(0x10, 0x0001).unwrap().addr, 0x21);
        assert_eq!(VpRegion::from_bitmask(0x10, 0x8000).unwrap().kind, VpKind::Bit(7));
        assert_eq!(VpRegion::from_bitmask(0x10, 0x8000).unwrap().addr, 0x20);
        assert_eq!(
            VpRegion::from_bitmask(0x10, 0x0300).unwrap().kind,
            VpKind::Byte(ByteHalf::High)
        );
        assert_eq!(VpRegion::from_bitmask(0x10, 0x0003).unwrap().addr, 0x21);
        assert!(VpRegion::from_bitmask(0x10, 0x0101).is_err());
        assert!(VpRegion::from_bitmask(0x10, 0).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(VpRegion::word(0x1000).to_string(), "VP 2000 +02");
        assert_eq!(VpRegion::bit(0x1000, 1).unwrap().to_string(), "VP 2001 b1");
        assert_eq!(VpRegion::text(0x1000, 16).to_string(), "VP 2000 T10");
        assert_eq!(VpRegion::NONE.to_string(), "");
    }

    #[test]
    fn test_same_width_ignores_payload() {
        assert!(VpKind::Bit(1).same_width(&VpKind::Bit(6)));
        assert!(VpKind::Text(4).same_width(&VpKind::Text(8)));
        assert!(!VpKind::Word.same_width(&VpKind::DWord));
    }
}
