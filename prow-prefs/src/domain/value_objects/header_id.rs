//! Header magic value object.

use core::fmt;

/// The 4-byte magic written at offset 0 of every saved record.
///
/// Stored as the raw bytes `b"Prow"`. Reading it back as a little-endian
/// `u32` gives the same value the legacy firmware compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeaderId([u8; 4]);

impl HeaderId {
    /// The magic every valid record starts with.
    pub const PROW: Self = Self(*b"Prow");

    /// Encoded size in bytes.
    pub const SIZE: usize = 4;

    /// Wrap raw header bytes read from storage.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    /// The raw bytes as they appear on the medium.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        self.0
    }

    /// The header as a little-endian integer.
    #[inline]
    pub const fn as_u32(self) -> u32 {
        u32::from_le_bytes(self.0)
    }

    /// Whether these bytes are the valid magic.
    #[inline]
    pub fn is_valid(self) -> bool {
        self == Self::PROW
    }
}

impl fmt::Display for HeaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Header({:#010x})", self.as_u32())
    }
}
