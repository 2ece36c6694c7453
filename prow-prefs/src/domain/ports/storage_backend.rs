//! StorageBackend port - secondary (driven) port for the persistence medium.
//!
//! The preferences store depends only on this capability set. Adapters
//! implement it for concrete media.
//!
//! ```text
//! ┌──────────────────────┐
//! │  PreferencesStore    │
//! └──────────┬───────────┘
//!            │ depends on
//!            ▼
//! ┌──────────────────────┐
//! │ StorageBackend port  │  ◄── This trait
//! └──────────┬───────────┘
//!            │ implemented by
//!            ▼
//! ┌──────────────────────┐
//! │ NorFlashAdapter      │
//! │ ByteStorageAdapter   │
//! │ NoStorage            │
//! └──────────────────────┘
//! ```

use core::fmt::Debug;

/// The kind of medium behind a backend.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Medium {
    /// No storage is configured. Every operation reports `NoStorage`.
    None,
    /// Sector-erasable memory (NOR flash). The region must be erased
    /// before it is written.
    BlockErasable,
    /// Byte-addressable memory (EEPROM or emulated EEPROM). Writes go
    /// anywhere; a commit may be needed to persist them.
    ByteAddressable,
}

impl Medium {
    /// Whether the medium must be erased before a write.
    #[inline]
    pub const fn requires_erase(self) -> bool {
        matches!(self, Medium::BlockErasable)
    }

    /// Whether any storage is present.
    #[inline]
    pub const fn is_present(self) -> bool {
        !matches!(self, Medium::None)
    }
}

/// Port for the persistence medium.
///
/// Offsets are relative to the start of the managed region.
///
/// # Transfer contract
///
/// `read_buffer` and `write_buffer` return the number of bytes actually
/// transferred. A count below the requested length is an I/O fault, never
/// a partial success. Transfers that run past [`capacity`] are clipped and
/// report the clipped count. An `Err` counts as nothing transferred.
///
/// [`capacity`]: StorageBackend::capacity
pub trait StorageBackend {
    /// Error reported by the underlying medium.
    type Error: Debug;

    /// The kind of medium.
    fn medium(&self) -> Medium;

    /// Size of the managed region in bytes.
    fn capacity(&self) -> usize;

    /// Read `dest.len()` bytes starting at `offset`.
    fn read_buffer(&mut self, offset: u32, dest: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write `src` starting at `offset`.
    fn write_buffer(&mut self, offset: u32, src: &[u8]) -> Result<usize, Self::Error>;

    /// Erase the whole region.
    ///
    /// Byte-addressable media treat this as a successful no-op.
    fn erase_region(&mut self) -> Result<(), Self::Error>;

    /// Persist buffered writes. The default does nothing.
    fn commit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for &mut B {
    type Error = B::Error;

    fn medium(&self) -> Medium {
        (**self).medium()
    }

    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read_buffer(&mut self, offset: u32, dest: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read_buffer(offset, dest)
    }

    fn write_buffer(&mut self, offset: u32, src: &[u8]) -> Result<usize, Self::Error> {
        (**self).write_buffer(offset, src)
    }

    fn erase_region(&mut self) -> Result<(), Self::Error> {
        (**self).erase_region()
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        (**self).commit()
    }
}

/// Clip a transfer of `len` bytes at `offset` to a region of `capacity`.
///
/// Returns the byte range inside the region that can be transferred.
pub fn clip_transfer(offset: u32, len: usize, capacity: usize) -> core::ops::Range<usize> {
    let start = (offset as usize).min(capacity);
    let end = start.saturating_add(len).min(capacity);
    start..end
}
