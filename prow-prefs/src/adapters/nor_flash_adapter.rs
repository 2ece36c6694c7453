//! NOR flash adapter for embedded-storage traits
//!
//! Wraps a type implementing the `embedded-storage` NOR flash traits and
//! exposes one erase sector of it as a block-erasable [`StorageBackend`].
//!
//! # Example
//!
//! ```ignore
//! use prow_prefs::{NorFlashAdapter, NorFlashConfig};
//!
//! let flash = board_spi_flash();
//! let config = NorFlashConfig::default_2mb(); // last 4KB sector
//! let backend = NorFlashAdapter::new(flash, config);
//! ```

use embedded_storage::nor_flash::NorFlash;

use super::error::FlashError;
use crate::domain::{Medium, StorageBackend, clip_transfer};

/// Default erase sector size (4KB)
pub const NOR_FLASH_SECTOR_SIZE: u32 = 4096;

/// Configuration for the flash sector holding the preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NorFlashConfig {
    /// Start offset in flash (must be sector aligned)
    pub start_offset: u32,
    /// Size of the erase sector in bytes
    pub sector_size: u32,
}

impl NorFlashConfig {
    /// Create a new flash configuration
    ///
    /// # Arguments
    /// * `start_offset` - Byte offset in flash (must be sector aligned)
    /// * `sector_size` - Erase sector size in bytes
    ///
    /// # Panics
    /// Panics if `sector_size` is 0 or `start_offset` is not aligned to it
    pub const fn new(start_offset: u32, sector_size: u32) -> Self {
        assert!(sector_size > 0, "sector_size must be non-zero");
        assert!(
            start_offset % sector_size == 0,
            "start_offset must be sector aligned"
        );
        Self {
            start_offset,
            sector_size,
        }
    }

    /// Use the last 4KB sector of a flash part of `flash_size` bytes
    pub const fn last_sector_of(flash_size: u32) -> Self {
        Self::new(flash_size - NOR_FLASH_SECTOR_SIZE, NOR_FLASH_SECTOR_SIZE)
    }

    /// Last sector of a 2MB part (Raspberry Pi Pico QSPI flash)
    pub const fn default_2mb() -> Self {
        Self::last_sector_of(2 * 1024 * 1024)
    }

    /// Last sector of a 16MB part
    pub const fn default_16mb() -> Self {
        Self::last_sector_of(16 * 1024 * 1024)
    }

    /// First byte after the sector
    #[inline]
    pub const fn end_offset(&self) -> u32 {
        self.start_offset + self.sector_size
    }
}

impl Default for NorFlashConfig {
    fn default() -> Self {
        Self::default_2mb()
    }
}

/// Adapter that wraps embedded-storage NOR flash as a [`StorageBackend`]
///
/// Record fields sit at unaligned offsets (the profile index is at byte 4,
/// profiles start at byte 5), so the part must support single-byte reads and
/// programming. SPI NOR parts driven through page-program commands do.
pub struct NorFlashAdapter<F> {
    flash: F,
    config: NorFlashConfig,
}

impl<F: NorFlash> NorFlashAdapter<F> {
    /// Create a new NOR flash adapter
    ///
    /// # Panics
    /// Panics if the flash cannot read or program single bytes, if the
    /// sector size is not a multiple of the flash erase size, or if the
    /// sector lies past the end of the flash
    pub fn new(flash: F, config: NorFlashConfig) -> Self {
        assert!(
            F::READ_SIZE == 1 && F::WRITE_SIZE == 1,
            "flash must support byte-granular reads and writes"
        );
        assert!(
            config.sector_size as usize % F::ERASE_SIZE == 0,
            "sector_size must be a multiple of the flash erase size"
        );
        assert!(
            config.end_offset() as usize <= flash.capacity(),
            "sector lies outside the flash"
        );
        Self { flash, config }
    }
}

impl<F> NorFlashAdapter<F> {
    /// Get the configuration
    pub fn config(&self) -> &NorFlashConfig {
        &self.config
    }

    /// Get a reference to the flash
    pub fn flash(&self) -> &F {
        &self.flash
    }

    /// Consume the adapter and return the underlying flash
    pub fn into_inner(self) -> F {
        self.flash
    }
}

impl<F: NorFlash> StorageBackend for NorFlashAdapter<F> {
    type Error = FlashError;

    fn medium(&self) -> Medium {
        Medium::BlockErasable
    }

    fn capacity(&self) -> usize {
        self.config.sector_size as usize
    }

    fn read_buffer(&mut self, offset: u32, dest: &mut [u8]) -> Result<usize, Self::Error> {
        let range = clip_transfer(offset, dest.len(), self.capacity());
        let len = range.len();
        if len == 0 {
            return Ok(0);
        }
        self.flash
            .read(self.config.start_offset + range.start as u32, &mut dest[..len])
            .map_err(FlashError::from_driver)?;
        Ok(len)
    }

    fn write_buffer(&mut self, offset: u32, src: &[u8]) -> Result<usize, Self::Error> {
        let range = clip_transfer(offset, src.len(), self.capacity());
        let len = range.len();
        if len == 0 {
            return Ok(0);
        }
        self.flash
            .write(self.config.start_offset + range.start as u32, &src[..len])
            .map_err(FlashError::from_driver)?;
        Ok(len)
    }

    fn erase_region(&mut self) -> Result<(), Self::Error> {
        self.flash
            .erase(self.config.start_offset, self.config.end_offset())
            .map_err(FlashError::from_driver)
    }
}
