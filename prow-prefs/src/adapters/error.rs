//! Adapter-level errors.

use core::fmt;
use embedded_storage::nor_flash::{NorFlashError, NorFlashErrorKind};

/// Error type for NOR flash operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashError {
    kind: NorFlashErrorKind,
}

impl FlashError {
    /// The kind reported by the flash driver.
    #[inline]
    pub fn kind(&self) -> NorFlashErrorKind {
        self.kind
    }

    pub(crate) fn from_driver<E: NorFlashError>(err: E) -> Self {
        Self { kind: err.kind() }
    }
}

impl fmt::Display for FlashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NOR flash error: {:?}", self.kind)
    }
}

impl core::error::Error for FlashError {}

/// Error reported by every operation of [`NoStorage`](super::NoStorage).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoStorageError;

impl fmt::Display for NoStorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No storage backend configured")
    }
}

impl core::error::Error for NoStorageError {}
