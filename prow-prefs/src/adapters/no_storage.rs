//! Backend for boards without persistent storage.

use super::error::NoStorageError;
use crate::domain::{Medium, StorageBackend};

/// A backend with nothing behind it.
///
/// Every store operation over it reports
/// [`PrefsError::NoStorage`](crate::PrefsError::NoStorage) without touching
/// the caller's buffers.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NoStorage;

impl StorageBackend for NoStorage {
    type Error = NoStorageError;

    fn medium(&self) -> Medium {
        Medium::None
    }

    fn capacity(&self) -> usize {
        0
    }

    fn read_buffer(&mut self, _offset: u32, _dest: &mut [u8]) -> Result<usize, Self::Error> {
        Err(NoStorageError)
    }

    fn write_buffer(&mut self, _offset: u32, _src: &[u8]) -> Result<usize, Self::Error> {
        Err(NoStorageError)
    }

    fn erase_region(&mut self) -> Result<(), Self::Error> {
        Err(NoStorageError)
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        Err(NoStorageError)
    }
}
