//! Byte-addressable storage adapter (EEPROM, emulated EEPROM, FRAM).
//!
//! Wraps an `embedded-storage` [`Storage`] and exposes a window of it as a
//! byte-addressable [`StorageBackend`]. Parts that buffer writes in RAM
//! (RP2040 EEPROM emulation, for instance) register a commit hook that
//! flushes the buffer.

use core::fmt::Debug;

use embedded_storage::{ReadStorage, Storage};

use crate::domain::{Medium, StorageBackend, clip_transfer};

/// Hook that persists buffered writes.
pub type CommitFn<S> = fn(&mut S) -> Result<(), <S as ReadStorage>::Error>;

/// Window of the device managed by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteStorageConfig {
    /// Start offset on the device
    pub start_offset: u32,
    /// Window length in bytes, 0 runs to the end of the device
    pub length: u32,
}

impl ByteStorageConfig {
    /// Create a new window configuration
    pub const fn new(start_offset: u32, length: u32) -> Self {
        Self {
            start_offset,
            length,
        }
    }

    /// Manage the whole device
    pub const fn whole_device() -> Self {
        Self::new(0, 0)
    }
}

impl Default for ByteStorageConfig {
    fn default() -> Self {
        Self::whole_device()
    }
}

/// Adapter that wraps embedded-storage byte storage as a [`StorageBackend`]
pub struct ByteStorageAdapter<S: ReadStorage> {
    storage: S,
    start: u32,
    capacity: usize,
    commit: Option<CommitFn<S>>,
}

impl<S: Storage> ByteStorageAdapter<S> {
    /// Create an adapter whose writes are durable as soon as they return
    ///
    /// The window is clamped to the device.
    pub fn new(storage: S, config: ByteStorageConfig) -> Self {
        let device = storage.capacity();
        let start = (config.start_offset as usize).min(device);
        let available = device - start;
        let capacity = match config.length {
            0 => available,
            length => (length as usize).min(available),
        };

        Self {
            storage,
            start: start as u32,
            capacity,
            commit: None,
        }
    }

    /// Create an adapter that calls `commit` to persist writes
    pub fn with_commit(storage: S, config: ByteStorageConfig, commit: CommitFn<S>) -> Self {
        let mut adapter = Self::new(storage, config);
        adapter.commit = Some(commit);
        adapter
    }

    /// Get a reference to the storage
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consume the adapter and return the underlying storage
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S> StorageBackend for ByteStorageAdapter<S>
where
    S: Storage,
    S::Error: Debug,
{
    type Error = S::Error;

    fn medium(&self) -> Medium {
        Medium::ByteAddressable
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn read_buffer(&mut self, offset: u32, dest: &mut [u8]) -> Result<usize, Self::Error> {
        let range = clip_transfer(offset, dest.len(), self.capacity);
        let len = range.len();
        if len > 0 {
            self.storage
                .read(self.start + range.start as u32, &mut dest[..len])?;
        }
        Ok(len)
    }

    fn write_buffer(&mut self, offset: u32, src: &[u8]) -> Result<usize, Self::Error> {
        let range = clip_transfer(offset, src.len(), self.capacity);
        let len = range.len();
        if len > 0 {
            self.storage.write(self.start + range.start as u32, &src[..len])?;
        }
        Ok(len)
    }

    fn erase_region(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        match self.commit {
            Some(commit) => commit(&mut self.storage),
            None => Ok(()),
        }
    }
}
