//! Adapters for the [`StorageBackend`](crate::StorageBackend) port.
//!
//! - [`NorFlashAdapter`]: one erase sector of an `embedded-storage` NOR flash
//! - [`ByteStorageAdapter`]: a window of an `embedded-storage` byte storage
//! - [`NoStorage`]: no persistent memory at all

mod byte_storage_adapter;
mod error;
mod no_storage;
mod nor_flash_adapter;

pub use byte_storage_adapter::{ByteStorageAdapter, ByteStorageConfig, CommitFn};
pub use error::{FlashError, NoStorageError};
pub use no_storage::NoStorage;
pub use nor_flash_adapter::{NOR_FLASH_SECTOR_SIZE, NorFlashAdapter, NorFlashConfig};
