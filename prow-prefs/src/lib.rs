//! Fixed-layout calibration profile storage for NOR flash and EEPROM.
//!
//! Persists a small preferences record (a selected-profile index plus an
//! array of calibration profiles, optionally followed by an extended
//! settings block) at fixed byte offsets in non-volatile memory.
//!
//! # Architecture
//!
//! ## Domain Layer (`domain`)
//! - **Entities**: `ProfileData`, `ExtendedSettings`, `Preferences`
//! - **Value Objects**: `HeaderId`, `Layout`
//! - **Services**: `PreferencesStore` with the load/save protocol
//! - **Ports**: `StorageBackend` interface
//!
//! ## Adapter Layer (`adapters`)
//! - **`NorFlashAdapter`**: one sector of an `embedded-storage` NOR flash
//! - **`ByteStorageAdapter`**: a window of an `embedded-storage` EEPROM
//! - **`NoStorage`**: boards without persistent memory
//!
//! # On-medium layout
//!
//! ```text
//! offset 0      4-byte header "Prow"
//! offset 4      selected profile index (u8)
//! offset 5      profile 0 (16 bytes), profile 1, ...
//! offset 5+16N  extended block (44 bytes, optional)
//! ```
//!
//! # Quick Start
//!
//! ```ignore
//! use prow_prefs::{NorFlashAdapter, NorFlashConfig, Preferences, PreferencesStore, PrefsError, ProfileData};
//!
//! let backend = NorFlashAdapter::new(flash, NorFlashConfig::default_2mb());
//! let mut store = PreferencesStore::new(backend, Preferences::<[ProfileData; 4]>::with_defaults());
//!
//! match store.load() {
//!     Err(PrefsError::NoData) => store.save()?,
//!     other => other?,
//! }
//! ```
//!
//! # Features
//!
//! - `alloc`: Enable `Vec`-backed profile arrays
//! - `log`: Enable logging support
//! - `defmt`: Enable defmt logging for embedded

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Must come first so the logging macros are visible to later modules.
#[macro_use]
mod fmt;

pub mod adapters;
pub mod domain;

pub use domain::{
    ExtendedSettings, HEADER_OFFSET, HeaderId, Layout, MAX_PROFILE_COUNT, Medium,
    PROFILE_DATA_SIZE, PROFILE_INDEX_OFFSET, PROFILES_OFFSET, Preferences, PreferencesStore,
    PrefsError, ProfileData, SUCCESS_CODE, StorageBackend, error_code_to_str, result_code,
};

pub use adapters::{
    ByteStorageAdapter, ByteStorageConfig, CommitFn, FlashError, NOR_FLASH_SECTOR_SIZE, NoStorage,
    NoStorageError, NorFlashAdapter, NorFlashConfig,
};
