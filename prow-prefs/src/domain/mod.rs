//! Domain layer - the record, its binary layout and the storage protocol.
//!
//! The domain layer contains:
//! - **Entities**: `ProfileData`, `ExtendedSettings`, `Preferences`
//! - **Value Objects**: `HeaderId`, `Layout`
//! - **Domain Services**: `PreferencesStore`
//! - **Ports**: `StorageBackend`
//! - **Domain Errors**: `PrefsError`
//!
//! # Hexagonal Architecture
//!
//! ```text
//!     ┌──────────────────────────────────┐
//!     │      Domain Layer (Core)         │
//!     │                                  │
//!     │  ┌────────────────────────────┐  │
//!     │  │  Entities & Value Objects  │  │
//!     │  │  - ProfileData, Layout     │  │
//!     │  └────────────────────────────┘  │
//!     │              ▲                   │
//!     │              │                   │
//!     │  ┌────────────────────────────┐  │
//!     │  │    Domain Services         │  │
//!     │  │    - PreferencesStore      │  │
//!     │  └────────────────────────────┘  │
//!     │              │                   │
//!     │              ▼                   │
//!     │  ┌────────────────────────────┐  │
//!     │  │    Ports (Interfaces)      │  │
//!     │  │    - StorageBackend        │  │
//!     │  └────────────────────────────┘  │
//!     └──────────────────────────────────┘
//!                    ▲
//!                    │ implemented by
//!                    │
//!     ┌──────────────────────────────────┐
//!     │      Adapter Layer               │
//!     │  - NorFlashAdapter               │
//!     │  - ByteStorageAdapter            │
//!     │  - NoStorage                     │
//!     └──────────────────────────────────┘
//! ```

pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

mod preferences_store;

pub use entities::{ExtendedSettings, PROFILE_DATA_SIZE, Preferences, ProfileData};
pub use error::{PrefsError, SUCCESS_CODE, error_code_to_str, result_code};
pub use ports::{Medium, StorageBackend, clip_transfer};
pub use preferences_store::PreferencesStore;
pub use value_objects::{
    HEADER_OFFSET, HeaderId, Layout, MAX_PROFILE_COUNT, PROFILE_INDEX_OFFSET, PROFILES_OFFSET,
};
