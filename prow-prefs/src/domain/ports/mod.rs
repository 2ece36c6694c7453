//! Ports define the interfaces between the domain and the outside world.
//!
//! This module contains the **secondary (driven) port** the store depends
//! on for the persistence medium.

mod storage_backend;

pub use storage_backend::{Medium, StorageBackend, clip_transfer};
