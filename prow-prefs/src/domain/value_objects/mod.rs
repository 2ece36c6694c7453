//! Value objects - small validated types with no identity.

mod header_id;
mod layout;

pub use header_id::HeaderId;
pub use layout::{
    HEADER_OFFSET, Layout, MAX_PROFILE_COUNT, PROFILE_INDEX_OFFSET, PROFILES_OFFSET,
};
