//! Entities - the records the store persists.

mod extended;
mod preferences;
mod profile_data;

pub use extended::ExtendedSettings;
pub use preferences::Preferences;
pub use profile_data::{PROFILE_DATA_SIZE, ProfileData};
