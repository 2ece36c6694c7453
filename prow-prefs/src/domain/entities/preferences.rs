//! Preferences record entity.

use super::ProfileData;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// The in-memory preferences record.
///
/// Holds the selected profile index and a fixed-length profile array. The
/// array length is the profile count; it is set at construction and never
/// changes.
///
/// # Type Parameters
///
/// The profile storage can be:
/// - Stack-allocated: `Preferences<[ProfileData; N]>`
/// - Borrowed: `Preferences<&mut [ProfileData]>`
/// - Heap-allocated: `Preferences<Vec<ProfileData>>` when `alloc` is enabled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences<P> {
    profile: u8,
    profiles: P,
}

impl<P> Preferences<P>
where
    P: AsRef<[ProfileData]> + AsMut<[ProfileData]>,
{
    /// Wrap a profile array with profile 0 selected.
    pub fn new(profiles: P) -> Self {
        Self {
            profile: 0,
            profiles,
        }
    }

    /// Number of profiles in the record.
    #[inline]
    pub fn profile_count(&self) -> usize {
        self.profiles.as_ref().len()
    }

    /// Raw selected profile index.
    ///
    /// May be out of range after loading foreign data; see
    /// [`Preferences::selected_profile`].
    #[inline]
    pub fn profile(&self) -> u8 {
        self.profile
    }

    /// Set the selected profile index without validation.
    #[inline]
    pub fn set_profile(&mut self, index: u8) {
        self.profile = index;
    }

    /// Select a profile, rejecting out-of-range indices.
    pub fn select(&mut self, index: usize) -> Result<(), usize> {
        if index < self.profile_count() {
            self.profile = index as u8;
            Ok(())
        } else {
            Err(self.profile_count())
        }
    }

    /// Whether the selected index refers to an existing profile.
    #[inline]
    pub fn profile_in_range(&self) -> bool {
        usize::from(self.profile) < self.profile_count()
    }

    /// The selected profile, if the index is in range.
    pub fn selected_profile(&self) -> Option<&ProfileData> {
        self.profiles.as_ref().get(usize::from(self.profile))
    }

    /// All profiles.
    #[inline]
    pub fn profiles(&self) -> &[ProfileData] {
        self.profiles.as_ref()
    }

    /// All profiles, mutably.
    #[inline]
    pub fn profiles_mut(&mut self) -> &mut [ProfileData] {
        self.profiles.as_mut()
    }

    /// Consume the record and return the profile storage.
    pub fn into_inner(self) -> P {
        self.profiles
    }
}

impl<const N: usize> Preferences<[ProfileData; N]> {
    /// Record of `N` default profiles.
    pub fn with_defaults() -> Self {
        Self::new([ProfileData::default(); N])
    }
}

#[cfg(feature = "alloc")]
impl Preferences<Vec<ProfileData>> {
    /// Heap-allocated record of `count` default profiles.
    pub fn with_count(count: usize) -> Self {
        Self::new(alloc::vec![ProfileData::default(); count])
    }
}
