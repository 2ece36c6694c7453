//! Record layout value object.
//!
//! All storage offsets are derived here and nowhere else. The profile array
//! is configuration sized, so every field after it moves with
//! `profile_count`.
//!
//! ```text
//! offset                      field                       size
//! 0                           header magic "Prow"         4
//! 4                           selected profile index      1
//! 5                           profile array               count * 16
//! 5 + count * 16              extended: flags byte        1
//! +1                          extended: pin mappings      27
//! +28                         extended: settings          8 * 2
//! ```

use core::fmt;

use crate::domain::entities::{ExtendedSettings, PROFILE_DATA_SIZE};
use crate::domain::value_objects::HeaderId;

/// Offset of the header magic.
pub const HEADER_OFFSET: u32 = 0;

/// Offset of the selected profile index.
pub const PROFILE_INDEX_OFFSET: u32 = HeaderId::SIZE as u32;

/// Offset of the first profile record.
pub const PROFILES_OFFSET: u32 = PROFILE_INDEX_OFFSET + 1;

/// Largest supported profile count (the selected index is one byte).
pub const MAX_PROFILE_COUNT: usize = u8::MAX as usize;

/// Shape of the persisted record.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    profile_count: u8,
    extended: bool,
}

impl Layout {
    /// Position of the flags byte within the extended block.
    pub const EXTENDED_BOOLS_AT: usize = 0;
    /// Position of pin mapping entry 0 within the extended block.
    pub const EXTENDED_MAPPINGS_AT: usize = Self::EXTENDED_BOOLS_AT + 1;
    /// Position of settings entry 0 within the extended block.
    pub const EXTENDED_SETTINGS_AT: usize =
        Self::EXTENDED_MAPPINGS_AT + ExtendedSettings::MAPPING_COUNT;
    /// Size of the extended block.
    pub const EXTENDED_SIZE: usize = Self::EXTENDED_SETTINGS_AT + ExtendedSettings::SETTINGS_COUNT * 2;

    /// Create a layout for `profile_count` profiles.
    ///
    /// # Panics
    ///
    /// Panics if `profile_count` is 0 or greater than [`MAX_PROFILE_COUNT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prow_prefs::Layout;
    ///
    /// let layout = Layout::new(4, true);
    /// assert_eq!(layout.extended_offset(), 5 + 4 * 16);
    /// ```
    pub const fn new(profile_count: usize, extended: bool) -> Self {
        assert!(
            profile_count >= 1 && profile_count <= MAX_PROFILE_COUNT,
            "profile_count must be between 1 and 255"
        );
        Self {
            profile_count: profile_count as u8,
            extended,
        }
    }

    /// Like [`Layout::new`] but returns `None` instead of panicking.
    pub const fn try_new(profile_count: usize, extended: bool) -> Option<Self> {
        if profile_count == 0 || profile_count > MAX_PROFILE_COUNT {
            None
        } else {
            Some(Self::new(profile_count, extended))
        }
    }

    /// Number of profile records.
    #[inline]
    pub const fn profile_count(&self) -> usize {
        self.profile_count as usize
    }

    /// Whether the record carries the extended settings block.
    #[inline]
    pub const fn has_extended(&self) -> bool {
        self.extended
    }

    /// Size of the profile array in bytes.
    #[inline]
    pub const fn profiles_len(&self) -> usize {
        self.profile_count as usize * PROFILE_DATA_SIZE
    }

    /// Offset of profile `index` within the region.
    #[inline]
    pub const fn profile_offset(&self, index: usize) -> u32 {
        PROFILES_OFFSET + (index * PROFILE_DATA_SIZE) as u32
    }

    /// First byte after the profile array, where the extended block starts.
    #[inline]
    pub const fn extended_offset(&self) -> u32 {
        PROFILES_OFFSET + self.profiles_len() as u32
    }

    /// Offset of the extended flags byte.
    #[inline]
    pub const fn bools_offset(&self) -> u32 {
        self.extended_offset() + Self::EXTENDED_BOOLS_AT as u32
    }

    /// Offset of pin mapping entry 0.
    #[inline]
    pub const fn mappings_offset(&self) -> u32 {
        self.extended_offset() + Self::EXTENDED_MAPPINGS_AT as u32
    }

    /// Offset of settings entry 0.
    #[inline]
    pub const fn settings_offset(&self) -> u32 {
        self.extended_offset() + Self::EXTENDED_SETTINGS_AT as u32
    }

    /// Offset of settings entry `index` (2-byte stride).
    #[inline]
    pub const fn setting_offset(&self, index: usize) -> u32 {
        self.settings_offset() + (index * 2) as u32
    }

    /// Total bytes the configured record occupies.
    pub const fn required_size(&self) -> usize {
        let base = self.extended_offset() as usize;
        if self.extended {
            base + Self::EXTENDED_SIZE
        } else {
            base
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout({} profiles, extended={}, {} bytes)",
            self.profile_count,
            self.extended,
            self.required_size()
        )
    }
}
