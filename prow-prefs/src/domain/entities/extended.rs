//! Extended settings block.
//!
//! The block is always reserved in full, even when custom pins are off, so
//! that toggling the feature never moves the settings array. Field positions
//! come from [`Layout`].

use crate::domain::value_objects::Layout;

const MAPPING_COUNT: usize = 27;
const SETTINGS_COUNT: usize = 8;

/// Flags byte, custom pin mappings and main settings.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExtendedSettings {
    /// Packed boolean toggles.
    pub bools: u8,
    /// Pin mappings. Entry 0 is the "custom pins enabled" flag.
    pub mappings: [i8; MAPPING_COUNT],
    /// Main settings values.
    pub settings: [u16; SETTINGS_COUNT],
}

impl ExtendedSettings {
    /// Number of pin mapping entries, including the enable flag.
    pub const MAPPING_COUNT: usize = MAPPING_COUNT;
    /// Number of 16-bit settings.
    pub const SETTINGS_COUNT: usize = SETTINGS_COUNT;
    /// Encoded size in bytes.
    pub const SIZE: usize = Layout::EXTENDED_SIZE;

    const BOOLS_AT: usize = Layout::EXTENDED_BOOLS_AT;
    const MAPPINGS_AT: usize = Layout::EXTENDED_MAPPINGS_AT;
    const SETTINGS_AT: usize = Layout::EXTENDED_SETTINGS_AT;

    /// A block with every field zeroed.
    pub const fn zeroed() -> Self {
        Self {
            bools: 0,
            mappings: [0; Self::MAPPING_COUNT],
            settings: [0; Self::SETTINGS_COUNT],
        }
    }

    /// Whether the custom pin mappings are in use.
    #[inline]
    pub const fn custom_pins_enabled(&self) -> bool {
        self.mappings[0] != 0
    }

    /// The custom pin assignments (entries 1..27), if the feature is on.
    pub fn custom_pins(&self) -> Option<&[i8]> {
        self.custom_pins_enabled().then(|| &self.mappings[1..])
    }

    /// Encode into the on-medium representation.
    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[Self::BOOLS_AT] = self.bools;
        for (dst, mapping) in out[Self::MAPPINGS_AT..Self::SETTINGS_AT]
            .iter_mut()
            .zip(self.mappings)
        {
            *dst = mapping as u8;
        }
        for (dst, setting) in out[Self::SETTINGS_AT..]
            .chunks_exact_mut(2)
            .zip(self.settings)
        {
            dst.copy_from_slice(&setting.to_le_bytes());
        }
        out
    }

    /// Decode from the on-medium representation.
    pub fn decode(bytes: &[u8; Self::SIZE]) -> Self {
        let mut block = Self::zeroed();
        block.bools = bytes[Self::BOOLS_AT];
        for (mapping, src) in block
            .mappings
            .iter_mut()
            .zip(&bytes[Self::MAPPINGS_AT..Self::SETTINGS_AT])
        {
            *mapping = *src as i8;
        }
        for (setting, src) in block
            .settings
            .iter_mut()
            .zip(bytes[Self::SETTINGS_AT..].chunks_exact(2))
        {
            *setting = u16::from_le_bytes([src[0], src[1]]);
        }
        block
    }
}

impl Default for ExtendedSettings {
    fn default() -> Self {
        Self::zeroed()
    }
}
