//! Calibration profile entity and its fixed binary encoding.
//!
//! Encoded layout (16 bytes, little-endian):
//!
//! ```text
//! byte  0..2    x_scale         u16, scale * 1000
//! byte  2..4    y_scale         u16, scale * 1000
//! byte  4..8    packed word     u32
//!                 bits  0..12   x_center
//!                 bits 12..24   y_center
//!                 bits 24..27   ir_sensitivity
//!                 bits 27..32   run_mode
//! byte  8..12   reserved        u32
//! byte 12..16   reserved2       u32
//! ```

/// Encoded size of one [`ProfileData`] record.
pub const PROFILE_DATA_SIZE: usize = 16;

const CENTER_BITS: u32 = 12;
const CENTER_MASK: u16 = (1 << CENTER_BITS) - 1;
const SENSITIVITY_MASK: u8 = 0b111;
const RUN_MODE_MASK: u8 = 0b1_1111;

const Y_CENTER_SHIFT: u32 = 12;
const SENSITIVITY_SHIFT: u32 = 24;
const RUN_MODE_SHIFT: u32 = 27;

/// One calibration record.
///
/// Bitfield members are masked to their width on construction, so every
/// value of this type survives an encode/decode cycle unchanged.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ProfileData {
    x_scale: u16,
    y_scale: u16,
    x_center: u16,
    y_center: u16,
    ir_sensitivity: u8,
    run_mode: u8,
    reserved: u32,
    reserved2: u32,
}

impl ProfileData {
    /// Largest value the 12-bit center fields can hold.
    pub const MAX_CENTER: u16 = CENTER_MASK;
    /// Largest value the 3-bit sensitivity field can hold.
    pub const MAX_IR_SENSITIVITY: u8 = SENSITIVITY_MASK;
    /// Largest value the 5-bit run mode field can hold.
    pub const MAX_RUN_MODE: u8 = RUN_MODE_MASK;

    /// Create a profile. Out-of-range bitfield values are truncated.
    ///
    /// # Examples
    ///
    /// ```
    /// use prow_prefs::ProfileData;
    ///
    /// let profile = ProfileData::new(1250, 980, 512, 384, 2, 1);
    /// assert_eq!(profile.x_center(), 512);
    /// assert_eq!(ProfileData::decode(&profile.encode()), profile);
    /// ```
    pub const fn new(
        x_scale: u16,
        y_scale: u16,
        x_center: u16,
        y_center: u16,
        ir_sensitivity: u8,
        run_mode: u8,
    ) -> Self {
        Self {
            x_scale,
            y_scale,
            x_center: x_center & CENTER_MASK,
            y_center: y_center & CENTER_MASK,
            ir_sensitivity: ir_sensitivity & SENSITIVITY_MASK,
            run_mode: run_mode & RUN_MODE_MASK,
            reserved: 0,
            reserved2: 0,
        }
    }

    /// Set the two reserved words.
    pub const fn with_reserved(mut self, reserved: u32, reserved2: u32) -> Self {
        self.reserved = reserved;
        self.reserved2 = reserved2;
        self
    }

    /// X scale, fixed point (real value * 1000).
    #[inline]
    pub const fn x_scale(&self) -> u16 {
        self.x_scale
    }

    /// Y scale, fixed point (real value * 1000).
    #[inline]
    pub const fn y_scale(&self) -> u16 {
        self.y_scale
    }

    /// X scale as a real number.
    #[inline]
    pub fn x_scale_f32(&self) -> f32 {
        f32::from(self.x_scale) / 1000.0
    }

    /// Y scale as a real number.
    #[inline]
    pub fn y_scale_f32(&self) -> f32 {
        f32::from(self.y_scale) / 1000.0
    }

    /// X center (12 bits).
    #[inline]
    pub const fn x_center(&self) -> u16 {
        self.x_center
    }

    /// Y center (12 bits).
    #[inline]
    pub const fn y_center(&self) -> u16 {
        self.y_center
    }

    /// IR camera sensitivity level (3 bits).
    #[inline]
    pub const fn ir_sensitivity(&self) -> u8 {
        self.ir_sensitivity
    }

    /// Run mode selector (5 bits).
    #[inline]
    pub const fn run_mode(&self) -> u8 {
        self.run_mode
    }

    /// First reserved word.
    #[inline]
    pub const fn reserved(&self) -> u32 {
        self.reserved
    }

    /// Second reserved word.
    #[inline]
    pub const fn reserved2(&self) -> u32 {
        self.reserved2
    }

    /// Set both scales from fixed-point values.
    pub fn set_scale(&mut self, x_scale: u16, y_scale: u16) {
        self.x_scale = x_scale;
        self.y_scale = y_scale;
    }

    /// Set both centers. Values are truncated to 12 bits.
    pub fn set_center(&mut self, x_center: u16, y_center: u16) {
        self.x_center = x_center & CENTER_MASK;
        self.y_center = y_center & CENTER_MASK;
    }

    /// Set the sensitivity level. Truncated to 3 bits.
    pub fn set_ir_sensitivity(&mut self, level: u8) {
        self.ir_sensitivity = level & SENSITIVITY_MASK;
    }

    /// Set the run mode. Truncated to 5 bits.
    pub fn set_run_mode(&mut self, mode: u8) {
        self.run_mode = mode & RUN_MODE_MASK;
    }

    fn packed_word(&self) -> u32 {
        u32::from(self.x_center)
            | u32::from(self.y_center) << Y_CENTER_SHIFT
            | u32::from(self.ir_sensitivity) << SENSITIVITY_SHIFT
            | u32::from(self.run_mode) << RUN_MODE_SHIFT
    }

    /// Encode into the on-medium representation.
    pub fn encode(&self) -> [u8; PROFILE_DATA_SIZE] {
        let mut out = [0u8; PROFILE_DATA_SIZE];
        self.encode_into(&mut out);
        out
    }

    /// Encode into an existing record buffer.
    pub fn encode_into(&self, out: &mut [u8; PROFILE_DATA_SIZE]) {
        out[0..2].copy_from_slice(&self.x_scale.to_le_bytes());
        out[2..4].copy_from_slice(&self.y_scale.to_le_bytes());
        out[4..8].copy_from_slice(&self.packed_word().to_le_bytes());
        out[8..12].copy_from_slice(&self.reserved.to_le_bytes());
        out[12..16].copy_from_slice(&self.reserved2.to_le_bytes());
    }

    /// Decode from the on-medium representation.
    ///
    /// Every bit pattern decodes; reserved fields are kept as read.
    pub fn decode(bytes: &[u8; PROFILE_DATA_SIZE]) -> Self {
        let word = |at: usize| u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        let packed = word(4);

        Self {
            x_scale: u16::from_le_bytes([bytes[0], bytes[1]]),
            y_scale: u16::from_le_bytes([bytes[2], bytes[3]]),
            x_center: (packed & u32::from(CENTER_MASK)) as u16,
            y_center: ((packed >> Y_CENTER_SHIFT) & u32::from(CENTER_MASK)) as u16,
            ir_sensitivity: ((packed >> SENSITIVITY_SHIFT) & u32::from(SENSITIVITY_MASK)) as u8,
            run_mode: ((packed >> RUN_MODE_SHIFT) & u32::from(RUN_MODE_MASK)) as u8,
            reserved: word(8),
            reserved2: word(12),
        }
    }
}
