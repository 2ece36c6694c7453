//! Storage error taxonomy.
//!
//! Every failure of the preferences store collapses into one of five kinds,
//! each with a stable negative integer code that firmware can report over a
//! serial console or show in a menu. Non-negative codes mean success.

use core::fmt;

/// Errors reported by [`PreferencesStore`](crate::domain::PreferencesStore).
///
/// The discriminants are the legacy integer codes and are part of the
/// external interface.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum PrefsError {
    /// The build has no storage backend.
    NoStorage = -1,
    /// A read from the medium failed or transferred fewer bytes than asked.
    Read = -2,
    /// The medium is readable but holds no saved preferences.
    ///
    /// This is the expected state on first boot and after a reset.
    NoData = -3,
    /// A write or commit failed or transferred fewer bytes than asked.
    Write = -4,
    /// The sector erase failed; nothing was written.
    Erase = -5,
}

/// Code reported for a successful operation.
pub const SUCCESS_CODE: i32 = 0;

// Indexed by the negated error code.
const ERROR_TEXT: [&str; 6] = [
    "Success",
    "No storage memory",
    "Read error",
    "No preferences saved",
    "Write error",
    "Erase failed",
];

impl PrefsError {
    /// The integer code of this error.
    #[inline]
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Map an integer code back to an error.
    ///
    /// Returns `None` for success codes (`>= 0`) and for unknown codes.
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            -1 => Some(Self::NoStorage),
            -2 => Some(Self::Read),
            -3 => Some(Self::NoData),
            -4 => Some(Self::Write),
            -5 => Some(Self::Erase),
            _ => None,
        }
    }

    /// Fixed human-readable text for this error.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        ERROR_TEXT[(-self.code()) as usize]
    }

    /// Whether the caller should fall back to defaults rather than alarm.
    #[inline]
    pub const fn is_no_data(self) -> bool {
        matches!(self, Self::NoData)
    }
}

/// Look up the text for an integer result code.
///
/// Any non-negative code is success. Codes outside the table return an
/// empty string.
///
/// # Examples
///
/// ```
/// use prow_prefs::error_code_to_str;
///
/// assert_eq!(error_code_to_str(0), "Success");
/// assert_eq!(error_code_to_str(-3), "No preferences saved");
/// assert_eq!(error_code_to_str(-42), "");
/// ```
pub fn error_code_to_str(code: i32) -> &'static str {
    if code >= 0 {
        return ERROR_TEXT[0];
    }
    usize::try_from(code.unsigned_abs())
        .ok()
        .and_then(|index| ERROR_TEXT.get(index).copied())
        .unwrap_or("")
}

/// Convert an operation result into its legacy integer code.
pub fn result_code<T>(result: &Result<T, PrefsError>) -> i32 {
    match result {
        Ok(_) => SUCCESS_CODE,
        Err(e) => e.code(),
    }
}

impl From<PrefsError> for i32 {
    fn from(err: PrefsError) -> Self {
        err.code()
    }
}

impl fmt::Display for PrefsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for PrefsError {}
