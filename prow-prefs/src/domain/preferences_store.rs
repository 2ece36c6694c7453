//! PreferencesStore domain service - the load/save protocol.
//!
//! The store owns the in-memory record and a backend, and moves the record
//! between the two using the offsets from [`Layout`]. It never retries and
//! stops a sequence at the first fault.

use crate::domain::{
    entities::{ExtendedSettings, PROFILE_DATA_SIZE, Preferences, ProfileData},
    error::PrefsError,
    ports::{Medium, StorageBackend},
    value_objects::{HEADER_OFFSET, HeaderId, Layout, PROFILE_INDEX_OFFSET},
};

/// Chunk size used when zeroing a byte-addressable region.
const RESET_CHUNK: usize = 64;

/// Domain service persisting a [`Preferences`] record.
///
/// # Type Parameters
///
/// - `B`: the backend (must implement `StorageBackend`)
/// - `P`: the profile storage (`[ProfileData; N]`, `&mut [ProfileData]`,
///   or `Vec<ProfileData>` with `alloc`)
///
/// # Examples
///
/// ```ignore
/// use prow_prefs::{PreferencesStore, Preferences, ProfileData, PrefsError};
///
/// let prefs = Preferences::<[ProfileData; 4]>::with_defaults();
/// let mut store = PreferencesStore::with_extended(backend, prefs);
///
/// match store.load() {
///     Ok(()) => {}
///     Err(PrefsError::NoData) => store.save()?,
///     Err(e) => return Err(e),
/// }
/// ```
pub struct PreferencesStore<B, P> {
    backend: B,
    layout: Layout,
    preferences: Preferences<P>,
    extended: Option<ExtendedSettings>,
}

impl<B, P> PreferencesStore<B, P>
where
    B: StorageBackend,
    P: AsRef<[ProfileData]> + AsMut<[ProfileData]>,
{
    /// Create a store for a record without the extended block.
    ///
    /// # Panics
    ///
    /// Panics if the record holds no profiles or more than 255.
    pub fn new(backend: B, preferences: Preferences<P>) -> Self {
        Self::with_layout(backend, preferences, false)
    }

    /// Create a store for a record followed by the extended block.
    ///
    /// # Panics
    ///
    /// Panics if the record holds no profiles or more than 255.
    pub fn with_extended(backend: B, preferences: Preferences<P>) -> Self {
        Self::with_layout(backend, preferences, true)
    }

    fn with_layout(backend: B, preferences: Preferences<P>, extended: bool) -> Self {
        let layout = Layout::new(preferences.profile_count(), extended);
        if backend.medium().is_present() && backend.capacity() < layout.required_size() {
            warn!(
                "storage region of {} bytes is smaller than the {} byte record",
                backend.capacity(),
                layout.required_size()
            );
        }
        Self {
            backend,
            layout,
            preferences,
            extended: None,
        }
    }

    /// The record layout.
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Total bytes the configured record occupies on the medium.
    #[inline]
    pub fn required_size(&self) -> usize {
        self.layout.required_size()
    }

    /// The in-memory record.
    #[inline]
    pub fn preferences(&self) -> &Preferences<P> {
        &self.preferences
    }

    /// The in-memory record, mutably.
    #[inline]
    pub fn preferences_mut(&mut self) -> &mut Preferences<P> {
        &mut self.preferences
    }

    /// The last extended block loaded or saved, if any.
    #[inline]
    pub fn extended(&self) -> Option<&ExtendedSettings> {
        self.extended.as_ref()
    }

    /// The backend.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend, mutably.
    #[inline]
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consume the store and return the backend and the record.
    pub fn into_parts(self) -> (B, Preferences<P>) {
        (self.backend, self.preferences)
    }

    /// Load the record from storage.
    ///
    /// Reads the header, the selected index, then each profile. Fields are
    /// updated as they are read; a fault part way through leaves the earlier
    /// fields loaded.
    ///
    /// The selected index is not checked against the profile count. Use
    /// [`Preferences::selected_profile`] for a checked lookup.
    ///
    /// # Errors
    ///
    /// - [`PrefsError::NoStorage`] if there is no backend
    /// - [`PrefsError::NoData`] if the header magic is absent
    /// - [`PrefsError::Read`] on any failed or short read
    ///
    /// A short read is an error on every medium, byte-addressable ones
    /// included. A record that runs past the end of the region is reported
    /// as [`PrefsError::Read`] rather than loaded from whatever bytes fit.
    pub fn load(&mut self) -> Result<(), PrefsError> {
        self.present_medium()?;

        let mut header = [0u8; HeaderId::SIZE];
        read_exact(&mut self.backend, HEADER_OFFSET, &mut header)?;
        let header = HeaderId::from_bytes(header);
        if !header.is_valid() {
            debug!("no saved preferences (header {:#x})", header.as_u32());
            return Err(PrefsError::NoData);
        }

        let mut index = [0u8; 1];
        read_exact(&mut self.backend, PROFILE_INDEX_OFFSET, &mut index)?;
        self.preferences.set_profile(index[0]);
        if !self.preferences.profile_in_range() {
            warn!(
                "loaded profile index {} is outside {} profiles",
                index[0],
                self.layout.profile_count()
            );
        }

        let layout = self.layout;
        for (i, profile) in self.preferences.profiles_mut().iter_mut().enumerate() {
            let mut raw = [0u8; PROFILE_DATA_SIZE];
            read_exact(&mut self.backend, layout.profile_offset(i), &mut raw)?;
            *profile = ProfileData::decode(&raw);
        }

        debug!("loaded {} profiles", layout.profile_count());
        Ok(())
    }

    /// Save the record to storage.
    ///
    /// On block-erasable media the region is erased first. When the layout
    /// has an extended block it is written back after the profiles: the
    /// cached block if there is one, otherwise the bytes read from the
    /// medium before the erase. The backend is committed last.
    ///
    /// # Errors
    ///
    /// - [`PrefsError::NoStorage`] if there is no backend
    /// - [`PrefsError::Read`] if the extended block cannot be read before
    ///   the erase; nothing is erased or written
    /// - [`PrefsError::Erase`] if the erase fails; nothing is written
    /// - [`PrefsError::Write`] on any failed or short write, or a failed
    ///   commit
    pub fn save(&mut self) -> Result<(), PrefsError> {
        let medium = self.present_medium()?;
        let extended = self.extended_to_rewrite(medium)?;

        if medium.requires_erase() {
            erase(&mut self.backend)?;
        }

        write_exact(&mut self.backend, HEADER_OFFSET, &HeaderId::PROW.to_bytes())?;
        write_exact(
            &mut self.backend,
            PROFILE_INDEX_OFFSET,
            &[self.preferences.profile()],
        )?;

        for (i, profile) in self.preferences.profiles().iter().enumerate() {
            write_exact(&mut self.backend, self.layout.profile_offset(i), &profile.encode())?;
        }

        if let Some(raw) = extended {
            write_exact(&mut self.backend, self.layout.extended_offset(), &raw)?;
        }

        commit(&mut self.backend)?;
        debug!("saved {} profiles", self.layout.profile_count());
        Ok(())
    }

    /// Load the extended block.
    ///
    /// The header is not checked, matching the legacy firmware. Pin mapping
    /// entries 1..27 are loaded whether or not entry 0 enables them.
    ///
    /// # Errors
    ///
    /// - [`PrefsError::NoStorage`] if there is no backend or the layout has
    ///   no extended block
    /// - [`PrefsError::Read`] on a failed or short read
    pub fn load_extended(&mut self) -> Result<ExtendedSettings, PrefsError> {
        self.extended_medium()?;

        let mut raw = [0u8; ExtendedSettings::SIZE];
        read_exact(&mut self.backend, self.layout.extended_offset(), &mut raw)?;
        let block = ExtendedSettings::decode(&raw);
        self.extended = Some(block);
        Ok(block)
    }

    /// Save the extended block.
    ///
    /// Byte-addressable media get an in-place write of the block followed by
    /// a commit. Block-erasable media cannot be patched, so the block is
    /// cached and the whole record is saved.
    ///
    /// # Errors
    ///
    /// - [`PrefsError::NoStorage`] if there is no backend or the layout has
    ///   no extended block
    /// - [`PrefsError::Erase`] / [`PrefsError::Write`] as for [`save`]
    ///
    /// [`save`]: PreferencesStore::save
    pub fn save_extended(&mut self, block: &ExtendedSettings) -> Result<(), PrefsError> {
        let medium = self.extended_medium()?;
        self.extended = Some(*block);

        if medium.requires_erase() {
            return self.save();
        }

        write_exact(&mut self.backend, self.layout.extended_offset(), &block.encode())?;
        commit(&mut self.backend)
    }

    /// Bytes of the extended block to restore after an erase, if any.
    fn extended_to_rewrite(
        &mut self,
        medium: Medium,
    ) -> Result<Option<[u8; ExtendedSettings::SIZE]>, PrefsError> {
        if !medium.requires_erase() || !self.layout.has_extended() {
            return Ok(None);
        }
        if let Some(block) = self.extended {
            return Ok(Some(block.encode()));
        }
        let mut raw = [0u8; ExtendedSettings::SIZE];
        read_exact(&mut self.backend, self.layout.extended_offset(), &mut raw)?;
        trace!("preserving extended block across erase");
        Ok(Some(raw))
    }

    /// Return the medium to the never-saved state.
    ///
    /// Byte-addressable media have every byte of the region zeroed and are
    /// committed. Block-erasable media have the region erased. Either way the
    /// next [`load`](PreferencesStore::load) reports [`PrefsError::NoData`].
    ///
    /// # Errors
    ///
    /// - [`PrefsError::NoStorage`] if there is no backend
    /// - [`PrefsError::Erase`] if the erase fails
    /// - [`PrefsError::Write`] if zeroing or the commit fails
    pub fn reset(&mut self) -> Result<(), PrefsError> {
        let medium = self.present_medium()?;
        self.extended = None;

        if medium.requires_erase() {
            erase(&mut self.backend)?;
            debug!("preferences erased");
            return Ok(());
        }

        let zeros = [0u8; RESET_CHUNK];
        let capacity = self.backend.capacity();
        let mut offset = 0usize;
        while offset < capacity {
            let len = (capacity - offset).min(RESET_CHUNK);
            write_exact(&mut self.backend, offset as u32, &zeros[..len])?;
            offset += len;
        }
        commit(&mut self.backend)?;
        debug!("preferences zeroed ({} bytes)", capacity);
        Ok(())
    }

    fn present_medium(&self) -> Result<Medium, PrefsError> {
        let medium = self.backend.medium();
        if medium.is_present() {
            Ok(medium)
        } else {
            trace!("no storage backend configured");
            Err(PrefsError::NoStorage)
        }
    }

    fn extended_medium(&self) -> Result<Medium, PrefsError> {
        let medium = self.present_medium()?;
        if self.layout.has_extended() {
            Ok(medium)
        } else {
            debug!("layout has no extended block");
            Err(PrefsError::NoStorage)
        }
    }
}

fn read_exact<B: StorageBackend>(
    backend: &mut B,
    offset: u32,
    dest: &mut [u8],
) -> Result<(), PrefsError> {
    match backend.read_buffer(offset, dest) {
        Ok(n) if n == dest.len() => Ok(()),
        Ok(n) => {
            warn!("short read at {}: {} of {} bytes", offset, n, dest.len());
            Err(PrefsError::Read)
        }
        Err(_) => {
            warn!("read of {} bytes at {} failed", dest.len(), offset);
            Err(PrefsError::Read)
        }
    }
}

fn write_exact<B: StorageBackend>(backend: &mut B, offset: u32, src: &[u8]) -> Result<(), PrefsError> {
    match backend.write_buffer(offset, src) {
        Ok(n) if n == src.len() => Ok(()),
        Ok(n) => {
            warn!("short write at {}: {} of {} bytes", offset, n, src.len());
            Err(PrefsError::Write)
        }
        Err(_) => {
            warn!("write of {} bytes at {} failed", src.len(), offset);
            Err(PrefsError::Write)
        }
    }
}

fn erase<B: StorageBackend>(backend: &mut B) -> Result<(), PrefsError> {
    backend.erase_region().map_err(|_| {
        warn!("erase failed");
        PrefsError::Erase
    })
}

fn commit<B: StorageBackend>(backend: &mut B) -> Result<(), PrefsError> {
    backend.commit().map_err(|_| {
        warn!("commit failed");
        PrefsError::Write
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::clip_transfer;

    /// RAM medium with fault injection.
    struct TestMedium {
        medium: Medium,
        data: Vec<u8>,
        fail_erase: bool,
        fail_commit: bool,
        short_read_at: Option<u32>,
        short_write_at: Option<u32>,
        erases: usize,
        commits: usize,
        reads: usize,
        writes: usize,
    }

    impl TestMedium {
        fn new(medium: Medium, size: usize) -> Self {
            let fill = if medium.requires_erase() { 0xFF } else { 0x00 };
            Self {
                medium,
                data: vec![fill; size],
                fail_erase: false,
                fail_commit: false,
                short_read_at: None,
                short_write_at: None,
                erases: 0,
                commits: 0,
                reads: 0,
                writes: 0,
            }
        }

        fn eeprom() -> Self {
            Self::new(Medium::ByteAddressable, 256)
        }

        fn flash() -> Self {
            Self::new(Medium::BlockErasable, 256)
        }
    }

    impl StorageBackend for TestMedium {
        type Error = &'static str;

        fn medium(&self) -> Medium {
            self.medium
        }

        fn capacity(&self) -> usize {
            self.data.len()
        }

        fn read_buffer(&mut self, offset: u32, dest: &mut [u8]) -> Result<usize, Self::Error> {
            self.reads += 1;
            let range = clip_transfer(offset, dest.len(), self.data.len());
            let mut n = range.len();
            if self.short_read_at == Some(offset) {
                n = n.saturating_sub(1);
            }
            dest[..n].copy_from_slice(&self.data[range.start..range.start + n]);
            Ok(n)
        }

        fn write_buffer(&mut self, offset: u32, src: &[u8]) -> Result<usize, Self::Error> {
            self.writes += 1;
            let range = clip_transfer(offset, src.len(), self.data.len());
            let mut n = range.len();
            if self.short_write_at == Some(offset) {
                n = n.saturating_sub(1);
            }
            self.data[range.start..range.start + n].copy_from_slice(&src[..n]);
            Ok(n)
        }

        fn erase_region(&mut self) -> Result<(), Self::Error> {
            if self.fail_erase {
                return Err("erase");
            }
            self.erases += 1;
            if self.medium.requires_erase() {
                self.data.fill(0xFF);
            }
            Ok(())
        }

        fn commit(&mut self) -> Result<(), Self::Error> {
            if self.fail_commit {
                return Err("commit");
            }
            self.commits += 1;
            Ok(())
        }
    }

    fn sample_profiles() -> [ProfileData; 4] {
        [
            ProfileData::new(1000, 1000, 512, 384, 2, 0),
            ProfileData::new(1250, 900, 4095, 0, 7, 31).with_reserved(1, 2),
            ProfileData::new(0, u16::MAX, 1, 4094, 0, 3),
            ProfileData::new(777, 333, 2048, 2048, 4, 16).with_reserved(u32::MAX, 0),
        ]
    }

    fn sample_extended() -> ExtendedSettings {
        let mut block = ExtendedSettings::zeroed();
        block.bools = 0x5A;
        block.mappings = core::array::from_fn(|i| i as i8 - 10);
        block.settings = [1, 2, 3, 500, 1000, 0xBEEF, 0, u16::MAX];
        block
    }

    #[test]
    fn test_round_trip_byte_addressable() {
        let mut prefs = Preferences::new(sample_profiles());
        prefs.set_profile(3);
        let mut store = PreferencesStore::new(TestMedium::eeprom(), prefs);
        store.save().unwrap();

        let (medium, _) = store.into_parts();
        let mut reloaded = PreferencesStore::new(medium, Preferences::<[ProfileData; 4]>::with_defaults());
        reloaded.load().unwrap();

        assert_eq!(reloaded.preferences().profile(), 3);
        assert_eq!(reloaded.preferences().profiles(), &sample_profiles());
        assert_eq!(reloaded.backend().erases, 0);
        assert_eq!(reloaded.backend().commits, 1);
    }

    #[test]
    fn test_round_trip_block_erasable() {
        let mut prefs = Preferences::new(sample_profiles());
        prefs.set_profile(1);
        let mut store = PreferencesStore::new(TestMedium::flash(), prefs);
        store.save().unwrap();
        assert_eq!(store.backend().erases, 1);

        let (medium, _) = store.into_parts();
        let mut reloaded = PreferencesStore::new(medium, Preferences::<[ProfileData; 4]>::with_defaults());
        reloaded.load().unwrap();
        assert_eq!(reloaded.preferences().profile(), 1);
        assert_eq!(reloaded.preferences().profiles(), &sample_profiles());
    }

    #[test]
    fn test_on_medium_layout() {
        let mut prefs = Preferences::new(sample_profiles());
        prefs.set_profile(2);
        let mut store = PreferencesStore::new(TestMedium::eeprom(), prefs);
        store.save().unwrap();

        let data = &store.backend().data;
        assert_eq!(&data[0..4], b"Prow");
        assert_eq!(data[4], 2);
        assert_eq!(&data[5..21], &sample_profiles()[0].encode());
        assert_eq!(&data[53..69], &sample_profiles()[3].encode());
    }

    #[test]
    fn test_fresh_medium_reports_no_data() {
        for medium in [TestMedium::eeprom(), TestMedium::flash()] {
            let mut store = PreferencesStore::new(medium, Preferences::<[ProfileData; 2]>::with_defaults());
            assert_eq!(store.load(), Err(PrefsError::NoData));
            // Only the header was read.
            assert_eq!(store.backend().reads, 1);
        }
    }

    #[test]
    fn test_header_bit_flip_reports_no_data() {
        let mut store = PreferencesStore::new(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        store.save().unwrap();

        for byte in 0..4 {
            for bit in 0..8 {
                store.backend_mut().data[byte] ^= 1 << bit;
                assert_eq!(store.load(), Err(PrefsError::NoData));
                store.backend_mut().data[byte] ^= 1 << bit;
            }
        }
        assert_eq!(store.load(), Ok(()));
    }

    #[test]
    fn test_short_header_read_is_read_error() {
        let mut medium = TestMedium::eeprom();
        medium.short_read_at = Some(0);
        let mut store = PreferencesStore::new(medium, Preferences::<[ProfileData; 1]>::with_defaults());
        assert_eq!(store.load(), Err(PrefsError::Read));
    }

    #[test]
    fn test_short_profile_read_keeps_partial_load() {
        let mut prefs = Preferences::new(sample_profiles());
        prefs.set_profile(2);
        let mut store = PreferencesStore::new(TestMedium::eeprom(), prefs);
        store.save().unwrap();

        let (mut medium, _) = store.into_parts();
        // Fail on the third profile record.
        medium.short_read_at = Some(5 + 2 * 16);
        let mut store = PreferencesStore::new(medium, Preferences::<[ProfileData; 4]>::with_defaults());
        assert_eq!(store.load(), Err(PrefsError::Read));

        let prefs = store.preferences();
        assert_eq!(prefs.profile(), 2);
        assert_eq!(prefs.profiles()[..2], sample_profiles()[..2]);
        assert_eq!(prefs.profiles()[2], ProfileData::default());
    }

    #[test]
    fn test_short_profile_write_is_write_error() {
        let mut medium = TestMedium::eeprom();
        medium.short_write_at = Some(5 + 16);
        let mut store = PreferencesStore::new(medium, Preferences::new(sample_profiles()));
        assert_eq!(store.save(), Err(PrefsError::Write));
        // Sequence stops at the fault: no later profile, no commit.
        assert_eq!(store.backend().writes, 4);
        assert_eq!(store.backend().commits, 0);
    }

    #[test]
    fn test_erase_failure_writes_nothing() {
        let mut store = PreferencesStore::new(TestMedium::flash(), Preferences::new(sample_profiles()));
        store.save().unwrap();
        let before = store.backend().data.clone();

        store.backend_mut().fail_erase = true;
        store.preferences_mut().profiles_mut()[0].set_center(1, 1);
        assert_eq!(store.save(), Err(PrefsError::Erase));
        assert_eq!(store.backend().data, before);
        assert_eq!(store.backend().writes, 4 + 2);
    }

    #[test]
    fn test_commit_failure_is_write_error() {
        let mut medium = TestMedium::eeprom();
        medium.fail_commit = true;
        let mut store = PreferencesStore::new(medium, Preferences::new(sample_profiles()));
        assert_eq!(store.save(), Err(PrefsError::Write));
    }

    #[test]
    fn test_out_of_range_index_loads_unchecked() {
        let mut store = PreferencesStore::new(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        store.save().unwrap();
        store.backend_mut().data[4] = 200;

        assert_eq!(store.load(), Ok(()));
        assert_eq!(store.preferences().profile(), 200);
        assert!(store.preferences().selected_profile().is_none());
    }

    #[test]
    fn test_extended_round_trip_byte_addressable() {
        let mut store = PreferencesStore::with_extended(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        let block = sample_extended();
        store.save_extended(&block).unwrap();

        let offset = store.layout().extended_offset() as usize;
        assert_eq!(offset, 69);
        assert_eq!(store.backend().data[offset], 0x5A);
        // Profile region untouched by an extended-only save.
        assert!(store.backend().data[..offset].iter().all(|&b| b == 0));

        let (medium, _) = store.into_parts();
        let mut reloaded = PreferencesStore::with_extended(medium, Preferences::new(sample_profiles()));
        assert_eq!(reloaded.load_extended(), Ok(block));
        assert_eq!(reloaded.extended(), Some(&block));
    }

    #[test]
    fn test_extended_disabled_custom_pins_still_persist() {
        let mut store = PreferencesStore::with_extended(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        let mut block = sample_extended();
        block.mappings[0] = 0;
        store.save_extended(&block).unwrap();
        assert_eq!(store.load_extended(), Ok(block));
    }

    #[test]
    fn test_extended_on_flash_rewrites_record() {
        let mut prefs = Preferences::new(sample_profiles());
        prefs.set_profile(1);
        let mut store = PreferencesStore::with_extended(TestMedium::flash(), prefs);
        let block = sample_extended();
        store.save_extended(&block).unwrap();
        assert_eq!(store.backend().erases, 1);

        // A later profile save keeps the extended block.
        store.preferences_mut().set_profile(0);
        store.save().unwrap();

        let (medium, _) = store.into_parts();
        let mut reloaded = PreferencesStore::with_extended(medium, Preferences::<[ProfileData; 4]>::with_defaults());
        reloaded.load().unwrap();
        assert_eq!(reloaded.preferences().profile(), 0);
        assert_eq!(reloaded.load_extended(), Ok(block));
    }

    #[test]
    fn test_flash_save_without_cached_block_keeps_stored_block() {
        let mut store = PreferencesStore::with_extended(TestMedium::flash(), Preferences::new(sample_profiles()));
        let block = sample_extended();
        store.save_extended(&block).unwrap();

        // A fresh store only loads the profiles before saving.
        let (medium, _) = store.into_parts();
        let mut store = PreferencesStore::with_extended(medium, Preferences::<[ProfileData; 4]>::with_defaults());
        store.load().unwrap();
        assert!(store.extended().is_none());
        store.preferences_mut().set_profile(3);
        store.save().unwrap();

        let offset = store.layout().extended_offset() as usize;
        assert_eq!(&store.backend().data[offset..offset + ExtendedSettings::SIZE], &block.encode());
        assert_eq!(store.load_extended(), Ok(block));
    }

    #[test]
    fn test_flash_save_fails_before_erase_when_block_unreadable() {
        let mut store = PreferencesStore::with_extended(TestMedium::flash(), Preferences::new(sample_profiles()));
        store.save_extended(&sample_extended()).unwrap();

        let (mut medium, _) = store.into_parts();
        let before = medium.data.clone();
        medium.short_read_at = Some(69);
        let mut store = PreferencesStore::with_extended(medium, Preferences::new(sample_profiles()));
        assert_eq!(store.save(), Err(PrefsError::Read));
        assert_eq!(store.backend().erases, 1);
        assert_eq!(store.backend().data, before);
    }

    #[test]
    fn test_extended_requires_layout() {
        let mut store = PreferencesStore::new(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        assert_eq!(store.load_extended(), Err(PrefsError::NoStorage));
        assert_eq!(store.save_extended(&sample_extended()), Err(PrefsError::NoStorage));
        assert_eq!(store.backend().writes, 0);
    }

    #[test]
    fn test_reset_zeroes_byte_addressable() {
        let mut store = PreferencesStore::with_extended(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        store.save().unwrap();
        store.save_extended(&sample_extended()).unwrap();

        store.reset().unwrap();
        assert!(store.backend().data.iter().all(|&b| b == 0));
        assert!(store.extended().is_none());
        assert_eq!(store.load(), Err(PrefsError::NoData));
    }

    #[test]
    fn test_reset_erases_block_erasable() {
        let mut store = PreferencesStore::new(TestMedium::flash(), Preferences::new(sample_profiles()));
        store.save().unwrap();
        store.reset().unwrap();
        assert_eq!(store.backend().erases, 2);
        assert_eq!(store.load(), Err(PrefsError::NoData));
    }

    #[test]
    fn test_required_size() {
        let store = PreferencesStore::new(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        assert_eq!(store.required_size(), 69);
        let store = PreferencesStore::with_extended(TestMedium::eeprom(), Preferences::new(sample_profiles()));
        assert_eq!(store.required_size(), 113);
    }
}
