//! File-backed storage image emulating an EEPROM or a flash sector

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use clap::ValueEnum;
use prow_prefs::{Medium, StorageBackend, domain::clip_transfer};

/// Medium emulated by an image file
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediumKind {
    /// Byte-addressable EEPROM, blank cells read 0x00
    Eeprom,
    /// NOR flash sector, blank cells read 0xFF and writes only clear bits
    Flash,
}

impl MediumKind {
    /// Value of an unwritten cell
    pub fn blank(self) -> u8 {
        match self {
            MediumKind::Eeprom => 0x00,
            MediumKind::Flash => 0xFF,
        }
    }
}

/// A storage region held in a file on the host
pub struct ImageFile {
    file: File,
    kind: MediumKind,
    size: usize,
}

impl ImageFile {
    /// Create (or truncate) an image of `size` blank bytes
    pub fn create(path: &Path, kind: MediumKind, size: usize) -> io::Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.write_all(&vec![kind.blank(); size])?;
        file.sync_all()?;
        log::debug!("created {} byte {:?} image at {}", size, kind, path.display());
        Ok(Self { file, kind, size })
    }

    /// Open an existing image
    pub fn open(path: &Path, kind: MediumKind) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let size = usize::try_from(file.metadata()?.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "image too large"))?;
        Ok(Self { file, kind, size })
    }

    /// Emulated medium
    pub fn kind(&self) -> MediumKind {
        self.kind
    }

    fn fill(&mut self, byte: u8) -> io::Result<()> {
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&vec![byte; self.size])
    }
}

impl StorageBackend for ImageFile {
    type Error = io::Error;

    fn medium(&self) -> Medium {
        match self.kind {
            MediumKind::Eeprom => Medium::ByteAddressable,
            MediumKind::Flash => Medium::BlockErasable,
        }
    }

    fn capacity(&self) -> usize {
        self.size
    }

    fn read_buffer(&mut self, offset: u32, dest: &mut [u8]) -> io::Result<usize> {
        let range = clip_transfer(offset, dest.len(), self.size);
        let len = range.len();
        self.file.seek(SeekFrom::Start(range.start as u64))?;
        self.file.read_exact(&mut dest[..len])?;
        Ok(len)
    }

    fn write_buffer(&mut self, offset: u32, src: &[u8]) -> io::Result<usize> {
        let range = clip_transfer(offset, src.len(), self.size);
        let len = range.len();
        let mut cells = src[..len].to_vec();
        if self.kind == MediumKind::Flash {
            // Programming NOR flash can only clear bits.
            let mut current = vec![0u8; len];
            self.file.seek(SeekFrom::Start(range.start as u64))?;
            self.file.read_exact(&mut current)?;
            for (cell, old) in cells.iter_mut().zip(&current) {
                *cell &= *old;
            }
        }
        self.file.seek(SeekFrom::Start(range.start as u64))?;
        self.file.write_all(&cells)?;
        Ok(len)
    }

    fn erase_region(&mut self) -> io::Result<()> {
        match self.kind {
            MediumKind::Flash => self.fill(0xFF),
            MediumKind::Eeprom => Ok(()),
        }
    }

    fn commit(&mut self) -> io::Result<()> {
        self.file.sync_data()
    }
}
