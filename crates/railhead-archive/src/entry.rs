use std::io::Read;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Mask applied to the header mode: permission, setuid/setgid and sticky bits.
pub const MODE_MASK: u32 = 0o7777;

/// What an archive entry materializes as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    /// Symlinks, hard links, devices, FIFOs and extension headers.
    Other(tar::EntryType),
}

impl EntryKind {
    pub fn from_entry_type(entry_type: tar::EntryType) -> Self {
        if entry_type.is_dir() {
            Self::Directory
        } else if entry_type.is_file() {
            Self::File
        } else {
            Self::Other(entry_type)
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// Header information of one archive entry, read before its content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Path as recorded in the archive.
    pub path: PathBuf,
    pub kind: EntryKind,
    /// Permission bits masked with [`MODE_MASK`].
    pub mode: u32,
    /// Content size in bytes.
    pub size: u64,
}

impl ArchiveEntry {
    /// Decode the header of a tar entry.
    pub fn from_tar<R: Read>(entry: &tar::Entry<'_, R>) -> Result<Self> {
        let header = entry.header();
        let path = entry
            .path()
            .map_err(|source| Error::Header { source })?
            .into_owned();
        let mode = header.mode().map_err(|source| Error::Header { source })? & MODE_MASK;

        Ok(Self {
            path,
            kind: EntryKind::from_entry_type(header.entry_type()),
            mode,
            size: entry.size(),
        })
    }
}
