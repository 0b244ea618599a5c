use std::path::PathBuf;

use crate::entry::EntryKind;

/// Summary of one extraction pass.
#[derive(Clone, Debug, Default)]
pub struct ExtractReport {
    pub entries: Vec<ExtractedEntry>,
    /// Entries of unsupported kinds that were passed over.
    pub skipped: Vec<SkippedEntry>,
    pub bytes_written: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedEntry {
    pub original_path: PathBuf,
    pub target_path: PathBuf,
    pub kind: EntryKind,
    pub mode: u32,
    pub size: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub entry_type: tar::EntryType,
}

impl ExtractReport {
    pub fn directories(&self) -> usize {
        self.count(EntryKind::Directory)
    }

    pub fn files(&self) -> usize {
        self.count(EntryKind::File)
    }

    fn count(&self, kind: EntryKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}
