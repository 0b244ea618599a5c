use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, Read};
use std::path::Path;

use bzip2::read::MultiBzDecoder;

use crate::entry::{ArchiveEntry, EntryKind};
use crate::error::{Error, Result};
use crate::report::{ExtractReport, ExtractedEntry, SkippedEntry};
use crate::sanitize::sanitize_entry_path;

/// Mode for parent directories a file entry needs but the archive does not list.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Extract a `.tar.bz2` archive at `archive` into `destination`.
pub fn extract_tar_bz2(archive: &Path, destination: &Path) -> Result<ExtractReport> {
    let file = File::open(archive).map_err(|source| Error::Open {
        path: archive.to_path_buf(),
        source,
    })?;

    tracing::info!(archive = %archive.display(), destination = %destination.display(), "extracting bundle");
    extract_from_reader(BufReader::new(file), destination)
}

/// Extract a bzip2-compressed tar stream into `destination`.
///
/// Concatenated bzip2 streams, as written by parallel compressors, are
/// decoded as one archive.
///
/// Entries are consumed one at a time in archive order. Directories and
/// regular files are recreated with their recorded permission bits, other
/// entry kinds are skipped. Any other failure aborts the pass; whatever was
/// written before stays on disk.
pub fn extract_from_reader<R: Read>(reader: R, destination: &Path) -> Result<ExtractReport> {
    let mut archive = tar::Archive::new(MultiBzDecoder::new(reader));
    let entries = archive
        .entries()
        .map_err(|source| Error::Header { source })?;

    let mut report = ExtractReport::default();
    for entry in entries {
        let mut entry = entry.map_err(|source| Error::Header { source })?;
        let header = ArchiveEntry::from_tar(&entry)?;

        if let EntryKind::Other(entry_type) = header.kind {
            tracing::warn!(path = %header.path.display(), ?entry_type, "skipping unsupported entry type");
            report.skipped.push(SkippedEntry {
                path: header.path,
                entry_type,
            });
            continue;
        }

        let Some(relative) = sanitize_entry_path(&header.path)? else {
            continue;
        };
        let target = destination.join(&relative);

        if header.kind == EntryKind::Directory {
            create_dir(&target, header.mode)?;
            set_dir_mode(&target, header.mode)?;
        } else {
            report.bytes_written += write_file(&mut entry, &target, header.mode)?;
        }

        tracing::debug!(path = %target.display(), mode = format_args!("{:o}", header.mode), "extracted");
        report.entries.push(ExtractedEntry {
            original_path: header.path,
            target_path: target,
            kind: header.kind,
            mode: header.mode,
            size: header.size,
        });
    }

    Ok(report)
}

fn create_dir(path: &Path, mode: u32) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path).map_err(|source| Error::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file<R: Read>(content: &mut R, path: &Path, mode: u32) -> Result<u64> {
    if let Some(parent) = path.parent() {
        create_dir(parent, DEFAULT_DIR_MODE)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let create_err = |source| Error::CreateFile {
        path: path.to_path_buf(),
        source,
    };
    let mut file = options.open(path).map_err(create_err)?;
    set_mode(&file, mode).map_err(create_err)?;

    io::copy(content, &mut file).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Apply a directory entry's recorded bits, which the umask filtered at
/// creation and which an existing directory never received.
#[cfg(unix)]
fn set_dir_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).map_err(|source| {
        Error::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn set_dir_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

/// Apply `mode` exactly; the creation mode is filtered by the umask and
/// ignored for files that already existed.
#[cfg(unix)]
fn set_mode(file: &File, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &File, _mode: u32) -> io::Result<()> {
    Ok(())
}
