use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to open archive {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("error reading tar header: {source}")]
    Header { source: io::Error },

    #[error("entry '{}' escapes the destination directory", entry.display())]
    PathEscape { entry: PathBuf },

    #[error("failed to create dir {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to create file {}: {source}", path.display())]
    CreateFile { path: PathBuf, source: io::Error },

    #[error("error writing file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl Error {
    /// The filesystem path the failure is attributed to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Open { path, .. }
            | Self::CreateDir { path, .. }
            | Self::CreateFile { path, .. }
            | Self::Write { path, .. } => Some(path),
            Self::PathEscape { entry } => Some(entry),
            Self::Header { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
