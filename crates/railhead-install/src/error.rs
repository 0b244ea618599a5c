//! Error types for railhead-install.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use railhead_fetch::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("failed to create output directory {}: {source}", path.display())]
    CreateOutDir { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to extract {}: {source}", path.display())]
    Extract {
        path:   PathBuf,
        source: railhead_archive::Error,
    },

    #[error("extraction task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("failed to write request record {}: {source}", path.display())]
    Record { path: PathBuf, source: io::Error },

    #[error("cannot generate config: {0}")]
    Config(String),

    #[error("config i/o failed at {}: {source}", path.display())]
    ConfigIo { path: PathBuf, source: io::Error },

    #[error("failed to run {} import: {source}", binary.display())]
    Import { binary: PathBuf, source: io::Error },

    #[error("{} import exited with {status}", binary.display())]
    ImportStatus { binary: PathBuf, status: ExitStatus },
}

impl PipelineError {
    /// The URL of the asset whose transfer failed, if this is a transfer error.
    pub fn failed_url(&self) -> Option<&str> {
        match self {
            Self::Fetch(err) => err.url(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
