//! Error types for railhead-fetch.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed transport error as produced by an [`crate::HttpClient`] implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to create file {} for {url}: {source}", path.display())]
    CreateFile {
        url:    String,
        path:   PathBuf,
        source: io::Error,
    },

    #[error("failed to GET {url}: {source}")]
    Network { url: String, source: BoxError },

    #[error("bad status downloading {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("failed copying data for {url} into {}: {source}", path.display())]
    Body {
        url:    String,
        path:   PathBuf,
        source: BoxError,
    },

    #[error("error writing {} for {url}: {source}", path.display())]
    Write {
        url:    String,
        path:   PathBuf,
        source: io::Error,
    },

    #[error("{label} transfer task did not complete: {message}")]
    TaskFailed { label: String, message: String },
}

impl FetchError {
    /// The stage of a transfer at which the error happened.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "resolve",
            Self::CreateFile { .. } => "create",
            Self::Network { .. } | Self::Status { .. } => "transport",
            Self::Body { .. } => "copy",
            Self::Write { .. } => "write",
            Self::TaskFailed { .. } => "schedule",
        }
    }

    /// The URL of the asset this error belongs to, when known.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::InvalidUrl { url, .. }
            | Self::CreateFile { url, .. }
            | Self::Network { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. }
            | Self::Write { url, .. } => Some(url),
            Self::TaskFailed { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
