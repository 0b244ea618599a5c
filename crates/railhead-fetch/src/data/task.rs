use std::path::PathBuf;

use crate::error::FetchError;

/// One unit of work for the scheduler: fetch `url` into `destination`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTask {
    /// URL to download from.
    pub url: String,
    /// Directory the file is written into, named after the URL.
    pub destination: PathBuf,
    /// Logical label used to attribute logs and errors (e.g. `feed`).
    pub label: String,
}

impl TransferTask {
    pub fn new(
        label: impl Into<String>,
        url: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            url:         url.into(),
            destination: destination.into(),
            label:       label.into(),
        }
    }
}

/// Terminal state of one [`TransferTask`].
#[derive(Debug)]
pub struct TransferOutcome {
    pub label:  String,
    pub url:    String,
    /// Path of the written file, or the reason the transfer failed.
    pub result: Result<PathBuf, FetchError>,
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}
