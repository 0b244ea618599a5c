use std::sync::Arc;

/// Byte-level progress of one file transfer.
///
/// Emitted after every successful write to local storage. The value is
/// ephemeral: it is only forwarded to the caller's [`ProgressSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Local file name the bytes are written to.
    pub file_name: String,

    /// Cumulative number of bytes written so far.
    pub bytes_downloaded: u64,

    /// Total expected bytes from the `Content-Length` header, `0` if unknown.
    ///
    /// Sourced once per transfer and never changed afterwards.
    pub total_bytes: u64,
}

/// Caller-supplied progress callback.
///
/// The sink is invoked synchronously from whichever transfer task is
/// writing, so it may be called from several tasks at once. Sinks doing
/// shared I/O must serialize their own access.
pub type ProgressSink = Arc<dyn Fn(&Progress) + Send + Sync>;

impl Progress {
    pub fn new(file_name: impl Into<String>, bytes_downloaded: u64, total_bytes: u64) -> Self {
        Self {
            file_name: file_name.into(),
            bytes_downloaded,
            total_bytes,
        }
    }

    /// Whether the server announced a length for this transfer.
    #[must_use]
    pub fn has_total(&self) -> bool {
        self.total_bytes > 0
    }

    /// Percentage of completion.
    ///
    /// Returns `None` if the total is unknown; a percentage is never guessed.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.has_total()
            .then(|| (self.bytes_downloaded as f64 / self.total_bytes as f64) * 100.0)
    }
}

pub(crate) fn notify(sink: Option<&ProgressSink>, progress: &Progress) {
    if let Some(callback) = sink {
        callback(progress);
    }
}
