/// Default ceiling on simultaneous transfers.
pub const MAX_CONCURRENT_TRANSFERS: usize = 5;

/// Configuration for a batch of transfers.
///
/// # Examples
///
/// ```
/// use railhead_fetch::BatchOptions;
///
/// let options = BatchOptions::default().max_concurrent(2);
/// assert_eq!(options.permits(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum number of transfers in flight at once.
    ///
    /// Default: 5
    pub max_concurrent: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrent: MAX_CONCURRENT_TRANSFERS,
        }
    }
}

impl BatchOptions {
    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Number of admission permits; never zero.
    pub fn permits(&self) -> usize {
        self.max_concurrent.max(1)
    }
}
