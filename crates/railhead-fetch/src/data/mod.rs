//! Immutable data types for transfer scheduling and progress reporting.
//!
//! These values are created by the caller or the scheduler and handed to
//! the effect layer; nothing here performs I/O.

pub mod options;
pub mod progress;
pub mod task;

pub use options::{BatchOptions, MAX_CONCURRENT_TRANSFERS};
pub use progress::{Progress, ProgressSink};
pub use task::{TransferOutcome, TransferTask};
