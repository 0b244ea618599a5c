//! Streaming extraction of bzip2-compressed tar bundles.
//!
//! # Architecture
//!
//! - `entry.rs` - Header decoding and entry classification
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//! - `extract.rs` - The single-pass extraction loop
//! - `report.rs` - What a pass created and skipped

pub use entry::{ArchiveEntry, EntryKind, MODE_MASK};
pub use error::{Error, Result};
pub use extract::{DEFAULT_DIR_MODE, extract_from_reader, extract_tar_bz2};
pub use report::{ExtractReport, ExtractedEntry, SkippedEntry};
pub use sanitize::sanitize_entry_path;

pub mod entry;
mod error;
mod extract;
mod report;
mod sanitize;
