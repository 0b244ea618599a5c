//! HTTP downloading with byte-level progress and bounded concurrency.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable task, option and progress types
//! - `core` - Pure transformations (file naming, header parsing)
//! - `effects` - I/O operations behind the [`HttpClient`] trait
//!
//! # Key Features
//!
//! - **Streaming**: response bodies are written chunk by chunk, never buffered whole
//! - **Admission Gate**: at most [`MAX_CONCURRENT_TRANSFERS`] transfers run at once by default
//! - **Barrier Semantics**: a batch reports only after every transfer settled
//! - **Mechanism-Only**: No policy; caller handles progress UI and what to do on failure

mod core;
pub mod data;
mod effects;
mod error;

pub use crate::core::{file_name_from_url, is_success, parse_content_length};
pub use data::{
    BatchOptions, MAX_CONCURRENT_TRANSFERS, Progress, ProgressSink, TransferOutcome, TransferTask,
};
pub use effects::{BatchFetcher, BoxStream, Fetcher, HttpClient, HttpResponse};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestClient;

pub use error::{BoxError, FetchError, Result};
