//! I/O operations for HTTP fetching.
//!
//! Everything that touches the network or the filesystem lives here,
//! behind the [`HttpClient`] seam so the scheduler can be driven by a
//! mock transport in tests.

mod batch;
mod fetcher;
mod http;

pub use batch::BatchFetcher;
pub use fetcher::Fetcher;
pub use http::{BoxStream, HttpClient, HttpResponse};
#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
