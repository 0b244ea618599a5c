//! Provisioning of a MOTIS working directory.
//!
//! [`Pipeline`] fetches a [`FetchRequest`]'s feeds, map extract and bundle
//! under a bounded admission gate, then extracts the bundle once every
//! transfer succeeded. The remaining phases are independent steps the
//! caller schedules afterwards:
//!
//! - [`write_request_record`] keeps a copy of the request next to the assets
//! - [`MotisConfig`] discovers the fetched inputs and writes `config.yml`
//! - [`ImportCommand`] runs the bundle's import over the directory

mod config;
mod error;
mod import;
mod pipeline;
mod record;
mod request;

pub use config::{CONFIG_FILE, FEED_SUFFIX, MAP_SUFFIX, MotisConfig};
pub use error::{PipelineError, Result};
pub use import::ImportCommand;
pub use pipeline::{InstallReport, Pipeline};
pub use record::{REQUEST_RECORD_FILE, read_request, write_request_record};
pub use request::{BUNDLE_LABEL, FEED_LABEL, FetchRequest, MAP_LABEL};
