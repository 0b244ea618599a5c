//! Pipeline - fetch every asset, then unpack the bundle.
//!
//! A run is one logical unit of work: all transfers settle behind the
//! scheduler's barrier, and only a fully successful batch moves on to
//! extraction.

use std::path::{Path, PathBuf};

use railhead_archive::ExtractReport;
use railhead_fetch::{BatchFetcher, BatchOptions, Fetcher, HttpClient, ProgressSink};

use crate::error::{PipelineError, Result};
use crate::request::FetchRequest;

/// What a successful run left in the output directory.
#[derive(Debug)]
pub struct InstallReport {
    /// Every fetched file, sorted by path.
    pub files:   Vec<PathBuf>,
    /// The bundle archive that was extracted.
    pub bundle:  PathBuf,
    pub extract: ExtractReport,
}

/// The fetch-and-extract orchestrator.
pub struct Pipeline<C: HttpClient> {
    batch:   BatchFetcher<C>,
    out_dir: PathBuf,
}

impl<C: HttpClient + 'static> Pipeline<C> {
    /// Create a pipeline writing into `out_dir` with the default admission gate.
    pub fn new(client: C, out_dir: impl Into<PathBuf>) -> Self {
        Self {
            batch:   BatchFetcher::new(Fetcher::new(client)),
            out_dir: out_dir.into(),
        }
    }

    /// Cap the number of simultaneous transfers.
    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.batch = self
            .batch
            .with_options(BatchOptions::default().max_concurrent(max_concurrent));
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Fetch all assets of `request` and extract its bundle.
    ///
    /// `sink` receives progress from whichever transfer is writing; it is
    /// called concurrently and must synchronize its own state.
    ///
    /// # Errors
    ///
    /// Returns the first transfer failure once every transfer has finished,
    /// in which case nothing is extracted. Extraction failures abort
    /// immediately; files already written are left in place.
    pub async fn run(
        &self,
        request: &FetchRequest,
        sink: Option<ProgressSink>,
    ) -> Result<InstallReport> {
        request.validate()?;
        let bundle = request.bundle_path(&self.out_dir)?;

        tokio::fs::create_dir_all(&self.out_dir)
            .await
            .map_err(|source| PipelineError::CreateOutDir {
                path: self.out_dir.clone(),
                source,
            })?;

        tracing::info!(
            assets = request.asset_count(),
            out_dir = %self.out_dir.display(),
            max_concurrent = self.batch.options().permits(),
            "fetching assets"
        );
        let outcomes = self
            .batch
            .fetch_all(request.tasks(&self.out_dir), sink)
            .await?;

        let mut files: Vec<PathBuf> = outcomes
            .into_iter()
            .filter_map(|outcome| outcome.result.ok())
            .collect();
        files.sort();

        let extract = extract_bundle(bundle.clone(), self.out_dir.clone()).await?;
        tracing::info!(
            directories = extract.directories(),
            files = extract.files(),
            skipped = extract.skipped.len(),
            "bundle extracted"
        );

        Ok(InstallReport {
            files,
            bundle,
            extract,
        })
    }
}

/// Extraction is blocking file I/O; run it off the async workers.
async fn extract_bundle(bundle: PathBuf, out_dir: PathBuf) -> Result<ExtractReport> {
    tokio::task::spawn_blocking(move || {
        railhead_archive::extract_tar_bz2(&bundle, &out_dir)
            .map_err(|source| PipelineError::Extract { path: bundle, source })
    })
    .await?
}
