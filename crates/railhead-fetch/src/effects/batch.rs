//! Batch download functionality.
//!
//! This module runs many transfers at once behind an admission gate and
//! waits for every one of them to reach a terminal state before reporting.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};

use crate::data::{BatchOptions, ProgressSink, TransferOutcome, TransferTask};
use crate::effects::{Fetcher, HttpClient};
use crate::error::{FetchError, Result};

/// Bounded fetch scheduler.
///
/// One tokio task is spawned per [`TransferTask`]; a semaphore with
/// [`BatchOptions::permits`] permits caps how many of them transfer at the
/// same time. Failures never cancel siblings.
pub struct BatchFetcher<C: HttpClient> {
    fetcher: Arc<Fetcher<C>>,
    options: BatchOptions,
}

impl<C: HttpClient + 'static> BatchFetcher<C> {
    /// Create a new batch fetcher with default options.
    pub fn new(fetcher: Fetcher<C>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            options: BatchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> BatchOptions {
        self.options
    }

    /// Run every task and wait for all of them to finish.
    ///
    /// Returns the outcome of each task in completion order when all
    /// succeeded, otherwise the first recorded failure. Tasks are never
    /// short-circuited: a failure is only surfaced once the whole batch has
    /// settled.
    pub async fn fetch_all(
        &self,
        tasks: Vec<TransferTask>,
        sink: Option<ProgressSink>,
    ) -> Result<Vec<TransferOutcome>> {
        let mut outcomes = self.settle(tasks, sink).await;

        if let Some(index) = outcomes.iter().position(|o| !o.is_success())
            && let Err(err) = outcomes.swap_remove(index).result
        {
            return Err(err);
        }
        Ok(outcomes)
    }

    /// Like [`Self::fetch_all`] but only reports success or the first failure.
    pub async fn run(&self, tasks: Vec<TransferTask>, sink: Option<ProgressSink>) -> Result<()> {
        self.fetch_all(tasks, sink).await.map(|_| ())
    }

    /// Spawn all tasks, wait at the barrier and drain every outcome.
    async fn settle(
        &self,
        tasks: Vec<TransferTask>,
        sink: Option<ProgressSink>,
    ) -> Vec<TransferOutcome> {
        if tasks.is_empty() {
            return Vec::new();
        }

        let semaphore = Arc::new(Semaphore::new(self.options.permits()));
        // Sized to the task count so no producer ever waits on the consumer.
        let (tx, mut rx) = mpsc::channel::<TransferOutcome>(tasks.len());
        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            let fetcher = Arc::clone(&self.fetcher);
            let semaphore = Arc::clone(&semaphore);
            let sink = sink.clone();
            let tx = tx.clone();
            let meta = (task.label.clone(), task.url.clone());

            let handle = tokio::spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => {
                        tracing::debug!(label = %task.label, url = %task.url, "starting download");
                        fetcher.fetch(&task.url, &task.destination, sink.as_ref()).await
                    }
                    Err(closed) => Err(FetchError::TaskFailed {
                        label:   task.label.clone(),
                        message: closed.to_string(),
                    }),
                };

                match &result {
                    Ok(path) => {
                        tracing::debug!(label = %task.label, file = %path.display(), "download finished")
                    }
                    Err(err) => {
                        tracing::warn!(label = %task.label, url = %task.url, error = %err, "download failed")
                    }
                }

                let outcome = TransferOutcome {
                    label: task.label,
                    url: task.url,
                    result,
                };
                if tx.try_send(outcome).is_err() {
                    tracing::error!("outcome channel rejected a result");
                }
            });
            handles.push((meta, handle));
        }
        drop(tx);

        // Barrier: every spawned task reaches a terminal state before any
        // outcome is inspected.
        let mut lost = Vec::new();
        for ((label, url), handle) in handles {
            if let Err(join_err) = handle.await {
                lost.push(TransferOutcome {
                    label: label.clone(),
                    url,
                    result: Err(FetchError::TaskFailed {
                        label,
                        message: join_err.to_string(),
                    }),
                });
            }
        }
        tracing::info!("all downloads finished");

        let mut collected = Vec::with_capacity(lost.len());
        while let Some(outcome) = rx.recv().await {
            collected.push(outcome);
        }
        // Tasks that died before reporting still count as failures.
        collected.extend(lost);

        collected
    }
}
