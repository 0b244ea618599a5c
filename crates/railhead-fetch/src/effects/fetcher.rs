use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;

use crate::core::{file_name_from_url, is_success, parse_content_length};
use crate::data::progress::{Progress, ProgressSink, notify};
use crate::effects::http::HttpClient;
use crate::error::{FetchError, Result};

/// Streams a single URL into a directory while reporting byte progress.
pub struct Fetcher<C: HttpClient> {
    pub(crate) client: C,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a new fetcher with the provided HTTP client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Fetch `url` into `out_dir`, naming the file after the URL's last
    /// path segment, and invoke `sink` after every chunk written.
    ///
    /// The destination file is created (or truncated) before the request
    /// is sent. On failure the partially written file is left in place and
    /// must be treated as untrustworthy.
    pub async fn fetch(
        &self,
        url: &str,
        out_dir: &Path,
        sink: Option<&ProgressSink>,
    ) -> Result<PathBuf> {
        let file_name = file_name_from_url(url)?;
        let path = out_dir.join(&file_name);

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|source| FetchError::CreateFile {
                url: url.to_string(),
                path: path.clone(),
                source,
            })?;

        let response = self
            .client
            .get(url)
            .await
            .map_err(|e| FetchError::Network {
                url:    url.to_string(),
                source: Box::new(e),
            })?;

        if !is_success(response.status) {
            return Err(FetchError::Status {
                url:    url.to_string(),
                status: response.status,
            });
        }

        let total_bytes = parse_content_length(response.content_length.as_deref());
        tracing::debug!(url, file = %path.display(), total_bytes, "streaming response body");

        let write_err = |source| FetchError::Write {
            url: url.to_string(),
            path: path.clone(),
            source,
        };

        let mut body = response.body;
        let mut bytes_downloaded = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| FetchError::Body {
                url:    url.to_string(),
                path:   path.clone(),
                source: Box::new(e),
            })?;
            if chunk.is_empty() {
                continue;
            }

            file.write_all(&chunk).await.map_err(write_err)?;
            bytes_downloaded += chunk.len() as u64;

            notify(sink, &Progress::new(&file_name, bytes_downloaded, total_bytes));
        }

        file.flush().await.map_err(write_err)?;

        Ok(path)
    }
}
