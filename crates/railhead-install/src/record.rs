use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};
use crate::request::FetchRequest;

/// File name of the request record inside the output directory.
pub const REQUEST_RECORD_FILE: &str = "download-urls.json";

/// Write `request` as pretty JSON next to the assets it produced.
pub fn write_request_record(out_dir: &Path, request: &FetchRequest) -> Result<PathBuf> {
    let path = out_dir.join(REQUEST_RECORD_FILE);
    let json = serde_json::to_string_pretty(request)
        .map_err(|e| PipelineError::Record {
            path:   path.clone(),
            source: e.into(),
        })?;

    std::fs::write(&path, json).map_err(|source| PipelineError::Record {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "request record written");
    Ok(path)
}

/// Read a request previously written by [`write_request_record`], or any
/// JSON file in the same shape.
pub fn read_request(path: &Path) -> Result<FetchRequest> {
    let data = std::fs::read(path).map_err(|source| PipelineError::Record {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&data)
        .map_err(|e| PipelineError::InvalidRequest(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let request = FetchRequest::new(
            vec!["https://x/a.gtfs.zip".into()],
            "https://x/m.osm.pbf",
            "https://x/app.tar.bz2",
        );

        let path = write_request_record(dir.path(), &request).unwrap();

        assert_eq!(path, dir.path().join("download-urls.json"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"motisUrl\": \"https://x/app.tar.bz2\""));
        assert_eq!(read_request(&path).unwrap(), request);
    }

    #[test]
    fn record_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let request = FetchRequest::new(vec![], "https://x/m.osm.pbf", "https://x/app.tar.bz2");

        let err = write_request_record(&dir.path().join("missing"), &request).unwrap_err();
        assert!(matches!(err, PipelineError::Record { .. }));
    }

    #[test]
    fn malformed_request_file_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        std::fs::write(&path, "{\"osmUrl\": 3}").unwrap();

        assert!(matches!(read_request(&path), Err(PipelineError::InvalidRequest(_))));
    }
}
