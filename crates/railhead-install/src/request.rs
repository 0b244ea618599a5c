use std::collections::HashSet;
use std::path::Path;

use railhead_fetch::{TransferTask, file_name_from_url};
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};

pub const FEED_LABEL: &str = "feed";
pub const MAP_LABEL: &str = "map";
pub const BUNDLE_LABEL: &str = "bundle";

/// The set of assets one pipeline run provisions.
///
/// Serialized with the field names the upstream resolver emits:
///
/// ```
/// use railhead_install::FetchRequest;
///
/// let request: FetchRequest = serde_json::from_str(
///     r#"{"gtfsUrls": ["https://x/a.gtfs.zip"], "osmUrl": "https://x/m.osm.pbf", "motisUrl": "https://x/app.tar.bz2"}"#,
/// )
/// .unwrap();
/// assert_eq!(request.feeds.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    /// Transit feed archives, fetched in this order of submission.
    #[serde(rename = "gtfsUrls", default)]
    pub feeds:  Vec<String>,
    /// The map extract.
    #[serde(rename = "osmUrl")]
    pub map:    String,
    /// The application bundle, extracted once everything is on disk.
    #[serde(rename = "motisUrl")]
    pub bundle: String,
}

impl FetchRequest {
    pub fn new(feeds: Vec<String>, map: impl Into<String>, bundle: impl Into<String>) -> Self {
        Self {
            feeds,
            map: map.into(),
            bundle: bundle.into(),
        }
    }

    /// Check that every URL resolves to a file name and that no two
    /// assets would land on the same file.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for (label, url) in self.labeled_urls() {
            if url.trim().is_empty() {
                return Err(PipelineError::InvalidRequest(format!("{label} URL is empty")));
            }
            let name = file_name_from_url(url)
                .map_err(|e| PipelineError::InvalidRequest(format!("{label}: {e}")))?;
            if !seen.insert(name.clone()) {
                return Err(PipelineError::InvalidRequest(format!(
                    "more than one asset is named '{name}'"
                )));
            }
        }
        Ok(())
    }

    /// Transfer tasks in submission order: feeds, then map, then bundle.
    pub fn tasks(&self, out_dir: &Path) -> Vec<TransferTask> {
        self.labeled_urls()
            .map(|(label, url)| TransferTask::new(label, url, out_dir))
            .collect()
    }

    /// Where the bundle lands inside `out_dir`.
    pub fn bundle_path(&self, out_dir: &Path) -> Result<std::path::PathBuf> {
        let name = file_name_from_url(&self.bundle)
            .map_err(|e| PipelineError::InvalidRequest(format!("{BUNDLE_LABEL}: {e}")))?;
        Ok(out_dir.join(name))
    }

    /// Number of transfers a run performs.
    pub fn asset_count(&self) -> usize {
        self.feeds.len() + 2
    }

    fn labeled_urls(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.feeds
            .iter()
            .map(|url| (FEED_LABEL, url.as_str()))
            .chain([(MAP_LABEL, self.map.as_str()), (BUNDLE_LABEL, self.bundle.as_str())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> FetchRequest {
        FetchRequest::new(
            vec!["https://x/a.gtfs.zip".into(), "https://x/b.gtfs.zip".into()],
            "https://x/m.osm.pbf",
            "https://x/app.tar.bz2",
        )
    }

    #[test]
    fn tasks_are_labeled_in_order() {
        let tasks = request().tasks(Path::new("out"));
        let labels: Vec<_> = tasks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["feed", "feed", "map", "bundle"]);
        assert_eq!(tasks[2].url, "https://x/m.osm.pbf");
        assert!(tasks.iter().all(|t| t.destination == Path::new("out")));
        assert_eq!(request().asset_count(), 4);
    }

    #[test]
    fn wire_names_round_trip() {
        let json = serde_json::to_value(request()).unwrap();
        assert_eq!(json["osmUrl"], "https://x/m.osm.pbf");
        assert_eq!(json["motisUrl"], "https://x/app.tar.bz2");
        assert_eq!(json["gtfsUrls"][1], "https://x/b.gtfs.zip");
    }

    #[test]
    fn missing_feeds_default_to_empty() {
        let request: FetchRequest =
            serde_json::from_str(r#"{"osmUrl": "https://x/m.osm.pbf", "motisUrl": "https://x/app.tar.bz2"}"#)
                .unwrap();
        assert!(request.feeds.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_urls() {
        let mut bad = request();
        bad.map = "  ".into();
        let err = bad.validate().unwrap_err();
        assert!(matches!(err, PipelineError::InvalidRequest(msg) if msg.contains("map")));
    }

    #[test]
    fn validate_rejects_unnamed_bundle() {
        let mut bad = request();
        bad.bundle = "https://x/".into();
        assert!(matches!(bad.validate(), Err(PipelineError::InvalidRequest(_))));
    }

    #[test]
    fn validate_rejects_colliding_file_names() {
        let mut bad = request();
        bad.feeds.push("https://mirror/a.gtfs.zip".into());
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("a.gtfs.zip"));
    }

    #[test]
    fn bundle_path_uses_url_file_name() {
        assert_eq!(
            request().bundle_path(Path::new("out")).unwrap(),
            Path::new("out").join("app.tar.bz2")
        );
    }
}
