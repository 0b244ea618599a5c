//! Generation of the MOTIS `config.yml` for a provisioned directory.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, Result};

pub const CONFIG_FILE: &str = "config.yml";
pub const FEED_SUFFIX: &str = ".gtfs.zip";
pub const MAP_SUFFIX: &str = ".osm.pbf";

const TILES_AND_TIMETABLE: &str = "\
tiles:
  profile: tiles-profiles/full.lua
  db_size: 274877906944
  flush_threshold: 100000
timetable:
  first_day: TODAY
  num_days: 365
  railviz: true
  with_shapes: true
  adjust_footpaths: true
  merge_dupes_intra_src: false
  merge_dupes_inter_src: false
  link_stop_distance: 100
  update_interval: 60
  http_timeout: 30
  incremental_rt_update: false
  use_osm_stop_coordinates: false
  extend_missing_footpaths: false
  max_footpath_length: 15
  max_matching_distance: 25
  datasets:
";

const ROUTING: &str = "\
street_routing: true
osr_footpath: false
geocoding: true
reverse_geocoding: true
";

/// Inputs of a MOTIS import: one map extract and the transit feeds.
///
/// Both are file names relative to the directory the config lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotisConfig {
    pub map:   String,
    pub feeds: Vec<String>,
}

impl MotisConfig {
    pub fn new(map: impl Into<String>, feeds: Vec<String>) -> Self {
        Self {
            map: map.into(),
            feeds,
        }
    }

    /// Discover the map extract and feeds already present in `dir`.
    ///
    /// Feeds are sorted by name; with several map extracts the first by
    /// name is used.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let io_err = |source| PipelineError::ConfigIo {
            path: dir.to_path_buf(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if entry.file_type().map_err(io_err)?.is_file()
                && let Some(name) = entry.file_name().to_str()
            {
                names.push(name.to_string());
            }
        }
        names.sort();

        let feeds: Vec<String> = names
            .iter()
            .filter(|n| n.ends_with(FEED_SUFFIX))
            .cloned()
            .collect();
        if feeds.is_empty() {
            return Err(PipelineError::Config(format!(
                "no *{FEED_SUFFIX} files in {}",
                dir.display()
            )));
        }

        let map = names
            .into_iter()
            .find(|n| n.ends_with(MAP_SUFFIX))
            .ok_or_else(|| {
                PipelineError::Config(format!("no *{MAP_SUFFIX} file in {}", dir.display()))
            })?;

        Ok(Self { map, feeds })
    }

    /// Render the config file text.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "osm: {}", self.map);
        out.push_str(TILES_AND_TIMETABLE);
        for feed in &self.feeds {
            let _ = writeln!(out, "    {}:", dataset_key(feed));
            let _ = writeln!(out, "      path: {feed}");
            out.push_str("      default_bikes_allowed: false\n");
        }
        out.push_str(ROUTING);
        out
    }

    /// Write `config.yml` into `dir`.
    pub fn write(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, self.render()).map_err(|source| PipelineError::ConfigIo {
            path: path.clone(),
            source,
        })?;
        tracing::info!(path = %path.display(), feeds = self.feeds.len(), "config written");
        Ok(path)
    }
}

/// Dataset key: the file name without its last extension.
fn dataset_key(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
}
