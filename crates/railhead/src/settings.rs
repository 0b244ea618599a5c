use std::path::{Path, PathBuf};

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "railhead.toml";
pub const ENV_PREFIX: &str = "RAILHEAD_";

/// Resolved settings: defaults < `railhead.toml` < `RAILHEAD_*` < flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Directory every asset is written to.
    pub out_dir:        PathBuf,
    /// Admission gate size for transfers.
    pub max_concurrent: usize,
    /// Import program, relative paths resolve inside `out_dir`.
    pub motis_binary:   PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            out_dir:        PathBuf::from("out"),
            max_concurrent: railhead_fetch::MAX_CONCURRENT_TRANSFERS,
            motis_binary:   PathBuf::from("./motis"),
        }
    }
}

impl Settings {
    fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).only(&["out_dir", "max_concurrent", "motis_binary"]))
    }

    /// Load from `file`, or `railhead.toml` in the working directory. A
    /// missing file is not an error.
    pub fn load(file: Option<&Path>) -> anyhow::Result<Self> {
        let file = file.unwrap_or(Path::new(CONFIG_FILE));
        Self::figment(file)
            .extract()
            .with_context(|| format!("failed to load settings from {}", file.display()))
    }

    pub fn with_out_dir(mut self, out_dir: Option<PathBuf>) -> Self {
        if let Some(out_dir) = out_dir {
            self.out_dir = out_dir;
        }
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: Option<usize>) -> Self {
        if let Some(max_concurrent) = max_concurrent {
            self.max_concurrent = max_concurrent;
        }
        self
    }

    pub fn with_motis_binary(mut self, motis_binary: Option<PathBuf>) -> Self {
        if let Some(motis_binary) = motis_binary {
            self.motis_binary = motis_binary;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::figment(&dir.path().join("railhead.toml"))
            .extract::<Settings>()
            .unwrap();
        assert_eq!(settings.max_concurrent, 5);
        assert_eq!(settings.motis_binary, PathBuf::from("./motis"));
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("railhead.toml");
        std::fs::write(&file, "out_dir = \"/srv/motis\"\nmax_concurrent = 2\n").unwrap();

        let settings = Settings::figment(&file).extract::<Settings>().unwrap();

        assert_eq!(settings.out_dir, PathBuf::from("/srv/motis"));
        assert_eq!(settings.max_concurrent, 2);
        assert_eq!(settings.motis_binary, PathBuf::from("./motis"));
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("railhead.toml");
        std::fs::write(&file, "max_concurrent = \"many\"\n").unwrap();

        assert!(Settings::load(Some(file.as_path())).is_err());
    }

    #[test]
    fn flags_win() {
        let settings = Settings::default()
            .with_out_dir(Some(PathBuf::from("elsewhere")))
            .with_max_concurrent(None)
            .with_motis_binary(Some(PathBuf::from("/opt/motis")));

        assert_eq!(settings.out_dir, PathBuf::from("elsewhere"));
        assert_eq!(settings.max_concurrent, 5);
        assert_eq!(settings.motis_binary, PathBuf::from("/opt/motis"));
    }
}
