use std::path::PathBuf;

use anyhow::Context;
use console::style;
use railhead_fetch::ReqwestClient;
use railhead_install::{FetchRequest, MotisConfig, Pipeline, read_request, write_request_record};

use crate::progress::TransferBars;
use crate::settings::Settings;

#[derive(Clone, Debug, clap::Args)]
pub struct FetchArg {
    /// GTFS feed archive URL, repeatable
    #[arg(long = "feed", value_name = "URL")]
    pub feeds: Vec<String>,

    /// OSM map extract URL
    #[arg(long, value_name = "URL", required_unless_present = "request")]
    pub map: Option<String>,

    /// MOTIS release bundle URL (.tar.bz2)
    #[arg(long, value_name = "URL", required_unless_present = "request")]
    pub bundle: Option<String>,

    /// Read the URLs from a JSON request file instead
    #[arg(long, value_name = "FILE", conflicts_with_all = ["feeds", "map", "bundle"])]
    pub request: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Maximum simultaneous downloads
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Do not write config.yml after fetching
    #[arg(long)]
    pub no_config: bool,
}

impl FetchArg {
    pub fn request(&self) -> anyhow::Result<FetchRequest> {
        if let Some(path) = &self.request {
            return Ok(read_request(path)?);
        }
        match (&self.map, &self.bundle) {
            (Some(map), Some(bundle)) => Ok(FetchRequest::new(
                self.feeds.clone(),
                map.clone(),
                bundle.clone(),
            )),
            _ => anyhow::bail!("--map and --bundle are required without --request"),
        }
    }

    pub async fn run(self, settings: Settings) -> anyhow::Result<()> {
        let request = self.request()?;
        let settings = settings
            .with_out_dir(self.out)
            .with_max_concurrent(self.jobs);
        let out_dir = settings.out_dir;

        let bars = TransferBars::new();
        let pipeline = Pipeline::new(ReqwestClient::new(), &out_dir)
            .max_concurrent(settings.max_concurrent);
        let result = pipeline.run(&request, Some(bars.sink())).await;
        bars.finish();
        let report = result.context("provisioning failed")?;

        println!(
            "{} fetched {} files, extracted {} entries from {}",
            style("✓").green().bold(),
            report.files.len(),
            report.extract.entries.len(),
            report.bundle.display()
        );
        for line in bars.summary() {
            println!("{line}");
        }

        write_request_record(&out_dir, &request)?;
        if !self.no_config {
            let path = MotisConfig::from_dir(&out_dir)?.write(&out_dir)?;
            println!("{} wrote {}", style("✓").green().bold(), path.display());
            println!("run `railhead import` (or ./motis import inside {}) next", out_dir.display());
        }
        Ok(())
    }
}
