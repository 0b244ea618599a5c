use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::cli::{config, fetch, import};
use crate::settings::Settings;

#[derive(Clone, Debug, Parser)]
#[command(name = "railhead", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    #[command(subcommand)]
    pub cmd: Commands,

    /// Settings file [default: ./railhead.toml]
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Download feeds, map extract and bundle, then unpack the bundle
    #[command(alias = "f", name = "fetch")]
    Fetch(fetch::FetchArg),
    /// Regenerate config.yml from the files in the output directory
    #[command(alias = "cfg", name = "config")]
    Config(config::ConfigArg),
    /// Run `motis import` inside the output directory
    #[command(alias = "i", name = "import")]
    Import(import::ImportArg),
}

impl App {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::load(self.settings.as_deref())?;
        match self.cmd {
            Commands::Fetch(arg) => arg.run(settings).await,
            Commands::Config(arg) => arg.run(settings),
            Commands::Import(arg) => arg.run(settings).await,
        }
    }
}
