use std::path::PathBuf;

use anyhow::Context;
use railhead_install::MotisConfig;

use crate::settings::Settings;

#[derive(Clone, Debug, clap::Args)]
pub struct ConfigArg {
    /// Directory holding the fetched files
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Print the config instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl ConfigArg {
    pub fn run(self, settings: Settings) -> anyhow::Result<()> {
        let out_dir = settings.with_out_dir(self.out).out_dir;
        let config = MotisConfig::from_dir(&out_dir)
            .with_context(|| format!("nothing to configure in {}", out_dir.display()))?;

        if self.dry_run {
            print!("{}", config.render());
            return Ok(());
        }
        let path = config.write(&out_dir)?;
        println!("wrote {}", path.display());
        Ok(())
    }
}
