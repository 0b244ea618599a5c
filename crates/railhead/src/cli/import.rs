use std::path::PathBuf;

use railhead_install::{CONFIG_FILE, ImportCommand};

use crate::settings::Settings;

#[derive(Clone, Debug, clap::Args)]
pub struct ImportArg {
    /// Provisioned directory to import
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// MOTIS binary; relative paths resolve inside the directory
    #[arg(long, value_name = "PATH")]
    pub motis: Option<PathBuf>,
}

impl ImportArg {
    pub async fn run(self, settings: Settings) -> anyhow::Result<()> {
        let settings = settings
            .with_out_dir(self.out)
            .with_motis_binary(self.motis);

        if !settings.out_dir.join(CONFIG_FILE).is_file() {
            anyhow::bail!(
                "{} has no {CONFIG_FILE}; run `railhead config` first",
                settings.out_dir.display()
            );
        }

        let command = ImportCommand::new(settings.motis_binary, settings.out_dir);
        if !command.is_present() {
            anyhow::bail!("{} not found; was the bundle fetched?", command.program().display());
        }
        command.run(|line| println!("{line}")).await?;
        Ok(())
    }
}
