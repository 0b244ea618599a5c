mod cli;
mod logging;
mod progress;
mod settings;

use clap::Parser;

use crate::cli::app::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app = App::parse();
    logging::init(app.verbose)?;
    app.run().await
}
