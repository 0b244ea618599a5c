use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::progress::SuspendingStderr;

/// Environment variable holding `EnvFilter` directives.
pub const LOG_ENV: &str = "RAILHEAD_LOG";

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install the global subscriber, writing to stderr between bar redraws.
///
/// `RAILHEAD_LOG` directives take precedence over the `-v` level.
pub fn init(verbose: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbose).into())
        .with_env_var(LOG_ENV)
        .from_env()?
        // per-chunk transport logs are noise at every level we expose
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(|| SuspendingStderr)
                .with_target(verbose > 0),
        )
        .try_init()?;
    Ok(())
}
