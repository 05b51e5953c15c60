use anyhow::Context as _;
use tracing_subscriber::fmt::time::ChronoLocal;

const DEFAULT_FILTER: &str = "info";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Logs go to stderr so stdout only carries the path of the written file.
pub fn init() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER))
        .context("build log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_owned()))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("initialize tracing subscriber: {err}"))?;

    Ok(())
}
