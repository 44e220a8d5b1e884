//! Entry point wiring CLI dispatch to the search layer.

use anyhow::Result;
use repurpose::{cli::Cli, config::Settings, logging};
use tracing::{debug, instrument};

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    logging::init_tracing(&settings.log_filter)?;
    let cli = Cli::parse();

    debug!(?cli, "starting command");
    cli.dispatch(settings).await
}
