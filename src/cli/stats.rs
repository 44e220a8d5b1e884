//! CLI entry-point for collection statistics.

use anyhow::Result;
use tracing::instrument;

use crate::{
    cli::{open_search, print_json},
    config::Settings,
};

#[instrument(skip(settings))]
pub async fn run(settings: Settings) -> Result<()> {
    let search = open_search(&settings)?;
    print_json(&search.catalog_stats()?)
}
