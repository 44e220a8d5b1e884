//! CLI entry-point for free-text drug search.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{
    cli::{open_search, print_candidates, print_json},
    config::Settings,
};

/// Args for the `search` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Disease description, e.g. "memory loss in elderly patients".
    pub query: String,
    /// Number of candidates to return.
    #[arg(long)]
    pub top_k: Option<usize>,
    /// Print plain text instead of JSON.
    #[arg(long)]
    pub text: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let search = open_search(&settings)?;
    let candidates = search.search_drugs_fuzzy(&args.query, settings.top_k(args.top_k))?;
    info!(hits = candidates.len(), "text search complete");
    if args.text {
        print_candidates(&candidates);
        Ok(())
    } else {
        print_json(&candidates)
    }
}
