//! CLI entry-points for name-driven similarity lookups.

use anyhow::Result;
use clap::Args as ClapArgs;
use serde::Serialize;
use tracing::instrument;

use crate::{
    cli::{open_search, print_candidates, print_json, print_suggestions},
    config::Settings,
    search::Lookup,
};

/// Args shared by `diseases`, `drugs` and `similar`.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Drug or disease name; fuzzy matches are suggested.
    pub query: String,
    /// Number of candidates to return.
    #[arg(long)]
    pub top_k: Option<usize>,
    /// Print plain text instead of JSON.
    #[arg(long)]
    pub text: bool,
}

#[instrument(skip(settings))]
pub async fn diseases(args: Args, settings: Settings) -> Result<()> {
    let search = open_search(&settings)?;
    let lookup = search.diseases_for_drug(&args.query, settings.top_k(args.top_k))?;
    report(&lookup, args.text)
}

#[instrument(skip(settings))]
pub async fn drugs(args: Args, settings: Settings) -> Result<()> {
    let search = open_search(&settings)?;
    let lookup = search.drugs_for_disease(&args.query, settings.top_k(args.top_k))?;
    report(&lookup, args.text)
}

#[instrument(skip(settings))]
pub async fn similar(args: Args, settings: Settings) -> Result<()> {
    let search = open_search(&settings)?;
    let lookup = search.similar_drugs(&args.query, settings.top_k(args.top_k))?;
    report(&lookup, args.text)
}

fn report<F: Serialize>(lookup: &Lookup<F>, text: bool) -> Result<()> {
    if !text {
        return print_json(lookup);
    }
    match lookup {
        Lookup::Found { entity, candidates } => {
            println!("Results for {entity}:");
            print_candidates(candidates);
        }
        Lookup::NotFound { query, suggestions } => print_suggestions(query, suggestions),
        Lookup::MissingEmbedding { entity } => println!("No embedding stored for {entity}"),
    }
    Ok(())
}
