//! Command-line interface wiring for repurpose.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use crate::{
    config::Settings,
    search::{Candidate, SmartSearch},
    store::{EntityClass, MemoryStore},
};

pub mod catalog;
pub mod lookup;
pub mod resolve;
pub mod search;
pub mod serve;
pub mod stats;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Drug repurposing search", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Resolve(args) => resolve::run(args, settings).await,
            Commands::Search(args) => search::run(args, settings).await,
            Commands::Diseases(args) => lookup::diseases(args, settings).await,
            Commands::Drugs(args) => lookup::drugs(args, settings).await,
            Commands::Similar(args) => lookup::similar(args, settings).await,
            Commands::Catalog(args) => catalog::run(args, settings).await,
            Commands::Stats => stats::run(settings).await,
            Commands::Serve(args) => serve::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a free-text name to a canonical drug or disease.
    Resolve(resolve::Args),
    /// Find drugs for a free-text disease description.
    Search(search::Args),
    /// Find diseases related to a drug.
    Diseases(lookup::Args),
    /// Find drugs related to a disease.
    Drugs(lookup::Args),
    /// Find drugs similar to a drug.
    Similar(lookup::Args),
    /// List known names, optionally filtered.
    Catalog(catalog::Args),
    /// Summarise the drug collection.
    Stats,
    /// Serve the JSON API.
    Serve(serve::Args),
}

/// Entity class selector.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ClassArg {
    Drug,
    Disease,
}

impl From<ClassArg> for EntityClass {
    fn from(value: ClassArg) -> Self {
        match value {
            ClassArg::Drug => EntityClass::Drug,
            ClassArg::Disease => EntityClass::Disease,
        }
    }
}

/// Load the configured index and build the name cache.
pub fn open_search(settings: &Settings) -> Result<SmartSearch<MemoryStore>> {
    let store = MemoryStore::load(&settings.index_path)
        .with_context(|| format!("loading index {}", settings.index_path.display()))?;
    #[cfg(feature = "embeddings")]
    let store = store.with_embedder(Box::new(
        crate::store::embedder::FastEmbedder::try_new().context("loading text embedder")?,
    ));
    SmartSearch::new(store).context("caching entity names")
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_candidates<F>(candidates: &[Candidate<F>]) {
    for candidate in candidates {
        println!(
            "{}. {} - {:.1}% confidence ({})",
            candidate.rank,
            candidate.entity_name,
            candidate.confidence,
            candidate.band()
        );
    }
}

pub(crate) fn print_suggestions(query: &str, suggestions: &[String]) {
    if suggestions.is_empty() {
        println!("No match for '{query}'");
        return;
    }
    println!("'{query}' not found. Did you mean:");
    for suggestion in suggestions {
        println!("- {suggestion}");
    }
}
