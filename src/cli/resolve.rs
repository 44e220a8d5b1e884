//! CLI entry-point for name resolution.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli::{open_search, print_json, print_suggestions, ClassArg},
    config::Settings,
};

/// Args for the `resolve` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Name as typed by the user.
    pub query: String,
    /// Entity class to resolve against.
    #[arg(long, value_enum, default_value = "drug")]
    pub class: ClassArg,
    /// Print plain text instead of JSON.
    #[arg(long)]
    pub text: bool,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let search = open_search(&settings)?;
    let resolution = search.resolver().resolve(&args.query, args.class.into());
    if !args.text {
        return print_json(&resolution);
    }
    match &resolution.canonical {
        Some(name) => println!("{name}"),
        None => print_suggestions(&args.query, &resolution.suggestions),
    }
    Ok(())
}
