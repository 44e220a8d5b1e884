//! CLI entry-point for browsing known names.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::instrument;

use crate::{
    cli::{open_search, ClassArg},
    config::Settings,
    store::EntityClass,
};

/// Args for the `catalog` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Entity class to list.
    #[arg(long, value_enum, default_value = "drug")]
    pub class: ClassArg,
    /// Case-insensitive substring filter.
    #[arg(long, default_value = "")]
    pub filter: String,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let search = open_search(&settings)?;
    let class: EntityClass = args.class.into();
    let names = search.catalog(class, &args.filter);
    let total = search.resolver().cache().index(class).len();
    eprintln!("Showing {} of {} {}", names.len(), total, class.collection());
    for name in names {
        println!("{name}");
    }
    Ok(())
}
