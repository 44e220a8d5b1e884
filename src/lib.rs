//! Drug-repurposing search: fuzzy name resolution and distance-ranked
//! candidates over a precomputed vector index.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod search;
pub mod store;
