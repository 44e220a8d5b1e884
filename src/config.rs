//! Runtime configuration for the repurpose CLI and HTTP server.

use std::{env, path::PathBuf};

use serde::Deserialize;

/// Application configuration resolved from `.env` and defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// JSON snapshot of the drug and disease collections.
    pub index_path: PathBuf,
    /// Result count used when a command does not specify one.
    pub default_top_k: usize,
    /// Address the HTTP server binds to.
    pub host: String,
    pub port: u16,
    /// Tracing directives used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let index_path = env::var("INDEX_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data/index.json"));
        let default_top_k = env::var("DEFAULT_TOP_K")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|k| *k > 0)
            .unwrap_or(10);
        let host = env::var("SERVE_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("SERVE_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8080);
        let log_filter = env::var("LOG_FILTER").unwrap_or_else(|_| "warn".to_string());

        Ok(Self {
            index_path,
            default_top_k,
            host,
            port,
            log_filter,
        })
    }

    /// Requested result count, falling back to the configured default.
    pub fn top_k(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_top_k)
    }
}
