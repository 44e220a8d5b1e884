//! HTTP layer exposing resolution and similarity search as JSON.

pub mod routes;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{cli::open_search, config::Settings, search::SmartSearch, store::MemoryStore};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SmartSearch<MemoryStore>>,
    pub default_top_k: usize,
}

/// Routes without the listener, for embedding and tests.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/resolve", get(routes::resolve))
        .route("/search", get(routes::search_drugs))
        .route("/diseases", get(routes::diseases_for_drug))
        .route("/drugs", get(routes::drugs_for_disease))
        .route("/similar", get(routes::similar_drugs))
        .route("/catalog/:class", get(routes::catalog))
        .route("/stats", get(routes::stats))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(settings: Settings, host: String, port: u16) -> Result<()> {
    let state = AppState {
        search: Arc::new(open_search(&settings)?),
        default_top_k: settings.default_top_k,
    };
    let router = router(state);

    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, "serving repurpose API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(%err, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
