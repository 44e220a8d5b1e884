//! HTTP route handlers for Axum.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tokio::task;
use tracing::warn;

use super::AppState;
use crate::{
    search::{Candidate, CatalogStats, Lookup, Resolution, SearchError, SmartSearch},
    store::{DiseaseFields, DrugFields, EntityClass, MemoryStore, StoreError},
};

type ApiResult<T> = Result<Json<T>, (StatusCode, String)>;

#[derive(Debug, Deserialize)]
pub struct ResolveQuery {
    pub q: String,
    #[serde(default = "default_class")]
    pub class: EntityClass,
}

fn default_class() -> EntityClass {
    EntityClass::Drug
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub filter: String,
}

pub async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Json<Resolution> {
    Json(state.search.resolver().resolve(&query.q, query.class))
}

pub async fn search_drugs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<Candidate<DrugFields>>> {
    let top_k = query.top_k.unwrap_or(state.default_top_k);
    on_search_pool(&state, move |search| search.search_drugs_fuzzy(&query.q, top_k)).await
}

pub async fn diseases_for_drug(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Lookup<DiseaseFields>> {
    let top_k = query.top_k.unwrap_or(state.default_top_k);
    on_search_pool(&state, move |search| search.diseases_for_drug(&query.q, top_k)).await
}

pub async fn drugs_for_disease(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Lookup<DrugFields>> {
    let top_k = query.top_k.unwrap_or(state.default_top_k);
    on_search_pool(&state, move |search| search.drugs_for_disease(&query.q, top_k)).await
}

pub async fn similar_drugs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Lookup<DrugFields>> {
    let top_k = query.top_k.unwrap_or(state.default_top_k);
    on_search_pool(&state, move |search| search.similar_drugs(&query.q, top_k)).await
}

pub async fn catalog(
    Path(class): Path<EntityClass>,
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<Vec<String>> {
    Json(state.search.catalog(class, &query.filter))
}

pub async fn stats(State(state): State<AppState>) -> ApiResult<CatalogStats> {
    on_search_pool(&state, |search| search.catalog_stats()).await
}

/// Run a store-backed search off the async workers; embedding and
/// brute-force scoring are CPU bound.
async fn on_search_pool<T, F>(state: &AppState, op: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&SmartSearch<MemoryStore>) -> Result<T, SearchError> + Send + 'static,
{
    let search = state.search.clone();
    match task::spawn_blocking(move || op(&search)).await {
        Ok(result) => result.map(Json).map_err(error_response),
        Err(err) => {
            warn!(%err, "search task did not complete");
            Err((StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
        }
    }
}

fn error_response(err: SearchError) -> (StatusCode, String) {
    let status = match &err {
        SearchError::Store(StoreError::TextQueryUnsupported) => StatusCode::NOT_IMPLEMENTED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    warn!(%err, %status, "search request failed");
    (status, err.to_string())
}
