mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use repurpose::{
    api::{router, AppState},
    search::SmartSearch,
};
use serde_json::Value;
use tower::ServiceExt;

fn app() -> axum::Router {
    router(AppState {
        search: Arc::new(SmartSearch::new(common::store()).unwrap()),
        default_top_k: 5,
    })
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn resolve_returns_canonical_name() {
    let (status, body) = get("/resolve?q=ibu&class=drug").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["canonical"], "Ibuprofen");
    assert_eq!(body["tier"], "substring");
}

#[tokio::test]
async fn diseases_lookup_reports_status() {
    let (status, body) = get("/diseases?q=aspirin&top_k=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "found");
    assert_eq!(body["entity"], "Aspirin");
    assert_eq!(body["candidates"][0]["entity_name"], "Pain");
    assert_eq!(body["candidates"][0]["efo_id"], "EFO_0003843");
    assert_eq!(body["candidates"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn unknown_drug_lists_suggestions() {
    let (_, body) = get("/similar?q=metformn").await;
    assert_eq!(body["status"], "not_found");
    assert_eq!(body["suggestions"][0], "Metformin");
}

#[tokio::test]
async fn text_search_without_embedder_is_not_implemented() {
    let (status, _) = get("/search?q=headache").await;
    assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn catalog_filters_by_class() {
    let (status, body) = get("/catalog/disease?filter=e").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!(["Fever", "Type 2 Diabetes"]));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_lookups_run_on_the_blocking_pool() {
    let (drugs, stats) = tokio::join!(get("/drugs?q=fever&top_k=1"), get("/stats"));
    assert_eq!(drugs.0, StatusCode::OK);
    assert_eq!(drugs.1["status"], "found");
    assert_eq!(drugs.1["candidates"].as_array().unwrap().len(), 1);
    assert_eq!(stats.0, StatusCode::OK);
    assert_eq!(stats.1["drugs"], 3);
    assert_eq!(stats.1["diseases"], 3);
}
