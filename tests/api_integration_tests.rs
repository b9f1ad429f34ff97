//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use edition_cache::{api::create_router, AppState, EnhancedCache};
use serde_json::Value;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_state() -> AppState {
    AppState::new(EnhancedCache::new(100))
}

fn create_test_app() -> Router {
    create_router(create_state())
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

const PRELOAD_BODY: &str = r#"{
    "posts": [
        {"id": 1, "slug": "budget", "title": "Budget", "country": "ng", "sections": ["Business"]},
        {"id": 2, "slug": "derby", "title": "Derby", "country": "ng", "sections": ["Sport"]},
        {"id": 3, "slug": "rates", "title": "Rates", "country": "za", "sections": ["Business"]}
    ],
    "max_concurrent": 2
}"#;

// == Cache Endpoint Tests ==

#[tokio::test]
async fn test_set_then_get() {
    let app = create_test_app();

    let set_response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/cache/home:ng",
            r#"{"data":{"headline":"hi"},"country":"NG"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(set_response.status(), StatusCode::OK);

    let json = body_to_json(set_response.into_body()).await;
    assert_eq!(json["key"], "home:ng");
    assert_eq!(json["tags"], serde_json::json!(["country:ng", "section:general"]));

    let get_response = app.oneshot(empty_request("GET", "/cache/home:ng")).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["data"]["headline"], "hi");
    assert_eq!(json["exists"], true);
    assert_eq!(json["is_stale"], false);
}

#[tokio::test]
async fn test_untagged_set_has_no_tags() {
    let response = create_test_app()
        .oneshot(json_request("PUT", "/cache/plain", r#"{"data":1}"#))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tags"], serde_json::json!([]));
}

#[tokio::test]
async fn test_stale_entry_is_served_with_flag() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/cache/k",
            r#"{"data":"v","ttl_ms":0,"stale_time_ms":60000}"#,
        ))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;

    let response = app.oneshot(empty_request("GET", "/cache/k")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["data"], "v");
    assert_eq!(json["is_stale"], true);
}

#[tokio::test]
async fn test_expired_entry_is_not_found() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/cache/k",
            r#"{"data":"v","ttl_ms":0,"stale_time_ms":0}"#,
        ))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(20)).await;

    let response = app.oneshot(empty_request("GET", "/cache/k")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_set_rejects_oversized_key() {
    let uri = format!("/cache/{}", "k".repeat(300));

    let response = create_test_app()
        .oneshot(json_request("PUT", &uri, r#"{"data":1}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("maximum length"));
}

#[tokio::test]
async fn test_delete_endpoint() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/cache/gone", r#"{"data":1}"#))
        .await
        .unwrap();

    let del_response = app
        .clone()
        .oneshot(empty_request("DELETE", "/cache/gone"))
        .await
        .unwrap();
    assert_eq!(del_response.status(), StatusCode::OK);

    let again = app
        .clone()
        .oneshot(empty_request("DELETE", "/cache/gone"))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);

    let get_response = app.oneshot(empty_request("GET", "/cache/gone")).await.unwrap();
    assert_eq!(get_response.status(), StatusCode::NOT_FOUND);
}

// == Preload and Revalidate Tests ==

#[tokio::test]
async fn test_preload_warms_posts() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/preload", PRELOAD_BODY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_to_json(response.into_body()).await;
    assert_eq!(report["total"], 3);
    assert_eq!(report["succeeded"], 3);
    assert_eq!(report["failed"], 0);
    assert!(report["peak_in_flight"].as_u64().unwrap() <= 2);

    let get_response = app
        .oneshot(empty_request("GET", "/cache/post:ng:budget"))
        .await
        .unwrap();
    assert_eq!(get_response.status(), StatusCode::OK);

    let json = body_to_json(get_response.into_body()).await;
    assert_eq!(json["data"]["title"], "Budget");
}

#[tokio::test]
async fn test_revalidate_by_section_across_editions() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("POST", "/preload", PRELOAD_BODY))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/revalidate", r#"{"sections":["BUSINESS"]}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["tags"], serde_json::json!(["section:business"]));
    assert_eq!(json["invalidated"], 2);

    let survivor = app
        .clone()
        .oneshot(empty_request("GET", "/cache/post:ng:derby"))
        .await
        .unwrap();
    assert_eq!(survivor.status(), StatusCode::OK);

    let dropped = app
        .oneshot(empty_request("GET", "/cache/post:za:rates"))
        .await
        .unwrap();
    assert_eq!(dropped.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_revalidate_single_post() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("POST", "/preload", PRELOAD_BODY))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/revalidate", r#"{"tags":["post:ng:2"]}"#))
        .await
        .unwrap();

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["invalidated"], 1);

    let stats = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    let json = body_to_json(stats.into_body()).await;
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["invalidations"], 1);
}

#[tokio::test]
async fn test_preload_rejected_after_shutdown() {
    let state = create_state();
    state.batches.close();
    let app = create_router(state);

    let response = app
        .oneshot(json_request("POST", "/preload", PRELOAD_BODY))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_preload_with_huge_max_concurrent() {
    let body = PRELOAD_BODY.replace(
        r#""max_concurrent": 2"#,
        r#""max_concurrent": 18446744073709551615"#,
    );

    let response = create_test_app()
        .oneshot(json_request("POST", "/preload", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = body_to_json(response.into_body()).await;
    assert_eq!(report["succeeded"], 3);
}

#[tokio::test]
async fn test_preload_batch_outlives_its_timeout() {
    let mut state = create_state();
    state.batch_timeout = Duration::ZERO;
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(json_request("POST", "/preload", PRELOAD_BODY))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let report = body_to_json(response.into_body()).await;
    assert_eq!(report["succeeded"], 3);

    let warmed = app
        .oneshot(empty_request("GET", "/cache/post:za:rates"))
        .await
        .unwrap();
    assert_eq!(warmed.status(), StatusCode::OK);
}

// == Stats and Health Tests ==

#[tokio::test]
async fn test_stats_track_hits_and_misses() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/cache/a", r#"{"data":1}"#))
        .await
        .unwrap();
    app.clone()
        .oneshot(empty_request("GET", "/cache/a"))
        .await
        .unwrap();
    app.clone()
        .oneshot(empty_request("GET", "/cache/missing"))
        .await
        .unwrap();

    let response = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["fresh_hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["preload_queue"], 0);
    assert!((json["hit_rate"].as_f64().unwrap() - 0.5).abs() < 0.001);
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_app()
        .oneshot(empty_request("GET", "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
