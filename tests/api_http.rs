// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze (inline html, fetched url, missing source, fetch failure, short body)
// - POST /summarize
// - POST /sentiment (4-decimal scores, empty text)

use async_trait::async_trait;
use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use article_insight::fetch::{FetchError, PageFetcher};
use article_insight::{api, Analyzer, RawDocument};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests

const ARTICLE: &str = r#"<html><head><title>Harbor Project Approved | City News</title></head><body>
  <nav><a href="/">Home</a> <a href="/politics">Politics</a> <a href="/sport">Sport</a></nav>
  <div class="article-body">
    <h1>Harbor Project Approved</h1>
    <p>The city council approved the harbor renovation project on Monday, ending months of debate over costs, design and timing.</p>
    <p>Supporters said the new waterfront will bring jobs, tourism and a welcome boost to local businesses along the shore.</p>
    <p>Critics warned that the budget could grow, but the mayor promised strict oversight and regular public progress reports.</p>
    <p>Construction is expected to begin in the spring and to last roughly two years, according to the city planning office.</p>
  </div>
  <div class="sidebar"><p>Subscribe to our newsletter for the latest updates every morning.</p></div>
</body></html>"#;

/// Serves canned pages; any other URL answers 404.
struct StubFetcher;

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        article_insight::fetch::parse_url(url)?;
        if url.ends_with("/harbor") {
            Ok(RawDocument::new(url, ARTICLE))
        } else {
            Err(FetchError::Status(404))
        }
    }
}

fn test_router() -> Router {
    api::create_router(api::AppState::new(Analyzer::default(), StubFetcher))
}

async fn post_json(uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST");
    let resp = test_router().oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("parse json");
    (status, v)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");

    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK, "health should be 200");

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    assert_eq!(String::from_utf8(bytes).expect("utf8"), "ok");
}

#[tokio::test]
async fn api_analyze_inline_html_returns_full_result() {
    let (status, v) = post_json("/analyze", json!({ "html": ARTICLE, "sentence_count": 2 })).await;
    assert_eq!(status, StatusCode::OK, "body: {v}");

    assert_eq!(v["title"], "Harbor Project Approved");
    assert_eq!(v["summary"]["sentences"].as_array().map(Vec::len), Some(2));
    assert!(v["summary"]["text"].as_str().is_some());
    assert!(v["sentiment_label"].is_string());
    for k in ["neg", "neu", "pos", "compound"] {
        assert!(v["sentiment_scores"][k].is_number(), "missing score {k}");
    }
    let text = v["summary"]["text"].as_str().unwrap_or_default();
    assert!(!text.contains("Subscribe"));
    assert!(!text.contains("Politics"));
}

#[tokio::test]
async fn api_analyze_fetches_when_only_url_given() {
    let (status, v) = post_json("/analyze", json!({ "url": "https://news.example.com/harbor" })).await;
    assert_eq!(status, StatusCode::OK, "body: {v}");
    assert_eq!(v["summary"]["sentences"].as_array().map(Vec::len), Some(3));
}

#[tokio::test]
async fn api_analyze_error_mapping() {
    let (status, v) = post_json("/analyze", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "bad_request");

    let (status, v) = post_json("/analyze", json!({ "url": "https://news.example.com/missing" })).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(v["error"], "fetch_error");

    let (status, v) = post_json("/analyze", json!({ "url": "not a url" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"], "bad_request");

    let (status, v) = post_json(
        "/analyze",
        json!({ "html": "<html><body><p>Too short to be an article.</p></body></html>" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], "extraction_error");
    assert!(v["message"].as_str().unwrap_or_default().contains("too short"));

    let (status, v) = post_json("/analyze", json!({ "html": ARTICLE, "sentence_count": 0 })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], "invalid_input");
}

#[tokio::test]
async fn api_summarize_keeps_document_order() {
    let text = "Rates rose today. Stocks fell in response.";
    let (status, v) = post_json("/summarize", json!({ "text": text, "sentence_count": 5 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["sentences"], json!(["Rates rose today.", "Stocks fell in response."]));
    assert_eq!(v["method"], "leading");

    let (status, v) = post_json("/summarize", json!({ "text": "   " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], "invalid_input");
}

#[tokio::test]
async fn api_sentiment_returns_label_and_rounded_scores() {
    let (status, v) = post_json(
        "/sentiment",
        json!({ "text": "This is an amazing, wonderful, fantastic product! I love it!!" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["label"], "Positive");

    let compound = v["scores"]["compound"].as_f64().expect("compound");
    assert!(compound > 0.5);
    // at most 4 decimals on the wire
    assert_eq!((compound * 10_000.0).round() / 10_000.0, compound);

    let (status, v) = post_json("/sentiment", json!({ "text": "" })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(v["error"], "invalid_input");
}
