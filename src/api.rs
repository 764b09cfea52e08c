use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use shuttle_axum::axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::config::InsightConfig;
use crate::error::AnalysisError;
use crate::fetch::{FetchError, HttpFetcher, PageFetcher};
use crate::metrics::{ANALYZE_MS, ERRORS_TOTAL, REQUESTS_TOTAL};
use crate::pipeline::{AnalysisResult, Analyzer, RawDocument};
use crate::sentiment::{SentimentLabel, SentimentScores};
use crate::summarize::SummaryResult;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub fetcher: Arc<dyn PageFetcher>,
}

impl AppState {
    pub fn new(analyzer: Analyzer, fetcher: impl PageFetcher + 'static) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            fetcher: Arc::new(fetcher),
        }
    }

    pub fn from_config(cfg: &InsightConfig) -> anyhow::Result<Self> {
        let fetcher = HttpFetcher::new(&cfg.fetch)?;
        Ok(Self::new(Analyzer::new(cfg), fetcher))
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/summarize", post(summarize))
        .route("/sentiment", post(sentiment))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug)]
pub enum ApiError {
    /// Neither `html` nor `url` in the request.
    MissingSource,
    Fetch(FetchError),
    Analysis(AnalysisError),
    Internal(String),
}

impl From<FetchError> for ApiError {
    fn from(e: FetchError) -> Self {
        ApiError::Fetch(e)
    }
}

impl From<AnalysisError> for ApiError {
    fn from(e: AnalysisError) -> Self {
        ApiError::Analysis(e)
    }
}

#[derive(Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn status_and_kind(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingSource => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Fetch(FetchError::InvalidUrl { .. }) => {
                (StatusCode::BAD_REQUEST, "bad_request")
            }
            ApiError::Fetch(_) => (StatusCode::BAD_GATEWAY, "fetch_error"),
            ApiError::Analysis(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.kind()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::MissingSource => "request needs `html` or `url`".to_string(),
            ApiError::Fetch(e) => e.to_string(),
            ApiError::Analysis(e) => e.to_string(),
            ApiError::Internal(e) => e.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind) = self.status_and_kind();
        counter!(ERRORS_TOTAL, "kind" => kind).increment(1);
        if status.is_server_error() {
            warn!(kind, error = %self.message(), "request failed");
        }
        let body = ErrorBody {
            error: kind.to_string(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

// Core work is CPU-bound; keep it off the async workers.
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AnalysisError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .map_err(ApiError::from)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    html: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    sentence_count: Option<usize>,
}

async fn analyze(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeReq>,
) -> Result<Json<AnalysisResult>, ApiError> {
    counter!(REQUESTS_TOTAL, "endpoint" => "analyze").increment(1);
    let n = body
        .sentence_count
        .unwrap_or_else(|| state.analyzer.default_sentence_count());

    let doc = match (body.html, body.url) {
        (Some(html), url) => RawDocument::new(url.unwrap_or_default(), html),
        (None, Some(url)) => state.fetcher.fetch(&url).await?,
        (None, None) => return Err(ApiError::MissingSource),
    };

    let analyzer = state.analyzer.clone();
    let started = Instant::now();
    let result = run_blocking(move || analyzer.analyze_document(&doc, n)).await?;
    histogram!(ANALYZE_MS).record(started.elapsed().as_secs_f64() * 1000.0);
    Ok(Json(result))
}

#[derive(Deserialize)]
struct SummarizeReq {
    text: String,
    #[serde(default)]
    sentence_count: Option<usize>,
}

async fn summarize(
    State(state): State<AppState>,
    Json(body): Json<SummarizeReq>,
) -> Result<Json<SummaryResult>, ApiError> {
    counter!(REQUESTS_TOTAL, "endpoint" => "summarize").increment(1);
    let n = body
        .sentence_count
        .unwrap_or_else(|| state.analyzer.default_sentence_count());
    let analyzer = state.analyzer.clone();
    let summary = run_blocking(move || {
        analyzer
            .summarizer()
            .summarize(&body.text, n)
            .map_err(AnalysisError::from)
    })
    .await?;
    Ok(Json(summary))
}

#[derive(Deserialize)]
struct SentimentReq {
    text: String,
}

#[derive(Serialize, Deserialize)]
pub struct SentimentResp {
    pub label: SentimentLabel,
    pub scores: SentimentScores,
}

async fn sentiment(
    State(state): State<AppState>,
    Json(body): Json<SentimentReq>,
) -> Result<Json<SentimentResp>, ApiError> {
    counter!(REQUESTS_TOTAL, "endpoint" => "sentiment").increment(1);
    let analyzer = state.analyzer.clone();
    let (label, scores) = run_blocking(move || {
        analyzer
            .sentiment()
            .score(&body.text)
            .map_err(AnalysisError::from)
    })
    .await?;
    Ok(Json(SentimentResp { label, scores }))
}
