// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod devlog;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod metrics;
pub mod pipeline;
pub mod sentiment;
pub mod summarize;
pub mod text;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::config::InsightConfig;
pub use crate::error::{AnalysisError, ExtractionError, InvalidInput};
pub use crate::extract::{extract, ExtractedArticle, Extractor};
pub use crate::fetch::{FetchError, HttpFetcher, PageFetcher};
pub use crate::pipeline::{analyze, AnalysisResult, Analyzer, RawDocument};
pub use crate::sentiment::{score, SentimentAnalyzer, SentimentLabel, SentimentScores};
pub use crate::summarize::{summarize, Summarizer, SummaryMethod, SummaryResult};
