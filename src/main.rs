//! Article Insight Service — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and metrics.

use article_insight::devlog::enable_dev_tracing;
use article_insight::metrics::Metrics;
use article_insight::{create_router, AppState, InsightConfig};
use shuttle_axum::ShuttleAxum;
use tracing::info;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables INSIGHT_CONFIG_PATH / INSIGHT_SENTENCE_COUNT from .env
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let cfg = InsightConfig::from_toml()?;
    let state = AppState::from_config(&cfg)?;
    let metrics = Metrics::init()?;

    let router = create_router(state).merge(metrics.router());
    info!(
        sentence_count = cfg.summarizer.default_sentence_count,
        fetch_timeout_secs = cfg.fetch.timeout_secs,
        "insight service ready"
    );

    Ok(router.into())
}
