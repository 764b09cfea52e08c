// src/pipeline.rs
//! Result aggregator: extract → {summarize, score} → `AnalysisResult`.
//! No analysis happens here; the first failing stage decides the error.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::InsightConfig;
use crate::devlog::{anon_hash, dev_logging_enabled};
use crate::error::Result;
use crate::extract::Extractor;
use crate::sentiment::{SentimentAnalyzer, SentimentLabel, SentimentScores};
use crate::summarize::{Summarizer, SummaryResult};

/// Fetched page plus the URL it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub url: String,
    pub html: String,
}

impl RawDocument {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }

    /// Host part of the URL, if it parses.
    pub fn host(&self) -> Option<String> {
        reqwest::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_owned))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub title: String,
    pub summary: SummaryResult,
    pub sentiment_label: SentimentLabel,
    pub sentiment_scores: SentimentScores,
}

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    extractor: Extractor,
    summarizer: Summarizer,
    sentiment: SentimentAnalyzer,
}

impl Analyzer {
    pub fn new(cfg: &InsightConfig) -> Self {
        Self {
            extractor: Extractor::new(cfg.extractor),
            summarizer: Summarizer::new(cfg.summarizer),
            sentiment: SentimentAnalyzer::new(),
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }

    pub fn sentiment(&self) -> &SentimentAnalyzer {
        &self.sentiment
    }

    /// Sentence count used when a caller does not pass one.
    pub fn default_sentence_count(&self) -> usize {
        self.summarizer.config().default_sentence_count
    }

    pub fn analyze(&self, html: &str, sentence_count: usize) -> Result<AnalysisResult> {
        let article = self.extractor.extract(html)?;
        let summary = self
            .summarizer
            .summarize(&article.body_text, sentence_count)?;
        let (label, scores) = self.sentiment.score(&article.body_text)?;

        if dev_logging_enabled() {
            // Never log raw text. Only hashed id + sizes.
            info!(
                target: "insight",
                id = %anon_hash(&article.body_text),
                body_chars = article.body_text.chars().count(),
                summary_sentences = summary.sentences.len(),
                method = ?summary.method,
                label = %label,
                compound = scores.compound,
                "article analyzed"
            );
        }

        Ok(AnalysisResult {
            title: article.title,
            summary,
            sentiment_label: label,
            sentiment_scores: scores,
        })
    }

    pub fn analyze_document(
        &self,
        doc: &RawDocument,
        sentence_count: usize,
    ) -> Result<AnalysisResult> {
        let host = doc.host().unwrap_or_default();
        info!(%host, html_bytes = doc.html.len(), "analyzing document");
        self.analyze(&doc.html, sentence_count)
    }
}

/// Analyze with default settings.
pub fn analyze(html: &str, sentence_count: usize) -> Result<AnalysisResult> {
    Analyzer::default().analyze(html, sentence_count)
}
