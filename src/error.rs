// src/error.rs
//! Typed failures of the analysis core. Every variant is terminal for the
//! current request: inputs are deterministic, so nothing is retried.

use thiserror::Error;

/// No plausible article body could be identified in the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("document is empty")]
    EmptyDocument,

    #[error("no readable content candidates found")]
    NoCandidate,

    #[error("extracted body too short: {len} chars (minimum {min})")]
    BodyTooShort { len: usize, min: usize },
}

/// Text handed to the summarizer or the sentiment scorer is unusable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("body text is empty")]
    EmptyText,

    #[error("sentence count must be at least 1")]
    ZeroSentenceCount,
}

/// Anything `analyze` can fail with; the first upstream error wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
}

impl AnalysisError {
    /// Stable snake_case kind used by the HTTP layer and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Extraction(_) => "extraction_error",
            AnalysisError::InvalidInput(_) => "invalid_input",
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
