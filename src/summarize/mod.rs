// src/summarize/mod.rs
//! Extractive summarizer ranking sentences by latent semantic importance.
//!
//! Term–sentence matrix `A` → sentence rank `sqrt(Σ σᵢ² vᵢⱼ²)` over the
//! retained singular components → top K in document order.
//!
//! When every non-zero component is retained the rank is the column norm of
//! `A` and no decomposition runs. A reduced spectrum decomposes the smaller of
//! `AᵀA` and `AAᵀ`, over at most `max_latent_sentences` leading sentences.
//!
//! Documents that cannot be ranked (a single sentence, too few distinct terms,
//! a zero spectrum) take the `Leading` path: the first K sentences verbatim.

mod jacobi;
mod matrix;
pub mod stopwords;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InvalidInput;
use crate::text::split_sentences;
use jacobi::symmetric_eigen;
use ndarray::{s, Array2, ArrayView2};
use matrix::{terms, TermMatrix};

fn default_sentence_count() -> usize {
    3
}
fn default_min_dimensions() -> usize {
    3
}
fn default_reduction_ratio() -> f64 {
    1.0
}
fn default_smoothing() -> f64 {
    0.4
}
fn default_max_latent_sentences() -> usize {
    200
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Used by shells when the caller gives no count.
    pub default_sentence_count: usize,
    pub min_dimensions: usize,
    /// Share of the spectrum kept, in (0, 1].
    pub reduction_ratio: f64,
    /// Weight floor of a present term, in [0, 1).
    pub smoothing: f64,
    pub inverse_sentence_frequency: bool,
    /// Sentences past this position are not ranked when a reduced spectrum
    /// needs a decomposition.
    pub max_latent_sentences: usize,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            default_sentence_count: default_sentence_count(),
            min_dimensions: default_min_dimensions(),
            reduction_ratio: default_reduction_ratio(),
            smoothing: default_smoothing(),
            inverse_sentence_frequency: false,
            max_latent_sentences: default_max_latent_sentences(),
        }
    }
}

impl SummarizerConfig {
    pub fn sanitized(mut self) -> Self {
        if self.default_sentence_count == 0 {
            self.default_sentence_count = default_sentence_count();
        }
        if self.min_dimensions == 0 {
            self.min_dimensions = default_min_dimensions();
        }
        if !(self.reduction_ratio > 0.0 && self.reduction_ratio <= 1.0) {
            self.reduction_ratio = default_reduction_ratio();
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            self.smoothing = default_smoothing();
        }
        if self.max_latent_sentences < 2 {
            self.max_latent_sentences = default_max_latent_sentences();
        }
        self
    }
}

/// Which path produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryMethod {
    /// Ranked by latent semantic importance.
    Latent,
    /// First sentences in document order.
    Leading,
}

/// Selected sentences in document order plus their single-space join.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub text: String,
    pub sentences: Vec<String>,
    pub method: SummaryMethod,
}

impl SummaryResult {
    fn new(sentences: Vec<String>, method: SummaryMethod) -> Self {
        Self {
            text: sentences.join(" "),
            sentences,
            method,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Summarizer {
    cfg: SummarizerConfig,
    stopwords: &'static FxHashSet<String>,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new(SummarizerConfig::default())
    }
}

impl Summarizer {
    pub fn new(cfg: SummarizerConfig) -> Self {
        Self {
            cfg: cfg.sanitized(),
            stopwords: stopwords::english(),
        }
    }

    pub fn config(&self) -> &SummarizerConfig {
        &self.cfg
    }

    pub fn summarize(&self, text: &str, count: usize) -> Result<SummaryResult, InvalidInput> {
        if count == 0 {
            return Err(InvalidInput::ZeroSentenceCount);
        }
        if text.trim().is_empty() {
            return Err(InvalidInput::EmptyText);
        }
        let sentences: Vec<String> = split_sentences(text).into_iter().map(|s| s.text).collect();
        if sentences.is_empty() {
            return Err(InvalidInput::EmptyText);
        }

        if sentences.len() <= count {
            return Ok(SummaryResult::new(sentences, SummaryMethod::Leading));
        }

        match self.rank(&sentences) {
            Some(ranks) => {
                let mut order: Vec<usize> = (0..sentences.len()).collect();
                order.sort_by(|&i, &j| ranks[j].total_cmp(&ranks[i]).then(i.cmp(&j)));
                let mut picked: Vec<usize> = order.into_iter().take(count).collect();
                picked.sort_unstable();
                let chosen = picked.into_iter().map(|i| sentences[i].clone()).collect();
                Ok(SummaryResult::new(chosen, SummaryMethod::Latent))
            }
            None => {
                let lead = sentences.into_iter().take(count).collect();
                Ok(SummaryResult::new(lead, SummaryMethod::Leading))
            }
        }
    }

    /// Per-sentence rank, or `None` when the document cannot be ranked.
    fn rank(&self, sentences: &[String]) -> Option<Vec<f64>> {
        if sentences.len() < 2 {
            return None;
        }
        let tokens: Vec<Vec<String>> = sentences
            .iter()
            .map(|s| terms(s, self.stopwords))
            .collect();
        let tm = TermMatrix::build(
            &tokens,
            self.cfg.smoothing,
            self.cfg.inverse_sentence_frequency,
        );
        if tm.term_count() < self.cfg.min_dimensions {
            debug!(terms = tm.term_count(), "too few terms for lsa");
            return None;
        }

        let rank = tm.term_count().min(sentences.len());
        let reduced = (rank as f64 * self.cfg.reduction_ratio).floor() as usize;
        let dims = self.cfg.min_dimensions.max(reduced);

        let ranks = if dims >= rank {
            column_norms(tm.weights.view())
        } else {
            let limit = sentences.len().min(self.cfg.max_latent_sentences);
            let a = tm.weights.slice(s![.., ..limit]);
            let mut ranks = if a.nrows() < a.ncols() {
                ranks_via_terms(a, dims)
            } else {
                ranks_via_sentences(a, dims)
            };
            ranks.resize(sentences.len(), 0.0);
            ranks
        };
        if ranks.iter().all(|&r| r * r <= ZERO_SPECTRUM) {
            debug!("zero spectrum");
            return None;
        }

        debug!(
            sentences = sentences.len(),
            terms = tm.term_count(),
            dims,
            full = dims >= rank,
            "lsa ranked"
        );
        Some(ranks)
    }
}

const ZERO_SPECTRUM: f64 = 1e-12;

/// `sqrt(Σ σᵢ² vᵢⱼ²)` over all components: the Euclidean norm of column `j`.
fn column_norms(a: ArrayView2<'_, f64>) -> Vec<f64> {
    a.columns()
        .into_iter()
        .map(|c| c.dot(&c).sqrt())
        .collect()
}

/// Top `dims` components from `AᵀA` (sentences × sentences).
fn ranks_via_sentences(a: ArrayView2<'_, f64>, dims: usize) -> Vec<f64> {
    let eigen = symmetric_eigen(&a.t().dot(&a));
    let dims = dims.min(eigen.values.len());
    (0..a.ncols())
        .map(|j| {
            (0..dims)
                .map(|i| eigen.values[i] * eigen.vectors[[j, i]].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

/// Top `dims` components from `AAᵀ` (terms × terms). With `vᵢ = Aᵀuᵢ / σᵢ`,
/// `σᵢ² vᵢⱼ²` is `(uᵢ · aⱼ)²`.
fn ranks_via_terms(a: ArrayView2<'_, f64>, dims: usize) -> Vec<f64> {
    let eigen = symmetric_eigen(&a.dot(&a.t()));
    let dims = dims.min(eigen.values.len());
    let projected: Array2<f64> = eigen.vectors.t().dot(&a);
    (0..a.ncols())
        .map(|j| {
            (0..dims)
                .map(|i| projected[[i, j]].powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .collect()
}

/// Summarize with default settings.
pub fn summarize(text: &str, count: usize) -> Result<SummaryResult, InvalidInput> {
    Summarizer::default().summarize(text, count)
}
