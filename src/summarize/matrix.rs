// src/summarize/matrix.rs
//! Term–sentence matrix: rows are distinct terms in first-seen order, columns
//! are sentences.

use ndarray::Array2;
use rustc_hash::{FxHashMap, FxHashSet};

/// Lower-cased alphabetic terms of `sentence`, stop-words and single letters removed.
pub(crate) fn terms(sentence: &str, stopwords: &FxHashSet<String>) -> Vec<String> {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= 2 && t.chars().all(char::is_alphabetic))
        .map(str::to_lowercase)
        .filter(|t| !stopwords.contains(t))
        .collect()
}

#[derive(Debug, Clone)]
pub(crate) struct TermMatrix {
    pub terms: Vec<String>,
    pub weights: Array2<f64>,
}

impl TermMatrix {
    /// `smoothing + (1 - smoothing) * tf / max_tf` for every term present in a
    /// sentence, zero elsewhere. With `isf`, each row is further scaled by
    /// `1 + ln(n / df)`.
    pub fn build(sentences: &[Vec<String>], smoothing: f64, isf: bool) -> Self {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut terms = Vec::new();
        for t in sentences.iter().flatten() {
            index.entry(t.as_str()).or_insert_with(|| {
                terms.push(t.clone());
                terms.len() - 1
            });
        }

        let mut weights = Array2::<f64>::zeros((terms.len(), sentences.len()));
        for (col, words) in sentences.iter().enumerate() {
            for w in words {
                weights[[index[w.as_str()], col]] += 1.0;
            }
            let max_tf = weights.column(col).fold(0.0_f64, |m, &v| m.max(v));
            if max_tf > 0.0 {
                weights.column_mut(col).mapv_inplace(|tf| {
                    if tf > 0.0 {
                        smoothing + (1.0 - smoothing) * tf / max_tf
                    } else {
                        0.0
                    }
                });
            }
        }

        if isf && !sentences.is_empty() {
            let n = sentences.len() as f64;
            for mut row in weights.rows_mut() {
                let df = row.iter().filter(|&&v| v > 0.0).count() as f64;
                if df > 0.0 {
                    let factor = 1.0 + (n / df).ln();
                    row.mapv_inplace(|v| v * factor);
                }
            }
        }

        Self { terms, weights }
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}
