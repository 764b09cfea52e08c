// src/summarize/stopwords.rs
//! English stop-word set used when building the term matrix.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use stop_words::{get, LANGUAGE};

static ENGLISH: Lazy<FxHashSet<String>> =
    Lazy::new(|| get(LANGUAGE::English).iter().map(|s| s.to_string()).collect());

/// Process-wide English stop-word list (lower-case).
pub fn english() -> &'static FxHashSet<String> {
    &ENGLISH
}
