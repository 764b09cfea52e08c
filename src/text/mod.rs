// src/text/mod.rs
//! Text primitives shared by the extractor and the summarizer.

pub mod normalize;
pub mod sentences;

pub use normalize::{collapse_whitespace, normalize_blocks, normalize_text};
pub use sentences::{split_sentences, Sentence};
