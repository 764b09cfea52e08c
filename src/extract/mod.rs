// src/extract/mod.rs
//! Content extractor: isolates the article title and body text from raw HTML.
//!
//! Order:
//! 1) Paragraph-like nodes outside boilerplate subtrees are scored
//!    (`1 + commas + min(len/100, 3)`) and the score flows to up to three
//!    ancestors (full, 1/2, 1/6).
//! 2) Ancestors start from a tag score plus a class/id weight; the final score
//!    is scaled by `1 - link density` and halved for short-item lists.
//! 3) The best candidate is merged with qualifying siblings into the region.
//! 4) Title is resolved, the region text collected and normalized, one
//!    paragraph per block.
//!
//! A strict pass also prunes unlikely class/id containers. When it finds no
//! candidate or too short a body, a lenient pass retries without them.

pub mod scoring;
pub mod title;

use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::ExtractionError;
use crate::text::normalize_blocks;
use scoring::{
    class_weight, collect_text, is_list_dominated, is_paragraph_like, link_density,
    paragraph_score, tag_score, visible_text, Pruning,
};

pub use title::short_title;

/// Title and plain-text body of one article. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub body_text: String,
}

fn default_min_body_chars() -> usize {
    200
}
fn default_min_paragraph_chars() -> usize {
    25
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Bodies shorter than this (in chars) are rejected.
    pub min_body_chars: usize,
    /// Paragraphs shorter than this do not contribute to candidate scores.
    pub min_paragraph_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            min_body_chars: default_min_body_chars(),
            min_paragraph_chars: default_min_paragraph_chars(),
        }
    }
}

impl ExtractorConfig {
    pub fn sanitized(mut self) -> Self {
        if self.min_body_chars == 0 {
            self.min_body_chars = default_min_body_chars();
        }
        if self.min_paragraph_chars == 0 {
            self.min_paragraph_chars = default_min_paragraph_chars();
        }
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate<'a> {
    el: ElementRef<'a>,
    score: f64,
}

#[derive(Debug, Clone, Default)]
pub struct Extractor {
    cfg: ExtractorConfig,
}

impl Extractor {
    pub fn new(cfg: ExtractorConfig) -> Self {
        Self {
            cfg: cfg.sanitized(),
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.cfg
    }

    pub fn extract(&self, html: &str) -> Result<ExtractedArticle, ExtractionError> {
        if html.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }
        let doc = Html::parse_document(html);

        match self.extract_pass(&doc, Pruning::Strict) {
            Err(err @ (ExtractionError::NoCandidate | ExtractionError::BodyTooShort { .. })) => {
                debug!(%err, "strict pass failed, retrying leniently");
                self.extract_pass(&doc, Pruning::Lenient)
            }
            done => done,
        }
    }

    fn extract_pass(&self, doc: &Html, pruning: Pruning) -> Result<ExtractedArticle, ExtractionError> {
        let candidates = self.score_candidates(*doc.root_element(), pruning);
        let top = candidates
            .iter()
            .copied()
            .fold(None::<Candidate>, |best, c| match best {
                Some(b) if b.score >= c.score => Some(b),
                _ => Some(c),
            })
            .ok_or(ExtractionError::NoCandidate)?;

        let region = merge_siblings(top, &candidates, pruning);
        let title = title::resolve(doc, &region);

        let mut raw = String::new();
        for el in &region {
            collect_text(**el, &mut raw, &title.headings, pruning);
            raw.push('\n');
        }
        let body_text = normalize_blocks(&raw);

        let len = body_text.chars().count();
        debug!(
            ?pruning,
            candidates = candidates.len(),
            top_tag = top.el.value().name(),
            top_score = top.score,
            region = region.len(),
            body_chars = len,
            "extraction scored"
        );
        if len < self.cfg.min_body_chars {
            return Err(ExtractionError::BodyTooShort {
                len,
                min: self.cfg.min_body_chars,
            });
        }

        Ok(ExtractedArticle {
            title: title.text,
            body_text,
        })
    }

    /// Score every ancestor of a qualifying paragraph. Candidates keep the
    /// order in which they were first reached (document order).
    fn score_candidates<'a>(
        &self,
        root: NodeRef<'a, Node>,
        pruning: Pruning,
    ) -> Vec<Candidate<'a>> {
        let mut paragraphs = Vec::new();
        gather_paragraphs(root, &mut paragraphs, pruning);

        let mut candidates: Vec<Candidate<'a>> = Vec::new();
        let mut index = HashMap::new();

        for p in paragraphs {
            let text = visible_text(p, pruning);
            if text.chars().count() < self.cfg.min_paragraph_chars {
                continue;
            }
            let content = paragraph_score(&text);

            let ancestors = p
                .ancestors()
                .filter_map(ElementRef::wrap)
                .take_while(|a| a.value().name() != "html")
                .take(3);
            for (level, ancestor) in ancestors.enumerate() {
                let slot = *index.entry(ancestor.id()).or_insert_with(|| {
                    let el = ancestor.value();
                    candidates.push(Candidate {
                        el: ancestor,
                        score: tag_score(el.name()) + class_weight(el),
                    });
                    candidates.len() - 1
                });
                let divider = match level {
                    0 => 1.0,
                    1 => 2.0,
                    n => n as f64 * 3.0,
                };
                candidates[slot].score += content / divider;
            }
        }

        for c in &mut candidates {
            c.score *= 1.0 - link_density(c.el, pruning);
            if is_list_dominated(c.el, pruning) {
                c.score *= 0.5;
            }
        }
        candidates
    }
}

fn gather_paragraphs<'a>(
    node: NodeRef<'a, Node>,
    out: &mut Vec<ElementRef<'a>>,
    pruning: Pruning,
) {
    for child in node.children() {
        let Some(el) = ElementRef::wrap(child) else {
            continue;
        };
        if pruning.skips(el) {
            continue;
        }
        if is_paragraph_like(el) {
            out.push(el);
        }
        gather_paragraphs(child, out, pruning);
    }
}

/// The top candidate plus siblings that look like more of the same article.
fn merge_siblings<'a>(
    top: Candidate<'a>,
    candidates: &[Candidate<'a>],
    pruning: Pruning,
) -> Vec<ElementRef<'a>> {
    let Some(parent) = top.el.parent() else {
        return vec![top.el];
    };
    let threshold = (top.score * 0.2).max(10.0);
    let top_class = top.el.value().attr("class").unwrap_or("");

    let mut region = Vec::new();
    for sibling in parent.children().filter_map(ElementRef::wrap) {
        if sibling.id() == top.el.id() {
            region.push(sibling);
            continue;
        }
        if pruning.skips(sibling) {
            continue;
        }

        let bonus = if !top_class.is_empty() && sibling.value().attr("class") == Some(top_class) {
            top.score * 0.2
        } else {
            0.0
        };
        let scored = candidates
            .iter()
            .find(|c| c.el.id() == sibling.id())
            .is_some_and(|c| c.score + bonus >= threshold);

        let keep = scored
            || (sibling.value().name() == "p" && {
                let text = visible_text(sibling, pruning);
                let len = text.chars().count();
                let ld = link_density(sibling, pruning);
                (len > 80 && ld < 0.25)
                    || (len < 80 && ld == 0.0 && (text.contains(". ") || text.ends_with('.')))
            });
        if keep {
            region.push(sibling);
        }
    }
    region
}

/// Extract with default settings.
pub fn extract(html: &str) -> Result<ExtractedArticle, ExtractionError> {
    Extractor::default().extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARA: &str = "The committee reviewed the proposal in detail, weighing costs, \
        benefits and the long-term effects on the regional economy before voting.";

    fn page(body: &str) -> String {
        format!("<html><head><title>Council Approves Budget After Long Debate | Daily</title></head><body>{body}</body></html>")
    }

    #[test]
    fn picks_article_over_boilerplate() {
        let html = page(&format!(
            r#"<div class="site-header"><a href="/">Home</a> <a href="/news">News</a></div>
               <div id="content"><h1>Council Approves Budget</h1><p>{PARA}</p><p>{PARA}</p><p>{PARA}</p></div>
               <div class="sidebar"><p>Subscribe today for unlimited access to every story, every day.</p></div>
               <div class="comments"><p>Great article, thanks for writing this, really enjoyed it!</p></div>"#
        ));
        let a = extract(&html).unwrap();
        assert_eq!(a.title, "Council Approves Budget");
        assert!(a.body_text.starts_with("The committee reviewed"));
        assert!(!a.body_text.contains("Council Approves Budget"));
        assert!(!a.body_text.contains("Subscribe"));
        assert!(!a.body_text.contains("Great article"));
        assert!(!a.body_text.contains("Home"));
    }

    #[test]
    fn title_falls_back_to_trimmed_page_title() {
        let html = page(&format!("<div><p>{PARA}</p><p>{PARA}</p></div>"));
        let a = extract(&html).unwrap();
        assert_eq!(a.title, "Council Approves Budget After Long Debate");
    }

    #[test]
    fn scripts_and_styles_never_leak() {
        let html = page(&format!(
            "<article><style>p {{ color: red }}</style><p>{PARA}</p><script>track('x')</script><p>{PARA}</p></article>"
        ));
        let a = extract(&html).unwrap();
        assert!(!a.body_text.contains("track"));
        assert!(!a.body_text.contains("color"));
    }

    #[test]
    fn link_heavy_blocks_lose_to_prose() {
        let links: String = (0..12)
            .map(|i| format!(r#"<p><a href="/s/{i}">Another very long related story headline number {i} here</a></p>"#))
            .collect();
        let html = page(&format!(
            "<div class=\"x\">{links}</div><div class=\"y\"><p>{PARA}</p><p>{PARA}</p><p>{PARA}</p></div>"
        ));
        let a = extract(&html).unwrap();
        assert!(a.body_text.contains("committee"));
        assert!(!a.body_text.contains("related story"));
    }

    #[test]
    fn empty_and_contentless_documents_fail() {
        assert_eq!(extract("   "), Err(ExtractionError::EmptyDocument));
        assert_eq!(
            extract("<html><body><nav>Home News Sport</nav></body></html>"),
            Err(ExtractionError::NoCandidate)
        );
    }

    #[test]
    fn short_body_is_a_typed_error() {
        let html = page("<div><p>Only a single short paragraph of text.</p></div>");
        match extract(&html) {
            Err(ExtractionError::BodyTooShort { len, min }) => {
                assert!(len < min);
                assert_eq!(min, 200);
            }
            other => panic!("expected BodyTooShort, got {other:?}"),
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = page(&format!("<main><p>{PARA}</p><p>{PARA}</p></main>"));
        assert_eq!(extract(&html), extract(&html));
    }

    #[test]
    fn subheadings_stay_separate_paragraphs() {
        let html = page(&format!(
            "<article><p>{PARA}</p><h2>What happens next</h2><p>{PARA}</p></article>"
        ));
        let a = extract(&html).unwrap();
        let blocks: Vec<&str> = a.body_text.split("\n\n").collect();
        assert_eq!(blocks.len(), 3, "{:?}", a.body_text);
        assert_eq!(blocks[1], "What happens next");

        let sentences = crate::text::split_sentences(&a.body_text);
        assert!(sentences.iter().any(|s| s.text == "What happens next"));
    }

    #[test]
    fn unlikely_page_wrapper_is_retried_leniently() {
        let html = page(&format!(
            r#"<div id="page" class="layout with-sidebar"><div class="story"><p>{PARA}</p><p>{PARA}</p></div></div>"#
        ));
        let a = extract(&html).unwrap();
        assert!(a.body_text.starts_with("The committee reviewed"));
    }
}
