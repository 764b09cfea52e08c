// src/extract/scoring.rs
//! Readability-style scoring primitives: boilerplate patterns, tag weights,
//! visible-text collection and link density.

use ego_tree::{NodeId, NodeRef};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::node::Element;
use scraper::{ElementRef, Node, Selector};

use crate::text::collapse_whitespace;

/// Class/id fragments of containers that almost never hold the article.
static UNLIKELY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)-ad-|\bads?\b|advert|agegate|banner|breadcrumb|combx|comment|community|cookie|cover-wrap|disqus|extra|footer|gdpr|header|legends|menu|\bnav|newsletter|pager|pagination|popup|promo|related|remark|replies|rss|share|shoutbox|sidebar|skyscraper|social|sponsor|subscribe|supplemental|yom-remote",
    )
    .expect("unlikely regex")
});

/// Rescues an unlikely match (`article-header`, `main-column`).
static MAYBE_CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)article|body|column|content|main|shadow|story").expect("maybe regex")
});

static POSITIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story")
        .expect("positive regex")
});

static NEGATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)-ad-|hidden|^hid$| hid$| hid |^hid |banner|combx|comment|com-|contact|foot|footnote|gdpr|masthead|media|meta|outbrain|promo|related|scroll|share|shoutbox|sidebar|skyscraper|sponsor|shopping|tags|tool|widget|nav|menu",
    )
    .expect("negative regex")
});

static LI: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("li selector"));
static P: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("p selector"));

/// Elements that never carry article prose.
fn is_ignored_tag(name: &str) -> bool {
    matches!(
        name,
        "head"
            | "script"
            | "style"
            | "noscript"
            | "template"
            | "iframe"
            | "object"
            | "embed"
            | "canvas"
            | "svg"
            | "button"
            | "input"
            | "select"
            | "textarea"
            | "nav"
            | "footer"
            | "aside"
            | "menu"
    )
}

fn is_hidden(el: &Element) -> bool {
    if el.attr("hidden").is_some() || el.attr("aria-hidden") == Some("true") {
        return true;
    }
    if matches!(
        el.attr("role"),
        Some("navigation" | "complementary" | "contentinfo" | "banner" | "dialog")
    ) {
        return true;
    }
    el.attr("style").is_some_and(|s| {
        let s = s.to_ascii_lowercase().replace(' ', "");
        s.contains("display:none") || s.contains("visibility:hidden")
    })
}

fn is_unlikely(el: &Element) -> bool {
    if matches!(el.name(), "html" | "body" | "article" | "main") {
        return false;
    }
    let class_id = format!("{} {}", el.attr("class").unwrap_or(""), el.id().unwrap_or(""));
    if class_id.trim().is_empty() {
        return false;
    }
    UNLIKELY.is_match(&class_id) && !MAYBE_CANDIDATE.is_match(&class_id)
}

/// Which subtrees a pass drops from scoring and from the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pruning {
    /// Ignored tags, hidden nodes, paragraph-free forms and unlikely class/id containers.
    Strict,
    /// Ignored tags and hidden nodes only.
    Lenient,
}

impl Pruning {
    pub(crate) fn skips(self, el: ElementRef<'_>) -> bool {
        let value = el.value();
        if is_ignored_tag(value.name()) || is_hidden(value) {
            return true;
        }
        match self {
            Pruning::Strict => {
                is_unlikely(value) || (value.name() == "form" && el.select(&P).next().is_none())
            }
            Pruning::Lenient => false,
        }
    }
}

pub(crate) fn is_block(name: &str) -> bool {
    matches!(
        name,
        "address"
            | "article"
            | "blockquote"
            | "dd"
            | "details"
            | "div"
            | "dl"
            | "dt"
            | "figcaption"
            | "figure"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "summary"
            | "table"
            | "td"
            | "th"
            | "tr"
            | "ul"
    )
}

/// Base score of a container by tag name.
pub(crate) fn tag_score(name: &str) -> f64 {
    match name {
        "article" => 10.0,
        "div" | "main" => 5.0,
        "section" | "pre" | "td" | "blockquote" => 3.0,
        "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" | "form" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" => -5.0,
        _ => 0.0,
    }
}

/// +25 / -25 for each of class and id hitting the positive / negative pattern.
pub(crate) fn class_weight(el: &Element) -> f64 {
    let mut weight = 0.0;
    for value in [el.attr("class"), el.id()].into_iter().flatten() {
        if NEGATIVE.is_match(value) {
            weight -= 25.0;
        }
        if POSITIVE.is_match(value) {
            weight += 25.0;
        }
    }
    weight
}

/// Paragraph-like nodes feed their score to their ancestors. `div`, `td`,
/// `section` and `blockquote` only count when they hold no block children.
pub(crate) fn is_paragraph_like(el: ElementRef<'_>) -> bool {
    match el.value().name() {
        "p" | "pre" => true,
        "div" | "section" | "td" | "blockquote" => !el
            .children()
            .filter_map(ElementRef::wrap)
            .any(|c| is_block(c.value().name()) || c.value().name() == "img"),
        _ => false,
    }
}

/// Content score of a single paragraph of `text`.
pub(crate) fn paragraph_score(text: &str) -> f64 {
    let commas = text.matches(',').count() as f64;
    let len = text.chars().count() as f64;
    1.0 + commas + (len / 100.0).floor().min(3.0)
}

/// Append the visible text under `node` to `out`. Pruned subtrees and the
/// nodes in `exclude` contribute nothing. Block boundaries become `\n`;
/// line breaks inside text nodes and `<br>` become spaces.
pub(crate) fn collect_text(
    node: NodeRef<'_, Node>,
    out: &mut String,
    exclude: &[NodeId],
    pruning: Pruning,
) {
    for child in node.children() {
        match child.value() {
            Node::Text(t) => out.extend(t.chars().map(|c| match c {
                '\n' | '\r' => ' ',
                c => c,
            })),
            Node::Element(el) => {
                let Some(el_ref) = ElementRef::wrap(child) else {
                    continue;
                };
                if exclude.contains(&child.id()) || pruning.skips(el_ref) {
                    continue;
                }
                if el.name() == "br" {
                    out.push(' ');
                    continue;
                }
                let block = is_block(el.name());
                if block {
                    out.push('\n');
                }
                collect_text(child, out, exclude, pruning);
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Collapsed single-line visible text of an element.
pub(crate) fn visible_text(el: ElementRef<'_>, pruning: Pruning) -> String {
    let mut raw = String::new();
    collect_text(*el, &mut raw, &[], pruning);
    collapse_whitespace(&raw)
}

fn link_chars(node: NodeRef<'_, Node>, pruning: Pruning) -> usize {
    let mut total = 0;
    for child in node.children() {
        if let Some(el) = ElementRef::wrap(child) {
            if pruning.skips(el) {
                continue;
            }
            if el.value().name() == "a" {
                total += visible_text(el, pruning).chars().count();
            } else {
                total += link_chars(child, pruning);
            }
        }
    }
    total
}

/// Share of the element's visible text that sits inside links.
pub(crate) fn link_density(el: ElementRef<'_>, pruning: Pruning) -> f64 {
    let text_len = visible_text(el, pruning).chars().count();
    if text_len == 0 {
        return 0.0;
    }
    (link_chars(*el, pruning) as f64 / text_len as f64).min(1.0)
}

/// Menus and link lists: more list items than paragraphs, all of them short.
pub(crate) fn is_list_dominated(el: ElementRef<'_>, pruning: Pruning) -> bool {
    let items: Vec<usize> = el
        .select(&LI)
        .map(|li| visible_text(li, pruning).chars().count())
        .collect();
    let paragraphs = el.select(&P).count();
    if items.len() < 3 || items.len() <= paragraphs {
        return false;
    }
    let avg = items.iter().sum::<usize>() as f64 / items.len() as f64;
    avg < 40.0
}
