// src/extract/title.rs
//! Title resolution: region heading, trimmed `<title>`, `og:title`, first heading.

use ego_tree::NodeId;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use super::scoring::{visible_text, Pruning};
use crate::text::normalize_text;

static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("h1 selector"));
static H1_H2: Lazy<Selector> = Lazy::new(|| Selector::parse("h1, h2").expect("heading selector"));
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").expect("title selector"));
static OG_TITLE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[property="og:title"], meta[name="twitter:title"]"#)
        .expect("og:title selector")
});

/// Site-name separators, tried in order.
const DELIMITERS: [&str; 6] = [" | ", " - ", " \u{2013} ", " \u{2014} ", " :: ", " / "];

/// Resolved title plus the heading nodes inside the region that repeat it
/// (they are dropped from the body text).
#[derive(Debug, Clone)]
pub(crate) struct ResolvedTitle {
    pub text: String,
    pub headings: Vec<NodeId>,
}

pub(crate) fn resolve(doc: &Html, region: &[ElementRef<'_>]) -> ResolvedTitle {
    let region_h1 = region
        .iter()
        .flat_map(|el| {
            let own = (el.value().name() == "h1").then_some(*el);
            own.into_iter().chain(el.select(&H1))
        })
        .map(|h| (h, visible_text(h, Pruning::Lenient)))
        .find(|(_, t)| !t.is_empty());

    let text = if let Some((_, t)) = &region_h1 {
        t.clone()
    } else if let Some(t) = page_title(doc) {
        t
    } else if let Some(t) = og_title(doc) {
        t
    } else {
        doc.select(&H1_H2)
            .map(|h| visible_text(h, Pruning::Lenient))
            .find(|t| !t.is_empty())
            .unwrap_or_default()
    };

    let headings = if text.is_empty() {
        Vec::new()
    } else {
        region
            .iter()
            .flat_map(|el| {
                let own = matches!(el.value().name(), "h1" | "h2").then_some(*el);
                own.into_iter().chain(el.select(&H1_H2))
            })
            .filter(|h| visible_text(*h, Pruning::Lenient).eq_ignore_ascii_case(&text))
            .map(|h| h.id())
            .collect()
    };

    ResolvedTitle { text, headings }
}

fn page_title(doc: &Html) -> Option<String> {
    let raw = doc.select(&TITLE).next()?.text().collect::<String>();
    let t = short_title(&raw);
    (!t.is_empty()).then_some(t)
}

fn og_title(doc: &Html) -> Option<String> {
    doc.select(&OG_TITLE)
        .filter_map(|m| m.value().attr("content"))
        .map(normalize_text)
        .find(|t| !t.is_empty())
}

/// Trim site-name prefixes/suffixes from a `<title>`.
///
/// Keeps the first or last delimiter-separated part when it has at least four
/// words; otherwise falls back to the text after `: `. Results outside 16..150
/// chars are rejected in favour of the full title.
pub fn short_title(raw: &str) -> String {
    let orig = normalize_text(raw);
    let mut title = orig.clone();
    let mut matched = false;

    for delim in DELIMITERS {
        if !orig.contains(delim) {
            continue;
        }
        let parts: Vec<&str> = orig.split(delim).collect();
        let first = parts[0];
        let last = parts[parts.len() - 1];
        if first.split_whitespace().count() >= 4 {
            title = first.to_string();
            matched = true;
            break;
        }
        if last.split_whitespace().count() >= 4 {
            title = last.to_string();
            matched = true;
            break;
        }
    }

    if !matched {
        if let Some((_, rest)) = orig.split_once(": ") {
            let last = orig.rsplit(": ").next().unwrap_or(rest);
            title = if last.split_whitespace().count() >= 4 {
                last.to_string()
            } else {
                rest.to_string()
            };
        }
    }

    let len = title.chars().count();
    if len <= 15 || len >= 150 {
        return orig;
    }
    title.trim().to_string()
}
