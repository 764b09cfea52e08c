// src/text/sentences.rs
//! Sentence boundary detection for English prose.
//!
//! A candidate boundary is a run of terminal punctuation (`.`, `!`, `?`, `…`),
//! optionally followed by closing quotes/brackets, then whitespace. It is
//! rejected when:
//! - there is no whitespace after it (`3.14`, `U.S.A`, `e.g.,`)
//! - the next word starts lowercase (`"Stop!" she said.`, `e.g. apples`)
//! - the dot ends a title or a single initial (`Dr. Smith`, `J. R. Tolkien`)
//! - the dot ends a dotted acronym or a general abbreviation (`U.S.`, `Inc.`)
//!   and the next word is not a typical sentence opener
//!
//! A blank line always ends a sentence.

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// One sentence of the source text, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sentence {
    /// 0-based position among the kept sentences.
    pub index: usize,
    pub text: String,
    /// Byte span in the source text.
    pub start: usize,
    pub end: usize,
}

/// Abbreviations that are followed by a name, never by a new sentence.
static TITLES: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "mr", "mrs", "ms", "dr", "prof", "st", "sr", "jr", "gen", "gov", "sen", "rep", "rev",
        "capt", "col", "lt", "sgt", "cmdr", "adm", "maj", "mt", "ft", "hon", "pres", "supt",
        "messrs", "mme", "mlle", "vol", "fig",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations that may also end a sentence.
static GENERAL: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "etc", "inc", "ltd", "co", "corp", "vs", "approx", "dept", "est", "jan", "feb", "mar",
        "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec", "al", "cf", "ca", "llc",
        "plc", "univ", "assn", "bros", "ave", "blvd", "rd", "hwy",
    ]
    .into_iter()
    .collect()
});

/// Words that commonly open a sentence; used to resolve `U.S. The ...`.
static OPENERS: Lazy<FxHashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "in", "it", "its", "he", "she", "they", "we", "i", "you", "but",
        "this", "that", "these", "those", "there", "his", "her", "their", "our", "my", "however",
        "meanwhile", "after", "before", "when", "while", "if", "as", "on", "at", "for", "and",
        "so", "yet", "still", "then", "now", "what", "why", "how", "who", "one", "some", "many",
        "most", "all", "no", "not", "officials", "critics", "analysts",
    ]
    .into_iter()
    .collect()
});

#[inline]
fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

#[inline]
fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{00BB}')
}

/// Split `text` into sentences. Empty or punctuation-only pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let n = chars.len();
    let byte_at = |i: usize| if i < n { chars[i].0 } else { text.len() };

    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < n {
        let c = chars[i].1;

        if c.is_whitespace() {
            let (j, newlines) = skip_whitespace(&chars, i);
            if newlines >= 2 {
                spans.push((byte_at(start), byte_at(i)));
                start = j;
            }
            i = j;
            continue;
        }

        if !is_terminal(c) {
            i += 1;
            continue;
        }

        let punct_start = i;
        let mut j = i;
        while j < n && is_terminal(chars[j].1) {
            j += 1;
        }
        let punct_end = j;
        while j < n && is_closing(chars[j].1) {
            j += 1;
        }
        let close_end = j;

        if j < n && !chars[j].1.is_whitespace() {
            i = j;
            continue;
        }
        let (next, newlines) = skip_whitespace(&chars, j);
        if next >= n {
            break;
        }

        if newlines >= 2 || is_boundary(&chars, start, punct_start, punct_end, next) {
            spans.push((byte_at(start), byte_at(close_end)));
            start = next;
        }
        i = next;
    }
    if start < n {
        spans.push((byte_at(start), text.len()));
    }

    spans
        .into_iter()
        .filter_map(|(s, e)| {
            let raw = &text[s..e];
            let trimmed = raw.trim();
            if !trimmed.chars().any(char::is_alphanumeric) {
                return None;
            }
            let lead = raw.len() - raw.trim_start().len();
            Some((s + lead, s + lead + trimmed.len(), trimmed.to_string()))
        })
        .enumerate()
        .map(|(index, (start, end, text))| Sentence {
            index,
            text,
            start,
            end,
        })
        .collect()
}

/// Returns the index of the next non-whitespace char and how many newlines were skipped.
fn skip_whitespace(chars: &[(usize, char)], mut i: usize) -> (usize, usize) {
    let mut newlines = 0;
    while i < chars.len() && chars[i].1.is_whitespace() {
        if chars[i].1 == '\n' {
            newlines += 1;
        }
        i += 1;
    }
    (i, newlines)
}

fn is_boundary(
    chars: &[(usize, char)],
    sentence_start: usize,
    punct_start: usize,
    punct_end: usize,
    next: usize,
) -> bool {
    let next_word = word_from(chars, next);
    let Some(first) = next_word.chars().find(|c| c.is_alphanumeric()) else {
        return true;
    };
    if first.is_lowercase() {
        return false;
    }

    // Only a single dot can be an abbreviation; `!`, `?` and ellipses end here.
    if !(punct_end - punct_start == 1 && chars[punct_start].1 == '.') {
        return true;
    }

    let prev = word_before(chars, sentence_start, punct_start);
    let prev_lower = prev.to_lowercase();
    if TITLES.contains(prev_lower.as_str()) || is_initial(&prev) {
        return false;
    }
    if prev_lower.contains('.') || GENERAL.contains(prev_lower.as_str()) {
        let opener = next_word
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase();
        return OPENERS.contains(opener.as_str());
    }
    true
}

/// The token that ends right before `end`, stripped of opening quotes/brackets.
fn word_before(chars: &[(usize, char)], floor: usize, end: usize) -> String {
    let mut s = end;
    while s > floor && !chars[s - 1].1.is_whitespace() {
        s -= 1;
    }
    chars[s..end]
        .iter()
        .map(|&(_, c)| c)
        .skip_while(|c| !c.is_alphanumeric())
        .collect()
}

fn word_from(chars: &[(usize, char)], start: usize) -> String {
    chars[start..]
        .iter()
        .map(|&(_, c)| c)
        .take_while(|c| !c.is_whitespace())
        .collect()
}

fn is_initial(word: &str) -> bool {
    let mut it = word.chars();
    matches!((it.next(), it.next()), (Some(c), None) if c.is_uppercase())
}
