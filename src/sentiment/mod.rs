// src/sentiment/mod.rs
//! Lexicon + rules sentiment scorer.
//!
//! Each token gets a valence from the embedded lexicon, adjusted by its
//! context (ALL-CAPS emphasis, preceding boosters and negators, `least`,
//! a contrastive `but`). The sum, amplified by `!`/`?` emphasis, is squashed
//! into the compound score; the per-token valences also give the
//! neg/neu/pos proportions.

pub mod lexicon;

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::InvalidInput;
use lexicon::{booster, is_negation, lexicon, Lexicon};

const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const ALPHA: f64 = 15.0;

pub const POSITIVE_THRESHOLD: f64 = 0.05;
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_compound(compound: f64) -> Self {
        if compound >= POSITIVE_THRESHOLD {
            SentimentLabel::Positive
        } else if compound <= NEGATIVE_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

fn round4<S: Serializer>(v: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64((v * 10_000.0).round() / 10_000.0)
}

/// Scores at full precision; serialized to 4 decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    #[serde(serialize_with = "round4")]
    pub neg: f64,
    #[serde(serialize_with = "round4")]
    pub neu: f64,
    #[serde(serialize_with = "round4")]
    pub pos: f64,
    #[serde(serialize_with = "round4")]
    pub compound: f64,
}

impl SentimentScores {
    pub fn neutral() -> Self {
        Self {
            neg: 0.0,
            neu: 1.0,
            pos: 0.0,
            compound: 0.0,
        }
    }

    pub fn label(&self) -> SentimentLabel {
        SentimentLabel::from_compound(self.compound)
    }
}

#[derive(Debug, Clone)]
struct Token {
    lower: String,
    upper: bool,
}

/// Whitespace tokens with surrounding ASCII punctuation stripped, unless the
/// stripped form is two chars or shorter (keeps `:)`, `:(`).
fn tokenize(text: &str) -> Vec<Token> {
    text.split_whitespace()
        .map(|t| {
            let stripped = t.trim_matches(|c: char| c.is_ascii_punctuation());
            let word = if stripped.chars().count() <= 2 { t } else { stripped };
            Token {
                lower: word.to_lowercase(),
                upper: is_upper(word),
            }
        })
        .collect()
}

// at least one cased char and no lowercase ones
fn is_upper(word: &str) -> bool {
    let mut cased = false;
    for c in word.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// Some but not all tokens are ALL-CAPS.
fn allcap_differential(tokens: &[Token]) -> bool {
    let caps = tokens.iter().filter(|t| t.upper).count();
    caps > 0 && caps < tokens.len()
}

fn punctuation_emphasis(text: &str) -> f64 {
    let bangs = text.matches('!').count().min(4) as f64 * 0.292;
    let questions = match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * 0.18,
        _ => 0.96,
    };
    bangs + questions
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[derive(Debug, Clone, Copy)]
pub struct SentimentAnalyzer {
    lexicon: &'static Lexicon,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    pub fn new() -> Self {
        Self {
            lexicon: lexicon(),
        }
    }

    /// Label and scores for `text`; only blank text is rejected.
    pub fn score(&self, text: &str) -> Result<(SentimentLabel, SentimentScores), InvalidInput> {
        if text.trim().is_empty() {
            return Err(InvalidInput::EmptyText);
        }
        let scores = self.polarity_scores(text);
        Ok((scores.label(), scores))
    }

    pub fn polarity_scores(&self, text: &str) -> SentimentScores {
        let tokens = tokenize(text);
        let valences = self.valences(&tokens);
        if valences.is_empty() {
            return SentimentScores::neutral();
        }

        let emphasis = punctuation_emphasis(text);
        let mut sum: f64 = valences.iter().sum();
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = normalize(sum);

        let (mut pos, mut neg, neu) = sift(&valences);
        if pos > neg.abs() {
            pos += emphasis;
        } else if pos < neg.abs() {
            neg -= emphasis;
        }
        let total = pos + neg.abs() + neu;
        if total <= 0.0 {
            return SentimentScores::neutral();
        }

        SentimentScores {
            neg: (neg / total).abs(),
            neu: (neu / total).abs(),
            pos: (pos / total).abs(),
            compound,
        }
    }

    fn valences(&self, tokens: &[Token]) -> Vec<f64> {
        let cap_diff = allcap_differential(tokens);
        let mut out = Vec::with_capacity(tokens.len());
        for (i, tok) in tokens.iter().enumerate() {
            if booster(&tok.lower).is_some() {
                out.push(0.0);
                continue;
            }
            if tok.lower == "kind" && tokens.get(i + 1).is_some_and(|n| n.lower == "of") {
                out.push(0.0);
                continue;
            }
            out.push(self.token_valence(tokens, i, cap_diff));
        }
        but_check(tokens, &mut out);
        out
    }

    fn token_valence(&self, tokens: &[Token], i: usize, cap_diff: bool) -> f64 {
        let tok = &tokens[i];
        let Some(base) = self.lexicon.valence(&tok.lower) else {
            return 0.0;
        };
        let before = |k: usize| i.checked_sub(k).map(|j| tokens[j].lower.as_str());

        let mut v = base;
        // "no" directly modifying a lexicon word is a negator, not a sentiment
        if tok.lower == "no"
            && tokens
                .get(i + 1)
                .is_some_and(|n| self.lexicon.contains(&n.lower))
        {
            v = 0.0;
        }
        if before(1) == Some("no")
            || before(2) == Some("no")
            || (before(3) == Some("no") && matches!(before(1), Some("or" | "nor")))
        {
            v = base * N_SCALAR;
        }

        if tok.upper && cap_diff {
            v += if v > 0.0 { C_INCR } else { -C_INCR };
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let prev = &tokens[i - (start + 1)];
            if self.lexicon.contains(&prev.lower) {
                continue;
            }
            let mut s = scalar_inc_dec(prev, v, cap_diff);
            if start == 1 {
                s *= 0.95;
            } else if start == 2 {
                s *= 0.9;
            }
            v += s;
            v = negation_check(v, tokens, start, i);
        }

        self.least_check(v, tokens, i)
    }

    // "least good" flips; "at least" / "very least" do not
    fn least_check(&self, v: f64, tokens: &[Token], i: usize) -> f64 {
        if i == 0 || tokens[i - 1].lower != "least" || self.lexicon.contains("least") {
            return v;
        }
        if i == 1 || !matches!(tokens[i - 2].lower.as_str(), "at" | "very") {
            v * N_SCALAR
        } else {
            v
        }
    }
}

fn scalar_inc_dec(word: &Token, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(&word.lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if word.upper && cap_diff {
        scalar += if valence > 0.0 { C_INCR } else { -C_INCR };
    }
    scalar
}

fn negation_check(v: f64, tokens: &[Token], start: usize, i: usize) -> f64 {
    let at = |k: usize| tokens[i - k].lower.as_str();
    let so_this = |w: &str| matches!(w, "so" | "this");
    match start {
        0 if is_negation(at(1)) => v * N_SCALAR,
        1 if at(2) == "never" && so_this(at(1)) => v * 1.25,
        1 if at(2) == "without" && at(1) == "doubt" => v,
        1 if is_negation(at(2)) => v * N_SCALAR,
        2 if at(3) == "never" && (so_this(at(2)) || so_this(at(1))) => v * 1.25,
        2 if at(3) == "without" && (at(2) == "doubt" || at(1) == "doubt") => v,
        2 if is_negation(at(3)) => v * N_SCALAR,
        _ => v,
    }
}

/// Valences before the first `but` are halved, those after it are boosted.
fn but_check(tokens: &[Token], valences: &mut [f64]) {
    let Some(bi) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < bi {
            *v *= 0.5;
        } else if i > bi {
            *v *= 1.5;
        }
    }
}

/// (positive sum, negative sum, neutral count); each scored token is offset
/// by one to weigh against the neutral count.
fn sift(valences: &[f64]) -> (f64, f64, f64) {
    let mut pos = 0.0;
    let mut neg = 0.0;
    let mut neu = 0.0;
    for &v in valences {
        if v > 0.0 {
            pos += v + 1.0;
        } else if v < 0.0 {
            neg += v - 1.0;
        } else {
            neu += 1.0;
        }
    }
    (pos, neg, neu)
}

/// Score with the shared lexicon.
pub fn score(text: &str) -> Result<(SentimentLabel, SentimentScores), InvalidInput> {
    SentimentAnalyzer::new().score(text)
}
