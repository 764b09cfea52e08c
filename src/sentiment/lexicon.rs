// src/sentiment/lexicon.rs
//! Embedded valence lexicon plus the fixed booster and negation word lists.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Word (lower-case) → valence in -4..=4.
#[derive(Debug)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

static LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    let raw = include_str!("../../sentiment_lexicon.json");
    let valences =
        serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon");
    Lexicon { valences }
});

/// Process-wide lexicon, parsed on first use.
pub fn lexicon() -> &'static Lexicon {
    &LEXICON
}

impl Lexicon {
    #[inline]
    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.valences.contains_key(word)
    }
}

pub(crate) const B_INCR: f64 = 0.293;
pub(crate) const B_DECR: f64 = -0.293;

/// Intensity shift of a booster/dampener word (lower-case).
pub(crate) fn booster(word: &str) -> Option<f64> {
    match word {
        "absolutely" | "amazingly" | "awfully" | "completely" | "considerable"
        | "considerably" | "decidedly" | "deeply" | "effing" | "enormous" | "enormously"
        | "entirely" | "especially" | "exceptional" | "exceptionally" | "extreme"
        | "extremely" | "fabulously" | "flipping" | "flippin" | "frackin" | "fracking"
        | "fricking" | "frickin" | "frigging" | "friggin" | "fully" | "greatly" | "hella"
        | "highly" | "hugely" | "incredible" | "incredibly" | "intensely" | "major"
        | "majorly" | "more" | "most" | "particularly" | "purely" | "quite" | "really"
        | "remarkably" | "so" | "substantially" | "thoroughly" | "total" | "totally"
        | "tremendous" | "tremendously" | "uber" | "unbelievably" | "unusually" | "utter"
        | "utterly" | "very" => Some(B_INCR),
        "almost" | "barely" | "hardly" | "kinda" | "kindof" | "kind-of" | "less" | "little"
        | "marginal" | "marginally" | "occasional" | "occasionally" | "partly" | "scarce"
        | "scarcely" | "slight" | "slightly" | "somewhat" | "sorta" | "sortof" | "sort-of" => {
            Some(B_DECR)
        }
        _ => None,
    }
}

/// Negators (lower-case); any `n't` contraction also counts.
pub(crate) fn is_negation(word: &str) -> bool {
    matches!(
        word,
        "aint"
            | "arent"
            | "cannot"
            | "cant"
            | "couldnt"
            | "darent"
            | "didnt"
            | "doesnt"
            | "dont"
            | "hadnt"
            | "hasnt"
            | "havent"
            | "isnt"
            | "mightnt"
            | "mustnt"
            | "neither"
            | "neednt"
            | "never"
            | "none"
            | "nope"
            | "nor"
            | "not"
            | "nothing"
            | "nowhere"
            | "oughtnt"
            | "shant"
            | "shouldnt"
            | "uhuh"
            | "uh-uh"
            | "wasnt"
            | "werent"
            | "without"
            | "wont"
            | "wouldnt"
            | "rarely"
            | "seldom"
            | "despite"
    ) || word.contains("n't")
}
