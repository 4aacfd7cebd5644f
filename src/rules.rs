//! Rule-based sentiment scorer — the always-available backend.
//!
//! Single left-to-right pass over light-cleaned tokens with a small phrase
//! lookahead (longest match wins), negation/intensifier state that applies to
//! exactly one following contribution, then corpus-level modifiers (emoji,
//! punctuation runs, all-caps density) read from the original text.
//!
//! Aside from the optional jitter term the scorer is a pure function of its
//! input. Jitter exists for demo variety only, sits behind a seedable source
//! and is disabled by default so tests stay deterministic.

use crate::lexicon;
use crate::model::{SentimentLabel, SentimentResult};
use crate::normalize::NormalizedText;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Mutex;

/// Bound of the demo jitter term.
const JITTER_BOUND: f32 = 0.04;

/// Softening floor for sparse sentiment signal: score is scaled by
/// `0.6 + 0.4 * density`.
const DENSITY_FLOOR: f32 = 0.6;

/// Texts under this many tokens get slightly less weight.
const SHORT_TEXT_TOKENS: usize = 4;
const SHORT_TEXT_FACTOR: f32 = 0.85;

/// Per-run boost for "!!", "??", "..." emphasis, and per-word boost for
/// fully-uppercase words; both capped.
const PUNCT_RUN_BOOST: f32 = 0.05;
const PUNCT_RUN_CAP: usize = 4;
const CAPS_WORD_BOOST: f32 = 0.05;
const CAPS_WORD_CAP: usize = 3;

static EMPHASIS_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!{2,}|\?{2,}|\.{3,}").expect("emphasis regex"));

/// Deterministic LCG so jitter needs no extra dependency and stays seedable.
#[derive(Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform-ish value in [-1.0, 1.0].
    fn next_signed(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        let unit = ((self.0 >> 32) as u32) as f32 / u32::MAX as f32;
        unit * 2.0 - 1.0
    }
}

#[derive(Debug)]
pub struct RuleScorer {
    jitter: Option<Mutex<Lcg>>,
}

impl RuleScorer {
    /// Deterministic scorer; no jitter. This is the configuration the
    /// analyzer uses unless jitter is explicitly enabled.
    pub fn new() -> Self {
        Self { jitter: None }
    }

    /// Scorer with the demo jitter term, seeded for reproducibility.
    pub fn with_jitter(seed: u64) -> Self {
        Self {
            jitter: Some(Mutex::new(Lcg::new(seed))),
        }
    }

    /// Score a normalized text. Wants the light-clean variant: the strict
    /// cleaner would have stripped the punctuation the emphasis signals need.
    pub fn score(&self, normalized: &NormalizedText) -> SentimentResult {
        if normalized.tokens.is_empty() {
            return SentimentResult::neutral();
        }

        let trimmed: Vec<&str> = normalized.tokens.iter().map(|t| trim_token(t)).collect();

        let mut total = 0.0f32;
        let mut hits = 0usize;
        let mut pending_mult = 1.0f32;
        let mut negated = false;

        let mut contribute = |weight: f32, pending_mult: &mut f32, negated: &mut bool| {
            let mut c = weight * *pending_mult;
            if *negated {
                c *= lexicon::NEGATION_FACTOR;
            }
            total += c;
            hits += 1;
            *pending_mult = 1.0;
            *negated = false;
        };

        let mut i = 0;
        while i < trimmed.len() {
            // Multi-word phrases take priority, longest first.
            if let Some((weight, advance)) = match_phrase(&trimmed[i..]) {
                contribute(weight, &mut pending_mult, &mut negated);
                i += advance;
                continue;
            }

            let tok = trimmed[i];
            if let Some(mult) = lexicon::intensifier(tok) {
                pending_mult = (pending_mult * mult).min(lexicon::MAX_INTENSIFIER);
            } else if lexicon::is_negation(tok) {
                negated = true;
            } else if let Some(weight) = lexicon::word_weight(tok) {
                contribute(weight, &mut pending_mult, &mut negated);
            }
            i += 1;
        }

        let token_count = normalized.tokens.len();
        let density = hits as f32 / token_count as f32;

        let mut score = if hits > 0 { total / hits as f32 } else { 0.0 };
        score *= DENSITY_FLOOR + (1.0 - DENSITY_FLOOR) * density.min(1.0);
        if token_count < SHORT_TEXT_TOKENS {
            score *= SHORT_TEXT_FACTOR;
        }

        // Corpus-level signals always read the original text.
        score *= emphasis_boost(&normalized.source);
        score *= caps_boost(&normalized.source);
        score += emoji_adjustment(&normalized.source);

        if let Some(rng) = &self.jitter {
            if let Ok(mut rng) = rng.lock() {
                score += rng.next_signed() * JITTER_BOUND;
            }
        }

        let score = score.clamp(-1.0, 1.0);
        let confidence = confidence_for(score, token_count, density);
        SentimentResult::new(score, SentimentLabel::from_score(score), confidence)
    }
}

impl Default for RuleScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Try a 3-token then 2-token phrase at the head of `toks`.
/// Returns the phrase weight and how many tokens it consumed.
fn match_phrase(toks: &[&str]) -> Option<(f32, usize)> {
    if toks.len() >= 3 {
        let joined = toks[..3].join(" ");
        if let Some(w) = lexicon::phrase_weight(&joined, 3) {
            return Some((w, 3));
        }
    }
    if toks.len() >= 2 {
        let joined = toks[..2].join(" ");
        if let Some(w) = lexicon::phrase_weight(&joined, 2) {
            return Some((w, 2));
        }
    }
    None
}

/// Strip leading/trailing non-alphanumerics so light-clean tokens ("good!!!")
/// still hit the lexicon; interior characters ("it's") are kept.
fn trim_token(token: &str) -> &str {
    token.trim_matches(|c: char| !c.is_alphanumeric())
}

/// Multiplicative boost from repeated terminal punctuation in the original
/// text. Scales magnitude for either sign.
fn emphasis_boost(source: &str) -> f32 {
    let runs = EMPHASIS_RUNS.find_iter(source).count().min(PUNCT_RUN_CAP);
    1.0 + PUNCT_RUN_BOOST * runs as f32
}

/// Multiplicative boost from fully-uppercase words longer than two chars.
fn caps_boost(source: &str) -> f32 {
    let caps = source
        .split_whitespace()
        .filter(|w| is_caps_word(w))
        .count()
        .min(CAPS_WORD_CAP);
    1.0 + CAPS_WORD_BOOST * caps as f32
}

fn is_caps_word(word: &str) -> bool {
    let mut letters = 0;
    for c in word.chars() {
        if c.is_alphabetic() {
            if c.is_lowercase() {
                return false;
            }
            letters += 1;
        }
    }
    letters > 0 && word.chars().count() > 2
}

/// Additive emoji contribution from the original text, capped both ways.
fn emoji_adjustment(source: &str) -> f32 {
    let mut pos = 0i32;
    let mut neg = 0i32;
    for c in source.chars() {
        if lexicon::is_positive_emoji(c) {
            pos += 1;
        } else if lexicon::is_negative_emoji(c) {
            neg += 1;
        }
    }
    ((pos - neg) as f32 * lexicon::EMOJI_INCREMENT).clamp(-lexicon::EMOJI_CAP, lexicon::EMOJI_CAP)
}

/// Banded base confidence from |score|, nudged by length and hit density.
/// The engine never reports full certainty nor below-coin-flip confidence.
fn confidence_for(score: f32, token_count: usize, density: f32) -> f32 {
    let magnitude = score.abs();
    let base = if magnitude >= 0.7 {
        0.85
    } else if magnitude >= 0.45 {
        0.78
    } else if magnitude >= 0.25 {
        0.70
    } else if magnitude >= 0.1 {
        0.62
    } else {
        0.55
    };

    let mut confidence = base + 0.05 * density.min(1.0);
    if token_count >= 8 {
        confidence += 0.03;
    }
    if token_count >= 16 {
        confidence += 0.02;
    }
    confidence.clamp(0.5, 0.95)
}
