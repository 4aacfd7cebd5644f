//! Short-text admission policy.
//!
//! Very short comments are usually noise, but not always: "ok", "fire", a
//! lone emoji or "!!!" all carry real signal. This gate decides which short
//! texts reach the scorer and which get the fixed neutral result. The
//! allow-list membership is exact and case-insensitive; changing it changes
//! which stored comments ever receive a non-neutral score.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Curated short expressions that are meaningful despite their length.
const MEANINGFUL_SHORT: &[&str] = &[
    // Basic responses
    "ok", "okay", "yes", "no", "nah", "yep", "yup", "nope",
    // Reactions
    "wow", "omg", "wtf", "lol", "lmao", "rofl", "haha", "hehe",
    "yay", "ugh", "meh", "hmm", "ooh", "ahh", "eww", "oof",
    // Social media
    "rip", "smh", "tbh", "ngl", "fr", "bet", "cap", "sus",
    // Emotions
    "sad", "mad", "bad", "good", "nice", "cool", "hot", "cute",
    // Slang
    "lit", "fire", "sick", "dope", "mid", "trash", "vibe", "mood",
];

static ALLOW_LIST: Lazy<HashSet<&'static str>> =
    Lazy::new(|| MEANINGFUL_SHORT.iter().copied().collect());

/// Broad emoji class: symbols, ZWJ/VS-16/keycap combiners, the general
/// symbol blocks and the emoji planes.
static EMOJI_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{So}\u{200D}\u{FE0F}\u{20E3}\u{2030}-\u{2BFF}\u{1F000}-\u{1FAFF}]")
        .expect("emoji class regex")
});

/// Runs of terminal punctuation like "!!" or "???" or "...." are meaningful
/// reactions on their own.
static PUNCT_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[!?.,]{2,}$").expect("punctuation pattern regex"));

pub fn contains_emoji(text: &str) -> bool {
    EMOJI_RE.is_match(text)
}

/// True when `text` should be rejected to the fixed neutral result without
/// invoking the scorer.
pub fn is_too_short(text: &str) -> bool {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return true;
    }

    if contains_emoji(trimmed) {
        return false;
    }

    if ALLOW_LIST.contains(trimmed.to_lowercase().as_str()) {
        return false;
    }

    if PUNCT_ONLY_RE.is_match(trimmed) {
        return false;
    }

    trimmed.chars().count() < 2
}
