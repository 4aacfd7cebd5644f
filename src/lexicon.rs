//! Static lexicon tables for the rule-based scorer.
//!
//! Plain data, no behavior beyond lookups. All membership is lowercase; the
//! scorer strips leading/trailing punctuation from tokens before lookup so
//! the light-clean tokenizer (which keeps punctuation) still hits the tables.
//!
//! Tier base magnitudes are fixed: strong 0.8, moderate 0.5, weak 0.25,
//! slang 0.7, abbreviation 0.4. Phrases carry their own weights and win over
//! single-token matches (longest match first).

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

pub const STRONG_WEIGHT: f32 = 0.8;
pub const MODERATE_WEIGHT: f32 = 0.5;
pub const WEAK_WEIGHT: f32 = 0.25;
pub const SLANG_WEIGHT: f32 = 0.7;
pub const ABBREV_WEIGHT: f32 = 0.4;

/// Sign flip + damping applied by a pending negation: "not good" is bad,
/// but not as bad as "bad".
pub const NEGATION_FACTOR: f32 = -0.8;

/// Compounded intensifier multipliers are capped here.
pub const MAX_INTENSIFIER: f32 = 2.5;

/// Per-emoji score increment; the total emoji contribution is capped at
/// `EMOJI_CAP` in either direction.
pub const EMOJI_INCREMENT: f32 = 0.1;
pub const EMOJI_CAP: f32 = 0.3;

const STRONG_POSITIVE: &[&str] = &[
    "amazing", "awesome", "excellent", "fantastic", "incredible", "outstanding", "perfect",
    "wonderful", "brilliant", "phenomenal", "spectacular", "magnificent", "love", "loved",
    "adore", "best",
];

const STRONG_NEGATIVE: &[&str] = &[
    "terrible", "horrible", "awful", "disgusting", "atrocious", "dreadful", "horrendous",
    "pathetic", "unbearable", "worst", "hate", "hated", "despise",
];

const MODERATE_POSITIVE: &[&str] = &[
    "good", "great", "nice", "happy", "glad", "cool", "enjoy", "enjoyed", "like", "liked",
    "fun", "beautiful", "sweet", "solid", "lovely", "pleasant", "impressive", "joy",
];

const MODERATE_NEGATIVE: &[&str] = &[
    "bad", "sad", "mad", "angry", "annoying", "annoyed", "ugly", "stupid", "boring", "poor",
    "broken", "disappointing", "disappointed", "gross", "nasty", "upset",
];

const WEAK_POSITIVE: &[&str] = &[
    "ok", "okay", "fine", "decent", "alright", "interesting", "neat", "fair", "cute", "chill",
];

const WEAK_NEGATIVE: &[&str] = &[
    "meh", "eh", "bland", "slow", "odd", "weird", "iffy", "mediocre",
];

const SLANG_POSITIVE: &[&str] = &[
    "lit", "fire", "dope", "sick", "goat", "goated", "slaps", "banger", "bussin", "vibe",
    "mood", "king", "queen", "w",
];

const SLANG_NEGATIVE: &[&str] = &[
    "trash", "mid", "cringe", "flop", "yikes", "sus", "ratio", "l",
];

const ABBREV_POSITIVE: &[&str] = &["lol", "lmao", "rofl", "haha", "hehe", "yay", "xd"];

const ABBREV_NEGATIVE: &[&str] = &["smh", "wtf", "ugh", "oof", "ffs", "bruh"];

/// Multi-word phrases, longest first within each arity. Matched before any
/// single-token lookup.
const PHRASES_3: &[(&str, f32)] = &[
    ("over the moon", 0.85),
    ("on cloud nine", 0.9),
    ("out of place", -0.4),
    ("under the weather", -0.5),
    ("waste of time", -0.8),
    ("out of control", -0.6),
    ("best thing ever", 0.9),
    ("worst thing ever", -0.9),
];

const PHRASES_2: &[(&str, f32)] = &[
    ("straight fire", 0.9),
    ("no cap", 0.4),
    ("top notch", 0.8),
    ("well done", 0.6),
    ("game changer", 0.7),
    ("love it", 0.7),
    ("love this", 0.7),
    ("hate it", -0.7),
    ("hate this", -0.7),
    ("dumpster fire", -0.9),
    ("hot garbage", -0.9),
    ("hot mess", -0.6),
    ("not bad", 0.3),
];

const INTENSIFIERS: &[(&str, f32)] = &[
    ("very", 1.5),
    ("really", 1.4),
    ("extremely", 1.8),
    ("absolutely", 1.7),
    ("totally", 1.5),
    ("completely", 1.6),
    ("incredibly", 1.8),
    ("super", 1.5),
    ("so", 1.3),
    ("quite", 1.3),
    ("pretty", 1.2),
    ("somewhat", 0.7),
    ("kinda", 0.8),
    ("sorta", 0.8),
    ("slightly", 0.6),
    ("barely", 0.5),
    ("hardly", 0.5),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nothing", "neither", "nor", "without", "cannot", "cant",
    "can't", "dont", "don't", "doesnt", "doesn't", "didnt", "didn't", "wont", "won't", "isnt",
    "isn't", "wasnt", "wasn't", "arent", "aren't", "aint", "ain't",
];

const POSITIVE_EMOJI: &[char] = &[
    '\u{1F600}', '\u{1F601}', '\u{1F602}', '\u{1F603}', '\u{1F604}', '\u{1F605}', '\u{1F606}',
    '\u{1F60A}', '\u{1F60D}', '\u{1F618}', '\u{1F642}', '\u{1F644}', '\u{1F929}', '\u{1F973}',
    '\u{1F389}', '\u{1F38A}', '\u{1F44D}', '\u{1F44F}', '\u{1F4AF}', '\u{1F525}', '\u{2764}',
    '\u{1F496}', '\u{1F60E}', '\u{1F917}', '\u{2728}',
];

const NEGATIVE_EMOJI: &[char] = &[
    '\u{1F61E}', '\u{1F61F}', '\u{1F620}', '\u{1F621}', '\u{1F622}', '\u{1F62D}', '\u{1F624}',
    '\u{1F626}', '\u{1F629}', '\u{1F62B}', '\u{1F494}', '\u{1F44E}', '\u{1F92E}', '\u{1F922}',
    '\u{1F612}', '\u{1F641}', '\u{1F615}', '\u{1F480}',
];

/// Single-token polarity weights across all tiers, flattened once.
static WORD_WEIGHTS: Lazy<HashMap<&'static str, f32>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let tiers: [(&[&str], f32); 10] = [
        (STRONG_POSITIVE, STRONG_WEIGHT),
        (STRONG_NEGATIVE, -STRONG_WEIGHT),
        (MODERATE_POSITIVE, MODERATE_WEIGHT),
        (MODERATE_NEGATIVE, -MODERATE_WEIGHT),
        (WEAK_POSITIVE, WEAK_WEIGHT),
        (WEAK_NEGATIVE, -WEAK_WEIGHT),
        (SLANG_POSITIVE, SLANG_WEIGHT),
        (SLANG_NEGATIVE, -SLANG_WEIGHT),
        (ABBREV_POSITIVE, ABBREV_WEIGHT),
        (ABBREV_NEGATIVE, -ABBREV_WEIGHT),
    ];
    for (words, weight) in tiers {
        for w in words {
            m.insert(*w, weight);
        }
    }
    m
});

static INTENSIFIER_MAP: Lazy<HashMap<&'static str, f32>> =
    Lazy::new(|| INTENSIFIERS.iter().copied().collect());

static NEGATION_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| NEGATIONS.iter().copied().collect());

static PHRASE_MAP_3: Lazy<HashMap<&'static str, f32>> =
    Lazy::new(|| PHRASES_3.iter().copied().collect());

static PHRASE_MAP_2: Lazy<HashMap<&'static str, f32>> =
    Lazy::new(|| PHRASES_2.iter().copied().collect());

static POSITIVE_EMOJI_SET: Lazy<HashSet<char>> =
    Lazy::new(|| POSITIVE_EMOJI.iter().copied().collect());

static NEGATIVE_EMOJI_SET: Lazy<HashSet<char>> =
    Lazy::new(|| NEGATIVE_EMOJI.iter().copied().collect());

/// Polarity weight for a bare (already trimmed, lowercase) token.
pub fn word_weight(token: &str) -> Option<f32> {
    WORD_WEIGHTS.get(token).copied()
}

/// Multiplier for an intensifier token, if it is one.
pub fn intensifier(token: &str) -> Option<f32> {
    INTENSIFIER_MAP.get(token).copied()
}

pub fn is_negation(token: &str) -> bool {
    NEGATION_SET.contains(token)
}

/// Weight for a space-joined phrase of the given arity (2 or 3 tokens).
pub fn phrase_weight(phrase: &str, arity: usize) -> Option<f32> {
    match arity {
        3 => PHRASE_MAP_3.get(phrase).copied(),
        2 => PHRASE_MAP_2.get(phrase).copied(),
        _ => None,
    }
}

pub fn is_positive_emoji(c: char) -> bool {
    POSITIVE_EMOJI_SET.contains(&c)
}

pub fn is_negative_emoji(c: char) -> bool {
    NEGATIVE_EMOJI_SET.contains(&c)
}
