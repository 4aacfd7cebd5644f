//! Text normalization and tokenization.
//!
//! Two cleaning policies coexist on purpose: the rule-based scorer needs
//! punctuation preserved (light clean) so emphasis signals survive, while a
//! numeric-model backend wants letters/digits only (strict clean). The caller
//! picks the mode; the output always carries a fixed-length ID sequence.

use crate::vocab::Vocabulary;
use std::sync::Arc;

/// Which cleaning policy to apply before tokenizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Lowercase + whitespace split only; punctuation preserved.
    LightClean,
    /// Lowercase, strip non-alphanumerics, collapse whitespace.
    StrictClean,
}

/// Derived, immutable view of one input text.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedText {
    /// The original text as passed in. Corpus-level signals (emoji, caps,
    /// punctuation emphasis) read this, never the cleaned variant.
    pub source: String,
    pub cleaned: String,
    pub tokens: Vec<String>,
    /// Vocabulary IDs, padded/truncated to exactly the configured length.
    pub input_ids: Vec<u32>,
    pub mode: NormalizeMode,
}

/// Pure normalizer over an immutable shared vocabulary.
#[derive(Debug, Clone)]
pub struct Normalizer {
    vocab: Arc<Vocabulary>,
    max_len: usize,
}

impl Normalizer {
    pub fn new(vocab: Arc<Vocabulary>, max_len: usize) -> Self {
        Self { vocab, max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Normalize `text` under the chosen mode. Never fails: the empty string
    /// yields zero tokens and an all-PAD ID sequence.
    pub fn normalize(&self, text: &str, mode: NormalizeMode) -> NormalizedText {
        let cleaned = match mode {
            NormalizeMode::LightClean => text.to_lowercase(),
            NormalizeMode::StrictClean => strict_clean(text),
        };

        let tokens: Vec<String> = cleaned
            .split_whitespace()
            .map(|t| t.to_string())
            .collect();

        let mut input_ids: Vec<u32> = tokens
            .iter()
            .take(self.max_len)
            .map(|t| self.vocab.id_of(t))
            .collect();
        input_ids.resize(self.max_len, self.vocab.pad_id());

        NormalizedText {
            source: text.to_string(),
            cleaned,
            tokens,
            input_ids,
            mode,
        }
    }
}

/// Lowercase, drop everything that is not alphanumeric or whitespace, then
/// collapse whitespace runs.
fn strict_clean(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c.is_whitespace() { c } else { ' ' })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}
