//! Token → integer ID vocabulary.
//!
//! Loaded once at startup from a newline-delimited file (line index = ID) and
//! shared read-only by every scoring call. A missing or unreadable file never
//! fails the pipeline: we fall back to a minimal builtin vocabulary of just
//! the reserved tokens, which keeps the rule-based path fully functional.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

pub const PAD_TOKEN: &str = "[PAD]";
pub const UNK_TOKEN: &str = "[UNK]";
pub const CLS_TOKEN: &str = "[CLS]";
pub const SEP_TOKEN: &str = "[SEP]";

pub const PAD_ID: u32 = 0;
pub const UNK_ID: u32 = 1;

/// Immutable token→ID mapping.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    ids: HashMap<String, u32>,
}

impl Vocabulary {
    /// Minimal fallback: reserved tokens only. Every real word maps to UNK.
    pub fn builtin() -> Self {
        Self::from_lines([PAD_TOKEN, UNK_TOKEN, CLS_TOKEN, SEP_TOKEN].into_iter())
    }

    /// Build from an iterator of token lines; line index becomes the ID.
    /// A blank line yields no token but keeps its index slot, so IDs always
    /// match the file's line numbering.
    pub fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let mut ids = HashMap::new();
        for (idx, line) in lines.enumerate() {
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            ids.entry(token.to_string()).or_insert(idx as u32);
        }
        Self { ids }
    }

    /// Load from a vocab file. Absence is recovered locally (builtin
    /// fallback), never surfaced as an error.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let vocab = Self::from_lines(content.lines());
                debug!(target: "vocab", tokens = vocab.len(), path = %path.display(), "vocabulary loaded");
                vocab
            }
            Err(e) => {
                warn!(target: "vocab", path = %path.display(), error = %e, "vocab file unavailable, using builtin fallback");
                Self::builtin()
            }
        }
    }

    /// ID for a token, substituting the reserved UNK ID when absent.
    pub fn id_of(&self, token: &str) -> u32 {
        self.ids.get(token).copied().unwrap_or(UNK_ID)
    }

    pub fn pad_id(&self) -> u32 {
        self.ids.get(PAD_TOKEN).copied().unwrap_or(PAD_ID)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
