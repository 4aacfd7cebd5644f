//! Core data model: scores, labels, per-text analyses and bulk summaries.
//!
//! Everything here is an immutable value produced fresh per call; the only
//! long-lived state in the crate lives in `vocab` and `lexicon`. Labels are
//! serialized as lowercased snake_case words ("very_negative", "positive",
//! ...) — that exact form is what the repository layer persists next to a
//! post/comment and later parses back for display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// What kind of text is being scored. Posts and comments share the pipeline;
/// the tag only travels through to the stored analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextType {
    Post,
    Comment,
}

/// Discrete sentiment category, ordered most-negative to most-positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentLabel {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentLabel {
    /// Declaration order; also the tie-break order for the bulk dominant label.
    pub const ALL: [SentimentLabel; 5] = [
        SentimentLabel::VeryNegative,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
        SentimentLabel::VeryPositive,
    ];

    /// Fixed, asymmetric score thresholds. The cutoffs are part of the stored
    /// contract — do not tune without migrating persisted analyses.
    pub fn from_score(score: f32) -> Self {
        if score <= -0.5 {
            SentimentLabel::VeryNegative
        } else if score <= -0.1 {
            SentimentLabel::Negative
        } else if score >= 0.5 {
            SentimentLabel::VeryPositive
        } else if score >= 0.1 {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Neutral
        }
    }

    /// The stored string form ("very_negative", ..., "positive").
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::VeryNegative => "very_negative",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
            SentimentLabel::Positive => "positive",
            SentimentLabel::VeryPositive => "very_positive",
        }
    }

    /// ARGB color for UI display of this label.
    pub fn color(&self) -> u32 {
        match self {
            SentimentLabel::VeryNegative => 0xFFD3_2F2F,
            SentimentLabel::Negative => 0xFFEF_5350,
            SentimentLabel::Neutral => 0xFF9E_9E9E,
            SentimentLabel::Positive => 0xFF66_BB6A,
            SentimentLabel::VeryPositive => 0xFF38_8E3C,
        }
    }

    /// Emoji glyph for UI display of this label.
    pub fn emoji(&self) -> &'static str {
        match self {
            SentimentLabel::VeryNegative => "\u{1F61E}",
            SentimentLabel::Negative => "\u{1F615}",
            SentimentLabel::Neutral => "\u{1F610}",
            SentimentLabel::Positive => "\u{1F642}",
            SentimentLabel::VeryPositive => "\u{1F604}",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "very_negative" => Ok(SentimentLabel::VeryNegative),
            "negative" => Ok(SentimentLabel::Negative),
            "neutral" => Ok(SentimentLabel::Neutral),
            "positive" => Ok(SentimentLabel::Positive),
            "very_positive" => Ok(SentimentLabel::VeryPositive),
            other => Err(anyhow::anyhow!("unknown sentiment label: {other}")),
        }
    }
}

/// One scored text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Polarity in [-1.0, 1.0]; negative values mean negative sentiment.
    pub score: f32,
    pub label: SentimentLabel,
    /// Certainty in [0.0, 1.0]. The rule engine reports [0.5, 0.95].
    pub confidence: f32,
    pub timestamp: DateTime<Utc>,
}

impl SentimentResult {
    pub fn new(score: f32, label: SentimentLabel, confidence: f32) -> Self {
        Self {
            score,
            label,
            confidence,
            timestamp: Utc::now(),
        }
    }

    /// The defined fallback result for rejected or failed inputs.
    pub fn neutral() -> Self {
        Self::new(0.0, SentimentLabel::Neutral, 0.5)
    }
}

/// A `SentimentResult` tied back to the caller's text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    /// Caller-supplied comment or post ID.
    pub text_id: String,
    pub text_type: TextType,
    pub original_text: String,
    pub result: SentimentResult,
    pub processed_at: DateTime<Utc>,
}

impl SentimentAnalysis {
    pub fn new(
        text_id: impl Into<String>,
        text_type: TextType,
        original_text: impl Into<String>,
        result: SentimentResult,
    ) -> Self {
        Self {
            text_id: text_id.into(),
            text_type,
            original_text: original_text.into(),
            result,
            processed_at: Utc::now(),
        }
    }

    pub fn neutral(
        text_id: impl Into<String>,
        text_type: TextType,
        original_text: impl Into<String>,
    ) -> Self {
        Self::new(text_id, text_type, original_text, SentimentResult::neutral())
    }
}

/// Aggregate statistics over a set of analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub total_count: usize,
    pub average_score: f32,
    pub dominant_label: SentimentLabel,
    /// Label → occurrence count. Labels with zero occurrences are omitted.
    pub distribution: HashMap<SentimentLabel, usize>,
}

impl SentimentSummary {
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            average_score: 0.0,
            dominant_label: SentimentLabel::Neutral,
            distribution: HashMap::new(),
        }
    }

    /// Fold per-text analyses into a summary. Dominant label is the mode of
    /// the distribution; ties go to the label listed first in
    /// `SentimentLabel::ALL`.
    pub fn from_analyses(analyses: &[SentimentAnalysis]) -> Self {
        if analyses.is_empty() {
            return Self::empty();
        }

        let mut distribution: HashMap<SentimentLabel, usize> = HashMap::new();
        let mut sum = 0.0f64;
        for a in analyses {
            sum += a.result.score as f64;
            *distribution.entry(a.result.label).or_insert(0) += 1;
        }

        let mut dominant = SentimentLabel::Neutral;
        let mut best = 0usize;
        for label in SentimentLabel::ALL {
            let n = distribution.get(&label).copied().unwrap_or(0);
            if n > best {
                best = n;
                dominant = label;
            }
        }

        Self {
            total_count: analyses.len(),
            average_score: (sum / analyses.len() as f64) as f32,
            dominant_label: dominant,
            distribution,
        }
    }
}

/// Result of a bulk analysis call, e.g. all comments under one post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSentimentResult {
    /// Post ID when analyzing its comments.
    pub target_id: String,
    pub analyses: Vec<SentimentAnalysis>,
    pub summary: SentimentSummary,
    pub processed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_threshold_table() {
        assert_eq!(SentimentLabel::from_score(-1.0), SentimentLabel::VeryNegative);
        assert_eq!(SentimentLabel::from_score(-0.5), SentimentLabel::VeryNegative);
        assert_eq!(SentimentLabel::from_score(-0.499), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.1), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_score(-0.099), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.0), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.099), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_score(0.1), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.499), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_score(0.5), SentimentLabel::VeryPositive);
        assert_eq!(SentimentLabel::from_score(1.0), SentimentLabel::VeryPositive);
    }

    #[test]
    fn label_string_round_trip() {
        for label in SentimentLabel::ALL {
            let stored = label.to_string();
            assert_eq!(stored, stored.to_lowercase());
            assert_eq!(stored.parse::<SentimentLabel>().unwrap(), label);
        }
        // Serde uses the same form as Display.
        let json = serde_json::to_string(&SentimentLabel::VeryNegative).unwrap();
        assert_eq!(json, "\"very_negative\"");
    }

    #[test]
    fn summary_ties_break_in_declaration_order() {
        let mk = |label: SentimentLabel, score: f32| {
            SentimentAnalysis::new(
                "id",
                TextType::Comment,
                "text",
                SentimentResult::new(score, label, 0.6),
            )
        };
        // One Negative, one Positive: Negative comes first in ALL.
        let analyses = vec![mk(SentimentLabel::Positive, 0.3), mk(SentimentLabel::Negative, -0.3)];
        let s = SentimentSummary::from_analyses(&analyses);
        assert_eq!(s.total_count, 2);
        assert_eq!(s.dominant_label, SentimentLabel::Negative);
        assert!(s.average_score.abs() < 1e-6);
    }

    #[test]
    fn empty_summary_is_neutral() {
        let s = SentimentSummary::from_analyses(&[]);
        assert_eq!(s.total_count, 0);
        assert_eq!(s.dominant_label, SentimentLabel::Neutral);
        assert!(s.distribution.is_empty());
    }
}
