// src/lib.rs
// Public library surface for the embedding app and integration tests.

pub mod analyzer;
pub mod config;
pub mod inference;
pub mod lexicon;
pub mod model;
pub mod normalize;
pub mod rules;
pub mod shorttext;
pub mod vocab;

// ---- Re-exports for stable public API ----
pub use crate::analyzer::SentimentAnalyzer;
pub use crate::config::AnalyzerConfig;
pub use crate::inference::{InferenceEngine, InferenceModel, ModelFactory};
pub use crate::model::{
    BulkSentimentResult, SentimentAnalysis, SentimentLabel, SentimentResult, SentimentSummary,
    TextType,
};
pub use crate::normalize::{NormalizeMode, NormalizedText, Normalizer};
pub use crate::rules::RuleScorer;
pub use crate::vocab::Vocabulary;
