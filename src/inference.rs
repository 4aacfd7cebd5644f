//! Inference backend abstraction.
//!
//! Two backends exist: the rule-based scorer (always available) and an
//! optionally injected trained model. The model is an opaque collaborator
//! behind [`InferenceModel`]; this module only owns the fallback discipline:
//! any failure — loader error, bad probe, runtime error mid-call — switches
//! to the rule backend and still answers, never propagating an error.
//!
//! The active backend is a tagged state chosen once at `initialize()` (which
//! runs at most once, even under concurrent callers) and swapped at most once
//! (atomically) on failure, not a boolean checked ad hoc.

use crate::model::{SentimentLabel, SentimentResult};
use crate::normalize::{NormalizeMode, NormalizedText};
use crate::rules::RuleScorer;
use crate::vocab::PAD_ID;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// Opaque trained-model collaborator. The input is the fixed-length ID
/// sequence; the output vector's interpretation depends on its length
/// (see [`parse_model_outputs`]).
pub trait InferenceModel: Send + Sync {
    fn infer(&self, input_ids: &[u32]) -> anyhow::Result<Vec<f32>>;
}

/// Hook standing in for "locate and load the model resource".
pub type ModelFactory = dyn Fn() -> anyhow::Result<Arc<dyn InferenceModel>> + Send + Sync;

const STATE_UNINIT: u8 = 0;
const STATE_RULES: u8 = 1;
const STATE_MODEL: u8 = 2;

pub struct InferenceEngine {
    scorer: RuleScorer,
    factory: Option<Box<ModelFactory>>,
    /// Length of the ID sequences real traffic carries; the init probe must
    /// present the same shape so shape-validating models pass it.
    sequence_len: usize,
    model: std::sync::OnceLock<Arc<dyn InferenceModel>>,
    init_once: std::sync::OnceLock<bool>,
    state: AtomicU8,
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("mode", &self.mode_name())
            .finish()
    }
}

impl InferenceEngine {
    /// Rule-based only.
    pub fn rule_based(scorer: RuleScorer) -> Self {
        Self {
            scorer,
            factory: None,
            // No model to probe.
            sequence_len: 0,
            model: std::sync::OnceLock::new(),
            init_once: std::sync::OnceLock::new(),
            state: AtomicU8::new(STATE_UNINIT),
        }
    }

    /// Rule-based plus a trained-model loader to try at init. `sequence_len`
    /// is the configured input length the normalizer pads to.
    pub fn with_model_factory(
        scorer: RuleScorer,
        factory: Box<ModelFactory>,
        sequence_len: usize,
    ) -> Self {
        Self {
            scorer,
            factory: Some(factory),
            sequence_len,
            model: std::sync::OnceLock::new(),
            init_once: std::sync::OnceLock::new(),
            state: AtomicU8::new(STATE_UNINIT),
        }
    }

    /// Prepare a backend. Always returns `true`: the system must be able to
    /// score text even with zero external model assets, so every load
    /// failure resolves to the rule backend. At-most-once even for direct
    /// concurrent callers; repeat calls return the recorded outcome.
    pub fn initialize(&self) -> bool {
        *self.init_once.get_or_init(|| {
            let next = match &self.factory {
                None => {
                    info!(target: "inference", "no model configured, using rule-based backend");
                    STATE_RULES
                }
                Some(factory) => match factory() {
                    Ok(model) => {
                        // Probe with an all-PAD sequence of the exact length
                        // real traffic carries; a shape-validating model must
                        // see the same input shape here as on live calls.
                        match model.infer(&vec![PAD_ID; self.sequence_len]) {
                            Ok(out) if matches!(out.len(), 1..=3) => {
                                let _ = self.model.set(model);
                                info!(target: "inference", outputs = out.len(), "trained model loaded");
                                STATE_MODEL
                            }
                            Ok(out) => {
                                warn!(target: "inference", outputs = out.len(),
                                      "model output shape unsupported, falling back to rules");
                                STATE_RULES
                            }
                            Err(e) => {
                                warn!(target: "inference", error = %e,
                                      "model probe failed, falling back to rules");
                                STATE_RULES
                            }
                        }
                    }
                    Err(e) => {
                        warn!(target: "inference", error = %e,
                              "model load failed, falling back to rules");
                        STATE_RULES
                    }
                },
            };

            self.state.store(next, Ordering::Release);
            true
        })
    }

    /// True once either backend is usable.
    pub fn is_ready(&self) -> bool {
        self.state.load(Ordering::Acquire) != STATE_UNINIT
    }

    /// Which normalization the active backend wants: the model consumes
    /// strict-cleaned IDs, the rule scorer needs punctuation preserved.
    pub fn preferred_mode(&self) -> NormalizeMode {
        match self.state.load(Ordering::Acquire) {
            STATE_MODEL => NormalizeMode::StrictClean,
            _ => NormalizeMode::LightClean,
        }
    }

    pub fn mode_name(&self) -> &'static str {
        match self.state.load(Ordering::Acquire) {
            STATE_MODEL => "trained-model",
            STATE_RULES => "rule-based",
            _ => "uninitialized",
        }
    }

    /// Route to the active backend. `None` only before initialization; a
    /// model failure mid-call answers with the rule result for that same
    /// call and demotes the backend for the rest of the process.
    pub fn run_inference(&self, normalized: &NormalizedText) -> Option<SentimentResult> {
        match self.state.load(Ordering::Acquire) {
            STATE_UNINIT => None,
            STATE_MODEL => {
                if let Some(model) = self.model.get() {
                    match model.infer(&normalized.input_ids) {
                        Ok(outputs) => {
                            if let Some(result) = parse_model_outputs(&outputs) {
                                return Some(result);
                            }
                            warn!(target: "inference", outputs = outputs.len(),
                                  "unparseable model output, demoting to rules");
                        }
                        Err(e) => {
                            warn!(target: "inference", error = %e,
                                  "model inference failed, demoting to rules");
                        }
                    }
                }
                // One-way demotion; subsequent calls go straight to rules.
                self.state.store(STATE_RULES, Ordering::Release);
                Some(self.scorer.score(normalized))
            }
            _ => Some(self.scorer.score(normalized)),
        }
    }
}

/// Interpret a trained model's raw output vector.
///
/// 1 value : regression score in [-1, 1]
/// 2 values: [negative_prob, positive_prob], 0.7 cut for a non-neutral label
/// 3 values: [negative, neutral, positive], 0.7 cut for the "very" labels
pub fn parse_model_outputs(outputs: &[f32]) -> Option<SentimentResult> {
    match outputs {
        [single] => {
            let score = single.clamp(-1.0, 1.0);
            Some(SentimentResult::new(
                score,
                SentimentLabel::from_score(score),
                score.abs(),
            ))
        }
        [neg, pos] => {
            let score = (pos - neg).clamp(-1.0, 1.0);
            let label = if pos > neg {
                if *pos > 0.7 {
                    SentimentLabel::Positive
                } else {
                    SentimentLabel::Neutral
                }
            } else if *neg > 0.7 {
                SentimentLabel::Negative
            } else {
                SentimentLabel::Neutral
            };
            Some(SentimentResult::new(score, label, pos.max(*neg)))
        }
        [neg, neu, pos] => {
            let score = (pos - neg).clamp(-1.0, 1.0);
            let max = neg.max(*neu).max(*pos);
            let label = if max == *neg {
                if *neg > 0.7 {
                    SentimentLabel::VeryNegative
                } else {
                    SentimentLabel::Negative
                }
            } else if max == *pos {
                if *pos > 0.7 {
                    SentimentLabel::VeryPositive
                } else {
                    SentimentLabel::Positive
                }
            } else {
                SentimentLabel::Neutral
            };
            Some(SentimentResult::new(score, label, max))
        }
        _ => None,
    }
}
