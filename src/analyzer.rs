//! Analyzer facade: validation, orchestration, bulk aggregation.
//!
//! An explicitly constructed service object (no global singleton): the
//! vocabulary and lexicon tables are built once, initialization runs at most
//! once even under concurrent callers, and every scoring call is pure over
//! the shared read-only state. The async entry points offload the scoring
//! core onto blocking tasks so UI/coordination callers are never blocked.
//!
//! Failure semantics: nothing escapes `analyze_sentiment` — short or empty
//! text routes to the fixed neutral result, internal failures degrade to
//! neutral, and `None` is returned only when the analyzer was never
//! initialized. One bad input can never abort a batch.

use crate::config::AnalyzerConfig;
use crate::inference::{InferenceEngine, ModelFactory};
use crate::model::{BulkSentimentResult, SentimentAnalysis, SentimentSummary, TextType};
use crate::normalize::Normalizer;
use crate::rules::RuleScorer;
use crate::shorttext;
use crate::vocab::Vocabulary;
use chrono::Utc;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

#[derive(Clone)]
pub struct SentimentAnalyzer {
    inner: Arc<Inner>,
}

struct Inner {
    normalizer: Normalizer,
    engine: InferenceEngine,
    max_batch_size: usize,
    init_once: OnceLock<bool>,
}

impl SentimentAnalyzer {
    /// Rule-based analyzer (no trained model configured).
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::build(config, None)
    }

    /// Analyzer that will try the given model loader at initialization and
    /// fall back to rules on any failure.
    pub fn with_model(config: AnalyzerConfig, factory: Box<ModelFactory>) -> Self {
        Self::build(config, Some(factory))
    }

    fn build(config: AnalyzerConfig, factory: Option<Box<ModelFactory>>) -> Self {
        let vocab = match &config.vocab_path {
            Some(path) => Vocabulary::load(path),
            None => Vocabulary::builtin(),
        };
        let normalizer = Normalizer::new(Arc::new(vocab), config.max_sequence_length);

        let scorer = if config.jitter_enabled {
            RuleScorer::with_jitter(config.jitter_seed.unwrap_or_else(|| {
                Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64
            }))
        } else {
            RuleScorer::new()
        };

        let engine = match factory {
            Some(f) => {
                InferenceEngine::with_model_factory(scorer, f, config.max_sequence_length)
            }
            None => InferenceEngine::rule_based(scorer),
        };

        Self {
            inner: Arc::new(Inner {
                normalizer,
                engine,
                max_batch_size: config.max_batch_size.max(1),
                init_once: OnceLock::new(),
            }),
        }
    }

    /// Prepare the backend. At-most-once: concurrent callers block on the
    /// single run, repeat calls are no-ops returning the recorded outcome.
    pub fn initialize(&self) -> bool {
        let inner = &self.inner;
        let ok = *inner.init_once.get_or_init(|| {
            let ok = inner.engine.initialize();
            debug!(target: "analyzer", backend = inner.engine.mode_name(), "analyzer initialized");
            // Smoke inference so a broken table shows up at startup, not at
            // the first user comment.
            if ok {
                let probe = inner.analyze_item("init_probe", "this is a test sentence", TextType::Comment);
                match probe {
                    Some(a) => debug!(target: "analyzer", label = %a.result.label, "smoke inference ok"),
                    None => warn!(target: "analyzer", "smoke inference returned nothing"),
                }
            }
            ok
        });
        ok
    }

    pub fn is_ready(&self) -> bool {
        self.inner.engine.is_ready()
    }

    /// One-line status string for debug screens.
    pub fn debug_info(&self) -> String {
        format!(
            "initialized={} backend={} ready={}",
            self.inner.init_once.get().is_some(),
            self.inner.engine.mode_name(),
            self.is_ready(),
        )
    }

    /// Score a single text on a background task. `None` only when the
    /// analyzer is not initialized or the backend is not ready.
    pub async fn analyze_sentiment(
        &self,
        text_id: impl Into<String>,
        text: impl Into<String>,
        text_type: TextType,
    ) -> Option<SentimentAnalysis> {
        let inner = self.inner.clone();
        let text_id = text_id.into();
        let text = text.into();
        match tokio::task::spawn_blocking(move || inner.analyze_item(&text_id, &text, text_type))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                // A panicking scoring task must not take the caller down.
                warn!(target: "analyzer", error = %e, "scoring task failed");
                None
            }
        }
    }

    /// Synchronous variant of [`analyze_sentiment`] for non-async callers.
    pub fn analyze_sentiment_blocking(
        &self,
        text_id: &str,
        text: &str,
        text_type: TextType,
    ) -> Option<SentimentAnalysis> {
        self.inner.analyze_item(text_id, text, text_type)
    }

    /// Score many texts (e.g. all comments of one post) and fold the results
    /// into summary statistics. Items are processed in fixed-size batches;
    /// a failing item degrades to a neutral analysis instead of being
    /// dropped, so counts stay stable. Calling before `initialize()` yields
    /// an empty result (zero counts), never fabricated analyses.
    pub async fn analyze_bulk(
        &self,
        target_id: impl Into<String>,
        items: Vec<(String, String)>,
        text_type: TextType,
    ) -> BulkSentimentResult {
        let inner = self.inner.clone();
        let target_id = target_id.into();
        let task_target = target_id.clone();
        match tokio::task::spawn_blocking(move || inner.analyze_bulk(&task_target, &items, text_type))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                warn!(target: "analyzer", target = %target_id, error = %e, "bulk scoring task failed");
                degraded_bulk(target_id)
            }
        }
    }

    /// Synchronous variant of [`analyze_bulk`].
    pub fn analyze_bulk_blocking(
        &self,
        target_id: &str,
        items: &[(String, String)],
        text_type: TextType,
    ) -> BulkSentimentResult {
        self.inner.analyze_bulk(target_id, items, text_type)
    }
}

impl Inner {
    fn analyze_item(&self, text_id: &str, text: &str, text_type: TextType) -> Option<SentimentAnalysis> {
        // The engine only becomes ready through `initialize()`, so this also
        // covers the analyze-before-init case.
        if !self.engine.is_ready() {
            warn!(target: "analyzer", hash = %anon_hash(text), "analyze called before initialization");
            return None;
        }

        if shorttext::is_too_short(text) {
            debug!(target: "analyzer", id = %text_id, "short text rejected to neutral");
            return Some(SentimentAnalysis::neutral(text_id, text_type, text));
        }

        let normalized = self.normalizer.normalize(text, self.engine.preferred_mode());
        match self.engine.run_inference(&normalized) {
            Some(result) => Some(SentimentAnalysis::new(text_id, text_type, text, result)),
            None => {
                // Backend went away mid-flight; degrade, don't drop.
                warn!(target: "analyzer", id = %text_id, "inference unavailable, degrading to neutral");
                Some(SentimentAnalysis::neutral(text_id, text_type, text))
            }
        }
    }

    fn analyze_bulk(
        &self,
        target_id: &str,
        items: &[(String, String)],
        text_type: TextType,
    ) -> BulkSentimentResult {
        // An uninitialized analyzer reports the whole call as absent (empty
        // result, zero counts) so the caller can retry after initialize();
        // fabricating neutral analyses here would poison stored aggregates.
        if !self.engine.is_ready() {
            warn!(target: "analyzer", target = %target_id, "bulk analyze called before initialization");
            return degraded_bulk(target_id.to_string());
        }

        debug!(target: "analyzer", target = %target_id, count = items.len(), "bulk analysis start");

        let mut analyses = Vec::with_capacity(items.len());
        for batch in items.chunks(self.max_batch_size) {
            for (text_id, text) in batch {
                let analysis = self
                    .analyze_item(text_id, text, text_type)
                    .unwrap_or_else(|| SentimentAnalysis::neutral(text_id, text_type, text));
                analyses.push(analysis);
            }
        }

        let summary = SentimentSummary::from_analyses(&analyses);
        debug!(
            target: "analyzer",
            target = %target_id,
            total = summary.total_count,
            dominant = %summary.dominant_label,
            "bulk analysis done"
        );

        BulkSentimentResult {
            target_id: target_id.to_string(),
            analyses,
            summary,
            processed_at: Utc::now(),
        }
    }
}

/// Empty-but-identified result for a bulk call that could not run at all.
fn degraded_bulk(target_id: String) -> BulkSentimentResult {
    BulkSentimentResult {
        target_id,
        analyses: Vec::new(),
        summary: SentimentSummary::empty(),
        processed_at: Utc::now(),
    }
}

/// Short anonymized handle for a text; raw user content is never logged.
fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
