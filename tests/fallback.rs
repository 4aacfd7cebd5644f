// tests/fallback.rs
//
// Fallback discipline: a broken or flaky trained-model backend must never
// surface to callers — initialization still succeeds and every analyze call
// still answers, via the rule engine.

use sense_sentiment::{
    AnalyzerConfig, InferenceModel, SentimentAnalyzer, SentimentLabel, TextType,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

struct BrokenAtRuntime(AtomicU32);

impl InferenceModel for BrokenAtRuntime {
    fn infer(&self, _input_ids: &[u32]) -> anyhow::Result<Vec<f32>> {
        // First call (the init probe) succeeds; everything after fails.
        if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(vec![0.0])
        } else {
            anyhow::bail!("model runtime failure")
        }
    }
}

#[test]
fn loader_failure_engages_rule_fallback_transparently() {
    let analyzer = SentimentAnalyzer::with_model(
        AnalyzerConfig::default(),
        Box::new(|| anyhow::bail!("sentiment_model.tflite not found")),
    );

    // Per the availability contract, initialize reports success.
    assert!(analyzer.initialize());
    assert!(analyzer.is_ready());

    // And scoring proceeds through the rules.
    let a = analyzer
        .analyze_sentiment_blocking("c", "this is wonderful", TextType::Comment)
        .expect("fallback backend must answer");
    assert!(a.result.score > 0.0);
    assert_eq!(a.result.label, SentimentLabel::from_score(a.result.score));
}

#[test]
fn runtime_failure_degrades_to_rules_without_losing_the_call() {
    let analyzer = SentimentAnalyzer::with_model(
        AnalyzerConfig::default(),
        Box::new(|| {
            Ok(Arc::new(BrokenAtRuntime(AtomicU32::new(0))) as Arc<dyn InferenceModel>)
        }),
    );
    // The loader probe succeeds, then the model dies on the startup smoke
    // call; initialization still reports success and demotes to rules.
    assert!(analyzer.initialize());

    let a = analyzer
        .analyze_sentiment_blocking("c", "this is wonderful", TextType::Comment)
        .expect("call must survive the model failure");
    assert!(a.result.score > 0.0);

    // Subsequent calls keep working on the rule backend.
    let b = analyzer
        .analyze_sentiment_blocking("c", "this is horrible", TextType::Comment)
        .unwrap();
    assert!(b.result.score < 0.0);
}

#[test]
fn shape_validating_model_is_kept_at_init() {
    // Real tensor interpreters reject inputs that do not match their input
    // shape. Such a model must pass initialization and serve live calls,
    // not get silently discarded in favor of the rules.
    struct StrictShape;
    impl InferenceModel for StrictShape {
        fn infer(&self, input_ids: &[u32]) -> anyhow::Result<Vec<f32>> {
            // Default configured sequence length.
            if input_ids.len() != 100 {
                anyhow::bail!("expected 100 ids, got {}", input_ids.len());
            }
            Ok(vec![0.9])
        }
    }

    let analyzer = SentimentAnalyzer::with_model(
        AnalyzerConfig::default(),
        Box::new(|| Ok(Arc::new(StrictShape) as Arc<dyn InferenceModel>)),
    );
    assert!(analyzer.initialize());
    assert!(
        analyzer.debug_info().contains("backend=trained-model"),
        "model must stay active: {}",
        analyzer.debug_info()
    );

    let a = analyzer
        .analyze_sentiment_blocking("c", "completely arbitrary text", TextType::Comment)
        .unwrap();
    assert_eq!(a.result.label, SentimentLabel::VeryPositive);
}

#[test]
fn healthy_model_results_flow_through() {
    struct AlwaysPositive;
    impl InferenceModel for AlwaysPositive {
        fn infer(&self, _input_ids: &[u32]) -> anyhow::Result<Vec<f32>> {
            // Three-class output: [negative, neutral, positive].
            Ok(vec![0.05, 0.1, 0.85])
        }
    }

    let analyzer = SentimentAnalyzer::with_model(
        AnalyzerConfig::default(),
        Box::new(|| Ok(Arc::new(AlwaysPositive) as Arc<dyn InferenceModel>)),
    );
    assert!(analyzer.initialize());

    let a = analyzer
        .analyze_sentiment_blocking("c", "completely arbitrary text", TextType::Comment)
        .unwrap();
    assert_eq!(a.result.label, SentimentLabel::VeryPositive);
    assert!(a.result.score > 0.0);
}
