// tests/scorer_properties.rs
//
// End-to-end properties of the rule engine through the public facade:
// negation, intensifiers, determinism, and bulk summary consistency.

use sense_sentiment::{AnalyzerConfig, SentimentAnalyzer, TextType};

fn analyzer() -> SentimentAnalyzer {
    let a = SentimentAnalyzer::new(AnalyzerConfig::default());
    assert!(a.initialize());
    a
}

fn score_of(an: &SentimentAnalyzer, text: &str) -> f32 {
    an.analyze_sentiment_blocking("t", text, TextType::Comment)
        .expect("analyzer is initialized")
        .result
        .score
}

#[test]
fn negation_flips_and_dampens() {
    let an = analyzer();
    let good = score_of(&an, "good");
    let bad = score_of(&an, "bad");
    let not_good = score_of(&an, "not good");

    assert!(good > 0.0);
    assert!(bad < 0.0);
    // Negated positive leans negative...
    assert!(not_good < 0.0);
    assert!(not_good < good);
    // ...but is strictly milder than the plain negative of the same tier.
    assert!(not_good > bad);
}

#[test]
fn intensifier_never_weakens() {
    let an = analyzer();
    let good = score_of(&an, "good");
    let very_good = score_of(&an, "very good");
    assert!(very_good.abs() >= good.abs());

    let bad = score_of(&an, "bad");
    let really_bad = score_of(&an, "really bad");
    assert!(really_bad.abs() >= bad.abs());
}

#[test]
fn repeated_calls_are_identical_with_jitter_disabled() {
    let an = analyzer();
    let text = "honestly this was a really great experience, love it!!";
    let first = an
        .analyze_sentiment_blocking("t", text, TextType::Comment)
        .unwrap();
    for _ in 0..5 {
        let again = an
            .analyze_sentiment_blocking("t", text, TextType::Comment)
            .unwrap();
        assert_eq!(first.result.score, again.result.score);
        assert_eq!(first.result.confidence, again.result.confidence);
        assert_eq!(first.result.label, again.result.label);
    }
}

#[tokio::test]
async fn bulk_summary_matches_individual_results() {
    let an = analyzer();
    let items = vec![
        ("a".to_string(), "great!".to_string()),
        ("b".to_string(), "terrible".to_string()),
        ("c".to_string(), "it's okay".to_string()),
    ];
    let bulk = an.analyze_bulk("post-1", items, TextType::Comment).await;

    assert_eq!(bulk.summary.total_count, 3);
    assert_eq!(bulk.analyses.len(), 3);

    // Average is the mean of the per-item scores.
    let mean: f32 =
        bulk.analyses.iter().map(|a| a.result.score).sum::<f32>() / bulk.analyses.len() as f32;
    assert!((bulk.summary.average_score - mean).abs() < 1e-5);

    // Dominant label holds the plurality among the individual labels.
    let mut counts = std::collections::HashMap::new();
    for a in &bulk.analyses {
        *counts.entry(a.result.label).or_insert(0usize) += 1;
    }
    let max = counts.values().copied().max().unwrap();
    assert_eq!(counts.get(&bulk.summary.dominant_label).copied(), Some(max));

    // Distribution counts add up.
    assert_eq!(bulk.summary.distribution.values().sum::<usize>(), 3);
}

#[tokio::test]
async fn bulk_spanning_multiple_batches_keeps_all_items() {
    let mut cfg = AnalyzerConfig::default();
    cfg.max_batch_size = 4;
    let an = SentimentAnalyzer::new(cfg);
    assert!(an.initialize());

    let items: Vec<(String, String)> = (0..11)
        .map(|i| (format!("c{i}"), format!("comment number {i} is good")))
        .collect();
    let bulk = an.analyze_bulk("post-2", items, TextType::Comment).await;
    assert_eq!(bulk.summary.total_count, 11);
    assert_eq!(bulk.analyses.len(), 11);
    // Order preserved across batch boundaries.
    assert_eq!(bulk.analyses[0].text_id, "c0");
    assert_eq!(bulk.analyses[10].text_id, "c10");
}

#[test]
fn one_bad_item_does_not_abort_the_batch() {
    let an = analyzer();
    // The middle item is rejected by the short-text policy; it must come
    // back as a neutral analysis, not vanish.
    let items = vec![
        ("a".to_string(), "love this".to_string()),
        ("b".to_string(), "x".to_string()),
        ("c".to_string(), "hate this".to_string()),
    ];
    let bulk = an.analyze_bulk_blocking("post-3", &items, TextType::Comment);
    assert_eq!(bulk.summary.total_count, 3);
    assert_eq!(bulk.analyses[1].text_id, "b");
    assert_eq!(bulk.analyses[1].result.score, 0.0);
}
