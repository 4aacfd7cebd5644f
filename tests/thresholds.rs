// tests/thresholds.rs
//
// Boundary tests for the score → label threshold table, and the score /
// confidence domain guarantees of the public pipeline.

use sense_sentiment::{AnalyzerConfig, SentimentAnalyzer, SentimentLabel, TextType};

#[test]
fn label_threshold_table_is_exact() {
    let cases = [
        (-1.0, SentimentLabel::VeryNegative),
        (-0.51, SentimentLabel::VeryNegative),
        (-0.5, SentimentLabel::VeryNegative),
        (-0.49, SentimentLabel::Negative),
        (-0.11, SentimentLabel::Negative),
        (-0.1, SentimentLabel::Negative),
        (-0.099, SentimentLabel::Neutral),
        (0.0, SentimentLabel::Neutral),
        (0.099, SentimentLabel::Neutral),
        (0.1, SentimentLabel::Positive),
        (0.49, SentimentLabel::Positive),
        (0.5, SentimentLabel::VeryPositive),
        (1.0, SentimentLabel::VeryPositive),
    ];
    for (score, expected) in cases {
        assert_eq!(
            SentimentLabel::from_score(score),
            expected,
            "score {score} mapped to the wrong label"
        );
    }
}

#[test]
fn produced_labels_match_produced_scores() {
    let analyzer = SentimentAnalyzer::new(AnalyzerConfig::default());
    assert!(analyzer.initialize());

    let texts = [
        "absolutely amazing, love it!!",
        "this is terrible and I hate it",
        "the weather report for tomorrow",
        "not good",
        "pretty decent overall",
    ];
    for text in texts {
        let a = analyzer
            .analyze_sentiment_blocking("t", text, TextType::Comment)
            .expect("initialized analyzer must answer");
        assert_eq!(
            a.result.label,
            SentimentLabel::from_score(a.result.score),
            "label/score disagree for {text:?}"
        );
    }
}

#[test]
fn score_and_confidence_domains_hold() {
    let analyzer = SentimentAnalyzer::new(AnalyzerConfig::default());
    assert!(analyzer.initialize());

    let texts = [
        "",
        "x",
        "ok",
        "!!!",
        "AMAZING INCREDIBLE PERFECT BEST!!! \u{1F525}\u{1F525}",
        "worst most horrible disgusting terrible awful thing \u{1F62D}",
        "a long plain sentence with nothing emotional in it at all whatsoever",
    ];
    for text in texts {
        let a = analyzer
            .analyze_sentiment_blocking("t", text, TextType::Comment)
            .unwrap();
        assert!(
            (-1.0..=1.0).contains(&a.result.score),
            "score out of domain for {text:?}"
        );
        assert!(
            (0.5..=0.95).contains(&a.result.confidence),
            "confidence out of domain for {text:?}"
        );
    }
}
