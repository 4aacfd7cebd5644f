//! Demo that scores a few texts (or argv) through the analyzer and prints
//! the resulting analyses as JSON.

use sense_sentiment::{AnalyzerConfig, SentimentAnalyzer, TextType};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).init();

    let analyzer = SentimentAnalyzer::new(AnalyzerConfig::load());
    if !analyzer.initialize() {
        eprintln!("analyzer failed to initialize");
        return;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let texts: Vec<String> = if args.is_empty() {
        [
            "I love this app!",
            "This is terrible and I hate it",
            "This is okay I guess",
            "Amazing, fantastic, wonderful experience!",
            "not good at all...",
            "ok",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    } else {
        args
    };

    for (i, text) in texts.iter().enumerate() {
        let analysis = analyzer
            .analyze_sentiment(format!("demo_{i}"), text.clone(), TextType::Comment)
            .await;
        match analysis {
            Some(a) => match serde_json::to_string_pretty(&a) {
                Ok(json) => println!("{json}"),
                Err(e) => eprintln!("serialization failed: {e}"),
            },
            None => eprintln!("no result for {text:?}"),
        }
    }

    println!("score-demo done");
}
