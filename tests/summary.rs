use std::sync::Arc;

use post_score::config::{Config, ImageConfig};
use post_score::images::FileImageAnalyzer;
use post_score::provider::LexiconProvider;
use post_score::summary::summarize;
use post_score::{AnalysisResult, Content, ContentAnalyzer};

async fn analyze(id: &str, title: &str, text: &str, total: f64) -> AnalysisResult {
    let analyzer = ContentAnalyzer::new(
        Arc::new(Config::default()),
        Box::new(LexiconProvider),
        Box::new(FileImageAnalyzer::new(ImageConfig::default())),
    );
    let content = Content {
        id: id.to_string(),
        title: title.to_string(),
        text: text.to_string(),
        ..Content::default()
    };
    let mut result = analyzer.analyze(&content).await.expect("analysis");
    result.score.total = total;
    result
}

#[test]
fn empty_batch_has_no_leaders() {
    let summary = summarize(&[]);
    assert_eq!(summary.total_content, 0);
    assert_eq!(summary.overall_score, 0.0);
    assert!(summary.best_performing.is_none());
    assert!(summary.need_improvement.is_none());
    assert!(summary.common_issues.is_empty());
    assert!(summary.top_keywords.is_empty());
}

#[tokio::test]
async fn averages_and_leaders() {
    let results = vec![
        analyze("a", "", "rust rust rust crates crates", 40.0).await,
        analyze("b", "", "crates crates crates crates rust rust", 70.0).await,
        analyze("c", "", "plain words only", 70.0).await,
    ];

    let summary = summarize(&results);
    assert_eq!(summary.total_content, 3);
    assert!((summary.overall_score - 60.0).abs() < 1e-9);
    assert!((summary.average_scores.visual - 30.0).abs() < 1e-9);
    assert_eq!(summary.best_performing.as_deref(), Some("b"));
    assert_eq!(summary.need_improvement.as_deref(), Some("a"));
    assert!(summary.success_patterns.is_empty());

    assert!(summary
        .common_issues
        .contains(&"weak visuals (3 items)".to_string()));
    assert!(summary
        .common_issues
        .contains(&"no call to action (3 items)".to_string()));
}

#[tokio::test]
async fn keywords_merge_across_items() {
    let results = vec![
        analyze("a", "", "rust rust rust crates crates", 50.0).await,
        analyze("b", "", "crates crates crates crates rust rust", 50.0).await,
    ];

    let summary = summarize(&results);
    let words: Vec<&str> = summary
        .top_keywords
        .iter()
        .map(|keyword| keyword.word.as_str())
        .collect();
    assert_eq!(words, vec!["crates", "rust"]);
    assert_eq!(summary.top_keywords[0].frequency, 6);
    assert_eq!(summary.top_keywords[1].frequency, 5);

    let expected = (3.0 / 5.0 + 2.0 / 6.0) / 2.0;
    assert!((summary.top_keywords[1].relevance - expected).abs() < 1e-9);
}

#[tokio::test]
async fn high_scorers_reveal_patterns() {
    let results = vec![
        analyze("a", "5 tips you need?", "Some body text.", 90.0).await,
        analyze("b", "3 ways to win?", "Other body text.", 85.0).await,
        analyze("c", "plain", "Low scorer.", 20.0).await,
    ];

    let summary = summarize(&results);
    assert!(summary
        .success_patterns
        .contains(&"numbers in the title".to_string()));
    assert!(summary
        .success_patterns
        .contains(&"question titles".to_string()));
    assert!(!summary
        .success_patterns
        .contains(&"a call to action".to_string()));
}
