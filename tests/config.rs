use std::fs;

use post_score::config::{Config, ProviderKind};
use post_score::error::ConfigError;

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.ai.kind().expect("kind"), ProviderKind::Local);
    assert_eq!(config.ai.timeout_secs, 30);
    assert_eq!(config.image.max_size, 10 * 1024 * 1024);
    assert_eq!(config.analysis.min_word_count, 50);
    assert_eq!(config.analysis.max_word_count, 1000);
}

#[test]
fn written_config_reads_back() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config").join("post-score.toml");

    let mut config = Config::default();
    config.ai.provider = "claude".to_string();
    config.analysis.weights.visual = 0.10;
    config.analysis.weights.content_quality = 0.30;
    config.write(&path).expect("write");

    let loaded = Config::from_file(&path).expect("read");
    assert_eq!(loaded.ai.kind().expect("kind"), ProviderKind::Claude);
    assert!((loaded.analysis.weights.visual - 0.10).abs() < 1e-9);
    assert!((loaded.analysis.weights.content_quality - 0.30).abs() < 1e-9);
    assert!(loaded.validate().is_ok());
}

#[test]
fn partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("partial.toml");
    fs::write(&path, "[ai]\nprovider = \"openai\"\n").expect("write");

    let config = Config::from_file(&path).expect("read");
    assert_eq!(config.ai.provider, "openai");
    assert_eq!(config.ai.model, "gpt-3.5-turbo");
    assert_eq!(config.analysis.min_word_count, 50);
    assert!((config.analysis.weights.sum() - 1.0).abs() < 1e-9);
}

#[test]
fn weight_sum_is_enforced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("weights.toml");
    fs::write(&path, "[analysis.weights]\ntrend_relevance = 0.0\n").expect("write");

    let config = Config::from_file(&path).expect("read");
    match config.validate() {
        Err(ConfigError::WeightSum(sum)) => assert!((sum - 0.9).abs() < 1e-9),
        other => panic!("unexpected: {:?}", other),
    }
}

#[test]
fn invalid_settings_are_rejected() {
    let mut negative = Config::default();
    negative.analysis.weights.title = -0.15;
    assert!(matches!(
        negative.validate(),
        Err(ConfigError::InvalidWeight { name: "title", .. })
    ));

    let mut provider = Config::default();
    provider.ai.provider = "gemini".to_string();
    assert!(matches!(
        provider.validate(),
        Err(ConfigError::UnknownProvider(_))
    ));

    let mut range = Config::default();
    range.analysis.min_word_count = 2000;
    assert!(matches!(range.validate(), Err(ConfigError::WordRange { .. })));

    let mut images = Config::default();
    images.image.supported_ext.clear();
    assert!(matches!(images.validate(), Err(ConfigError::ImageLimits(_))));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bad.toml");
    fs::write(&path, "content_dir = [").expect("write");

    assert!(matches!(
        Config::from_file(&path),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn provider_tags() {
    assert_eq!(ProviderKind::parse("").expect("empty"), ProviderKind::Local);
    assert_eq!(ProviderKind::parse("OpenAI").expect("openai"), ProviderKind::OpenAi);
    assert_eq!(ProviderKind::parse("anthropic").expect("claude"), ProviderKind::Claude);
    assert!(ProviderKind::parse("gemini").is_err());
}
