pub mod analysis;
pub mod config;
pub mod error;
pub mod images;
pub mod loader;
pub mod model;
pub mod provider;
pub mod scoring;
pub mod summary;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::analysis::{
    analyze_title, classify_style, count_words, extract_keywords, extract_text_features,
    score_readability,
};
use crate::config::Config;
use crate::error::{AnalysisError, ConfigError};
use crate::images::{FileImageAnalyzer, ImageAnalyzer};
use crate::provider::{build_provider, SentimentProvider};
use crate::scoring::{CompositeScorer, SuggestionGenerator, SuggestionInput};

pub use crate::model::*;

/// Titles longer than this draw a validation warning.
pub const MAX_TITLE_CHARS: usize = 100;

/// Text-only part of an analysis: everything that is a pure function of the
/// title and body.
#[derive(Debug, Clone, PartialEq)]
pub struct TextReport {
    pub text: TextAnalysis,
    pub readability: ReadabilityMetrics,
    pub keywords: Vec<Keyword>,
}

pub fn analyze_text(title: &str, text: &str) -> TextReport {
    let features = extract_text_features(text);
    let analysis = TextAnalysis {
        word_count: features.word_count,
        char_count: features.char_count,
        paragraph_count: features.paragraph_count,
        sentence_count: features.sentence_count,
        title: analyze_title(title),
        structure: features.structure,
        style: classify_style(text),
        call_to_action: features.call_to_action,
        hashtags: features.hashtags,
        mentions: features.mentions,
    };

    TextReport {
        text: analysis,
        readability: score_readability(text),
        keywords: extract_keywords(text),
    }
}

/// Runs one [`Content`] through feature extraction, sentiment, image
/// analysis, scoring and suggestions. Holds no per-analysis state, so a
/// shared instance may serve concurrent callers.
pub struct ContentAnalyzer {
    config: Arc<Config>,
    provider: Box<dyn SentimentProvider>,
    images: Box<dyn ImageAnalyzer>,
    scorer: CompositeScorer,
    suggestions: SuggestionGenerator,
}

impl ContentAnalyzer {
    pub fn new(
        config: Arc<Config>,
        provider: Box<dyn SentimentProvider>,
        images: Box<dyn ImageAnalyzer>,
    ) -> Self {
        let scorer = CompositeScorer::new(config.analysis.weights.clone());
        Self {
            config,
            provider,
            images,
            scorer,
            suggestions: SuggestionGenerator::new(),
        }
    }

    pub fn from_config(config: Arc<Config>) -> Result<Self, ConfigError> {
        config.validate()?;
        let provider = build_provider(&config.ai)?;
        let images = Box::new(FileImageAnalyzer::new(config.image.clone()));
        info!(provider = provider.name(), "content analyzer ready");
        Ok(Self::new(config, provider, images))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn provider(&self) -> &dyn SentimentProvider {
        self.provider.as_ref()
    }

    pub fn image_analyzer(&self) -> &dyn ImageAnalyzer {
        self.images.as_ref()
    }

    /// Relative image paths resolve against the configured content directory.
    pub fn resolve_image_path(&self, image: &Image) -> PathBuf {
        resolve_image_path(&self.config, image)
    }

    /// Failed images are logged and skipped. The content fails only when it
    /// references images and none of them could be analyzed.
    pub fn analyze_images(&self, content: &Content) -> Result<Vec<ImageAnalysis>, AnalysisError> {
        let mut analyses = Vec::new();
        let mut failures = Vec::new();

        for image in content.images.iter().filter(|image| !image.path.trim().is_empty()) {
            let path = self.resolve_image_path(image);
            match self.images.analyze(&path) {
                Ok(analysis) => analyses.push(analysis),
                Err(err) => {
                    warn!(content = %content.id, path = %path.display(), error = %err, "image skipped");
                    failures.push(err);
                }
            }
        }

        if analyses.is_empty() && !failures.is_empty() {
            return Err(AnalysisError::Images {
                content_id: content.id.clone(),
                failures,
            });
        }
        Ok(analyses)
    }

    pub async fn analyze(&self, content: &Content) -> Result<AnalysisResult, AnalysisError> {
        debug!(content = %content.id, "analyzing content");
        let report = analyze_text(&content.title, &content.text);
        let images = self.analyze_images(content)?;
        let sentiment = self
            .provider
            .analyze_sentiment(&sentiment_input(content))
            .await;

        let score = self
            .scorer
            .score(&report.text, &images, &report.readability, &report.keywords);
        let suggestions = self.suggestions.generate(SuggestionInput {
            score: &score,
            text: &report.text,
            images: &images,
            readability: &report.readability,
        });

        info!(
            content = %content.id,
            total = %format_float(score.total, 1),
            level = score.level.label(),
            suggestions = suggestions.len(),
            "content analyzed"
        );

        Ok(AnalysisResult {
            content_id: content.id.clone(),
            title: content.title.clone(),
            score,
            text: report.text,
            images,
            suggestions,
            keywords: report.keywords,
            sentiment,
            readability: report.readability,
            created_at: Utc::now(),
        })
    }

    pub async fn advise(&self, result: &AnalysisResult) -> String {
        self.provider.generate_advice(result).await
    }

    pub async fn topics(&self, content: &Content) -> Vec<String> {
        self.provider.extract_topics(&sentiment_input(content)).await
    }
}

fn sentiment_input(content: &Content) -> String {
    if content.title.is_empty() {
        content.text.clone()
    } else {
        format!("{} {}", content.text, content.title)
    }
}

pub fn resolve_image_path(config: &Config, image: &Image) -> PathBuf {
    let path = PathBuf::from(&image.path);
    if path.is_absolute() {
        path
    } else {
        config.content_dir.join(path)
    }
}

/// Advisory checks against the configured limits. Issues never block
/// analysis.
pub fn validate_content(content: &Content, config: &Config, images: &dyn ImageAnalyzer) -> Vec<String> {
    let mut issues = Vec::new();

    let words = count_words(&content.text);
    if words < config.analysis.min_word_count {
        issues.push(format!(
            "word count {} is below the recommended minimum of {}",
            words, config.analysis.min_word_count
        ));
    }
    if words > config.analysis.max_word_count {
        issues.push(format!(
            "word count {} exceeds the recommended maximum of {}",
            words, config.analysis.max_word_count
        ));
    }

    if content.title.trim().is_empty() {
        issues.push("title is missing".to_string());
    } else {
        let title_chars = content.title.chars().count();
        if title_chars > MAX_TITLE_CHARS {
            issues.push(format!(
                "title is {} characters, longer than {}",
                title_chars, MAX_TITLE_CHARS
            ));
        }
    }

    for image in content.images.iter().filter(|image| !image.path.trim().is_empty()) {
        let path = resolve_image_path(config, image);
        if let Err(err) = images.validate(&path) {
            issues.push(err.to_string());
        }
    }

    issues
}

/// Deterministic id for records that do not carry one.
pub fn derive_content_id(text: &str) -> String {
    format!("content_{:016x}", stable_hash64(text))
}

pub(crate) fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

pub fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
