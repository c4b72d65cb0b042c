//! AI provider capability: sentiment, advice and topic extraction.
//!
//! Every method is infallible by signature. Remote providers make exactly one
//! attempt per call and fall back to [`LexiconProvider`] on any failure, so a
//! remote outage degrades results instead of surfacing an error.

mod lexicon;
mod remote;

use async_trait::async_trait;
use tracing::warn;

use crate::config::{AiConfig, ProviderKind};
use crate::error::ConfigError;
use crate::{AnalysisResult, SentimentAnalysis};

pub use lexicon::{lexicon_advice, lexicon_sentiment, lexicon_topics, LexiconProvider};
pub use remote::{RemoteKind, RemoteProvider};

/// Upper bound on topics returned by any provider.
pub const MAX_TOPICS: usize = 5;

#[async_trait]
pub trait SentimentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_remote(&self) -> bool {
        false
    }

    async fn analyze_sentiment(&self, text: &str) -> SentimentAnalysis;

    async fn generate_advice(&self, result: &AnalysisResult) -> String;

    async fn extract_topics(&self, text: &str) -> Vec<String>;
}

/// Selects the provider once from configuration. Unknown tags fail here, not
/// per call.
pub fn build_provider(config: &AiConfig) -> Result<Box<dyn SentimentProvider>, ConfigError> {
    let remote_kind = match config.kind()? {
        ProviderKind::Local => return Ok(Box::new(LexiconProvider)),
        ProviderKind::OpenAi => RemoteKind::OpenAi,
        ProviderKind::Claude => RemoteKind::Claude,
    };

    if config.api_key.trim().is_empty() {
        warn!(
            provider = remote_kind.label(),
            "AI API key not configured; using local lexicon provider"
        );
        return Ok(Box::new(LexiconProvider));
    }

    let provider = RemoteProvider::new(remote_kind, config).map_err(ConfigError::HttpClient)?;
    Ok(Box::new(provider))
}
