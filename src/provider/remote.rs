use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AiConfig;
use crate::error::ProviderError;
use crate::provider::{lexicon_advice, lexicon_sentiment, lexicon_topics, SentimentProvider, MAX_TOPICS};
use crate::{clamp01, format_float, AnalysisResult, Emotions, SentimentAnalysis, SentimentLabel};

const OPENAI_BASE: &str = "https://api.openai.com/v1";
const CLAUDE_BASE: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteKind {
    OpenAi,
    Claude,
}

impl RemoteKind {
    pub fn label(self) -> &'static str {
        match self {
            RemoteKind::OpenAi => "openai",
            RemoteKind::Claude => "claude",
        }
    }
}

/// Chat-completion backed provider. One attempt per call; any failure is
/// logged and answered by the lexicon instead.
#[derive(Clone)]
pub struct RemoteProvider {
    kind: RemoteKind,
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl RemoteProvider {
    pub fn new(kind: RemoteKind, config: &AiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()?;
        let api_base = config
            .base_url
            .clone()
            .filter(|base| !base.trim().is_empty())
            .unwrap_or_else(|| match kind {
                RemoteKind::OpenAi => OPENAI_BASE.to_string(),
                RemoteKind::Claude => CLAUDE_BASE.to_string(),
            });

        Ok(Self {
            kind,
            client,
            api_key: config.api_key.clone(),
            api_base,
            model: config.model.clone(),
        })
    }

    pub fn kind(&self) -> RemoteKind {
        self.kind
    }

    async fn complete(&self, prompt: String) -> Result<String, ProviderError> {
        let base = self.api_base.trim_end_matches('/');
        let messages = vec![ChatMessage {
            role: "user".to_string(),
            content: prompt,
        }];

        let request = match self.kind {
            RemoteKind::OpenAi => self
                .client
                .post(format!("{}/chat/completions", base))
                .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
                .json(&ChatRequest {
                    model: self.model.clone(),
                    messages,
                    temperature: 0.2,
                    max_tokens: MAX_TOKENS,
                }),
            RemoteKind::Claude => self
                .client
                .post(format!("{}/v1/messages", base))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", ANTHROPIC_VERSION)
                .header(CONTENT_TYPE, "application/json")
                .json(&MessagesRequest {
                    model: self.model.clone(),
                    max_tokens: MAX_TOKENS,
                    messages,
                }),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status,
                body: body.trim().to_string(),
            });
        }

        let content = match self.kind {
            RemoteKind::OpenAi => {
                let body: ChatResponse = response.json().await?;
                body.choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content)
            }
            RemoteKind::Claude => {
                let body: MessagesResponse = response.json().await?;
                body.content
                    .into_iter()
                    .find(|block| block.kind == "text")
                    .map(|block| block.text)
            }
        };

        let content = content.ok_or(ProviderError::MissingContent)?;
        let content = content.trim();
        if content.is_empty() {
            return Err(ProviderError::MissingContent);
        }
        Ok(content.to_string())
    }

    async fn try_sentiment(&self, text: &str) -> Result<SentimentAnalysis, ProviderError> {
        let content = self.complete(sentiment_prompt(text)).await?;
        let json = extract_json(&content)
            .ok_or_else(|| ProviderError::Parse("response missing JSON object".to_string()))?;
        let raw: RawSentiment =
            serde_json::from_str(&json).map_err(|err| ProviderError::Parse(err.to_string()))?;
        Ok(raw.normalize())
    }

    async fn try_topics(&self, text: &str) -> Result<Vec<String>, ProviderError> {
        let content = self.complete(topics_prompt(text)).await?;
        let json = extract_json_array(&content)
            .ok_or_else(|| ProviderError::Parse("response missing JSON array".to_string()))?;
        let topics: Vec<String> =
            serde_json::from_str(&json).map_err(|err| ProviderError::Parse(err.to_string()))?;
        let topics: Vec<String> = topics
            .into_iter()
            .map(|topic| topic.trim().trim_start_matches('#').to_string())
            .filter(|topic| !topic.is_empty())
            .take(MAX_TOPICS)
            .collect();
        if topics.is_empty() {
            return Err(ProviderError::MissingContent);
        }
        Ok(topics)
    }
}

#[async_trait]
impl SentimentProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        self.kind.label()
    }

    fn is_remote(&self) -> bool {
        true
    }

    async fn analyze_sentiment(&self, text: &str) -> SentimentAnalysis {
        match self.try_sentiment(text).await {
            Ok(sentiment) => sentiment,
            Err(err) => {
                warn!(provider = self.name(), error = %err, "sentiment call failed; using lexicon");
                lexicon_sentiment(text)
            }
        }
    }

    async fn generate_advice(&self, result: &AnalysisResult) -> String {
        match self.complete(advice_prompt(result)).await {
            Ok(advice) => advice,
            Err(err) => {
                warn!(provider = self.name(), error = %err, "advice call failed; using lexicon");
                lexicon_advice(result)
            }
        }
    }

    async fn extract_topics(&self, text: &str) -> Vec<String> {
        match self.try_topics(text).await {
            Ok(topics) => {
                debug!(provider = self.name(), count = topics.len(), "topics extracted");
                topics
            }
            Err(err) => {
                warn!(provider = self.name(), error = %err, "topic call failed; using lexicon");
                lexicon_topics(text)
            }
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Deserialize)]
struct ChatMessageResponse {
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSentiment {
    overall: Option<String>,
    score: f64,
    emotions: Emotions,
    confidence: f64,
}

impl RawSentiment {
    /// Clamps every field into range. The label follows the model's answer
    /// when it is recognised and the score's sign otherwise.
    fn normalize(self) -> SentimentAnalysis {
        let score = if self.score.is_nan() {
            0.0
        } else {
            self.score.clamp(-1.0, 1.0)
        };
        let overall = match self.overall.as_deref().map(str::trim) {
            Some("positive") => SentimentLabel::Positive,
            Some("negative") => SentimentLabel::Negative,
            Some("neutral") => SentimentLabel::Neutral,
            _ => SentimentLabel::from_score(score),
        };

        SentimentAnalysis {
            overall,
            score,
            emotions: Emotions {
                joy: clamp01(self.emotions.joy),
                sadness: clamp01(self.emotions.sadness),
                anger: clamp01(self.emotions.anger),
                fear: clamp01(self.emotions.fear),
                surprise: clamp01(self.emotions.surprise),
            },
            confidence: clamp01(self.confidence),
        }
    }
}

fn sentiment_prompt(text: &str) -> String {
    format!(
        r#"Analyze the sentiment of the following social media post.
Return a single JSON object with these fields:
- overall ("positive", "negative" or "neutral")
- score (-1..1)
- emotions (object with joy, sadness, anger, fear, surprise, each 0..1)
- confidence (0..1)
Output JSON only, no markdown or commentary.

Post:
{}"#,
        text
    )
}

fn topics_prompt(text: &str) -> String {
    format!(
        r#"Extract the main topic tags of the following social media post.
Return a JSON array of at most {} short strings, most relevant first.
Output JSON only, no markdown or commentary.

Post:
{}"#,
        MAX_TOPICS, text
    )
}

fn advice_prompt(result: &AnalysisResult) -> String {
    let breakdown = &result.score.breakdown;
    let suggestions = result
        .suggestions
        .iter()
        .map(|suggestion| format!("- {}: {}", suggestion.kind.label(), suggestion.current))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are a social media editor. Write concise, actionable improvement advice for a post.
Answer in the language of the post title.

Title: {}
Total score: {} ({})
Content quality: {}
Engagement: {}
Visual: {}
Title: {}
Readability: {}
Trend relevance: {}
Word count: {}
Images: {}
Detected issues:
{}"#,
        result.title,
        format_float(result.score.total, 1),
        result.score.level.label(),
        format_float(breakdown.content_quality, 1),
        format_float(breakdown.engagement, 1),
        format_float(breakdown.visual, 1),
        format_float(breakdown.title, 1),
        format_float(breakdown.readability, 1),
        format_float(breakdown.trend_relevance, 1),
        result.text.word_count,
        result.images.len(),
        if suggestions.is_empty() { "- none".to_string() } else { suggestions }
    )
}

fn extract_json(text: &str) -> Option<String> {
    extract_between(text, '{', '}')
}

fn extract_json_array(text: &str) -> Option<String> {
    extract_between(text, '[', ']')
}

fn extract_between(text: &str, open: char, close: char) -> Option<String> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;
    if start >= end {
        return None;
    }
    Some(text[start..=end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_object_from_fenced_reply() {
        let reply = "```json\n{\"score\": 0.4}\n```";
        assert_eq!(extract_json(reply).as_deref(), Some("{\"score\": 0.4}"));
        assert!(extract_json("no json here").is_none());
    }

    #[test]
    fn extracts_array_from_reply() {
        let reply = "Topics: [\"tech\", \"travel\"] hope this helps";
        assert_eq!(
            extract_json_array(reply).as_deref(),
            Some("[\"tech\", \"travel\"]")
        );
    }

    #[test]
    fn normalize_clamps_out_of_range_values() {
        let raw: RawSentiment = serde_json::from_str(
            r#"{"overall": "happy", "score": 3.5, "emotions": {"joy": 1.8, "fear": -0.2}, "confidence": 2}"#,
        )
        .unwrap();
        let sentiment = raw.normalize();
        assert_eq!(sentiment.score, 1.0);
        assert_eq!(sentiment.overall, SentimentLabel::Positive);
        assert_eq!(sentiment.emotions.joy, 1.0);
        assert_eq!(sentiment.emotions.fear, 0.0);
        assert_eq!(sentiment.confidence, 1.0);
    }
}
