use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A single post as handed over by the content loader.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Content {
    pub id: String,
    pub title: String,
    pub text: String,
    pub images: Vec<Image>,
    pub tags: Vec<String>,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub engagement: Engagement,
    #[serde(rename = "file_path", skip_serializing_if = "Option::is_none")]
    pub source_path: Option<PathBuf>,
    #[serde(rename = "type")]
    pub content_type: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub width: u32,
    pub height: u32,
    pub size: u64,
    pub format: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Engagement {
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnalysis {
    pub word_count: usize,
    pub char_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub title: TitleAnalysis,
    pub structure: ContentStructure,
    pub style: WritingStyle,
    pub call_to_action: Vec<String>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleAnalysis {
    pub length: usize,
    pub has_numbers: bool,
    pub has_emoji: bool,
    pub has_questions: bool,
    pub emotional_words: Vec<String>,
    pub power_words: Vec<String>,
    pub clickbait_score: f64,
    pub clarity_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    List,
    Qa,
    Story,
    Linear,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStructure {
    pub has_intro: bool,
    pub has_conclusion: bool,
    pub has_bullet_points: bool,
    pub has_numbers: bool,
    pub section_count: usize,
    pub structure: StructureKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Enthusiastic,
    Formal,
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WritingStyle {
    pub tone: Tone,
    pub perspective: Perspective,
    pub formality: f64,
    pub complexity: f64,
    pub authenticity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            SentimentLabel::Positive
        } else if score < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emotions {
    pub joy: f64,
    pub sadness: f64,
    pub anger: f64,
    pub fear: f64,
    pub surprise: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentAnalysis {
    pub overall: SentimentLabel,
    pub score: f64,
    pub emotions: Emotions,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordTrend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Topic,
    Emotion,
    Action,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub frequency: usize,
    pub relevance: f64,
    pub trend: KeywordTrend,
    pub category: KeywordCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingGrade {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadabilityMetrics {
    pub flesch_score: f64,
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    pub complex_word_ratio: f64,
    /// Seconds.
    pub reading_time: u64,
    pub grade: ReadingGrade,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElements {
    pub dominant_colors: Vec<String>,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionAnalysis {
    pub rule_of_thirds: bool,
    pub symmetry: bool,
    pub balance_score: f64,
    pub focus_clarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub resolution: String,
    pub resolution_score: f64,
    pub sharpness: f64,
    pub exposure_score: f64,
    pub overall_quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleAnalysis {
    pub style: String,
    pub mood: String,
}

/// Produced by the image collaborator; the scorer only reads `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    pub path: String,
    pub visual: VisualElements,
    pub composition: CompositionAnalysis,
    pub quality: QualityMetrics,
    pub style: StyleAnalysis,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ContentQuality,
    Engagement,
    Visual,
    Title,
    Readability,
    TrendRelevance,
}

impl Dimension {
    /// Scan order for strongest/weakest selection; earlier entries win ties.
    pub const ALL: [Dimension; 6] = [
        Dimension::ContentQuality,
        Dimension::Engagement,
        Dimension::Visual,
        Dimension::Title,
        Dimension::Readability,
        Dimension::TrendRelevance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Dimension::ContentQuality => "content quality",
            Dimension::Engagement => "engagement",
            Dimension::Visual => "visual",
            Dimension::Title => "title",
            Dimension::Readability => "readability",
            Dimension::TrendRelevance => "trend relevance",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub content_quality: f64,
    pub engagement: f64,
    pub visual: f64,
    pub title: f64,
    pub readability: f64,
    pub trend_relevance: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::ContentQuality => self.content_quality,
            Dimension::Engagement => self.engagement,
            Dimension::Visual => self.visual,
            Dimension::Title => self.title,
            Dimension::Readability => self.readability,
            Dimension::TrendRelevance => self.trend_relevance,
        }
    }

    pub fn strongest(&self) -> Dimension {
        let mut best = Dimension::ALL[0];
        for dimension in Dimension::ALL.iter().skip(1) {
            if self.get(*dimension) > self.get(best) {
                best = *dimension;
            }
        }
        best
    }

    pub fn weakest(&self) -> Dimension {
        let mut worst = Dimension::ALL[0];
        for dimension in Dimension::ALL.iter().skip(1) {
            if self.get(*dimension) < self.get(worst) {
                worst = *dimension;
            }
        }
        worst
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Level {
    pub fn from_total(total: f64) -> Self {
        if total >= 85.0 {
            Level::Excellent
        } else if total >= 70.0 {
            Level::Good
        } else if total >= 50.0 {
            Level::Average
        } else {
            Level::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Excellent => "excellent",
            Level::Good => "good",
            Level::Average => "average",
            Level::Poor => "poor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallScore {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub level: Level,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Title,
    Structure,
    Engagement,
    Readability,
    Visual,
}

impl SuggestionKind {
    pub fn label(self) -> &'static str {
        match self {
            SuggestionKind::Title => "title",
            SuggestionKind::Structure => "structure",
            SuggestionKind::Engagement => "engagement",
            SuggestionKind::Readability => "readability",
            SuggestionKind::Visual => "visual",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub priority: Priority,
    pub current: String,
    pub recommended: String,
    pub reasoning: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub content_id: String,
    pub title: String,
    pub score: OverallScore,
    pub text: TextAnalysis,
    pub images: Vec<ImageAnalysis>,
    pub suggestions: Vec<Suggestion>,
    pub keywords: Vec<Keyword>,
    pub sentiment: SentimentAnalysis,
    pub readability: ReadabilityMetrics,
    pub created_at: DateTime<Utc>,
}
