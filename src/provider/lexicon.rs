use async_trait::async_trait;

use crate::analysis::count_occurrences;
use crate::provider::{SentimentProvider, MAX_TOPICS};
use crate::{
    format_float, AnalysisResult, Emotions, Priority, SentimentAnalysis, SentimentLabel,
};

const POSITIVE_WORDS: &[&str] = &[
    "好", "棒", "优秀", "喜欢", "爱", "开心", "满意", "推荐", "amazing", "great", "excellent",
    "wonderful", "fantastic", "love",
];

const NEGATIVE_WORDS: &[&str] = &[
    "差", "坏", "糟糕", "讨厌", "恨", "失望", "不满", "后悔", "terrible", "awful", "horrible",
    "disappointing", "hate",
];

const JOY_CUES: &[&str] = &["开心", "高兴", "快乐", "happy", "joy"];
const SADNESS_CUES: &[&str] = &["难过", "伤心", "sad", "heartbroken"];
const ANGER_CUES: &[&str] = &["生气", "愤怒", "angry", "furious"];
const FEAR_CUES: &[&str] = &["害怕", "恐惧", "afraid", "scared"];
const SURPRISE_CUES: &[&str] = &["惊讶", "意外", "surprised", "unexpected"];

const LEXICON_SCORE: f64 = 0.6;
const LEXICON_CONFIDENCE: f64 = 0.6;
const EMOTION_HIT: f64 = 0.7;

const TOPIC_TABLE: &[(&str, &[&str])] = &[
    ("food", &["吃", "食物", "餐厅", "菜", "味道", "料理", "烹饪", "recipe", "restaurant"]),
    ("travel", &["旅游", "景点", "酒店", "机票", "攻略", "风景", "旅行", "度假", "travel", "hotel"]),
    ("tech", &["手机", "电脑", "软件", "app", "数码", "互联网", "科技", "技术", "software", "tech"]),
    ("fashion", &["穿搭", "化妆", "护肤", "衣服", "搭配", "美妆", "时尚", "潮流", "fashion", "outfit"]),
    ("lifestyle", &["日常", "分享", "经验", "感受", "生活", "日记", "心情", "daily", "lifestyle"]),
    ("health", &["健身", "运动", "养生", "保健", "医疗", "健康", "锻炼", "营养", "fitness", "workout"]),
    ("education", &["学习", "教程", "知识", "技能", "培训", "教育", "课程", "学校", "tutorial", "learn"]),
    ("entertainment", &["电影", "音乐", "游戏", "娱乐", "明星", "综艺", "动漫", "小说", "movie", "music"]),
];

const FALLBACK_TOPIC: &str = "other";

/// Local heuristic provider. Deterministic, never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconProvider;

#[async_trait]
impl SentimentProvider for LexiconProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn analyze_sentiment(&self, text: &str) -> SentimentAnalysis {
        lexicon_sentiment(text)
    }

    async fn generate_advice(&self, result: &AnalysisResult) -> String {
        lexicon_advice(result)
    }

    async fn extract_topics(&self, text: &str) -> Vec<String> {
        lexicon_topics(text)
    }
}

pub fn lexicon_sentiment(text: &str) -> SentimentAnalysis {
    let positive = count_occurrences(text, POSITIVE_WORDS);
    let negative = count_occurrences(text, NEGATIVE_WORDS);

    let score = if positive > negative {
        LEXICON_SCORE
    } else if negative > positive {
        -LEXICON_SCORE
    } else {
        0.0
    };

    let lowercase = text.to_lowercase();
    let hit = |cues: &[&str]| {
        if cues.iter().any(|cue| lowercase.contains(cue)) {
            EMOTION_HIT
        } else {
            0.0
        }
    };

    SentimentAnalysis {
        overall: SentimentLabel::from_score(score),
        score,
        emotions: Emotions {
            joy: hit(JOY_CUES),
            sadness: hit(SADNESS_CUES),
            anger: hit(ANGER_CUES),
            fear: hit(FEAR_CUES),
            surprise: hit(SURPRISE_CUES),
        },
        confidence: LEXICON_CONFIDENCE,
    }
}

/// Topics in table order, at most [`MAX_TOPICS`]; `["other"]` when nothing
/// matches.
pub fn lexicon_topics(text: &str) -> Vec<String> {
    let lowercase = text.to_lowercase();
    let mut topics: Vec<String> = TOPIC_TABLE
        .iter()
        .filter(|(_, cues)| cues.iter().any(|cue| lowercase.contains(cue)))
        .map(|(topic, _)| topic.to_string())
        .take(MAX_TOPICS)
        .collect();

    if topics.is_empty() {
        topics.push(FALLBACK_TOPIC.to_string());
    }
    topics
}

/// Plain-text advice rendered from the structured suggestions.
pub fn lexicon_advice(result: &AnalysisResult) -> String {
    let mut lines = Vec::new();
    let total = result.score.total;

    let headline = if total < 60.0 {
        "Overall score is low; focus on the items below first."
    } else if total < 80.0 {
        "Solid post with room to improve."
    } else {
        "Strong post; keep the current format."
    };
    lines.push(format!(
        "Score {} ({}). {}",
        format_float(total, 1),
        result.score.level.label(),
        headline
    ));

    for priority in [Priority::High, Priority::Medium, Priority::Low] {
        for suggestion in result
            .suggestions
            .iter()
            .filter(|suggestion| suggestion.priority == priority)
        {
            lines.push(format!(
                "- [{}] {}: {} ({})",
                priority.label(),
                suggestion.kind.label(),
                suggestion.recommended,
                suggestion.impact
            ));
            for example in &suggestion.examples {
                lines.push(format!("    e.g. {}", example));
            }
        }
    }

    if result.suggestions.is_empty() {
        lines.push("- No changes needed.".to_string());
    }

    lines.join("\n")
}
