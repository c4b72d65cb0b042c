use std::collections::HashMap;

use crate::{Keyword, KeywordCategory, KeywordTrend};

const MIN_FREQUENCY: usize = 2;

const STOPWORDS: &[&str] = &[
    "的", "是", "在", "我", "你", "他", "了", "和", "就", "都", "而", "及", "与", "或", "但",
    "为", "也", "不", "可以", "这个", "那个", "什么", "怎么", "the", "a", "an", "and", "or",
    "but", "in", "on", "at", "to", "for", "of", "with", "by", "is", "are", "was", "were",
    "be", "it", "this", "that", "you", "your", "we", "our", "my",
];

const EMOTION_CUES: &[&str] = &[
    "好", "棒", "差", "爱", "恨", "喜欢", "讨厌", "love", "hate", "great", "awful", "happy",
    "sad",
];
const ACTION_CUES: &[&str] = &[
    "做", "买", "用", "看", "听", "学", "教", "buy", "try", "learn", "make", "watch", "build",
];

/// Frequency-based keywords in first-occurrence order. Relevance is the
/// keyword's frequency over the token count before any filtering.
pub fn extract_keywords(text: &str) -> Vec<Keyword> {
    let lowercase = text.to_lowercase();
    let tokens: Vec<&str> = lowercase.split_whitespace().collect();
    let total = tokens.len();

    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for token in &tokens {
        let word: String = token.chars().filter(|c| c.is_alphanumeric()).collect();
        if word.chars().count() <= 1 || STOPWORDS.contains(&word.as_str()) {
            continue;
        }
        match index.get(&word) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(word.clone(), order.len());
                order.push((word, 1));
            }
        }
    }

    order
        .into_iter()
        .filter(|(_, frequency)| *frequency >= MIN_FREQUENCY)
        .map(|(word, frequency)| Keyword {
            relevance: frequency as f64 / total as f64,
            trend: KeywordTrend::Stable,
            category: categorize(&word),
            word,
            frequency,
        })
        .collect()
}

fn categorize(word: &str) -> KeywordCategory {
    if EMOTION_CUES.iter().any(|cue| word.contains(cue)) {
        KeywordCategory::Emotion
    } else if ACTION_CUES.iter().any(|cue| word.contains(cue)) {
        KeywordCategory::Action
    } else {
        KeywordCategory::Topic
    }
}
