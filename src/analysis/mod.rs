//! Pure text feature extractors. Every function here is a deterministic
//! function of its input and never fails; empty input yields zeroed output.

pub mod keywords;
pub mod readability;
pub mod style;
pub mod text;
pub mod title;

pub use keywords::extract_keywords;
pub use readability::score_readability;
pub use style::classify_style;
pub use text::{extract_text_features, TextFeatures};
pub use title::analyze_title;

/// Words longer than this (in characters) count as complex.
pub(crate) const COMPLEX_WORD_CHARS: usize = 6;

pub(crate) const EMOTIONAL_WORDS: &[&str] = &[
    "惊喜", "震撼", "感动", "激动", "兴奋", "满足", "幸福", "快乐", "担心", "焦虑", "害怕",
    "紧张", "愤怒", "失望", "沮丧", "amazing", "wonderful", "fantastic", "incredible",
    "awesome", "thrilled", "heartbreaking", "excited", "frustrated",
];

pub(crate) const POWER_WORDS: &[&str] = &[
    "独家", "限时", "免费", "秘密", "揭秘", "内幕", "独特", "创新", "突破", "革命", "颠覆",
    "神器", "必备", "推荐", "精选", "exclusive", "limited", "secret", "unique",
    "breakthrough", "proven", "ultimate", "free",
];

pub(crate) fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

pub(crate) fn contains_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

pub(crate) fn has_question(text: &str) -> bool {
    text.contains('?') || text.contains('？')
}

/// Vocabulary entries found in `text`, case-insensitive, in vocabulary order.
pub(crate) fn find_vocabulary(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let lowercase = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|word| lowercase.contains(&word.to_lowercase()))
        .map(|word| word.to_string())
        .collect()
}

/// Total non-overlapping occurrences of every vocabulary entry.
pub(crate) fn count_occurrences(text: &str, vocabulary: &[&str]) -> usize {
    let lowercase = text.to_lowercase();
    vocabulary
        .iter()
        .map(|word| lowercase.matches(&word.to_lowercase()).count())
        .sum()
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct WordLengthStats {
    pub words: usize,
    pub avg_word_length: f64,
    pub complex_word_ratio: f64,
}

/// Character-length statistics over whitespace-delimited tokens.
pub(crate) fn word_length_stats(text: &str) -> WordLengthStats {
    let mut words = 0usize;
    let mut total_chars = 0usize;
    let mut complex = 0usize;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        words += 1;
        total_chars += len;
        if len > COMPLEX_WORD_CHARS {
            complex += 1;
        }
    }

    if words == 0 {
        return WordLengthStats::default();
    }

    WordLengthStats {
        words,
        avg_word_length: total_chars as f64 / words as f64,
        complex_word_ratio: complex as f64 / words as f64,
    }
}
