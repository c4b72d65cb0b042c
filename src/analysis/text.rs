use once_cell::sync::Lazy;
use regex::Regex;

use crate::analysis::{contains_digit, count_words, has_question};
use crate::{ContentStructure, StructureKind};

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence regex"));
static PARAGRAPH_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\r?\n[ \t]*\r?\n").expect("paragraph regex"));
static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s").expect("heading regex"));
static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[\p{L}\p{N}_]+").expect("hashtag regex"));
static MENTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[\p{L}\p{N}_]+").expect("mention regex"));
static NUMBERED_ITEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\.").expect("numbered item regex"));

static CTA_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"点击.*链接",
        r"立即.*",
        r"马上.*",
        r"赶快.*",
        r"快来.*",
        r"关注我",
        r"点赞.*",
        r"评论.*",
        r"分享.*",
        r"收藏.*",
        r"了解更多",
        r"查看更多",
        r"阅读全文",
        r"click (?:the )?link",
        r"link in (?:my )?bio",
        r"follow (?:me|us)",
        r"read more",
        r"learn more",
        r"sign up",
        r"subscribe",
        r"comment below",
        r"let me know",
        r"tag a friend",
        r"share (?:this|with)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("cta regex"))
    .collect()
});

const INTRO_WORDS: &[&str] = &[
    "大家好", "今天", "最近", "分享", "介绍", "hello", "hi everyone", "hey everyone", "today",
    "recently", "welcome", "introduc",
];

const CONCLUSION_WORDS: &[&str] = &[
    "总结", "总之", "最后", "综上", "结论", "希望", "感谢", "in summary", "in conclusion",
    "to sum up", "finally", "hope", "thank",
];

/// Window (in characters) inspected at each end of the text for intro/conclusion cues.
const EDGE_WINDOW_CHARS: usize = 100;
const SECTION_LINE_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct TextFeatures {
    pub word_count: usize,
    pub char_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub structure: ContentStructure,
    pub call_to_action: Vec<String>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
}

pub fn extract_text_features(text: &str) -> TextFeatures {
    TextFeatures {
        word_count: count_words(text),
        char_count: text.chars().count(),
        paragraph_count: count_paragraphs(text),
        sentence_count: count_sentences(text),
        structure: detect_structure(text),
        call_to_action: extract_calls_to_action(text),
        hashtags: find_all(&HASHTAG_RE, text),
        mentions: find_all(&MENTION_RE, text),
    }
}

pub fn count_sentences(text: &str) -> usize {
    SENTENCE_SPLIT_RE
        .split(text)
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

pub fn count_paragraphs(text: &str) -> usize {
    PARAGRAPH_SPLIT_RE
        .split(text.trim())
        .filter(|segment| !segment.trim().is_empty())
        .count()
}

/// Starts at one and adds a section per heading line or short all-caps line.
pub fn count_sections(text: &str) -> usize {
    let mut sections = 1;
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if HEADING_RE.is_match(trimmed) || is_caps_heading(trimmed) {
            sections += 1;
        }
    }
    sections
}

fn is_caps_heading(line: &str) -> bool {
    line.chars().count() < SECTION_LINE_MAX_CHARS
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
}

/// Matches of every pattern, in pattern order. Overlapping matches from
/// different patterns are all kept.
pub fn extract_calls_to_action(text: &str) -> Vec<String> {
    let lowercase = text.to_lowercase();
    CTA_PATTERNS
        .iter()
        .flat_map(|pattern| pattern.find_iter(&lowercase).map(|m| m.as_str().to_string()))
        .collect()
}

fn find_all(pattern: &Regex, text: &str) -> Vec<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn detect_structure(text: &str) -> ContentStructure {
    let has_intro = has_intro(text);
    let has_conclusion = has_conclusion(text);
    let has_bullet_points = has_bullet_points(text);

    let structure = if has_bullet_points {
        StructureKind::List
    } else if has_question(text) {
        StructureKind::Qa
    } else if has_intro && has_conclusion {
        StructureKind::Story
    } else {
        StructureKind::Linear
    };

    ContentStructure {
        has_intro,
        has_conclusion,
        has_bullet_points,
        has_numbers: contains_digit(text),
        section_count: count_sections(text),
        structure,
    }
}

fn has_intro(text: &str) -> bool {
    let head: String = text.to_lowercase().chars().take(EDGE_WINDOW_CHARS).collect();
    INTRO_WORDS.iter().any(|word| head.contains(word))
}

fn has_conclusion(text: &str) -> bool {
    let lowercase = text.to_lowercase();
    let total = lowercase.chars().count();
    let tail: String = lowercase
        .chars()
        .skip(total.saturating_sub(EDGE_WINDOW_CHARS))
        .collect();
    CONCLUSION_WORDS.iter().any(|word| tail.contains(word))
}

fn has_bullet_points(text: &str) -> bool {
    text.lines().any(|line| {
        let trimmed = line.trim();
        trimmed.starts_with('•')
            || trimmed.starts_with('-')
            || trimmed.starts_with('*')
            || NUMBERED_ITEM_RE.is_match(trimmed)
    })
}
