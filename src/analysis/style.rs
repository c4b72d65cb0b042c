use crate::analysis::{
    count_occurrences, count_words, find_vocabulary, has_question, word_length_stats,
    EMOTIONAL_WORDS,
};
use crate::{clamp01, Perspective, Tone, WritingStyle};

const ENTHUSIASTIC_MIN_EMOTIONAL_WORDS: usize = 3;

// CJK pronouns are counted as substrings; English pronouns as whole tokens.
const FIRST_PERSON_CJK: &[&str] = &["我"];
const SECOND_PERSON_CJK: &[&str] = &["你", "您"];
const FIRST_PERSON_EN: &[&str] = &["i", "me", "my", "mine", "we", "us", "our"];
const SECOND_PERSON_EN: &[&str] = &["you", "your", "yours"];

const FORMAL_WORDS: &[&str] = &[
    "因此", "然而", "此外", "综上所述", "鉴于", "据此", "therefore", "however", "furthermore",
    "moreover", "consequently",
];
const CASUAL_WORDS: &[&str] = &[
    "哈哈", "嗯", "呀", "哦", "额", "咋样", "lol", "haha", "gonna", "wanna", "yeah",
];

const PERSONAL_PHRASES: &[&str] = &[
    "我觉得", "我认为", "我的经验", "亲身体验", "我发现", "i think", "in my experience",
    "i found", "i tried",
];
const MARKETING_PHRASES: &[&str] = &[
    "绝对", "百分百", "保证", "必定", "一定能", "guaranteed", "100%", "best ever",
];

pub fn classify_style(text: &str) -> WritingStyle {
    WritingStyle {
        tone: identify_tone(text),
        perspective: identify_perspective(text),
        formality: formality(text),
        complexity: complexity(text),
        authenticity: authenticity(text),
    }
}

fn identify_tone(text: &str) -> Tone {
    if find_vocabulary(text, EMOTIONAL_WORDS).len() > ENTHUSIASTIC_MIN_EMOTIONAL_WORDS {
        return Tone::Enthusiastic;
    }
    let has_terminal = text.contains('。') || text.contains('.');
    if has_terminal && !has_question(text) {
        Tone::Formal
    } else {
        Tone::Casual
    }
}

fn identify_perspective(text: &str) -> Perspective {
    let lowercase = text.to_lowercase();
    let mut first = count_occurrences(&lowercase, FIRST_PERSON_CJK);
    let mut second = count_occurrences(&lowercase, SECOND_PERSON_CJK);

    for token in lowercase.split_whitespace() {
        // "I'm", "you're": the pronoun is the part before the apostrophe.
        let stem = token.split(['\'', '\u{2019}']).next().unwrap_or(token);
        let word: String = stem.chars().filter(|c| c.is_alphanumeric()).collect();
        if FIRST_PERSON_EN.contains(&word.as_str()) {
            first += 1;
        } else if SECOND_PERSON_EN.contains(&word.as_str()) {
            second += 1;
        }
    }

    if first == 0 && second == 0 {
        Perspective::Third
    } else if first >= second {
        Perspective::First
    } else {
        Perspective::Second
    }
}

fn formality(text: &str) -> f64 {
    let total = count_words(text);
    if total == 0 {
        return 0.5;
    }
    let formal = count_occurrences(text, FORMAL_WORDS) as f64;
    let casual = count_occurrences(text, CASUAL_WORDS) as f64;
    clamp01(0.5 + (formal - casual) / total as f64)
}

fn complexity(text: &str) -> f64 {
    let stats = word_length_stats(text);
    if stats.words == 0 {
        return 0.0;
    }
    clamp01(0.6 * (stats.avg_word_length / 10.0) + 0.4 * stats.complex_word_ratio)
}

fn authenticity(text: &str) -> f64 {
    let lowercase = text.to_lowercase();
    let personal = PERSONAL_PHRASES
        .iter()
        .filter(|phrase| lowercase.contains(*phrase))
        .count() as f64;
    let marketing = MARKETING_PHRASES
        .iter()
        .filter(|phrase| lowercase.contains(*phrase))
        .count() as f64;
    clamp01(0.8 + 0.05 * personal - 0.1 * marketing)
}
