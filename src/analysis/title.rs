use crate::analysis::{contains_digit, find_vocabulary, has_question, EMOTIONAL_WORDS, POWER_WORDS};
use crate::{clamp01, TitleAnalysis};

const HIGH_INTENSITY_PHRASES: &[&str] = &["你不知道", "震惊", "you won't believe", "shocking"];

const LONG_TITLE_CHARS: usize = 50;
const SHORT_TITLE_CHARS: usize = 5;

pub fn analyze_title(title: &str) -> TitleAnalysis {
    let has_numbers = contains_digit(title);
    let has_questions = has_question(title);
    let power_words = find_vocabulary(title, POWER_WORDS);
    let length = title.chars().count();

    TitleAnalysis {
        length,
        has_numbers,
        has_emoji: title.chars().any(is_emoji),
        has_questions,
        emotional_words: find_vocabulary(title, EMOTIONAL_WORDS),
        clickbait_score: clickbait_score(title, has_numbers, has_questions, !power_words.is_empty()),
        clarity_score: clarity_score(length, has_numbers, !power_words.is_empty()),
        power_words,
    }
}

fn clickbait_score(title: &str, has_numbers: bool, has_questions: bool, has_power: bool) -> f64 {
    let lowercase = title.to_lowercase();
    let mut score: f64 = 0.0;
    if has_numbers {
        score += 0.2;
    }
    if has_questions {
        score += 0.15;
    }
    if has_power {
        score += 0.3;
    }
    if HIGH_INTENSITY_PHRASES
        .iter()
        .any(|phrase| lowercase.contains(phrase))
    {
        score += 0.4;
    }
    score.min(1.0)
}

fn clarity_score(length: usize, has_numbers: bool, has_power: bool) -> f64 {
    let mut score: f64 = 1.0;
    if length > LONG_TITLE_CHARS {
        score -= 0.2;
    }
    if length < SHORT_TITLE_CHARS {
        score -= 0.3;
    }
    if !has_numbers && !has_power {
        score -= 0.1;
    }
    clamp01(score)
}

fn is_emoji(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1F300..=0x1F5FF
            | 0x1F600..=0x1F64F
            | 0x1F680..=0x1F6FF
            | 0x1F900..=0x1F9FF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
    )
}
