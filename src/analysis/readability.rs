use crate::analysis::text::count_sentences;
use crate::analysis::{count_words, word_length_stats};
use crate::{ReadabilityMetrics, ReadingGrade};

const WORDS_PER_MINUTE: f64 = 250.0;
const MIN_READING_SECONDS: u64 = 30;

/// Flesch-style index with average word length standing in for syllables.
pub fn score_readability(text: &str) -> ReadabilityMetrics {
    let word_count = count_words(text);
    let sentence_count = count_sentences(text).max(1);
    let avg_sentence_length = word_count as f64 / sentence_count as f64;

    let stats = word_length_stats(text);
    let flesch_score =
        206.835 - 1.015 * avg_sentence_length - 84.6 * (stats.avg_word_length / 4.7);

    let grade = if flesch_score > 80.0 {
        ReadingGrade::Easy
    } else if flesch_score < 50.0 {
        ReadingGrade::Hard
    } else {
        ReadingGrade::Medium
    };

    let estimated = (word_count as f64 / WORDS_PER_MINUTE * 60.0).round() as u64;

    ReadabilityMetrics {
        flesch_score,
        avg_sentence_length,
        avg_word_length: stats.avg_word_length,
        complex_word_ratio: stats.complex_word_ratio,
        reading_time: estimated.max(MIN_READING_SECONDS),
        grade,
    }
}
