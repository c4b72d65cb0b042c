use crate::scoring::{ScoreWeights, WeightedScorer};
use crate::{
    clamp_score, format_float, ImageAnalysis, Keyword, KeywordTrend, Level, OverallScore,
    Perspective, ReadabilityMetrics, ScoreBreakdown, TextAnalysis, TitleAnalysis,
};

/// Visual score for a post without images.
pub const NO_IMAGE_VISUAL_SCORE: f64 = 30.0;

#[derive(Debug, Clone)]
pub struct CompositeScorer {
    weighted: WeightedScorer,
}

impl CompositeScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self {
            weighted: WeightedScorer::new(weights),
        }
    }

    pub fn breakdown(
        &self,
        text: &TextAnalysis,
        images: &[ImageAnalysis],
        readability: &ReadabilityMetrics,
        keywords: &[Keyword],
    ) -> ScoreBreakdown {
        ScoreBreakdown {
            content_quality: content_quality_score(text),
            engagement: engagement_score(text),
            visual: visual_score(images),
            title: title_score(&text.title),
            readability: readability_score(readability),
            trend_relevance: trend_relevance_score(keywords),
        }
    }

    pub fn score(
        &self,
        text: &TextAnalysis,
        images: &[ImageAnalysis],
        readability: &ReadabilityMetrics,
        keywords: &[Keyword],
    ) -> OverallScore {
        let breakdown = self.breakdown(text, images, readability, keywords);
        self.finalize(breakdown)
    }

    pub fn finalize(&self, breakdown: ScoreBreakdown) -> OverallScore {
        let total = self.weighted.score(&breakdown);
        let reasoning = format!(
            "Overall score {}: strongest in {}, weakest in {}",
            format_float(total, 1),
            breakdown.strongest().label(),
            breakdown.weakest().label()
        );

        OverallScore {
            total,
            breakdown,
            level: Level::from_total(total),
            reasoning,
        }
    }
}

pub fn content_quality_score(text: &TextAnalysis) -> f64 {
    let mut score = 60.0;
    if (100..=800).contains(&text.word_count) {
        score += 20.0;
    }
    if text.structure.has_intro && text.structure.has_conclusion {
        score += 15.0;
    }
    if !text.call_to_action.is_empty() {
        score += 5.0;
    }
    clamp_score(score)
}

pub fn engagement_score(text: &TextAnalysis) -> f64 {
    let mut score = 50.0;
    if !text.call_to_action.is_empty() {
        score += 20.0;
    }
    if text.title.has_questions {
        score += 15.0;
    }
    if !text.title.emotional_words.is_empty() {
        score += 10.0;
    }
    if text.style.perspective == Perspective::Second {
        score += 5.0;
    }
    clamp_score(score)
}

pub fn visual_score(images: &[ImageAnalysis]) -> f64 {
    if images.is_empty() {
        return NO_IMAGE_VISUAL_SCORE;
    }
    let total: f64 = images.iter().map(|image| image.score).sum();
    clamp_score(total / images.len() as f64)
}

pub fn title_score(title: &TitleAnalysis) -> f64 {
    let mut score = 50.0;
    if (10..=30).contains(&title.length) {
        score += 20.0;
    }
    if title.has_numbers {
        score += 10.0;
    }
    if !title.power_words.is_empty() {
        score += 15.0;
    }
    if title.clarity_score > 0.8 {
        score += 5.0;
    }
    clamp_score(score)
}

pub fn readability_score(readability: &ReadabilityMetrics) -> f64 {
    let mut score = 50.0;
    if readability.flesch_score > 70.0 {
        score += 30.0;
    } else if readability.flesch_score > 50.0 {
        score += 20.0;
    } else if readability.flesch_score > 30.0 {
        score += 10.0;
    }
    if (10.0..=20.0).contains(&readability.avg_sentence_length) {
        score += 10.0;
    }
    if readability.complex_word_ratio < 0.2 {
        score += 10.0;
    }
    clamp_score(score)
}

pub fn trend_relevance_score(keywords: &[Keyword]) -> f64 {
    let mut score = 60.0;
    for keyword in keywords {
        if keyword.trend == KeywordTrend::Rising {
            score += 5.0;
        }
        if keyword.relevance > 0.05 {
            score += 2.0;
        }
    }
    clamp_score(score)
}
