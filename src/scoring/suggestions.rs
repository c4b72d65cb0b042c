use crate::{
    format_float, ImageAnalysis, OverallScore, Priority, ReadabilityMetrics, Suggestion,
    SuggestionKind, TextAnalysis,
};

/// Title scores below this trigger a title suggestion.
pub const TITLE_SCORE_THRESHOLD: f64 = 70.0;
/// Flesch scores below this trigger a readability suggestion.
pub const FLESCH_THRESHOLD: f64 = 50.0;

/// The parts of an analysis the suggestion rules read.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionInput<'a> {
    pub score: &'a OverallScore,
    pub text: &'a TextAnalysis,
    pub images: &'a [ImageAnalysis],
    pub readability: &'a ReadabilityMetrics,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionGenerator;

impl SuggestionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Rules are independent and always evaluated in the same order:
    /// title, structure, engagement, readability, visual.
    pub fn generate(&self, input: SuggestionInput<'_>) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        let title_score = input.score.breakdown.title;
        if title_score < TITLE_SCORE_THRESHOLD {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Title,
                priority: Priority::High,
                current: "The title does not grab attention".to_string(),
                recommended: "Add a number, a question or an emotional word to the title"
                    .to_string(),
                reasoning: format!(
                    "Title score is only {}, below the {} target",
                    format_float(title_score, 1),
                    format_float(TITLE_SCORE_THRESHOLD, 0)
                ),
                examples: Vec::new(),
                impact: "Expected click-through lift of 15-25%".to_string(),
            });
        }

        if !input.text.structure.has_intro {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Structure,
                priority: Priority::Medium,
                current: "The post lacks an engaging opening".to_string(),
                recommended: "Open with a question, a short story or a striking number"
                    .to_string(),
                reasoning: "A strong opening raises the share of readers who finish the post"
                    .to_string(),
                examples: Vec::new(),
                impact: "Expected completion-rate lift of about 20%".to_string(),
            });
        }

        if input.text.call_to_action.is_empty() {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Engagement,
                priority: Priority::High,
                current: "No call to action found".to_string(),
                recommended: "Invite readers to reply, like or share at a natural point"
                    .to_string(),
                reasoning: format!(
                    "Engagement score is {}; explicit prompts are the cheapest engagement driver",
                    format_float(input.score.breakdown.engagement, 1)
                ),
                examples: vec![
                    "Have you run into this too? Let me know in the comments".to_string(),
                    "快来评论区分享你的经验".to_string(),
                    "If this helped, follow me for more".to_string(),
                ],
                impact: "Expected interaction lift of about 30%".to_string(),
            });
        }

        let flesch = input.readability.flesch_score;
        if flesch < FLESCH_THRESHOLD {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Readability,
                priority: Priority::Medium,
                current: "The text is hard to read".to_string(),
                recommended: "Use shorter sentences and simpler words".to_string(),
                reasoning: format!(
                    "Readability index is {}; aim for 60 or higher",
                    format_float(flesch, 1)
                ),
                examples: Vec::new(),
                impact: "Smoother reading experience and longer dwell time".to_string(),
            });
        }

        if input.images.is_empty() {
            suggestions.push(Suggestion {
                kind: SuggestionKind::Visual,
                priority: Priority::High,
                current: "The post has no visual elements".to_string(),
                recommended: "Add a relevant image, chart or screenshot".to_string(),
                reasoning: format!(
                    "Visual score is {} without images",
                    format_float(input.score.breakdown.visual, 1)
                ),
                examples: Vec::new(),
                impact: "Expected participation lift of 40-60%".to_string(),
            });
        }

        suggestions
    }
}
