pub mod composite;
pub mod suggestions;
pub mod weighted;

pub use composite::{
    content_quality_score, engagement_score, readability_score, title_score,
    trend_relevance_score, visual_score, CompositeScorer, NO_IMAGE_VISUAL_SCORE,
};
pub use suggestions::{SuggestionGenerator, SuggestionInput};
pub use weighted::{ScoreWeights, WeightedScorer};
