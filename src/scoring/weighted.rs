use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::{clamp_score, ScoreBreakdown};

/// Largest accepted distance between the weight sum and 1.0.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub content_quality: f64,
    pub engagement: f64,
    pub visual: f64,
    pub title: f64,
    pub readability: f64,
    pub trend_relevance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            content_quality: 0.25,
            engagement: 0.20,
            visual: 0.15,
            title: 0.15,
            readability: 0.15,
            trend_relevance: 0.10,
        }
    }
}

impl ScoreWeights {
    fn named(&self) -> [(&'static str, f64); 6] {
        [
            ("content_quality", self.content_quality),
            ("engagement", self.engagement),
            ("visual", self.visual),
            ("title", self.title),
            ("readability", self.readability),
            ("trend_relevance", self.trend_relevance),
        ]
    }

    pub fn sum(&self) -> f64 {
        self.named().iter().map(|(_, value)| value).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in self.named() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: ScoreWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Plain weighted sum, clamped to [0, 100]. Weights are not renormalized.
    pub fn score(&self, breakdown: &ScoreBreakdown) -> f64 {
        let mut score = 0.0;

        score += breakdown.content_quality * self.weights.content_quality;
        score += breakdown.engagement * self.weights.engagement;
        score += breakdown.visual * self.weights.visual;
        score += breakdown.title * self.weights.title;
        score += breakdown.readability * self.weights.readability;
        score += breakdown.trend_relevance * self.weights.trend_relevance;

        clamp_score(score)
    }
}
