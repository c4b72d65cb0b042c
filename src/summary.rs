use std::collections::HashMap;

use serde::Serialize;

use crate::{AnalysisResult, Keyword, ScoreBreakdown};

const TOP_KEYWORDS: usize = 20;
const WEAK_DIMENSION: f64 = 60.0;
const LOW_FLESCH: f64 = 50.0;
const HIGH_TOTAL: f64 = 80.0;

/// Batch-level view over a run of analyses, written next to the per-item
/// entries in `analysis.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchSummary {
    pub total_content: usize,
    pub overall_score: f64,
    pub average_scores: ScoreBreakdown,
    /// Content id of the highest total; the first one wins ties.
    pub best_performing: Option<String>,
    /// Content id of the lowest total; the first one wins ties.
    pub need_improvement: Option<String>,
    pub common_issues: Vec<String>,
    pub success_patterns: Vec<String>,
    pub top_keywords: Vec<Keyword>,
}

pub fn summarize(results: &[AnalysisResult]) -> BatchSummary {
    let mut summary = BatchSummary {
        total_content: results.len(),
        overall_score: 0.0,
        average_scores: ScoreBreakdown {
            content_quality: 0.0,
            engagement: 0.0,
            visual: 0.0,
            title: 0.0,
            readability: 0.0,
            trend_relevance: 0.0,
        },
        best_performing: None,
        need_improvement: None,
        common_issues: Vec::new(),
        success_patterns: Vec::new(),
        top_keywords: Vec::new(),
    };
    if results.is_empty() {
        return summary;
    }

    let count = results.len() as f64;
    let mut best: Option<&AnalysisResult> = None;
    let mut worst: Option<&AnalysisResult> = None;
    let mut totals = summary.average_scores;

    for result in results {
        let breakdown = &result.score.breakdown;
        totals.content_quality += breakdown.content_quality;
        totals.engagement += breakdown.engagement;
        totals.visual += breakdown.visual;
        totals.title += breakdown.title;
        totals.readability += breakdown.readability;
        totals.trend_relevance += breakdown.trend_relevance;
        summary.overall_score += result.score.total;

        if best.map_or(true, |best| result.score.total > best.score.total) {
            best = Some(result);
        }
        if worst.map_or(true, |worst| result.score.total < worst.score.total) {
            worst = Some(result);
        }
    }

    summary.overall_score /= count;
    summary.average_scores = ScoreBreakdown {
        content_quality: totals.content_quality / count,
        engagement: totals.engagement / count,
        visual: totals.visual / count,
        title: totals.title / count,
        readability: totals.readability / count,
        trend_relevance: totals.trend_relevance / count,
    };
    summary.best_performing = best.map(|result| result.content_id.clone());
    summary.need_improvement = worst.map(|result| result.content_id.clone());
    summary.common_issues = common_issues(results);
    summary.success_patterns = success_patterns(results);
    summary.top_keywords = top_keywords(results);
    summary
}

/// Issues shared by more than a third of the batch, in a fixed order.
fn common_issues(results: &[AnalysisResult]) -> Vec<String> {
    let checks: [(&str, fn(&AnalysisResult) -> bool); 5] = [
        ("weak title", |r| r.score.breakdown.title < WEAK_DIMENSION),
        ("little engagement", |r| r.score.breakdown.engagement < WEAK_DIMENSION),
        ("weak visuals", |r| r.score.breakdown.visual < WEAK_DIMENSION),
        ("hard to read", |r| r.readability.flesch_score < LOW_FLESCH),
        ("no call to action", |r| r.text.call_to_action.is_empty()),
    ];

    let threshold = results.len() / 3;
    checks
        .iter()
        .filter_map(|(issue, check)| {
            let hits = results.iter().filter(|result| check(result)).count();
            (hits > threshold).then(|| format!("{} ({} items)", issue, hits))
        })
        .collect()
}

/// Traits held by more than half of the items scoring above 80.
fn success_patterns(results: &[AnalysisResult]) -> Vec<String> {
    let high: Vec<&AnalysisResult> = results
        .iter()
        .filter(|result| result.score.total > HIGH_TOTAL)
        .collect();
    if high.is_empty() {
        return Vec::new();
    }

    let checks: [(&str, fn(&AnalysisResult) -> bool); 4] = [
        ("numbers in the title", |r| r.text.title.has_numbers),
        ("question titles", |r| r.text.title.has_questions),
        ("a clear intro", |r| r.text.structure.has_intro),
        ("a call to action", |r| !r.text.call_to_action.is_empty()),
    ];

    let half = high.len() / 2;
    checks
        .iter()
        .filter(|(_, check)| high.iter().filter(|result| check(result)).count() > half)
        .map(|(pattern, _)| pattern.to_string())
        .collect()
}

/// Keywords merged across the batch: frequencies add up, relevance is
/// averaged pairwise. Sorted by frequency, first occurrence breaking ties.
fn top_keywords(results: &[AnalysisResult]) -> Vec<Keyword> {
    let mut merged: Vec<Keyword> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for keyword in results.iter().flat_map(|result| &result.keywords) {
        match index.get(&keyword.word) {
            Some(&slot) => {
                let existing = &mut merged[slot];
                existing.frequency += keyword.frequency;
                existing.relevance = (existing.relevance + keyword.relevance) / 2.0;
            }
            None => {
                index.insert(keyword.word.clone(), merged.len());
                merged.push(keyword.clone());
            }
        }
    }

    merged.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    merged.truncate(TOP_KEYWORDS);
    merged
}
