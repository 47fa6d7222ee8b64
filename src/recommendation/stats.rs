use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::types::{Difficulty, Priority, Subject};
use crate::recommendation::types::RecommendationInstance;

/// Counts over a recommendation list, for dashboards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationStats {
    pub total: usize,
    pub by_subject: BTreeMap<Subject, usize>,
    pub by_difficulty: BTreeMap<Difficulty, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
}

impl RecommendationStats {
    pub fn from_recommendations(recommendations: &[RecommendationInstance]) -> Self {
        let mut stats = Self {
            total: recommendations.len(),
            ..Default::default()
        };
        for rec in recommendations {
            *stats.by_subject.entry(rec.subject.clone()).or_default() += 1;
            *stats
                .by_difficulty
                .entry(rec.template.difficulty)
                .or_default() += 1;
            *stats.by_priority.entry(rec.priority).or_default() += 1;
        }
        stats
    }
}
