pub mod analysis;
pub mod config;
pub mod logging;
pub mod recommendation;
pub mod store;

use serde::Serialize;

use crate::analysis::{Analysis, PerformanceRecords, ProfileStats, WeaknessAnalyzer};
use crate::recommendation::{RecommendationEngine, RecommendationInstance, RecommendationStats};

/// Everything produced for one learner in a single pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub analysis: Analysis,
    pub recommendations: Vec<RecommendationInstance>,
    pub stats: RecommendationStats,
    pub profile: ProfileStats,
}

impl Report {
    pub fn build(
        analyzer: &WeaknessAnalyzer,
        engine: &RecommendationEngine,
        records: &PerformanceRecords,
    ) -> Self {
        let analysis = analyzer.analyze(records);
        let recommendations = engine.recommend(&analysis);

        let gaps = engine.catalog_gaps(&analysis);
        if !gaps.is_empty() {
            tracing::info!(?gaps, "subjects without catalog content");
        }

        Self {
            stats: RecommendationStats::from_recommendations(&recommendations),
            profile: ProfileStats::from_records(records),
            analysis,
            recommendations,
        }
    }
}
