#![allow(dead_code)]

use quiz_insight::analysis::{
    AnalyzerConfig, FixedJitter, PerformanceRecord, PerformanceRecords, Subject, WeaknessAnalyzer,
};
use quiz_insight::recommendation::RecommendationEngine;

pub fn record(total: u32, correct: u32, average_time: f64) -> PerformanceRecord {
    PerformanceRecord::new(total, correct, Some(average_time))
}

pub fn records(entries: &[(Subject, PerformanceRecord)]) -> PerformanceRecords {
    entries.iter().cloned().collect()
}

/// The demo learner with `lastUpdated` stripped so fixtures compare equal.
pub fn demo_learner() -> PerformanceRecords {
    let mut records = quiz_insight::store::demo_records();
    for record in records.values_mut() {
        record.last_updated = None;
    }
    records
}

pub fn pinned_analyzer() -> WeaknessAnalyzer {
    WeaknessAnalyzer::new(AnalyzerConfig::default()).with_jitter(FixedJitter(0.0))
}

pub fn engine() -> RecommendationEngine {
    RecommendationEngine::default()
}
