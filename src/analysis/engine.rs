use std::collections::BTreeMap;

use chrono::Utc;

use crate::analysis::config::AnalyzerConfig;
use crate::analysis::jitter::{JitterSource, RandomJitter};
use crate::analysis::metrics::subject_metrics;
use crate::analysis::patterns::{classify, difficulty_scores, learning_velocity};
use crate::analysis::plan::{build_weakness_analysis, overall_progress};
use crate::analysis::types::{
    records_from_object, Analysis, PerformanceRecords, Subject, SubjectMetrics, ANALYSIS_VERSION,
};

/// Turns per-subject quiz counters into an [`Analysis`].
///
/// The analyzer never fails on domain input: unscorable records become
/// worst-case sentinel metrics and empty input yields [`Analysis::empty`].
/// It holds no per-call state, so one instance can serve many learners
/// concurrently.
pub struct WeaknessAnalyzer {
    config: AnalyzerConfig,
    jitter: Box<dyn JitterSource>,
}

impl WeaknessAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            jitter: Box::new(RandomJitter),
        }
    }

    /// Replaces the randomness behind `improvement`, e.g. with a
    /// [`SeededJitter`](crate::analysis::jitter::SeededJitter) in tests.
    pub fn with_jitter(mut self, jitter: impl JitterSource + 'static) -> Self {
        self.jitter = Box::new(jitter);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, records: &PerformanceRecords) -> Analysis {
        let timestamp = Utc::now().timestamp_millis();

        if records.is_empty() {
            tracing::debug!("no performance records, returning empty analysis");
            return Analysis::empty(timestamp);
        }

        tracing::debug!(subjects = records.len(), "starting weakness analysis");

        let performance_metrics = self.performance_metrics(records);
        let weakness_patterns = classify(&performance_metrics);
        let difficulty_scores = difficulty_scores(&performance_metrics);
        let learning_velocity = learning_velocity(records);
        let weakness_analysis = build_weakness_analysis(
            &self.config,
            &performance_metrics,
            &weakness_patterns,
            &learning_velocity,
        );
        let overall_progress = overall_progress(&self.config, &performance_metrics);

        tracing::debug!(
            critical = weakness_patterns.critical_subjects.len(),
            moderate = weakness_patterns.moderate_weaknesses.len(),
            strengths = weakness_patterns.strengths.len(),
            overall_progress,
            "weakness analysis completed"
        );

        Analysis {
            performance_metrics,
            weakness_patterns,
            difficulty_scores,
            learning_velocity,
            weakness_analysis,
            overall_progress,
            timestamp,
            analysis_version: ANALYSIS_VERSION.to_string(),
        }
    }

    /// Analyzes untyped input. Anything other than a non-empty JSON object
    /// yields the empty analysis; entries that do not parse as a record are
    /// scored as unscorable.
    pub fn analyze_value(&self, value: &serde_json::Value) -> Analysis {
        let Some(object) = value.as_object() else {
            tracing::warn!("performance data is not a subject-keyed object");
            return Analysis::empty(Utc::now().timestamp_millis());
        };

        let records = records_from_object(object);
        self.analyze(&records)
    }

    fn performance_metrics(&self, records: &PerformanceRecords) -> BTreeMap<Subject, SubjectMetrics> {
        records
            .iter()
            .map(|(subject, record)| {
                if !record.is_valid() {
                    tracing::debug!(%subject, "invalid record, using sentinel metrics");
                }
                let weight = self.config.weight_for(subject);
                let metrics = subject_metrics(record, weight, || self.jitter.sample());
                (subject.clone(), metrics)
            })
            .collect()
    }
}

impl Default for WeaknessAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::PerformanceRecord;
    use crate::analysis::jitter::FixedJitter;
    use crate::analysis::types::{Difficulty, Trend};

    fn analyzer() -> WeaknessAnalyzer {
        WeaknessAnalyzer::default().with_jitter(FixedJitter(0.0))
    }

    #[test]
    fn empty_records_give_empty_analysis() {
        let analysis = analyzer().analyze(&PerformanceRecords::new());
        assert!(analysis.is_empty());
        assert_eq!(analysis.overall_progress, 0);
        assert_eq!(analysis.weakness_patterns.overall_trend, Trend::Stable);
        assert_eq!(analysis.analysis_version, "1.0");
    }

    #[test]
    fn non_object_value_gives_empty_analysis() {
        let analysis = analyzer().analyze_value(&serde_json::json!([1, 2, 3]));
        assert!(analysis.is_empty());
        let analysis = analyzer().analyze_value(&serde_json::json!("Mathematics"));
        assert!(analysis.is_empty());
    }

    #[test]
    fn malformed_subject_value_becomes_sentinel() {
        let analysis = analyzer().analyze_value(&serde_json::json!({
            "Mathematics": "not a record",
            "English": {"totalQuestions": 40, "correctAnswers": 36, "averageTime": 55}
        }));
        assert_eq!(
            analysis.performance_metrics[&Subject::Mathematics],
            SubjectMetrics::sentinel()
        );
        assert_eq!(
            analysis.weakness_patterns.critical_subjects[0].subject,
            Subject::Mathematics
        );
        assert!(analysis
            .weakness_patterns
            .strengths
            .iter()
            .any(|s| s.subject == Subject::English));
    }

    #[test]
    fn single_subject_example() {
        let records = PerformanceRecords::from([(
            Subject::Mathematics,
            PerformanceRecord::new(50, 20, Some(60.0)),
        )]);
        let analysis = analyzer().analyze(&records);
        let m = &analysis.performance_metrics[&Subject::Mathematics];
        assert_eq!(m.accuracy, 0.4);
        assert_eq!(m.efficiency, 0.64);
        assert_eq!(m.consistency, 0.58);
        assert_eq!(m.weakness_score, 0.49);
        assert_eq!(analysis.weakness_patterns.moderate_weaknesses.len(), 1);
        assert_eq!(
            analysis.difficulty_scores[&Subject::Mathematics].difficulty,
            Difficulty::Medium
        );
        assert_eq!(analysis.overall_progress, 51);
    }

    #[test]
    fn unknown_subject_uses_default_weight() {
        let records = PerformanceRecords::from([(
            Subject::parse("Art"),
            PerformanceRecord::new(10, 5, Some(60.0)),
        )]);
        let analysis = analyzer().analyze(&records);
        assert_eq!(
            analysis.performance_metrics[&Subject::parse("Art")].subject_weight,
            1.0
        );
        assert_eq!(
            analysis.weakness_analysis.study_plan.weekly_goals[&Subject::parse("Art")].focus_areas,
            vec!["General Concepts".to_string()]
        );
    }
}
