use std::collections::BTreeMap;

use crate::analysis::metrics::round2;
use crate::analysis::types::{
    Difficulty, DifficultyScore, Intensity, LearningVelocity, PerformanceRecords, StrengthEntry,
    Subject, SubjectMetrics, Trend, Velocity, WeaknessEntry, WeaknessPatterns,
};

pub const CRITICAL_THRESHOLD: f64 = 0.6;
pub const MODERATE_THRESHOLD: f64 = 0.3;
/// Answers needed for full confidence in a difficulty call.
const CONFIDENCE_SAMPLE: f64 = 20.0;
/// Share of the remaining headroom expected to be recovered.
const HEADROOM_RECOVERY: f64 = 0.3;

pub fn classify(metrics: &BTreeMap<Subject, SubjectMetrics>) -> WeaknessPatterns {
    let mut patterns = WeaknessPatterns::default();

    for (subject, m) in metrics {
        let score = m.weakness_score;
        if score > CRITICAL_THRESHOLD {
            patterns.critical_subjects.push(WeaknessEntry {
                subject: subject.clone(),
                weakness_score: score,
                primary_issue: m.primary_issue(),
            });
        } else if score > MODERATE_THRESHOLD {
            patterns.moderate_weaknesses.push(WeaknessEntry {
                subject: subject.clone(),
                weakness_score: score,
                primary_issue: m.primary_issue(),
            });
        } else {
            patterns.strengths.push(StrengthEntry {
                subject: subject.clone(),
                strength_score: round2(1.0 - score),
            });
        }
    }

    if !metrics.is_empty() {
        let mean = metrics.values().map(|m| m.weakness_score).sum::<f64>() / metrics.len() as f64;
        patterns.overall_trend = Trend::from_mean_weakness(mean);
    }

    patterns
}

pub fn confidence_level(metrics: &SubjectMetrics) -> u8 {
    let data_quality = (metrics.total_questions as f64 / CONFIDENCE_SAMPLE).min(1.0);
    let level = (data_quality * 0.6 + metrics.consistency * 0.4) * 100.0;
    level.round().clamp(0.0, 100.0) as u8
}

pub fn difficulty_scores(
    metrics: &BTreeMap<Subject, SubjectMetrics>,
) -> BTreeMap<Subject, DifficultyScore> {
    metrics
        .iter()
        .map(|(subject, m)| {
            let score = DifficultyScore {
                difficulty: Difficulty::from_weakness(m.weakness_score),
                confidence_level: confidence_level(m),
                recommended_intensity: Intensity::from_weakness(m.weakness_score),
            };
            (subject.clone(), score)
        })
        .collect()
}

pub fn predicted_improvement(accuracy: f64) -> u32 {
    let predicted = (accuracy + (1.0 - accuracy) * HEADROOM_RECOVERY) * 100.0;
    predicted.round().max(0.0) as u32
}

/// Per-subject velocity from the raw counters; unscorable records count as
/// zero accuracy. `overall_velocity` is not derived and stays moderate.
pub fn learning_velocity(records: &PerformanceRecords) -> LearningVelocity {
    let mut velocity = LearningVelocity::default();

    for (subject, record) in records {
        let accuracy = record.raw_accuracy();
        velocity
            .subject_velocities
            .insert(subject.clone(), Velocity::from_accuracy(accuracy));
        velocity
            .predicted_improvement
            .insert(subject.clone(), predicted_improvement(accuracy));
    }

    velocity
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{PerformanceRecord, PrimaryIssue};

    fn metrics_with_score(score: f64) -> SubjectMetrics {
        SubjectMetrics {
            accuracy: 1.0 - score,
            efficiency: 0.6,
            consistency: 0.6,
            improvement: 0.5,
            total_questions: 30,
            correct_answers: 15,
            average_time: Some(60.0),
            weakness_score: score,
            subject_weight: 1.0,
        }
    }

    #[test]
    fn classification_uses_exclusive_upper_thresholds() {
        let metrics = BTreeMap::from([
            (Subject::Mathematics, metrics_with_score(0.61)),
            (Subject::Science, metrics_with_score(0.6)),
            (Subject::English, metrics_with_score(0.31)),
            (Subject::History, metrics_with_score(0.3)),
        ]);
        let patterns = classify(&metrics);
        assert_eq!(patterns.critical_subjects.len(), 1);
        assert_eq!(patterns.critical_subjects[0].subject, Subject::Mathematics);
        assert_eq!(
            patterns.critical_subjects[0].primary_issue,
            PrimaryIssue::Accuracy
        );
        assert_eq!(patterns.moderate_weaknesses.len(), 2);
        assert_eq!(patterns.strengths.len(), 1);
        assert_eq!(patterns.strengths[0].strength_score, 0.7);
        assert_eq!(patterns.overall_trend, Trend::Stable);
    }

    #[test]
    fn trend_follows_mean_weakness() {
        let weak = BTreeMap::from([(Subject::Mathematics, metrics_with_score(0.8))]);
        assert_eq!(classify(&weak).overall_trend, Trend::Declining);
        let strong = BTreeMap::from([(Subject::Mathematics, metrics_with_score(0.1))]);
        assert_eq!(classify(&strong).overall_trend, Trend::Improving);
        assert_eq!(classify(&BTreeMap::new()).overall_trend, Trend::Stable);
    }

    #[test]
    fn confidence_blends_sample_size_and_consistency() {
        let mut m = metrics_with_score(0.5);
        m.total_questions = 10;
        m.consistency = 0.5;
        assert_eq!(confidence_level(&m), 50);
        assert_eq!(confidence_level(&SubjectMetrics::sentinel()), 0);
    }

    #[test]
    fn difficulty_is_inverse_to_weakness() {
        let metrics = BTreeMap::from([
            (Subject::Mathematics, metrics_with_score(0.75)),
            (Subject::Science, metrics_with_score(0.45)),
            (Subject::English, metrics_with_score(0.1)),
        ]);
        let scores = difficulty_scores(&metrics);
        assert_eq!(scores[&Subject::Mathematics].difficulty, Difficulty::Easy);
        assert_eq!(
            scores[&Subject::Mathematics].recommended_intensity,
            Intensity::High
        );
        assert_eq!(scores[&Subject::Science].difficulty, Difficulty::Medium);
        assert_eq!(
            scores[&Subject::Science].recommended_intensity,
            Intensity::Medium
        );
        assert_eq!(scores[&Subject::English].difficulty, Difficulty::Hard);
        assert_eq!(
            scores[&Subject::English].recommended_intensity,
            Intensity::Low
        );
    }

    #[test]
    fn overall_velocity_is_never_derived() {
        let strong = PerformanceRecords::from([(
            Subject::English,
            PerformanceRecord::new(50, 45, Some(60.0)),
        )]);
        assert_eq!(learning_velocity(&strong).overall_velocity, Velocity::Moderate);

        let weak = PerformanceRecords::from([(
            Subject::English,
            PerformanceRecord::new(50, 5, Some(60.0)),
        )]);
        assert_eq!(learning_velocity(&weak).overall_velocity, Velocity::Moderate);
    }

    #[test]
    fn velocity_tracks_headroom() {
        let records = PerformanceRecords::from([
            (Subject::Mathematics, PerformanceRecord::new(10, 9, None)),
            (Subject::Science, PerformanceRecord::new(10, 6, None)),
            (Subject::English, PerformanceRecord::new(10, 3, None)),
            (Subject::History, PerformanceRecord::new(0, 0, None)),
        ]);
        let velocity = learning_velocity(&records);
        assert_eq!(velocity.velocity_for(&Subject::Mathematics), Velocity::Slow);
        assert_eq!(velocity.velocity_for(&Subject::Science), Velocity::Moderate);
        assert_eq!(velocity.velocity_for(&Subject::English), Velocity::Fast);
        assert_eq!(velocity.velocity_for(&Subject::History), Velocity::Fast);
        assert_eq!(velocity.predicted_improvement[&Subject::Mathematics], 93);
        assert_eq!(velocity.predicted_improvement[&Subject::History], 30);
        assert_eq!(velocity.overall_velocity, Velocity::Moderate);
    }
}
