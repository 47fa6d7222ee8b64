use crate::analysis::types::{PerformanceRecord, SubjectMetrics};

/// Seconds per question considered ideal.
pub const OPTIMAL_TIME_SECS: f64 = 60.0;
/// Efficiency assumed when the average time is unknown.
pub const UNKNOWN_TIME_EFFICIENCY: f64 = 0.5;
/// Answers needed before the volume part of consistency saturates.
const CONSISTENCY_VOLUME: f64 = 50.0;
/// Average time below which `improvement` gets a bonus.
const FAST_ANSWER_SECS: f64 = 90.0;
const FAST_ANSWER_BONUS: f64 = 0.1;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn efficiency(average_time: Option<f64>, accuracy: f64) -> f64 {
    let Some(time) = average_time.filter(|t| t.is_finite() && *t > 0.0) else {
        return UNKNOWN_TIME_EFFICIENCY;
    };
    let time_efficiency =
        (1.0 - (time - OPTIMAL_TIME_SECS).abs() / OPTIMAL_TIME_SECS).max(0.0);
    0.4 * time_efficiency + 0.6 * accuracy
}

pub fn consistency(total_questions: u32, accuracy: f64) -> f64 {
    let volume = (total_questions as f64 / CONSISTENCY_VOLUME).min(1.0);
    0.7 * accuracy + 0.3 * volume
}

/// Simulated improvement trend. `jitter` is the random perturbation.
pub fn improvement(accuracy: f64, average_time: Option<f64>, jitter: f64) -> f64 {
    let time_bonus = match average_time {
        Some(t) if t < FAST_ANSWER_SECS => FAST_ANSWER_BONUS,
        _ => 0.0,
    };
    (accuracy + time_bonus + jitter).clamp(0.0, 1.0)
}

/// Higher is weaker. Rounded to two decimals.
pub fn weakness_score(accuracy: f64, efficiency: f64, consistency: f64) -> f64 {
    let weighted = accuracy * 0.5 + efficiency * 0.3 + consistency * 0.2;
    round2(1.0 - weighted).clamp(0.0, 1.0)
}

/// Scores one record. Invalid records yield the sentinel; `jitter` is only
/// consulted for valid ones.
pub fn subject_metrics(
    record: &PerformanceRecord,
    subject_weight: f64,
    jitter: impl FnOnce() -> f64,
) -> SubjectMetrics {
    let Some((total, correct)) = record.counters() else {
        return SubjectMetrics::sentinel();
    };

    let accuracy = correct as f64 / total as f64;
    let efficiency = efficiency(record.average_time, accuracy);
    let consistency = consistency(total, accuracy);
    let improvement = improvement(accuracy, record.average_time, jitter());

    SubjectMetrics {
        accuracy: round2(accuracy),
        efficiency: round2(efficiency),
        consistency: round2(consistency),
        improvement: round2(improvement),
        total_questions: total,
        correct_answers: correct,
        average_time: record.average_time,
        weakness_score: weakness_score(accuracy, efficiency, consistency),
        subject_weight,
    }
}
