use serde::{Deserialize, Serialize};

use crate::analysis::types::PerformanceRecords;

const MINUTES_PER_QUESTION: u64 = 2;
const CORRECT_ANSWERS_PER_LESSON: u64 = 10;

/// Lifetime totals shown on a learner's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_questions: u64,
    pub total_correct: u64,
    pub estimated_study_hours: u64,
    pub completed_lessons: u64,
}

impl ProfileStats {
    pub fn from_records(records: &PerformanceRecords) -> Self {
        let total_questions: u64 = records
            .values()
            .map(|r| r.total_questions.unwrap_or(0) as u64)
            .sum();
        let total_correct: u64 = records
            .values()
            .map(|r| r.correct_answers.unwrap_or(0) as u64)
            .sum();

        let study_minutes = (total_questions * MINUTES_PER_QUESTION) as f64;

        Self {
            total_questions,
            total_correct,
            estimated_study_hours: (study_minutes / 60.0).round() as u64,
            completed_lessons: total_correct / CORRECT_ANSWERS_PER_LESSON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::{PerformanceRecord, Subject};

    #[test]
    fn totals_ignore_missing_counters() {
        let records = PerformanceRecords::from([
            (Subject::Mathematics, PerformanceRecord::new(45, 28, None)),
            (Subject::Science, PerformanceRecord::new(38, 32, None)),
            (
                Subject::History,
                PerformanceRecord {
                    total_questions: Some(15),
                    ..Default::default()
                },
            ),
        ]);
        let stats = ProfileStats::from_records(&records);
        assert_eq!(stats.total_questions, 98);
        assert_eq!(stats.total_correct, 60);
        // 196 minutes
        assert_eq!(stats.estimated_study_hours, 3);
        assert_eq!(stats.completed_lessons, 6);
    }

    #[test]
    fn empty_records_are_zero() {
        assert_eq!(
            ProfileStats::from_records(&PerformanceRecords::new()),
            ProfileStats::default()
        );
    }
}
