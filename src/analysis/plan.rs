use std::collections::BTreeMap;

use crate::analysis::config::AnalyzerConfig;
use crate::analysis::metrics::round2;
use crate::analysis::types::{
    DailySchedule, FocusRecommendation, LearningVelocity, Priority, PrioritySubject, StudyPlan,
    Subject, SubjectMetrics, SubjectPriority, WeaknessAnalysis, WeaknessPatterns, WeeklyGoal,
};

const MAX_PRIORITY_SUBJECTS: usize = 3;
const MAX_TARGET_ACCURACY: f64 = 95.0;
const PRACTICE_QUESTIONS_SCALE: f64 = 50.0;

pub fn build_weakness_analysis(
    config: &AnalyzerConfig,
    metrics: &BTreeMap<Subject, SubjectMetrics>,
    patterns: &WeaknessPatterns,
    velocity: &LearningVelocity,
) -> WeaknessAnalysis {
    WeaknessAnalysis {
        summary: summary(patterns),
        recommendations: focus_recommendations(metrics),
        priority_subjects: priority_subjects(patterns),
        study_plan: study_plan(config, metrics, velocity),
    }
}

pub fn summary(patterns: &WeaknessPatterns) -> String {
    let critical = patterns.critical_subjects.len();
    let moderate = patterns.moderate_weaknesses.len();
    let strengths = patterns.strengths.len();

    let mut summary = String::new();
    if critical > 0 {
        summary.push_str(&format!(
            "You have {critical} subject(s) that need immediate attention. "
        ));
    }
    if moderate > 0 {
        summary.push_str(&format!(
            "{moderate} subject(s) show moderate weakness areas. "
        ));
    }
    if strengths > 0 {
        summary.push_str(&format!(
            "You're performing well in {strengths} subject(s)."
        ));
    }

    if summary.is_empty() {
        "Your performance is balanced across all subjects.".to_string()
    } else {
        summary
    }
}

pub fn estimated_study_time(weakness_score: f64) -> &'static str {
    if weakness_score > 0.7 {
        "45-60 minutes daily"
    } else if weakness_score > 0.4 {
        "30-45 minutes daily"
    } else {
        "15-30 minutes daily"
    }
}

/// Subjects scoring above 0.4, high priority first.
pub fn focus_recommendations(
    metrics: &BTreeMap<Subject, SubjectMetrics>,
) -> Vec<FocusRecommendation> {
    let mut recommendations: Vec<FocusRecommendation> = metrics
        .iter()
        .filter(|(_, m)| m.weakness_score > 0.4)
        .map(|(subject, m)| FocusRecommendation {
            subject: subject.clone(),
            kind: "improvement".to_string(),
            priority: if m.weakness_score > 0.6 {
                Priority::High
            } else {
                Priority::Medium
            },
            focus: m.primary_issue(),
            estimated_time: estimated_study_time(m.weakness_score).to_string(),
        })
        .collect();

    recommendations.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    recommendations
}

pub fn priority_subjects(patterns: &WeaknessPatterns) -> Vec<PrioritySubject> {
    let critical = patterns
        .critical_subjects
        .iter()
        .map(|entry| PrioritySubject {
            subject: entry.subject.clone(),
            priority: SubjectPriority::Critical,
            reason: "Low performance requires immediate attention".to_string(),
            weekly_hours: 6,
        });
    let moderate = patterns
        .moderate_weaknesses
        .iter()
        .map(|entry| PrioritySubject {
            subject: entry.subject.clone(),
            priority: SubjectPriority::Moderate,
            reason: "Room for improvement with focused practice".to_string(),
            weekly_hours: 4,
        });

    critical.chain(moderate).take(MAX_PRIORITY_SUBJECTS).collect()
}

pub fn daily_schedule(weakness_score: f64) -> Option<DailySchedule> {
    if weakness_score > 0.5 {
        Some(DailySchedule {
            minutes: 30,
            activities: vec![
                "Practice problems".to_string(),
                "Review concepts".to_string(),
                "Take quiz".to_string(),
            ],
        })
    } else if weakness_score > 0.3 {
        Some(DailySchedule {
            minutes: 20,
            activities: vec!["Practice problems".to_string(), "Review notes".to_string()],
        })
    } else {
        None
    }
}

pub fn focus_area_count(weakness_score: f64) -> usize {
    if weakness_score > 0.6 {
        3
    } else if weakness_score > 0.3 {
        2
    } else {
        1
    }
}

pub fn practice_questions(weakness_score: f64) -> u32 {
    (weakness_score * PRACTICE_QUESTIONS_SCALE).ceil().max(0.0) as u32
}

pub fn study_plan(
    config: &AnalyzerConfig,
    metrics: &BTreeMap<Subject, SubjectMetrics>,
    velocity: &LearningVelocity,
) -> StudyPlan {
    let mut plan = StudyPlan::default();

    for (subject, m) in metrics {
        if let Some(schedule) = daily_schedule(m.weakness_score) {
            plan.daily_schedule.insert(subject.clone(), schedule);
        }

        let pace = velocity.velocity_for(subject);
        let weekly_questions = practice_questions(m.weakness_score);
        let focus_areas = config
            .focus_areas_for(subject)
            .iter()
            .take(focus_area_count(m.weakness_score))
            .cloned()
            .collect();

        plan.weekly_goals.insert(
            subject.clone(),
            WeeklyGoal {
                target_accuracy: round2(
                    (m.accuracy * 100.0 + pace.weekly_bonus()).min(MAX_TARGET_ACCURACY),
                ),
                practice_questions: weekly_questions,
                focus_areas,
            },
        );
    }

    plan
}

/// Weighted share of non-weakness, 0-100. Each subject's score uses the
/// weight carried in its metrics while the denominator uses the table
/// weight, so unscorable subjects drag progress down.
pub fn overall_progress(
    config: &AnalyzerConfig,
    metrics: &BTreeMap<Subject, SubjectMetrics>,
) -> u8 {
    if metrics.is_empty() {
        return 0;
    }

    let weighted: f64 = metrics
        .iter()
        .map(|(_, m)| (1.0 - m.weakness_score) * m.subject_weight)
        .sum();
    let total_weight: f64 = metrics.keys().map(|s| config.weight_for(s)).sum();

    if total_weight <= 0.0 {
        return 0;
    }

    (weighted / total_weight * 100.0).round().clamp(0.0, 100.0) as u8
}
