use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const ANALYSIS_VERSION: &str = "1.0";

/// Subject a learner is assessed in.
///
/// The built-in subjects get their own variants so lookup tables can be
/// checked exhaustively; any other name is carried verbatim in `Other`.
/// Serialized as the plain subject name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subject {
    Mathematics,
    Science,
    English,
    History,
    Geography,
    Other(String),
}

impl Subject {
    pub const BUILTIN: [Subject; 5] = [
        Subject::Mathematics,
        Subject::Science,
        Subject::English,
        Subject::History,
        Subject::Geography,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Mathematics => "Mathematics",
            Self::Science => "Science",
            Self::English => "English",
            Self::History => "History",
            Self::Geography => "Geography",
            Self::Other(name) => name,
        }
    }

    /// Exact, case-sensitive match on the built-in names. Anything else,
    /// including "mathematics" or " History", is kept verbatim as `Other`.
    pub fn parse(s: &str) -> Self {
        match s {
            "Mathematics" => Self::Mathematics,
            "Science" => Self::Science,
            "English" => Self::English,
            "History" => Self::History,
            "Geography" => Self::Geography,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for Subject {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.as_str().to_string()
    }
}

/// Raw quiz counters for one subject, as kept by the record store.
///
/// Every field is optional on the wire. A record without both counters, or
/// with zero questions, is invalid and analyzed as maximal weakness.
/// `correctAnswers: 0` is a valid record with accuracy 0; the browser
/// dashboard this replaces tested the field for truthiness and so treated
/// it as invalid too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_questions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answers: Option<u32>,
    /// Seconds per question. `None` or a non-positive value means unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_time: Option<f64>,
    #[serde(default)]
    pub weakness_areas: Vec<String>,
    /// Epoch milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<i64>,
}

impl PerformanceRecord {
    pub fn new(total_questions: u32, correct_answers: u32, average_time: Option<f64>) -> Self {
        Self {
            total_questions: Some(total_questions),
            correct_answers: Some(correct_answers),
            average_time,
            ..Default::default()
        }
    }

    /// `(total, correct)` when the record can be scored.
    pub fn counters(&self) -> Option<(u32, u32)> {
        match (self.total_questions, self.correct_answers) {
            (Some(total), Some(correct)) if total > 0 => Some((total, correct)),
            _ => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.counters().is_some()
    }

    pub fn known_average_time(&self) -> Option<f64> {
        self.average_time.filter(|t| t.is_finite() && *t > 0.0)
    }

    /// Unrounded accuracy, 0 for invalid records.
    pub fn raw_accuracy(&self) -> f64 {
        self.counters()
            .map(|(total, correct)| correct as f64 / total as f64)
            .unwrap_or(0.0)
    }
}

pub type PerformanceRecords = BTreeMap<Subject, PerformanceRecord>;

/// Reads a subject-keyed JSON object one entry at a time. An entry that is
/// not a record becomes an empty (unscorable) record instead of failing the
/// whole set.
pub fn records_from_object(
    object: &serde_json::Map<String, serde_json::Value>,
) -> PerformanceRecords {
    object
        .iter()
        .map(|(name, raw)| {
            let record = PerformanceRecord::deserialize(raw).unwrap_or_else(|err| {
                tracing::debug!(subject = %name, error = %err, "unparseable performance record");
                PerformanceRecord::default()
            });
            (Subject::parse(name), record)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryIssue {
    Accuracy,
    Efficiency,
    Consistency,
    General,
}

impl PrimaryIssue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accuracy => "accuracy",
            Self::Efficiency => "efficiency",
            Self::Consistency => "consistency",
            Self::General => "general",
        }
    }
}

/// Content difficulty; weaker subjects get easier material.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub fn from_weakness(weakness_score: f64) -> Self {
        if weakness_score > 0.6 {
            Self::Easy
        } else if weakness_score > 0.3 {
            Self::Medium
        } else {
            Self::Hard
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    High,
    Medium,
    Low,
}

impl Intensity {
    pub fn from_weakness(weakness_score: f64) -> Self {
        if weakness_score > 0.7 {
            Self::High
        } else if weakness_score > 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Expected pace of improvement. More headroom means faster expected gains.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Velocity {
    Fast,
    #[default]
    Moderate,
    Slow,
}

impl Velocity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Moderate => "moderate",
            Self::Slow => "slow",
        }
    }

    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy > 0.8 {
            Self::Slow
        } else if accuracy > 0.5 {
            Self::Moderate
        } else {
            Self::Fast
        }
    }

    /// Weekly accuracy gain (percentage points) targeted by the study plan.
    pub fn weekly_bonus(&self) -> f64 {
        match self {
            Self::Fast => 15.0,
            Self::Moderate => 10.0,
            Self::Slow => 5.0,
        }
    }

    /// Scale applied to activity durations.
    pub fn duration_multiplier(&self) -> f64 {
        match self {
            Self::Fast => 0.8,
            Self::Moderate => 1.0,
            Self::Slow => 1.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Declining,
    #[default]
    Stable,
    Improving,
}

impl Trend {
    pub fn from_mean_weakness(mean: f64) -> Self {
        if mean > 0.5 {
            Self::Declining
        } else if mean < 0.3 {
            Self::Improving
        } else {
            Self::Stable
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn upgraded(&self) -> Self {
        match self {
            Self::Low => Self::Medium,
            _ => Self::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectPriority {
    Critical,
    Moderate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectMetrics {
    pub accuracy: f64,
    pub efficiency: f64,
    pub consistency: f64,
    /// Display only. Includes a random perturbation and feeds no decision.
    pub improvement: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub average_time: Option<f64>,
    pub weakness_score: f64,
    pub subject_weight: f64,
}

impl SubjectMetrics {
    /// Worst-case metrics used in place of an unscorable record.
    pub fn sentinel() -> Self {
        Self {
            accuracy: 0.0,
            efficiency: 0.0,
            consistency: 0.0,
            improvement: 0.0,
            total_questions: 0,
            correct_answers: 0,
            average_time: None,
            weakness_score: 1.0,
            subject_weight: 1.0,
        }
    }

    /// First of accuracy, efficiency, consistency under 0.5.
    pub fn primary_issue(&self) -> PrimaryIssue {
        if self.accuracy < 0.5 {
            PrimaryIssue::Accuracy
        } else if self.efficiency < 0.5 {
            PrimaryIssue::Efficiency
        } else if self.consistency < 0.5 {
            PrimaryIssue::Consistency
        } else {
            PrimaryIssue::General
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessEntry {
    pub subject: Subject,
    pub weakness_score: f64,
    pub primary_issue: PrimaryIssue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthEntry {
    pub subject: Subject,
    pub strength_score: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessPatterns {
    pub critical_subjects: Vec<WeaknessEntry>,
    pub moderate_weaknesses: Vec<WeaknessEntry>,
    pub strengths: Vec<StrengthEntry>,
    pub overall_trend: Trend,
}

impl WeaknessPatterns {
    pub fn contains(&self, subject: &Subject) -> bool {
        self.critical_subjects.iter().any(|e| &e.subject == subject)
            || self.moderate_weaknesses.iter().any(|e| &e.subject == subject)
            || self.strengths.iter().any(|e| &e.subject == subject)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyScore {
    pub difficulty: Difficulty,
    pub confidence_level: u8,
    pub recommended_intensity: Intensity,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningVelocity {
    pub overall_velocity: Velocity,
    pub subject_velocities: BTreeMap<Subject, Velocity>,
    pub predicted_improvement: BTreeMap<Subject, u32>,
}

impl LearningVelocity {
    pub fn velocity_for(&self, subject: &Subject) -> Velocity {
        self.subject_velocities
            .get(subject)
            .copied()
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRecommendation {
    pub subject: Subject,
    #[serde(rename = "type")]
    pub kind: String,
    pub priority: Priority,
    pub focus: PrimaryIssue,
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritySubject {
    pub subject: Subject,
    pub priority: SubjectPriority,
    pub reason: String,
    pub weekly_hours: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySchedule {
    pub minutes: u32,
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGoal {
    pub target_accuracy: f64,
    pub practice_questions: u32,
    pub focus_areas: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    pub daily_schedule: BTreeMap<Subject, DailySchedule>,
    pub weekly_goals: BTreeMap<Subject, WeeklyGoal>,
    /// Always empty; present so the plan keeps its three sections.
    pub monthly_targets: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaknessAnalysis {
    pub summary: String,
    pub recommendations: Vec<FocusRecommendation>,
    pub priority_subjects: Vec<PrioritySubject>,
    pub study_plan: StudyPlan,
}

impl WeaknessAnalysis {
    /// Rank used when ordering recommendations: `3 - index` for listed
    /// subjects, 0 otherwise.
    pub fn subject_rank(&self, subject: &Subject) -> i64 {
        self.priority_subjects
            .iter()
            .position(|p| &p.subject == subject)
            .map(|index| 3 - index as i64)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub performance_metrics: BTreeMap<Subject, SubjectMetrics>,
    pub weakness_patterns: WeaknessPatterns,
    pub difficulty_scores: BTreeMap<Subject, DifficultyScore>,
    pub learning_velocity: LearningVelocity,
    pub weakness_analysis: WeaknessAnalysis,
    pub overall_progress: u8,
    /// Epoch milliseconds.
    pub timestamp: i64,
    pub analysis_version: String,
}

impl Analysis {
    /// Empty analysis returned when there is nothing to analyze.
    pub fn empty(timestamp: i64) -> Self {
        Self {
            performance_metrics: BTreeMap::new(),
            weakness_patterns: WeaknessPatterns::default(),
            difficulty_scores: BTreeMap::new(),
            learning_velocity: LearningVelocity::default(),
            weakness_analysis: WeaknessAnalysis {
                summary: "Unable to analyze performance data. Please ensure you have completed some assessments."
                    .to_string(),
                ..Default::default()
            },
            overall_progress: 0,
            timestamp,
            analysis_version: ANALYSIS_VERSION.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.performance_metrics.is_empty()
    }
}
