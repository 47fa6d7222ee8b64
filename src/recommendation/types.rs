use serde::{Deserialize, Serialize};

use crate::analysis::types::{Difficulty, Priority, Subject};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    Reading,
}

/// One learning activity from the content catalog. Never mutated; instances
/// are built from clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationTemplate {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Free text led by a minute count, e.g. "30 minutes".
    pub duration: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topics: Vec<String>,
    pub learning_style: LearningStyle,
    /// Percentage points.
    pub estimated_improvement: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfidenceBoost {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedOutcome {
    /// Percentage string, e.g. "23%".
    pub accuracy_improvement: String,
    pub time_to_see_results: String,
    pub confidence_boost: ConfidenceBoost,
    pub skills_gained: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewFrequency {
    Daily,
    Weekly,
    #[serde(rename = "bi-weekly")]
    BiWeekly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveSchedule {
    pub sessions_per_week: u32,
    pub session_duration: String,
    pub review_frequency: ReviewFrequency,
    #[serde(default, skip_serializing_if = "is_false")]
    pub advanced_challenges: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reinforcement_activities: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A template enriched for one learner and subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInstance {
    #[serde(flatten)]
    pub template: RecommendationTemplate,
    pub subject: Subject,
    pub priority: Priority,
    pub personalized_reason: String,
    pub expected_outcome: ExpectedOutcome,
    #[serde(default)]
    pub adaptive_features: Vec<String>,
    #[serde(default)]
    pub motivational_note: String,
    #[serde(default)]
    pub personalized_tips: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adaptive_schedule: Option<AdaptiveSchedule>,
}

impl RecommendationInstance {
    pub fn title(&self) -> &str {
        &self.template.title
    }

    pub fn estimated_improvement(&self) -> u32 {
        self.template.estimated_improvement
    }
}
