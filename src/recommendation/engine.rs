use std::cmp::Reverse;

use crate::analysis::types::{
    Analysis, Difficulty, PrimaryIssue, Priority, Subject, SubjectMetrics, WeaknessAnalysis,
};
use crate::recommendation::catalog::Catalog;
use crate::recommendation::personalize::personalize;
use crate::recommendation::types::{
    ConfidenceBoost, ExpectedOutcome, LearningStyle, RecommendationInstance,
    RecommendationTemplate,
};

/// Templates whose estimated improvement exceeds this get a priority bump.
const HIGH_IMPACT_IMPROVEMENT: u32 = 20;

/// Turns an [`Analysis`] into an ordered, personalized recommendation list.
///
/// Like the analyzer this is total: an analysis with nothing in it yields
/// [`default_recommendations`].
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    catalog: Catalog,
}

impl RecommendationEngine {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn recommend(&self, analysis: &Analysis) -> Vec<RecommendationInstance> {
        if analysis.is_empty() {
            tracing::debug!("analysis has no subjects, returning default recommendations");
            return default_recommendations();
        }

        let mut recommendations = Vec::new();
        for (subject, metrics) in &analysis.performance_metrics {
            let difficulty = analysis
                .difficulty_scores
                .get(subject)
                .map(|score| score.difficulty)
                .unwrap_or_default();
            recommendations.extend(self.subject_recommendations(subject, metrics, difficulty));
        }

        prioritize(&mut recommendations, &analysis.weakness_analysis);
        let recommendations = personalize(&self.catalog, analysis, recommendations);

        tracing::debug!(
            count = recommendations.len(),
            "generated recommendations"
        );
        recommendations
    }

    /// Accepts an untyped analysis; anything that does not deserialize
    /// yields the default list.
    pub fn recommend_value(&self, value: &serde_json::Value) -> Vec<RecommendationInstance> {
        match serde_json::from_value::<Analysis>(value.clone()) {
            Ok(analysis) => self.recommend(&analysis),
            Err(err) => {
                tracing::warn!(error = %err, "invalid analysis data provided");
                default_recommendations()
            }
        }
    }

    /// Analyzed subjects the catalog has no content for. They receive no
    /// recommendations.
    pub fn catalog_gaps(&self, analysis: &Analysis) -> Vec<Subject> {
        analysis
            .performance_metrics
            .keys()
            .filter(|subject| !self.catalog.has_subject(subject))
            .cloned()
            .collect()
    }

    fn subject_recommendations(
        &self,
        subject: &Subject,
        metrics: &SubjectMetrics,
        difficulty: Difficulty,
    ) -> Vec<RecommendationInstance> {
        let Some(templates) = self.catalog.templates(subject, difficulty) else {
            tracing::debug!(%subject, "no catalog content for subject");
            return Vec::new();
        };

        let weakness = metrics.weakness_score;
        templates
            .iter()
            .take(template_count(weakness))
            .map(|template| RecommendationInstance {
                template: template.clone(),
                subject: subject.clone(),
                priority: priority(weakness, template),
                personalized_reason: personalized_reason(subject, metrics, template),
                expected_outcome: expected_outcome(template, weakness),
                adaptive_features: self.adaptive_features(metrics, template.learning_style),
                motivational_note: String::new(),
                personalized_tips: Vec::new(),
                adaptive_schedule: None,
            })
            .collect()
    }

    fn adaptive_features(&self, metrics: &SubjectMetrics, style: LearningStyle) -> Vec<String> {
        let mut features = Vec::new();
        let gated = [
            (metrics.accuracy, PrimaryIssue::Accuracy),
            (metrics.efficiency, PrimaryIssue::Efficiency),
            (metrics.consistency, PrimaryIssue::Consistency),
        ];
        for (value, issue) in gated {
            if value < 0.5 {
                features.extend(self.catalog.issue_features(issue).iter().cloned());
            }
        }
        if let Some(hint) = self.catalog.style_feature(style) {
            features.push(hint.to_string());
        }
        features
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(Catalog::builtin())
    }
}

pub fn template_count(weakness_score: f64) -> usize {
    if weakness_score > 0.6 {
        3
    } else if weakness_score > 0.3 {
        2
    } else {
        1
    }
}

pub fn priority(weakness_score: f64, template: &RecommendationTemplate) -> Priority {
    let base = if weakness_score > 0.6 {
        Priority::High
    } else if weakness_score < 0.3 {
        Priority::Low
    } else {
        Priority::Medium
    };

    if template.estimated_improvement > HIGH_IMPACT_IMPROVEMENT {
        base.upgraded()
    } else {
        base
    }
}

pub fn personalized_reason(
    subject: &Subject,
    metrics: &SubjectMetrics,
    template: &RecommendationTemplate,
) -> String {
    let accuracy = (metrics.accuracy * 100.0).round() as i64;
    let clause = match metrics.primary_issue() {
        PrimaryIssue::Accuracy => format!(
            "this {} will help improve your understanding of core concepts.",
            template.kind.replacen('_', " ", 1)
        ),
        PrimaryIssue::Efficiency => {
            "this focused practice will help you solve problems more quickly and efficiently."
                .to_string()
        }
        PrimaryIssue::Consistency => {
            "regular practice with this material will help stabilize your performance.".to_string()
        }
        PrimaryIssue::General => {
            "this comprehensive review will strengthen your overall skills.".to_string()
        }
    };
    format!("Based on your {accuracy}% accuracy in {subject}, {clause}")
}

pub fn expected_outcome(template: &RecommendationTemplate, weakness_score: f64) -> ExpectedOutcome {
    let adjusted = (template.estimated_improvement as f64 * (1.0 + weakness_score)).round() as u64;
    ExpectedOutcome {
        accuracy_improvement: format!("{adjusted}%"),
        time_to_see_results: if weakness_score > 0.6 {
            "1-2 weeks"
        } else {
            "3-5 days"
        }
        .to_string(),
        confidence_boost: if weakness_score > 0.5 {
            ConfidenceBoost::High
        } else {
            ConfidenceBoost::Medium
        },
        skills_gained: template.topics.clone(),
    }
}

/// Stable sort, descending by priority tier, subject rank, then estimated
/// improvement.
pub fn prioritize(recommendations: &mut [RecommendationInstance], weakness: &WeaknessAnalysis) {
    recommendations.sort_by_key(|rec| {
        Reverse((
            rec.priority.rank(),
            weakness.subject_rank(&rec.subject),
            rec.estimated_improvement(),
        ))
    });
}

/// Fallback list for learners with no usable data.
pub fn default_recommendations() -> Vec<RecommendationInstance> {
    vec![RecommendationInstance {
        template: RecommendationTemplate {
            title: "Study Skills Assessment".to_string(),
            description: "Complete a comprehensive assessment to identify your learning strengths and areas for improvement.".to_string(),
            kind: "assessment".to_string(),
            duration: "20 minutes".to_string(),
            difficulty: Difficulty::Easy,
            topics: vec!["Study Skills".to_string(), "Learning Assessment".to_string()],
            learning_style: LearningStyle::Reading,
            estimated_improvement: 10,
        },
        subject: Subject::Other("General".to_string()),
        priority: Priority::High,
        personalized_reason:
            "Start with a baseline assessment to create a personalized learning plan.".to_string(),
        expected_outcome: ExpectedOutcome {
            accuracy_improvement: "10%".to_string(),
            time_to_see_results: "Immediate".to_string(),
            confidence_boost: ConfidenceBoost::Medium,
            skills_gained: vec!["Self-awareness".to_string(), "Study Planning".to_string()],
        },
        adaptive_features: Vec::new(),
        motivational_note:
            "Understanding your learning style is the first step to academic success!".to_string(),
        personalized_tips: Vec::new(),
        adaptive_schedule: None,
    }]
}
