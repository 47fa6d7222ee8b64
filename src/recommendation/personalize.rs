//! Learner-level touches applied after ordering. Nothing here reorders.

use crate::analysis::types::{Analysis, Velocity};
use crate::recommendation::catalog::Catalog;
use crate::recommendation::types::{AdaptiveSchedule, RecommendationInstance, ReviewFrequency};

const MAX_TIPS: usize = 3;

/// Scales the first number in `duration`, rounding half up. Text without a
/// number is returned unchanged.
pub fn adjust_duration(duration: &str, multiplier: f64) -> String {
    let Some(start) = duration.find(|c: char| c.is_ascii_digit()) else {
        return duration.to_string();
    };
    let end = duration[start..]
        .find(|c: char| !c.is_ascii_digit())
        .map(|offset| start + offset)
        .unwrap_or(duration.len());

    let Ok(minutes) = duration[start..end].parse::<u64>() else {
        return duration.to_string();
    };
    let adjusted = (minutes as f64 * multiplier).round() as u64;

    format!("{}{}{}", &duration[..start], adjusted, &duration[end..])
}

pub fn motivational_note(overall_progress: u8) -> &'static str {
    if overall_progress < 40 {
        "Every step forward counts! You're building a strong foundation."
    } else if overall_progress < 70 {
        "Great progress! Keep up the momentum with focused practice."
    } else {
        "Excellent work! Fine-tune your skills with advanced challenges."
    }
}

/// Velocity tips, then the subject tip, capped at three.
pub fn personalized_tips(
    catalog: &Catalog,
    recommendation: &RecommendationInstance,
    velocity: Velocity,
) -> Vec<String> {
    catalog
        .velocity_tips(velocity)
        .iter()
        .map(String::as_str)
        .chain(catalog.subject_tip(&recommendation.subject))
        .take(MAX_TIPS)
        .map(str::to_string)
        .collect()
}

pub fn adaptive_schedule(session_duration: &str, velocity: Velocity) -> AdaptiveSchedule {
    let base = AdaptiveSchedule {
        sessions_per_week: 3,
        session_duration: session_duration.to_string(),
        review_frequency: ReviewFrequency::Weekly,
        advanced_challenges: false,
        reinforcement_activities: false,
    };

    match velocity {
        Velocity::Fast => AdaptiveSchedule {
            sessions_per_week: 2,
            review_frequency: ReviewFrequency::BiWeekly,
            advanced_challenges: true,
            ..base
        },
        Velocity::Slow => AdaptiveSchedule {
            sessions_per_week: 4,
            review_frequency: ReviewFrequency::Daily,
            reinforcement_activities: true,
            ..base
        },
        Velocity::Moderate => base,
    }
}

pub fn personalize(
    catalog: &Catalog,
    analysis: &Analysis,
    recommendations: Vec<RecommendationInstance>,
) -> Vec<RecommendationInstance> {
    let note = motivational_note(analysis.overall_progress);

    recommendations
        .into_iter()
        .map(|mut rec| {
            let velocity = analysis.learning_velocity.velocity_for(&rec.subject);
            let duration = adjust_duration(&rec.template.duration, velocity.duration_multiplier());

            rec.personalized_tips = personalized_tips(catalog, &rec, velocity);
            // the schedule keeps the catalog duration; only the headline one scales
            rec.adaptive_schedule = Some(adaptive_schedule(&rec.template.duration, velocity));
            rec.motivational_note = note.to_string();
            rec.template.duration = duration;
            rec
        })
        .collect()
}
