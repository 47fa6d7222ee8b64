mod common;

use quiz_insight::analysis::{
    Analysis, Difficulty, PerformanceRecord, Priority, Subject,
};
use quiz_insight::recommendation::{
    Catalog, ConfidenceBoost, JsonSink, LearningStyle, RecommendationEngine,
    RecommendationSink, RecommendationStats, RecommendationTemplate, ReviewFrequency,
};
use quiz_insight::Report;

use common::{demo_learner, engine, pinned_analyzer, record, records};

fn titles(recs: &[quiz_insight::recommendation::RecommendationInstance]) -> Vec<&str> {
    recs.iter().map(|r| r.title()).collect()
}

#[test]
fn demo_learner_recommendations_are_ordered() {
    let analysis = pinned_analyzer().analyze(&demo_learner());
    let recs = engine().recommend(&analysis);

    assert_eq!(
        titles(&recs),
        vec![
            "Algebraic Expressions Mastery",
            "Geometry Problem Solving",
            "World Wars Analysis",
            "Cultural Revolution Studies",
            "Advanced Organic Chemistry",
            "Critical Thinking and Argumentation",
        ]
    );
    assert!(recs.iter().all(|r| r.priority == Priority::Medium));

    let algebra = &recs[0];
    assert_eq!(algebra.subject, Subject::Mathematics);
    assert_eq!(algebra.expected_outcome.accuracy_improvement, "27%");
    assert_eq!(algebra.expected_outcome.time_to_see_results, "3-5 days");
    assert_eq!(algebra.expected_outcome.confidence_boost, ConfidenceBoost::Medium);
    assert_eq!(
        algebra.personalized_reason,
        "Based on your 62% accuracy in Mathematics, this comprehensive review will strengthen your overall skills."
    );
    assert_eq!(
        algebra.motivational_note,
        "Excellent work! Fine-tune your skills with advanced challenges."
    );

    // slow learners get longer sessions
    let chemistry = &recs[4];
    assert_eq!(chemistry.template.duration, "85 minutes");
    let schedule = chemistry.adaptive_schedule.as_ref().unwrap();
    assert_eq!(schedule.sessions_per_week, 4);
    assert_eq!(schedule.review_frequency, ReviewFrequency::Daily);
    assert_eq!(schedule.session_duration, "65 minutes");
    assert!(schedule.reinforcement_activities);
    assert_eq!(recs[5].template.duration, "72 minutes");
}

#[test]
fn critical_subject_gets_three_easy_high_priority_items() {
    let input = records(&[(Subject::Mathematics, PerformanceRecord::new(0, 0, None))]);
    let analysis = pinned_analyzer().analyze(&input);
    let recs = engine().recommend(&analysis);

    assert_eq!(
        titles(&recs),
        vec![
            "Basic Arithmetic Review",
            "Fraction Fundamentals",
            "Number Patterns Practice"
        ]
    );
    for rec in &recs {
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.template.difficulty, Difficulty::Easy);
        assert_eq!(rec.expected_outcome.time_to_see_results, "1-2 weeks");
        assert_eq!(rec.personalized_tips.len(), 3);
        assert!(rec
            .adaptive_features
            .iter()
            .any(|f| f == "Extra practice problems"));
    }
    // fast velocity shortens sessions
    let durations: Vec<&str> = recs.iter().map(|r| r.template.duration.as_str()).collect();
    assert_eq!(durations, vec!["24 minutes", "20 minutes", "16 minutes"]);
    let sessions: Vec<&str> = recs
        .iter()
        .filter_map(|r| r.adaptive_schedule.as_ref())
        .map(|s| s.session_duration.as_str())
        .collect();
    assert_eq!(sessions, vec!["30 minutes", "25 minutes", "20 minutes"]);
    assert_eq!(recs[0].expected_outcome.accuracy_improvement, "30%");
    assert_eq!(
        recs[0].motivational_note,
        "Every step forward counts! You're building a strong foundation."
    );
}

#[test]
fn empty_analysis_returns_default_item() {
    let recs = engine().recommend(&Analysis::empty(0));
    assert_eq!(recs.len(), 1);
    let rec = &recs[0];
    assert_eq!(rec.title(), "Study Skills Assessment");
    assert_eq!(rec.priority, Priority::High);
    assert_eq!(rec.template.duration, "20 minutes");
    assert_eq!(rec.template.learning_style, LearningStyle::Reading);
    assert_eq!(rec.expected_outcome.accuracy_improvement, "10%");
    assert!(rec.adaptive_schedule.is_none());
}

#[test]
fn subjects_without_catalog_content_are_reported() {
    let input = records(&[
        (Subject::Geography, record(30, 9, 120.0)),
        (Subject::parse("Art"), record(30, 9, 120.0)),
        (Subject::English, record(30, 27, 60.0)),
    ]);
    let analysis = pinned_analyzer().analyze(&input);
    let engine = engine();
    let recs = engine.recommend(&analysis);

    assert!(recs.iter().all(|r| r.subject == Subject::English));
    assert_eq!(recs.len(), 1);
    assert_eq!(
        engine.catalog_gaps(&analysis),
        vec![Subject::Geography, Subject::parse("Art")]
    );
}

#[test]
fn full_ties_keep_catalog_order() {
    let template = |title: &str| RecommendationTemplate {
        title: title.to_string(),
        description: String::new(),
        kind: "practice".to_string(),
        duration: "30 minutes".to_string(),
        difficulty: Difficulty::Medium,
        topics: Vec::new(),
        learning_style: LearningStyle::Visual,
        estimated_improvement: 15,
    };
    let mut catalog = Catalog::default();
    catalog.templates.insert(
        Subject::Science,
        [(
            Difficulty::Medium,
            vec![template("first"), template("second"), template("third")],
        )]
        .into_iter()
        .collect(),
    );
    catalog.templates.insert(
        Subject::English,
        [(Difficulty::Medium, vec![template("other")])].into_iter().collect(),
    );

    // both subjects moderate, Science ahead in canonical order
    let input = records(&[
        (Subject::English, record(50, 30, 60.0)),
        (Subject::Science, record(50, 30, 60.0)),
    ]);
    let analysis = pinned_analyzer().analyze(&input);
    let recs = RecommendationEngine::new(catalog).recommend(&analysis);

    assert_eq!(titles(&recs), vec!["first", "second", "other"]);
    assert!(recs.iter().all(|r| r.personalized_tips.is_empty()));
}

#[test]
fn report_bundles_analysis_recommendations_and_stats() {
    let learner = demo_learner();
    let report = Report::build(&pinned_analyzer(), &engine(), &learner);

    assert_eq!(report.stats.total, 6);
    assert_eq!(report.stats.by_priority.get(&Priority::Medium), Some(&6));
    assert_eq!(report.stats.by_subject.get(&Subject::History), Some(&2));
    assert_eq!(report.stats.by_difficulty.get(&Difficulty::Hard), Some(&2));
    assert_eq!(report.profile.total_questions, 160);
    assert_eq!(report.profile.completed_lessons, 11);
    assert_eq!(
        report.stats,
        RecommendationStats::from_recommendations(&report.recommendations)
    );

    let mut sink = JsonSink::new(Vec::new());
    sink.render(&report.recommendations).unwrap();
    let rendered: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();
    assert_eq!(rendered.as_array().map(Vec::len), Some(6));
    assert_eq!(rendered[0]["learningStyle"], "reading");
    assert_eq!(rendered[0]["adaptiveSchedule"]["reviewFrequency"], "weekly");
}
