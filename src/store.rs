use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::types::{records_from_object, PerformanceRecord, PerformanceRecords, Subject};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),
    #[error("{} does not hold a subject-keyed object", .0.display())]
    NotAnObject(PathBuf),
}

/// Per-learner record storage keyed by user id.
pub trait PerformanceStore: Send + Sync {
    /// `None` when the learner has never been stored.
    fn fetch(&self, user_id: &str) -> Result<Option<PerformanceRecords>, StoreError>;

    fn persist(&self, user_id: &str, records: &PerformanceRecords) -> Result<(), StoreError>;

    /// Replaces the given subjects and keeps every other stored subject.
    fn merge(&self, user_id: &str, records: &PerformanceRecords) -> Result<(), StoreError> {
        let mut stored = self.fetch(user_id)?.unwrap_or_default();
        stored.extend(records.iter().map(|(k, v)| (k.clone(), v.clone())));
        self.persist(user_id, &stored)
    }

    /// Folds one finished quiz into the learner's record for `subject` and
    /// returns the updated record.
    fn record_quiz(
        &self,
        user_id: &str,
        subject: &Subject,
        quiz: &QuizResult,
        now_ms: i64,
    ) -> Result<PerformanceRecord, StoreError> {
        let mut stored = self.fetch(user_id)?.unwrap_or_default();
        let record = stored.entry(subject.clone()).or_default();
        record.apply_quiz(quiz, now_ms);
        let updated = record.clone();
        self.persist(user_id, &stored)?;
        tracing::debug!(user_id, %subject, questions = quiz.questions, "quiz recorded");
        Ok(updated)
    }
}

/// Outcome of a single finished quiz.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub questions: u32,
    pub correct: u32,
    /// Wall time spent on the whole quiz.
    pub total_seconds: f64,
    #[serde(default)]
    pub missed_topics: Vec<String>,
}

impl PerformanceRecord {
    pub fn apply_quiz(&mut self, quiz: &QuizResult, now_ms: i64) {
        if !self.is_valid() {
            self.total_questions = Some(0);
            self.correct_answers = Some(0);
            self.average_time = None;
        }

        let prev_total = self.total_questions.unwrap_or(0);
        let prev_correct = self.correct_answers.unwrap_or(0);
        let total = prev_total.saturating_add(quiz.questions);

        self.total_questions = Some(total);
        self.correct_answers =
            Some(prev_correct.saturating_add(quiz.correct.min(quiz.questions)));

        if quiz.questions > 0 && quiz.total_seconds.is_finite() && quiz.total_seconds > 0.0 {
            let average = match self.known_average_time() {
                Some(prev) if prev_total > 0 => {
                    (prev * prev_total as f64 + quiz.total_seconds) / total as f64
                }
                _ => quiz.total_seconds / quiz.questions as f64,
            };
            self.average_time = Some(average);
        }

        for topic in &quiz.missed_topics {
            if !self.weakness_areas.iter().any(|t| t == topic) {
                self.weakness_areas.push(topic.clone());
            }
        }
        self.last_updated = Some(now_ms);
    }
}

/// Ids become file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_user_id(user_id: &str) -> Result<(), StoreError> {
    let ok = !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if ok {
        Ok(())
    } else {
        Err(StoreError::InvalidUserId(user_id.to_string()))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, PerformanceRecords>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PerformanceStore for MemoryStore {
    fn fetch(&self, user_id: &str) -> Result<Option<PerformanceRecords>, StoreError> {
        validate_user_id(user_id)?;
        Ok(self.records.read().get(user_id).cloned())
    }

    fn persist(&self, user_id: &str, records: &PerformanceRecords) -> Result<(), StoreError> {
        validate_user_id(user_id)?;
        self.records
            .write()
            .insert(user_id.to_string(), records.clone());
        Ok(())
    }
}

/// One pretty-printed `<user_id>.json` per learner.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, user_id: &str) -> Result<PathBuf, StoreError> {
        validate_user_id(user_id)?;
        Ok(self.dir.join(format!("{user_id}.json")))
    }
}

impl PerformanceStore for JsonFileStore {
    /// A file that is not JSON fails the fetch; a malformed subject entry
    /// only degrades that subject to an unscorable record.
    fn fetch(&self, user_id: &str) -> Result<Option<PerformanceRecords>, StoreError> {
        let path = self.path_for(user_id)?;
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        let value: serde_json::Value = serde_json::from_str(&raw)?;
        let Some(object) = value.as_object() else {
            return Err(StoreError::NotAnObject(path));
        };

        let records = records_from_object(object);
        let degraded = records.values().filter(|r| !r.is_valid()).count();
        if degraded > 0 {
            tracing::warn!(user_id, degraded, "stored records contain unscorable subjects");
        }
        Ok(Some(records))
    }

    fn persist(&self, user_id: &str, records: &PerformanceRecords) -> Result<(), StoreError> {
        let path = self.path_for(user_id)?;
        std::fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let body = serde_json::to_string_pretty(records)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(())
    }
}

/// The four-subject demo learner.
pub fn demo_records() -> PerformanceRecords {
    let now = chrono::Utc::now().timestamp_millis();
    let entry = |total, correct, avg: f64, areas: &[&str]| PerformanceRecord {
        total_questions: Some(total),
        correct_answers: Some(correct),
        average_time: Some(avg),
        weakness_areas: areas.iter().map(|s| s.to_string()).collect(),
        last_updated: Some(now),
    };

    PerformanceRecords::from([
        (
            Subject::Mathematics,
            entry(45, 28, 85.0, &["Algebra", "Geometry", "Statistics"]),
        ),
        (Subject::Science, entry(38, 32, 72.0, &["Physics", "Chemistry"])),
        (Subject::English, entry(42, 35, 65.0, &["Grammar", "Vocabulary"])),
        (
            Subject::History,
            entry(
                35,
                22,
                95.0,
                &["World Wars", "Ancient History", "Modern History"],
            ),
        ),
    ])
}
