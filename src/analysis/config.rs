use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::types::Subject;
use crate::config::ConfigError;

/// Tables the analyzer reads. Loaded once and shared read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    pub subject_weights: BTreeMap<Subject, f64>,
    pub default_weight: f64,
    pub focus_areas: BTreeMap<Subject, Vec<String>>,
    pub fallback_focus_areas: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        let subject_weights = BTreeMap::from([
            (Subject::Mathematics, 1.2),
            (Subject::Science, 1.1),
            (Subject::English, 1.0),
            (Subject::History, 0.9),
            (Subject::Geography, 0.8),
        ]);

        let focus_areas = BTreeMap::from([
            (
                Subject::Mathematics,
                strings(&["Algebra", "Geometry", "Statistics", "Problem Solving"]),
            ),
            (
                Subject::Science,
                strings(&["Physics", "Chemistry", "Biology", "Scientific Method"]),
            ),
            (
                Subject::English,
                strings(&["Grammar", "Vocabulary", "Reading Comprehension", "Writing"]),
            ),
            (
                Subject::History,
                strings(&["Timeline Events", "Cause and Effect", "Historical Analysis"]),
            ),
            (
                Subject::Geography,
                strings(&["Physical Features", "Climate Patterns", "Human Geography"]),
            ),
        ]);

        Self {
            subject_weights,
            default_weight: 1.0,
            focus_areas,
            fallback_focus_areas: strings(&["General Concepts"]),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn weight_for(&self, subject: &Subject) -> f64 {
        self.subject_weights
            .get(subject)
            .copied()
            .unwrap_or(self.default_weight)
    }

    pub fn focus_areas_for(&self, subject: &Subject) -> &[String] {
        self.focus_areas
            .get(subject)
            .unwrap_or(&self.fallback_focus_areas)
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_subject_gets_default_weight() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.weight_for(&Subject::Mathematics), 1.2);
        assert_eq!(config.weight_for(&Subject::parse("Art")), 1.0);
    }

    #[test]
    fn unknown_subject_gets_fallback_focus_areas() {
        let config = AnalyzerConfig::default();
        assert_eq!(
            config.focus_areas_for(&Subject::parse("Art")),
            &["General Concepts".to_string()]
        );
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config =
            AnalyzerConfig::from_json_str(r#"{"subjectWeights": {"Art": 2.0}}"#).unwrap();
        assert_eq!(config.weight_for(&Subject::parse("Art")), 2.0);
        assert_eq!(config.weight_for(&Subject::Mathematics), 1.0);
        assert_eq!(config.focus_areas_for(&Subject::History).len(), 3);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            AnalyzerConfig::from_json_str("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
