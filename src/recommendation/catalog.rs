use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::types::{Difficulty, PrimaryIssue, Subject, Velocity};
use crate::config::ConfigError;
use crate::recommendation::types::{LearningStyle, RecommendationTemplate};

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

pub type DifficultyTiers = BTreeMap<Difficulty, Vec<RecommendationTemplate>>;

/// Static learning content: activity templates per subject and difficulty,
/// plus the hint and tip tables used to personalize them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Catalog {
    pub templates: BTreeMap<Subject, DifficultyTiers>,
    pub velocity_tips: BTreeMap<Velocity, Vec<String>>,
    pub subject_tips: BTreeMap<Subject, String>,
    pub issue_features: BTreeMap<PrimaryIssue, Vec<String>>,
    pub style_features: BTreeMap<LearningStyle, String>,
}

impl Catalog {
    /// The catalog bundled with the crate.
    pub fn builtin() -> Self {
        match Self::from_json_str(BUILTIN_CATALOG) {
            Ok(catalog) => catalog,
            Err(err) => {
                tracing::error!(error = %err, "bundled catalog is invalid, using an empty catalog");
                Self::default()
            }
        }
    }

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

    pub fn has_subject(&self, subject: &Subject) -> bool {
        self.templates.contains_key(subject)
    }

    /// Templates in catalog order. `None` when the subject has no entry at
    /// all; an empty slice when only the tier is missing.
    pub fn templates(
        &self,
        subject: &Subject,
        difficulty: Difficulty,
    ) -> Option<&[RecommendationTemplate]> {
        self.templates.get(subject).map(|tiers| {
            tiers
                .get(&difficulty)
                .map(Vec::as_slice)
                .unwrap_or(&[])
        })
    }

    pub fn velocity_tips(&self, velocity: Velocity) -> &[String] {
        self.velocity_tips
            .get(&velocity)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn subject_tip(&self, subject: &Subject) -> Option<&str> {
        self.subject_tips.get(subject).map(String::as_str)
    }

    pub fn issue_features(&self, issue: PrimaryIssue) -> &[String] {
        self.issue_features
            .get(&issue)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn style_feature(&self, style: LearningStyle) -> Option<&str> {
        self.style_features.get(&style).map(String::as_str)
    }

    pub fn template_count(&self) -> usize {
        self.templates
            .values()
            .flat_map(|tiers| tiers.values())
            .map(Vec::len)
            .sum()
    }
}
