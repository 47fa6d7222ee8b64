//! Weakness analysis: per-subject metrics, pattern buckets, difficulty,
//! learning velocity and the derived study plan.

pub mod config;
pub mod engine;
pub mod jitter;
pub mod metrics;
pub mod patterns;
pub mod plan;
pub mod profile;
pub mod types;

pub use config::AnalyzerConfig;
pub use engine::WeaknessAnalyzer;
pub use jitter::{FixedJitter, JitterSource, RandomJitter, SeededJitter};
pub use profile::ProfileStats;
pub use types::*;
