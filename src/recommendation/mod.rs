pub mod catalog;
pub mod engine;
pub mod personalize;
pub mod sink;
pub mod stats;
pub mod types;

pub use catalog::Catalog;
pub use engine::{default_recommendations, RecommendationEngine};
pub use sink::{JsonSink, RecommendationSink, SinkError};
pub use stats::RecommendationStats;
pub use types::*;
