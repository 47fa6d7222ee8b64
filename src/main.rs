use std::process::ExitCode;

use quiz_insight::analysis::{AnalyzerConfig, SeededJitter, WeaknessAnalyzer};
use quiz_insight::config::{Config, ConfigError};
use quiz_insight::logging::init_tracing;
use quiz_insight::recommendation::{Catalog, JsonSink, RecommendationEngine};
use quiz_insight::store::{demo_records, JsonFileStore, PerformanceStore};
use quiz_insight::Report;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "quiz-insight failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let analyzer = build_analyzer(config)?;
    let engine = build_engine(config)?;

    let store = JsonFileStore::new(&config.data_dir);
    let records = match store.fetch(&config.user_id)? {
        Some(records) => records,
        None => {
            tracing::info!(
                user_id = %config.user_id,
                dir = %store.dir().display(),
                "no stored records, using demo learner"
            );
            demo_records()
        }
    };

    let report = Report::build(&analyzer, &engine, &records);
    tracing::info!(
        user_id = %config.user_id,
        subjects = report.analysis.performance_metrics.len(),
        recommendations = report.recommendations.len(),
        overall_progress = report.analysis.overall_progress,
        "report ready"
    );

    let stdout = std::io::stdout();
    JsonSink::new(stdout.lock()).write_value(&report)?;
    Ok(())
}

fn build_analyzer(config: &Config) -> Result<WeaknessAnalyzer, ConfigError> {
    let tables = match &config.analyzer_config_path {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };
    let analyzer = WeaknessAnalyzer::new(tables);

    Ok(match config.jitter_seed {
        Some(seed) => {
            tracing::debug!(seed, "using seeded jitter");
            analyzer.with_jitter(SeededJitter::new(seed))
        }
        None => analyzer,
    })
}

fn build_engine(config: &Config) -> Result<RecommendationEngine, ConfigError> {
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)?,
        None => Catalog::builtin(),
    };
    tracing::debug!(templates = catalog.template_count(), "catalog loaded");
    Ok(RecommendationEngine::new(catalog))
}
