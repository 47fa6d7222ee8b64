use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub data_dir: PathBuf,
    pub user_id: String,
    pub catalog_path: Option<PathBuf>,
    pub analyzer_config_path: Option<PathBuf>,
    pub jitter_seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Self {
        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let data_dir = std::env::var("QUIZ_DATA_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./data/records"));

        let user_id = std::env::var("QUIZ_USER_ID")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "demo".to_string());

        let jitter_seed = std::env::var("QUIZ_JITTER_SEED")
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok());

        Self {
            log_level,
            data_dir,
            user_id,
            catalog_path: optional_path("QUIZ_CATALOG_PATH"),
            analyzer_config_path: optional_path("QUIZ_ANALYZER_CONFIG_PATH"),
            jitter_seed,
        }
    }
}

fn optional_path(key: &str) -> Option<PathBuf> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}
