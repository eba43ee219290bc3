use std::path::PathBuf;

use anyhow::{Context, Result};

/// Run configuration loaded once at startup from environment variables
/// (`.env` honored). Collectors and classifiers receive values from here at
/// construction; nothing reads the process environment after this.
#[derive(Debug, Clone)]
pub struct Config {
    // AI / search providers
    pub gemini_api_key: String,
    pub parallel_api_key: Option<String>,
    pub classify_model: String,
    pub generation_model: String,

    // Output files
    pub dataset_path: PathBuf,
    pub backup_path: PathBuf,
    pub benchmark_path: PathBuf,

    // Run sizing
    pub fetch_target_items: usize,
    pub generate_target_items: usize,
    pub search_max_results: u32,
    pub max_dataset_records: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .context("GEMINI_API_KEY must be set")?,
            parallel_api_key: std::env::var("PARALLEL_API_KEY").ok(),
            classify_model: std::env::var("GEMINI_CLASSIFY_MODEL")
                .unwrap_or_else(|_| "gemini-flash-latest".to_string()),
            generation_model: std::env::var("GEMINI_GENERATION_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash-exp".to_string()),
            dataset_path: std::env::var("DATASET_PATH")
                .unwrap_or_else(|_| "data/real_world_data.json".to_string())
                .into(),
            backup_path: std::env::var("BACKUP_PATH")
                .unwrap_or_else(|_| "data/real_world_data.backup.json".to_string())
                .into(),
            benchmark_path: std::env::var("BENCHMARK_PATH")
                .unwrap_or_else(|_| "data/benchmark.json".to_string())
                .into(),
            fetch_target_items: parse_var("FETCH_TARGET_ITEMS", 20)?,
            generate_target_items: parse_var("GENERATE_TARGET_ITEMS", 10)?,
            search_max_results: parse_var("SEARCH_MAX_RESULTS", 5)?,
            max_dataset_records: parse_var("MAX_DATASET_RECORDS", 100)?,
        };

        config.log_keys();
        Ok(config)
    }

    fn log_keys(&self) {
        fn preview(val: &str) -> String {
            let n = val.len().min(5);
            format!("{}...({} chars)", &val[..n], val.len())
        }
        fn preview_opt(val: &Option<String>) -> String {
            match val {
                Some(v) if !v.is_empty() => preview(v),
                _ => "<not set>".to_string(),
            }
        }

        tracing::info!("Config loaded:");
        tracing::info!("  GEMINI_API_KEY: {}", preview(&self.gemini_api_key));
        tracing::info!("  PARALLEL_API_KEY: {}", preview_opt(&self.parallel_api_key));
        tracing::info!("  Classify model: {}", self.classify_model);
        tracing::info!("  Generation model: {}", self.generation_model);
        tracing::info!("  Dataset path: {}", self.dataset_path.display());
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{name} must be a number, got {raw:?}")),
        Err(_) => Ok(default),
    }
}
