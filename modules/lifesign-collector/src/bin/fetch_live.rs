use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_client::Gemini;
use lifesign_collector::classifier::Classifier;
use lifesign_collector::dataset::DatasetStore;
use lifesign_collector::fetch::{WebCollector, QUERY_DELAY};
use lifesign_common::Config;
use parallel_client::ParallelClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("lifesign_collector=info".parse()?),
        )
        .init();

    info!("Lifesign web collector starting...");

    let config = Config::from_env()?;
    let parallel_key = config
        .parallel_api_key
        .clone()
        .context("PARALLEL_API_KEY must be set for live fetching")?;

    let search = ParallelClient::new(parallel_key);
    let classifier = Classifier::new(Gemini::new(
        config.gemini_api_key.clone(),
        config.classify_model.clone(),
    ));

    let mut store = DatasetStore::new(
        &config.dataset_path,
        &config.backup_path,
        config.max_dataset_records,
    );
    store.load();

    let collector = WebCollector::new(
        search,
        classifier,
        config.fetch_target_items,
        config.search_max_results,
        QUERY_DELAY,
    );
    let stats = collector.run(&mut store).await;

    store.trim();
    store.save()?;

    info!(records = store.len(), "Collection complete. {stats}");
    Ok(())
}
