use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_client::Gemini;
use lifesign_collector::classifier::Classifier;
use lifesign_collector::dataset::DatasetStore;
use lifesign_collector::generate::{
    SyntheticCollector, ITEM_DELAY, MAX_GENERATION_ATTEMPTS, RETRY_BASE_DELAY,
};
use lifesign_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("lifesign_collector=info".parse()?),
        )
        .init();

    info!("Lifesign synthetic collector starting...");

    let config = Config::from_env()?;

    let generator = Gemini::new(
        config.gemini_api_key.clone(),
        config.generation_model.clone(),
    );
    let classifier = Classifier::new(Gemini::new(
        config.gemini_api_key.clone(),
        config.generation_model.clone(),
    ));

    let mut store = DatasetStore::new(
        &config.dataset_path,
        &config.backup_path,
        config.max_dataset_records,
    );
    store.load();

    let collector = SyntheticCollector::new(
        generator,
        classifier,
        config.generate_target_items,
        ITEM_DELAY,
        RETRY_BASE_DELAY,
        MAX_GENERATION_ATTEMPTS,
    );
    let stats = collector.run(&mut store).await;

    store.trim();
    store.save()?;

    info!(records = store.len(), "Generation complete. {stats}");
    Ok(())
}
