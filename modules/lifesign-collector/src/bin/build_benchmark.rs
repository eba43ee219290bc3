use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_client::Gemini;
use lifesign_collector::benchmark::{
    save_benchmark, BenchmarkBuilder, SAFE_PER_CATEGORY, SENSITIVE_PER_CATEGORY,
};
use lifesign_collector::fetch::QUERY_DELAY;
use lifesign_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("lifesign_collector=info".parse()?),
        )
        .init();

    info!("Lifesign benchmark builder starting...");

    let config = Config::from_env()?;

    let generator = Gemini::new(config.gemini_api_key.clone(), config.classify_model.clone());
    let builder = BenchmarkBuilder::new(
        generator,
        SENSITIVE_PER_CATEGORY,
        SAFE_PER_CATEGORY,
        QUERY_DELAY,
    );

    let entries = builder.run().await;
    save_benchmark(&config.benchmark_path, &entries)?;

    info!(count = entries.len(), "Benchmark build complete");
    Ok(())
}
