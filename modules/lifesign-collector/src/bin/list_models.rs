use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_client::Gemini;
use lifesign_common::Config;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let gemini = Gemini::new(config.gemini_api_key.clone(), config.classify_model.clone());

    info!("Listing models...");
    for model in gemini.list_models().await? {
        if model.supports_generate_content() {
            println!("{}", model.name);
        }
    }
    Ok(())
}
