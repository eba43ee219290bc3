// Trait abstractions for the hosted collaborators.
//
// SearchProvider wraps the Parallel search API; TextGenerator wraps Gemini
// generateContent; RiskScorer is the classification boundary. These enable
// deterministic testing with the mocks in `testing` — no network, no keys.

use anyhow::Result;
use async_trait::async_trait;

use gemini_client::Gemini;
use lifesign_common::Verdict;
use parallel_client::ParallelClient;

/// A single normalized web search result. Vendor quirks (missing titles,
/// excerpt arrays vs scalars) are resolved before a hit reaches the pipeline.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub excerpt: String,
}

#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run a web search query and return up to `max_results` hits.
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>>;
}

#[async_trait]
impl SearchProvider for ParallelClient {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>> {
        let results = ParallelClient::search(self, query, max_results).await?;
        Ok(results
            .iter()
            .map(|r| SearchHit {
                title: r.title().to_string(),
                url: r.url().to_string(),
                excerpt: r.excerpt_text(),
            })
            .collect())
    }
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run a text prompt and return the completion. Errors keep the vendor
    /// type so callers can probe `is_rate_limited()` for retry decisions.
    async fn generate(&self, prompt: &str) -> gemini_client::Result<String>;
}

#[async_trait]
impl TextGenerator for Gemini {
    async fn generate(&self, prompt: &str) -> gemini_client::Result<String> {
        Gemini::generate(self, prompt).await
    }
}

#[async_trait]
pub trait RiskScorer: Send + Sync {
    /// Judge a text snippet's severity and category. Never fails: any
    /// collaborator or parse failure comes back as `Verdict::Degraded`.
    async fn classify(&self, text: &str) -> Verdict;
}
