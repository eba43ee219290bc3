pub mod error;
pub mod types;

pub use error::{ParallelError, Result};
pub use types::{SearchRequest, SearchResponse, SearchResult};

const BASE_URL: &str = "https://api.parallel.ai";

/// Search mode for the /v1beta/search endpoint. Agentic mode lets the API
/// expand the query and pull excerpts from the pages it ranks.
const SEARCH_MODE: &str = "agentic";

pub struct ParallelClient {
    client: reqwest::Client,
    api_key: String,
}

impl ParallelClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Run a web search query and return ranked results with excerpts.
    pub async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchResult>> {
        let input = SearchRequest {
            search_queries: vec![query.to_string()],
            max_results,
            mode: SEARCH_MODE.to_string(),
        };

        let url = format!("{}/v1beta/search", BASE_URL);
        let resp = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .json(&input)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ParallelError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: SearchResponse = resp.json().await?;
        tracing::debug!(query, count = api_resp.results.len(), "Parallel search complete");
        Ok(api_resp.results)
    }
}
