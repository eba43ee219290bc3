pub mod error;
pub mod types;
pub mod util;

pub use error::{GeminiError, Result};
pub use types::{GenerateContentRequest, GenerateContentResponse, ModelInfo};
pub use util::{strip_code_blocks, truncate_chars};

const BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct Gemini {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl Gemini {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run a single-turn text prompt and return the completion text.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/v1beta/models/{}:generateContent", BASE_URL, self.model);
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: GenerateContentResponse = resp.json().await?;
        let text = api_resp
            .text()
            .ok_or_else(|| GeminiError::NoCompletion(self.model.clone()))?;
        tracing::debug!(model = self.model.as_str(), chars = text.len(), "Gemini completion received");
        Ok(text)
    }

    /// List the models available to this API key.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = format!("{}/v1beta/models", BASE_URL);
        let resp = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let api_resp: types::ListModelsResponse = resp.json().await?;
        Ok(api_resp.models)
    }
}
