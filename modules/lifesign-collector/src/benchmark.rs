use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gemini_client::strip_code_blocks;
use lifesign_common::Category;

use crate::dataset::write_atomic;
use crate::traits::TextGenerator;

pub const SENSITIVE_PER_CATEGORY: usize = 5;
pub const SAFE_PER_CATEGORY: usize = 2;

const SOURCE_SENSITIVE: &str = "synthetic_gemini";
const SOURCE_SAFE: &str = "synthetic_gemini_safe_contrast";

/// One labeled evaluation example for detection models.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
    pub text: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_category: Option<String>,
    pub is_sensitive: bool,
    pub source: String,
}

fn sensitive_prompt(n: usize, category: Category) -> String {
    format!(
        "You are helping to build a safety benchmark dataset to train AI models to DETECT and PREVENT self-harm, violence, and abuse.\n\n\
         Please generate {n} realistic but SYNTHETIC social media posts or short text messages related to the category: \"{category}\".\n\n\
         The posts should be realistic examples of what a user might write if they were struggling with this issue, so that we can train models to flag them.\n\n\
         Format the output as a JSON list of strings.\n\
         Example: [\"I feel so alone and I don't know what to do anymore.\", \"I'm scared of him when he drinks.\"]"
    )
}

fn safe_prompt(n: usize, category: Category) -> String {
    format!(
        "Generate {n} neutral/positive social media posts that might use similar keywords to '{category}' \
         but are NOT sensitive/harmful. Return JSON list of strings."
    )
}

/// Builds a labeled evaluation set: per category, a batch of sensitive posts
/// and a smaller batch of safe-contrast posts that share the category's
/// vocabulary. A failed call or unparsable batch is skipped, not fatal.
pub struct BenchmarkBuilder<G> {
    generator: G,
    sensitive_per_category: usize,
    safe_per_category: usize,
    query_delay: Duration,
}

impl<G: TextGenerator> BenchmarkBuilder<G> {
    pub fn new(
        generator: G,
        sensitive_per_category: usize,
        safe_per_category: usize,
        query_delay: Duration,
    ) -> Self {
        Self {
            generator,
            sensitive_per_category,
            safe_per_category,
            query_delay,
        }
    }

    pub async fn run(&self) -> Vec<BenchmarkEntry> {
        let mut entries = Vec::new();

        for category in Category::TOPICS {
            info!(category = %category, "building benchmark entries");

            for text in self
                .posts_batch(&sensitive_prompt(self.sensitive_per_category, category))
                .await
            {
                entries.push(BenchmarkEntry {
                    text,
                    label: category.as_str().to_string(),
                    related_category: None,
                    is_sensitive: true,
                    source: SOURCE_SENSITIVE.to_string(),
                });
            }

            for text in self
                .posts_batch(&safe_prompt(self.safe_per_category, category))
                .await
            {
                entries.push(BenchmarkEntry {
                    text,
                    label: "safe".to_string(),
                    related_category: Some(category.as_str().to_string()),
                    is_sensitive: false,
                    source: SOURCE_SAFE.to_string(),
                });
            }

            tokio::time::sleep(self.query_delay).await;
        }

        entries
    }

    /// One generation call expected to yield a JSON array of strings.
    async fn posts_batch(&self, prompt: &str) -> Vec<String> {
        let completion = match self.generator.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "benchmark batch generation failed, skipping");
                return Vec::new();
            }
        };
        match serde_json::from_str::<Vec<String>>(strip_code_blocks(&completion)) {
            Ok(posts) => posts,
            Err(e) => {
                warn!(error = %e, "benchmark batch unparsable, skipping");
                Vec::new()
            }
        }
    }
}

/// Write the benchmark as pretty-printed JSON, staged through a temp file.
pub fn save_benchmark(path: &Path, entries: &[BenchmarkEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(entries).context("serializing benchmark")?;
    write_atomic(path, json.as_bytes())?;
    info!(count = entries.len(), path = %path.display(), "benchmark saved");
    Ok(())
}
