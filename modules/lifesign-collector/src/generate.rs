use std::time::Duration;

use rand::Rng;
use tracing::{info, warn};

use lifesign_common::{Category, Record};

use crate::dataset::{DatasetStore, InsertOutcome};
use crate::sources::SYNTHETIC_PROVENANCE;
use crate::stats::RunStats;
use crate::traits::{RiskScorer, TextGenerator};

/// Pause between generated items. Generation-heavy runs burn free-tier quota
/// fast; a long gap keeps the run under the per-minute ceiling.
pub const ITEM_DELAY: Duration = Duration::from_secs(60);

/// Base backoff after a rate-limit error. Actual delay is base × attempt number.
pub const RETRY_BASE_DELAY: Duration = Duration::from_secs(60);

/// Total attempts per item before giving up on a rate-limited call.
pub const MAX_GENERATION_ATTEMPTS: u32 = 3;

fn generation_prompt(category: Category) -> String {
    format!(
        "Generate a realistic, short social media post or forum comment (max 300 chars) that discusses {category}.\n\
         It should sound authentic, like a real person sharing a personal story, seeking help, or raising awareness.\n\
         Do NOT include hashtags."
    )
}

/// Synthetic collector: asks the generation collaborator for one post at a
/// time on a randomly chosen topic, classifies it, and inserts it with an
/// empty URL and the synthetic provenance tag.
pub struct SyntheticCollector<G, C> {
    generator: G,
    scorer: C,
    target_new_items: usize,
    item_delay: Duration,
    retry_base_delay: Duration,
    max_attempts: u32,
}

impl<G: TextGenerator, C: RiskScorer> SyntheticCollector<G, C> {
    pub fn new(
        generator: G,
        scorer: C,
        target_new_items: usize,
        item_delay: Duration,
        retry_base_delay: Duration,
        max_attempts: u32,
    ) -> Self {
        Self {
            generator,
            scorer,
            target_new_items,
            item_delay,
            retry_base_delay,
            max_attempts,
        }
    }

    pub async fn run(&self, store: &mut DatasetStore) -> RunStats {
        let mut stats = RunStats::default();

        for i in 0..self.target_new_items {
            let category = Category::TOPICS[rand::rng().random_range(0..Category::TOPICS.len())];
            info!(category = %category, "generating synthetic post");

            stats.generation_attempts += 1;
            let Some(content) = self
                .generate_with_retry(&generation_prompt(category), &mut stats)
                .await
            else {
                stats.generation_failures += 1;
                continue;
            };
            let content = content.trim().to_string();

            let verdict = self.scorer.classify(&content).await;
            if verdict.is_degraded() {
                stats.degraded_classifications += 1;
            }
            let record = Record::new(
                format!("User Story: {}", category.title()),
                content,
                String::new(),
                SYNTHETIC_PROVENANCE.to_string(),
                verdict,
            );
            stats.count_severity(record.severity);
            if store.insert(record) == InsertOutcome::Inserted {
                stats.records_added += 1;
            }

            if i + 1 < self.target_new_items {
                tokio::time::sleep(self.item_delay).await;
            }
        }

        stats
    }

    /// Bounded linear retry on rate-limit errors only. Other failures skip
    /// the item immediately.
    async fn generate_with_retry(&self, prompt: &str, stats: &mut RunStats) -> Option<String> {
        for attempt in 1..=self.max_attempts {
            match self.generator.generate(prompt).await {
                Ok(text) => return Some(text),
                Err(e) if e.is_rate_limited() && attempt < self.max_attempts => {
                    let backoff = self.retry_base_delay * attempt;
                    stats.rate_limit_retries += 1;
                    warn!(
                        attempt,
                        backoff_secs = backoff.as_secs(),
                        "rate limit hit, retrying after backoff"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(e) => {
                    warn!(error = %e, "generation failed, skipping item");
                    return None;
                }
            }
        }
        None
    }
}
