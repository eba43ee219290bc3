use std::time::Duration;

use tracing::{info, warn};

use lifesign_common::{Category, Record};

use crate::dataset::{DatasetStore, InsertOutcome};
use crate::sources;
use crate::stats::RunStats;
use crate::traits::{RiskScorer, SearchProvider};

/// Pause between search queries to stay inside the search API's rate limits.
pub const QUERY_DELAY: Duration = Duration::from_secs(1);

/// Web collector: walks the query catalog category by category, classifies
/// each usable result, and inserts it into the store. Per-query failures are
/// logged and skipped; the run never aborts on a collaborator error.
pub struct WebCollector<S, C> {
    search: S,
    scorer: C,
    target_new_items: usize,
    search_max_results: u32,
    query_delay: Duration,
}

impl<S: SearchProvider, C: RiskScorer> WebCollector<S, C> {
    pub fn new(
        search: S,
        scorer: C,
        target_new_items: usize,
        search_max_results: u32,
        query_delay: Duration,
    ) -> Self {
        Self {
            search,
            scorer,
            target_new_items,
            search_max_results,
            query_delay,
        }
    }

    pub async fn run(&self, store: &mut DatasetStore) -> RunStats {
        let mut stats = RunStats::default();

        'categories: for category in Category::TOPICS {
            info!(category = %category, "searching");
            for query in sources::category_queries(category) {
                if stats.records_added as usize >= self.target_new_items {
                    break 'categories;
                }

                stats.queries_issued += 1;
                let hits = match self.search.search(&query, self.search_max_results).await {
                    Ok(hits) => hits,
                    Err(e) => {
                        warn!(query = query.as_str(), error = %e, "search failed, skipping query");
                        continue;
                    }
                };
                if hits.is_empty() {
                    info!(query = query.as_str(), "no results");
                }

                for hit in hits {
                    if stats.records_added as usize >= self.target_new_items {
                        break;
                    }
                    stats.results_seen += 1;

                    // The search API sometimes returns no excerpt text or a
                    // stringified empty array; neither is worth storing.
                    if hit.excerpt.trim().is_empty() || hit.excerpt == "[]" {
                        stats.empty_excerpts_skipped += 1;
                        continue;
                    }
                    if store.contains_url(&hit.url) {
                        info!(url = hit.url.as_str(), "skipping duplicate");
                        stats.duplicates_skipped += 1;
                        continue;
                    }

                    let verdict = self.scorer.classify(&hit.excerpt).await;
                    if verdict.is_degraded() {
                        stats.degraded_classifications += 1;
                    }
                    let record =
                        Record::new(hit.title, hit.excerpt, hit.url, query.clone(), verdict);
                    stats.count_severity(record.severity);
                    match store.insert(record) {
                        InsertOutcome::Inserted => stats.records_added += 1,
                        InsertOutcome::DuplicateUrl => stats.duplicates_skipped += 1,
                    }
                }

                tokio::time::sleep(self.query_delay).await;
            }
        }

        stats
    }
}
