// Test mocks for the collection pipeline.
//
// Three mocks matching the three trait boundaries:
// - MockSearch (SearchProvider) — HashMap-based query→hits
// - ScriptedGenerator (TextGenerator) — queued replies, consumed in order
// - FixedScorer (RiskScorer) — returns one verdict for every input
//
// Plus helpers for constructing records in store tests.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;

use gemini_client::GeminiError;
use lifesign_common::{Annotation, Category, Record, Severity, Verdict};

pub use crate::traits::SearchHit;
use crate::traits::{RiskScorer, SearchProvider, TextGenerator};

// ---------------------------------------------------------------------------
// MockSearch
// ---------------------------------------------------------------------------

/// HashMap-based search provider. Unregistered queries return no hits;
/// queries registered via `.failing()` return an error.
pub struct MockSearch {
    hits: HashMap<String, Vec<SearchHit>>,
    failures: HashSet<String>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self {
            hits: HashMap::new(),
            failures: HashSet::new(),
        }
    }

    pub fn on_query(mut self, query: &str, hits: Vec<SearchHit>) -> Self {
        self.hits.insert(query.to_string(), hits);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failures.insert(query.to_string());
        self
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    async fn search(&self, query: &str, max_results: u32) -> Result<Vec<SearchHit>> {
        if self.failures.contains(query) {
            bail!("search collaborator unavailable for {query:?}");
        }
        let mut hits = self.hits.get(query).cloned().unwrap_or_default();
        hits.truncate(max_results as usize);
        Ok(hits)
    }
}

// ---------------------------------------------------------------------------
// ScriptedGenerator
// ---------------------------------------------------------------------------

/// Queue-based text generator. Replies are consumed in registration order;
/// an exhausted queue reports a missing completion. Records the prompts it
/// was given for assertions.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<gemini_client::Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(self, text: impl Into<String>) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    pub fn fail(self, err: GeminiError) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl Default for ScriptedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> gemini_client::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GeminiError::NoCompletion("scripted".to_string())))
    }
}

// ---------------------------------------------------------------------------
// FixedScorer
// ---------------------------------------------------------------------------

/// Returns the same verdict for every input.
pub struct FixedScorer {
    verdict: Verdict,
}

impl FixedScorer {
    pub fn new(verdict: Verdict) -> Self {
        Self { verdict }
    }

    pub fn degraded(reason: &str) -> Self {
        Self::new(Verdict::Degraded {
            reason: reason.to_string(),
        })
    }
}

#[async_trait]
impl RiskScorer for FixedScorer {
    async fn classify(&self, _text: &str) -> Verdict {
        self.verdict.clone()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A scored verdict with an empty reason.
pub fn scored(severity: Severity, category: Category) -> Verdict {
    Verdict::Scored(Annotation {
        severity,
        category,
        reason: String::new(),
    })
}

/// A classified record keyed by `url`, for store tests.
pub fn sample_record(url: &str) -> Record {
    Record::new(
        "A post".to_string(),
        "some body text".to_string(),
        url.to_string(),
        "forum discussion abuse support".to_string(),
        scored(Severity::Medium, Category::Abuse),
    )
}
