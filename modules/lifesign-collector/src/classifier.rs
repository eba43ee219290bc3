use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use gemini_client::{strip_code_blocks, truncate_chars};
use lifesign_common::{Annotation, Category, Severity, Verdict};

use crate::traits::{RiskScorer, TextGenerator};

/// Characters of input text submitted for classification.
pub const CLASSIFY_INPUT_MAX_CHARS: usize = 500;

const CLASSIFY_PROMPT: &str = r#"Analyze the following text for safety risk severity.
Text: "{text}"

Return a JSON object with:
- severity: "low", "medium", "high"
- reason: short explanation
- category: best matching category from [self-harm, suicide, violence, abuse, overdose] or "other"

JSON:"#;

/// Raw classifier output before enum mapping. Fields the model omits or
/// mangles degrade to `unknown` / empty rather than failing the record.
#[derive(Debug, Deserialize)]
struct RawAnnotation {
    severity: Option<String>,
    reason: Option<String>,
    category: Option<String>,
}

/// Severity classifier backed by a text-generation collaborator. The
/// `classify` boundary never errors: every failure mode comes back as
/// `Verdict::Degraded` so the record survives with `unknown` markings.
pub struct Classifier<G> {
    generator: G,
}

impl<G: TextGenerator> Classifier<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    async fn classify_inner(&self, text: &str) -> Result<Annotation, String> {
        let snippet = truncate_chars(text, CLASSIFY_INPUT_MAX_CHARS);
        let prompt = CLASSIFY_PROMPT.replace("{text}", snippet);

        let completion = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| e.to_string())?;

        let raw: RawAnnotation = serde_json::from_str(strip_code_blocks(&completion))
            .map_err(|e| format!("unparsable classifier output: {e}"))?;

        Ok(Annotation {
            severity: raw
                .severity
                .as_deref()
                .map(Severity::from_label)
                .unwrap_or(Severity::Unknown),
            category: raw
                .category
                .as_deref()
                .map(Category::from_label)
                .unwrap_or(Category::Unknown),
            reason: raw.reason.unwrap_or_default(),
        })
    }
}

#[async_trait]
impl<G: TextGenerator> RiskScorer for Classifier<G> {
    async fn classify(&self, text: &str) -> Verdict {
        match self.classify_inner(text).await {
            Ok(annotation) => Verdict::Scored(annotation),
            Err(reason) => {
                warn!(error = reason.as_str(), "classification degraded");
                Verdict::Degraded { reason }
            }
        }
    }
}
