use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::text::{excerpt, CONTENT_MAX_CHARS};

/// Coarse risk classification of a record's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Unknown,
}

impl Severity {
    /// Map a classifier's severity string onto the enum. Anything outside the
    /// known set falls back to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "low" => Severity::Low,
            "medium" => Severity::Medium,
            "high" => Severity::High,
            _ => Severity::Unknown,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Unknown => write!(f, "unknown"),
        }
    }
}

/// Content taxonomy. The five concrete topics drive collection;
/// `Other` is a valid classifier verdict for off-taxonomy content;
/// `Unknown` marks degraded or unrecognized classification output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    SelfHarm,
    Suicide,
    Violence,
    Abuse,
    Overdose,
    Other,
    Unknown,
}

impl Category {
    /// The topics collection runs iterate over.
    pub const TOPICS: [Category; 5] = [
        Category::SelfHarm,
        Category::Suicide,
        Category::Violence,
        Category::Abuse,
        Category::Overdose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::SelfHarm => "self-harm",
            Category::Suicide => "suicide",
            Category::Violence => "violence",
            Category::Abuse => "abuse",
            Category::Overdose => "overdose",
            Category::Other => "other",
            Category::Unknown => "unknown",
        }
    }

    /// Title-cased form used in record titles.
    pub fn title(&self) -> &'static str {
        match self {
            Category::SelfHarm => "Self-Harm",
            Category::Suicide => "Suicide",
            Category::Violence => "Violence",
            Category::Abuse => "Abuse",
            Category::Overdose => "Overdose",
            Category::Other => "Other",
            Category::Unknown => "Unknown",
        }
    }

    /// Map a classifier's category string onto the enum. Anything outside the
    /// taxonomy (including "other" misspellings) falls back to `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "self-harm" => Category::SelfHarm,
            "suicide" => Category::Suicide,
            "violence" => Category::Violence,
            "abuse" => Category::Abuse,
            "overdose" => Category::Overdose,
            "other" => Category::Other,
            _ => Category::Unknown,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A successful classifier judgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub severity: Severity,
    pub category: Category,
    pub reason: String,
}

/// Outcome of a classification call. `Degraded` carries the failure text so
/// callers can distinguish a real judgment from a fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Scored(Annotation),
    Degraded { reason: String },
}

impl Verdict {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Verdict::Degraded { .. })
    }
}

/// One collected or synthesized text item with its metadata and severity
/// annotation. Immutable after construction; removal happens only via the
/// dataset store's trailing-window trim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub title: String,
    pub content: String,
    /// Natural key for deduplication; empty for synthetic records.
    pub url: String,
    pub original_query: String,
    pub severity: Severity,
    pub reason: String,
    pub detected_category: Category,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl Record {
    /// Build a record from raw collected text and a classifier verdict.
    /// Content is capped here so every record satisfies the length invariant
    /// from birth regardless of which collector produced it.
    pub fn new(
        title: String,
        content: String,
        url: String,
        original_query: String,
        verdict: Verdict,
    ) -> Self {
        let (severity, detected_category, reason) = match verdict {
            Verdict::Scored(a) => (a.severity, a.category, a.reason),
            Verdict::Degraded { reason } => (Severity::Unknown, Category::Unknown, reason),
        };
        Self {
            title,
            content: excerpt(&content, CONTENT_MAX_CHARS),
            url,
            original_query,
            severity,
            reason,
            detected_category,
            // Second precision so a record survives a save/load cycle intact.
            timestamp: Utc::now().trunc_subsecs(0),
        }
    }
}

/// Serde adapter for the dataset's `YYYY-MM-DD HH:MM:SS` timestamp format.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        let naive =
            NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)?;
        Ok(naive.and_utc())
    }
}
