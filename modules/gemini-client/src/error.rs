use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No completion text in response from model {0}")]
    NoCompletion(String),
}

impl GeminiError {
    /// True when the API pushed back on call rate or quota. These are the
    /// only failures worth retrying with backoff.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            GeminiError::Api { status: 429, .. } => true,
            GeminiError::Api { message, .. } => {
                message.contains("RESOURCE_EXHAUSTED") || message.contains("Quota exceeded")
            }
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        GeminiError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_429_is_rate_limited() {
        let err = GeminiError::Api {
            status: 429,
            message: "too many requests".to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn quota_message_is_rate_limited() {
        let err = GeminiError::Api {
            status: 403,
            message: "Quota exceeded for generate_content_free_tier_requests".to_string(),
        };
        assert!(err.is_rate_limited());

        let err = GeminiError::Api {
            status: 400,
            message: r#"{"error": {"status": "RESOURCE_EXHAUSTED"}}"#.to_string(),
        };
        assert!(err.is_rate_limited());
    }

    #[test]
    fn other_errors_are_not_rate_limited() {
        assert!(!GeminiError::Network("connection refused".to_string()).is_rate_limited());
        assert!(!GeminiError::Api {
            status: 500,
            message: "internal".to_string()
        }
        .is_rate_limited());
    }
}
