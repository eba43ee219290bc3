use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParallelError>;

#[derive(Debug, Error)]
pub enum ParallelError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ParallelError {
    fn from(err: reqwest::Error) -> Self {
        ParallelError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ParallelError {
    fn from(err: serde_json::Error) -> Self {
        ParallelError::Parse(err.to_string())
    }
}
