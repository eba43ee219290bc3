use serde::{Deserialize, Serialize};

/// Input for the /v1beta/search endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest {
    pub search_queries: Vec<String>,
    pub max_results: u32,
    pub mode: String,
}

/// Wrapper for Parallel search responses.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// A single web search result.
///
/// The API is loose about optional fields: `title` and `url` may be missing
/// or null, and `excerpts` is usually an array of text fragments but has been
/// observed as a bare string. Accessors normalize all of that.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub excerpts: serde_json::Value,
}

impl SearchResult {
    /// Result title, with the API's placeholder for missing or empty values.
    pub fn title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => "No Title",
        }
    }

    /// Result URL, empty when the API omitted one.
    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    /// Excerpt fragments joined into a single text block.
    pub fn excerpt_text(&self) -> String {
        match &self.excerpts {
            serde_json::Value::Array(items) => items
                .iter()
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_text_joins_fragment_array() {
        let result: SearchResult = serde_json::from_str(
            r#"{"title": "A post", "url": "https://example.com/a", "excerpts": ["first part", "second part"]}"#,
        )
        .unwrap();
        assert_eq!(result.excerpt_text(), "first part second part");
    }

    #[test]
    fn excerpt_text_accepts_bare_string() {
        let result: SearchResult =
            serde_json::from_str(r#"{"url": "https://example.com/b", "excerpts": "just one excerpt"}"#)
                .unwrap();
        assert_eq!(result.excerpt_text(), "just one excerpt");
    }

    #[test]
    fn excerpt_text_empty_when_missing() {
        let result: SearchResult = serde_json::from_str(r#"{"url": "https://example.com/c"}"#).unwrap();
        assert_eq!(result.excerpt_text(), "");
    }

    #[test]
    fn title_and_url_fall_back_when_absent() {
        let result: SearchResult = serde_json::from_str(r#"{"excerpts": []}"#).unwrap();
        assert_eq!(result.title(), "No Title");
        assert_eq!(result.url(), "");

        let result: SearchResult =
            serde_json::from_str(r#"{"title": "", "url": null, "excerpts": []}"#).unwrap();
        assert_eq!(result.title(), "No Title");
    }
}
