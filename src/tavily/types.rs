use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub search_depth: &'static str,
    pub max_results: u8,
    pub include_answer: bool,
}

#[derive(Debug, Serialize)]
pub struct ExtractRequest<'a> {
    pub urls: &'a [String],
    pub include_images: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Provider-written summary, present because the request sets `include_answer`.
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub response_time: Option<f64>,
    /// Provider fields this crate does not read (`query`, `images`,
    /// `follow_up_questions`, ...), kept so `--json` output stays complete.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SearchResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExtractResponse {
    #[serde(default)]
    pub results: Vec<ExtractedPage>,
    #[serde(default)]
    pub failed_results: Vec<FailedExtraction>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractedPage {
    pub url: String,
    #[serde(default)]
    pub raw_content: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FailedExtraction {
    pub url: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Tavily reports errors as `{"detail": {"error": "..."}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_tolerates_missing_fields() {
        let response: SearchResponse = serde_json::from_value(serde_json::json!({
            "query": "q",
            "results": [{"url": "https://a.com"}],
            "images": []
        }))
        .unwrap();

        assert!(response.answer.is_none());
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].url, "https://a.com");
        assert!(response.results[0].title.is_empty());
        assert!(response.results[0].content.is_empty());
    }

    #[test]
    fn search_response_keeps_unread_provider_fields() {
        let raw = serde_json::json!({
            "query": "rust news",
            "follow_up_questions": null,
            "answer": "Rust shipped.",
            "images": ["https://img.example/a.png"],
            "results": [{"title": "T", "url": "https://t.com", "content": "c"}],
            "response_time": 0.8
        });

        let response: SearchResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(response.extra["query"], "rust news");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["query"], "rust news");
        assert_eq!(json["images"][0], "https://img.example/a.png");
        assert!(json.get("follow_up_questions").is_some());
        assert_eq!(json["answer"], "Rust shipped.");
        assert_eq!(json["results"][0]["url"], "https://t.com");
        assert!(json["extra"].is_null());
    }

    #[test]
    fn search_request_uses_advanced_depth_fields() {
        let request = SearchRequest {
            query: "rust news",
            search_depth: "advanced",
            max_results: 5,
            include_answer: true,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "query": "rust news",
                "search_depth": "advanced",
                "max_results": 5,
                "include_answer": true
            })
        );
    }

    #[test]
    fn extract_response_splits_failures() {
        let response: ExtractResponse = serde_json::from_value(serde_json::json!({
            "results": [{"url": "https://a.com", "raw_content": "body", "images": []}],
            "failed_results": [{"url": "https://b.com", "error": "timeout"}],
            "response_time": 0.4
        }))
        .unwrap();

        assert_eq!(response.results[0].raw_content, "body");
        assert_eq!(response.failed_results[0].error.as_deref(), Some("timeout"));
    }
}
