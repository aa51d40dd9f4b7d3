use std::env;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::types::{ErrorBody, ExtractRequest, ExtractResponse, SearchRequest, SearchResponse};

const API_BASE: &str = "https://api.tavily.com";
const SEARCH_DEPTH: &str = "advanced";
pub const DEFAULT_MAX_RESULTS: u8 = 5;
pub const MAX_RESULTS_LIMIT: u8 = 20;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum TavilyError {
    #[error("TAVILY_API_KEY not set. Get one at https://app.tavily.com")]
    ApiKeyNotSet,

    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("no URLs given to extract")]
    NoUrls,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("API key rejected by Tavily")]
    Unauthorized,

    #[error("API rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("API plan limit reached: {0}")]
    QuotaExhausted(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Web search backed by a third-party provider.
/// Implemented by `TavilyClient` for production; fakes are used in router tests.
pub trait SearchProvider {
    async fn search(&self, query: &str, max_results: u8) -> Result<SearchResponse, TavilyError>;

    async fn extract(&self, urls: &[String]) -> Result<ExtractResponse, TavilyError>;
}

impl<T: SearchProvider> SearchProvider for &T {
    async fn search(&self, query: &str, max_results: u8) -> Result<SearchResponse, TavilyError> {
        (**self).search(query, max_results).await
    }

    async fn extract(&self, urls: &[String]) -> Result<ExtractResponse, TavilyError> {
        (**self).extract(urls).await
    }
}

#[derive(Clone)]
struct ApiKey(String);

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

#[derive(Clone, Debug)]
pub struct TavilyClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl TavilyClient {
    pub fn from_env(http: Client) -> Result<Self, TavilyError> {
        let api_key = env::var("TAVILY_API_KEY").map_err(|_| TavilyError::ApiKeyNotSet)?;
        if api_key.trim().is_empty() {
            return Err(TavilyError::ApiKeyNotSet);
        }
        Ok(Self {
            http,
            api_key: ApiKey(api_key.trim().to_string()),
            base_url: API_BASE.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey("test-key".to_string()),
            base_url: base_url.to_string(),
        }
    }

    async fn post<B, R>(&self, endpoint: &str, body: &B) -> Result<R, TavilyError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}/{endpoint}", self.base_url);

        debug_assert!(
            url.starts_with("https://") || cfg!(test),
            "API key must only be sent over HTTPS"
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key.0)
            .header("User-Agent", crate::USER_AGENT)
            .json(body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = classify_status(status, response).await;
            warn!(endpoint, error = %err, "Tavily API error");
            return Err(err);
        }

        Ok(response.json().await?)
    }
}

impl SearchProvider for TavilyClient {
    async fn search(&self, query: &str, max_results: u8) -> Result<SearchResponse, TavilyError> {
        if query.trim().is_empty() {
            return Err(TavilyError::EmptyQuery);
        }

        let request = SearchRequest {
            query,
            search_depth: SEARCH_DEPTH,
            max_results: max_results.clamp(1, MAX_RESULTS_LIMIT),
            include_answer: true,
        };

        let response: SearchResponse = self.post("search", &request).await?;
        debug!(results = response.results.len(), "tavily search complete");
        Ok(response)
    }

    async fn extract(&self, urls: &[String]) -> Result<ExtractResponse, TavilyError> {
        if urls.is_empty() {
            return Err(TavilyError::NoUrls);
        }
        for raw in urls {
            validate_url(raw)?;
        }

        let request = ExtractRequest {
            urls,
            include_images: false,
        };

        let response: ExtractResponse = self.post("extract", &request).await?;
        debug!(
            pages = response.results.len(),
            failed = response.failed_results.len(),
            "tavily extract complete"
        );
        Ok(response)
    }
}

fn validate_url(raw: &str) -> Result<(), TavilyError> {
    let parsed = url::Url::parse(raw).map_err(|e| TavilyError::InvalidUrl(format!("{raw}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(TavilyError::InvalidUrl(format!(
            "{raw}: scheme {scheme} is not HTTP(S)"
        ))),
    }
}

async fn classify_status(status: StatusCode, response: Response) -> TavilyError {
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|d| d.error)
        .unwrap_or_else(|| {
            let end = text.floor_char_boundary(200);
            format!("HTTP {status}: {}", &text[..end])
        });

    match status.as_u16() {
        401 => TavilyError::Unauthorized,
        429 => TavilyError::RateLimited,
        432 | 433 => TavilyError::QuotaExhausted(message),
        code => TavilyError::Api { code, message },
    }
}
