//! Question routing: keyword classification, optional live web search, and
//! answer assembly.

mod classify;
mod prompt;

pub use classify::{Route, classify};
pub use prompt::SourceCitation;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::gemini::{GeminiError, ResponseGenerator};
use crate::tavily::{SearchProvider, TavilyError};
use prompt::{build_context, live_search_prompt};

pub const STANDARD_FALLBACK: &str =
    "I'm having a little trouble thinking right now. Please try again later.";
pub const SEARCH_FALLBACK: &str =
    "I encountered an issue searching for current information. Please try again.";
pub const GENERATION_FALLBACK: &str =
    "I found current information but had trouble generating a response. Please try again.";

/// The answer handed back to the caller.
///
/// `has_live_data` is true only when the answer was generated from a prompt
/// that embedded search results; `sources` is empty otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    pub sources: Vec<SourceCitation>,
    pub has_live_data: bool,
}

impl AnswerPayload {
    fn without_sources(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: Vec::new(),
            has_live_data: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("live search failed: {0}")]
    Search(#[from] TavilyError),

    #[error("live search returned no results")]
    EmptyResults,

    #[error("generation failed: {0}")]
    Generation(#[from] GeminiError),
}

impl RouteError {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            RouteError::Search(_) | RouteError::EmptyResults => SEARCH_FALLBACK,
            RouteError::Generation(_) => GENERATION_FALLBACK,
        }
    }

    pub fn fallback_payload(&self) -> AnswerPayload {
        AnswerPayload::without_sources(self.fallback_message())
    }
}

pub struct Router<S, G> {
    search: S,
    generator: G,
    max_results: u8,
}

impl<S: SearchProvider, G: ResponseGenerator> Router<S, G> {
    pub fn new(search: S, generator: G, max_results: u8) -> Self {
        Self {
            search,
            generator,
            max_results,
        }
    }

    /// Classifies `question` once and runs the matching path.
    /// The standard path never fails; it falls back to a fixed answer.
    pub async fn enhanced_answer(&self, question: &str) -> Result<AnswerPayload, RouteError> {
        let route = classify(question);
        debug!(?route, "question classified");
        match route {
            Route::LiveSearch => self.answer_with_live_search(question).await,
            Route::Standard => Ok(self.standard_response(question).await),
        }
    }

    /// Like `enhanced_answer`, but live-search failures become their fixed
    /// fallback payload. The cause was already logged where it happened.
    pub async fn answer_or_fallback(&self, question: &str) -> AnswerPayload {
        self.enhanced_answer(question).await.unwrap_or_else(|e| {
            debug!(error = %e, "answering with fallback");
            e.fallback_payload()
        })
    }

    pub async fn standard_response(&self, question: &str) -> AnswerPayload {
        match self.generator.generate(question).await {
            Ok(answer) => AnswerPayload::without_sources(answer),
            Err(e) => {
                warn!(error = %e, "standard generation failed");
                AnswerPayload::without_sources(STANDARD_FALLBACK)
            }
        }
    }

    pub async fn answer_with_live_search(
        &self,
        question: &str,
    ) -> Result<AnswerPayload, RouteError> {
        info!(question, "live search");

        let response = self
            .search
            .search(question, self.max_results)
            .await
            .inspect_err(|e| warn!(error = %e, "search failed"))?;

        if response.results.is_empty() {
            warn!("search returned no results");
            return Err(RouteError::EmptyResults);
        }

        let context = build_context(&response.results);
        let prompt = live_search_prompt(&context.text, question);

        let answer = self
            .generator
            .generate(&prompt)
            .await
            .inspect_err(|e| warn!(error = %e, "live generation failed"))?;

        info!(sources = context.citations.len(), "live answer complete");
        Ok(AnswerPayload {
            answer,
            sources: context.citations,
            has_live_data: true,
        })
    }
}
