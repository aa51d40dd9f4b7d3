use serde::{Deserialize, Serialize};

use crate::tavily::SearchResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub url: String,
}

impl From<&SearchResult> for SourceCitation {
    fn from(result: &SearchResult) -> Self {
        Self {
            title: result.title.clone(),
            url: result.url.clone(),
        }
    }
}

/// Search results flattened into prompt text plus the citations that go
/// back to the caller. Both keep the provider's result order.
#[derive(Debug)]
pub struct WebContext {
    pub text: String,
    pub citations: Vec<SourceCitation>,
}

pub fn build_context(results: &[SearchResult]) -> WebContext {
    let text = results
        .iter()
        .map(|r| format!("Title: {}\nContent: {}\nURL: {}", r.title, r.content, r.url))
        .collect::<Vec<_>>()
        .join("\n\n");
    let citations = results.iter().map(SourceCitation::from).collect();
    WebContext { text, citations }
}

pub fn live_search_prompt(context: &str, question: &str) -> String {
    format!(
        "Based on this current web information:\n\n{context}\n\nQuestion: {question}\n\n\
         Please provide a comprehensive answer using the information above. \
         Include relevant URLs in parentheses when citing information."
    )
}
