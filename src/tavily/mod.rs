//! Tavily web search and page extraction.

pub mod client;
pub mod types;

pub use client::{SearchProvider, TavilyClient, TavilyError};
pub use types::{ExtractResponse, SearchResponse, SearchResult};
