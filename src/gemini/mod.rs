//! Gemini text generation: the answer-writing half of the assistant.

pub mod client;
pub mod types;

pub use client::{GeminiClient, GeminiError, ResponseGenerator};
