// src/api/mod.rs
//! OpenAI API interaction — the ability to send one research/copy request
//! and get a completion back.
//!
//! This module provides a data-oriented interface to the Responses API,
//! with clear separation between I/O operations, payload decoding, and
//! text extraction.

pub mod client;
pub mod extract;
pub mod responses;

use crate::error::AppError;
use crate::types::{ModelName, SearchContextSize};
use responses::ResponsePayload;

/// Web-search tool options for a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSearchOptions {
    /// Explicit context size; `None` leaves the provider default.
    pub context_size: Option<SearchContextSize>,
}

/// A single outbound request: one prompt, one model, optionally augmented
/// with the provider's web-search tool.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: ModelName,
    pub input: String,
    /// `Some` enables the provider's web-search tool.
    pub web_search: Option<WebSearchOptions>,
}

/// The ability to obtain a completion from a hosted model.
///
/// This is the fundamental algebra for provider interaction. The row
/// pipeline depends on this trait, never on HTTP details, which is what
/// lets the batch tests run against a scripted fake.
#[async_trait::async_trait]
pub trait CompletionSource: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<ResponsePayload, AppError>;
}

// Re-export the public interface
pub use client::OpenAiHttpClient;
pub use extract::extract_text;
