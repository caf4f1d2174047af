// src/pipeline.rs
//! Per-row processing: build one request, make one provider call, turn the
//! answer into fields.
//!
//! Everything that can go wrong past the URL precondition is caught at the
//! row boundary and reported as a [`RowOutcome::Failed`]; a single bad row
//! never aborts the batch.

use crate::api::{extract_text, CompletionRequest, CompletionSource, WebSearchOptions};
use crate::config::{RunConfig, RunMode};
use crate::constants::{
    CALL_MAX_ATTEMPTS, RESPONSE_PREVIEW_LENGTH, RETRY_INITIAL_DELAY_MS, RETRY_MAX_DELAY_SECS,
};
use crate::error::AppError;
use crate::error_recovery::retry_transient;
use crate::parsing::{self, ParsedFields};
use crate::prompts::PromptTemplate;
use crate::table::LeadRow;
use std::time::Duration;

/// What became of one row.
#[derive(Debug)]
pub enum RowOutcome {
    /// The call succeeded and the answer parsed into fields.
    Completed(ParsedFields),
    /// The row has no target URL; no call was made.
    Skipped,
    /// The call (or decoding) failed after any retries.
    Failed(AppError),
}

/// Processes a single lead row against the provider.
pub struct RowProcessor<'a> {
    client: &'a dyn CompletionSource,
    template: &'a PromptTemplate,
    config: &'a RunConfig,
}

impl<'a> RowProcessor<'a> {
    pub fn new(
        client: &'a dyn CompletionSource,
        template: &'a PromptTemplate,
        config: &'a RunConfig,
    ) -> Self {
        Self {
            client,
            template,
            config,
        }
    }

    /// Runs one row through the call → extract → parse → personalize chain.
    pub async fn process(&self, row: &LeadRow<'_>) -> RowOutcome {
        let Some(target_url) = row.target_url() else {
            return RowOutcome::Skipped;
        };

        log::info!("Target URL: {}", target_url);
        match self.attempt(target_url, row.contact_name()).await {
            Ok(fields) => RowOutcome::Completed(fields),
            Err(error) => RowOutcome::Failed(error),
        }
    }

    async fn attempt(&self, target_url: &str, contact_name: &str) -> Result<ParsedFields, AppError> {
        let request = CompletionRequest {
            model: self.config.model.clone(),
            input: self.template.compose(target_url),
            web_search: Some(WebSearchOptions {
                context_size: self.config.search_context,
            }),
        };

        let payload = retry_transient(
            || self.client.complete(&request),
            CALL_MAX_ATTEMPTS,
            Duration::from_millis(RETRY_INITIAL_DELAY_MS),
            Duration::from_secs(RETRY_MAX_DELAY_SECS),
        )
        .await?;

        let text = extract_text(&payload);
        log::debug!(
            "Response received ({} chars): {}",
            text.len(),
            text.chars().take(RESPONSE_PREVIEW_LENGTH).collect::<String>()
        );

        Ok(match self.config.mode {
            RunMode::Copy => {
                let mut fields = parsing::parse_copy(&text);
                fields.body = parsing::personalize(&fields.body, contact_name);
                ParsedFields::Copy(fields)
            }
            RunMode::Research => ParsedFields::Research(parsing::parse_research(&text)),
        })
    }
}
