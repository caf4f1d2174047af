// src/lib.rs
//! coldpress library — turns lead-list CSVs into AI-researched outreach copy
//! and company briefs.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ApiErrorCode`, `ValidationError`
//! - **Configuration** — `RunConfig`, `RunMode`, `CommandLineInput`
//! - **Domain types** — `ApiKey`, `ModelName`, `SearchContextSize`
//! - **API client** — `CompletionSource`, `OpenAiHttpClient`, `ResponsePayload`
//! - **Parsing** — `parse_copy`, `parse_research`, `personalize`
//! - **Table** — `LeadTable`, `LeadRow`, segmentation
//! - **Batch loop** — `BatchRunner`, `RowProcessor`, `CooldownPolicy`

// Internal modules — must match what's in main.rs
mod api;
mod config;
mod constants;
mod error;
mod error_recovery;
mod parsing;
mod pipeline;
mod prompts;
mod runner;
mod table;
mod types;

// --- Error Handling ---
pub use crate::error::{ApiErrorCode, AppError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{BatchArgs, Command, CommandLineInput, ResearchArgs, RunConfig, RunMode};

// --- Domain Types ---
pub use crate::types::{ApiKey, ModelName, SearchContextSize};

// --- Domain Constants ---
pub use crate::constants::{
    CONTACT_EMAIL_COLUMN, CONTACT_NAME_COLUMN, COUNTRY_COLUMN, SUBJECT_SLOTS, URL_COLUMN,
};

// --- API Client ---
pub use crate::api::{
    extract_text,
    responses::{ContentItem, ErrorEnvelope, OutputItem, ResponsePayload},
    CompletionRequest, CompletionSource, OpenAiHttpClient, WebSearchOptions,
};

// --- Parsing ---
pub use crate::parsing::{
    parse_copy, parse_research, personalize, CopyFields, ParsedFields, ResearchFields,
};

// --- Prompts ---
pub use crate::prompts::PromptTemplate;

// --- Table ---
pub use crate::table::{
    segment::{segment_by_country, SegmentOutcome},
    LeadRow, LeadTable,
};

// --- Batch Loop ---
pub use crate::error_recovery::retry_transient;
pub use crate::pipeline::{RowOutcome, RowProcessor};
pub use crate::runner::{BatchRunner, CooldownPolicy, FixedCooldown, RunSummary};
