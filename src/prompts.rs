// src/prompts.rs
//! Prompt template loading and request composition.
//!
//! Templates are plain text files loaded once per run. A missing or
//! unreadable template aborts startup: a batch run with an empty prompt
//! would burn a provider call per row producing garbage.

use crate::error::AppError;
use std::path::Path;

/// A loaded prompt template, ready to be composed with a target URL.
#[derive(Debug, Clone)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    /// Loads a template from a plain-text file.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| AppError::PromptTemplateNotFound {
                path: path.display().to_string(),
                source,
            })?;
        log::info!(
            "Loaded prompt template from {} ({} chars)",
            path.display(),
            content.len()
        );
        Ok(Self(content))
    }

    /// Builds a template from text already in hand, bypassing the filesystem.
    #[allow(dead_code)] // Used via the library API
    pub fn from_text(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    /// Composes the per-row request input: template text, then the target
    /// marker, then the URL.
    pub fn compose(&self, target_url: &str) -> String {
        format!("{}\nTarget:\n{}", self.0, target_url)
    }

    #[allow(dead_code)] // Used via the library API
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
