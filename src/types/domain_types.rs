// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API key for OpenAI API authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key with validation
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();

        if key.is_empty() {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key cannot be empty".to_string(),
            });
        }

        if !key.starts_with("sk-") {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key must start with 'sk-'".to_string(),
            });
        }

        if key.len() < 20 {
            return Err(ValidationError::InvalidApiKey {
                reason: "API key is too short".to_string(),
            });
        }

        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create an API key without validation (only for testing)
    #[cfg(test)]
    pub fn new_unchecked(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        write!(f, "{}...", &self.0[..7.min(self.0.len())])
    }
}

/// Identifier of the hosted model a batch runs against.
///
/// Recorded verbatim in the output table's endpoint column so a sheet of
/// results always says which model produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelName(String);

impl ModelName {
    /// Create a new model name with validation
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ValidationError::InvalidModelName {
                name,
                reason: "Model name cannot be empty".to_string(),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '.' || c == ':')
        {
            return Err(ValidationError::InvalidModelName {
                name: name.clone(),
                reason: "Model name can only contain alphanumeric characters, hyphens, underscores, dots, and colons".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get the model name as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much web-search context the provider gathers before answering.
///
/// "high" trades latency and cost for a deeper research pass; the research
/// mode defaults to it, copy generation leaves the provider default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextSize {
    Low,
    High,
}

impl SearchContextSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

impl fmt::Display for SearchContextSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        assert!(ApiKey::new("sk-abcdefghijklmnopqrstuvwx").is_ok());
        assert!(ApiKey::new("sk-proj-abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("invalid_key_without_prefix").is_err());
        assert!(ApiKey::new("sk-short").is_err());
    }

    #[test]
    fn test_api_key_display_is_redacted() {
        let key = ApiKey::new("sk-abcdefghijklmnopqrstuvwx").unwrap();
        let shown = key.to_string();
        assert!(shown.starts_with("sk-"));
        assert!(!shown.contains("qrstuvwx"));
    }

    #[test]
    fn test_model_name_validation() {
        assert!(ModelName::new("gpt-4o").is_ok());
        assert!(ModelName::new("gpt-4.1-mini").is_ok());
        assert!(ModelName::new("").is_err());
        assert!(ModelName::new("model with spaces").is_err());
    }
}
