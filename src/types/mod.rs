use thiserror::Error;

mod domain_types;

pub use domain_types::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Invalid model name: {name} - {reason}")]
    InvalidModelName { name: String, reason: String },
}
