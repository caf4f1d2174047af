// src/api/responses.rs
//! Wire model for Responses API payloads.
//!
//! The provider answers in more than one shape depending on call mode:
//! sometimes a single flattened text field, sometimes a sequence of output
//! items each carrying content items. Rather than probing attributes at
//! runtime, the known shapes are modeled as a tagged union and decoded with
//! serde; anything else lands in an explicit [`ResponsePayload::Unrecognized`]
//! variant instead of an error.

use serde::Deserialize;

/// Every response shape the provider is known to emit, plus a catch-all.
///
/// Variant order matters: serde tries `Flattened` first, so a payload that
/// carries both a flattened text field and structured output resolves to the
/// flattened accessor, mirroring the extraction strategy order.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponsePayload {
    /// Convenience shape with the full answer already flattened.
    Flattened { output_text: String },
    /// Structured shape: a sequence of output items to walk.
    Structured { output: Vec<OutputItem> },
    /// Any JSON this client doesn't recognize. Extraction downgrades this
    /// to an empty string, never a hard failure.
    Unrecognized(serde_json::Value),
}

/// One entry in a structured response's output sequence.
///
/// Items other than assistant messages (web-search tool invocations, for
/// example) appear in the same sequence with no `role` or `content`, so both
/// fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<Vec<ContentItem>>,
}

/// One content entry inside an output item. Only text-bearing entries
/// matter to this tool; anything else decodes with `text: None`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentItem {
    #[serde(default)]
    pub text: Option<String>,
}

/// Error envelope the provider wraps failures in.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}

impl ErrorBody {
    /// The most specific code the envelope offers: `code` when present,
    /// otherwise the broader `type` field.
    pub fn code_str(&self) -> Option<&str> {
        self.code.as_deref().or(self.error_type.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_shape_decodes() {
        let json = r#"{"output_text": "Hello there"}"#;
        let payload: ResponsePayload = serde_json::from_str(json).unwrap();
        assert!(matches!(
            payload,
            ResponsePayload::Flattened { ref output_text } if output_text == "Hello there"
        ));
    }

    #[test]
    fn structured_shape_decodes_with_tool_items_present() {
        let json = r#"{
            "output": [
                {"type": "web_search_call", "id": "ws_1", "status": "completed"},
                {
                    "type": "message",
                    "role": "assistant",
                    "content": [{"type": "output_text", "text": "Findings."}]
                }
            ]
        }"#;
        let payload: ResponsePayload = serde_json::from_str(json).unwrap();
        let ResponsePayload::Structured { output } = payload else {
            panic!("expected structured payload");
        };
        assert_eq!(output.len(), 2);
        assert_eq!(output[0].role, None);
        assert_eq!(output[1].role.as_deref(), Some("assistant"));
    }

    #[test]
    fn unknown_shape_falls_back_to_unrecognized() {
        let json = r#"{"completely": {"different": "schema"}}"#;
        let payload: ResponsePayload = serde_json::from_str(json).unwrap();
        assert!(matches!(payload, ResponsePayload::Unrecognized(_)));
    }

    #[test]
    fn error_body_prefers_code_over_type() {
        let json = r#"{"error": {"message": "m", "type": "invalid_request_error", "code": "model_not_found"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code_str(), Some("model_not_found"));

        let json = r#"{"error": {"message": "m", "type": "server_error"}}"#;
        let envelope: ErrorEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.error.code_str(), Some("server_error"));
    }
}
