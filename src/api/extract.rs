// src/api/extract.rs
//! Recovers plain text from a decoded response payload.
//!
//! Extraction never fails: a payload this client can't make sense of yields
//! an empty string and a warning in the log, and the downstream parser is
//! built to tolerate empty input.

use super::responses::{OutputItem, ResponsePayload};
use crate::constants::RESPONSE_PREVIEW_LENGTH;

/// Pulls the answer text out of a response payload.
///
/// Strategies, in order:
/// 1. the flattened text accessor, when the payload exposes one;
/// 2. the first text-bearing content item of an assistant-authored output
///    item;
/// 3. text collected from every content-bearing item, when no item carries
///    an assistant role marker.
pub fn extract_text(payload: &ResponsePayload) -> String {
    match payload {
        ResponsePayload::Flattened { output_text } => output_text.clone(),
        ResponsePayload::Structured { output } => extract_from_items(output),
        ResponsePayload::Unrecognized(value) => {
            log::warn!(
                "Unrecognized response shape, treating as empty: {}",
                preview(value)
            );
            String::new()
        }
    }
}

fn extract_from_items(items: &[OutputItem]) -> String {
    // First pass: the assistant's message.
    for item in items {
        if item.role.as_deref() != Some("assistant") {
            continue;
        }
        if let Some(text) = first_text(item) {
            return text.to_string();
        }
    }

    // Fallback: concatenate text from any content-bearing item.
    let mut collected = String::new();
    for item in items {
        let Some(content) = &item.content else {
            continue;
        };
        for entry in content {
            if let Some(text) = &entry.text {
                collected.push_str(text);
            }
        }
    }

    if collected.is_empty() {
        log::warn!("Structured response carried no text-bearing content items");
    }
    collected
}

fn first_text(item: &OutputItem) -> Option<&str> {
    item.content
        .as_deref()?
        .iter()
        .find_map(|entry| entry.text.as_deref())
}

fn preview(value: &serde_json::Value) -> String {
    let rendered = value.to_string();
    let mut clipped: String = rendered.chars().take(RESPONSE_PREVIEW_LENGTH).collect();
    if clipped.len() < rendered.len() {
        clipped.push_str("...");
    }
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::responses::ContentItem;

    fn item(role: Option<&str>, texts: &[&str]) -> OutputItem {
        OutputItem {
            role: role.map(String::from),
            content: Some(
                texts
                    .iter()
                    .map(|t| ContentItem {
                        text: Some(t.to_string()),
                    })
                    .collect(),
            ),
        }
    }

    #[test]
    fn flattened_text_is_returned_verbatim() {
        let payload = ResponsePayload::Flattened {
            output_text: "the answer".to_string(),
        };
        assert_eq!(extract_text(&payload), "the answer");
    }

    #[test]
    fn assistant_item_wins_over_other_items() {
        let payload = ResponsePayload::Structured {
            output: vec![
                item(None, &["tool chatter"]),
                item(Some("assistant"), &["real answer", "second chunk"]),
            ],
        };
        // Only the first text of the assistant item, per the contract.
        assert_eq!(extract_text(&payload), "real answer");
    }

    #[test]
    fn fallback_concatenates_all_content_text() {
        let payload = ResponsePayload::Structured {
            output: vec![
                item(None, &["part one. "]),
                OutputItem {
                    role: Some("user".to_string()),
                    content: None,
                },
                item(None, &["part two."]),
            ],
        };
        assert_eq!(extract_text(&payload), "part one. part two.");
    }

    #[test]
    fn unrecognized_payload_yields_empty_string() {
        let payload = ResponsePayload::Unrecognized(serde_json::json!({"odd": true}));
        assert_eq!(extract_text(&payload), "");
    }

    #[test]
    fn empty_output_sequence_yields_empty_string() {
        let payload = ResponsePayload::Structured { output: vec![] };
        assert_eq!(extract_text(&payload), "");
    }
}
