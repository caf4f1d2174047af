// src/api/client.rs
//! HTTP client for the OpenAI Responses API.
//!
//! This module is the only place where HTTP happens. It handles
//! authentication, the wire encoding of a [`CompletionRequest`], and the
//! decoding of success and error bodies, without parsing answer text or
//! business logic.

use super::responses::{ErrorEnvelope, ResponsePayload};
use super::{CompletionRequest, CompletionSource};
use crate::constants::{REQUEST_TIMEOUT_SECS, RESPONSE_PREVIEW_LENGTH};
use crate::error::{ApiErrorCode, AppError};
use crate::types::ApiKey;
use reqwest::{header, Client};
use serde::Serialize;
use std::time::Duration;

const API_BASE_URL: &str = "https://api.openai.com/v1";

/// A thin wrapper around reqwest Client for Responses API requests.
#[derive(Clone)]
pub struct OpenAiHttpClient {
    client: Client,
}

impl OpenAiHttpClient {
    /// Creates a new HTTP client with bearer authentication and an explicit
    /// request timeout.
    pub fn new(api_key: &ApiKey) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Creates the default headers for Responses API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }
}

/// JSON body of a Responses API call.
#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WireTool {
    WebSearchPreview {
        #[serde(skip_serializing_if = "Option::is_none")]
        search_context_size: Option<&'static str>,
    },
}

impl<'a> WireRequest<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        let tools = match &request.web_search {
            Some(options) => vec![WireTool::WebSearchPreview {
                search_context_size: options.context_size.map(|c| c.as_str()),
            }],
            None => Vec::new(),
        };

        Self {
            model: request.model.as_str(),
            input: &request.input,
            tools,
        }
    }
}

#[async_trait::async_trait]
impl CompletionSource for OpenAiHttpClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<ResponsePayload, AppError> {
        let url = format!("{}/responses", API_BASE_URL);
        log::debug!("POST {} (model: {})", url, request.model);

        let response = self
            .client
            .post(&url)
            .json(&WireRequest::from_request(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(decode_error(status, &body));
        }

        // The union includes an Unrecognized(Value) arm, so any valid JSON
        // decodes; only a non-JSON body can fail here.
        serde_json::from_str(&body).map_err(|e| {
            log::error!("Failed to decode response body: {}", e);
            AppError::MalformedResponse(format!("{} (body: {})", e, preview(&body)))
        })
    }
}

/// Decodes a non-success response into the typed error vocabulary.
fn decode_error(status: reqwest::StatusCode, body: &str) -> AppError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope
                .error
                .code_str()
                .map(ApiErrorCode::from_api_response)
                .unwrap_or_else(|| ApiErrorCode::from_http_status(status.as_u16()));
            AppError::OpenAiService {
                code,
                message: envelope.error.message,
                status,
            }
        }
        Err(_) => AppError::OpenAiService {
            code: ApiErrorCode::from_http_status(status.as_u16()),
            message: format!("HTTP {}: {}", status, preview(body)),
            status,
        },
    }
}

fn preview(body: &str) -> String {
    let mut clipped: String = body.chars().take(RESPONSE_PREVIEW_LENGTH).collect();
    if clipped.len() < body.len() {
        clipped.push_str("...");
    }
    clipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::WebSearchOptions;
    use crate::types::{ModelName, SearchContextSize};

    fn request(web_search: Option<WebSearchOptions>) -> CompletionRequest {
        CompletionRequest {
            model: ModelName::new("gpt-4o").unwrap(),
            input: "prompt\nTarget:\nhttps://example.com".to_string(),
            web_search,
        }
    }

    #[test]
    fn wire_request_omits_tools_when_search_disabled() {
        let request = request(None);
        let json = serde_json::to_value(WireRequest::from_request(&request)).unwrap();
        assert!(json.get("tools").is_none());
        assert_eq!(json["model"], "gpt-4o");
    }

    #[test]
    fn wire_request_encodes_web_search_tool() {
        let request = request(Some(WebSearchOptions::default()));
        let json = serde_json::to_value(WireRequest::from_request(&request)).unwrap();
        assert_eq!(json["tools"][0]["type"], "web_search_preview");
        assert!(json["tools"][0].get("search_context_size").is_none());
    }

    #[test]
    fn wire_request_encodes_search_context_size() {
        let request = request(Some(WebSearchOptions {
            context_size: Some(SearchContextSize::High),
        }));
        let json = serde_json::to_value(WireRequest::from_request(&request)).unwrap();
        assert_eq!(json["tools"][0]["search_context_size"], "high");
    }

    #[test]
    fn error_decoding_uses_typed_codes() {
        let body = r#"{"error": {"message": "Rate limit reached", "type": "requests", "code": "rate_limit_exceeded"}}"#;
        let err = decode_error(reqwest::StatusCode::TOO_MANY_REQUESTS, body);
        match err {
            AppError::OpenAiService { code, .. } => assert_eq!(code, ApiErrorCode::RateLimited),
            other => panic!("expected OpenAiService, got {:?}", other),
        }
    }

    #[test]
    fn unparseable_error_body_falls_back_to_http_status() {
        let err = decode_error(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>");
        match err {
            AppError::OpenAiService { code, .. } => {
                assert_eq!(code, ApiErrorCode::HttpStatus(502));
                assert!(code.is_retryable());
            }
            other => panic!("expected OpenAiService, got {:?}", other),
        }
    }
}
