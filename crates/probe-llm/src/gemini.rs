use async_trait::async_trait;
use serde_json::json;

use crate::{FinishReason, ProviderAdapter, Request, Response, Usage};
use probe_types::ProbeError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const PROVIDER: &str = "google";

// ---------------------------------------------------------------------------
// GeminiAdapter
// ---------------------------------------------------------------------------

pub struct GeminiAdapter {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
    default_model: String,
}

impl GeminiAdapter {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_model(mut self, model: String) -> Self {
        self.default_model = model;
        self
    }

    fn build_request_body(&self, request: &Request) -> serde_json::Value {
        json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.contents }]
            }]
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Response {
        // No candidates is a successful call with no text, not an error.
        let candidate = &json["candidates"][0];

        let finish_reason = match candidate["finishReason"].as_str() {
            Some("STOP") | None => FinishReason::EndTurn,
            Some("MAX_TOKENS") => FinishReason::MaxTokens,
            Some("STOP_SEQUENCE") => FinishReason::StopSequence,
            Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
                FinishReason::Safety
            }
            Some(_) => FinishReason::Other,
        };

        let text_parts: Vec<&str> = candidate["content"]["parts"]
            .as_array()
            .map(|parts| parts.iter().filter_map(|p| p["text"].as_str()).collect())
            .unwrap_or_default();
        let text = if text_parts.is_empty() {
            None
        } else {
            Some(text_parts.concat())
        };

        let usage_meta = &json["usageMetadata"];
        let input_tokens = usage_meta["promptTokenCount"].as_u64().unwrap_or(0);
        let output_tokens = usage_meta["candidatesTokenCount"].as_u64().unwrap_or(0);
        let total_tokens = usage_meta["totalTokenCount"]
            .as_u64()
            .unwrap_or(input_tokens + output_tokens);

        Response {
            id: json["responseId"]
                .as_str()
                .map(String::from)
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            text,
            usage: Usage {
                input_tokens,
                output_tokens,
                total_tokens,
            },
            model: json["modelVersion"].as_str().unwrap_or_default().to_string(),
            finish_reason,
        }
    }
}

impl std::fmt::Debug for GeminiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiAdapter")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn map_error(status: reqwest::StatusCode, body: &str) -> ProbeError {
    let message = extract_error_message(body);
    match status.as_u16() {
        429 => ProbeError::RateLimited {
            provider: PROVIDER.into(),
            message,
        },
        401 | 403 => ProbeError::AuthError {
            provider: PROVIDER.into(),
            message,
        },
        code => ProbeError::ProviderError {
            provider: PROVIDER.into(),
            status: code,
            message,
        },
    }
}

fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}

// ---------------------------------------------------------------------------
// ProviderAdapter implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    async fn complete(&self, request: &Request) -> Result<Response, ProbeError> {
        let body = self.build_request_body(request);
        let model = if request.model.is_empty() {
            &self.default_model
        } else {
            &request.model
        };

        // The key travels in a header so it never appears in URLs or transport errors.
        let url = format!("{}/models/{}:generateContent", self.base_url, model);
        tracing::debug!(%model, prompt_chars = request.contents.chars().count(), "gemini request");

        let resp = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProbeError::Transport {
                provider: PROVIDER.into(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        let response_body = resp.text().await.map_err(|e| ProbeError::Transport {
            provider: PROVIDER.into(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "gemini returned an error status");
            return Err(map_error(status, &response_body));
        }

        let json: serde_json::Value =
            serde_json::from_str(&response_body).map_err(|e| ProbeError::ProviderError {
                provider: PROVIDER.into(),
                status: status.as_u16(),
                message: format!("Failed to parse response JSON: {e}"),
            })?;

        let mut response = self.parse_response(json);
        if response.model.is_empty() {
            response.model = model.to_string();
        }
        tracing::debug!(
            output_tokens = response.usage.output_tokens,
            finish = ?response.finish_reason,
            "gemini response"
        );
        Ok(response)
    }

    fn name(&self) -> &str {
        PROVIDER
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
