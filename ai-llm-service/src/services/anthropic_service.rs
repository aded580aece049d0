//! Anthropic (Claude) service for text generation.
//!
//! Minimal, non-streaming client around the Anthropic Messages API:
//! - POST {endpoint}/v1/messages — single-turn message completion
//!
//! Constructor validation:
//! - `cfg.provider` must be `LlmProvider::Anthropic`
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via unified error types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
};

/// Messages API protocol revision sent with every request.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Generation budget applied when the config leaves `max_tokens` unset
/// (the Messages API requires the field).
const FALLBACK_MAX_TOKENS: u32 = 2048;

/// Thin client for the Anthropic Messages API.
///
/// Constructed from a complete [`LlmModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
#[derive(Debug)]
pub struct AnthropicService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_messages: String,
}

impl AnthropicService {
    /// Creates a new [`AnthropicService`] from the given config.
    ///
    /// Validates the provider, API key, and endpoint scheme. Builds an HTTP
    /// client with default headers and a configurable timeout.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `InvalidProvider` if `cfg.provider` is not Anthropic
    /// - [`AiLlmError::Provider`] with `MissingApiKey` if `cfg.api_key` is `None`
    /// - [`AiLlmError::Provider`] with `InvalidEndpoint` if `cfg.endpoint` is invalid
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        // 1) Provider must be Anthropic.
        if cfg.provider != LlmProvider::Anthropic {
            return Err(
                ProviderError::new(Provider::Anthropic, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        // 2) API key must be present.
        let api_key = cfg.api_key.clone().ok_or_else(|| {
            ProviderError::new(Provider::Anthropic, ProviderErrorKind::MissingApiKey)
        })?;

        // 3) Endpoint must use http/https.
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(ProviderError::new(
                Provider::Anthropic,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        // 4) HTTP client: timeout + default headers.
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            "x-api-key",
            header::HeaderValue::from_str(&api_key).map_err(|e| {
                ProviderError::new(
                    Provider::Anthropic,
                    ProviderErrorKind::Decode(format!("invalid API key header: {e}")),
                )
            })?,
        );
        headers.insert(
            "anthropic-version",
            header::HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_messages = format!("{}/v1/messages", base);

        info!(
            provider = ?cfg.provider,
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "AnthropicService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_messages,
        })
    }

    /// Performs a **non-streaming** message completion request (`/v1/messages`).
    ///
    /// Sends a single user message with `prompt` and returns the text of the
    /// first content block. Mapped options from config: `model`, `max_tokens`,
    /// `temperature`, `top_p`.
    ///
    /// # Errors
    /// - [`AiLlmError::Provider`] with `HttpStatus` for non-2xx responses
    /// - [`AiLlmError::HttpTransport`] for client/network failures
    /// - [`AiLlmError::Provider`] with `Decode` if the JSON cannot be parsed
    /// - [`AiLlmError::Provider`] with `EmptyContent` if no text block is returned
    pub async fn generate(&self, prompt: &str) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = MessagesRequest::from_cfg(&self.cfg, prompt);

        debug!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            prompt_len = prompt.len(),
            "POST {}", self.url_messages
        );

        let resp = self
            .client
            .post(&self.url_messages)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_messages.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis(),
                "Anthropic /v1/messages returned non-success status"
            );

            return Err(ProviderError::new(
                Provider::Anthropic,
                ProviderErrorKind::HttpStatus(HttpError {
                    status,
                    url,
                    snippet,
                }),
            )
            .into());
        }

        let out: MessagesResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode /v1/messages response"
                );
                return Err(ProviderError::new(
                    Provider::Anthropic,
                    ProviderErrorKind::Decode(format!(
                        "serde error: {e}; expected `content[0].text`"
                    )),
                )
                .into());
            }
        };

        let content = out
            .content
            .into_iter()
            .find_map(|b| b.text)
            .ok_or_else(|| {
                ProviderError::new(Provider::Anthropic, ProviderErrorKind::EmptyContent)
            })?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "message completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal request body for `/v1/messages` (non-streaming).
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl<'a> MessagesRequest<'a> {
    /// Builds a minimal single-turn request from config and `prompt`.
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str) -> Self {
        Self {
            model: &cfg.model,
            max_tokens: cfg.max_tokens.unwrap_or(FALLBACK_MAX_TOKENS),
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
            temperature: cfg.temperature,
            top_p: cfg.top_p,
        }
    }
}

/// Message for the Anthropic API.
#[derive(Debug, Serialize)]
struct Message<'a> {
    /// One of: "user" | "assistant"
    role: &'a str,
    /// Plain string content; the API also accepts arrays of content parts.
    content: &'a str,
}

/// Minimal response for `/v1/messages`.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
