//! Default LLM configs loaded strictly from environment variables.
//!
//! This module provides convenience constructors for [`LlmModelConfig`],
//! grouped by provider. Currently only **Anthropic** is supported.
//!
//! # Environment variables
//!
//! - `ANTHROPIC_API_KEY`  = API key (mandatory)
//! - `ANTHROPIC_API_BASE` = API base URL (optional, defaults to the public API)
//! - `ANTHROPIC_MODEL`    = model identifier (optional)
//! - `LLM_MAX_TOKENS`     = optional max tokens (u32)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{AiLlmError, env_opt_u32, must_env, validate_http_endpoint},
};

/// Default public API base when `ANTHROPIC_API_BASE` is not set.
const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// Default model when `ANTHROPIC_MODEL` is not set.
const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";

/// Default generation budget when `LLM_MAX_TOKENS` is not set.
const DEFAULT_MAX_TOKENS: u32 = 2048;

/// Constructs the config for the Anthropic evaluation model.
///
/// # Env
/// - `ANTHROPIC_API_KEY` (required)
/// - `ANTHROPIC_API_BASE`, `ANTHROPIC_MODEL`, `LLM_MAX_TOKENS` (optional)
///
/// # Defaults
/// - `temperature = Some(0.3)` (scoring should be consistent, not creative)
/// - `timeout_secs = Some(60)`
///
/// # Errors
/// - [`ConfigError::MissingVar`] if the API key is absent
/// - [`ConfigError::InvalidFormat`] if the base URL has no http(s) scheme
/// - [`ConfigError::InvalidNumber`] if `LLM_MAX_TOKENS` is not a u32
///
/// [`ConfigError::MissingVar`]: crate::error_handler::ConfigError::MissingVar
/// [`ConfigError::InvalidFormat`]: crate::error_handler::ConfigError::InvalidFormat
/// [`ConfigError::InvalidNumber`]: crate::error_handler::ConfigError::InvalidNumber
pub fn config_anthropic() -> Result<LlmModelConfig, AiLlmError> {
    let api_key = must_env("ANTHROPIC_API_KEY")?;

    let endpoint = std::env::var("ANTHROPIC_API_BASE")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    validate_http_endpoint("ANTHROPIC_API_BASE", &endpoint)?;

    let model = std::env::var("ANTHROPIC_MODEL")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?.or(Some(DEFAULT_MAX_TOKENS));

    Ok(LlmModelConfig {
        provider: LlmProvider::Anthropic,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature: Some(0.3),
        top_p: None,
        timeout_secs: Some(60),
    })
}
